//! The font-metric store decoded from `.clm` files: glyph metrics, kerning,
//! large-variant and assembly tables, ligatures and the MATH constants.
//!
//! An [`Otf`] is immutable after loading. Glyphs are owned by their `Otf` and
//! addressed by glyph id; codepoints resolve to glyph ids through a sorted
//! parallel-array index.

pub mod clm;
mod consts;

pub use consts::MathConsts;

use crate::utils::bin_index_of;

/// Glyph id of a glyph that does not exist.
pub const NO_GLYPH: i32 = -1;

/// Basic glyph metrics, in font design units.
#[derive(Debug, Clone, Copy, Default)]
pub struct Metrics {
    pub width: i16,
    pub height: i16,
    pub depth: i16,
    /// Italic correction; how much wider the glyph must act to avoid
    /// collisions with an upright successor.
    pub italics_correction: i16,
    /// Horizontal position at which a top accent attaches, 0 if the font
    /// defines none (callers fall back to width / 2).
    pub top_accent_attachment: i16,
}

/// Kerning against specific right-adjacent glyphs, sorted by glyph id.
#[derive(Debug, Clone, Default)]
pub struct KernRecord {
    fields: Vec<(u16, i16)>,
}

impl KernRecord {
    pub fn new(fields: Vec<(u16, i16)>) -> KernRecord {
        KernRecord { fields }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Kern amount to insert before `glyph`, 0 when the pair is unknown.
    pub fn kern(&self, glyph: u16) -> i16 {
        let i = bin_index_of(
            self.fields.len(),
            |i| glyph as i32 - self.fields[i].0 as i32,
            false,
        );
        if i < 0 {
            0
        } else {
            self.fields[i as usize].1
        }
    }
}

/// Progressively larger alternates of a glyph: `(glyph id, advance)` pairs in
/// ascending advance order. An empty list means the glyph has no variants.
#[derive(Debug, Clone, Default)]
pub struct Variants {
    glyphs: Vec<(u16, u16)>,
}

impl Variants {
    pub fn new(glyphs: Vec<(u16, u16)>) -> Variants {
        Variants { glyphs }
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn count(&self) -> usize {
        self.glyphs.len()
    }

    pub fn glyph(&self, index: usize) -> u16 {
        self.glyphs[index].0
    }

    pub fn advance(&self, index: usize) -> u16 {
        self.glyphs[index].1
    }
}

/// One part of a glyph assembly.
#[derive(Debug, Clone, Copy)]
pub struct GlyphPart {
    pub glyph_id: u16,
    pub start_connector: u16,
    pub end_connector: u16,
    pub full_advance: u16,
    flags: u16,
}

impl GlyphPart {
    const EXTENDER: u16 = 0x0001;

    pub fn new(
        glyph_id: u16,
        start_connector: u16,
        end_connector: u16,
        full_advance: u16,
        flags: u16,
    ) -> GlyphPart {
        GlyphPart { glyph_id, start_connector, end_connector, full_advance, flags }
    }

    /// Extender parts may be repeated any number of times.
    pub fn is_extender(&self) -> bool {
        self.flags & Self::EXTENDER != 0
    }
}

/// Recipe to build an arbitrarily large extensible glyph out of parts.
#[derive(Debug, Clone, Default)]
pub struct GlyphAssembly {
    pub italics_correction: i16,
    pub parts: Vec<GlyphPart>,
}

impl GlyphAssembly {
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

/// Cut-in kerning of one glyph corner: `(height, kern)` pairs with heights
/// ascending.
#[derive(Debug, Clone, Default)]
pub struct MathKern {
    fields: Vec<(i16, i16)>,
}

impl MathKern {
    pub fn new(fields: Vec<(i16, i16)>) -> MathKern {
        MathKern { fields }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Index of the record whose height is the greatest one ≤ `height`.
    pub fn index_of(&self, height: i32) -> usize {
        if self.fields.is_empty() {
            return 0;
        }
        bin_index_of(
            self.fields.len(),
            |i| height - self.fields[i].0 as i32,
            true,
        ) as usize
    }

    /// Kern value at the given correction height, 0 when the corner has no
    /// kern data.
    pub fn kern_at(&self, height: i32) -> i16 {
        if self.fields.is_empty() {
            return 0;
        }
        self.fields[self.index_of(height)].1
    }
}

/// The four-corner math kern record of a glyph.
#[derive(Debug, Clone, Default)]
pub struct MathKernRecord {
    pub top_left: MathKern,
    pub top_right: MathKern,
    pub bottom_left: MathKern,
    pub bottom_right: MathKern,
}

/// The MATH sub-record of a glyph. All sub-tables may be empty.
#[derive(Debug, Clone, Default)]
pub struct MathRecord {
    pub horizontal_variants: Variants,
    pub vertical_variants: Variants,
    /// Alternates tuned for script sizes (`ssty`).
    pub scripts_variants: Variants,
    pub horizontal_assembly: GlyphAssembly,
    pub vertical_assembly: GlyphAssembly,
    pub kern_record: MathKernRecord,
}

/// A single command of a glyph outline.
#[derive(Debug, Clone, Copy)]
pub enum PathCmd {
    MoveTo { x: i16, y: i16 },
    LineTo { x: i16, y: i16 },
    QuadTo { cx: i16, cy: i16, x: i16, y: i16 },
    CubicTo { c1x: i16, c1y: i16, c2x: i16, c2y: i16, x: i16, y: i16 },
    Close,
}

/// Optional vector outline of a glyph, for painters that render paths
/// themselves rather than by glyph id.
#[derive(Debug, Clone, Default)]
pub struct Path {
    pub cmds: Vec<PathCmd>,
}

/// Immutable record of one glyph. Owned by its [`Otf`].
#[derive(Debug, Clone, Default)]
pub struct Glyph {
    metrics: Metrics,
    kern_record: KernRecord,
    math: MathRecord,
    path: Option<Path>,
}

impl Glyph {
    pub fn new(
        metrics: Metrics,
        kern_record: KernRecord,
        math: MathRecord,
        path: Option<Path>,
    ) -> Glyph {
        Glyph { metrics, kern_record, math, path }
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn kern_record(&self) -> &KernRecord {
        &self.kern_record
    }

    pub fn math(&self) -> &MathRecord {
        &self.math
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_ref()
    }
}

/// A ligature trie node: walking children by codepoint yields the glyph id of
/// the ligature formed so far, if any.
#[derive(Debug, Clone, Default)]
pub struct LigaTable {
    liga: i32,
    children: Vec<(u32, LigaTable)>,
}

impl LigaTable {
    pub fn new(liga: i32, children: Vec<(u32, LigaTable)>) -> LigaTable {
        LigaTable { liga, children }
    }

    /// Glyph id of the ligature ending at this node, or [`NO_GLYPH`].
    pub fn liga(&self) -> i32 {
        self.liga
    }

    pub fn child(&self, code: u32) -> Option<&LigaTable> {
        let i = bin_index_of(
            self.children.len(),
            |i| code as i32 - self.children[i].0 as i32,
            false,
        );
        if i < 0 {
            None
        } else {
            Some(&self.children[i as usize].1)
        }
    }
}

/// Class-based kerning: left/right glyph classes index into a matrix of kern
/// values. `lefts`/`rights` are `(glyph id, class index)` pairs sorted by
/// glyph id.
#[derive(Debug, Clone)]
pub struct ClassKerning {
    lefts: Vec<(u16, u16)>,
    rights: Vec<(u16, u16)>,
    column_length: u16,
    table: Vec<i16>,
}

impl ClassKerning {
    pub fn new(
        lefts: Vec<(u16, u16)>,
        rights: Vec<(u16, u16)>,
        column_length: u16,
        table: Vec<i16>,
    ) -> ClassKerning {
        ClassKerning { lefts, rights, column_length, table }
    }

    /// Kern between `left` and `right`, `None` when either glyph has no class
    /// in this table.
    pub fn get(&self, left: u16, right: u16) -> Option<i16> {
        let li = bin_index_of(
            self.lefts.len(),
            |i| left as i32 - self.lefts[i].0 as i32,
            false,
        );
        if li < 0 {
            return None;
        }
        let ri = bin_index_of(
            self.rights.len(),
            |i| right as i32 - self.rights[i].0 as i32,
            false,
        );
        if ri < 0 {
            return None;
        }
        let i = self.lefts[li as usize].1 as usize;
        let j = self.rights[ri as usize].1 as usize;
        self.table.get(i * self.column_length as usize + j).copied()
    }
}

/// A font-metric store loaded from a `.clm` file, immutable after loading.
///
/// Invariants: the codepoint index is strictly ascending and every glyph id
/// it holds is in range of the glyph array (checked by the loader).
#[derive(Debug, Clone)]
pub struct Otf {
    pub(crate) em: u16,
    pub(crate) x_height: u16,
    pub(crate) ascent: u16,
    pub(crate) descent: u16,
    pub(crate) is_math_font: bool,
    pub(crate) has_glyph_path: bool,
    pub(crate) unicodes: Vec<u32>,
    pub(crate) unicode_glyphs: Vec<u16>,
    pub(crate) ligatures: Option<LigaTable>,
    pub(crate) class_kernings: Vec<ClassKerning>,
    pub(crate) glyphs: Vec<Glyph>,
    pub(crate) math_consts: Option<MathConsts>,
}

impl Otf {
    /// Load from a `.clm` file on disk.
    pub fn from_file(path: &str) -> crate::error::ClmResult<Otf> {
        clm::ClmReader::read_file(path)
    }

    /// Load from an in-memory `.clm` byte range.
    pub fn from_bytes(data: &[u8]) -> crate::error::ClmResult<Otf> {
        clm::ClmReader::read_bytes(data)
    }

    /// Design units per em.
    pub fn em(&self) -> u16 {
        self.em
    }

    pub fn x_height(&self) -> u16 {
        self.x_height
    }

    pub fn ascent(&self) -> u16 {
        self.ascent
    }

    pub fn descent(&self) -> u16 {
        self.descent
    }

    pub fn is_math_font(&self) -> bool {
        self.is_math_font
    }

    /// Whether glyphs carry vector outlines for path-drawing painters.
    pub fn has_glyph_path(&self) -> bool {
        self.has_glyph_path
    }

    /// Advance of the space glyph; falls back to em/3 when the font maps no
    /// space character.
    pub fn space(&self) -> u16 {
        match self.glyph_of_unicode(' ' as u32) {
            Some(glyph) => glyph.metrics().width as u16,
            None => self.em / 3,
        }
    }

    /// Glyph id mapped to `codepoint`, or [`NO_GLYPH`].
    pub fn glyph_id(&self, codepoint: u32) -> i32 {
        let index = bin_index_of(
            self.unicodes.len(),
            |i| codepoint as i32 - self.unicodes[i] as i32,
            false,
        );
        if index < 0 {
            NO_GLYPH
        } else {
            self.unicode_glyphs[index as usize] as i32
        }
    }

    pub fn glyph_of_unicode(&self, codepoint: u32) -> Option<&Glyph> {
        let id = self.glyph_id(codepoint);
        if id < 0 {
            None
        } else {
            self.glyph(id)
        }
    }

    pub fn glyph(&self, id: i32) -> Option<&Glyph> {
        if id < 0 {
            return None;
        }
        self.glyphs.get(id as usize)
    }

    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    /// MATH constants; `None` for non-math (text) fonts.
    pub fn math_consts(&self) -> Option<&MathConsts> {
        self.math_consts.as_ref()
    }

    pub fn ligatures(&self) -> Option<&LigaTable> {
        self.ligatures.as_ref()
    }

    /// Class kerning between two adjacent glyphs; the first table containing
    /// both wins.
    pub fn class_kerning(&self, left: u16, right: u16) -> i16 {
        for table in &self.class_kernings {
            if let Some(value) = table.get(left, right) {
                return value;
            }
        }
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kern_record_lookup() {
        let record = KernRecord::new(vec![(3, -20), (7, 15), (20, 4)]);
        assert_eq!(record.kern(3), -20);
        assert_eq!(record.kern(7), 15);
        assert_eq!(record.kern(20), 4);
        assert_eq!(record.kern(8), 0);
        assert!(KernRecord::default().is_empty());
    }

    #[test]
    fn math_kern_closest_height() {
        let kern = MathKern::new(vec![(-100, 10), (0, 20), (250, 30)]);
        // below the lowest height clamps to the first record
        assert_eq!(kern.kern_at(-500), 10);
        assert_eq!(kern.kern_at(-100), 10);
        assert_eq!(kern.kern_at(-50), 10);
        assert_eq!(kern.kern_at(0), 20);
        assert_eq!(kern.kern_at(100), 20);
        assert_eq!(kern.kern_at(9000), 30);
        assert_eq!(MathKern::default().kern_at(100), 0);
    }

    #[test]
    fn class_kerning_matrix() {
        let table = ClassKerning::new(
            vec![(10, 0), (12, 1)],
            vec![(11, 0), (13, 1)],
            2,
            vec![1, 2, 3, 4],
        );
        assert_eq!(table.get(10, 11), Some(1));
        assert_eq!(table.get(10, 13), Some(2));
        assert_eq!(table.get(12, 11), Some(3));
        assert_eq!(table.get(12, 13), Some(4));
        assert_eq!(table.get(9, 11), None);
        assert_eq!(table.get(10, 14), None);
    }

    #[test]
    fn ligature_walk() {
        // "ffi": f -> f -> i
        let trie = LigaTable::new(
            NO_GLYPH,
            vec![(
                'f' as u32,
                LigaTable::new(
                    NO_GLYPH,
                    vec![(
                        'f' as u32,
                        LigaTable::new(100, vec![('i' as u32, LigaTable::new(101, vec![]))]),
                    )],
                ),
            )],
        );
        let ff = trie.child('f' as u32).unwrap().child('f' as u32).unwrap();
        assert_eq!(ff.liga(), 100);
        assert_eq!(ff.child('i' as u32).unwrap().liga(), 101);
        assert!(trie.child('x' as u32).is_none());
    }
}
