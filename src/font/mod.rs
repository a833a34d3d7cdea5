//! Font registration and character resolution.
//!
//! A [`FontContext`] owns every registered font and maps a codepoint plus a
//! [`FontStyle`] to a concrete glyph in a concrete font. Characters travel
//! through layout as cheap [`Char`] values holding ids only — never
//! references into the font tables.

pub mod map;
pub mod style;

pub use map::MathStyle;
pub use style::{find_closest_style, FontStyle};

use std::collections::HashMap;

use crate::error::{ClmResult, FontError, FontResult};
use crate::otf::{Glyph, GlyphAssembly, Otf, Variants, NO_GLYPH};
use crate::symbols::Symbol;

/// Font id of "no font".
pub const NO_FONT: i32 = -1;

/// A registered font: an [`Otf`] plus the id the context assigned to it and
/// the platform font file a painter draws its glyphs from (the engine never
/// opens that file itself).
#[derive(Debug)]
pub struct OtfFont {
    pub id: i32,
    pub font_file: Option<String>,
    pub otf: Otf,
}

/// A logical character-glyph: original codepoint, style-mapped codepoint,
/// font id, glyph id and scale. Metric accessors read the glyph through the
/// font context and multiply by `scale`.
#[derive(Debug, Clone, Copy)]
pub struct Char {
    /// The original codepoint of the character.
    pub code: u32,
    /// The codepoint after math-alphanumeric mapping.
    pub mapped_code: u32,
    pub font_id: i32,
    /// Glyph id in the font, [`NO_GLYPH`] if the font has no mapping.
    pub glyph_id: i32,
    pub scale: f32,
}

impl Default for Char {
    fn default() -> Char {
        Char { code: 0, mapped_code: 0, font_id: NO_FONT, glyph_id: NO_GLYPH, scale: 1.0 }
    }
}

impl Char {
    /// A char-glyph addressed purely by font and glyph id (codepoint 0); used
    /// for assembly parts and variant glyphs which often have no codepoint.
    pub fn only_glyph(font_id: i32, glyph_id: i32, scale: f32) -> Char {
        Char { code: 0, mapped_code: 0, font_id, glyph_id, scale }
    }

    pub fn is_valid(&self) -> bool {
        self.glyph_id >= 0
    }

    /// The glyph behind this char. If the font or glyph cannot be found the
    /// font's '?' glyph is substituted and a warning is logged.
    pub fn glyph<'f>(&self, ctx: &'f FontContext) -> &'f Glyph {
        let font = match ctx.font(self.font_id) {
            Some(font) => font,
            None => {
                warn!("no font with id = {}, using '?' of the main font", self.font_id);
                return ctx.question_mark_glyph(ctx.main_font());
            }
        };
        match font.otf.glyph(self.glyph_id) {
            Some(glyph) => glyph,
            None => {
                warn!(
                    "no glyph for (unicode = {:#x}, id = {}), using '?'",
                    self.mapped_code, self.glyph_id
                );
                ctx.question_mark_glyph(font)
            }
        }
    }

    /// Glyph id to draw: this char's own glyph, or the font's '?' when the
    /// char is invalid.
    pub fn fallback_glyph_id(&self, ctx: &FontContext) -> i32 {
        if self.is_valid() {
            return self.glyph_id;
        }
        let font = ctx.font(self.font_id).unwrap_or_else(|| ctx.main_font());
        font.otf.glyph_id('?' as u32)
    }

    pub fn width(&self, ctx: &FontContext) -> f32 {
        self.glyph(ctx).metrics().width as f32 * self.scale
    }

    pub fn height(&self, ctx: &FontContext) -> f32 {
        self.glyph(ctx).metrics().height as f32 * self.scale
    }

    /// Depth below the baseline, positive downwards (combining marks whose
    /// ink floats above the baseline report a negative depth).
    pub fn depth(&self, ctx: &FontContext) -> f32 {
        self.glyph(ctx).metrics().depth as f32 * self.scale
    }

    pub fn italic(&self, ctx: &FontContext) -> f32 {
        self.glyph(ctx).metrics().italics_correction as f32 * self.scale
    }

    /// Horizontal accent attachment; width/2 when the font defines none.
    pub fn top_accent_attachment(&self, ctx: &FontContext) -> f32 {
        let attachment = self.glyph(ctx).metrics().top_accent_attachment;
        if attachment == 0 {
            self.width(ctx) / 2.0
        } else {
            attachment as f32 * self.scale
        }
    }

    fn variant(&self, index: usize, variants: &Variants) -> Char {
        if variants.is_empty() {
            return *self;
        }
        let index = index.min(variants.count() - 1);
        // only the glyph changes, other fields remain untouched
        Char {
            code: self.code,
            mapped_code: self.mapped_code,
            font_id: self.font_id,
            glyph_id: variants.glyph(index) as i32,
            scale: self.scale,
        }
    }

    pub fn v_larger_count(&self, ctx: &FontContext) -> usize {
        self.glyph(ctx).math().vertical_variants.count()
    }

    /// The index-th vertical larger variant; index 0 is this char itself.
    pub fn v_larger(&self, ctx: &FontContext, index: usize) -> Char {
        self.variant(index, &self.glyph(ctx).math().vertical_variants)
    }

    pub fn h_larger_count(&self, ctx: &FontContext) -> usize {
        self.glyph(ctx).math().horizontal_variants.count()
    }

    pub fn h_larger(&self, ctx: &FontContext, index: usize) -> Char {
        self.variant(index, &self.glyph(ctx).math().horizontal_variants)
    }

    /// The index-th script-size variant (`ssty`).
    pub fn script(&self, ctx: &FontContext, index: usize) -> Char {
        self.variant(index, &self.glyph(ctx).math().scripts_variants)
    }

    pub fn v_assembly<'f>(&self, ctx: &'f FontContext) -> &'f GlyphAssembly {
        &self.glyph(ctx).math().vertical_assembly
    }

    pub fn h_assembly<'f>(&self, ctx: &'f FontContext) -> &'f GlyphAssembly {
        &self.glyph(ctx).math().horizontal_assembly
    }

    /// The char of an assembly part, sharing this char's font and scale.
    pub fn assembly_part(&self, glyph_id: i32) -> Char {
        Char::only_glyph(self.font_id, glyph_id, self.scale)
    }
}

/// Owns all registered fonts. The main (text) font is registered once at
/// construction and never unselected; math fonts are registered by name and
/// exactly one is current at any time.
///
/// Mutating operations (`register_*`, `select_*`, `set_math_style`) must be
/// externally serialized; read access is safe for concurrent use afterwards.
#[derive(Debug)]
pub struct FontContext {
    fonts: Vec<OtfFont>,
    math_fonts: HashMap<String, i32>,
    current_math: i32,
    math_style: MathStyle,
}

impl FontContext {
    /// Create a context over the main (text) font, which gets id 0. Until a
    /// math font is registered, the main font doubles as the math font.
    pub fn new(main: Otf) -> FontContext {
        FontContext {
            fonts: vec![OtfFont { id: 0, font_file: None, otf: main }],
            math_fonts: HashMap::new(),
            current_math: 0,
            math_style: MathStyle::TeX,
        }
    }

    /// Load the main font from a `.clm` file.
    pub fn from_clm_file(path: &str) -> ClmResult<FontContext> {
        Ok(FontContext::new(Otf::from_file(path)?))
    }

    /// Register a math font under `name`. The first registered math font
    /// becomes the current one.
    pub fn register_math_font(&mut self, name: &str, otf: Otf) -> i32 {
        self.register(name, None, otf)
    }

    /// Register a math font loaded from a `.clm` file. A load failure leaves
    /// the context unchanged.
    pub fn register_math_font_file(&mut self, name: &str, clm_path: &str) -> ClmResult<i32> {
        let otf = Otf::from_file(clm_path)?;
        Ok(self.register(name, None, otf))
    }

    /// Register a math font with both the platform font file (for painters)
    /// and the `.clm` metrics.
    pub fn register_math_font_files(
        &mut self,
        name: &str,
        font_path: &str,
        clm_path: &str,
    ) -> ClmResult<i32> {
        let otf = Otf::from_file(clm_path)?;
        Ok(self.register(name, Some(font_path.to_owned()), otf))
    }

    fn register(&mut self, name: &str, font_file: Option<String>, otf: Otf) -> i32 {
        let id = self.fonts.len() as i32;
        self.fonts.push(OtfFont { id, font_file, otf });
        let first_math = self.math_fonts.is_empty();
        self.math_fonts.insert(name.to_owned(), id);
        if first_math {
            self.current_math = id;
        }
        id
    }

    /// Make `name` the current math font.
    pub fn select_math_font(&mut self, name: &str) -> FontResult<()> {
        match self.math_fonts.get(name) {
            Some(&id) => {
                self.current_math = id;
                Ok(())
            }
            None => Err(FontError::NotRegistered(name.to_owned())),
        }
    }

    /// Id of the math font registered under `name`.
    pub fn math_font_id(&self, name: &str) -> FontResult<i32> {
        self.math_fonts
            .get(name)
            .copied()
            .ok_or_else(|| FontError::NotRegistered(name.to_owned()))
    }

    /// Select the default letter styling for formulas.
    pub fn set_math_style(&mut self, style: MathStyle) {
        self.math_style = style;
    }

    pub fn math_style(&self) -> MathStyle {
        self.math_style
    }

    /// The handle lives as long as the context itself.
    pub fn font(&self, id: i32) -> Option<&OtfFont> {
        if id < 0 {
            return None;
        }
        self.fonts.get(id as usize)
    }

    pub fn main_font(&self) -> &OtfFont {
        &self.fonts[0]
    }

    pub fn math_font(&self) -> &OtfFont {
        &self.fonts[self.current_math as usize]
    }

    pub fn math_font_id_current(&self) -> i32 {
        self.current_math
    }

    /// Advance of the main font's space glyph.
    pub fn main_space(&self) -> f32 {
        self.main_font().otf.space() as f32
    }

    /// Resolve a character against the current selections; math mode applies
    /// the math-alphanumeric mapping and resolves in the current math font,
    /// text mode resolves the raw codepoint in the main font. The returned
    /// char has `scale = 1`; the environment sets the scale.
    pub fn get_char(&self, code: u32, style: FontStyle, math_mode: bool) -> Char {
        self.resolve_char(code, style, math_mode, self.math_style, self.current_math)
    }

    /// Resolution with explicit math-style and math-font overrides, for
    /// environments that carry their own selection.
    pub(crate) fn resolve_char(
        &self,
        code: u32,
        style: FontStyle,
        math_mode: bool,
        math_style: MathStyle,
        math_font: i32,
    ) -> Char {
        let (mapped, font_id) = if math_mode {
            (map::map_codepoint(math_style, style, code), math_font)
        } else {
            (code, 0)
        };
        let glyph_id = match self.font(font_id) {
            Some(font) => font.otf.glyph_id(mapped),
            None => NO_GLYPH,
        };
        Char { code, mapped_code: mapped, font_id, glyph_id, scale: 1.0 }
    }

    /// Resolve a named symbol's fixed codepoint in the current math font.
    /// Alphabet bits in `style` still apply, so e.g. a bold style turns a
    /// plain alpha into the bold-alpha glyph.
    pub fn get_symbol_char(&self, symbol: &Symbol, style: FontStyle) -> Char {
        let font_id = self.current_math;
        let code = symbol.unicode;
        let mapped = if style.is_valid() && style != FontStyle::NONE {
            map::map_codepoint(self.math_style, style, code)
        } else {
            code
        };
        let glyph_id = match self.font(font_id) {
            Some(font) => font.otf.glyph_id(mapped),
            None => NO_GLYPH,
        };
        Char { code, mapped_code: mapped, font_id, glyph_id, scale: 1.0 }
    }

    fn question_mark_glyph<'f>(&'f self, font: &'f OtfFont) -> &'f Glyph {
        font.otf
            .glyph_of_unicode('?' as u32)
            .or_else(|| self.main_font().otf.glyph_of_unicode('?' as u32))
            .or_else(|| font.otf.glyph(0))
            .expect("font has no glyphs at all")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::otf::{Glyph, Metrics};

    fn tiny_font(codes: &[(u32, i16)]) -> Otf {
        let mut pairs: Vec<(u32, u16)> = Vec::new();
        let mut glyphs = Vec::new();
        for (i, &(code, width)) in codes.iter().enumerate() {
            pairs.push((code, i as u16));
            glyphs.push(Glyph::new(
                Metrics { width, height: 700, depth: 0, ..Default::default() },
                Default::default(),
                Default::default(),
                None,
            ));
        }
        pairs.sort();
        Otf {
            em: 1000,
            x_height: 500,
            ascent: 800,
            descent: 200,
            is_math_font: true,
            has_glyph_path: false,
            unicodes: pairs.iter().map(|p| p.0).collect(),
            unicode_glyphs: pairs.iter().map(|p| p.1).collect(),
            ligatures: None,
            class_kernings: Vec::new(),
            glyphs,
            math_consts: Some(Default::default()),
        }
    }

    #[test]
    fn selecting_unknown_font_fails() {
        let mut ctx = FontContext::new(tiny_font(&[('?' as u32, 500)]));
        assert_eq!(
            ctx.select_math_font("nope"),
            Err(FontError::NotRegistered("nope".into()))
        );
    }

    #[test]
    fn char_resolution_and_fallback() {
        let mut ctx = FontContext::new(tiny_font(&[('?' as u32, 500)]));
        ctx.register_math_font("m", tiny_font(&[('?' as u32, 450), ('x' as u32, 520)]));
        ctx.set_math_style(MathStyle::Upright);

        let chr = ctx.get_char('x' as u32, FontStyle::NONE, true);
        assert!(chr.is_valid());
        assert_eq!(chr.mapped_code, 'x' as u32);
        assert_close!(chr.width(&ctx), 520.0, 1e-6);

        // unmapped char substitutes '?'
        let chr = ctx.get_char('y' as u32, FontStyle::NONE, true);
        assert!(!chr.is_valid());
        assert_close!(chr.width(&ctx), 450.0, 1e-6);
        assert_eq!(chr.fallback_glyph_id(&ctx), 0);
    }

    #[test]
    fn glyph_of_unicode_matches_indexed_lookup() {
        let otf = tiny_font(&[('?' as u32, 500), ('a' as u32, 430)]);
        let id = otf.glyph_id('a' as u32);
        assert!(id >= 0);
        let direct = otf.glyph_of_unicode('a' as u32).unwrap();
        let indexed = otf.glyph(id).unwrap();
        assert_eq!(direct.metrics().width, indexed.metrics().width);
        assert!(otf.glyph_of_unicode('z' as u32).is_none());
        assert_eq!(otf.glyph_id('z' as u32), NO_GLYPH);
    }
}
