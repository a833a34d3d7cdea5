//! Decoder for `.clm` compact font-metric files.
//!
//! The format is strictly sequential and big-endian. Every sub-table either
//! carries its own count field or, for the ligature trie, encodes its shape
//! recursively; empty sub-tables are encoded as a zero count. Loading either
//! yields a complete [`Otf`] or fails without touching any caller state.

use std::fs;

use crate::error::{ClmError, ClmResult};
use crate::otf::{
    ClassKerning, Glyph, GlyphAssembly, GlyphPart, KernRecord, LigaTable, MathConsts, MathKern,
    MathKernRecord, MathRecord, Metrics, Otf, Path, PathCmd, Variants,
};

/// The `.clm` format version this crate understands.
pub const CLM_VER: u8 = 4;
/// Leading magic bytes of every `.clm` file.
pub const CLM_MAGIC: [u8; 4] = *b"clm\0";

const FLAG_IS_MATH_FONT: u8 = 0x01;
const FLAG_HAS_GLYPH_PATH: u8 = 0x02;

/// Big-endian reads over a bounded byte window. Reading past the end fails
/// with [`ClmError::Eof`] rather than panicking.
pub struct BinaryReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> BinaryReader<'a> {
    pub fn new(data: &'a [u8]) -> BinaryReader<'a> {
        BinaryReader { data, pos: 0 }
    }

    /// Bytes read so far.
    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn bytes(&mut self, count: usize) -> ClmResult<&'a [u8]> {
        let end = self.pos.checked_add(count).ok_or(ClmError::Eof)?;
        let window = self.data.get(self.pos..end).ok_or(ClmError::Eof)?;
        self.pos = end;
        Ok(window)
    }

    pub fn u8(&mut self) -> ClmResult<u8> {
        Ok(self.bytes(1)?[0])
    }

    pub fn u16(&mut self) -> ClmResult<u16> {
        let b = self.bytes(2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    pub fn i16(&mut self) -> ClmResult<i16> {
        let b = self.bytes(2)?;
        Ok(i16::from_be_bytes([b[0], b[1]]))
    }

    pub fn u32(&mut self) -> ClmResult<u32> {
        let b = self.bytes(4)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub fn i32(&mut self) -> ClmResult<i32> {
        let b = self.bytes(4)?;
        Ok(i32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }
}

/// Reads an [`Otf`] from `.clm` data.
pub struct ClmReader;

impl ClmReader {
    pub fn read_file(path: &str) -> ClmResult<Otf> {
        let data = fs::read(path)?;
        Self::read_bytes(&data)
    }

    pub fn read_bytes(data: &[u8]) -> ClmResult<Otf> {
        let mut reader = BinaryReader::new(data);
        Self::read(&mut reader)
    }

    fn read(reader: &mut BinaryReader) -> ClmResult<Otf> {
        let magic = reader.bytes(4)?;
        if magic != &CLM_MAGIC[..] {
            return Err(ClmError::Corrupt("header magic"));
        }
        let version = reader.u8()?;
        if version != CLM_VER {
            return Err(ClmError::UnsupportedVersion(version));
        }
        let flags = reader.u8()?;
        let is_math_font = flags & FLAG_IS_MATH_FONT != 0;
        let has_glyph_path = flags & FLAG_HAS_GLYPH_PATH != 0;

        let em = reader.u16()?;
        let x_height = reader.u16()?;
        let ascent = reader.u16()?;
        let descent = reader.u16()?;
        debug!("clm metadata: em={}, math={}, path={}", em, is_math_font, has_glyph_path);

        let math_consts = if is_math_font {
            Some(Self::read_math_consts(reader)?)
        } else {
            None
        };

        let (unicodes, unicode_glyphs) = Self::read_unicode_index(reader)?;
        let ligatures = Self::read_ligatures(reader)?;
        let class_kernings = Self::read_class_kernings(reader)?;

        let glyph_count = reader.u16()? as usize;
        let mut glyphs = Vec::with_capacity(glyph_count);
        for _ in 0..glyph_count {
            glyphs.push(Self::read_glyph(is_math_font, has_glyph_path, reader)?);
        }
        debug!("clm glyphs: {} read, {} mapped", glyph_count, unicodes.len());

        for &gid in &unicode_glyphs {
            if gid as usize >= glyph_count {
                return Err(ClmError::Corrupt("unicode index"));
            }
        }

        Ok(Otf {
            em,
            x_height,
            ascent,
            descent,
            is_math_font,
            has_glyph_path,
            unicodes,
            unicode_glyphs,
            ligatures,
            class_kernings,
            glyphs,
            math_consts,
        })
    }

    fn read_math_consts(reader: &mut BinaryReader) -> ClmResult<MathConsts> {
        Ok(MathConsts {
            script_percent_scale_down: reader.i16()?,
            script_script_percent_scale_down: reader.i16()?,
            delimited_sub_formula_min_height: reader.i16()?,
            display_operator_min_height: reader.i16()?,
            math_leading: reader.i16()?,
            axis_height: reader.i16()?,
            accent_base_height: reader.i16()?,
            flattened_accent_base_height: reader.i16()?,
            subscript_shift_down: reader.i16()?,
            subscript_top_max: reader.i16()?,
            subscript_baseline_drop_min: reader.i16()?,
            superscript_shift_up: reader.i16()?,
            superscript_shift_up_cramped: reader.i16()?,
            superscript_bottom_min: reader.i16()?,
            superscript_baseline_drop_max: reader.i16()?,
            sub_superscript_gap_min: reader.i16()?,
            superscript_bottom_max_with_subscript: reader.i16()?,
            space_after_script: reader.i16()?,
            upper_limit_gap_min: reader.i16()?,
            upper_limit_baseline_rise_min: reader.i16()?,
            lower_limit_gap_min: reader.i16()?,
            lower_limit_baseline_drop_min: reader.i16()?,
            stack_top_shift_up: reader.i16()?,
            stack_top_display_style_shift_up: reader.i16()?,
            stack_bottom_shift_down: reader.i16()?,
            stack_bottom_display_style_shift_down: reader.i16()?,
            stack_gap_min: reader.i16()?,
            stack_display_style_gap_min: reader.i16()?,
            stretch_stack_top_shift_up: reader.i16()?,
            stretch_stack_bottom_shift_down: reader.i16()?,
            stretch_stack_gap_above_min: reader.i16()?,
            stretch_stack_gap_below_min: reader.i16()?,
            fraction_numerator_shift_up: reader.i16()?,
            fraction_numerator_display_style_shift_up: reader.i16()?,
            fraction_denominator_shift_down: reader.i16()?,
            fraction_denominator_display_style_shift_down: reader.i16()?,
            fraction_numerator_gap_min: reader.i16()?,
            fraction_num_display_style_gap_min: reader.i16()?,
            fraction_rule_thickness: reader.i16()?,
            fraction_denominator_gap_min: reader.i16()?,
            fraction_denom_display_style_gap_min: reader.i16()?,
            skewed_fraction_horizontal_gap: reader.i16()?,
            skewed_fraction_vertical_gap: reader.i16()?,
            overbar_vertical_gap: reader.i16()?,
            overbar_rule_thickness: reader.i16()?,
            overbar_extra_ascender: reader.i16()?,
            underbar_vertical_gap: reader.i16()?,
            underbar_rule_thickness: reader.i16()?,
            underbar_extra_descender: reader.i16()?,
            radical_vertical_gap: reader.i16()?,
            radical_display_style_vertical_gap: reader.i16()?,
            radical_rule_thickness: reader.i16()?,
            radical_extra_ascender: reader.i16()?,
            radical_kern_before_degree: reader.i16()?,
            radical_kern_after_degree: reader.i16()?,
            radical_degree_bottom_raise_percent: reader.i16()?,
            min_connector_overlap: reader.i16()?,
        })
    }

    fn read_unicode_index(reader: &mut BinaryReader) -> ClmResult<(Vec<u32>, Vec<u16>)> {
        let count = reader.u16()? as usize;
        let mut unicodes = Vec::with_capacity(count);
        for _ in 0..count {
            unicodes.push(reader.u16()? as u32);
        }
        for pair in unicodes.windows(2) {
            if pair[0] >= pair[1] {
                return Err(ClmError::Corrupt("unicode index"));
            }
        }
        let mut glyph_ids = Vec::with_capacity(count);
        for _ in 0..count {
            glyph_ids.push(reader.u16()?);
        }
        Ok((unicodes, glyph_ids))
    }

    fn read_ligatures(reader: &mut BinaryReader) -> ClmResult<Option<LigaTable>> {
        let table = Self::read_liga_node(reader)?;
        if table.liga() < 0 && table.child_count() == 0 {
            Ok(None)
        } else {
            Ok(Some(table))
        }
    }

    fn read_liga_node(reader: &mut BinaryReader) -> ClmResult<LigaTable> {
        let liga = reader.i32()?;
        let count = reader.u16()? as usize;
        let mut children = Vec::with_capacity(count);
        for _ in 0..count {
            let code = reader.u32()?;
            let child = Self::read_liga_node(reader)?;
            children.push((code, child));
        }
        Ok(LigaTable::new(liga, children))
    }

    fn read_class_kernings(reader: &mut BinaryReader) -> ClmResult<Vec<ClassKerning>> {
        let count = reader.u16()? as usize;
        let mut tables = Vec::with_capacity(count);
        for _ in 0..count {
            tables.push(Self::read_class_kerning(reader)?);
        }
        Ok(tables)
    }

    fn read_class_kerning(reader: &mut BinaryReader) -> ClmResult<ClassKerning> {
        let lefts = Self::read_class_kerning_glyphs(reader)?;
        let rights = Self::read_class_kerning_glyphs(reader)?;
        let rows = reader.u16()?;
        let columns = reader.u16()?;
        let len = rows as usize * columns as usize;
        let mut table = Vec::with_capacity(len);
        for _ in 0..len {
            table.push(reader.i16()?);
        }
        for &(_, class) in &lefts {
            if class >= rows {
                return Err(ClmError::Corrupt("class kerning"));
            }
        }
        for &(_, class) in &rights {
            if class >= columns {
                return Err(ClmError::Corrupt("class kerning"));
            }
        }
        Ok(ClassKerning::new(lefts, rights, columns, table))
    }

    fn read_class_kerning_glyphs(reader: &mut BinaryReader) -> ClmResult<Vec<(u16, u16)>> {
        let count = reader.u16()? as usize;
        let mut glyphs = Vec::with_capacity(count);
        for _ in 0..count {
            let glyph = reader.u16()?;
            let class = reader.u16()?;
            glyphs.push((glyph, class));
        }
        Ok(glyphs)
    }

    fn read_glyph(
        is_math_font: bool,
        has_glyph_path: bool,
        reader: &mut BinaryReader,
    ) -> ClmResult<Glyph> {
        let metrics = Metrics {
            width: reader.i16()?,
            height: reader.i16()?,
            depth: reader.i16()?,
            italics_correction: reader.i16()?,
            top_accent_attachment: reader.i16()?,
        };
        let kern_record = Self::read_kerns(reader)?;
        let math = if is_math_font {
            Self::read_math(reader)?
        } else {
            MathRecord::default()
        };
        let path = if has_glyph_path {
            Self::read_path(reader)?
        } else {
            None
        };
        Ok(Glyph::new(metrics, kern_record, math, path))
    }

    fn read_kerns(reader: &mut BinaryReader) -> ClmResult<KernRecord> {
        let count = reader.u16()? as usize;
        let mut fields = Vec::with_capacity(count);
        for _ in 0..count {
            let glyph = reader.u16()?;
            let kern = reader.i16()?;
            fields.push((glyph, kern));
        }
        Ok(KernRecord::new(fields))
    }

    fn read_math(reader: &mut BinaryReader) -> ClmResult<MathRecord> {
        let horizontal_variants = Self::read_variants(reader)?;
        let vertical_variants = Self::read_variants(reader)?;
        let scripts_variants = Self::read_variants(reader)?;
        let horizontal_assembly = Self::read_assembly(reader)?;
        let vertical_assembly = Self::read_assembly(reader)?;
        let kern_record = MathKernRecord {
            top_left: Self::read_math_kern(reader)?,
            top_right: Self::read_math_kern(reader)?,
            bottom_left: Self::read_math_kern(reader)?,
            bottom_right: Self::read_math_kern(reader)?,
        };
        Ok(MathRecord {
            horizontal_variants,
            vertical_variants,
            scripts_variants,
            horizontal_assembly,
            vertical_assembly,
            kern_record,
        })
    }

    fn read_variants(reader: &mut BinaryReader) -> ClmResult<Variants> {
        let count = reader.u16()? as usize;
        let mut glyphs = Vec::with_capacity(count);
        for _ in 0..count {
            let glyph = reader.u16()?;
            let advance = reader.u16()?;
            glyphs.push((glyph, advance));
        }
        Ok(Variants::new(glyphs))
    }

    fn read_assembly(reader: &mut BinaryReader) -> ClmResult<GlyphAssembly> {
        let count = reader.u16()? as usize;
        if count == 0 {
            return Ok(GlyphAssembly::default());
        }
        let italics_correction = reader.i16()?;
        let mut parts = Vec::with_capacity(count);
        for _ in 0..count {
            let glyph_id = reader.u16()?;
            let start_connector = reader.u16()?;
            let end_connector = reader.u16()?;
            let full_advance = reader.u16()?;
            let flags = reader.u16()?;
            parts.push(GlyphPart::new(
                glyph_id,
                start_connector,
                end_connector,
                full_advance,
                flags,
            ));
        }
        Ok(GlyphAssembly { italics_correction, parts })
    }

    fn read_math_kern(reader: &mut BinaryReader) -> ClmResult<MathKern> {
        let count = reader.u16()? as usize;
        let mut fields = Vec::with_capacity(count);
        for _ in 0..count {
            let height = reader.i16()?;
            let kern = reader.i16()?;
            fields.push((height, kern));
        }
        Ok(MathKern::new(fields))
    }

    fn read_path(reader: &mut BinaryReader) -> ClmResult<Option<Path>> {
        let count = reader.u16()? as usize;
        if count == 0 {
            return Ok(None);
        }
        let mut cmds = Vec::with_capacity(count);
        for _ in 0..count {
            let op = reader.u8()?;
            let cmd = match op {
                b'M' => PathCmd::MoveTo { x: reader.i16()?, y: reader.i16()? },
                b'L' => PathCmd::LineTo { x: reader.i16()?, y: reader.i16()? },
                b'Q' => PathCmd::QuadTo {
                    cx: reader.i16()?,
                    cy: reader.i16()?,
                    x: reader.i16()?,
                    y: reader.i16()?,
                },
                b'C' => PathCmd::CubicTo {
                    c1x: reader.i16()?,
                    c1y: reader.i16()?,
                    c2x: reader.i16()?,
                    c2y: reader.i16()?,
                    x: reader.i16()?,
                    y: reader.i16()?,
                },
                b'Z' => PathCmd::Close,
                _ => return Err(ClmError::Corrupt("glyph path")),
            };
            cmds.push(cmd);
        }
        Ok(Some(Path { cmds }))
    }
}

impl LigaTable {
    fn child_count(&self) -> usize {
        self.children.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reader_is_bounded() {
        let mut reader = BinaryReader::new(&[0x12, 0x34, 0x56]);
        assert_eq!(reader.u16().unwrap(), 0x1234);
        assert_eq!(reader.u8().unwrap(), 0x56);
        assert_eq!(reader.u8(), Err(ClmError::Eof));
    }

    #[test]
    fn reads_are_big_endian() {
        let mut reader = BinaryReader::new(&[0x01, 0x02, 0x03, 0x04, 0xFF, 0xFE]);
        assert_eq!(reader.u32().unwrap(), 0x0102_0304);
        assert_eq!(reader.i16().unwrap(), -2);
    }

    #[test]
    fn bad_magic_is_corrupt() {
        let err = ClmReader::read_bytes(b"nope\x04\x00").unwrap_err();
        assert_eq!(err, ClmError::Corrupt("header magic"));
    }

    #[test]
    fn version_mismatch() {
        let mut data = Vec::new();
        data.extend_from_slice(&CLM_MAGIC);
        data.push(CLM_VER + 1);
        data.push(0);
        let err = ClmReader::read_bytes(&data).unwrap_err();
        assert_eq!(err, ClmError::UnsupportedVersion(CLM_VER + 1));
    }

    #[test]
    fn truncated_data_is_eof() {
        let mut data = Vec::new();
        data.extend_from_slice(&CLM_MAGIC);
        data.push(CLM_VER);
        data.push(0);
        data.extend_from_slice(&1000u16.to_be_bytes());
        // metadata cut short
        let err = ClmReader::read_bytes(&data).unwrap_err();
        assert_eq!(err, ClmError::Eof);
    }
}
