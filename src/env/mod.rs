//! The typesetting environment: current TeX style, text size, font-style
//! words and font selection, threaded through every `create_box` call.

pub mod units;

pub use units::{Dimen, Units, UnitType};

use std::sync::atomic::{AtomicU32, Ordering};

use crate::error::FontResult;
use crate::font::{map, Char, FontContext, FontStyle, MathStyle, NO_FONT};
use crate::otf::MathConsts;
use crate::symbols::Symbol;

static PIXELS_PER_POINT: AtomicU32 = AtomicU32::new(0x3F80_0000); // 1.0f32

/// Pixels per point, set from the display DPI. Defaults to 1.
pub fn pixels_per_point() -> f32 {
    f32::from_bits(PIXELS_PER_POINT.load(Ordering::Relaxed))
}

pub fn set_pixels_per_point(value: f32) {
    PIXELS_PER_POINT.store(value.to_bits(), Ordering::Relaxed);
}

/// The styles TeX typesets math in, as the integer encoding 0..7: display=0,
/// text=2, script=4, scriptScript=6; odd values are the cramped variants.
/// Style transitions are integer arithmetic on this index (TeXBook p. 441).
#[derive(Serialize, Deserialize)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum TexStyle {
    Display = 0,
    DisplayCramped = 1,
    Text = 2,
    TextCramped = 3,
    Script = 4,
    ScriptCramped = 5,
    ScriptScript = 6,
    ScriptScriptCramped = 7,
}

impl TexStyle {
    fn from_index(i: u8) -> TexStyle {
        use TexStyle::*;
        match i.min(7) {
            0 => Display,
            1 => DisplayCramped,
            2 => Text,
            3 => TextCramped,
            4 => Script,
            5 => ScriptCramped,
            6 => ScriptScript,
            _ => ScriptScriptCramped,
        }
    }

    fn index(self) -> u8 {
        self as u8
    }

    pub fn is_cramped(self) -> bool {
        self.index() % 2 == 1
    }

    /// True for display and displayCramped.
    pub fn is_display(self) -> bool {
        self.index() < 2
    }

    pub fn cramp(self) -> TexStyle {
        Self::from_index(self.index() | 1)
    }

    /// Style of a numerator.
    pub fn num(self) -> TexStyle {
        let s = self.index();
        Self::from_index(s + 2 - 2 * (s / 6))
    }

    /// Style of a denominator: always cramped.
    pub fn dnom(self) -> TexStyle {
        let s = self.index();
        Self::from_index(2 * (s / 2) + 1 + 2 - 2 * (s / 6))
    }

    /// Style of a subscript: always cramped.
    pub fn sub(self) -> TexStyle {
        let s = self.index();
        Self::from_index(2 * (s / 4) + 4 + 1)
    }

    /// Style of a superscript: keeps crampedness.
    pub fn sup(self) -> TexStyle {
        let s = self.index();
        Self::from_index(2 * (s / 4) + 4 + s % 2)
    }

    /// Style of a radical degree.
    pub fn root(self) -> TexStyle {
        TexStyle::ScriptScript
    }
}

/// Carries everything layout needs: style, sizes, font-style words and the
/// font context. Mutations during a `create_box` traversal are scoped — every
/// push is balanced by a pop on every exit path.
pub struct Env<'f> {
    fctx: &'f FontContext,
    style: TexStyle,
    text_size: f32,
    text_width: f32,
    line_space: f32,
    math_font_style: FontStyle,
    text_font_style: FontStyle,
    // current selection, copied from the context and switchable per formula
    math_style: MathStyle,
    math_font_id: i32,
    last_font_id: i32,
}

impl<'f> Env<'f> {
    pub fn new(fctx: &'f FontContext, style: TexStyle, text_size: f32) -> Env<'f> {
        Env {
            fctx,
            style,
            text_size,
            text_width: 0.0,
            line_space: 0.0,
            math_font_style: FontStyle::NONE,
            text_font_style: FontStyle::NONE,
            math_style: fctx.math_style(),
            math_font_id: fctx.math_font_id_current(),
            last_font_id: NO_FONT,
        }
    }

    pub fn fctx(&self) -> &'f FontContext {
        self.fctx
    }

    pub fn style(&self) -> TexStyle {
        self.style
    }

    pub fn set_style(&mut self, style: TexStyle) {
        self.style = style;
    }

    /// Runs `body` under `style`, restoring the previous style afterwards.
    pub fn with_style<T>(&mut self, style: TexStyle, body: impl FnOnce(&mut Env<'f>) -> T) -> T {
        let saved = self.style;
        self.style = style;
        let result = body(self);
        self.style = saved;
        result
    }

    /// Scoped font-style change. Nested calls OR the bits in and clear them
    /// on exit; non-nested calls replace the whole style word and restore it.
    /// The pop happens on every exit path.
    pub fn with_font_style<T>(
        &mut self,
        style: FontStyle,
        math_mode: bool,
        nested: bool,
        body: impl FnOnce(&mut Env<'f>) -> T,
    ) -> T {
        let target = if math_mode {
            &mut self.math_font_style
        } else {
            &mut self.text_font_style
        };
        let saved = *target;
        *target = if nested { saved.union(style) } else { style };
        let result = body(self);
        let target = if math_mode {
            &mut self.math_font_style
        } else {
            &mut self.text_font_style
        };
        *target = saved;
        result
    }

    pub fn math_font_style(&self) -> FontStyle {
        self.math_font_style
    }

    pub fn text_font_style(&self) -> FontStyle {
        self.text_font_style
    }

    pub fn text_size(&self) -> f32 {
        self.text_size
    }

    pub fn text_width(&self) -> f32 {
        self.text_width
    }

    pub fn line_space(&self) -> f32 {
        self.line_space
    }

    pub fn set_text_width(&mut self, dimen: Dimen) -> &mut Self {
        self.text_width = Units::dimen(dimen, self);
        self
    }

    pub fn set_line_space(&mut self, dimen: Dimen) -> &mut Self {
        self.line_space = Units::dimen(dimen, self);
        self
    }

    /// Switch the current math font (and optionally the letter styling) for
    /// the rest of this environment. Registered fonts only.
    pub fn select_math_font(&mut self, name: &str, style: MathStyle) -> FontResult<()> {
        self.math_font_id = self.fctx.math_font_id(name)?;
        self.math_style = style;
        Ok(())
    }

    pub fn math_style(&self) -> MathStyle {
        self.math_style
    }

    fn math_consts(&self) -> Option<&MathConsts> {
        self.fctx.font(self.math_font_id)?.otf.math_consts()
    }

    /// Glyph scale of `style`: 1 above script, else the MATH percent-scale
    /// constants. Cramped variants share the scale of their base style.
    pub fn scale_of(&self, style: TexStyle) -> f32 {
        if style < TexStyle::Script {
            return 1.0;
        }
        let consts = match self.math_consts() {
            Some(consts) => consts,
            None => return 1.0,
        };
        let percent = if style < TexStyle::ScriptScript {
            consts.script_percent_scale_down
        } else {
            consts.script_script_percent_scale_down
        };
        percent as f32 / 100.0
    }

    pub fn scale(&self) -> f32 {
        self.scale_of(self.style)
    }

    /// Design units per em of the current math font.
    pub fn upem(&self) -> f32 {
        self.fctx
            .font(self.math_font_id)
            .map(|f| f.otf.em() as f32)
            .unwrap_or(1000.0)
    }

    /// Current em size in design units, scaled by style.
    pub fn em(&self) -> f32 {
        self.upem() * self.scale()
    }

    /// Pixels per em at the current text size.
    pub fn ppem(&self) -> f32 {
        pixels_per_point() * self.text_size
    }

    /// x-height of the font that produced the last glyph, falling back to
    /// the current math font.
    pub fn x_height(&self) -> f32 {
        let font = self
            .fctx
            .font(self.last_font_id)
            .unwrap_or_else(|| self.fctx.math_font());
        font.otf.x_height() as f32 * self.scale()
    }

    /// Width of a space in the current mode.
    pub fn space(&self, math_mode: bool) -> f32 {
        if math_mode {
            let space = self
                .fctx
                .font(self.math_font_id)
                .map(|f| f.otf.space() as f32)
                .unwrap_or(0.0);
            space * self.scale()
        } else {
            self.fctx.main_space() * self.scale()
        }
    }

    /// The fraction rule thickness, scaled.
    pub fn rule_thickness(&self) -> f32 {
        self.math_const(|c| c.fraction_rule_thickness)
    }

    /// Height of the math axis above the baseline, scaled.
    pub fn axis_height(&self) -> f32 {
        self.math_const(|c| c.axis_height)
    }

    /// A MATH constant in design units, scaled by the current style.
    pub fn math_const(&self, field: impl Fn(&MathConsts) -> i16) -> f32 {
        self.math_consts()
            .map(|c| field(c) as f32)
            .unwrap_or(0.0)
            * self.scale()
    }

    /// A MATH constant in design units, unscaled.
    pub fn math_const_raw(&self, field: impl Fn(&MathConsts) -> i16) -> f32 {
        self.math_consts().map(|c| field(c) as f32).unwrap_or(0.0)
    }

    pub fn last_font_id(&self) -> i32 {
        self.last_font_id
    }

    pub fn set_last_font_id(&mut self, id: i32) {
        if id != NO_FONT {
            self.last_font_id = id;
        }
    }

    /// Resolve a character. A `FontStyle::INVALID` style means "use the
    /// environment's current font-style word" (the math one in math mode,
    /// the text one otherwise). The char's scale is the current style scale.
    pub fn get_char(&mut self, code: u32, math_mode: bool, style: FontStyle) -> Char {
        let target = if style.is_valid() {
            style
        } else if math_mode {
            self.math_font_style
        } else {
            self.text_font_style
        };
        let mut chr =
            self.fctx
                .resolve_char(code, target, math_mode, self.math_style, self.math_font_id);
        chr.scale = self.scale();
        self.set_last_font_id(chr.font_id);
        chr
    }

    /// Resolve a named symbol under the current math font style.
    pub fn get_symbol_char(&mut self, symbol: &Symbol) -> Char {
        let mut chr = self.fctx.get_symbol_char(symbol, self.math_font_style);
        chr.scale = self.scale();
        self.set_last_font_id(chr.font_id);
        chr
    }

    /// The math-alphanumeric mapping the environment would apply, without
    /// resolving a glyph.
    pub fn map_codepoint(&self, code: u32, style: FontStyle) -> u32 {
        let target = if style.is_valid() { style } else { self.math_font_style };
        map::map_codepoint(self.math_style, target, code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_transitions() {
        use TexStyle::*;
        assert_eq!(Display.num(), Text);
        assert_eq!(Text.num(), Script);
        assert_eq!(Script.num(), ScriptScript);
        assert_eq!(ScriptScript.num(), ScriptScript);

        assert_eq!(Display.dnom(), TextCramped);
        assert_eq!(TextCramped.dnom(), ScriptCramped);
        assert_eq!(ScriptScript.dnom(), ScriptScriptCramped);

        assert_eq!(Display.sup(), Script);
        assert_eq!(DisplayCramped.sup(), ScriptCramped);
        assert_eq!(Script.sup(), ScriptScript);
        assert_eq!(ScriptScriptCramped.sup(), ScriptScriptCramped);

        assert_eq!(Display.sub(), ScriptCramped);
        assert_eq!(Script.sub(), ScriptScriptCramped);

        assert_eq!(Display.cramp(), DisplayCramped);
        assert_eq!(DisplayCramped.cramp(), DisplayCramped);
        assert_eq!(Text.root(), ScriptScript);
        assert!(TextCramped.is_cramped());
        assert!(!ScriptScript.is_cramped());
    }
}
