//! Atoms standing for a single character: fixed glyphs, named symbols and
//! alphanumeric characters, plus literal text runs.

use crate::atom::{Atom, AtomType, LimitsType};
use crate::boxes::{builders, BoxNode};
use crate::env::Env;
use crate::font::{Char, FontStyle};
use crate::symbols::Symbol;

/// A character fixed to a concrete glyph, independent of any text style.
#[derive(Debug, Clone)]
pub struct FixedCharAtom {
    chr: Char,
}

impl FixedCharAtom {
    pub fn new(chr: Char) -> FixedCharAtom {
        FixedCharAtom { chr }
    }

    pub fn unicode(&self) -> u32 {
        self.chr.mapped_code
    }

    pub fn create_box(&self, env: &mut Env) -> BoxNode {
        let mut chr = self.chr;
        chr.scale = env.scale();
        env.set_last_font_id(chr.font_id);
        BoxNode::char_box(chr, env.fctx())
    }
}

/// A named symbol from the symbol table.
#[derive(Debug, Clone)]
pub struct SymbolAtom {
    symbol: &'static Symbol,
}

impl SymbolAtom {
    pub fn new(symbol: &'static Symbol) -> SymbolAtom {
        SymbolAtom { symbol }
    }

    pub fn symbol(&self) -> &'static Symbol {
        self.symbol
    }

    pub fn name(&self) -> &'static str {
        self.symbol.name
    }

    pub fn unicode(&self) -> u32 {
        self.symbol.unicode
    }

    pub fn atom_type(&self) -> AtomType {
        self.symbol.atom_type
    }

    pub fn limits_type(&self) -> LimitsType {
        self.symbol.limits
    }

    pub fn create_box(&self, env: &mut Env) -> BoxNode {
        let chr = env.get_symbol_char(self.symbol);
        // big operators grow to the display-operator size and center on the
        // math axis
        if self.symbol.atom_type == AtomType::BigOperator && env.style().is_display() {
            let min_height = env.math_const(|c| c.display_operator_min_height);
            let axis = env.axis_height();
            return crate::boxes::factory::create_v_delim(chr, env, min_height)
                .centered_on_axis(axis);
        }
        BoxNode::char_box(chr, env.fctx())
    }
}

/// One alphanumeric character and the font style to draw it in; the style
/// sentinel `INVALID` defers to the environment.
#[derive(Debug, Clone)]
pub struct CharAtom {
    unicode: u32,
    style: FontStyle,
    math_mode: bool,
}

impl CharAtom {
    pub fn new(unicode: u32, style: FontStyle, math_mode: bool) -> CharAtom {
        CharAtom { unicode, style, math_mode }
    }

    pub fn unicode(&self) -> u32 {
        self.unicode
    }

    pub fn is_math_mode(&self) -> bool {
        self.math_mode
    }

    pub fn create_box(&self, env: &mut Env) -> BoxNode {
        let chr = env.get_char(self.unicode, self.math_mode, self.style);
        BoxNode::char_box(chr, env.fctx())
    }
}

/// A literal run of text, laid out glyph by glyph with pair kerning but no
/// shaping.
#[derive(Debug, Clone)]
pub struct TextAtom {
    text: String,
    math_mode: bool,
}

impl TextAtom {
    pub fn new(text: String, math_mode: bool) -> TextAtom {
        TextAtom { text, math_mode }
    }

    pub fn append(&mut self, code: char) {
        self.text.push(code);
    }

    pub fn is_math_mode(&self) -> bool {
        self.math_mode
    }

    pub fn create_box(&self, env: &mut Env) -> BoxNode {
        let mut hbox = builders::HBox::new();
        let mut prev: Option<Char> = None;
        for character in self.text.chars() {
            if character.is_ascii_whitespace() {
                hbox.add_node(BoxNode::hkern(env.space(self.math_mode)));
                prev = None;
                continue;
            }
            let chr = env.get_char(character as u32, self.math_mode, FontStyle::INVALID);
            if let Some(prev) = prev {
                let kern = pair_kern(env, prev, chr);
                if kern != 0.0 {
                    hbox.add_node(BoxNode::hkern(kern));
                }
            }
            hbox.add_node(BoxNode::char_box(chr, env.fctx()));
            prev = Some(chr);
        }
        hbox.build()
    }
}

/// Kerning between two adjacent glyphs of a text run: the left glyph's own
/// kern pairs, then the font's class kerning.
fn pair_kern(env: &Env, left: Char, right: Char) -> f32 {
    if left.font_id != right.font_id || !left.is_valid() || !right.is_valid() {
        return 0.0;
    }
    let ctx = env.fctx();
    let font = match ctx.font(left.font_id) {
        Some(font) => font,
        None => return 0.0,
    };
    let mut kern = left.glyph(ctx).kern_record().kern(right.glyph_id as u16) as f32;
    if kern == 0.0 {
        kern = font.otf.class_kerning(left.glyph_id as u16, right.glyph_id as u16) as f32;
    }
    kern * left.scale
}

impl From<FixedCharAtom> for Atom {
    fn from(a: FixedCharAtom) -> Atom {
        Atom::Fixed(a)
    }
}
impl From<SymbolAtom> for Atom {
    fn from(a: SymbolAtom) -> Atom {
        Atom::Symbol(a)
    }
}
impl From<CharAtom> for Atom {
    fn from(a: CharAtom) -> Atom {
        Atom::Char(a)
    }
}
impl From<TextAtom> for Atom {
    fn from(a: TextAtom) -> Atom {
        Atom::Text(a)
    }
}
