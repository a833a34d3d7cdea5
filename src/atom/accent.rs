//! Accented atoms: a base with an accent symbol above it.

use crate::atom::{Atom, AtomType};
use crate::boxes::{factory, BoxNode};
use crate::env::Env;
use crate::error::FontResult;
use crate::font::FontStyle;
use crate::symbols::{self, Symbol};

/// A base atom with an accent above. `fit_size` stretches the accent to the
/// base's width; `fake` places the combining character as-is.
#[derive(Debug, Clone)]
pub struct AccentedAtom {
    base: Box<Atom>,
    accent: &'static Symbol,
    fit_size: bool,
    fake: bool,
}

impl AccentedAtom {
    pub fn new(base: Atom, accent_name: &str, fit_size: bool, fake: bool) -> FontResult<AccentedAtom> {
        Ok(AccentedAtom {
            base: Box::new(base),
            accent: symbols::require(accent_name)?,
            fit_size,
            fake,
        })
    }

    pub fn left_type(&self) -> AtomType {
        self.base.left_type()
    }

    pub fn right_type(&self) -> AtomType {
        self.base.right_type()
    }

    pub fn create_box(&self, env: &mut Env) -> BoxNode {
        let cramped = env.style().cramp();
        let base = env.with_style(cramped, |e| self.base.create_box(e));

        let accent_box = if self.fake {
            // the bare combining character, no substitution
            let chr = env.get_char(self.accent.unicode, true, FontStyle::INVALID);
            BoxNode::char_box(chr, env.fctx())
        } else if self.fit_size {
            let chr = env.get_symbol_char(self.accent);
            factory::create_h_delim(chr, env, base.width)
        } else {
            let chr = env.get_symbol_char(self.accent);
            BoxNode::char_box(chr, env.fctx())
        };

        // attachment points: a bare glyph uses its top-accent attachment
        // (falling back to the advance-plus-italic midpoint), anything
        // composite its width midpoint
        let base_offset = match base.single_char() {
            Some(cb) => {
                let ctx = env.fctx();
                let glyph = cb.chr.glyph(ctx);
                if glyph.metrics().top_accent_attachment != 0 {
                    cb.chr.top_accent_attachment(ctx)
                } else {
                    (cb.chr.width(ctx) + cb.chr.italic(ctx)) / 2.0
                }
            }
            None => base.width / 2.0,
        };
        let accent_offset = match accent_box.single_char() {
            Some(cb) => cb.chr.top_accent_attachment(env.fctx()),
            None => accent_box.width / 2.0,
        };

        // do not drop the accent below the accent base height of the font
        let delta = base.height.min(env.math_const(|c| c.accent_base_height));
        let accent_row = hbox![kern![horz: base_offset - accent_offset], accent_box];

        // the kern raises the accent's baseline by base.height - delta
        let row_depth = accent_row.depth;
        vbox![
            accent_row,
            kern![vert: -delta - row_depth],
            hbox![base]
        ]
    }
}
