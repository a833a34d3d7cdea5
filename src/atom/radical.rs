//! Radicals: a stretched root sign, overbar rule and radicand, with an
//! optional degree.

use crate::atom::{Atom, AtomType};
use crate::boxes::{factory, BoxNode};
use crate::env::Env;

const ROOT_SIGN: u32 = 0x221A;

/// A radical over a (cramped) radicand.
#[derive(Debug, Clone)]
pub struct RadicalAtom {
    base: Box<Atom>,
    degree: Option<Box<Atom>>,
}

impl RadicalAtom {
    pub fn new(base: Atom, degree: Option<Atom>) -> RadicalAtom {
        RadicalAtom { base: Box::new(base), degree: degree.map(Box::new) }
    }

    pub fn atom_type(&self) -> AtomType {
        AtomType::Ordinary
    }

    pub fn create_box(&self, env: &mut Env) -> BoxNode {
        // TeXBook rule 11
        let cramped = env.style().cramp();
        let contents = env.with_style(cramped, |e| self.base.create_box(e));

        let gap = if env.style().is_display() {
            env.math_const(|c| c.radical_display_style_vertical_gap)
        } else {
            env.math_const(|c| c.radical_vertical_gap)
        };
        let rule_thickness = env.math_const(|c| c.radical_rule_thickness);
        let rule_ascender = env.math_const(|c| c.radical_extra_ascender);

        let target = contents.vlen() + gap + rule_thickness;
        let chr = env.get_char(ROOT_SIGN, true, crate::font::FontStyle::INVALID);
        let mut sign = factory::create_v_delim(chr, env, target);

        // distribute a too-large root sign evenly around the radicand
        let delta = (sign.vlen() - target) / 2.0 + rule_thickness;
        let gap = gap.max(delta);

        // the root sign's top lines up with the top of the rule
        sign.shift = sign.height - (contents.height + gap + rule_thickness);

        // extra ascender sits above the rule
        let top_padding = rule_ascender;
        let body = vbox![
            kern![vert: top_padding],
            rule![width: contents.width, height: rule_thickness],
            kern![vert: gap],
            hbox![contents]
        ];

        let radical = match &self.degree {
            None => hbox![sign, body],
            Some(degree) => {
                let root_style = env.style().root();
                let mut degree_box = env.with_style(root_style, |e| degree.create_box(e));
                let kern_before = env.math_const(|c| c.radical_kern_before_degree);
                let kern_after = env.math_const(|c| c.radical_kern_after_degree);
                let raise_percent =
                    env.math_const_raw(|c| c.radical_degree_bottom_raise_percent) / 100.0;
                // the degree's bottom sits a percentage of the sign's extent
                // above the sign's bottom
                let sign_bottom = sign.depth + sign.shift;
                let raise = raise_percent * sign.vlen() - sign_bottom;
                degree_box.shift = -(raise - degree_box.depth);
                hbox![
                    kern![horz: kern_before],
                    degree_box,
                    kern![horz: kern_after],
                    sign,
                    body
                ]
            }
        };
        radical
    }
}
