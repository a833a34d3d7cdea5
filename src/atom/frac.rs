//! The fraction atom: numerator over denominator, with or without a rule.

use crate::atom::{Alignment, Atom};
use crate::boxes::{BoxAlign, BoxNode};
use crate::env::{Dimen, Env, Units};

/// A fraction. The rule thickness defaults to the font's
/// `fractionRuleThickness`; rule-less fractions (`\atop`) stack numerator and
/// denominator around the axis with the same gaps.
#[derive(Debug, Clone)]
pub struct FracAtom {
    num: Box<Atom>,
    dnom: Box<Atom>,
    rule: bool,
    thickness: Dimen,
    num_align: Alignment,
    dnom_align: Alignment,
}

fn check_align(align: Alignment) -> Alignment {
    match align {
        Alignment::Left | Alignment::Right => align,
        _ => Alignment::Center,
    }
}

impl FracAtom {
    pub fn new(num: Atom, dnom: Atom, rule: bool, thickness: Dimen) -> FracAtom {
        FracAtom {
            num: Box::new(num),
            dnom: Box::new(dnom),
            rule,
            thickness,
            num_align: Alignment::Center,
            dnom_align: Alignment::Center,
        }
    }

    pub fn with_alignment(num: Atom, dnom: Atom, num_align: Alignment, dnom_align: Alignment) -> FracAtom {
        FracAtom {
            num: Box::new(num),
            dnom: Box::new(dnom),
            rule: true,
            thickness: Dimen::ZERO,
            num_align: check_align(num_align),
            dnom_align: check_align(dnom_align),
        }
    }

    pub fn create_box(&self, env: &mut Env) -> BoxNode {
        let bar = if !self.rule {
            0.0
        } else if self.thickness.is_zero() {
            env.math_const(|c| c.fraction_rule_thickness)
        } else {
            Units::dimen(self.thickness, env)
        };

        let num_style = env.style().num();
        let dnom_style = env.style().dnom();
        let num = env.with_style(num_style, |e| self.num.create_box(e));
        let dnom = env.with_style(dnom_style, |e| self.dnom.create_box(e));

        let width = num.width.max(dnom.width);
        let num = align_to(num, width, self.num_align);
        let dnom = align_to(dnom, width, self.dnom_align);

        let axis = env.axis_height();
        let display = env.style().is_display();
        let (shift_up, shift_down, gap_num, gap_dnom) = if display {
            (
                env.math_const(|c| c.fraction_numerator_display_style_shift_up),
                env.math_const(|c| c.fraction_denominator_display_style_shift_down),
                env.math_const(|c| c.fraction_num_display_style_gap_min),
                env.math_const(|c| c.fraction_denom_display_style_gap_min),
            )
        } else {
            (
                env.math_const(|c| c.fraction_numerator_shift_up),
                env.math_const(|c| c.fraction_denominator_shift_down),
                env.math_const(|c| c.fraction_numerator_gap_min),
                env.math_const(|c| c.fraction_denominator_gap_min),
            )
        };

        // edge clearances between the parts and the rule; the numerator's
        // preferred baseline shift wins when it clears the minimum gap
        let kern_num = (shift_up - axis - bar / 2.0 - num.depth).max(gap_num);
        let kern_dnom = (shift_down + axis - bar / 2.0 - dnom.height).max(gap_dnom);
        let offset = dnom.height + kern_dnom + bar / 2.0 - axis;

        if bar > 0.0 {
            vbox![offset: offset;
                num,
                kern![vert: kern_num],
                rule![width: width, height: bar],
                kern![vert: kern_dnom],
                dnom
            ]
        } else {
            vbox![offset: offset;
                num,
                kern![vert: kern_num + kern_dnom],
                dnom
            ]
        }
    }
}

/// Wrap `node` in an hbox of `width` with the requested alignment. Always
/// wraps, so a vertical shift on `node` is absorbed before the result is
/// stacked into a vbox.
pub(crate) fn align_to(node: BoxNode, width: f32, align: Alignment) -> BoxNode {
    let content = node.width;
    let alignment = match align {
        Alignment::Left => BoxAlign::Left,
        Alignment::Right => BoxAlign::Right(content),
        _ => BoxAlign::Center(content),
    };
    let width = width.max(content);
    hbox![align: alignment; width: width; node]
}
