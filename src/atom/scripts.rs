//! Superscript/subscript placement and big-operator limits.

use crate::atom::{Atom, AtomType, LimitsType};
use crate::boxes::{builders, BoxAlign, BoxNode, CharBox};
use crate::env::Env;
use crate::font::FontContext;
use crate::otf::Glyph;

/// A base with an optional superscript and subscript.
#[derive(Debug, Clone)]
pub struct ScriptsAtom {
    base: Option<Box<Atom>>,
    sup: Option<Box<Atom>>,
    sub: Option<Box<Atom>>,
}

impl ScriptsAtom {
    pub fn new(base: Option<Atom>, sup: Option<Atom>, sub: Option<Atom>) -> ScriptsAtom {
        ScriptsAtom {
            base: base.map(Box::new),
            sup: sup.map(Box::new),
            sub: sub.map(Box::new),
        }
    }

    pub fn left_type(&self) -> AtomType {
        self.base.as_deref().map(Atom::left_type).unwrap_or(AtomType::Ordinary)
    }

    pub fn right_type(&self) -> AtomType {
        self.base.as_deref().map(Atom::right_type).unwrap_or(AtomType::Ordinary)
    }

    pub fn create_box(&self, env: &mut Env) -> BoxNode {
        // operators with limits use the over/under algorithm instead
        if let Some(base) = &self.base {
            if base.left_type() == AtomType::BigOperator && limits_active(base, env) {
                return operator_limits_box(
                    base,
                    self.sup.as_deref(),
                    self.sub.as_deref(),
                    env,
                );
            }
        }

        let base = match &self.base {
            // wrapped so an axis-centered base measures with its shift applied
            Some(base) => hbox![base.create_box(env)],
            None => BoxNode::empty(),
        };
        let sup_style = env.style().sup();
        let sub_style = env.style().sub();
        let mut sup = self
            .sup
            .as_deref()
            .map(|atom| env.with_style(sup_style, |e| atom.create_box(e)));
        let mut sub = self
            .sub
            .as_deref()
            .map(|atom| env.with_style(sub_style, |e| atom.create_box(e)));

        let mut adjust_up = 0.0;
        let mut adjust_down = 0.0;
        let mut sup_kern = 0.0;
        let mut sub_kern = 0.0;
        let base_char = base.single_char();
        let base_is_operator = self
            .base
            .as_deref()
            .map(|b| b.left_type() == AtomType::BigOperator)
            .unwrap_or(false);

        if let Some(sup) = &sup {
            let shift_up = if env.style().is_cramped() {
                env.math_const(|c| c.superscript_shift_up_cramped)
            } else {
                env.math_const(|c| c.superscript_shift_up)
            };
            let drop_max = env.math_const(|c| c.superscript_baseline_drop_max);
            let bottom_min = env.math_const(|c| c.superscript_bottom_min);
            adjust_up = max!(shift_up, base.height - drop_max, bottom_min + sup.depth);

            // italic correction moves the superscript off a slanted base;
            // math kerning refines it when both are bare glyphs
            if let Some(bc) = base_char {
                if !base_is_operator {
                    sup_kern = char_italics(env.fctx(), bc);
                    if let Some(sc) = sup.single_char() {
                        sup_kern += superscript_kern(env.fctx(), bc, sc, adjust_up);
                    }
                }
            }
        }

        if let Some(sub) = &sub {
            let shift_down = env.math_const(|c| c.subscript_shift_down);
            let top_max = env.math_const(|c| c.subscript_top_max);
            let drop_min = env.math_const(|c| c.subscript_baseline_drop_min);
            adjust_down = max!(shift_down, sub.height - top_max, drop_min + base.depth);

            if let Some(bc) = base_char {
                if base_is_operator {
                    // limits-as-scripts tuck the subscript under the slant
                    sub_kern = -char_italics(env.fctx(), bc);
                }
                if let Some(sc) = sub.single_char() {
                    sub_kern += subscript_kern(env.fctx(), bc, sc, adjust_down);
                }
            }
        }

        // force the minimum gap between a joint superscript and subscript
        if let (Some(sup_box), Some(sub_box)) = (&sup, &sub) {
            let gap_min = env.math_const(|c| c.sub_superscript_gap_min);
            let sup_bottom = adjust_up - sup_box.depth;
            let sub_top = sub_box.height - adjust_down;
            if sup_bottom - sub_top < gap_min {
                let adjust = (gap_min - sup_bottom + sub_top) / 2.0;
                adjust_up += adjust;
                adjust_down += adjust;
            }
        }

        // wrap the scripts so a vertical shift on either is absorbed before
        // they are stacked
        if let Some(sup) = &mut sup {
            let inner = std::mem::replace(sup, BoxNode::empty());
            *sup = if sup_kern != 0.0 {
                hbox![kern![horz: sup_kern], inner]
            } else {
                hbox![inner]
            };
        }
        if let Some(sub) = &mut sub {
            let inner = std::mem::replace(sub, BoxNode::empty());
            *sub = if sub_kern != 0.0 {
                hbox![kern![horz: sub_kern], inner]
            } else {
                hbox![inner]
            };
        }

        let scripts = match (sup, sub) {
            (Some(sup), Some(sub)) => {
                let gap = adjust_up + adjust_down - sup.depth - sub.height;
                vbox![offset: adjust_down; sup, kern![vert: gap], sub]
            }
            (Some(sup), None) => {
                let sup_depth = sup.depth;
                vbox![sup, kern![vert: adjust_up - sup_depth]]
            }
            (None, Some(sub)) => {
                vbox![offset: adjust_down; sub]
            }
            (None, None) => return base,
        };

        hbox![base, scripts]
    }
}

/// A big operator together with explicit under/over limits.
#[derive(Debug, Clone)]
pub struct OperatorAtom {
    base: Box<Atom>,
    under: Option<Box<Atom>>,
    over: Option<Box<Atom>>,
    limits: LimitsType,
}

impl OperatorAtom {
    pub fn new(base: Atom, under: Option<Atom>, over: Option<Atom>) -> OperatorAtom {
        let limits = base.limits_type();
        OperatorAtom {
            base: Box::new(base),
            under: under.map(Box::new),
            over: over.map(Box::new),
            limits,
        }
    }

    /// Override the limit convention (`\limits` / `\nolimits`).
    pub fn with_limits(mut self, limits: LimitsType) -> OperatorAtom {
        self.limits = limits;
        self
    }

    pub fn left_type(&self) -> AtomType {
        self.base.left_type()
    }

    pub fn right_type(&self) -> AtomType {
        self.base.right_type()
    }

    pub fn limits_type(&self) -> LimitsType {
        self.limits
    }

    pub fn create_box(&self, env: &mut Env) -> BoxNode {
        let active = match self.limits {
            LimitsType::Display => true,
            LimitsType::NoLimits => false,
            LimitsType::Normal => env.style().is_display(),
        };
        if active {
            operator_limits_box(&self.base, self.over.as_deref(), self.under.as_deref(), env)
        } else {
            ScriptsAtom::new(
                Some((*self.base).clone()),
                self.over.as_deref().cloned(),
                self.under.as_deref().cloned(),
            )
            .create_box(env)
        }
    }
}

fn limits_active(base: &Atom, env: &Env) -> bool {
    match base.limits_type() {
        LimitsType::Display => true,
        LimitsType::NoLimits => false,
        LimitsType::Normal => env.style().is_display(),
    }
}

/// Lay `over` and `under` above and below the operator, all centered on the
/// widest, preserving the operator's baseline.
fn operator_limits_box(
    base: &Atom,
    over: Option<&Atom>,
    under: Option<&Atom>,
    env: &mut Env,
) -> BoxNode {
    // absorb any axis-centering shift before measuring against the limits
    let base_box = hbox![base.create_box(env)];
    let sup_style = env.style().sup();
    let sub_style = env.style().sub();
    let over_box = over.map(|atom| env.with_style(sup_style, |e| atom.create_box(e)));
    let under_box = under.map(|atom| env.with_style(sub_style, |e| atom.create_box(e)));

    // half the italic correction centers limits against a slanted operator
    let delta = base_box
        .single_char()
        .map(|c| char_italics(env.fctx(), c))
        .unwrap_or(0.0);

    let over_width = over_box.as_ref().map(|b| b.width).unwrap_or(0.0);
    let under_width = under_box.as_ref().map(|b| b.width).unwrap_or(0.0);
    let width = max!(
        base_box.width,
        over_width + delta / 2.0,
        under_width + delta / 2.0
    );

    let mut vbox = builders::VBox::new();
    let mut offset = 0.0;

    if let Some(over) = over_box {
        let gap_min = env.math_const(|c| c.upper_limit_gap_min);
        let rise_min = env.math_const(|c| c.upper_limit_baseline_rise_min);
        let gap = gap_min.max(rise_min - over.depth - base_box.height);
        let over_width = over.width;
        vbox.add_node(hbox![align: BoxAlign::Center(over_width); width: width;
            kern![horz: delta / 2.0], over]);
        vbox.add_node(kern![vert: gap]);
    }

    let base_depth = base_box.depth;
    vbox.add_node(crate::atom::frac::align_to(
        base_box,
        width,
        crate::atom::Alignment::Center,
    ));

    if let Some(under) = under_box {
        let gap_min = env.math_const(|c| c.lower_limit_gap_min);
        let drop_min = env.math_const(|c| c.lower_limit_baseline_drop_min);
        let gap = gap_min.max(drop_min - under.height - base_depth);
        let under_height = under.height;
        let under_width = under.width;
        vbox.add_node(kern![vert: gap]);
        vbox.add_node(hbox![align: BoxAlign::Center(under_width); width: width;
            kern![horz: -delta / 2.0], under]);
        offset = base_depth + gap + under_height;
    }

    vbox.set_offset(offset);
    vbox.build()
}

fn char_italics(ctx: &FontContext, cb: CharBox) -> f32 {
    cb.chr.italic(ctx)
}

/// Cut-in kern between a base and its superscript, per the four-corner math
/// kern records: sampled where the script's bottom meets the base and where
/// the base's top meets the script. Takes the larger of the two samples —
/// the smaller one lets the script collide with the base.
fn superscript_kern(ctx: &FontContext, base: CharBox, script: CharBox, shift: f32) -> f32 {
    let scale = base.chr.scale;
    let base_glyph = base.chr.glyph(ctx);
    let script_glyph = script.chr.glyph(ctx);
    let script_depth = script_glyph.metrics().depth as f32 * script.chr.scale;
    let base_height = base_glyph.metrics().height as f32 * scale;

    let h1 = ((shift - script_depth) / scale) as i32;
    let h2 = ((base_height - shift) / scale) as i32;
    let kern1 = corner_kern(base_glyph, script_glyph, h1, true);
    let kern2 = corner_kern(base_glyph, script_glyph, h2, true);
    kern1.max(kern2) as f32 * scale
}

/// Cut-in kern between a base and its subscript, taking the smaller of the
/// two samples.
fn subscript_kern(ctx: &FontContext, base: CharBox, script: CharBox, shift: f32) -> f32 {
    let scale = base.chr.scale;
    let base_glyph = base.chr.glyph(ctx);
    let script_glyph = script.chr.glyph(ctx);
    let script_height = script_glyph.metrics().height as f32 * script.chr.scale;
    let base_depth = base_glyph.metrics().depth as f32 * scale;

    let h1 = ((script_height - shift) / scale) as i32;
    let h2 = (-base_depth / scale) as i32;
    let kern1 = corner_kern(base_glyph, script_glyph, h1, false);
    let kern2 = corner_kern(base_glyph, script_glyph, h2, false);
    kern1.min(kern2) as f32 * scale
}

fn corner_kern(base: &Glyph, script: &Glyph, height: i32, superscript: bool) -> i32 {
    let base_record = &base.math().kern_record;
    let script_record = &script.math().kern_record;
    if superscript {
        base_record.top_right.kern_at(height) as i32
            + script_record.bottom_left.kern_at(height) as i32
    } else {
        base_record.bottom_right.kern_at(height) as i32
            + script_record.top_left.kern_at(height) as i32
    }
}
