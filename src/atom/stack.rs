//! Over/under stacks, anchored z-stacks and extensible symbols.
//!
//! Stacks lay out in two passes: the over and under parts are measured
//! first, and an extensible base (a stretchy arrow or brace) is then built
//! to the measured width. No box ever points back into the stack it lives
//! in.

use crate::atom::{Alignment, Atom, AtomType};
use crate::boxes::{builders, factory, BoxAlign, BoxNode};
use crate::env::{Dimen, Env, Units};
use crate::symbols::Symbol;

/// One stacked part and how to space it from the base.
#[derive(Debug, Clone)]
pub struct StackArgs {
    pub atom: Option<Box<Atom>>,
    /// explicit gap; ignored when `auto_space` is set
    pub space: Dimen,
    /// lay the part out in script style
    pub is_script: bool,
    /// space with the MATH stretch-stack/limit constants
    pub auto_space: bool,
}

impl StackArgs {
    pub fn none() -> StackArgs {
        StackArgs { atom: None, space: Dimen::ZERO, is_script: false, auto_space: false }
    }

    pub fn auto(atom: Atom, is_script: bool) -> StackArgs {
        StackArgs {
            atom: Some(Box::new(atom)),
            space: Dimen::ZERO,
            is_script,
            auto_space: true,
        }
    }

    pub fn spaced(atom: Atom, space: Dimen, is_script: bool) -> StackArgs {
        StackArgs { atom: Some(Box::new(atom)), space, is_script, auto_space: false }
    }

    pub fn is_present(&self) -> bool {
        self.atom.is_some()
    }
}

/// Which part of a stack to lay out first; the order only affects the
/// sequence of env side effects (font switches) during measurement.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StackElement {
    Over,
    Under,
    Base,
}

const DEFAULT_ORDER: [StackElement; 3] =
    [StackElement::Over, StackElement::Under, StackElement::Base];

/// A base atom with optional over and under parts.
#[derive(Debug, Clone)]
pub struct StackAtom {
    base: Option<Box<Atom>>,
    over: StackArgs,
    under: StackArgs,
    order: Vec<StackElement>,
}

impl StackAtom {
    pub fn new(base: Option<Atom>, over: StackArgs, under: StackArgs) -> StackAtom {
        StackAtom {
            base: base.map(Box::new),
            over,
            under,
            order: DEFAULT_ORDER.to_vec(),
        }
    }

    pub fn with_order(mut self, order: Vec<StackElement>) -> StackAtom {
        self.order = order;
        self
    }

    pub fn set_base(&mut self, base: Atom) {
        self.base = Some(Box::new(base));
    }

    pub fn left_type(&self) -> AtomType {
        self.base.as_deref().map(Atom::left_type).unwrap_or(AtomType::Ordinary)
    }

    pub fn right_type(&self) -> AtomType {
        self.base.as_deref().map(Atom::right_type).unwrap_or(AtomType::Ordinary)
    }

    pub fn create_box(&self, env: &mut Env) -> BoxNode {
        let mut over_box: Option<BoxNode> = None;
        let mut under_box: Option<BoxNode> = None;
        let mut base_box: Option<BoxNode> = None;

        // first pass: measure in the requested order, except that the base
        // always waits for the parts so an extensible base can take their
        // width
        for element in &self.order {
            match element {
                StackElement::Over => {
                    if let Some(atom) = self.over.atom.as_deref() {
                        let style = if self.over.is_script {
                            env.style().sup()
                        } else {
                            env.style()
                        };
                        over_box = Some(env.with_style(style, |e| atom.create_box(e)));
                    }
                }
                StackElement::Under => {
                    if let Some(atom) = self.under.atom.as_deref() {
                        let style = if self.under.is_script {
                            env.style().sub()
                        } else {
                            env.style()
                        };
                        under_box = Some(env.with_style(style, |e| atom.create_box(e)));
                    }
                }
                StackElement::Base => {}
            }
        }

        let parts_width = over_box
            .as_ref()
            .map(|b| b.width)
            .unwrap_or(0.0)
            .max(under_box.as_ref().map(|b| b.width).unwrap_or(0.0));

        // second pass: the base, sized to the parts when extensible; wrapped
        // so an axis-centering shift is absorbed before measuring
        if let Some(base) = self.base.as_deref() {
            base_box = Some(match base {
                Atom::Extensible(ext) => ext.create_box_with_width(env, parts_width),
                _ => base.create_box(env),
            });
        }
        let base_box = hbox![base_box.unwrap_or_else(BoxNode::empty)];

        let width = parts_width.max(base_box.width);
        let base_height = base_box.height;
        let base_depth = base_box.depth;

        let mut vbox = builders::VBox::new();
        let mut offset = 0.0;

        if let Some(over) = over_box {
            let gap = part_gap(env, &self.over, over.depth, base_height, true);
            let content = over.width;
            vbox.add_node(hbox![align: BoxAlign::Center(content); width: width; over]);
            vbox.add_node(kern![vert: gap]);
        }

        let content = base_box.width;
        vbox.add_node(hbox![align: BoxAlign::Center(content); width: width; base_box]);

        if let Some(under) = under_box {
            let gap = part_gap(env, &self.under, under.height, base_depth, false);
            let under_height = under.height;
            let content = under.width;
            vbox.add_node(kern![vert: gap]);
            vbox.add_node(hbox![align: BoxAlign::Center(content); width: width; under]);
            offset = base_depth + gap + under_height;
        }

        vbox.set_offset(offset);
        vbox.build()
    }
}

/// The gap between a stacked part and the base: the explicit space when one
/// was given, else the MATH limit or stretch-stack constants. `part_edge` is
/// the part's extent facing the base (depth of an over part, height of an
/// under part); `base_edge` the base extent it clears.
fn part_gap(env: &Env, args: &StackArgs, part_edge: f32, base_edge: f32, over: bool) -> f32 {
    if !args.auto_space {
        return Units::dimen(args.space, env);
    }
    let (gap_min, shift) = match (over, args.is_script) {
        (true, true) => (
            env.math_const(|c| c.upper_limit_gap_min),
            env.math_const(|c| c.upper_limit_baseline_rise_min),
        ),
        (true, false) => (
            env.math_const(|c| c.stretch_stack_gap_above_min),
            env.math_const(|c| c.stretch_stack_top_shift_up),
        ),
        (false, true) => (
            env.math_const(|c| c.lower_limit_gap_min),
            env.math_const(|c| c.lower_limit_baseline_drop_min),
        ),
        (false, false) => (
            env.math_const(|c| c.stretch_stack_gap_below_min),
            env.math_const(|c| c.stretch_stack_bottom_shift_down),
        ),
    };
    gap_min.max(shift - part_edge - base_edge)
}

/// An atom positioned relative to an anchor which stays in the flow.
#[derive(Debug, Clone)]
pub struct ZStackAtom {
    atom: Box<Atom>,
    anchor: Box<Atom>,
    halign: Alignment,
    hoffset: Dimen,
    valign: Alignment,
    voffset: Dimen,
}

impl ZStackAtom {
    pub fn new(
        atom: Atom,
        anchor: Atom,
        halign: Alignment,
        hoffset: Dimen,
        valign: Alignment,
        voffset: Dimen,
    ) -> ZStackAtom {
        ZStackAtom {
            atom: Box::new(atom),
            anchor: Box::new(anchor),
            halign,
            hoffset,
            valign,
            voffset,
        }
    }

    pub fn left_type(&self) -> AtomType {
        self.anchor.left_type()
    }

    pub fn right_type(&self) -> AtomType {
        self.anchor.right_type()
    }

    pub fn create_box(&self, env: &mut Env) -> BoxNode {
        let anchor = self.anchor.create_box(env);
        let mut atom = self.atom.create_box(env);

        let dx = match self.halign {
            Alignment::Center => (anchor.width - atom.width) / 2.0,
            Alignment::Right => anchor.width - atom.width,
            _ => 0.0,
        } + Units::dimen(self.hoffset, env);

        // vertical placement relative to the anchor, positive down
        let dy = match self.valign {
            Alignment::Top => -(anchor.height - atom.height),
            Alignment::Bottom => anchor.depth - atom.depth,
            Alignment::Center => {
                (anchor.depth - anchor.height + atom.height - atom.depth) / 2.0
            }
            _ => 0.0,
        } - Units::dimen(self.voffset, env);

        atom.shift = dy;
        let atom_width = atom.width;
        let anchor_width = anchor.width;
        hbox![
            anchor,
            kern![horz: -anchor_width + dx],
            atom,
            kern![horz: anchor_width - dx - atom_width]
        ]
    }
}

/// A stretchy symbol built from variants or an assembly; the width (or
/// height) it must reach comes from the stack it lives in, plus a fixed
/// padding.
#[derive(Debug, Clone)]
pub struct ExtensibleAtom {
    symbol: &'static Symbol,
    horizontal: bool,
    padding: Dimen,
}

impl ExtensibleAtom {
    pub fn new(symbol: &'static Symbol, horizontal: bool, padding: Dimen) -> ExtensibleAtom {
        ExtensibleAtom { symbol, horizontal, padding }
    }

    pub fn atom_type(&self) -> AtomType {
        self.symbol.atom_type
    }

    pub fn create_box(&self, env: &mut Env) -> BoxNode {
        self.create_box_with_width(env, 0.0)
    }

    /// Build the symbol to cover at least `width` (scaled design units) plus
    /// the configured padding.
    pub fn create_box_with_width(&self, env: &mut Env, width: f32) -> BoxNode {
        let chr = env.get_symbol_char(self.symbol);
        let target = width + Units::dimen(self.padding, env);
        if self.horizontal {
            factory::create_h_delim(chr, env, target)
        } else {
            let axis = env.axis_height();
            factory::create_v_delim(chr, env, target).centered_on_axis(axis)
        }
    }
}
