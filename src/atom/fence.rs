//! Delimited bodies: `\left ... \right` fences with optional middle
//! separators, and fixed-size big delimiters.

use crate::atom::{Atom, AtomType};
use crate::boxes::{builders, factory, BoxNode};
use crate::env::{Env, Units, UnitType};
use crate::error::FontResult;
use crate::symbols::{self, Symbol};

/// Fraction of the body extent a delimiter must cover (TeX's
/// `\delimiterfactor` 901).
const DELIMITER_FACTOR: f32 = 0.901;
/// How far a delimiter may fall short of the body, in em.
const DELIMITER_SHORT_FALL: f32 = 0.1;
/// Width of the empty `.` delimiter, in em.
const NULL_DELIMITER_SPACE: f32 = 0.1;

/// A body (split into segments by middle separators) enclosed in stretching
/// delimiters. `None` stands for the empty `.` delimiter.
#[derive(Debug, Clone)]
pub struct FencedAtom {
    // one more delimiter than segments: left, middles..., right
    delimiters: Vec<Option<&'static Symbol>>,
    segments: Vec<Atom>,
}

impl FencedAtom {
    /// Fence a single body between `left` and `right` delimiter names; `"."`
    /// leaves that side open.
    pub fn new(body: Atom, left: &str, right: &str) -> FontResult<FencedAtom> {
        Ok(FencedAtom {
            delimiters: vec![delimiter(left)?, delimiter(right)?],
            segments: vec![body],
        })
    }

    /// Fence several segments with middle separators between them;
    /// `middles.len()` must be `segments.len() - 1`.
    pub fn with_middles(
        segments: Vec<Atom>,
        left: &str,
        middles: &[&str],
        right: &str,
    ) -> FontResult<FencedAtom> {
        let mut delimiters = Vec::with_capacity(middles.len() + 2);
        delimiters.push(delimiter(left)?);
        for middle in middles {
            delimiters.push(delimiter(middle)?);
        }
        delimiters.push(delimiter(right)?);
        Ok(FencedAtom { delimiters, segments })
    }

    pub fn create_box(&self, env: &mut Env) -> BoxNode {
        let mut inners = Vec::with_capacity(self.segments.len());
        let mut max_height: f32 = 0.0;
        let mut max_depth: f32 = 0.0;
        for segment in &self.segments {
            let inner = segment.create_box(env);
            max_height = max_height.max(inner.height);
            max_depth = max_depth.max(inner.depth);
            inners.push(inner);
        }

        let min_height = env.math_const(|c| c.delimited_sub_formula_min_height);
        let axis = env.axis_height();
        let null_space = Units::fsize(UnitType::Em, NULL_DELIMITER_SPACE, env);

        // only stretch the delimiters once the body outgrows half the
        // minimum delimited size
        let clearance = if max_height.max(max_depth) > min_height / 2.0 {
            let inner_size = (max_height - axis).max(axis + max_depth) * 2.0;
            let short_fall = Units::fsize(UnitType::Em, DELIMITER_SHORT_FALL, env);
            let clearance = (inner_size * DELIMITER_FACTOR)
                .max(max_height + max_depth - short_fall)
                .max(min_height);
            Some(clearance)
        } else {
            None
        };

        let mut hbox = builders::HBox::new();
        for (delim, inner) in self.delimiters.iter().zip(inners) {
            hbox.add_node(make_delimiter(*delim, clearance, null_space, axis, env));
            hbox.add_node(inner);
        }
        let right = self.delimiters.last().copied().flatten();
        hbox.add_node(make_delimiter(right, clearance, null_space, axis, env));
        hbox.build()
    }
}

fn delimiter(name: &str) -> FontResult<Option<&'static Symbol>> {
    if name == "." || name.is_empty() {
        return Ok(None);
    }
    symbols::require(name).map(Some)
}

fn make_delimiter(
    symbol: Option<&'static Symbol>,
    clearance: Option<f32>,
    null_space: f32,
    axis: f32,
    env: &mut Env,
) -> BoxNode {
    let symbol = match symbol {
        Some(symbol) => symbol,
        None => return BoxNode::hkern(null_space),
    };
    let chr = env.get_symbol_char(symbol);
    match clearance {
        Some(clearance) => {
            factory::create_v_delim(chr, env, clearance).centered_on_axis(axis)
        }
        None => BoxNode::char_box(chr, env.fctx()),
    }
}

/// A delimiter at a fixed size step (`\big`, `\Big`, ...): the n-th vertical
/// variant, centered on the axis.
#[derive(Debug, Clone)]
pub struct BigSymbolAtom {
    symbol: &'static Symbol,
    size: usize,
}

impl BigSymbolAtom {
    pub fn new(symbol: &'static Symbol, size: usize) -> BigSymbolAtom {
        BigSymbolAtom { symbol, size }
    }

    pub fn atom_type(&self) -> AtomType {
        self.symbol.atom_type
    }

    pub fn create_box(&self, env: &mut Env) -> BoxNode {
        let chr = env.get_symbol_char(self.symbol);
        let axis = env.axis_height();
        factory::create_sized_v_delim(chr, env, self.size).centered_on_axis(axis)
    }
}
