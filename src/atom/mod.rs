//! The atom algebra: logical math constructs prior to positioning.
//!
//! Atoms form a tree built by a parser (or by hand); `create_box` lowers each
//! atom into a measured [`BoxNode`](crate::boxes::BoxNode) against an
//! [`Env`](crate::env::Env) snapshot. Layout never fails — unresolvable
//! glyphs substitute the font's '?' and extensible constructions clamp —
//! while unknown symbol *names* fail at atom construction time.

pub mod accent;
pub mod chars;
pub mod fence;
pub mod frac;
pub mod radical;
pub mod row;
pub mod scripts;
pub mod space;
pub mod stack;

pub use accent::AccentedAtom;
pub use chars::{CharAtom, FixedCharAtom, SymbolAtom, TextAtom};
pub use fence::{BigSymbolAtom, FencedAtom};
pub use frac::FracAtom;
pub use radical::RadicalAtom;
pub use row::RowAtom;
pub use scripts::{OperatorAtom, ScriptsAtom};
pub use space::{FontStyleAtom, MathFontAtom, SpaceAtom};
pub use stack::{ExtensibleAtom, StackArgs, StackAtom, StackElement, ZStackAtom};

use crate::boxes::BoxNode;
use crate::env::Env;
use crate::error::FontResult;
use crate::font::FontStyle;

/// TeX's classification of atoms, driving inter-atom spacing.
#[derive(Serialize, Deserialize)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AtomType {
    Ordinary,
    BigOperator,
    BinaryOperator,
    Relation,
    Opening,
    Closing,
    Punctuation,
    Inner,
}

/// How a big operator places its scripts.
#[derive(Serialize, Deserialize)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LimitsType {
    /// always above/below
    Display,
    /// always as scripts
    NoLimits,
    /// above/below in display style, as scripts otherwise
    Normal,
}

/// Horizontal or vertical placement of a sub-box within its parent.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    None,
    Left,
    Center,
    Right,
    Top,
    Bottom,
}

/// A math construct prior to positioning.
#[derive(Debug, Clone)]
pub enum Atom {
    Fixed(FixedCharAtom),
    Symbol(SymbolAtom),
    Char(CharAtom),
    Text(TextAtom),
    Row(RowAtom),
    Frac(FracAtom),
    Radical(RadicalAtom),
    Scripts(ScriptsAtom),
    Operator(OperatorAtom),
    Stack(StackAtom),
    ZStack(ZStackAtom),
    Extensible(ExtensibleAtom),
    Fenced(FencedAtom),
    BigSymbol(BigSymbolAtom),
    Accented(AccentedAtom),
    Space(SpaceAtom),
    BreakMark,
    FontStyle(FontStyleAtom),
    MathFont(MathFontAtom),
}

impl Atom {
    /// Lower this atom into a measured box under the given environment.
    pub fn create_box(&self, env: &mut Env) -> BoxNode {
        match self {
            Atom::Fixed(a) => a.create_box(env),
            Atom::Symbol(a) => a.create_box(env),
            Atom::Char(a) => a.create_box(env),
            Atom::Text(a) => a.create_box(env),
            Atom::Row(a) => a.create_box(env),
            Atom::Frac(a) => a.create_box(env),
            Atom::Radical(a) => a.create_box(env),
            Atom::Scripts(a) => a.create_box(env),
            Atom::Operator(a) => a.create_box(env),
            Atom::Stack(a) => a.create_box(env),
            Atom::ZStack(a) => a.create_box(env),
            Atom::Extensible(a) => a.create_box(env),
            Atom::Fenced(a) => a.create_box(env),
            Atom::BigSymbol(a) => a.create_box(env),
            Atom::Accented(a) => a.create_box(env),
            Atom::Space(a) => a.create_box(env),
            Atom::BreakMark => BoxNode::break_mark(),
            Atom::FontStyle(a) => a.create_box(env),
            Atom::MathFont(a) => a.create_box(env),
        }
    }

    /// Spacing class seen by an atom to the left of this one.
    pub fn left_type(&self) -> AtomType {
        match self {
            Atom::Fixed(a) => crate::symbols::codepoint_atom_type(a.unicode()),
            Atom::Char(a) => crate::symbols::codepoint_atom_type(a.unicode()),
            Atom::Symbol(a) => a.atom_type(),
            Atom::Row(a) => a.left_type(),
            Atom::Frac(_) => AtomType::Inner,
            Atom::Scripts(a) => a.left_type(),
            Atom::Operator(a) => a.left_type(),
            Atom::Stack(a) => a.left_type(),
            Atom::ZStack(a) => a.left_type(),
            Atom::Extensible(a) => a.atom_type(),
            Atom::Fenced(_) => AtomType::Opening,
            Atom::BigSymbol(a) => a.atom_type(),
            Atom::Accented(a) => a.left_type(),
            Atom::FontStyle(a) => a.inner().left_type(),
            _ => AtomType::Ordinary,
        }
    }

    /// Spacing class seen by an atom to the right of this one.
    pub fn right_type(&self) -> AtomType {
        match self {
            Atom::Fixed(a) => crate::symbols::codepoint_atom_type(a.unicode()),
            Atom::Char(a) => crate::symbols::codepoint_atom_type(a.unicode()),
            Atom::Symbol(a) => a.atom_type(),
            Atom::Row(a) => a.right_type(),
            Atom::Frac(_) => AtomType::Inner,
            Atom::Scripts(a) => a.right_type(),
            Atom::Operator(a) => a.right_type(),
            Atom::Stack(a) => a.right_type(),
            Atom::ZStack(a) => a.right_type(),
            Atom::Extensible(a) => a.atom_type(),
            Atom::Fenced(_) => AtomType::Closing,
            Atom::BigSymbol(a) => a.atom_type(),
            Atom::Accented(a) => a.right_type(),
            Atom::FontStyle(a) => a.inner().right_type(),
            _ => AtomType::Ordinary,
        }
    }

    /// The limit convention of this atom, if it acts as a big operator.
    pub fn limits_type(&self) -> LimitsType {
        match self {
            Atom::Symbol(a) => a.limits_type(),
            Atom::Operator(a) => a.limits_type(),
            Atom::FontStyle(a) => a.inner().limits_type(),
            _ => LimitsType::NoLimits,
        }
    }

    /// The spacing class this atom contributes inside a row, or `None` for
    /// atoms that are transparent to inter-atom spacing (spaces, break
    /// marks, font switches).
    pub(crate) fn row_type(&self) -> Option<AtomType> {
        match self {
            Atom::Space(_) | Atom::BreakMark | Atom::MathFont(_) => None,
            _ => Some(self.left_type()),
        }
    }

    /// If this atom is (or wraps) a single character-like atom, the
    /// codepoint it stands for.
    pub fn single_codepoint(&self) -> Option<u32> {
        match self {
            Atom::Fixed(a) => Some(a.unicode()),
            Atom::Symbol(a) => Some(a.unicode()),
            Atom::Char(a) => Some(a.unicode()),
            Atom::Row(a) => a.single_atom()?.single_codepoint(),
            Atom::FontStyle(a) => a.inner().single_codepoint(),
            _ => None,
        }
    }

    // ---- construction conveniences -------------------------------------

    /// An alphanumeric math-mode character in the environment's default
    /// style.
    pub fn char(unicode: char) -> Atom {
        Atom::Char(CharAtom::new(unicode as u32, FontStyle::INVALID, true))
    }

    /// A named symbol; unknown names are reported at construction.
    pub fn symbol(name: &str) -> FontResult<Atom> {
        Ok(Atom::Symbol(SymbolAtom::new(crate::symbols::require(name)?)))
    }

    pub fn row(children: Vec<Atom>) -> Atom {
        Atom::Row(RowAtom::new(children))
    }

    pub fn text(text: &str, math_mode: bool) -> Atom {
        Atom::Text(TextAtom::new(text.to_owned(), math_mode))
    }
}
