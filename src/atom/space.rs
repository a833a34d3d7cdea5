//! Whitespace atoms and the font-control atoms.

use crate::atom::{Atom, AtomType};
use crate::boxes::BoxNode;
use crate::env::{Dimen, Env, Units};
use crate::font::{FontStyle, MathStyle};
use crate::glue::{self, SpaceType};

/// A hard space: a named skip, a plain blank or explicit dimensions.
#[derive(Debug, Clone)]
pub struct SpaceAtom {
    skip: SpaceType,
    blank: bool,
    math_mode: bool,
    width: Dimen,
    height: Dimen,
    depth: Dimen,
}

impl SpaceAtom {
    /// A plain blank, as wide as the current font's space glyph.
    pub fn blank(math_mode: bool) -> SpaceAtom {
        SpaceAtom {
            skip: SpaceType::None,
            blank: true,
            math_mode,
            width: Dimen::ZERO,
            height: Dimen::ZERO,
            depth: Dimen::ZERO,
        }
    }

    /// A named mu-skip (`\,`, `\;`, `\!`, `\quad`...).
    pub fn of_type(skip: SpaceType) -> SpaceAtom {
        SpaceAtom {
            skip,
            blank: true,
            math_mode: true,
            width: Dimen::ZERO,
            height: Dimen::ZERO,
            depth: Dimen::ZERO,
        }
    }

    /// An explicit strut.
    pub fn sized(width: Dimen, height: Dimen, depth: Dimen) -> SpaceAtom {
        SpaceAtom { skip: SpaceType::None, blank: false, math_mode: true, width, height, depth }
    }

    pub fn empty() -> SpaceAtom {
        SpaceAtom::sized(Dimen::ZERO, Dimen::ZERO, Dimen::ZERO)
    }

    pub fn atom_type(&self) -> AtomType {
        AtomType::Ordinary
    }

    pub fn create_box(&self, env: &mut Env) -> BoxNode {
        if !self.blank {
            return BoxNode::strut(
                Units::dimen(self.width, env),
                Units::dimen(self.height, env),
                Units::dimen(self.depth, env),
            );
        }
        if self.skip == SpaceType::None {
            return BoxNode::strut(env.space(self.math_mode), 0.0, 0.0);
        }
        glue::space_of(self.skip, env)
    }
}

/// Applies a font style to an inner atom; `nested` ORs the bits into the
/// current word, otherwise the word is replaced for the scope.
#[derive(Debug, Clone)]
pub struct FontStyleAtom {
    style: FontStyle,
    math_mode: bool,
    nested: bool,
    inner: Box<Atom>,
}

impl FontStyleAtom {
    pub fn new(style: FontStyle, math_mode: bool, nested: bool, inner: Atom) -> FontStyleAtom {
        FontStyleAtom { style, math_mode, nested, inner: Box::new(inner) }
    }

    pub fn inner(&self) -> &Atom {
        &self.inner
    }

    pub fn create_box(&self, env: &mut Env) -> BoxNode {
        env.with_font_style(self.style, self.math_mode, self.nested, |e| {
            self.inner.create_box(e)
        })
    }
}

/// Switches the current math font (and letter styling) for the rest of the
/// environment; produces no visible box.
#[derive(Debug, Clone)]
pub struct MathFontAtom {
    name: String,
    math_style: MathStyle,
}

impl MathFontAtom {
    pub fn new(name: &str, math_style: MathStyle) -> MathFontAtom {
        MathFontAtom { name: name.to_owned(), math_style }
    }

    pub fn create_box(&self, env: &mut Env) -> BoxNode {
        if let Err(err) = env.select_math_font(&self.name, self.math_style) {
            warn!("cannot switch math font: {}", err);
        }
        BoxNode::empty()
    }
}
