/*! # A TeX-flavored mathematical formula typesetting engine.

This crate takes a tree of math *atoms* (the constructs a TeX parser
produces for input like `\frac{a}{b}^2`), lays it out against the metrics of
an OpenType math font, and produces a tree of measured *boxes* ready for
drawing through an abstract [`Painter`](crate::render::Painter).

Font metrics arrive as `.clm` files: compact binary snapshots of a font's
glyph metrics, kerning, extensible-glyph recipes and MATH constants,
produced by an offline tool. The engine never parses raw OpenType and never
draws by itself; both sides are external collaborators.

## Basic usage

First load the fonts into a [`FontContext`](crate::font::FontContext):

```no_run
let main = texmath::otf::Otf::from_file("main.clm").expect("couldn't load main font");
let mut fonts = texmath::font::FontContext::new(main);
fonts.register_math_font_file("xits", "xits-math.clm").expect("couldn't load math font");
```

Then build an atom tree (here by hand; a parser would normally do this),
create an environment carrying style and size, and lay the tree out:

```no_run
# let main = texmath::otf::Otf::from_file("main.clm").unwrap();
# let mut fonts = texmath::font::FontContext::new(main);
# fonts.register_math_font_file("xits", "xits-math.clm").unwrap();
use texmath::atom::{Atom, FracAtom};
use texmath::env::{Dimen, Env, TexStyle};

let half = Atom::Frac(FracAtom::new(Atom::char('1'), Atom::char('2'), true, Dimen::ZERO));
let mut env = Env::new(&fonts, TexStyle::Display, 20.0);
let render = texmath::render::Render::build(&half, &mut env);
```

The [`Render`](crate::render::Render) owns the measured box tree; its
`width`/`height`/`depth` are in pixels at the chosen text size and
[`Render::draw`](crate::render::Render::draw) replays it onto any
[`Painter`](crate::render::Painter) implementation.

## Coordinate conventions

Layout runs in font design units with the baseline at y = 0 and +y pointing
down; a box's `height` extends above the baseline and its `depth` (kept
non-negative for composites) below. The painter sees the same orientation,
pre-scaled to pixels.
*/

#[macro_use]
extern crate serde_derive;

#[macro_use]
extern crate log;

#[macro_use]
mod macros;

#[deny(missing_docs)]
pub mod error;
pub mod utils;

pub mod otf;

pub mod font;

pub mod env;

#[macro_use]
pub mod boxes;

pub mod glue;

pub mod symbols;

pub mod atom;

pub mod render;

pub use atom::Atom;
pub use env::{Env, TexStyle};
pub use error::Error;
pub use font::FontContext;
pub use render::{Painter, Render};
