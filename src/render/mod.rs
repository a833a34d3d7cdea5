//! Drawing a box tree onto an abstract 2-D painter.
//!
//! The engine lays out in font design units with the baseline at y = 0 and
//! +y pointing down. [`Render`] owns a finished root box, exposes its
//! metrics and replays it onto a caller-provided [`Painter`] at a pixel
//! scale derived from the text size.

use crate::boxes::{BoxAlign, BoxKind, BoxNode};
use crate::env::{pixels_per_point, Env};
use crate::error::ArgError;

/// 32-bit ARGB color.
pub type Color = u32;

pub const BLACK: Color = 0xFF00_0000;
pub const WHITE: Color = 0xFFFF_FFFF;
pub const TRANSPARENT: Color = 0x0000_0000;

/// Pack ARGB components.
pub fn argb(a: u8, r: u8, g: u8, b: u8) -> Color {
    (a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32
}

// IMPORTANT: sorted by name
const NAMED_COLORS: [(&str, Color); 12] = [
    ("black", BLACK),
    ("blue", 0xFF00_00FF),
    ("cyan", 0xFF00_FFFF),
    ("darkgray", 0xFFA9_A9A9),
    ("gray", 0xFF80_8080),
    ("green", 0xFF00_8000),
    ("lightgray", 0xFFD3_D3D3),
    ("magenta", 0xFFFF_00FF),
    ("orange", 0xFFFF_A500),
    ("red", 0xFFFF_0000),
    ("white", WHITE),
    ("yellow", 0xFFFF_FF00),
];

/// Parse a color: `#RRGGBB`, `#AARRGGBB` or a known name.
pub fn parse_color(value: &str) -> Result<Color, ArgError> {
    let value = value.trim();
    if let Some(hex) = value.strip_prefix('#') {
        let parsed = u32::from_str_radix(hex, 16)
            .map_err(|_| ArgError::InvalidColor(value.to_owned()))?;
        return match hex.len() {
            6 => Ok(0xFF00_0000 | parsed),
            8 => Ok(parsed),
            _ => Err(ArgError::InvalidColor(value.to_owned())),
        };
    }
    let lower = value.to_lowercase();
    NAMED_COLORS
        .binary_search_by(|(name, _)| name.cmp(&lower.as_str()))
        .map(|i| NAMED_COLORS[i].1)
        .map_err(|_| ArgError::InvalidColor(value.to_owned()))
}

/// Stroke line-cap styles.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CapStyle {
    Butt,
    Round,
    Square,
}

/// Stroke line-join styles.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum JoinStyle {
    Miter,
    Round,
    Bevel,
}

/// An abstract 2-D target. The engine only ever calls these methods; the
/// painter's lifetime and backing surface belong to the caller.
pub trait Painter {
    fn set_color(&mut self, color: Color);
    fn set_stroke(&mut self, width: f32, miter_limit: f32, cap: CapStyle, join: JoinStyle);
    fn translate(&mut self, dx: f32, dy: f32);
    fn scale(&mut self, sx: f32, sy: f32);
    fn rotate(&mut self, angle: f32);
    /// Undo all accumulated transforms.
    fn reset(&mut self);
    fn draw_glyph(&mut self, font_id: i32, glyph_id: i32, x: f32, y: f32, scale: f32);
    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32);
    fn draw_rect(&mut self, x: f32, y: f32, width: f32, height: f32);
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32);
    fn draw_round_rect(&mut self, x: f32, y: f32, width: f32, height: f32, rx: f32, ry: f32);
    fn fill_round_rect(&mut self, x: f32, y: f32, width: f32, height: f32, rx: f32, ry: f32);
}

impl BoxNode {
    /// Draw this box with its baseline origin at `(x, y)`, in the current
    /// color.
    pub fn draw(&self, painter: &mut dyn Painter, x: f32, y: f32) {
        self.draw_with(painter, x, y, BLACK);
    }

    fn draw_with(&self, painter: &mut dyn Painter, x: f32, y: f32, color: Color) {
        match &self.kind {
            BoxKind::Char(cb) => {
                painter.draw_glyph(cb.chr.font_id, cb.glyph_id, x, y, cb.chr.scale);
            }
            BoxKind::Rule => {
                painter.fill_rect(x, y - self.height, self.width, self.vlen());
            }
            BoxKind::HBox(hbox) => {
                let mut cx = x + match hbox.alignment {
                    BoxAlign::Left => 0.0,
                    BoxAlign::Center(content) => (self.width - content) / 2.0,
                    BoxAlign::Right(content) => self.width - content,
                };
                for child in &hbox.children {
                    child.draw_with(painter, cx, y + child.shift, color);
                    cx += child.width;
                }
            }
            BoxKind::VBox(vbox) => {
                let mut cy = y - self.height;
                for child in &vbox.children {
                    child.draw_with(painter, x + child.shift, cy + child.height, color);
                    cy += child.vlen();
                }
            }
            BoxKind::Decor(decor) => match decor.color {
                Some(decor_color) => {
                    painter.set_color(decor_color);
                    decor.base.draw_with(painter, x, y, decor_color);
                    painter.set_color(color);
                }
                None => decor.base.draw_with(painter, x, y, color),
            },
            BoxKind::Strut | BoxKind::Glue { .. } => {}
        }
    }
}

/// A finished formula: the laid-out root box plus everything needed to
/// replay it onto a painter.
pub struct Render {
    root: BoxNode,
    text_size: f32,
    upem: f32,
    foreground: Color,
    debug: bool,
}

impl Render {
    /// Lay `atom` out under `env` and wrap the result.
    pub fn build(atom: &crate::atom::Atom, env: &mut Env) -> Render {
        let root = atom.create_box(env);
        Render {
            root,
            text_size: env.text_size(),
            upem: env.upem(),
            foreground: BLACK,
            debug: false,
        }
    }

    pub fn with_foreground(mut self, color: Color) -> Render {
        self.foreground = color;
        self
    }

    /// Additionally outline the formula's bounds and baseline when drawing.
    pub fn with_debug(mut self, debug: bool) -> Render {
        self.debug = debug;
        self
    }

    pub fn root(&self) -> &BoxNode {
        &self.root
    }

    /// Pixels per design unit at the chosen text size.
    pub fn pixel_scale(&self) -> f32 {
        self.text_size * pixels_per_point() / self.upem
    }

    pub fn width(&self) -> f32 {
        self.root.width * self.pixel_scale()
    }

    pub fn height(&self) -> f32 {
        self.root.height * self.pixel_scale()
    }

    pub fn depth(&self) -> f32 {
        self.root.depth * self.pixel_scale()
    }

    /// Draw with the baseline origin at `(x, y)` pixels.
    pub fn draw(&self, painter: &mut dyn Painter, x: f32, y: f32) {
        let s = self.pixel_scale();
        painter.translate(x, y);
        painter.scale(s, s);
        painter.set_color(self.foreground);
        self.root.draw_with(painter, 0.0, 0.0, self.foreground);
        if self.debug {
            painter.draw_rect(
                0.0,
                -self.root.height,
                self.root.width,
                self.root.vlen(),
            );
            painter.draw_line(0.0, 0.0, self.root.width, 0.0);
        }
        painter.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_parsing() {
        assert_eq!(parse_color("#FF0000").unwrap(), 0xFFFF_0000);
        assert_eq!(parse_color("#80FF0000").unwrap(), 0x80FF_0000);
        assert_eq!(parse_color("red").unwrap(), 0xFFFF_0000);
        assert_eq!(parse_color("Black").unwrap(), BLACK);
        assert!(parse_color("#12345").is_err());
        assert!(parse_color("no-such-color").is_err());
        assert_eq!(argb(0x12, 0x34, 0x56, 0x78), 0x1234_5678);
    }

    #[test]
    fn named_colors_sorted() {
        for pair in NAMED_COLORS.windows(2) {
            assert!(pair[0].0 < pair[1].0);
        }
    }
}
