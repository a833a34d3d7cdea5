//! Construction of large delimiters: picks a big-enough glyph variant, or
//! assembles one from parts when no variant suffices.
//!
//! Part overlaps interpolate between the font's minimum connector overlap and
//! the largest overlap both connectors allow, so the assembled glyph is never
//! smaller than requested and exceeds it as little as possible.

use crate::boxes::BoxNode;
use crate::env::Env;
use crate::font::Char;
use crate::otf::{GlyphAssembly, GlyphPart};

/// A vertical delimiter at least `height` tall (`height` in scaled design
/// units). Falls back to the largest variant when nothing reaches the target.
pub fn create_v_delim(chr: Char, env: &Env, height: f32) -> BoxNode {
    create_delim(chr, env, height, false)
}

/// A horizontal delimiter (accents, over/under braces, arrows) at least
/// `width` wide.
pub fn create_h_delim(chr: Char, env: &Env, width: f32) -> BoxNode {
    create_delim(chr, env, width, true)
}

/// The `size`-th larger vertical variant, for `\big`-style sized delimiters.
/// Size 0 is the glyph itself (variant lists start with the base glyph);
/// out-of-range sizes clamp to the largest.
pub fn create_sized_v_delim(chr: Char, env: &Env, size: usize) -> BoxNode {
    let ctx = env.fctx();
    if size == 0 || chr.v_larger_count(ctx) == 0 {
        return BoxNode::char_box(chr, ctx);
    }
    BoxNode::char_box(chr.v_larger(ctx, size), ctx)
}

fn create_delim(chr: Char, env: &Env, target: f32, horizontal: bool) -> BoxNode {
    let ctx = env.fctx();
    if !chr.is_valid() {
        return BoxNode::char_box(chr, ctx);
    }
    // variant advances are unscaled design units
    let target_units = if chr.scale > 0.0 { target / chr.scale } else { target };

    let count = if horizontal {
        chr.h_larger_count(ctx)
    } else {
        chr.v_larger_count(ctx)
    };
    let mut largest = chr;
    for index in 0..count {
        let (variant, advance) = if horizontal {
            let math = chr.glyph(ctx).math();
            (chr.h_larger(ctx, index), math.horizontal_variants.advance(index))
        } else {
            let math = chr.glyph(ctx).math();
            (chr.v_larger(ctx, index), math.vertical_variants.advance(index))
        };
        if advance as f32 >= target_units {
            return BoxNode::char_box(variant, ctx);
        }
        largest = variant;
    }

    let assembly = if horizontal {
        chr.h_assembly(ctx)
    } else {
        chr.v_assembly(ctx)
    };
    if assembly.is_empty() {
        // unreachable size: clamp to the largest variant available
        return BoxNode::char_box(largest, ctx);
    }
    let assembly = assembly.clone();
    assembly_box(chr, env, &assembly, target_units, horizontal)
}

fn max_overlap(min_overlap: i32, left: &GlyphPart, right: &GlyphPart) -> i32 {
    let overlap = (left.end_connector as i32).min(right.start_connector as i32);
    let overlap = overlap.min(right.full_advance as i32 / 2);
    overlap.max(min_overlap)
}

/// One glyph of the assembled delimiter: its part glyph id and the overlap
/// with its predecessor.
struct PartInstr {
    glyph_id: u16,
    overlap: i32,
}

/// Choose repeat counts and overlaps so the total extent is at least `size`.
/// Extenders repeat as often as needed; the common overlap interpolates
/// between the minimum connector overlap and the largest each joint allows.
fn construct_parts(min_overlap: i32, parts: &[GlyphPart], size: i32) -> Vec<PartInstr> {
    let mut n_ext: i32 = 0;
    let mut n_nonext: i32 = 0;
    let mut size_ext: i32 = 0;
    let mut size_nonext: i32 = 0;
    for part in parts {
        if part.is_extender() {
            n_ext += 1;
            size_ext += part.full_advance as i32;
        } else {
            n_nonext += 1;
            size_nonext += part.full_advance as i32;
        }
    }

    // how many times every extender must repeat before the assembly can reach
    // the requested size
    let max_size_no_extender = size_nonext - (n_nonext - 1).max(0) * min_overlap;
    let repeats = if max_size_no_extender >= size || n_ext == 0 {
        0
    } else {
        let quotient = (size_ext - n_ext * min_overlap).max(1);
        let numerator = size - max_size_no_extender;
        let mut repeats = numerator / quotient;
        if numerator.rem_euclid(quotient) != 0 {
            repeats += 1;
        }
        repeats
    };

    let size_without_overlap = size_nonext + size_ext * repeats;
    let joints = (n_nonext + n_ext * repeats - 1).max(0);
    let min_overlap_total = joints * min_overlap;

    let mut max_overlap_total: i32 = 0;
    let mut prev: Option<&GlyphPart> = None;
    for part in parts {
        if part.is_extender() {
            if repeats == 0 {
                continue;
            }
            if repeats > 1 {
                max_overlap_total += (repeats - 1) * max_overlap(min_overlap, part, part);
            }
        }
        if let Some(prev) = prev {
            max_overlap_total += max_overlap(min_overlap, prev, part);
        }
        prev = Some(part);
    }

    let size_with_min_overlap = size_without_overlap - min_overlap_total;
    let size_with_max_overlap = size_without_overlap - max_overlap_total;
    // interpolation factor within [min, max] overlap; a font may not be able
    // to reach the size exactly, in which case we stay as close as possible
    let span = size_with_min_overlap - size_with_max_overlap;
    let factor = if span <= 0 {
        0.0
    } else {
        ((size_with_min_overlap - size) as f32 / span as f32).clamp(0.0, 1.0)
    };

    let mut instrs = Vec::with_capacity((n_nonext + repeats * n_ext).max(0) as usize);
    let mut prev: Option<&GlyphPart> = None;
    for part in parts {
        let n = if part.is_extender() { repeats } else { 1 };
        for _ in 0..n {
            let overlap = match prev {
                Some(prev_part) => {
                    let max = max_overlap(min_overlap, prev_part, part);
                    // floor under-estimates the overlap, keeping the result
                    // at least as large as the requested size
                    min_overlap + ((factor * (max - min_overlap) as f32).floor() as i32).max(0)
                }
                None => 0,
            };
            instrs.push(PartInstr { glyph_id: part.glyph_id, overlap });
            prev = Some(part);
        }
    }
    instrs
}

fn assembly_box(
    chr: Char,
    env: &Env,
    assembly: &GlyphAssembly,
    target_units: f32,
    horizontal: bool,
) -> BoxNode {
    let min_overlap = env.math_const_raw(|c| c.min_connector_overlap) as i32;
    let size = target_units.ceil() as i32;
    let instrs = construct_parts(min_overlap, &assembly.parts, size);
    let scale = chr.scale;
    let ctx = env.fctx();

    if horizontal {
        let mut hbox = super::builders::HBox::new();
        for instr in &instrs {
            if instr.overlap != 0 {
                hbox.add_node(BoxNode::hkern(-(instr.overlap as f32) * scale));
            }
            let part = chr.assembly_part(instr.glyph_id as i32);
            let advance = advance_of(&assembly.parts, instr.glyph_id) as f32 * scale;
            let mut node = BoxNode::char_box(part, ctx);
            node.width = advance;
            hbox.add_node(node);
        }
        hbox.build()
    } else {
        // top-to-bottom: the part list runs bottom-to-top
        let mut vbox = super::builders::VBox::new();
        for (i, instr) in instrs.iter().enumerate().rev() {
            let part = chr.assembly_part(instr.glyph_id as i32);
            let advance = advance_of(&assembly.parts, instr.glyph_id) as f32 * scale;
            let glyph_depth = part.depth(ctx);
            let mut node = BoxNode::char_box(part, ctx);
            // a part occupies its full advance; the glyph's own depth keeps
            // the ink aligned with the part baseline
            node.height = advance - glyph_depth;
            node.depth = glyph_depth;
            vbox.add_node(node);
            if i != 0 {
                vbox.add_node(BoxNode::vkern(-(instrs[i].overlap as f32) * scale));
            }
        }
        vbox.build()
    }
}

fn advance_of(parts: &[GlyphPart], glyph_id: u16) -> u16 {
    parts
        .iter()
        .find(|part| part.glyph_id == glyph_id)
        .map(|part| part.full_advance)
        .unwrap_or(0)
}
