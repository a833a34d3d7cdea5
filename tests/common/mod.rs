//! Shared fixtures: a synthetic math font encoded as `.clm` bytes, so the
//! end-to-end tests exercise the real loader.

#![allow(dead_code)]

use texmath::font::FontContext;
use texmath::otf::Otf;

/// Big-endian `.clm` byte writer mirroring the wire format.
pub struct ClmWriter {
    buf: Vec<u8>,
}

impl ClmWriter {
    pub fn new() -> ClmWriter {
        ClmWriter { buf: Vec::new() }
    }

    pub fn u8(&mut self, v: u8) -> &mut Self {
        self.buf.push(v);
        self
    }

    pub fn u16(&mut self, v: u16) -> &mut Self {
        self.buf.extend_from_slice(&v.to_be_bytes());
        self
    }

    pub fn i16(&mut self, v: i16) -> &mut Self {
        self.buf.extend_from_slice(&v.to_be_bytes());
        self
    }

    pub fn u32(&mut self, v: u32) -> &mut Self {
        self.buf.extend_from_slice(&v.to_be_bytes());
        self
    }

    pub fn i32(&mut self, v: i32) -> &mut Self {
        self.buf.extend_from_slice(&v.to_be_bytes());
        self
    }

    pub fn bytes(&mut self, v: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(v);
        self
    }

    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}

/// A glyph under construction for the fixture font.
#[derive(Clone, Default)]
pub struct GlyphSpec {
    pub width: i16,
    pub height: i16,
    pub depth: i16,
    pub italic: i16,
    pub top_accent: i16,
    pub kerns: Vec<(u16, i16)>,
    pub h_variants: Vec<(u16, u16)>,
    pub v_variants: Vec<(u16, u16)>,
    pub v_assembly: Vec<(u16, u16, u16, u16, u16)>, // gid, start, end, advance, flags
    /// four-corner math kern `(height, kern)` lists: TL, TR, BL, BR
    pub math_kerns: [Vec<(i16, i16)>; 4],
}

pub fn glyph(width: i16, height: i16, depth: i16) -> GlyphSpec {
    GlyphSpec { width, height, depth, ..Default::default() }
}

fn write_variants(w: &mut ClmWriter, variants: &[(u16, u16)]) {
    w.u16(variants.len() as u16);
    for &(gid, advance) in variants {
        w.u16(gid).u16(advance);
    }
}

fn write_glyph(w: &mut ClmWriter, spec: &GlyphSpec) {
    w.i16(spec.width)
        .i16(spec.height)
        .i16(spec.depth)
        .i16(spec.italic)
        .i16(spec.top_accent);
    // kern record
    w.u16(spec.kerns.len() as u16);
    for &(gid, kern) in &spec.kerns {
        w.u16(gid).i16(kern);
    }
    // math record: h/v/script variants, h/v assemblies, four math kerns
    write_variants(w, &spec.h_variants);
    write_variants(w, &spec.v_variants);
    write_variants(w, &[]);
    w.u16(0); // horizontal assembly
    if spec.v_assembly.is_empty() {
        w.u16(0);
    } else {
        w.u16(spec.v_assembly.len() as u16);
        w.i16(0); // italics correction of the assembled glyph
        for &(gid, start, end, advance, flags) in &spec.v_assembly {
            w.u16(gid).u16(start).u16(end).u16(advance).u16(flags);
        }
    }
    for corner in &spec.math_kerns {
        w.u16(corner.len() as u16);
        for &(height, kern) in corner {
            w.i16(height).i16(kern);
        }
    }
}

/// MATH constants of the fixture font, in wire order.
pub const CONSTS: [i16; 57] = [
    70,   // scriptPercentScaleDown
    50,   // scriptScriptPercentScaleDown
    100,  // delimitedSubFormulaMinHeight
    1300, // displayOperatorMinHeight
    0,    // mathLeading
    250,  // axisHeight
    450,  // accentBaseHeight
    650,  // flattenedAccentBaseHeight
    150,  // subscriptShiftDown
    400,  // subscriptTopMax
    50,   // subscriptBaselineDropMin
    400,  // superscriptShiftUp
    350,  // superscriptShiftUpCramped
    125,  // superscriptBottomMin
    250,  // superscriptBaselineDropMax
    150,  // subSuperscriptGapMin
    400,  // superscriptBottomMaxWithSubscript
    40,   // spaceAfterScript
    100,  // upperLimitGapMin
    300,  // upperLimitBaselineRiseMin
    100,  // lowerLimitGapMin
    300,  // lowerLimitBaselineDropMin
    450,  // stackTopShiftUp
    580,  // stackTopDisplayStyleShiftUp
    350,  // stackBottomShiftDown
    680,  // stackBottomDisplayStyleShiftDown
    200,  // stackGapMin
    300,  // stackDisplayStyleGapMin
    300,  // stretchStackTopShiftUp
    600,  // stretchStackBottomShiftDown
    100,  // stretchStackGapAboveMin
    100,  // stretchStackGapBelowMin
    400,  // fractionNumeratorShiftUp
    700,  // fractionNumeratorDisplayStyleShiftUp
    400,  // fractionDenominatorShiftDown
    700,  // fractionDenominatorDisplayStyleShiftDown
    60,   // fractionNumeratorGapMin
    180,  // fractionNumDisplayStyleGapMin
    60,   // fractionRuleThickness
    60,   // fractionDenominatorGapMin
    180,  // fractionDenomDisplayStyleGapMin
    350,  // skewedFractionHorizontalGap
    100,  // skewedFractionVerticalGap
    180,  // overbarVerticalGap
    60,   // overbarRuleThickness
    60,   // overbarExtraAscender
    180,  // underbarVerticalGap
    60,   // underbarRuleThickness
    60,   // underbarExtraDescender
    75,   // radicalVerticalGap
    175,  // radicalDisplayStyleVerticalGap
    60,   // radicalRuleThickness
    60,   // radicalExtraAscender
    275,  // radicalKernBeforeDegree
    -400, // radicalKernAfterDegree
    65,   // radicalDegreeBottomRaisePercent
    50,   // minConnectorOverlap
];

/// Encode a complete fixture font: em 1000, a small latin/digit/symbol
/// coverage, parenthesis and root variants, and a root-sign assembly.
pub fn fixture_clm() -> Vec<u8> {
    // (codepoint, glyph id); sorted by codepoint
    let mapping: [(u16, u16); 15] = [
        (' ' as u16, 1),
        ('(' as u16, 10),
        (')' as u16, 13),
        ('+' as u16, 23),
        ('0' as u16, 9),
        ('1' as u16, 4),
        ('2' as u16, 5),
        ('=' as u16, 8),
        ('?' as u16, 0),
        ('a' as u16, 3),
        ('i' as u16, 7),
        ('n' as u16, 6),
        ('x' as u16, 2),
        (0x2211, 21), // n-ary summation
        (0x221A, 16), // square root
    ];

    let mut glyphs = vec![
        glyph(500, 650, 0),  // 0 '?'
        glyph(250, 0, 0),    // 1 space
        glyph(480, 440, 0),  // 2 'x'
        glyph(460, 460, 10), // 3 'a'
        glyph(500, 640, 0),  // 4 '1'
        glyph(500, 640, 0),  // 5 '2'
        glyph(510, 440, 0),  // 6 'n'
        glyph(260, 640, 0),  // 7 'i'
        glyph(600, 420, 0),  // 8 '='
        glyph(500, 640, 0),  // 9 '0'
        glyph(320, 700, 200), // 10 '('
        glyph(340, 950, 450), // 11 '(' size 2
        glyph(360, 1250, 550), // 12 '(' size 3
        glyph(320, 700, 200), // 13 ')'
        glyph(340, 950, 450), // 14 ')' size 2
        glyph(360, 1250, 550), // 15 ')' size 3
        glyph(420, 850, 150), // 16 root sign
        glyph(440, 1200, 200), // 17 root sign size 2
        glyph(420, 750, 150), // 18 root hook (assembly bottom)
        glyph(420, 600, 0),  // 19 root extender
        glyph(420, 300, 0),  // 20 root top
        glyph(1000, 750, 250), // 21 summation
        glyph(1400, 1050, 400), // 22 summation display size
        glyph(600, 500, 0),  // 23 '+'
    ];
    glyphs[10].v_variants = vec![(10, 900), (11, 1400), (12, 1800)];
    glyphs[13].v_variants = vec![(13, 900), (14, 1400), (15, 1800)];
    glyphs[16].v_variants = vec![(16, 1000), (17, 1400)];
    glyphs[21].v_variants = vec![(21, 1000), (22, 1450)];
    glyphs[16].v_assembly = vec![
        (18, 0, 100, 900, 0),  // bottom hook
        (19, 100, 100, 600, 1), // extender
        (20, 100, 0, 300, 0),  // top
    ];
    // a kern pair for the text-run test: 'a' before 'x'
    glyphs[3].kerns = vec![(2, -30)];
    // math kern corners for the script-kerning tests: 'n' as base, 'i' as
    // script (corner order TL, TR, BL, BR)
    glyphs[6].math_kerns[1] = vec![(0, 50), (300, 20)];
    glyphs[6].math_kerns[3] = vec![(0, 40), (200, 10)];
    glyphs[7].math_kerns[2] = vec![(0, 30)];
    glyphs[7].math_kerns[0] = vec![(0, 25)];

    let mut w = ClmWriter::new();
    w.bytes(b"clm\0");
    w.u8(4); // CLM_VER
    w.u8(0x01); // math font, no glyph paths
    w.u16(1000).u16(500).u16(800).u16(200); // em, xHeight, ascent, descent
    for value in CONSTS {
        w.i16(value);
    }
    // unicode index
    w.u16(mapping.len() as u16);
    for &(code, _) in &mapping {
        w.u16(code);
    }
    for &(_, gid) in &mapping {
        w.u16(gid);
    }
    // ligature trie: "ix" -> glyph 7 (arbitrary, exercises the walk)
    w.i32(-1).u16(1);
    w.u32('i' as u32).i32(-1).u16(1);
    w.u32('x' as u32).i32(7).u16(0);
    // one class kerning table: '(' before digits
    w.u16(1);
    w.u16(1).u16(10).u16(0); // lefts: glyph 10, class 0
    w.u16(2).u16(4).u16(0).u16(5).u16(1); // rights: '1' class 0, '2' class 1
    w.u16(1).u16(2); // 1 row, 2 columns
    w.i16(-15).i16(-25);
    // glyphs
    w.u16(glyphs.len() as u16);
    for spec in &glyphs {
        write_glyph(&mut w, spec);
    }
    w.finish()
}

/// Load the fixture as a ready [`FontContext`] with upright letter styling,
/// so latin test characters resolve without supplementary-plane coverage.
pub fn fixture_context() -> FontContext {
    let _ = env_logger::builder().is_test(true).try_init();
    let otf = Otf::from_bytes(&fixture_clm()).expect("fixture clm must load");
    let mut ctx = FontContext::new(otf);
    let math = Otf::from_bytes(&fixture_clm()).unwrap();
    ctx.register_math_font("fixture", math);
    ctx.set_math_style(texmath::font::MathStyle::Upright);
    ctx
}

/// Glyph metric shorthand used by the scenario assertions.
pub fn metric(ctx: &FontContext, code: char) -> (f32, f32, f32) {
    let otf = &ctx.math_font().otf;
    let glyph = otf.glyph_of_unicode(code as u32).expect("fixture glyph");
    let metrics = glyph.metrics();
    (metrics.width as f32, metrics.height as f32, metrics.depth as f32)
}
