//! End-to-end layout checks over a synthetic `.clm` math font (em = 1000,
//! text size 20): atom trees in, box metrics out, compared in font design
//! units.

mod common;

use common::{fixture_clm, fixture_context, metric};

use texmath::atom::{
    AccentedAtom, Alignment, Atom, FencedAtom, FontStyleAtom, FracAtom, OperatorAtom,
    RadicalAtom, ScriptsAtom, SpaceAtom, StackArgs, StackAtom, ZStackAtom,
};
use texmath::env::{Dimen, Env, TexStyle, Units, UnitType};
use texmath::font::FontStyle;
use texmath::glue::SpaceType;
use texmath::otf::Otf;

const EPS: f32 = 0.5;

macro_rules! assert_close {
    ($x:expr, $y:expr) => {{
        let (x, y): (f32, f32) = ($x, $y);
        assert!(
            (x - y).abs() <= EPS,
            "expected {} ≈ {} (±{})",
            x,
            y,
            EPS
        );
    }};
}

fn display_env(ctx: &texmath::font::FontContext) -> Env {
    Env::new(ctx, TexStyle::Display, 20.0)
}

#[test]
fn single_char_takes_glyph_metrics() {
    let ctx = fixture_context();
    let mut env = display_env(&ctx);
    let (w, h, d) = metric(&ctx, 'x');

    let node = Atom::char('x').create_box(&mut env);
    assert_close!(node.width, w);
    assert_close!(node.vlen(), h + d);
}

#[test]
fn fraction_centers_rule_on_axis() {
    let ctx = fixture_context();
    let mut env = display_env(&ctx);

    let frac = Atom::Frac(FracAtom::new(
        Atom::char('1'),
        Atom::char('2'),
        true,
        Dimen::ZERO,
    ));
    let node = frac.create_box(&mut env);

    // numerator and denominator share the widest width
    assert_close!(node.width, 500.0);
    // shifts dominate the minimum gaps here:
    //   gap above rule = 700 - 250 - 30 = 420, below = 700 + 250 - 30 - 640 = 280
    assert_close!(node.vlen(), 640.0 + 420.0 + 60.0 + 280.0 + 640.0);
    // the bar midpoint sits on the axis: depth = 640 + 280 + 30 - 250
    assert_close!(node.depth, 700.0);
}

#[test]
fn radical_covers_radicand() {
    let ctx = fixture_context();
    let mut env = display_env(&ctx);
    let (aw, ah, _) = metric(&ctx, 'a');

    let sqrt = Atom::Radical(RadicalAtom::new(Atom::char('a'), None));
    let node = sqrt.create_box(&mut env);

    // root sign (420 wide) plus the radicand
    assert_close!(node.width, 420.0 + aw);
    // the root glyph spans 1000 units against a 705-unit target, so the
    // clearance gap absorbs half the excess: (1000 - 705)/2 + 60 = 207.5
    let gap = 207.5;
    assert_close!(node.height, ah + gap + 60.0 + 60.0);
    // the oversized sign hangs below the baseline
    assert_close!(node.depth, 1000.0 - (ah + gap + 60.0));
    assert!(node.depth >= 0.0);
}

#[test]
fn superscript_shifts_up() {
    let ctx = fixture_context();
    let mut env = display_env(&ctx);
    let (aw, _, ad) = metric(&ctx, 'a');
    let (two_w, two_h, _) = metric(&ctx, '2');

    let scripts = Atom::Scripts(ScriptsAtom::new(
        Some(Atom::char('a')),
        Some(Atom::char('2')),
        None,
    ));
    let node = scripts.create_box(&mut env);

    // the superscript is script-size (70%)
    assert_close!(node.width, aw + 0.7 * two_w);
    // raised by superscriptShiftUp = 400
    assert_close!(node.height, 400.0 + 0.7 * two_h);
    assert_close!(node.depth, ad);
}

#[test]
fn script_math_kerning_is_asymmetric() {
    let ctx = fixture_context();
    let (nw, _, _) = metric(&ctx, 'n');
    let (iw, _, _) = metric(&ctx, 'i');

    // 'n' carries top-right kerns [(0, 50), (300, 20)] and bottom-right
    // [(0, 40), (200, 10)]; 'i' bottom-left [(0, 30)] and top-left [(0, 25)]

    // superscript: sampled at h1 = shift = 400 (20 + 30 = 50) and at
    // h2 = base height - shift = 40 (50 + 30 = 80); the larger sample wins
    let mut env = display_env(&ctx);
    let sup = Atom::Scripts(ScriptsAtom::new(
        Some(Atom::char('n')),
        Some(Atom::char('i')),
        None,
    ));
    let node = sup.create_box(&mut env);
    assert_close!(node.width, nw + 80.0 + 0.7 * iw);

    // subscript: sampled at script top - shift = 298 (10 + 25 = 35) and at
    // the base bottom = 0 (40 + 25 = 65); the smaller sample wins
    let mut env = display_env(&ctx);
    let sub = Atom::Scripts(ScriptsAtom::new(
        Some(Atom::char('n')),
        None,
        Some(Atom::char('i')),
    ));
    let node = sub.create_box(&mut env);
    assert_close!(node.width, nw + 35.0 + 0.7 * iw);
}

#[test]
fn fences_stretch_to_the_body() {
    let ctx = fixture_context();
    let mut env = display_env(&ctx);
    let (xw, xh, _) = metric(&ctx, 'x');

    let fenced = Atom::Fenced(FencedAtom::new(Atom::char('x'), "lparen", "rparen").unwrap());
    let node = fenced.create_box(&mut env);

    // body is tall enough to trigger stretching; the 900-unit parenthesis
    // (the first variant) covers the 450.5-unit clearance
    assert_close!(node.width, 320.0 + xw + 320.0);
    assert!(node.vlen() >= xh);
    assert_close!(node.vlen(), 900.0);
    // centered on the axis
    assert_close!(node.height, 700.0);
}

#[test]
fn operator_limits_stack_over_and_under() {
    let ctx = fixture_context();
    let mut env = display_env(&ctx);

    // \sum_{i=0}^{n} in display style
    let under = Atom::row(vec![Atom::char('i'), Atom::char('='), Atom::char('0')]);
    let over = Atom::char('n');
    let sum = Atom::Operator(OperatorAtom::new(
        Atom::symbol("sum").unwrap(),
        Some(under),
        Some(over),
    ));
    let node = sum.create_box(&mut env);

    // the display-size summation (1400 wide) is the widest part
    assert_close!(node.width, 1400.0);
    // over: 'n' at 70%, gap 100; base 1450 centered on the axis;
    // under: "i=0" at 70%, gap 100
    let over_h = 0.7 * 440.0;
    let under_h = 0.7 * 640.0;
    assert_close!(node.vlen(), over_h + 100.0 + 1450.0 + 100.0 + under_h);
    // baseline stays the operator's: depth = 475 + 100 + under height
    assert_close!(node.depth, 475.0 + 100.0 + under_h);
}

#[test]
fn glue_follows_the_spacing_table() {
    let ctx = fixture_context();
    let mut env = display_env(&ctx);
    let mu = 1000.0 / 18.0;

    // x + 2 : medium glue on both sides of the binary operator
    let row = Atom::row(vec![Atom::char('x'), Atom::char('+'), Atom::char('2')]);
    let node = row.create_box(&mut env);
    assert_close!(node.width, 480.0 + 4.0 * mu + 600.0 + 4.0 * mu + 500.0);

    // a leading binary operator is demoted to ordinary: no glue at all
    let row = Atom::row(vec![Atom::char('+'), Atom::char('x')]);
    let node = row.create_box(&mut env);
    assert_close!(node.width, 600.0 + 480.0);

    // an explicit space resets the spacing context, so a binary operator
    // right after one is demoted the same way
    let row = Atom::row(vec![
        Atom::char('x'),
        Atom::Space(SpaceAtom::of_type(SpaceType::ThinMuSkip)),
        Atom::char('+'),
        Atom::char('2'),
    ]);
    let node = row.create_box(&mut env);
    assert_close!(node.width, 480.0 + 3.0 * mu + 600.0 + 500.0);

    // script styles suppress binary spacing entirely
    let mut env = Env::new(&ctx, TexStyle::Script, 20.0);
    let row = Atom::row(vec![Atom::char('x'), Atom::char('+'), Atom::char('2')]);
    let node = row.create_box(&mut env);
    assert_close!(node.width, 0.7 * (480.0 + 600.0 + 500.0));
}

#[test]
fn accent_rides_the_base() {
    let ctx = fixture_context();
    let mut env = display_env(&ctx);
    let (xw, xh, _) = metric(&ctx, 'x');

    // the fixture has no combining accents, so the '?' substitute stands in;
    // geometry must still hold
    let atom = Atom::Accented(AccentedAtom::new(Atom::char('x'), "bar", false, false).unwrap());
    let node = atom.create_box(&mut env);

    assert!(node.width >= xw);
    // accent base height 450 binds: the accent baseline rises to
    // xh - min(xh, 450), so everything above xh is accent
    let delta = xh.min(450.0);
    assert_close!(node.height, (xh - delta) + 650.0);
    assert_close!(node.depth, 0.0);
}

#[test]
fn stack_takes_the_widest_part() {
    let ctx = fixture_context();
    let mut env = display_env(&ctx);

    let stack = Atom::Stack(StackAtom::new(
        Some(Atom::char('x')),
        StackArgs::auto(Atom::char('n'), true),
        StackArgs::none(),
    ));
    let node = stack.create_box(&mut env);
    // 'x' is wider than the script-size 'n'
    assert_close!(node.width, 480.0);
    // over gap: max(upperLimitGapMin, riseMin - part depth - base height)
    let over_h = 0.7 * 440.0;
    assert_close!(node.vlen(), over_h + 100.0 + 440.0);
}

#[test]
fn zstack_keeps_anchor_in_flow() {
    let ctx = fixture_context();
    let mut env = display_env(&ctx);

    let z = Atom::ZStack(ZStackAtom::new(
        Atom::char('1'),
        Atom::char('x'),
        Alignment::Center,
        Dimen::ZERO,
        Alignment::Top,
        Dimen::ZERO,
    ));
    let node = z.create_box(&mut env);
    assert_close!(node.width, 480.0);
    // the taller '1' aligned to the anchor top grows the extent
    assert_close!(node.vlen(), 640.0);
}

#[test]
fn spaces_and_breaks() {
    let ctx = fixture_context();
    let mut env = display_env(&ctx);
    let mu = 1000.0 / 18.0;

    let quad = Atom::Space(SpaceAtom::of_type(SpaceType::Quad)).create_box(&mut env);
    assert_close!(quad.width, 18.0 * mu);

    let neg = Atom::Space(SpaceAtom::of_type(SpaceType::NegThinMuSkip)).create_box(&mut env);
    assert_close!(neg.width, -3.0 * mu);

    let blank = Atom::Space(SpaceAtom::blank(true)).create_box(&mut env);
    assert_close!(blank.width, 250.0);

    let brk = Atom::BreakMark.create_box(&mut env);
    assert_close!(brk.width, 0.0);
    assert!(matches!(
        brk.kind,
        texmath::boxes::BoxKind::Glue { breakable: true, .. }
    ));
}

#[test]
fn text_runs_apply_pair_kerning() {
    let ctx = fixture_context();
    let mut env = display_env(&ctx);

    // the fixture kerns 'a' before 'x' by -30
    let node = Atom::text("ax", true).create_box(&mut env);
    assert_close!(node.width, 460.0 - 30.0 + 480.0);
}

#[test]
fn font_style_scope_is_restored() {
    let ctx = fixture_context();
    let mut env = display_env(&ctx);

    let atom = Atom::FontStyle(FontStyleAtom::new(
        FontStyle::BF,
        true,
        true,
        Atom::char('x'),
    ));
    let node = atom.create_box(&mut env);
    // bold-x maps outside the fixture's coverage: '?' substitutes
    assert_close!(node.width, 500.0);
    assert_eq!(env.math_font_style(), FontStyle::NONE);
}

#[test]
fn loaded_tables_are_queryable() {
    let otf = Otf::from_bytes(&fixture_clm()).unwrap();

    // invariant: indexed lookup and direct lookup agree
    let gid = otf.glyph_id('x' as u32);
    assert!(gid >= 0);
    let direct = otf.glyph_of_unicode('x' as u32).unwrap();
    assert_eq!(direct.metrics().width, otf.glyph(gid).unwrap().metrics().width);

    // ligature trie: "ix"
    let liga = otf
        .ligatures()
        .unwrap()
        .child('i' as u32)
        .unwrap()
        .child('x' as u32)
        .unwrap()
        .liga();
    assert_eq!(liga, 7);

    // class kerning: '(' against the digit classes
    assert_eq!(otf.class_kerning(10, 4), -15);
    assert_eq!(otf.class_kerning(10, 5), -25);
    assert_eq!(otf.class_kerning(2, 4), 0);

    assert_eq!(otf.space(), 250);
    assert!(otf.is_math_font());
}

#[test]
fn unit_conversions_are_linear() {
    let ctx = fixture_context();
    let env = display_env(&ctx);

    for unit in [
        UnitType::Em,
        UnitType::Ex,
        UnitType::Pixel,
        UnitType::Point,
        UnitType::Pica,
        UnitType::Mu,
        UnitType::Cm,
        UnitType::Mm,
        UnitType::In,
        UnitType::Sp,
        UnitType::Pt,
        UnitType::Dd,
        UnitType::Cc,
        UnitType::Tt,
    ] {
        let one = Units::fsize(unit, 1.0, &env);
        for k in [0.0, 0.5, 2.0, -3.25] {
            assert!((Units::fsize(unit, k, &env) - k * one).abs() <= 1e-3);
        }
    }
    // em at scale 1 is the em size itself
    assert_close!(Units::fsize(UnitType::Em, 1.0, &env), 1000.0);
    assert_close!(Units::fsize(UnitType::Mu, 18.0, &env), 1000.0);
}
