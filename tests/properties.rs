//! Property test: randomly generated atom trees of bounded depth must
//! always lay out to finite, sane metrics.

mod common;

use common::fixture_context;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use texmath::atom::{
    AccentedAtom, Atom, FencedAtom, FracAtom, OperatorAtom, RadicalAtom, ScriptsAtom,
    SpaceAtom, StackArgs, StackAtom,
};
use texmath::env::{Dimen, Env, TexStyle};
use texmath::glue::SpaceType;

const CHARS: [char; 10] = ['x', 'a', '1', '2', 'n', 'i', '0', '+', '=', '('];
const SYMBOLS: [&str; 6] = ["sum", "int", "alpha", "pm", "leq", "surd"];

fn random_atom(rng: &mut StdRng, depth: u32) -> Atom {
    if depth == 0 {
        return random_leaf(rng);
    }
    match rng.gen_range(0..10) {
        0 => Atom::row(
            (0..rng.gen_range(1..4))
                .map(|_| random_atom(rng, depth - 1))
                .collect(),
        ),
        1 => Atom::Frac(FracAtom::new(
            random_atom(rng, depth - 1),
            random_atom(rng, depth - 1),
            rng.gen(),
            Dimen::ZERO,
        )),
        2 => Atom::Scripts(ScriptsAtom::new(
            Some(random_atom(rng, depth - 1)),
            rng.gen::<bool>().then(|| random_atom(rng, depth - 1)),
            rng.gen::<bool>().then(|| random_atom(rng, depth - 1)),
        )),
        3 => Atom::Radical(RadicalAtom::new(random_atom(rng, depth - 1), None)),
        4 => Atom::Fenced(
            FencedAtom::new(random_atom(rng, depth - 1), "lparen", "rparen").unwrap(),
        ),
        5 => Atom::Operator(OperatorAtom::new(
            Atom::symbol("sum").unwrap(),
            Some(random_atom(rng, depth - 1)),
            Some(random_atom(rng, depth - 1)),
        )),
        6 => Atom::Stack(StackAtom::new(
            Some(random_atom(rng, depth - 1)),
            StackArgs::auto(random_atom(rng, depth - 1), true),
            StackArgs::none(),
        )),
        7 => Atom::Accented(
            AccentedAtom::new(random_atom(rng, depth - 1), "hat", rng.gen(), false).unwrap(),
        ),
        _ => random_leaf(rng),
    }
}

fn random_leaf(rng: &mut StdRng) -> Atom {
    match rng.gen_range(0..4) {
        0 => Atom::char(CHARS[rng.gen_range(0..CHARS.len())]),
        1 => Atom::symbol(SYMBOLS[rng.gen_range(0..SYMBOLS.len())]).unwrap(),
        2 => Atom::Space(SpaceAtom::of_type(SpaceType::ThinMuSkip)),
        _ => Atom::text("ax1", true),
    }
}

#[test]
fn random_trees_produce_finite_boxes() {
    let ctx = fixture_context();
    let mut rng = StdRng::seed_from_u64(0x7e85);

    for round in 0..400 {
        let depth = rng.gen_range(1..=8);
        let atom = random_atom(&mut rng, depth);
        let style = match rng.gen_range(0..3) {
            0 => TexStyle::Display,
            1 => TexStyle::Text,
            _ => TexStyle::ScriptCramped,
        };
        let mut env = Env::new(&ctx, style, 20.0);
        let node = atom.create_box(&mut env);

        assert!(node.width.is_finite(), "round {}: width not finite", round);
        assert!(node.height.is_finite(), "round {}: height not finite", round);
        assert!(node.depth.is_finite(), "round {}: depth not finite", round);
        assert!(
            node.vlen() >= 0.0,
            "round {}: negative vertical extent {}",
            round,
            node.vlen()
        );
        assert!(node.width >= 0.0, "round {}: negative width {}", round, node.width);
    }
}
