//! TeX's elastic inter-atom spacing ("glue"), driven by the atom types on
//! either side and the current style (TeXBook p. 170).
//!
//! Entries marked script-suppressed in the TeXBook table vanish in script and
//! scriptScript styles. All values are in mu (1/18 em) and materialize as
//! glue boxes through [`Units`].

use crate::atom::AtomType;
use crate::boxes::BoxNode;
use crate::env::{Env, Units, UnitType};

/// Named skips usable as explicit spaces; the negative kinds back commands
/// like `\!`.
#[derive(Serialize, Deserialize)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SpaceType {
    None,
    ThinMuSkip,
    MedMuSkip,
    ThickMuSkip,
    NegThinMuSkip,
    NegMedMuSkip,
    NegThickMuSkip,
    /// one em of the current font
    Quad,
}

/// Glue components in mu.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Glue {
    pub space: f32,
    pub stretch: f32,
    pub shrink: f32,
}

impl Glue {
    const NONE: Glue = Glue { space: 0.0, stretch: 0.0, shrink: 0.0 };
    const THIN: Glue = Glue { space: 3.0, stretch: 0.0, shrink: 0.0 };
    const MED: Glue = Glue { space: 4.0, stretch: 2.0, shrink: 4.0 };
    const THICK: Glue = Glue { space: 5.0, stretch: 5.0, shrink: 0.0 };
    const QUAD: Glue = Glue { space: 18.0, stretch: 0.0, shrink: 0.0 };

    fn negate(self) -> Glue {
        Glue { space: -self.space, stretch: -self.stretch, shrink: -self.shrink }
    }

    fn of(space_type: SpaceType) -> Glue {
        match space_type {
            SpaceType::None => Glue::NONE,
            SpaceType::ThinMuSkip => Glue::THIN,
            SpaceType::MedMuSkip => Glue::MED,
            SpaceType::ThickMuSkip => Glue::THICK,
            SpaceType::NegThinMuSkip => Glue::THIN.negate(),
            SpaceType::NegMedMuSkip => Glue::MED.negate(),
            SpaceType::NegThickMuSkip => Glue::THICK.negate(),
            SpaceType::Quad => Glue::QUAD,
        }
    }

    fn box_of(self, env: &Env) -> BoxNode {
        BoxNode::glue(
            Units::fsize(UnitType::Mu, self.space, env),
            Units::fsize(UnitType::Mu, self.stretch, env),
            Units::fsize(UnitType::Mu, self.shrink, env),
        )
    }
}

/// The glue between a `left` and a `right` atom in the current style.
fn rule_between(left: AtomType, right: AtomType, script: bool) -> Glue {
    use AtomType::*;

    // thin spaces that survive in script styles
    let always = match (left, right) {
        (Ordinary, BigOperator)
        | (BigOperator, Ordinary)
        | (BigOperator, BigOperator)
        | (Closing, BigOperator)
        | (Inner, BigOperator) => Some(Glue::THIN),
        _ => None,
    };
    if let Some(glue) = always {
        return glue;
    }
    if script {
        return Glue::NONE;
    }

    match (left, right) {
        (Ordinary, BinaryOperator) => Glue::MED,
        (Ordinary, Relation) => Glue::THICK,
        (Ordinary, Inner) => Glue::THIN,

        (BigOperator, Relation) => Glue::THICK,
        (BigOperator, Inner) => Glue::THIN,

        (BinaryOperator, Ordinary)
        | (BinaryOperator, BigOperator)
        | (BinaryOperator, Opening)
        | (BinaryOperator, Inner) => Glue::MED,

        (Relation, Ordinary)
        | (Relation, BigOperator)
        | (Relation, Opening)
        | (Relation, Inner) => Glue::THICK,

        (Closing, BinaryOperator) => Glue::MED,
        (Closing, Relation) => Glue::THICK,
        (Closing, Inner) => Glue::THIN,

        (Punctuation, BinaryOperator) => Glue::NONE,
        (Punctuation, _) => Glue::THIN,

        (Inner, Ordinary)
        | (Inner, Opening)
        | (Inner, Punctuation)
        | (Inner, Inner) => Glue::THIN,
        (Inner, BinaryOperator) => Glue::MED,
        (Inner, Relation) => Glue::THICK,

        _ => Glue::NONE,
    }
}

/// A glue box for the space between two adjacent atoms.
pub fn between(left: AtomType, right: AtomType, env: &Env) -> BoxNode {
    let script = env.style() >= crate::env::TexStyle::Script;
    rule_between(left, right, script).box_of(env)
}

/// The natural space between two adjacent atoms, in design units.
pub fn space_between(left: AtomType, right: AtomType, env: &Env) -> f32 {
    let script = env.style() >= crate::env::TexStyle::Script;
    Units::fsize(UnitType::Mu, rule_between(left, right, script).space, env)
}

/// A glue box for an explicit skip.
pub fn space_of(space_type: SpaceType, env: &Env) -> BoxNode {
    Glue::of(space_type).box_of(env)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atom::AtomType::*;

    #[test]
    fn table_matches_tex() {
        assert_eq!(rule_between(Ordinary, BigOperator, false), Glue::THIN);
        assert_eq!(rule_between(Ordinary, BinaryOperator, false), Glue::MED);
        assert_eq!(rule_between(Ordinary, Relation, false), Glue::THICK);
        assert_eq!(rule_between(Ordinary, Opening, false), Glue::NONE);
        assert_eq!(rule_between(Relation, Opening, false), Glue::THICK);
        assert_eq!(rule_between(Punctuation, Ordinary, false), Glue::THIN);
        assert_eq!(rule_between(Inner, Relation, false), Glue::THICK);
        assert_eq!(rule_between(Opening, Ordinary, false), Glue::NONE);
    }

    #[test]
    fn script_styles_suppress_most_spacing() {
        // operator spacing survives
        assert_eq!(rule_between(Ordinary, BigOperator, true), Glue::THIN);
        assert_eq!(rule_between(BigOperator, Ordinary, true), Glue::THIN);
        // everything else goes away
        assert_eq!(rule_between(Ordinary, BinaryOperator, true), Glue::NONE);
        assert_eq!(rule_between(Ordinary, Relation, true), Glue::NONE);
        assert_eq!(rule_between(Punctuation, Ordinary, true), Glue::NONE);
    }

    #[test]
    fn negative_skips_negate() {
        assert_eq!(Glue::of(SpaceType::NegMedMuSkip).space, -4.0);
        assert_eq!(Glue::of(SpaceType::Quad).space, 18.0);
    }
}
