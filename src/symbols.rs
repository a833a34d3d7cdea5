//! The named-symbol table: maps control-sequence names (without backslash)
//! to codepoints, atom types and limit conventions.

use crate::atom::{AtomType, LimitsType};
use crate::error::{FontError, FontResult};

/// One named symbol.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Symbol {
    pub name: &'static str,
    pub unicode: u32,
    pub atom_type: AtomType,
    pub limits: LimitsType,
}

const fn sym(name: &'static str, unicode: u32, atom_type: AtomType) -> Symbol {
    Symbol { name, unicode, atom_type, limits: LimitsType::NoLimits }
}

const fn op(name: &'static str, unicode: u32, limits: LimitsType) -> Symbol {
    Symbol { name, unicode, atom_type: AtomType::BigOperator, limits }
}

// IMPORTANT: sorted by name, re-sort after adding an entry
#[rustfmt::skip]
static SYMBOLS: &[Symbol] = &[
    sym("Delta",       0x0394, AtomType::Ordinary),
    sym("Downarrow",   0x21D3, AtomType::Relation),
    sym("Gamma",       0x0393, AtomType::Ordinary),
    sym("Lambda",      0x039B, AtomType::Ordinary),
    sym("Leftarrow",   0x21D0, AtomType::Relation),
    sym("Leftrightarrow", 0x21D4, AtomType::Relation),
    sym("Omega",       0x03A9, AtomType::Ordinary),
    sym("Phi",         0x03A6, AtomType::Ordinary),
    sym("Pi",          0x03A0, AtomType::Ordinary),
    sym("Psi",         0x03A8, AtomType::Ordinary),
    sym("Rightarrow",  0x21D2, AtomType::Relation),
    sym("Sigma",       0x03A3, AtomType::Ordinary),
    sym("Theta",       0x0398, AtomType::Ordinary),
    sym("Uparrow",     0x21D1, AtomType::Relation),
    sym("Upsilon",     0x03A5, AtomType::Ordinary),
    sym("Vert",        0x2016, AtomType::Ordinary),
    sym("Xi",          0x039E, AtomType::Ordinary),
    sym("acute",       0x0301, AtomType::Ordinary),
    sym("alpha",       0x03B1, AtomType::Ordinary),
    sym("angle",       0x2220, AtomType::Ordinary),
    sym("approx",      0x2248, AtomType::Relation),
    sym("ast",         0x2217, AtomType::BinaryOperator),
    sym("backslash",   0x005C, AtomType::Ordinary),
    sym("bar",         0x0304, AtomType::Ordinary),
    sym("beta",        0x03B2, AtomType::Ordinary),
    op("bigcap",       0x22C2, LimitsType::Normal),
    op("bigcup",       0x22C3, LimitsType::Normal),
    op("bigodot",      0x2A00, LimitsType::Normal),
    op("bigoplus",     0x2A01, LimitsType::Normal),
    op("bigotimes",    0x2A02, LimitsType::Normal),
    op("bigsqcup",     0x2A06, LimitsType::Normal),
    op("biguplus",     0x2A04, LimitsType::Normal),
    op("bigvee",       0x22C1, LimitsType::Normal),
    op("bigwedge",     0x22C0, LimitsType::Normal),
    sym("breve",       0x0306, AtomType::Ordinary),
    sym("bullet",      0x2219, AtomType::BinaryOperator),
    sym("cap",         0x2229, AtomType::BinaryOperator),
    sym("cdot",        0x22C5, AtomType::BinaryOperator),
    sym("cdots",       0x22EF, AtomType::Inner),
    sym("check",       0x030C, AtomType::Ordinary),
    sym("chi",         0x03C7, AtomType::Ordinary),
    sym("circ",        0x2218, AtomType::BinaryOperator),
    op("coprod",       0x2210, LimitsType::Normal),
    sym("cup",         0x222A, AtomType::BinaryOperator),
    sym("dagger",      0x2020, AtomType::BinaryOperator),
    sym("ddot",        0x0308, AtomType::Ordinary),
    sym("delta",       0x03B4, AtomType::Ordinary),
    sym("div",         0x00F7, AtomType::BinaryOperator),
    sym("dot",         0x0307, AtomType::Ordinary),
    sym("downarrow",   0x2193, AtomType::Relation),
    sym("ell",         0x2113, AtomType::Ordinary),
    sym("emptyset",    0x2205, AtomType::Ordinary),
    sym("epsilon",     0x03F5, AtomType::Ordinary),
    sym("equiv",       0x2261, AtomType::Relation),
    sym("eta",         0x03B7, AtomType::Ordinary),
    sym("exists",      0x2203, AtomType::Ordinary),
    sym("forall",      0x2200, AtomType::Ordinary),
    sym("gamma",       0x03B3, AtomType::Ordinary),
    sym("geq",         0x2265, AtomType::Relation),
    sym("grave",       0x0300, AtomType::Ordinary),
    sym("hat",         0x0302, AtomType::Ordinary),
    sym("hbar",        0x210F, AtomType::Ordinary),
    sym("in",          0x2208, AtomType::Relation),
    sym("infty",       0x221E, AtomType::Ordinary),
    op("int",          0x222B, LimitsType::NoLimits),
    sym("iota",        0x03B9, AtomType::Ordinary),
    sym("kappa",       0x03BA, AtomType::Ordinary),
    sym("lambda",      0x03BB, AtomType::Ordinary),
    sym("langle",      0x27E8, AtomType::Opening),
    sym("lbrace",      0x007B, AtomType::Opening),
    sym("lbrack",      0x005B, AtomType::Opening),
    sym("lceil",       0x2308, AtomType::Opening),
    sym("ldots",       0x2026, AtomType::Inner),
    sym("leftarrow",   0x2190, AtomType::Relation),
    sym("leftrightarrow", 0x2194, AtomType::Relation),
    sym("leq",         0x2264, AtomType::Relation),
    sym("lfloor",      0x230A, AtomType::Opening),
    sym("lparen",      0x0028, AtomType::Opening),
    sym("mapsto",      0x21A6, AtomType::Relation),
    sym("mp",          0x2213, AtomType::BinaryOperator),
    sym("mu",          0x03BC, AtomType::Ordinary),
    sym("nabla",       0x2207, AtomType::Ordinary),
    sym("neg",         0x00AC, AtomType::Ordinary),
    sym("neq",         0x2260, AtomType::Relation),
    sym("ni",          0x220B, AtomType::Relation),
    sym("nu",          0x03BD, AtomType::Ordinary),
    op("oint",         0x222E, LimitsType::NoLimits),
    sym("omega",       0x03C9, AtomType::Ordinary),
    sym("ominus",      0x2296, AtomType::BinaryOperator),
    sym("oplus",       0x2295, AtomType::BinaryOperator),
    sym("otimes",      0x2297, AtomType::BinaryOperator),
    sym("partial",     0x2202, AtomType::Ordinary),
    sym("phi",         0x03D5, AtomType::Ordinary),
    sym("pi",          0x03C0, AtomType::Ordinary),
    sym("pm",          0x00B1, AtomType::BinaryOperator),
    sym("prime",       0x2032, AtomType::Ordinary),
    op("prod",         0x220F, LimitsType::Normal),
    sym("psi",         0x03C8, AtomType::Ordinary),
    sym("rangle",      0x27E9, AtomType::Closing),
    sym("rbrace",      0x007D, AtomType::Closing),
    sym("rbrack",      0x005D, AtomType::Closing),
    sym("rceil",       0x2309, AtomType::Closing),
    sym("rfloor",      0x230B, AtomType::Closing),
    sym("rho",         0x03C1, AtomType::Ordinary),
    sym("rightarrow",  0x2192, AtomType::Relation),
    sym("rparen",      0x0029, AtomType::Closing),
    sym("setminus",    0x2216, AtomType::BinaryOperator),
    sym("sigma",       0x03C3, AtomType::Ordinary),
    sym("sim",         0x223C, AtomType::Relation),
    sym("star",        0x22C6, AtomType::BinaryOperator),
    sym("subset",      0x2282, AtomType::Relation),
    sym("subseteq",    0x2286, AtomType::Relation),
    op("sum",          0x2211, LimitsType::Normal),
    sym("supset",      0x2283, AtomType::Relation),
    sym("supseteq",    0x2287, AtomType::Relation),
    sym("surd",        0x221A, AtomType::Ordinary),
    sym("tau",         0x03C4, AtomType::Ordinary),
    sym("theta",       0x03B8, AtomType::Ordinary),
    sym("tilde",       0x0303, AtomType::Ordinary),
    sym("times",       0x00D7, AtomType::BinaryOperator),
    sym("to",          0x2192, AtomType::Relation),
    sym("uparrow",     0x2191, AtomType::Relation),
    sym("upsilon",     0x03C5, AtomType::Ordinary),
    sym("varepsilon",  0x03B5, AtomType::Ordinary),
    sym("varphi",      0x03C6, AtomType::Ordinary),
    sym("vee",         0x2228, AtomType::BinaryOperator),
    sym("vert",        0x007C, AtomType::Ordinary),
    sym("wedge",       0x2227, AtomType::BinaryOperator),
    sym("widehat",     0x0302, AtomType::Ordinary),
    sym("widetilde",   0x0303, AtomType::Ordinary),
    sym("xi",          0x03BE, AtomType::Ordinary),
    sym("zeta",        0x03B6, AtomType::Ordinary),
];

/// Spacing class of a bare codepoint, for characters that reach the engine
/// without a named-symbol entry.
pub fn codepoint_atom_type(codepoint: u32) -> AtomType {
    match codepoint {
        0x2B | 0x2212 | 0xB1 | 0x2213 | 0xD7 | 0xF7 | 0x2217 | 0x2218 | 0x2219 | 0x2227
        | 0x2228 | 0x2229 | 0x222A | 0x2295 | 0x2296 | 0x2297 | 0x22C5 => {
            AtomType::BinaryOperator
        }
        0x3C | 0x3D | 0x3E | 0x2190..=0x21FF | 0x2208 | 0x220B | 0x2248 | 0x2260..=0x2287 => {
            AtomType::Relation
        }
        0x28 | 0x5B | 0x7B | 0x27E8 | 0x2308 | 0x230A => AtomType::Opening,
        0x29 | 0x5D | 0x7D | 0x27E9 | 0x2309 | 0x230B => AtomType::Closing,
        0x21 | 0x2C | 0x3B | 0x3F => AtomType::Punctuation,
        _ => AtomType::Ordinary,
    }
}

/// The symbol registered under `name`, if any.
pub fn get(name: &str) -> Option<&'static Symbol> {
    SYMBOLS
        .binary_search_by(|symbol| symbol.name.cmp(name))
        .ok()
        .map(|i| &SYMBOLS[i])
}

/// Like [`get`], but reports an unknown name as [`FontError::SymbolNotFound`].
pub fn require(name: &str) -> FontResult<&'static Symbol> {
    get(name).ok_or_else(|| FontError::SymbolNotFound(name.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_sorted_by_name() {
        for pair in SYMBOLS.windows(2) {
            assert!(
                pair[0].name < pair[1].name,
                "symbol table out of order at '{}'",
                pair[1].name
            );
        }
    }

    #[test]
    fn lookups() {
        assert_eq!(get("sum").unwrap().unicode, 0x2211);
        assert_eq!(get("alpha").unwrap().unicode, 0x03B1);
        assert_eq!(get("lparen").unwrap().atom_type, AtomType::Opening);
        assert!(get("nope").is_none());
        assert_eq!(
            require("nope"),
            Err(FontError::SymbolNotFound("nope".into()))
        );
        assert!(require("frak_nope").is_err());
    }

    #[test]
    fn operators_carry_limit_conventions() {
        assert_eq!(get("sum").unwrap().limits, LimitsType::Normal);
        assert_eq!(get("int").unwrap().limits, LimitsType::NoLimits);
    }
}
