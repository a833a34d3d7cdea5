//! Mapping of ASCII and Greek codepoints into the Mathematical Alphanumeric
//! Symbols block (U+1D400–U+1D7FF), per math style and font style.
//!
//! Unicode leaves a number of slots in that block reserved and points
//! implementors at the earlier letterlike symbols (e.g. the math-italic 'h'
//! at U+1D455 is really U+210E, the Planck constant). A sorted substitution
//! table patches those holes after the block arithmetic.

use crate::font::style::FontStyle;
use crate::utils::bin_index_of;

/// How letters are styled by default in formulas.
///
/// ```text
/// style    latin  Latin  greek  Greek
/// -----------------------------------
/// TeX      it     it     it     up
/// ISO      it     it     it     it
/// French   it     up     up     up
/// upright  up     up     up     up
/// ```
#[derive(Serialize, Deserialize)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MathStyle {
    TeX,
    ISO,
    French,
    Upright,
}

/// Base codepoints of one alphabet version, one per character channel.
#[derive(Debug, Copy, Clone)]
struct MathVersion {
    digit: u32,
    latin_small: u32,
    latin_capital: u32,
    greek_small: u32,
    greek_capital: u32,
}

const DIGIT: u32 = '0' as u32;
const LATIN_SMALL: u32 = 'a' as u32;
const LATIN_CAPITAL: u32 = 'A' as u32;
const GREEK_SMALL: u32 = 0x03B1;
const GREEK_CAPITAL: u32 = 0x0391;

const UPRIGHT: MathVersion = MathVersion {
    digit: DIGIT,
    latin_small: LATIN_SMALL,
    latin_capital: LATIN_CAPITAL,
    greek_small: GREEK_SMALL,
    greek_capital: GREEK_CAPITAL,
};

const TEX: MathVersion = MathVersion {
    digit: DIGIT,
    latin_small: 0x1D44E,
    latin_capital: 0x1D434,
    greek_small: 0x1D6FC,
    greek_capital: GREEK_CAPITAL,
};

const ISO: MathVersion = MathVersion {
    digit: DIGIT,
    latin_small: 0x1D44E,
    latin_capital: 0x1D434,
    greek_small: 0x1D6FC,
    greek_capital: 0x1D6E2,
};

const FRENCH: MathVersion = MathVersion {
    digit: DIGIT,
    latin_small: 0x1D44E,
    latin_capital: LATIN_CAPITAL,
    greek_small: GREEK_SMALL,
    greek_capital: GREEK_CAPITAL,
};

const BF: MathVersion = MathVersion {
    digit: 0x1D7CE,
    latin_small: 0x1D41A,
    latin_capital: 0x1D400,
    greek_small: 0x1D6C2,
    greek_capital: 0x1D6A8,
};

const IT: MathVersion = ISO;

const BFIT: MathVersion = MathVersion {
    digit: DIGIT,
    latin_small: 0x1D482,
    latin_capital: 0x1D468,
    greek_small: 0x1D736,
    greek_capital: 0x1D71C,
};

const CAL: MathVersion = MathVersion {
    digit: DIGIT,
    latin_small: 0x1D4B6,
    latin_capital: 0x1D49C,
    greek_small: GREEK_SMALL,
    greek_capital: GREEK_CAPITAL,
};

const BFCAL: MathVersion = MathVersion {
    digit: DIGIT,
    latin_small: 0x1D4EA,
    latin_capital: 0x1D4D0,
    greek_small: GREEK_SMALL,
    greek_capital: GREEK_CAPITAL,
};

const FRAK: MathVersion = MathVersion {
    digit: DIGIT,
    latin_small: 0x1D51E,
    latin_capital: 0x1D504,
    greek_small: GREEK_SMALL,
    greek_capital: GREEK_CAPITAL,
};

const BFFRAK: MathVersion = MathVersion {
    digit: DIGIT,
    latin_small: 0x1D586,
    latin_capital: 0x1D56C,
    greek_small: GREEK_SMALL,
    greek_capital: GREEK_CAPITAL,
};

const BB: MathVersion = MathVersion {
    digit: 0x1D7D8,
    latin_small: 0x1D552,
    latin_capital: 0x1D538,
    greek_small: GREEK_SMALL,
    greek_capital: GREEK_CAPITAL,
};

const SF: MathVersion = MathVersion {
    digit: 0x1D7E2,
    latin_small: 0x1D5BA,
    latin_capital: 0x1D5A2,
    greek_small: GREEK_SMALL,
    greek_capital: GREEK_CAPITAL,
};

const SFBF: MathVersion = MathVersion {
    digit: 0x1D7EC,
    latin_small: 0x1D5EE,
    latin_capital: 0x1D5D4,
    greek_small: 0x1D770,
    greek_capital: 0x1D756,
};

const SFIT: MathVersion = MathVersion {
    digit: DIGIT,
    latin_small: 0x1D622,
    latin_capital: 0x1D608,
    greek_small: GREEK_SMALL,
    greek_capital: GREEK_CAPITAL,
};

const SFBFIT: MathVersion = MathVersion {
    digit: DIGIT,
    latin_small: 0x1D656,
    latin_capital: 0x1D63C,
    greek_small: 0x1D7AA,
    greek_capital: 0x1D790,
};

const TT: MathVersion = MathVersion {
    digit: 0x1D7F6,
    latin_small: 0x1D68A,
    latin_capital: 0x1D670,
    greek_small: GREEK_SMALL,
    greek_capital: GREEK_CAPITAL,
};

/// The reserved slots of the Mathematical Alphanumeric Symbols block and the
/// letterlike codepoints standing in for them, sorted by reserved codepoint.
const RESERVED: [(u32, u32); 24] = [
    (0x1D455, 0x210E), // italic h -> planck constant
    (0x1D49D, 0x212C), // script B
    (0x1D4A0, 0x2130), // script E
    (0x1D4A1, 0x2131), // script F
    (0x1D4A3, 0x210B), // script H
    (0x1D4A4, 0x2110), // script I
    (0x1D4A7, 0x2112), // script L
    (0x1D4A8, 0x2133), // script M
    (0x1D4AD, 0x211B), // script R
    (0x1D4BA, 0x212F), // script e
    (0x1D4BC, 0x210A), // script g
    (0x1D4C4, 0x2134), // script o
    (0x1D506, 0x212D), // fraktur C
    (0x1D50B, 0x210C), // fraktur H
    (0x1D50C, 0x2111), // fraktur I
    (0x1D515, 0x211C), // fraktur R
    (0x1D51D, 0x2128), // fraktur Z
    (0x1D53A, 0x2102), // double-struck C
    (0x1D53F, 0x210D), // double-struck H
    (0x1D545, 0x2115), // double-struck N
    (0x1D547, 0x2119), // double-struck P
    (0x1D548, 0x211A), // double-struck Q
    (0x1D549, 0x211D), // double-struck R
    (0x1D551, 0x2124), // double-struck Z
];

impl MathVersion {
    fn map(&self, codepoint: u32) -> u32 {
        let candidate = match codepoint {
            c if (DIGIT..=DIGIT + 9).contains(&c) => self.digit + (c - DIGIT),
            c if (LATIN_SMALL..=LATIN_SMALL + 25).contains(&c) => {
                self.latin_small + (c - LATIN_SMALL)
            }
            c if (LATIN_CAPITAL..=LATIN_CAPITAL + 25).contains(&c) => {
                self.latin_capital + (c - LATIN_CAPITAL)
            }
            c if (GREEK_SMALL..=GREEK_SMALL + 24).contains(&c) => {
                self.greek_small + (c - GREEK_SMALL)
            }
            c if (GREEK_CAPITAL..=GREEK_CAPITAL + 24).contains(&c) => {
                self.greek_capital + (c - GREEK_CAPITAL)
            }
            // nabla and partial sit right after the styled Greek alphabets
            0x2207 if self.greek_capital != GREEK_CAPITAL => self.greek_capital + 25,
            0x2202 if self.greek_small != GREEK_SMALL => self.greek_small + 25,
            c => c,
        };
        substitute_reserved(candidate)
    }
}

fn substitute_reserved(codepoint: u32) -> u32 {
    let i = bin_index_of(
        RESERVED.len(),
        |i| {
            if codepoint < RESERVED[i].0 {
                -1
            } else if codepoint > RESERVED[i].0 {
                1
            } else {
                0
            }
        },
        false,
    );
    if i < 0 {
        codepoint
    } else {
        RESERVED[i as usize].1
    }
}

fn version_of(style: FontStyle) -> MathVersion {
    // bold combinations first so e.g. bf|cal resolves to the bold alphabet
    if style.contains(FontStyle::SFBFIT) {
        SFBFIT
    } else if style.contains(FontStyle::SFBF) {
        SFBF
    } else if style.contains(FontStyle::SFIT) {
        SFIT
    } else if style.contains(FontStyle::BFIT) {
        BFIT
    } else if style.contains(FontStyle::BFCAL) {
        BFCAL
    } else if style.contains(FontStyle::BFFRAK) {
        BFFRAK
    } else if style.contains(FontStyle::CAL) {
        CAL
    } else if style.contains(FontStyle::FRAK) {
        FRAK
    } else if style.contains(FontStyle::BB) {
        BB
    } else if style.contains(FontStyle::BF) {
        BF
    } else if style.contains(FontStyle::IT) {
        IT
    } else if style.contains(FontStyle::SF) {
        SF
    } else if style.contains(FontStyle::TT) {
        TT
    } else if style.contains(FontStyle::RM) {
        UPRIGHT
    } else {
        UPRIGHT
    }
}

fn default_version(math_style: MathStyle) -> MathVersion {
    match math_style {
        MathStyle::TeX => TEX,
        MathStyle::ISO => ISO,
        MathStyle::French => FRENCH,
        MathStyle::Upright => UPRIGHT,
    }
}

/// Map `codepoint` into the alphabet selected by `style`, falling back to the
/// default alphabet of `math_style` when `style` carries no alphabet bits.
/// Codepoints outside digits/Latin/Greek map to themselves.
pub fn map_codepoint(math_style: MathStyle, style: FontStyle, codepoint: u32) -> u32 {
    let version = if !style.is_valid() || style == FontStyle::NONE {
        default_version(math_style)
    } else {
        version_of(style)
    };
    version.map(codepoint)
}
