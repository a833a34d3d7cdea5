//! Conversion of every TeX length unit into font design units at a given
//! environment.

use crate::env::{pixels_per_point, Env};
use crate::error::ArgError;
use crate::utils::bin_index_of;

/// The length units the engine understands. `None` means "already in design
/// units" and is returned by the parser for bare numbers.
#[derive(Serialize, Deserialize)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnitType {
    Em,
    Ex,
    Pixel,
    /// big point (PostScript point), the "point" everything else is defined
    /// against
    Point,
    Pica,
    /// math unit, 1/18 em
    Mu,
    Cm,
    Mm,
    In,
    Sp,
    /// printer's point, 0.99626401 bp
    Pt,
    Dd,
    Cc,
    /// the fraction rule thickness of the current math font
    Tt,
    None,
}

/// A dimension: value plus unit.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Dimen {
    pub val: f32,
    pub unit: UnitType,
}

impl Dimen {
    pub const ZERO: Dimen = Dimen { val: 0.0, unit: UnitType::None };

    pub fn new(val: f32, unit: UnitType) -> Dimen {
        Dimen { val, unit }
    }

    pub fn is_zero(&self) -> bool {
        self.val == 0.0
    }
}

// IMPORTANT: sorted by unit name, re-sort after adding an item
const UNITS: [(&str, UnitType); 16] = [
    ("bp", UnitType::Point),
    ("cc", UnitType::Cc),
    ("cm", UnitType::Cm),
    ("dd", UnitType::Dd),
    ("em", UnitType::Em),
    ("ex", UnitType::Ex),
    ("in", UnitType::In),
    ("mm", UnitType::Mm),
    ("mu", UnitType::Mu),
    ("pc", UnitType::Pica),
    ("pica", UnitType::Pica),
    ("pix", UnitType::Pixel),
    ("pixel", UnitType::Pixel),
    ("pt", UnitType::Pt),
    ("px", UnitType::Pixel),
    ("sp", UnitType::Sp),
];

/// Size of one big point in font design units at the current environment.
fn pt(env: &Env) -> f32 {
    pixels_per_point() * env.upem() / env.ppem()
}

/// Unit conversions into font design units.
pub struct Units;

impl Units {
    /// Design-unit size of `size` in `unit`. Linear in `size`.
    pub fn fsize(unit: UnitType, size: f32, env: &Env) -> f32 {
        let one = match unit {
            UnitType::Em => env.em(),
            UnitType::Ex => env.x_height(),
            UnitType::Pixel => pt(env) / pixels_per_point(),
            UnitType::Point => pt(env),
            // 1 pica = 12 point
            UnitType::Pica => 12.0 * pt(env),
            // 1 mu = 1/18 em
            UnitType::Mu => env.em() / 18.0,
            // 1 cm = 28.346456693 point
            UnitType::Cm => 28.346_457 * pt(env),
            // 1 mm = 1/10 cm
            UnitType::Mm => 2.834_645_7 * pt(env),
            // 1 in = 72 point
            UnitType::In => 72.0 * pt(env),
            // 1 sp = 65536 point
            UnitType::Sp => 65536.0 * pt(env),
            // 1 pt = 0.99626401 point (printer's)
            UnitType::Pt => 0.996_264 * pt(env),
            // 1 dd = 1.0660349422 point
            UnitType::Dd => 1.066_034_9 * pt(env),
            // 1 cc = 12 dd
            UnitType::Cc => 12.792_419 * pt(env),
            UnitType::Tt => env.rule_thickness() * env.scale(),
            UnitType::None => return size,
        };
        one * size
    }

    pub fn dimen(dimen: Dimen, env: &Env) -> f32 {
        Self::fsize(dimen.unit, dimen.val, env)
    }

    /// The unit registered under `name`; unknown names fall back to pixels.
    pub fn unit_of(name: &str) -> UnitType {
        let i = bin_index_of(
            UNITS.len(),
            |i| match name.cmp(UNITS[i].0) {
                std::cmp::Ordering::Less => -1,
                std::cmp::Ordering::Equal => 0,
                std::cmp::Ordering::Greater => 1,
            },
            false,
        );
        if i < 0 {
            UnitType::Pixel
        } else {
            UNITS[i as usize].1
        }
    }

    /// Parse `<number><alpha-unit>` (e.g. `"1.5em"`), trimmed and
    /// case-folded. An empty string is the zero dimension; a bare number has
    /// unit `None`.
    pub fn parse(length: &str) -> Result<Dimen, ArgError> {
        let length = length.trim();
        if length.is_empty() {
            return Ok(Dimen::ZERO);
        }
        let split = length
            .find(|c: char| c.is_alphabetic())
            .unwrap_or(length.len());
        let (number, unit) = length.split_at(split);
        let val: f32 = number
            .trim()
            .parse()
            .map_err(|_| ArgError::InvalidLength(length.to_owned()))?;
        if unit.is_empty() {
            return Ok(Dimen::new(val, UnitType::None));
        }
        Ok(Dimen::new(val, Units::unit_of(&unit.trim().to_lowercase())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_unit_name_round_trips() {
        for (name, unit) in UNITS {
            assert_eq!(Units::unit_of(name), unit);
        }
        assert_eq!(Units::unit_of("zz"), UnitType::Pixel);
    }

    #[test]
    fn parse_lengths() {
        assert_eq!(Units::parse("1.5em").unwrap(), Dimen::new(1.5, UnitType::Em));
        assert_eq!(Units::parse("  12 PT ").unwrap(), Dimen::new(12.0, UnitType::Pt));
        assert_eq!(Units::parse("-3mu").unwrap(), Dimen::new(-3.0, UnitType::Mu));
        assert_eq!(Units::parse("2qq").unwrap(), Dimen::new(2.0, UnitType::Pixel));
        assert_eq!(Units::parse("").unwrap(), Dimen::ZERO);
        assert_eq!(Units::parse("42").unwrap(), Dimen::new(42.0, UnitType::None));
        assert!(Units::parse("abc").is_err());
        assert!(Units::parse("1.2.3em").is_err());
    }
}
