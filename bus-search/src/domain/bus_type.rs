//! Bus type classification.
//!
//! Bus types are free text ("A/C Sleeper (2+1)", "Volvo Multi-Axle Semi
//! Sleeper", "NON A/C Seater / Sleeper (2+1)"), so classes are recognised by
//! whole-word, case-insensitive keyword search rather than by a fixed list.
//!
//! Two pairs of classes exclude each other:
//! - `Sleeper` never matches a type that mentions a semi sleeper, and
//!   `SemiSleeper` never matches a type that also mentions a plain sleeper.
//! - `Ac` never matches a type that mentions a non-AC form; `NonAc` matches
//!   those forms directly.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use super::InvalidLabel;

static SEMI_SLEEPER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bsemi[\s-]*sleeper\b").expect("valid regex"));

static SLEEPER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bsleeper\b").expect("valid regex"));

static NON_AC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bnon[\s-]*(?:ac|a/c)\b").expect("valid regex"));

static AC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:ac|a/c)\b").expect("valid regex"));

/// A bus type category offered by the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BusTypeClass {
    Sleeper,
    SemiSleeper,
    Ac,
    NonAc,
}

impl BusTypeClass {
    /// All classes in the order they are offered to the user.
    pub const ALL: [BusTypeClass; 4] = [
        BusTypeClass::Sleeper,
        BusTypeClass::SemiSleeper,
        BusTypeClass::Ac,
        BusTypeClass::NonAc,
    ];

    /// Whether a free-text bus type belongs to this class.
    ///
    /// # Examples
    ///
    /// ```
    /// use bus_search::domain::BusTypeClass;
    ///
    /// assert!(BusTypeClass::Sleeper.matches("AC Sleeper (2+1)"));
    /// assert!(!BusTypeClass::Sleeper.matches("Semi Sleeper AC"));
    /// assert!(BusTypeClass::SemiSleeper.matches("Semi Sleeper AC"));
    /// assert!(BusTypeClass::Ac.matches("A/C Seater"));
    /// assert!(!BusTypeClass::Ac.matches("Non AC Seater"));
    /// assert!(BusTypeClass::NonAc.matches("NON-AC Sleeper"));
    /// ```
    pub fn matches(self, bus_type: &str) -> bool {
        match self {
            BusTypeClass::Sleeper => {
                !SEMI_SLEEPER.is_match(bus_type) && has_plain_sleeper(bus_type)
            }
            BusTypeClass::SemiSleeper => {
                SEMI_SLEEPER.is_match(bus_type) && !has_plain_sleeper(bus_type)
            }
            BusTypeClass::Ac => AC.is_match(bus_type) && !NON_AC.is_match(bus_type),
            BusTypeClass::NonAc => NON_AC.is_match(bus_type),
        }
    }

    /// Display label, also the value submitted by the dashboard form.
    pub fn label(self) -> &'static str {
        match self {
            BusTypeClass::Sleeper => "Sleeper",
            BusTypeClass::SemiSleeper => "Semi Sleeper",
            BusTypeClass::Ac => "AC",
            BusTypeClass::NonAc => "NON AC",
        }
    }
}

/// Whether `sleeper` occurs as a word outside any "semi sleeper" phrase.
fn has_plain_sleeper(bus_type: &str) -> bool {
    let without_semi = SEMI_SLEEPER.replace_all(bus_type, " ");
    SLEEPER.is_match(&without_semi)
}

impl fmt::Display for BusTypeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BusTypeClass {
    type Err = InvalidLabel;

    /// Accepts the labels case-insensitively, with a space, hyphen or nothing
    /// between the two words ("semi-sleeper", "non ac", "NONAC").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match key.as_str() {
            "sleeper" => Ok(BusTypeClass::Sleeper),
            "semisleeper" => Ok(BusTypeClass::SemiSleeper),
            "ac" | "a/c" => Ok(BusTypeClass::Ac),
            "nonac" | "nona/c" => Ok(BusTypeClass::NonAc),
            _ => Err(InvalidLabel::new("bus type", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sleeper() {
        let c = BusTypeClass::Sleeper;
        assert!(c.matches("A/C Sleeper (2+1)"));
        assert!(c.matches("NON A/C Sleeper (2+1)"));
        assert!(c.matches("sleeper"));
        assert!(!c.matches("Semi Sleeper AC"));
        assert!(!c.matches("Volvo Multi-Axle A/C Semi-Sleeper (2+2)"));
        assert!(!c.matches("Sleepers Only"));
        assert!(!c.matches("AC Seater (2+2)"));
    }

    #[test]
    fn semi_sleeper() {
        let c = BusTypeClass::SemiSleeper;
        assert!(c.matches("Semi Sleeper AC"));
        assert!(c.matches("Bharat Benz A/C Semi-Sleeper (2+2)"));
        assert!(c.matches("SEMISLEEPER"));
        assert!(!c.matches("A/C Sleeper (2+1)"));
        assert!(!c.matches("A/C Seater / Sleeper (2+1)"));
    }

    #[test]
    fn mixed_layout_belongs_to_neither_sleeper_class() {
        let mixed = "A/C Semi Sleeper / Sleeper (2+1)";
        assert!(!BusTypeClass::Sleeper.matches(mixed));
        assert!(!BusTypeClass::SemiSleeper.matches(mixed));
    }

    #[test]
    fn ac() {
        let c = BusTypeClass::Ac;
        assert!(c.matches("AC Sleeper"));
        assert!(c.matches("A/C Seater (2+2)"));
        assert!(c.matches("Volvo 9600 ac Multi-Axle"));
        assert!(!c.matches("Non AC Seater"));
        assert!(!c.matches("NON-AC Sleeper (2+1)"));
        assert!(!c.matches("NON A/C Seater"));
        assert!(!c.matches("NONAC Seater"));
        assert!(!c.matches("Seater"));
        assert!(!c.matches("Accord Travels Seater"));
    }

    #[test]
    fn non_ac() {
        let c = BusTypeClass::NonAc;
        assert!(c.matches("Non AC Seater"));
        assert!(c.matches("NON-AC Sleeper (2+1)"));
        assert!(c.matches("NON A/C Seater / Sleeper (2+1)"));
        assert!(!c.matches("AC Sleeper"));
        assert!(!c.matches("Nonstop AC Seater"));
    }

    #[test]
    fn labels() {
        for class in BusTypeClass::ALL {
            assert_eq!(class.label().parse::<BusTypeClass>().unwrap(), class);
        }
        assert_eq!(
            "semi-sleeper".parse::<BusTypeClass>().unwrap(),
            BusTypeClass::SemiSleeper
        );
        assert_eq!("non-ac".parse::<BusTypeClass>().unwrap(), BusTypeClass::NonAc);
        assert_eq!("A/C".parse::<BusTypeClass>().unwrap(), BusTypeClass::Ac);
        assert!("Seater".parse::<BusTypeClass>().is_err());
    }
}
