//! Closed string-code vocabularies used by the wire format.
//!
//! The server models categories, score systems, tournament types and
//! match specials as short string codes. Each vocabulary is a closed enum
//! with explicit `parse`/`as_str`; unknown values are rejected with
//! [`CoreError::UnknownCode`], never accepted or defaulted.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Match category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    MensSingles,
    WomensSingles,
    MensDoubles,
    WomensDoubles,
    MixedDoubles,
}

impl Category {
    /// All categories, in the server's conventional order.
    pub const ALL: [Category; 5] = [
        Category::MensSingles,
        Category::WomensSingles,
        Category::MensDoubles,
        Category::WomensDoubles,
        Category::MixedDoubles,
    ];

    /// The wire code.
    pub const fn as_str(self) -> &'static str {
        match self {
            Category::MensSingles => "ms",
            Category::WomensSingles => "ws",
            Category::MensDoubles => "md",
            Category::WomensDoubles => "wd",
            Category::MixedDoubles => "xd",
        }
    }

    /// Parse a wire code.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "ms" => Ok(Category::MensSingles),
            "ws" => Ok(Category::WomensSingles),
            "md" => Ok(Category::MensDoubles),
            "wd" => Ok(Category::WomensDoubles),
            "xd" => Ok(Category::MixedDoubles),
            other => Err(CoreError::UnknownCode {
                kind: "category",
                value: other.to_string(),
            }),
        }
    }

    pub const fn is_singles(self) -> bool {
        matches!(self, Category::MensSingles | Category::WomensSingles)
    }

    pub const fn is_doubles(self) -> bool {
        !self.is_singles()
    }

    /// Human-readable description.
    pub const fn description(self) -> &'static str {
        match self {
            Category::MensSingles => "Men's singles",
            Category::WomensSingles => "Women's singles",
            Category::MensDoubles => "Men's doubles",
            Category::WomensDoubles => "Women's doubles",
            Category::MixedDoubles => "Mixed doubles",
        }
    }
}

/// Scoring rules for a tournament or match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreSystem {
    Standard,
    Elitserien,
    FiveSet11,
    FiveSet11Max15,
}

impl ScoreSystem {
    pub const fn as_str(self) -> &'static str {
        match self {
            ScoreSystem::Standard => "standard",
            ScoreSystem::Elitserien => "elitserien",
            ScoreSystem::FiveSet11 => "5set11",
            ScoreSystem::FiveSet11Max15 => "5set11max15",
        }
    }

    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "standard" => Ok(ScoreSystem::Standard),
            "elitserien" => Ok(ScoreSystem::Elitserien),
            "5set11" => Ok(ScoreSystem::FiveSet11),
            "5set11max15" => Ok(ScoreSystem::FiveSet11Max15),
            other => Err(CoreError::UnknownCode {
                kind: "score system",
                value: other.to_string(),
            }),
        }
    }
}

/// Kind of tournament.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TournamentType {
    Individual,
    Series,
    MultiSeries,
}

impl TournamentType {
    pub const fn as_str(self) -> &'static str {
        match self {
            TournamentType::Individual => "individual",
            TournamentType::Series => "series",
            TournamentType::MultiSeries => "multiseries",
        }
    }

    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "individual" => Ok(TournamentType::Individual),
            "series" => Ok(TournamentType::Series),
            "multiseries" => Ok(TournamentType::MultiSeries),
            other => Err(CoreError::UnknownCode {
                kind: "tournament type",
                value: other.to_string(),
            }),
        }
    }
}

/// Irregular match ending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Special {
    #[default]
    None,
    WalkOver,
    Disqualified,
    Retired,
}

impl Special {
    pub const fn as_str(self) -> &'static str {
        match self {
            Special::None => "none",
            Special::WalkOver => "walkover",
            Special::Disqualified => "disqualified",
            Special::Retired => "retired",
        }
    }

    /// Parse a wire code. The empty string means no special ending.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "" | "none" => Ok(Special::None),
            "walkover" => Ok(Special::WalkOver),
            "disqualified" => Ok(Special::Disqualified),
            "retired" => Ok(Special::Retired),
            other => Err(CoreError::UnknownCode {
                kind: "special",
                value: other.to_string(),
            }),
        }
    }
}

macro_rules! code_traits {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }

            impl FromStr for $ty {
                type Err = CoreError;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    Self::parse(s)
                }
            }

            impl Serialize for $ty {
                fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                    serializer.serialize_str(self.as_str())
                }
            }

            impl<'de> Deserialize<'de> for $ty {
                fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                    let raw = String::deserialize(deserializer)?;
                    Self::parse(&raw).map_err(D::Error::custom)
                }
            }
        )*
    };
}

code_traits!(Category, ScoreSystem, TournamentType, Special);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_roundtrip() {
        for category in Category::ALL {
            assert_eq!(Category::parse(category.as_str()).unwrap(), category);
        }
    }

    #[test]
    fn test_category_unknown_rejected() {
        let err = Category::parse("mixed").unwrap_err();
        assert!(matches!(
            err,
            CoreError::UnknownCode { kind: "category", .. }
        ));
    }

    #[test]
    fn test_category_singles_doubles() {
        assert!(Category::MensSingles.is_singles());
        assert!(Category::WomensSingles.is_singles());
        assert!(Category::MixedDoubles.is_doubles());
        assert!(!Category::MensDoubles.is_singles());
    }

    #[test]
    fn test_score_system_codes() {
        assert_eq!(ScoreSystem::FiveSet11Max15.as_str(), "5set11max15");
        assert_eq!(
            ScoreSystem::parse("elitserien").unwrap(),
            ScoreSystem::Elitserien
        );
        assert!(ScoreSystem::parse("best-of-3").is_err());
    }

    #[test]
    fn test_tournament_type_codes() {
        assert_eq!(
            TournamentType::parse("multiseries").unwrap(),
            TournamentType::MultiSeries
        );
        assert!(TournamentType::parse("league").is_err());
    }

    #[test]
    fn test_special_empty_is_none() {
        assert_eq!(Special::parse("").unwrap(), Special::None);
        assert_eq!(Special::parse("none").unwrap(), Special::None);
        assert!(Special::parse("injured").is_err());
    }

    #[test]
    fn test_serde_as_strings() {
        let json = serde_json::to_string(&Category::MixedDoubles).unwrap();
        assert_eq!(json, "\"xd\"");
        let parsed: Category = serde_json::from_str("\"wd\"").unwrap();
        assert_eq!(parsed, Category::WomensDoubles);
        assert!(serde_json::from_str::<Category>("\"zz\"").is_err());
    }
}
