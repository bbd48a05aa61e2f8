//! Meal category enum and the category-to-fasting classification policy.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Canonical intake categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MealCategory {
    Water,
    Fruit,
    LightMeal,
    MediumMeal,
    HeavyMeal,
    FastFood,
    Drink,
}

impl MealCategory {
    /// All categories, in display order.
    pub const ALL: [Self; 7] = [
        Self::Water,
        Self::Fruit,
        Self::LightMeal,
        Self::MediumMeal,
        Self::HeavyMeal,
        Self::FastFood,
        Self::Drink,
    ];

    /// String representation for database storage.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Water => "water",
            Self::Fruit => "fruit",
            Self::LightMeal => "light_meal",
            Self::MediumMeal => "medium_meal",
            Self::HeavyMeal => "heavy_meal",
            Self::FastFood => "fast_food",
            Self::Drink => "drink",
        }
    }
}

impl fmt::Display for MealCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MealCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "water" => Ok(Self::Water),
            "fruit" => Ok(Self::Fruit),
            "light_meal" | "light" => Ok(Self::LightMeal),
            "medium_meal" | "medium" => Ok(Self::MediumMeal),
            "heavy_meal" | "heavy" => Ok(Self::HeavyMeal),
            "fast_food" => Ok(Self::FastFood),
            "drink" => Ok(Self::Drink),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}

impl Serialize for MealCategory {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for MealCategory {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Error type for unknown category strings.
#[derive(Debug, Clone)]
pub struct UnknownCategory(String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown meal category: {}", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

/// Which categories break a fast.
///
/// This is product policy kept as data rather than hard-coded branches. The
/// default exempts only plain water; every other category, including
/// `drink` (coffee, tea, juice), breaks a fast. Hosts that disagree can
/// construct a policy with a different exemption set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastingPolicy {
    exempt: HashSet<MealCategory>,
}

impl FastingPolicy {
    /// Builds a policy from the set of categories that do NOT break a fast.
    #[must_use]
    pub fn new(exempt: impl IntoIterator<Item = MealCategory>) -> Self {
        Self {
            exempt: exempt.into_iter().collect(),
        }
    }

    /// Returns whether an event of the given category breaks a fast.
    #[must_use]
    pub fn breaks_fast(&self, category: MealCategory) -> bool {
        !self.exempt.contains(&category)
    }
}

impl Default for FastingPolicy {
    fn default() -> Self {
        Self::new([MealCategory::Water])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_all_variants() {
        for variant in &MealCategory::ALL {
            let s = variant.to_string();
            let parsed: MealCategory = s.parse().expect("should parse");
            assert_eq!(parsed, *variant, "roundtrip failed for {variant:?}");
        }
    }

    #[test]
    fn short_aliases_parse() {
        let light: MealCategory = "light".parse().expect("should parse");
        assert_eq!(light, MealCategory::LightMeal);

        let heavy: MealCategory = "heavy".parse().expect("should parse");
        assert_eq!(heavy, MealCategory::HeavyMeal);
    }

    #[test]
    fn unknown_category_errors() {
        let result: Result<MealCategory, _> = "snack".parse();
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "unknown meal category: snack");
    }

    #[test]
    fn serde_uses_snake_case_strings() {
        let json = serde_json::to_string(&MealCategory::FastFood).unwrap();
        assert_eq!(json, "\"fast_food\"");
        let parsed: MealCategory = serde_json::from_str("\"heavy_meal\"").unwrap();
        assert_eq!(parsed, MealCategory::HeavyMeal);
    }

    #[test]
    fn default_policy_exempts_only_water() {
        let policy = FastingPolicy::default();
        assert!(!policy.breaks_fast(MealCategory::Water));
        for category in MealCategory::ALL {
            if category != MealCategory::Water {
                assert!(policy.breaks_fast(category), "{category} should break a fast");
            }
        }
    }

    #[test]
    fn custom_policy_can_exempt_drinks() {
        let policy = FastingPolicy::new([MealCategory::Water, MealCategory::Drink]);
        assert!(!policy.breaks_fast(MealCategory::Drink));
        assert!(policy.breaks_fast(MealCategory::Fruit));
    }
}
