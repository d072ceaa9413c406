use std::{fmt, str::FromStr};

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MealCategory {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown meal category `{0}`")]
pub struct UnknownCategory(pub String);

impl MealCategory {
    /// Calorie and protein multipliers applied for this meal.
    pub fn multipliers(self) -> (f64, f64) {
        match self {
            MealCategory::Breakfast => (0.9, 0.9),
            MealCategory::Lunch => (1.0, 1.0),
            MealCategory::Dinner => (1.1, 1.1),
            MealCategory::Snack => (0.7, 0.8),
        }
    }

    /// Lenient parse used by the prediction entry points: unknown values
    /// are dropped rather than rejected.
    pub fn parse_lenient(value: Option<&str>) -> Option<Self> {
        value.and_then(|v| v.parse().ok())
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MealCategory::Breakfast => "Breakfast",
            MealCategory::Lunch => "Lunch",
            MealCategory::Dinner => "Dinner",
            MealCategory::Snack => "Snack",
        }
    }
}

impl FromStr for MealCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Ok(MealCategory::Breakfast),
            "lunch" => Ok(MealCategory::Lunch),
            "dinner" => Ok(MealCategory::Dinner),
            "snack" => Ok(MealCategory::Snack),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}

impl fmt::Display for MealCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Breakfast".parse::<MealCategory>(), Ok(MealCategory::Breakfast));
        assert_eq!(" snack ".parse::<MealCategory>(), Ok(MealCategory::Snack));
        assert_eq!("DINNER".parse::<MealCategory>().unwrap().to_string(), "Dinner");
    }

    #[test]
    fn unknown_values_are_dropped_leniently() {
        assert!("brunch".parse::<MealCategory>().is_err());
        assert_eq!(MealCategory::parse_lenient(Some("brunch")), None);
        assert_eq!(MealCategory::parse_lenient(None), None);
        assert_eq!(
            MealCategory::parse_lenient(Some("lunch")),
            Some(MealCategory::Lunch)
        );
    }
}
