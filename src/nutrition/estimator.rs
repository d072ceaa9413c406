use rand::Rng;
use serde::Serialize;

use super::category::MealCategory;

pub const MIN_CALORIES: f64 = 10.0;
pub const VARIATION_MIN: f64 = 0.9;
pub const VARIATION_MAX: f64 = 1.1;

/// Coarse classification used when a description has no table match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FoodType {
    Protein,
    Carb,
    Fat,
    Vegetable,
    Fruit,
    Mixed,
}

/// Base macros per 100g.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacroProfile {
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
}

const fn profile(calories: f64, protein: f64, fat: f64, carbs: f64) -> MacroProfile {
    MacroProfile {
        calories,
        protein,
        fat,
        carbs,
    }
}

// Checked in order; the first bucket with a keyword hit wins.
const BUCKETS: &[(FoodType, &[&str], MacroProfile)] = &[
    (
        FoodType::Protein,
        &[
            "chicken", "beef", "pork", "fish", "meat", "steak", "egg", "tofu", "protein", "salmon",
            "tuna", "shrimp", "turkey",
        ],
        profile(200.0, 25.0, 10.0, 5.0),
    ),
    (
        FoodType::Carb,
        &[
            "rice", "pasta", "bread", "potato", "noodle", "cereal", "oat", "grain",
        ],
        profile(130.0, 5.0, 2.0, 30.0),
    ),
    (
        FoodType::Fat,
        &["cheese", "butter", "oil", "avocado", "nut", "seed", "cream"],
        profile(300.0, 10.0, 25.0, 5.0),
    ),
    (
        FoodType::Vegetable,
        &[
            "broccoli", "spinach", "lettuce", "carrot", "vegetable", "salad", "kale", "cabbage",
            "tomato", "cucumber",
        ],
        profile(50.0, 3.0, 1.0, 10.0),
    ),
    (
        FoodType::Fruit,
        &[
            "apple", "banana", "orange", "berry", "berries", "grape", "mango", "pear", "peach",
            "melon", "pineapple", "fruit",
        ],
        profile(60.0, 1.0, 0.3, 15.0),
    ),
];

const MIXED_PROFILE: MacroProfile = profile(150.0, 10.0, 5.0, 20.0);

impl FoodType {
    pub fn classify(key: &str) -> FoodType {
        let key = key.to_lowercase();
        BUCKETS
            .iter()
            .find(|(_, keywords, _)| keywords.iter().any(|k| key.contains(k)))
            .map(|(food_type, _, _)| *food_type)
            .unwrap_or(FoodType::Mixed)
    }

    pub fn base_profile(self) -> MacroProfile {
        BUCKETS
            .iter()
            .find(|(food_type, _, _)| *food_type == self)
            .map(|(_, _, profile)| *profile)
            .unwrap_or(MIXED_PROFILE)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FoodType::Protein => "protein",
            FoodType::Carb => "carb",
            FoodType::Fat => "fat",
            FoodType::Vegetable => "vegetable",
            FoodType::Fruit => "fruit",
            FoodType::Mixed => "mixed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preparation {
    Fried,
    Grilled,
    Steamed,
    Plain,
}

const PREPARATIONS: &[(&[&str], Preparation)] = &[
    (&["deep fried", "fried"], Preparation::Fried),
    (&["grilled", "roasted"], Preparation::Grilled),
    (&["steamed", "boiled"], Preparation::Steamed),
];

impl Preparation {
    pub fn detect(key: &str) -> Preparation {
        PREPARATIONS
            .iter()
            .find(|(words, _)| words.iter().any(|w| key.contains(w)))
            .map(|(_, prep)| *prep)
            .unwrap_or(Preparation::Plain)
    }

    pub fn calorie_factor(self) -> f64 {
        match self {
            Preparation::Fried => 1.5,
            Preparation::Grilled => 1.1,
            Preparation::Steamed => 0.9,
            Preparation::Plain => 1.0,
        }
    }

    pub fn fat_factor(self, food_type: FoodType) -> f64 {
        match (self, food_type) {
            (Preparation::Fried, FoodType::Protein) => 1.5 * 2.0,
            _ => self.calorie_factor(),
        }
    }
}

/// Source of the bounded random factor applied to heuristic estimates.
pub trait Variation: Send + Sync {
    /// A factor in `[VARIATION_MIN, VARIATION_MAX]`.
    fn factor(&self) -> f64;
}

/// Uniform draw from the thread-local generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomVariation;

impl Variation for RandomVariation {
    fn factor(&self) -> f64 {
        rand::thread_rng().gen_range(VARIATION_MIN..=VARIATION_MAX)
    }
}

/// Always returns the same factor, clamped into the allowed band.
#[derive(Debug, Clone, Copy)]
pub struct FixedVariation(pub f64);

impl Variation for FixedVariation {
    fn factor(&self) -> f64 {
        self.0.clamp(VARIATION_MIN, VARIATION_MAX)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Estimation {
    pub calories: u32,
    pub protein: u32,
    pub fat: u32,
    pub carbs: u32,
    pub estimated_type: FoodType,
}

pub fn estimate(
    key: &str,
    grams: f64,
    category: Option<MealCategory>,
    variation: &dyn Variation,
) -> Estimation {
    let food_type = FoodType::classify(key);
    let base = food_type.base_profile();
    let prep = Preparation::detect(key);
    let factor = variation.factor();
    let (calorie_mult, protein_mult) = category.map_or((1.0, 1.0), MealCategory::multipliers);
    let scale = grams / 100.0;

    let calories = base.calories * prep.calorie_factor() * factor * calorie_mult * scale;
    let protein = base.protein * factor * protein_mult * scale;
    let fat = base.fat * prep.fat_factor(food_type) * factor * scale;
    let carbs = base.carbs * factor * scale;

    Estimation {
        calories: calories.round().max(MIN_CALORIES) as u32,
        protein: non_negative(protein),
        fat: non_negative(fat),
        carbs: non_negative(carbs),
        estimated_type: food_type,
    }
}

pub(crate) fn non_negative(value: f64) -> u32 {
    value.round().max(0.0) as u32
}
