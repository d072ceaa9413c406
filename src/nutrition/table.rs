use std::collections::HashMap;

use lazy_static::lazy_static;
use serde::Serialize;
use thiserror::Error;

/// Macro values per 100g of a food.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FoodRecord {
    pub calories: f64,
    pub protein_g: f64,
    pub fat_g: f64,
    pub carbs_g: f64,
}

impl FoodRecord {
    pub const fn new(calories: f64, protein_g: f64, fat_g: f64, carbs_g: f64) -> Self {
        Self {
            calories,
            protein_g,
            fat_g,
            carbs_g,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FoodEntry {
    pub name: String,
    pub record: FoodRecord,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("food name must not be empty")]
    EmptyName,
    #[error("food name `{0}` must be lowercase")]
    NotLowercase(String),
    #[error("food name `{0}` appears more than once")]
    Duplicate(String),
    #[error("food `{0}` has a negative macro value")]
    NegativeValue(String),
}

/// Ordered canonical-name -> per-100g table. Iteration order is the
/// declaration order; the fuzzy tiers of the matcher depend on it.
#[derive(Debug, Clone)]
pub struct ReferenceTable {
    entries: Vec<FoodEntry>,
    index: HashMap<String, usize>,
}

impl ReferenceTable {
    pub fn new<I, S>(entries: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = (S, FoodRecord)>,
        S: Into<String>,
    {
        let mut table = Self {
            entries: Vec::new(),
            index: HashMap::new(),
        };
        for (name, record) in entries {
            let name = name.into();
            if name.trim().is_empty() {
                return Err(TableError::EmptyName);
            }
            if name != name.to_lowercase() {
                return Err(TableError::NotLowercase(name));
            }
            if [record.calories, record.protein_g, record.fat_g, record.carbs_g]
                .iter()
                .any(|v| *v < 0.0)
            {
                return Err(TableError::NegativeValue(name));
            }
            if table.index.contains_key(&name) {
                return Err(TableError::Duplicate(name));
            }
            table.index.insert(name.clone(), table.entries.len());
            table.entries.push(FoodEntry { name, record });
        }
        Ok(table)
    }

    /// The compiled-in table, built on first use and shared for the
    /// lifetime of the process.
    pub fn builtin() -> &'static ReferenceTable {
        &BUILTIN
    }

    pub fn get(&self, name: &str) -> Option<&FoodEntry> {
        self.index.get(name).map(|&i| &self.entries[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FoodEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

const BUILTIN_FOODS: &[(&str, FoodRecord)] = &[
    // proteins
    ("chicken breast", FoodRecord::new(165.0, 31.0, 3.6, 0.0)),
    ("chicken", FoodRecord::new(165.0, 31.0, 3.6, 0.0)),
    ("salmon", FoodRecord::new(208.0, 20.0, 13.0, 0.0)),
    ("tuna", FoodRecord::new(132.0, 29.0, 1.0, 0.0)),
    ("beef", FoodRecord::new(250.0, 26.0, 17.0, 0.0)),
    ("steak", FoodRecord::new(271.0, 25.0, 19.0, 0.0)),
    ("pork", FoodRecord::new(242.0, 25.0, 14.0, 0.0)),
    ("shrimp", FoodRecord::new(99.0, 24.0, 0.3, 0.2)),
    ("tofu", FoodRecord::new(76.0, 8.0, 4.8, 1.9)),
    ("eggs", FoodRecord::new(155.0, 13.0, 11.0, 1.1)),
    ("egg", FoodRecord::new(155.0, 13.0, 11.0, 1.1)),
    // dairy
    ("milk", FoodRecord::new(61.0, 3.2, 3.3, 4.8)),
    ("cheese", FoodRecord::new(404.0, 25.0, 33.0, 1.3)),
    ("yogurt", FoodRecord::new(59.0, 3.5, 0.4, 10.0)),
    ("protein shake", FoodRecord::new(120.0, 25.0, 2.0, 3.0)),
    // grains and starches
    ("rice", FoodRecord::new(130.0, 2.7, 0.3, 28.0)),
    ("pasta", FoodRecord::new(131.0, 5.0, 1.1, 25.0)),
    ("bread", FoodRecord::new(265.0, 9.0, 3.2, 49.0)),
    ("oatmeal", FoodRecord::new(68.0, 2.4, 1.4, 12.0)),
    ("noodles", FoodRecord::new(138.0, 4.5, 2.1, 25.0)),
    ("potato", FoodRecord::new(77.0, 2.0, 0.1, 17.0)),
    ("sweet potato", FoodRecord::new(86.0, 1.6, 0.1, 20.0)),
    // vegetables
    ("broccoli", FoodRecord::new(34.0, 2.8, 0.4, 7.0)),
    ("spinach", FoodRecord::new(23.0, 2.9, 0.4, 3.6)),
    ("carrot", FoodRecord::new(41.0, 0.9, 0.2, 10.0)),
    ("lettuce", FoodRecord::new(15.0, 1.4, 0.2, 2.9)),
    // fruits
    ("apple", FoodRecord::new(52.0, 0.3, 0.2, 14.0)),
    ("banana", FoodRecord::new(89.0, 1.1, 0.3, 23.0)),
    ("orange", FoodRecord::new(47.0, 0.9, 0.1, 12.0)),
    // nuts, seeds, fats
    ("almonds", FoodRecord::new(579.0, 21.0, 50.0, 22.0)),
    ("peanut butter", FoodRecord::new(588.0, 25.0, 50.0, 20.0)),
    ("peanut", FoodRecord::new(567.0, 26.0, 49.0, 16.0)),
    ("avocado", FoodRecord::new(160.0, 2.0, 15.0, 9.0)),
    // dishes
    ("pizza", FoodRecord::new(266.0, 11.0, 10.0, 33.0)),
    ("burger", FoodRecord::new(295.0, 17.0, 14.0, 30.0)),
    ("sandwich", FoodRecord::new(250.0, 10.0, 8.0, 35.0)),
    ("salad", FoodRecord::new(150.0, 5.0, 8.0, 15.0)),
    ("pho", FoodRecord::new(60.0, 4.0, 1.5, 8.0)),
    ("banh mi", FoodRecord::new(250.0, 10.0, 8.0, 33.0)),
    ("com tam", FoodRecord::new(180.0, 8.0, 6.0, 24.0)),
    ("spring rolls", FoodRecord::new(150.0, 5.0, 6.0, 20.0)),
    // beverages
    ("coffee", FoodRecord::new(2.0, 0.3, 0.0, 0.0)),
    ("tea", FoodRecord::new(1.0, 0.0, 0.0, 0.3)),
    ("soda", FoodRecord::new(41.0, 0.0, 0.0, 10.0)),
    ("juice", FoodRecord::new(45.0, 0.5, 0.1, 11.0)),
];

lazy_static! {
    static ref BUILTIN: ReferenceTable =
        ReferenceTable::new(BUILTIN_FOODS.iter().copied()).expect("built-in food table is valid");
}
