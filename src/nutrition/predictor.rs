use serde::Serialize;
use tracing::debug;

use super::cache::{CacheKey, PredictionCache};
use super::category::MealCategory;
use super::estimator::{self, non_negative, FoodType, RandomVariation, Variation};
use super::matcher::{match_food, FoodMatch};
use super::normalize::normalize;
use super::ranker::{self, DatabaseStats, SearchHit, SimilarFoodSuggestion};
use super::table::ReferenceTable;
use super::weight::extract_weight;

pub const DEFAULT_QUANTITY_G: f64 = 100.0;
pub const DEFAULT_CACHE_CAPACITY: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    FoodDatabase,
    AiEstimation,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutrientEstimate {
    pub calories: u32,
    pub protein: u32,
    pub fat: u32,
    pub carbs: u32,
    pub food_name: String,
    pub original_name: String,
    pub quantity_g: i64,
    pub confidence: Confidence,
    pub source: Source,
    pub matched_food: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_type: Option<FoodType>,
}

/// A description broken into the pieces the engine works with.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedQuery {
    pub raw: String,
    pub grams: Option<f64>,
    pub key: String,
    pub category: Option<MealCategory>,
}

impl ParsedQuery {
    pub fn parse(description: &str, quantity_g: Option<f64>, category: Option<&str>) -> Self {
        Self {
            raw: description.to_string(),
            grams: quantity_g.or_else(|| extract_weight(description)),
            key: normalize(description),
            category: MealCategory::parse_lenient(category),
        }
    }

    pub fn grams_or_default(&self) -> f64 {
        self.grams.unwrap_or(DEFAULT_QUANTITY_G)
    }

    fn display_name(&self, matched: Option<&str>) -> String {
        let name = match matched {
            Some(name) => name,
            None if !self.key.is_empty() => self.key.as_str(),
            None => self.raw.trim(),
        };
        title_case(name)
    }
}

fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

pub struct NutrientPredictor {
    table: &'static ReferenceTable,
    variation: Box<dyn Variation>,
    cache: PredictionCache<NutrientEstimate>,
}

impl NutrientPredictor {
    pub fn new(
        table: &'static ReferenceTable,
        variation: Box<dyn Variation>,
        cache_capacity: usize,
    ) -> Self {
        Self {
            table,
            variation,
            cache: PredictionCache::new(cache_capacity),
        }
    }

    pub fn with_cache_capacity(cache_capacity: usize) -> Self {
        Self::new(
            ReferenceTable::builtin(),
            Box::new(RandomVariation),
            cache_capacity,
        )
    }

    pub fn table(&self) -> &'static ReferenceTable {
        self.table
    }

    /// Best-effort estimate for a description. Never fails: unknown foods
    /// fall through to the heuristic estimator with low confidence.
    pub fn predict(
        &self,
        description: &str,
        quantity_g: Option<f64>,
        category: Option<&str>,
    ) -> NutrientEstimate {
        let query = ParsedQuery::parse(description, quantity_g, category);
        let cache_key = CacheKey::new(description, quantity_g, query.category);
        if let Some(hit) = self.cache.get(&cache_key) {
            return (*hit).clone();
        }

        let estimate = match match_food(self.table, &query.key) {
            Some(found) => self.from_table(&query, found),
            None => self.from_heuristics(&query),
        };
        (*self.cache.insert(cache_key, estimate)).clone()
    }

    /// Estimate without consulting the reference table.
    pub fn estimate_only(
        &self,
        description: &str,
        quantity_g: Option<f64>,
        category: Option<&str>,
    ) -> NutrientEstimate {
        let query = ParsedQuery::parse(description, quantity_g, category);
        self.from_heuristics(&query)
    }

    fn from_table(&self, query: &ParsedQuery, found: FoodMatch<'_>) -> NutrientEstimate {
        let grams = query.grams_or_default();
        let scale = grams / 100.0;
        let (calorie_mult, protein_mult) = query
            .category
            .map_or((1.0, 1.0), MealCategory::multipliers);
        let record = &found.entry.record;
        let confidence = if found.name() == query.key {
            Confidence::High
        } else {
            Confidence::Medium
        };
        debug!(key = %query.key, matched = found.name(), tier = ?found.tier, "matched reference food");

        NutrientEstimate {
            calories: non_negative(record.calories * scale * calorie_mult),
            protein: non_negative(record.protein_g * scale * protein_mult),
            fat: non_negative(record.fat_g * scale),
            carbs: non_negative(record.carbs_g * scale),
            food_name: query.display_name(Some(found.name())),
            original_name: query.raw.clone(),
            quantity_g: grams.round() as i64,
            confidence,
            source: Source::FoodDatabase,
            matched_food: Some(found.name().to_string()),
            estimated_type: None,
        }
    }

    fn from_heuristics(&self, query: &ParsedQuery) -> NutrientEstimate {
        let grams = query.grams_or_default();
        let estimation =
            estimator::estimate(&query.key, grams, query.category, self.variation.as_ref());
        debug!(key = %query.key, estimated_type = ?estimation.estimated_type, "no reference match, estimating");

        NutrientEstimate {
            calories: estimation.calories,
            protein: estimation.protein,
            fat: estimation.fat,
            carbs: estimation.carbs,
            food_name: query.display_name(None),
            original_name: query.raw.clone(),
            quantity_g: grams.round() as i64,
            confidence: Confidence::Low,
            source: Source::AiEstimation,
            matched_food: None,
            estimated_type: Some(estimation.estimated_type),
        }
    }

    pub fn similar_foods(&self, description: &str, limit: usize) -> Vec<SimilarFoodSuggestion> {
        ranker::similar(self.table, &normalize(description), limit)
    }

    pub fn search(&self, query: &str, limit: usize) -> Vec<SearchHit> {
        ranker::search(self.table, query, limit)
    }

    pub fn database_stats(&self) -> DatabaseStats {
        ranker::database_stats(self.table)
    }

    pub fn cached_predictions(&self) -> usize {
        self.cache.len()
    }
}
