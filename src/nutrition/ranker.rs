use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use super::estimator::FoodType;
use super::table::{FoodEntry, ReferenceTable};

pub const MIN_SEARCH_LEN: usize = 2;

const EXACT_SCORE: u32 = 100;
const CONTAINMENT_SCORE: u32 = 50;
const SHARED_TOKEN_SCORE: u32 = 10;
const SAME_TYPE_BONUS: u32 = 5;
const SEARCH_PREFIX_SCORE: u32 = 100;
const SEARCH_TOKEN_SCORE: u32 = 50;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarFoodSuggestion {
    pub name: String,
    pub calories_per_100g: f64,
    pub protein_per_100g: f64,
    pub fat_per_100g: f64,
    pub carbs_per_100g: f64,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub name: String,
    pub score: u32,
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatabaseStats {
    pub total_foods: usize,
    pub categories: BTreeMap<&'static str, usize>,
    pub avg_calories_per_100g: f64,
    pub avg_protein_per_100g: f64,
}

fn words(s: &str) -> HashSet<&str> {
    s.split_whitespace().collect()
}

/// Rank table entries against an already-normalized key. Entries scoring
/// zero are left out; ties keep table order.
pub fn similar(table: &ReferenceTable, key: &str, limit: usize) -> Vec<SimilarFoodSuggestion> {
    if key.is_empty() || limit == 0 {
        return Vec::new();
    }
    let key_words = words(key);
    let key_type = FoodType::classify(key);

    let mut scored: Vec<(u32, &FoodEntry)> = table
        .iter()
        .map(|entry| {
            let mut score = if entry.name == key {
                EXACT_SCORE
            } else if entry.name.contains(key) || key.contains(entry.name.as_str()) {
                CONTAINMENT_SCORE
            } else {
                SHARED_TOKEN_SCORE * words(&entry.name).intersection(&key_words).count() as u32
            };
            if FoodType::classify(&entry.name) == key_type {
                score += SAME_TYPE_BONUS;
            }
            (score, entry)
        })
        .filter(|(score, _)| *score > 0)
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored
        .into_iter()
        .take(limit)
        .map(|(score, entry)| SimilarFoodSuggestion {
            name: entry.name.clone(),
            calories_per_100g: entry.record.calories,
            protein_per_100g: entry.record.protein_g,
            fat_per_100g: entry.record.fat_g,
            carbs_per_100g: entry.record.carbs_g,
            score,
        })
        .collect()
}

/// Free-text search over canonical names. Earlier substring positions rank
/// higher; word matches without a substring hit get a flat score.
pub fn search(table: &ReferenceTable, query: &str, limit: usize) -> Vec<SearchHit> {
    let query = query.trim().to_lowercase();
    if query.chars().count() < MIN_SEARCH_LEN {
        return Vec::new();
    }
    let query_words = words(&query);

    let mut hits: Vec<SearchHit> = table
        .iter()
        .filter_map(|entry| {
            let score = match entry.name.find(&query) {
                Some(at) => {
                    let position = entry.name[..at].chars().count() as u32;
                    SEARCH_PREFIX_SCORE.saturating_sub(position)
                }
                None if !words(&entry.name).is_disjoint(&query_words) => SEARCH_TOKEN_SCORE,
                None => return None,
            };
            Some(SearchHit {
                name: entry.name.clone(),
                score,
                calories: entry.record.calories,
                protein: entry.record.protein_g,
                fat: entry.record.fat_g,
                carbs: entry.record.carbs_g,
            })
        })
        .collect();

    hits.sort_by(|a, b| b.score.cmp(&a.score));
    hits.truncate(limit);
    hits
}

pub fn database_stats(table: &ReferenceTable) -> DatabaseStats {
    let mut categories = BTreeMap::new();
    let mut total_calories = 0.0;
    let mut total_protein = 0.0;
    for entry in table.iter() {
        *categories
            .entry(FoodType::classify(&entry.name).as_str())
            .or_insert(0) += 1;
        total_calories += entry.record.calories;
        total_protein += entry.record.protein_g;
    }

    let total_foods = table.len();
    let average = |sum: f64| {
        if total_foods == 0 {
            0.0
        } else {
            (sum / total_foods as f64 * 10.0).round() / 10.0
        }
    };

    DatabaseStats {
        total_foods,
        categories,
        avg_calories_per_100g: average(total_calories),
        avg_protein_per_100g: average(total_protein),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nutrition::table::FoodRecord;

    fn small_table() -> ReferenceTable {
        ReferenceTable::new(vec![
            ("rice", FoodRecord::new(130.0, 2.7, 0.3, 28.0)),
            ("chicken", FoodRecord::new(165.0, 31.0, 3.6, 0.0)),
            ("cheese", FoodRecord::new(404.0, 25.0, 33.0, 1.3)),
            ("sweet potato", FoodRecord::new(86.0, 1.6, 0.1, 20.0)),
            ("spinach", FoodRecord::new(23.0, 2.9, 0.4, 3.6)),
        ])
        .unwrap()
    }

    #[test]
    fn search_orders_by_first_occurrence() {
        let hits = search(&small_table(), "ch", 10);
        let names: Vec<&str> = hits.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["chicken", "cheese", "spinach"]);
        assert_eq!(hits[0].score, 100);
        assert_eq!(hits[2].score, 95);
    }

    #[test]
    fn search_respects_limit_and_min_length() {
        assert_eq!(search(&small_table(), "ch", 2).len(), 2);
        assert!(search(&small_table(), "c", 10).is_empty());
        assert!(search(&small_table(), "  ", 10).is_empty());
        assert!(search(ReferenceTable::builtin(), "e", 10).is_empty());
        assert!(search(ReferenceTable::builtin(), "e", 10).len() <= 10);
        assert!(search(ReferenceTable::builtin(), "ch", 10).len() <= 10);
    }

    #[test]
    fn search_word_match_without_substring() {
        let hits = search(&small_table(), "potato sweet", 10);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "sweet potato");
        assert_eq!(hits[0].score, 50);
    }

    #[test]
    fn similar_ranks_exact_then_containment_then_type() {
        let hits = similar(&small_table(), "chicken", 5);
        assert_eq!(hits[0].name, "chicken");
        assert_eq!(hits[0].score, 105);
        // no shared words and a different type: scored 0 and dropped
        assert_eq!(hits.len(), 1);

        let hits = similar(&small_table(), "baked sweet potato", 3);
        assert_eq!(hits[0].name, "sweet potato");
        assert_eq!(hits[0].score, 55);
        assert_eq!(hits[1].name, "rice");
        assert_eq!(hits[1].score, 5);
    }

    #[test]
    fn similar_respects_limit_and_empty_key() {
        assert!(similar(ReferenceTable::builtin(), "chicken", 2).len() <= 2);
        assert!(similar(ReferenceTable::builtin(), "", 3).is_empty());
    }

    #[test]
    fn stats_count_types_and_average() {
        let stats = database_stats(&small_table());
        assert_eq!(stats.total_foods, 5);
        assert_eq!(stats.categories.get("carb"), Some(&2));
        assert_eq!(stats.categories.get("protein"), Some(&1));
        assert_eq!(stats.categories.get("fat"), Some(&1));
        assert_eq!(stats.categories.get("vegetable"), Some(&1));
        assert_eq!(stats.avg_calories_per_100g, 161.6);
        assert_eq!(stats.avg_protein_per_100g, 12.6);
    }
}
