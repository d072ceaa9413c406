use std::collections::HashSet;

use serde::Serialize;

use super::table::{FoodEntry, ReferenceTable};

/// Preparation adjectives removed as plain substrings, not whole words.
const PREPARATION_ADJECTIVES: &[&str] = &[
    "grilled", "fried", "roasted", "baked", "steamed", "boiled", "raw", "fresh", "cooked",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    Exact,
    AdjectiveStripped,
    Containment,
    TokenOverlap,
}

#[derive(Debug, Clone, Copy)]
pub struct FoodMatch<'t> {
    pub entry: &'t FoodEntry,
    pub tier: MatchTier,
}

impl FoodMatch<'_> {
    pub fn name(&self) -> &str {
        &self.entry.name
    }
}

type Resolver = for<'t> fn(&'t ReferenceTable, &str) -> Option<&'t FoodEntry>;

const RESOLVERS: [(MatchTier, Resolver); 4] = [
    (MatchTier::Exact, exact),
    (MatchTier::AdjectiveStripped, adjective_stripped),
    (MatchTier::Containment, containment),
    (MatchTier::TokenOverlap, token_overlap),
];

/// Resolve a normalized key to a table entry, trying each tier in turn.
pub fn match_food<'t>(table: &'t ReferenceTable, key: &str) -> Option<FoodMatch<'t>> {
    if key.is_empty() {
        return None;
    }
    RESOLVERS.iter().find_map(|(tier, resolve)| {
        resolve(table, key).map(|entry| FoodMatch { entry, tier: *tier })
    })
}

fn exact<'t>(table: &'t ReferenceTable, key: &str) -> Option<&'t FoodEntry> {
    table.get(key)
}

fn adjective_stripped<'t>(table: &'t ReferenceTable, key: &str) -> Option<&'t FoodEntry> {
    let stripped = PREPARATION_ADJECTIVES
        .iter()
        .fold(key.to_string(), |acc, adjective| acc.replace(adjective, ""));
    let stripped = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
    if stripped == key {
        return None;
    }
    table.get(&stripped)
}

fn containment<'t>(table: &'t ReferenceTable, key: &str) -> Option<&'t FoodEntry> {
    table
        .iter()
        .find(|entry| key.contains(entry.name.as_str()) || entry.name.contains(key))
}

fn token_overlap<'t>(table: &'t ReferenceTable, key: &str) -> Option<&'t FoodEntry> {
    let key_words: HashSet<&str> = key.split_whitespace().collect();
    let mut best: Option<(&FoodEntry, usize)> = None;

    for entry in table.iter() {
        let entry_words: HashSet<&str> = entry.name.split_whitespace().collect();
        let shared = entry_words.intersection(&key_words).count();
        if shared == 0 {
            continue;
        }
        let bonus = usize::from(entry_words.iter().any(|word| key.contains(word)));
        let score = shared + bonus;
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((entry, score));
        }
    }

    best.map(|(entry, _)| entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nutrition::table::FoodRecord;

    fn record() -> FoodRecord {
        FoodRecord::new(100.0, 1.0, 1.0, 1.0)
    }

    #[test]
    fn exact_tier() {
        let m = match_food(ReferenceTable::builtin(), "chicken breast").unwrap();
        assert_eq!(m.name(), "chicken breast");
        assert_eq!(m.tier, MatchTier::Exact);
    }

    #[test]
    fn adjective_stripped_tier() {
        let m = match_food(ReferenceTable::builtin(), "grilled chicken breast").unwrap();
        assert_eq!(m.name(), "chicken breast");
        assert_eq!(m.tier, MatchTier::AdjectiveStripped);

        let m = match_food(ReferenceTable::builtin(), "steamed broccoli").unwrap();
        assert_eq!(m.name(), "broccoli");
    }

    #[test]
    fn containment_uses_table_order() {
        let table = ReferenceTable::builtin();
        // "chicken breast" is declared before "chicken" but is not contained in the key
        let m = match_food(table, "chicken rice").unwrap();
        assert_eq!(m.name(), "chicken");
        assert_eq!(m.tier, MatchTier::Containment);

        // key contained in an entry
        let m = match_food(table, "breast").unwrap();
        assert_eq!(m.name(), "chicken breast");
    }

    #[test]
    fn token_overlap_prefers_highest_score_then_first() {
        let table = ReferenceTable::new(vec![
            ("green tea latte", record()),
            ("iced green tea", record()),
            ("lemon iced green tea", record()),
        ])
        .unwrap();
        let m = match_food(&table, "tea green iced").unwrap();
        assert_eq!(m.tier, MatchTier::TokenOverlap);
        assert_eq!(m.name(), "iced green tea");

        let m = match_food(&table, "tea latte").unwrap();
        assert_eq!(m.name(), "green tea latte");
    }

    #[test]
    fn token_overlap_ties_go_to_first_entry() {
        let table = ReferenceTable::new(vec![
            ("beef stew", record()),
            ("beef pie", record()),
        ])
        .unwrap();
        let m = match_food(&table, "spicy beef noodles").unwrap();
        assert_eq!(m.name(), "beef stew");
    }

    #[test]
    fn no_match() {
        let table = ReferenceTable::new(vec![("rice", record())]).unwrap();
        assert!(match_food(&table, "kangaroo jerky").is_none());
        assert!(match_food(&table, "").is_none());
    }
}
