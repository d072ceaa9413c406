use lazy_static::lazy_static;
use regex::Regex;

/// Unit tokens recognised after a number, longest spelling first so that
/// alternation prefers `grams` over `g`. Shared with the name normalizer.
pub(crate) const UNIT_TOKENS: &[&str] = &[
    "kilogram", "kilo", "kg", "gram", "g", "ounce", "oz", "pound", "lb", "milliliter",
    "millilitre", "ml", "cup", "tablespoon", "tbsp", "teaspoon", "tsp", "cân", "lạng", "chỉ",
    "slice", "piece", "pc",
];

// Order is precedence: the first pattern that matches anywhere in the text
// wins, even when another unit occurs earlier in the string.
const UNIT_PATTERNS: &[(&str, f64)] = &[
    (r"(?i)(?:^|[^\d.])(\d+)\s*g(?:rams?)?\b", 1.0),
    (r"(?i)(\d+\.\d+)\s*g(?:rams?)?\b", 1.0),
    (r"(?i)(\d+(?:\.\d+)?)\s*(?:oz|ounces?)\b", 28.35),
    (r"(?i)(\d+(?:\.\d+)?)\s*(?:lbs?|pounds?)\b", 453.6),
    (r"(?i)(\d+(?:\.\d+)?)\s*(?:kg|kilos?|kilograms?)\b", 1000.0),
    (r"(?i)(\d+(?:\.\d+)?)\s*(?:ml|millilit(?:er|re)s?)\b", 1.0),
    (r"(?i)(\d+(?:\.\d+)?)\s*cups?\b", 240.0),
    (r"(?i)(\d+(?:\.\d+)?)\s*(?:tbsp|tablespoons?)\b", 15.0),
    (r"(?i)(\d+(?:\.\d+)?)\s*(?:tsp|teaspoons?)\b", 5.0),
    // Vietnamese market units
    (r"(?i)(\d+(?:\.\d+)?)\s*cân\b", 500.0),
    (r"(?i)(\d+(?:\.\d+)?)\s*lạng\b", 100.0),
    (r"(?i)(\d+(?:\.\d+)?)\s*chỉ\b", 3.75),
    (r"(?i)(\d+(?:\.\d+)?)\s*slices?\b", 30.0),
    (r"(?i)(\d+(?:\.\d+)?)\s*(?:pieces?|pcs?)\b", 50.0),
];

// Qualitative portion phrases, checked in order when no unit is present.
// "extra large" has to precede "large" to be reachable; "large" precedes
// the bowl phrases.
const PORTION_PHRASES: &[(&str, f64)] = &[
    ("extra large", 500.0),
    ("small", 100.0),
    ("medium", 200.0),
    ("large", 400.0),
    ("half bowl", 150.0),
    ("bowl", 300.0),
    ("plate", 350.0),
    ("serving", 150.0),
    ("portion", 150.0),
];

struct UnitPattern {
    regex: Regex,
    grams_per_unit: f64,
}

lazy_static! {
    static ref UNITS: Vec<UnitPattern> = UNIT_PATTERNS
        .iter()
        .map(|(pattern, grams_per_unit)| UnitPattern {
            regex: Regex::new(pattern).expect("unit pattern is valid"),
            grams_per_unit: *grams_per_unit,
        })
        .collect();
    static ref PORTIONS: Vec<(Regex, f64)> = PORTION_PHRASES
        .iter()
        .map(|(phrase, grams)| {
            let pattern = format!(r"(?i)\b{}s?\b", regex::escape(phrase));
            (Regex::new(&pattern).expect("portion pattern is valid"), *grams)
        })
        .collect();
}

/// Weight in grams stated or implied by `text`, or `None` when the text
/// carries neither a unit nor a portion phrase.
pub fn extract_weight(text: &str) -> Option<f64> {
    for unit in UNITS.iter() {
        if let Some(caps) = unit.regex.captures(text) {
            let amount = caps.get(1)?.as_str().parse::<f64>().ok()?;
            return Some(amount * unit.grams_per_unit);
        }
    }
    portion_weight(text)
}

fn portion_weight(text: &str) -> Option<f64> {
    PORTIONS
        .iter()
        .find(|(regex, _)| regex.is_match(text))
        .map(|(_, grams)| *grams)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(actual: Option<f64>, expected: f64) {
        let actual = actual.expect("weight should be extracted");
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn grams() {
        approx(extract_weight("200g chicken"), 200.0);
        approx(extract_weight("150 grams rice"), 150.0);
        approx(extract_weight("Rice 75G"), 75.0);
    }

    #[test]
    fn decimal_grams_are_not_truncated() {
        approx(extract_weight("200.5g salmon"), 200.5);
    }

    #[test]
    fn imperial_units() {
        approx(extract_weight("8 oz tuna"), 8.0 * 28.35);
        approx(extract_weight("1 lb beef"), 453.6);
        approx(extract_weight("2 pounds potato"), 907.2);
    }

    #[test]
    fn metric_and_volume_units() {
        approx(extract_weight("1.5kg rice"), 1500.0);
        approx(extract_weight("250ml milk"), 250.0);
        approx(extract_weight("2 cups pasta"), 480.0);
        approx(extract_weight("1 tbsp peanut butter"), 15.0);
        approx(extract_weight("3 tsp sugar"), 15.0);
    }

    #[test]
    fn locale_units() {
        approx(extract_weight("1 cân thịt bò"), 500.0);
        approx(extract_weight("2 lạng chicken"), 200.0);
        approx(extract_weight("4 chỉ"), 15.0);
    }

    #[test]
    fn count_units() {
        approx(extract_weight("2 slices pizza"), 60.0);
        approx(extract_weight("3 pieces chicken"), 150.0);
    }

    #[test]
    fn number_before_unrelated_word_is_not_a_unit() {
        assert_eq!(extract_weight("2 grilled chicken"), None);
        assert_eq!(extract_weight("2 eggs"), None);
    }

    #[test]
    fn pattern_order_beats_text_order() {
        // the gram pattern is tried first even though the pound mention comes first
        approx(extract_weight("1lb box, 200g chicken"), 200.0);
        // ounces are tried before kilograms
        approx(extract_weight("1kg bag, 3 oz portion"), 3.0 * 28.35);
    }

    #[test]
    fn portion_phrases() {
        approx(extract_weight("large bowl of pho"), 400.0);
        approx(extract_weight("small salad"), 100.0);
        approx(extract_weight("extra large pizza"), 500.0);
        approx(extract_weight("bowl of oatmeal"), 300.0);
        approx(extract_weight("a plate of com tam"), 350.0);
        approx(extract_weight("two servings"), 150.0);
    }

    #[test]
    fn nothing_to_extract() {
        assert_eq!(extract_weight("chicken"), None);
        assert_eq!(extract_weight(""), None);
        assert_eq!(extract_weight("enlarged"), None);
    }
}
