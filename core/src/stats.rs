//! Corpus-level views: term frequencies across several fields, simple length
//! summaries and stock availability.

use crate::document::{IndexInfoRecord, MetadataRecord, TextField};
use crate::tokenizer::{normalize_joined, NormalizerConfig};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;

lazy_static! {
    static ref SENTENCE_END: Regex = Regex::new(r"[.!?]+").expect("valid regex");
}

#[derive(Debug, Clone, Default)]
pub struct TermFrequencies {
    counts: HashMap<String, usize>,
    total: usize,
}

impl TermFrequencies {
    pub fn from_terms<I: IntoIterator<Item = String>>(terms: I) -> Self {
        let mut tf = Self::default();
        tf.extend(terms);
        tf
    }

    pub fn extend<I: IntoIterator<Item = String>>(&mut self, terms: I) {
        for term in terms {
            *self.counts.entry(term).or_insert(0) += 1;
            self.total += 1;
        }
    }

    pub fn get(&self, term: &str) -> usize { self.counts.get(term).copied().unwrap_or(0) }

    /// Number of terms counted, duplicates included.
    pub fn total(&self) -> usize { self.total }

    pub fn distinct(&self) -> usize { self.counts.len() }

    /// The `n` most frequent terms; ties are broken alphabetically.
    pub fn most_common(&self, n: usize) -> Vec<(&str, usize)> {
        let mut entries: Vec<(&str, usize)> =
            self.counts.iter().map(|(term, &count)| (term.as_str(), count)).collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries.truncate(n);
        entries
    }
}

/// Count terms over the chosen fields of every record, each record's fields
/// normalized together as one text.
pub fn aggregate_terms<'a, I>(records: I, fields: &[TextField], config: &NormalizerConfig) -> TermFrequencies
where
    I: IntoIterator<Item = &'a IndexInfoRecord>,
{
    let mut tf = TermFrequencies::default();
    for record in records {
        let texts: Vec<&str> = fields.iter().map(|&field| record.text(field)).collect();
        tf.extend(normalize_joined(&texts, config));
    }
    tf
}

/// Products in stock versus out of stock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StockCounts {
    pub in_stock: usize,
    pub out_of_stock: usize,
}

impl StockCounts {
    pub fn total(&self) -> usize { self.in_stock + self.out_of_stock }

    /// Fraction of products out of stock; 0.0 when there are none.
    pub fn out_of_stock_share(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.out_of_stock as f64 / total as f64,
        }
    }
}

pub fn stock_distribution<'a, I>(records: I) -> StockCounts
where
    I: IntoIterator<Item = &'a MetadataRecord>,
{
    let mut counts = StockCounts::default();
    for record in records {
        if record.out_of_stock {
            counts.out_of_stock += 1;
        } else {
            counts.in_stock += 1;
        }
    }
    counts
}

/// Count, mean, sample standard deviation and range of a series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

impl Summary {
    /// An empty series summarizes to all zeros; a single value has std 0.
    pub fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }
        let count = values.len();
        let mean = values.iter().sum::<f64>() / count as f64;
        let std = if count > 1 {
            let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (count - 1) as f64;
            var.sqrt()
        } else {
            0.0
        };
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Self { count, mean, std, min, max }
    }
}

/// Mean number of words per sentence, sentences ending at `.`, `!` or `?`.
pub fn avg_sentence_length(text: &str) -> f64 {
    let lengths: Vec<usize> = SENTENCE_END
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.split_whitespace().count())
        .collect();
    if lengths.is_empty() {
        return 0.0;
    }
    lengths.iter().sum::<usize>() as f64 / lengths.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::IdentityStemmer;
    use serde_json::Value;

    fn record(title: &str, brand: &str) -> IndexInfoRecord {
        IndexInfoRecord {
            title: title.into(),
            description: String::new(),
            brand: brand.into(),
            category: String::new(),
            sub_category: String::new(),
            product_details: Value::Null,
            seller: String::new(),
        }
    }

    #[test]
    fn most_common_orders_by_count_then_term() {
        let tf = TermFrequencies::from_terms(
            ["shoe", "red", "shoe", "blue", "red", "shoe"].map(String::from),
        );
        assert_eq!(tf.total(), 6);
        assert_eq!(tf.distinct(), 3);
        assert_eq!(tf.most_common(2), vec![("shoe", 3), ("red", 2)]);
        assert_eq!(tf.most_common(10).last(), Some(&("blue", 1)));
    }

    #[test]
    fn aggregates_selected_fields() {
        let config = NormalizerConfig::new(["the".to_string()].into(), Box::new(IdentityStemmer));
        let records = [record("The Red Shoe", "Acme"), record("Blue Shoe", "Acme")];
        let tf = aggregate_terms(&records, &[TextField::Title, TextField::Brand], &config);
        assert_eq!(tf.get("shoe"), 2);
        assert_eq!(tf.get("acme"), 2);
        assert_eq!(tf.get("the"), 0);

        let titles_only = aggregate_terms(&records, &[TextField::Title], &config);
        assert_eq!(titles_only.get("acme"), 0);
    }

    #[test]
    fn counts_stock_availability() {
        let metadata = |out_of_stock: bool| MetadataRecord {
            out_of_stock,
            selling_price: Value::from("921"),
            discount: Value::from("69% off"),
            actual_price: Value::from("2,999"),
            average_rating: Value::from("3.9"),
            url: "https://example.com/p".into(),
        };
        let records = [metadata(false), metadata(true), metadata(false), metadata(false)];
        let counts = stock_distribution(&records);
        assert_eq!(counts, StockCounts { in_stock: 3, out_of_stock: 1 });
        assert_eq!(counts.total(), 4);
        assert_eq!(counts.out_of_stock_share(), 0.25);

        let empty = stock_distribution(&[] as &[MetadataRecord]);
        assert_eq!(empty.total(), 0);
        assert_eq!(empty.out_of_stock_share(), 0.0);
    }

    #[test]
    fn summary_matches_hand_computation() {
        let s = Summary::from_values(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_eq!(s.count, 8);
        assert_eq!(s.mean, 5.0);
        assert!((s.std - 2.138_089_935).abs() < 1e-6);
        assert_eq!((s.min, s.max), (2.0, 9.0));
        assert_eq!(Summary::from_values(&[]), Summary::default());
        assert_eq!(Summary::from_values(&[3.0]).std, 0.0);
    }

    #[test]
    fn sentence_lengths() {
        assert_eq!(avg_sentence_length("One two three. Four!"), 2.0);
        assert_eq!(avg_sentence_length("Wow... Really?! Yes"), 1.0);
        assert_eq!(avg_sentence_length("  ...  "), 0.0);
    }
}
