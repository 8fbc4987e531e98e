use std::collections::HashMap;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};
use crate::model::counter::CorpusCounts;
use crate::model::record::{BigramRecord, UnigramRecord};

/// Offset added to the count of every observed bigram when smoothing is on.
const SMOOTHING_OFFSET: usize = 1;

/// A fully built unigram and bigram language model.
///
/// # Responsibilities
/// - Apply the additive smoothing policy to the bigram table
/// - Derive natural-log probabilities for every unigram and bigram
/// - Serve read-only lookups to the evaluator and the generator
///
/// # Invariants
/// - Tables are immutable once `build` returns
/// - Smoothing touches observed bigram types only; pairs never seen in
///   training are not added to the table, and denominators are not
///   adjusted
/// - A raw probability of exactly 0 or 1 is stored as log-probability 0
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LanguageModel {
	vocabulary: HashMap<String, UnigramRecord>,
	bigrams: HashMap<String, BigramRecord>,
	bigram_occurrences: Vec<(String, String)>,
	smoothed: bool,
}

impl LanguageModel {
	/// Converts raw counts into probability estimates.
	///
	/// # Parameters
	/// - `counts`: Tables produced by a single training-corpus pass.
	/// - `smoothing`: When true, adds 1 to the count of every bigram
	///   already present in the table before probabilities are derived.
	///
	/// # Errors
	/// - `ModelError::MalformedBigram` if a table key does not split back
	///   into its record's two words.
	/// - `ModelError::DegenerateModel` if a zero unigram count would be
	///   used as a conditional-probability denominator.
	/// - `ModelError::EmptyCorpus` if the unigram table carries no mass
	///   at all.
	pub fn build(counts: CorpusCounts, smoothing: bool) -> ModelResult<Self> {
		let CorpusCounts {
			vocabulary,
			bigrams,
			bigram_occurrences,
			sentence_count,
			token_count,
		} = counts;

		debug!(
			"building model: {} unigram types, {} bigram types, {} sentences, {} tokens",
			vocabulary.len(),
			bigrams.len(),
			sentence_count,
			token_count
		);

		let mut model = Self {
			vocabulary,
			bigrams,
			bigram_occurrences,
			smoothed: smoothing,
		};

		if smoothing {
			model.apply_smoothing();
		}
		model.check_keys()?;
		model.assign_unigram_probabilities()?;
		model.assign_bigram_probabilities()?;

		Ok(model)
	}

	/// Read-only view of the vocabulary.
	pub fn vocabulary(&self) -> &HashMap<String, UnigramRecord> {
		&self.vocabulary
	}

	/// Read-only view of the bigram table.
	pub fn bigrams(&self) -> &HashMap<String, BigramRecord> {
		&self.bigrams
	}

	/// The raw, ordered bigram occurrence list extracted from training.
	pub fn bigram_occurrences(&self) -> &[(String, String)] {
		&self.bigram_occurrences
	}

	/// True if the smoothing offset was applied to the bigram table.
	pub fn smoothed(&self) -> bool {
		self.smoothed
	}

	/// Stored log-probability of a single token, if it is in the
	/// vocabulary.
	pub fn unigram_log_probability(&self, token: &str) -> Option<f64> {
		self.vocabulary.get(token).map(|record| record.log_probability)
	}

	/// Stored log-probability of the exact (first, second) pair, if it was
	/// observed in training.
	pub fn bigram_log_probability(&self, first: &str, second: &str) -> Option<f64> {
		self.bigrams
			.get(&format!("{} {}", first, second))
			.map(|record| record.log_probability)
	}

	/// Adds the smoothing offset to every bigram already in the table.
	fn apply_smoothing(&mut self) {
		for record in self.bigrams.values_mut() {
			record.count += SMOOTHING_OFFSET;
		}
	}

	/// Verifies that every table key splits back into its record's words.
	fn check_keys(&self) -> ModelResult<()> {
		for (key, record) in &self.bigrams {
			record.check_key(key)?;
		}
		Ok(())
	}

	/// Assigns `ln(count / N)` to every vocabulary entry, `N` being the
	/// sum of all unigram counts including the synthetic start marker.
	fn assign_unigram_probabilities(&mut self) -> ModelResult<()> {
		let total: usize = self.vocabulary.values().map(|record| record.count).sum();
		if total == 0 {
			return Err(ModelError::EmptyCorpus);
		}
		for record in self.vocabulary.values_mut() {
			record.log_probability = log_probability(record.count, total);
		}
		Ok(())
	}

	/// Assigns `ln(count(w1 w2) / count(w1))` to every bigram record.
	///
	/// The first-word count comes from one vocabulary lookup per record.
	/// A first word without a vocabulary entry leaves the record's
	/// log-probability at 0.0.
	fn assign_bigram_probabilities(&mut self) -> ModelResult<()> {
		for record in self.bigrams.values_mut() {
			let Some(unigram) = self.vocabulary.get(&record.first_word) else {
				continue;
			};
			if unigram.count == 0 {
				return Err(ModelError::DegenerateModel(record.first_word.clone()));
			}
			record.log_probability = log_probability(record.count, unigram.count);
		}
		Ok(())
	}
}

/// Natural-log probability of `event` occurrences out of `total`.
///
/// A raw probability of exactly 0 or 1 maps to a log-probability of 0, so
/// such events contribute nothing to sentence-level sums.
fn log_probability(event: usize, total: usize) -> f64 {
	let probability = event as f64 / total as f64;
	if probability == 0.0 || probability == 1.0 {
		0.0
	} else {
		probability.ln()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::corpus::{Corpus, START_TOKEN};

	fn counts(sentences: &[&[&str]]) -> CorpusCounts {
		let corpus = Corpus::new(
			sentences
				.iter()
				.map(|tokens| tokens.iter().map(|token| token.to_string()).collect())
				.collect(),
		);
		CorpusCounts::from_corpus(&corpus).expect("counting failed")
	}

	#[test]
	fn smoothing_touches_observed_bigrams_only() {
		let model = LanguageModel::build(counts(&[&["the", "cat", "sat"], &["the", "dog", "ran"]]), true)
			.expect("build failed");
		assert!(model.smoothed());
		assert_eq!(model.bigrams()["<s> the"].count, 3);
		assert_eq!(model.bigrams()["the cat"].count, 2);
		assert!(!model.bigrams().contains_key("cat ran"));
	}

	#[test]
	fn without_smoothing_counts_stay_raw() {
		let model = LanguageModel::build(counts(&[&["the", "cat", "sat"], &["the", "dog", "ran"]]), false)
			.expect("build failed");
		assert_eq!(model.bigrams()["<s> the"].count, 2);
		assert_eq!(model.bigrams()["the cat"].count, 1);
	}

	#[test]
	fn unigram_probabilities_use_the_full_mass() {
		let model = LanguageModel::build(counts(&[&["the", "cat", "sat"], &["the", "dog", "ran"]]), false)
			.expect("build failed");
		// 6 raw tokens plus the synthetic start marker (2) make N = 8.
		let expected = (2.0f64 / 8.0).ln();
		assert!((model.vocabulary()["the"].log_probability - expected).abs() < 1e-12);
		assert!((model.vocabulary()[START_TOKEN].log_probability - expected).abs() < 1e-12);
	}

	#[test]
	fn bigram_probabilities_condition_on_the_first_word() {
		let model = LanguageModel::build(counts(&[&["a", "a", "b"]]), false).expect("build failed");
		// count("a b") = 1, count("a") = 2.
		let expected = (1.0f64 / 2.0).ln();
		assert!((model.bigrams()["a b"].log_probability - expected).abs() < 1e-12);
	}

	#[test]
	fn probability_of_exactly_one_is_stored_as_zero() {
		let model = LanguageModel::build(counts(&[&["a"]]), false).expect("build failed");
		// count("<s> a") = 1 and count("<s>") = 1, a probability of one.
		assert_eq!(model.bigrams()["<s> a"].log_probability, 0.0);
	}

	#[test]
	fn missing_first_word_leaves_the_default_probability() {
		let mut raw = counts(&[&["a"]]);
		let mut record = BigramRecord::new("ghost", "x");
		record.count = 1;
		raw.bigrams.insert("ghost x".to_owned(), record);
		let model = LanguageModel::build(raw, false).expect("build failed");
		assert_eq!(model.bigrams()["ghost x"].log_probability, 0.0);
	}

	#[test]
	fn zero_count_denominator_is_rejected() {
		let mut raw = counts(&[&["a", "b"]]);
		raw.vocabulary.get_mut("a").expect("missing entry").count = 0;
		assert_eq!(
			LanguageModel::build(raw, false).unwrap_err(),
			ModelError::DegenerateModel("a".to_owned())
		);
	}

	#[test]
	fn malformed_bigram_key_is_rejected() {
		let mut raw = counts(&[&["a"]]);
		let mut record = BigramRecord::new("a b", "c");
		record.count = 1;
		raw.bigrams.insert("a b c".to_owned(), record);
		assert_eq!(
			LanguageModel::build(raw, false).unwrap_err(),
			ModelError::MalformedBigram("a b c".to_owned())
		);
	}

	#[test]
	fn rebuilding_from_the_same_corpus_is_identical() {
		let sentences: &[&[&str]] = &[&["the", "cat", "sat", "."], &["the", "dog", "ran", "."]];
		let first = LanguageModel::build(counts(sentences), true).expect("build failed");
		let second = LanguageModel::build(counts(sentences), true).expect("build failed");
		assert_eq!(first, second);
	}
}
