use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

use crate::error::{ModelError, ModelResult};
use crate::model::corpus::{END_TOKEN, START_TOKEN, TERMINAL_TOKEN};

/// Random sentence generator over the raw bigram occurrences of a
/// training corpus.
///
/// # Responsibilities
/// - Pick a uniformly random start pair whose first token is the start
///   marker
/// - Walk the chain by uniform choice among the pairs leaving the current
///   tail token
/// - Stop as soon as a chosen pair contains the terminal punctuation
///   token as either element
///
/// Sampling is with replacement from the flat occurrence list, so pairs
/// observed more often in training are proportionally more likely to be
/// picked.
///
/// # Invariants
/// - The occurrence list is never mutated
/// - A tail with no outgoing pair aborts the walk with
///   `ModelError::GenerationDeadEnd`; the sentence is not restarted
#[derive(Debug)]
pub struct SentenceGenerator {
	occurrences: Vec<(String, String)>,
	rng: StdRng,
}

impl SentenceGenerator {
	/// Creates a generator seeded from the operating system.
	pub fn new(occurrences: Vec<(String, String)>) -> Self {
		Self {
			occurrences,
			rng: StdRng::from_os_rng(),
		}
	}

	/// Creates a generator with a fixed seed, for reproducible output.
	pub fn with_seed(occurrences: Vec<(String, String)>, seed: u64) -> Self {
		Self {
			occurrences,
			rng: StdRng::seed_from_u64(seed),
		}
	}

	/// Generates `count` sentences, in order.
	///
	/// # Errors
	/// Returns `ModelError::GenerationDeadEnd` if any walk reaches a
	/// token with no outgoing pair, which happens when a training
	/// sentence did not end with the terminal punctuation token.
	pub fn generate(&mut self, count: usize) -> ModelResult<Vec<String>> {
		let mut sentences = Vec::with_capacity(count);
		for _ in 0..count {
			sentences.push(self.generate_sentence()?);
		}
		Ok(sentences)
	}

	/// Walks the chain once, from a random start pair to a terminal pair.
	fn generate_sentence(&mut self) -> ModelResult<String> {
		let start = self.choose_outgoing(START_TOKEN)?;
		let mut tokens = vec![start.0.clone(), start.1.clone()];
		let mut tail = start.1;

		loop {
			let chosen = self.choose_outgoing(&tail)?;
			tokens.push(chosen.1.clone());
			if chosen.0 == TERMINAL_TOKEN || chosen.1 == TERMINAL_TOKEN {
				break;
			}
			tail = chosen.1;
		}

		Ok(strip_markers(&tokens).join(" "))
	}

	/// Uniformly picks one occurrence whose first token equals `tail`.
	fn choose_outgoing(&mut self, tail: &str) -> ModelResult<(String, String)> {
		let candidates: Vec<&(String, String)> = self
			.occurrences
			.iter()
			.filter(|(first, _)| first == tail)
			.collect();
		match candidates.choose(&mut self.rng) {
			Some(pair) => Ok((*pair).clone()),
			None => Err(ModelError::GenerationDeadEnd(tail.to_owned())),
		}
	}
}

/// Drops the boundary markers from an assembled token sequence.
fn strip_markers(tokens: &[String]) -> &[String] {
	let mut stripped = tokens;
	if stripped.first().is_some_and(|token| token == START_TOKEN) {
		stripped = &stripped[1..];
	}
	if stripped.last().is_some_and(|token| token == END_TOKEN) {
		stripped = &stripped[..stripped.len() - 1];
	}
	stripped
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use super::*;
	use crate::model::corpus::Corpus;
	use crate::model::counter::CorpusCounts;

	fn occurrences(sentences: &[&[&str]]) -> Vec<(String, String)> {
		let corpus = Corpus::new(
			sentences
				.iter()
				.map(|tokens| tokens.iter().map(|token| token.to_string()).collect())
				.collect(),
		);
		CorpusCounts::from_corpus(&corpus)
			.expect("counting failed")
			.bigram_occurrences()
			.to_vec()
	}

	#[test]
	fn seeded_generation_is_reproducible() {
		let pairs = occurrences(&[&["the", "cat", "sat", "."], &["the", "dog", "ran", "."]]);
		let first = SentenceGenerator::with_seed(pairs.clone(), 7)
			.generate(5)
			.expect("generation failed");
		let second = SentenceGenerator::with_seed(pairs, 7)
			.generate(5)
			.expect("generation failed");
		assert_eq!(first, second);
	}

	#[test]
	fn generated_sentences_start_from_a_start_marker_pair() {
		let pairs = occurrences(&[&["the", "cat", "sat", "."], &["a", "dog", "ran", "."]]);
		let starters: HashSet<&str> = pairs
			.iter()
			.filter(|(first, _)| first == START_TOKEN)
			.map(|(_, second)| second.as_str())
			.collect();

		let sentences = SentenceGenerator::with_seed(pairs.clone(), 3)
			.generate(10)
			.expect("generation failed");
		for sentence in sentences {
			let first = sentence.split(' ').next().expect("empty sentence");
			assert!(starters.contains(first));
		}
	}

	#[test]
	fn generation_stops_at_terminal_punctuation() {
		// A single one-path corpus makes the walk deterministic.
		let pairs = occurrences(&[&["hi", "."]]);
		let sentences = SentenceGenerator::with_seed(pairs, 1)
			.generate(1)
			.expect("generation failed");
		assert_eq!(sentences, ["hi ."]);
	}

	#[test]
	fn markers_are_stripped_from_output() {
		let pairs = occurrences(&[&["the", "cat", "sat", "."]]);
		let sentences = SentenceGenerator::with_seed(pairs, 11)
			.generate(5)
			.expect("generation failed");
		for sentence in sentences {
			assert!(!sentence.contains(START_TOKEN));
			assert!(!sentence.contains(END_TOKEN));
		}
	}

	#[test]
	fn dead_end_aborts_generation() {
		// No sentence-final period: the walk runs past the end marker and
		// finds no pair leaving it.
		let pairs = occurrences(&[&["hello", "world"]]);
		let result = SentenceGenerator::with_seed(pairs, 1).generate(1);
		assert_eq!(result.unwrap_err(), ModelError::GenerationDeadEnd(END_TOKEN.to_owned()));
	}
}
