use std::collections::HashMap;

use crate::error::{ModelError, ModelResult};
use crate::model::corpus::{Corpus, START_TOKEN, wrap_sentence};
use crate::model::record::{BigramRecord, UnigramRecord};

/// Raw frequency tables extracted from a single pass over the training
/// corpus.
///
/// # Responsibilities
/// - Count every raw token of every sentence (unigram table)
/// - Count adjacent token pairs of every marker-wrapped sentence
///   (bigram table)
/// - Keep the flat, ordered list of extracted pairs for the sentence
///   generator
///
/// # Invariants
/// - The start marker is present with a count equal to the number of
///   sentences; it is injected once after the pass, never counted token
///   by token
/// - The end marker appears in the bigram table but never in the
///   unigram table
/// - `token_count` excludes boundary markers
#[derive(Debug, Clone)]
pub struct CorpusCounts {
	pub(crate) vocabulary: HashMap<String, UnigramRecord>,
	pub(crate) bigrams: HashMap<String, BigramRecord>,
	pub(crate) bigram_occurrences: Vec<(String, String)>,
	pub(crate) sentence_count: usize,
	pub(crate) token_count: usize,
}

impl CorpusCounts {
	/// Scans the training corpus once and fills all tables.
	///
	/// # Errors
	/// Returns `ModelError::EmptyCorpus` if the corpus has no sentences.
	pub fn from_corpus(corpus: &Corpus) -> ModelResult<Self> {
		if corpus.is_empty() {
			return Err(ModelError::EmptyCorpus);
		}

		let mut counts = Self {
			vocabulary: HashMap::new(),
			bigrams: HashMap::new(),
			bigram_occurrences: Vec::new(),
			sentence_count: corpus.len(),
			token_count: 0,
		};

		for sentence in corpus.sentences() {
			counts.count_unigrams(sentence);
			counts.count_bigrams(sentence);
		}

		// One start-of-sentence event per sentence, injected synthetically
		// instead of counting the marker token by token.
		counts.vocabulary.insert(
			START_TOKEN.to_owned(),
			UnigramRecord {
				token: START_TOKEN.to_owned(),
				count: counts.sentence_count,
				log_probability: 0.0,
			},
		);

		Ok(counts)
	}

	/// Read-only view of the unigram table.
	pub fn vocabulary(&self) -> &HashMap<String, UnigramRecord> {
		&self.vocabulary
	}

	/// Read-only view of the bigram table.
	pub fn bigrams(&self) -> &HashMap<String, BigramRecord> {
		&self.bigrams
	}

	/// The raw, ordered bigram pairs extracted from the wrapped sentences.
	pub fn bigram_occurrences(&self) -> &[(String, String)] {
		&self.bigram_occurrences
	}

	/// Number of sentences in the scanned corpus.
	pub fn sentence_count(&self) -> usize {
		self.sentence_count
	}

	/// Number of raw tokens in the scanned corpus, markers excluded.
	pub fn token_count(&self) -> usize {
		self.token_count
	}

	/// Increments the unigram count of every raw token in the sentence.
	fn count_unigrams(&mut self, sentence: &[String]) {
		self.token_count += sentence.len();
		for token in sentence {
			self.vocabulary
				.entry(token.to_owned())
				.or_insert_with(|| UnigramRecord::new(token))
				.count += 1;
		}
	}

	/// Wraps the sentence with both boundary markers, then increments the
	/// count of every adjacent token pair and appends each pair to the
	/// occurrence list.
	fn count_bigrams(&mut self, sentence: &[String]) {
		let wrapped = wrap_sentence(sentence);
		for pair in wrapped.windows(2) {
			let (first, second) = (&pair[0], &pair[1]);
			self.bigrams
				.entry(format!("{} {}", first, second))
				.or_insert_with(|| BigramRecord::new(first, second))
				.count += 1;
			self.bigram_occurrences.push((first.to_owned(), second.to_owned()));
		}
	}
}
