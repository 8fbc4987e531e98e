use std::collections::HashMap;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};
use crate::model::corpus::{Corpus, prefix_sentence, wrap_sentence};
use crate::model::language_model::LanguageModel;

/// Log and raw probabilities of one test sentence under both models.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SentenceEvaluation {
	pub unigram_log_probability: f64,
	pub bigram_log_probability: f64,
	/// `exp` of the unigram log-probability, for reporting.
	pub unigram_probability: f64,
	/// `exp` of the bigram log-probability, for reporting.
	pub bigram_probability: f64,
}

/// Unigram and bigram perplexity of a test corpus.
///
/// Either value is `f64::INFINITY` when the corpus pseudo-probability
/// underflowed to zero before the root was taken.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Perplexity {
	pub unigram: f64,
	pub bigram: f64,
}

/// Corpus-level evaluation results.
#[derive(Clone, Debug, PartialEq)]
pub struct Evaluation {
	/// Sentence text (tokens joined with single spaces) to its evaluation.
	pub sentences: HashMap<String, SentenceEvaluation>,
	/// Mean of the raw unigram sentence probabilities.
	pub avg_unigram_probability: f64,
	/// Mean of the raw bigram sentence probabilities.
	pub avg_bigram_probability: f64,
	/// Present when perplexity computation was requested.
	pub perplexity: Option<Perplexity>,
}

/// Scores test sentences against a built model.
///
/// # Responsibilities
/// - Sum stored log-probabilities over each test sentence
/// - Average raw sentence probabilities over the corpus
/// - Optionally derive unigram and bigram perplexity
///
/// # Notes
/// - Tokens and pairs absent from the model contribute a log-probability
///   of 0 (probability 1), so out-of-vocabulary material is never
///   penalized
/// - Unigram scoring prefixes the sentence with the start marker only;
///   bigram scoring wraps it with both markers
pub struct Evaluator<'a> {
	model: &'a LanguageModel,
}

impl<'a> Evaluator<'a> {
	/// Creates an evaluator borrowing the built model.
	pub fn new(model: &'a LanguageModel) -> Self {
		Self { model }
	}

	/// Evaluates every sentence of the test corpus.
	///
	/// # Errors
	/// Returns `ModelError::EmptyCorpus` if the test corpus has no
	/// sentences.
	pub fn evaluate(&self, corpus: &Corpus, compute_perplexity: bool) -> ModelResult<Evaluation> {
		if corpus.is_empty() {
			return Err(ModelError::EmptyCorpus);
		}

		let mut sentences = HashMap::new();
		let mut total_unigram_probability = 0.0;
		let mut total_bigram_probability = 0.0;
		let mut total_unigram_log = 0.0;
		let mut total_bigram_log = 0.0;

		for tokens in corpus.sentences() {
			let evaluation = self.evaluate_sentence(tokens);
			total_unigram_probability += evaluation.unigram_probability;
			total_bigram_probability += evaluation.bigram_probability;
			total_unigram_log += evaluation.unigram_log_probability;
			total_bigram_log += evaluation.bigram_log_probability;
			sentences.insert(tokens.join(" "), evaluation);
		}

		let sentence_count = corpus.len() as f64;
		let perplexity =
			compute_perplexity.then(|| self.perplexity(corpus, total_unigram_log, total_bigram_log));

		Ok(Evaluation {
			sentences,
			avg_unigram_probability: total_unigram_probability / sentence_count,
			avg_bigram_probability: total_bigram_probability / sentence_count,
			perplexity,
		})
	}

	/// Scores one sentence under both models.
	fn evaluate_sentence(&self, tokens: &[String]) -> SentenceEvaluation {
		let unigram_log_probability = self.unigram_score(tokens);
		let bigram_log_probability = self.bigram_score(tokens);
		SentenceEvaluation {
			unigram_log_probability,
			bigram_log_probability,
			unigram_probability: unigram_log_probability.exp(),
			bigram_probability: bigram_log_probability.exp(),
		}
	}

	/// Sums unigram log-probabilities over the start-marker-prefixed
	/// sentence. The end marker is not appended here.
	fn unigram_score(&self, tokens: &[String]) -> f64 {
		prefix_sentence(tokens)
			.iter()
			.filter_map(|token| self.model.unigram_log_probability(token))
			.sum()
	}

	/// Sums bigram log-probabilities over adjacent pairs of the fully
	/// wrapped sentence.
	fn bigram_score(&self, tokens: &[String]) -> f64 {
		wrap_sentence(tokens)
			.windows(2)
			.filter_map(|pair| self.model.bigram_log_probability(&pair[0], &pair[1]))
			.sum()
	}

	/// Derives both perplexities from the corpus-wide log-probability
	/// sums.
	///
	/// Each sum is exponentiated once into a corpus pseudo-probability
	/// `p`; perplexity is `(1 / p)^(1 / N)` with `N` the test corpus
	/// token count plus its sentence count.
	fn perplexity(&self, corpus: &Corpus, total_unigram_log: f64, total_bigram_log: f64) -> Perplexity {
		let n = (corpus.token_count() + corpus.len()) as f64;
		Perplexity {
			unigram: perplexity_of(total_unigram_log.exp(), n),
			bigram: perplexity_of(total_bigram_log.exp(), n),
		}
	}
}

/// Perplexity of a corpus pseudo-probability over `n` events.
///
/// An underflowed probability of exactly zero yields an infinite
/// perplexity, which is reported as such rather than clamped.
fn perplexity_of(probability: f64, n: f64) -> f64 {
	if probability == 0.0 {
		warn!("corpus probability underflowed to zero; perplexity is infinite");
	}
	(1.0 / probability).powf(1.0 / n)
}
