use std::collections::HashMap;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::ModelResult;
use crate::model::analysis_input::AnalysisInput;
use crate::model::corpus::Corpus;
use crate::model::counter::CorpusCounts;
use crate::model::evaluator::{Evaluator, Perplexity, SentenceEvaluation};
use crate::model::generator::SentenceGenerator;
use crate::model::language_model::LanguageModel;

/// Results of one full analysis run.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AnalyzedData {
	/// Test sentence text to its probabilities under both models.
	pub sentences: HashMap<String, SentenceEvaluation>,
	/// Mean of the raw unigram sentence probabilities.
	pub avg_unigram_probability: f64,
	/// Mean of the raw bigram sentence probabilities.
	pub avg_bigram_probability: f64,
	/// Present when perplexity computation was requested.
	pub perplexity: Option<Perplexity>,
	/// Present when at least one generated sentence was requested.
	pub generated_sentences: Option<Vec<String>>,
}

/// Runs the full pipeline: counting, model building, evaluation and
/// optional sentence generation.
///
/// Every stage works on explicit values; two analyses never share state
/// and can run back to back independently.
///
/// # Errors
/// - `ModelError::EmptyCorpus` if either corpus has no sentences
/// - `ModelError::DegenerateModel` and `ModelError::MalformedBigram`
///   from model building
/// - `ModelError::GenerationDeadEnd` if a generation walk gets stuck
pub fn analyze(training: &Corpus, test: &Corpus, input: &AnalysisInput) -> ModelResult<AnalyzedData> {
	debug!(
		"analysis start: {} training sentences, {} test sentences",
		training.len(),
		test.len()
	);

	let counts = CorpusCounts::from_corpus(training)?;
	let model = LanguageModel::build(counts, input.smoothing)?;

	let evaluation = Evaluator::new(&model).evaluate(test, input.compute_perplexity)?;

	let generated_sentences = if input.sentences_to_generate > 0 {
		let occurrences = model.bigram_occurrences().to_vec();
		let mut generator = match input.generation_seed {
			Some(seed) => SentenceGenerator::with_seed(occurrences, seed),
			None => SentenceGenerator::new(occurrences),
		};
		Some(generator.generate(input.sentences_to_generate)?)
	} else {
		None
	};

	Ok(AnalyzedData {
		sentences: evaluation.sentences,
		avg_unigram_probability: evaluation.avg_unigram_probability,
		avg_bigram_probability: evaluation.avg_bigram_probability,
		perplexity: evaluation.perplexity,
		generated_sentences,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::ModelError;

	fn corpus(sentences: &[&[&str]]) -> Corpus {
		Corpus::new(
			sentences
				.iter()
				.map(|tokens| tokens.iter().map(|token| token.to_string()).collect())
				.collect(),
		)
	}

	fn training() -> Corpus {
		corpus(&[&["the", "cat", "sat", "."], &["the", "dog", "ran", "."]])
	}

	#[test]
	fn full_pipeline_produces_all_requested_outputs() {
		let input = AnalysisInput {
			smoothing: true,
			compute_perplexity: true,
			sentences_to_generate: 2,
			generation_seed: Some(42),
		};
		let result = analyze(&training(), &corpus(&[&["the", "cat", "ran", "."]]), &input)
			.expect("analysis failed");

		assert_eq!(result.sentences.len(), 1);
		assert!(result.sentences.contains_key("the cat ran ."));
		assert!(result.perplexity.is_some());
		assert_eq!(result.generated_sentences.as_ref().map(Vec::len), Some(2));
	}

	#[test]
	fn optional_outputs_are_absent_by_default() {
		let result = analyze(&training(), &corpus(&[&["the", "cat", "."]]), &AnalysisInput::default())
			.expect("analysis failed");
		assert!(result.perplexity.is_none());
		assert!(result.generated_sentences.is_none());
	}

	#[test]
	fn empty_training_corpus_is_rejected() {
		let result = analyze(&Corpus::default(), &corpus(&[&["a"]]), &AnalysisInput::default());
		assert_eq!(result.unwrap_err(), ModelError::EmptyCorpus);
	}

	#[test]
	fn empty_test_corpus_is_rejected() {
		let result = analyze(&training(), &Corpus::default(), &AnalysisInput::default());
		assert_eq!(result.unwrap_err(), ModelError::EmptyCorpus);
	}

	#[test]
	fn analyses_share_no_state_across_runs() {
		let input = AnalysisInput {
			smoothing: true,
			compute_perplexity: true,
			sentences_to_generate: 3,
			generation_seed: Some(9),
		};
		let test = corpus(&[&["the", "dog", "sat", "."]]);
		let first = analyze(&training(), &test, &input).expect("analysis failed");
		let second = analyze(&training(), &test, &input).expect("analysis failed");
		assert_eq!(first, second);
	}
}
