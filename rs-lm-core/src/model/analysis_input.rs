use serde::{Deserialize, Serialize};

/// Input parameters for one analysis run.
///
/// # Responsibilities
/// - Select the smoothing policy applied while building the bigram table
/// - Enable the optional perplexity computation on the test corpus
/// - Request a number of randomly generated sentences
///
/// # Notes
/// - With the same `generation_seed` and the same training corpus,
///   generated output is identical across runs.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct AnalysisInput {
	/// Add 1 to the count of every observed bigram before probabilities
	/// are derived.
	pub smoothing: bool,

	/// Compute unigram and bigram perplexity of the test corpus.
	pub compute_perplexity: bool,

	/// Number of sentences to sample from the bigram chain; 0 disables
	/// generation.
	pub sentences_to_generate: usize,

	/// Fixed RNG seed for generation; `None` seeds from the operating
	/// system.
	pub generation_seed: Option<u64>,
}
