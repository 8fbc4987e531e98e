use thiserror::Error;

/// Errors raised while building, evaluating or sampling a language model.
///
/// Every variant is local to a single analysis run; nothing is retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
	/// The training or test corpus contains no sentences.
	#[error("corpus contains no sentences")]
	EmptyCorpus,

	/// A token with a zero occurrence count was about to be used as a
	/// probability denominator.
	#[error("zero-count denominator for token '{0}'")]
	DegenerateModel(String),

	/// Sentence generation reached a token with no outgoing bigram.
	#[error("no outgoing bigram from token '{0}'")]
	GenerationDeadEnd(String),

	/// A bigram table key did not split back into its record's two words.
	#[error("malformed bigram key '{0}'")]
	MalformedBigram(String),
}

/// Convenience alias used by all model operations.
pub type ModelResult<T> = Result<T, ModelError>;
