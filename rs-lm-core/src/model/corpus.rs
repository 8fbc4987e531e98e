use serde::{Deserialize, Serialize};

/// Reserved token marking the start of a sentence.
pub const START_TOKEN: &str = "<s>";

/// Reserved token marking the end of a sentence.
pub const END_TOKEN: &str = "</s>";

/// Terminal punctuation token; reaching it ends a generation walk.
pub const TERMINAL_TOKEN: &str = ".";

/// One sentence as an ordered sequence of plain-text tokens.
pub type Sentence = Vec<String>;

/// An ordered collection of tokenized sentences.
///
/// Token order matters: adjacent pairs are what the bigram counter
/// extracts. The corpus itself carries no boundary markers; those are
/// added on the fly where an operation needs them.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Corpus {
	sentences: Vec<Sentence>,
}

impl Corpus {
	/// Creates a corpus from already-tokenized sentences.
	pub fn new(sentences: Vec<Sentence>) -> Self {
		Self { sentences }
	}

	/// Returns the sentences in order.
	pub fn sentences(&self) -> &[Sentence] {
		&self.sentences
	}

	/// Number of sentences.
	pub fn len(&self) -> usize {
		self.sentences.len()
	}

	/// True if the corpus holds no sentences.
	pub fn is_empty(&self) -> bool {
		self.sentences.is_empty()
	}

	/// Total number of tokens across all sentences, markers excluded.
	pub fn token_count(&self) -> usize {
		self.sentences.iter().map(Vec::len).sum()
	}
}

impl From<Vec<Vec<String>>> for Corpus {
	fn from(sentences: Vec<Vec<String>>) -> Self {
		Self::new(sentences)
	}
}

/// Returns a copy of `tokens` wrapped with both boundary markers.
pub(crate) fn wrap_sentence(tokens: &[String]) -> Vec<String> {
	let mut wrapped = Vec::with_capacity(tokens.len() + 2);
	wrapped.push(START_TOKEN.to_owned());
	wrapped.extend(tokens.iter().cloned());
	wrapped.push(END_TOKEN.to_owned());
	wrapped
}

/// Returns a copy of `tokens` with the start marker only.
pub(crate) fn prefix_sentence(tokens: &[String]) -> Vec<String> {
	let mut prefixed = Vec::with_capacity(tokens.len() + 1);
	prefixed.push(START_TOKEN.to_owned());
	prefixed.extend(tokens.iter().cloned());
	prefixed
}
