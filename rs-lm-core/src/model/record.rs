use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};

/// A single vocabulary entry: one token, its occurrence count and the
/// natural-log probability assigned once the model is built.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct UnigramRecord {
	pub token: String,
	pub count: usize,
	pub log_probability: f64,
}

impl UnigramRecord {
	/// Creates an entry with no occurrences yet.
	pub(crate) fn new(token: &str) -> Self {
		Self {
			token: token.to_owned(),
			count: 0,
			log_probability: 0.0,
		}
	}
}

/// One ordered pair of adjacent tokens with its occurrence count and
/// conditional log-probability.
///
/// # Invariants
/// - `key()` always splits back into exactly `first_word` and `second_word`
/// - `count` holds the raw count plus the smoothing offset when smoothing
///   was applied
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct BigramRecord {
	pub first_word: String,
	pub second_word: String,
	pub count: usize,
	pub log_probability: f64,
}

impl BigramRecord {
	/// Creates a record with no occurrences yet.
	pub(crate) fn new(first_word: &str, second_word: &str) -> Self {
		Self {
			first_word: first_word.to_owned(),
			second_word: second_word.to_owned(),
			count: 0,
			log_probability: 0.0,
		}
	}

	/// Table key of this record, `"first second"`.
	pub fn key(&self) -> String {
		format!("{} {}", self.first_word, self.second_word)
	}

	/// Checks that `key` splits into exactly the two stored words.
	///
	/// A token with embedded whitespace would break the split; well-formed
	/// tokenizer output never produces one, but the model refuses to assign
	/// probabilities over such a key.
	pub(crate) fn check_key(&self, key: &str) -> ModelResult<()> {
		let mut words = key.split(' ');
		let first = words.next();
		let second = words.next();
		if words.next().is_some()
			|| first != Some(self.first_word.as_str())
			|| second != Some(self.second_word.as_str())
		{
			return Err(ModelError::MalformedBigram(key.to_owned()));
		}
		Ok(())
	}
}
