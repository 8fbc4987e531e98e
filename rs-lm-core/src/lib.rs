//! Unigram and bigram language modeling library.
//!
//! This crate estimates a statistical language model from a tokenized,
//! sentence-segmented training corpus and provides:
//! - Unigram and bigram frequency counting
//! - Log-probability estimation with optional additive smoothing
//! - Evaluation of a held-out test corpus (sentence probabilities,
//!   corpus averages, optional perplexity)
//! - Random sentence generation over the bigram Markov chain
//!
//! Tokenization and sentence segmentation are left to the caller;
//! the library consumes corpora of already-split token sequences.

/// Core language model types and the analysis pipeline.
///
/// This module exposes the counting, building, evaluation and generation
/// stages as independently constructible values.
pub mod model;

/// Error type shared by all pipeline stages.
pub mod error;
