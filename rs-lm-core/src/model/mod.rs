//! Top-level module for the language modeling pipeline.
//!
//! The pipeline runs in dependency order:
//! - Frequency counting over the training corpus (`counter`)
//! - Probability estimation under the smoothing policy (`language_model`)
//! - Test-corpus evaluation (`evaluator`) and sentence generation
//!   (`generator`), two independent consumers of the built model
//!
//! Every stage is an explicit value passed to the next one; no stage keeps
//! hidden state between runs.

/// Corpus representation and the reserved boundary tokens.
pub mod corpus;

/// Named unigram and bigram record types.
pub mod record;

/// Single-pass frequency counting over the training corpus.
pub mod counter;

/// The built, read-only model: smoothing and log-probability assignment.
pub mod language_model;

/// Test-corpus scoring, corpus averages and perplexity.
pub mod evaluator;

/// Random sentence generation over the bigram chain.
pub mod generator;

/// Configuration of one analysis run.
pub mod analysis_input;

/// The full counting, building, evaluation and generation pipeline.
pub mod analysis;
