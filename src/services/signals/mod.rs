//! Trading signals service module.
//!
//! Provides technical indicator series, normalization of provider
//! annotations, and composite buy/neutral/sell scoring.

pub mod composite;
pub mod indicators;
pub mod normalizer;

pub use composite::{CompositeScorer, DEFAULT_BIAS_THRESHOLD};
pub use indicators::compute_panel;
pub use normalizer::{classify, classify_raw, classify_record, tally};
