//! # Decoding
//!
//! Viterbi search over a trained model, one sentence at a time.

pub mod backtrace;
pub mod viterbi;

pub use backtrace::Backtrace;
pub use viterbi::{
    DecoderConfig, SentenceTerminator, TaggedPath, ViterbiDecoder, DEFAULT_UNSEEN_PENALTY,
};
