//! # Sudi Core
//!
//! A Hidden Markov Model sequence tagger. Transition and emission
//! probabilities are estimated from an aligned tag/word corpus, and new
//! sentences are tagged with the Viterbi algorithm in base-10 log space.
//!
//! ## Quick Start
//!
//! ```rust
//! use sudi_core::{TaggedCorpus, Tagger, TaggerConfig};
//!
//! let corpus = TaggedCorpus::from_lines(
//!     &["D N V .", "D N ."],
//!     &["the dog ran .", "a cat ."],
//! ).unwrap();
//! let tagger = Tagger::train(&corpus, TaggerConfig::default()).unwrap();
//!
//! assert_eq!(tagger.tag("a zebra .").unwrap(), vec!["D", "N", "."]);
//! ```
pub mod corpus;
pub mod decoder;
pub mod error;
pub mod eval;
pub mod model;
pub mod tagger;

// Re-export primary API
pub use corpus::{
    read_sentences, read_sentences_from_path, tokenize, TaggedCorpus, TaggedSentence,
};
pub use decoder::{DecoderConfig, SentenceTerminator, TaggedPath, ViterbiDecoder};
pub use error::{Result, SudiError};
pub use eval::Accuracy;
pub use model::{Estimator, EstimatorConfig, HmmModel, LogDistribution, TagState};
pub use tagger::{Tagger, TaggerConfig};
