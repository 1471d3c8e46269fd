//! # Wazn Common Library
//!
//! Shared code for the wazn meter matcher:
//! - Error type shared by the engine and the service
//! - Bootstrap configuration (TOML + environment + command line)
//! - Corpus model, JSON loader and once-initialized shared cache

pub mod config;
pub mod corpus;
pub mod error;

pub use corpus::{Candidate, Corpus, CorpusCache, Weight, WeightProfile};
pub use error::{Error, Result};
