// thiserror's #[error("...{field}...")] format strings reference struct fields,
// but the compiler doesn't see through the derive macro and reports false positives.
#![allow(unused_assignments)]

//! # carbonscribe
//!
//! Turns free-form descriptions of daily activities ("drove 12km in a cab,
//! ate 200g chicken") into structured quantities and scores them against
//! fixed emission-factor tables.
//!
//! ## Pipeline
//!
//! - **Input preparation** (`engine`): Unicode NFKC, then lowercase
//! - **Alias normalization** (`alias`): variant phrases rewritten to canonical labels
//! - **Extraction** (`extract`): seven ordered rule lists, one span tracker per category
//! - **Fallback detectors** (`extract::fallback`): lemma heuristics for food and shopping
//! - **Scoring** (`calc`): per-category emissions, percentages, trees, tips, badges
//!
//! Tokenization and lemmatization sit behind [`lingua::LinguisticProvider`];
//! [`lingua::RuleBasedProvider`] is bundled.
//!
//! ## Library usage
//!
//! ```no_run
//! use carbonscribe::config::EngineConfig;
//! use carbonscribe::engine::FootprintEngine;
//!
//! let engine = FootprintEngine::new(EngineConfig::default()).unwrap();
//! let report = engine.analyze("I drove 10km in a car and ate 200g chicken").unwrap();
//! println!("{report}");
//! ```

pub mod activity;
pub mod alias;
pub mod calc;
pub mod config;
pub mod engine;
pub mod error;
pub mod extract;
pub mod factors;
pub mod lingua;
pub mod span;
pub mod units;
