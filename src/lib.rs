//! typofix - Context-aware statistical spell correction
//!
//! Offline spell corrector backed by a trigram language model and a
//! symmetric-delete candidate index.

pub mod app;
pub mod cli;
pub mod config;
pub mod correction;
pub mod defaults;
pub mod error;
pub mod lang;

pub use crate::correction::corrector::{SpellCorrector, TrainOptions};
pub use crate::error::{Result, TypofixError};
