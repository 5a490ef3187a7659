//! Choice Paths - Dynamic choice path generation
//!
//! Given a communication purpose and a snapshot of the user's context, this
//! crate matches audience archetypes, adapts a communication strategy,
//! plans execution variants and assembles them into a `ChoicePath`. Paths
//! can then be branched, adapted from feedback, compared and enriched with
//! generated examples.
//!
//! Start with [`application::ChoiceEngine`].

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

pub use application::ChoiceEngine;
pub use domain::foundation::{ChoiceError, ErrorCode, Purpose};
