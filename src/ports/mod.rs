//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `PathStore` - Path cache, per-user history and adaptation statistics
//! - `TextGenerator` - Optional generative-text enrichment

mod path_store;
mod text_generator;

pub use path_store::{PathStore, PathStoreError};
pub use text_generator::{TextGenerationError, TextGenerator};
