//! Adapters - Implementations of the port traits.
//!
//! # Components
//!
//! - `store` - In-memory `PathStore`
//! - `text` - Mock and HTTP `TextGenerator`s

pub mod store;
pub mod text;

pub use store::InMemoryPathStore;
pub use text::{HttpTextGenerator, HttpTextGeneratorConfig, MockError, MockTextGenerator};
