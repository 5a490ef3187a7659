//! Text generator adapters.

mod http;
mod mock;

pub use http::{HttpTextGenerator, HttpTextGeneratorConfig};
pub use mock::{MockError, MockTextGenerator};
