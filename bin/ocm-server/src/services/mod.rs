//! Collaborators the routes call into besides the store.

pub mod describe;
pub mod gate;

pub use describe::{DescriptionError, DescriptionGenerator, GeminiGenerator};
pub use gate::{AdminGate, StaticCredentials};
