pub mod config;
pub mod error;
pub mod types;

pub use config::{EngineConfig, ReactionConfig, RubricConfig};
pub use error::{PracticalError, Result};
