pub mod error;
pub mod generator;
pub mod interfaces;
pub mod models;
pub mod parser;
pub mod settings;
pub mod utils;

// Re-export the main entry points for easier access
pub use error::{Error, PartialMetadataWarning, Result};
pub use generator::{ConfigAssembler, MergedConfig};
pub use interfaces::{submerge, SubmergeResult};
pub use settings::{Source, SubmergeConfig, SubmergeConfigBuilder};
