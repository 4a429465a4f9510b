pub mod base64;
pub mod file;
pub mod http;
pub mod system;
pub mod yaml;

// Re-export common utilities
pub use file::{file_exists, file_get, file_write_atomic};
pub use http::{web_get, FetchOptions, FetchedPayload};
