//! Core data models for the application
//!
//! This module contains the plain records passed between pipeline stages,
//! separated from the logic that operates on them.
//!
//! # Usage
//!
//! ```rust
//! use submerge::models::{ConfigRecord, UserinfoRecord};
//! use serde_yaml::Value;
//!
//! let mut record = ConfigRecord::new();
//! record.insert("mode", Value::from("rule"));
//! assert_eq!(record.len(), 1);
//!
//! let mut info = UserinfoRecord::new();
//! info.set("total", 1024);
//! assert_eq!(info.total(), Some(1024));
//! ```

mod config_record;
mod userinfo;

pub use config_record::ConfigRecord;
pub use userinfo::*;
