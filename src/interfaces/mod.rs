pub mod subscription;

pub use subscription::{load_custom_rules, load_remote, submerge, SubmergeResult};
