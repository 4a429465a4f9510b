pub mod assembler;

pub use assembler::{ConfigAssembler, MergedConfig, USERINFO_KEY};
