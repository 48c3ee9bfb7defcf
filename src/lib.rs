pub mod analysis;
pub mod config;
pub mod error;
pub mod llm;
pub mod payload;
pub mod server;

pub use error::{Error, Result};
