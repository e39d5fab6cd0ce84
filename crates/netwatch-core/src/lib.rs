pub mod config;
pub mod error;
pub mod header;
pub mod paths;
pub mod reconcile;
pub mod template;
pub mod types;

pub use error::{NetwatchError, Result};
