pub mod clean;
pub mod config;
pub mod error;
pub mod io;
pub mod model;
pub mod pipeline;
pub mod reconcile;

pub use error::{Result, ToolError};
