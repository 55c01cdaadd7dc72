pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod extractor;
pub mod render;
pub mod ui;

pub use error::{ReleaseDocsError, Result};
