//! Core types for the pixel-probe shader debugger
//!
//! This crate provides the foundational types, error handling,
//! configuration, and logging infrastructure shared by the debugger crates.

pub mod config;
pub mod error;
pub mod logging;
pub mod stage;

pub use config::{Config, SessionConfig};
pub use error::{DebugError, Result};
pub use stage::{SourceLanguage, Stage};
