pub mod collector;
pub mod config;
pub mod error;
pub mod extract;
pub mod generator;
pub mod host;
pub mod labels;
pub mod local;
pub mod notes;
pub mod release;
pub mod render;
pub mod resolver;
pub mod tracker;
pub mod walker;

pub mod types;

#[cfg(test)]
mod testing;

pub use crate::error::ReleaseNotesError;
pub use crate::generator::ReleaseNotesGenerator;
pub use crate::release::ReleaseUpdater;
