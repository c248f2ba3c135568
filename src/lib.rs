//! Turns a free-text self-description into a three-file portfolio website
//! (markup, styling, scripting) by way of an LLM, and packages it as a ZIP.

pub mod archive;
pub mod config;
pub mod errors;
pub mod fix;
pub mod generate;
pub mod parse;
pub mod prompt;
pub mod provider;
pub mod wire;

pub use errors::GenError;
pub use generate::{Attempt, Generator};
pub use wire::{ArtifactNames, ArtifactSet, SectionKind};
