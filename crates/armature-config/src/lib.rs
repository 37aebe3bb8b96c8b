//! Armature project configuration
//!
//! This crate owns the conventions a plugin project is built around: where
//! sources live, where bundles are emitted, and how the project descriptor
//! (`package.json`) maps onto the plugin's identity. Path resolution is
//! always relative to an explicit [`ProjectRoot`]; nothing in the toolkit
//! consults the process working directory.

pub mod constants;
pub mod descriptor;
pub mod errors;
pub mod project;

pub use descriptor::{EditorType, PluginDescriptor, RelaunchButton};
pub use errors::ConfigError;
pub use project::{Leg, ProjectRoot};
