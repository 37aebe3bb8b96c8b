//! Bundler engine adapters
//!
//! The orchestrator never talks to a bundler directly; it hands a
//! [`BundleOptions`] to a [`BundlerEngine`] and gets a [`BuildResult`]
//! back. Two interchangeable engines are provided: esbuild (the default)
//! and webpack (selected per leg by the presence of a
//! `bundler.<leg>.toml` profile, whose table is merged into the generated
//! config with user values winning).
//!
//! `resolve_config` is pure - options in, program + argv + optional config
//! file payload out - so the mapping is testable without the engines
//! installed. `invoke` locates the executable, runs it, and turns its
//! output into diagnostics. Compile failures are *successful* calls that
//! return an unsuccessful result; the orchestrator aggregates them across
//! legs. Only spawn-level problems (engine missing, I/O) are errors.

pub mod engine;
pub mod errors;
pub mod esbuild;
pub mod options;
pub mod profile;
pub mod typecheck;
pub mod webpack;

pub use engine::{engine_for_leg, BundlerEngine, ConfigFile, EngineConfig};
pub use errors::{BundleError, TypecheckError};
pub use esbuild::EsbuildEngine;
pub use options::{BuildResult, BundleOptions, Diagnostic};
pub use typecheck::{run_typecheck, TypecheckReport};
pub use webpack::WebpackEngine;
