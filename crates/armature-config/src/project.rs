//! Explicit project-root value threaded through every component.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::constants;

/// One bundling leg of a build invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Leg {
    Main,
    Ui,
}

impl Leg {
    /// Conventional basename for this leg's entry and output file.
    pub fn basename(self) -> &'static str {
        match self {
            Leg::Main => constants::MAIN_BASENAME,
            Leg::Ui => constants::UI_BASENAME,
        }
    }

    /// Root-relative path of this leg's emitted bundle.
    pub fn output(self) -> &'static str {
        match self {
            Leg::Main => constants::MAIN_OUTPUT,
            Leg::Ui => constants::UI_OUTPUT,
        }
    }
}

impl fmt::Display for Leg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.basename())
    }
}

/// Root directory of the plugin project being built.
///
/// All path resolution goes through this value; the toolkit never reads the
/// process working directory after startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRoot(PathBuf);

impl ProjectRoot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ProjectRoot(path.into())
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Resolve a root-relative path.
    pub fn join(&self, rel: impl AsRef<Path>) -> PathBuf {
        self.0.join(rel)
    }

    /// `<root>/src`
    pub fn src_dir(&self) -> PathBuf {
        self.0.join(constants::SRC_DIR)
    }

    /// `<root>/src/commands`
    pub fn commands_dir(&self) -> PathBuf {
        self.src_dir().join(constants::COMMANDS_DIR)
    }

    /// `<root>/build`
    pub fn build_dir(&self) -> PathBuf {
        self.0.join(constants::BUILD_DIR)
    }

    /// `<root>/manifest.json`
    pub fn manifest_path(&self) -> PathBuf {
        self.0.join(constants::MANIFEST_FILE)
    }

    /// `<root>/package.json`
    pub fn descriptor_path(&self) -> PathBuf {
        self.0.join(constants::DESCRIPTOR_FILE)
    }

    /// `<root>/bundler.<leg>.toml` - the per-leg engine profile override.
    pub fn bundler_profile(&self, leg: Leg) -> PathBuf {
        self.0.join(format!("bundler.{}.toml", leg.basename()))
    }

    /// Emitted bundle path for a leg, as an absolute path.
    pub fn output_path(&self, leg: Leg) -> PathBuf {
        self.0.join(leg.output())
    }
}

impl fmt::Display for ProjectRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}
