//! `armature manifest` - synthesize and print the manifest without
//! touching the bundler engines. Useful for previewing menu derivation
//! and augmentation before a full build.

use std::path::PathBuf;

use clap::Parser;

use armature_config::{Leg, PluginDescriptor};
use armature_manifest::{build_command_tree, synthesize, to_json_string, BuildOutputs};
use armature_scan::{scan, DiskListing, EntryOverrides};

use crate::common::GlobalOpts;
use crate::errors::BuildError;
use crate::logger;

#[derive(Parser, Debug)]
pub struct ManifestCommand {
    /// Project root (defaults to the current directory)
    #[arg(short = 'C', long, value_name = "DIR")]
    pub project: Option<PathBuf>,
}

pub fn handle_manifest(cmd: ManifestCommand, _opts: &GlobalOpts) -> Result<(), BuildError> {
    let root = super::resolve_root(cmd.project)?;
    logger::debug(&format!("Synthesizing manifest for {root}"));

    let descriptor = PluginDescriptor::load(&root)?;
    let listing = DiskListing::new(root.clone());
    let overrides = EntryOverrides {
        main: descriptor.main.clone(),
        ui: descriptor.ui.clone(),
    };
    let sources = scan(&listing, &overrides)?;
    let tree = build_command_tree(&sources.handlers)?;

    let outputs = BuildOutputs {
        main: Leg::Main.output().to_string(),
        ui: sources
            .ui
            .is_some()
            .then(|| Leg::Ui.output().to_string()),
    };
    let manifest = synthesize(&descriptor, &tree, &outputs, None)?;
    print!("{}", to_json_string(&manifest)?);
    Ok(())
}
