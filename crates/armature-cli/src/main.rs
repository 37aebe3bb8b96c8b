use clap::{Parser, Subcommand};

use armature::{
    commands::{
        build::{self, BuildCommand},
        init,
        manifest::{self, ManifestCommand},
    },
    logger, GlobalOpts,
};

#[derive(Parser)]
#[command(name = "armature")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "Build toolkit for design-tool plugins",
    long_about = "Armature compiles a plugin's main and UI sources into host-loadable bundles and synthesizes its manifest from the sources themselves."
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOpts,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Bundle the plugin and write its manifest
    Build(BuildCommand),

    /// Synthesize and print the manifest without bundling
    Manifest(ManifestCommand),

    /// Scaffold a new plugin project
    Init {
        /// Directory to create (defaults to the current directory)
        name: Option<String>,
        /// Also scaffold a UI entry
        #[arg(long)]
        with_ui: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logger::init_with_verbosity(cli.global.verbosity_level()) {
        eprintln!("Warning: Failed to initialize logger: {}", e);
    }

    // Surface library-level tracing at -vv.
    if cli.global.verbosity_level() >= 2 {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .with_writer(std::io::stderr)
            .try_init();
    }

    match cli.command {
        Commands::Build(cmd) => {
            if let Err(e) = build::handle_build(cmd, &cli.global) {
                build::report_error(&e);
                std::process::exit(1);
            }
        }
        Commands::Manifest(cmd) => {
            if let Err(e) = manifest::handle_manifest(cmd, &cli.global) {
                logger::error(&e.to_string());
                std::process::exit(1);
            }
        }
        Commands::Init { name, with_ui } => {
            init::handle_init(name, with_ui, cli.global);
        }
    }
}
