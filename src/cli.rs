//! CLI struct definitions for the `nsload` command-line interface.
//!
//! All clap-derived types live here. Dispatch lives in `lib.rs`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(
    name = "nsload",
    version = env!("CARGO_PKG_VERSION"),
    about = "Resolve namespaced class names to source files and load them once, on demand or eagerly."
)]
pub(crate) struct Cli {
    /// Config file (defaults to $NSLOAD_CONFIG, then ./autoload.toml if present).
    #[clap(long, global = true)]
    pub config: Option<PathBuf>,
    /// Output format: 'text' or 'json'.
    #[clap(long, global = true, default_value = "text")]
    pub format: String,
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Print the file a class resolves to
    Resolve {
        /// Fully-qualified class name, e.g. 'App\Models\User'
        class: String,
        /// Also list every candidate path probed, in order
        #[clap(long)]
        explain: bool,
    },
    /// Resolve a class and include its file
    Load {
        /// Fully-qualified class name
        class: String,
    },
    /// Include every file under DIR that declares PREFIX (non-recursive)
    Scan {
        /// Namespace the files must declare
        prefix: String,
        /// Directory to scan
        dir: PathBuf,
    },
    /// Print the namespaces a file declares
    Namespaces {
        /// Source file to inspect
        file: PathBuf,
    },
    /// Print the configured namespace map
    Map,
}
