use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "clean-metagraph",
    about = "List metagraph operation records unreachable from any checkpoint",
    long_about = "Walks every version under STORE_ROOT, rebuilds the entity dependency graph \
                  and prints, one per line, the `<version>/<file>` key of each operation \
                  record that no checkpoint depends on. Nothing is deleted. On any error \
                  nothing is printed to stdout.",
    version
)]
pub struct Cli {
    /// Store root: the directory holding one subdirectory per version
    pub store_root: PathBuf,

    /// Output a JSON report instead of one key per line
    #[arg(long)]
    pub json: bool,

    /// Log filter for stderr diagnostics (e.g. `info`, `metagc_graph=debug`)
    #[arg(long, env = "METAGC_LOG", default_value = "warn")]
    pub log_level: String,
}
