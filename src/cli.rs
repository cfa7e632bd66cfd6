// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "shadow-showcase")]
#[command(about = "Shadow-casting lights over a metal/rough material", long_about = None)]
pub struct Cli {
    /// Hide the parameter panel
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,

    /// JSON config file; flags below override its values
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory with the six environment cube faces
    #[arg(long = "env-map", value_name = "DIR")]
    pub env_map: Option<PathBuf>,

    /// Initial window width
    #[arg(long)]
    pub width: Option<u32>,

    /// Initial window height
    #[arg(long)]
    pub height: Option<u32>,
}
