use clap::Parser;
use plu_lookup::core::config::{self, CliOverrides, PluConfig};
use plu_lookup::shell;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "plu-lookup", about = "Look up produce PLU codes by name or number")]
struct Args {
    /// Folder holding codeToName.json and nameToCode.json
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Read-only lookup against the built-in list; never touch custom files
    #[arg(short, long)]
    ephemeral: bool,

    /// Config file to use instead of ~/.plu/config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let file_config = match config::load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Ignoring config: {e}");
            PluConfig::default()
        }
    };
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            data_dir: args.data_dir,
            ephemeral: args.ephemeral,
        },
    );

    // File logger only; the terminal belongs to the menu
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    log::info!(
        "PLU lookup starting (custom data: {}, files: {} / {})",
        resolved.custom_data,
        resolved.code_path.display(),
        resolved.name_path.display()
    );

    shell::run(&resolved)
}
