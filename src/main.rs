use clap::{CommandFactory, Parser};
use console::style;
use std::path::PathBuf;

use talos::commands;
use talos::models::config::{ModLoader, ResolveConfig};
use talos::utils::logging;

#[derive(Parser)]
#[command(name = "talos")]
#[command(author, version, about = "Download Minecraft mods and their dependencies from Modrinth", long_about = None)]
struct Cli {
    /// File with one mod name per line
    #[arg(value_name = "MODLIST")]
    modlist: Option<PathBuf>,

    /// Directory the mod files are written to
    #[arg(value_name = "OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Minecraft version every mod must support
    #[arg(long, short = 'g')]
    game_version: Option<String>,

    /// Mod loader (forge, fabric, quilt, neoforge)
    #[arg(long, short = 'l')]
    loader: Option<ModLoader>,

    /// Modrinth API base URL
    #[arg(long)]
    api_base_url: Option<String>,

    /// Suppress progress output
    #[arg(long, short, default_value_t = false)]
    quiet: bool,

    /// Enable debug logging
    #[arg(long, short, default_value_t = false)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    logging::init_logging(cli.verbose);

    let (Some(modlist), Some(output_dir)) = (cli.modlist, cli.output_dir) else {
        println!("{}", Cli::command().render_usage());
        return;
    };

    let result = match ResolveConfig::from_env() {
        Ok(config) => {
            let config = config.with_overrides(cli.api_base_url, cli.game_version, cli.loader);
            commands::fetch::run(&modlist, &output_dir, &config, cli.quiet).await
        }
        Err(err) => Err(err),
    };

    if let Err(err) = result {
        eprintln!("{}", style("[ERROR]").bold().red());
        eprintln!("{:?}", style(err).red());
        std::process::exit(1);
    }

    if !cli.quiet {
        println!("✅ Done");
    }
}
