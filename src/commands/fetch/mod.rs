use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::modrinth::ModrinthClient;
use crate::downloader;
use crate::models::config::ResolveConfig;
use crate::models::mod_list;
use crate::resolver::{ModSet, ModSetBuilder};

/// Resolves every mod in `modlist` and downloads the results into `output_dir`.
pub async fn run(
    modlist: &Path,
    output_dir: &Path,
    config: &ResolveConfig,
    quiet: bool,
) -> Result<Vec<PathBuf>> {
    let mod_names = mod_list::load_mod_list(modlist)?;
    let client =
        ModrinthClient::from_config(config).context("Failed to initialize Modrinth API client")?;

    if !quiet {
        println!(
            "🔍 Resolving {} mods for Minecraft {} ({})...",
            mod_names.len(),
            config.game_version,
            config.loader
        );
    }

    let spinner = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
                .template("{spinner} {msg}")
                .context("Failed to create progress style")?,
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    };

    let mod_set = ModSetBuilder::new(&client, config)
        .with_progress(spinner.clone())
        .build(&mod_names)
        .await?;
    spinner.finish_and_clear();

    if !quiet {
        print_summary(&mod_set);
    }

    let pb = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(mod_set.urls.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .context("Failed to create progress bar style")?
                .progress_chars("#>-"),
        );
        pb
    };

    let written = downloader::download_all(&client, &mod_set.urls, output_dir, &pb).await?;
    pb.finish_with_message(format!(
        "Downloaded {} files to {}",
        written.len(),
        output_dir.display()
    ));

    Ok(written)
}

fn print_summary(mod_set: &ModSet) {
    println!("📦 {} files to download", mod_set.urls.len());
    if !mod_set.missing.is_empty() {
        println!(
            "{} No compatible version for: {}",
            style("!").yellow().bold(),
            mod_set.missing.join(", ")
        );
    }
}
