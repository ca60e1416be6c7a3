use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Reads a newline-delimited list of mod names.
///
/// Each line is trimmed; blank lines and lines starting with `#` are skipped.
pub fn load_mod_list(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read mod list: {}", path.display()))?;
    Ok(parse_mod_list(&content))
}

pub fn parse_mod_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}
