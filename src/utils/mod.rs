pub mod errors;
pub mod logging;

use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::Path;
use url::Url;

use crate::utils::errors::TalosError;

pub fn ensure_dir_exists(dir_path: &Path) -> Result<()> {
    if !dir_path.exists() {
        fs::create_dir_all(dir_path)
            .with_context(|| format!("Failed to create directory: {}", dir_path.display()))?;
    }
    Ok(())
}

/// Returns the last path segment of a download URL, kept in its encoded form.
pub fn file_name_from_url(download_url: &str) -> Result<String> {
    let url = Url::parse(download_url)
        .with_context(|| format!("Failed to parse download URL: {}", download_url))?;

    url.path_segments()
        .and_then(|segments| segments.last())
        .filter(|segment| !segment.is_empty() && *segment != "." && *segment != "..")
        .map(str::to_string)
        .ok_or_else(|| anyhow!(TalosError::InvalidDownloadUrl(download_url.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_from_url() {
        let name = file_name_from_url(
            "https://cdn.modrinth.com/data/P7dR8mSH/versions/0.42.0/fabric-api-0.42.0%2B1.16.jar",
        )
        .unwrap();
        assert_eq!(name, "fabric-api-0.42.0%2B1.16.jar");
    }

    #[test]
    fn test_file_name_ignores_query() {
        let name = file_name_from_url("https://cdn.example/files/foo.jar?token=abc").unwrap();
        assert_eq!(name, "foo.jar");
    }

    #[test]
    fn test_file_name_rejects_directory_url() {
        let err = file_name_from_url("https://cdn.example/files/").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TalosError>(),
            Some(TalosError::InvalidDownloadUrl(_))
        ));
    }

    #[test]
    fn test_ensure_dir_exists_creates_nested() {
        let temp = tempfile::tempdir().unwrap();
        let nested = temp.path().join("a").join("b");
        ensure_dir_exists(&nested).unwrap();
        assert!(nested.is_dir());
        // Second call is a no-op
        ensure_dir_exists(&nested).unwrap();
    }
}
