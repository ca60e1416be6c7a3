use thiserror::Error;

#[derive(Error, Debug)]
pub enum TalosError {
    /// Any failed API call. `status` is `None` when no response arrived; for
    /// transport and decode failures the cause is in the error chain.
    #[error("Modrinth API request to {url} failed: {reason}")]
    BadRequest {
        url: String,
        status: Option<u16>,
        reason: String,
    },

    #[error("No version of '{name}' found for Minecraft {game_version} with loader {loader}")]
    MissingMod {
        name: String,
        game_version: String,
        loader: String,
    },

    #[error("No projects found matching '{0}'")]
    NoSearchHits(String),

    #[error("Failed to download {url}: HTTP {status}")]
    DownloadFailed { url: String, status: u16 },

    #[error("Version {0} has no downloadable files")]
    NoVersionFiles(String),

    #[error("Cannot derive a file name from download URL: {0}")]
    InvalidDownloadUrl(String),

    #[error("Invalid mod loader selected: {0}. Expected one of forge, fabric, quilt, neoforge")]
    InvalidModLoader(String),
}

impl TalosError {
    /// True when a requested mod simply does not exist for the target, the one
    /// condition the mod set builder recovers from.
    pub fn is_missing_mod(&self) -> bool {
        matches!(self, Self::MissingMod { .. } | Self::NoSearchHits(_))
    }
}
