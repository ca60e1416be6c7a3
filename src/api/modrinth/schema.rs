use serde::Deserialize;

/// Response from GET /v2/search
#[derive(Debug, Deserialize, Clone)]
pub struct SearchResponse {
    pub hits: Vec<SearchHit>,
    #[serde(default)]
    pub total_hits: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SearchHit {
    pub project_id: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

/// Response from GET /v2/version/{id}, and the element type of
/// GET /v2/project/{id}/version
#[derive(Debug, Deserialize, Clone)]
pub struct Version {
    pub id: String,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version_number: Option<String>,
    #[serde(default)]
    pub date_published: Option<String>,
    #[serde(default)]
    pub game_versions: Vec<String>,
    #[serde(default)]
    pub loaders: Vec<String>,
    #[serde(default)]
    pub files: Vec<VersionFile>,
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
}

impl Version {
    pub fn supports(&self, game_version: &str, loader: &str) -> bool {
        self.game_versions.iter().any(|v| v == game_version)
            && self.loaders.iter().any(|l| l == loader)
    }

    /// URL of the first file, which Modrinth lists as the canonical download.
    pub fn primary_url(&self) -> Option<&str> {
        self.files.first().map(|file| file.url.as_str())
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct VersionFile {
    pub url: String,
    #[serde(default)]
    pub filename: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Dependency {
    #[serde(default)]
    pub version_id: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub dependency_type: DependencyType,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DependencyType {
    #[default]
    Required,
    Optional,
    Incompatible,
    Embedded,
    #[serde(other)]
    Unknown,
}
