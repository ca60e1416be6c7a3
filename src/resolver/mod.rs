//! Turns mod names into the set of file URLs needed to run them.
//!
//! Resolution is strictly sequential: every API call is awaited before the
//! next one is issued.

use anyhow::{anyhow, Result};
use console::style;
use indicatif::ProgressBar;
use log::{debug, info, warn};
use std::collections::{BTreeSet, HashSet, VecDeque};

use crate::api::modrinth::schema::{Dependency, DependencyType, Version};
use crate::api::modrinth::ModrinthClient;
use crate::models::config::ResolveConfig;
use crate::utils::errors::TalosError;

/// Returns the project id of the first search hit for `name`.
pub async fn search_mod(client: &ModrinthClient, name: &str) -> Result<String> {
    let response = client.search(name).await?;

    response
        .hits
        .into_iter()
        .next()
        .map(|hit| hit.project_id)
        .ok_or_else(|| anyhow!(TalosError::NoSearchHits(name.to_string())))
}

/// Finds the newest version of the mod called `name` that supports the target.
///
/// Modrinth lists versions newest first; that order is trusted as-is and the
/// first compatible entry wins.
pub async fn latest_version(
    client: &ModrinthClient,
    name: &str,
    config: &ResolveConfig,
) -> Result<Version> {
    let project_id = search_mod(client, name).await?;
    debug!("'{}' resolved to project {}", name, project_id);
    latest_project_version(client, &project_id, name, config).await
}

/// Same scan as [`latest_version`] for an already known project id.
/// `display_name` only feeds the error message.
pub async fn latest_project_version(
    client: &ModrinthClient,
    project_id: &str,
    display_name: &str,
    config: &ResolveConfig,
) -> Result<Version> {
    let versions = client.project_versions(project_id).await?;
    let loader = config.loader.as_str();

    versions
        .into_iter()
        .find(|version| version.supports(&config.game_version, loader))
        .ok_or_else(|| {
            anyhow!(TalosError::MissingMod {
                name: display_name.to_string(),
                game_version: config.game_version.clone(),
                loader: loader.to_string(),
            })
        })
}

/// Canonical download URL of a version: its first file.
pub fn primary_url(version: &Version) -> Result<String> {
    version
        .primary_url()
        .map(str::to_string)
        .ok_or_else(|| anyhow!(TalosError::NoVersionFiles(version.id.clone())))
}

pub async fn resolve_url(client: &ModrinthClient, version_id: &str) -> Result<String> {
    let version = client.version(version_id).await?;
    primary_url(&version)
}

/// File URLs of every transitive dependency of `version_id`, not including
/// the version's own file.
pub async fn dependency_urls(
    client: &ModrinthClient,
    version_id: &str,
    config: &ResolveConfig,
) -> Result<BTreeSet<String>> {
    let root = client.version(version_id).await?;
    DependencyWalker::new(client, config).walk(&root).await
}

/// Breadth-first walk over the dependency graph.
///
/// Version ids already seen are never fetched again, so cycles terminate and
/// diamonds cost one request per version. A walker can be reused across
/// several roots to share that bookkeeping.
///
/// Dependencies marked `incompatible` are declarations of conflict, not
/// requirements, and are never followed.
pub struct DependencyWalker<'a> {
    client: &'a ModrinthClient,
    config: &'a ResolveConfig,
    visited_versions: HashSet<String>,
    visited_projects: HashSet<String>,
}

impl<'a> DependencyWalker<'a> {
    pub fn new(client: &'a ModrinthClient, config: &'a ResolveConfig) -> Self {
        Self {
            client,
            config,
            visited_versions: HashSet::new(),
            visited_projects: HashSet::new(),
        }
    }

    /// Marks a version as handled without fetching it.
    pub fn mark_visited(&mut self, version: &Version) {
        self.visited_versions.insert(version.id.clone());
        if let Some(project_id) = &version.project_id {
            self.visited_projects.insert(project_id.clone());
        }
    }

    /// Collects the URLs of `root`'s dependencies that this walker has not
    /// seen before.
    pub async fn walk(&mut self, root: &Version) -> Result<BTreeSet<String>> {
        self.mark_visited(root);

        let mut urls = BTreeSet::new();
        let mut queue: VecDeque<Dependency> = root.dependencies.iter().cloned().collect();

        while let Some(dependency) = queue.pop_front() {
            let Some(version) = self.fetch_dependency(&dependency).await? else {
                continue;
            };
            if self.visited_versions.contains(&version.id) {
                continue;
            }
            self.mark_visited(&version);

            let url = primary_url(&version)?;
            debug!("dependency {} -> {}", version.id, url);
            urls.insert(url);
            queue.extend(version.dependencies);
        }

        Ok(urls)
    }

    async fn fetch_dependency(&mut self, dependency: &Dependency) -> Result<Option<Version>> {
        if dependency.dependency_type == DependencyType::Incompatible {
            return Ok(None);
        }

        match (&dependency.version_id, &dependency.project_id) {
            (Some(version_id), _) => {
                if self.visited_versions.contains(version_id) {
                    return Ok(None);
                }
                Ok(Some(self.client.version(version_id).await?))
            }
            (None, Some(project_id)) => {
                if !self.visited_projects.insert(project_id.clone()) {
                    return Ok(None);
                }
                match latest_project_version(self.client, project_id, project_id, self.config)
                    .await
                {
                    Ok(version) => Ok(Some(version)),
                    Err(err) if is_missing_mod(&err) => {
                        warn!("Skipping dependency: {}", err);
                        Ok(None)
                    }
                    Err(err) => Err(err),
                }
            }
            (None, None) => {
                debug!("ignoring dependency entry without version or project id");
                Ok(None)
            }
        }
    }
}

fn is_missing_mod(err: &anyhow::Error) -> bool {
    err.downcast_ref::<TalosError>()
        .is_some_and(TalosError::is_missing_mod)
}

/// Outcome of resolving a whole mod list.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ModSet {
    pub urls: BTreeSet<String>,
    /// Names that had no compatible version (or no search hit) and were skipped.
    pub missing: Vec<String>,
}

pub struct ModSetBuilder<'a> {
    client: &'a ModrinthClient,
    config: &'a ResolveConfig,
    progress: ProgressBar,
}

impl<'a> ModSetBuilder<'a> {
    pub fn new(client: &'a ModrinthClient, config: &'a ResolveConfig) -> Self {
        Self {
            client,
            config,
            progress: ProgressBar::hidden(),
        }
    }

    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Resolves every name plus its dependency closure.
    ///
    /// A mod without a compatible version is skipped and recorded in
    /// [`ModSet::missing`]. Any other failure aborts the whole batch.
    pub async fn build<S: AsRef<str>>(&self, mod_names: &[S]) -> Result<ModSet> {
        let mut mod_set = ModSet::default();
        let mut walker = DependencyWalker::new(self.client, self.config);

        for raw_name in mod_names {
            let name = raw_name.as_ref().trim();
            if name.is_empty() {
                continue;
            }

            self.progress.set_message(format!("Searching for {}...", name));
            let version = match latest_version(self.client, name, self.config).await {
                Ok(version) => version,
                Err(err) if is_missing_mod(&err) => {
                    warn!("{}", err);
                    self.progress
                        .println(format!("{} Could not find {}", style("✗").yellow(), name));
                    mod_set.missing.push(name.to_string());
                    continue;
                }
                Err(err) => return Err(err),
            };

            let url = primary_url(&version)?;
            info!("Found {} with id: {}", name, version.id);

            self.progress
                .set_message(format!("Searching for {}'s dependencies...", name));
            let dependencies = walker.walk(&version).await?;

            self.progress.println(format!(
                "{} Found {} ({}) with {} new dependencies",
                style("✓").green(),
                name,
                version.version_number.as_deref().unwrap_or(&version.id),
                dependencies.len()
            ));

            mod_set.urls.insert(url);
            mod_set.urls.extend(dependencies);
        }

        Ok(mod_set)
    }
}
