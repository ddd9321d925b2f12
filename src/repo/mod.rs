use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};

mod fetching;

pub const REPOS_FILE: &str = "repos.json";
pub const LOCAL_REPO_NAME: &str = "Local Repo";
pub const LOCAL_REPO_URL: &str = "local://installed";

fn default_enabled() -> bool {
    true
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct RepoEntry {
    pub name: String,
    pub url: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
struct RepoFile {
    repos: Vec<RepoEntry>,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct RepoIndex {
    #[serde(default)]
    pub packages: Vec<Package>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct Package {
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub category: String,
}

// What the startup probes need to know about a repository.
pub trait RepoStatus {
    fn is_loaded(&self) -> bool;
    fn is_enabled(&self) -> bool;
    fn url(&self) -> &str;
}

#[derive(Clone, Debug)]
pub struct Repo {
    pub name: String,
    pub url: String,
    pub enabled: bool,
    // Disabled repos are never fetched and start out loaded; only a failed
    // fetch clears this.
    pub loaded: bool,
    pub index: RepoIndex,
}

impl Repo {
    fn from_entry(entry: RepoEntry) -> Repo {
        Repo {
            name: entry.name,
            url: entry.url,
            enabled: entry.enabled,
            loaded: true,
            index: RepoIndex::default(),
        }
    }
}

impl RepoStatus for Repo {
    fn is_loaded(&self) -> bool {
        self.loaded
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn url(&self) -> &str {
        &self.url
    }
}

pub struct RepoClient {
    tmp: PathBuf,
    repos: Vec<Repo>,
}

impl RepoClient {
    // Builds the repository list from `<home>/repos.json`, seeding the file
    // with the platform default repo on first run. Filesystem trouble here
    // degrades to the in-memory defaults; the storage probe reports it.
    pub fn load(home: &Path, default_repo_url: &str) -> RepoClient {
        let tmp = home.join("tmp");
        if let Err(err) = fs::create_dir_all(&tmp) {
            warn!("Couldn't create {}: {err}", tmp.display());
        }

        let repos_path = home.join(REPOS_FILE);
        let entries = match fs::read_to_string(&repos_path) {
            Ok(raw) => match serde_json::from_str::<RepoFile>(&raw) {
                Ok(file) => file.repos,
                Err(err) => {
                    warn!("Ignoring malformed {}: {err}", repos_path.display());
                    default_entries(default_repo_url)
                }
            },
            Err(_) => {
                let entries = default_entries(default_repo_url);
                persist(&repos_path, &entries);
                entries
            }
        };

        RepoClient {
            tmp,
            repos: entries.into_iter().map(Repo::from_entry).collect(),
        }
    }

    #[cfg(test)]
    pub(crate) fn from_parts(tmp: &Path, repos: Vec<Repo>) -> RepoClient {
        RepoClient {
            tmp: tmp.to_path_buf(),
            repos,
        }
    }

    pub fn repos(&self) -> &[Repo] {
        &self.repos
    }

    pub fn tmp_path(&self) -> &Path {
        &self.tmp
    }

    // Fetches every enabled repo's package index, reporting transfer progress
    // through the caller's callback (0 = continue, non-zero aborts).
    pub fn refresh(&mut self, mut progress: impl FnMut(f64, f64, f64, f64) -> i32) {
        for repo in &mut self.repos {
            if !repo.enabled {
                continue;
            }

            match fetching::fetch_index(&repo.url, &mut progress) {
                Ok(index) => {
                    info!("Loaded {} ({} packages)", repo.name, index.packages.len());
                    repo.index = index;
                    repo.loaded = true;
                }
                Err(err) => {
                    warn!("Couldn't load {}: {err}", repo.url);
                    repo.loaded = false;
                }
            }
        }
    }

    // The synthetic repo is backed by on-device state, so it is born loaded.
    pub fn add_local_repo(&mut self) {
        self.repos.push(Repo {
            name: LOCAL_REPO_NAME.to_string(),
            url: LOCAL_REPO_URL.to_string(),
            enabled: true,
            loaded: true,
            index: RepoIndex::default(),
        });
    }
}

fn default_entries(default_repo_url: &str) -> Vec<RepoEntry> {
    vec![RepoEntry {
        name: "Default Repo".to_string(),
        url: default_repo_url.to_string(),
        enabled: true,
    }]
}

fn persist(path: &Path, entries: &[RepoEntry]) {
    let file = RepoFile {
        repos: entries.to_vec(),
    };
    match serde_json::to_string_pretty(&file) {
        Ok(json) => {
            if let Err(err) = fs::write(path, json) {
                warn!("Couldn't write {}: {err}", path.display());
            }
        }
        Err(err) => warn!("Couldn't serialize repo list: {err}"),
    }
}
