use std::fs::{self, File};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::repo::RepoStatus;

pub const WRITE_TEST_FILE: &str = "write_test.txt";

const MAGIC: &str =
    "Whosoever holds this hammer, if they be worthy, shall possess the power of Thor.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProbeResult {
    Ok,
    NetworkUnreachable { first_repo_url: String },
    NoEnabledRepos,
    StorageWriteFailed { path: PathBuf },
}

// Reachability is judged from the repository handles alone: any repo that
// failed to load flags the network, and the unreachable verdict is checked
// first even though both facts are collected over the whole set.
pub fn network_probe<R: RepoStatus>(repos: &[R]) -> ProbeResult {
    let mut has_error = false;
    let mut at_least_one_enabled = false;

    for repo in repos {
        has_error = has_error || !repo.is_loaded();
        at_least_one_enabled = at_least_one_enabled || repo.is_enabled();
    }

    if has_error {
        return ProbeResult::NetworkUnreachable {
            first_repo_url: repos[0].url().to_string(),
        };
    }

    if !at_least_one_enabled {
        return ProbeResult::NoEnabledRepos;
    }

    ProbeResult::Ok
}

// SD card write test: round-trip a known payload through a file in the
// client's tmp directory and make sure it comes back byte-for-byte.
pub fn storage_probe(tmp_dir: &Path) -> ProbeResult {
    let tmp_file = tmp_dir.join(WRITE_TEST_FILE);

    let mut write_failed = false;

    // try to write to the file (truncate, not append)
    match File::create(&tmp_file) {
        Ok(mut file) => {
            if file.write_all(MAGIC.as_bytes()).is_err() {
                write_failed = true;
            }
        }
        Err(_) => write_failed = true,
    }

    // try to read it back
    if !write_failed {
        match File::open(&tmp_file) {
            Ok(file) => {
                let mut line = String::new();
                if BufReader::new(file).read_line(&mut line).is_err() || line != MAGIC {
                    write_failed = true;
                }

                // cleanup is best-effort, a leftover file is not a failure
                let _ = fs::remove_file(&tmp_file);
            }
            Err(_) => write_failed = true,
        }
    }

    if write_failed {
        ProbeResult::StorageWriteFailed { path: tmp_file }
    } else {
        ProbeResult::Ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeRepo {
        loaded: bool,
        enabled: bool,
        url: &'static str,
    }

    impl RepoStatus for FakeRepo {
        fn is_loaded(&self) -> bool {
            self.loaded
        }

        fn is_enabled(&self) -> bool {
            self.enabled
        }

        fn url(&self) -> &str {
            self.url
        }
    }

    fn fake(loaded: bool, enabled: bool, url: &'static str) -> FakeRepo {
        FakeRepo {
            loaded,
            enabled,
            url,
        }
    }

    #[test]
    fn all_loaded_with_one_enabled_passes() {
        let repos = [fake(true, true, "http://a"), fake(true, false, "http://b")];
        assert_eq!(network_probe(&repos), ProbeResult::Ok);
    }

    #[test]
    fn any_unloaded_repo_is_unreachable() {
        let repos = [fake(true, true, "http://a"), fake(false, true, "http://b")];
        assert_eq!(
            network_probe(&repos),
            ProbeResult::NetworkUnreachable {
                first_repo_url: "http://a".to_string()
            }
        );
    }

    #[test]
    fn unreachable_carries_the_first_repo_url() {
        let repos = [fake(false, true, "http://a")];
        match network_probe(&repos) {
            ProbeResult::NetworkUnreachable { first_repo_url } => {
                assert_eq!(first_repo_url, "http://a");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn unreachable_wins_over_no_enabled_repos() {
        let repos = [fake(false, false, "http://a")];
        assert!(matches!(
            network_probe(&repos),
            ProbeResult::NetworkUnreachable { .. }
        ));
    }

    #[test]
    fn all_disabled_reports_no_enabled_repos() {
        let repos = [fake(true, false, "http://a"), fake(true, false, "http://b")];
        assert_eq!(network_probe(&repos), ProbeResult::NoEnabledRepos);
    }

    #[test]
    fn empty_repo_set_reports_no_enabled_repos() {
        let repos: [FakeRepo; 0] = [];
        assert_eq!(network_probe(&repos), ProbeResult::NoEnabledRepos);
    }

    #[test]
    fn round_trip_passes_and_cleans_up() {
        let dir = tempfile::tempdir().unwrap();

        assert_eq!(storage_probe(dir.path()), ProbeResult::Ok);
        assert!(!dir.path().join(WRITE_TEST_FILE).exists());
    }

    #[test]
    fn missing_directory_fails_the_probe() {
        let dir = tempfile::tempdir().unwrap();
        let gone = dir.path().join("missing");

        assert_eq!(
            storage_probe(&gone),
            ProbeResult::StorageWriteFailed {
                path: gone.join(WRITE_TEST_FILE)
            }
        );
    }

    #[test]
    fn unopenable_test_file_fails_the_probe() {
        let dir = tempfile::tempdir().unwrap();
        // a directory squatting on the file name makes the open fail
        fs::create_dir(dir.path().join(WRITE_TEST_FILE)).unwrap();

        assert!(matches!(
            storage_probe(dir.path()),
            ProbeResult::StorageWriteFailed { .. }
        ));
    }
}
