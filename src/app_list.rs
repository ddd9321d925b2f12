use crate::repo::RepoClient;

// (label, category tag in the package index); an empty tag means no filter
pub const CATEGORIES: [(&str, &str); 6] = [
    ("All Apps", ""),
    ("Games", "game"),
    ("Emulators", "emu"),
    ("Tools", "tool"),
    ("Advanced", "advanced"),
    ("Themes", "theme"),
];

pub const CONTROLLER_HINTS: [&str; 4] = ["A Select", "B Back", "X Search", "Y Sort"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppRow {
    pub title: String,
    pub version: String,
    pub category: String,
    pub repo: String,
}

#[derive(Clone, Debug, Default)]
pub struct Sidebar {
    pub hints: Vec<&'static str>,
}

impl Sidebar {
    pub fn add_hints(&mut self) {
        self.hints = CONTROLLER_HINTS.to_vec();
    }
}

// Flat view over the packages of every loaded, enabled repository, filtered
// by the sidebar's selected category.
#[derive(Clone, Debug)]
pub struct AppList {
    pub sidebar: Sidebar,
    pub selected_category: usize,
    rows: Vec<AppRow>,
}

impl AppList {
    pub fn new() -> AppList {
        AppList {
            sidebar: Sidebar::default(),
            selected_category: 0,
            rows: Vec::new(),
        }
    }

    pub fn rows(&self) -> &[AppRow] {
        &self.rows
    }

    pub fn update(&mut self, client: &RepoClient) {
        let (_label, tag) = CATEGORIES[self.selected_category];

        self.rows.clear();
        for repo in client.repos() {
            if !repo.enabled || !repo.loaded {
                continue;
            }

            for package in &repo.index.packages {
                if !tag.is_empty() && !package.category.eq_ignore_ascii_case(tag) {
                    continue;
                }

                let title = if package.title.is_empty() {
                    package.name.clone()
                } else {
                    package.title.clone()
                };

                self.rows.push(AppRow {
                    title,
                    version: package.version.clone(),
                    category: package.category.clone(),
                    repo: repo.name.clone(),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::{Package, Repo, RepoIndex};
    use std::path::Path;

    fn package(name: &str, title: &str, category: &str) -> Package {
        Package {
            name: name.to_string(),
            title: title.to_string(),
            version: "1.0".to_string(),
            category: category.to_string(),
        }
    }

    fn repo(name: &str, loaded: bool, enabled: bool, packages: Vec<Package>) -> Repo {
        Repo {
            name: name.to_string(),
            url: format!("http://{name}"),
            enabled,
            loaded,
            index: RepoIndex { packages },
        }
    }

    fn client(repos: Vec<Repo>) -> RepoClient {
        RepoClient::from_parts(Path::new("."), repos)
    }

    #[test]
    fn update_collects_packages_from_loaded_enabled_repos() {
        let client = client(vec![
            repo("main", true, true, vec![package("a", "App A", "tool")]),
            repo("extra", true, true, vec![package("b", "App B", "game")]),
        ]);

        let mut list = AppList::new();
        list.update(&client);

        assert_eq!(list.rows().len(), 2);
        assert_eq!(list.rows()[0].title, "App A");
        assert_eq!(list.rows()[1].repo, "extra");
    }

    #[test]
    fn update_skips_disabled_and_unloaded_repos() {
        let client = client(vec![
            repo("off", true, false, vec![package("a", "App A", "tool")]),
            repo("down", false, true, vec![package("b", "App B", "tool")]),
        ]);

        let mut list = AppList::new();
        list.update(&client);

        assert!(list.rows().is_empty());
    }

    #[test]
    fn category_selection_filters_rows() {
        let client = client(vec![repo(
            "main",
            true,
            true,
            vec![
                package("a", "App A", "game"),
                package("b", "App B", "tool"),
            ],
        )]);

        let mut list = AppList::new();
        list.selected_category = 1; // Games
        list.update(&client);

        assert_eq!(list.rows().len(), 1);
        assert_eq!(list.rows()[0].title, "App A");
    }

    #[test]
    fn untitled_packages_fall_back_to_their_name() {
        let client = client(vec![repo(
            "main",
            true,
            true,
            vec![package("vgedit", "", "tool")],
        )]);

        let mut list = AppList::new();
        list.update(&client);

        assert_eq!(list.rows()[0].title, "vgedit");
    }

    #[test]
    fn add_hints_fills_the_footer() {
        let mut sidebar = Sidebar::default();
        assert!(sidebar.hints.is_empty());

        sidebar.add_hints();
        assert_eq!(sidebar.hints, CONTROLLER_HINTS.to_vec());
    }
}
