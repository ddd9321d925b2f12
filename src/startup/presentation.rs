use crate::platform::Platform;
use crate::startup::probes::ProbeResult;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorAction {
    Quit,
    Ignore,
}

impl ErrorAction {
    pub fn label(self) -> &'static str {
        match self {
            ErrorAction::Quit => "Quit",
            ErrorAction::Ignore => "Ignore This",
        }
    }

    pub fn hint(self) -> &'static str {
        match self {
            ErrorAction::Quit => "Exit the app store",
            ErrorAction::Ignore => "Continue with only a local repo",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorPresentation {
    pub title: String,
    pub troubleshooting: String,
    pub actions: Vec<ErrorAction>,
}

// Maps a probe failure to the copy shown on the error screen.
pub fn describe(result: &ProbeResult, platform: Platform) -> Option<ErrorPresentation> {
    let actions = vec![ErrorAction::Quit, ErrorAction::Ignore];

    match result {
        ProbeResult::Ok => None,
        ProbeResult::NetworkUnreachable { first_repo_url } => Some(ErrorPresentation {
            title: "Couldn't connect to the Internet!".to_string(),
            troubleshooting: format!(
                "Perform a connection test in the {} System Settings\nEnsure DNS isn't blocking: {}",
                platform.name(),
                first_repo_url
            ),
            actions,
        }),
        ProbeResult::NoEnabledRepos => Some(ErrorPresentation {
            title: "Couldn't connect to a server!".to_string(),
            troubleshooting: "No enabled repos found, check ./get/repos.json\nMake sure repo has at least one package"
                .to_string(),
            actions,
        }),
        ProbeResult::StorageWriteFailed { path } => {
            let mut card_text = format!("Ensure {} is writable", path.display());
            match platform {
                Platform::WiiU => {
                    card_text = format!("Check the physical SD write lock slider\n{card_text}");
                }
                Platform::Switch => {
                    card_text =
                        format!("Check for EXFAT FS corruption (no issues on FAT32)\n{card_text}");
                }
                Platform::ThreeDs => {}
            }

            Some(ErrorPresentation {
                title: "Cannot access SD card!".to_string(),
                troubleshooting: card_text,
                actions,
            })
        }
    }
}
