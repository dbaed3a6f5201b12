//! Locating a Chromium-based browser binary.

use std::path::{Path, PathBuf};

/// Executable names looked up on `PATH`. Any of these speaks CDP.
const PATH_NAMES: &[&str] = &[
    "google-chrome",
    "google-chrome-stable",
    "chrome",
    "chromium",
    "chromium-browser",
    "brave-browser",
    "brave",
    "microsoft-edge",
    "microsoft-edge-stable",
    "msedge",
    "vivaldi",
];

/// Install locations that do not show up on `PATH`. Checked before `PATH`
/// since package-manager wrappers there are sometimes broken.
#[cfg(target_os = "macos")]
const INSTALL_PATHS: &[&str] = &[
    "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
    "/Applications/Brave Browser.app/Contents/MacOS/Brave Browser",
    "/Applications/Chromium.app/Contents/MacOS/Chromium",
    "/Applications/Microsoft Edge.app/Contents/MacOS/Microsoft Edge",
];

#[cfg(target_os = "windows")]
const INSTALL_PATHS: &[&str] = &[
    r"C:\Program Files\Google\Chrome\Application\chrome.exe",
    r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
    r"C:\Program Files\BraveSoftware\Brave-Browser\Application\brave.exe",
    r"C:\Program Files (x86)\Microsoft\Edge\Application\msedge.exe",
];

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const INSTALL_PATHS: &[&str] = &[];

/// Where a detected binary came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Config,
    EnvVar,
    InstallPath,
    SearchPath,
}

#[derive(Debug, Clone)]
pub struct Detected {
    pub path: PathBuf,
    pub source: Source,
}

/// Find a browser binary. Order: configured path, `CHROME` env var, platform
/// install locations, then [`PATH_NAMES`] on `PATH`.
pub fn detect_browser(configured: Option<&str>) -> Option<Detected> {
    detect_with(configured, std::env::var("CHROME").ok().as_deref())
}

fn detect_with(configured: Option<&str>, env_override: Option<&str>) -> Option<Detected> {
    let explicit = [(configured, Source::Config), (env_override, Source::EnvVar)];
    for (candidate, source) in explicit {
        if let Some(path) = candidate.map(PathBuf::from).filter(|p| p.is_file()) {
            return Some(Detected { path, source });
        }
    }

    if let Some(path) = INSTALL_PATHS.iter().map(Path::new).find(|p| p.is_file()) {
        return Some(Detected {
            path: path.to_path_buf(),
            source: Source::InstallPath,
        });
    }

    PATH_NAMES
        .iter()
        .find_map(|name| which::which(name).ok())
        .map(|path| Detected {
            path,
            source: Source::SearchPath,
        })
}

/// Message shown when no browser could be found.
pub fn install_hint() -> String {
    let install = if cfg!(target_os = "macos") {
        "  brew install --cask google-chrome   (or brave-browser, chromium)"
    } else if cfg!(target_os = "windows") {
        "  winget install Google.Chrome   (or Brave.Brave, Microsoft.Edge)"
    } else if cfg!(target_os = "linux") {
        "  Debian/Ubuntu: sudo apt install chromium-browser\n  \
         Fedora:        sudo dnf install chromium\n  \
         Arch:          sudo pacman -S chromium"
    } else {
        "  Download from https://www.google.com/chrome/"
    };

    format!(
        "No Chromium-based browser found. Install one:\n\n{install}\n\n\
         Or point webpilot at an existing binary:\n  \
         [browser]\n  \
         chrome_path = \"/path/to/browser\"\n\n\
         Or set the CHROME environment variable."
    )
}
