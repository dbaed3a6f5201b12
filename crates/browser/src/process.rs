//! Local browser process with remote debugging enabled.

use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
    process::Stdio,
    time::Duration,
};

use {
    async_trait::async_trait,
    sysinfo::{ProcessesToUpdate, System},
    tokio::sync::Mutex,
    tracing::{debug, info, warn},
    webpilot_config::BrowserConfig,
    webpilot_service_traits::{BrowserProcess, ServiceResult},
};

use crate::{detect, error::BrowserError};

/// Lock files a Chromium profile leaves behind after an unclean exit.
const LOCK_FILES: &[&str] = &["LOCK", "SingletonLock", "SingletonCookie", "SingletonSocket"];

/// Launches and kills a Chromium-based browser on the local machine.
///
/// Calls to `start` and `stop` are serialized, so concurrent requests never
/// interleave a kill with a launch.
pub struct LocalBrowserProcess {
    config: BrowserConfig,
    executable: Option<PathBuf>,
    child: Mutex<Option<tokio::process::Child>>,
}

impl LocalBrowserProcess {
    /// Resolve the executable now; a missing browser only fails at `start`.
    pub fn new(config: BrowserConfig) -> Self {
        let executable = detect::detect_browser(config.chrome_path.as_deref()).map(|d| d.path);
        match executable {
            Some(ref path) => info!(path = %path.display(), "browser executable resolved"),
            None => warn!("no browser executable found; /start-chrome will fail"),
        }
        Self {
            config,
            executable,
            child: Mutex::new(None),
        }
    }

    fn profile_dir(&self) -> PathBuf {
        self.config
            .resolved_user_data_dir()
            .join(&self.config.profile_directory)
    }

    async fn launch(&self, slot: &mut Option<tokio::process::Child>) -> Result<(), BrowserError> {
        let exe = self
            .executable
            .as_deref()
            .ok_or_else(|| BrowserError::BrowserNotAvailable(detect::install_hint()))?;

        let profile_dir = self.profile_dir();
        tokio::fs::create_dir_all(&profile_dir)
            .await
            .map_err(|e| BrowserError::LaunchFailed(format!("{}: {e}", profile_dir.display())))?;
        let removed = tokio::task::spawn_blocking(move || remove_stale_locks(&profile_dir))
            .await
            .map_err(|e| BrowserError::LaunchFailed(format!("lock cleanup: {e}")))?;
        if !removed.is_empty() {
            debug!(count = removed.len(), "removed stale profile locks");
        }

        let args = launch_args(&self.config, &self.config.resolved_user_data_dir());
        info!(
            path = %exe.display(),
            port = self.config.remote_debug_port,
            profile = %self.config.profile_directory,
            "launching browser"
        );
        let child = tokio::process::Command::new(exe)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| BrowserError::LaunchFailed(format!("{}: {e}", exe.display())))?;
        *slot = Some(child);

        tokio::time::sleep(Duration::from_millis(self.config.launch_settle_ms)).await;
        Ok(())
    }

    async fn terminate(&self, slot: &mut Option<tokio::process::Child>) -> Result<(), BrowserError> {
        let Some(exe) = self.executable.clone() else {
            // Nothing could have been launched.
            return Ok(());
        };

        let killed = tokio::task::spawn_blocking(move || kill_matching(&exe))
            .await
            .map_err(|e| BrowserError::StopFailed(format!("process scan: {e}")))?;
        if let Some(mut child) = slot.take() {
            if let Err(e) = child.start_kill() {
                debug!(error = %e, "launched browser already exited");
            }
            let _ = child.wait().await;
        }
        if killed > 0 {
            info!(killed, "browser processes terminated");
            tokio::time::sleep(Duration::from_millis(self.config.stop_settle_ms)).await;
        }
        Ok(())
    }
}

#[async_trait]
impl BrowserProcess for LocalBrowserProcess {
    async fn start(&self) -> ServiceResult {
        let mut slot = self.child.lock().await;
        self.terminate(&mut slot).await?;
        self.launch(&mut slot).await?;
        Ok(())
    }

    async fn stop(&self) -> ServiceResult {
        let mut slot = self.child.lock().await;
        self.terminate(&mut slot).await?;
        Ok(())
    }

    fn debug_port(&self) -> u16 {
        self.config.remote_debug_port
    }
}

/// Command-line arguments for a debuggable launch.
pub fn launch_args(config: &BrowserConfig, user_data_dir: &Path) -> Vec<String> {
    let mut args = vec![
        format!("--remote-debugging-port={}", config.remote_debug_port),
        format!("--user-data-dir={}", user_data_dir.display()),
        format!("--profile-directory={}", config.profile_directory),
        "--no-first-run".to_string(),
        "--no-default-browser-check".to_string(),
    ];
    args.extend(config.chrome_args.iter().cloned());
    args
}

/// Delete lock files left in `profile_dir`, returning what was removed.
///
/// `SingletonLock` is a dangling symlink on Linux, so presence is checked
/// without following links.
pub fn remove_stale_locks(profile_dir: &Path) -> Vec<PathBuf> {
    LOCK_FILES
        .iter()
        .map(|name| profile_dir.join(name))
        .filter(|path| path.symlink_metadata().is_ok())
        .filter(|path| match std::fs::remove_file(path) {
            Ok(()) => true,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not remove profile lock");
                false
            },
        })
        .collect()
}

/// Whether a running process is an instance of the browser at `target`.
fn is_instance(name: &OsStr, exe: Option<&Path>, target: &Path) -> bool {
    if exe.is_some_and(|exe| exe == target) {
        return true;
    }
    target.file_name().is_some_and(|file| file == name)
}

/// Kill every running instance of `exe`. Returns how many were signalled.
fn kill_matching(exe: &Path) -> usize {
    let mut system = System::new();
    system.refresh_processes(ProcessesToUpdate::All, true);
    let own_pid = sysinfo::get_current_pid().ok();

    system
        .processes()
        .iter()
        .filter(|(pid, _)| Some(**pid) != own_pid)
        .filter(|(_, process)| is_instance(process.name(), process.exe(), exe))
        .filter(|(pid, process)| {
            let killed = process.kill();
            if !killed {
                debug!(pid = pid.as_u32(), "kill signal not delivered");
            }
            killed
        })
        .count()
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> BrowserConfig {
        BrowserConfig {
            remote_debug_port: 9555,
            profile_directory: "Profile 2".into(),
            chrome_args: vec!["--window-size=1280,800".into()],
            ..Default::default()
        }
    }

    #[test]
    fn args_enable_remote_debugging() {
        let args = launch_args(&config(), Path::new("/tmp/wp-profile"));
        assert_eq!(args[0], "--remote-debugging-port=9555");
        assert_eq!(args[1], "--user-data-dir=/tmp/wp-profile");
        assert_eq!(args[2], "--profile-directory=Profile 2");
        assert!(args.contains(&"--no-first-run".to_string()));
        assert_eq!(args.last().unwrap(), "--window-size=1280,800");
    }

    #[test]
    fn stale_locks_are_removed() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("LOCK"), "").unwrap();
        std::fs::write(dir.path().join("SingletonLock"), "").unwrap();
        std::fs::write(dir.path().join("Preferences"), "{}").unwrap();

        let removed = remove_stale_locks(dir.path());
        assert_eq!(removed.len(), 2);
        assert!(!dir.path().join("LOCK").exists());
        assert!(!dir.path().join("SingletonLock").exists());
        assert!(dir.path().join("Preferences").exists());
    }

    #[cfg(unix)]
    #[test]
    fn dangling_singleton_symlink_is_removed() {
        let dir = tempfile::tempdir().unwrap();
        let link = dir.path().join("SingletonLock");
        std::os::unix::fs::symlink("host-12345", &link).unwrap();
        assert!(!link.exists());

        let removed = remove_stale_locks(dir.path());
        assert_eq!(removed, vec![link.clone()]);
        assert!(link.symlink_metadata().is_err());
    }

    #[test]
    fn clean_profile_is_untouched() {
        let dir = tempfile::tempdir().unwrap();
        assert!(remove_stale_locks(dir.path()).is_empty());
    }

    #[test]
    fn instance_matching() {
        let target = Path::new("/usr/bin/chromium");
        assert!(is_instance(OsStr::new("chromium"), None, target));
        assert!(is_instance(OsStr::new("other"), Some(target), target));
        assert!(!is_instance(OsStr::new("chromium-helper"), None, target));
        assert!(!is_instance(
            OsStr::new("firefox"),
            Some(Path::new("/usr/bin/firefox")),
            target
        ));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn failed_spawn_still_prepares_profile() {
        let dir = tempfile::tempdir().unwrap();
        let profile = dir.path().join("Profile 2");
        std::fs::create_dir_all(&profile).unwrap();
        std::fs::write(profile.join("SingletonCookie"), "").unwrap();

        let process = LocalBrowserProcess {
            config: BrowserConfig {
                user_data_dir: Some(dir.path().to_path_buf()),
                launch_settle_ms: 0,
                stop_settle_ms: 0,
                ..config()
            },
            executable: Some(dir.path().join("webpilot-missing-browser")),
            child: Mutex::new(None),
        };

        let err = process.start().await.unwrap_err();
        assert!(err.to_string().contains("browser launch failed"));
        assert!(!profile.join("SingletonCookie").exists());
        process.stop().await.unwrap();
    }

    #[tokio::test]
    async fn missing_browser_fails_start_but_not_stop() {
        let process = LocalBrowserProcess {
            config: config(),
            executable: None,
            child: Mutex::new(None),
        };
        assert_eq!(process.endpoint(), "http://127.0.0.1:9555");
        process.stop().await.unwrap();

        let err = process.start().await.unwrap_err();
        assert!(err.to_string().contains("No Chromium-based browser found"));
    }
}
