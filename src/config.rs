//! Configuration constants, profile loading and path utilities for roster
//!
//! A profile file is an INI file with one section per profile:
//!
//! ```ini
//! [default]
//! base_url = https://reqres.in/api
//! api_key = reqres-free-v1
//! session_file = ~/.roster/session
//! timeout_secs = 10
//! ```

use anyhow::{Context, Result};
use ini::Ini;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default profile file path for roster
pub const DEFAULT_PROFILE_PATH: &str = "~/.roster/profile";

/// Environment variable name for overriding the profile path
pub const PROFILE_PATH_ENV_VAR: &str = "ROSTER_PROFILE_PATH";

/// Environment variable holding the log filter directives
pub const LOG_FILTER_ENV_VAR: &str = "ROSTER_LOG";

pub const DEFAULT_BASE_URL: &str = "https://reqres.in/api";
pub const DEFAULT_SESSION_PATH: &str = "~/.roster/session";
pub const DEFAULT_LOG_PATH: &str = "~/.roster/roster.log";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Get the profile file path, checking environment variable first, then falling back to default
pub fn get_profile_path() -> String {
    std::env::var_os(PROFILE_PATH_ENV_VAR)
        .and_then(|val| val.into_string().ok())
        .unwrap_or_else(|| DEFAULT_PROFILE_PATH.to_string())
}

/// Expand a leading `~` to the home directory
pub fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}

/// Connection and storage settings for one profile
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub base_url: String,
    pub api_key: Option<String>,
    pub session_file: PathBuf,
    pub timeout: Duration,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            session_file: expand_path(DEFAULT_SESSION_PATH),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Profiles stored in an INI file
pub struct IniProfileStore {
    path: PathBuf,
}

impl IniProfileStore {
    pub fn new(path: &str) -> Self {
        Self {
            path: expand_path(path),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read a profile section. Missing file or section yields `None`;
    /// keys absent from the section keep their defaults.
    pub fn get_profile(&self, name: &str) -> Result<Option<Profile>> {
        if !self.path.exists() {
            tracing::debug!("Profile file {} does not exist", self.path.display());
            return Ok(None);
        }

        let ini = Ini::load_from_file(&self.path)
            .with_context(|| format!("failed to read profile file {}", self.path.display()))?;
        let Some(section) = ini.section(Some(name)) else {
            return Ok(None);
        };

        let mut profile = Profile::default();
        if let Some(base_url) = section.get("base_url") {
            profile.base_url = base_url.trim().to_string();
        }
        if let Some(api_key) = section.get("api_key").map(str::trim) {
            profile.api_key = (!api_key.is_empty()).then(|| api_key.to_string());
        }
        if let Some(session_file) = section.get("session_file") {
            profile.session_file = expand_path(session_file.trim());
        }
        if let Some(timeout) = section.get("timeout_secs") {
            let secs: u64 = timeout
                .trim()
                .parse()
                .with_context(|| format!("invalid timeout_secs '{timeout}' in profile '{name}'"))?;
            profile.timeout = Duration::from_secs(secs);
        }
        Ok(Some(profile))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_profile(dir: &TempDir, content: &str) -> String {
        let path = dir.path().join("profile");
        fs::write(&path, content).unwrap();
        path.to_string_lossy().to_string()
    }

    #[test]
    fn test_default_profile_path() {
        assert_eq!(DEFAULT_PROFILE_PATH, "~/.roster/profile");
    }

    #[test]
    fn test_get_profile_path_env_override() {
        let original = std::env::var_os(PROFILE_PATH_ENV_VAR);

        std::env::remove_var(PROFILE_PATH_ENV_VAR);
        assert_eq!(get_profile_path(), DEFAULT_PROFILE_PATH);

        let test_path = "/custom/profile/path";
        std::env::set_var(PROFILE_PATH_ENV_VAR, test_path);
        assert_eq!(get_profile_path(), test_path);

        match original {
            Some(val) => std::env::set_var(PROFILE_PATH_ENV_VAR, val),
            None => std::env::remove_var(PROFILE_PATH_ENV_VAR),
        }
    }

    #[test]
    fn expand_path_should_leave_absolute_paths_alone() {
        assert_eq!(expand_path("/tmp/session"), PathBuf::from("/tmp/session"));
        assert!(!expand_path("~/x").to_string_lossy().starts_with('~'));
    }

    #[test]
    fn missing_file_should_yield_none() {
        let dir = TempDir::new().unwrap();
        let store = IniProfileStore::new(&dir.path().join("absent").to_string_lossy());
        assert_eq!(store.get_profile("default").unwrap(), None);
    }

    #[test]
    fn missing_section_should_yield_none() {
        let dir = TempDir::new().unwrap();
        let path = write_profile(&dir, "[staging]\nbase_url = http://localhost:3000\n");
        let store = IniProfileStore::new(&path);
        assert_eq!(store.get_profile("default").unwrap(), None);
    }

    #[test]
    fn profile_should_read_every_key() {
        let dir = TempDir::new().unwrap();
        let path = write_profile(
            &dir,
            "[default]\nbase_url = http://localhost:3000/api\napi_key = secret\nsession_file = /tmp/roster-session\ntimeout_secs = 3\n",
        );
        let profile = IniProfileStore::new(&path)
            .get_profile("default")
            .unwrap()
            .unwrap();

        assert_eq!(profile.base_url, "http://localhost:3000/api");
        assert_eq!(profile.api_key.as_deref(), Some("secret"));
        assert_eq!(profile.session_file, PathBuf::from("/tmp/roster-session"));
        assert_eq!(profile.timeout, Duration::from_secs(3));
    }

    #[test]
    fn absent_keys_should_keep_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_profile(&dir, "[default]\napi_key =\n");
        let profile = IniProfileStore::new(&path)
            .get_profile("default")
            .unwrap()
            .unwrap();

        assert_eq!(profile.base_url, DEFAULT_BASE_URL);
        assert_eq!(profile.api_key, None);
        assert_eq!(profile.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn bad_timeout_should_be_an_error() {
        let dir = TempDir::new().unwrap();
        let path = write_profile(&dir, "[default]\ntimeout_secs = soon\n");
        assert!(IniProfileStore::new(&path).get_profile("default").is_err());
    }
}
