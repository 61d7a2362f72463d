use std::{
    env, io,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Result};

const APPLICATION_DIR_NAME: &str = "lifeprogress";

/// Resolves the application directory, creating it if needed. An explicit directory always wins
/// over the platform default.
pub fn resolve_application_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
    match explicit {
        Some(path) => ensure_dir(path),
        None => create_application_default_path(),
    }
}

pub fn create_application_default_path() -> Result<PathBuf> {
    let path = {
        #[cfg(windows)]
        {
            let mut path = PathBuf::from(
                env::var("APPDATA").map_err(|_| anyhow!("APPDATA should be present on Windows"))?,
            );
            path.push(APPLICATION_DIR_NAME);
            path
        }
        #[cfg(not(windows))]
        {
            let mut path = env::var("XDG_STATE_HOME")
                .map(PathBuf::from)
                .or_else(|_| {
                    env::var("HOME").map(|home| {
                        let mut path = PathBuf::from(home);
                        path.push(".local/state");
                        path
                    })
                })
                .map_err(|_| anyhow!("Couldn't find neither XDG_STATE_HOME nor HOME"))?;
            path.push(APPLICATION_DIR_NAME);
            path
        }
    };

    ensure_dir(path)
}

fn ensure_dir(path: PathBuf) -> Result<PathBuf> {
    match std::fs::create_dir_all(&path) {
        Ok(_) => Ok(path),
        Err(v) if v.kind() == io::ErrorKind::AlreadyExists => Ok(path),
        Err(v) => Err(v.into()),
    }
}

pub fn logs_dir(application_path: &Path) -> PathBuf {
    application_path.join("logs")
}
