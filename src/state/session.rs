/// Session token storage
///
/// Holds the opaque bearer token handed out by the login/register
/// endpoints. The token lives in a single file in the platform data
/// directory so it survives an application restart; absence of the file
/// means anonymous browsing. No expiry is tracked here: a stale token is
/// indistinguishable from a valid one until a request fails with 401.

use log::warn;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Shared handle over the current session token.
///
/// Clones share one underlying slot, so a token stored by the login flow
/// is immediately visible to the API client holding its own clone. The
/// backing file path is injectable for tests.
#[derive(Debug, Clone)]
pub struct Session {
    slot: Arc<Mutex<Option<String>>>,
    path: PathBuf,
}

impl Session {
    /// Open the session backed by the default token file, reading any
    /// token a previous run left behind.
    pub fn load_or_default() -> Self {
        Self::at_path(default_token_path())
    }

    /// Open a session backed by an explicit token file.
    pub fn at_path(path: PathBuf) -> Self {
        let token = match std::fs::read_to_string(&path) {
            Ok(contents) => {
                let token = contents.trim().to_owned();
                if token.is_empty() {
                    None
                } else {
                    Some(token)
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                warn!("could not read token file {}: {}", path.display(), e);
                None
            }
        };

        Session {
            slot: Arc::new(Mutex::new(token)),
            path,
        }
    }

    /// The current token, if any. Read by the API client immediately
    /// before every dispatch.
    pub fn token(&self) -> Option<String> {
        self.slot.lock().expect("session slot poisoned").clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Store a freshly issued token and write it through to disk.
    ///
    /// A write failure only costs persistence across restarts, so it is
    /// logged rather than surfaced.
    pub fn set_token(&self, token: &str) {
        *self.slot.lock().expect("session slot poisoned") = Some(token.to_owned());

        if let Some(parent) = self.path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                warn!("could not create {}: {}", parent.display(), e);
                return;
            }
        }
        if let Err(e) = std::fs::write(&self.path, token) {
            warn!("could not persist token to {}: {}", self.path.display(), e);
        }
    }

    /// Forget the token and remove the backing file. Logging out.
    pub fn clear(&self) {
        *self.slot.lock().expect("session slot poisoned") = None;

        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!("could not remove token file {}: {}", self.path.display(), e),
        }
    }
}

/// Where the token file lives:
/// - Linux: ~/.local/share/kittyfind/token
/// - macOS: ~/Library/Application Support/kittyfind/token
/// - Windows: %APPDATA%\kittyfind\token
fn default_token_path() -> PathBuf {
    let mut path = dirs::data_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."));

    path.push("kittyfind");
    path.push("token");
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_session(dir: &tempfile::TempDir) -> Session {
        Session::at_path(dir.path().join("token"))
    }

    #[test]
    fn test_absent_file_means_anonymous() {
        let dir = tempfile::tempdir().unwrap();
        let session = temp_session(&dir);
        assert_eq!(session.token(), None);
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_token_survives_a_reload() {
        let dir = tempfile::tempdir().unwrap();
        temp_session(&dir).set_token("tok-123");

        // A fresh handle over the same path sees the stored token
        let reloaded = temp_session(&dir);
        assert_eq!(reloaded.token().as_deref(), Some("tok-123"));
    }

    #[test]
    fn test_clear_removes_the_token_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let session = temp_session(&dir);
        session.set_token("tok-123");
        session.clear();

        assert_eq!(session.token(), None);
        assert_eq!(temp_session(&dir).token(), None);
    }

    #[test]
    fn test_clones_share_one_slot() {
        let dir = tempfile::tempdir().unwrap();
        let session = temp_session(&dir);
        let clone = session.clone();

        session.set_token("tok-456");
        assert_eq!(clone.token().as_deref(), Some("tok-456"));

        clone.clear();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_whitespace_only_file_is_anonymous() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("token"), "  \n").unwrap();
        assert_eq!(temp_session(&dir).token(), None);
    }
}
