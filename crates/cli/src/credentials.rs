//! Local storage for the API key.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Name of the credential file inside the home directory.
pub const CREDENTIALS_FILE: &str = ".ipdata";

/// A text file holding the API key on its first non-empty line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The store at `~/.ipdata` for the given home directory.
    pub fn in_home(home: impl AsRef<Path>) -> Self {
        Self::new(home.as_ref().join(CREDENTIALS_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored key. A missing file means no key.
    pub fn load(&self) -> Result<Option<String>> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(self.error(source)),
        };

        Ok(contents
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(str::to_string))
    }

    /// Stores `api_key`, replacing any previous key.
    pub fn save(&self, api_key: &str) -> Result<()> {
        std::fs::write(&self.path, format!("{api_key}\n")).map_err(|source| self.error(source))
    }

    fn error(&self, source: std::io::Error) -> Error {
        Error::Credentials {
            path: self.path.clone(),
            source,
        }
    }
}
