//! Repository adapters for persistence layer

use std::path::PathBuf;

use challan_infra::persistence::FileSessionRepository;
use challan_types::Result;

/// Open the draft file repository for a session path (.json or .toml)
pub fn open_session_repo(path: PathBuf) -> Result<FileSessionRepository> {
    FileSessionRepository::new(path)
}
