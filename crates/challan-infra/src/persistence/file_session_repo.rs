//! File-based implementation of SessionDraftRepository
//!
//! A draft is one loading session stored as JSON (the form payload shape) or
//! TOML, chosen by file extension.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use tracing::debug;

use challan_domain::model::LoadingSession;
use challan_domain::repository::SessionDraftRepository;
use challan_types::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftFormat {
    Json,
    Toml,
}

impl DraftFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("json") => Ok(DraftFormat::Json),
            Some("toml") => Ok(DraftFormat::Toml),
            _ => Err(Error::UnsupportedFormat(format!(
                "{} (expected .json or .toml)",
                path.display()
            ))),
        }
    }
}

/// Session draft stored in a single file
pub struct FileSessionRepository {
    path: PathBuf,
    format: DraftFormat,
}

impl FileSessionRepository {
    /// Create a repository for a draft path; the file need not exist yet
    pub fn new(path: PathBuf) -> Result<Self> {
        let format = DraftFormat::from_path(&path)?;
        Ok(Self { path, format })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> DraftFormat {
        self.format
    }
}

impl SessionDraftRepository for FileSessionRepository {
    fn load(&self) -> Result<LoadingSession> {
        if !self.path.exists() {
            return Err(Error::FileNotFound(self.path.display().to_string()));
        }
        let session = match self.format {
            DraftFormat::Json => {
                let reader = BufReader::new(File::open(&self.path)?);
                serde_json::from_reader(reader)?
            }
            DraftFormat::Toml => {
                let content = fs::read_to_string(&self.path)?;
                toml::from_str(&content)?
            }
        };
        debug!(path = %self.path.display(), "session draft loaded");
        Ok(session)
    }

    fn save(&self, session: &LoadingSession) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        match self.format {
            DraftFormat::Json => {
                let writer = BufWriter::new(File::create(&self.path)?);
                serde_json::to_writer_pretty(writer, session)?;
            }
            DraftFormat::Toml => {
                let content = toml::to_string_pretty(session)?;
                fs::write(&self.path, content)?;
            }
        }
        debug!(path = %self.path.display(), "session draft saved");
        Ok(())
    }

    fn exists(&self) -> bool {
        self.path.exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use challan_domain::model::{ItemField, ItemKind, LoadingType};
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn sample() -> LoadingSession {
        let mut s = LoadingSession::new("Ranala", NaiveDate::from_ymd_opt(2026, 1, 25).unwrap());
        s.header.challan_no = "CH-002".to_string();
        s.header.vehicle_in = NaiveDate::from_ymd_opt(2026, 1, 25).and_then(|d| d.and_hms_opt(8, 15, 0));
        s.set_loading_type(LoadingType::Grade);
        s.update_item(ItemKind::Grade, 0, ItemField::Grade, "C");
        s.update_item(ItemKind::Grade, 0, ItemField::Kgs, "12.5");
        s.update_item(ItemKind::Poly, 0, ItemField::Name, "Outer, \"big\"");
        s
    }

    #[test]
    fn test_json_draft_roundtrip() {
        let dir = tempdir().unwrap();
        let repo = FileSessionRepository::new(dir.path().join("drafts").join("s.json")).unwrap();
        assert!(!repo.exists());
        repo.save(&sample()).unwrap();
        assert!(repo.exists());
        assert_eq!(repo.load().unwrap(), sample());
    }

    #[test]
    fn test_toml_draft_roundtrip() {
        let dir = tempdir().unwrap();
        let repo = FileSessionRepository::new(dir.path().join("s.toml")).unwrap();
        repo.save(&sample()).unwrap();
        assert_eq!(repo.load().unwrap(), sample());
    }

    #[test]
    fn test_unknown_extension_rejected() {
        assert!(matches!(
            FileSessionRepository::new(PathBuf::from("draft.yaml")),
            Err(Error::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let repo = FileSessionRepository::new(dir.path().join("none.json")).unwrap();
        assert!(matches!(repo.load(), Err(Error::FileNotFound(_))));
    }
}
