//! Repository trait definitions for session drafts

use crate::model::LoadingSession;
use challan_types::Error;

/// Storage for a loading session being edited between form actions
pub trait SessionDraftRepository {
    /// Load the stored session
    fn load(&self) -> Result<LoadingSession, Error>;

    /// Replace the stored session
    fn save(&self, session: &LoadingSession) -> Result<(), Error>;

    /// Whether a draft has been stored yet
    fn exists(&self) -> bool;
}
