//! Contact models

use super::Named;

/// Contact presence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactStatus {
    Online,
    Offline,
    Away,
}

/// One entry of the contacts tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub status: ContactStatus,
    /// Display label ("En ligne", "Vu il y a 2h", ...).
    pub last_seen: String,
}

impl Named for Contact {
    fn name(&self) -> &str {
        &self.name
    }
}
