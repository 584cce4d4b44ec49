//! Discussion list entries

use super::Named;

/// One row of the discussions tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    pub id: String,
    pub name: String,
    pub last_message: String,
    /// Display label, already relative ("10:30", "Hier", "Lundi").
    pub timestamp: String,
    pub unread_count: u32,
    pub avatar: String,
    pub is_online: bool,
    pub is_group: bool,
}

impl Named for Conversation {
    fn name(&self) -> &str {
        &self.name
    }
}
