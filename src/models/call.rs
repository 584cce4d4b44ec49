//! Call history models

use super::Named;

/// Audio or video call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallType {
    Audio,
    Video,
}

impl CallType {
    pub fn is_video(&self) -> bool {
        matches!(self, CallType::Video)
    }
}

/// Call direction as shown in the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallDirection {
    Incoming,
    Outgoing,
    Missed,
}

impl CallDirection {
    /// ASCII marker drawn before the timestamp.
    pub fn marker(&self) -> &'static str {
        match self {
            CallDirection::Incoming => "<-",
            CallDirection::Outgoing => "->",
            CallDirection::Missed => "x ",
        }
    }
}

/// One entry of the calls tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRecord {
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub call_type: CallType,
    pub direction: CallDirection,
    pub timestamp: String,
    /// `None` for missed calls.
    pub duration: Option<String>,
}

impl Named for CallRecord {
    fn name(&self) -> &str {
        &self.name
    }
}
