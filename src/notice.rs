//! Informational dialogs shown by features that need a backend.
//!
//! None of these trigger any real work; picking an action only logs it.

use crate::i18n::Translate;
use crate::models::CallType;

/// How an action button is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionStyle {
    Default,
    Cancel,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeAction {
    pub label: String,
    pub style: ActionStyle,
}

impl NoticeAction {
    fn new(label: String) -> Self {
        Self {
            label,
            style: ActionStyle::Default,
        }
    }

    fn cancel(label: String) -> Self {
        Self {
            label,
            style: ActionStyle::Cancel,
        }
    }

    fn destructive(label: String) -> Self {
        Self {
            label,
            style: ActionStyle::Destructive,
        }
    }
}

/// A modal message with one or more buttons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub body: String,
    pub actions: Vec<NoticeAction>,
}

impl Notice {
    fn ok(tr: &dyn Translate, title: String, body: String) -> Self {
        Self {
            title,
            body,
            actions: vec![NoticeAction::new(tr.t("chat.ok"))],
        }
    }

    /// Audio/video button in the chat header.
    pub fn chat_call(tr: &dyn Translate, call_type: CallType) -> Self {
        let (title_key, type_key) = match call_type {
            CallType::Audio => ("chat.audioCall", "chat.audioType"),
            CallType::Video => ("chat.videoCall", "chat.videoType"),
        };
        let kind = tr.t(type_key);
        Self::ok(
            tr,
            tr.t(title_key),
            tr.translate("chat.callFeatureMessage", &[("type", kind.as_str())]),
        )
    }

    /// Calling back an entry of the call history.
    pub fn history_call(tr: &dyn Translate, name: &str, call_type: CallType) -> Self {
        let title_key = if call_type.is_video() {
            "calls.videoTitle"
        } else {
            "calls.audioTitle"
        };
        Self::ok(
            tr,
            tr.t(title_key),
            tr.translate("calls.featureMessage", &[("name", name)]),
        )
    }

    /// Attachment picker in the chat compose bar.
    pub fn attachment(tr: &dyn Translate) -> Self {
        Self {
            title: tr.t("chat.shareFile"),
            body: tr.t("chat.chooseFileType"),
            actions: vec![
                NoticeAction::new(tr.t("chat.photo")),
                NoticeAction::new(tr.t("chat.file")),
                NoticeAction::new(tr.t("chat.audio")),
                NoticeAction::cancel(tr.t("chat.cancel")),
            ],
        }
    }

    pub fn add_contact(tr: &dyn Translate) -> Self {
        Self {
            title: tr.t("contacts.addTitle"),
            body: tr.t("contacts.addMessage"),
            actions: vec![
                NoticeAction::cancel(tr.t("contacts.cancel")),
                NoticeAction::new(tr.t("contacts.add")),
            ],
        }
    }

    /// Action sheet for a selected contact.
    pub fn contact_actions(tr: &dyn Translate, name: &str) -> Self {
        Self {
            title: name.to_string(),
            body: tr.t("contacts.actionsMessage"),
            actions: vec![
                NoticeAction::new(tr.t("contacts.sendMessage")),
                NoticeAction::new(tr.t("contacts.call")),
                NoticeAction::new(tr.t("contacts.viewProfile")),
                NoticeAction::cancel(tr.t("contacts.cancel")),
            ],
        }
    }

    pub fn edit_profile(tr: &dyn Translate) -> Self {
        Self::ok(tr, tr.t("settings.editProfile"), tr.t("settings.comingSoon"))
    }

    pub fn sounds(tr: &dyn Translate) -> Self {
        Self::ok(
            tr,
            tr.t("settings.items.sounds"),
            tr.t("settings.items.soundsMessage"),
        )
    }

    pub fn server_config(tr: &dyn Translate) -> Self {
        Self::ok(
            tr,
            tr.t("settings.items.serverConfig"),
            tr.t("settings.items.serverConfigMessage"),
        )
    }

    pub fn invite_link(tr: &dyn Translate) -> Self {
        Self::ok(
            tr,
            tr.t("settings.items.inviteLink"),
            tr.t("settings.items.inviteLinkMessage"),
        )
    }

    pub fn about(tr: &dyn Translate) -> Self {
        let version = tr.t("app.version");
        Self::ok(
            tr,
            tr.t("settings.items.about"),
            tr.translate("settings.items.aboutMessage", &[("version", version.as_str())]),
        )
    }

    pub fn terms(tr: &dyn Translate) -> Self {
        Self::ok(
            tr,
            tr.t("settings.items.termsTitle"),
            tr.t("settings.items.terms"),
        )
    }

    pub fn privacy(tr: &dyn Translate) -> Self {
        Self::ok(
            tr,
            tr.t("settings.items.privacyTitle"),
            tr.t("settings.items.privacy"),
        )
    }

    pub fn logout(tr: &dyn Translate) -> Self {
        Self {
            title: tr.t("settings.items.logout"),
            body: tr.t("settings.items.logoutMessage"),
            actions: vec![
                NoticeAction::cancel(tr.t("settings.cancel")),
                NoticeAction::destructive(tr.t("settings.items.logout")),
            ],
        }
    }

    /// Pick a button. Only logged: there is nothing behind these features.
    pub fn activate(&self, index: usize) -> Option<&NoticeAction> {
        let action = self.actions.get(index)?;
        match action.style {
            ActionStyle::Cancel => tracing::debug!("'{}' dismissed", self.title),
            _ => tracing::info!("'{}' selected in '{}'", action.label, self.title),
        }
        Some(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::testing::KeyEcho;
    use crate::i18n::Catalog;

    #[test]
    fn test_chat_call_uses_type_param() {
        let n = Notice::chat_call(&KeyEcho, CallType::Video);
        assert_eq!(n.title, "chat.videoCall");
        assert_eq!(n.body, "chat.callFeatureMessage type=chat.videoType");
        assert_eq!(n.actions.len(), 1);
    }

    #[test]
    fn test_chat_call_french() {
        let fr = Catalog::builtin("fr").unwrap();
        let n = Notice::chat_call(&fr, CallType::Audio);
        assert_eq!(n.title, "Appel audio");
        assert!(n.body.contains("L'appel audio"));
        assert_eq!(n.actions[0].label, "OK");
    }

    #[test]
    fn test_history_call_names_peer() {
        let fr = Catalog::builtin("fr").unwrap();
        let n = Notice::history_call(&fr, "Bob Dupont", CallType::Audio);
        assert!(n.body.starts_with("Appeler Bob Dupont..."));
        assert!(n.body.contains("WebRTC"));
    }

    #[test]
    fn test_attachment_has_cancel_last() {
        let n = Notice::attachment(&KeyEcho);
        assert_eq!(n.actions.len(), 4);
        assert_eq!(n.actions[3].style, ActionStyle::Cancel);
    }

    #[test]
    fn test_contact_actions_title_is_name() {
        let n = Notice::contact_actions(&KeyEcho, "Emma Bernard");
        assert_eq!(n.title, "Emma Bernard");
        assert_eq!(n.actions[0].label, "contacts.sendMessage");
    }

    #[test]
    fn test_about_includes_version() {
        let en = Catalog::builtin("en").unwrap();
        let n = Notice::about(&en);
        assert!(n.body.starts_with("FortressTalk v1.0.0"));
    }

    #[test]
    fn test_logout_is_destructive() {
        let n = Notice::logout(&KeyEcho);
        assert_eq!(n.actions[1].style, ActionStyle::Destructive);
    }

    #[test]
    fn test_activate_out_of_range() {
        let n = Notice::edit_profile(&KeyEcho);
        assert!(n.activate(0).is_some());
        assert!(n.activate(1).is_none());
    }
}
