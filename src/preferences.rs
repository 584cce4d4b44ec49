//! Settings toggles. Kept in memory only.

use serde::Deserialize;

/// A toggleable setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preference {
    DarkMode,
    Notifications,
    E2ee,
    BiometricAuth,
    AutoDelete,
}

impl Preference {
    pub const ALL: [Preference; 5] = [
        Preference::DarkMode,
        Preference::Notifications,
        Preference::E2ee,
        Preference::BiometricAuth,
        Preference::AutoDelete,
    ];

    /// Feature name used in log lines.
    pub fn feature(&self) -> &'static str {
        match self {
            Preference::DarkMode => "Dark mode",
            Preference::Notifications => "Notifications",
            Preference::E2ee => "E2EE",
            Preference::BiometricAuth => "Biometric auth",
            Preference::AutoDelete => "Auto-delete",
        }
    }

    /// Translation key prefix under `settings.items`.
    pub fn key(&self) -> &'static str {
        match self {
            Preference::DarkMode => "darkMode",
            Preference::Notifications => "notifications",
            Preference::E2ee => "e2ee",
            Preference::BiometricAuth => "biometric",
            Preference::AutoDelete => "autoDelete",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub dark_mode: bool,
    pub notifications: bool,
    pub e2ee: bool,
    pub biometric_auth: bool,
    pub auto_delete: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            dark_mode: true,
            notifications: true,
            e2ee: true,
            biometric_auth: false,
            auto_delete: false,
        }
    }
}

impl Preferences {
    pub fn get(&self, pref: Preference) -> bool {
        match pref {
            Preference::DarkMode => self.dark_mode,
            Preference::Notifications => self.notifications,
            Preference::E2ee => self.e2ee,
            Preference::BiometricAuth => self.biometric_auth,
            Preference::AutoDelete => self.auto_delete,
        }
    }

    fn slot(&mut self, pref: Preference) -> &mut bool {
        match pref {
            Preference::DarkMode => &mut self.dark_mode,
            Preference::Notifications => &mut self.notifications,
            Preference::E2ee => &mut self.e2ee,
            Preference::BiometricAuth => &mut self.biometric_auth,
            Preference::AutoDelete => &mut self.auto_delete,
        }
    }

    /// Flip a toggle and return its new value.
    pub fn toggle(&mut self, pref: Preference) -> bool {
        let slot = self.slot(pref);
        *slot = !*slot;
        let value = *slot;
        tracing::info!("{} toggled: {}", pref.feature(), value);
        value
    }
}
