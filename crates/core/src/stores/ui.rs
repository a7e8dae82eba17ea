//! Navigation UI preferences.
//!
//! Only the sidebar flag outlives a visit. [`PersistedUiPreferences`] is the
//! serialize/deserialize boundary: it names exactly the fields that are
//! written to storage, and [`UiStore::hydrate`] is the only way back in.

use serde::{Deserialize, Serialize};

use super::Store;

/// The persisted subset of [`UiStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PersistedUiPreferences {
    pub sidebar_collapsed: bool,
}

impl PersistedUiPreferences {
    /// Fixed storage key for the persisted record.
    pub const STORAGE_KEY: &'static str = "ui-preferences";
}

/// Sidebar and mobile menu state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UiStore {
    sidebar_collapsed: bool,
    mobile_menu_open: bool,
}

/// Mutations accepted by [`UiStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    ToggleSidebar,
    OpenSidebar,
    CloseSidebar,
    SetMobileMenuOpen(bool),
    ToggleMobileMenu,
}

impl UiStore {
    /// Rebuild the store from its persisted record. The mobile menu always
    /// starts closed.
    #[must_use]
    pub const fn hydrate(persisted: PersistedUiPreferences) -> Self {
        Self {
            sidebar_collapsed: persisted.sidebar_collapsed,
            mobile_menu_open: false,
        }
    }

    /// The part of this store that should be written to storage.
    #[must_use]
    pub const fn persisted(&self) -> PersistedUiPreferences {
        PersistedUiPreferences {
            sidebar_collapsed: self.sidebar_collapsed,
        }
    }

    #[must_use]
    pub const fn sidebar_collapsed(&self) -> bool {
        self.sidebar_collapsed
    }

    #[must_use]
    pub const fn mobile_menu_open(&self) -> bool {
        self.mobile_menu_open
    }

    pub const fn toggle_sidebar(&mut self) {
        self.sidebar_collapsed = !self.sidebar_collapsed;
    }

    pub const fn open_sidebar(&mut self) {
        self.sidebar_collapsed = false;
    }

    pub const fn close_sidebar(&mut self) {
        self.sidebar_collapsed = true;
    }

    pub const fn set_mobile_menu_open(&mut self, open: bool) {
        self.mobile_menu_open = open;
    }

    pub const fn toggle_mobile_menu(&mut self) {
        self.mobile_menu_open = !self.mobile_menu_open;
    }
}

impl Store for UiStore {
    type Action = UiAction;

    fn apply(&mut self, action: UiAction) {
        match action {
            UiAction::ToggleSidebar => self.toggle_sidebar(),
            UiAction::OpenSidebar => self.open_sidebar(),
            UiAction::CloseSidebar => self.close_sidebar(),
            UiAction::SetMobileMenuOpen(open) => self.set_mobile_menu_open(open),
            UiAction::ToggleMobileMenu => self.toggle_mobile_menu(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sidebar_mutators() {
        let mut ui = UiStore::default();
        assert!(!ui.sidebar_collapsed());
        ui.apply(UiAction::ToggleSidebar);
        assert!(ui.sidebar_collapsed());
        ui.apply(UiAction::OpenSidebar);
        assert!(!ui.sidebar_collapsed());
        ui.apply(UiAction::CloseSidebar);
        assert!(ui.sidebar_collapsed());
    }

    #[test]
    fn test_only_sidebar_survives_persistence() {
        let mut ui = UiStore::default();
        ui.close_sidebar();
        ui.set_mobile_menu_open(true);

        let json = serde_json::to_string(&ui.persisted()).unwrap_or_default();
        assert_eq!(json, r#"{"sidebar_collapsed":true}"#);

        let restored: PersistedUiPreferences = serde_json::from_str(&json).unwrap_or_default();
        let reloaded = UiStore::hydrate(restored);
        assert!(reloaded.sidebar_collapsed());
        assert!(!reloaded.mobile_menu_open());
    }

    #[test]
    fn test_missing_fields_deserialize_to_defaults() {
        let restored: PersistedUiPreferences =
            serde_json::from_str("{}").unwrap_or(PersistedUiPreferences {
                sidebar_collapsed: true,
            });
        assert!(!restored.sidebar_collapsed);
    }

    #[test]
    fn test_mobile_menu_toggle() {
        let mut ui = UiStore::default();
        ui.apply(UiAction::ToggleMobileMenu);
        assert!(ui.mobile_menu_open());
        ui.apply(UiAction::SetMobileMenuOpen(false));
        assert!(!ui.mobile_menu_open());
    }
}
