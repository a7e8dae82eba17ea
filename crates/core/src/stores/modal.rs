//! Detail modal store.

use serde::{Deserialize, Serialize};

use super::Store;
use crate::LivestockId;

/// Which listing, if any, the detail modal is showing.
///
/// `selected_id` is only ever set while the modal is open: opening sets both
/// fields in one call and closing clears both. Switching to another listing
/// means closing first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ModalStore {
    is_open: bool,
    selected_id: Option<LivestockId>,
}

/// Mutations accepted by [`ModalStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalAction {
    OpenDetailModal(LivestockId),
    CloseDetailModal,
}

impl ModalStore {
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.is_open
    }

    #[must_use]
    pub const fn selected_id(&self) -> Option<LivestockId> {
        self.selected_id
    }

    pub const fn open_detail_modal(&mut self, id: LivestockId) {
        *self = Self {
            is_open: true,
            selected_id: Some(id),
        };
    }

    pub const fn close_detail_modal(&mut self) {
        *self = Self {
            is_open: false,
            selected_id: None,
        };
    }
}

impl Store for ModalStore {
    type Action = ModalAction;

    fn apply(&mut self, action: ModalAction) {
        match action {
            ModalAction::OpenDetailModal(id) => self.open_detail_modal(id),
            ModalAction::CloseDetailModal => self.close_detail_modal(),
        }
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    const fn listing(n: u128) -> LivestockId {
        LivestockId::new(Uuid::from_u128(n))
    }

    #[test]
    fn test_starts_closed() {
        let modal = ModalStore::default();
        assert!(!modal.is_open());
        assert_eq!(modal.selected_id(), None);
    }

    #[test]
    fn test_open_sets_flag_and_id_together() {
        let mut modal = ModalStore::default();
        modal.open_detail_modal(listing(17));
        assert!(modal.is_open());
        assert_eq!(modal.selected_id(), Some(listing(17)));
    }

    #[test]
    fn test_open_then_close_leaves_no_stale_id() {
        let mut modal = ModalStore::default();
        modal.apply(ModalAction::OpenDetailModal(listing(4)));
        modal.apply(ModalAction::CloseDetailModal);
        assert_eq!(modal, ModalStore::default());
    }

    #[test]
    fn test_close_then_reopen_switches_subject() {
        let mut modal = ModalStore::default();
        modal.open_detail_modal(listing(1));
        modal.close_detail_modal();
        modal.open_detail_modal(listing(2));
        assert_eq!(modal.selected_id(), Some(listing(2)));
    }
}
