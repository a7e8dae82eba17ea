//! View-state containers.
//!
//! Each store has a defined initial value (`Default`) and an enumerated set of
//! mutations. Handlers either call the named mutator directly or dispatch the
//! matching [`Store::Action`] variant; there is no other way to change a
//! store's fields.
//!
//! - [`filters`] - active catalog query and grid/list display mode
//! - [`modal`] - the listing currently inspected in the detail modal
//! - [`chat`] - the assistant transcript and panel flags
//! - [`ui`] - sidebar and mobile menu, with the persisted subset split out

pub mod chat;
pub mod filters;
pub mod modal;
pub mod ui;

pub use chat::{ChatAction, ChatMessage, ChatRole, ChatStore};
pub use filters::{FilterAction, FilterPatch, FilterState, FilterStore, PatchField, SortOrder, ViewMode};
pub use modal::{ModalAction, ModalStore};
pub use ui::{PersistedUiPreferences, UiAction, UiStore};

/// A state container with a fixed initial value and a closed set of mutations.
pub trait Store: Default {
    /// Every mutation this store accepts.
    type Action;

    /// Apply a single mutation.
    fn apply(&mut self, action: Self::Action);
}
