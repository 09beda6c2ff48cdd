//! Read-only projection of [`LauncherState`] for the presentation layer.

use crate::model::{Container, IconItem, LauncherState, Slot, SlotRef};

/// How one slot should be drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotView {
    /// Placeholder for an empty slot.
    Empty,
    Icon {
        icon: IconItem,
        /// Disabled occurrences render greyed out.
        dimmed: bool,
        /// Whether the slot accepts taps and drag starts.
        interactive: bool,
        /// The slot is the origin of the active drag.
        dragging: bool,
    },
}

impl SlotView {
    pub fn is_interactive(&self) -> bool {
        matches!(
            self,
            Self::Icon {
                interactive: true,
                ..
            }
        )
    }
}

/// Render snapshot of all three containers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LauncherView {
    pub middle_tray: Vec<SlotView>,
    pub left_menu: Vec<SlotView>,
    pub right_menu: Vec<SlotView>,
    /// Saving is only offered while there are unsaved edits.
    pub can_commit: bool,
}

impl LauncherView {
    pub fn from_state(state: &LauncherState) -> Self {
        Self {
            middle_tray: container_view(state, Container::MiddleTray),
            left_menu: container_view(state, Container::LeftMenu),
            right_menu: container_view(state, Container::RightMenu),
            can_commit: can_commit(state),
        }
    }

    pub fn container(&self, container: Container) -> &[SlotView] {
        match container {
            Container::MiddleTray => &self.middle_tray,
            Container::LeftMenu => &self.left_menu,
            Container::RightMenu => &self.right_menu,
        }
    }
}

fn slot_view(slot: &Slot, dragging: bool) -> SlotView {
    match slot {
        None => SlotView::Empty,
        Some(icon) => SlotView::Icon {
            icon: icon.clone(),
            dimmed: !icon.enabled,
            interactive: icon.is_draggable(),
            dragging,
        },
    }
}

pub fn container_view(state: &LauncherState, container: Container) -> Vec<SlotView> {
    let drag_origin = state.drag.as_ref().map(|session| session.origin);
    state
        .configuration
        .slots(container)
        .iter()
        .enumerate()
        .map(|(index, slot)| {
            slot_view(slot, drag_origin == Some(SlotRef::new(container, index)))
        })
        .collect()
}

pub fn can_commit(state: &LauncherState) -> bool {
    state.is_modified
}
