use std::fmt;

use serde::{Deserialize, Serialize};

pub const MIDDLE_TRAY_SLOTS: usize = 10;
pub const SIDE_MENU_SLOTS: usize = 4;

/// One launcher slot; `None` is an empty slot.
pub type Slot = Option<IconItem>;

/// One launcher icon occurrence.
///
/// An icon placed in both the tray and a side menu exists as two occurrences sharing `id`; the
/// tray copy is disabled while the side menu copy is live.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IconItem {
    pub id: String,
    pub label: String,
    pub icon: String,
    pub protected: bool,
    pub enabled: bool,
}

impl IconItem {
    /// A fixed icon that never moves and is never overwritten.
    pub fn protected(id: impl Into<String>, label: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            icon: icon.into(),
            protected: true,
            enabled: true,
        }
    }

    /// A movable icon, enabled.
    pub fn customizable(
        id: impl Into<String>,
        label: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            icon: icon.into(),
            protected: false,
            enabled: true,
        }
    }

    /// Returns a copy with the enabled flag replaced.
    pub fn with_enabled(&self, enabled: bool) -> Self {
        Self {
            enabled,
            ..self.clone()
        }
    }

    /// Whether this occurrence may start a drag.
    pub fn is_draggable(&self) -> bool {
        !self.protected && self.enabled
    }
}

/// The three slot lists of the launcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Container {
    MiddleTray,
    LeftMenu,
    RightMenu,
}

impl Container {
    pub const ALL: [Container; 3] = [Self::MiddleTray, Self::LeftMenu, Self::RightMenu];

    pub fn slot_count(self) -> usize {
        match self {
            Self::MiddleTray => MIDDLE_TRAY_SLOTS,
            Self::LeftMenu | Self::RightMenu => SIDE_MENU_SLOTS,
        }
    }

    pub fn is_side_menu(self) -> bool {
        matches!(self, Self::LeftMenu | Self::RightMenu)
    }

    /// Stable snake_case name, used in storage keys and messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::MiddleTray => "middle_tray",
            Self::LeftMenu => "left_menu",
            Self::RightMenu => "right_menu",
        }
    }
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A resolved `(container, index)` drag origin or drop target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotRef {
    pub container: Container,
    pub index: usize,
}

impl SlotRef {
    pub fn new(container: Container, index: usize) -> Self {
        Self { container, index }
    }

    pub fn tray(index: usize) -> Self {
        Self::new(Container::MiddleTray, index)
    }

    pub fn left(index: usize) -> Self {
        Self::new(Container::LeftMenu, index)
    }

    pub fn right(index: usize) -> Self {
        Self::new(Container::RightMenu, index)
    }

    pub fn in_range(self) -> bool {
        self.index < self.container.slot_count()
    }
}

impl fmt::Display for SlotRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.container, self.index)
    }
}

/// The three fixed-length slot lists. Slot counts are part of the type.
///
/// Valid configurations keep tray mirroring consistent; see
/// [`LauncherConfiguration::mirroring_mismatch`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LauncherConfiguration {
    pub middle_tray: [Slot; MIDDLE_TRAY_SLOTS],
    pub left_menu: [Slot; SIDE_MENU_SLOTS],
    pub right_menu: [Slot; SIDE_MENU_SLOTS],
}

impl LauncherConfiguration {
    pub fn slots(&self, container: Container) -> &[Slot] {
        match container {
            Container::MiddleTray => &self.middle_tray,
            Container::LeftMenu => &self.left_menu,
            Container::RightMenu => &self.right_menu,
        }
    }

    pub fn slots_mut(&mut self, container: Container) -> &mut [Slot] {
        match container {
            Container::MiddleTray => &mut self.middle_tray,
            Container::LeftMenu => &mut self.left_menu,
            Container::RightMenu => &mut self.right_menu,
        }
    }

    /// Returns the icon at `slot`, or `None` when the slot is empty or out of range.
    pub fn icon_at(&self, slot: SlotRef) -> Option<&IconItem> {
        self.slots(slot.container).get(slot.index)?.as_ref()
    }

    /// Index of the first middle tray slot holding `id`.
    pub fn tray_position(&self, id: &str) -> Option<usize> {
        self.middle_tray
            .iter()
            .position(|slot| slot.as_ref().is_some_and(|icon| icon.id == id))
    }

    /// Ids of unprotected icons currently placed in either side menu.
    pub fn side_menu_ids(&self) -> Vec<&str> {
        self.left_menu
            .iter()
            .chain(self.right_menu.iter())
            .flatten()
            .filter(|icon| !icon.protected)
            .map(|icon| icon.id.as_str())
            .collect()
    }

    /// Disables every tray occurrence whose id also sits, unprotected, in a side menu.
    pub fn with_mirroring(mut self) -> Self {
        let mirrored = self
            .side_menu_ids()
            .into_iter()
            .map(str::to_string)
            .collect::<Vec<_>>();
        self.middle_tray = self.middle_tray.map(|slot| match slot {
            Some(icon) if mirrored.contains(&icon.id) => Some(icon.with_enabled(false)),
            other => other,
        });
        self
    }

    /// First icon id whose tray and side menu occurrences disagree.
    ///
    /// Every unprotected side menu icon needs a disabled tray occurrence, and every disabled tray
    /// occurrence needs a side menu partner.
    pub fn mirroring_mismatch(&self) -> Option<&str> {
        let side_ids = self.side_menu_ids();
        let unmirrored = side_ids.iter().copied().find(|id| {
            !self
                .middle_tray
                .iter()
                .flatten()
                .any(|icon| icon.id == *id && !icon.enabled)
        });
        unmirrored.or_else(|| {
            self.middle_tray
                .iter()
                .flatten()
                .find(|icon| !icon.enabled && !side_ids.contains(&icon.id.as_str()))
                .map(|icon| icon.id.as_str())
        })
    }

    /// Number of occupied slots across all containers.
    pub fn occupied_count(&self) -> usize {
        Container::ALL
            .iter()
            .map(|container| self.slots(*container).iter().flatten().count())
            .sum()
    }
}

/// In-progress drag captured when the gesture starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    pub origin: SlotRef,
    pub icon: IconItem,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LauncherState {
    pub configuration: LauncherConfiguration,
    /// Set by any successful edit; cleared by save, load, and reset.
    pub is_modified: bool,
    pub drag: Option<DragSession>,
    /// Last successfully saved or loaded configuration.
    pub saved: Option<LauncherConfiguration>,
}
