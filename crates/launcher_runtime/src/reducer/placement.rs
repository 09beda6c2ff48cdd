//! Icon placement rules for moves and swaps between the tray and side menus.
//!
//! Every rule validates against the current configuration and returns a fresh configuration; the
//! input is never touched, so a refused request cannot leave a half-applied layout behind.

use thiserror::Error;

use crate::model::{Container, IconItem, LauncherConfiguration, SlotRef};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reasons a placement request is refused.
pub enum PlacementError {
    /// Source and destination are the same slot.
    #[error("source and destination are the same slot")]
    SamePosition,
    /// The slot index is past the end of its container.
    #[error("slot {0} is out of range")]
    OutOfRange(SlotRef),
    /// There is no icon to pick up.
    #[error("slot {0} is empty")]
    EmptySource(SlotRef),
    /// Protected icons never leave their slot.
    #[error("icon `{0}` is protected")]
    ProtectedSource(String),
    /// Disabled tray occurrences are placeholders for an icon living in a side menu.
    #[error("icon `{0}` is disabled")]
    DisabledSource(String),
    /// Protected icons are never overwritten.
    #[error("slot {slot} holds protected icon `{id}`")]
    ProtectedTarget {
        /// Destination slot.
        slot: SlotRef,
        /// Protected icon id at the destination.
        id: String,
    },
    /// Tray-to-tray moves only land on empty slots.
    #[error("slot {0} is occupied")]
    SlotOccupied(SlotRef),
    /// A side menu icon has no tray occurrence to return to.
    #[error("icon `{0}` has no middle tray occurrence")]
    NoTrayOccurrence(String),
    /// Swaps only exchange slots of one container.
    #[error("cannot swap between {0} and {1}")]
    CrossContainerSwap(Container, Container),
    /// The slot is not part of a side menu.
    #[error("slot {0} is not in a side menu")]
    NotSideMenu(SlotRef),
    /// The drag origin no longer holds the dragged icon.
    #[error("drag origin {0} no longer holds the dragged icon")]
    StaleDrag(SlotRef),
}

fn draggable_icon(config: &LauncherConfiguration, slot: SlotRef) -> Result<&IconItem, PlacementError> {
    if !slot.in_range() {
        return Err(PlacementError::OutOfRange(slot));
    }
    let icon = config
        .icon_at(slot)
        .ok_or(PlacementError::EmptySource(slot))?;
    if icon.protected {
        return Err(PlacementError::ProtectedSource(icon.id.clone()));
    }
    if !icon.enabled {
        return Err(PlacementError::DisabledSource(icon.id.clone()));
    }
    Ok(icon)
}

fn drop_occupant(
    config: &LauncherConfiguration,
    slot: SlotRef,
) -> Result<Option<&IconItem>, PlacementError> {
    if !slot.in_range() {
        return Err(PlacementError::OutOfRange(slot));
    }
    match config.icon_at(slot) {
        Some(icon) if icon.protected => Err(PlacementError::ProtectedTarget {
            slot,
            id: icon.id.clone(),
        }),
        occupant => Ok(occupant),
    }
}

/// Re-enables the tray occurrence of an icon pushed out of a side menu slot.
fn release_to_tray(
    next: &mut LauncherConfiguration,
    displaced: &IconItem,
) -> Result<(), PlacementError> {
    let position = next
        .tray_position(&displaced.id)
        .ok_or_else(|| PlacementError::NoTrayOccurrence(displaced.id.clone()))?;
    next.middle_tray[position] = next.middle_tray[position]
        .as_ref()
        .map(|icon| icon.with_enabled(true));
    Ok(())
}

/// Moves the icon at `from` onto `to`.
///
/// Side menu to tray enables the tray occurrence sharing the icon's id and empties the side menu
/// slot; the drop index is not used. Tray to side menu disables the tray occurrence in place and
/// places an enabled copy in the side menu. Whenever a side menu occupant is displaced its tray
/// occurrence is re-enabled.
///
/// # Errors
///
/// Returns a [`PlacementError`] describing why the move was refused.
pub fn move_icon(
    config: &LauncherConfiguration,
    from: SlotRef,
    to: SlotRef,
) -> Result<LauncherConfiguration, PlacementError> {
    if from == to {
        return Err(PlacementError::SamePosition);
    }
    let icon = draggable_icon(config, from)?;
    let displaced = drop_occupant(config, to)?;
    let mut next = config.clone();

    match (from.container.is_side_menu(), to.container.is_side_menu()) {
        (true, false) => {
            let position = config
                .tray_position(&icon.id)
                .ok_or_else(|| PlacementError::NoTrayOccurrence(icon.id.clone()))?;
            next.middle_tray[position] = Some(icon.with_enabled(true));
            next.slots_mut(from.container)[from.index] = None;
        }
        (false, true) => {
            if let Some(displaced) = displaced {
                release_to_tray(&mut next, displaced)?;
            }
            next.middle_tray[from.index] = Some(icon.with_enabled(false));
            next.slots_mut(to.container)[to.index] = Some(icon.with_enabled(true));
        }
        (true, true) => {
            if let Some(displaced) = displaced {
                release_to_tray(&mut next, displaced)?;
            }
            next.slots_mut(from.container)[from.index] = None;
            next.slots_mut(to.container)[to.index] = Some(icon.with_enabled(true));
        }
        (false, false) => {
            if displaced.is_some() {
                return Err(PlacementError::SlotOccupied(to));
            }
            next.middle_tray[from.index] = None;
            next.middle_tray[to.index] = Some(icon.with_enabled(true));
        }
    }
    Ok(next)
}

/// Exchanges two slots of the same container. The target may be empty.
///
/// # Errors
///
/// Returns a [`PlacementError`] describing why the swap was refused.
pub fn swap_icons(
    config: &LauncherConfiguration,
    source: SlotRef,
    target: SlotRef,
) -> Result<LauncherConfiguration, PlacementError> {
    if source.container != target.container {
        return Err(PlacementError::CrossContainerSwap(
            source.container,
            target.container,
        ));
    }
    if source == target {
        return Err(PlacementError::SamePosition);
    }
    draggable_icon(config, source)?;
    drop_occupant(config, target)?;

    let mut next = config.clone();
    next.slots_mut(source.container)
        .swap(source.index, target.index);
    Ok(next)
}

/// Sends a side menu icon back to its tray occurrence.
///
/// # Errors
///
/// Returns a [`PlacementError`] when `slot` is not a movable side menu icon with a tray occurrence.
pub fn return_to_tray(
    config: &LauncherConfiguration,
    slot: SlotRef,
) -> Result<LauncherConfiguration, PlacementError> {
    if !slot.container.is_side_menu() {
        return Err(PlacementError::NotSideMenu(slot));
    }
    let icon = draggable_icon(config, slot)?;
    let position = config
        .tray_position(&icon.id)
        .ok_or_else(|| PlacementError::NoTrayOccurrence(icon.id.clone()))?;
    move_icon(config, slot, SlotRef::tray(position))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::defaults::default_configuration;

    fn id_at(config: &LauncherConfiguration, slot: SlotRef) -> Option<&str> {
        config.icon_at(slot).map(|icon| icon.id.as_str())
    }

    fn enabled_at(config: &LauncherConfiguration, slot: SlotRef) -> bool {
        config.icon_at(slot).map(|icon| icon.enabled).unwrap_or(false)
    }

    #[test]
    fn side_menu_to_tray_enables_matching_tray_slot_and_empties_menu() {
        let config = default_configuration();

        let next = move_icon(&config, SlotRef::left(2), SlotRef::tray(7)).expect("move");

        assert_eq!(id_at(&next, SlotRef::left(2)), None);
        assert_eq!(id_at(&next, SlotRef::tray(0)), Some("app1"));
        assert!(enabled_at(&next, SlotRef::tray(0)));
        assert_eq!(id_at(&next, SlotRef::tray(7)), None);
        assert_eq!(next.occupied_count(), config.occupied_count() - 1);
    }

    #[test]
    fn side_menu_to_tray_without_tray_occurrence_is_refused() {
        let mut config = LauncherConfiguration::default();
        config.right_menu[1] = Some(IconItem::customizable("orphan", "Orphan", "ic"));

        assert_eq!(
            move_icon(&config, SlotRef::right(1), SlotRef::tray(0)),
            Err(PlacementError::NoTrayOccurrence("orphan".to_string()))
        );
    }

    #[test]
    fn tray_to_empty_side_slot_disables_tray_occurrence() {
        let mut config = default_configuration();
        config.left_menu[3] = None;
        config.middle_tray[1] = config.middle_tray[1].as_ref().map(|i| i.with_enabled(true));

        let next = move_icon(&config, SlotRef::tray(3), SlotRef::left(3)).expect("move");

        assert_eq!(id_at(&next, SlotRef::left(3)), Some("app4"));
        assert!(enabled_at(&next, SlotRef::left(3)));
        assert_eq!(id_at(&next, SlotRef::tray(3)), Some("app4"));
        assert!(!enabled_at(&next, SlotRef::tray(3)));
    }

    #[test]
    fn tray_to_occupied_side_slot_re_enables_displaced_icon() {
        let config = default_configuration();

        let next = move_icon(&config, SlotRef::tray(3), SlotRef::left(2)).expect("move");

        assert_eq!(id_at(&next, SlotRef::left(2)), Some("app4"));
        assert!(!enabled_at(&next, SlotRef::tray(3)));
        assert_eq!(id_at(&next, SlotRef::tray(0)), Some("app1"));
        assert!(enabled_at(&next, SlotRef::tray(0)));
    }

    #[test]
    fn disabled_tray_occurrence_cannot_be_moved() {
        let config = default_configuration();

        assert_eq!(
            move_icon(&config, SlotRef::tray(0), SlotRef::right(3)),
            Err(PlacementError::DisabledSource("app1".to_string()))
        );
    }

    #[test]
    fn protected_source_and_target_are_refused() {
        let config = default_configuration();

        assert_eq!(
            move_icon(&config, SlotRef::left(0), SlotRef::left(2)),
            Err(PlacementError::ProtectedSource("settings".to_string()))
        );
        assert_eq!(
            move_icon(&config, SlotRef::tray(4), SlotRef::right(0)),
            Err(PlacementError::ProtectedTarget {
                slot: SlotRef::right(0),
                id: "phone".to_string(),
            })
        );
        assert_eq!(
            swap_icons(&config, SlotRef::left(2), SlotRef::left(1)),
            Err(PlacementError::ProtectedTarget {
                slot: SlotRef::left(1),
                id: "link".to_string(),
            })
        );
        assert_eq!(
            swap_icons(&config, SlotRef::right(2), SlotRef::right(3)),
            Err(PlacementError::ProtectedSource("all_menu".to_string()))
        );
    }

    #[test]
    fn protected_slots_refuse_every_move_and_swap() {
        let config = default_configuration();
        let slots = Container::ALL
            .into_iter()
            .flat_map(|container| {
                (0..container.slot_count()).map(move |index| SlotRef::new(container, index))
            })
            .collect::<Vec<_>>();
        let protected = slots
            .iter()
            .copied()
            .filter(|slot| config.icon_at(*slot).is_some_and(|icon| icon.protected))
            .collect::<Vec<_>>();
        assert_eq!(protected.len(), 5);

        for guarded in &protected {
            for other in &slots {
                assert!(move_icon(&config, *other, *guarded).is_err(), "{other} -> {guarded}");
                assert!(move_icon(&config, *guarded, *other).is_err(), "{guarded} -> {other}");
                assert!(swap_icons(&config, *other, *guarded).is_err(), "{other} <> {guarded}");
                assert!(swap_icons(&config, *guarded, *other).is_err(), "{guarded} <> {other}");
            }
        }
    }

    #[test]
    fn side_to_side_move_across_menus_returns_displaced_icon_to_tray() {
        let config = default_configuration();

        let next = move_icon(&config, SlotRef::left(3), SlotRef::right(3)).expect("move");

        assert_eq!(id_at(&next, SlotRef::left(3)), None);
        assert_eq!(id_at(&next, SlotRef::right(3)), Some("app2"));
        assert!(enabled_at(&next, SlotRef::tray(2)));
        assert!(!enabled_at(&next, SlotRef::tray(1)));
    }

    #[test]
    fn tray_to_tray_move_only_lands_on_empty_slots() {
        let config = default_configuration();

        let next = move_icon(&config, SlotRef::tray(4), SlotRef::tray(9)).expect("move");
        assert_eq!(id_at(&next, SlotRef::tray(4)), None);
        assert_eq!(id_at(&next, SlotRef::tray(9)), Some("app5"));

        assert_eq!(
            move_icon(&config, SlotRef::tray(4), SlotRef::tray(3)),
            Err(PlacementError::SlotOccupied(SlotRef::tray(3)))
        );
    }

    #[test]
    fn same_slot_and_out_of_range_requests_are_refused() {
        let config = default_configuration();

        assert_eq!(
            move_icon(&config, SlotRef::tray(3), SlotRef::tray(3)),
            Err(PlacementError::SamePosition)
        );
        assert_eq!(
            swap_icons(&config, SlotRef::left(2), SlotRef::left(2)),
            Err(PlacementError::SamePosition)
        );
        assert_eq!(
            move_icon(&config, SlotRef::tray(3), SlotRef::left(4)),
            Err(PlacementError::OutOfRange(SlotRef::left(4)))
        );
        assert_eq!(
            swap_icons(&config, SlotRef::tray(10), SlotRef::tray(0)),
            Err(PlacementError::OutOfRange(SlotRef::tray(10)))
        );
    }

    #[test]
    fn swap_exchanges_slots_within_one_container() {
        let config = default_configuration();

        let next = swap_icons(&config, SlotRef::left(2), SlotRef::left(3)).expect("swap");
        assert_eq!(id_at(&next, SlotRef::left(2)), Some("app2"));
        assert_eq!(id_at(&next, SlotRef::left(3)), Some("app1"));

        let next = swap_icons(&config, SlotRef::tray(4), SlotRef::tray(8)).expect("swap");
        assert_eq!(id_at(&next, SlotRef::tray(4)), None);
        assert_eq!(id_at(&next, SlotRef::tray(8)), Some("app5"));
    }

    #[test]
    fn swap_across_containers_is_refused() {
        let config = default_configuration();

        assert_eq!(
            swap_icons(&config, SlotRef::left(2), SlotRef::right(3)),
            Err(PlacementError::CrossContainerSwap(
                Container::LeftMenu,
                Container::RightMenu
            ))
        );
    }

    #[test]
    fn return_to_tray_requires_side_menu_slot() {
        let config = default_configuration();

        let next = return_to_tray(&config, SlotRef::right(3)).expect("return");
        assert_eq!(id_at(&next, SlotRef::right(3)), None);
        assert!(enabled_at(&next, SlotRef::tray(2)));

        assert_eq!(
            return_to_tray(&config, SlotRef::tray(3)),
            Err(PlacementError::NotSideMenu(SlotRef::tray(3)))
        );
    }
}
