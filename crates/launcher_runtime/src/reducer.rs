//! Reducer actions, side-effect intents, and transition logic for the launcher layout editor.

mod placement;

pub use placement::{move_icon, return_to_tray, swap_icons, PlacementError};

use crate::{
    defaults::default_configuration,
    drag::{classify_drop, DropIntent},
    model::{DragSession, LauncherConfiguration, LauncherState, SlotRef},
};

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_launcher`] to mutate [`LauncherState`].
pub enum LauncherAction {
    /// Install the default layout and clear the dirty flag.
    InitializeDefault,
    /// Move the icon at `from` onto `to` (cross-container placement rules apply).
    MoveIcon {
        /// Drag origin.
        from: SlotRef,
        /// Drop target.
        to: SlotRef,
    },
    /// Exchange two slots of one container.
    SwapIcons {
        /// Drag origin.
        source: SlotRef,
        /// Drop target.
        target: SlotRef,
    },
    /// Send a side menu icon back to its tray occurrence (tap shortcut).
    ReturnToTray {
        /// Side menu slot that was tapped.
        slot: SlotRef,
    },
    /// Start a drag from a draggable slot.
    BeginDrag {
        /// Slot the gesture started on.
        origin: SlotRef,
    },
    /// Abandon the active drag.
    CancelDrag,
    /// Finish the active drag on `target`.
    DropOn {
        /// Resolved drop slot.
        target: SlotRef,
    },
    /// Request persistence of the current layout.
    CommitSave,
    /// Persistence of `configuration` completed; it becomes the reset target.
    PersistSucceeded {
        /// Layout that was written.
        configuration: LauncherConfiguration,
    },
    /// Replace the layout with one read from storage.
    HydrateLayout {
        /// Decoded layout.
        configuration: LauncherConfiguration,
    },
    /// Discard edits: restore the saved layout, or the default if nothing was saved.
    ResetToSaved,
}

#[derive(Debug, Clone, PartialEq)]
/// Side-effect intents emitted by [`reduce_launcher`] for the runtime to execute.
pub enum RuntimeEffect {
    /// Write the three slot lists to durable storage.
    PersistLayout(LauncherConfiguration),
}

/// Applies a [`LauncherAction`] to the launcher state and collects resulting side effects.
///
/// Every action is total: refused placements are logged and leave the state untouched.
pub fn reduce_launcher(state: &mut LauncherState, action: LauncherAction) -> Vec<RuntimeEffect> {
    let mut effects = Vec::new();
    match action {
        LauncherAction::InitializeDefault => {
            state.configuration = default_configuration();
            state.is_modified = false;
            state.drag = None;
        }
        LauncherAction::MoveIcon { from, to } => {
            let result = move_icon(&state.configuration, from, to);
            apply_placement(state, result, "move");
        }
        LauncherAction::SwapIcons { source, target } => {
            let result = swap_icons(&state.configuration, source, target);
            apply_placement(state, result, "swap");
        }
        LauncherAction::ReturnToTray { slot } => {
            let result = return_to_tray(&state.configuration, slot);
            apply_placement(state, result, "return to tray");
        }
        LauncherAction::BeginDrag { origin } => match state.configuration.icon_at(origin) {
            Some(icon) if icon.is_draggable() => {
                state.drag = Some(DragSession {
                    origin,
                    icon: icon.clone(),
                });
            }
            _ => log::debug!("drag refused at {origin}: slot is empty, protected, or disabled"),
        },
        LauncherAction::CancelDrag => {
            state.drag = None;
        }
        LauncherAction::DropOn { target } => {
            let Some(session) = state.drag.take() else {
                log::debug!("drop on {target} ignored: no drag in progress");
                return effects;
            };
            let result = drop_session(&state.configuration, &session, target);
            apply_placement(state, result, "drop");
        }
        LauncherAction::CommitSave => {
            effects.push(RuntimeEffect::PersistLayout(state.configuration.clone()));
        }
        LauncherAction::PersistSucceeded { configuration } => {
            if state.configuration == configuration {
                state.is_modified = false;
            }
            state.saved = Some(configuration);
        }
        LauncherAction::HydrateLayout { configuration } => {
            state.saved = Some(configuration.clone());
            state.configuration = configuration;
            state.is_modified = false;
            state.drag = None;
        }
        LauncherAction::ResetToSaved => {
            state.configuration = state
                .saved
                .clone()
                .unwrap_or_else(default_configuration);
            state.is_modified = false;
            state.drag = None;
        }
    }
    effects
}

fn drop_session(
    config: &LauncherConfiguration,
    session: &DragSession,
    target: SlotRef,
) -> Result<Option<LauncherConfiguration>, PlacementError> {
    if config.icon_at(session.origin) != Some(&session.icon) {
        return Err(PlacementError::StaleDrag(session.origin));
    }
    match classify_drop(session.origin, target) {
        DropIntent::SamePosition => Ok(None),
        DropIntent::Swap => swap_icons(config, session.origin, target).map(Some),
        DropIntent::Move => move_icon(config, session.origin, target).map(Some),
    }
}

fn apply_placement<R: Into<Option<LauncherConfiguration>>>(
    state: &mut LauncherState,
    result: Result<R, PlacementError>,
    operation: &str,
) {
    let result: Result<Option<LauncherConfiguration>, PlacementError> = result.map(Into::into);
    match result {
        Ok(Some(next)) => {
            state.configuration = next;
            state.is_modified = true;
        }
        Ok(None) => {}
        Err(err) => log::debug!("{operation} refused: {err}"),
    }
}
