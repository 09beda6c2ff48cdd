//! Drop classification for resolved drag gestures.
//!
//! Gesture recognition and hit-testing belong to the presentation layer. Once it has resolved
//! the origin and the drop point to [`SlotRef`]s, [`classify_drop`] decides which reducer command
//! the drop stands for.

use crate::model::SlotRef;
use crate::reducer::LauncherAction;

/// Which placement command a drop stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropIntent {
    /// Dropped back where it started; nothing to do.
    SamePosition,
    /// Same container, different slot.
    Swap,
    /// Different container.
    Move,
}

pub fn classify_drop(from: SlotRef, to: SlotRef) -> DropIntent {
    if from == to {
        DropIntent::SamePosition
    } else if from.container == to.container {
        DropIntent::Swap
    } else {
        DropIntent::Move
    }
}

/// Maps a resolved drop to the reducer action it should dispatch, if any.
pub fn drop_action(from: SlotRef, to: SlotRef) -> Option<LauncherAction> {
    match classify_drop(from, to) {
        DropIntent::SamePosition => None,
        DropIntent::Swap => Some(LauncherAction::SwapIcons {
            source: from,
            target: to,
        }),
        DropIntent::Move => Some(LauncherAction::MoveIcon { from, to }),
    }
}
