//! Launcher layout persistence over a host [`PrefsStore`].
//!
//! Each container is stored under its own key as a JSON array with one element per slot: an
//! icon record or `null` for an empty slot. Slot order and count are preserved exactly.

use launcher_host::PrefsStore;
use thiserror::Error;

use crate::model::{Container, LauncherConfiguration, Slot};

pub const MIDDLE_TRAY_KEY: &str = "launcher.middle_tray.v1";
pub const LEFT_MENU_KEY: &str = "launcher.left_menu.v1";
pub const RIGHT_MENU_KEY: &str = "launcher.right_menu.v1";

/// Storage keys for the three slot lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutStorageKeys {
    pub middle_tray: String,
    pub left_menu: String,
    pub right_menu: String,
}

impl Default for LayoutStorageKeys {
    fn default() -> Self {
        Self {
            middle_tray: MIDDLE_TRAY_KEY.to_string(),
            left_menu: LEFT_MENU_KEY.to_string(),
            right_menu: RIGHT_MENU_KEY.to_string(),
        }
    }
}

impl LayoutStorageKeys {
    /// Keys of the form `{prefix}.{container}.v1`, for hosts sharing one store between profiles.
    pub fn with_prefix(prefix: &str) -> Self {
        let key = |container: Container| format!("{prefix}.{}.v1", container.name());
        Self {
            middle_tray: key(Container::MiddleTray),
            left_menu: key(Container::LeftMenu),
            right_menu: key(Container::RightMenu),
        }
    }

    pub fn key_for(&self, container: Container) -> &str {
        match container {
            Container::MiddleTray => &self.middle_tray,
            Container::LeftMenu => &self.left_menu,
            Container::RightMenu => &self.right_menu,
        }
    }
}

/// Encoding or validation failure for one stored slot list.
#[derive(Debug, Error)]
pub enum LayoutCodecError {
    #[error("failed to encode {container} slots: {source}")]
    Encode {
        container: Container,
        source: serde_json::Error,
    },
    #[error("failed to decode {container} slots: {source}")]
    Decode {
        container: Container,
        source: serde_json::Error,
    },
    #[error("{container} expects {expected} slots, found {found}")]
    SlotCount {
        container: Container,
        expected: usize,
        found: usize,
    },
    #[error("tray and side menu occurrences of `{id}` disagree")]
    Mirroring { id: String },
}

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("storage failure for `{key}`: {message}")]
    Store { key: String, message: String },
    #[error(transparent)]
    Codec(#[from] LayoutCodecError),
}

pub fn encode_slots(container: Container, slots: &[Slot]) -> Result<String, LayoutCodecError> {
    serde_json::to_string(slots).map_err(|source| LayoutCodecError::Encode { container, source })
}

pub fn decode_slots<const N: usize>(
    container: Container,
    raw: &str,
) -> Result<[Slot; N], LayoutCodecError> {
    let slots: Vec<Slot> = serde_json::from_str(raw)
        .map_err(|source| LayoutCodecError::Decode { container, source })?;
    let found = slots.len();
    let expected = container.slot_count();
    if found != expected {
        return Err(LayoutCodecError::SlotCount {
            container,
            expected,
            found,
        });
    }
    slots.try_into().map_err(|_| LayoutCodecError::SlotCount {
        container,
        expected: N,
        found,
    })
}

/// Writes the three slot lists. All lists are encoded before the first write.
///
/// When a write fails, keys already written are restored to their previous raw values (or
/// deleted if they were absent) so the store never mixes two layouts.
///
/// # Errors
///
/// Returns a [`PersistenceError`] when encoding, reading the previous values, or a store write
/// fails.
pub async fn save_layout<S: PrefsStore + ?Sized>(
    store: &S,
    keys: &LayoutStorageKeys,
    config: &LauncherConfiguration,
) -> Result<(), PersistenceError> {
    let encoded = Container::ALL
        .into_iter()
        .map(|container| {
            encode_slots(container, config.slots(container)).map(|raw| (container, raw))
        })
        .collect::<Result<Vec<_>, LayoutCodecError>>()?;

    let mut previous = Vec::with_capacity(encoded.len());
    for (container, _) in &encoded {
        previous.push(load_raw(store, keys.key_for(*container)).await?);
    }

    for (written, (container, raw)) in encoded.iter().enumerate() {
        let key = keys.key_for(*container);
        if let Err(message) = store.save_pref(key, raw).await {
            restore_previous(store, keys, &encoded[..written], &previous).await;
            return Err(PersistenceError::Store {
                key: key.to_string(),
                message,
            });
        }
    }
    Ok(())
}

async fn restore_previous<S: PrefsStore + ?Sized>(
    store: &S,
    keys: &LayoutStorageKeys,
    written: &[(Container, String)],
    previous: &[Option<String>],
) {
    for ((container, _), prior) in written.iter().zip(previous) {
        let key = keys.key_for(*container);
        let result = match prior {
            Some(raw) => store.save_pref(key, raw).await,
            None => store.delete_pref(key).await,
        };
        if let Err(err) = result {
            log::warn!("restoring `{key}` after failed layout save failed: {err}");
        }
    }
}

async fn load_raw<S: PrefsStore + ?Sized>(
    store: &S,
    key: &str,
) -> Result<Option<String>, PersistenceError> {
    store
        .load_pref(key)
        .await
        .map_err(|message| PersistenceError::Store {
            key: key.to_string(),
            message,
        })
}

/// Reads the three slot lists.
///
/// Returns `Ok(None)` unless all three keys are present.
///
/// # Errors
///
/// Returns a [`PersistenceError`] when a store read or decoding fails, or when the tray and side
/// menus disagree about which icons are mirrored.
pub async fn load_layout<S: PrefsStore + ?Sized>(
    store: &S,
    keys: &LayoutStorageKeys,
) -> Result<Option<LauncherConfiguration>, PersistenceError> {
    let middle_tray = load_raw(store, keys.key_for(Container::MiddleTray)).await?;
    let left_menu = load_raw(store, keys.key_for(Container::LeftMenu)).await?;
    let right_menu = load_raw(store, keys.key_for(Container::RightMenu)).await?;

    let (Some(middle_tray), Some(left_menu), Some(right_menu)) = (middle_tray, left_menu, right_menu)
    else {
        return Ok(None);
    };

    let config = LauncherConfiguration {
        middle_tray: decode_slots(Container::MiddleTray, &middle_tray)?,
        left_menu: decode_slots(Container::LeftMenu, &left_menu)?,
        right_menu: decode_slots(Container::RightMenu, &right_menu)?,
    };
    if let Some(id) = config.mirroring_mismatch() {
        return Err(LayoutCodecError::Mirroring { id: id.to_string() }.into());
    }
    Ok(Some(config))
}
