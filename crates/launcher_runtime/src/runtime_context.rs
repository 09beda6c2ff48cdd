//! Long-lived launcher state container.
//!
//! [`LauncherRuntime`] owns the single [`LauncherState`], runs every command through
//! [`reduce_launcher`], publishes snapshots to subscribers when the state changes, and executes
//! reducer-emitted persistence effects against the injected [`PrefsStore`]. It is constructed and
//! owned explicitly by the host; there is no ambient instance.

use std::cell::RefCell;

use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use launcher_host::PrefsStore;

use crate::{
    model::{LauncherState, SlotRef},
    persistence::{self, LayoutStorageKeys},
    reducer::{reduce_launcher, LauncherAction, RuntimeEffect},
    render::LauncherView,
};

/// Single owner of the launcher state, bound to one preference store.
///
/// Not `Send`; hosts keep it on the thread that renders the launcher.
pub struct LauncherRuntime<S: PrefsStore> {
    store: S,
    keys: LayoutStorageKeys,
    state: RefCell<LauncherState>,
    subscribers: RefCell<Vec<UnboundedSender<LauncherState>>>,
}

impl<S: PrefsStore> LauncherRuntime<S> {
    /// Creates a runtime with an empty layout. Call [`Self::load`] or
    /// [`Self::initialize_default`] before rendering.
    pub fn new(store: S) -> Self {
        Self::with_keys(store, LayoutStorageKeys::default())
    }

    /// Like [`Self::new`], with custom storage keys.
    pub fn with_keys(store: S, keys: LayoutStorageKeys) -> Self {
        Self {
            store,
            keys,
            state: RefCell::new(LauncherState::default()),
            subscribers: RefCell::new(Vec::new()),
        }
    }

    /// Creates a runtime and hydrates it from storage (or the default layout).
    pub async fn boot(store: S) -> Self {
        let runtime = Self::new(store);
        runtime.load().await;
        runtime
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current state snapshot.
    pub fn state(&self) -> LauncherState {
        self.state.borrow().clone()
    }

    pub fn view(&self) -> LauncherView {
        LauncherView::from_state(&self.state.borrow())
    }

    /// Registers a change listener. Every state change after this call is delivered in order;
    /// dropping the receiver unsubscribes.
    pub fn subscribe(&self) -> UnboundedReceiver<LauncherState> {
        let (tx, rx) = mpsc::unbounded();
        self.subscribers.borrow_mut().push(tx);
        rx
    }

    /// Runs `action` through the reducer and publishes the new state if it changed.
    ///
    /// Returned effects are not executed; [`Self::save`] is the path that runs persistence.
    pub fn dispatch(&self, action: LauncherAction) -> Vec<RuntimeEffect> {
        let mut next = self.state();
        let effects = reduce_launcher(&mut next, action);
        let changed = {
            let mut current = self.state.borrow_mut();
            if *current == next {
                false
            } else {
                *current = next.clone();
                true
            }
        };
        if changed {
            self.publish(next);
        }
        effects
    }

    fn publish(&self, snapshot: LauncherState) {
        self.subscribers
            .borrow_mut()
            .retain(|tx| tx.unbounded_send(snapshot.clone()).is_ok());
    }

    pub fn initialize_default(&self) {
        self.dispatch(LauncherAction::InitializeDefault);
    }

    pub fn move_icon(&self, from: SlotRef, to: SlotRef) {
        self.dispatch(LauncherAction::MoveIcon { from, to });
    }

    pub fn swap_icons(&self, source: SlotRef, target: SlotRef) {
        self.dispatch(LauncherAction::SwapIcons { source, target });
    }

    pub fn return_to_tray(&self, slot: SlotRef) {
        self.dispatch(LauncherAction::ReturnToTray { slot });
    }

    pub fn begin_drag(&self, origin: SlotRef) {
        self.dispatch(LauncherAction::BeginDrag { origin });
    }

    pub fn cancel_drag(&self) {
        self.dispatch(LauncherAction::CancelDrag);
    }

    pub fn drop_on(&self, target: SlotRef) {
        self.dispatch(LauncherAction::DropOn { target });
    }

    pub fn reset_to_default(&self) {
        self.dispatch(LauncherAction::ResetToSaved);
    }

    /// Persists the current layout. Storage failures are logged; the in-memory state stays
    /// valid and keeps its dirty flag.
    pub async fn save(&self) {
        let effects = self.dispatch(LauncherAction::CommitSave);
        self.run_effects(effects).await;
    }

    /// Loads the persisted layout, falling back to the default layout when nothing usable is
    /// stored.
    pub async fn load(&self) {
        match persistence::load_layout(&self.store, &self.keys).await {
            Ok(Some(configuration)) => {
                log::info!("launcher layout loaded");
                self.dispatch(LauncherAction::HydrateLayout { configuration });
            }
            Ok(None) => {
                log::info!("no saved launcher layout; using default");
                self.dispatch(LauncherAction::InitializeDefault);
            }
            Err(err) => {
                log::warn!("launcher layout load failed, using default: {err}");
                self.dispatch(LauncherAction::InitializeDefault);
            }
        }
    }

    async fn run_effects(&self, effects: Vec<RuntimeEffect>) {
        for effect in effects {
            match effect {
                RuntimeEffect::PersistLayout(configuration) => {
                    match persistence::save_layout(&self.store, &self.keys, &configuration).await {
                        Ok(()) => {
                            log::info!("launcher layout saved");
                            self.dispatch(LauncherAction::PersistSucceeded { configuration });
                        }
                        Err(err) => log::warn!("persist launcher layout failed: {err}"),
                    }
                }
            }
        }
    }
}
