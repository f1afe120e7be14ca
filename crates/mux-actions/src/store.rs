// ABOUTME: Ordered, persisted collection of quick actions.
// ABOUTME: Every mutation renumbers sort order densely and writes through to the preference store.

use mux_core::{ChangeNotifier, PreferenceStore, PreferenceStoreExt, SubscriptionId};
use uuid::Uuid;

use crate::action::QuickAction;

/// Preference key holding the serialized action list
pub const QUICK_ACTIONS_KEY: &str = "quick_actions";
/// Set once the defaults have been seeded, so an emptied list stays empty
pub const QUICK_ACTIONS_INITIALIZED_KEY: &str = "quick_actions_initialized";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuickActionEvent {
    Added(Uuid),
    Updated(Uuid),
    Deleted(Uuid),
    Toggled { id: Uuid, is_enabled: bool },
    Reordered,
    Reset,
}

/// The user's quick actions, kept in display order
#[derive(Debug)]
pub struct QuickActionStore<S: PreferenceStore> {
    store: S,
    actions: Vec<QuickAction>,
    notifier: ChangeNotifier<QuickActionEvent>,
}

impl<S: PreferenceStore> QuickActionStore<S> {
    /// Load persisted actions. The first load ever seeds the built-in
    /// defaults; unreadable data falls back to them without overwriting it.
    pub fn load(store: S) -> Self {
        let mut this = Self {
            store,
            actions: Vec::new(),
            notifier: ChangeNotifier::new(),
        };

        match this.store.get_json::<Vec<QuickAction>>(QUICK_ACTIONS_KEY) {
            Ok(Some(mut actions)) => {
                // Stable sort keeps insertion order for equal sort orders
                actions.sort_by_key(|a| a.sort_order);
                this.actions = actions;
                this.renumber();
                tracing::debug!("Loaded {} quick actions", this.actions.len());
            }
            Ok(None) if !this.store.get_flag(QUICK_ACTIONS_INITIALIZED_KEY) => {
                tracing::info!("First run, seeding default quick actions");
                this.actions = QuickAction::defaults();
                this.mark_initialized();
                this.persist();
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!("Discarding stored quick actions: {}", e);
                this.actions = QuickAction::defaults();
            }
        }

        this
    }

    /// All actions in display order
    pub fn actions(&self) -> &[QuickAction] {
        &self.actions
    }

    pub fn get(&self, id: Uuid) -> Option<&QuickAction> {
        self.actions.iter().find(|a| a.id == id)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Enabled actions sorted by `sort_order`
    pub fn enabled_actions(&self) -> Vec<&QuickAction> {
        let mut enabled: Vec<_> = self.actions.iter().filter(|a| a.is_enabled).collect();
        enabled.sort_by_key(|a| a.sort_order);
        enabled
    }

    /// Append an action after the current last one. An action whose id is
    /// already present is ignored.
    pub fn add(&mut self, mut action: QuickAction) {
        if self.get(action.id).is_some() {
            tracing::warn!("Quick action {} already exists, not adding", action.id);
            return;
        }

        action.sort_order = self
            .actions
            .iter()
            .map(|a| a.sort_order)
            .max()
            .unwrap_or(-1)
            + 1;
        let id = action.id;
        self.actions.push(action);
        self.persist();
        self.notifier.emit(&QuickActionEvent::Added(id));
    }

    /// Replace the action with the same id, keeping its position
    pub fn update(&mut self, mut action: QuickAction) {
        let Some(existing) = self.actions.iter_mut().find(|a| a.id == action.id) else {
            return;
        };
        action.sort_order = existing.sort_order;
        let id = action.id;
        *existing = action;
        self.persist();
        self.notifier.emit(&QuickActionEvent::Updated(id));
    }

    pub fn delete(&mut self, id: Uuid) {
        let Some(index) = self.position(id) else {
            return;
        };
        self.actions.remove(index);
        self.renumber();
        self.persist();
        self.notifier.emit(&QuickActionEvent::Deleted(id));
    }

    pub fn toggle_enabled(&mut self, id: Uuid) {
        let Some(action) = self.actions.iter_mut().find(|a| a.id == id) else {
            return;
        };
        action.is_enabled = !action.is_enabled;
        let is_enabled = action.is_enabled;
        self.persist();
        self.notifier.emit(&QuickActionEvent::Toggled { id, is_enabled });
    }

    /// Move the actions at `from_indices` so they land before the element
    /// that was at `to_index`, keeping their relative order. `to_index`
    /// equal to the length moves them to the end. Out-of-range source
    /// indices are ignored.
    pub fn reorder(&mut self, from_indices: &[usize], to_index: usize) {
        let len = self.actions.len();
        let mut indices: Vec<usize> = from_indices.iter().copied().filter(|&i| i < len).collect();
        indices.sort_unstable();
        indices.dedup();
        if indices.is_empty() {
            return;
        }

        let to_index = to_index.min(len);
        let removed_before_target = indices.iter().filter(|&&i| i < to_index).count();

        let mut moved: Vec<QuickAction> = indices
            .iter()
            .rev()
            .map(|&i| self.actions.remove(i))
            .collect();
        moved.reverse();

        let insert_at = to_index - removed_before_target;
        self.actions.splice(insert_at..insert_at, moved);

        self.renumber();
        self.persist();
        self.notifier.emit(&QuickActionEvent::Reordered);
    }

    /// Swap an action with the one above it
    pub fn move_up(&mut self, id: Uuid) {
        match self.position(id) {
            Some(index) if index > 0 => self.reorder(&[index], index - 1),
            _ => {}
        }
    }

    /// Swap an action with the one below it
    pub fn move_down(&mut self, id: Uuid) {
        match self.position(id) {
            Some(index) if index + 1 < self.actions.len() => self.reorder(&[index], index + 2),
            _ => {}
        }
    }

    /// Replace everything with the built-in defaults
    pub fn reset_to_defaults(&mut self) {
        self.actions = QuickAction::defaults();
        self.mark_initialized();
        self.persist();
        self.notifier.emit(&QuickActionEvent::Reset);
    }

    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&QuickActionEvent) + 'static,
    ) -> SubscriptionId {
        self.notifier.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    fn position(&self, id: Uuid) -> Option<usize> {
        self.actions.iter().position(|a| a.id == id)
    }

    fn renumber(&mut self) {
        for (index, action) in self.actions.iter_mut().enumerate() {
            action.sort_order = index as i32;
        }
    }

    fn mark_initialized(&self) {
        if let Err(e) = self.store.set_flag(QUICK_ACTIONS_INITIALIZED_KEY, true) {
            tracing::warn!("Failed to record quick action initialization: {}", e);
        }
    }

    fn persist(&self) {
        match self.store.set_json(QUICK_ACTIONS_KEY, &self.actions) {
            Ok(()) => tracing::debug!("Persisted {} quick actions", self.actions.len()),
            Err(e) => tracing::warn!("Failed to persist quick actions: {}", e),
        }
    }
}
