//! Action Registry - ordered store of popup actions.

use std::collections::HashMap;

use crate::error::PopupError;

use super::types::{Action, ActionId};

/// Ordered registry of actions. Order is button order.
#[derive(Debug, Default)]
pub struct ActionRegistry {
    actions: Vec<Action>,
    by_id: HashMap<ActionId, usize>,
}

impl ActionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an action. Ids must be unique.
    pub fn register(&mut self, action: Action) -> Result<(), PopupError> {
        if self.by_id.contains_key(&action.id) {
            return Err(PopupError::DuplicateAction(action.id.0));
        }
        self.by_id.insert(action.id.clone(), self.actions.len());
        self.actions.push(action);
        Ok(())
    }

    /// Remove an action, keeping the order of the rest.
    pub fn remove(&mut self, id: &ActionId) -> Option<Action> {
        let idx = self.by_id.remove(id)?;
        let action = self.actions.remove(idx);
        for slot in self.by_id.values_mut() {
            if *slot > idx {
                *slot -= 1;
            }
        }
        Some(action)
    }

    /// Get an action by ID.
    pub fn get(&self, id: &ActionId) -> Option<&Action> {
        self.by_id.get(id).map(|&idx| &self.actions[idx])
    }

    /// Get all actions in button order.
    pub fn all(&self) -> &[Action] {
        &self.actions
    }

    pub fn ids(&self) -> impl Iterator<Item = &ActionId> {
        self.actions.iter().map(|a| &a.id)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
