//! Per-event callback storage.
//!
//! The [`Registry`] maps event names to the ordered list of callbacks
//! registered for them. An event key only exists while at least one callback
//! is registered under it.

use dashmap::DashMap;
use log::debug;

use crate::{
    callback::{Callback, CallbackId},
    error::{Error, Result},
};

/// Ordered callbacks grouped by event name.
pub struct Registry<A> {
    events: DashMap<String, Vec<Callback<A>>>,
}

impl<A> Default for Registry<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Registry<A> {
    /// Create a new, empty registry.
    #[inline]
    pub fn new() -> Self {
        Self {
            events: DashMap::new(),
        }
    }

    /// Append `callback` to the list for `event`.
    ///
    /// The same callback may be registered more than once; each registration is
    /// invoked separately.
    pub fn register(&self, event: &str, callback: Callback<A>) {
        debug!("Callback {callback} registered for the \"{event}\" event");
        self.events
            .entry(event.to_owned())
            .or_default()
            .push(callback);
    }

    /// Remove the first registration of `id` under `event`.
    ///
    /// Removing the last callback of an event removes the event key.
    pub fn unregister(&self, event: &str, id: CallbackId) -> Result<()> {
        let not_found = || Error::NotFound {
            event: event.to_owned(),
            callback: id,
        };

        let now_empty = {
            let mut callbacks = self.events.get_mut(event).ok_or_else(not_found)?;
            let index = callbacks
                .iter()
                .position(|c| c.id() == id)
                .ok_or_else(not_found)?;
            callbacks.remove(index);
            callbacks.is_empty()
        };

        if now_empty {
            self.events.remove_if(event, |_, callbacks| callbacks.is_empty());
        }
        debug!("Callback {id} unregistered from the \"{event}\" event");
        Ok(())
    }

    /// Snapshot of the callbacks for `event`, in registration order.
    ///
    /// Unknown events yield an empty list.
    pub fn lookup(&self, event: &str) -> Vec<Callback<A>> {
        self.events
            .get(event)
            .map(|callbacks| callbacks.value().clone())
            .unwrap_or_default()
    }

    /// Returns `true` if at least one callback is registered for `event`.
    #[inline]
    pub fn contains(&self, event: &str) -> bool {
        self.events.contains_key(event)
    }

    /// Names of all events with at least one callback, in no particular order.
    pub fn events(&self) -> Vec<String> {
        self.events.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Get the number of events with at least one callback.
    #[inline]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if no callback is registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
