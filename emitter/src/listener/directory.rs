//! Directory of registered listener types and their enrolled instances.
//!
//! Each registered type owns an insertion-ordered list of live instances. The
//! order is the order bound callbacks visit receivers during an emit.
//!
//! # Thread Safety
//!
//! Entries live in a `DashMap` keyed by `TypeId`. Readers get a snapshot of the
//! instance list, so no shard lock is held while handlers run.

use std::{any::TypeId, sync::Arc};

use dashmap::DashMap;
use log::debug;

use crate::{
    error::{Error, Result},
    listener::{Listener, Owner, Receiver, address_of},
};

/// A registered listener type and its live instances.
struct Entry {
    owner: Owner,
    instances: Vec<Receiver>,
}

/// Tracks registered listener types and their enrolled instances.
#[derive(Default)]
pub struct Directory {
    types: DashMap<TypeId, Entry>,
}

impl Directory {
    /// Create a new, empty directory.
    #[inline]
    pub fn new() -> Self {
        Self {
            types: DashMap::new(),
        }
    }

    /// Register `T` as a listener type with an empty instance list.
    ///
    /// Registering a type again replaces its entry, dropping every instance
    /// enrolled so far.
    pub fn register<T: Listener>(&self) {
        let owner = Owner::of::<T>();
        let previous = self.types.insert(
            owner.type_id(),
            Entry {
                owner,
                instances: Vec::new(),
            },
        );
        match previous {
            Some(entry) => debug!(
                "Listener type \"{owner}\" re-registered, {} instance(s) dropped",
                entry.instances.len()
            ),
            None => debug!("Listener type \"{owner}\" registered"),
        }
    }

    /// Returns `true` if the type has been registered.
    #[inline]
    pub fn is_registered(&self, type_id: TypeId) -> bool {
        self.types.contains_key(&type_id)
    }

    /// Append `instance` to its type's live list.
    ///
    /// With `dedupe` set, an instance that is already enrolled is left alone.
    /// Returns `true` if the instance was appended.
    pub fn enroll<T: Listener>(&self, instance: Arc<T>, dedupe: bool) -> Result<bool> {
        let mut entry = self
            .types
            .get_mut(&TypeId::of::<T>())
            .ok_or(Error::UnknownListenerType(T::NAME))?;

        let address = address_of(&instance);
        if dedupe && entry.instances.iter().any(|r| address_of(r) == address) {
            debug!("Instance {address:p} of \"{}\" already enrolled", T::NAME);
            return Ok(false);
        }

        entry.instances.push(instance);
        debug!("Instance {address:p} of \"{}\" is now a listener", T::NAME);
        Ok(true)
    }

    /// Remove the first enrolled occurrence of `instance`.
    pub fn unenroll<T: Listener>(&self, instance: &Arc<T>) -> Result<()> {
        let mut entry = self
            .types
            .get_mut(&TypeId::of::<T>())
            .ok_or(Error::UnknownListenerType(T::NAME))?;

        let address = address_of(instance);
        let index = entry
            .instances
            .iter()
            .position(|r| address_of(r) == address)
            .ok_or(Error::NotEnrolled(T::NAME))?;

        entry.instances.remove(index);
        debug!("Instance {address:p} of \"{}\" is no longer a listener", T::NAME);
        Ok(())
    }

    /// Snapshot of the live instances of `owner`, in enrollment order.
    pub fn instances_of(&self, owner: Owner) -> Result<Vec<Receiver>> {
        self.types
            .get(&owner.type_id())
            .map(|entry| entry.instances.clone())
            .ok_or(Error::UnknownListenerType(owner.name()))
    }

    /// Typed snapshot of the live instances of `T`, in enrollment order.
    pub fn instances<T: Listener>(&self) -> Result<Vec<Arc<T>>> {
        Ok(self
            .instances_of(Owner::of::<T>())?
            .into_iter()
            .filter_map(|receiver| receiver.downcast::<T>().ok())
            .collect())
    }

    /// Get the registered owner identity for a type, if any.
    #[inline]
    pub fn owner(&self, type_id: TypeId) -> Option<Owner> {
        self.types.get(&type_id).map(|entry| entry.owner)
    }

    /// Get the number of registered listener types.
    #[inline]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Check if no listener type is registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
