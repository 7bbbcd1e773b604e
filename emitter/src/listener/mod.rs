//! Listener types and their live instances.
//!
//! A listener type is a type that may own bound callbacks. Its instances are
//! tracked in a [`Directory`] so that an emit can fan a bound callback out over
//! every live instance.
//!
//! # Example
//!
//! ```rust,ignore
//! use rusty_emitter::Listener;
//!
//! #[derive(Listener)]
//! struct Worker {
//!     ticks: AtomicU32,
//! }
//!
//! emitter.listener::<Worker>();
//! let worker = emitter.spawn(Worker::default())?;
//! ```

mod directory;

use std::{
    any::{Any, TypeId},
    fmt,
    sync::Arc,
};

pub use directory::Directory;

/// A type eligible to own bound callbacks.
///
/// Use `#[derive(Listener)]` to implement this trait with the type's name as
/// its stable name.
///
/// # Trait Bounds
///
/// - `'static`: No borrowed data
/// - `Send + Sync`: Instances are shared between the directory and callers
pub trait Listener: Any + Send + Sync {
    /// Stable name used in diagnostics and errors.
    const NAME: &'static str;
}

/// A type-erased listener instance.
pub type Receiver = Arc<dyn Any + Send + Sync>;

/// Identity of the listener type a callback belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Owner {
    type_id: TypeId,
    name: &'static str,
}

impl Owner {
    /// The owner identity of listener type `T`.
    #[inline]
    pub fn of<T: Listener>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            name: T::NAME,
        }
    }

    /// Get the Rust TypeId of the owning type.
    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Get the stable name of the owning type.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Address of the value behind a receiver, used for instance identity.
#[inline]
pub(crate) fn address_of<T: ?Sized>(instance: &Arc<T>) -> *const () {
    Arc::as_ptr(instance).cast::<()>()
}
