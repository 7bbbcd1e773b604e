//! Callbacks and the per-event callback registry.
//!
//! A [`Callback`] is a registration record: an identity, an optional owning
//! listener type, and a handler. How the handler is dispatched is decided when
//! the callback is built, not inferred later:
//!
//! | Constructor | Owner | Dispatch |
//! |-------------|-------|----------|
//! | [`Callback::unbound`] | none | once per emit |
//! | [`Callback::associated`] | `T` | once per emit (type-level member of `T`) |
//! | [`Callback::method`] | `T` | once per live instance of `T` |
//!
//! Cloning a callback keeps its [`CallbackId`], so a clone can be passed to
//! `off` to remove the original registration.

mod registry;

use std::{
    any::Any,
    fmt,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

pub use registry::Registry;

use crate::{
    error::BoxError,
    listener::{Listener, Owner},
};

/// Next available callback identifier.
static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a callback, shared by all of its clones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CallbackId(u64);

impl CallbackId {
    fn next() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for CallbackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Values a handler may return.
///
/// Handlers either return nothing or a `Result` whose error can be boxed. An
/// error stops the emit unless the emitter runs in isolated mode.
pub trait HandlerOutput {
    /// Convert into the broker's handler result.
    fn into_result(self) -> Result<(), BoxError>;
}

impl HandlerOutput for () {
    #[inline]
    fn into_result(self) -> Result<(), BoxError> {
        Ok(())
    }
}

impl<E: Into<BoxError>> HandlerOutput for Result<(), E> {
    #[inline]
    fn into_result(self) -> Result<(), BoxError> {
        self.map_err(Into::into)
    }
}

type UnboundFn<A> = dyn Fn(&A) -> Result<(), BoxError> + Send + Sync;

/// Returns `None` when the receiver is not an instance of the owning type.
type BoundFn<A> = dyn Fn(&(dyn Any + Send + Sync), &A) -> Option<Result<(), BoxError>> + Send + Sync;

/// How a callback is invoked.
pub(crate) enum Binding<A> {
    /// Invoked once with the emit arguments.
    Unbound {
        owner: Option<Owner>,
        call: Arc<UnboundFn<A>>,
    },
    /// Invoked once per receiver of the owning type.
    Bound { owner: Owner, call: Arc<BoundFn<A>> },
}

impl<A> Clone for Binding<A> {
    fn clone(&self) -> Self {
        match self {
            Binding::Unbound { owner, call } => Binding::Unbound {
                owner: *owner,
                call: Arc::clone(call),
            },
            Binding::Bound { owner, call } => Binding::Bound {
                owner: *owner,
                call: Arc::clone(call),
            },
        }
    }
}

/// A handler registered for an event.
pub struct Callback<A> {
    id: CallbackId,
    binding: Binding<A>,
}

impl<A: 'static> Callback<A> {
    /// A free-standing callback, invoked once per emit.
    pub fn unbound<F, R>(handler: F) -> Self
    where
        F: Fn(&A) -> R + Send + Sync + 'static,
        R: HandlerOutput,
    {
        Self::new_unbound(None, handler)
    }

    /// A type-level member of listener `T`, invoked once per emit.
    ///
    /// The owner is only recorded for diagnostics. Dispatch does not check that
    /// `T` is registered, so an emit never fails with
    /// [`Error::UnregisteredListenerType`](crate::Error::UnregisteredListenerType)
    /// because of an associated callback.
    pub fn associated<T, F, R>(handler: F) -> Self
    where
        T: Listener,
        F: Fn(&A) -> R + Send + Sync + 'static,
        R: HandlerOutput,
    {
        Self::new_unbound(Some(Owner::of::<T>()), handler)
    }

    /// An instance-level member of listener `T`, invoked once per live instance.
    pub fn method<T, F, R>(handler: F) -> Self
    where
        T: Listener,
        F: Fn(&T, &A) -> R + Send + Sync + 'static,
        R: HandlerOutput,
    {
        let call: Arc<BoundFn<A>> =
            Arc::new(move |receiver: &(dyn Any + Send + Sync), args: &A| {
                receiver
                    .downcast_ref::<T>()
                    .map(|instance| handler(instance, args).into_result())
            });
        Self {
            id: CallbackId::next(),
            binding: Binding::Bound {
                owner: Owner::of::<T>(),
                call,
            },
        }
    }

    fn new_unbound<F, R>(owner: Option<Owner>, handler: F) -> Self
    where
        F: Fn(&A) -> R + Send + Sync + 'static,
        R: HandlerOutput,
    {
        let call: Arc<UnboundFn<A>> = Arc::new(move |args: &A| handler(args).into_result());
        Self {
            id: CallbackId::next(),
            binding: Binding::Unbound { owner, call },
        }
    }
}

impl<A> Callback<A> {
    /// Get the identity of this callback.
    #[inline]
    pub fn id(&self) -> CallbackId {
        self.id
    }

    /// Get the listener type this callback belongs to, if any.
    #[inline]
    pub fn owner(&self) -> Option<Owner> {
        match &self.binding {
            Binding::Unbound { owner, .. } => *owner,
            Binding::Bound { owner, .. } => Some(*owner),
        }
    }

    /// Returns `true` if the callback is invoked per instance.
    #[inline]
    pub fn is_bound(&self) -> bool {
        matches!(self.binding, Binding::Bound { .. })
    }

    #[inline]
    pub(crate) fn binding(&self) -> &Binding<A> {
        &self.binding
    }
}

impl<A> Clone for Callback<A> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            binding: self.binding.clone(),
        }
    }
}

impl<A> fmt::Debug for Callback<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("id", &self.id)
            .field("owner", &self.owner())
            .field("bound", &self.is_bound())
            .finish()
    }
}

impl<A> fmt::Display for Callback<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.owner() {
            Some(owner) => write!(f, "{owner}::{}", self.id),
            None => write!(f, "{}", self.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Worker {
        base: u32,
    }
    impl Listener for Worker {
        const NAME: &'static str = "Worker";
    }

    struct Monitor;
    impl Listener for Monitor {
        const NAME: &'static str = "Monitor";
    }

    fn call_unbound(callback: &Callback<u32>, args: u32) -> Result<(), BoxError> {
        match callback.binding() {
            Binding::Unbound { call, .. } => call(&args),
            Binding::Bound { .. } => panic!("expected an unbound callback"),
        }
    }

    fn call_bound(
        callback: &Callback<u32>,
        receiver: &(dyn Any + Send + Sync),
        args: u32,
    ) -> Option<Result<(), BoxError>> {
        match callback.binding() {
            Binding::Bound { call, .. } => call(receiver, &args),
            Binding::Unbound { .. } => panic!("expected a bound callback"),
        }
    }

    // ==================== Classification ====================

    #[test]
    fn unbound_has_no_owner() {
        let callback = Callback::<u32>::unbound(|_| {});

        assert!(!callback.is_bound());
        assert_eq!(callback.owner(), None);
    }

    #[test]
    fn associated_records_owner_but_is_unbound() {
        let callback = Callback::<u32>::associated::<Worker, _, _>(|_| {});

        assert!(!callback.is_bound());
        assert_eq!(callback.owner(), Some(Owner::of::<Worker>()));
    }

    #[test]
    fn method_is_bound_to_owner() {
        let callback = Callback::<u32>::method(|_: &Worker, _| {});

        assert!(callback.is_bound());
        assert_eq!(callback.owner().map(|o| o.name()), Some("Worker"));
    }

    // ==================== Identity ====================

    #[test]
    fn each_callback_gets_a_new_id() {
        let a = Callback::<u32>::unbound(|_| {});
        let b = Callback::<u32>::unbound(|_| {});

        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn clone_shares_id() {
        let a = Callback::<u32>::unbound(|_| {});

        assert_eq!(a.clone().id(), a.id());
    }

    #[test]
    fn display_includes_owner() {
        let callback = Callback::<u32>::method(|_: &Worker, _| {});

        assert_eq!(callback.to_string(), format!("Worker::{}", callback.id()));
    }

    // ==================== Invocation ====================

    #[test]
    fn unbound_handler_output_unit_is_ok() {
        let callback = Callback::<u32>::unbound(|_| {});

        assert!(call_unbound(&callback, 1).is_ok());
    }

    #[test]
    fn unbound_handler_error_is_boxed() {
        let callback = Callback::<u32>::unbound(|n: &u32| {
            if *n > 3 { Err("too large") } else { Ok(()) }
        });

        assert!(call_unbound(&callback, 1).is_ok());
        let err = call_unbound(&callback, 4).unwrap_err();
        assert_eq!(err.to_string(), "too large");
    }

    #[test]
    fn bound_handler_receives_instance() {
        // Given
        let callback = Callback::<u32>::method(|w: &Worker, n: &u32| {
            if w.base + n == 10 { Ok(()) } else { Err("wrong sum") }
        });
        let worker = Worker { base: 4 };

        // When
        let result = call_bound(&callback, &worker, 6);

        // Then
        assert!(matches!(result, Some(Ok(()))));
    }

    #[test]
    fn bound_handler_skips_other_types() {
        let callback = Callback::<u32>::method(|_: &Worker, _| {});

        assert!(call_bound(&callback, &Monitor, 1).is_none());
    }
}
