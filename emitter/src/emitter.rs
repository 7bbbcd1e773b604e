//! The event broker.
//!
//! [`Emitter`] owns a callback [`Registry`] and a listener [`Directory`] and
//! dispatches emitted events across them:
//!
//! - Unbound callbacks run once per emit with the emit arguments.
//! - Bound callbacks run once per live instance of their owning listener type,
//!   or once per matching receiver for [`emit_to`](Emitter::emit_to).
//!
//! Callbacks fire in registration order; receivers fire in enrollment order.
//!
//! # Example
//!
//! ```rust,ignore
//! use rusty_emitter::{Callback, Emitter, Listener};
//!
//! #[derive(Listener)]
//! struct Worker {
//!     ticks: AtomicU32,
//! }
//!
//! let emitter = Emitter::<u32>::new();
//! emitter.listener::<Worker>();
//! emitter.on("tick", Callback::method(|w: &Worker, n: &u32| {
//!     w.ticks.fetch_add(*n, Ordering::Relaxed);
//! }));
//!
//! let w1 = emitter.spawn(Worker::default())?;
//! let w2 = emitter.spawn(Worker::default())?;
//!
//! emitter.emit("tick", &5)?; // w1 then w2
//! emitter.emit_to("tick", &[w1.clone() as Receiver], &5)?; // w1 only
//! ```
//!
//! # Thread Safety
//!
//! All methods take `&self`. Dispatch works on snapshots of the callback and
//! receiver lists, so handlers may register, remove, enroll, or unenroll while an
//! emit is running; those changes apply from the next emit.

use std::{borrow::Cow, sync::Arc};

use log::{debug, error, trace, warn};

use crate::{
    callback::{Binding, Callback, Registry},
    config::{Config, DispatchMode},
    error::{BoxError, Error, Result},
    listener::{Directory, Listener, Receiver, address_of},
};

/// In-process publish/subscribe broker.
///
/// `A` is the argument type every handler receives.
pub struct Emitter<A = ()> {
    config: Config,
    callbacks: Registry<A>,
    listeners: Directory,
}

impl<A: 'static> Default for Emitter<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: 'static> Emitter<A> {
    /// Creates a new emitter with the default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates a new emitter with the given configuration.
    pub fn with_config(config: Config) -> Self {
        debug!("Emitter created with {config:?}");
        Self {
            config,
            callbacks: Registry::new(),
            listeners: Directory::new(),
        }
    }

    /// Returns the emitter's configuration.
    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    // ==================== Callbacks ====================

    /// Registers `callback` for `event` and hands it back, so it can later be
    /// passed to [`off`](Self::off).
    pub fn on(&self, event: &str, callback: Callback<A>) -> Callback<A> {
        self.callbacks.register(event, callback.clone());
        callback
    }

    /// Removes the first registration of `callback` under `event`.
    pub fn off(&self, event: &str, callback: &Callback<A>) -> Result<()> {
        self.callbacks.unregister(event, callback.id())
    }

    /// The callbacks registered for `event`, in registration order.
    pub fn callbacks(&self, event: &str) -> Vec<Callback<A>> {
        self.callbacks.lookup(event)
    }

    /// Names of the events that currently have callbacks.
    pub fn events(&self) -> Vec<String> {
        self.callbacks.events()
    }

    /// Returns `true` if `event` has at least one callback.
    #[inline]
    pub fn has_listeners(&self, event: &str) -> bool {
        self.callbacks.contains(event)
    }

    // ==================== Listeners ====================

    /// Registers `T` as a listener type.
    ///
    /// Registering the same type again starts it over with no instances.
    pub fn listener<T: Listener>(&self) {
        self.listeners.register::<T>();
    }

    /// Returns `true` if `T` has been registered as a listener type.
    #[inline]
    pub fn is_listener<T: Listener>(&self) -> bool {
        self.listeners.is_registered(std::any::TypeId::of::<T>())
    }

    /// Wraps `value` and enrolls it as a live instance of `T`.
    pub fn spawn<T: Listener>(&self, value: T) -> Result<Arc<T>> {
        let instance = Arc::new(value);
        self.listen(&instance)?;
        Ok(instance)
    }

    /// Runs `init` and enrolls the value it produces.
    ///
    /// Nothing is enrolled when `init` fails.
    pub fn try_spawn<T, E, F>(&self, init: F) -> Result<Arc<T>, E>
    where
        T: Listener,
        E: From<Error>,
        F: FnOnce() -> Result<T, E>,
    {
        let instance = Arc::new(init()?);
        self.listen(&instance)?;
        Ok(instance)
    }

    /// Enrolls `instance` into its type's live set.
    pub fn listen<T: Listener>(&self, instance: &Arc<T>) -> Result<()> {
        self.listeners
            .enroll(Arc::clone(instance), self.config.dedupe_enrollment)
            .map(|_| ())
    }

    /// Removes the first enrolled occurrence of `instance`.
    pub fn unlisten<T: Listener>(&self, instance: &Arc<T>) -> Result<()> {
        self.listeners.unenroll(instance)
    }

    /// The live instances of `T`, in enrollment order.
    pub fn instances<T: Listener>(&self) -> Result<Vec<Arc<T>>> {
        self.listeners.instances::<T>()
    }

    /// Runs `method` on `instance`, then unenrolls the instance.
    ///
    /// The unenroll is best effort: an instance that is not enrolled, or whose
    /// type is unknown, is ignored. Finalizing twice is therefore harmless.
    pub fn finalize<T, R>(&self, instance: &Arc<T>, method: impl FnOnce(&T) -> R) -> R
    where
        T: Listener,
    {
        let output = method(&**instance);
        if let Err(err) = self.unlisten(instance) {
            debug!("Finalized instance {:p} skipped: {err}", address_of(instance));
        }
        output
    }

    /// Wraps `method` so every call is followed by a best-effort unenroll of the
    /// instance it was called on. See [`finalize`](Self::finalize).
    pub fn finalizer<T, F, R>(&self, method: F) -> impl Fn(&Arc<T>) -> R
    where
        T: Listener,
        F: Fn(&T) -> R,
    {
        move |instance: &Arc<T>| self.finalize(instance, &method)
    }

    // ==================== Dispatch ====================

    /// Emits `event` to every registered callback.
    ///
    /// Bound callbacks are called once per live instance of their listener type.
    pub fn emit(&self, event: &str, args: &A) -> Result<()> {
        self.dispatch(event, None, args)
    }

    /// Emits `event`, calling bound callbacks only on `receivers`.
    ///
    /// A bound callback skips receivers that are not instances of its listener
    /// type. Unbound callbacks run as with [`emit`](Self::emit).
    pub fn emit_to(&self, event: &str, receivers: &[Receiver], args: &A) -> Result<()> {
        self.dispatch(event, Some(receivers), args)
    }

    fn dispatch(&self, event: &str, targets: Option<&[Receiver]>, args: &A) -> Result<()> {
        let callbacks = self.callbacks.lookup(event);
        if callbacks.is_empty() {
            debug!("There are no callbacks for the \"{event}\" event, nothing will be done");
            return Ok(());
        }

        for callback in &callbacks {
            match callback.binding() {
                Binding::Unbound { call, .. } => {
                    trace!("Calling {callback} for \"{event}\"");
                    self.settle(event, callback, call(args))?;
                }
                Binding::Bound { owner, call } => {
                    if !self.listeners.is_registered(owner.type_id()) {
                        error!(
                            "Callback {callback} is triggered by \"{event}\" but \"{owner}\" has not been registered as a listener"
                        );
                        return Err(Error::UnregisteredListenerType {
                            event: event.to_owned(),
                            callback: callback.id(),
                            listener: owner.name(),
                        });
                    }

                    let receivers = match targets {
                        Some(targets) => Cow::Borrowed(targets),
                        None => Cow::Owned(self.listeners.instances_of(*owner)?),
                    };
                    for receiver in receivers.iter() {
                        match call(&**receiver, args) {
                            Some(result) => {
                                trace!(
                                    "Called {callback} on {:p} for \"{event}\"",
                                    address_of(receiver)
                                );
                                self.settle(event, callback, result)?;
                            }
                            None => trace!(
                                "Skipped {:p} for {callback}, not a \"{owner}\"",
                                address_of(receiver)
                            ),
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Applies the dispatch mode to a handler result.
    fn settle(
        &self,
        event: &str,
        callback: &Callback<A>,
        result: Result<(), BoxError>,
    ) -> Result<()> {
        let Err(source) = result else {
            return Ok(());
        };
        match self.config.dispatch {
            DispatchMode::FailFast => Err(Error::Handler {
                event: event.to_owned(),
                callback: callback.id(),
                source,
            }),
            DispatchMode::Isolated => {
                warn!("Callback {callback} failed while handling \"{event}\": {source}");
                Ok(())
            }
        }
    }
}
