//! In-process publish/subscribe event broker.
//!
//! An [`Emitter`] lets free functions and listener instances subscribe to named
//! events. Callbacks are registered per event name and dispatched in
//! registration order when the event is emitted:
//!
//! - **Unbound** callbacks ([`Callback::unbound`], [`Callback::associated`]) run
//!   once per emit.
//! - **Bound** callbacks ([`Callback::method`]) run once per live instance of
//!   their [`Listener`] type, in enrollment order.
//!
//! Listener instances are created through [`Emitter::spawn`] (construct, then
//! enroll) and removed with [`Emitter::unlisten`] or a finalizer
//! ([`Emitter::finalize`], [`Emitter::finalizer`]).
//!
//! # Example
//!
//! ```rust,ignore
//! use rusty_emitter::{Callback, Emitter, Listener};
//!
//! #[derive(Listener)]
//! struct Worker {
//!     name: String,
//! }
//!
//! impl Worker {
//!     fn on_tick(&self, n: &u32) {
//!         println!("{} ticked {n}", self.name);
//!     }
//! }
//!
//! let emitter = Emitter::<u32>::new();
//! emitter.listener::<Worker>();
//! emitter.on("tick", Callback::method(Worker::on_tick));
//! emitter.on("tick", Callback::unbound(|n: &u32| println!("tick {n}")));
//!
//! let w1 = emitter.spawn(Worker { name: "w1".into() })?;
//! emitter.emit("tick", &5)?;
//! emitter.finalize(&w1, |_| ());
//! ```

// Lets `#[derive(Listener)]` resolve `::rusty_emitter` inside this crate.
extern crate self as rusty_emitter;

pub mod callback;
pub mod config;
mod emitter;
pub mod error;
pub mod listener;

pub use callback::{Callback, CallbackId, HandlerOutput};
pub use config::{Config, DispatchMode};
pub use emitter::Emitter;
pub use error::{BoxError, Error, Result};
pub use listener::{Listener, Owner, Receiver};
pub use rusty_emitter_macros::Listener;

/// Sets the maximum level of diagnostics the emitter reports.
///
/// This caps the `log` facade globally; an installed logger still applies its
/// own filter on top.
pub fn set_log_level(level: log::LevelFilter) {
    log::set_max_level(level);
}
