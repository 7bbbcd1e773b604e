//! Error types for the emitter.

use crate::callback::CallbackId;

/// Boxed error returned by a failing handler.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors that can occur while registering, enrolling, or dispatching.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// `off` targeted an event/callback pair that is not registered.
    #[error("callback {callback} is not registered for event \"{event}\"")]
    NotFound { event: String, callback: CallbackId },

    /// A bound callback was dispatched but its owning type was never registered
    /// as a listener. Aborts the whole emit.
    #[error(
        "callback {callback} for event \"{event}\" is bound to `{listener}`, which has not been registered as a listener"
    )]
    UnregisteredListenerType {
        event: String,
        callback: CallbackId,
        listener: &'static str,
    },

    /// The listener directory has no entry for this type.
    #[error("listener type `{0}` has not been registered")]
    UnknownListenerType(&'static str),

    /// The instance is not present in its type's live set.
    #[error("instance of `{0}` is not enrolled")]
    NotEnrolled(&'static str),

    /// A handler returned an error while handling an event.
    #[error("callback {callback} failed while handling event \"{event}\"")]
    Handler {
        event: String,
        callback: CallbackId,
        #[source]
        source: BoxError,
    },
}
