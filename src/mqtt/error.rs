//! Error definitions for the listener module.

use thiserror::Error;

/// Errors that can end a listener run.
///
/// Payload decoding deliberately has no variant here: the decode is total
/// (invalid bytes are replaced, never surfaced), so message handling has
/// no error path back to the caller.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// Transport or handshake failure. The broker was unreachable, refused
    /// the session, or the connection dropped. Not retried; propagates to
    /// the process boundary.
    #[error("Connection error: {0}")]
    Connection(String),

    /// The subscribe request could not be issued to the client.
    #[error("Subscribe error: {0}")]
    Subscribe(String),
}
