//! Errors found throughout this crate

use thiserror::Error;
use x11rb::errors::ConnectError;

/// Errors that occur from interacting with the X-Server
#[derive(Debug, Error)]
pub(crate) enum Error {
    /// Invalid property (`Atom`) queried for
    #[error("the property {0} was not found on this server")]
    InvalidProperty(String),

    /// Failure to connect to the server
    #[error("failed to connect to the X11 server: {0}")]
    Connection(#[from] ConnectError),

    /// A required extension is missing from the server
    #[error("the `{0}` extension is unsupported by this server")]
    ExtensionUnsupported(&'static str),

    /// No window holds input focus and none was given on the command line
    #[error("no active window to snap; pass --window")]
    NoActiveWindow,

    /// Requested zone index is not in the zone table
    #[error("zone {0} does not exist ({1} zones are defined)")]
    UnknownZone(usize, usize),
}
