//! Various utilities specifically dealing with X

use crate::{error::Error, xzones_fatal};
use anyhow::{Context, Result};

use x11rb::{
    connection::RequestConnection,
    protocol::randr::{self, ConnectionExt as _},
    rust_connection::RustConnection,
};

// ============================= XUtility =============================

/// Ensure the server offers the given extension at all
fn use_extension(conn: &RustConnection, extension: &'static str) -> Result<()> {
    conn.extension_information(extension)
        .context(format!("failed to query the `{}` extension", extension))?
        .ok_or(Error::ExtensionUnsupported(extension))?;

    Ok(())
}

/// Wrapper to do basic X11 commands
pub(crate) struct XUtility;

impl XUtility {
    /// Setup the X11 [`Connection`](RustConnection)
    pub(crate) fn setup_connection() -> Result<(RustConnection, usize), Error> {
        RustConnection::connect(None).map_err(Error::Connection)
    }

    /// Verify the server speaks a `randr` version with monitor queries
    pub(crate) fn check_randr(conn: &RustConnection) -> Result<()> {
        use_extension(conn, randr::X11_EXTENSION_NAME)?;

        let (min, max) = randr::X11_XML_VERSION;
        if let Err(e) = conn.randr_query_version(min, max) {
            xzones_fatal!(
                "`randr` version is unsupported. Supported versions: {}-{}: {}",
                min,
                max,
                e
            );
        };
        log::debug!("`randr` extension is up to date: {}-{}", min, max);

        Ok(())
    }
}
