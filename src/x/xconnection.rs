//! The connection to the X-Server and the queries made over it

use crate::{
    dpi::{self, DEFAULT_DPI},
    error::Error,
    geometry::Rectangle,
    monitor::Monitor,
    xzones_info,
};
use anyhow::{Context, Result};
use psutil::process::Process;
use std::{path::PathBuf, str, thread, time::Duration};
use x11rb::{
    atom_manager,
    connection::Connection,
    properties::WmClass,
    protocol::{
        randr::ConnectionExt as _,
        xproto::{self, Atom, AtomEnum, ConfigureWindowAux, ConnectionExt, StackMode, Window},
    },
    resource_manager::Database,
    rust_connection::RustConnection,
};

/// Default string for missing values
const MISSING_VALUE: &str = "N/A";

/// `WM_STATE` value of an iconified (minimized) window
const ICCCM_ICONIC_STATE: u32 = 3;

/// How often a settling minimize is re-checked before snapping
const HIDDEN_POLLS: usize = 5;

/// Pause between those re-checks
const HIDDEN_POLL_INTERVAL: Duration = Duration::from_millis(100);

// =============================== Atoms ============================== [[[

/// An [`Atom`] is a unique ID corresponding to a string name that is used to
/// identify properties, types, and selections. See the [Client Properties][1]
/// and [Extended Properties][2] for more information
///
/// [1]: https://specifications.freedesktop.org/wm-spec/wm-spec-latest.html#idm45381393900464
/// [2]: https://tronche.com/gui/x/icccm/sec-4.html#s-4.1.2
atom_manager! {
    pub(crate) Atoms: AtomsCookie {
        // ========== ICCCM window manager properties ======
        // Top-level windows not in withdrawn have this tag
        WM_STATE,

        // ============== EWMH root properties =============
        // Window ID of active window or none if no window is focused
        _NET_ACTIVE_WINDOW,

        // ========== EWMH application properties ==========
        _NET_WM_PID,
        _NET_WM_STATE,
        _NET_WM_WINDOW_TYPE,

        // === EWMH window states ===
        _NET_WM_STATE_HIDDEN,
        _NET_WM_STATE_FULLSCREEN,

        // =============== EWMH window types ===============
        _NET_WM_WINDOW_TYPE_DOCK,
        _NET_WM_WINDOW_TYPE_DESKTOP,
        _NET_WM_WINDOW_TYPE_TOOLBAR,
        _NET_WM_WINDOW_TYPE_NOTIFICATION,
    }
}

// ]]] === Atoms ===

// ============================ XConnection =========================== [[[

/// Wrapper around a [`RustConnection`] and the state needed to query it
pub(crate) struct XConnection {
    /// The actual connection to the X-Server
    conn:     RustConnection,
    /// The index of the screen the connection was made on
    screen:   usize,
    /// Interned [`Atoms`] used for property queries
    atoms:    Atoms,
    /// Root resource database, consulted for the `Xft.dpi` fallback
    database: Option<Database>,
}

impl XConnection {
    /// Create a new [`XConnection`]
    pub(crate) fn new(conn: RustConnection, screen_num: usize) -> Result<Self> {
        let atoms = Atoms::new(&conn)
            .context("failed to intern atoms")?
            .reply()
            .context("failed to get atoms reply")?;

        let database = Database::new_from_default(&conn)
            .context("failed to get resource database")
            .ok();

        Ok(Self { conn, screen: screen_num, atoms, database })
    }

    // ========================== Accessor ==========================

    /// The underlying connection
    pub(crate) const fn aux(&self) -> &RustConnection {
        &self.conn
    }

    /// The root window of the connected screen
    pub(crate) fn root(&self) -> Window {
        self.conn.setup().roots[self.screen].root
    }

    /// The interned [`Atoms`]
    pub(crate) const fn atoms(&self) -> Atoms {
        self.atoms
    }

    // ========================== Monitors ==========================

    /// Enumerate the connected monitors, in whatever order the server
    /// reports them
    pub(crate) fn monitors(&self) -> Result<Vec<Monitor>> {
        let reply = self
            .aux()
            .randr_get_monitors(self.root(), true)
            .context("failed to query `randr` monitors")?
            .reply()
            .context("failed to get `randr` monitors reply")?;

        let xft = self.database.as_ref().and_then(dpi::xft_dpi);

        let mut monitors = Vec::with_capacity(reply.monitors.len());
        for info in &reply.monitors {
            let rect = Rectangle::new(
                i32::from(info.x),
                i32::from(info.y),
                u32::from(info.width),
                u32::from(info.height),
            );
            let dpi = dpi::dpi_from_physical(u32::from(info.width), info.width_in_millimeters)
                .or(xft)
                .unwrap_or(DEFAULT_DPI);

            monitors.push(Monitor {
                name: self
                    .get_atom_name(info.name)
                    .unwrap_or_else(|_| String::from(MISSING_VALUE)),
                rect,
                primary: info.primary,
                width_mm: info.width_in_millimeters,
                height_mm: info.height_in_millimeters,
                dpi,
            });
        }

        log::debug!("found {} monitor(s)", monitors.len());
        Ok(monitors)
    }

    /// Resolve an [`Atom`] to its string name
    pub(crate) fn get_atom_name(&self, atom: Atom) -> Result<String> {
        let reply = self
            .aux()
            .get_atom_name(atom)
            .context("failed to get atom name")?
            .reply()
            .context("failed to get atom name reply")?;

        String::from_utf8(reply.name).context("atom name is not valid UTF-8")
    }

    // ====================== Window Information ====================

    /// The window currently holding input focus
    pub(crate) fn active_window(&self) -> Result<Window> {
        log::debug!("getting `_NET_ACTIVE_WINDOW`");
        let reply = self
            .aux()
            .get_property(
                false,
                self.root(),
                self.atoms()._NET_ACTIVE_WINDOW,
                AtomEnum::WINDOW,
                0,
                1,
            )
            .context("failed to get `_NET_ACTIVE_WINDOW`")?
            .reply()
            .context("failed to get `_NET_ACTIVE_WINDOW` reply")?;

        let mut values = reply
            .value32()
            .ok_or_else(|| Error::InvalidProperty(String::from("_NET_ACTIVE_WINDOW")))?;

        values
            .next()
            .filter(|&window| window != x11rb::NONE)
            .ok_or_else(|| Error::NoActiveWindow.into())
    }

    /// Get an `icccm` window's class contained in the `WM_CLASS` property
    pub(crate) fn get_icccm_window_class(&self, window: Window) -> String {
        log::debug!("requesting Window({:#0x})'s `WM_CLASS` property", window);
        WmClass::get(self.aux(), window).map_or(String::from(MISSING_VALUE), |cookie| {
            cookie.reply().map_or(String::from(MISSING_VALUE), |reply| {
                str::from_utf8(reply.class()).map_or(String::from(MISSING_VALUE), String::from)
            })
        })
    }

    /// Get an `icccm` window's instance contained in the `WM_CLASS` property
    pub(crate) fn get_icccm_window_instance(&self, window: Window) -> String {
        log::debug!("requesting Window({:#0x})'s `WM_CLASS` property", window);
        WmClass::get(self.aux(), window).map_or(String::from(MISSING_VALUE), |cookie| {
            cookie.reply().map_or(String::from(MISSING_VALUE), |reply| {
                str::from_utf8(reply.instance()).map_or(String::from(MISSING_VALUE), String::from)
            })
        })
    }

    /// The PID advertised through `_NET_WM_PID`, if any
    pub(crate) fn get_window_pid(&self, window: Window) -> Option<u32> {
        log::debug!("getting `_NET_WM_PID` for Window({:#0x})", window);
        self.aux()
            .get_property(
                false,
                window,
                self.atoms()._NET_WM_PID,
                AtomEnum::CARDINAL,
                0,
                1,
            )
            .ok()?
            .reply()
            .ok()?
            .value32()?
            .next()
    }

    /// Absolute path of the process backing the window, when discoverable
    pub(crate) fn process_path(&self, window: Window) -> Option<PathBuf> {
        let pid = self.get_window_pid(window)?;
        Process::new(pid).ok()?.exe().ok()
    }

    // ======================= Testing Values =======================

    /// Check whether the window is in any of the given [`states`](Atom)
    pub(crate) fn window_is_any_of_states(&self, window: Window, states: &[Atom]) -> bool {
        log::debug!(
            "checking if Window({:#0x}) has any of states {:?}",
            window,
            states
        );
        self.aux()
            .get_property(
                false,
                window,
                self.atoms()._NET_WM_STATE,
                AtomEnum::ATOM,
                0,
                u32::MAX,
            )
            .map_or(false, |cookie| {
                cookie.reply().map_or(false, |reply| {
                    reply.value32().map_or(false, |mut window_states| {
                        window_states.any(|state| states.contains(&state))
                    })
                })
            })
    }

    /// Check whether the window is any of the given [`types`](Atom)
    pub(crate) fn window_is_any_of_types(&self, window: Window, types: &[Atom]) -> bool {
        log::debug!(
            "checking if Window({:#0x}) is any of types {:?}",
            window,
            types
        );
        self.aux()
            .get_property(
                false,
                window,
                self.atoms()._NET_WM_WINDOW_TYPE,
                AtomEnum::ATOM,
                0,
                u32::MAX,
            )
            .map_or(false, |cookie| {
                cookie.reply().map_or(false, |reply| {
                    reply.value32().map_or(false, |mut window_types| {
                        window_types.any(|type_| types.contains(&type_))
                    })
                })
            })
    }

    /// Check the ICCCM `WM_STATE` property for an iconified window
    pub(crate) fn window_is_iconified(&self, window: Window) -> bool {
        log::debug!("checking `WM_STATE` for Window({:#0x})", window);
        self.aux()
            .get_property(
                false,
                window,
                self.atoms().WM_STATE,
                self.atoms().WM_STATE,
                0,
                2,
            )
            .map_or(false, |cookie| {
                cookie.reply().map_or(false, |reply| {
                    reply.value32().map_or(false, |mut value| {
                        value.next() == Some(ICCCM_ICONIC_STATE)
                    })
                })
            })
    }

    /// Test whether the window is minimized by either convention
    pub(crate) fn window_is_hidden(&self, window: Window) -> bool {
        self.window_is_iconified(window)
            || self.window_is_any_of_states(window, &[self.atoms()._NET_WM_STATE_HIDDEN])
    }

    /// Test whether the window is in fullscreen
    pub(crate) fn window_is_fullscreen(&self, window: Window) -> bool {
        log::debug!(
            "checking `_NET_WM_STATE_FULLSCREEN` for Window({:#0x})",
            window
        );
        self.window_is_any_of_states(window, &[self.atoms()._NET_WM_STATE_FULLSCREEN])
    }

    /// Should this [`Window`] ever be placed into a zone?
    pub(crate) fn must_zone_window(&self, window: Window) -> bool {
        log::debug!("checking if Window({:#0x}) is zonable", window);
        let do_not_zone = self
            .aux()
            .get_window_attributes(window)
            .map_or(false, |cookie| {
                cookie.reply().map_or(false, |reply| {
                    reply.override_redirect || reply.class == xproto::WindowClass::INPUT_ONLY
                })
            });

        if do_not_zone || self.window_is_fullscreen(window) {
            return false;
        }

        let to_exclude = &[
            self.atoms()._NET_WM_WINDOW_TYPE_DOCK,
            self.atoms()._NET_WM_WINDOW_TYPE_DESKTOP,
            self.atoms()._NET_WM_WINDOW_TYPE_TOOLBAR,
            self.atoms()._NET_WM_WINDOW_TYPE_NOTIFICATION,
        ];

        !self.window_is_any_of_types(window, to_exclude)
    }

    // ========================= Placement ==========================

    /// Place a [`Window`] on the screen
    pub(crate) fn place_window(&self, window: Window, rect: Rectangle) -> Result<()> {
        log::debug!("placing Window({:#0x}): {}", window, rect);
        self.aux()
            .configure_window(window, &rect.to_aux())
            .context(format!("failed to place Window({:#0x})", window))?
            .check()
            .context(format!("failed to check placing Window({:#0x})", window))?;

        Ok(())
    }

    /// Map the window and raise it to the top of the stack
    pub(crate) fn restore_window(&self, window: Window) -> Result<()> {
        log::debug!("restoring Window({:#0x})", window);
        self.aux()
            .map_window(window)
            .context(format!("failed to map Window({:#0x})", window))?
            .check()
            .context(format!("failed to check mapping Window({:#0x})", window))?;

        self.aux()
            .configure_window(window, &ConfigureWindowAux::new().stack_mode(StackMode::ABOVE))
            .context(format!("failed to raise Window({:#0x})", window))?
            .check()
            .context(format!("failed to check raising Window({:#0x})", window))?;

        Ok(())
    }

    /// Apply `rect` to `window`, restoring it from a minimized state first
    /// when possible
    pub(crate) fn snap_window(&self, window: Window, rect: Rectangle) -> Result<()> {
        // Let an in-flight minimize settle before deciding whether to restore
        for _ in 0..HIDDEN_POLLS {
            if !self.window_is_hidden(window) {
                break;
            }
            thread::sleep(HIDDEN_POLL_INTERVAL);
        }

        if self.window_is_hidden(window) {
            // Minimized windows keep their state; the geometry still takes
            // effect so they reappear in the right zone
            xzones_info!(
                "Window({:#0x}) is minimized; it will restore into the zone",
                window
            );
        } else {
            self.restore_window(window)?;
        }

        // Applied twice: the second configure lands after any resize the
        // client performs in reaction to the first
        self.place_window(window, rect)?;
        self.place_window(window, rect)?;

        self.aux().flush().context("failed to flush the connection")?;
        Ok(())
    }
}

// ]]] === XConnection ===
