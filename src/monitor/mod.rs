//! The [`Monitor`] model and its canonical ordering

pub(crate) mod order;

use crate::geometry::Rectangle;
use serde::Serialize;

/// A physical monitor and its placement on the X screen
#[derive(Debug, Clone, Serialize)]
pub(crate) struct Monitor {
    /// RandR name of the output (`eDP-1`, `HDMI-A-0`, ...)
    pub(crate) name:      String,
    /// Placement in virtual-screen coordinates
    pub(crate) rect:      Rectangle,
    /// Whether the server reports this monitor as primary
    pub(crate) primary:   bool,
    /// Physical width in millimeters, zero when unknown
    pub(crate) width_mm:  u32,
    /// Physical height in millimeters, zero when unknown
    pub(crate) height_mm: u32,
    /// Resolved dots-per-inch (see [`dpi`](crate::dpi))
    pub(crate) dpi:       u32,
}

impl Monitor {
    /// The monitor's rectangle
    pub(crate) const fn rect(&self) -> Rectangle {
        self.rect
    }
}
