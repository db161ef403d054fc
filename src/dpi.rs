//! Per-monitor DPI resolution
//!
//! Lookups run down a fallback chain: the monitor's physical dimensions
//! first, then the `Xft.dpi` resource on the root window, then
//! [`DEFAULT_DPI`]. Ordering and zoning never depend on the result; it is
//! surfaced for callers sizing content per monitor.

use x11rb::resource_manager::Database;

/// DPI assumed when every lookup fails
pub(crate) const DEFAULT_DPI: u32 = 96;

/// Millimeters in an inch
const MM_PER_INCH: f64 = 25.4;

/// Compute DPI from a pixel span and the physical length backing it.
/// Monitors reporting a zero physical size yield nothing
pub(crate) fn dpi_from_physical(pixels: u32, millimeters: u32) -> Option<u32> {
    if pixels == 0 || millimeters == 0 {
        return None;
    }

    let dpi = (f64::from(pixels) * MM_PER_INCH / f64::from(millimeters)).round() as u32;
    (dpi > 0).then(|| dpi)
}

/// Parse an `Xft.dpi`-style value, commonly written as a float
fn parse_dpi(value: &str) -> Option<u32> {
    let dpi = value.trim().parse::<f64>().ok()?;
    (dpi.is_finite() && dpi > 0.0).then(|| dpi.round() as u32)
}

/// DPI advertised by `Xft.dpi` in the root resource database
pub(crate) fn xft_dpi(database: &Database) -> Option<u32> {
    database.get_string("Xft.dpi", "").and_then(parse_dpi)
}

#[cfg(test)]
mod tests {
    use super::{dpi_from_physical, parse_dpi, DEFAULT_DPI};

    #[test]
    fn physical_size_gives_dpi() {
        // A 508mm-wide 1920px panel is exactly 96 dpi
        assert_eq!(dpi_from_physical(1920, 508), Some(96));
        // 13.3" 4K-ish panel lands in hidpi territory
        assert_eq!(dpi_from_physical(3840, 294), Some(332));
    }

    #[test]
    fn zero_physical_size_is_rejected() {
        assert_eq!(dpi_from_physical(0, 508), None);
        assert_eq!(dpi_from_physical(1920, 0), None);
    }

    #[test]
    fn xft_values_parse_as_floats() {
        assert_eq!(parse_dpi("96"), Some(96));
        assert_eq!(parse_dpi(" 192.0 "), Some(192));
        assert_eq!(parse_dpi("120.5"), Some(121));
    }

    #[test]
    fn garbage_xft_values_are_rejected() {
        assert_eq!(parse_dpi("dots"), None);
        assert_eq!(parse_dpi("-96"), None);
        assert_eq!(parse_dpi(""), None);
    }

    #[test]
    fn default_matches_the_x_default() {
        assert_eq!(DEFAULT_DPI, 96);
    }
}
