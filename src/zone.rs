//! Numbered zones laid over the ordered monitors

use crate::{config::ZoneSettings, geometry::Rectangle, monitor::Monitor};
use indexmap::IndexMap;
use serde::Serialize;

// =============================== Zone ===============================
// ====================================================================

/// One cell of a monitor's grid
#[derive(Debug, Clone, Serialize)]
pub(crate) struct Zone {
    /// 1-based index, consecutive across monitors in reading order
    pub(crate) index:   usize,
    /// Ordinal (in reading order) of the owning monitor
    pub(crate) monitor: usize,
    /// Screen rectangle covered by the zone
    pub(crate) rect:    Rectangle,
}

/// Cut `span` pixels into `count` cells separated by `spacing`, returned as
/// `(offset, size)` pairs. The last cell absorbs the division remainder so
/// the cells tile the span exactly
fn span_cells(span: u32, count: u32, spacing: u32) -> Vec<(u32, u32)> {
    let usable = span.saturating_sub(spacing.saturating_mul(count - 1));
    let base = usable / count;
    let remainder = usable % count;

    (0..count)
        .map(|i| {
            let size = if i + 1 == count { base + remainder } else { base };
            (i * (base + spacing), size)
        })
        .collect()
}

/// Split a monitor's (already padded) rectangle into a row-major grid
pub(crate) fn split_grid(
    rect: Rectangle,
    rows: u32,
    columns: u32,
    spacing: u32,
) -> Vec<Rectangle> {
    let mut cells = Vec::with_capacity((rows * columns) as usize);

    for (yoff, height) in span_cells(rect.dimension.height, rows, spacing) {
        for (xoff, width) in span_cells(rect.dimension.width, columns, spacing) {
            cells.push(Rectangle::new(
                rect.point.x + xoff as i32,
                rect.point.y + yoff as i32,
                width,
                height,
            ));
        }
    }

    cells
}

/// Number zones across `monitors`, which must already be in reading order.
/// Zone 1 is the top-left cell of the first monitor; numbering continues
/// across monitors so a layout change never renumbers earlier screens
pub(crate) fn zone_table(monitors: &[Monitor], settings: &ZoneSettings) -> IndexMap<usize, Zone> {
    let rows = settings.rows.max(1);
    let columns = settings.columns.max(1);

    let mut zones = IndexMap::new();
    for (ordinal, monitor) in monitors.iter().enumerate() {
        let padded = monitor.rect - settings.padding;
        for rect in split_grid(padded, rows, columns, settings.spacing) {
            let index = zones.len() + 1;
            zones.insert(index, Zone { index, monitor: ordinal, rect });
        }
    }

    zones
}

#[cfg(test)]
mod tests {
    use super::{span_cells, split_grid, zone_table, Rectangle};
    use crate::{
        config::ZoneSettings,
        geometry::Padding,
        monitor::Monitor,
    };

    /// Build a throwaway [`Monitor`] for zone tests
    fn monitor(name: &str, rect: Rectangle) -> Monitor {
        Monitor {
            name: name.to_owned(),
            rect,
            primary: false,
            width_mm: 0,
            height_mm: 0,
            dpi: 96,
        }
    }

    #[test]
    fn even_split_tiles_exactly() {
        assert_eq!(span_cells(200, 2, 0), vec![(0, 100), (100, 100)]);
    }

    #[test]
    fn remainder_goes_to_the_last_cell() {
        assert_eq!(span_cells(100, 3, 0), vec![(0, 33), (33, 33), (66, 34)]);
    }

    #[test]
    fn spacing_separates_cells() {
        assert_eq!(span_cells(110, 2, 10), vec![(0, 50), (60, 50)]);
    }

    #[test]
    fn grid_is_row_major() {
        let cells = split_grid(Rectangle::new(0, 0, 200, 200), 2, 2, 0);

        assert_eq!(cells, vec![
            Rectangle::new(0, 0, 100, 100),
            Rectangle::new(100, 0, 100, 100),
            Rectangle::new(0, 100, 100, 100),
            Rectangle::new(100, 100, 100, 100),
        ]);
    }

    #[test]
    fn grid_respects_monitor_origin() {
        let cells = split_grid(Rectangle::new(1920, -40, 200, 100), 1, 2, 0);

        assert_eq!(cells, vec![
            Rectangle::new(1920, -40, 100, 100),
            Rectangle::new(2020, -40, 100, 100),
        ]);
    }

    #[test]
    fn numbering_continues_across_monitors() {
        let monitors = vec![
            monitor("eDP-1", Rectangle::new(0, 0, 1920, 1080)),
            monitor("HDMI-A-0", Rectangle::new(1920, 0, 1920, 1080)),
        ];
        let settings = ZoneSettings {
            rows:    2,
            columns: 2,
            spacing: 0,
            padding: Padding::default(),
        };

        let zones = zone_table(&monitors, &settings);

        assert_eq!(zones.len(), 8);
        assert_eq!(zones.keys().copied().collect::<Vec<_>>(), (1..=8).collect::<Vec<_>>());
        assert_eq!(zones[&1].monitor, 0);
        assert_eq!(zones[&5].monitor, 1);
        assert_eq!(zones[&5].rect, Rectangle::new(1920, 0, 960, 540));
    }

    #[test]
    fn padding_shrinks_every_monitor() {
        let monitors = vec![monitor("eDP-1", Rectangle::new(0, 0, 1000, 1000))];
        let settings = ZoneSettings {
            rows:    1,
            columns: 1,
            spacing: 0,
            padding: Padding::new(10, 20, 30, 40),
        };

        let zones = zone_table(&monitors, &settings);

        assert_eq!(zones[&1].rect, Rectangle::new(40, 10, 940, 960));
    }

    #[test]
    fn degenerate_grid_is_clamped_to_one_cell() {
        let monitors = vec![monitor("eDP-1", Rectangle::new(0, 0, 100, 100))];
        let settings = ZoneSettings {
            rows:    0,
            columns: 0,
            spacing: 0,
            padding: Padding::default(),
        };

        let zones = zone_table(&monitors, &settings);

        assert_eq!(zones.len(), 1);
        assert_eq!(zones[&1].rect, Rectangle::new(0, 0, 100, 100));
    }
}
