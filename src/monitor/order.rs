//! Deterministic reading order for monitors

use super::Monitor;
use crate::geometry::Rectangle;

/// Compute the canonical reading order of `rects`, returned as indices into
/// the input slice.
///
/// A monitor placed far enough above-or-left of another "blocks" it and is
/// listed first; ties are broken by the lexicographically smallest
/// `(top, left)` corner, so grid-like layouts come out top-to-bottom, then
/// left-to-right. Rectangles that tie in both the relation and the corner
/// keep their input order.
///
/// Total over any input, including zero-area, nested, or identical
/// rectangles; the output is always a permutation of `0..rects.len()`.
pub(crate) fn reading_order(rects: &[Rectangle]) -> Vec<usize> {
    let n = rects.len();

    // blocks[i][j]: whether monitor i blocks monitor j, i.e. i must be
    // placed before j. Directional, and not a partial order: two
    // overlapping monitors can block each other.
    let mut blocks = vec![vec![false; n]; n];

    // blocked_by[j]: the number of unplaced monitors which block monitor j
    let mut blocked_by = vec![0_usize; n];

    for i in 0..n {
        for j in 0..n {
            if i != j && rects[i].top() < rects[j].bottom() && rects[i].left() < rects[j].right() {
                blocks[i][j] = true;
                blocked_by[j] += 1;
            }
        }
    }

    let mut placed = vec![false; n];
    let mut order = Vec::with_capacity(n);

    for _ in 0..n {
        // Unplaced monitors which nothing else blocks
        let mut candidates = (0..n)
            .filter(|&i| !placed[i] && blocked_by[i] == 0)
            .collect::<Vec<_>>();

        // The relation can cycle; when it does, every unplaced monitor
        // becomes a candidate so each iteration still places one
        if candidates.is_empty() {
            candidates = (0..n).filter(|&i| !placed[i]).collect();
        }

        // Smallest (top, left) wins; the strict `<` keeps the earliest
        // candidate on a full tie
        let mut next = candidates[0];
        for &i in candidates.iter().skip(1) {
            if (rects[i].top(), rects[i].left()) < (rects[next].top(), rects[next].left()) {
                next = i;
            }
        }

        placed[next] = true;
        order.push(next);

        for j in 0..n {
            if blocks[next][j] {
                blocked_by[j] -= 1;
            }
        }
    }

    order
}

/// Permute `monitors` into reading order
pub(crate) fn order_monitors(monitors: Vec<Monitor>) -> Vec<Monitor> {
    let rects = monitors.iter().map(Monitor::rect).collect::<Vec<_>>();
    let order = reading_order(&rects);

    let mut slots = monitors.into_iter().map(Some).collect::<Vec<_>>();
    order
        .into_iter()
        .filter_map(|idx| slots[idx].take())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{order_monitors, reading_order, Monitor, Rectangle};

    /// Build a [`Rectangle`] from its four edges
    fn rect(top: i32, left: i32, bottom: i32, right: i32) -> Rectangle {
        Rectangle::new(left, top, (right - left) as u32, (bottom - top) as u32)
    }

    /// Build a throwaway [`Monitor`] for ordering tests
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

    /// Map an order back onto the rectangles it was computed from
    fn apply(rects: &[Rectangle], order: &[usize]) -> Vec<Rectangle> {
        order.iter().map(|&i| rects[i]).collect()
    }

    #[test]
    fn empty_input() {
        assert_eq!(reading_order(&[]), Vec::<usize>::new());
    }

    #[test]
    fn singleton() {
        assert_eq!(reading_order(&[rect(0, 0, 1080, 1920)]), vec![0]);
    }

    #[test]
    fn output_is_a_permutation() {
        let rects = vec![
            rect(0, 1000, 500, 2000),
            rect(-200, 0, 800, 1000),
            rect(800, 0, 1600, 1000),
            rect(500, 1000, 1300, 2000),
        ];

        let mut order = reading_order(&rects);
        order.sort_unstable();
        assert_eq!(order, vec![0, 1, 2, 3]);
    }

    #[test]
    fn simple_grid_reads_like_text() {
        // (top, left, bottom, right) quadrants of a 200x200 square
        let rects = vec![
            rect(100, 100, 200, 200), // bottom-right
            rect(0, 100, 100, 200),   // top-right
            rect(100, 0, 200, 100),   // bottom-left
            rect(0, 0, 100, 100),     // top-left
        ];

        assert_eq!(
            apply(&rects, &reading_order(&rects)),
            vec![
                rect(0, 0, 100, 100),
                rect(0, 100, 100, 200),
                rect(100, 0, 200, 100),
                rect(100, 100, 200, 200),
            ]
        );
    }

    #[test]
    fn deterministic_across_enumeration_orders() {
        let rects = vec![
            rect(0, 0, 1080, 1920),
            rect(0, 1920, 1440, 4480),
            rect(1440, 1920, 2520, 3840),
            rect(-1080, 0, 0, 1920),
        ];
        let reversed = rects.iter().rev().copied().collect::<Vec<_>>();

        assert_eq!(
            apply(&rects, &reading_order(&rects)),
            apply(&reversed, &reading_order(&reversed)),
        );
    }

    #[test]
    fn identical_rects_terminate_in_input_order() {
        // Both block each other, so the relation cycles immediately and the
        // fallback candidate set has to finish the job
        let rects = vec![rect(0, 0, 50, 50), rect(0, 0, 50, 50)];

        assert_eq!(reading_order(&rects), vec![0, 1]);
    }

    #[test]
    fn mutual_blocking_resolves_by_corner() {
        // Diagonal overlap: each rect is partially above-left of the other
        let rects = vec![rect(10, 0, 110, 100), rect(0, 10, 100, 110)];

        assert_eq!(reading_order(&rects), vec![1, 0]);
    }

    #[test]
    fn equal_top_breaks_tie_on_left() {
        // Fully overlapping, so ordering degenerates to the (top, left) key
        let rects = vec![rect(0, 500, 1080, 2420), rect(0, 0, 1080, 1920)];

        assert_eq!(reading_order(&rects), vec![1, 0]);
    }

    #[test]
    fn side_by_side_row() {
        let rects = vec![
            rect(0, 3840, 1080, 5760),
            rect(0, 0, 1080, 1920),
            rect(0, 1920, 1080, 3840),
        ];

        assert_eq!(reading_order(&rects), vec![1, 2, 0]);
    }

    #[test]
    fn vertical_stack() {
        let rects = vec![
            rect(1080, 0, 2160, 1920),
            rect(-1080, 0, 0, 1920),
            rect(0, 0, 1080, 1920),
        ];

        assert_eq!(reading_order(&rects), vec![1, 2, 0]);
    }

    #[test]
    fn uneven_heights_still_read_left_to_right() {
        // A tall monitor next to two stacked short ones: the tall one
        // overlaps both rows, so it is read before the right column
        let rects = vec![
            rect(0, 1920, 720, 3200),
            rect(0, 0, 1440, 1920),
            rect(720, 1920, 1440, 3200),
        ];

        assert_eq!(reading_order(&rects), vec![1, 0, 2]);
    }

    #[test]
    fn monitors_permute_with_their_metadata() {
        let ordered = order_monitors(vec![
            monitor("HDMI-A-0", rect(0, 1920, 1080, 3840)),
            monitor("eDP-1", rect(0, 0, 1080, 1920)),
        ]);

        assert_eq!(
            ordered.iter().map(|m| m.name.as_str()).collect::<Vec<_>>(),
            vec!["eDP-1", "HDMI-A-0"],
        );
        assert_eq!(ordered[0].rect, rect(0, 0, 1080, 1920));
    }
}
