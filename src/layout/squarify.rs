use super::Rect;

/// Squarified partition of `(x, y, w, h)` into one rect per weight.
///
/// `weights` must already be sorted descending and strictly positive. Rects
/// come back in the same order as `weights`, row by row.
///
/// Each pass finalizes one row (at least one item) along the short side of the
/// remaining rectangle and continues with what is left, so the pass count is
/// bounded by `weights.len()`.
pub(crate) fn squarify(weights: &[f64], x: f64, y: f64, w: f64, h: f64) -> Vec<Rect> {
    let mut result = Vec::with_capacity(weights.len());
    let (mut x, mut y, mut w, mut h) = (x, y, w, h);
    let mut remaining = weights;

    while !remaining.is_empty() {
        if remaining.len() == 1 {
            result.push(Rect::new(x, y, w, h));
            break;
        }

        // Recomputed over the current subset only
        let total: f64 = remaining.iter().sum();
        let wide = w >= h;
        let side = if wide { h } else { w };
        let long = if wide { w } else { h };

        let (row_len, row_sum) = grow_row(remaining, total, long, side);
        let row = &remaining[..row_len];
        let fraction = row_sum / total;

        tracing::trace!(
            "Squarify: row of {} item(s) in {:.1}x{:.1} (wide={}, fraction={:.4}), {} left",
            row_len,
            w,
            h,
            wide,
            fraction,
            remaining.len() - row_len
        );

        if wide {
            // Vertical strip on the left, items stacked top to bottom
            let strip_w = w * fraction;
            let mut cursor = y;
            for &weight in row {
                let item_h = side * (weight / row_sum);
                result.push(Rect::new(x, cursor, strip_w, item_h));
                cursor += item_h;
            }
            x += strip_w;
            w -= strip_w;
        } else {
            // Horizontal strip on top, items left to right
            let strip_h = h * fraction;
            let mut cursor = x;
            for &weight in row {
                let item_w = side * (weight / row_sum);
                result.push(Rect::new(cursor, y, item_w, strip_h));
                cursor += item_w;
            }
            y += strip_h;
            h -= strip_h;
        }

        remaining = &remaining[row_len..];
    }

    result
}

/// Greedily extend a row from the front of `weights`.
///
/// Stops at the first item whose inclusion would raise the worst aspect ratio
/// above the best seen so far; that item is left for the next row. Never
/// backtracks. Returns `(row_len, row_sum)` with `row_len >= 1`.
fn grow_row(weights: &[f64], total: f64, long: f64, side: f64) -> (usize, f64) {
    let mut best_aspect = f64::INFINITY;
    let mut best_len = 0;
    let mut best_sum = 0.0;
    let mut row_sum = 0.0;

    for (i, &weight) in weights.iter().enumerate() {
        row_sum += weight;
        let aspect = worst_aspect_ratio(&weights[..=i], row_sum, total, long, side);
        if aspect > best_aspect {
            break;
        }
        best_aspect = aspect;
        best_len = i + 1;
        best_sum = row_sum;
    }

    (best_len, best_sum)
}

/// Worst `max(strip/item, item/strip)` over a candidate row, where `strip` is
/// the row's thickness along the divided axis and `item` each tile's extent
/// along the undivided `side`.
fn worst_aspect_ratio(row: &[f64], row_sum: f64, total: f64, long: f64, side: f64) -> f64 {
    let strip = (row_sum / total) * long;
    row.iter()
        .map(|&weight| {
            let item = (weight / row_sum) * side;
            (strip / item).max(item / strip)
        })
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::{grow_row, squarify, worst_aspect_ratio};

    fn assert_rect(r: &super::Rect, x: f64, y: f64, w: f64, h: f64) {
        let close = |a: f64, b: f64| (a - b).abs() < 1e-9;
        assert!(
            close(r.x, x) && close(r.y, y) && close(r.width, w) && close(r.height, h),
            "expected ({x}, {y}, {w}, {h}), got {r:?}"
        );
    }

    #[test]
    fn single_item_fills_viewport_without_axis_swap() {
        let rects = squarify(&[42.0], 0.0, 0.0, 1920.0, 1080.0);
        assert_eq!(rects.len(), 1);
        assert_rect(&rects[0], 0.0, 0.0, 1920.0, 1080.0);
    }

    #[test]
    fn layout_preserves_area_for_simple_case() {
        let rects = squarify(&[400.0, 300.0, 200.0, 100.0], 0.0, 0.0, 50.0, 20.0);
        assert_eq!(rects.len(), 4);
        let total_out: f64 = rects.iter().map(|r| r.area()).sum();
        assert!((total_out - 1000.0).abs() < 1e-6);
    }

    #[test]
    fn largest_item_takes_leftmost_strip_on_wide_viewport() {
        let rects = squarify(&[100.0, 50.0, 25.0, 25.0], 0.0, 0.0, 200.0, 100.0);
        assert_eq!(rects.len(), 4);
        assert_rect(&rects[0], 0.0, 0.0, 100.0, 100.0);
        assert_rect(&rects[1], 100.0, 0.0, 50.0, 100.0);
        // Remaining 50x100 is tall, so the next row runs horizontally
        assert_rect(&rects[2], 150.0, 0.0, 50.0, 50.0);
        assert_rect(&rects[3], 150.0, 50.0, 50.0, 50.0);
    }

    #[test]
    fn row_keeps_growing_while_aspect_improves() {
        // Bruls et al. example: the first row holds both 6s
        let rects = squarify(&[6.0, 6.0, 4.0, 3.0, 2.0, 2.0, 1.0], 0.0, 0.0, 6.0, 4.0);
        assert_eq!(rects.len(), 7);
        assert_rect(&rects[0], 0.0, 0.0, 3.0, 2.0);
        assert_rect(&rects[1], 0.0, 2.0, 3.0, 2.0);
        assert_rect(&rects[2], 3.0, 0.0, 3.0 * 4.0 / 7.0, 7.0 / 3.0);
        assert_rect(&rects[3], 3.0 + 3.0 * 4.0 / 7.0, 0.0, 3.0 * 3.0 / 7.0, 7.0 / 3.0);
        let total_out: f64 = rects.iter().map(|r| r.area()).sum();
        assert!((total_out - 24.0).abs() < 1e-9);
    }

    #[test]
    fn grow_row_stops_before_the_worsening_item() {
        // [6] -> 8/3, [6,6] -> 1.5, [6,6,4] -> 4.0
        let weights = [6.0, 6.0, 4.0, 3.0];
        let (len, sum) = grow_row(&weights, 24.0, 6.0, 4.0);
        assert_eq!(len, 2);
        assert!((sum - 12.0).abs() < 1e-12);
    }

    #[test]
    fn grow_row_accepts_equal_aspect() {
        // Two equal items in a 2x2 square: worst aspect is 2.0 for the first
        // item alone and still 2.0 with both, so the row keeps the second.
        let (len, _) = grow_row(&[1.0, 1.0], 2.0, 2.0, 2.0);
        assert_eq!(len, 2);
    }

    #[test]
    fn worst_aspect_of_square_tile_is_one() {
        let aspect = worst_aspect_ratio(&[100.0], 100.0, 200.0, 200.0, 100.0);
        assert!((aspect - 1.0).abs() < 1e-12);
    }

    #[test]
    fn strips_stay_inside_the_origin_offset() {
        let rects = squarify(&[5.0, 3.0, 2.0], 10.0, 20.0, 30.0, 40.0);
        for r in &rects {
            assert!(r.x >= 10.0 - 1e-9 && r.right() <= 40.0 + 1e-9, "{r:?}");
            assert!(r.y >= 20.0 - 1e-9 && r.bottom() <= 60.0 + 1e-9, "{r:?}");
        }
    }
}
