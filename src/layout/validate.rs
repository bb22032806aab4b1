use super::{Placement, Rect, Viewport};

/// Relative tolerance for area and edge checks.
const TOLERANCE: f64 = 1e-9;
/// Allowed relative error between covered area and viewport area.
const COVERAGE_TOLERANCE: f64 = 1e-6;

/// Summary of how well a set of placements tiles its viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutReport {
    pub placements: usize,
    pub viewport_area: f64,
    /// Sum of all placement areas
    pub covered_area: f64,
    /// `covered_area / viewport_area` (1.0 = full coverage)
    pub coverage: f64,
    /// Largest `max(w/h, h/w)` over all tiles
    pub worst_aspect: f64,
    /// Tiles with a zero, negative or non-finite side
    pub degenerate: usize,
    /// Tile pairs whose intersection is larger than rounding noise
    pub overlapping_pairs: usize,
    /// Tiles sticking out of the viewport
    pub out_of_bounds: usize,
}

impl LayoutReport {
    /// Placements cover the viewport once: no gaps, overlaps, slivers of zero
    /// size, or tiles outside the bounds.
    pub fn is_exact_tiling(&self) -> bool {
        self.placements > 0
            && (self.coverage - 1.0).abs() < COVERAGE_TOLERANCE
            && self.degenerate == 0
            && self.overlapping_pairs == 0
            && self.out_of_bounds == 0
    }
}

/// Check `placements` against `viewport`. Overlap detection is pairwise, which
/// is fine at dashboard tile counts.
pub fn validate<T>(placements: &[Placement<T>], viewport: Viewport) -> LayoutReport {
    let viewport_area = viewport.area();
    let rects: Vec<Rect> = placements.iter().map(Placement::rect).collect();

    let covered_area: f64 = rects.iter().map(Rect::area).sum();
    let coverage = if viewport_area > 0.0 {
        covered_area / viewport_area
    } else {
        0.0
    };

    let worst_aspect = rects
        .iter()
        .map(Rect::aspect_ratio)
        .fold(0.0, f64::max);

    let degenerate = rects.iter().filter(|r| is_degenerate(r)).count();

    let area_eps = viewport_area.abs() * TOLERANCE;
    let mut overlapping_pairs = 0;
    for (i, a) in rects.iter().enumerate() {
        for b in &rects[i + 1..] {
            if intersection_area(a, b) > area_eps {
                overlapping_pairs += 1;
            }
        }
    }

    let edge_eps = viewport.width.abs().max(viewport.height.abs()) * TOLERANCE;
    let out_of_bounds = rects
        .iter()
        .filter(|r| {
            r.x < -edge_eps
                || r.y < -edge_eps
                || r.right() > viewport.width + edge_eps
                || r.bottom() > viewport.height + edge_eps
        })
        .count();

    let report = LayoutReport {
        placements: rects.len(),
        viewport_area,
        covered_area,
        coverage,
        worst_aspect,
        degenerate,
        overlapping_pairs,
        out_of_bounds,
    };

    if !report.is_exact_tiling() && !rects.is_empty() {
        tracing::debug!("Layout is not an exact tiling: {:?}", report);
    }

    report
}

fn is_degenerate(r: &Rect) -> bool {
    !r.x.is_finite()
        || !r.y.is_finite()
        || !r.width.is_finite()
        || !r.height.is_finite()
        || r.width <= 0.0
        || r.height <= 0.0
}

fn intersection_area(a: &Rect, b: &Rect) -> f64 {
    let w = a.right().min(b.right()) - a.x.max(b.x);
    let h = a.bottom().min(b.bottom()) - a.y.max(b.y);
    if w > 0.0 && h > 0.0 {
        w * h
    } else {
        0.0
    }
}
