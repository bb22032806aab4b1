pub mod batch;
mod squarify;
pub mod validate;

use self::squarify::squarify;

/// One input item: a non-negative weight plus an opaque payload carried
/// through to its placement.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedItem<T> {
    pub weight: f64,
    pub payload: T,
}

impl<T> WeightedItem<T> {
    pub fn new(weight: f64, payload: T) -> Self {
        Self { weight, payload }
    }
}

/// Target rectangle for a layout, anchored at the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Both sides finite and strictly positive.
    pub fn is_drawable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// Axis-aligned rectangle in viewport coordinates (origin top-left).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// `max(w/h, h/w)`; infinite when either side is zero.
    pub fn aspect_ratio(&self) -> f64 {
        if self.width <= 0.0 || self.height <= 0.0 {
            return f64::INFINITY;
        }
        (self.width / self.height).max(self.height / self.width)
    }

    /// Half-open containment, so a point on a shared edge hits exactly one tile.
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }
}

/// One cell of the partitioned viewport, carrying its item's payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement<T> {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub payload: T,
}

impl<T> Placement<T> {
    fn new(rect: Rect, payload: T) -> Self {
        Self {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            payload,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Swap the payload, keeping the geometry.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Placement<U> {
        Placement {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
            payload: f(self.payload),
        }
    }
}

/// Configuration for treemap layout.
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Smallest weight an item is laid out with. Zero, negative and
    /// non-finite weights are raised to this so they still get a sliver.
    /// A floor of 1e-9 of the largest weight applies on top when higher.
    pub weight_floor: f64,
}

/// Smallest weight relative to the largest one in the same layout.
const RELATIVE_WEIGHT_FLOOR: f64 = 1e-9;

impl LayoutConfig {
    pub const DEFAULT_WEIGHT_FLOOR: f64 = 0.001;

    fn effective_floor(&self) -> f64 {
        if self.weight_floor.is_finite() && self.weight_floor > 0.0 {
            self.weight_floor
        } else {
            Self::DEFAULT_WEIGHT_FLOOR
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            weight_floor: Self::DEFAULT_WEIGHT_FLOOR,
        }
    }
}

/// Lay out `items` in a `width` x `height` viewport with the default config.
///
/// Returns one placement per item, largest weight first, or nothing at all
/// for an empty input or a non-drawable viewport.
pub fn layout<T>(
    items: impl IntoIterator<Item = WeightedItem<T>>,
    width: f64,
    height: f64,
) -> Vec<Placement<T>> {
    layout_with_config(items, Viewport::new(width, height), &LayoutConfig::default())
}

/// Squarified treemap layout of `items` over `viewport`.
///
/// Placements exactly tile the viewport (up to floating-point error). Items
/// in the same row get areas exactly proportional to their weights. Output is
/// ordered by descending floored weight; ties keep their input order.
pub fn layout_with_config<T>(
    items: impl IntoIterator<Item = WeightedItem<T>>,
    viewport: Viewport,
    config: &LayoutConfig,
) -> Vec<Placement<T>> {
    if !viewport.is_drawable() {
        tracing::debug!(
            "Skipping layout for non-drawable viewport {}x{}",
            viewport.width,
            viewport.height
        );
        return Vec::new();
    }

    let floor = config.effective_floor();
    let mut items: Vec<(f64, T)> = items
        .into_iter()
        .map(|item| (floored_weight(item.weight, floor), item.payload))
        .collect();

    if items.is_empty() {
        return Vec::new();
    }

    // Only ratios matter to the partition. Scale so the largest weight is 1.0
    // (the sum then stays <= n) and raise tiny weights to a floor relative to
    // that maximum so their slivers survive rounding.
    let max = items.iter().map(|(w, _)| *w).fold(floor, f64::max);
    for (weight, _) in &mut items {
        *weight = weight.max(max * RELATIVE_WEIGHT_FLOOR) / max;
    }
    let total: f64 = items.iter().map(|(w, _)| w).sum();

    // Stable sort: equal weights keep caller order
    items.sort_by(|a, b| b.0.total_cmp(&a.0));

    let (weights, payloads): (Vec<f64>, Vec<T>) = items.into_iter().unzip();
    let rects = squarify(&weights, 0.0, 0.0, viewport.width, viewport.height);
    debug_assert_eq!(rects.len(), payloads.len());

    tracing::debug!(
        "Laid out {} tiles in {:.0}x{:.0} (normalized total {:.3})",
        rects.len(),
        viewport.width,
        viewport.height,
        total
    );

    rects
        .into_iter()
        .zip(payloads)
        .map(|(rect, payload)| Placement::new(rect, payload))
        .collect()
}

fn floored_weight(weight: f64, floor: f64) -> f64 {
    if !weight.is_finite() {
        tracing::warn!("Non-finite weight {} coerced to floor {}", weight, floor);
        return floor;
    }
    weight.max(floor)
}

/// The placement containing `(px, py)`, if any.
pub fn hit_test<T>(placements: &[Placement<T>], px: f64, py: f64) -> Option<&Placement<T>> {
    placements.iter().find(|p| p.rect().contains(px, py))
}
