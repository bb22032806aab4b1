use rayon::prelude::*;

use super::{layout_with_config, LayoutConfig, Placement, Viewport, WeightedItem};

/// Items and viewport for one widget's treemap.
#[derive(Debug, Clone)]
pub struct LayoutRequest<T> {
    pub items: Vec<WeightedItem<T>>,
    pub viewport: Viewport,
}

impl<T> LayoutRequest<T> {
    pub fn new(items: Vec<WeightedItem<T>>, viewport: Viewport) -> Self {
        Self { items, viewport }
    }
}

/// Lay out independent treemaps on the rayon pool.
///
/// Result `i` belongs to `requests[i]` and is identical to laying that
/// request out on its own.
pub fn layout_batch<T: Send>(
    requests: Vec<LayoutRequest<T>>,
    config: &LayoutConfig,
) -> Vec<Vec<Placement<T>>> {
    tracing::debug!("Laying out {} treemaps in parallel", requests.len());
    requests
        .into_par_iter()
        .map(|req| layout_with_config(req.items, req.viewport, config))
        .collect()
}
