//! Read-time transforms. Each function takes a cached placement by value and
//! returns a transformed copy; the cache itself is never touched.

use super::config::LayoutConfig;
use super::element::{Placement, Transform};
use super::viewport::ViewportState;

/// Index of the day cell sitting under the viewport's horizontal midpoint.
pub fn focused_index(viewport: &ViewportState, config: &LayoutConfig) -> i64 {
    let cell = config.day_cell_width;
    let continuous = (viewport.mid_x() + viewport.scroll_offset.x - cell / 2.0) / cell;
    continuous.round() as i64
}

/// Widen the focused day cell; every other cell passes through.
pub fn focus_day(mut placement: Placement, viewport: &ViewportState, config: &LayoutConfig) -> Placement {
    let offset = (placement.frame.min.x / config.day_cell_width).round() as i64;
    if offset == focused_index(viewport, config) {
        placement.transform = Transform::scale(config.focus_scale, 1.0);
    }
    placement
}

/// Horizontal shift that keeps a year label pinned near the viewport's left
/// edge once the start of its year has scrolled out of view.
pub fn sticky_year_adjust(placement: &Placement, viewport: &ViewportState, config: &LayoutConfig) -> Option<f32> {
    let frame = placement.frame;
    let min_x = viewport.min_x();
    if min_x <= frame.min.x {
        return None;
    }
    let mut adjust = (min_x - frame.min.x) - viewport.scroll_offset.x - config.sticky_margin;
    if frame.min.x + adjust < min_x {
        adjust = min_x - frame.min.x;
    }
    // Never slide into the next year's region.
    adjust = adjust.min(config.one_year_width() - frame.width());
    Some(adjust)
}

/// Apply [`sticky_year_adjust`] as a translation.
pub fn stick_year(mut placement: Placement, viewport: &ViewportState, config: &LayoutConfig) -> Placement {
    if let Some(adjust) = sticky_year_adjust(&placement, viewport, config) {
        placement.transform = Transform::translation(adjust, 0.0);
    }
    placement
}
