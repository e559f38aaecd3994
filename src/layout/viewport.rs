use egui::{Pos2, Rect, Vec2};

/// The visible part of the timeline, in content coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    /// Top-left corner of the visible rectangle.
    pub origin: Pos2,
    pub size: Vec2,
    /// Current content offset of the scroll surface.
    pub scroll_offset: Vec2,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self::scrolled_to(Vec2::ZERO, Vec2::ZERO)
    }
}

impl ViewportState {
    /// Viewport whose visible rectangle starts at the scroll offset.
    pub fn scrolled_to(offset: Vec2, size: Vec2) -> Self {
        Self {
            origin: offset.to_pos2(),
            size,
            scroll_offset: offset,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_min_size(self.origin, self.size)
    }

    pub fn min_x(&self) -> f32 {
        self.origin.x
    }

    pub fn width(&self) -> f32 {
        self.size.x
    }

    pub fn mid_x(&self) -> f32 {
        self.size.x / 2.0
    }

    /// Same size, new scroll position.
    pub fn with_offset(&self, offset: Vec2) -> Self {
        Self::scrolled_to(offset, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scrolled_to_keeps_origin_and_offset_together() {
        let v = ViewportState::scrolled_to(Vec2::new(120.0, 0.0), Vec2::new(400.0, 60.0));
        assert_eq!(v.min_x(), 120.0);
        assert_eq!(v.rect().max.x, 520.0);
        assert_eq!(v.mid_x(), 200.0);
    }

    #[test]
    fn with_offset_preserves_size() {
        let v = ViewportState::scrolled_to(Vec2::ZERO, Vec2::new(400.0, 60.0));
        let moved = v.with_offset(Vec2::new(-50.0, 0.0));
        assert_eq!(moved.size, v.size);
        assert_eq!(moved.origin.x, -50.0);
    }
}
