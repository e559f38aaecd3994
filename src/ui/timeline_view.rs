use crate::layout::{ElementKind, Placement, TimelineLayout, ViewportState};
use crate::model::Snapshot;
use crate::ui::theme;
use egui::{Align2, Color32, Pos2, Rect, Rounding, Sense, Stroke, Ui, Vec2};

/// How far ahead of a release the fling velocity projects, in seconds.
const FLING_PROJECTION: f32 = 0.15;
/// Exponential approach rate of the snap animation, per second.
const SETTLE_RATE: f32 = 14.0;
const SETTLE_EPSILON: f32 = 0.05;

/// Horizontal scroll position of the strip plus the settle animation.
#[derive(Debug, Clone, Default)]
pub struct ScrollState {
    pub offset: f32,
    /// Points per second, sampled while the user drags.
    pub velocity: f32,
    /// Where the strip is settling to, once input has stopped.
    pub target: Option<f32>,
    interacting: bool,
}

impl ScrollState {
    /// User moved the strip by `delta` points during a frame of `dt` seconds.
    pub fn scroll_by(&mut self, delta: f32, dt: f32) {
        self.offset += delta;
        if dt > 0.0 {
            self.velocity = delta / dt;
        }
        self.target = None;
        self.interacting = true;
    }

    /// Jump straight to a settle target.
    pub fn settle_to(&mut self, target: f32) {
        self.target = Some(target);
        self.interacting = false;
        self.velocity = 0.0;
    }

    /// Input stopped this frame: pick the snap target once.
    pub fn release(&mut self, layout: &TimelineLayout) {
        if !self.interacting {
            return;
        }
        self.interacting = false;
        let proposed = Vec2::new(self.offset + self.velocity * FLING_PROJECTION, 0.0);
        let target = layout.target_content_offset(proposed, Vec2::new(self.velocity, 0.0));
        let (min, max) = layout.scroll_range();
        self.target = Some(target.x.clamp(min, max));
        self.velocity = 0.0;
    }

    /// Advance the settle animation. Returns true while still moving.
    pub fn step(&mut self, dt: f32) -> bool {
        let Some(target) = self.target else {
            return false;
        };
        let t = (dt * SETTLE_RATE).clamp(0.0, 1.0);
        self.offset += (target - self.offset) * t;
        if (target - self.offset).abs() < SETTLE_EPSILON {
            self.offset = target;
            self.target = None;
            return false;
        }
        true
    }

    pub fn clamp_to(&mut self, (min, max): (f32, f32)) {
        self.offset = self.offset.clamp(min, max);
    }
}

/// What happened in the strip this frame.
#[derive(Debug, Clone, Default)]
pub struct TimelineInteraction {
    /// Day section under the viewport's midpoint.
    pub focused: Option<usize>,
}

/// Render the timeline strip and handle scrolling.
pub fn show_timeline(
    layout: &mut TimelineLayout,
    snapshot: &Snapshot,
    scroll: &mut ScrollState,
    ui: &mut Ui,
) -> TimelineInteraction {
    let config = *layout.config();
    let strip_height = config.strip_height();
    let width = ui.available_width();
    let (outer, response) = ui.allocate_exact_size(
        Vec2::new(width, strip_height + theme::STRIP_PADDING * 2.0),
        Sense::drag(),
    );
    let strip = Rect::from_min_size(
        Pos2::new(outer.min.x, outer.min.y + theme::STRIP_PADDING),
        Vec2::new(width, strip_height),
    );

    let size = Vec2::new(width, strip_height);
    layout.set_viewport(ViewportState::scrolled_to(Vec2::new(scroll.offset, config.origin_y), size));
    layout.prepare(snapshot.number_of_items(), snapshot);

    // ── Input ───────────────────────────────────────────────────
    let dt = ui.input(|i| i.stable_dt).max(1.0 / 240.0);
    let mut moved = false;
    if response.dragged() {
        scroll.scroll_by(-response.drag_delta().x, dt);
        moved = true;
    }
    if response.hovered() {
        let wheel = ui.input(|i| i.smooth_scroll_delta);
        let delta = wheel.x + wheel.y;
        if delta != 0.0 {
            scroll.scroll_by(-delta, dt);
            moved = true;
        }
    }
    if !moved {
        scroll.release(layout);
    }
    if scroll.step(dt) {
        ui.ctx().request_repaint();
    }
    scroll.clamp_to(layout.scroll_range());
    layout.scroll_to(Vec2::new(scroll.offset, config.origin_y));

    // ── Paint ───────────────────────────────────────────────────
    let painter = ui.painter_at(outer);
    painter.rect_filled(outer, 0.0, theme::BG_STRIP);

    let to_screen = Vec2::new(strip.min.x - scroll.offset, strip.min.y - config.origin_y);
    let visible = layout.visible_elements();
    let focused = layout
        .closest_to(scroll.offset + layout.viewport().mid_x())
        .map(|p| p.key.index);

    for placement in visible.iter().filter(|p| p.kind() == ElementKind::Month) {
        draw_month(&painter, layout, placement, to_screen);
    }
    for placement in visible.iter().filter(|p| p.kind() == ElementKind::Day) {
        let records = snapshot.records_in(placement.key.index).len();
        let is_focused = focused == Some(placement.key.index);
        draw_day(&painter, placement, to_screen, records, is_focused);
    }
    for placement in visible.iter().filter(|p| p.kind() == ElementKind::Year) {
        draw_year(&painter, layout, placement, to_screen);
    }

    // Midpoint marker
    let mid = strip.min.x + width / 2.0;
    painter.line_segment(
        [Pos2::new(mid, outer.min.y), Pos2::new(mid, outer.min.y + 4.0)],
        Stroke::new(1.5, theme::FOCUS),
    );

    if !layout.is_built() {
        painter.text(
            strip.center(),
            Align2::CENTER_CENTER,
            "No records",
            theme::font_month(),
            theme::TEXT_DIM,
        );
    }

    TimelineInteraction { focused }
}

fn draw_month(painter: &egui::Painter, layout: &TimelineLayout, placement: &Placement, to_screen: Vec2) {
    let rect = placement.rendered_frame().translate(to_screen);
    painter.line_segment(
        [rect.left_top(), rect.left_bottom() + Vec2::new(0.0, layout.config().day_height)],
        Stroke::new(1.0, theme::GRID_LINE),
    );
    if rect.width() < theme::MIN_MONTH_LABEL_WIDTH {
        return;
    }
    if let Some(date) = layout.period_start(placement.key) {
        painter.with_clip_rect(rect).text(
            Pos2::new(rect.left() + 3.0, rect.center().y),
            Align2::LEFT_CENTER,
            date.format("%b").to_string(),
            theme::font_month(),
            theme::TEXT_SECONDARY,
        );
    }
}

fn draw_day(painter: &egui::Painter, placement: &Placement, to_screen: Vec2, records: usize, is_focused: bool) {
    let rect = placement.rendered_frame().translate(to_screen);
    let fill = if is_focused { theme::FOCUS } else { theme::day_fill(records) };
    painter.rect_filled(rect, Rounding::same(if is_focused { 2.0 } else { 0.0 }), fill);
}

fn draw_year(painter: &egui::Painter, layout: &TimelineLayout, placement: &Placement, to_screen: Vec2) {
    let rect = placement.rendered_frame().translate(to_screen);
    if let Some(date) = layout.period_start(placement.key) {
        painter.text(
            rect.left_center(),
            Align2::LEFT_CENTER,
            date.format("%Y").to_string(),
            theme::font_year(),
            Color32::WHITE,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutConfig;
    use chrono::NaiveDate;

    fn layout_for(snapshot: &Snapshot) -> TimelineLayout {
        let mut layout = TimelineLayout::new(LayoutConfig::default());
        layout.set_viewport(ViewportState::scrolled_to(Vec2::ZERO, Vec2::new(400.0, 60.0)));
        layout.prepare(snapshot.number_of_items(), snapshot);
        layout
    }

    fn sample() -> Snapshot {
        let now = NaiveDate::from_ymd_opt(2020, 10, 30)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        Snapshot::sample(now, 6)
    }

    #[test]
    fn release_snaps_to_a_cell_centre() {
        let snapshot = sample();
        let layout = layout_for(&snapshot);
        let mut scroll = ScrollState::default();
        scroll.scroll_by(-190.0, 1.0);
        scroll.release(&layout);
        let target = scroll.target.unwrap();
        let centre = target + layout.viewport().mid_x();
        // Day cells are 2.5 wide; centres sit at 1.25 + 2.5k.
        let k = (centre - 1.25) / 2.5;
        assert!((k - k.round()).abs() < 1e-3, "centre {centre} is not on a cell");
    }

    #[test]
    fn release_without_interaction_keeps_state() {
        let snapshot = sample();
        let layout = layout_for(&snapshot);
        let mut scroll = ScrollState {
            offset: 12.0,
            ..Default::default()
        };
        scroll.release(&layout);
        assert_eq!(scroll.target, None);
        assert_eq!(scroll.offset, 12.0);
    }

    #[test]
    fn step_converges_on_the_target() {
        let mut scroll = ScrollState::default();
        scroll.settle_to(100.0);
        let mut frames = 0;
        while scroll.step(1.0 / 60.0) {
            frames += 1;
            assert!(frames < 1000);
        }
        assert_eq!(scroll.offset, 100.0);
        assert_eq!(scroll.target, None);
    }
}
