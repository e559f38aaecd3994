//! The timeline layout: owns the placement cache, decides when it is stale, and
//! answers the host's geometry queries with transformed copies.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use egui::{Rect, Vec2};

use super::builder::{build_timeline, TimelineItem};
use super::cache::LayoutCache;
use super::calendar::month_after;
use super::config::LayoutConfig;
use super::element::{ElementKey, ElementKind, Placement};
use super::transform::{focus_day, stick_year};
use super::viewport::ViewportState;
use crate::error::LayoutError;

/// Supplies the date of each item; implemented by the host's data source.
pub trait DateResolver {
    fn resolve_date(&self, position: usize) -> Option<NaiveDateTime>;
}

impl<F> DateResolver for F
where
    F: Fn(usize) -> Option<NaiveDateTime>,
{
    fn resolve_date(&self, position: usize) -> Option<NaiveDateTime> {
        self(position)
    }
}

#[derive(Debug, Clone)]
pub struct TimelineLayout {
    config: LayoutConfig,
    viewport: ViewportState,
    cache: LayoutCache,
}

impl TimelineLayout {
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            viewport: ViewportState::default(),
            cache: LayoutCache::new(),
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn viewport(&self) -> &ViewportState {
        &self.viewport
    }

    pub fn is_built(&self) -> bool {
        self.cache.is_built()
    }

    /// Incremented on every successful rebuild.
    pub fn generation(&self) -> u64 {
        self.cache.generation()
    }

    pub fn cache(&self) -> &LayoutCache {
        &self.cache
    }

    // ── Invalidation ────────────────────────────────────────────

    /// Move or resize the viewport. Only a size change drops the cache.
    pub fn set_viewport(&mut self, viewport: ViewportState) {
        if self.viewport.size != viewport.size && self.cache.is_built() {
            tracing::debug!(
                old = ?self.viewport.size,
                new = ?viewport.size,
                "viewport resized, invalidating timeline layout"
            );
            self.cache.clear();
        }
        self.viewport = viewport;
    }

    /// Scroll without touching the viewport size.
    pub fn scroll_to(&mut self, offset: Vec2) {
        self.set_viewport(self.viewport.with_offset(offset));
    }

    /// The host's item set changed shape; rebuild on the next `prepare`.
    pub fn invalidate_data_source_counts(&mut self) {
        if self.cache.is_built() {
            tracing::debug!("data source counts invalidated");
        }
        self.cache.clear();
    }

    /// Build the cache if it is empty or was built from a different item count.
    ///
    /// A date that cannot be resolved abandons the pass and leaves the cache
    /// empty; queries then return nothing.
    pub fn prepare(&mut self, item_count: usize, resolver: &dyn DateResolver) {
        if self.cache.item_count().is_some_and(|built| built != item_count) {
            tracing::debug!(item_count, "item count changed, invalidating timeline layout");
            self.cache.clear();
        }
        if self.cache.is_built() || item_count == 0 {
            return;
        }
        match self.rebuild(item_count, resolver) {
            Ok(()) => {
                tracing::debug!(
                    generation = self.cache.generation(),
                    content_width = self.cache.content_width(),
                    "timeline layout prepared"
                );
            }
            Err(e) => {
                tracing::warn!(error = %e, "timeline layout pass abandoned");
                self.cache.clear();
            }
        }
    }

    fn rebuild(&mut self, item_count: usize, resolver: &dyn DateResolver) -> Result<(), LayoutError> {
        let items = (0..item_count)
            .map(|position| {
                resolver
                    .resolve_date(position)
                    .map(|date| TimelineItem { key: position, date })
                    .ok_or(LayoutError::UnresolvedDate { position })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let built = build_timeline(&items, &self.config)?;
        self.cache.store(built, self.viewport.size, item_count);
        Ok(())
    }

    // ── Sizes ───────────────────────────────────────────────────

    pub fn content_width(&self) -> f32 {
        self.cache.content_width()
    }

    pub fn content_size(&self) -> Vec2 {
        Vec2::new(self.cache.content_width(), self.viewport.size.y)
    }

    /// Left and right content insets that let the first and last day reach the
    /// viewport's midpoint.
    pub fn content_insets(&self) -> (f32, f32) {
        let inset = (self.viewport.width() - self.config.day_cell_width) / 2.0;
        (inset, inset)
    }

    /// Allowed horizontal scroll range given the content insets.
    pub fn scroll_range(&self) -> (f32, f32) {
        let (left, right) = self.content_insets();
        let min = -left;
        let max = (self.content_width() + right - self.viewport.width()).max(min);
        (min, max)
    }

    // ── Queries ─────────────────────────────────────────────────

    fn transformed(&self, placement: Placement) -> Placement {
        match placement.kind() {
            ElementKind::Day => focus_day(placement, &self.viewport, &self.config),
            ElementKind::Year => stick_year(placement, &self.viewport, &self.config),
            ElementKind::Month => placement,
        }
    }

    /// Every placement whose rendered frame intersects `rect`, transformed.
    pub fn elements_in(&self, rect: Rect) -> Vec<Placement> {
        self.cache
            .iter()
            .map(|p| self.transformed(*p))
            .filter(|p| p.rendered_frame().intersects(rect))
            .collect()
    }

    /// Elements intersecting the current viewport.
    pub fn visible_elements(&self) -> Vec<Placement> {
        self.elements_in(self.viewport.rect())
    }

    /// Day placement whose rendered center is nearest `x`.
    ///
    /// The search window spans one viewport width either side of `x`, with `x`
    /// first clamped into the content so a query far off either end still lands
    /// on the nearest cells. When the window holds no day (recorded days further
    /// apart than a viewport), every cached day is considered, so this only
    /// returns `None` on an empty cache.
    pub fn closest_to(&self, x: f32) -> Option<Placement> {
        if !self.cache.is_built() {
            return None;
        }
        let width = self.viewport.width().max(self.config.day_cell_width);
        let center = x.clamp(0.0, self.cache.content_width());
        let (search_min, search_max) = (center - width, center + width);
        let days = || self.cache.of_kind(ElementKind::Day).map(|p| self.transformed(*p));
        let nearest = |a: &Placement, b: &Placement| {
            let da = (a.rendered_center().x - x).abs();
            let db = (b.rendered_center().x - x).abs();
            da.total_cmp(&db)
        };
        days()
            .filter(|p| {
                let frame = p.rendered_frame();
                frame.max.x >= search_min && frame.min.x <= search_max
            })
            .min_by(nearest)
            .or_else(|| days().min_by(nearest))
    }

    /// Transformed day cell at `index`, or `None` when it is not laid out.
    pub fn try_item_at(&self, index: usize) -> Option<Placement> {
        self.cache
            .get(ElementKey::day(index))
            .map(|p| self.transformed(*p))
    }

    /// Transformed day cell at `index`.
    ///
    /// # Panics
    ///
    /// Panics if no placement is cached for `index`. Callers must only ask for
    /// items they know are laid out.
    pub fn item_at(&self, index: usize) -> Placement {
        match self.try_item_at(index) {
            Some(placement) => placement,
            None => panic!("no layout cached for day item {index}"),
        }
    }

    /// Transformed month or year label.
    pub fn supplementary_at(&self, kind: ElementKind, index: usize) -> Option<Placement> {
        if !kind.is_supplementary() {
            return None;
        }
        self.cache
            .get(ElementKey { kind, index })
            .map(|p| self.transformed(*p))
    }

    /// Calendar date a placement stands for: its day, or the first day of its
    /// month or year.
    pub fn period_start(&self, key: ElementKey) -> Option<NaiveDate> {
        let start = self.cache.timeline_start()?;
        let placement = self.cache.get(key)?;
        match key.kind {
            ElementKind::Day => {
                let days = (placement.frame.min.x / self.config.day_cell_width).round() as i64;
                Some(start.date() + Duration::days(days))
            }
            ElementKind::Month => Some(month_after(start, key.index as u32)),
            ElementKind::Year => NaiveDate::from_ymd_opt(start.year() + key.index as i32, 1, 1),
        }
    }

    // ── Scroll snapping ─────────────────────────────────────────

    /// Where a scroll gesture should settle: the offset that centres the day
    /// cell nearest the proposed midpoint. Velocity does not influence the pick.
    pub fn target_content_offset(&self, proposed: Vec2, _velocity: Vec2) -> Vec2 {
        let mid = self.viewport.mid_x();
        match self.closest_to(proposed.x + mid) {
            Some(closest) => Vec2::new(closest.rendered_center().x - mid, proposed.y),
            None => proposed,
        }
    }
}
