//! Keyed store of built placements.
//!
//! The cache is either empty or holds the complete output of one builder pass.
//! It is replaced wholesale; individual placements are never patched.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use egui::Vec2;

use super::builder::BuiltTimeline;
use super::element::{ElementKey, ElementKind, Placement};

#[derive(Debug, Clone)]
struct Built {
    placements: BTreeMap<ElementKey, Placement>,
    content_width: f32,
    timeline_start: NaiveDateTime,
    viewport_size: Vec2,
    item_count: usize,
}

#[derive(Debug, Clone, Default)]
pub struct LayoutCache {
    built: Option<Built>,
    /// Number of successful builds so far.
    generation: u64,
}

impl LayoutCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_built(&self) -> bool {
        self.built.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Replace the contents with a freshly built timeline.
    pub fn store(&mut self, timeline: BuiltTimeline, viewport_size: Vec2, item_count: usize) {
        let placements = timeline
            .placements
            .into_iter()
            .map(|p| (p.key, p))
            .collect();
        self.built = Some(Built {
            placements,
            content_width: timeline.content_width,
            timeline_start: timeline.timeline_start,
            viewport_size,
            item_count,
        });
        self.generation += 1;
    }

    pub fn clear(&mut self) {
        self.built = None;
    }

    pub fn get(&self, key: ElementKey) -> Option<&Placement> {
        self.built.as_ref()?.placements.get(&key)
    }

    /// All placements in key order (days, then months, then years).
    pub fn iter(&self) -> impl Iterator<Item = &Placement> {
        self.built.iter().flat_map(|b| b.placements.values())
    }

    /// Placements of one tier in index order.
    pub fn of_kind(&self, kind: ElementKind) -> impl Iterator<Item = &Placement> {
        let lo = ElementKey { kind, index: 0 };
        let hi = ElementKey {
            kind,
            index: usize::MAX,
        };
        self.built
            .iter()
            .flat_map(move |b| b.placements.range(lo..=hi).map(|(_, p)| p))
    }

    pub fn count(&self, kind: ElementKind) -> usize {
        self.of_kind(kind).count()
    }

    pub fn content_width(&self) -> f32 {
        self.built.as_ref().map_or(0.0, |b| b.content_width)
    }

    pub fn timeline_start(&self) -> Option<NaiveDateTime> {
        self.built.as_ref().map(|b| b.timeline_start)
    }

    /// Viewport size the current contents were built for.
    pub fn viewport_size(&self) -> Option<Vec2> {
        self.built.as_ref().map(|b| b.viewport_size)
    }

    /// Item count the current contents were built from.
    pub fn item_count(&self) -> Option<usize> {
        self.built.as_ref().map(|b| b.item_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn timeline() -> BuiltTimeline {
        BuiltTimeline {
            placements: vec![
                Placement::new(ElementKey::year(0), 0.0, 0.0, 30.0, 11.0),
                Placement::new(ElementKey::day(1), 2.5, 30.0, 2.5, 30.0),
                Placement::new(ElementKey::month(0), 0.0, 11.0, 77.5, 19.0),
                Placement::new(ElementKey::day(0), 0.0, 30.0, 2.5, 30.0),
            ],
            content_width: 5.0,
            timeline_start: NaiveDate::from_ymd_opt(2020, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn new_cache_is_empty() {
        let cache = LayoutCache::new();
        assert!(!cache.is_built());
        assert_eq!(cache.iter().count(), 0);
        assert_eq!(cache.content_width(), 0.0);
        assert_eq!(cache.generation(), 0);
    }

    #[test]
    fn store_populates_every_tier() {
        let mut cache = LayoutCache::new();
        cache.store(timeline(), Vec2::new(400.0, 60.0), 2);
        assert!(cache.is_built());
        assert_eq!(cache.count(ElementKind::Day), 2);
        assert_eq!(cache.count(ElementKind::Month), 1);
        assert_eq!(cache.count(ElementKind::Year), 1);
        assert_eq!(cache.item_count(), Some(2));
        assert_eq!(cache.generation(), 1);
    }

    #[test]
    fn of_kind_yields_index_order() {
        let mut cache = LayoutCache::new();
        cache.store(timeline(), Vec2::new(400.0, 60.0), 2);
        let days: Vec<usize> = cache.of_kind(ElementKind::Day).map(|p| p.key.index).collect();
        assert_eq!(days, vec![0, 1]);
    }

    #[test]
    fn clear_drops_everything_but_keeps_generation() {
        let mut cache = LayoutCache::new();
        cache.store(timeline(), Vec2::new(400.0, 60.0), 2);
        cache.clear();
        assert!(!cache.is_built());
        assert!(cache.get(ElementKey::day(0)).is_none());
        assert_eq!(cache.generation(), 1);
    }
}
