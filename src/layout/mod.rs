//! Timeline layout engine: geometry, caching, viewport queries, transforms and
//! scroll snapping for a three-tier (day / month / year) horizontal timeline.

pub mod builder;
pub mod cache;
pub mod calendar;
pub mod config;
pub mod element;
pub mod engine;
pub mod transform;
pub mod viewport;

pub use builder::{build_timeline, BuiltTimeline, TimelineItem};
pub use cache::LayoutCache;
pub use config::LayoutConfig;
pub use element::{ElementKey, ElementKind, Placement, Transform};
pub use engine::{DateResolver, TimelineLayout};
pub use viewport::ViewportState;
