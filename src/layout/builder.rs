//! Single-pass geometry for day cells, month bands and year labels.

use chrono::{Datelike, NaiveDateTime};

use super::calendar::{days_between, days_in_month, next_month, start_of_day, start_of_month, start_of_year};
use super::config::LayoutConfig;
use super::element::{ElementKey, Placement};
use crate::error::LayoutError;

/// One dated input to a layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineItem {
    /// Position of the item in the host's sequence.
    pub key: usize,
    pub date: NaiveDateTime,
}

/// Output of [`build_timeline`].
#[derive(Debug, Clone)]
pub struct BuiltTimeline {
    pub placements: Vec<Placement>,
    pub content_width: f32,
    /// Midnight of the first item's day; x = 0.
    pub timeline_start: NaiveDateTime,
}

/// Compute placements for every tier.
///
/// `items` must be sorted ascending by date; the first and last item bound the
/// timeline.
pub fn build_timeline(
    items: &[TimelineItem],
    config: &LayoutConfig,
) -> Result<BuiltTimeline, LayoutError> {
    let (first, last) = match (items.first(), items.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(LayoutError::EmptyTimeline),
    };
    let cell = config.day_cell_width;
    let timeline_start = start_of_day(first.date);
    let timeline_end = last.date;

    let mut placements = Vec::with_capacity(items.len() + 16);
    let mut content_width: f32 = 0.0;

    // Day cells
    for item in items {
        let x = days_between(timeline_start, item.date) as f32 * cell;
        placements.push(Placement::new(
            ElementKey::day(item.key),
            x,
            config.day_y(),
            cell,
            config.day_height,
        ));
        content_width = content_width.max(x + cell);
    }

    // Month bands and year labels. The month holding the first day usually
    // begins before it, so every band is shifted left by that many days.
    let mut date = start_of_month(timeline_start);
    let initial_offset = days_between(date, timeline_start) as f32 * cell;
    let mut month_offset: f32 = 0.0;
    let mut month_index = 0;
    let mut year_index = 0;

    while date <= timeline_end {
        let month_width = days_in_month(date) as f32 * cell;
        let x = month_offset - initial_offset;
        placements.push(Placement::new(
            ElementKey::month(month_index),
            x,
            config.month_y(),
            month_width,
            config.month_height,
        ));
        month_offset += month_width;

        if date.month() == 1 || year_index == 0 {
            let into_year = days_between(start_of_year(date), date) as f32 * cell;
            placements.push(Placement::new(
                ElementKey::year(year_index),
                x - into_year,
                config.origin_y,
                config.year_label_width,
                config.year_height,
            ));
            year_index += 1;
        }

        date = next_month(date);
        month_index += 1;
    }

    tracing::debug!(
        days = items.len(),
        months = month_index,
        years = year_index,
        content_width,
        "timeline geometry built"
    );

    Ok(BuiltTimeline {
        placements,
        content_width,
        timeline_start,
    })
}
