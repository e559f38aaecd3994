//! Records grouped into one section per calendar day, in the order the timeline
//! shows them.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::record::Record;
use crate::layout::DateResolver;

/// A calendar day; sections sort chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DaySection {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl DaySection {
    pub fn of(timestamp: NaiveDateTime) -> Self {
        Self {
            year: timestamp.year(),
            month: timestamp.month(),
            day: timestamp.day(),
        }
    }

    pub fn naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }

    /// Midnight of this day, or `None` for an impossible date.
    pub fn date(&self) -> Option<NaiveDateTime> {
        self.naive_date().map(|d| d.and_time(NaiveTime::MIN))
    }
}

/// Immutable view of the data: ascending day sections, each with its records.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    sections: Vec<(DaySection, Vec<Record>)>,
}

impl Snapshot {
    /// Group `records` by calendar day. Records within a day keep their
    /// timestamp order.
    pub fn from_records(records: impl IntoIterator<Item = Record>) -> Self {
        let mut grouped: BTreeMap<DaySection, Vec<Record>> = BTreeMap::new();
        for record in records {
            grouped
                .entry(DaySection::of(record.timestamp))
                .or_default()
                .push(record);
        }
        let sections = grouped
            .into_iter()
            .map(|(section, mut records)| {
                records.sort_by_key(|r| r.timestamp);
                (section, records)
            })
            .collect();
        Self { sections }
    }

    /// Demo data: one record every other day going back `history_days` steps
    /// from `now`.
    pub fn sample(now: NaiveDateTime, history_days: usize) -> Self {
        Self::from_records((0..=history_days as i64).map(|i| Record::days_back(i * 2, now)))
    }

    /// Number of timeline items (one per day section).
    pub fn number_of_items(&self) -> usize {
        self.sections.len()
    }

    pub fn number_of_records(&self) -> usize {
        self.sections.iter().map(|(_, r)| r.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn sections(&self) -> impl Iterator<Item = &DaySection> {
        self.sections.iter().map(|(s, _)| s)
    }

    pub fn section(&self, position: usize) -> Option<&DaySection> {
        self.sections.get(position).map(|(s, _)| s)
    }

    pub fn records_in(&self, position: usize) -> &[Record] {
        self.sections
            .get(position)
            .map(|(_, r)| r.as_slice())
            .unwrap_or(&[])
    }

    /// Every record, chronologically.
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.sections.iter().flat_map(|(_, r)| r.iter())
    }

    pub fn position_of(&self, section: &DaySection) -> Option<usize> {
        self.sections.binary_search_by(|(s, _)| s.cmp(section)).ok()
    }
}

impl DateResolver for Snapshot {
    fn resolve_date(&self, position: usize) -> Option<NaiveDateTime> {
        self.section(position)?.date()
    }
}

/// Section-level difference between two snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotDiff {
    pub inserted: Vec<DaySection>,
    pub removed: Vec<DaySection>,
    /// The number of timeline items differs; the layout must be rebuilt.
    pub count_changed: bool,
}

impl SnapshotDiff {
    pub fn is_empty(&self) -> bool {
        self.inserted.is_empty() && self.removed.is_empty()
    }
}

/// Holds the snapshot currently bound to the timeline.
#[derive(Debug, Clone, Default)]
pub struct DataSource {
    current: Snapshot,
}

impl DataSource {
    pub fn new(snapshot: Snapshot) -> Self {
        Self { current: snapshot }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.current
    }

    /// Swap in `next` and report which day sections appeared or disappeared.
    pub fn apply(&mut self, next: Snapshot) -> SnapshotDiff {
        let old: BTreeSet<DaySection> = self.current.sections().copied().collect();
        let new: BTreeSet<DaySection> = next.sections().copied().collect();
        let diff = SnapshotDiff {
            inserted: new.difference(&old).copied().collect(),
            removed: old.difference(&new).copied().collect(),
            count_changed: old.len() != new.len(),
        };
        tracing::debug!(
            inserted = diff.inserted.len(),
            removed = diff.removed.len(),
            items = next.number_of_items(),
            "snapshot applied"
        );
        self.current = next;
        diff
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn records_are_grouped_per_day_in_ascending_order() {
        let snapshot = Snapshot::from_records(vec![
            Record::new(at(2020, 3, 2, 9), "late"),
            Record::new(at(2020, 1, 5, 18), "b"),
            Record::new(at(2020, 1, 5, 8), "a"),
        ]);
        assert_eq!(snapshot.number_of_items(), 2);
        assert_eq!(snapshot.number_of_records(), 3);
        let days: Vec<_> = snapshot.sections().copied().collect();
        assert_eq!(
            days,
            vec![
                DaySection { year: 2020, month: 1, day: 5 },
                DaySection { year: 2020, month: 3, day: 2 },
            ]
        );
        let notes: Vec<_> = snapshot.records_in(0).iter().map(|r| r.note.as_str()).collect();
        assert_eq!(notes, vec!["a", "b"]);
    }

    #[test]
    fn resolves_each_section_to_midnight() {
        let snapshot = Snapshot::from_records(vec![Record::new(at(2020, 10, 30, 17), "")]);
        assert_eq!(snapshot.resolve_date(0), Some(at(2020, 10, 30, 0)));
        assert_eq!(snapshot.resolve_date(1), None);
    }

    #[test]
    fn sample_spans_every_other_day() {
        let now = at(2020, 10, 30, 12);
        let snapshot = Snapshot::sample(now, 6);
        assert_eq!(snapshot.number_of_items(), 7);
        assert_eq!(snapshot.section(0), Some(&DaySection::of(at(2020, 10, 18, 0))));
        assert_eq!(snapshot.section(6), Some(&DaySection::of(now)));
    }

    #[test]
    fn position_of_finds_sections() {
        let snapshot = Snapshot::sample(at(2020, 10, 30, 12), 3);
        let last = DaySection::of(at(2020, 10, 30, 0));
        assert_eq!(snapshot.position_of(&last), Some(3));
        assert_eq!(snapshot.position_of(&DaySection::of(at(2020, 10, 29, 0))), None);
    }

    #[test]
    fn apply_reports_section_changes() {
        let mut source = DataSource::new(Snapshot::sample(at(2020, 10, 30, 12), 2));
        let same = source.apply(Snapshot::sample(at(2020, 10, 30, 8), 2));
        assert!(same.is_empty());
        assert!(!same.count_changed);

        let mut records: Vec<Record> = source.snapshot().records().cloned().collect();
        records.push(Record::new(at(2020, 11, 1, 10), "new"));
        let diff = source.apply(Snapshot::from_records(records));
        assert_eq!(diff.inserted, vec![DaySection { year: 2020, month: 11, day: 1 }]);
        assert!(diff.removed.is_empty());
        assert!(diff.count_changed);
        assert_eq!(source.snapshot().number_of_items(), 4);
    }

    #[test]
    fn invalid_section_has_no_date() {
        let bogus = DaySection { year: 2021, month: 2, day: 30 };
        assert_eq!(bogus.date(), None);
    }
}
