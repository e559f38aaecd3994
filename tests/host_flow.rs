use chrono::NaiveDate;
use egui::Vec2;

use timeline_app::io::csv_import::parse_csv;
use timeline_app::layout::{ElementKind, LayoutConfig, TimelineLayout, ViewportState};
use timeline_app::model::{DataSource, Snapshot};

fn layout() -> TimelineLayout {
    let mut layout = TimelineLayout::new(LayoutConfig::default());
    layout.set_viewport(ViewportState::scrolled_to(Vec2::ZERO, Vec2::new(400.0, 60.0)));
    layout
}

#[test]
fn imported_rows_drive_a_layout() {
    let csv = "Timestamp;Note\n2020-01-30 09:00;a\n2020-01-31 10:00;b\n2020-01-31 18:00;c\n2020-02-01 08:00;d\n";
    let (records, skipped) = parse_csv(csv).unwrap();
    assert_eq!(skipped, 0);

    let snapshot = Snapshot::from_records(records);
    assert_eq!(snapshot.number_of_items(), 3);
    assert_eq!(snapshot.records_in(1).len(), 2);

    let mut layout = layout();
    layout.prepare(snapshot.number_of_items(), &snapshot);
    assert_eq!(layout.content_width(), 7.5);
    assert_eq!(layout.cache().count(ElementKind::Month), 2);
    assert_eq!(layout.cache().count(ElementKind::Year), 1);
    assert_eq!(
        layout.supplementary_at(ElementKind::Month, 1).unwrap().frame.min.x,
        5.0
    );
    assert_eq!(
        layout.period_start(timeline_app::layout::ElementKey::month(1)),
        NaiveDate::from_ymd_opt(2020, 2, 1)
    );
}

#[test]
fn records_on_existing_days_keep_the_layout() {
    let csv = "Timestamp;Note\n2021-03-01 09:00;a\n2021-03-04 09:00;b\n";
    let (records, _) = parse_csv(csv).unwrap();
    let mut source = DataSource::new(Snapshot::from_records(records.clone()));
    let mut layout = layout();
    layout.prepare(source.snapshot().number_of_items(), source.snapshot());
    let generation = layout.generation();

    let (extra, _) = parse_csv("Timestamp;Note\n2021-03-04 17:30;later\n").unwrap();
    let diff = source.apply(Snapshot::from_records(records.iter().cloned().chain(extra)));
    assert!(diff.is_empty());
    assert!(!diff.count_changed);

    layout.prepare(source.snapshot().number_of_items(), source.snapshot());
    assert_eq!(layout.generation(), generation);
    assert_eq!(source.snapshot().records_in(1).len(), 2);
}

#[test]
fn a_new_day_rebuilds_with_one_more_cell() {
    let csv = "Timestamp;Note\n2021-12-30 09:00;a\n";
    let (records, _) = parse_csv(csv).unwrap();
    let mut source = DataSource::new(Snapshot::from_records(records.clone()));
    let mut layout = layout();
    layout.prepare(source.snapshot().number_of_items(), source.snapshot());

    let (extra, _) = parse_csv("Timestamp;Note\n2022-01-02 12:00;new year\n").unwrap();
    let diff = source.apply(Snapshot::from_records(records.into_iter().chain(extra)));
    assert_eq!(diff.inserted.len(), 1);
    layout.invalidate_data_source_counts();
    layout.prepare(source.snapshot().number_of_items(), source.snapshot());

    assert_eq!(layout.cache().count(ElementKind::Day), 2);
    assert_eq!(layout.cache().count(ElementKind::Year), 2);
    assert_eq!(layout.item_at(1).frame.min.x, 7.5);
}
