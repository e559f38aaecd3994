use chrono::{Local, NaiveDate};
use egui::Vec2;
use std::path::PathBuf;

use crate::config::{AppPaths, AppSettings};
use crate::layout::TimelineLayout;
use crate::model::{DataSource, Record, Snapshot};
use crate::ui;
use crate::ui::timeline_view::ScrollState;

/// Main application state.
pub struct TimelineApp {
    /// Source of truth; the snapshot is rebuilt from it on every change.
    pub records: Vec<Record>,
    pub data_source: DataSource,
    pub layout: TimelineLayout,
    pub scroll: ScrollState,
    pub file_path: Option<PathBuf>,
    pub settings: AppSettings,
    pub paths: AppPaths,

    /// Day section under the midpoint after the last frame.
    pub focused: Option<usize>,

    // Dialog state
    pub show_add_record: bool,
    pub show_about: bool,
    pub new_record_date: NaiveDate,
    pub new_record_note: String,

    pending_jump: Option<Jump>,

    pub status_message: String,
}

#[derive(Debug, Clone, Copy)]
enum Jump {
    First,
    Last,
}

impl TimelineApp {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: AppSettings, paths: AppPaths) -> Self {
        // Register Phosphor icon font as a fallback so icons render inline with text
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        let mut app = Self::with_settings(settings, paths);
        app.load_sample();
        app
    }

    /// App state without a window; the timeline starts empty.
    pub fn with_settings(settings: AppSettings, paths: AppPaths) -> Self {
        Self {
            records: Vec::new(),
            data_source: DataSource::default(),
            layout: TimelineLayout::new(settings.layout),
            scroll: ScrollState::default(),
            file_path: None,
            settings,
            paths,
            focused: None,
            show_add_record: false,
            show_about: false,
            new_record_date: Local::now().date_naive(),
            new_record_note: String::new(),
            pending_jump: None,
            status_message: "Ready".to_string(),
        }
    }

    /// Rebuild the snapshot from `records` and invalidate the layout when the
    /// set of days changed.
    fn apply_records(&mut self) {
        let snapshot = Snapshot::from_records(self.records.iter().cloned());
        let diff = self.data_source.apply(snapshot);
        if !diff.is_empty() || diff.count_changed {
            self.layout.invalidate_data_source_counts();
        }
    }

    fn replace_records(&mut self, records: Vec<Record>) {
        self.records = records;
        self.apply_records();
        self.pending_jump = Some(Jump::Last);
    }

    pub fn load_sample(&mut self) {
        let now = Local::now().naive_local();
        let sample = Snapshot::sample(now, self.settings.sample_history_days);
        self.replace_records(sample.records().cloned().collect());
        self.file_path = None;
        self.status_message = "Sample data loaded".to_string();
    }

    // --- File operations ---

    pub fn new_timeline(&mut self) {
        self.replace_records(Vec::new());
        self.file_path = None;
        self.status_message = "New timeline".to_string();
    }

    pub fn open_records(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Timeline Records", &["json"])
            .pick_file()
        {
            match crate::io::load_records(&path) {
                Ok(records) => {
                    let count = records.len();
                    self.replace_records(records);
                    self.file_path = Some(path);
                    self.status_message = format!("Loaded {} records", count);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "open failed");
                    self.status_message = format!("Error loading: {}", e);
                }
            }
        }
    }

    pub fn save_records(&mut self) {
        if let Some(path) = self.file_path.clone() {
            self.write_records(&path);
        } else {
            self.save_records_as();
        }
    }

    pub fn save_records_as(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Timeline Records", &["json"])
            .set_file_name("timeline.json")
            .save_file()
        {
            self.file_path = Some(path.clone());
            self.write_records(&path);
        }
    }

    fn write_records(&mut self, path: &std::path::Path) {
        let ordered: Vec<Record> = self.data_source.snapshot().records().cloned().collect();
        match crate::io::save_records(&ordered, path) {
            Ok(()) => self.status_message = "Records saved".to_string(),
            Err(e) => {
                tracing::warn!(error = %e, "save failed");
                self.status_message = format!("Error saving: {}", e);
            }
        }
    }

    pub fn import_csv(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv", "txt"])
            .pick_file()
        {
            match crate::io::csv_import::import_csv(&path) {
                Ok((records, skipped)) => {
                    let count = records.len();
                    self.replace_records(records);
                    self.file_path = None;
                    self.status_message = if skipped > 0 {
                        format!("Imported {} records ({} rows skipped)", count, skipped)
                    } else {
                        format!("Imported {} records", count)
                    };
                }
                Err(e) => {
                    tracing::warn!(error = %e, "CSV import failed");
                    self.status_message = format!("CSV import failed: {}", e);
                }
            }
        }
    }

    pub fn export_csv(&mut self) {
        if self.records.is_empty() {
            self.status_message = "Nothing to export".to_string();
            return;
        }
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name("timeline.csv")
            .save_file()
        {
            match crate::io::csv_export::export_csv(self.data_source.snapshot().records(), &path) {
                Ok(count) => self.status_message = format!("Exported {} records to CSV", count),
                Err(e) => {
                    tracing::warn!(error = %e, "CSV export failed");
                    self.status_message = format!("CSV export failed: {}", e);
                }
            }
        }
    }

    // --- Record operations ---

    pub fn add_record_from_dialog(&mut self) {
        let timestamp = self.new_record_date.and_time(Local::now().time());
        let record = Record::new(timestamp, std::mem::take(&mut self.new_record_note));
        self.records.push(record);
        self.apply_records();
        self.status_message = format!("Record added on {}", self.new_record_date.format("%Y-%m-%d"));
    }

    // --- Navigation ---

    pub fn jump_to_first(&mut self) {
        self.pending_jump = Some(Jump::First);
    }

    pub fn jump_to_last(&mut self) {
        self.pending_jump = Some(Jump::Last);
    }

    /// Settle the strip on the first or last day once the layout is built.
    fn resolve_jump(&mut self) {
        let Some(jump) = self.pending_jump else {
            return;
        };
        let count = self.data_source.snapshot().number_of_items();
        if count == 0 {
            self.pending_jump = None;
            return;
        }
        if !self.layout.is_built() {
            return;
        }
        let index = match jump {
            Jump::First => 0,
            Jump::Last => count - 1,
        };
        let centre = self.layout.item_at(index).rendered_center().x;
        let target = self
            .layout
            .target_content_offset(Vec2::new(centre - self.layout.viewport().mid_x(), 0.0), Vec2::ZERO);
        self.scroll.settle_to(target.x);
        self.pending_jump = None;
    }

    fn focused_summary(&self) -> String {
        let snapshot = self.data_source.snapshot();
        let Some(section) = self.focused.and_then(|i| snapshot.section(i)) else {
            return String::new();
        };
        let count = self.focused.map_or(0, |i| snapshot.records_in(i).len());
        let day = section
            .naive_date()
            .map(|d| d.format("%a %d %b %Y").to_string())
            .unwrap_or_default();
        format!("{} · {} record{}", day, count, if count == 1 { "" } else { "s" })
    }
}

impl eframe::App for TimelineApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui::theme::apply_theme(ctx);

        // Keyboard shortcuts outside closures to avoid borrow issues
        let should_save = ctx.input(|i| i.modifiers.ctrl && i.key_pressed(egui::Key::S));
        let go_first = ctx.input(|i| i.key_pressed(egui::Key::Home));
        let go_last = ctx.input(|i| i.key_pressed(egui::Key::End));
        if should_save {
            self.save_records();
        }
        if go_first {
            self.jump_to_first();
        }
        if go_last {
            self.jump_to_last();
        }

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        let summary = self.focused_summary();
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(ui::theme::STATUS_BAR_HEIGHT)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::STATUS_BAR_BG)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .font(ui::theme::font_status())
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(format!("Layout #{}", self.layout.generation()))
                                .size(10.5)
                                .color(ui::theme::TEXT_DIM),
                        );
                        ui.label(egui::RichText::new(" · ").size(10.5).color(ui::theme::TEXT_DIM));
                        ui.label(egui::RichText::new(&summary).size(10.5).color(ui::theme::TEXT_DIM));
                    });
                });
            });

        let frame = egui::Frame::default()
            .fill(ui::theme::BG_DARK)
            .inner_margin(egui::Margin::ZERO);
        egui::CentralPanel::default().frame(frame).show(ctx, |ui| {
            let snapshot = self.data_source.snapshot();
            let interaction = ui::timeline_view::show_timeline(&mut self.layout, snapshot, &mut self.scroll, ui);
            self.focused = interaction.focused;

            ui.add_space(8.0);
            let records = self.focused.map(|i| snapshot.records_in(i)).unwrap_or(&[]);
            egui::ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
                ui.add_space(4.0);
                for record in records {
                    ui.horizontal(|ui| {
                        ui.add_space(12.0);
                        ui.label(
                            egui::RichText::new(record.timestamp.format("%H:%M").to_string())
                                .color(ui::theme::TEXT_SECONDARY),
                        );
                        ui.label(if record.note.is_empty() { "-" } else { record.note.as_str() });
                    });
                }
            });
        });

        self.resolve_jump();

        if self.show_add_record {
            ui::dialogs::show_add_record_dialog(self, ctx);
        }
        if self.show_about {
            ui::dialogs::show_about_dialog(self, ctx);
        }
    }
}
