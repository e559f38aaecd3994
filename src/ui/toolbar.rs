use crate::app::TimelineApp;
use crate::ui::theme;
use egui::{menu, RichText, Ui};

/// Render the top toolbar / menu bar.
pub fn show_toolbar(app: &mut TimelineApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.menu_button(RichText::new("  File  ").font(theme::font_menu()), |ui| {
            if ui.button("  New").clicked() {
                app.new_timeline();
                ui.close_menu();
            }
            if ui.button("  Open...").clicked() {
                app.open_records();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Save          Ctrl+S").clicked() {
                app.save_records();
                ui.close_menu();
            }
            if ui.button("  Save As...").clicked() {
                app.save_records_as();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Import CSV...").clicked() {
                app.import_csv();
                ui.close_menu();
            }
            if ui.button("  Export CSV...").clicked() {
                app.export_csv();
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  View  ").font(theme::font_menu()), |ui| {
            let first = format!("  {}  First Day      Home", egui_phosphor::regular::ARROW_LEFT);
            if ui.button(first).clicked() {
                app.jump_to_first();
                ui.close_menu();
            }
            let last = format!("  {}  Last Day        End", egui_phosphor::regular::ARROW_RIGHT);
            if ui.button(last).clicked() {
                app.jump_to_last();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Reload Sample Data").clicked() {
                app.load_sample();
                ui.close_menu();
            }
            if ui.button("  Open Settings Folder").clicked() {
                let dir = app.paths.config_dir.clone();
                if let Err(e) = open::that(&dir) {
                    tracing::warn!(dir = ?dir, error = %e, "could not open settings folder");
                }
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  Help  ").font(theme::font_menu()), |ui| {
            if ui.button("About").clicked() {
                app.show_about = true;
                ui.close_menu();
            }
        });

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let add = format!("{}  Add Record", egui_phosphor::regular::PLUS);
            if ui.button(add).clicked() {
                app.show_add_record = true;
            }
            let name = app
                .file_path
                .as_ref()
                .and_then(|p| p.file_name())
                .and_then(|n| n.to_str())
                .unwrap_or("(unsaved)");
            ui.label(RichText::new(name).size(11.0).weak());
        });
    });
}
