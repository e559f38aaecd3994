use egui::{Color32, FontId, Rounding, Stroke, Visuals};

// ── Palette ──────────────────────────────────────────────────────────────────

pub const BG_DARK: Color32 = Color32::from_rgb(24, 24, 32);
pub const BG_PANEL: Color32 = Color32::from_rgb(30, 30, 40);
pub const BG_STRIP: Color32 = Color32::from_rgb(34, 37, 48);
pub const BG_SELECTED: Color32 = Color32::from_rgba_premultiplied(80, 140, 220, 45);
pub const STATUS_BAR_BG: Color32 = Color32::from_rgb(28, 28, 37);

pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(50, 52, 64);
pub const GRID_LINE: Color32 = Color32::from_rgb(44, 46, 58);

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(230, 232, 240);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(155, 160, 178);
pub const TEXT_DIM: Color32 = Color32::from_rgb(100, 105, 120);

pub const ACCENT: Color32 = Color32::from_rgb(80, 140, 220);
pub const FOCUS: Color32 = Color32::from_rgb(240, 75, 75);

/// Fill for day cells, from a single record up to busy days.
pub const DAY_SHADES: &[Color32] = &[
    Color32::from_rgb(120, 125, 140),
    Color32::from_rgb(150, 170, 200),
    Color32::from_rgb(180, 205, 240),
    Color32::from_rgb(235, 240, 255),
];

// ── Sizes ────────────────────────────────────────────────────────────────────

pub const STRIP_PADDING: f32 = 8.0;
pub const STATUS_BAR_HEIGHT: f32 = 24.0;
pub const DIALOG_WIDTH: f32 = 320.0;
/// Month bands narrower than this get no text.
pub const MIN_MONTH_LABEL_WIDTH: f32 = 24.0;

// ── Fonts ────────────────────────────────────────────────────────────────────

pub fn font_year() -> FontId {
    FontId::proportional(9.5)
}

pub fn font_month() -> FontId {
    FontId::proportional(10.5)
}

pub fn font_menu() -> FontId {
    FontId::proportional(13.0)
}

pub fn font_status() -> FontId {
    FontId::proportional(11.0)
}

/// Shade for a day holding `records` records.
pub fn day_fill(records: usize) -> Color32 {
    let idx = records.saturating_sub(1).min(DAY_SHADES.len() - 1);
    DAY_SHADES[idx]
}

// ── Apply custom visuals ─────────────────────────────────────────────────────

/// Fill for the strip's widget states: idle, hovered, pressed.
const WIDGET_FILLS: [Color32; 3] = [
    Color32::from_rgb(42, 44, 56),
    Color32::from_rgb(52, 54, 68),
    Color32::from_rgb(60, 62, 76),
];

/// Dark visuals keyed to the strip palette. Only the pieces the window shows
/// are touched: panels, the menu bar, dialog buttons and the note field.
pub fn apply_theme(ctx: &egui::Context) {
    let mut visuals = Visuals::dark();
    visuals.override_text_color = Some(TEXT_PRIMARY);
    visuals.panel_fill = BG_PANEL;
    visuals.window_fill = BG_PANEL;
    visuals.faint_bg_color = BG_STRIP;
    visuals.extreme_bg_color = BG_DARK;
    visuals.window_rounding = Rounding::same(8.0);
    visuals.window_stroke = Stroke::new(1.0, BORDER_SUBTLE);

    let widgets = &mut visuals.widgets;
    widgets.noninteractive.bg_fill = BG_PANEL;
    widgets.noninteractive.bg_stroke = Stroke::new(1.0, GRID_LINE);
    widgets.noninteractive.fg_stroke = Stroke::new(1.0, TEXT_SECONDARY);
    for (state, fill) in [&mut widgets.inactive, &mut widgets.hovered, &mut widgets.active]
        .into_iter()
        .zip(WIDGET_FILLS)
    {
        state.bg_fill = fill;
        state.weak_bg_fill = fill;
        state.rounding = Rounding::same(4.0);
    }
    widgets.inactive.bg_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    widgets.hovered.bg_stroke = Stroke::new(1.0, ACCENT);
    widgets.active.bg_stroke = Stroke::new(1.0, FOCUS);

    // Text cursor and selection in the note field.
    visuals.selection.bg_fill = BG_SELECTED;
    visuals.selection.stroke = Stroke::new(1.0, ACCENT);

    ctx.set_visuals(visuals);
    ctx.style_mut(|style| {
        style.spacing.item_spacing = egui::vec2(8.0, 4.0);
        style.spacing.menu_margin = egui::Margin::same(6.0);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widget_fills_step_from_idle_to_pressed() {
        let luma = |c: Color32| c.r() as u32 + c.g() as u32 + c.b() as u32;
        assert!(WIDGET_FILLS.windows(2).all(|w| luma(w[0]) < luma(w[1])));
        assert!(luma(WIDGET_FILLS[0]) > luma(BG_PANEL));
    }

    #[test]
    fn busy_days_saturate_at_the_brightest_shade() {
        assert_eq!(day_fill(0), DAY_SHADES[0]);
        assert_eq!(day_fill(1), DAY_SHADES[0]);
        assert_eq!(day_fill(2), DAY_SHADES[1]);
        assert_eq!(day_fill(99), DAY_SHADES[DAY_SHADES.len() - 1]);
    }
}
