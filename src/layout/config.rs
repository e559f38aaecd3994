use serde::{Deserialize, Serialize};

/// Fixed visual constants of the timeline, chosen at construction.
///
/// All fields carry `#[serde(default)]` so a partial settings file is valid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Width of one day cell in points.
    pub day_cell_width: f32,
    pub day_height: f32,
    pub month_height: f32,
    pub year_height: f32,
    /// Gap kept between a sticky year label and the viewport edge.
    pub sticky_margin: f32,
    /// Vertical offset of the year band.
    pub origin_y: f32,
    pub year_label_width: f32,
    /// Horizontal scale applied to the focused day cell.
    pub focus_scale: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            day_cell_width: 2.5,
            day_height: 30.0,
            month_height: 19.0,
            year_height: 11.0,
            sticky_margin: 50.0,
            origin_y: 0.0,
            year_label_width: 30.0,
            focus_scale: 10.0,
        }
    }
}

impl LayoutConfig {
    pub fn month_y(&self) -> f32 {
        self.origin_y + self.year_height
    }

    pub fn day_y(&self) -> f32 {
        self.origin_y + self.year_height + self.month_height
    }

    /// Total height of the three bands.
    pub fn strip_height(&self) -> f32 {
        self.year_height + self.month_height + self.day_height
    }

    /// Horizontal extent a year label may travel before reaching the next year.
    pub fn one_year_width(&self) -> f32 {
        365.0 * self.day_cell_width
    }
}
