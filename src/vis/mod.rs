//! Chart rendering
//!
//! Plotters-based PNG output for histograms, trend scatterplots, and
//! side-by-side boxplots.

pub mod charts;

pub use charts::{boxplot_png, histogram_png, overlay_histograms_png, scatter_with_trend_png};

/// Appearance settings shared by all charts
#[derive(Debug, Clone)]
pub struct PlotSettings {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Series colors, cycled in order
    pub palette: Vec<(u8, u8, u8)>,
}

impl Default for PlotSettings {
    fn default() -> Self {
        PlotSettings {
            title: "Plot".to_string(),
            x_label: "X".to_string(),
            y_label: "Y".to_string(),
            width: 800,
            height: 600,
            palette: vec![(66, 133, 244), (219, 68, 55), (244, 180, 0), (15, 157, 88)],
        }
    }
}

impl PlotSettings {
    pub fn titled(title: &str, x_label: &str, y_label: &str) -> Self {
        PlotSettings {
            title: title.to_string(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            ..Default::default()
        }
    }

    pub(crate) fn color(&self, index: usize) -> (u8, u8, u8) {
        self.palette[index % self.palette.len()]
    }
}
