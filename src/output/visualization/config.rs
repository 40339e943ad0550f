//! Plot configuration shared across visualization modules

use plotters::prelude::*;

/// Configuration for customizing plots
///
/// Used by both profile plots (value against position) and heat maps
/// (position against time).
///
/// # Example
///
/// ```rust
/// use grain_rs::output::visualization::PlotConfig;
/// use plotters::prelude::*;
///
/// let mut config = PlotConfig::profiles("Two grains");
/// config.width = 1920;
/// config.height = 1080;
/// config.series_colors = Some(vec![BLUE, RED]);
/// ```
#[derive(Clone)]
pub struct PlotConfig {
    /// Image width in pixels (default: 1024)
    pub width: u32,

    /// Image height in pixels (default: 768)
    pub height: u32,

    /// Plot title (default: "Plot")
    pub title: String,

    /// X-axis label (default: "Position")
    pub xlabel: String,

    /// Y-axis label (default: "Value")
    pub ylabel: String,

    /// Line color of [`plot_final_profile`](super::plot_final_profile) (default: RED)
    ///
    /// Takes precedence over `series_colors` there.
    pub line_color: RGBColor,

    /// Optional colors for multi-profile plots, one per profile
    ///
    /// If None, or too short, the default palette is used.
    pub series_colors: Option<Vec<RGBColor>>,

    /// Background color (default: WHITE)
    pub background: RGBColor,

    /// Line width in pixels (default: 2)
    pub line_width: u32,

    /// Show grid lines (default: true)
    pub show_grid: bool,

    /// Maximum number of time rows drawn by a heat map (default: 200)
    pub max_time_cells: usize,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            title: "Plot".to_string(),
            xlabel: "Position".to_string(),
            ylabel: "Value".to_string(),
            line_color: RED,
            series_colors: None,
            background: WHITE,
            line_width: 2,
            show_grid: true,
            max_time_cells: 200,
        }
    }
}

/// Helper trait to accept both `String` and `None` for optional titles
pub trait IntoOptionalTitle {
    /// `Some(title)`, or `None` for the default title
    fn into_optional_title(self) -> Option<String>;
}

impl IntoOptionalTitle for &str {
    fn into_optional_title(self) -> Option<String> {
        Some(self.to_string())
    }
}

impl IntoOptionalTitle for String {
    fn into_optional_title(self) -> Option<String> {
        Some(self)
    }
}

impl<T: IntoOptionalTitle> IntoOptionalTitle for Option<T> {
    fn into_optional_title(self) -> Option<String> {
        self.and_then(|t| t.into_optional_title())
    }
}

/// Constant for no title (default title will be used)
///
/// ```rust
/// use grain_rs::output::visualization::{PlotConfig, NO_TITLE};
///
/// let config = PlotConfig::heatmap(NO_TITLE);
/// assert_eq!(config.title, "Space-Time Field");
/// ```
pub const NO_TITLE: Option<&str> = None;

impl PlotConfig {
    /// Config for profiles along the combined domain
    ///
    /// Title defaults to "Profile Evolution".
    pub fn profiles(title: impl IntoOptionalTitle) -> Self {
        Self {
            title: title
                .into_optional_title()
                .unwrap_or_else(|| "Profile Evolution".to_string()),
            ..Self::default()
        }
    }

    /// Config for space-time heat maps
    ///
    /// Sets ylabel to "Time" and title to custom value or "Space-Time Field".
    pub fn heatmap(title: impl IntoOptionalTitle) -> Self {
        Self {
            title: title
                .into_optional_title()
                .unwrap_or_else(|| "Space-Time Field".to_string()),
            ylabel: "Time".to_string(),
            ..Self::default()
        }
    }

    /// Builder pattern: set axis labels
    pub fn with_labels(mut self, xlabel: &str, ylabel: &str) -> Self {
        self.xlabel = xlabel.to_string();
        self.ylabel = ylabel.to_string();
        self
    }

    /// Color of profile `index`
    ///
    /// Uses custom colors if provided, otherwise the default palette.
    pub(crate) fn series_color(&self, index: usize) -> RGBColor {
        if let Some(colors) = &self.series_colors
            && index < colors.len()
        {
            return colors[index];
        }

        const PALETTE: [RGBColor; 10] = [
            BLUE,
            RED,
            GREEN,
            MAGENTA,
            CYAN,
            BLACK,
            RGBColor(255, 165, 0),
            RGBColor(128, 0, 128),
            RGBColor(255, 192, 203),
            RGBColor(165, 42, 42),
        ];

        PALETTE[index % PALETTE.len()]
    }
}

// =================================================================================================
// Tests
// =================================================================================================
