// src/config/model.rs

use serde::Deserialize;

/// Settings as read from an optional TOML file.
///
/// ```toml
/// [layout]
/// x_spacing = 4.5
/// y_spacing = 3.0
/// margin = 2.0
///
/// [render]
/// show_structural_ops = true
/// ```
///
/// All sections are optional and have reasonable defaults. This is the
/// unvalidated form; convert it with `Settings::try_from`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawSettings {
    #[serde(default)]
    pub layout: LayoutSection,

    #[serde(default)]
    pub render: RenderSection,
}

/// `[layout]` section.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LayoutSection {
    /// Horizontal distance between consecutive layers.
    #[serde(default = "default_x_spacing")]
    pub x_spacing: f64,

    /// Vertical distance between nodes of the same layer.
    #[serde(default = "default_y_spacing")]
    pub y_spacing: f64,

    /// Padding added around the node positions when computing drawing bounds.
    #[serde(default = "default_margin")]
    pub margin: f64,
}

fn default_x_spacing() -> f64 {
    4.5
}

fn default_y_spacing() -> f64 {
    3.0
}

fn default_margin() -> f64 {
    2.0
}

impl Default for LayoutSection {
    fn default() -> Self {
        Self {
            x_spacing: default_x_spacing(),
            y_spacing: default_y_spacing(),
            margin: default_margin(),
        }
    }
}

/// `[render]` section.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RenderSection {
    /// Annotate edges with the latency of the structural operation that
    /// produced the target sketch.
    #[serde(default = "default_show_structural_ops")]
    pub show_structural_ops: bool,
}

fn default_show_structural_ops() -> bool {
    true
}

impl Default for RenderSection {
    fn default() -> Self {
        Self {
            show_structural_ops: default_show_structural_ops(),
        }
    }
}

/// Validated settings.
///
/// Only constructible through `TryFrom<RawSettings>` (or `Default`), so the
/// spacings are always finite and positive.
#[derive(Debug, Clone, Copy)]
pub struct Settings {
    layout: LayoutSection,
    render: RenderSection,
}

impl Settings {
    pub(crate) fn new_unchecked(layout: LayoutSection, render: RenderSection) -> Self {
        Self { layout, render }
    }

    pub fn layout(&self) -> &LayoutSection {
        &self.layout
    }

    pub fn render(&self) -> &RenderSection {
        &self.render
    }

    /// Override `show_structural_ops` (e.g. from `--no-structural-ops`).
    pub fn with_structural_ops(mut self, show: bool) -> Self {
        self.render.show_structural_ops = show;
        self
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new_unchecked(LayoutSection::default(), RenderSection::default())
    }
}
