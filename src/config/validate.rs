// src/config/validate.rs

use crate::config::model::{LayoutSection, RawSettings, Settings};
use crate::errors::{Result, SketchDagError};

impl TryFrom<RawSettings> for Settings {
    type Error = SketchDagError;

    fn try_from(raw: RawSettings) -> std::result::Result<Self, Self::Error> {
        validate_layout(&raw.layout)?;
        Ok(Settings::new_unchecked(raw.layout, raw.render))
    }
}

fn validate_layout(layout: &LayoutSection) -> Result<()> {
    ensure_positive("x_spacing", layout.x_spacing)?;
    ensure_positive("y_spacing", layout.y_spacing)?;

    if !layout.margin.is_finite() || layout.margin < 0.0 {
        return Err(SketchDagError::ConfigError(format!(
            "[layout].margin must be a finite number >= 0 (got {})",
            layout.margin
        )));
    }

    Ok(())
}

fn ensure_positive(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(SketchDagError::ConfigError(format!(
            "[layout].{name} must be a finite number > 0 (got {value})"
        )));
    }
    Ok(())
}
