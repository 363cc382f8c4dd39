//! Book configuration
//!
//! Every tunable of the page geometry, the page-turn animation and the page
//! progression lives here. [`BookConfig::default`] reproduces the reference
//! look; configs can also be read from JSON with missing fields defaulted.
//!
//! ```rust,ignore
//! use flipbook::book::BookConfig;
//!
//! let config = BookConfig::from_json_str(r#"{ "page": { "segments": 20 } }"#)?;
//! assert_eq!(config.page.segments, 20);
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::{FlipbookError, Result};

/// Size and subdivision of a single page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageDimensions {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    /// Number of bendable segments along the width (bones = segments + 1).
    pub segments: usize,
    pub height_segments: u32,
}

impl Default for PageDimensions {
    fn default() -> Self {
        Self {
            width: 1.28,
            height: 1.71,
            depth: 0.003,
            segments: 30,
            height_segments: 2,
        }
    }
}

impl PageDimensions {
    #[inline]
    #[must_use]
    pub fn segment_width(&self) -> f32 {
        self.width / self.segments as f32
    }
}

/// Page-turn animation tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TurnSettings {
    /// Damping smooth time in seconds; higher converges slower.
    pub easing_factor: f32,
    /// Share of the page rotation applied as curl near the spine.
    pub inside_curve_strength: f32,
    /// Bones below this index receive the inside curve.
    pub inside_curve_bones: usize,
    /// Per-page fan-out angle of an open book, in degrees.
    pub stagger_degrees: f32,
}

impl Default for TurnSettings {
    fn default() -> Self {
        Self {
            easing_factor: 0.5,
            inside_curve_strength: 0.18,
            inside_curve_bones: 8,
            stagger_degrees: 0.8,
        }
    }
}

/// Step timing of the displayed page chasing the requested page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionSettings {
    pub fast_delay_ms: u64,
    pub slow_delay_ms: u64,
    /// Gaps strictly larger than this use the fast delay.
    pub fast_gap: usize,
}

impl Default for ProgressionSettings {
    fn default() -> Self {
        Self {
            fast_delay_ms: 50,
            slow_delay_ms: 150,
            fast_gap: 2,
        }
    }
}

impl ProgressionSettings {
    /// Delay before the next step when `gap` pages remain.
    #[must_use]
    pub fn delay_for_gap(&self, gap: usize) -> Duration {
        if gap > self.fast_gap {
            Duration::from_millis(self.fast_delay_ms)
        } else {
            Duration::from_millis(self.slow_delay_ms)
        }
    }
}

/// Texture naming and surface finish.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureSettings {
    pub dir: String,
    pub extension: String,
    /// Shared roughness map of the cover pages.
    pub roughness_map: String,
    /// Constant roughness of the interior page surfaces.
    pub interior_roughness: f32,
}

impl Default for TextureSettings {
    fn default() -> Self {
        Self {
            dir: "textures".to_string(),
            extension: "jpg".to_string(),
            roughness_map: "demoRoughness.webp".to_string(),
            interior_roughness: 0.1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookConfig {
    pub page: PageDimensions,
    pub turn: TurnSettings,
    pub progression: ProgressionSettings,
    pub textures: TextureSettings,
}

impl BookConfig {
    /// Parses a JSON config and validates it.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let page = &self.page;
        if page.segments == 0 {
            return Err(FlipbookError::InvalidConfig(
                "page.segments must be at least 1".to_string(),
            ));
        }
        if page.segments >= usize::from(u16::MAX) {
            return Err(FlipbookError::InvalidConfig(format!(
                "page.segments ({}) exceeds the 16-bit skin index range",
                page.segments
            )));
        }
        if page.height_segments == 0 {
            return Err(FlipbookError::InvalidConfig(
                "page.height_segments must be at least 1".to_string(),
            ));
        }
        for (name, value) in [
            ("page.width", page.width),
            ("page.height", page.height),
            ("page.depth", page.depth),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(FlipbookError::InvalidConfig(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if !(self.turn.easing_factor.is_finite() && self.turn.easing_factor > 0.0) {
            return Err(FlipbookError::InvalidConfig(format!(
                "turn.easing_factor must be positive, got {}",
                self.turn.easing_factor
            )));
        }
        Ok(())
    }
}
