//! Tunable thresholds, weights and screen layout.
//!
//! Everything here is policy. A JSON file can override any subset of fields;
//! the layout has no useful default and normally comes from that file.
use crate::error::{Error, Result};
use crate::state::MAX_DORA_INDICATORS;
use crate::vision::Rect;
use derivative::Derivative;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, Derivative)]
#[derivative(Default)]
#[serde(default)]
pub struct DetectionConfig {
    /// Minimum correlation for a hand-region candidate.
    #[derivative(Default(value = "0.9"))]
    pub multi_match_threshold: f32,
    /// Minimum correlation for the best template in an indicator slot.
    #[derivative(Default(value = "0.8"))]
    pub roi_match_threshold: f32,
    /// Candidates overlapping a kept box by more than this fraction of the
    /// kept box's area are dropped.
    #[derivative(Default(value = "0.5"))]
    pub nms_overlap_threshold: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Derivative)]
#[derivative(Default)]
#[serde(default)]
pub struct DiscardConfig {
    /// Score lost per step of shanten.
    #[derivative(Default(value = "5"))]
    pub shanten_weight: i32,
    /// Extra score lost when the discarded tile is itself dora.
    #[derivative(Default(value = "5"))]
    pub dora_discard_penalty: i32,
}

/// Where things are on screen, in screenshot pixels.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TableLayout {
    /// Area scanned for the player's own hand. `None` scans the whole image,
    /// which is slow on full-resolution screenshots and picks up every tile
    /// on the table, not just the hand.
    pub hand_region: Option<Rect>,
    /// Fixed slots that each hold at most one dora indicator.
    pub dora_indicator_slots: Vec<Rect>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub detection: DetectionConfig,
    pub discard: DiscardConfig,
    pub layout: TableLayout,
    /// Index of the player whose hand is on screen.
    pub seat: usize,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let reader = std::io::BufReader::new(std::fs::File::open(path)?);
        let config: Self = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let thresholds = [
            ("multi_match_threshold", self.detection.multi_match_threshold),
            ("roi_match_threshold", self.detection.roi_match_threshold),
            ("nms_overlap_threshold", self.detection.nms_overlap_threshold),
        ];
        for (name, value) in thresholds {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::InvalidConfig {
                    reason: format!("{name} must be within [0, 1], got {value}"),
                });
            }
        }
        if self.seat >= 4 {
            return Err(Error::InvalidConfig {
                reason: format!("seat must be 0-3, got {}", self.seat),
            });
        }
        if self.layout.dora_indicator_slots.len() > MAX_DORA_INDICATORS {
            return Err(Error::InvalidConfig {
                reason: format!(
                    "at most {MAX_DORA_INDICATORS} dora indicator slots, got {}",
                    self.layout.dora_indicator_slots.len()
                ),
            });
        }
        let mut rects = self.layout.hand_region.iter().chain(&self.layout.dora_indicator_slots);
        if let Some(rect) = rects.find(|r| r.area() == 0) {
            return Err(Error::InvalidConfig {
                reason: format!("zero-area region {rect:?}"),
            });
        }
        Ok(())
    }
}
