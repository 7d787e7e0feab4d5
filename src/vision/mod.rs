//! Template matching over grayscale screenshots.
//!
//! The pipeline is:
//!
//! 1. **Correlate** – zero-mean normalized cross correlation of each template
//!    against the search area.
//! 2. **Threshold** – every response above the configured threshold becomes a
//!    candidate box at the template's native size.
//! 3. **Suppress** – per-template non-max suppression collapses clusters of
//!    overlapping candidates into one box.
//!
//! Indicator slots skip steps 2-3 and instead keep the single best template
//! after stretching every template to the slot size.
mod correlate;
mod detect;
mod nms;
mod templates;

pub use correlate::{Surface, match_template};
pub use detect::Detector;
pub use nms::{non_max_suppression, overlap_ratio};
pub use templates::{Template, TemplateSet};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Axis-aligned box in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    #[inline]
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    #[inline]
    pub const fn right(&self) -> u64 {
        self.x as u64 + self.width as u64
    }

    #[inline]
    pub const fn bottom(&self) -> u64 {
        self.y as u64 + self.height as u64
    }

    pub fn intersection_area(&self, other: &Rect) -> u64 {
        let w = self.right().min(other.right()).saturating_sub(self.x.max(other.x) as u64);
        let h = self.bottom().min(other.bottom()).saturating_sub(self.y.max(other.y) as u64);
        w * h
    }

    /// The part of `self` inside a `width` x `height` image, `None` if empty.
    pub fn clamp_to(&self, width: u32, height: u32) -> Option<Rect> {
        let x1 = self.right().min(width as u64) as u32;
        let y1 = self.bottom().min(height as u64) as u32;
        if self.x >= x1 || self.y >= y1 {
            return None;
        }
        Some(Rect::new(self.x, self.y, x1 - self.x, y1 - self.y))
    }

    pub const fn offset(&self, dx: u32, dy: u32) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}

/// A box before suppression, with its correlation score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub rect: Rect,
    pub score: f32,
}

/// An accepted detection of a named template.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Detection {
    pub name: String,
    pub rect: Rect,
    pub score: f32,
}

/// Boxes grouped by template name, scores dropped.
pub fn group_by_name(detections: &[Detection]) -> BTreeMap<String, Vec<Rect>> {
    let mut grouped: BTreeMap<String, Vec<Rect>> = BTreeMap::new();
    for detection in detections {
        grouped.entry(detection.name.clone()).or_default().push(detection.rect);
    }
    grouped
}
