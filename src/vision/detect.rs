use super::correlate::match_template;
use super::nms::non_max_suppression;
use super::{Candidate, Detection, Rect, TemplateSet};
use crate::config::DetectionConfig;
use crate::error::{Error, Result};
use image::GrayImage;
use image::imageops::{self, FilterType};
use rayon::prelude::*;

/// Finds known templates in screenshots.
///
/// Every template is scanned independently, so the per-template passes run
/// on the rayon pool and are merged afterwards.
#[derive(Debug, Clone)]
pub struct Detector {
    templates: TemplateSet,
    config: DetectionConfig,
}

impl Detector {
    pub fn new(templates: TemplateSet, config: DetectionConfig) -> Result<Self> {
        if templates.is_empty() {
            return Err(Error::NoTemplates);
        }
        Ok(Self { templates, config })
    }

    pub fn templates(&self) -> &TemplateSet {
        &self.templates
    }

    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    /// All placements of every template inside `region` (whole image when
    /// `None`), deduplicated per template.
    ///
    /// Results are grouped by template in name order, each group in
    /// descending score order, with boxes in full-image coordinates.
    ///
    /// Cost is roughly `area(region) * area(template)` per template, so a
    /// full 1080p frame against a complete 36x48 tile set is on the order of
    /// 10^11 multiply-adds. Pass the hand strip rather than `None` outside of
    /// tests.
    pub fn find_all(&self, image: &GrayImage, region: Option<Rect>) -> Vec<Detection> {
        let (w, h) = image.dimensions();
        let full = Rect::new(0, 0, w, h);
        let Some(area) = region.unwrap_or(full).clamp_to(w, h) else {
            log::warn!("search region {region:?} lies outside the {w}x{h} image");
            return vec![];
        };
        let cropped;
        let view = if area == full {
            image
        } else {
            cropped = imageops::crop_imm(image, area.x, area.y, area.width, area.height).to_image();
            &cropped
        };

        let per_template: Vec<Vec<Detection>> = self
            .templates
            .as_slice()
            .par_iter()
            .map(|template| {
                let candidates = self.candidates(view, &template.image);
                let found = candidates.len();
                let kept = non_max_suppression(candidates, self.config.nms_overlap_threshold);
                if found > 0 {
                    log::debug!("{}: {found} candidates, {} after suppression", template.name, kept.len());
                }
                kept.into_iter()
                    .map(|c| Detection {
                        name: template.name.clone(),
                        rect: c.rect.offset(area.x, area.y),
                        score: c.score,
                    })
                    .collect()
            })
            .collect();

        per_template.into_iter().flatten().collect()
    }

    fn candidates(&self, view: &GrayImage, template: &GrayImage) -> Vec<Candidate> {
        let (tw, th) = template.dimensions();
        match_template(view, template)
            .enumerate_pixels()
            .filter(|(_, _, px)| px[0] >= self.config.multi_match_threshold)
            .map(|(x, y, px)| Candidate {
                rect: Rect::new(x, y, tw, th),
                score: px[0],
            })
            .collect()
    }

    /// The single template that best fills `roi`, if it scores at least the
    /// slot threshold.
    ///
    /// Each template is stretched to the slot size before comparison, so slots
    /// whose aspect ratio differs from the template art still match.
    pub fn best_match(&self, image: &GrayImage, roi: Rect) -> Option<Detection> {
        let (w, h) = image.dimensions();
        let Some(area) = roi.clamp_to(w, h) else {
            log::warn!("slot {roi:?} lies outside the {w}x{h} image");
            return None;
        };
        if area != roi {
            log::warn!("slot {roi:?} clipped to {area:?}");
        }
        let patch = imageops::crop_imm(image, area.x, area.y, area.width, area.height).to_image();

        let scores: Vec<Option<f32>> = self
            .templates
            .as_slice()
            .par_iter()
            .map(|template| {
                if template.image.width() == 0 || template.image.height() == 0 {
                    return None;
                }
                let stretched = imageops::resize(&template.image, area.width, area.height, FilterType::Triangle);
                match_template(&patch, &stretched).pixels().next().map(|px| px[0])
            })
            .collect();

        let mut best: Option<(usize, f32)> = None;
        for (index, score) in scores.into_iter().enumerate() {
            if let Some(score) = score
                && best.is_none_or(|(_, b)| score > b)
            {
                best = Some((index, score));
            }
        }

        let (index, score) = best?;
        let name = &self.templates.as_slice()[index].name;
        if score < self.config.roi_match_threshold {
            log::debug!("slot {area:?}: best {name} at {score:.3} is below threshold");
            return None;
        }
        Some(Detection {
            name: name.clone(),
            rect: area,
            score,
        })
    }
}
