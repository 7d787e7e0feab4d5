//! Screenshot in, table state and recommended discard out.
use crate::config::{Config, TableLayout};
use crate::discard::{DiscardCandidate, DiscardSelector, pick};
use crate::error::Result;
use crate::state::GameState;
use crate::tile::{Tile, tiles_to_string};
use crate::vision::{Detection, Detector, TemplateSet};
use image::GrayImage;
use serde::Serialize;

/// Everything read from one screenshot.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub state: GameState,
    /// Accepted hand detections, grouped by template
    pub hand: Vec<Detection>,
    /// One entry per indicator slot that matched
    pub dora_indicators: Vec<Detection>,
    pub candidates: Vec<DiscardCandidate>,
    pub discard: Option<Tile>,
}

pub struct TableReader {
    detector: Detector,
    selector: DiscardSelector,
    layout: TableLayout,
    seat: usize,
}

impl TableReader {
    /// Every template must be named by a tile token, since matches are turned
    /// straight into tiles.
    pub fn new(templates: TemplateSet, config: &Config) -> Result<Self> {
        config.validate()?;
        for template in &templates {
            template.name.parse::<Tile>()?;
        }
        Ok(Self {
            detector: Detector::new(templates, config.detection.clone())?,
            selector: DiscardSelector::new(config.discard.clone()),
            layout: config.layout.clone(),
            seat: config.seat,
        })
    }

    pub fn read(&self, screenshot: &GrayImage) -> Result<Analysis> {
        let mut state = GameState::new();

        let hand = self.detector.find_all(screenshot, self.layout.hand_region);
        let mut tiles = hand.iter().map(|d| d.name.parse::<Tile>()).collect::<Result<Vec<_>>>()?;
        tiles.sort();

        let mut dora_indicators = vec![];
        for &slot in &self.layout.dora_indicator_slots {
            let Some(detection) = self.detector.best_match(screenshot, slot) else {
                continue;
            };
            state.add_dora_indicator(detection.name.parse()?)?;
            dora_indicators.push(detection);
        }

        let candidates = self.selector.evaluate(&tiles, state.doras());
        let discard = pick(&candidates);
        log::info!(
            "read {} hand tiles [{}], {} dora indicators, discard {}",
            tiles.len(),
            tiles_to_string(&tiles),
            state.dora_indicators().len(),
            discard.map_or_else(|| "-".to_owned(), |t| t.to_string()),
        );
        state.replace_hand(self.seat, tiles);

        Ok(Analysis {
            state,
            hand,
            dora_indicators,
            candidates,
            discard,
        })
    }
}

#[cfg(test)]
pub mod test {
    use super::*;
    use crate::error::Error;
    use crate::tile::test::{hand, t};
    use crate::vision::Rect;
    use crate::vision::test_utils::{flat_image, noise_image, paste};

    fn templates() -> TemplateSet {
        let mut set = TemplateSet::new();
        for (seed, name) in ["man2", "man3", "dragon_white", "wind_east"].into_iter().enumerate() {
            set.insert(name, noise_image(10, 10, 100 + seed as u32));
        }
        set
    }

    fn config() -> Config {
        let mut config = Config::default();
        config.layout.hand_region = Some(Rect::new(0, 30, 120, 30));
        config.layout.dora_indicator_slots = vec![Rect::new(5, 5, 10, 10), Rect::new(20, 5, 10, 10)];
        config
    }

    fn template(set: &TemplateSet, name: &str) -> GrayImage {
        set.iter().find(|t| t.name == name).unwrap().image.clone()
    }

    #[test]
    pub fn reads_hand_dora_and_discard() {
        let set = templates();
        let mut screen = flat_image(120, 60, 128);
        paste(&mut screen, &template(&set, "man2"), 5, 35);
        paste(&mut screen, &template(&set, "dragon_white"), 20, 35);
        paste(&mut screen, &template(&set, "man2"), 35, 35);
        paste(&mut screen, &template(&set, "man3"), 50, 35);
        paste(&mut screen, &template(&set, "wind_east"), 5, 5);
        // outside the hand region, must not count as a hand tile
        paste(&mut screen, &template(&set, "man3"), 60, 5);

        let reader = TableReader::new(set, &config()).unwrap();
        let analysis = reader.read(&screen).unwrap();

        assert_eq!(analysis.state.players[0].hand, hand("223m 5z"));
        assert_eq!(analysis.state.dora_indicators(), &[t("wind_east")]);
        assert_eq!(analysis.state.doras(), &[t("wind_south")]);
        assert_eq!(analysis.dora_indicators.len(), 1);
        assert_eq!(analysis.dora_indicators[0].rect, Rect::new(5, 5, 10, 10));
        assert_eq!(analysis.hand.len(), 4);
        assert!(analysis.hand.iter().all(|d| d.rect.y == 35));

        let scores: Vec<_> = analysis.candidates.iter().map(|c| (c.tile, c.score)).collect();
        assert_eq!(
            scores,
            vec![(t("man2"), -5), (t("man3"), -5), (t("dragon_white"), -4)]
        );
        assert_eq!(analysis.discard, Some(t("dragon_white")));
    }

    #[test]
    pub fn uses_configured_seat() {
        let set = templates();
        let mut screen = flat_image(120, 60, 128);
        paste(&mut screen, &template(&set, "man3"), 5, 35);
        let mut config = config();
        config.seat = 2;

        let analysis = TableReader::new(set, &config).unwrap().read(&screen).unwrap();
        assert!(analysis.state.players[0].hand.is_empty());
        assert_eq!(analysis.state.players[2].hand, vec![t("man3")]);
        assert_eq!(analysis.discard, Some(t("man3")));
    }

    #[test]
    pub fn empty_table() {
        let reader = TableReader::new(templates(), &config()).unwrap();
        let analysis = reader.read(&flat_image(120, 60, 30)).unwrap();
        assert!(analysis.hand.is_empty());
        assert!(analysis.state.players[0].hand.is_empty());
        assert!(analysis.state.doras().is_empty());
        assert!(analysis.candidates.is_empty());
        assert_eq!(analysis.discard, None);
    }

    #[test]
    pub fn rejects_bad_setup() {
        let err = TableReader::new(TemplateSet::new(), &config()).err().unwrap();
        assert!(matches!(err, Error::NoTemplates));

        let mut set = templates();
        set.insert("tile_back", noise_image(10, 10, 9));
        let err = TableReader::new(set, &config()).err().unwrap();
        assert!(matches!(err, Error::InvalidTileEncoding { ref token } if token == "tile_back"));

        let mut config = config();
        config.seat = 7;
        let err = TableReader::new(templates(), &config).err().unwrap();
        assert!(matches!(err, Error::InvalidConfig { .. }));
    }
}
