use crate::error::{Error, Result};
use image::GrayImage;
use std::path::Path;

const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

#[derive(Debug, Clone)]
pub struct Template {
    pub name: String,
    pub image: GrayImage,
}

/// Named template images, kept sorted by name.
#[derive(Debug, Clone, Default)]
pub struct TemplateSet {
    templates: Vec<Template>,
}

impl TemplateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the template called `name`.
    pub fn insert(&mut self, name: impl Into<String>, image: GrayImage) {
        let name = name.into();
        match self.templates.binary_search_by(|t| t.name.cmp(&name)) {
            Ok(index) => self.templates[index].image = image,
            Err(index) => self.templates.insert(index, Template { name, image }),
        }
    }

    /// Load every image in `dir`, named by file stem.
    ///
    /// Files that fail to decode are skipped with a warning. Fails with
    /// [`Error::NoTemplates`] when nothing could be loaded.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let mut set = Self::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            let is_image = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()));
            let Some(name) = path.file_stem().and_then(|s| s.to_str()).filter(|_| is_image) else {
                continue;
            };
            match image::open(&path) {
                Ok(img) => set.insert(name, img.into_luma8()),
                Err(e) => log::warn!("could not load template image {}: {e}", path.display()),
            }
        }
        if set.is_empty() {
            return Err(Error::NoTemplates);
        }
        log::info!("loaded {} templates from {}", set.len(), dir.display());
        Ok(set)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Template> {
        self.templates.iter()
    }

    pub fn as_slice(&self) -> &[Template] {
        &self.templates
    }
}

impl<'a> IntoIterator for &'a TemplateSet {
    type Item = &'a Template;
    type IntoIter = std::slice::Iter<'a, Template>;

    fn into_iter(self) -> Self::IntoIter {
        self.templates.iter()
    }
}

#[cfg(test)]
pub mod test {
    use super::*;
    use crate::vision::test_utils::noise_image;

    #[test]
    pub fn sorted_and_replacing() {
        let mut set = TemplateSet::new();
        set.insert("pin3", noise_image(4, 4, 1));
        set.insert("man1", noise_image(4, 4, 2));
        set.insert("wind_east", noise_image(4, 4, 3));
        set.insert("man1", noise_image(5, 5, 4));
        let names: Vec<_> = set.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["man1", "pin3", "wind_east"]);
        assert_eq!(set.as_slice()[0].image.dimensions(), (5, 5));
    }

    #[test]
    pub fn load_dir_skips_broken_files() {
        let dir = std::env::temp_dir().join(format!("jantaku-templates-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        noise_image(6, 8, 1).save(dir.join("man1.png")).unwrap();
        noise_image(6, 8, 2).save(dir.join("dragon_red.png")).unwrap();
        std::fs::write(dir.join("pin2.png"), b"not a png").unwrap();
        std::fs::write(dir.join("notes.txt"), b"ignored").unwrap();

        let set = TemplateSet::load_dir(&dir).unwrap();
        let names: Vec<_> = set.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["dragon_red", "man1"]);
        assert_eq!(set.as_slice()[1].image.dimensions(), (6, 8));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    pub fn empty_dir_is_fatal() {
        let dir = std::env::temp_dir().join(format!("jantaku-empty-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        assert!(matches!(TemplateSet::load_dir(&dir), Err(Error::NoTemplates)));
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
