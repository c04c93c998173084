//! Page description: which widgets exist and how they are tuned.
//!
//! Every field has a default matching the stock page, so a TOML file only
//! needs the values it changes.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::{CarouselError, Result};
use crate::track::slide::SlideContent;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub banner: BannerConfig,
    pub stack: StackConfig,
    pub image_sliders: Vec<ImageSliderConfig>,
    pub paged: Vec<PagedConfig>,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            banner: BannerConfig::default(),
            stack: StackConfig::default(),
            image_sliders: [
                SliderKind::Creation,
                SliderKind::Storage,
                SliderKind::Gallery,
                SliderKind::Sales,
            ]
            .into_iter()
            .map(ImageSliderConfig::stock)
            .collect(),
            paged: vec![
                PagedConfig {
                    name: "newsletter".to_string(),
                    item_count: 8,
                    ..PagedConfig::default()
                },
                PagedConfig {
                    name: "products".to_string(),
                    item_count: 10,
                    ..PagedConfig::default()
                },
            ],
        }
    }
}

impl PageConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path).map_err(|source| CarouselError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BannerConfig {
    pub enabled: bool,
    pub interval: f32,
    pub content_fade: f32,
    pub lazy: bool,
    pub pause_on_hover: bool,
    pub slides: Vec<BannerSlide>,
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval: BANNER_INTERVAL,
            content_fade: BANNER_CONTENT_FADE,
            lazy: true,
            pause_on_hover: false,
            slides: Vec::new(),
        }
    }
}

impl BannerConfig {
    /// Configured slides, or the stock five when none are listed.
    pub fn slides_or_default(&self) -> Vec<BannerSlide> {
        if !self.slides.is_empty() {
            return self.slides.clone();
        }
        const STOCK: [(&str, &str); 5] = [
            ("Artzipy", "Artistic Vision"),
            ("Creative Space", "Inspired"),
            ("Smart Archive", "Secured"),
            ("Gallery", "Curated"),
            ("Art Commerce", "Simplified"),
        ];
        STOCK
            .iter()
            .enumerate()
            .map(|(i, (title, subtitle))| BannerSlide {
                content: SlideContent {
                    title: title.to_string(),
                    subtitle: subtitle.to_string(),
                    description: "From creation to sale, one platform for the whole art space".to_string(),
                },
                background: Some(PathBuf::from(format!("images/b{}.webp", i + 1))),
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BannerSlide {
    #[serde(flatten)]
    pub content: SlideContent,
    pub background: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StackConfig {
    pub enabled: bool,
    pub card_count: usize,
    pub interval: f32,
    /// Card move duration. The rotation lock settles after exactly this
    /// long, and the renderer animates over the same value.
    pub transition: f32,
    pub pause_on_hover: bool,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            card_count: STACK_CARD_COUNT,
            interval: STACK_INTERVAL,
            transition: STACK_TRANSITION,
            pause_on_hover: true,
        }
    }
}

/// Section an image slider belongs to; decides its default period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SliderKind {
    Creation,
    Storage,
    Gallery,
    Sales,
    #[default]
    Other,
}

impl SliderKind {
    pub fn default_interval(self) -> f32 {
        match self {
            SliderKind::Storage => 4.0,
            SliderKind::Gallery => 3.0,
            SliderKind::Creation | SliderKind::Sales | SliderKind::Other => IMAGE_SLIDER_INTERVAL,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SliderKind::Creation => "creation",
            SliderKind::Storage => "storage",
            SliderKind::Gallery => "gallery",
            SliderKind::Sales => "sales",
            SliderKind::Other => "other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageSliderConfig {
    pub name: String,
    pub kind: SliderKind,
    /// Overrides the kind's default period.
    pub interval: Option<f32>,
    pub fade: f32,
    pub pause_on_hover: bool,
    pub lazy: bool,
    pub images: Vec<PathBuf>,
    /// Directory scanned for additional images, sorted by file name.
    pub image_dir: Option<PathBuf>,
}

impl Default for ImageSliderConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            kind: SliderKind::Other,
            interval: None,
            fade: IMAGE_SLIDER_FADE,
            pause_on_hover: true,
            lazy: false,
            images: Vec::new(),
            image_dir: None,
        }
    }
}

impl ImageSliderConfig {
    fn stock(kind: SliderKind) -> Self {
        Self {
            name: kind.as_str().to_string(),
            kind,
            images: (1..=3)
                .map(|i| PathBuf::from(format!("images/{}_{i}.webp", kind.as_str())))
                .collect(),
            ..Self::default()
        }
    }

    pub fn effective_interval(&self) -> f32 {
        self.interval.unwrap_or_else(|| self.kind.default_interval())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagedConfig {
    pub name: String,
    pub item_count: usize,
    pub items_to_show: usize,
    pub item_width: f32,
    pub item_gap: f32,
    pub animation: f32,
    pub has_track: bool,
}

impl Default for PagedConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            item_count: 0,
            items_to_show: PAGED_ITEMS_TO_SHOW,
            item_width: PAGED_ITEM_WIDTH,
            item_gap: PAGED_ITEM_GAP,
            animation: PAGED_ANIMATION,
            has_track: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_stock_page() {
        let config = PageConfig::from_toml_str("").unwrap();
        assert_eq!(config, PageConfig::default());
        assert_eq!(config.image_sliders.len(), 4);
        assert_eq!(config.banner.slides_or_default().len(), 5);
    }

    #[test]
    fn partial_sections_keep_defaults() {
        let config = PageConfig::from_toml_str(
            r#"
            [stack]
            interval = 2.0

            [[image_sliders]]
            name = "lobby"
            kind = "storage"
            images = ["a.jpg", "b.jpg"]

            [[paged]]
            name = "news"
            item_count = 12
            items_to_show = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.stack.interval, 2.0);
        assert_eq!(config.stack.transition, STACK_TRANSITION);
        assert_eq!(config.image_sliders.len(), 1);
        assert_eq!(config.image_sliders[0].effective_interval(), 4.0);
        assert!(config.image_sliders[0].pause_on_hover);
        assert_eq!(config.paged[0].item_width, PAGED_ITEM_WIDTH);
        assert!(config.paged[0].has_track);
    }

    #[test]
    fn banner_slides_flatten_their_caption() {
        let config = PageConfig::from_toml_str(
            r#"
            [[banner.slides]]
            title = "Hello"
            subtitle = "World"
            description = "Welcome"
            background = "hero.jpg"
            "#,
        )
        .unwrap();
        let slides = config.banner.slides_or_default();
        assert_eq!(slides.len(), 1);
        assert_eq!(slides[0].content.title, "Hello");
        assert_eq!(slides[0].background, Some(PathBuf::from("hero.jpg")));
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let err = PageConfig::from_toml_str("[stack]\ninterval = \"fast\"").unwrap_err();
        assert!(matches!(err, CarouselError::Config(_)));
    }

    #[test]
    fn interval_override_beats_kind() {
        let config = ImageSliderConfig {
            kind: SliderKind::Gallery,
            interval: Some(9.0),
            ..ImageSliderConfig::default()
        };
        assert_eq!(config.effective_interval(), 9.0);
    }
}
