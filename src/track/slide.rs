use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::assets::LoadedAsset;

/// Caption attached to a slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideContent {
    pub title: String,
    pub subtitle: String,
    pub description: String,
}

/// One slide of a single-track slider.
#[derive(Debug, Clone)]
pub struct Slide {
    pub asset: Option<PathBuf>,
    pub content: Option<SlideContent>,

    pub active: bool,
    pub loaded: Option<LoadedAsset>,
    is_loaded: bool,
    load_failed: bool,
}

impl Slide {
    pub fn new(asset: Option<PathBuf>, content: Option<SlideContent>) -> Self {
        Self {
            asset,
            content,
            active: false,
            loaded: None,
            is_loaded: false,
            load_failed: false,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.is_loaded
    }

    pub fn load_failed(&self) -> bool {
        self.load_failed
    }

    pub(crate) fn mark_loaded(&mut self, asset: Option<LoadedAsset>) {
        self.loaded = asset;
        self.is_loaded = true;
        self.load_failed = false;
    }

    /// Returns `true` the first time a load fails.
    pub(crate) fn mark_failed(&mut self) -> bool {
        let first = !self.load_failed;
        self.load_failed = true;
        first
    }
}
