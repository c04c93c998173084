//! Carousel and slider state machines for a marketing page.
//!
//! Widgets are plain values advanced by a frame clock (`update(dt)`, seconds)
//! and by signals from the host: clicks, keys, pointer hover, document
//! visibility, viewport intersection and resizes. [`page::Page`] wires a
//! full page of them together.

pub mod assets;
pub mod config;
pub mod constants;
pub mod cyclic;
pub mod deck;
pub mod error;
pub mod gate;
pub mod lock;
pub mod page;
pub mod paged;
pub mod playback;
#[cfg(feature = "window")]
pub mod render;
pub mod state;
pub mod timer;
pub mod track;
pub mod visitor;
pub mod widget;

pub use config::PageConfig;
pub use error::{CarouselError, Result};
pub use page::{Page, PageStatus, Signal, WidgetId};
pub use state::PlayState;
pub use widget::{Control, Key, Widget};
