pub const RENDER_WIDTH: i32 = 1280;           // Width of the demo window
pub const RENDER_HEIGHT: i32 = 720;           // Height of the demo window
pub const FPS: u32 = 60;                      // Frames per second
pub const FRAME_TIME: f32 = 1.0 / FPS as f32; // Time per frame (seconds)

pub const BANNER_INTERVAL: f32 = 3.0;         // Banner auto-advance period (seconds)
pub const BANNER_CONTENT_FADE: f32 = 0.25;    // Old banner text stays up this long before the swap (seconds)

pub const STACK_CARD_COUNT: usize = 5;        // Cards in the rotating stack
pub const STACK_INTERVAL: f32 = 1.3;          // Stack auto-advance period (seconds)
pub const STACK_TRANSITION: f32 = 0.8;        // Card move duration, also the lock settle time (seconds)

pub const IMAGE_SLIDER_INTERVAL: f32 = 3.5;   // Default image slider period (seconds)
pub const IMAGE_SLIDER_FADE: f32 = 1.2;       // Image crossfade duration (seconds)

pub const PAGED_ITEMS_TO_SHOW: usize = 4;     // Items per page at full width
pub const PAGED_ITEM_WIDTH: f32 = 313.0;      // Item width (pixels)
pub const PAGED_ITEM_GAP: f32 = 23.0;         // Gap between items (pixels)
pub const PAGED_ANIMATION: f32 = 0.5;         // Track slide duration (seconds)
