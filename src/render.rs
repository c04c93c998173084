//! Interactive raylib front end: lays the widgets out as a scrollable page,
//! turns mouse, keyboard and window events into [`Signal`]s and draws the
//! widgets' exposed state.

use std::collections::HashMap;

use raylib::prelude::*;

use crate::config::PageConfig;
use crate::constants::*;
use crate::deck::RotatingDeck;
use crate::deck::permutation::Side;
use crate::page::{Page, Signal, WidgetId};
use crate::widget::{Control, Key};

const BANNER_HEIGHT: f32 = 420.0;
const STACK_HEIGHT: f32 = 380.0;
const IMAGE_HEIGHT: f32 = 260.0;
const PAGED_HEIGHT: f32 = 240.0;
const ARROW_WIDTH: f32 = 48.0;
const CARD_WIDTH: f32 = 200.0;
const CARD_HEIGHT: f32 = 280.0;
const CARD_SPACING: f32 = 170.0;
const SCROLL_STEP: f32 = 60.0;

const PALETTE: [Color; 6] = [
    Color { r: 214, g: 96, b: 77, a: 255 },
    Color { r: 86, g: 140, b: 196, a: 255 },
    Color { r: 120, g: 170, b: 90, a: 255 },
    Color { r: 200, g: 160, b: 60, a: 255 },
    Color { r: 150, g: 100, b: 180, a: 255 },
    Color { r: 70, g: 170, b: 170, a: 255 },
];

struct Section {
    id: WidgetId,
    top: f32,
    height: f32,
}

/// A horizontal position eased toward its target: card slots over the
/// deck's transition time, paged tracks over the carousel's animation time.
struct Motion {
    x: f32,
    target: f32,
    tween: Option<ease::Tween>,
    duration: f32,
    elapsed: f32,
}

impl Motion {
    fn at(x: f32) -> Self {
        Self { x, target: x, tween: None, duration: 0.0, elapsed: 0.0 }
    }

    fn update(&mut self, target: f32, duration: f32, dt: f32) {
        if (target - self.target).abs() > f32::EPSILON {
            self.target = target;
            self.elapsed = 0.0;
            self.duration = duration;
            if duration > 0.0 {
                self.tween = Some(ease::Tween::new(ease::cubic_out, self.x, target, duration));
            } else {
                self.x = target;
                self.tween = None;
            }
        }
        if let Some(tween) = self.tween.as_mut() {
            self.x = tween.apply(dt);
            self.elapsed += dt;
            if self.elapsed >= self.duration {
                self.x = self.target;
                self.tween = None;
            }
        }
    }
}

/// Image slider background: the previous slide stays underneath while the
/// current one fades in over the slider's crossfade time.
struct Crossfade {
    shown: usize,
    previous: Option<usize>,
    elapsed: f32,
}

impl Crossfade {
    fn update(&mut self, current: usize, duration: f32, dt: f32) {
        if current != self.shown {
            self.previous = (duration > 0.0).then_some(self.shown);
            self.shown = current;
            self.elapsed = 0.0;
            return;
        }
        self.elapsed += dt;
        if self.elapsed >= duration {
            self.previous = None;
        }
    }

    fn alpha(&self, duration: f32) -> f32 {
        match self.previous {
            Some(_) if duration > 0.0 => (self.elapsed / duration).clamp(0.0, 1.0),
            _ => 1.0,
        }
    }
}

fn layout(page: &Page) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut top = 0.0;
    let mut push = |id, height| {
        sections.push(Section { id, top, height });
        top += height;
    };
    push(WidgetId::Banner, BANNER_HEIGHT);
    push(WidgetId::Stack, STACK_HEIGHT);
    for i in 0..page.image_slider_count() {
        push(WidgetId::ImageSlider(i), IMAGE_HEIGHT);
    }
    for i in 0..page.paged_count() {
        push(WidgetId::Paged(i), PAGED_HEIGHT);
    }
    sections
}

fn contains(rec: Rectangle, point: Vector2) -> bool {
    point.x >= rec.x && point.x <= rec.x + rec.width && point.y >= rec.y && point.y <= rec.y + rec.height
}

fn card_x(side: Side, screen_width: f32) -> f32 {
    let center = screen_width * 0.5;
    match side {
        Side::Focal => center,
        Side::Right(depth) => center + CARD_SPACING * depth as f32,
        Side::Left(depth) => center - CARD_SPACING * depth as f32,
    }
}

fn card_rect(x: f32, side: Side, top: f32) -> Rectangle {
    let scale = match side {
        Side::Focal => 1.0,
        Side::Right(depth) | Side::Left(depth) => 1.0 - 0.15 * depth as f32,
    };
    let w = CARD_WIDTH * scale;
    let h = CARD_HEIGHT * scale;
    Rectangle::new(x - w * 0.5, top + (STACK_HEIGHT - h) * 0.5, w, h)
}

fn banner_dot(index: usize, count: usize, screen_width: f32, top: f32) -> Rectangle {
    let spacing = 24.0;
    let start = screen_width * 0.5 - spacing * (count as f32 - 1.0) * 0.5;
    Rectangle::new(start + spacing * index as f32 - 6.0, top + BANNER_HEIGHT - 36.0, 12.0, 12.0)
}

fn hit_control(page: &Page, section: &Section, point: Vector2, screen_width: f32) -> Control {
    if let (WidgetId::Banner, Some(banner)) = (section.id, page.banner()) {
        for i in 0..banner.slide_count() {
            if contains(banner_dot(i, banner.slide_count(), screen_width, section.top), point) {
                return Control::Indicator(i);
            }
        }
    }
    if point.x < ARROW_WIDTH {
        Control::Prev
    } else if point.x > screen_width - ARROW_WIDTH {
        Control::Next
    } else {
        Control::Body
    }
}

fn update_card_motion(motion: &mut Vec<Motion>, deck: &RotatingDeck, screen_width: f32, dt: f32) {
    if motion.len() != deck.card_count() {
        *motion = deck
            .cards()
            .iter()
            .map(|card| Motion::at(card_x(card.side, screen_width)))
            .collect();
    }
    for (card, m) in deck.cards().iter().zip(motion.iter_mut()) {
        m.update(card_x(card.side, screen_width), deck.transition(), dt);
    }
}

fn update_track_motion(motion: &mut [Motion], page: &Page, dt: f32) {
    for (i, m) in motion.iter_mut().enumerate() {
        if let Some(carousel) = page.paged(i) {
            m.update(carousel.offset(), carousel.animation(), dt);
        }
    }
}

fn update_crossfades(fades: &mut [Crossfade], page: &Page, dt: f32) {
    for (i, fade) in fades.iter_mut().enumerate() {
        if let Some(slider) = page.image_slider(i) {
            fade.update(slider.current_index(), slider.options().crossfade, dt);
        }
    }
}

pub fn run(page: &mut Page, config: &PageConfig) {
    let (mut rl, thread) = raylib::init()
        .size(RENDER_WIDTH, RENDER_HEIGHT)
        .title("Page Carousel")
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(FPS);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    let sections = layout(page);
    let page_height: f32 = sections.iter().map(|s| s.height).sum();

    let mut scroll = 0.0_f32;
    let mut hidden = false;
    let mut hovered: Option<WidgetId> = None;
    let mut hovered_card: Option<usize> = None;
    let mut intersecting: HashMap<WidgetId, bool> = HashMap::new();
    let mut card_motion: Vec<Motion> = Vec::new();
    let mut track_motion: Vec<Motion> = (0..page.paged_count())
        .map(|i| Motion::at(page.paged(i).map_or(0.0, |c| c.offset())))
        .collect();
    let mut crossfades: Vec<Crossfade> = (0..page.image_slider_count())
        .map(|i| Crossfade {
            shown: page.image_slider(i).map_or(0, |s| s.current_index()),
            previous: None,
            elapsed: 0.0,
        })
        .collect();
    let mut width = rl.get_screen_width();
    page.handle(Signal::Resize { width: width as f32 });

    while !rl.window_should_close() {
        let dt = rl.get_frame_time();
        let screen_w = rl.get_screen_width() as f32;
        let screen_h = rl.get_screen_height() as f32;

        // --- Window state ---
        let now_hidden = rl.is_window_minimized();
        if now_hidden != hidden {
            hidden = now_hidden;
            page.handle(Signal::Visibility { hidden });
        }
        if rl.get_screen_width() != width {
            width = rl.get_screen_width();
            page.handle(Signal::Resize { width: width as f32 });
        }

        // --- Scroll and viewport intersection ---
        let max_scroll = (page_height - screen_h).max(0.0);
        scroll = (scroll - rl.get_mouse_wheel_move() * SCROLL_STEP).clamp(0.0, max_scroll);
        for section in &sections {
            let visible = section.top + section.height > scroll && section.top < scroll + screen_h;
            if intersecting.get(&section.id) != Some(&visible) {
                intersecting.insert(section.id, visible);
                page.handle(Signal::Intersection(section.id, visible));
            }
        }

        // --- Pointer ---
        let mouse = rl.get_mouse_position();
        let page_point = Vector2::new(mouse.x, mouse.y + scroll);
        let over = sections
            .iter()
            .find(|s| page_point.y >= s.top && page_point.y < s.top + s.height);
        let over_id = over.map(|s| s.id);
        if over_id != hovered {
            if let Some(id) = hovered {
                page.handle(Signal::PointerLeave(id));
            }
            if let Some(id) = over_id {
                page.handle(Signal::PointerEnter(id));
            }
            hovered = over_id;
        }

        if let (Some(deck), Some(stack_section)) =
            (page.stack(), sections.iter().find(|s| s.id == WidgetId::Stack))
        {
            let card_under = deck
                .cards()
                .iter()
                .filter(|card| {
                    let x = card_motion.get(card.item).map_or(card_x(card.side, screen_w), |m| m.x);
                    contains(card_rect(x, card.side, stack_section.top), page_point)
                })
                .min_by_key(|card| card.slot)
                .map(|card| card.item);
            if card_under != hovered_card {
                page.handle(Signal::CardLeave);
                if let Some(item) = card_under {
                    page.handle(Signal::CardEnter(item));
                }
                hovered_card = card_under;
            }
        }

        if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
            if let Some(section) = over {
                let control = hit_control(page, section, page_point, screen_w);
                page.handle(Signal::Click(section.id, control));
            }
        }

        if let Some(id) = hovered {
            for (raylib_key, key) in [
                (KeyboardKey::KEY_LEFT, Key::ArrowLeft),
                (KeyboardKey::KEY_RIGHT, Key::ArrowRight),
                (KeyboardKey::KEY_SPACE, Key::Space),
            ] {
                if rl.is_key_pressed(raylib_key) {
                    page.handle(Signal::Key(id, key));
                }
            }
        }

        page.update(dt);
        if let Some(deck) = page.stack() {
            update_card_motion(&mut card_motion, deck, screen_w, dt);
        }
        update_track_motion(&mut track_motion, page, dt);
        update_crossfades(&mut crossfades, page, dt);

        // --- Draw ---
        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::new(18, 18, 22, 255));
        for section in &sections {
            let top = section.top - scroll;
            if top + section.height < 0.0 || top > screen_h {
                continue;
            }
            match section.id {
                WidgetId::Banner => draw_banner(&mut d, page, top, screen_w),
                WidgetId::Stack => draw_stack(&mut d, page, &card_motion, top, screen_w),
                WidgetId::ImageSlider(i) => {
                    draw_image_slider(&mut d, page, config, crossfades.get(i), i, top, screen_w)
                }
                WidgetId::Paged(i) => {
                    let offset = track_motion.get(i).map(|m| m.x);
                    draw_paged(&mut d, page, i, offset, top, screen_w)
                }
            }
        }
    }
}

fn draw_arrows(d: &mut RaylibDrawHandle, top: f32, height: f32, screen_w: f32, prev: bool, next: bool) {
    let dim = |enabled: bool| if enabled { Color::new(255, 255, 255, 200) } else { Color::new(255, 255, 255, 60) };
    let mid = (top + height * 0.5) as i32;
    d.draw_text("<", 16, mid - 12, 28, dim(prev));
    d.draw_text(">", screen_w as i32 - 32, mid - 12, 28, dim(next));
}

fn draw_banner(d: &mut RaylibDrawHandle, page: &Page, top: f32, screen_w: f32) {
    let Some(banner) = page.banner() else {
        return;
    };
    let color = PALETTE[banner.current_index() % PALETTE.len()];
    d.draw_rectangle_rec(Rectangle::new(0.0, top, screen_w, BANNER_HEIGHT), color);

    if let Some(content) = banner.content() {
        let alpha = if banner.is_content_fading() { 70 } else { 255 };
        let text = Color::new(255, 255, 255, alpha);
        d.draw_text(&content.title, 80, top as i32 + 120, 48, text);
        d.draw_text(&content.subtitle, 80, top as i32 + 180, 28, text);
        d.draw_text(&content.description, 80, top as i32 + 230, 20, text);
    }

    for i in 0..banner.slide_count() {
        let dot = banner_dot(i, banner.slide_count(), screen_w, top);
        let fill = if banner.indicator() == Some(i) { Color::WHITE } else { Color::new(255, 255, 255, 90) };
        d.draw_rectangle_rec(dot, fill);
    }
    d.draw_text(&format!("{:?}", banner.play_state()), screen_w as i32 - 160, top as i32 + 16, 20, Color::WHITE);
    draw_arrows(d, top, BANNER_HEIGHT, screen_w, true, true);
}

fn draw_stack(d: &mut RaylibDrawHandle, page: &Page, motion: &[Motion], top: f32, screen_w: f32) {
    let Some(deck) = page.stack() else {
        return;
    };
    // Outer cards first so the focal card ends up on top.
    let mut cards: Vec<_> = deck.cards().iter().collect();
    cards.sort_by_key(|card| std::cmp::Reverse(card.slot));
    for card in cards {
        let x = motion.get(card.item).map_or(card_x(card.side, screen_w), |m| m.x);
        let rect = card_rect(x, card.side, top);
        let base = PALETTE[card.item % PALETTE.len()];
        let color = if card.dimmed { Color::new(base.r / 3, base.g / 3, base.b / 3, 255) } else { base };
        d.draw_rectangle_rec(rect, color);
        d.draw_rectangle_lines_ex(rect, 2.0, Color::BLACK);
        d.draw_text(&format!("{}", card.item + 1), rect.x as i32 + 12, rect.y as i32 + 12, 24, Color::WHITE);
    }
    if deck.is_animating() {
        let bar = Rectangle::new(0.0, top + STACK_HEIGHT - 4.0, screen_w * deck.transition_progress(), 4.0);
        d.draw_rectangle_rec(bar, Color::new(255, 255, 255, 140));
    }
    draw_arrows(d, top, STACK_HEIGHT, screen_w, true, true);
}

fn draw_image_slider(
    d: &mut RaylibDrawHandle,
    page: &Page,
    config: &PageConfig,
    fade: Option<&Crossfade>,
    index: usize,
    top: f32,
    screen_w: f32,
) {
    let Some(slider) = page.image_slider(index) else {
        return;
    };
    let tint = |slide: usize| PALETTE[(slide + index) % PALETTE.len()];
    let frame = Rectangle::new(ARROW_WIDTH, top + 10.0, screen_w - 2.0 * ARROW_WIDTH, IMAGE_HEIGHT - 20.0);

    let crossfade = slider.options().crossfade;
    let alpha = fade.map_or(1.0, |f| f.alpha(crossfade));
    if let Some(previous) = fade.and_then(|f| f.previous) {
        d.draw_rectangle_rec(frame, tint(previous));
    }
    let current = tint(slider.current_index());
    d.draw_rectangle_rec(frame, Color::new(current.r, current.g, current.b, (255.0 * alpha) as u8));

    let name = config.image_sliders.get(index).map_or("", |c| c.name.as_str());
    let label = format!("{name} {}/{} {:?}", slider.current_index() + 1, slider.slide_count(), slider.play_state());
    d.draw_text(&label, frame.x as i32 + 16, frame.y as i32 + 16, 22, Color::WHITE);

    let Some(slide) = slider.slides().get(slider.current_index()) else {
        return;
    };
    let state = if slide.is_loaded() { "loaded" } else if slide.load_failed() { "failed" } else { "loading" };
    d.draw_text(state, frame.x as i32 + 16, frame.y as i32 + 46, 18, Color::WHITE);

    // Photo placeholder, turned upright the way the EXIF orientation asks.
    if let Some(asset) = slide.loaded.as_ref() {
        let (w, h) = (160.0, 120.0);
        let center = Vector2::new(frame.x + frame.width - 140.0, frame.y + frame.height * 0.5);
        d.draw_rectangle_pro(
            Rectangle::new(center.x, center.y, w, h),
            Vector2::new(w * 0.5, h * 0.5),
            asset.rotation_degrees(),
            Color::new(255, 255, 255, 70),
        );
    }
}

fn draw_paged(d: &mut RaylibDrawHandle, page: &Page, index: usize, offset: Option<f32>, top: f32, screen_w: f32) {
    let Some(carousel) = page.paged(index) else {
        return;
    };
    let item_width = carousel.item_width();
    let stride = item_width + carousel.item_gap();
    let offset = offset.unwrap_or_else(|| carousel.offset());
    for item in 0..carousel.item_count() {
        let x = ARROW_WIDTH + stride * item as f32 - offset;
        if x + item_width < 0.0 || x > screen_w {
            continue;
        }
        let rect = Rectangle::new(x, top + 20.0, item_width, PAGED_HEIGHT - 40.0);
        d.draw_rectangle_rec(rect, PALETTE[item % PALETTE.len()]);
        d.draw_text(&format!("{}", item + 1), x as i32 + 12, top as i32 + 32, 22, Color::WHITE);
    }
    if carousel.controls_visible() {
        draw_arrows(d, top, PAGED_HEIGHT, screen_w, carousel.can_prev(), carousel.can_next());
    }
}
