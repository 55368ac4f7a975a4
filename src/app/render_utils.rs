use eframe::egui::{Color32, FontId, Painter, Pos2, Rect, Vec2, vec2};

use crate::model::Category;

pub(super) const NODE_RADIUS: f32 = 14.0;
pub(super) const HOVER_RADIUS: f32 = 18.0;
pub(super) const MIN_ZOOM: f32 = 0.3;
pub(super) const MAX_ZOOM: f32 = 4.0;

pub(super) fn world_to_screen(rect: Rect, pan: Vec2, zoom: f32, world: Vec2) -> Pos2 {
    rect.center() + pan + world * zoom
}

pub(super) fn screen_to_world(rect: Rect, pan: Vec2, zoom: f32, screen: Pos2) -> Vec2 {
    (screen - rect.center() - pan) / zoom
}

pub(super) fn category_color(category: Category) -> Color32 {
    match category {
        Category::Judge => Color32::from_rgb(0x7d, 0xd3, 0xfc),
        Category::Lawyer => Color32::from_rgb(0xa3, 0xe6, 0x35),
        Category::Person => Color32::from_rgb(0xf8, 0x71, 0x71),
        Category::Case => Color32::from_rgb(0xc0, 0x84, 0xfc),
        Category::Court => Color32::from_rgb(0x60, 0xa5, 0xfa),
        Category::Police => Color32::from_rgb(0xfb, 0xbf, 0x24),
        Category::Event => Color32::from_rgb(0xfa, 0xcc, 0x15),
    }
}

pub(super) fn dim_color(color: Color32, factor: f32) -> Color32 {
    let factor = factor.clamp(0.0, 1.0);
    Color32::from_rgba_unmultiplied(
        (color.r() as f32 * factor) as u8,
        (color.g() as f32 * factor) as u8,
        (color.b() as f32 * factor) as u8,
        (color.a() as f32 * (0.45 + (factor * 0.55))) as u8,
    )
}

pub(super) fn draw_background(painter: &Painter, rect: Rect) {
    painter.rect_filled(rect, 0.0, Color32::from_rgb(11, 18, 32));
}

pub(super) fn circle_visible(rect: Rect, position: Pos2, radius: f32) -> bool {
    !(position.x + radius < rect.left()
        || position.x - radius > rect.right()
        || position.y + radius < rect.top()
        || position.y - radius > rect.bottom())
}

/// Name/category tooltip next to the pointer, clamped to stay inside the
/// canvas.
pub(super) fn draw_tooltip(
    painter: &Painter,
    rect: Rect,
    pointer: Pos2,
    name: &str,
    category: Category,
) {
    let name_galley = painter.layout_no_wrap(
        name.to_owned(),
        FontId::proportional(13.0),
        Color32::WHITE,
    );
    let category_galley = painter.layout_no_wrap(
        category.label().to_owned(),
        FontId::proportional(12.0),
        Color32::from_gray(185),
    );

    let padding = vec2(8.0, 6.0);
    let size = vec2(
        name_galley.size().x.max(category_galley.size().x),
        name_galley.size().y + category_galley.size().y + 2.0,
    ) + padding * 2.0;

    let mut origin = pointer + vec2(14.0, -10.0 - size.y);
    origin.x = origin.x.clamp(rect.left(), (rect.right() - size.x).max(rect.left()));
    origin.y = origin.y.clamp(rect.top(), (rect.bottom() - size.y).max(rect.top()));

    painter.rect_filled(
        Rect::from_min_size(origin, size),
        6.0,
        Color32::from_rgb(30, 41, 59),
    );
    let name_height = name_galley.size().y;
    painter.galley(origin + padding, name_galley, Color32::WHITE);
    painter.galley(
        origin + padding + vec2(0.0, name_height + 2.0),
        category_galley,
        Color32::from_gray(185),
    );
}
