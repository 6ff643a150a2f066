// src/theme.rs
//
// iOS-style dark palette: system blue for actions, system red for anything
// that deletes. Sizes lean towards touch targets.

use egui::style::WidgetVisuals;
use egui::{Color32, Context, CornerRadius, Stroke, Visuals};

// ── Palette ──────────────────────────────────────────────────────────────────
pub const ACCENT:        Color32 = Color32::from_rgb(  0, 122, 255);
pub const DESTRUCTIVE:   Color32 = Color32::from_rgb(255,  59,  48);

pub const DARK_BG_1:     Color32 = Color32::from_rgb( 18,  18,  20);
pub const DARK_BG_2:     Color32 = Color32::from_rgb( 28,  28,  30);
pub const DARK_BG_3:     Color32 = Color32::from_rgb( 44,  44,  46);

pub const DARK_TEXT:     Color32 = Color32::from_rgb(235, 235, 245);
pub const DARK_TEXT_DIM: Color32 = Color32::from_rgb(142, 142, 147);

const ACCENT_PRESSED: Color32 = Color32::from_rgb(  0,  84, 178);
const DARK_BG_RAISED: Color32 = Color32::from_rgb( 58,  58,  60);
const SEPARATOR:      Color32 = Color32::from_rgb( 56,  56,  58);

const RADIUS: CornerRadius = CornerRadius::same(8);

pub fn configure_style(ctx: &Context) {
    ctx.set_visuals(visuals());
    ctx.style_mut(|s| {
        s.spacing.item_spacing     = egui::vec2(8.0, 6.0);
        s.spacing.button_padding   = egui::vec2(12.0, 6.0);
        s.spacing.interact_size.y  = 32.0;
        s.spacing.window_margin    = egui::Margin::same(14);
        s.spacing.scroll.bar_width = 6.0;
    });
}

fn visuals() -> Visuals {
    let mut v = Visuals::dark();
    v.panel_fill           = DARK_BG_1;
    v.window_fill          = DARK_BG_2;
    v.faint_bg_color       = Color32::BLACK;
    v.extreme_bg_color     = Color32::BLACK;
    v.window_stroke        = Stroke::new(1.0, SEPARATOR);
    v.window_corner_radius = CornerRadius::same(14);
    v.menu_corner_radius   = RADIUS;
    v.selection.bg_fill    = ACCENT;
    v.selection.stroke     = Stroke::new(1.0, Color32::WHITE);
    v.override_text_color  = Some(DARK_TEXT);

    let w = &mut v.widgets;
    style_widget(&mut w.noninteractive, DARK_BG_2,      Stroke::new(1.0, SEPARATOR), DARK_TEXT_DIM);
    style_widget(&mut w.inactive,       DARK_BG_3,      Stroke::NONE,                DARK_TEXT);
    style_widget(&mut w.hovered,        DARK_BG_RAISED, Stroke::new(1.0, ACCENT),    Color32::WHITE);
    style_widget(&mut w.active,         ACCENT_PRESSED, Stroke::new(1.0, ACCENT),    Color32::WHITE);
    v
}

fn style_widget(w: &mut WidgetVisuals, fill: Color32, border: Stroke, text: Color32) {
    w.bg_fill       = fill;
    w.weak_bg_fill  = fill;
    w.bg_stroke     = border;
    w.fg_stroke     = Stroke::new(1.0, text);
    w.corner_radius = RADIUS;
}
