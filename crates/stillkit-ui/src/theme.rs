// src/theme.rs
use egui::{Color32, Context, Stroke, Style, Visuals};

// ── Palette ──────────────────────────────────────────────────────────────────
pub const ACCENT:        Color32 = Color32::from_rgb(142, 120, 255);
pub const ACCENT_DIM:    Color32 = Color32::from_rgb( 96,  78, 190);
pub const ACCENT_HOVER:  Color32 = Color32::from_rgb(172, 152, 255);

pub const DARK_BG_0:     Color32 = Color32::from_rgb( 13,  13,  18);
pub const DARK_BG_1:     Color32 = Color32::from_rgb( 19,  19,  26);
pub const DARK_BG_2:     Color32 = Color32::from_rgb( 27,  27,  36);
pub const DARK_BG_3:     Color32 = Color32::from_rgb( 37,  37,  48);
pub const DARK_BG_4:     Color32 = Color32::from_rgb( 49,  49,  62);

pub const DARK_TEXT:     Color32 = Color32::from_rgb(222, 222, 232);
pub const DARK_TEXT_DIM: Color32 = Color32::from_rgb(124, 124, 142);
pub const DARK_BORDER:   Color32 = Color32::from_rgb( 54,  54,  70);

pub const GOOD:          Color32 = Color32::from_rgb( 88, 196, 130);
pub const WARN:          Color32 = Color32::from_rgb(235, 178,  80);
pub const BAD:           Color32 = Color32::from_rgb(222,  92,  92);

/// Waveform trace and the translucent region overlay drawn over it.
pub const WAVE:          Color32 = Color32::from_rgba_premultiplied(104, 156, 245, 220);
pub const REGION_FILL:   Color32 = Color32::from_rgba_premultiplied( 46,  38,  90, 110);

pub fn configure_style(ctx: &Context) {
    let mut style = Style::default();

    style.spacing.item_spacing     = egui::vec2(7.0, 6.0);
    style.spacing.window_margin    = egui::Margin::same(12);
    style.spacing.button_padding   = egui::vec2(12.0, 6.0);
    style.spacing.scroll.bar_width = 8.0;
    style.spacing.slider_width     = 180.0;
    style.spacing.indent           = 12.0;

    let cr = egui::CornerRadius::same(4);

    let mut v = Visuals::dark();
    v.panel_fill       = DARK_BG_1;
    v.window_fill      = DARK_BG_2;
    v.faint_bg_color   = DARK_BG_0;
    v.extreme_bg_color = DARK_BG_0;
    v.window_stroke    = Stroke::new(1.0, DARK_BORDER);

    v.selection.bg_fill = ACCENT_DIM;
    v.selection.stroke  = Stroke::new(1.0, Color32::WHITE);
    v.hyperlink_color   = ACCENT_HOVER;

    v.widgets.noninteractive.bg_fill       = DARK_BG_2;
    v.widgets.noninteractive.bg_stroke     = Stroke::new(1.0, DARK_BORDER);
    v.widgets.noninteractive.fg_stroke     = Stroke::new(1.0, DARK_TEXT_DIM);
    v.widgets.noninteractive.corner_radius = cr;

    v.widgets.inactive.bg_fill             = DARK_BG_3;
    v.widgets.inactive.bg_stroke           = Stroke::new(1.0, DARK_BORDER);
    v.widgets.inactive.fg_stroke           = Stroke::new(1.0, DARK_TEXT);
    v.widgets.inactive.corner_radius       = cr;

    v.widgets.hovered.bg_fill              = DARK_BG_4;
    v.widgets.hovered.bg_stroke            = Stroke::new(1.0, ACCENT_DIM);
    v.widgets.hovered.fg_stroke            = Stroke::new(1.5, ACCENT_HOVER);
    v.widgets.hovered.corner_radius        = cr;

    v.widgets.active.bg_fill               = ACCENT_DIM;
    v.widgets.active.bg_stroke             = Stroke::new(1.0, ACCENT);
    v.widgets.active.fg_stroke             = Stroke::new(2.0, Color32::WHITE);
    v.widgets.active.corner_radius         = cr;

    v.widgets.open.bg_fill                 = DARK_BG_4;
    v.widgets.open.bg_stroke               = Stroke::new(1.0, ACCENT_DIM);
    v.widgets.open.fg_stroke               = Stroke::new(1.5, ACCENT_HOVER);
    v.widgets.open.corner_radius           = cr;

    v.override_text_color = Some(DARK_TEXT);

    ctx.set_visuals(v);
    ctx.set_style(style);

    ctx.style_mut(|s| {
        s.visuals.window_corner_radius = cr;
        s.visuals.menu_corner_radius   = cr;
    });
}
