//! Theme constants for the sentiment client
//! Colors, sizes and frame builders used across views

use egui::{Color32, Stroke};

// =============================================================================
// COLORS - Surfaces
// =============================================================================
pub const BG_BASE: Color32 = Color32::from_rgb(0x0b, 0x0f, 0x19); // slate-950
pub const BG_ELEVATED: Color32 = Color32::from_rgb(0x11, 0x18, 0x27); // slate-900
pub const BG_INPUT: Color32 = Color32::from_rgb(0x0e, 0x14, 0x22);
pub const BG_SURFACE: Color32 = Color32::from_rgb(0x1e, 0x29, 0x3b); // slate-800
const BG_MODAL: Color32 = Color32::from_rgb(0x0f, 0x15, 0x24);

pub const ACCENT: Color32 = Color32::from_rgb(0x81, 0x8c, 0xf8); // indigo-400
const ACCENT_TEXT: Color32 = Color32::from_rgb(0x1e, 0x1b, 0x4b); // indigo-950

// =============================================================================
// COLORS - Text / borders / status
// =============================================================================
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(0xf8, 0xfa, 0xfc);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(0xe2, 0xe8, 0xf0); // slate-200
pub const TEXT_MUTED: Color32 = Color32::from_rgb(0x94, 0xa3, 0xb8); // slate-400
pub const TEXT_DIM: Color32 = Color32::from_rgb(0x64, 0x74, 0x8b); // slate-500

pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(0x1e, 0x29, 0x3b);
pub const BORDER_DEFAULT: Color32 = Color32::from_rgb(0x33, 0x41, 0x55); // slate-700

pub const STATUS_SUCCESS: Color32 = Color32::from_rgb(0x4a, 0xde, 0x80); // green-400
pub const STATUS_ERROR: Color32 = Color32::from_rgb(0xf8, 0x71, 0x71); // red-400

// =============================================================================
// COLORS - Sentiments and chart
// =============================================================================
pub const SENTIMENT_POSITIVE: Color32 = Color32::from_rgb(25, 135, 84);
pub const SENTIMENT_NEUTRAL: Color32 = Color32::from_rgb(255, 193, 7);
pub const SENTIMENT_NEGATIVE: Color32 = Color32::from_rgb(220, 53, 69);

/// Chart bar colors by position (highest confidence first)
pub const CHART_PALETTE: [Color32; 3] = [SENTIMENT_POSITIVE, SENTIMENT_NEUTRAL, SENTIMENT_NEGATIVE];
const CHART_FILL_ALPHA: u8 = 178; // 70%

pub fn chart_border(index: usize) -> Color32 {
    CHART_PALETTE[index % CHART_PALETTE.len()]
}

pub fn chart_fill(index: usize) -> Color32 {
    let c = chart_border(index);
    Color32::from_rgba_unmultiplied(c.r(), c.g(), c.b(), CHART_FILL_ALPHA)
}

pub fn sentiment_color(label: &str) -> Color32 {
    match label {
        "positive" => SENTIMENT_POSITIVE,
        "neutral" => SENTIMENT_NEUTRAL,
        "negative" => SENTIMENT_NEGATIVE,
        _ => TEXT_MUTED,
    }
}

// =============================================================================
// TYPOGRAPHY / DIMENSIONS
// =============================================================================
pub const FONT_TITLE: f32 = 20.0;
pub const FONT_HEADING: f32 = 16.0;
pub const FONT_BODY: f32 = 14.0;
pub const FONT_LABEL: f32 = 13.0;
pub const FONT_SMALL: f32 = 11.0;

pub const SIDEBAR_WIDTH: f32 = 320.0;
pub const CONFIDENCE_BAR_HEIGHT: f32 = 10.0;
pub const CHART_HEIGHT: f32 = 260.0;
pub const CHART_BAR_WIDTH: f32 = 60.0;
pub const CHART_AXIS_WIDTH: f32 = 40.0;

pub const RADIUS_DEFAULT: f32 = 6.0;
pub const RADIUS_LARGE: f32 = 10.0;

pub const STROKE_DEFAULT: f32 = 1.0;
pub const STROKE_THICK: f32 = 2.0;

pub const SPACING_SM: f32 = 4.0;
pub const SPACING_MD: f32 = 8.0;
pub const SPACING_LG: f32 = 12.0;
pub const SPACING_XL: f32 = 16.0;

// =============================================================================
// GLOBAL VISUALS
// =============================================================================

fn widget(bg: Color32, weak_bg: Color32, border: Stroke, fg: Color32) -> egui::style::WidgetVisuals {
    egui::style::WidgetVisuals {
        bg_fill: bg,
        weak_bg_fill: weak_bg,
        bg_stroke: border,
        fg_stroke: Stroke::new(STROKE_DEFAULT, fg),
        corner_radius: RADIUS_DEFAULT.into(),
        expansion: 0.0,
    }
}

pub fn apply_visuals(ctx: &egui::Context) {
    let border = Stroke::new(STROKE_DEFAULT, BORDER_SUBTLE);
    let hover_bg = Color32::from_rgb(0x26, 0x33, 0x48);

    let mut active = widget(hover_bg, hover_bg, Stroke::new(STROKE_DEFAULT, ACCENT), TEXT_PRIMARY);
    active.expansion = -1.0;

    ctx.set_visuals(egui::Visuals {
        dark_mode: true,
        panel_fill: BG_BASE,
        window_fill: BG_MODAL,
        extreme_bg_color: BG_INPUT,
        faint_bg_color: BG_ELEVATED,
        hyperlink_color: ACCENT,
        selection: egui::style::Selection {
            bg_fill: Color32::from_rgb(0x31, 0x2e, 0x81), // indigo-900
            stroke: Stroke::new(STROKE_DEFAULT, ACCENT),
        },
        widgets: egui::style::Widgets {
            noninteractive: widget(BG_ELEVATED, BG_SURFACE, border, TEXT_PRIMARY),
            inactive: widget(BG_SURFACE, BG_ELEVATED, border, TEXT_SECONDARY),
            hovered: widget(hover_bg, hover_bg, Stroke::new(STROKE_DEFAULT, BORDER_DEFAULT), TEXT_PRIMARY),
            active,
            open: widget(BG_SURFACE, BG_ELEVATED, border, TEXT_PRIMARY),
        },
        interact_cursor: Some(egui::CursorIcon::PointingHand),
        window_stroke: border,
        window_corner_radius: egui::CornerRadius::same(RADIUS_LARGE as u8),
        ..egui::Visuals::dark()
    });

    ctx.style_mut(|style| {
        style.spacing.item_spacing = egui::vec2(8.0, 6.0);
        style.spacing.button_padding = egui::vec2(14.0, 6.0);
        style.spacing.scroll.bar_width = 6.0;
    });
}

// =============================================================================
// FRAMES
// =============================================================================
pub fn card_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(BG_ELEVATED)
        .stroke(Stroke::new(STROKE_DEFAULT, BORDER_SUBTLE))
        .corner_radius(RADIUS_LARGE)
        .inner_margin(egui::Margin::same(SPACING_LG as i8))
}

pub fn sidebar_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(BG_ELEVATED)
        .inner_margin(egui::Margin::same(SPACING_XL as i8))
}

pub fn modal_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(BG_MODAL)
        .stroke(Stroke::new(STROKE_DEFAULT, BORDER_DEFAULT))
        .corner_radius(RADIUS_LARGE)
        .inner_margin(SPACING_XL)
}

/// Success banner above fresh results
pub fn banner_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(Color32::from_rgb(0x05, 0x2e, 0x16))
        .stroke(Stroke::new(STROKE_DEFAULT, Color32::from_rgb(0x16, 0x65, 0x34)))
        .corner_radius(RADIUS_DEFAULT)
        .inner_margin(egui::Margin::symmetric(12, 8))
}

pub fn error_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(Color32::from_rgb(0x2d, 0x0a, 0x0a))
        .stroke(Stroke::new(STROKE_DEFAULT, Color32::from_rgb(0x7f, 0x1d, 0x1d)))
        .corner_radius(RADIUS_DEFAULT)
        .inner_margin(egui::Margin::same(10))
}

// =============================================================================
// BUTTONS
// =============================================================================
pub fn button(text: impl Into<String>) -> egui::Button<'static> {
    egui::Button::new(text.into())
        .fill(BG_SURFACE)
        .corner_radius(RADIUS_DEFAULT)
}

/// Primary action (Analyze, Sign in)
pub fn button_accent(text: impl Into<String>) -> egui::Button<'static> {
    egui::Button::new(egui::RichText::new(text.into()).color(ACCENT_TEXT).strong())
        .fill(ACCENT)
        .corner_radius(RADIUS_DEFAULT)
}

/// Primary action drawn inert (nothing to submit yet)
pub fn button_disabled(text: impl Into<String>) -> egui::Button<'static> {
    egui::Button::new(egui::RichText::new(text.into()).color(TEXT_DIM))
        .fill(BORDER_SUBTLE)
        .corner_radius(RADIUS_DEFAULT)
}
