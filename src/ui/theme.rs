use egui::{Color32, FontId, Rounding, Stroke, Visuals};

use crate::model::{TaskPriority, TaskStatus};

// ── Palette ──────────────────────────────────────────────────────────────────

pub const BG_DARK: Color32 = Color32::from_rgb(26, 27, 31);
pub const BG_PANEL: Color32 = Color32::from_rgb(33, 34, 39);
pub const BG_HEADER: Color32 = Color32::from_rgb(38, 40, 46);
pub const BG_SELECTED: Color32 = Color32::from_rgba_premultiplied(120, 86, 10, 60);

pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(54, 56, 64);
pub const BORDER_ACCENT: Color32 = Color32::from_rgb(245, 176, 65);

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(232, 232, 236);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(160, 162, 172);
pub const TEXT_DIM: Color32 = Color32::from_rgb(104, 106, 118);
pub const TEXT_ON_BAR: Color32 = Color32::from_rgb(255, 255, 255);

/// Safety-vest amber.
pub const ACCENT: Color32 = Color32::from_rgb(245, 166, 35);
pub const TODAY_LINE: Color32 = Color32::from_rgb(235, 80, 70);
pub const GRID_LINE: Color32 = Color32::from_rgb(46, 48, 56);
pub const WEEKEND_FILL: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 30);
pub const CONNECTOR: Color32 = Color32::from_rgb(150, 155, 170);
pub const DRAG_GHOST: Color32 = Color32::from_rgba_premultiplied(255, 255, 255, 18);

pub const PROGRESS_OVERLAY: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 70);

// ── Sizes ────────────────────────────────────────────────────────────────────

pub const HEADER_HEIGHT: f32 = 44.0;
pub const BAR_ROUNDING: f32 = 4.0;
pub const BAR_INSET: f32 = 5.0; // vertical inset so bars don't touch row edges
pub const INDENT_PER_LEVEL: f32 = 14.0;
pub const STATUS_BAR_HEIGHT: f32 = 24.0;
pub const SIDE_PANEL_WIDTH: f32 = 340.0;

// ── Fonts ────────────────────────────────────────────────────────────────────

pub fn font_header() -> FontId {
    FontId::proportional(12.0)
}

pub fn font_sub() -> FontId {
    FontId::proportional(10.5)
}

pub fn font_bar() -> FontId {
    FontId::proportional(11.5)
}

pub fn font_small() -> FontId {
    FontId::proportional(9.5)
}

// ── Task colours ─────────────────────────────────────────────────────────────

/// Bar fill by status.
pub fn status_color(status: TaskStatus) -> Color32 {
    match status {
        TaskStatus::NotStarted => Color32::from_rgb(112, 120, 138),
        TaskStatus::InProgress => Color32::from_rgb(66, 133, 244),
        TaskStatus::Completed => Color32::from_rgb(52, 168, 83),
        TaskStatus::OnHold => Color32::from_rgb(251, 140, 0),
        TaskStatus::Cancelled => Color32::from_rgb(90, 90, 96),
    }
}

/// Edge stroke by priority; low and medium get none.
pub fn priority_stroke(priority: TaskPriority) -> Stroke {
    match priority {
        TaskPriority::Critical => Stroke::new(2.0, Color32::from_rgb(229, 57, 53)),
        TaskPriority::High => Stroke::new(1.5, Color32::from_rgb(255, 193, 7)),
        TaskPriority::Medium | TaskPriority::Low => Stroke::NONE,
    }
}

pub fn priority_color(priority: TaskPriority) -> Color32 {
    match priority {
        TaskPriority::Critical => Color32::from_rgb(229, 57, 53),
        TaskPriority::High => Color32::from_rgb(255, 193, 7),
        TaskPriority::Medium => TEXT_SECONDARY,
        TaskPriority::Low => TEXT_DIM,
    }
}

// ── Apply custom visuals ─────────────────────────────────────────────────────

pub fn apply_theme(ctx: &egui::Context) {
    let mut visuals = Visuals::dark();

    visuals.override_text_color = Some(TEXT_PRIMARY);
    visuals.panel_fill = BG_PANEL;
    visuals.window_fill = BG_PANEL;
    visuals.extreme_bg_color = BG_DARK;

    let rounding = Rounding::same(4.0);
    visuals.widgets.noninteractive.bg_fill = BG_PANEL;
    visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, TEXT_SECONDARY);
    visuals.widgets.noninteractive.rounding = rounding;

    visuals.widgets.inactive.bg_fill = Color32::from_rgb(44, 46, 54);
    visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, TEXT_PRIMARY);
    visuals.widgets.inactive.rounding = rounding;

    visuals.widgets.hovered.bg_fill = Color32::from_rgb(56, 58, 68);
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, ACCENT);
    visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, TEXT_PRIMARY);
    visuals.widgets.hovered.rounding = rounding;

    visuals.widgets.active.bg_fill = Color32::from_rgb(64, 66, 78);
    visuals.widgets.active.bg_stroke = Stroke::new(1.0, ACCENT);
    visuals.widgets.active.fg_stroke = Stroke::new(2.0, Color32::WHITE);
    visuals.widgets.active.rounding = rounding;

    visuals.selection.bg_fill = BG_SELECTED;
    visuals.selection.stroke = Stroke::new(1.0, ACCENT);

    visuals.window_rounding = Rounding::same(8.0);
    visuals.window_stroke = Stroke::new(1.0, BORDER_SUBTLE);

    ctx.set_visuals(visuals);

    let mut style = (*ctx.style()).clone();
    style.spacing.item_spacing = egui::vec2(8.0, 4.0);
    style.spacing.button_padding = egui::vec2(8.0, 4.0);
    ctx.set_style(style);
}
