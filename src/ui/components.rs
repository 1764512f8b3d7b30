//! Reusable UI components
//!
//! Standalone widgets for the results area: confidence rows, the bar chart
//! and recent review entries.

use crate::chart::{BarChart, DATASET_LABEL};
use crate::constants::{CHART_Y_MAX, CONFIDENCE_FILL_ANIMATION_SECS};
use crate::controller::ConfidenceEntry;
use crate::theme;
use crate::types::{ReviewSummary, SentimentIcon};
use crate::utils::{format_review_timestamp, truncate_preview};
use eframe::egui;
use std::time::Instant;

pub fn icon_glyph(icon: SentimentIcon) -> &'static str {
    match icon {
        SentimentIcon::Smile => egui_phosphor::regular::SMILEY,
        SentimentIcon::Meh => egui_phosphor::regular::SMILEY_MEH,
        SentimentIcon::Frown => egui_phosphor::regular::SMILEY_SAD,
    }
}

/// Ctrl+Enter (Cmd+Enter on macOS) submits the review form
pub fn is_submit_shortcut(input: &egui::InputState) -> bool {
    input.modifiers.command && input.key_pressed(egui::Key::Enter)
}

/// Label, value and animated fill bar for one sentiment.
/// `generation` keys the animation so every new result grows from zero.
pub fn confidence_row(ui: &mut egui::Ui, entry: &ConfidenceEntry, generation: u64, now: Instant) {
    let color = theme::sentiment_color(&entry.sentiment);

    ui.horizontal(|ui| {
        ui.label(
            egui::RichText::new(icon_glyph(entry.icon))
                .size(theme::FONT_HEADING)
                .color(color),
        );
        ui.label(egui::RichText::new(&entry.label).strong().size(theme::FONT_BODY));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(egui::RichText::new(&entry.text).strong().size(theme::FONT_BODY));
        });
    });

    let width = ui.available_width();
    let (rect, _) = ui.allocate_exact_size(
        egui::vec2(width, theme::CONFIDENCE_BAR_HEIGHT),
        egui::Sense::hover(),
    );
    if !ui.is_rect_visible(rect) {
        return;
    }

    let target = (entry.fill_width(now) / 100.0) as f32;
    let fraction = ui.ctx().animate_value_with_time(
        egui::Id::new(("confidence_fill", generation, &entry.sentiment)),
        target,
        CONFIDENCE_FILL_ANIMATION_SECS,
    );

    let painter = ui.painter();
    let rounding = theme::CONFIDENCE_BAR_HEIGHT / 2.0;
    painter.rect_filled(rect, rounding, theme::BG_SURFACE);
    if fraction > 0.0 {
        let fill = egui::Rect::from_min_size(
            rect.min,
            egui::vec2(rect.width() * fraction.clamp(0.0, 1.0), rect.height()),
        );
        painter.rect_filled(fill, rounding, color);
    }
}

/// Vertical bar chart with a fixed 0..100% axis and per-bar tooltips
pub fn bar_chart(ui: &mut egui::Ui, chart: &BarChart, now: Instant) {
    ui.label(
        egui::RichText::new(DATASET_LABEL)
            .size(theme::FONT_SMALL)
            .color(theme::TEXT_DIM),
    );

    let width = ui.available_width();
    let (rect, _) =
        ui.allocate_exact_size(egui::vec2(width, theme::CHART_HEIGHT), egui::Sense::hover());
    if !ui.is_rect_visible(rect) {
        return;
    }

    let painter = ui.painter_at(rect);
    let label_height = 26.0;
    let plot = egui::Rect::from_min_max(
        egui::pos2(rect.left() + theme::CHART_AXIS_WIDTH, rect.top() + theme::SPACING_MD),
        egui::pos2(rect.right() - theme::SPACING_MD, rect.bottom() - label_height),
    );

    for (value, label) in BarChart::ticks() {
        let y = plot.bottom() - plot.height() * (value / CHART_Y_MAX) as f32;
        painter.line_segment(
            [egui::pos2(plot.left(), y), egui::pos2(plot.right(), y)],
            egui::Stroke::new(theme::STROKE_DEFAULT, egui::Color32::from_white_alpha(13)),
        );
        painter.text(
            egui::pos2(plot.left() - 6.0, y),
            egui::Align2::RIGHT_CENTER,
            label,
            egui::FontId::proportional(12.0),
            theme::TEXT_DIM,
        );
    }

    let count = chart.bars().len().max(1);
    let slot_width = plot.width() / count as f32;
    let bar_width = theme::CHART_BAR_WIDTH.min(slot_width * 0.8);

    for (i, bar) in chart.bars().iter().enumerate() {
        let center_x = plot.left() + slot_width * (i as f32 + 0.5);
        let height = plot.height() * chart.bar_height(bar, now);
        let bar_rect = egui::Rect::from_min_max(
            egui::pos2(center_x - bar_width / 2.0, plot.bottom() - height),
            egui::pos2(center_x + bar_width / 2.0, plot.bottom()),
        );

        if height > 0.0 {
            painter.rect_filled(bar_rect, theme::RADIUS_LARGE, bar.fill);
            painter.rect_stroke(
                bar_rect,
                theme::RADIUS_LARGE,
                egui::Stroke::new(theme::STROKE_THICK, bar.border),
                egui::StrokeKind::Inside,
            );
        }
        painter.text(
            egui::pos2(center_x, plot.bottom() + 6.0),
            egui::Align2::CENTER_TOP,
            &bar.label,
            egui::FontId::proportional(theme::FONT_BODY),
            theme::TEXT_SECONDARY,
        );

        let hover_rect = egui::Rect::from_min_max(
            egui::pos2(center_x - bar_width / 2.0, plot.top()),
            egui::pos2(center_x + bar_width / 2.0, plot.bottom()),
        );
        ui.interact(hover_rect, ui.id().with(("chart_bar", chart.id(), i)), egui::Sense::hover())
            .on_hover_text(BarChart::tooltip(bar));
    }
}

/// Clickable recent review entry. Returns true if clicked.
pub fn recent_review_row(ui: &mut egui::Ui, review: &ReviewSummary) -> bool {
    let response = theme::card_frame()
        .show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.label(
                egui::RichText::new(truncate_preview(&review.review_text, 80))
                    .size(theme::FONT_LABEL)
                    .color(theme::TEXT_SECONDARY),
            );
            if !review.created_at.is_empty() {
                ui.label(
                    egui::RichText::new(format_review_timestamp(&review.created_at))
                        .size(theme::FONT_SMALL)
                        .color(theme::TEXT_DIM),
                );
            }
        })
        .response
        .interact(egui::Sense::click());

    if response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
    }
    response.clicked()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shortcut_fired(modifiers: egui::Modifiers, key: egui::Key) -> bool {
        let ctx = egui::Context::default();
        let raw = egui::RawInput {
            modifiers,
            events: vec![egui::Event::Key {
                key,
                physical_key: None,
                pressed: true,
                repeat: false,
                modifiers,
            }],
            ..Default::default()
        };
        let mut fired = false;
        let _ = ctx.run(raw, |ctx| {
            fired = ctx.input(is_submit_shortcut);
        });
        fired
    }

    #[test]
    fn command_enter_submits() {
        assert!(shortcut_fired(egui::Modifiers::COMMAND, egui::Key::Enter));
    }

    #[test]
    fn plain_enter_and_other_keys_do_not_submit() {
        assert!(!shortcut_fired(egui::Modifiers::NONE, egui::Key::Enter));
        assert!(!shortcut_fired(egui::Modifiers::COMMAND, egui::Key::Space));
    }
}
