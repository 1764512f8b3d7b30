//! Confidence bar chart model
//!
//! `BarChart` is the declarative description the chart view paints from.
//! `ChartSlot` owns the single live instance: every render replaces it, and
//! the previous chart is destroyed before the new one is stored.

use crate::constants::{CHART_ANIMATION, CHART_TICK_STEP, CHART_Y_MAX};
use crate::theme;
use crate::types::ChartPoint;
use crate::utils::{capitalize, format_confidence};
use egui::Color32;
use std::time::Instant;
use tracing::debug;

pub const DATASET_LABEL: &str = "Confidence %";

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    pub fill: Color32,
    pub border: Color32,
}

#[derive(Debug)]
pub struct BarChart {
    id: u64,
    bars: Vec<Bar>,
    created_at: Instant,
}

impl BarChart {
    /// Build a chart from server data, highest confidence first.
    /// Colors come from the palette by position, not by label.
    pub fn new(id: u64, data: &[ChartPoint], now: Instant) -> Self {
        let mut sorted = data.to_vec();
        sorted.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

        let bars = sorted
            .into_iter()
            .enumerate()
            .map(|(i, point)| Bar {
                label: capitalize(&point.sentiment),
                value: point.confidence,
                fill: theme::chart_fill(i),
                border: theme::chart_border(i),
            })
            .collect();

        debug!(id, "Chart created");
        Self {
            id,
            bars,
            created_at: now,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// Eased animation progress in `0.0..=1.0`
    pub fn progress(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.created_at).as_secs_f32();
        ease_out_quart(elapsed / CHART_ANIMATION.as_secs_f32())
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) < CHART_ANIMATION
    }

    /// Fraction of the plot height the bar covers at `now`
    pub fn bar_height(&self, bar: &Bar, now: Instant) -> f32 {
        (bar.value / CHART_Y_MAX).clamp(0.0, 1.0) as f32 * self.progress(now)
    }

    pub fn tooltip(bar: &Bar) -> String {
        format!("Confidence: {}", format_confidence(bar.value))
    }

    /// Y-axis ticks as (value, label), bottom to top
    pub fn ticks() -> Vec<(f64, String)> {
        let steps = (CHART_Y_MAX / CHART_TICK_STEP).round() as usize;
        (0..=steps)
            .map(|i| {
                let value = i as f64 * CHART_TICK_STEP;
                (value, format!("{}%", value))
            })
            .collect()
    }

    pub fn destroy(self) {
        debug!(id = self.id, "Chart destroyed");
    }
}

pub fn ease_out_quart(t: f32) -> f32 {
    1.0 - (1.0 - t.clamp(0.0, 1.0)).powi(4)
}

/// Owner of the single live chart
#[derive(Debug, Default)]
pub struct ChartSlot {
    current: Option<BarChart>,
    built: u64,
    destroyed: u64,
}

impl ChartSlot {
    pub fn replace(&mut self, data: &[ChartPoint], now: Instant) -> &BarChart {
        self.clear();
        self.built += 1;
        self.current.insert(BarChart::new(self.built, data, now))
    }

    /// Destroy the live chart, if any
    pub fn clear(&mut self) {
        if let Some(old) = self.current.take() {
            old.destroy();
            self.destroyed += 1;
        }
    }

    pub fn current(&self) -> Option<&BarChart> {
        self.current.as_ref()
    }

    pub fn built_count(&self) -> u64 {
        self.built
    }

    pub fn destroyed_count(&self) -> u64 {
        self.destroyed
    }

    pub fn live_count(&self) -> u64 {
        self.built - self.destroyed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    fn points(values: &[(&str, f64)]) -> Vec<ChartPoint> {
        values
            .iter()
            .map(|(s, c)| ChartPoint {
                sentiment: s.to_string(),
                confidence: *c,
            })
            .collect()
    }

    #[test]
    fn bars_are_sorted_and_colored_by_position() {
        let data = points(&[("negative", 5.0), ("positive", 80.0), ("neutral", 15.0)]);
        let chart = BarChart::new(1, &data, Instant::now());

        let summary: Vec<(&str, f64)> = chart
            .bars()
            .iter()
            .map(|b| (b.label.as_str(), b.value))
            .collect();
        assert_eq!(summary, vec![("Positive", 80.0), ("Neutral", 15.0), ("Negative", 5.0)]);
        assert_eq!(chart.bars()[0].border, theme::CHART_PALETTE[0]);
        assert_eq!(chart.bars()[2].border, theme::CHART_PALETTE[2]);
    }

    #[test]
    fn palette_is_positional_not_by_label() {
        let data = points(&[("negative", 90.0), ("positive", 10.0)]);
        let chart = BarChart::new(1, &data, Instant::now());
        assert_eq!(chart.bars()[0].label, "Negative");
        assert_eq!(chart.bars()[0].border, theme::CHART_PALETTE[0]);
    }

    #[test]
    fn tooltip_and_ticks() {
        let bar = Bar {
            label: "Positive".into(),
            value: 80.04,
            fill: Color32::WHITE,
            border: Color32::WHITE,
        };
        assert_eq!(BarChart::tooltip(&bar), "Confidence: 80.0%");

        let ticks = BarChart::ticks();
        assert_eq!(ticks.first(), Some(&(0.0, "0%".to_string())));
        assert_eq!(ticks.last(), Some(&(100.0, "100%".to_string())));
        assert_eq!(ticks.len(), 6);
    }

    #[test]
    fn animation_eases_out_over_two_seconds() {
        let start = Instant::now();
        let chart = BarChart::new(1, &points(&[("positive", 50.0)]), start);
        let bar = chart.bars()[0].clone();

        assert_eq!(chart.bar_height(&bar, start), 0.0);
        assert!(chart.progress(start + Duration::from_millis(500)) > 0.5);
        assert!(chart.is_animating(start + Duration::from_millis(1999)));
        assert!(!chart.is_animating(start + CHART_ANIMATION));
        assert_eq!(chart.bar_height(&bar, start + CHART_ANIMATION), 0.5);
    }

    #[test]
    fn slot_keeps_one_live_chart() {
        let mut slot = ChartSlot::default();
        let now = Instant::now();
        assert_eq!(slot.live_count(), 0);

        slot.replace(&points(&[("positive", 60.0)]), now);
        slot.replace(&points(&[("neutral", 70.0)]), now);
        let id = slot.replace(&points(&[("negative", 90.0)]), now).id();

        assert_eq!(id, 3);
        assert_eq!(slot.built_count(), 3);
        assert_eq!(slot.destroyed_count(), 2);
        assert_eq!(slot.live_count(), 1);
        assert_eq!(slot.current().map(|c| c.bars()[0].label.as_str()), Some("Negative"));
    }

    #[test]
    fn clearing_destroys_the_live_chart() {
        let mut slot = ChartSlot::default();
        slot.clear();
        assert_eq!(slot.destroyed_count(), 0);

        slot.replace(&points(&[("positive", 60.0)]), Instant::now());
        slot.clear();
        assert!(slot.current().is_none());
        assert_eq!(slot.destroyed_count(), 1);
        assert_eq!(slot.live_count(), 0);
    }
}
