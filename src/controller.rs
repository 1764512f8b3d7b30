//! Prediction controller: submission lifecycle and result view state
//!
//! The controller is UI-agnostic. Views read from it; the app feeds it user
//! submissions and finished requests. Time is passed in explicitly so fill
//! and chart animations are deterministic.

use crate::chart::{BarChart, ChartSlot};
use crate::constants::CONFIDENCE_FILL_DELAY;
use crate::error::Result;
use crate::types::{
    ChartPoint, DisplayState, PredictionRequest, PredictionResponse, Route, SentimentIcon,
};
use crate::utils::{capitalize, format_confidence};
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// One row of the confidence list
#[derive(Debug, Clone, PartialEq)]
pub struct ConfidenceEntry {
    pub sentiment: String,
    pub label: String,
    pub icon: SentimentIcon,
    pub confidence: f64,
    pub text: String,
    fill_at: Instant,
}

impl ConfidenceEntry {
    /// Width of the fill bar in percent. Zero until the fill delay has passed.
    pub fn fill_width(&self, now: Instant) -> f64 {
        if now >= self.fill_at {
            self.confidence.clamp(0.0, 100.0)
        } else {
            0.0
        }
    }

    pub fn is_pending(&self, now: Instant) -> bool {
        now < self.fill_at
    }
}

/// Rendered prediction
#[derive(Debug, Clone, PartialEq)]
pub struct ResultsView {
    /// Increases with every render, keys per-result UI animations
    pub generation: u64,
    pub sentiment: String,
    pub label: String,
    pub icon: SentimentIcon,
    pub entries: Vec<ConfidenceEntry>,
}

/// Request handed to the app for dispatch
#[derive(Debug, Clone)]
pub struct Submission {
    pub id: u64,
    pub request: PredictionRequest,
    pub token: CancellationToken,
}

/// What `complete` did with a finished request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Superseded by a newer submission, dropped
    Stale,
    Rendered,
    Failed,
    LoginRequired,
}

/// Optional display regions. Updates to a disabled region are skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Regions {
    pub chart: bool,
    pub success_banner: bool,
}

impl Default for Regions {
    fn default() -> Self {
        Self {
            chart: true,
            success_banner: true,
        }
    }
}

struct InFlight {
    id: u64,
    token: CancellationToken,
}

pub struct PredictionController {
    display: DisplayState,
    regions: Regions,
    next_id: u64,
    in_flight: Option<InFlight>,
    results: Option<ResultsView>,
    chart: ChartSlot,
    alert: Option<String>,
    success_banner: bool,
    route: Option<Route>,
    unavailable: Option<String>,
    renders: u64,
}

impl PredictionController {
    pub fn new(regions: Regions) -> Self {
        Self {
            display: DisplayState::Placeholder,
            regions,
            next_id: 0,
            in_flight: None,
            results: None,
            chart: ChartSlot::default(),
            alert: None,
            success_banner: false,
            route: None,
            unavailable: None,
            renders: 0,
        }
    }

    /// Controller without a server. Submissions are ignored.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        error!(reason = %reason, "Prediction controller unavailable, submissions disabled");
        Self {
            display: DisplayState::Error,
            unavailable: Some(reason),
            ..Self::new(Regions::default())
        }
    }

    pub fn display(&self) -> DisplayState {
        self.display
    }

    pub fn results(&self) -> Option<&ResultsView> {
        self.results.as_ref()
    }

    pub fn chart(&self) -> Option<&BarChart> {
        self.chart.current()
    }

    pub fn chart_slot(&self) -> &ChartSlot {
        &self.chart
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    pub fn success_banner_visible(&self) -> bool {
        self.success_banner
    }

    pub fn unavailable_reason(&self) -> Option<&str> {
        self.unavailable.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn regions(&self) -> Regions {
        self.regions
    }

    /// Enable or disable optional regions. Disabling one hides what it shows now.
    pub fn set_regions(&mut self, regions: Regions) {
        self.regions = regions;
        if !regions.success_banner {
            self.success_banner = false;
        }
        if !regions.chart {
            self.chart.clear();
        }
    }

    /// Back to a blank placeholder, cancelling any submission in flight.
    /// Used when the session ends so nothing carries over to the next user.
    pub fn reset(&mut self) {
        if let Some(previous) = self.in_flight.take() {
            debug!(id = previous.id, "Cancelling submission on reset");
            previous.token.cancel();
        }
        self.results = None;
        self.chart.clear();
        self.alert = None;
        self.success_banner = false;
        self.route = None;
        if self.unavailable.is_none() {
            self.display = DisplayState::Placeholder;
        }
    }

    /// Pending navigation requested by a response, taken once
    pub fn take_route(&mut self) -> Option<Route> {
        self.route.take()
    }

    /// Start a submission. Blank text is a no-op and returns `None`.
    ///
    /// A submission still in flight is cancelled; its result will be ignored.
    pub fn submit_review(&mut self, text: &str) -> Option<Submission> {
        if let Some(reason) = &self.unavailable {
            warn!(reason = %reason, "Submission ignored, controller unavailable");
            return None;
        }
        let request = PredictionRequest::new(text)?;

        if let Some(previous) = self.in_flight.take() {
            debug!(id = previous.id, "Cancelling superseded submission");
            previous.token.cancel();
        }

        self.next_id += 1;
        let token = CancellationToken::new();
        self.in_flight = Some(InFlight {
            id: self.next_id,
            token: token.clone(),
        });

        self.display = DisplayState::Loading;
        self.success_banner = false;
        self.alert = None;

        Some(Submission {
            id: self.next_id,
            request,
            token,
        })
    }

    /// Apply the outcome of submission `id`.
    pub fn complete(
        &mut self,
        id: u64,
        result: Result<PredictionResponse>,
        now: Instant,
    ) -> Completion {
        match &self.in_flight {
            Some(current) if current.id == id => {}
            _ => {
                debug!(id, "Ignoring result of superseded submission");
                return Completion::Stale;
            }
        }
        self.in_flight = None;

        match result {
            Ok(response) => {
                self.render_results(&response, now);
                self.display = DisplayState::Results;
                self.success_banner = self.regions.success_banner;
                info!(id, sentiment = %response.predicted_sentiment, "Prediction rendered");
                Completion::Rendered
            }
            Err(e) if e.is_auth_required() => {
                info!(id, "Session expired, routing to login");
                self.display = DisplayState::Placeholder;
                self.route = Some(Route::Login);
                Completion::LoginRequired
            }
            Err(e) => {
                error!(id, error = %e, "Prediction failed");
                self.alert = Some(e.alert_message());
                self.display = DisplayState::Placeholder;
                Completion::Failed
            }
        }
    }

    /// Rebuild label, confidence list and chart from a response.
    pub fn render_results(&mut self, response: &PredictionResponse, now: Instant) {
        let mut sorted: Vec<(&String, f64)> = response
            .confidences
            .iter()
            .map(|(label, value)| (label, *value))
            .collect();
        sorted.sort_by(|a, b| b.1.total_cmp(&a.1));

        let fill_at = now + CONFIDENCE_FILL_DELAY;
        let entries = sorted
            .into_iter()
            .map(|(sentiment, confidence)| ConfidenceEntry {
                sentiment: sentiment.clone(),
                label: capitalize(sentiment),
                icon: SentimentIcon::for_label(sentiment),
                confidence,
                text: format_confidence(confidence),
                fill_at,
            })
            .collect();

        self.renders += 1;
        self.results = Some(ResultsView {
            generation: self.renders,
            sentiment: response.predicted_sentiment.clone(),
            label: capitalize(&response.predicted_sentiment),
            icon: SentimentIcon::for_label(&response.predicted_sentiment),
            entries,
        });

        self.render_chart(&response.chart_data, now);
    }

    /// Replace the chart. Skipped when the chart region is disabled.
    pub fn render_chart(&mut self, data: &[ChartPoint], now: Instant) {
        if !self.regions.chart {
            debug!("Chart region disabled, skipping chart render");
            return;
        }
        self.chart.replace(data, now);
        let slot = self.chart_slot();
        debug!(
            built = slot.built_count(),
            destroyed = slot.destroyed_count(),
            live = slot.live_count(),
            "Chart replaced"
        );
    }

    /// Whether a fill or chart animation still needs frames
    pub fn is_animating(&self, now: Instant) -> bool {
        let fills = self
            .results
            .as_ref()
            .is_some_and(|r| r.entries.iter().any(|e| e.is_pending(now)));
        let chart = self.chart.current().is_some_and(|c| c.is_animating(now));
        self.display == DisplayState::Results && (fills || chart)
    }
}
