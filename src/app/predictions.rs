//! Prediction submission and result polling

use super::{lock_inbox, App};
use crate::api::PredictionClient;
use crate::controller::{Completion, Submission};
use crate::types::TaskInbox;
use eframe::egui;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tracing::{debug, info};

/// Run one prediction request. A cancelled submission posts nothing.
async fn run_prediction(
    submission: Submission,
    client: PredictionClient,
    inbox: Arc<Mutex<TaskInbox>>,
    ctx: egui::Context,
) {
    let Submission { id, request, token } = submission;

    let result = tokio::select! {
        _ = token.cancelled() => {
            debug!(id, "Prediction request cancelled");
            return;
        }
        result = client.predict(&request) => result,
    };

    lock_inbox(&inbox).predictions.push((id, result));
    ctx.request_repaint();
}

impl App {
    pub fn submit_review(&mut self, ctx: &egui::Context) {
        let Some(submission) = self.controller.submit_review(&self.review_text) else {
            return;
        };
        let Some(client) = self.client.clone() else {
            return;
        };

        info!(
            id = submission.id,
            chars = submission.request.text.chars().count(),
            "Submitting review"
        );
        self.runtime
            .spawn(run_prediction(submission, client, self.inbox.clone(), ctx.clone()));
    }

    pub fn poll_prediction_results(&mut self, ctx: &egui::Context) {
        let finished = std::mem::take(&mut self.lock_inbox().predictions);
        let now = Instant::now();

        for (id, result) in finished {
            if self.controller.complete(id, result, now) == Completion::Rendered {
                self.refresh_recent_reviews(ctx);
            }
        }

        if let Some(route) = self.controller.take_route() {
            self.navigate(route, ctx);
        }

        // Keep frames coming until the delayed fills and chart growth finish
        if self.controller.is_animating(now) {
            ctx.request_repaint();
        }
    }
}
