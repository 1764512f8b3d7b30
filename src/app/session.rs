//! Session handling: auth check, login, signup, logout and recent reviews

use super::{lock_inbox, App};
use crate::error::{ClientError, Result};
use crate::types::{ReviewSummary, Route};
use eframe::egui;
use tracing::{debug, info, warn};

/// Sidebar list of the user's latest reviews
#[derive(Debug, Default)]
pub(crate) struct RecentReviews {
    pub(crate) items: Vec<ReviewSummary>,
    pub(crate) loading: bool,
}

impl RecentReviews {
    /// Apply a finished fetch. Results that land outside the review view
    /// belong to an ended session and are dropped. Returns true when the
    /// server reports the session as expired.
    pub(crate) fn finish(&mut self, result: Result<Vec<ReviewSummary>>, route: Route) -> bool {
        self.loading = false;
        match result {
            Ok(_) if route != Route::Review => {
                debug!("Dropping recent reviews for an ended session");
                false
            }
            Ok(reviews) => {
                debug!(count = reviews.len(), "Recent reviews loaded");
                self.items = reviews;
                false
            }
            Err(ClientError::AuthRequired) => true,
            Err(e) => {
                warn!(error = %e, "Failed to load recent reviews");
                false
            }
        }
    }
}

impl App {
    /// Ask the server once at startup whether the stored session is still valid
    pub fn start_auth_check(&mut self, ctx: &egui::Context) {
        if self.auth_check_started {
            return;
        }
        self.auth_check_started = true;
        let Some(client) = self.client.clone() else {
            return;
        };

        debug!("Checking session");
        let inbox = self.inbox.clone();
        let ctx = ctx.clone();
        self.runtime.spawn(async move {
            let result = client.check_auth().await;
            lock_inbox(&inbox).auth_status = Some(result);
            ctx.request_repaint();
        });
    }

    pub fn login(&mut self, ctx: &egui::Context) {
        if self.login_in_progress {
            return;
        }
        let email = self.login_email.trim().to_string();
        let password = self.login_password.clone();
        if email.is_empty() || password.is_empty() {
            self.login_error = Some("Email and password are required".to_string());
            return;
        }
        let Some(client) = self.client.clone() else {
            self.login_error = self.controller.unavailable_reason().map(str::to_owned);
            return;
        };

        info!(email = %email, "Signing in");
        self.login_in_progress = true;
        self.login_error = None;
        self.login_notice = None;

        let inbox = self.inbox.clone();
        let ctx = ctx.clone();
        self.runtime.spawn(async move {
            let result = client.login(&email, &password).await;
            lock_inbox(&inbox).login = Some(result);
            ctx.request_repaint();
        });
    }

    pub fn signup(&mut self, ctx: &egui::Context) {
        if self.signup_in_progress {
            return;
        }
        let Some(form) = self.signup_form.normalized() else {
            self.signup_error = Some("All fields are required".to_string());
            return;
        };
        let Some(client) = self.client.clone() else {
            self.signup_error = self.controller.unavailable_reason().map(str::to_owned);
            return;
        };

        info!(email = %form.email, "Submitting signup");
        self.signup_in_progress = true;
        self.signup_error = None;

        let inbox = self.inbox.clone();
        let ctx = ctx.clone();
        self.runtime.spawn(async move {
            let result = client.signup(&form).await;
            lock_inbox(&inbox).signup = Some(result);
            ctx.request_repaint();
        });
    }

    pub fn logout(&mut self, ctx: &egui::Context) {
        if let Some(client) = self.client.clone() {
            self.runtime.spawn(async move {
                if let Err(e) = client.logout().await {
                    warn!(error = %e, "Logout request failed");
                }
            });
        }
        self.navigate(Route::Login, ctx);
    }

    pub fn refresh_recent_reviews(&mut self, ctx: &egui::Context) {
        if self.recent.loading {
            return;
        }
        let Some(client) = self.client.clone() else {
            return;
        };

        self.recent.loading = true;
        let inbox = self.inbox.clone();
        let ctx = ctx.clone();
        self.runtime.spawn(async move {
            let result = client.recent_reviews().await;
            lock_inbox(&inbox).recent_reviews = Some(result);
            ctx.request_repaint();
        });
    }

    pub fn navigate(&mut self, route: Route, ctx: &egui::Context) {
        if self.route == route {
            return;
        }
        info!(?route, "Switching view");
        let leaving_review = self.route == Route::Review;
        self.route = route;

        if leaving_review {
            // Session over: nothing of the last user's work stays on screen
            self.controller.reset();
            self.review_text.clear();
            self.recent.items.clear();
        }
        match route {
            Route::Login => {
                self.login_password.clear();
                self.login_in_progress = false;
            }
            Route::Signup => {
                self.signup_error = None;
                self.signup_in_progress = false;
            }
            Route::Review => {
                self.focus_review = true;
                self.refresh_recent_reviews(ctx);
            }
        }
    }

    pub fn poll_session_results(&mut self, ctx: &egui::Context) {
        let (auth_status, login, signup, recent) = {
            let mut inbox = self.lock_inbox();
            (
                inbox.auth_status.take(),
                inbox.login.take(),
                inbox.signup.take(),
                inbox.recent_reviews.take(),
            )
        };

        match auth_status {
            Some(Ok(true)) => {
                debug!("Session valid");
                self.refresh_recent_reviews(ctx);
            }
            Some(Ok(false)) => self.navigate(Route::Login, ctx),
            Some(Err(e)) => warn!(error = %e, "Session check failed"),
            None => {}
        }

        if let Some(result) = login {
            self.login_in_progress = false;
            match result {
                Ok(()) => {
                    self.login_password.clear();
                    self.login_error = None;
                    self.navigate(Route::Review, ctx);
                }
                Err(e) => {
                    warn!(error = %e, "Login failed");
                    self.login_error = Some(e.to_string());
                }
            }
        }

        if let Some(result) = signup {
            self.signup_in_progress = false;
            match result {
                Ok(()) => {
                    self.login_email = self.signup_form.email.trim().to_string();
                    self.login_error = None;
                    self.login_notice = Some("Account created. Sign in to continue.".to_string());
                    self.signup_form = Default::default();
                    self.navigate(Route::Login, ctx);
                }
                Err(e) => {
                    warn!(error = %e, "Signup failed");
                    self.signup_error = Some(e.to_string());
                }
            }
        }

        if let Some(result) = recent {
            if self.recent.finish(result, self.route) {
                self.navigate(Route::Login, ctx);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn review(id: i64, text: &str) -> ReviewSummary {
        ReviewSummary {
            id,
            review_text: text.to_string(),
            created_at: String::new(),
        }
    }

    #[test]
    fn reviews_are_kept_while_on_the_review_view() {
        let mut recent = RecentReviews {
            loading: true,
            ..Default::default()
        };
        let expired = recent.finish(Ok(vec![review(2, "Fast payout")]), Route::Review);

        assert!(!expired);
        assert!(!recent.loading);
        assert_eq!(recent.items, vec![review(2, "Fast payout")]);
    }

    #[test]
    fn late_reviews_after_logout_are_dropped() {
        let mut recent = RecentReviews {
            loading: true,
            ..Default::default()
        };
        recent.finish(Ok(vec![review(1, "Old session")]), Route::Login);

        assert!(recent.items.is_empty());
        assert!(!recent.loading);
    }

    #[test]
    fn expired_session_is_reported() {
        let mut recent = RecentReviews {
            items: vec![review(1, "kept")],
            loading: true,
        };
        assert!(recent.finish(Err(ClientError::AuthRequired), Route::Review));
        assert!(!recent.finish(
            Err(ClientError::Status(reqwest::StatusCode::BAD_GATEWAY)),
            Route::Review
        ));
        assert_eq!(recent.items.len(), 1);
    }
}
