//! App module - contains the main application state and logic

mod modals;
mod predictions;
mod session;
mod views;

use crate::api::PredictionClient;
use crate::controller::{PredictionController, Regions};
use crate::settings::Settings;
use crate::theme;
use crate::types::*;
use session::RecentReviews;
use eframe::egui;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{error, info};

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    pub(crate) controller: PredictionController,
    pub(crate) client: Option<PredictionClient>,
    pub(crate) runtime: tokio::runtime::Runtime,
    pub(crate) inbox: Arc<Mutex<TaskInbox>>,
    pub(crate) route: Route,
    // Review form
    pub(crate) review_text: String,
    pub(crate) focus_review: bool,
    // Login form
    pub(crate) login_email: String,
    pub(crate) login_password: String,
    pub(crate) login_in_progress: bool,
    pub(crate) login_error: Option<String>,
    pub(crate) login_notice: Option<String>,
    pub(crate) auth_check_started: bool,
    // Signup form
    pub(crate) signup_form: SignupForm,
    pub(crate) signup_in_progress: bool,
    pub(crate) signup_error: Option<String>,
    // Recent reviews sidebar
    pub(crate) recent: RecentReviews,
    // Settings
    pub(crate) server_url: String,
    pub(crate) server_url_override: Option<String>,
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
    pub(crate) needs_center: bool,
    pub(crate) data_dir: PathBuf,
}

// ============================================================================
// APP INITIALIZATION & HELPERS
// ============================================================================

impl App {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: Settings,
        data_dir: PathBuf,
        runtime: tokio::runtime::Runtime,
    ) -> Self {
        // Force dark theme
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        // Add Phosphor icons font
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        theme::apply_visuals(&cc.egui_ctx);

        let regions = Regions {
            chart: settings.show_chart,
            success_banner: settings.show_success_banner,
        };

        let (client, controller) = match PredictionClient::new(settings.effective_server_url()) {
            Ok(client) => {
                info!(server_url = %client.base_url(), "Prediction client ready");
                (Some(client), PredictionController::new(regions))
            }
            Err(e) => {
                error!(error = %e, server_url = %settings.effective_server_url(), "Failed to create prediction client");
                (None, PredictionController::unavailable(e.to_string()))
            }
        };

        Self {
            controller,
            client,
            runtime,
            inbox: Arc::new(Mutex::new(TaskInbox::default())),
            route: Route::Review,
            review_text: String::new(),
            focus_review: true,
            login_email: settings.last_email.clone().unwrap_or_default(),
            login_password: String::new(),
            login_in_progress: false,
            login_error: None,
            login_notice: None,
            auth_check_started: false,
            signup_form: SignupForm::default(),
            signup_in_progress: false,
            signup_error: None,
            recent: RecentReviews::default(),
            server_url: settings.server_url,
            server_url_override: settings.server_url_override,
            window_pos: None,
            window_size: None,
            needs_center: false,
            data_dir,
        }
    }

    pub fn save_settings(&self) {
        let regions = self.controller.regions();
        let settings = Settings {
            window_x: self.window_pos.map(|p| p.x),
            window_y: self.window_pos.map(|p| p.y),
            window_w: self.window_size.map(|s| s.x),
            window_h: self.window_size.map(|s| s.y),
            server_url: self.server_url.clone(),
            server_url_override: None,
            show_chart: regions.chart,
            show_success_banner: regions.success_banner,
            last_email: Some(self.login_email.trim().to_string()).filter(|e| !e.is_empty()),
        };
        settings.save(&self.data_dir);
    }

    /// Server URL in use for this run
    pub(crate) fn effective_server_url(&self) -> &str {
        self.server_url_override.as_deref().unwrap_or(&self.server_url)
    }

    /// Lock the task inbox. A task that panicked mid-write leaves plain data
    /// behind, so a poisoned lock is still usable.
    pub(crate) fn lock_inbox(&self) -> MutexGuard<'_, TaskInbox> {
        lock_inbox(&self.inbox)
    }
}

pub(crate) fn lock_inbox(inbox: &Mutex<TaskInbox>) -> MutexGuard<'_, TaskInbox> {
    inbox.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
