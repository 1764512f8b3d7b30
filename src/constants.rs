//! Application constants and configuration

use std::time::Duration;

pub const APP_NAME: &str = "Review Sentiment";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Server used when neither settings nor environment name one
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000";
/// Environment override for the server URL
pub const SERVER_URL_ENV: &str = "REVIEW_SENTIMENT_SERVER";

pub const PREDICT_PATH: &str = "/predict";
pub const LOGIN_PATH: &str = "/login";
pub const SIGNUP_PATH: &str = "/signup";
pub const LOGOUT_PATH: &str = "/logout";
pub const CHECK_AUTH_PATH: &str = "/api/check-auth";
pub const USER_REVIEWS_PATH: &str = "/api/user-reviews";

/// Delay before a confidence bar fills to its value
pub const CONFIDENCE_FILL_DELAY: Duration = Duration::from_millis(300);
/// Seconds the egui animation takes to grow a confidence bar
pub const CONFIDENCE_FILL_ANIMATION_SECS: f32 = 0.6;
/// Bar chart grow animation
pub const CHART_ANIMATION: Duration = Duration::from_millis(2000);
pub const CHART_Y_MAX: f64 = 100.0;
pub const CHART_TICK_STEP: f64 = 20.0;

/// Alert text for failures that carry no server message
pub const GENERIC_FAILURE_MESSAGE: &str =
    "An error occurred during sentiment analysis. Please try again.";
