//! Common types and data structures

use crate::error::{ClientError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Form body sent to the prediction endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRequest {
    pub text: String,
}

impl PredictionRequest {
    /// Trims the review text. Returns `None` when nothing is left to send.
    pub fn new(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self {
                text: trimmed.to_string(),
            })
        }
    }
}

/// Single bar of the chart payload
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChartPoint {
    pub sentiment: String,
    pub confidence: f64,
}

/// Prediction payload from the server. Every field defaults so that an
/// error-only body (`{"error": "..."}`) still parses.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PredictionResponse {
    pub predicted_sentiment: String,
    pub confidences: BTreeMap<String, f64>,
    pub chart_data: Vec<ChartPoint>,
    pub error: Option<String>,
}

impl PredictionResponse {
    /// A body carrying an `error` field counts as a failed prediction.
    pub fn into_result(self) -> Result<Self> {
        match self.error {
            Some(msg) => Err(ClientError::Server(msg)),
            None => Ok(self),
        }
    }
}

/// Account creation form. Every field is required.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    /// National identity card number
    pub cnic: String,
    pub password: String,
}

impl SignupForm {
    /// Trimmed copy ready to send, or `None` when a field is blank.
    /// The password is sent as typed.
    pub fn normalized(&self) -> Option<Self> {
        let form = Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            cnic: self.cnic.trim().to_string(),
            password: self.password.clone(),
        };
        let complete = !form.name.is_empty()
            && !form.email.is_empty()
            && !form.cnic.is_empty()
            && !form.password.is_empty();
        complete.then_some(form)
    }
}

/// Entry of `/api/user-reviews`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReviewSummary {
    pub id: i64,
    pub review_text: String,
    #[serde(default)]
    pub created_at: String,
}

/// Which mutually exclusive region of the results area is visible
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayState {
    Placeholder,
    Loading,
    Results,
    /// Controller has no server to talk to
    Error,
}

/// Top-level view of the window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Signup,
    Review,
}

/// Icon shown next to a sentiment label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentIcon {
    Smile,
    Meh,
    Frown,
}

impl SentimentIcon {
    pub fn for_label(label: &str) -> Self {
        match label {
            "positive" => Self::Smile,
            "neutral" => Self::Meh,
            _ => Self::Frown,
        }
    }
}

/// Results posted by background tasks, drained by the UI thread each frame
#[derive(Default)]
pub struct TaskInbox {
    pub predictions: Vec<(u64, Result<PredictionResponse>)>,
    pub login: Option<Result<()>>,
    pub signup: Option<Result<()>>,
    pub auth_status: Option<Result<bool>>,
    pub recent_reviews: Option<Result<Vec<ReviewSummary>>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn request_trims_and_rejects_blank_text() {
        assert_eq!(PredictionRequest::new("   \n\t"), None);
        assert_eq!(
            PredictionRequest::new("  great service \n").map(|r| r.text),
            Some("great service".to_string())
        );
    }

    #[test]
    fn error_only_body_parses_and_fails() {
        let parsed: PredictionResponse =
            serde_json::from_str(r#"{"error": "No text provided"}"#).unwrap();
        let err = parsed.into_result().unwrap_err();
        assert_eq!(err.alert_message(), "No text provided");
    }

    #[test]
    fn full_body_parses() {
        let body = r#"{
            "text": "fine",
            "predicted_sentiment": "neutral",
            "confidences": {"negative": 10.0, "neutral": 70.5, "positive": 19.5},
            "chart_data": [
                {"sentiment": "negative", "confidence": 10.0},
                {"sentiment": "neutral", "confidence": 70.5},
                {"sentiment": "positive", "confidence": 19.5}
            ]
        }"#;
        let parsed: PredictionResponse = serde_json::from_str(body).unwrap();
        let ok = parsed.into_result().unwrap();
        assert_eq!(ok.predicted_sentiment, "neutral");
        assert_eq!(ok.confidences.get("neutral"), Some(&70.5));
        assert_eq!(ok.chart_data.len(), 3);
    }

    #[test]
    fn signup_form_requires_every_field() {
        let form = SignupForm {
            name: "  Ana  ".into(),
            email: " ana@example.com ".into(),
            cnic: "35202-1234567-1".into(),
            password: " secret ".into(),
        };
        let ready = form.normalized().unwrap();
        assert_eq!(ready.name, "Ana");
        assert_eq!(ready.email, "ana@example.com");
        assert_eq!(ready.password, " secret ");

        let missing_cnic = SignupForm {
            cnic: "   ".into(),
            ..form
        };
        assert_eq!(missing_cnic.normalized(), None);
        assert_eq!(SignupForm::default().normalized(), None);
    }

    #[test]
    fn icons_follow_label() {
        assert_eq!(SentimentIcon::for_label("positive"), SentimentIcon::Smile);
        assert_eq!(SentimentIcon::for_label("neutral"), SentimentIcon::Meh);
        assert_eq!(SentimentIcon::for_label("negative"), SentimentIcon::Frown);
        assert_eq!(SentimentIcon::for_label("mixed"), SentimentIcon::Frown);
    }
}
