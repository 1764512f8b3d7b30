//! HTTP client for the prediction service
//!
//! Redirects are never followed so that a `302` to the login page reaches the
//! caller as "authentication required". The session cookie set by `/login`
//! lives in the client's cookie store and is sent with every later request.

use crate::constants::*;
use crate::error::{ClientError, Result};
use crate::types::{PredictionRequest, PredictionResponse, ReviewSummary, SignupForm};
use reqwest::{header, redirect, StatusCode};
use serde::Deserialize;
use tracing::{debug, info, warn};
use url::Url;

/// Error body shapes the server uses (`{"detail": ..}` or `{"error": ..}`)
#[derive(Deserialize, Default)]
#[serde(default)]
struct ErrorBody {
    detail: Option<String>,
    error: Option<String>,
}

#[derive(Clone)]
pub struct PredictionClient {
    http: reqwest::Client,
    base_url: Url,
}

impl PredictionClient {
    pub fn new(server_url: &str) -> Result<Self> {
        let base_url = Url::parse(server_url.trim())?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ClientError::UnsupportedScheme(base_url.scheme().to_string()));
        }
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .redirect(redirect::Policy::none())
            .build()?;
        debug!(base_url = %base_url, "Prediction client created");
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    /// Submit review text for classification.
    ///
    /// `401` and `302` map to [`ClientError::AuthRequired`], any other non-2xx
    /// status to [`ClientError::Status`], and a body with an `error` field to
    /// [`ClientError::Server`].
    pub async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResponse> {
        let url = self.endpoint(PREDICT_PATH)?;
        debug!(url = %url, chars = request.text.chars().count(), "Sending prediction request");

        let response = self.http.post(url).form(request).send().await?;
        let status = response.status();
        debug!(status = %status, "Prediction response received");

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FOUND {
            return Err(ClientError::AuthRequired);
        }
        if !status.is_success() {
            return Err(ClientError::Status(status));
        }

        let body = response.bytes().await?;
        let parsed: PredictionResponse = serde_json::from_slice(&body)?;
        parsed.into_result()
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<()> {
        let url = self.endpoint(LOGIN_PATH)?;
        let response = self
            .http
            .post(url)
            .form(&[("email", email), ("password", password)])
            .send()
            .await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            return Err(ClientError::InvalidCredentials);
        }
        if status.is_redirection() {
            let back_to_login = response
                .headers()
                .get(header::LOCATION)
                .and_then(|v| v.to_str().ok())
                .map(|loc| loc.trim_end_matches('/').ends_with(LOGIN_PATH))
                .unwrap_or(false);
            if back_to_login {
                return Err(ClientError::InvalidCredentials);
            }
            info!("Logged in");
            return Ok(());
        }
        if status.is_success() {
            info!("Logged in");
            return Ok(());
        }
        Err(Self::rejection(response).await)
    }

    /// Create an account. The server answers with a redirect to the login
    /// page on success and a `detail` message on rejection.
    pub async fn signup(&self, form: &SignupForm) -> Result<()> {
        let url = self.endpoint(SIGNUP_PATH)?;
        debug!(email = %form.email, "Creating account");
        let response = self.http.post(url).form(form).send().await?;
        let status = response.status();

        if status.is_redirection() || status.is_success() {
            info!(email = %form.email, "Account created");
            return Ok(());
        }
        Err(Self::rejection(response).await)
    }

    pub async fn logout(&self) -> Result<()> {
        let url = self.endpoint(LOGOUT_PATH)?;
        let status = self.http.get(url).send().await?.status();
        if status.is_success() || status.is_redirection() {
            info!("Logged out");
            Ok(())
        } else {
            warn!(status = %status, "Logout request rejected");
            Err(ClientError::Status(status))
        }
    }

    /// Whether the current session is accepted by the server
    pub async fn check_auth(&self) -> Result<bool> {
        let url = self.endpoint(CHECK_AUTH_PATH)?;
        let status = self.http.get(url).send().await?.status();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FOUND => Ok(false),
            s if s.is_success() => Ok(true),
            s => Err(ClientError::Status(s)),
        }
    }

    /// Latest reviews of the logged-in user, newest first
    pub async fn recent_reviews(&self) -> Result<Vec<ReviewSummary>> {
        let url = self.endpoint(USER_REVIEWS_PATH)?;
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FOUND {
            return Err(ClientError::AuthRequired);
        }
        if !status.is_success() {
            return Err(Self::rejection(response).await);
        }
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn rejection(response: reqwest::Response) -> ClientError {
        let status = response.status();
        match response.json::<ErrorBody>().await {
            Ok(ErrorBody { detail: Some(msg), .. } | ErrorBody { error: Some(msg), .. }) => {
                ClientError::Server(msg)
            }
            _ => ClientError::Status(status),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> PredictionClient {
        PredictionClient::new(&server.uri()).unwrap()
    }

    fn sample_body() -> serde_json::Value {
        json!({
            "text": "great product!",
            "predicted_sentiment": "positive",
            "confidences": {"positive": 80.0, "neutral": 15.0, "negative": 5.0},
            "chart_data": [
                {"sentiment": "negative", "confidence": 5.0},
                {"sentiment": "neutral", "confidence": 15.0},
                {"sentiment": "positive", "confidence": 80.0}
            ]
        })
    }

    #[test]
    fn rejects_non_http_urls() {
        assert!(matches!(
            PredictionClient::new("ftp://example.com"),
            Err(ClientError::UnsupportedScheme(_))
        ));
        assert!(matches!(
            PredictionClient::new("not a url"),
            Err(ClientError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn predict_posts_urlencoded_text_once() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predict"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(body_string("text=great+product%21"))
            .respond_with(ResponseTemplate::new(200).set_body_json(sample_body()))
            .expect(1)
            .mount(&server)
            .await;

        let request = PredictionRequest::new("  great product! ").unwrap();
        let response = client_for(&server).predict(&request).await.unwrap();

        assert_eq!(response.predicted_sentiment, "positive");
        assert_eq!(response.confidences.get("positive"), Some(&80.0));
        assert_eq!(response.chart_data.len(), 3);
    }

    #[tokio::test]
    async fn predict_maps_error_field_to_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predict"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"error": "Model unavailable"})),
            )
            .mount(&server)
            .await;

        let request = PredictionRequest::new("meh").unwrap();
        let err = client_for(&server).predict(&request).await.unwrap_err();
        assert_eq!(err.alert_message(), "Model unavailable");
    }

    #[tokio::test]
    async fn predict_treats_401_and_302_as_auth_required() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predict"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({"error": "Not authenticated"})),
            )
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/predict"))
            .respond_with(ResponseTemplate::new(302).insert_header("location", "/login"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let request = PredictionRequest::new("hello").unwrap();
        assert!(client.predict(&request).await.unwrap_err().is_auth_required());
        assert!(client.predict(&request).await.unwrap_err().is_auth_required());
    }

    #[tokio::test]
    async fn predict_reports_other_statuses_and_bad_json() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predict"))
            .respond_with(ResponseTemplate::new(500))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/predict"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let request = PredictionRequest::new("hello").unwrap();
        assert!(matches!(
            client.predict(&request).await,
            Err(ClientError::Status(StatusCode::INTERNAL_SERVER_ERROR))
        ));
        assert!(matches!(
            client.predict(&request).await,
            Err(ClientError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn login_follows_server_redirect_semantics() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .and(body_string("email=ana%40example.com&password=secret"))
            .respond_with(
                ResponseTemplate::new(303)
                    .insert_header("location", "/review")
                    .insert_header("set-cookie", "session=abc; Path=/"),
            )
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .and(body_string("email=ana%40example.com&password=wrong"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(json!({"detail": "Invalid email or password"})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        client.login("ana@example.com", "secret").await.unwrap();
        assert!(matches!(
            client.login("ana@example.com", "wrong").await,
            Err(ClientError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn login_surfaces_detail_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(json!({"detail": "Email and password are required"})),
            )
            .mount(&server)
            .await;

        let err = client_for(&server).login("", "").await.unwrap_err();
        assert_eq!(err.alert_message(), "Email and password are required");
    }

    fn signup_form(email: &str) -> SignupForm {
        SignupForm {
            name: "Ana".into(),
            email: email.into(),
            cnic: "35202-1234567-1".into(),
            password: "secret".into(),
        }
    }

    #[tokio::test]
    async fn signup_posts_all_fields_and_accepts_redirect() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/signup"))
            .and(body_string(
                "name=Ana&email=ana%40example.com&cnic=35202-1234567-1&password=secret",
            ))
            .respond_with(ResponseTemplate::new(303).insert_header("location", "/login"))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server)
            .signup(&signup_form("ana@example.com"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn signup_surfaces_duplicate_email_detail() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/signup"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(json!({"detail": "Email or CNIC already registered"})),
            )
            .mount(&server)
            .await;

        let err = client_for(&server)
            .signup(&signup_form("taken@example.com"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Email or CNIC already registered");
    }

    #[tokio::test]
    async fn session_cookie_is_sent_after_login() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(
                ResponseTemplate::new(303)
                    .insert_header("location", "/review")
                    .insert_header("set-cookie", "session=abc; Path=/"),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/check-auth"))
            .and(header("cookie", "session=abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"authenticated": true})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/check-auth"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({"authenticated": false})))
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert!(!client.check_auth().await.unwrap());
        client.login("ana@example.com", "secret").await.unwrap();
        assert!(client.check_auth().await.unwrap());
    }

    #[tokio::test]
    async fn recent_reviews_parse_and_require_auth() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/user-reviews"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 7, "review_text": "Fast payout", "created_at": "2024-03-05T14:07:00"},
                {"id": 6, "review_text": "Slow support", "created_at": "2024-03-04T09:00:00"}
            ])))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/user-reviews"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let reviews = client.recent_reviews().await.unwrap();
        assert_eq!(
            reviews.iter().map(|r| r.id).collect::<Vec<_>>(),
            vec![7, 6]
        );
        assert_eq!(reviews[0].review_text, "Fast payout");
        assert!(client.recent_reviews().await.unwrap_err().is_auth_required());
    }
}
