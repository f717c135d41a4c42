//! Client layer: orchestrates the HTTP call and classifies the response.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, trace, warn};

use crate::domain::{SendSms, ValidationError};

/// Error code the backend uses to reject a malformed destination number.
const INVALID_NUMBER_ERROR: &str = "invalid-phonenumber";

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    /// POST a JSON body. Implementations must send both `Content-Type` and
    /// `Accept` as `application/json`.
    fn post_json<'a>(
        &'a self,
        url: &'a str,
        body: &'a str,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn post_json<'a>(
        &'a self,
        url: &'a str,
        body: &'a str,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let response = self
                .client
                .post(url)
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .header(reqwest::header::ACCEPT, "application/json")
                .body(body.to_owned())
                .send()
                .await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`SmsRestClient`].
///
/// A rejected phone number is not an error; [`SmsRestClient::send_sms`]
/// reports it as `Ok(false)`. Errors cover everything the caller cannot
/// recover from by fixing the destination number.
pub enum SmsRestError {
    /// The backend misbehaved or was unreachable: an unexpected HTTP status,
    /// an unrecognized error body, or a transport-level failure. The
    /// underlying cause is logged at warn level and deliberately kept out of
    /// this message.
    #[error("external service error: failed to send SMS through the REST backend")]
    ExternalService,

    /// The underlying HTTP client could not be constructed.
    #[error("failed to construct HTTP client: {0}")]
    Build(#[source] Box<dyn StdError + Send + Sync>),

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Clone)]
/// Builder for [`SmsRestClient`].
///
/// Use this when you need to set an HTTP timeout or user-agent; the endpoint
/// itself is always required. Retry and pooling policy stay with the
/// underlying HTTP client.
pub struct SmsRestClientBuilder {
    endpoint: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl SmsRestClientBuilder {
    /// Create a builder targeting the given send endpoint.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: None,
            user_agent: None,
        }
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`SmsRestClient`].
    pub fn build(self) -> Result<SmsRestClient, SmsRestError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| SmsRestError::Build(Box::new(err)))?;

        Ok(SmsRestClient {
            endpoint: self.endpoint,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

#[derive(Clone)]
/// SMS sender speaking the generic REST `{to, message}` contract.
///
/// Each call issues exactly one POST to the configured endpoint and holds no
/// state between calls, so a single client can be shared freely across tasks.
pub struct SmsRestClient {
    endpoint: String,
    http: Arc<dyn HttpTransport>,
}

impl SmsRestClient {
    /// Create a client with default HTTP settings.
    ///
    /// For timeout or user-agent overrides, use [`SmsRestClient::builder`].
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(endpoint: impl Into<String>) -> SmsRestClientBuilder {
        SmsRestClientBuilder::new(endpoint)
    }

    /// Send one SMS through the REST backend.
    ///
    /// Outcomes:
    /// - `Ok(true)` — HTTP 200, the message was accepted (body ignored),
    /// - `Ok(false)` — HTTP 400 with `{"error": "invalid-phonenumber"}`, the
    ///   expected rejection for a number the backend cannot deliver to,
    /// - [`SmsRestError::ExternalService`] — any other status or body, a 400
    ///   whose body cannot be parsed, or a transport failure. Details are
    ///   logged at warn level and never surface in the error itself.
    pub async fn send_sms(&self, request: SendSms) -> Result<bool, SmsRestError> {
        trace!(to = request.to().as_str(), "sending SMS using REST");

        let body = crate::transport::encode_send_sms_json(&request);

        let response = match self.http.post_json(&self.endpoint, &body).await {
            Ok(response) => response,
            Err(err) => {
                warn!(error = %err, "error when communicating with SMS REST backend");
                return Err(SmsRestError::ExternalService);
            }
        };

        if response.status == 200 {
            return Ok(true);
        }

        let error_code = crate::transport::decode_error_code(&response.body);

        if response.status == 400 && error_code == INVALID_NUMBER_ERROR {
            debug!("invalid phone number when attempting to send SMS");
            return Ok(false);
        }

        warn!(
            status = response.status,
            error_code = error_code.as_str(),
            "failed to send SMS through REST backend"
        );
        Err(SmsRestError::ExternalService)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use serde_json::Value;

    use crate::domain::{MessageText, PhoneNumber};

    use super::*;

    #[derive(Debug, Clone)]
    struct FakeTransport {
        state: Arc<Mutex<FakeTransportState>>,
    }

    #[derive(Debug)]
    struct FakeTransportState {
        requests: Vec<(String, String)>,
        response_status: u16,
        response_body: String,
        fail_with: Option<String>,
    }

    impl FakeTransport {
        fn new(response_status: u16, response_body: impl Into<String>) -> Self {
            Self {
                state: Arc::new(Mutex::new(FakeTransportState {
                    requests: Vec::new(),
                    response_status,
                    response_body: response_body.into(),
                    fail_with: None,
                })),
            }
        }

        fn failing(message: impl Into<String>) -> Self {
            let transport = Self::new(0, "");
            transport.state.lock().unwrap().fail_with = Some(message.into());
            transport
        }

        fn requests(&self) -> Vec<(String, String)> {
            self.state.lock().unwrap().requests.clone()
        }
    }

    impl HttpTransport for FakeTransport {
        fn post_json<'a>(
            &'a self,
            url: &'a str,
            body: &'a str,
        ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
            Box::pin(async move {
                let (status, response_body, fail_with) = {
                    let mut state = self.state.lock().unwrap();
                    state.requests.push((url.to_owned(), body.to_owned()));
                    (
                        state.response_status,
                        state.response_body.clone(),
                        state.fail_with.clone(),
                    )
                };
                if let Some(message) = fail_with {
                    return Err(message.into());
                }
                Ok(HttpResponse {
                    status,
                    body: response_body,
                })
            })
        }
    }

    fn make_client(transport: FakeTransport) -> SmsRestClient {
        SmsRestClient {
            endpoint: "https://example.invalid/sms".to_owned(),
            http: Arc::new(transport),
        }
    }

    fn request(to: &str, message: &str) -> SendSms {
        SendSms::new(
            PhoneNumber::new(to).unwrap(),
            MessageText::new(message).unwrap(),
        )
    }

    #[tokio::test]
    async fn send_sms_returns_true_on_200_and_posts_two_field_envelope() {
        let transport = FakeTransport::new(200, r#"{"id":"msg-1","queued":true}"#);
        let client = make_client(transport.clone());

        let accepted = client
            .send_sms(request("+46701234567", "hello"))
            .await
            .unwrap();
        assert!(accepted);

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].0, "https://example.invalid/sms");

        let body: Value = serde_json::from_str(&requests[0].1).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"to": "+46701234567", "message": "hello"})
        );
    }

    #[tokio::test]
    async fn send_sms_returns_false_on_recognized_invalid_number() {
        let transport = FakeTransport::new(400, r#"{"error":"invalid-phonenumber"}"#);
        let client = make_client(transport);

        let accepted = client.send_sms(request("12345", "hello")).await.unwrap();
        assert!(!accepted);
    }

    #[tokio::test]
    async fn send_sms_treats_unrecognized_400_error_code_as_fault() {
        let transport = FakeTransport::new(400, r#"{"error":"quota-exceeded"}"#);
        let client = make_client(transport);

        let err = client
            .send_sms(request("+46701234567", "hello"))
            .await
            .unwrap_err();
        assert!(matches!(err, SmsRestError::ExternalService));
    }

    #[tokio::test]
    async fn send_sms_treats_malformed_400_body_as_fault() {
        for body in ["<html>Bad Request</html>", "", r#"{"status":"rejected"}"#] {
            let transport = FakeTransport::new(400, body);
            let client = make_client(transport);

            let err = client
                .send_sms(request("+46701234567", "hello"))
                .await
                .unwrap_err();
            assert!(matches!(err, SmsRestError::ExternalService), "body: {body:?}");
        }
    }

    #[tokio::test]
    async fn send_sms_treats_server_error_as_fault() {
        let transport = FakeTransport::new(500, r#"{"error":"invalid-phonenumber"}"#);
        let client = make_client(transport);

        let err = client
            .send_sms(request("+46701234567", "hello"))
            .await
            .unwrap_err();
        assert!(matches!(err, SmsRestError::ExternalService));
    }

    #[tokio::test]
    async fn send_sms_maps_transport_failure_to_generic_fault() {
        let transport = FakeTransport::failing("connection reset by peer");
        let client = make_client(transport);

        let err = client
            .send_sms(request("+46701234567", "hello"))
            .await
            .unwrap_err();
        assert!(matches!(err, SmsRestError::ExternalService));
        assert!(!err.to_string().contains("connection reset"));
    }

    #[tokio::test]
    async fn repeated_sends_issue_independent_identical_requests() {
        let transport = FakeTransport::new(200, "");
        let client = make_client(transport.clone());

        let req = request("+46701234567", "hello");
        assert!(client.send_sms(req.clone()).await.unwrap());
        assert!(client.send_sms(req).await.unwrap());

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0], requests[1]);
    }

    #[test]
    fn builder_applies_endpoint_and_http_overrides() {
        let client = SmsRestClient::builder("https://example.invalid/sms")
            .timeout(Duration::from_secs(5))
            .user_agent("smsrest-test")
            .build()
            .unwrap();
        assert_eq!(client.endpoint, "https://example.invalid/sms");
    }
}
