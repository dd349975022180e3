use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use tax_core::source::{BracketSourceFactory, SourceConfig};
use tax_core::{BracketSource, SourceError, TaxBracket, check_brackets};
use tracing::{debug, error, warn};

/// Success body of `GET /tax-calculator/tax-year/{year}`.
#[derive(Debug, Deserialize)]
struct TaxYearBody {
    tax_brackets: Vec<TaxBracket>,
}

/// Failure body; only the first error's message is surfaced.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<ErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct ErrorEntry {
    message: Option<String>,
}

/// Turns a tax-year response into a checked bracket schedule.
///
/// Non-2xx responses surface `errors[0].message` when the body carries
/// one and fall back to [`SourceError::Status`] otherwise.
pub fn decode_response(
    status: u16,
    body: &[u8],
) -> Result<Vec<TaxBracket>, SourceError> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .and_then(|body| body.errors.into_iter().next())
            .and_then(|entry| entry.message)
            .filter(|message| !message.trim().is_empty());

        warn!(status, ?message, "bracket service rejected request");
        return Err(match message {
            Some(message) => SourceError::Rejected(message),
            None => SourceError::Status(status),
        });
    }

    let parsed: TaxYearBody = serde_json::from_slice(body)
        .map_err(|e| SourceError::Malformed(format!("unreadable tax year body: {e}")))?;
    check_brackets(&parsed.tax_brackets)?;
    Ok(parsed.tax_brackets)
}

fn transport_error(err: reqwest::Error) -> SourceError {
    error!(error = %err, "tax bracket request failed");
    if err.is_timeout() {
        SourceError::Transport("Request to the tax bracket service timed out.".to_string())
    } else if err.is_connect() {
        SourceError::Transport("Could not reach the tax bracket service.".to_string())
    } else {
        SourceError::Transport(err.to_string())
    }
}

/// Client for the remote tax-year service.
#[derive(Debug, Clone)]
pub struct HttpBracketSource {
    base_url: Url,
    client: reqwest::Client,
}

impl HttpBracketSource {
    /// `base_url` is the service root, e.g. `http://localhost:5001`.
    pub fn new(
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::Configuration(format!("cannot build HTTP client: {e}")))?;

        Self::with_client(base_url, client)
    }

    /// Like [`HttpBracketSource::new`] but with a caller-built client.
    pub fn with_client(
        base_url: &str,
        client: reqwest::Client,
    ) -> Result<Self, SourceError> {
        let parsed = Url::parse(base_url.trim_end_matches('/')).map_err(|e| {
            SourceError::Configuration(format!("invalid service url '{base_url}': {e}"))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(SourceError::Configuration(format!(
                "service url must be http or https, got '{base_url}'"
            )));
        }

        Ok(Self {
            base_url: parsed,
            client,
        })
    }

    /// Address of the schedule for `tax_year`.
    pub fn tax_year_url(&self, tax_year: i32) -> String {
        format!(
            "{}/tax-calculator/tax-year/{tax_year}",
            self.base_url.as_str().trim_end_matches('/')
        )
    }
}

#[async_trait]
impl BracketSource for HttpBracketSource {
    fn describe(&self) -> String {
        format!("http {}", self.base_url)
    }

    async fn get_tax_brackets(&self, tax_year: i32) -> Result<Vec<TaxBracket>, SourceError> {
        let url = self.tax_year_url(tax_year);
        debug!(%url, "fetching tax brackets");

        let response = self.client.get(&url).send().await.map_err(transport_error)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(transport_error)?;

        let brackets = decode_response(status, &body)?;
        debug!(tax_year, count = brackets.len(), "received tax brackets");
        Ok(brackets)
    }
}

/// Registers the `http` backend.
pub struct HttpSourceFactory;

#[async_trait]
impl BracketSourceFactory for HttpSourceFactory {
    fn backend_name(&self) -> &'static str {
        "http"
    }

    async fn create(&self, config: &SourceConfig) -> Result<Box<dyn BracketSource>, SourceError> {
        let source =
            HttpBracketSource::new(&config.location, Duration::from_secs(config.timeout_secs))?;
        Ok(Box::new(source))
    }
}
