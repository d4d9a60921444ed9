use crate::config::WatchConfig;
use crate::domain::ports::ResultSource;
use crate::utils::error::{ErrorKind, Result, ResultExt, WatchError};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, REFERER, USER_AGENT};
use reqwest::{Client, StatusCode};
use url::Url;

pub const RESULTS_PATH: &str = "resultado_classificacao";
pub const SUBMIT_LABEL: &str = "Verificar";
/// A real results page is always far larger than this.
pub const MIN_BODY_CHARS: usize = 100;

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64)";
const BROWSER_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
const BROWSER_ACCEPT_LANGUAGE: &str = "pt-BR,pt;q=0.9";

/// Fetches the classification page: one GET for session cookies, then the
/// form POST on the same client.
pub struct DaycareResultFetcher {
    client: Client,
    base_url: Url,
    results_url: Url,
    ne: String,
    da: String,
}

impl DaycareResultFetcher {
    pub fn new(config: &WatchConfig) -> Result<Self> {
        let base_url = Url::parse(&config.settings.base_url).map_err(|e| {
            WatchError::InvalidConfigValueError {
                field: "base_url".to_string(),
                value: config.settings.base_url.clone(),
                reason: e.to_string(),
            }
        })?;
        let results_url = base_url
            .join(RESULTS_PATH)
            .map_err(|e| WatchError::ConfigError {
                message: format!("cannot build results URL from {}: {}", base_url, e),
            })?;

        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
        headers.insert(ACCEPT, HeaderValue::from_static(BROWSER_ACCEPT));
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static(BROWSER_ACCEPT_LANGUAGE),
        );
        let referer =
            HeaderValue::from_str(base_url.as_str()).map_err(|e| WatchError::ConfigError {
                message: format!("base URL is not a valid Referer header: {}", e),
            })?;
        headers.insert(REFERER, referer);

        let client = Client::builder()
            .cookie_store(true)
            .default_headers(headers)
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            base_url,
            results_url,
            ne: config.ne.clone(),
            da: config.da.clone(),
        })
    }

    async fn open_session(&self) -> Result<()> {
        tracing::debug!("Opening session at {}", self.base_url);
        let response = self
            .client
            .get(self.base_url.clone())
            .send()
            .await?
            .error_for_status()?;
        tracing::debug!("Session response status: {}", response.status());
        Ok(())
    }

    async fn submit_form(&self) -> Result<String> {
        tracing::debug!("Submitting results form to {}", self.results_url);
        let response = self
            .client
            .post(self.results_url.clone())
            .form(&[
                ("ne", self.ne.as_str()),
                ("da", self.da.as_str()),
                ("entrar", SUBMIT_LABEL),
            ])
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Results response status: {}", status);
        if status != StatusCode::OK {
            return Err(WatchError::FetchError {
                message: format!("unexpected HTTP status: {}", status),
            });
        }

        let body = response.bytes().await?;
        let html = String::from_utf8_lossy(&body).into_owned();
        check_body(&html)?;
        Ok(html)
    }

    async fn fetch(&self) -> Result<String> {
        self.open_session().await.context(
            ErrorKind::Fetch,
            format!("Initial GET failed ({})", self.base_url),
        )?;
        self.submit_form()
            .await
            .context(ErrorKind::Fetch, "Form POST failed")
    }
}

fn check_body(html: &str) -> Result<()> {
    if html.chars().count() < MIN_BODY_CHARS {
        return Err(WatchError::FetchError {
            message: "empty or too-short response".to_string(),
        });
    }
    Ok(())
}

#[async_trait]
impl ResultSource for DaycareResultFetcher {
    async fn fetch_html(&self) -> Result<String> {
        let html = self
            .fetch()
            .await
            .context(ErrorKind::Fetch, "Error fetching daycare result")?;
        tracing::info!("Fetched results page ({} bytes)", html.len());
        Ok(html)
    }
}
