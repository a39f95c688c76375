use std::result::Result as StdResult;

use reqwest::{RequestBuilder, StatusCode};
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    #[error("reqwest: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("decoding: {0}")]
    Decoding(#[from] serde_json::Error),

    #[error("request failed with status {0}")]
    RequestFailed(StatusCode),
}

pub type Result<T = ()> = StdResult<T, HttpError>;

/// A content payload; the shape is whatever the CMS returns.
pub type Document = Value;

pub const DEFAULT_API_ROOT: &str = "http://localhost:1337";

pub enum HttpAuthentication {
    Anonymous,
    ApiToken { token: String },
}

trait AuthExt: Sized {
    fn auth(self, auth: &HttpAuthentication) -> Self;
}

impl AuthExt for RequestBuilder {
    fn auth(self, auth: &HttpAuthentication) -> Self {
        match auth {
            HttpAuthentication::Anonymous => self,
            HttpAuthentication::ApiToken { token } => {
                self.header("Authorization", format!("Bearer {}", token))
            }
        }
    }
}

macro_rules! ep {
    ($self:ident, $ep:literal $($args:tt)*) => {
        format!(concat!("{}", $ep), $self.api_root, $($args)*)
    };
}

pub struct Http {
    api_root: String,
    auth: HttpAuthentication,
    client: reqwest::Client,
}

impl Http {
    pub fn new(auth: HttpAuthentication) -> Self {
        Self::with_api_root(DEFAULT_API_ROOT, auth)
    }

    pub fn with_api_root(api_root: impl Into<String>, auth: HttpAuthentication) -> Self {
        Self {
            api_root: api_root.into(),
            auth,
            client: reqwest::Client::new(),
        }
    }

    /// Builds a client from `STRAPI_URL` and `STRAPI_API_KEY`; an unset or
    /// empty url falls back to [`DEFAULT_API_ROOT`], an unset or empty key
    /// means anonymous.
    pub fn from_env() -> Self {
        let api_root = std::env::var("STRAPI_URL")
            .ok()
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_ROOT.to_string());
        let auth = match std::env::var("STRAPI_API_KEY").ok().filter(|k| !k.is_empty()) {
            Some(token) => HttpAuthentication::ApiToken { token },
            None => HttpAuthentication::Anonymous,
        };

        Self::with_api_root(api_root, auth)
    }

    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    /// Fetches the home page single type, with all relations populated.
    pub async fn fetch_home_page(&self) -> Result<Document> {
        let url = ep!(self, "/api/home-page?populate=*");
        tracing::debug!("GET {}", url);

        let response = self.client.get(url).auth(&self.auth).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("home page request failed: {}", status);
            return Err(HttpError::RequestFailed(status));
        }

        let body = response.bytes().await?;
        let body: Value = serde_json::from_slice(&body)?;

        // The envelope is `{ "data": <payload> }`; a body without a `data`
        // field passes through as null instead of failing.
        Ok(body.get("data").cloned().unwrap_or(Value::Null))
    }
}
