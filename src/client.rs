use crate::{Error, Result};
use reqwest::Client;
use std::time::Duration;

/// Client identifier sent with every request. Mushroom Observer rejects
/// requests without a descriptive user agent.
pub const USER_AGENT: &str = concat!("mycodata/", env!("CARGO_PKG_VERSION"));

/// HTTP client wrapper for the data export endpoints
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    /// Create a new HTTP client
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Get the underlying reqwest client
    #[must_use]
    pub const fn inner(&self) -> &Client {
        &self.client
    }

    /// Build full URL from endpoint
    #[must_use]
    pub fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint)
    }

    /// Execute GET request and return the response body as text
    pub async fn get_text(&self, endpoint: &str) -> Result<String> {
        let url = self.url(endpoint);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                url,
            });
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn get_text_returns_body_on_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/names.csv"))
            .respond_with(ResponseTemplate::new(200).set_body_string("id\tname\n1\tAgaricus\n"))
            .mount(&server)
            .await;

        let client = HttpClient::new(server.uri());
        let body = client.get_text("names.csv").await.unwrap();

        assert!(body.starts_with("id\tname"));
    }

    #[tokio::test]
    async fn get_text_surfaces_status_on_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/names.csv"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let client = HttpClient::new(server.uri());
        let err = client.get_text("names.csv").await.unwrap_err();

        match err {
            Error::Http { status, url } => {
                assert_eq!(status, 403);
                assert!(url.ends_with("/names.csv"));
            }
            other => panic!("expected Http error, got {other:?}"),
        }
    }
}
