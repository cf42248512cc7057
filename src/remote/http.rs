//! HTTP implementation of [`TicketService`] over reqwest.

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::config::Config;
use crate::error::{DeskError, Result};
use crate::types::{Ticket, TicketUpdate};

use super::{
    ApiError, NewTicket, SUGGEST_PATH, SuggestRequest, SuggestResponse, TICKETS_PATH,
    TicketService,
};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct HttpTicketService {
    client: Client,
    base_url: Url,
}

impl HttpTicketService {
    /// Create a client from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.api_url(), config.timeout())
    }

    /// Create a client for the service at `base_url`.
    ///
    /// `timeout` bounds each whole request; expiry surfaces as a network failure.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let mut base_url = Url::parse(base_url)
            .map_err(|e| DeskError::Config(format!("invalid API URL '{}': {}", base_url, e)))?;

        // Url::join replaces the last segment unless the path ends in '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(CONNECT_TIMEOUT.min(timeout))
            .build()?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| DeskError::Config(format!("invalid endpoint '{}': {}", path, e)))
    }

    /// Send a request and decode a JSON body from a 2xx response
    async fn send<T: DeserializeOwned>(&self, path: &str, request: RequestBuilder) -> Result<T> {
        let response = request
            .send()
            .await
            .map_err(|e| transport_error(path, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::with_status(path, status, &body).into());
        }

        response.json::<T>().await.map_err(|e| {
            if e.is_timeout() {
                transport_error(path, e).into()
            } else {
                ApiError::new(path, format!("invalid response body: {e}")).into()
            }
        })
    }
}

fn transport_error(path: &str, err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::new(path, format!("request timed out: {err}"))
    } else {
        ApiError::new(path, err.to_string())
    }
}

impl TicketService for HttpTicketService {
    async fn list_tickets(&self) -> Result<Vec<Ticket>> {
        let url = self.endpoint(TICKETS_PATH)?;
        debug!(%url, "fetching tickets");
        self.send(TICKETS_PATH, self.client.get(url)).await
    }

    async fn create_ticket(&self, ticket: &NewTicket) -> Result<Ticket> {
        let url = self.endpoint(TICKETS_PATH)?;
        debug!(%url, source = %ticket.source, "creating ticket");
        self.send(TICKETS_PATH, self.client.post(url).json(ticket))
            .await
    }

    async fn update_ticket(&self, id: u64, update: &TicketUpdate) -> Result<Ticket> {
        let path = format!("{}/{}", TICKETS_PATH, id);
        let url = self.endpoint(&path)?;
        debug!(%url, ?update, "updating ticket");
        self.send(&path, self.client.patch(url).json(update)).await
    }

    async fn suggest_response(&self, text: &str) -> Result<String> {
        let url = self.endpoint(SUGGEST_PATH)?;
        debug!(%url, "requesting suggestion");
        let response: SuggestResponse = self
            .send(
                SUGGEST_PATH,
                self.client.post(url).json(&SuggestRequest { text }),
            )
            .await?;

        response
            .suggestion
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| ApiError::new(SUGGEST_PATH, "response has no suggestion").into())
    }
}
