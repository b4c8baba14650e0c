//! Blocking HTTP client for the event API.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use chrono::SecondsFormat;
use reqwest::blocking::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::api::dto::{ApiResponse, CreateEventPayload, UpdateEventPayload};
use crate::layout::DateRange;
use crate::models::event::Event;
use crate::services::source::EventSource;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct ApiClient {
    base_url: String,
    http: Client,
}

impl ApiClient {
    /// `base_url` is the server root, e.g. `http://127.0.0.1:5000`.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn events_url(&self) -> String {
        format!("{}/api/events", self.base_url)
    }

    fn event_url(&self, id: i64) -> String {
        format!("{}/api/events/{}", self.base_url, id)
    }

    pub fn list_events(&self, range: Option<DateRange>) -> Result<Vec<Event>> {
        let mut request = self.http.get(self.events_url());
        if let Some(range) = range {
            request = request.query(&[
                ("start", range.start.to_rfc3339_opts(SecondsFormat::Millis, true)),
                ("end", range.end.to_rfc3339_opts(SecondsFormat::Millis, true)),
            ]);
        }
        Ok(send::<Vec<Event>>(request)?.unwrap_or_default())
    }

    pub fn get_event(&self, id: i64) -> Result<Event> {
        send(self.http.get(self.event_url(id)))?.ok_or_else(|| anyhow!("Event not found"))
    }

    pub fn create_event(&self, payload: &CreateEventPayload) -> Result<Event> {
        send(self.http.post(self.events_url()).json(payload))?
            .ok_or_else(|| anyhow!("Failed to create event"))
    }

    pub fn update_event(&self, id: i64, payload: &UpdateEventPayload) -> Result<Event> {
        send(self.http.put(self.event_url(id)).json(payload))?
            .ok_or_else(|| anyhow!("Failed to update event"))
    }

    pub fn delete_event(&self, id: i64) -> Result<()> {
        send::<serde_json::Value>(self.http.delete(self.event_url(id)))?;
        Ok(())
    }
}

impl EventSource for ApiClient {
    fn list_events(&self, range: Option<DateRange>) -> Result<Vec<Event>> {
        ApiClient::list_events(self, range)
    }
}

/// Send `request` and unwrap the envelope, surfacing the server's message
/// on failure.
fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<Option<T>> {
    let response = request.send().context("Request to event API failed")?;
    let status = response.status();

    let envelope: ApiResponse<T> = response
        .json()
        .with_context(|| format!("Unreadable response from event API ({})", status))?;

    if !status.is_success() || !envelope.success {
        let message = envelope
            .message
            .unwrap_or_else(|| "An unexpected error occurred".to_string());
        log::warn!("API error ({}): {}", status, message);
        return Err(anyhow!(message));
    }

    Ok(envelope.data)
}
