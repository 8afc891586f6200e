//! Calendar events

use serde::Deserialize;
use unifind_domain::{
    ApiRequest,
    resources::{EventUpdate, NewEvent, UniEvent},
};

use super::segment;
use crate::auth::AuthenticatedClient;
use crate::error::ApplicationResult;
use crate::ports::HttpTransport;

/// The listing is either a bare array or wrapped in `{"events": [...]}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum EventList {
    Plain(Vec<UniEvent>),
    Wrapped { events: Vec<UniEvent> },
}

impl From<EventList> for Vec<UniEvent> {
    fn from(list: EventList) -> Self {
        match list {
            EventList::Plain(events) | EventList::Wrapped { events } => events,
        }
    }
}

/// Access to `/events`. Reads are public, writes need a session.
pub struct EventsApi<T: HttpTransport> {
    authed: AuthenticatedClient<T>,
}

impl<T: HttpTransport> EventsApi<T> {
    /// Creates the client.
    #[must_use]
    pub const fn new(authed: AuthenticatedClient<T>) -> Self {
        Self { authed }
    }

    /// Lists all events.
    ///
    /// # Errors
    ///
    /// Returns any pipeline error.
    pub async fn list(&self) -> ApplicationResult<Vec<UniEvent>> {
        let list: EventList = self
            .authed
            .auth()
            .client()
            .send_json(ApiRequest::get("/events"))
            .await?;
        Ok(list.into())
    }

    /// Reads one event.
    ///
    /// # Errors
    ///
    /// Returns `Domain` for an unusable id, otherwise any pipeline error.
    pub async fn get(&self, id: &str) -> ApplicationResult<UniEvent> {
        let path = format!("/events/{}", segment(id)?);
        self.authed.auth().client().send_json(ApiRequest::get(path)).await
    }

    /// Creates an event.
    ///
    /// # Errors
    ///
    /// Returns `Domain` if the payload is invalid, otherwise any facade error.
    pub async fn create(&self, event: &NewEvent) -> ApplicationResult<UniEvent> {
        event.validate()?;
        self.authed.post("/events", event).await
    }

    /// Edits an event.
    ///
    /// # Errors
    ///
    /// Returns `Domain` if the payload is invalid, otherwise any facade error.
    pub async fn update(&self, id: &str, update: &EventUpdate) -> ApplicationResult<UniEvent> {
        update.validate()?;
        self.authed.put(&format!("/events/{}", segment(id)?), update).await
    }

    /// Deletes an event.
    ///
    /// # Errors
    ///
    /// Returns any facade error.
    pub async fn delete(&self, id: &str) -> ApplicationResult<()> {
        self.authed.delete(&format!("/events/{}", segment(id)?)).await
    }
}
