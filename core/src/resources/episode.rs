use serde::Serialize;

use super::{Collection, ResourceIdentity};
use crate::client::{Megaphone, NO_BODY};
use crate::error::{ConnectionError, ErrorKind};
use crate::http::HttpMethod;
use crate::record::Record;

/// Episodes of one podcast, or of the whole organization when created
/// through `Megaphone::episodes`.
///
/// The organization-wide collection can only list and search; operations
/// on a single episode fail with `ErrorKind::MissingIdentity` because the
/// episode URL needs the podcast id.
#[derive(Debug, Clone)]
pub struct EpisodeCollection {
    client: Megaphone,
    identity: ResourceIdentity,
}

impl EpisodeCollection {
    pub(crate) fn new(client: Megaphone, identity: ResourceIdentity) -> Self {
        Self { client, identity }
    }

    /// The podcast this collection is scoped to, if any.
    pub fn podcast_id(&self) -> Option<&str> {
        self.identity.podcast_id.as_deref()
    }

    pub fn list(&self) -> Result<Vec<Record>, ConnectionError> {
        self.list_with(&[])
    }

    pub fn list_with(&self, params: &[(&str, &str)]) -> Result<Vec<Record>, ConnectionError> {
        self.client
            .call_list(Collection::Episodes, &self.identity, params)
    }

    /// Episodes whose fields match `params`, e.g. `[("externalId", "abc")]`.
    pub fn search(&self, params: &[(&str, &str)]) -> Result<Vec<Record>, ConnectionError> {
        self.list_with(params)
    }

    pub fn find(&self, id: &str) -> Result<Record, ConnectionError> {
        self.episode(id).find()
    }

    pub fn create<B: Serialize + ?Sized>(&self, attributes: &B) -> Result<Record, ConnectionError> {
        if self.identity.podcast_id.is_none() {
            return Err(self.missing_podcast(HttpMethod::Post));
        }
        self.client.call(
            HttpMethod::Post,
            Collection::Episodes,
            &self.identity,
            &[],
            Some(attributes),
        )
    }

    pub fn update<B: Serialize + ?Sized>(
        &self,
        id: &str,
        attributes: &B,
    ) -> Result<Record, ConnectionError> {
        self.episode(id).update(attributes)
    }

    pub fn delete(&self, id: &str) -> Result<Record, ConnectionError> {
        self.episode(id).delete()
    }

    fn episode(&self, id: &str) -> Episode {
        Episode::new(
            self.client.clone(),
            ResourceIdentity {
                podcast_id: self.identity.podcast_id.clone(),
                episode_id: Some(id.to_string()),
            },
        )
    }

    fn missing_podcast(&self, method: HttpMethod) -> ConnectionError {
        ConnectionError::new(
            ErrorKind::MissingIdentity,
            "creating an episode needs a podcast id",
            method,
            self.client.config().api_base_url,
        )
    }
}

/// One episode, addressed by podcast id and episode id.
#[derive(Debug, Clone)]
pub struct Episode {
    client: Megaphone,
    identity: ResourceIdentity,
}

impl Episode {
    pub(crate) fn new(client: Megaphone, identity: ResourceIdentity) -> Self {
        Self { client, identity }
    }

    pub fn podcast_id(&self) -> &str {
        self.identity.podcast_id.as_deref().unwrap_or_default()
    }

    pub fn id(&self) -> &str {
        self.identity.episode_id.as_deref().unwrap_or_default()
    }

    pub fn find(&self) -> Result<Record, ConnectionError> {
        self.client.call(
            HttpMethod::Get,
            Collection::Episodes,
            &self.identity,
            &[],
            NO_BODY,
        )
    }

    pub fn update<B: Serialize + ?Sized>(&self, attributes: &B) -> Result<Record, ConnectionError> {
        self.client.call(
            HttpMethod::Put,
            Collection::Episodes,
            &self.identity,
            &[],
            Some(attributes),
        )
    }

    pub fn delete(&self) -> Result<Record, ConnectionError> {
        self.client.call(
            HttpMethod::Delete,
            Collection::Episodes,
            &self.identity,
            &[],
            NO_BODY,
        )
    }
}
