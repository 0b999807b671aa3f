use serde::Serialize;

use super::{Collection, Episode, EpisodeCollection, ResourceIdentity};
use crate::client::{Megaphone, NO_BODY};
use crate::error::ConnectionError;
use crate::http::HttpMethod;
use crate::record::Record;

/// All podcasts of the configured network.
#[derive(Debug, Clone)]
pub struct PodcastCollection {
    client: Megaphone,
}

impl PodcastCollection {
    pub(crate) fn new(client: Megaphone) -> Self {
        Self { client }
    }

    pub fn list(&self) -> Result<Vec<Record>, ConnectionError> {
        self.list_with(&[])
    }

    /// Lists podcasts, passing `params` through as query parameters.
    pub fn list_with(&self, params: &[(&str, &str)]) -> Result<Vec<Record>, ConnectionError> {
        self.client
            .call_list(Collection::Podcasts, &ResourceIdentity::default(), params)
    }

    pub fn find(&self, id: &str) -> Result<Record, ConnectionError> {
        self.podcast(id).find()
    }

    pub fn create<B: Serialize + ?Sized>(&self, attributes: &B) -> Result<Record, ConnectionError> {
        self.client.call(
            HttpMethod::Post,
            Collection::Podcasts,
            &ResourceIdentity::default(),
            &[],
            Some(attributes),
        )
    }

    pub fn update<B: Serialize + ?Sized>(
        &self,
        id: &str,
        attributes: &B,
    ) -> Result<Record, ConnectionError> {
        self.podcast(id).update(attributes)
    }

    pub fn delete(&self, id: &str) -> Result<Record, ConnectionError> {
        self.podcast(id).delete()
    }

    fn podcast(&self, id: &str) -> Podcast {
        Podcast::new(self.client.clone(), id.to_string())
    }
}

/// One podcast, addressed by id.
#[derive(Debug, Clone)]
pub struct Podcast {
    client: Megaphone,
    identity: ResourceIdentity,
}

impl Podcast {
    pub(crate) fn new(client: Megaphone, id: String) -> Self {
        Self {
            client,
            identity: ResourceIdentity::podcast(id),
        }
    }

    pub fn id(&self) -> &str {
        self.identity.podcast_id.as_deref().unwrap_or_default()
    }

    pub fn find(&self) -> Result<Record, ConnectionError> {
        self.client.call(
            HttpMethod::Get,
            Collection::Podcasts,
            &self.identity,
            &[],
            NO_BODY,
        )
    }

    pub fn update<B: Serialize + ?Sized>(&self, attributes: &B) -> Result<Record, ConnectionError> {
        self.client.call(
            HttpMethod::Put,
            Collection::Podcasts,
            &self.identity,
            &[],
            Some(attributes),
        )
    }

    pub fn delete(&self) -> Result<Record, ConnectionError> {
        self.client.call(
            HttpMethod::Delete,
            Collection::Podcasts,
            &self.identity,
            &[],
            NO_BODY,
        )
    }

    /// Episodes of this podcast.
    pub fn episodes(&self) -> EpisodeCollection {
        EpisodeCollection::new(self.client.clone(), self.identity.clone())
    }

    pub fn episode(&self, id: impl Into<String>) -> Episode {
        Episode::new(
            self.client.clone(),
            ResourceIdentity::episode(self.id(), id),
        )
    }
}
