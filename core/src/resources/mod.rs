//! Resource accessors and the URL scheme they share.
//!
//! Podcasts live under `networks/{network_id}`. Episodes nest under their
//! podcast, except for organization-wide listing and search, which use
//! `organizations/{organization_id}/episodes`.

mod episode;
mod podcast;

pub use episode::{Episode, EpisodeCollection};
pub use podcast::{Podcast, PodcastCollection};

use url::Url;

use crate::config::ClientConfig;
use crate::error::{ConnectionError, ErrorKind};
use crate::http::HttpMethod;

/// Which collection a URL addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Collection {
    Podcasts,
    Episodes,
}

/// Ids an accessor carries. Which ones are set decides the URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceIdentity {
    pub podcast_id: Option<String>,
    pub episode_id: Option<String>,
}

impl ResourceIdentity {
    pub fn podcast(podcast_id: impl Into<String>) -> Self {
        Self {
            podcast_id: Some(podcast_id.into()),
            episode_id: None,
        }
    }

    pub fn episode(podcast_id: impl Into<String>, episode_id: impl Into<String>) -> Self {
        Self {
            podcast_id: Some(podcast_id.into()),
            episode_id: Some(episode_id.into()),
        }
    }

    /// Absolute URL for `collection` under the configured base URL.
    ///
    /// `method` only feeds the error, so a failure reads like any other
    /// request failure.
    pub(crate) fn url(
        &self,
        config: &ClientConfig,
        collection: Collection,
        method: HttpMethod,
    ) -> Result<String, ConnectionError> {
        let segments = self.segments(config, collection).ok_or_else(|| {
            ConnectionError::new(
                ErrorKind::MissingIdentity,
                "episode operations on a single episode need a podcast id",
                method,
                &config.api_base_url,
            )
        })?;

        let invalid = |description: String| {
            ConnectionError::new(ErrorKind::InvalidUrl, description, method, &config.api_base_url)
        };
        let mut url = Url::parse(&config.api_base_url).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| invalid("base URL cannot carry a path".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url.into())
    }

    fn segments<'a>(
        &'a self,
        config: &'a ClientConfig,
        collection: Collection,
    ) -> Option<Vec<&'a str>> {
        let podcast = self.podcast_id.as_deref();
        let episode = self.episode_id.as_deref();
        let mut segments = match (collection, podcast, episode) {
            (Collection::Episodes, None, Some(_)) => return None,
            (Collection::Episodes, None, None) => {
                return Some(vec![
                    "organizations",
                    config.organization_id.as_str(),
                    "episodes",
                ])
            }
            _ => vec!["networks", config.network_id.as_str(), "podcasts"],
        };
        segments.extend(podcast);
        if collection == Collection::Episodes {
            segments.push("episodes");
            segments.extend(episode);
        }
        Some(segments)
    }
}
