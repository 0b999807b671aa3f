//! Writable attributes for podcasts and episodes.
//!
//! # Design
//! Accessors take any `Serialize` payload, so these structs are optional
//! sugar over `serde_json::json!`. Every field is optional and omitted from
//! the JSON when `None`, which makes the same struct usable for create and
//! for partial updates. Field names follow Megaphone's camelCase.

use serde::{Deserialize, Serialize};

/// Attributes accepted when creating or updating a podcast.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodcastAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explicit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub podcast_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub itunes_categories: Option<Vec<String>>,
}

/// Attributes accepted when creating or updating an episode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// RFC 3339 publication time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pubdate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_audio_file_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_count: Option<u32>,
    /// Seconds into the audio where mid-roll ads may be inserted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insertion_points: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub episode_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub episode_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explicit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_attributes_serialize_to_empty_object() {
        let json = serde_json::to_value(PodcastAttributes::default()).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }

    #[test]
    fn podcast_fields_use_camel_case() {
        let attrs = PodcastAttributes {
            title: Some("Show".to_string()),
            owner_email: Some("host@example.com".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&attrs).unwrap();
        assert_eq!(json["title"], "Show");
        assert_eq!(json["ownerEmail"], "host@example.com");
        assert!(json.get("owner_email").is_none());
        assert!(json.get("subtitle").is_none());
    }

    #[test]
    fn episode_partial_update_only_sends_set_fields() {
        let attrs = EpisodeAttributes {
            background_audio_file_url: Some("https://cdn.test/a.mp3".to_string()),
            insertion_points: Some(vec![30.0, 612.5]),
            draft: Some(false),
            ..Default::default()
        };
        let json = serde_json::to_value(&attrs).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 3);
        assert_eq!(json["backgroundAudioFileUrl"], "https://cdn.test/a.mp3");
        assert_eq!(json["insertionPoints"][1], 612.5);
        assert_eq!(json["draft"], false);
    }

    #[test]
    fn episode_attributes_accept_missing_fields() {
        let attrs: EpisodeAttributes =
            serde_json::from_str(r#"{"title":"Pilot","preCount":1}"#).unwrap();
        assert_eq!(attrs.title.as_deref(), Some("Pilot"));
        assert_eq!(attrs.pre_count, Some(1));
        assert!(attrs.pubdate.is_none());
    }
}
