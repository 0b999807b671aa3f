//! Blocking client for the Megaphone podcast-hosting API.
//!
//! # Overview
//! Configure a `Megaphone` handle once with a `ClientConfig`, then ask it for
//! accessors: `podcasts()`, `podcast(id)`, `podcast(id).episodes()`,
//! `podcast(id).episode(id)` and the organization-wide `episodes()`. Every
//! accessor operation performs exactly one HTTP request and returns the
//! decoded JSON as a schema-less `Record`, or a `ConnectionError`.
//!
//! ```no_run
//! use megaphone_client::{ClientConfig, Megaphone};
//!
//! let megaphone = Megaphone::configure(ClientConfig::new("1234", "5678", "910"));
//! let podcast = megaphone.podcast("12345").find()?;
//! println!("{}", podcast["title"]);
//! # Ok::<(), megaphone_client::ConnectionError>(())
//! ```
//!
//! # Design
//! - `Megaphone` holds the config behind a lock; URLs and headers are rebuilt
//!   from it on every request, so `reconfigure` never leaves stale state.
//! - Requests and responses are plain data (`HttpRequest`, `HttpResponse`);
//!   the network round-trip sits behind the `Transport` trait, with
//!   `UreqTransport` as the default.
//! - No retries, pagination or caching: one call, one request, one page.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod record;
pub mod resources;
pub mod types;

pub use client::Megaphone;
pub use config::{ClientConfig, DEFAULT_API_BASE_URL};
pub use error::{ConnectionError, ErrorKind};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError, UreqTransport};
pub use record::Record;
pub use resources::{Episode, EpisodeCollection, Podcast, PodcastCollection, ResourceIdentity};
pub use types::{EpisodeAttributes, PodcastAttributes};
