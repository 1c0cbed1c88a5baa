//! Library layer for spacelaunch: cached query client, the pagination
//! controller behind the infinite-scroll list, list presentation helpers,
//! and thumbnail loading.
//!
//! Wraps the `spacelaunch_api` GraphQL client with an in-memory TTL cache
//! and transport retry, and exposes it as a [`PageSource`] so the
//! [`PaginationController`] can be driven against the real endpoint or a
//! test double.

pub mod cache;
pub mod client;
pub mod error;
pub mod pagination;
pub mod presenter;
pub mod thumbnail;
pub mod validation;

pub use spacelaunch_api;
pub use spacelaunch_api::types;
pub use spacelaunch_api::{LaunchListQuery, Query, DEFAULT_ENDPOINT};

pub use client::{CachedClient, RetryConfig};
pub use error::SpaceLaunchError;
pub use pagination::{
    Applied, Page, PageRequest, PageSource, PaginationController, PaginationState,
};
pub use presenter::{is_near_end, ListPresenter, ListRow, ToListRow, Viewport};
pub use thumbnail::{
    ImageLoader, Thumbnail, ThumbnailSize, ThumbnailSlot, ThumbnailTicket, MAX_IMAGE_BYTES,
    THUMBNAIL_SIZE,
};
