//! Catalog content store.
//!
//! Relational store for yachts, destinations, their many-to-many links, and
//! transcoded image assets, exposing keyed lookup-or-create operations.

pub mod schema;
pub mod store;
pub mod types;

pub use store::CatalogStore;
pub use types::{GalleryImage, ImageAsset, NewDestination, NewYacht};
