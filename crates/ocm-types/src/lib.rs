//! Shared types for the OC material catalog.
//!
//! - [`material`]: the [`MaterialRecord`] entity, its [`Category`] and the
//!   [`NewMaterial`] payload the admin form submits.
//! - [`catalog`]: the pure gallery filter over a collection snapshot.
//! - [`seed`]: the sample collection written on first access.

pub mod catalog;
pub mod material;
pub mod seed;

pub use catalog::{CategoryFilter, UnknownCategory, available_categories, filter_materials};
pub use material::{
    Category, DEFAULT_DOWNLOAD_URL, DEFAULT_IMAGE_URL, InvalidMaterial, MaterialRecord, NewMaterial,
};
pub use seed::seed_materials;
