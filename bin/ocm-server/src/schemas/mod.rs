//! Request / response bodies of the JSON API.

pub mod admin;
pub mod v1;
