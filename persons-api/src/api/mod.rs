//! HTTP API handlers for persons-api

pub mod health;
pub mod persons;

pub use health::health_routes;
pub use persons::{add_person, get_person, list_persons, persons_by_color};
