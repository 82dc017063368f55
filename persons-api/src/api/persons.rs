//! Persons REST endpoints
//!
//! Translates HTTP requests into repository calls; the repository is the
//! only collaborator.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use persons_common::Person;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::AppState;

/// JSON body for POST /persons
///
/// Any client-supplied id is ignored; the handler assigns the next free
/// one. Missing fields deserialize to empty strings.
#[derive(Debug, Deserialize)]
pub struct NewPersonRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub lastname: String,
    #[serde(default)]
    pub zipcode: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub color: String,
}

/// GET /persons
///
/// Returns every known person: CSV records first, then runtime additions.
pub async fn list_persons(State(state): State<AppState>) -> Json<Vec<Person>> {
    Json(state.repo.get_all())
}

/// GET /persons/:id
///
/// Returns the person with the given identifier, or 404 when absent.
pub async fn get_person(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Person>, PersonsError> {
    state
        .repo
        .get_by_id(id)
        .map(Json)
        .ok_or(PersonsError::NotFound(id))
}

/// GET /persons/color/:color
///
/// Returns every person matching the color name (case-insensitive).
pub async fn persons_by_color(
    State(state): State<AppState>,
    Path(color): Path<String>,
) -> Json<Vec<Person>> {
    Json(state.repo.get_by_color(Some(&color)))
}

/// POST /persons
///
/// Stores the person in memory (the CSV source is not modified) and
/// returns 201 with the created record and its location.
pub async fn add_person(
    State(state): State<AppState>,
    Json(req): Json<NewPersonRequest>,
) -> impl IntoResponse {
    // Next id past everything currently visible, file records included
    let max_id = state
        .repo
        .get_all()
        .iter()
        .map(|p| p.id)
        .max()
        .unwrap_or(0);

    let person = Person {
        id: max_id + 1,
        name: req.name,
        lastname: req.lastname,
        zipcode: req.zipcode,
        city: req.city,
        color: req.color,
    };

    info!(
        "Added person {} ({} {})",
        person.id, person.name, person.lastname
    );
    state.repo.add(Some(person.clone()));

    let location = format!("/persons/{}", person.id);
    (
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(person),
    )
}

/// Persons API errors
#[derive(Debug)]
pub enum PersonsError {
    NotFound(i64),
}

impl IntoResponse for PersonsError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            PersonsError::NotFound(id) => {
                (StatusCode::NOT_FOUND, format!("No person with id {}", id))
            }
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
