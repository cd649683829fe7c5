//! Data service: serves the fixed person record.
//!
//! # Data Flow
//! ```text
//! GET /
//!     → get_person (no inputs consulted)
//!     → 200 + JSON Person
//! ```

pub mod person;

use axum::{routing::get, Json, Router};

pub use person::{Address, Person};

/// Routes owned by the data service.
pub fn router() -> Router {
    Router::new().route("/", get(get_person))
}

async fn get_person() -> Json<Person> {
    Json(Person::sample())
}
