//! Points of interest: named, categorized geographic locations with
//! proximity search.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/poi/{id}` | Fetch a POI, optionally with details |
//! | GET | `/poi?lat=&lon=&radius=` | Proximity search |
//! | POST | `/poi` | Create a POI |
//! | PUT | `/poi/{id}` | Upsert a POI under a known id |
//! | DELETE | `/poi/{id}` | Delete a POI |

pub mod dtos;
pub mod handlers;
pub mod mappers;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;

pub use repository::{MongoPoiRepository, PoiRepository};
pub use services::PoiService;
