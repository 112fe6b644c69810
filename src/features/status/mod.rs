//! Status page feature: configuration-driven current statuses, past
//! incidents, per-category health, 90-day history, and the JSON snapshot.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/` | No | HTML status page |
//! | GET | `/incident/{date}` | No | HTML incident detail for one day |
//! | GET | `/api/status` | No | JSON status snapshot |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use routes::StatusPageState;
pub use services::StatusService;
