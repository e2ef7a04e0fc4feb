//! # relact API Library
//!
//! HTTP surface for the actuator controller. Every route answers with an
//! [`ApiResponse`] envelope: `{ "success", "message", "status" }`.
//!
//! | Route | Command |
//! |-------|---------|
//! | `GET /api/status` | status |
//! | `POST /api/start` | start |
//! | `POST /api/stop` | stop |
//! | `POST /api/configure` | configure (`wait_seconds`) |
//! | `POST /api/cycle_wait_time` | configure (`time`) |
//! | `GET /` | route listing |

pub mod error;
pub mod routes;

pub use crate::error::{ApiError, ApiReply, ApiResponse};
pub use crate::routes::router;
