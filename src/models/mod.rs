//! Record model and HTTP response bodies
//!
//! [`Record`] is the single entity handled by the service. The response
//! DTOs wrap it (or plain messages) for the HTTP layer.

pub mod record;
pub mod responses;

// Re-export commonly used types
pub use record::Record;
pub use responses::{
    CreateRecordResponse, ErrorResponse, HealthResponse, MessageResponse, StatsResponse,
};
