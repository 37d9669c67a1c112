//! Command, request and response models
//!
//! Defines the dispatch command variant, the structured reply, and the
//! DTOs used for HTTP request and response bodies.

pub mod command;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use command::{Command, CommandReply};
pub use requests::WriteRequest;
pub use responses::{
    AddResponse, ErrorResponse, FlushResponse, GetResponse, HealthResponse, InfoResponse,
    RemoveResponse, SetResponse,
};
