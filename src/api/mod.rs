//! NoteHub API client layer.
//!
//! - [`config`]: Explicit connection settings (base URL, bearer token)
//! - [`request`]: Request/response envelopes and host correlation context
//! - [`client`]: Request builders and response decoders for the three endpoints

pub mod client;
pub mod config;
pub mod request;

pub use client::NoteClient;
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use request::{
    classify_host_result, ApiRequest, ApiResponse, HttpMethod, Operation, Outcome, RequestContext,
    RequestId,
};
