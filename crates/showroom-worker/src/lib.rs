//! Showroom Worker - off-thread scene loading
//!
//! Fetches a binary glTF asset, decodes it away from the caller's thread,
//! and answers with exactly one tagged response per request. Each request
//! gets its own one-shot channel, so responses never need correlating.

mod error;
mod fetch;
mod request;
mod response;
mod worker;

pub use error::WorkerError;
pub use fetch::fetch_bytes;
pub use request::LoadRequest;
pub use response::WorkerResponse;
pub use worker::{fetch_and_decode, DecodeWorker, PendingDecode, WorkerConfig};
