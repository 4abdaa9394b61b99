pub mod client;
pub mod errors;
pub mod pipeline;
pub mod types;

#[cfg(test)]
pub use client::MockHttpClient;
pub use client::{HttpClient, ReqwestClient};
pub use errors::FetchError;
pub use types::{Charset, PageResponse};
