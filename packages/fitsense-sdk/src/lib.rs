pub mod client;
pub mod error;

pub use client::FitsenseClient;
pub use error::{SdkError, SdkResult};
