//! Thin S3 REST client: SigV4-signed PUT plus presigned GET URLs. The object
//! store's behavior is the provider's concern; this crate only signs and
//! ships requests.

pub mod client;
pub mod sign;

pub use client::{S3Client, S3Config, S3Error};
