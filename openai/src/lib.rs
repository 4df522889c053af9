//! Thin OpenAI Chat Completions client. Correctness of the service itself is
//! the provider's concern; this crate only shapes the request and unwraps the
//! first choice.

pub mod client;

pub use client::OpenAiClient;
