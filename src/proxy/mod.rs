//! Outbound calls to the third-party completion API.

pub mod completion;

pub use completion::CompletionClient;
