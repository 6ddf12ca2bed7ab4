//! Remote provider plumbing shared by the geo and translation resolvers.

pub mod client;

#[cfg(test)]
pub(crate) mod stub;

pub use client::{CallError, HttpClient, Method, ProviderClient, ProviderRequest};
