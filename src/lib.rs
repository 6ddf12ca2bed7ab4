//! medbridge: medical phrase translation and nearby-hospital search.
//!
//! Both operations lean on flaky public services, so each is a cascade
//! that always ends in a usable answer: translation falls back from a
//! phrasebook through two remote translators to a hint message, and
//! hospital search falls back to a built-in seed list.

pub mod config;
pub mod distance;
pub mod geo;
pub mod predict;
pub mod remote;
pub mod server;
pub mod translate;
