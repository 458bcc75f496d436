//! Gateways to external identity providers.

pub mod oauth;
