//! Domain layer of the login gateway.
//!
//! Owns the login/callback orchestration and translates `gateway-auth`
//! errors into domain errors so that `web` never depends on `gateway-auth`
//! directly.

pub mod error;
pub mod gateway;
pub mod login;

pub use gateway::oauth::{ProviderKind, Registry, UserInfo};
