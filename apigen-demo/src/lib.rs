//! # apigen-demo
//!
//! A small service whose dispatch tables and validators are generated from
//! [`api`] by the build script. [`app`] mounts the generated services and
//! translates transport requests into [`apigen::Request`] values.

pub mod api;
pub mod app;

pub use api::{MyApi, OtherApi, UserStore};
pub use app::{decode_body, App};
