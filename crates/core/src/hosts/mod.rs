//! Host accounts and public profiles

pub mod ports;
pub mod service;

pub use service::{HostProfileUpdate, HostService, NewHost};
