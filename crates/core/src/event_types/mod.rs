//! Event type catalog

pub mod ports;
pub mod service;

pub use service::EventTypeService;
