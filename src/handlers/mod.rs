//! HTTP handlers for resources, employee reviews and service status.

pub mod resource;
pub mod review;
pub mod status;
