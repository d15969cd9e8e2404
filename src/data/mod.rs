//! Station records and the REST plumbing that moves them.

pub mod http;
pub mod request;
pub mod service;
pub mod station;
