//! Port traits for external collaborators.

pub mod storage_port;
pub mod config_port;
