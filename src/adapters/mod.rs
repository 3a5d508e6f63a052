//! Concrete adapter implementations.

pub mod json_storage_adapter;
pub mod backup_adapter;
pub mod csv_export_adapter;
pub mod file_config_adapter;
