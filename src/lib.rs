//! NHTSA vehicle specification harvester
//!
//! This library collects vehicle data (make, model, year, trim/variant,
//! curb weight) from the public NHTSA vPIC API and persists one JSON
//! document per (make, year) pair. The pipeline fans out concurrently over
//! the per-model specification fetches while keeping years, makes and
//! vehicle types sequential, and degrades every upstream failure to "no
//! data for this unit" instead of aborting the run.

pub mod config;
pub mod file_storage;
pub mod harvester;
pub mod http;
pub mod models;
pub mod nhtsa;
pub mod source;
pub mod spec_parser;

// Re-export commonly used types
pub use config::{ApiConfig, Config, HarvestConfig, OutputConfig};
pub use file_storage::{sanitize_component, FileStorage};
pub use harvester::{is_valid_make, Harvester, HarvestSummary, VEHICLE_TYPES};
pub use http::{http_get, FetchError};
pub use models::VehicleRecord;
pub use nhtsa::NhtsaVehiclesService;
pub use source::{VariantWeight, VehicleSource};
