//! Vehicle data source trait
//!
//! This module defines the common interface over the three vPIC API tiers
//! (makes, models for make/year/type, per-model variant specifications).
//! The orchestrator drives any implementation of this trait; the production
//! implementation lives in [`crate::nhtsa`].

use async_trait::async_trait;

use crate::http::FetchError;

/// A weight/trim pair derived from one specification record
#[derive(Debug, Clone, PartialEq)]
pub struct VariantWeight {
    /// Curb weight in tons, absent when not derivable
    pub curb_weight_tons: Option<f64>,
    /// Normalized trim/variant label, possibly empty
    pub variant: String,
}

/// Interface over the vehicle data collaborators.
///
/// `Session` is one shared connection handle; the orchestrator opens one per
/// vehicle-type iteration and drops it when that iteration's fan-out has
/// joined, so the handle is an explicitly scoped resource rather than
/// ambient state.
#[async_trait]
pub trait VehicleSource: Send + Sync + 'static {
    type Session: Clone + Send + Sync + 'static;

    /// Open a connection handle for one vehicle-type iteration
    fn open_session(&self) -> Result<Self::Session, FetchError>;

    /// List every known make name
    async fn all_makes(&self) -> Result<Vec<String>, FetchError>;

    /// List model names for (year, make, vehicle type)
    async fn models(
        &self,
        session: &Self::Session,
        year: u16,
        make: &str,
        vehicle_type: &str,
    ) -> Result<Vec<String>, FetchError>;

    /// Fetch and parse the specification records of every variant of a model
    async fn variant_weights(
        &self,
        session: &Self::Session,
        year: u16,
        make: &str,
        model: &str,
    ) -> Result<Vec<VariantWeight>, FetchError>;
}
