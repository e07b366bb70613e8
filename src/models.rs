//! Data models for the vPIC API responses and the persisted records
//!
//! Response structs declare only the fields the harvester consumes; a
//! missing or null `Results` list is treated as empty downstream, never as
//! an error.

use serde::{Deserialize, Serialize};

/// Response of vehicles/GetAllMakes
#[derive(Debug, Deserialize)]
pub struct AllMakesResponse {
    #[serde(rename = "Results", default)]
    pub results: Option<Vec<MakeEntry>>,
}

/// One entry of the makes listing
#[derive(Debug, Deserialize)]
pub struct MakeEntry {
    #[serde(rename = "Make_Name")]
    pub make_name: String,
}

/// Response of vehicles/GetModelsForMakeYear
#[derive(Debug, Deserialize)]
pub struct ModelsForMakeYearResponse {
    #[serde(rename = "Results", default)]
    pub results: Option<Vec<ModelEntry>>,
}

/// One entry of the models listing
#[derive(Debug, Deserialize)]
pub struct ModelEntry {
    #[serde(rename = "Model_Name")]
    pub model_name: String,
}

/// Response of vehicles/GetCanadianVehicleSpecifications
#[derive(Debug, Deserialize)]
pub struct VehicleSpecsResponse {
    #[serde(rename = "Results", default)]
    pub results: Option<Vec<SpecRecord>>,
}

/// Specification of one model variant: an ordered list of name/value pairs.
/// The upstream field ordering is significant (index 1 = "Model",
/// index 7 = "CW" curb weight in kilograms).
#[derive(Debug, Clone, Deserialize)]
pub struct SpecRecord {
    #[serde(rename = "Specs", default)]
    pub specs: Vec<SpecField>,
}

/// One name/value pair within a specification record
#[derive(Debug, Clone, Deserialize)]
pub struct SpecField {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Value")]
    pub value: String,
}

/// The persisted unit: one harvested variant of a model.
/// `curb_weight_tons` serializes as JSON null when the weight could not be
/// derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleRecord {
    pub make: String,
    pub model: String,
    pub variant: String,
    pub year: u16,
    pub curb_weight_tons: Option<f64>,
}
