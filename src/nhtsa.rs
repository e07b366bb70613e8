//! NHTSA vPIC API client
//!
//! Production [`VehicleSource`] implementation over the three vPIC
//! endpoints: GetAllMakes, GetModelsForMakeYear and
//! GetCanadianVehicleSpecifications. Every call pays the configured
//! API-friendliness pauses; a missing or null `Results` list is an empty
//! result, not an error.

use std::time::Duration;

use async_trait::async_trait;
use tracing::info;
use urlencoding::encode;

use crate::config::ApiConfig;
use crate::http::{http_get, FetchError};
use crate::models::{AllMakesResponse, ModelsForMakeYearResponse, SpecRecord, VehicleSpecsResponse};
use crate::source::{VariantWeight, VehicleSource};
use crate::spec_parser::parse_record;

/// vPIC client configured with base URL, timeout and courtesy pauses
#[derive(Debug, Clone)]
pub struct NhtsaVehiclesService {
    config: ApiConfig,
}

impl NhtsaVehiclesService {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    fn build_client(&self) -> Result<reqwest::Client, FetchError> {
        reqwest::Client::builder()
            .timeout(Duration::from_secs(self.config.request_timeout_secs))
            .build()
            .map_err(|source| FetchError::Client { source })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Fetch the raw specification records for every variant of a model.
    ///
    /// A fixed pause precedes the request to stay friendly to the upstream
    /// service; one pause per model fetch.
    async fn model_variant_specs(
        &self,
        client: &reqwest::Client,
        year: u16,
        make: &str,
        model: &str,
    ) -> Result<Vec<SpecRecord>, FetchError> {
        tokio::time::sleep(Duration::from_millis(self.config.spec_fetch_delay_ms)).await;

        let url = self.endpoint("vehicles/GetCanadianVehicleSpecifications");
        let year = year.to_string();
        let response: VehicleSpecsResponse = http_get(
            client,
            &url,
            &[
                ("year", year.as_str()),
                ("make", make),
                ("model", model),
                ("format", "json"),
            ],
        )
        .await?;

        Ok(response.results.unwrap_or_default())
    }
}

#[async_trait]
impl VehicleSource for NhtsaVehiclesService {
    type Session = reqwest::Client;

    fn open_session(&self) -> Result<Self::Session, FetchError> {
        self.build_client()
    }

    async fn all_makes(&self) -> Result<Vec<String>, FetchError> {
        let client = self.build_client()?;
        let url = self.endpoint("vehicles/GetAllMakes");
        let response: AllMakesResponse = http_get(&client, &url, &[("format", "json")]).await?;
        tokio::time::sleep(Duration::from_millis(self.config.makes_listing_pause_ms)).await;

        Ok(response
            .results
            .unwrap_or_default()
            .into_iter()
            .map(|entry| entry.make_name)
            .collect())
    }

    async fn models(
        &self,
        session: &Self::Session,
        year: u16,
        make: &str,
        vehicle_type: &str,
    ) -> Result<Vec<String>, FetchError> {
        let url = self.endpoint(&format!(
            "vehicles/GetModelsForMakeYear/make/{}/modelyear/{}/vehicletype/{}",
            encode(make),
            year,
            encode(vehicle_type)
        ));
        let response: ModelsForMakeYearResponse =
            http_get(session, &url, &[("format", "json")]).await?;

        Ok(response
            .results
            .unwrap_or_default()
            .into_iter()
            .map(|entry| entry.model_name)
            .collect())
    }

    async fn variant_weights(
        &self,
        session: &Self::Session,
        year: u16,
        make: &str,
        model: &str,
    ) -> Result<Vec<VariantWeight>, FetchError> {
        let records = self.model_variant_specs(session, year, make, model).await?;

        if records.is_empty() {
            info!(
                "No vehicle specifications found for {}, {}, {}",
                year, make, model
            );
            return Ok(Vec::new());
        }

        Ok(records
            .iter()
            .filter_map(|record| parse_record(record, model))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn service(server: &MockServer) -> NhtsaVehiclesService {
        NhtsaVehiclesService::new(ApiConfig {
            base_url: server.url("/api"),
            request_timeout_secs: 5,
            spec_fetch_delay_ms: 0,
            makes_listing_pause_ms: 0,
        })
    }

    #[tokio::test]
    async fn test_all_makes_returns_names() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/vehicles/GetAllMakes")
                    .query_param("format", "json");
                then.status(200).json_body(serde_json::json!({
                    "Count": 2,
                    "Message": "ok",
                    "Results": [
                        {"Make_ID": 474, "Make_Name": "HONDA"},
                        {"Make_ID": 448, "Make_Name": "TOYOTA"}
                    ]
                }));
            })
            .await;

        let makes = service(&server).all_makes().await.unwrap();
        assert_eq!(makes, vec!["HONDA", "TOYOTA"]);
    }

    #[tokio::test]
    async fn test_models_encodes_path_segments() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path(
                    "/api/vehicles/GetModelsForMakeYear/make/Honda/modelyear/2015/vehicletype/Passenger%20Car",
                );
                then.status(200).json_body(serde_json::json!({
                    "Count": 1,
                    "Message": "ok",
                    "Results": [{"Model_ID": 1861, "Model_Name": "Civic"}]
                }));
            })
            .await;

        let svc = service(&server);
        let session = svc.open_session().unwrap();
        let models = svc
            .models(&session, 2015, "Honda", "Passenger Car")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(models, vec!["Civic"]);
    }

    #[tokio::test]
    async fn test_models_treats_null_results_as_empty() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path_contains("GetModelsForMakeYear");
                then.status(200)
                    .json_body(serde_json::json!({"Count": 0, "Message": "ok", "Results": null}));
            })
            .await;

        let svc = service(&server);
        let session = svc.open_session().unwrap();
        let models = svc.models(&session, 1990, "Honda", "Bus").await.unwrap();
        assert!(models.is_empty());
    }

    #[tokio::test]
    async fn test_models_surfaces_server_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path_contains("GetModelsForMakeYear");
                then.status(503);
            })
            .await;

        let svc = service(&server);
        let session = svc.open_session().unwrap();
        let result = svc.models(&session, 2015, "Honda", "Truck").await;
        assert!(matches!(result, Err(FetchError::Status { .. })));
    }

    #[tokio::test]
    async fn test_variant_weights_parses_records() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/vehicles/GetCanadianVehicleSpecifications")
                    .query_param("year", "2015")
                    .query_param("make", "Honda")
                    .query_param("model", "Civic")
                    .query_param("format", "json");
                then.status(200).json_body(serde_json::json!({
                    "Count": 1,
                    "Message": "ok",
                    "Results": [{"Specs": [
                        {"Name": "Make", "Value": "HONDA"},
                        {"Name": "Model", "Value": "Civic LX"},
                        {"Name": "MYR", "Value": "2015"},
                        {"Name": "OL", "Value": ""},
                        {"Name": "OW", "Value": ""},
                        {"Name": "OH", "Value": ""},
                        {"Name": "WB", "Value": ""},
                        {"Name": "CW", "Value": "1500"}
                    ]}]
                }));
            })
            .await;

        let svc = service(&server);
        let session = svc.open_session().unwrap();
        let variants = svc
            .variant_weights(&session, 2015, "Honda", "Civic")
            .await
            .unwrap();

        assert_eq!(
            variants,
            vec![VariantWeight {
                curb_weight_tons: Some(1.7),
                variant: "LX".to_string(),
            }]
        );
    }
}
