//! Harvest orchestrator
//!
//! Drives the year → make → vehicle type → model iteration. Years, makes
//! and vehicle types run strictly sequentially; within one vehicle type all
//! model fetches fan out concurrently over one shared session and are
//! joined, in launch order, before the next vehicle type starts. Every
//! collaborator failure degrades to "no data for this unit"; only
//! persistence errors abort the run.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, info, warn};

use crate::config::Config;
use crate::file_storage::{sanitize_component, FileStorage};
use crate::models::VehicleRecord;
use crate::source::VehicleSource;

/// The 9 vPIC vehicle-type labels, queried one at a time per make/year
pub const VEHICLE_TYPES: [&str; 9] = [
    "Motorcycle",
    "Passenger Car",
    "Truck",
    "Bus",
    "Trailer",
    "Multipurpose Passenger Vehicle (MPV)",
    "Low Speed Vehicle (LSV)",
    "Incomplete Vehicle",
    "Off Road Vehicle",
];

/// Makes whose name starts with "#" break downstream queries and are
/// skipped before any per-make work begins.
pub fn is_valid_make(make: &str) -> bool {
    !make.starts_with('#')
}

/// Totals of one completed run
#[derive(Debug, Clone, PartialEq)]
pub struct HarvestSummary {
    pub years_processed: usize,
    pub makes_processed: usize,
    pub records_written: usize,
    pub elapsed: Duration,
}

/// The harvest state machine over any [`VehicleSource`]
pub struct Harvester<S: VehicleSource> {
    source: Arc<S>,
    output_root: PathBuf,
    years: std::ops::RangeInclusive<u16>,
}

impl<S: VehicleSource> Harvester<S> {
    pub fn new(source: S, config: &Config) -> Self {
        Self {
            source: Arc::new(source),
            output_root: PathBuf::from(&config.output.path),
            years: config.harvest.years(),
        }
    }

    /// Run the full harvest: every year, every valid make, one file per
    /// (make, year) pair.
    pub async fn run(&self) -> Result<HarvestSummary> {
        let start = Instant::now();

        let makes = match self.source.all_makes().await {
            Ok(makes) => makes,
            Err(e) => {
                error!("Failed to get makes: {}", e);
                Vec::new()
            }
        };
        let makes: Vec<String> = makes.into_iter().filter(|m| is_valid_make(m)).collect();

        let years: Vec<u16> = self.years.clone().collect();
        info!(
            "Processing {} makes over {} years",
            makes.len(),
            years.len()
        );

        let mut records_written = 0usize;
        for &year in &years {
            let progress = ProgressBar::new(makes.len() as u64);
            progress.set_style(
                ProgressStyle::default_bar()
                    .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} makes - {msg}")
                    .unwrap()
                    .progress_chars("█▓▒░  "),
            );
            progress.set_message(format!("year {}", year));

            for make in &makes {
                let aggregate = self.harvest_make_year(year, make).await;
                records_written += aggregate.len();
                self.write_aggregate(make, year, &aggregate)
                    .await
                    .context(format!("Failed to persist aggregate for {} {}", make, year))?;
                progress.inc(1);
            }

            progress.finish_with_message(format!("year {} done", year));
        }

        let elapsed = start.elapsed();
        info!("Total execution time: {:.2} seconds", elapsed.as_secs_f64());

        Ok(HarvestSummary {
            years_processed: years.len(),
            makes_processed: makes.len(),
            records_written,
            elapsed,
        })
    }

    /// Build the complete aggregate for one (make, year) pair.
    ///
    /// Vehicle types run one at a time to bound load; within one type, one
    /// task per model runs concurrently over a session scoped to that
    /// type's iteration. Results append in launch order, so the aggregate
    /// is ordered by vehicle type, then by model-list position.
    async fn harvest_make_year(&self, year: u16, make: &str) -> Vec<VehicleRecord> {
        let mut aggregate: Vec<VehicleRecord> = Vec::new();

        for vehicle_type in VEHICLE_TYPES {
            let session = match self.source.open_session() {
                Ok(session) => session,
                Err(e) => {
                    error!("Failed to open session for {}: {}", vehicle_type, e);
                    continue;
                }
            };

            let models = match self.source.models(&session, year, make, vehicle_type).await {
                Ok(models) => models,
                Err(e) => {
                    warn!(
                        "Failed to fetch models for {}, {}, {}: {}",
                        make, year, vehicle_type, e
                    );
                    continue;
                }
            };

            if models.is_empty() {
                continue;
            }

            let mut tasks = Vec::with_capacity(models.len());
            for model in models {
                let source = Arc::clone(&self.source);
                let session = session.clone();
                let make = make.to_string();

                tasks.push(tokio::spawn(async move {
                    let variants = match source
                        .variant_weights(&session, year, &make, &model)
                        .await
                    {
                        Ok(variants) => variants,
                        Err(e) => {
                            warn!(
                                "Failed to fetch specifications for {}, {}, {}: {}",
                                year, make, model, e
                            );
                            Vec::new()
                        }
                    };

                    variants
                        .into_iter()
                        .map(|vw| VehicleRecord {
                            make: make.clone(),
                            model: model.clone(),
                            year,
                            variant: vw.variant,
                            curb_weight_tons: vw.curb_weight_tons,
                        })
                        .collect::<Vec<_>>()
                }));
            }

            // Join in launch order; a failed unit never affects its siblings.
            for task in tasks {
                match task.await {
                    Ok(records) => aggregate.extend(records),
                    Err(e) => error!("Model task failed for {}, {}: {}", make, year, e),
                }
            }
        }

        aggregate
    }

    /// Serialize one (make, year) aggregate and hand it to the file sink.
    async fn write_aggregate(
        &self,
        make: &str,
        year: u16,
        records: &[VehicleRecord],
    ) -> Result<()> {
        let storage = FileStorage::new(self.output_root.join(sanitize_component(make)))?;
        let content = serde_json::to_string_pretty(records)
            .context("Failed to serialize vehicle records")?;
        storage.write_text(&format!("{}.json", year), &content).await
    }
}
