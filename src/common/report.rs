use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::common::errors::{BayesError, Result};
use crate::inference::{InferenceMethod, SamplingConfig};

/// Outcome of one estimate, as written to the JSON report.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EstimateRecord {
    pub method: InferenceMethod,
    /// Human-readable query, e.g. `P(Rain | WetGrass = true)`.
    pub query: String,
    pub samples: usize,
    /// `None` when the estimate was undefined or the run failed.
    pub probability: Option<f64>,
    pub error: Option<String>,
    pub elapsed_ms: u64,
}

/// All estimates of one driver run plus the settings that produced them.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct InferenceReport {
    pub network: String,
    /// Version for format compatibility
    pub version: u32,
    pub sampling: SamplingConfig,
    pub timestamp: DateTime<Utc>,
    pub estimates: Vec<EstimateRecord>,
}

impl InferenceReport {
    pub const CURRENT_VERSION: u32 = 1;

    pub fn new(network: &str, sampling: SamplingConfig) -> Self {
        InferenceReport {
            network: network.to_string(),
            version: Self::CURRENT_VERSION,
            sampling,
            timestamp: Utc::now(),
            estimates: Vec::new(),
        }
    }

    pub fn push(&mut self, record: EstimateRecord) {
        self.estimates.push(record);
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        let report: InferenceReport = serde_json::from_str(&json)?;
        if report.version > Self::CURRENT_VERSION {
            return Err(BayesError::InvalidConfig(format!(
                "report version {} is newer than supported version {}",
                report.version,
                Self::CURRENT_VERSION
            )));
        }
        Ok(report)
    }
}
