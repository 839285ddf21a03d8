use crate::routes::geodata::models::CombinedEnvironmentalRecord;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const PREDICTION_ERROR: &str = "Prediction error";

/// Output of the prediction component: either N/P/K ratios or an error.
///
/// The component may name the ratios `nitrogen`, `phosphorus` and
/// `potassium`; they are always serialized back as `n`, `p` and `k`, so the
/// response does not necessarily echo the component's output verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum PredictionResult {
    Ratios {
        #[serde(alias = "nitrogen")]
        n: f64,
        #[serde(alias = "phosphorus")]
        p: f64,
        #[serde(alias = "potassium")]
        k: f64,
    },
    Failed {
        error: String,
    },
}

impl PredictionResult {
    pub fn unavailable() -> Self {
        PredictionResult::Failed {
            error: PREDICTION_ERROR.to_string(),
        }
    }

    /// Parses the component's standard output. Anything that is not one of
    /// the two known shapes degrades to [`PREDICTION_ERROR`].
    pub fn from_stdout(stdout: &[u8]) -> Self {
        match serde_json::from_slice::<serde_json::Value>(stdout) {
            Ok(value) if value.is_object() => {
                serde_json::from_value(value).unwrap_or_else(|_| Self::unavailable())
            }
            _ => Self::unavailable(),
        }
    }
}

/// The four positional inputs of the prediction component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionInputs {
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub ph: Option<f64>,
    pub rainfall: Option<f64>,
}

impl PredictionInputs {
    /// Argument list in the fixed order temperature, humidity, pH, rainfall.
    /// Missing values are passed as the literal `null`.
    pub fn to_args(&self) -> [String; 4] {
        [self.temperature, self.humidity, self.ph, self.rainfall]
            .map(|value| value.map_or_else(|| "null".to_string(), |v| v.to_string()))
    }
}

impl From<&CombinedEnvironmentalRecord> for PredictionInputs {
    fn from(record: &CombinedEnvironmentalRecord) -> Self {
        Self {
            temperature: record.temperature,
            humidity: record.humidity,
            ph: record.soil.phh2o,
            rainfall: record.rainfall,
        }
    }
}
