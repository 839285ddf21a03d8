//! Flattening of the soil provider's per-depth layer format.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Revision of [`SOIL_PROPERTIES`]. Bump when the key set changes so that
/// consumers of the flat record can detect a new shape.
pub const SOIL_PROPERTY_SET_VERSION: u32 = 1;

/// Soil properties requested from the provider, in request order.
pub const SOIL_PROPERTIES: [&str; 14] = [
    "phh2o", "soc", "bdod", "clay", "sand", "silt", "cec", "ocd", "nitrogen", "wv0010", "wv0033",
    "wv1500", "cfvo", "ocs",
];

/// Depth band whose mean is reported for every property.
pub const SOIL_DEPTH_BAND: &str = "0-5cm";

/// One named property as returned by the soil provider.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SoilLayer {
    pub name: String,
    #[serde(default)]
    pub depths: Vec<SoilDepth>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SoilDepth {
    pub label: Option<String>,
    pub values: Option<SoilStatistics>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SoilStatistics {
    pub mean: Option<f64>,
}

/// Mean value per soil property at [`SOIL_DEPTH_BAND`], raw provider units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, ToSchema)]
pub struct SoilProfile {
    pub bdod: Option<f64>,
    pub cec: Option<f64>,
    pub cfvo: Option<f64>,
    pub clay: Option<f64>,
    pub nitrogen: Option<f64>,
    pub phh2o: Option<f64>,
    pub sand: Option<f64>,
    pub silt: Option<f64>,
    pub soc: Option<f64>,
    pub ocd: Option<f64>,
    pub ocs: Option<f64>,
    pub wv0010: Option<f64>,
    pub wv0033: Option<f64>,
    pub wv1500: Option<f64>,
}

impl SoilProfile {
    fn slot_mut(&mut self, property: &str) -> Option<&mut Option<f64>> {
        let slot = match property {
            "bdod" => &mut self.bdod,
            "cec" => &mut self.cec,
            "cfvo" => &mut self.cfvo,
            "clay" => &mut self.clay,
            "nitrogen" => &mut self.nitrogen,
            "phh2o" => &mut self.phh2o,
            "sand" => &mut self.sand,
            "silt" => &mut self.silt,
            "soc" => &mut self.soc,
            "ocd" => &mut self.ocd,
            "ocs" => &mut self.ocs,
            "wv0010" => &mut self.wv0010,
            "wv0033" => &mut self.wv0033,
            "wv1500" => &mut self.wv1500,
            _ => return None,
        };
        Some(slot)
    }

    /// Builds the profile from the provider's layers. Properties outside the
    /// fixed key set are ignored; missing ones stay null.
    pub fn from_layers(layers: &[SoilLayer]) -> Self {
        let mut profile = SoilProfile::default();
        for layer in layers {
            if let Some(slot) = profile.slot_mut(&layer.name) {
                *slot = band_mean(layer, SOIL_DEPTH_BAND);
            }
        }
        profile
    }
}

fn band_mean(layer: &SoilLayer, band: &str) -> Option<f64> {
    layer
        .depths
        .iter()
        .find(|depth| depth.label.as_deref() == Some(band))
        .and_then(|depth| depth.values.as_ref())
        .and_then(|values| values.mean)
}
