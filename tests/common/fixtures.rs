// Canned upstream bodies and prediction components

use serde_json::{Value, json};

pub const SCENARIO_LAT: &str = "20.5937";
pub const SCENARIO_LON: &str = "78.9629";

pub const HUMIDITY: f64 = 61.5;
pub const RAINFALL: f64 = 0.82;
pub const SOIL_PH: f64 = 64.0;

/// Elevation the mock provider reports for a latitude.
pub fn elevation_for(lat: f64) -> f64 {
    lat * 100.0
}

pub fn elevation_body(lat: f64, lon: f64) -> Value {
    json!({
        "results": [
            {"latitude": lat, "longitude": lon, "elevation": elevation_for(lat)}
        ]
    })
}

/// Daily series out of order; the first day's temperature is the latitude so
/// tests can tell requests apart.
pub fn weather_body(lat: f64, lon: f64) -> Value {
    json!({
        "type": "Feature",
        "geometry": {"type": "Point", "coordinates": [lon, lat, 417.0]},
        "properties": {
            "parameter": {
                "T2M": {"20200103": -99.0, "20200101": lat, "20200102": 17.9},
                "RH2M": {"20200102": 40.0, "20200101": HUMIDITY},
                "PRECTOTCORR": {"20200101": RAINFALL, "20200131": 3.3}
            }
        }
    })
}

/// Thirteen of the fourteen properties; wv1500 is left out on purpose.
pub fn soil_body(lat: f64, lon: f64) -> Value {
    let band = |mean: Value| json!([
        {"label": "5-15cm", "range": {"top_depth": 5, "bottom_depth": 15}, "values": {"mean": 1}},
        {"label": "0-5cm", "range": {"top_depth": 0, "bottom_depth": 5}, "values": {"mean": mean}}
    ]);
    json!({
        "type": "Feature",
        "geometry": {"type": "Point", "coordinates": [lon, lat]},
        "properties": {
            "layers": [
                {"name": "phh2o", "depths": band(json!(SOIL_PH))},
                {"name": "soc", "depths": band(json!(312))},
                {"name": "bdod", "depths": band(json!(131))},
                {"name": "clay", "depths": band(json!(251))},
                {"name": "sand", "depths": band(json!(420))},
                {"name": "silt", "depths": band(json!(329))},
                {"name": "cec", "depths": band(json!(215))},
                {"name": "ocd", "depths": band(json!(288))},
                {"name": "nitrogen", "depths": band(json!(185))},
                {"name": "wv0010", "depths": band(json!(402))},
                {"name": "wv0033", "depths": band(json!(311))},
                {"name": "cfvo", "depths": band(json!(null))},
                {"name": "ocs", "depths": []}
            ]
        }
    })
}

pub const CANNED_PREDICTION: &str = r#"{"n": 0.42, "p": 0.31, "k": 0.27}"#;

/// Prints a fixed prediction.
pub fn canned_script() -> String {
    format!("echo '{CANNED_PREDICTION}'")
}

/// Reports temperature, humidity and rainfall back as n, p and k.
pub const ECHO_ARGS_SCRIPT: &str = r#"printf '{"n": %s, "p": %s, "k": %s}' "$1" "$2" "$4""#;

/// Reports the soil pH argument as the error text.
pub const ECHO_PH_SCRIPT: &str = r#"printf '{"error": "ph=%s"}' "$3""#;

pub const GARBAGE_SCRIPT: &str = "echo 'Traceback (most recent call last):' >&2; echo 'not json'";
