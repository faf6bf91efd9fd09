//! Sky-side types: views, catalog objects and scan results
//!
//! Angles are in degrees throughout.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Placeholder the scan backend uses for missing text fields
pub const NOT_AVAILABLE: &str = "N/A";

/// An equatorial coordinate
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SkyCoord {
    pub ra: f64,
    pub dec: f64,
}

impl SkyCoord {
    pub fn new(ra: f64, dec: f64) -> Self {
        Self { ra, dec }
    }
}

/// Reasons a view cannot be constructed
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ViewError {
    #[error("{0} must be a finite number")]
    NotFinite(&'static str),
    #[error("radius must be positive, got {0}")]
    NonPositiveRadius(f64),
}

/// The region of sky currently shown: a center and an angular radius
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ViewFields")]
pub struct View {
    center_ra: f64,
    center_dec: f64,
    radius_deg: f64,
}

impl View {
    /// Validate and build a view
    pub fn new(center_ra: f64, center_dec: f64, radius_deg: f64) -> Result<Self, ViewError> {
        if !center_ra.is_finite() {
            return Err(ViewError::NotFinite("right ascension"));
        }
        if !center_dec.is_finite() {
            return Err(ViewError::NotFinite("declination"));
        }
        if !radius_deg.is_finite() {
            return Err(ViewError::NotFinite("radius"));
        }
        if radius_deg <= 0.0 {
            return Err(ViewError::NonPositiveRadius(radius_deg));
        }
        Ok(Self {
            center_ra,
            center_dec,
            radius_deg,
        })
    }

    pub fn center_ra(&self) -> f64 {
        self.center_ra
    }

    pub fn center_dec(&self) -> f64 {
        self.center_dec
    }

    pub fn radius_deg(&self) -> f64 {
        self.radius_deg
    }

    pub fn center(&self) -> SkyCoord {
        SkyCoord::new(self.center_ra, self.center_dec)
    }
}

#[derive(Deserialize)]
struct ViewFields {
    center_ra: f64,
    center_dec: f64,
    radius_deg: f64,
}

impl TryFrom<ViewFields> for View {
    type Error = ViewError;

    fn try_from(fields: ViewFields) -> Result<Self, Self::Error> {
        View::new(fields.center_ra, fields.center_dec, fields.radius_deg)
    }
}

impl Default for View {
    fn default() -> Self {
        // Orion Nebula region
        Self {
            center_ra: 83.82,
            center_dec: -5.39,
            radius_deg: 0.5,
        }
    }
}

/// Catalog identifier as reported by the scan backend
///
/// Numeric ids may arrive as JSON floats when the backend's catalog rows
/// are all-numeric; those are kept as-is rather than truncated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ObjectId {
    Number(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectId::Number(n) => write!(f, "{n}"),
            // Integer-valued floats print without a fractional part
            ObjectId::Float(n) => write!(f, "{n}"),
            ObjectId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ObjectId {
    fn from(n: i64) -> Self {
        ObjectId::Number(n)
    }
}

impl From<&str> for ObjectId {
    fn from(s: &str) -> Self {
        ObjectId::Text(s.to_string())
    }
}

/// An ordinary catalog star drawn for context
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldStar {
    pub id: ObjectId,
    pub ra: f64,
    pub dec: f64,
    pub mag: f64,
}

impl FieldStar {
    pub fn coord(&self) -> SkyCoord {
        SkyCoord::new(self.ra, self.dec)
    }
}

fn not_available() -> String {
    NOT_AVAILABLE.to_string()
}

/// An object the detection backend flagged as unusual
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Anomaly {
    pub id: ObjectId,
    #[serde(default = "not_available")]
    pub name: String,
    pub ra: f64,
    pub dec: f64,
    #[serde(rename = "type", default = "not_available")]
    pub kind: String,
    pub anomaly_score: f64,
}

impl Anomaly {
    pub fn coord(&self) -> SkyCoord {
        SkyCoord::new(self.ra, self.dec)
    }

    /// Human-facing label: the name, or the id when the name is unknown
    pub fn label(&self) -> String {
        if self.name == NOT_AVAILABLE {
            self.id.to_string()
        } else {
            self.name.clone()
        }
    }
}

/// Everything a successful scan returns
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    #[serde(default)]
    pub field_stars: Vec<FieldStar>,
    #[serde(default)]
    pub anomalies: Vec<Anomaly>,
    #[serde(default)]
    pub message: String,
}

impl ScanResult {
    /// Whether an anomaly with this id is part of the result
    pub fn has_anomaly(&self, id: &ObjectId) -> bool {
        self.anomalies.iter().any(|a| &a.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_rejects_bad_radius() {
        assert_eq!(
            View::new(10.0, 10.0, 0.0),
            Err(ViewError::NonPositiveRadius(0.0))
        );
        assert!(View::new(10.0, 10.0, -1.0).is_err());
        assert!(View::new(f64::NAN, 10.0, 1.0).is_err());
        assert!(View::new(10.0, 10.0, f64::INFINITY).is_err());
        assert!(View::new(10.0, -89.0, 0.1).is_ok());
    }

    #[test]
    fn test_decode_scan_response_with_missing_fields() {
        let json = r#"{
            "message": "Analysis complete. Found 3 objects.",
            "anomalies": [
                {"id": 3017228209346936576, "ra": 83.81, "dec": -5.38, "anomaly_score": 4.25}
            ],
            "field_stars": [
                {"id": "N/A", "ra": 83.9, "dec": -5.4, "mag": 9.5}
            ]
        }"#;
        let result: ScanResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.anomalies.len(), 1);
        let anomaly = &result.anomalies[0];
        assert_eq!(anomaly.name, NOT_AVAILABLE);
        assert_eq!(anomaly.kind, NOT_AVAILABLE);
        assert_eq!(anomaly.id, ObjectId::Number(3017228209346936576));
        assert_eq!(anomaly.label(), "3017228209346936576");
        assert_eq!(result.field_stars[0].id, ObjectId::from("N/A"));
    }

    #[test]
    fn test_decode_scan_response_with_float_ids() {
        let json = r#"{
            "message": "Analysis complete. Found 2 objects.",
            "anomalies": [
                {"id": 3.017228209346937e18, "name": "N/A", "ra": 83.81, "dec": -5.38,
                 "type": "N/A", "anomaly_score": 3.5}
            ],
            "field_stars": [
                {"id": 12.0, "ra": 83.9, "dec": -5.4, "mag": 9.5}
            ]
        }"#;
        let result: ScanResult = serde_json::from_str(json).unwrap();
        let anomaly = &result.anomalies[0];
        assert_eq!(anomaly.id, ObjectId::Float(3.017228209346937e18));
        assert_eq!(anomaly.label(), "3017228209346937000");
        assert!(result.has_anomaly(&ObjectId::Float(3.017228209346937e18)));

        let star = &result.field_stars[0];
        assert_eq!(star.id, ObjectId::Float(12.0));
        assert_eq!(star.id.to_string(), "12");
        assert_eq!(ObjectId::Float(12.5).to_string(), "12.5");
    }

    #[test]
    fn test_anomaly_label_prefers_name() {
        let anomaly = Anomaly {
            id: ObjectId::Number(7),
            name: "V1016 Ori".to_string(),
            ra: 0.0,
            dec: 0.0,
            kind: "*".to_string(),
            anomaly_score: 1.0,
        };
        assert_eq!(anomaly.label(), "V1016 Ori");
    }
}
