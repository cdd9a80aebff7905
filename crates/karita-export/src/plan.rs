//! The versioned survey plan document.
//!
//! A plan captures everything needed to regenerate a survey: the grid
//! parameters, camera trigger settings, optional camera description,
//! and the polygon itself. The JSON schema is versioned; loading
//! validates the version and type markers plus the conditional field
//! requirements before handing back a typed document.

use serde::{Deserialize, Serialize};

use karita_grid::{GeoPoint, GridConfig, SurveyConfig};

/// The plan document version this crate reads and writes.
pub const PLAN_VERSION: u32 = 2;

/// The complex-item type marker for survey plans.
pub const PLAN_TYPE: &str = "survey";

/// Errors from loading or saving a survey plan document.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    /// The document is not valid JSON or does not match the schema.
    #[error("failed to parse survey plan JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The document carries an unsupported version number.
    #[error("unsupported survey plan version: {0} (expected 2)")]
    UnsupportedVersion(u32),

    /// The document describes a different complex-item type.
    #[error("unsupported complex item type: {0}")]
    UnsupportedType(String),

    /// Camera triggering is enabled but no trigger distance is given.
    #[error("cameraTrigger is enabled but cameraTriggerDistance is missing")]
    MissingTriggerDistance,

    /// The grid is camera-derived but no camera object is given.
    #[error("manualGrid is false but the camera object is missing")]
    MissingCamera,
}

/// The `grid` section of a plan document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridSection {
    /// Flight altitude in metres.
    pub altitude: f64,
    /// Whether the altitude is relative to the home position.
    pub relative_altitude: bool,
    /// Sweep angle in degrees.
    pub angle: f64,
    /// Pass spacing in metres.
    pub spacing: f64,
    /// Turnaround distance in metres.
    pub turn_around_distance: f64,
}

/// The camera description stored with camera-derived grids.
///
/// These values are carried for the host's spacing/trigger
/// calculations and round-tripped through the document; the grid
/// pipeline itself consumes only the resolved spacing and trigger
/// distance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraSpec {
    /// Camera model name.
    pub name: String,
    /// Whether the sensor is mounted landscape.
    pub orientation_landscape: bool,
    /// Sensor width in millimetres.
    pub sensor_width: f64,
    /// Sensor height in millimetres.
    pub sensor_height: f64,
    /// Image width in pixels.
    pub resolution_width: u32,
    /// Image height in pixels.
    pub resolution_height: u32,
    /// Lens focal length in millimetres.
    pub focal_length: f64,
    /// Target ground resolution in centimetres per pixel.
    pub ground_resolution: f64,
    /// Frontal overlap percentage between consecutive images.
    #[serde(rename = "imageFrontalOverlap")]
    pub frontal_overlap: f64,
    /// Side overlap percentage between adjacent passes.
    /// The historical key name is kept for document compatibility.
    #[serde(rename = "imageSizeOverlap")]
    pub side_overlap: f64,
}

impl Default for CameraSpec {
    fn default() -> Self {
        Self {
            name: String::new(),
            orientation_landscape: true,
            sensor_width: 6.17,
            sensor_height: 4.55,
            resolution_width: 4000,
            resolution_height: 3000,
            focal_length: 4.5,
            ground_resolution: 3.0,
            frontal_overlap: 10.0,
            side_overlap: 10.0,
        }
    }
}

/// A complete survey plan document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyPlan {
    /// Document schema version.
    pub version: u32,
    /// Complex-item type marker.
    #[serde(rename = "type")]
    pub kind: String,
    /// Sequence number of the first mission item this survey occupies.
    pub id: u32,
    /// Whether distance-based camera triggering is enabled.
    pub camera_trigger: bool,
    /// Trigger distance in metres; present iff `camera_trigger`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub camera_trigger_distance: Option<f64>,
    /// Whether the grid parameters were entered manually rather than
    /// derived from the camera description.
    pub manual_grid: bool,
    /// Whether the fixed value in the host's camera calculator is the
    /// altitude (as opposed to the ground resolution).
    pub fixed_value_is_altitude: bool,
    /// Grid parameters.
    pub grid: GridSection,
    /// Camera description; present iff `manual_grid` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub camera: Option<CameraSpec>,
    /// Polygon vertices as `[latitude, longitude]` pairs, in insertion
    /// order, first vertex not repeated.
    pub polygon: Vec<(f64, f64)>,
}

impl SurveyPlan {
    /// Create a manual-grid plan for `polygon` with default parameters.
    #[must_use]
    pub fn new(polygon: Vec<(f64, f64)>) -> Self {
        let config = SurveyConfig::default();
        Self {
            version: PLAN_VERSION,
            kind: PLAN_TYPE.to_owned(),
            id: 0,
            camera_trigger: config.camera_trigger,
            camera_trigger_distance: Some(config.trigger_distance),
            manual_grid: true,
            fixed_value_is_altitude: false,
            grid: GridSection {
                altitude: config.altitude,
                relative_altitude: config.relative_altitude,
                angle: config.grid.angle_degrees,
                spacing: config.grid.spacing,
                turn_around_distance: config.grid.turnaround_distance,
            },
            camera: None,
            polygon,
        }
    }

    /// Parse and validate a plan document.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::Json`] for malformed JSON,
    /// [`PlanError::UnsupportedVersion`] / [`PlanError::UnsupportedType`]
    /// for foreign documents, and [`PlanError::MissingTriggerDistance`] /
    /// [`PlanError::MissingCamera`] when a conditional section is
    /// absent.
    pub fn from_json(json: &str) -> Result<Self, PlanError> {
        let plan: Self = serde_json::from_str(json)?;
        plan.validate()?;
        Ok(plan)
    }

    /// Serialize the plan document as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, PlanError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the version/type markers and conditional requirements.
    ///
    /// # Errors
    ///
    /// See [`SurveyPlan::from_json`].
    pub fn validate(&self) -> Result<(), PlanError> {
        if self.version != PLAN_VERSION {
            return Err(PlanError::UnsupportedVersion(self.version));
        }
        if self.kind != PLAN_TYPE {
            return Err(PlanError::UnsupportedType(self.kind.clone()));
        }
        if self.camera_trigger && self.camera_trigger_distance.is_none() {
            return Err(PlanError::MissingTriggerDistance);
        }
        if !self.manual_grid && self.camera.is_none() {
            return Err(PlanError::MissingCamera);
        }
        Ok(())
    }

    /// Lower the document to the core pipeline configuration.
    #[must_use]
    pub fn survey_config(&self) -> SurveyConfig {
        SurveyConfig {
            grid: GridConfig {
                angle_degrees: self.grid.angle,
                spacing: self.grid.spacing,
                turnaround_distance: self.grid.turn_around_distance,
                ..GridConfig::default()
            },
            altitude: self.grid.altitude,
            relative_altitude: self.grid.relative_altitude,
            camera_trigger: self.camera_trigger,
            trigger_distance: self
                .camera_trigger_distance
                .unwrap_or(SurveyConfig::DEFAULT_TRIGGER_DISTANCE),
        }
    }

    /// The polygon as typed geodetic points.
    #[must_use]
    pub fn polygon_points(&self) -> Vec<GeoPoint> {
        self.polygon
            .iter()
            .map(|&(latitude, longitude)| GeoPoint::new(latitude, longitude))
            .collect()
    }
}
