//! karita-export: Pure serializers for survey plans (sans-IO)
//!
//! Converts planning inputs and outputs into their external
//! representations: the versioned survey plan JSON document, vehicle
//! mission-item records, and an SVG preview of the generated flight
//! path. Every function here returns structured data or a `String` —
//! all filesystem interaction lives in callers.

pub mod mission;
pub mod plan;
pub mod svg;

pub use mission::{MissionCommand, MissionItem, last_sequence, mission_items};
pub use plan::{CameraSpec, PlanError, SurveyPlan};
pub use svg::{SvgMetadata, to_svg};
