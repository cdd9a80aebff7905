//! Mission-item generation: lower a survey result to vehicle commands.
//!
//! Each path point becomes a "navigate to waypoint" record at the
//! configured altitude. When camera triggering is enabled, the
//! waypoints are bracketed by a "set trigger distance" record before
//! the first waypoint and a zero-distance record after the last, so
//! the camera fires only while the vehicle is on the survey pattern.

use serde::{Deserialize, Serialize};

use karita_grid::{SurveyConfig, SurveyResult};

/// A single vehicle command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MissionCommand {
    /// Fly to a geodetic position.
    NavWaypoint {
        /// Latitude in degrees.
        latitude: f64,
        /// Longitude in degrees.
        longitude: f64,
        /// Altitude in metres.
        altitude: f64,
        /// Whether `altitude` is relative to the home position.
        relative_altitude: bool,
    },
    /// Set the distance-based camera trigger. A distance of 0 disables
    /// triggering.
    SetTriggerDistance {
        /// Distance between shots in metres.
        distance: f64,
    },
}

/// A sequenced mission record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionItem {
    /// Position of this record in the mission.
    pub sequence: u32,
    /// Whether the vehicle proceeds to the next item automatically.
    pub auto_continue: bool,
    /// The command itself.
    pub command: MissionCommand,
}

/// Lower a survey result to an ordered mission-item list.
///
/// Sequence numbers start at `first_sequence` and increase by one per
/// record. An empty path produces no items, trigger records included —
/// there is nothing to photograph.
#[must_use]
pub fn mission_items(
    result: &SurveyResult,
    config: &SurveyConfig,
    first_sequence: u32,
) -> Vec<MissionItem> {
    if result.path.is_empty() {
        return Vec::new();
    }

    let mut items = Vec::with_capacity(result.path.len() + 2);
    let mut sequence = first_sequence;
    let mut push = |items: &mut Vec<MissionItem>, command: MissionCommand| {
        items.push(MissionItem {
            sequence,
            auto_continue: true,
            command,
        });
        sequence = sequence.saturating_add(1);
    };

    if config.camera_trigger {
        push(
            &mut items,
            MissionCommand::SetTriggerDistance {
                distance: config.trigger_distance,
            },
        );
    }

    for point in &result.path {
        push(
            &mut items,
            MissionCommand::NavWaypoint {
                latitude: point.latitude,
                longitude: point.longitude,
                altitude: config.altitude,
                relative_altitude: config.relative_altitude,
            },
        );
    }

    if config.camera_trigger {
        push(&mut items, MissionCommand::SetTriggerDistance { distance: 0.0 });
    }

    items
}

/// The sequence number of the last record a survey will occupy.
///
/// `first_sequence` when the path is empty; otherwise the waypoint
/// count minus one past `first_sequence`, plus two when camera
/// triggering adds its bracketing records.
#[must_use]
pub fn last_sequence(first_sequence: u32, path_point_count: usize, camera_trigger: bool) -> u32 {
    if path_point_count == 0 {
        return first_sequence;
    }
    let count = u32::try_from(path_point_count).unwrap_or(u32::MAX);
    let mut last = first_sequence.saturating_add(count - 1);
    if camera_trigger {
        last = last.saturating_add(2);
    }
    last
}
