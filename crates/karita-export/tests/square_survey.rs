//! Integration test: load a survey plan document, run the full grid
//! pipeline, and export mission items and an SVG preview.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use karita_export::{MissionCommand, SurveyPlan, SvgMetadata};
use karita_grid::plan_staged;

/// A hand-written plan document in the historical schema: a roughly
/// 111 m x 105 m field near Zurich, 20 m spacing, 10 m turnaround.
const PLAN_JSON: &str = r#"{
    "version": 2,
    "type": "survey",
    "id": 3,
    "cameraTrigger": true,
    "cameraTriggerDistance": 25.0,
    "manualGrid": true,
    "fixedValueIsAltitude": false,
    "grid": {
        "altitude": 50.0,
        "relativeAltitude": true,
        "angle": 0.0,
        "spacing": 20.0,
        "turnAroundDistance": 10.0
    },
    "polygon": [
        [47.3977, 8.5456],
        [47.3987, 8.5456],
        [47.3987, 8.5470],
        [47.3977, 8.5470]
    ]
}"#;

#[test]
fn plan_document_to_mission_items_and_svg() {
    let plan = SurveyPlan::from_json(PLAN_JSON).expect("plan should parse");
    let config = plan.survey_config();
    let polygon = plan.polygon_points();

    let staged = plan_staged(&polygon, &config);
    let result = &staged.result;

    eprintln!(
        "Survey: {} chords, {} path points, {:.1} m^2, {:.1} m, {} shots",
        staged.normalized.len(),
        result.path.len(),
        result.covered_area,
        result.path_length,
        result.camera_shots,
    );

    // The field is ~105 m across with 20 m spacing: expect several
    // passes, each contributing 4 points (10 m turnaround).
    assert!(
        staged.normalized.len() >= 4,
        "expected at least 4 passes, got {}",
        staged.normalized.len(),
    );
    assert_eq!(result.path.len(), staged.normalized.len() * 4);
    assert!(result.covered_area > 10_000.0);
    assert!(result.path_length > 0.0);
    assert!(result.camera_shots > 0);

    // Mission items: trigger on, waypoints, trigger off.
    let items = karita_export::mission_items(result, &config, plan.id);
    assert_eq!(items.len(), result.path.len() + 2);
    assert!(matches!(
        items.first().map(|item| &item.command),
        Some(MissionCommand::SetTriggerDistance { distance }) if (*distance - 25.0).abs() < f64::EPSILON,
    ));
    assert!(matches!(
        items.last().map(|item| &item.command),
        Some(MissionCommand::SetTriggerDistance { distance }) if distance.abs() < f64::EPSILON,
    ));
    assert_eq!(
        items.last().unwrap().sequence,
        karita_export::last_sequence(plan.id, result.path.len(), config.camera_trigger),
    );

    // Every waypoint carries the plan altitude.
    for item in &items[1..items.len() - 1] {
        let MissionCommand::NavWaypoint {
            altitude,
            relative_altitude,
            ..
        } = item.command
        else {
            unreachable!("interior items are waypoints");
        };
        assert!((altitude - 50.0).abs() < f64::EPSILON);
        assert!(relative_altitude);
    }

    // SVG preview: polygon outline plus flight path.
    let metadata = SvgMetadata {
        title: Some("square-survey"),
        description: Some("integration test"),
    };
    let svg = karita_export::to_svg(&staged, &metadata);
    assert!(svg.contains("<svg"));
    assert!(svg.contains("<title>square-survey</title>"));
    assert_eq!(svg.matches("<path").count(), 2);
    assert!(svg.contains("</svg>"));
}

#[test]
fn document_round_trip_is_lossless() {
    let plan = SurveyPlan::from_json(PLAN_JSON).unwrap();
    let json = plan.to_json().unwrap();
    let reloaded = SurveyPlan::from_json(&json).unwrap();
    assert_eq!(plan, reloaded);
}

#[test]
fn disabled_trigger_drops_the_bracketing_items() {
    let mut plan = SurveyPlan::from_json(PLAN_JSON).unwrap();
    plan.camera_trigger = false;
    let config = plan.survey_config();

    let staged = plan_staged(&plan.polygon_points(), &config);
    let items = karita_export::mission_items(&staged.result, &config, plan.id);

    assert_eq!(items.len(), staged.result.path.len());
    assert!(
        items
            .iter()
            .all(|item| matches!(item.command, MissionCommand::NavWaypoint { .. })),
    );
    assert_eq!(staged.result.camera_shots, 0);
}
