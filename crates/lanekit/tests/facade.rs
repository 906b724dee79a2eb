//! The facade wires the three crates together consistently.

#![cfg(all(feature = "probe", feature = "math"))]

use lanekit::{BoolLane, Element, FloatLane, OutputFormat, Quat, Vec3, dispatch::F64Lane};

#[test]
fn env_report_is_sourceable() {
  let text = lanekit::report().display(OutputFormat::Env).to_string();
  for line in text.lines() {
    let assignment = line.strip_prefix("export LANEKIT_").expect("every line exports a LANEKIT_ variable");
    let (name, value) = assignment.split_once('=').expect("NAME=value");
    assert!(name.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_'), "{name}");
    let quoted = value.len() >= 2 && value.starts_with('\'') && value.ends_with('\'');
    assert!(quoted || (!value.is_empty() && !value.contains(char::is_whitespace)), "{line}");
  }
  let backend = format!("export LANEKIT_BACKEND={}", lanekit::dispatch::BACKEND.name());
  assert!(text.lines().any(|l| l == backend));
}

#[test]
fn summary_mentions_backend() {
  let text = lanekit::report().to_string();
  assert!(text.contains(&format!("backend:    {}", lanekit::dispatch::BACKEND.name())));
}

#[test]
fn lane_and_scalar_normalize_agree() {
  let v = Vec3::new(3.0f64, 4.0, 12.0);
  let scalar = v.length_squared().rcp_sqrt();
  let lane = F64Lane::splat(v.length_squared()).rcp_sqrt();
  assert!(lane.lanes_eq(F64Lane::splat(scalar)).all());
  assert_eq!(v.normalize(), v * scalar);
}

#[test]
fn rotations_through_facade() {
  let q = Quat::from_axis_angle(Vec3::Y, core::f64::consts::PI);
  let v = q.rotate(Vec3::X);
  assert!(v.max_abs_diff(-Vec3::X) < 1e-12);
  assert!((q.to_mat3().determinant() - 1.0).abs() < 1e-12);
}
