//! Frame update behaviour of the public `Body` API
//!
//! Drives a body on a headless surface with synthetic landmark frames and
//! checks what ends up in the scene and on the surface.

use approx::assert_relative_eq;
use body_engine::prelude::*;
use body_engine::rig::BONE_COUNT;
use body_engine::scene::Shape;

fn standing() -> PoseFrame {
    PoseFrame::new()
        .with_point(LandmarkName::Nose, 100.0, 260.0)
        .with_point(LandmarkName::LeftEar, 80.0, 270.0)
        .with_point(LandmarkName::RightEar, 120.0, 270.0)
        .with_point(LandmarkName::LeftShoulder, -50.0, 200.0)
        .with_point(LandmarkName::RightShoulder, 50.0, 200.0)
        .with_point(LandmarkName::LeftElbow, -80.0, 140.0)
        .with_point(LandmarkName::RightElbow, 80.0, 140.0)
        .with_point(LandmarkName::LeftWrist, -90.0, 80.0)
        .with_point(LandmarkName::RightWrist, 90.0, 80.0)
        .with_point(LandmarkName::LeftHip, -40.0, 0.0)
        .with_point(LandmarkName::RightHip, 40.0, 0.0)
        .with_point(LandmarkName::LeftKnee, -45.0, -100.0)
        .with_point(LandmarkName::RightKnee, 45.0, -100.0)
        .with_point(LandmarkName::LeftAnkle, -45.0, -200.0)
        .with_point(LandmarkName::RightAnkle, 45.0, -200.0)
}

fn body_with(config: BodyConfig) -> Body {
    Body::new(HeadlessSurface::new(800, 600), config).unwrap()
}

fn body() -> Body {
    body_with(BodyConfig::default())
}

fn surface(body: &Body) -> &HeadlessSurface {
    body.renderer().surface().as_any().downcast_ref::<HeadlessSurface>().unwrap()
}

fn snapshot(body: &Body) -> Vec<(BodyPart, SceneNode)> {
    BodyPart::ALL
        .iter()
        .filter_map(|part| body.component(*part).map(|node| (*part, node.clone())))
        .collect()
}

#[test]
fn test_identical_frames_are_idempotent() {
    let mut body = body();
    body.update(&standing()).unwrap();
    let before = snapshot(&body);
    let keys: Vec<_> = BodyPart::ALL.iter().map(|part| body.registry().get(*part)).collect();

    let report = body.update(&standing()).unwrap();
    assert_eq!(report.updated(), 6);

    let after = snapshot(&body);
    assert_eq!(before.len(), after.len());
    for ((part, old), (_, new)) in before.iter().zip(&after) {
        assert_relative_eq!(old.transform.position, new.transform.position, epsilon = 1e-5);
        assert_relative_eq!(old.transform.scale, new.transform.scale, epsilon = 1e-5);
        if part.is_limb() {
            let (old, new) = (old.as_skinned().unwrap(), new.as_skinned().unwrap());
            for (a, b) in old.skeleton.bones().iter().zip(new.skeleton.bones()) {
                assert_relative_eq!(a.local_offset, b.local_offset, epsilon = 1e-5);
            }
        }
    }

    let keys_after: Vec<_> = BodyPart::ALL.iter().map(|part| body.registry().get(*part)).collect();
    assert_eq!(keys, keys_after);
    assert_eq!(body.registry().len(), 6);
}

#[test]
fn test_head_scale_follows_ear_distance() {
    let mut body = body();
    body.update(&standing()).unwrap();

    let wider = standing()
        .with_point(LandmarkName::LeftEar, 70.0, 270.0)
        .with_point(LandmarkName::RightEar, 130.0, 270.0);
    let report = body.update(&wider).unwrap();
    assert!(!report.resolution(BodyPart::Head).unwrap().is_created());

    let head = body.component(BodyPart::Head).unwrap();
    assert_relative_eq!(head.transform.scale, Vec3::new(1.5, 1.5, 1.0), epsilon = 1e-6);
    assert_eq!(head.as_static().unwrap().shape, Shape::Sphere { radius: 20.0 });
    assert_relative_eq!(head.transform.position, Vec3::new(100.0, 260.0, 0.0));
}

#[test]
fn test_torso_matches_shoulders_and_hips() {
    let mut body = body();
    body.update(&standing()).unwrap();

    let torso = body.component(BodyPart::Torso).unwrap();
    assert_relative_eq!(torso.transform.position, Vec3::new(0.0, 100.0, 0.0));
    match torso.as_static().unwrap().shape {
        Shape::Cylinder(cylinder) => {
            assert_relative_eq!(cylinder.radius_top, 100.0);
            assert_relative_eq!(cylinder.radius_bottom, 80.0);
            assert_relative_eq!(cylinder.height, 200.0);
        }
        Shape::Sphere { .. } => panic!("torso built as a sphere"),
    }
}

#[test]
fn test_limbs_have_three_bones_and_normalized_weights() {
    let mut body = body();
    body.update(&standing()).unwrap();

    for part in BodyPart::ALL.iter().filter(|part| part.is_limb()) {
        let limb = body.component(*part).unwrap().as_skinned().unwrap();
        assert_eq!(limb.skeleton.len(), BONE_COUNT);
        assert_eq!(limb.weights.len(), limb.mesh.vertices.len());
        for weight in &limb.weights {
            assert_relative_eq!(weight.total(), 1.0, epsilon = 1e-5);
        }
    }

    let left_arm = body.component(BodyPart::LeftArm).unwrap();
    assert_relative_eq!(left_arm.transform.position, Vec3::new(-50.0, 200.0, 0.0));
}

#[test]
fn test_limb_update_moves_bones_only() {
    let mut body = body();
    body.update(&standing()).unwrap();
    let before = body.component(BodyPart::RightArm).unwrap().clone();

    let waving = standing()
        .with_point(LandmarkName::RightElbow, 100.0, 240.0)
        .with_point(LandmarkName::RightWrist, 120.0, 300.0);
    body.update(&waving).unwrap();

    let after = body.component(BodyPart::RightArm).unwrap();
    let (old, new) = (before.as_skinned().unwrap(), after.as_skinned().unwrap());
    assert_eq!(old.mesh, new.mesh);
    assert_eq!(old.weights, new.weights);
    assert_eq!(before.transform, after.transform);
    assert_relative_eq!(new.skeleton.bones()[1].local_offset, Vec3::new(100.0, 240.0, 0.0));
    assert_relative_eq!(new.skeleton.bones()[2].local_offset, Vec3::new(120.0, 300.0, 0.0));
}

#[test]
fn test_missing_landmark_leaves_scene_untouched() {
    let mut body = body();
    body.update(&standing()).unwrap();
    let before = snapshot(&body);
    let frames = body.frame_count();

    let mut broken = standing()
        .with_point(LandmarkName::LeftElbow, -200.0, 0.0)
        .with_point(LandmarkName::LeftEar, 0.0, 270.0);
    broken.remove(LandmarkName::LeftWrist);

    match body.update(&broken) {
        Err(BodyError::Pose(PoseError::MissingLandmark(name))) => assert_eq!(name, LandmarkName::LeftWrist),
        other => panic!("expected a missing landmark, got {:?}", other.map(|_| ())),
    }

    assert_eq!(snapshot(&body), before);
    assert_eq!(body.frame_count(), frames);
}

#[test]
fn test_update_after_collapse_keeps_scene() {
    let mut body = body_with(BodyConfig::default().with_torso_policy(TorsoPolicy::Replace));
    body.update(&standing()).unwrap();
    let before = snapshot(&body);
    body.handle_resize(0, 0).unwrap();

    for _ in 0..3 {
        assert!(matches!(body.update(&standing()), Err(BodyError::Render(_))));
    }
    assert_eq!(snapshot(&body), before);
    assert_eq!(body.scene().len(), 6);
    assert!(body.registry().retired().is_empty());

    body.handle_resize(800, 600).unwrap();
    body.update(&standing()).unwrap();
    assert_eq!(body.scene().len(), 7);
}

#[test]
fn test_non_finite_landmarks_leave_scene_untouched() {
    let mut body = body();
    body.update(&standing()).unwrap();
    let before = snapshot(&body);

    let corrupt = standing()
        .with_point(LandmarkName::Nose, f32::NAN, 260.0)
        .with_point(LandmarkName::LeftWrist, f32::INFINITY, 80.0);
    match body.update(&corrupt) {
        Err(BodyError::Pose(PoseError::NonFiniteLandmark(_))) => {}
        other => panic!("expected a non-finite landmark, got {:?}", other.map(|_| ())),
    }

    assert_eq!(snapshot(&body), before);
    let head = body.component(BodyPart::Head).unwrap();
    assert!(head.transform.position.iter().all(|c| c.is_finite()));
}

#[test]
fn test_resize_leaves_components_alone() {
    let mut body = body();
    body.update(&standing()).unwrap();
    let before = snapshot(&body);

    body.handle_resize(1920, 1080).unwrap();

    assert_relative_eq!(body.camera().aspect, 1920.0 / 1080.0);
    assert_eq!(body.renderer().surface().size(), (1920, 1080));
    assert_eq!(snapshot(&body), before);
    let frame = surface(&body).last_frame().unwrap();
    assert_eq!((frame.width, frame.height), (1920, 1080));
}

#[test]
fn test_resize_honours_pixel_ratio() {
    let mut body = body_with(BodyConfig::default().with_pixel_ratio(2.0));
    body.handle_resize(400, 300).unwrap();
    assert_eq!(body.renderer().surface().size(), (800, 600));
    assert_relative_eq!(body.camera().aspect, 400.0 / 300.0);
}

#[test]
fn test_each_update_renders_once() {
    let mut body = body();
    let initial = surface(&body).presented();

    for _ in 0..3 {
        body.update(&standing()).unwrap();
    }

    assert_eq!(surface(&body).presented(), initial + 3);
    let frame = surface(&body).last_frame().unwrap();
    assert_eq!(frame.items.len(), 6);
    for part in BodyPart::ALL {
        let item = frame.item(part.label()).unwrap();
        assert!(!item.vertices.is_empty());
        assert_eq!(item.indices.len() % 3, 0);
    }
}

#[test]
fn test_update_in_place_keeps_one_torso() {
    let mut body = body();
    let first = body.update(&standing()).unwrap();
    let second = body.update(&standing()).unwrap();

    let torso = first.resolution(BodyPart::Torso).unwrap();
    assert!(torso.is_created());
    assert_eq!(second.resolution(BodyPart::Torso), Some(Resolution::Updated(torso.key())));
    assert_eq!(body.scene().len(), 6);
}

#[test]
fn test_replace_policy_accumulates_torsos() {
    let mut body = body_with(BodyConfig::default().with_torso_policy(TorsoPolicy::Replace));
    let first = body.update(&standing()).unwrap();
    let second = body.update(&standing()).unwrap();
    let third = body.update(&standing()).unwrap();

    for report in [&first, &second, &third] {
        assert!(report.resolution(BodyPart::Torso).unwrap().is_created());
    }
    assert_eq!(second.resolution(BodyPart::Head).map(Resolution::is_created), Some(false));
    assert_eq!(body.scene().len(), 8);
    assert_eq!(body.registry().retired().len(), 2);
    assert_eq!(body.registry().get(BodyPart::Torso), third.resolution(BodyPart::Torso).map(Resolution::key));

    assert_eq!(body.teardown(), 8);
    assert!(body.scene().is_empty());
}

#[test]
fn test_swapped_shoulders_clamp_by_default() {
    let mut body = body();
    let swapped = standing()
        .with_point(LandmarkName::LeftShoulder, 50.0, 200.0)
        .with_point(LandmarkName::RightShoulder, -50.0, 200.0);
    body.update(&swapped).unwrap();

    let torso = body.component(BodyPart::Torso).unwrap();
    match torso.as_static().unwrap().shape {
        Shape::Cylinder(cylinder) => {
            assert_relative_eq!(cylinder.radius_top, body.config().geometry.min_radius);
            assert_relative_eq!(cylinder.radius_bottom, 80.0);
        }
        Shape::Sphere { .. } => panic!("torso built as a sphere"),
    }
}

#[test]
fn test_swapped_shoulders_rejected_on_request() {
    let mut body = body_with(BodyConfig::default().with_handedness(HandednessPolicy::Reject));
    let swapped = standing()
        .with_point(LandmarkName::LeftShoulder, 50.0, 200.0)
        .with_point(LandmarkName::RightShoulder, -50.0, 200.0);

    let result = body.update(&swapped);
    assert!(matches!(
        result,
        Err(BodyError::Geometry(GeometryError::InconsistentHandedness { .. }))
    ));
    assert!(body.scene().is_empty());
    assert!(body.registry().is_empty());
}

#[test]
fn test_config_round_trips_through_toml() {
    let config = BodyConfig::default().with_torso_policy(TorsoPolicy::Replace);
    let text = toml_text(&config);
    let parsed = BodyConfig::from_str_with_format(&text, "body.toml").unwrap();
    assert_eq!(parsed.torso_policy, TorsoPolicy::Replace);
    assert_relative_eq!(parsed.camera.fov_degrees, 75.0);
}

fn toml_text(config: &BodyConfig) -> String {
    let path = std::env::temp_dir().join(format!("body_engine_config_{}.toml", std::process::id()));
    let path = path.to_string_lossy().into_owned();
    config.save_to_file(&path).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    let _ = std::fs::remove_file(&path);
    text
}
