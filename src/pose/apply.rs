use tracing::warn;

use crate::engine::host::Host;

use super::{bone_map::map_bone, document::PoseDocument};

#[derive(Debug, thiserror::Error)]
pub enum PoseError {
    #[error("Armature '{0}' not found!")]
    RigNotFound(String),

    #[error("'{0}' is not an armature!")]
    RigTypeMismatch(String),

    #[error("No vrmPose data found in JSON!")]
    MissingPoseData,
}

/// How many bones received a rotation and how many were skipped because they could not be
/// resolved. Entries with a malformed rotation are in neither count.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoseReport {
    pub applied: u32,
    pub skipped: u32,
}

/// Pose documents store quaternions as (x, y, z, w); the host consumes (w, x, y, z).
pub fn xyzw_to_wxyz([x, y, z, w]: [f32; 4]) -> [f32; 4] {
    [w, x, y, z]
}

/// Write the bone rotations of `document` into the rig called `rig_name`.
///
/// The rig is switched into pose mode before any bone is touched. Every resolved bone has its
/// local rotation replaced. Bones are written one at a time, so a failure part way leaves the
/// earlier bones posed.
pub fn apply_pose<H: Host>(
    host: &mut H,
    rig_name: &str,
    document: &PoseDocument,
) -> Result<PoseReport, PoseError> {
    let rig = host
        .find_object(rig_name)
        .ok_or_else(|| PoseError::RigNotFound(rig_name.to_string()))?;

    if !host.is_rig(rig) {
        return Err(PoseError::RigTypeMismatch(rig_name.to_string()));
    }

    host.enter_pose_mode(rig);

    let poses = document
        .vrm_pose
        .as_ref()
        .filter(|poses| !poses.is_empty())
        .ok_or(PoseError::MissingPoseData)?;

    let mut report = PoseReport::default();

    for (canonical, bone_data) in poses.iter() {
        let Some(rigged) = map_bone(canonical) else {
            warn!("No mapping for VRM bone '{canonical}'");
            report.skipped += 1;
            continue;
        };

        let Some(bone) = host.bone(rig, rigged) else {
            warn!("Bone '{rigged}' not found in armature");
            report.skipped += 1;
            continue;
        };

        let Some(components) = bone_data.components() else {
            continue;
        };

        let [w, x, y, z] = xyzw_to_wxyz(components);
        host.set_bone_quaternion(bone, w, x, y, z);
        report.applied += 1;
    }

    host.refresh_view();

    Ok(report)
}

#[cfg(test)]
pub mod tests {
    use glam::{Quat, Vec3};

    use super::*;
    use crate::engine::{
        scene::{Armature, InteractionMode, Object, ObjectKind, SceneGraph},
        skeleton::{Bone, NO_PARENT, Skeleton},
        transform::Transform,
    };

    /// An armature called "Armature" with Hips, Spine and LeftUpperArm, and a mesh called "Body".
    pub fn test_scene() -> SceneGraph {
        let skeleton = Skeleton::from_iter(
            [("Hips", NO_PARENT), ("Spine", 0), ("LeftUpperArm", 1)].map(|(name, parent)| Bone {
                parent,
                transform: Transform::from_translation(Vec3::Y),
                name: name.to_string(),
            }),
        );

        let mut scene = SceneGraph::default();
        scene.add_object(Object::new(
            "Armature",
            ObjectKind::Armature(Armature::new(skeleton)),
        ));
        scene.add_object(Object::new("Body", ObjectKind::Mesh));
        scene
    }

    pub fn bone_rotation(scene: &SceneGraph, bone: &str) -> Quat {
        let rig = scene.find_object("Armature").unwrap();
        let bone = scene.bone(rig, bone).unwrap();
        scene.bone_rotation(bone).unwrap()
    }

    fn document(json: &str) -> PoseDocument {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn applies_a_mapped_bone() {
        let mut scene = test_scene();
        let report = apply_pose(
            &mut scene,
            "Armature",
            &document(r#"{ "vrmPose": { "spine": { "rotation": [0.0, 0.6, 0.0, 0.8] } } }"#),
        )
        .unwrap();

        assert_eq!(
            report,
            PoseReport {
                applied: 1,
                skipped: 0
            }
        );
        assert_eq!(
            bone_rotation(&scene, "Spine"),
            Quat::from_xyzw(0.0, 0.6, 0.0, 0.8)
        );
        assert!(!scene.needs_refresh());
    }

    #[test]
    fn unmapped_bone_is_skipped() {
        let mut scene = test_scene();
        let report = apply_pose(
            &mut scene,
            "Armature",
            &document(r#"{ "vrmPose": { "tail": { "rotation": [0.0, 0.6, 0.0, 0.8] } } }"#),
        )
        .unwrap();

        assert_eq!(
            report,
            PoseReport {
                applied: 0,
                skipped: 1
            }
        );
        for bone in ["Hips", "Spine", "LeftUpperArm"] {
            assert_eq!(bone_rotation(&scene, bone), Quat::IDENTITY);
        }
    }

    #[test]
    fn bone_missing_from_rig_is_skipped() {
        let mut scene = test_scene();
        let report = apply_pose(
            &mut scene,
            "Armature",
            &document(r#"{ "vrmPose": { "head": { "rotation": [0.0, 0.6, 0.0, 0.8] } } }"#),
        )
        .unwrap();

        assert_eq!(
            report,
            PoseReport {
                applied: 0,
                skipped: 1
            }
        );
    }

    #[test]
    fn malformed_rotation_is_not_counted() {
        let mut scene = test_scene();
        let rig = scene.find_object("Armature").unwrap();
        let spine = scene.bone(rig, "Spine").unwrap();
        scene.set_bone_quaternion(spine, 0.8, 0.6, 0.0, 0.0);

        let report = apply_pose(
            &mut scene,
            "Armature",
            &document(r#"{ "vrmPose": { "spine": { "rotation": [0.0, 0.6, 0.8] } } }"#),
        )
        .unwrap();

        assert_eq!(report, PoseReport::default());
        assert_eq!(
            bone_rotation(&scene, "Spine"),
            Quat::from_xyzw(0.6, 0.0, 0.0, 0.8)
        );
    }

    #[test]
    fn mixed_document() {
        let mut scene = test_scene();
        let report = apply_pose(
            &mut scene,
            "Armature",
            &document(
                r#"{ "vrmPose": {
                    "hips": { "rotation": [0, 0, 0, 1] },
                    "tail": { "rotation": [0, 0, 0, 1] },
                    "leftUpperArm": { "rotation": [0, 0, 0.7071068, 0.7071068] },
                    "head": { "rotation": [0, 0, 0, 1] },
                    "spine": { "rotation": [] }
                } }"#,
            ),
        )
        .unwrap();

        assert_eq!(
            report,
            PoseReport {
                applied: 2,
                skipped: 2
            }
        );
    }

    #[test]
    fn rotation_is_overwritten_not_composed() {
        let mut scene = test_scene();
        let pose = document(r#"{ "vrmPose": { "hips": { "rotation": [0.0, 0.6, 0.0, 0.8] } } }"#);

        apply_pose(&mut scene, "Armature", &pose).unwrap();
        apply_pose(&mut scene, "Armature", &pose).unwrap();

        assert_eq!(
            bone_rotation(&scene, "Hips"),
            Quat::from_xyzw(0.0, 0.6, 0.0, 0.8)
        );
    }

    #[test]
    fn missing_rig_mutates_nothing() {
        let mut scene = test_scene();
        let result = apply_pose(
            &mut scene,
            "Rig",
            &document(r#"{ "vrmPose": { "hips": { "rotation": [0.0, 0.6, 0.0, 0.8] } } }"#),
        );

        assert!(matches!(result, Err(PoseError::RigNotFound(name)) if name == "Rig"));
        assert_eq!(bone_rotation(&scene, "Hips"), Quat::IDENTITY);
        assert_eq!(scene.mode(), InteractionMode::Object);
    }

    #[test]
    fn object_that_is_not_a_rig() {
        let mut scene = test_scene();
        let result = apply_pose(
            &mut scene,
            "Body",
            &document(r#"{ "vrmPose": { "hips": { "rotation": [0.0, 0.6, 0.0, 0.8] } } }"#),
        );

        assert!(matches!(result, Err(PoseError::RigTypeMismatch(name)) if name == "Body"));
        assert_eq!(scene.mode(), InteractionMode::Object);
    }

    #[test]
    fn missing_or_empty_pose_section() {
        for json in ["{}", r#"{ "vrmPose": {} }"#, r#"{ "vrmPose": null }"#] {
            let mut scene = test_scene();
            let result = apply_pose(&mut scene, "Armature", &document(json));
            assert!(matches!(result, Err(PoseError::MissingPoseData)), "{json}");

            // The rig is already in pose mode by the time the pose section is checked.
            assert_eq!(scene.mode(), InteractionMode::Pose);
        }
    }

    fn wxyz_to_xyzw([w, x, y, z]: [f32; 4]) -> [f32; 4] {
        [x, y, z, w]
    }

    #[test]
    fn quaternion_round_trip() {
        let xyzw = [0.1825742_f32, 0.3651484, 0.5477226, 0.7302967];
        let json = format!(r#"{{ "vrmPose": {{ "leftUpperArm": {{ "rotation": {xyzw:?} }} }} }}"#);

        let mut scene = test_scene();
        apply_pose(&mut scene, "Armature", &document(&json)).unwrap();

        let stored = bone_rotation(&scene, "LeftUpperArm");
        let restored = wxyz_to_xyzw([stored.w, stored.x, stored.y, stored.z]);
        for (restored, original) in restored.into_iter().zip(xyzw) {
            assert!((restored - original).abs() < 1e-6);
        }
    }

    #[test]
    fn reorder_helpers_are_inverse() {
        assert_eq!(xyzw_to_wxyz([1.0, 2.0, 3.0, 4.0]), [4.0, 1.0, 2.0, 3.0]);
        assert_eq!(wxyz_to_xyzw([4.0, 1.0, 2.0, 3.0]), [1.0, 2.0, 3.0, 4.0]);
    }
}
