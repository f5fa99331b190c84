use ahash::HashMap;
use glam::Vec3;
use serde::Deserialize;

use crate::engine::{
    host::Host,
    scene::{Armature, Object, ObjectKind, SceneGraph},
    skeleton::{Bone, BoneIndex, NO_PARENT, Skeleton},
    transform::Transform,
};

/// Offset of every non-root bone from its parent in the built-in humanoid.
const HUMANOID_BONE_LENGTH: f32 = 0.1;

#[derive(Debug, thiserror::Error)]
pub enum SceneFileError {
    #[error("Bone '{bone}' in '{object}' has parent '{parent}', which is not listed before it")]
    UnknownParent {
        object: String,
        bone: String,
        parent: String,
    },
}

/// Description of a host scene to apply poses to.
#[derive(Debug, Deserialize)]
pub struct SceneFile {
    pub objects: Vec<ObjectDesc>,
}

crate::json_asset!(SceneFile);

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKindDesc {
    Armature,
    Mesh,
    Empty,
}

#[derive(Debug, Deserialize)]
pub struct ObjectDesc {
    pub name: String,
    pub kind: ObjectKindDesc,
    /// Only used for armatures. Parents must be listed before their children.
    #[serde(default)]
    pub bones: Vec<BoneDesc>,
    /// Initial Euler rotation in degrees.
    #[serde(default)]
    pub rotation: Option<[f32; 3]>,
}

#[derive(Debug, Deserialize)]
pub struct BoneDesc {
    pub name: String,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub translation: Option<[f32; 3]>,
}

impl SceneFile {
    pub fn into_scene(self) -> Result<SceneGraph, SceneFileError> {
        let mut scene = SceneGraph::default();

        for desc in self.objects {
            let kind = match desc.kind {
                ObjectKindDesc::Armature => {
                    ObjectKind::Armature(Armature::new(build_skeleton(&desc.name, &desc.bones)?))
                }
                ObjectKindDesc::Mesh => ObjectKind::Mesh,
                ObjectKindDesc::Empty => ObjectKind::Empty,
            };

            let handle = scene.add_object(Object::new(desc.name, kind));
            if let Some(degrees) = desc.rotation {
                let radians = Vec3::from(degrees.map(f32::to_radians));
                scene.set_object_euler_xyz(handle, radians.x, radians.y, radians.z);
            }
        }

        scene.refresh_view();
        Ok(scene)
    }
}

fn build_skeleton(object: &str, bones: &[BoneDesc]) -> Result<Skeleton, SceneFileError> {
    let mut indices: HashMap<&str, BoneIndex> = HashMap::default();
    let mut skeleton_bones = Vec::with_capacity(bones.len());

    for (index, desc) in bones.iter().enumerate() {
        let parent = match desc.parent.as_deref() {
            None => NO_PARENT,
            Some(parent) => *indices
                .get(parent)
                .ok_or_else(|| SceneFileError::UnknownParent {
                    object: object.to_string(),
                    bone: desc.name.clone(),
                    parent: parent.to_string(),
                })?,
        };

        indices
            .entry(desc.name.as_str())
            .or_insert(index as BoneIndex);
        skeleton_bones.push(Bone {
            parent,
            transform: Transform::from_translation(
                desc.translation.map(Vec3::from).unwrap_or_default(),
            ),
            name: desc.name.clone(),
        });
    }

    Ok(Skeleton::from_iter(skeleton_bones))
}

/// The parent of each bone in the built-in humanoid, parents first.
fn humanoid_hierarchy() -> Vec<(String, Option<String>)> {
    let mut bones: Vec<(String, Option<String>)> = Vec::new();

    let mut chain = |names: &[String], root_parent: Option<&str>| {
        let mut parent = root_parent.map(str::to_string);
        for name in names {
            bones.push((name.clone(), parent.clone()));
            parent = Some(name.clone());
        }
    };

    let core = ["Hips", "Spine", "Chest", "UpperChest", "Neck", "Head"].map(String::from);
    chain(&core[..], None);

    for side in ["Left", "Right"] {
        let arm = ["Shoulder", "UpperArm", "LowerArm", "Hand"].map(|b| format!("{side}{b}"));
        chain(&arm[..], Some("UpperChest"));

        let leg = ["UpperLeg", "LowerLeg", "Foot", "Toes"].map(|b| format!("{side}{b}"));
        chain(&leg[..], Some("Hips"));

        let hand = format!("{side}Hand");
        for finger in ["Thumb", "Index", "Middle", "Ring", "Little"] {
            let segments = ["Proximal", "Intermediate", "Distal"]
                .map(|segment| format!("{side}{finger}{segment}"));
            chain(&segments[..], Some(hand.as_str()));
        }
    }

    bones
}

/// A scene holding a single humanoid armature called `rig_name` whose bones are the targets of
/// the bone map.
pub fn humanoid_scene(rig_name: &str) -> Result<SceneGraph, SceneFileError> {
    let bones = humanoid_hierarchy()
        .into_iter()
        .map(|(name, parent)| BoneDesc {
            translation: parent
                .as_ref()
                .map(|_| [0.0, HUMANOID_BONE_LENGTH, 0.0]),
            name,
            parent,
        })
        .collect();

    let file = SceneFile {
        objects: vec![ObjectDesc {
            name: rig_name.to_string(),
            kind: ObjectKindDesc::Armature,
            bones,
            rotation: None,
        }],
    };

    file.into_scene()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        engine::assets::{Assets, tests::TestFileSystem},
        pose::bone_map::rig_bone_names,
    };

    #[test]
    fn humanoid_has_every_mapped_bone() {
        let scene = humanoid_scene("Armature").unwrap();
        let rig = scene.find_object("Armature").unwrap();
        assert!(scene.is_rig(rig));

        for name in rig_bone_names() {
            assert!(scene.bone(rig, name).is_some(), "{name}");
        }

        let armature = scene.object_by_name("Armature").unwrap().armature().unwrap();
        assert_eq!(armature.skeleton.bones.len(), rig_bone_names().count());
    }

    #[test]
    fn humanoid_hierarchy_is_connected() {
        let scene = humanoid_scene("Armature").unwrap();
        let armature = scene.object_by_name("Armature").unwrap().armature().unwrap();
        let skeleton = &armature.skeleton;

        let parent_of = |name: &str| {
            let bone = skeleton.bone(skeleton.bone_index_by_name(name).unwrap()).unwrap();
            skeleton.bone(bone.parent).map(|parent| parent.name.clone())
        };

        assert_eq!(parent_of("Hips"), None);
        assert_eq!(parent_of("LeftShoulder").as_deref(), Some("UpperChest"));
        assert_eq!(parent_of("RightUpperLeg").as_deref(), Some("Hips"));
        assert_eq!(parent_of("LeftThumbProximal").as_deref(), Some("LeftHand"));
        assert_eq!(
            parent_of("RightLittleDistal").as_deref(),
            Some("RightLittleIntermediate")
        );
    }

    #[test]
    fn load_scene_file() {
        let assets = Assets::with_file_system(Arc::new(TestFileSystem::with_file(
            "scene.json",
            r#"{ "objects": [
                { "name": "Rig", "kind": "armature", "rotation": [90, 0, 0], "bones": [
                    { "name": "Hips" },
                    { "name": "Spine", "parent": "Hips", "translation": [0, 1, 0] }
                ] },
                { "name": "Camera", "kind": "empty" }
            ] }"#,
        )));

        let scene = assets
            .load_direct::<SceneFile>("scene.json")
            .unwrap()
            .into_scene()
            .unwrap();

        let rig = scene.find_object("Rig").unwrap();
        assert!(scene.is_rig(rig));
        assert!(scene.bone(rig, "Spine").is_some());
        assert!(
            scene
                .object_by_name("Rig")
                .unwrap()
                .rotation_euler
                .abs_diff_eq(Vec3::new(std::f32::consts::FRAC_PI_2, 0.0, 0.0), 1e-6)
        );

        let camera = scene.find_object("Camera").unwrap();
        assert!(!scene.is_rig(camera));
        assert!(!scene.needs_refresh());
    }

    #[test]
    fn parent_must_come_first() {
        let file: SceneFile = serde_json::from_str(
            r#"{ "objects": [ { "name": "Rig", "kind": "armature", "bones": [
                { "name": "Spine", "parent": "Hips" },
                { "name": "Hips" }
            ] } ] }"#,
        )
        .unwrap();

        let error = file.into_scene().err().unwrap();
        assert!(matches!(
            error,
            SceneFileError::UnknownParent { ref bone, ref parent, .. }
                if bone == "Spine" && parent == "Hips"
        ));
    }
}
