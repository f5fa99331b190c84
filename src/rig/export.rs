use serde::Serialize;

use crate::engine::scene::{Object, SceneGraph};

/// Snapshot of object and bone rotations after a pose was applied.
#[derive(Debug, Serialize)]
pub struct PosedScene {
    pub mode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<String>,
    pub objects: Vec<PosedObject>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PosedObject {
    pub name: String,
    pub kind: &'static str,
    /// Degrees, XYZ order.
    pub rotation: [f32; 3],
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub bones: Vec<PosedBone>,
}

#[derive(Debug, Serialize)]
pub struct PosedBone {
    pub name: String,
    /// Local rotation as (x, y, z, w).
    pub rotation: [f32; 4],
    /// Model-space position as of the last view refresh.
    pub head: [f32; 3],
}

impl PosedScene {
    pub fn from_scene(scene: &SceneGraph) -> Self {
        Self {
            mode: scene.mode().to_string(),
            active: scene.active_object().map(|object| object.name.clone()),
            objects: scene.objects().map(PosedObject::from_object).collect(),
        }
    }
}

impl PosedObject {
    fn from_object(object: &Object) -> Self {
        let bones = object
            .armature()
            .map(|armature| {
                armature
                    .skeleton
                    .bones
                    .iter()
                    .zip(armature.posed.iter())
                    .map(|(bone, posed)| PosedBone {
                        name: bone.name.clone(),
                        rotation: bone.transform.rotation.to_array(),
                        head: posed.w_axis.truncate().to_array(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            name: object.name.clone(),
            kind: (&object.kind).into(),
            rotation: object.rotation_euler.to_array().map(f32::to_degrees),
            bones,
        }
    }
}
