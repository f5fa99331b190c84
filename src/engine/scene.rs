use ahash::HashMap;
use glam::{Mat4, Quat, Vec3};
use tracing::{debug, warn};

use super::{
    dirty::Dirty,
    host::Host,
    skeleton::{BoneIndex, Skeleton},
    storage::{Handle, Storage},
    transform::Transform,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display)]
pub enum InteractionMode {
    #[default]
    #[strum(serialize = "OBJECT")]
    Object,
    #[strum(serialize = "POSE")]
    Pose,
}

#[derive(Clone, Debug)]
pub struct Armature {
    pub skeleton: Skeleton,
    /// Model-space bone matrices as of the last view refresh.
    pub posed: Vec<Mat4>,
}

impl Armature {
    pub fn new(skeleton: Skeleton) -> Self {
        let posed = skeleton.model_transforms();
        Self { skeleton, posed }
    }
}

#[derive(Clone, Debug, strum::IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum ObjectKind {
    Armature(Armature),
    Mesh,
    Empty,
}

#[derive(Clone, Debug)]
pub struct Object {
    pub name: String,
    pub kind: ObjectKind,
    pub transform: Transform,
    /// Euler rotation in radians (XYZ order). Kept alongside the transform so it can be read back
    /// exactly as it was written.
    pub rotation_euler: Vec3,
}

impl Object {
    pub fn new(name: impl Into<String>, kind: ObjectKind) -> Self {
        Self {
            name: name.into(),
            kind,
            transform: Transform::default(),
            rotation_euler: Vec3::ZERO,
        }
    }

    pub fn armature(&self) -> Option<&Armature> {
        match &self.kind {
            ObjectKind::Armature(armature) => Some(armature),
            _ => None,
        }
    }

    fn armature_mut(&mut self) -> Option<&mut Armature> {
        match &mut self.kind {
            ObjectKind::Armature(armature) => Some(armature),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BoneHandle {
    pub object: Handle<Object>,
    pub index: BoneIndex,
}

/// In-memory scene of named objects that implements [Host].
#[derive(Default)]
pub struct SceneGraph {
    objects: Storage<Object>,
    name_lookup: HashMap<String, Handle<Object>>,
    active: Option<Handle<Object>>,
    mode: InteractionMode,
    view: Dirty,
}

impl SceneGraph {
    /// Add an object to the scene. A later object with the same name shadows the earlier one in
    /// name lookups.
    pub fn add_object(&mut self, object: Object) -> Handle<Object> {
        let name = object.name.clone();
        let handle = self.objects.insert(object);
        if self.name_lookup.insert(name.clone(), handle).is_some() {
            warn!("Object name '{name}' is used more than once, the last one wins.");
        }
        self.view.smudge();
        handle
    }

    pub fn object_by_name(&self, name: &str) -> Option<&Object> {
        self.find_object(name).and_then(|handle| self.objects.get(handle))
    }

    pub fn objects(&self) -> impl Iterator<Item = &Object> {
        self.objects.iter().map(|(_, object)| object)
    }

    /// The object last switched into pose mode.
    pub fn active_object(&self) -> Option<&Object> {
        self.active.and_then(|handle| self.objects.get(handle))
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    /// Whether transforms changed since the last [Host::refresh_view].
    #[cfg(test)]
    pub fn needs_refresh(&self) -> bool {
        self.view.is_dirty()
    }

    #[cfg(test)]
    pub fn bone_rotation(&self, bone: BoneHandle) -> Option<Quat> {
        self.objects
            .get(bone.object)
            .and_then(Object::armature)
            .and_then(|armature| armature.skeleton.bone(bone.index))
            .map(|bone| bone.transform.rotation)
    }
}

impl Host for SceneGraph {
    type Object = Handle<Object>;
    type Bone = BoneHandle;

    fn find_object(&self, name: &str) -> Option<Self::Object> {
        self.name_lookup.get(name).cloned()
    }

    fn is_rig(&self, object: Self::Object) -> bool {
        self.objects
            .get(object)
            .is_some_and(|object| object.armature().is_some())
    }

    fn enter_pose_mode(&mut self, object: Self::Object) {
        self.active = Some(object);
        self.mode = InteractionMode::Pose;
        debug!("Switched {:?} to {} mode", object, self.mode);
    }

    fn bone(&self, object: Self::Object, name: &str) -> Option<Self::Bone> {
        let armature = self.objects.get(object)?.armature()?;
        armature
            .skeleton
            .bone_index_by_name(name)
            .map(|index| BoneHandle { object, index })
    }

    fn set_bone_quaternion(&mut self, bone: Self::Bone, w: f32, x: f32, y: f32, z: f32) {
        let Some(target) = self
            .objects
            .get_mut(bone.object)
            .and_then(Object::armature_mut)
            .and_then(|armature| armature.skeleton.bone_mut(bone.index))
        else {
            return;
        };

        target.transform.rotation = Quat::from_xyzw(x, y, z, w);
        self.view.smudge();
    }

    fn set_object_euler_xyz(&mut self, object: Self::Object, x: f32, y: f32, z: f32) {
        let Some(target) = self.objects.get_mut(object) else {
            return;
        };

        target.rotation_euler = Vec3::new(x, y, z);
        target.transform = target
            .transform
            .clone()
            .with_euler_rotation(target.rotation_euler);
        self.view.smudge();
    }

    fn refresh_view(&mut self) {
        let objects = &mut self.objects;
        let refreshed = self.view.if_dirty(|| {
            for armature in objects.iter_mut().filter_map(Object::armature_mut) {
                armature.posed = armature.skeleton.model_transforms();
            }
        });
        debug!("View refresh (changed: {refreshed})");
    }
}
