use ahash::HashMap;
use glam::Mat4;

use super::transform::Transform;

pub type BoneIndex = u32;

/// Parent index of root bones.
pub const NO_PARENT: BoneIndex = BoneIndex::MAX;

#[derive(Clone, Debug)]
pub struct Bone {
    pub parent: BoneIndex,
    /// Local transform relative to the parent bone.
    pub transform: Transform,
    pub name: String,
}

#[derive(Clone, Debug, Default)]
pub struct Skeleton {
    pub bones: Vec<Bone>,
    name_lookup: HashMap<String, BoneIndex>,
}

impl Skeleton {
    /// Bones must be ordered so that every parent comes before its children. When two bones share
    /// a name, lookups resolve to the first one.
    pub fn from_iter(bones: impl IntoIterator<Item = Bone>) -> Self {
        let bones: Vec<Bone> = bones.into_iter().collect();
        let mut name_lookup = HashMap::default();
        for (index, bone) in bones.iter().enumerate() {
            name_lookup
                .entry(bone.name.clone())
                .or_insert(index as BoneIndex);
        }
        Self { bones, name_lookup }
    }

    pub fn bone_index_by_name(&self, name: &str) -> Option<BoneIndex> {
        self.name_lookup.get(name).cloned()
    }

    pub fn bone(&self, index: BoneIndex) -> Option<&Bone> {
        self.bones.get(index as usize)
    }

    pub fn bone_mut(&mut self, index: BoneIndex) -> Option<&mut Bone> {
        self.bones.get_mut(index as usize)
    }

    /// Model-space transforms of all bones, parents resolved in a single pass.
    pub fn model_transforms(&self) -> Vec<Mat4> {
        let mut transforms: Vec<Mat4> = Vec::with_capacity(self.bones.len());
        for bone in self.bones.iter() {
            // Parents come before their children; anything else is treated as a root.
            let parent_transform = transforms
                .get(bone.parent as usize)
                .copied()
                .unwrap_or(Mat4::IDENTITY);
            transforms.push(parent_transform * bone.transform.to_mat4());
        }
        transforms
    }
}
