use glam::{Mat4, Quat, Vec3};

/// A translation and rotation that can be converted into a 4x4 matrix.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl Transform {
    /// Create a new transform from a translation.
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            rotation: Quat::IDENTITY,
        }
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_euler_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = euler_to_quat(rotation);
        self
    }

    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.translation)
    }
}

fn euler_to_quat(rotation: Vec3) -> Quat {
    Quat::from_euler(glam::EulerRot::XYZ, rotation.x, rotation.y, rotation.z)
}
