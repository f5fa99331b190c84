/// The capabilities a host application has to expose so a pose can be written into one of its
/// rigs. Handles are only valid for the host that produced them.
pub trait Host {
    type Object: Copy;
    type Bone: Copy;

    /// Look up an object in the scene by its name.
    fn find_object(&self, name: &str) -> Option<Self::Object>;

    /// Whether the object is a skeletal rig (armature).
    fn is_rig(&self, object: Self::Object) -> bool;

    /// Make the object active and switch it into pose editing mode.
    fn enter_pose_mode(&mut self, object: Self::Object);

    /// Look up a pose bone of a rig by its name.
    fn bone(&self, object: Self::Object, name: &str) -> Option<Self::Bone>;

    /// Replace the local rotation of a bone. Components are in (w, x, y, z) order.
    fn set_bone_quaternion(&mut self, bone: Self::Bone, w: f32, x: f32, y: f32, z: f32);

    /// Replace the Euler rotation (radians, XYZ order) of an object.
    fn set_object_euler_xyz(&mut self, object: Self::Object, x: f32, y: f32, z: f32);

    /// Bring everything that depends on object and bone transforms up to date.
    fn refresh_view(&mut self);
}
