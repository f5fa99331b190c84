use glam::Vec3;
use tracing::debug;

use crate::engine::host::Host;

use super::document::SceneRotation;

/// Replace the Euler rotation of the object called `rig_name` with the scene rotation of a pose
/// document. Does nothing when there is no rotation or no such object. Returns the applied
/// rotation in degrees.
pub fn apply_scene_rotation<H: Host>(
    host: &mut H,
    rig_name: &str,
    scene_rotation: Option<&SceneRotation>,
) -> Option<Vec3> {
    let scene_rotation = scene_rotation.filter(|rotation| !rotation.is_empty())?;
    let object = host.find_object(rig_name)?;

    let radians = scene_rotation.radians();
    host.set_object_euler_xyz(object, radians.x, radians.y, radians.z);

    debug!("Set '{rig_name}' rotation to {radians} radians");

    Some(scene_rotation.degrees())
}
