pub mod apply;
pub mod bone_map;
pub mod document;
pub mod scene_rotation;

pub use apply::{PoseError, PoseReport, apply_pose};
pub use document::PoseDocument;
pub use scene_rotation::apply_scene_rotation;
