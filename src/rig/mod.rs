pub mod export;
pub mod scene_file;

pub use export::PosedScene;
pub use scene_file::{SceneFile, SceneFileError, humanoid_scene};
