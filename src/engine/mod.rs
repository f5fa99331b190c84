pub mod assets;
pub mod host;
pub mod scene;
pub mod skeleton;
pub mod storage;

pub mod dirty;
pub mod transform;

