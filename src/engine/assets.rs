use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("File not found ({})", .0.display())]
    FileNotFound(PathBuf),

    #[error("Permission denied ({})", .0.display())]
    PermissionDenied(PathBuf),

    #[error("Decode error ({}): {}", .0.display(), .1)]
    Decode(PathBuf, String),

    #[error("Unknown error ({}): {}", .0.display(), .1)]
    Unknown(PathBuf, String),
}

impl AssetError {
    pub fn from_io_error(error: std::io::Error, path: &Path) -> Self {
        match error.kind() {
            std::io::ErrorKind::NotFound => Self::FileNotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Unknown(path.to_path_buf(), error.to_string()),
        }
    }

    pub fn decode(error: impl std::fmt::Display, path: &Path) -> Self {
        Self::Decode(path.to_path_buf(), error.to_string())
    }
}

pub struct AssetLoadContext<'a> {
    pub path: &'a Path,
}

/// Something that can be decoded from the raw bytes of a file.
pub trait AssetType: Sized {
    fn from_raw(raw: &[u8], context: &AssetLoadContext) -> Result<Self, AssetError>;
}

/// JSON documents decode straight through serde.
#[macro_export]
macro_rules! json_asset {
    ($ty:ty) => {
        impl $crate::engine::assets::AssetType for $ty {
            fn from_raw(
                raw: &[u8],
                context: &$crate::engine::assets::AssetLoadContext,
            ) -> Result<Self, $crate::engine::assets::AssetError> {
                serde_json::from_slice(raw).map_err(|err| {
                    $crate::engine::assets::AssetError::decode(err, context.path)
                })
            }
        }
    };
}

pub trait AssetFileSystem {
    fn load(&self, path: &Path) -> Result<Vec<u8>, AssetError>;
    fn store(&self, path: &Path, data: &[u8]) -> Result<(), AssetError>;
}

#[derive(Clone)]
pub struct Assets {
    file_system: Arc<dyn AssetFileSystem>,
}

impl Assets {
    pub fn with_file_system(file_system: Arc<dyn AssetFileSystem>) -> Self {
        Self { file_system }
    }

    pub fn load_direct<A: AssetType>(&self, path: impl AsRef<Path>) -> Result<A, AssetError> {
        let data = self.file_system.load(path.as_ref())?;
        let load_context = AssetLoadContext {
            path: path.as_ref(),
        };
        A::from_raw(&data, &load_context)
    }

    pub fn store_json<T: serde::Serialize>(
        &self,
        path: impl AsRef<Path>,
        value: &T,
    ) -> Result<(), AssetError> {
        let data = serde_json::to_vec_pretty(value)
            .map_err(|err| AssetError::Unknown(path.as_ref().to_path_buf(), err.to_string()))?;
        self.file_system.store(path.as_ref(), &data)
    }
}

/// Reads and writes files relative to `root`. An empty root resolves paths against the current
/// working directory; absolute paths ignore the root.
pub struct PlatformFileSystem {
    root: PathBuf,
}

impl PlatformFileSystem {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

impl AssetFileSystem for PlatformFileSystem {
    fn load(&self, path: &Path) -> Result<Vec<u8>, AssetError> {
        std::fs::read(self.root.join(path)).map_err(|err| AssetError::from_io_error(err, path))
    }

    fn store(&self, path: &Path, data: &[u8]) -> Result<(), AssetError> {
        std::fs::write(self.root.join(path), data)
            .map_err(|err| AssetError::from_io_error(err, path))
    }
}
