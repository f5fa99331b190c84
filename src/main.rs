use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use tracing::{error, info};
use vrm_pose::{
    engine::{
        assets::{AssetError, Assets, PlatformFileSystem},
        scene::SceneGraph,
    },
    importer,
    rig::{PosedScene, SceneFile, SceneFileError, humanoid_scene},
};

/// Pose file used when none is given on the command line.
const DEFAULT_POSE_PATH: &str = "pose.json";

/// Name of the armature object to pose when none is given on the command line.
const DEFAULT_RIG_NAME: &str = "Armature";

#[derive(clap::Parser)]
#[command(about = "Apply a VRM pose JSON file to a skeletal rig")]
struct Opts {
    /// Path to the pose JSON file.
    #[arg(default_value = DEFAULT_POSE_PATH)]
    pose: PathBuf,

    /// Name of the armature object in the scene.
    #[arg(long, default_value = DEFAULT_RIG_NAME)]
    rig: String,

    /// Scene description JSON. A humanoid armature named after `--rig` is used when omitted.
    #[arg(long)]
    scene: Option<PathBuf>,

    /// Write the posed scene to this JSON file.
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
enum SetupError {
    #[error("Could not load scene: {0}")]
    Load(#[from] AssetError),

    #[error("Invalid scene: {0}")]
    Scene(#[from] SceneFileError),
}

fn load_scene(assets: &Assets, opts: &Opts) -> Result<SceneGraph, SetupError> {
    Ok(match opts.scene {
        Some(ref path) => {
            info!("Loading scene from {}", path.display());
            assets.load_direct::<SceneFile>(path)?.into_scene()?
        }
        None => humanoid_scene(&opts.rig)?,
    })
}

fn main() {
    tracing_subscriber::fmt().init();

    let opts = Opts::parse();
    let assets = Assets::with_file_system(Arc::new(PlatformFileSystem::new(PathBuf::new())));

    let mut scene = match load_scene(&assets, &opts) {
        Ok(scene) => scene,
        Err(err) => {
            error!("{err}");
            return;
        }
    };

    importer::print_banner();
    let outcome = importer::import_pose(&assets, &mut scene, &opts.pose, &opts.rig);
    importer::print_outcome(&outcome);

    if outcome.is_success()
        && let Some(ref output) = opts.output
    {
        match assets.store_json(output, &PosedScene::from_scene(&scene)) {
            Ok(()) => info!("Wrote posed scene to {}", output.display()),
            Err(err) => error!("Could not write posed scene: {err}"),
        }
    }
}
