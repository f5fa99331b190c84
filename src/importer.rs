use std::path::Path;

use crate::{
    engine::{
        assets::{AssetError, Assets},
        host::Host,
    },
    pose::{PoseDocument, PoseError, PoseReport, apply_pose, apply_scene_rotation},
};

/// How a single import run ended.
#[derive(Debug)]
pub enum Outcome {
    LoadFailed(AssetError),
    ApplyFailed(PoseError),
    Applied(PoseReport),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Applied(_))
    }
}

/// Load the pose file at `pose_path` and apply it to the rig called `rig_name`. Nothing in the
/// host is touched if the file can not be loaded.
///
/// Progress is printed to stdout; per-bone problems are logged by the pose applier.
pub fn import_pose<H: Host>(
    assets: &Assets,
    host: &mut H,
    pose_path: &Path,
    rig_name: &str,
) -> Outcome {
    println!("\nLoading pose from: {}", pose_path.display());
    let document = match assets.load_direct::<PoseDocument>(pose_path) {
        Ok(document) => {
            println!("✓ Pose data loaded successfully");
            document
        }
        Err(err) => {
            println!("✗ Error loading pose: {err}");
            return Outcome::LoadFailed(err);
        }
    };

    println!("\nApplying scene rotation...");
    if let Some(degrees) =
        apply_scene_rotation(host, rig_name, document.scene_rotation.as_ref())
    {
        println!(
            "Applied scene rotation: X={}°, Y={}°, Z={}°",
            degrees.x, degrees.y, degrees.z
        );
    }

    println!("\nApplying pose to armature '{rig_name}'...");
    match apply_pose(host, rig_name, &document) {
        Ok(report) => {
            println!("Applied pose to {} bones", report.applied);
            println!("Skipped {} bones", report.skipped);
            Outcome::Applied(report)
        }
        Err(err) => {
            println!("✗ {err}");
            Outcome::ApplyFailed(err)
        }
    }
}

pub fn print_banner() {
    println!("{}", "=".repeat(50));
    println!("VRM Pose Importer");
    println!("{}", "=".repeat(50));
}

const NEXT_STEPS: &[&str] = &[
    "Adjust the pose as needed",
    "Add keyframes for animation",
    "Export as FBX if desired",
];

const LOAD_HINTS: &[&str] = &[
    "Check that the pose file path is correct",
    "Verify the file is valid pose JSON",
    "Export the pose again from the posing tool",
];

const APPLY_HINTS: &[&str] = &[
    "Check that the rig name matches your armature",
    "Verify the bone name mappings",
    "Ensure the VRM model is properly imported",
];

/// The heading and hints printed after a run. Each way of failing gets its own hints.
pub fn closing_hints(outcome: &Outcome) -> (&'static str, &'static [&'static str]) {
    match outcome {
        Outcome::Applied(_) => ("Next steps", NEXT_STEPS),
        Outcome::LoadFailed(_) => ("Troubleshooting", LOAD_HINTS),
        Outcome::ApplyFailed(_) => ("Troubleshooting", APPLY_HINTS),
    }
}

/// Print the result line and closing hints for an outcome.
pub fn print_outcome(outcome: &Outcome) {
    match outcome {
        Outcome::Applied(_) => println!("\n✓ Pose applied successfully!"),
        Outcome::LoadFailed(_) => println!("\n✗ Failed to load pose"),
        Outcome::ApplyFailed(_) => println!("\n✗ Failed to apply pose"),
    }

    let (heading, hints) = closing_hints(outcome);
    println!("\n{heading}:");
    for (number, hint) in hints.iter().enumerate() {
        println!("{}. {hint}", number + 1);
    }

    println!("\n{}", "=".repeat(50));
}
