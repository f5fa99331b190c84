//! Canonical VRM humanoid bone names and the bone names they have in the target rig.

/// Pairs of (canonical name, rig bone name). Adjust the right-hand side to fit a specific rig.
pub const BONE_MAP: &[(&str, &str)] = &[
    // Core
    ("hips", "Hips"),
    ("spine", "Spine"),
    ("chest", "Chest"),
    ("upperChest", "UpperChest"),
    ("neck", "Neck"),
    ("head", "Head"),
    // Left arm
    ("leftShoulder", "LeftShoulder"),
    ("leftUpperArm", "LeftUpperArm"),
    ("leftLowerArm", "LeftLowerArm"),
    ("leftHand", "LeftHand"),
    // Right arm
    ("rightShoulder", "RightShoulder"),
    ("rightUpperArm", "RightUpperArm"),
    ("rightLowerArm", "RightLowerArm"),
    ("rightHand", "RightHand"),
    // Left leg
    ("leftUpperLeg", "LeftUpperLeg"),
    ("leftLowerLeg", "LeftLowerLeg"),
    ("leftFoot", "LeftFoot"),
    ("leftToes", "LeftToes"),
    // Right leg
    ("rightUpperLeg", "RightUpperLeg"),
    ("rightLowerLeg", "RightLowerLeg"),
    ("rightFoot", "RightFoot"),
    ("rightToes", "RightToes"),
    // Left fingers
    ("leftThumbProximal", "LeftThumbProximal"),
    ("leftThumbIntermediate", "LeftThumbIntermediate"),
    ("leftThumbDistal", "LeftThumbDistal"),
    ("leftIndexProximal", "LeftIndexProximal"),
    ("leftIndexIntermediate", "LeftIndexIntermediate"),
    ("leftIndexDistal", "LeftIndexDistal"),
    ("leftMiddleProximal", "LeftMiddleProximal"),
    ("leftMiddleIntermediate", "LeftMiddleIntermediate"),
    ("leftMiddleDistal", "LeftMiddleDistal"),
    ("leftRingProximal", "LeftRingProximal"),
    ("leftRingIntermediate", "LeftRingIntermediate"),
    ("leftRingDistal", "LeftRingDistal"),
    ("leftLittleProximal", "LeftLittleProximal"),
    ("leftLittleIntermediate", "LeftLittleIntermediate"),
    ("leftLittleDistal", "LeftLittleDistal"),
    // Right fingers
    ("rightThumbProximal", "RightThumbProximal"),
    ("rightThumbIntermediate", "RightThumbIntermediate"),
    ("rightThumbDistal", "RightThumbDistal"),
    ("rightIndexProximal", "RightIndexProximal"),
    ("rightIndexIntermediate", "RightIndexIntermediate"),
    ("rightIndexDistal", "RightIndexDistal"),
    ("rightMiddleProximal", "RightMiddleProximal"),
    ("rightMiddleIntermediate", "RightMiddleIntermediate"),
    ("rightMiddleDistal", "RightMiddleDistal"),
    ("rightRingProximal", "RightRingProximal"),
    ("rightRingIntermediate", "RightRingIntermediate"),
    ("rightRingDistal", "RightRingDistal"),
    ("rightLittleProximal", "RightLittleProximal"),
    ("rightLittleIntermediate", "RightLittleIntermediate"),
    ("rightLittleDistal", "RightLittleDistal"),
];

/// Exact, case-sensitive lookup of the rig bone name for a canonical bone name.
pub fn map_bone(canonical: &str) -> Option<&'static str> {
    BONE_MAP
        .iter()
        .find(|(name, _)| *name == canonical)
        .map(|(_, rigged)| *rigged)
}

/// All rig bone names the map can produce, in table order.
#[cfg(test)]
pub fn rig_bone_names() -> impl Iterator<Item = &'static str> {
    BONE_MAP.iter().map(|(_, rigged)| *rigged)
}
