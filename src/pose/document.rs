use std::{fmt, marker::PhantomData};

use glam::Vec3;
use serde::{
    Deserialize, Deserializer,
    de::{
        self, IgnoredAny, MapAccess, SeqAccess, Unexpected, Visitor, value::MapAccessDeserializer,
    },
};

/// A pose file as exported from a VRM posing tool.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoseDocument {
    #[serde(default, deserialize_with = "falsy_as_none")]
    pub vrm_pose: Option<BonePoses>,
    #[serde(default, deserialize_with = "falsy_as_none")]
    pub scene_rotation: Option<SceneRotation>,
}

crate::json_asset!(PoseDocument);

/// Read an optional section that has to be an object. Values that read as false (`null`,
/// `false`, `0`, `""` and `[]`) count as a missing section; any other non-object is an error.
fn falsy_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    struct FalsyVisitor<T>(PhantomData<T>);

    impl<'de, T: Deserialize<'de>> Visitor<'de> for FalsyVisitor<T> {
        type Value = Option<T>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an object or a value that reads as false")
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<N: Deserializer<'de>>(self, inner: N) -> Result<Self::Value, N::Error> {
            inner.deserialize_any(self)
        }

        fn visit_bool<E: de::Error>(self, value: bool) -> Result<Self::Value, E> {
            match value {
                false => Ok(None),
                true => Err(E::invalid_type(Unexpected::Bool(value), &self)),
            }
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
            match value {
                0 => Ok(None),
                _ => Err(E::invalid_type(Unexpected::Signed(value), &self)),
            }
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
            match value {
                0 => Ok(None),
                _ => Err(E::invalid_type(Unexpected::Unsigned(value), &self)),
            }
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
            if value == 0.0 {
                Ok(None)
            } else {
                Err(E::invalid_type(Unexpected::Float(value), &self))
            }
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            match value {
                "" => Ok(None),
                _ => Err(E::invalid_type(Unexpected::Str(value), &self)),
            }
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            match seq.next_element::<IgnoredAny>()? {
                None => Ok(None),
                Some(_) => Err(de::Error::invalid_type(Unexpected::Seq, &self)),
            }
        }

        fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
            T::deserialize(MapAccessDeserializer::new(map)).map(Some)
        }
    }

    deserializer.deserialize_any(FalsyVisitor(PhantomData))
}

/// Bone rotations keyed by canonical bone name, in the order they appear in the document.
#[derive(Debug, Default)]
pub struct BonePoses(Vec<(String, BoneRotation)>);

impl BonePoses {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BoneRotation)> {
        self.0.iter().map(|(name, rotation)| (name.as_str(), rotation))
    }
}

impl<'de> Deserialize<'de> for BonePoses {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct BonePosesVisitor;

        impl<'de> Visitor<'de> for BonePosesVisitor {
            type Value = BonePoses;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of bone names to rotations")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries: Vec<(String, BoneRotation)> =
                    Vec::with_capacity(map.size_hint().unwrap_or_default());

                while let Some((name, value)) = map.next_entry::<String, serde_json::Value>()? {
                    let rotation = BoneRotation::from_value(value);
                    // A repeated key keeps its first position but takes the last value.
                    match entries.iter_mut().find(|(existing, _)| *existing == name) {
                        Some((_, existing)) => *existing = rotation,
                        None => entries.push((name, rotation)),
                    }
                }

                Ok(BonePoses(entries))
            }
        }

        deserializer.deserialize_map(BonePosesVisitor)
    }
}

/// The data stored for a single bone. The rotation is kept as raw JSON so a malformed value only
/// affects its own bone.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BoneRotation {
    pub rotation: Option<serde_json::Value>,
}

impl BoneRotation {
    fn from_value(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Object(mut fields) => Self {
                rotation: fields.remove("rotation"),
            },
            _ => Self::default(),
        }
    }

    /// The quaternion components in (x, y, z, w) order, if the rotation is an array of exactly 4
    /// numbers.
    pub fn components(&self) -> Option<[f32; 4]> {
        let serde_json::Value::Array(values) = self.rotation.as_ref()? else {
            return None;
        };
        if values.len() != 4 {
            return None;
        }

        let mut components = [0.0; 4];
        for (component, value) in components.iter_mut().zip(values) {
            *component = value.as_f64()? as f32;
        }
        Some(components)
    }
}

/// Whole-scene rotation in degrees. Missing axes count as 0.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq)]
pub struct SceneRotation {
    #[serde(default)]
    pub x: Option<f32>,
    #[serde(default)]
    pub y: Option<f32>,
    #[serde(default)]
    pub z: Option<f32>,
}

impl SceneRotation {
    /// No axis was given at all.
    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none() && self.z.is_none()
    }

    pub fn degrees(&self) -> Vec3 {
        Vec3::new(
            self.x.unwrap_or_default(),
            self.y.unwrap_or_default(),
            self.z.unwrap_or_default(),
        )
    }

    pub fn radians(&self) -> Vec3 {
        let degrees = self.degrees();
        Vec3::new(
            degrees.x.to_radians(),
            degrees.y.to_radians(),
            degrees.z.to_radians(),
        )
    }
}
