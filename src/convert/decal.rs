use std::sync::Mutex;

use super::registry::{ConverterPriority, SceneConverter};
use super::{entity, solid, BufferBuilder, ConvertContext, ConvertError};
use crate::scene::{Aabb, Face, SceneObject};

/// Half-extent of the 8-unit marker cube drawn at a decal's origin.
const DECAL_MARKER_HALF_EXTENT: f32 = 4.0;

/// Converts decal entities: the projected decal faces plus a small origin
/// marker, reusing the solid and point-entity emitters as plain functions.
pub struct DecalConverter;

impl SceneConverter for DecalConverter {
    fn priority(&self) -> ConverterPriority {
        ConverterPriority::DefaultLow
    }

    fn supports(&self, obj: &SceneObject) -> bool {
        obj.entity_class().is_some() && obj.has_decals()
    }

    // Decals are terminal: letting the generic entity converter run after
    // this one would double-draw the object with a second marker box.
    fn should_stop_processing(&self, _obj: &SceneObject) -> bool {
        true
    }

    fn convert(
        &self,
        builder: &Mutex<BufferBuilder>,
        ctx: &ConvertContext,
        obj: &SceneObject,
    ) -> Result<(), ConvertError> {
        let faces: Vec<&Face> = obj.decal_faces().collect();
        solid::convert_faces(builder, ctx, obj, &faces)?;

        let origin = obj.origin().unwrap_or_else(|| obj.bounding_box().center());
        entity::convert_box(builder, obj, Aabb::around(origin, DECAL_MARKER_HALF_EXTENT))
    }
}
