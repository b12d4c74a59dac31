use std::sync::Mutex;

use glam::{Vec2, Vec3};

use super::registry::{ConverterPriority, SceneConverter};
use super::vertex::{v, Vertex};
use super::{BufferBuilder, ConvertContext, ConvertError};
use crate::scene::{Aabb, SceneObject};

/// Half-extent of the marker cube drawn for point entities.
const POINT_ENTITY_HALF_EXTENT: f32 = 8.0;

/// Fallback converter drawing a colored marker box for point entities.
pub struct PointEntityConverter;

impl SceneConverter for PointEntityConverter {
    fn priority(&self) -> ConverterPriority {
        ConverterPriority::DefaultLowest
    }

    fn supports(&self, obj: &SceneObject) -> bool {
        obj.entity_class().is_some() && !obj.has_solids()
    }

    fn convert(
        &self,
        builder: &Mutex<BufferBuilder>,
        _ctx: &ConvertContext,
        obj: &SceneObject,
    ) -> Result<(), ConvertError> {
        let center = obj.origin().unwrap_or_else(|| obj.bounding_box().center());
        convert_box(builder, obj, Aabb::around(center, POINT_ENTITY_HALF_EXTENT))
    }
}

/// Emits an axis-aligned cuboid into the builder, colored by the object's
/// entity class.
///
/// The box is sized by the caller, independently of the object's own
/// bounding geometry; composite converters use it for small fixed-size
/// markers. Like [`super::solid::convert_faces`] this is a pure delegate,
/// not a registry dispatch.
pub fn convert_box(
    builder: &Mutex<BufferBuilder>,
    obj: &SceneObject,
    aabb: Aabb,
) -> Result<(), ConvertError> {
    let color = obj
        .entity_class()
        .map(|c| c.color)
        .unwrap_or([255, 255, 255, 255]);
    let (vertices, indices) = box_geometry(aabb, color);

    let mut guard = builder.lock().map_err(|_| ConvertError::Poisoned)?;
    guard.append_group(None, &vertices, &indices);
    Ok(())
}

/// Cuboid as 6 quads, 24 vertices / 36 indices, outward normals.
fn box_geometry(aabb: Aabb, color: [u8; 4]) -> (Vec<Vertex>, Vec<u32>) {
    let (lo, hi) = (aabb.min, aabb.max);
    let p = Vec3::new;

    // Four corners per face so each face keeps its own flat normal.
    let quads: [([Vec3; 4], Vec3); 6] = [
        (
            [
                p(hi.x, lo.y, lo.z),
                p(hi.x, hi.y, lo.z),
                p(hi.x, hi.y, hi.z),
                p(hi.x, lo.y, hi.z),
            ],
            Vec3::X,
        ),
        (
            [
                p(lo.x, lo.y, hi.z),
                p(lo.x, hi.y, hi.z),
                p(lo.x, hi.y, lo.z),
                p(lo.x, lo.y, lo.z),
            ],
            -Vec3::X,
        ),
        (
            [
                p(lo.x, hi.y, lo.z),
                p(lo.x, hi.y, hi.z),
                p(hi.x, hi.y, hi.z),
                p(hi.x, hi.y, lo.z),
            ],
            Vec3::Y,
        ),
        (
            [
                p(hi.x, lo.y, lo.z),
                p(hi.x, lo.y, hi.z),
                p(lo.x, lo.y, hi.z),
                p(lo.x, lo.y, lo.z),
            ],
            -Vec3::Y,
        ),
        (
            [
                p(lo.x, lo.y, hi.z),
                p(hi.x, lo.y, hi.z),
                p(hi.x, hi.y, hi.z),
                p(lo.x, hi.y, hi.z),
            ],
            Vec3::Z,
        ),
        (
            [
                p(lo.x, hi.y, lo.z),
                p(hi.x, hi.y, lo.z),
                p(hi.x, lo.y, lo.z),
                p(lo.x, lo.y, lo.z),
            ],
            -Vec3::Z,
        ),
    ];

    let uvs = [
        Vec2::new(0.0, 0.0),
        Vec2::new(1.0, 0.0),
        Vec2::new(1.0, 1.0),
        Vec2::new(0.0, 1.0),
    ];

    let vertices: Vec<Vertex> = quads
        .iter()
        .flat_map(|(corners, normal)| {
            corners
                .iter()
                .zip(uvs)
                .map(|(&pos, uv)| v(pos, *normal, uv, color))
        })
        .collect();

    let indices: Vec<u32> = (0..6u32)
        .flat_map(|f| {
            let o = f * 4;
            [o, o + 1, o + 2, o, o + 2, o + 3]
        })
        .collect();

    (vertices, indices)
}
