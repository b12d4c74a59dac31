use std::sync::Mutex;

use glam::Vec2;

use super::registry::{ConverterPriority, SceneConverter};
use super::vertex::Vertex;
use super::{BufferBuilder, ConvertContext, ConvertError};
use crate::scene::{Face, SceneObject};

/// Converts brush solids into textured, triangulated faces.
pub struct SolidConverter;

impl SceneConverter for SolidConverter {
    fn priority(&self) -> ConverterPriority {
        ConverterPriority::DefaultLow
    }

    fn supports(&self, obj: &SceneObject) -> bool {
        obj.has_solids()
    }

    fn convert(
        &self,
        builder: &Mutex<BufferBuilder>,
        ctx: &ConvertContext,
        obj: &SceneObject,
    ) -> Result<(), ConvertError> {
        let faces: Vec<&Face> = obj.solid_faces().collect();
        convert_faces(builder, ctx, obj, &faces)
    }
}

/// Emits a set of faces into the builder: one textured index group per face,
/// fan-triangulated, UVs from the face's texture projection.
///
/// This is a pure delegate: composite converters (decals) reuse it directly
/// instead of re-entering registry dispatch. All geometry math runs before
/// the builder lock is taken, and the whole face set is appended under one
/// lock so the output stays contiguous.
pub fn convert_faces(
    builder: &Mutex<BufferBuilder>,
    ctx: &ConvertContext,
    obj: &SceneObject,
    faces: &[&Face],
) -> Result<(), ConvertError> {
    let mut batches = Vec::with_capacity(faces.len());
    for face in faces {
        if let Some(batch) = triangulate_face(ctx, face) {
            batches.push(batch);
        }
    }
    if batches.is_empty() {
        return Ok(());
    }

    log::trace!("object {}: {} face batches", obj.id(), batches.len());

    let mut guard = builder.lock().map_err(|_| ConvertError::Poisoned)?;
    for (texture, vertices, indices) in batches {
        guard.append_group(Some(texture), &vertices, &indices);
    }
    Ok(())
}

fn triangulate_face(ctx: &ConvertContext, face: &Face) -> Option<(String, Vec<Vertex>, Vec<u32>)> {
    let points = face.vertices();
    if points.len() < 3 {
        return None;
    }

    let texture = face.texture();
    let info = ctx.texture_info(&texture.name);
    let (tex_w, tex_h) = (info.width.max(1) as f32, info.height.max(1) as f32);
    let normal = face.normal();

    let vertices: Vec<Vertex> = points
        .iter()
        .map(|&p| {
            let u = (p.dot(texture.u_axis) / texture.x_scale + texture.x_shift) / tex_w;
            let v = (p.dot(texture.v_axis) / texture.y_scale + texture.y_shift) / tex_h;
            Vertex::new(p, normal, Vec2::new(u, v), [255, 255, 255, 255])
        })
        .collect();

    // Convex polygon boundary: a triangle fan from the first point.
    let indices: Vec<u32> = (1..points.len() as u32 - 1)
        .flat_map(|i| [0, i, i + 1])
        .collect();

    Some((texture.name.clone(), vertices, indices))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::NullResolver;
    use crate::scene::{FaceTexture, ObjectData, ObjectId};
    use glam::Vec3;
    use std::sync::Arc;

    fn test_ctx() -> ConvertContext {
        ConvertContext::new(Arc::new(NullResolver))
    }

    fn unit_quad() -> Face {
        Face::new(
            vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(64.0, 0.0, 0.0),
                Vec3::new(64.0, 64.0, 0.0),
                Vec3::new(0.0, 64.0, 0.0),
            ],
            FaceTexture::new("brick", Vec3::X, Vec3::Y),
        )
    }

    #[test]
    fn quad_becomes_fan_of_two_triangles() {
        let builder = Mutex::new(BufferBuilder::new());
        let mut obj = SceneObject::new(ObjectId(0));
        obj.attach(ObjectData::Solid {
            faces: vec![unit_quad()],
        });

        SolidConverter
            .convert(&builder, &test_ctx(), &obj)
            .unwrap();

        let b = builder.into_inner().unwrap();
        assert_eq!(b.vertices().len(), 4);
        assert_eq!(b.indices(), &[0, 1, 2, 0, 2, 3]);
        assert_eq!(b.groups().len(), 1);
        assert_eq!(b.groups()[0].texture.as_deref(), Some("brick"));
        // Placeholder 64x64 texture maps the 64-unit quad onto the full UV range.
        assert_eq!(b.vertices()[2].uv, [u16::MAX, u16::MAX]);
    }

    #[test]
    fn degenerate_faces_emit_nothing() {
        let builder = Mutex::new(BufferBuilder::new());
        let face = Face::new(
            vec![Vec3::ZERO, Vec3::X],
            FaceTexture::new("brick", Vec3::X, Vec3::Y),
        );
        let obj = SceneObject::new(ObjectId(0));
        convert_faces(&builder, &test_ctx(), &obj, &[&face]).unwrap();
        assert!(builder.into_inner().unwrap().is_empty());
    }
}
