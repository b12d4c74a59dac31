use glam::Vec3;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Box spanning all given points; `None` for an empty iterator.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let mut aabb = Self {
            min: first,
            max: first,
        };
        for p in points {
            aabb.min = aabb.min.min(p);
            aabb.max = aabb.max.max(p);
        }
        Some(aabb)
    }

    /// Cube of the given half-extent around a center point.
    pub fn around(center: Vec3, half_extent: f32) -> Self {
        Self {
            min: center - Vec3::splat(half_extent),
            max: center + Vec3::splat(half_extent),
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }
}

/// Texture reference and projection for one face.
///
/// UVs are computed by projecting face points onto the u/v axes:
/// `u = (p·u_axis / x_scale + x_shift) / texture_width` (same for v).
#[derive(Debug, Clone, PartialEq)]
pub struct FaceTexture {
    pub name: String,
    pub u_axis: Vec3,
    pub v_axis: Vec3,
    pub x_shift: f32,
    pub y_shift: f32,
    pub x_scale: f32,
    pub y_scale: f32,
}

impl FaceTexture {
    /// Texture projected flat onto a face with the given in-plane axes.
    pub fn new(name: impl Into<String>, u_axis: Vec3, v_axis: Vec3) -> Self {
        Self {
            name: name.into(),
            u_axis,
            v_axis,
            x_shift: 0.0,
            y_shift: 0.0,
            x_scale: 1.0,
            y_scale: 1.0,
        }
    }
}

/// An ordered polygon boundary with a texture reference.
///
/// Faces are immutable once produced; converters only read them.
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    vertices: Vec<Vec3>,
    texture: FaceTexture,
}

impl Face {
    pub fn new(vertices: Vec<Vec3>, texture: FaceTexture) -> Self {
        Self { vertices, texture }
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn texture(&self) -> &FaceTexture {
        &self.texture
    }

    /// Unit normal of the face winding, or zero for degenerate faces.
    pub fn normal(&self) -> Vec3 {
        if self.vertices.len() < 3 {
            return Vec3::ZERO;
        }
        let (a, b, c) = (self.vertices[0], self.vertices[1], self.vertices[2]);
        (b - a).cross(c - a).normalize_or_zero()
    }
}
