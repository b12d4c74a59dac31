use std::fmt;

use glam::Vec3;

use super::geometry::{Aabb, Face};

/// Stable identity of an object within one scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u64);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Entity classification carried by point and brush entities.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityClass {
    pub name: String,
    /// Editor display color, also baked into marker-box vertices.
    pub color: [u8; 4],
}

impl EntityClass {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: [255, 255, 255, 255],
        }
    }

    pub fn with_color(name: impl Into<String>, color: [u8; 4]) -> Self {
        Self {
            name: name.into(),
            color,
        }
    }
}

/// A typed payload attached to a [`SceneObject`].
///
/// A variant may appear any number of times on one object; lookups are
/// first-matching or all-matching, never positional.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectData {
    /// Declared origin point.
    Origin(Vec3),
    /// Entity classification.
    EntityClass(EntityClass),
    /// Brush geometry: the faces of one convex solid.
    Solid { faces: Vec<Face> },
    /// Decal geometry: faces projected onto nearby solids.
    Decal { faces: Vec<Face> },
}

/// An entity in the editable scene: an identity plus an unordered collection
/// of typed data components. Components are owned exclusively by their
/// object.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    id: ObjectId,
    data: Vec<ObjectData>,
}

impl SceneObject {
    pub fn new(id: ObjectId) -> Self {
        Self {
            id,
            data: Vec::new(),
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn data(&self) -> &[ObjectData] {
        &self.data
    }

    pub fn attach(&mut self, data: ObjectData) {
        self.data.push(data);
    }

    /// First declared origin, if any.
    pub fn origin(&self) -> Option<Vec3> {
        self.data.iter().find_map(|d| match d {
            ObjectData::Origin(o) => Some(*o),
            _ => None,
        })
    }

    /// First entity class, if any.
    pub fn entity_class(&self) -> Option<&EntityClass> {
        self.data.iter().find_map(|d| match d {
            ObjectData::EntityClass(c) => Some(c),
            _ => None,
        })
    }

    /// Faces of every solid component, in attach order.
    pub fn solid_faces(&self) -> impl Iterator<Item = &Face> {
        self.data.iter().flat_map(|d| match d {
            ObjectData::Solid { faces } => faces.as_slice(),
            _ => &[],
        })
    }

    /// Faces of every decal component, in attach order.
    pub fn decal_faces(&self) -> impl Iterator<Item = &Face> {
        self.data.iter().flat_map(|d| match d {
            ObjectData::Decal { faces } => faces.as_slice(),
            _ => &[],
        })
    }

    pub fn has_solids(&self) -> bool {
        self.data.iter().any(|d| matches!(d, ObjectData::Solid { .. }))
    }

    pub fn has_decals(&self) -> bool {
        self.data.iter().any(|d| matches!(d, ObjectData::Decal { .. }))
    }

    /// Bounds derived from all attached geometry, falling back to a small
    /// box around the declared origin for point entities.
    pub fn bounding_box(&self) -> Aabb {
        let points = self
            .solid_faces()
            .chain(self.decal_faces())
            .flat_map(|f| f.vertices().iter().copied());
        if let Some(aabb) = Aabb::from_points(points) {
            return aabb;
        }
        Aabb::around(self.origin().unwrap_or(Vec3::ZERO), 8.0)
    }
}
