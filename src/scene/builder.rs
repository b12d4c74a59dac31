use glam::Vec3;

use super::object::{EntityClass, ObjectData, ObjectId, SceneObject};
use super::Scene;
use crate::scene::Face;

/// Fluent helper for assembling objects; plain [`SceneObject::attach`] works
/// just as well.
pub struct SceneObjectBuilder<'s> {
    scene: &'s mut Scene,
    object: SceneObject,
}

impl<'s> SceneObjectBuilder<'s> {
    pub(super) fn new(scene: &'s mut Scene, id: ObjectId) -> Self {
        Self {
            scene,
            object: SceneObject::new(id),
        }
    }

    pub fn with_origin(mut self, origin: Vec3) -> Self {
        self.object.attach(ObjectData::Origin(origin));
        self
    }

    pub fn with_class(mut self, class: EntityClass) -> Self {
        self.object.attach(ObjectData::EntityClass(class));
        self
    }

    pub fn with_solid(mut self, faces: Vec<Face>) -> Self {
        self.object.attach(ObjectData::Solid { faces });
        self
    }

    pub fn with_decal(mut self, faces: Vec<Face>) -> Self {
        self.object.attach(ObjectData::Decal { faces });
        self
    }

    /// Adds the assembled object to the scene and returns its id.
    pub fn insert(self) -> ObjectId {
        let id = self.object.id();
        self.scene.insert(self.object);
        id
    }
}
