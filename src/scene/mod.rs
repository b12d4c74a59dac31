//! The editable scene: objects and their attached data components.

mod builder;
mod geometry;
mod object;

pub use builder::SceneObjectBuilder;
pub use geometry::{Aabb, Face, FaceTexture};
pub use object::{EntityClass, ObjectData, ObjectId, SceneObject};

/// An ordered collection of scene objects.
///
/// Ids are handed out by the scene and stay stable for its lifetime; there is
/// no removal here because conversion passes operate on a snapshot.
#[derive(Debug, Default)]
pub struct Scene {
    objects: Vec<SceneObject>,
    next_id: u64,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a fluent builder for a new object.
    pub fn build_object(&mut self) -> SceneObjectBuilder<'_> {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        SceneObjectBuilder::new(self, id)
    }

    /// Creates an empty object and returns its id.
    pub fn spawn(&mut self) -> ObjectId {
        self.build_object().insert()
    }

    pub(crate) fn insert(&mut self, object: SceneObject) {
        self.objects.push(object);
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.id() == id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.iter_mut().find(|o| o.id() == id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
