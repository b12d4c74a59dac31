use super::vertex::Vertex;

/// One contiguous run of indices sharing a texture binding, in draw order.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexGroup {
    /// Texture to bind for this run; `None` draws with the flat default.
    pub texture: Option<String>,
    pub index_start: u32,
    pub index_count: u32,
}

/// Append-only accumulator for one conversion pass.
///
/// Many converters feed a single builder; base offsets are handed out
/// monotonically and a range, once appended, is never moved or edited. The
/// only way to update previously appended content is a full rebuild. When
/// converters run in parallel the builder sits behind a mutex and each call
/// here is one critical section.
#[derive(Debug, Default)]
pub struct BufferBuilder {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    groups: Vec<IndexGroup>,
}

impl BufferBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a batch of vertices, returning the base offset assigned to it.
    pub fn append_vertices(&mut self, vertices: &[Vertex]) -> u32 {
        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(vertices);
        base
    }

    /// Appends local indices, rebased by `base` before storage.
    pub fn append_indices(&mut self, local: &[u32], base: u32) {
        self.indices.extend(local.iter().map(|i| i + base));
    }

    /// Appends vertices, their local indices and a group record in one call,
    /// so a converter's output stays contiguous under concurrent appends.
    pub fn append_group(&mut self, texture: Option<String>, vertices: &[Vertex], local: &[u32]) {
        let base = self.append_vertices(vertices);
        let index_start = self.indices.len() as u32;
        self.append_indices(local, base);
        self.groups.push(IndexGroup {
            texture,
            index_start,
            index_count: local.len() as u32,
        });
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn groups(&self) -> &[IndexGroup] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec2, Vec3};

    fn vert(x: f32) -> Vertex {
        Vertex::new(Vec3::new(x, 0.0, 0.0), Vec3::Z, Vec2::ZERO, [255; 4])
    }

    #[test]
    fn offsets_are_monotonic_and_indices_rebased() {
        let mut b = BufferBuilder::new();
        let first = b.append_vertices(&[vert(0.0), vert(1.0), vert(2.0)]);
        let second = b.append_vertices(&[vert(3.0), vert(4.0)]);
        assert_eq!(first, 0);
        assert_eq!(second, 3);

        b.append_indices(&[0, 1, 2], first);
        b.append_indices(&[0, 1], second);
        assert_eq!(b.indices(), &[0, 1, 2, 3, 4]);
    }

    #[test]
    fn append_group_records_draw_order() {
        let mut b = BufferBuilder::new();
        b.append_group(Some("brick".into()), &[vert(0.0), vert(1.0)], &[0, 1]);
        b.append_group(None, &[vert(2.0)], &[0]);

        assert_eq!(b.groups().len(), 2);
        assert_eq!(b.groups()[0].index_start, 0);
        assert_eq!(b.groups()[0].index_count, 2);
        assert_eq!(b.groups()[1].index_start, 2);
        // Second group's index was rebased past the first batch.
        assert_eq!(b.indices(), &[0, 1, 2]);
    }
}
