//! Texture resolution seam between converters and the engine's resources.
//!
//! Converters only ever need texture dimensions (for UV scaling) and,
//! eventually, the pixel bytes; both arrive through traits so the pipeline
//! never couples to a package format.

use std::collections::HashMap;
use std::io::{Read, Seek};
use std::sync::Arc;

use crate::io::{SharedStore, SubStream};

/// Dimensions a converter needs to project UVs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureInfo {
    pub width: u32,
    pub height: u32,
}

/// Looks textures up by name. `None` means the caller should degrade to a
/// placeholder; resolution failures never abort a conversion pass.
pub trait TextureResolver: Send + Sync {
    fn resolve(&self, name: &str) -> Option<TextureInfo>;
}

/// Resolver that knows no textures; everything degrades to placeholders.
pub struct NullResolver;

impl TextureResolver for NullResolver {
    fn resolve(&self, _name: &str) -> Option<TextureInfo> {
        None
    }
}

/// Simple in-memory resolver backed by a name → size table.
#[derive(Default)]
pub struct TableResolver {
    sizes: HashMap<String, TextureInfo>,
}

impl TableResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, width: u32, height: u32) {
        self.sizes.insert(name.into(), TextureInfo { width, height });
    }
}

impl TextureResolver for TableResolver {
    fn resolve(&self, name: &str) -> Option<TextureInfo> {
        self.sizes.get(name).copied()
    }
}

/// Byte range and decoded dimensions of one texture inside a package.
#[derive(Debug, Clone, Copy)]
pub struct PackageEntry {
    pub offset: u64,
    pub length: u64,
    pub width: u32,
    pub height: u32,
}

/// A directory of texture entries over one shared backing store.
///
/// Pixel data is handed out as [`SubStream`] byte-range views, so any number
/// of converters can read entries concurrently without disturbing readers
/// that use the store's own cursor.
pub struct TexturePackage<S> {
    store: Arc<SharedStore<S>>,
    entries: HashMap<String, PackageEntry>,
}

impl<S: Read + Seek + Send> TexturePackage<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(SharedStore::new(store)),
            entries: HashMap::new(),
        }
    }

    pub fn add_entry(&mut self, name: impl Into<String>, entry: PackageEntry) {
        self.entries.insert(name.into(), entry);
    }

    /// Opens a read-only view over the entry's byte range.
    pub fn open(&self, name: &str) -> Option<SubStream<Arc<SharedStore<S>>>> {
        let entry = self.entries.get(name)?;
        Some(SubStream::new(
            Arc::clone(&self.store),
            entry.offset,
            entry.length,
        ))
    }
}

impl<S: Read + Seek + Send> TextureResolver for TexturePackage<S> {
    fn resolve(&self, name: &str) -> Option<TextureInfo> {
        self.entries.get(name).map(|e| TextureInfo {
            width: e.width,
            height: e.height,
        })
    }
}
