//! Object-to-geometry conversion: the buffer builder, the converter
//! registry, and the stock converters.

mod buffer;
mod decal;
mod entity;
mod registry;
mod solid;
mod vertex;

pub use buffer::{BufferBuilder, IndexGroup};
pub use decal::DecalConverter;
pub use entity::{convert_box, PointEntityConverter};
pub use registry::{ConverterPriority, ConverterRegistry, SceneConverter};
pub use solid::{convert_faces, SolidConverter};
pub use vertex::{v, Vertex};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use thiserror::Error;

use crate::resources::{TextureInfo, TextureResolver};
use crate::scene::ObjectId;

/// Failure of a conversion pass. Degradable problems (missing textures,
/// unmatched objects) never surface here.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("conversion pass cancelled")]
    Cancelled,
    #[error("buffer builder lock poisoned by a panicked converter")]
    Poisoned,
    #[error("converter failed on object {object}: {reason}")]
    Converter { object: ObjectId, reason: String },
}

/// Coarse-grained cancellation for a conversion pass; checked between object
/// conversions, never mid-converter.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Placeholder size used when a texture cannot be resolved.
const PLACEHOLDER_TEXTURE: TextureInfo = TextureInfo {
    width: 64,
    height: 64,
};

/// Shared services handed to every converter invocation.
pub struct ConvertContext {
    textures: Arc<dyn TextureResolver>,
}

impl ConvertContext {
    pub fn new(textures: Arc<dyn TextureResolver>) -> Self {
        Self { textures }
    }

    /// Resolves a texture, degrading to a placeholder so one missing
    /// dependency never blocks the rest of the scene.
    pub fn texture_info(&self, name: &str) -> TextureInfo {
        match self.textures.resolve(name) {
            Some(info) => info,
            None => {
                log::warn!("texture '{name}' not found, using placeholder");
                PLACEHOLDER_TEXTURE
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::NullResolver;

    #[test]
    fn missing_textures_degrade_to_placeholder() {
        let ctx = ConvertContext::new(Arc::new(NullResolver));
        let info = ctx.texture_info("does/not/exist");
        assert_eq!((info.width, info.height), (64, 64));
    }

    #[test]
    fn cancellation_token_is_shared_between_clones() {
        let token = CancellationToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());
        token.cancel();
        assert!(clone.is_cancelled());
    }
}
