use std::sync::{Arc, Mutex};

use rayon::prelude::*;

use super::{BufferBuilder, CancellationToken, ConvertContext, ConvertError};
use crate::scene::{Scene, SceneObject};

/// Dispatch priority band for a converter. Higher bands run first; within a
/// band, registration order decides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConverterPriority {
    OverrideLowest,
    DefaultLowest,
    DefaultLow,
    DefaultMedium,
    DefaultHigh,
    DefaultHighest,
    OverrideHighest,
}

/// Turns one scene object (plus its attached data) into geometry.
///
/// Capability is declared through [`SceneConverter::supports`], a predicate
/// over the object's data components — never over nominal types — so new
/// object categories only need a new converter, not registry changes.
/// Collaborators (texture resolver, buffer builder) arrive as explicit
/// arguments.
pub trait SceneConverter: Send + Sync {
    fn priority(&self) -> ConverterPriority;

    /// Whether this converter can process the object.
    fn supports(&self, obj: &SceneObject) -> bool;

    /// When true after a successful convert, lower-priority converters are
    /// skipped for this object.
    fn should_stop_processing(&self, _obj: &SceneObject) -> bool {
        false
    }

    /// Emits geometry for the object. Appends must go through single
    /// [`BufferBuilder`] calls so they stay atomic with respect to offset
    /// allocation; geometry math belongs outside the lock.
    fn convert(
        &self,
        builder: &Mutex<BufferBuilder>,
        ctx: &ConvertContext,
        obj: &SceneObject,
    ) -> Result<(), ConvertError>;
}

/// Holds every known converter and decides which ones process each object.
#[derive(Default)]
pub struct ConverterRegistry {
    converters: Vec<Arc<dyn SceneConverter>>,
}

impl ConverterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-loaded with the stock solid, point-entity and decal
    /// converters.
    pub fn with_default_converters() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(super::solid::SolidConverter));
        registry.register(Arc::new(super::entity::PointEntityConverter));
        registry.register(Arc::new(super::decal::DecalConverter));
        registry
    }

    /// Adds a converter. Capability overlap between converters is expected
    /// and resolved by priority at dispatch time.
    pub fn register(&mut self, converter: Arc<dyn SceneConverter>) {
        self.converters.push(converter);
    }

    /// Runs every matching converter for one object, highest priority first,
    /// halting after any converter whose stop predicate is true. No match is
    /// a normal outcome: the object simply contributes no geometry.
    pub fn convert_object(
        &self,
        builder: &Mutex<BufferBuilder>,
        ctx: &ConvertContext,
        obj: &SceneObject,
    ) -> Result<(), ConvertError> {
        let mut matching: Vec<&Arc<dyn SceneConverter>> =
            self.converters.iter().filter(|c| c.supports(obj)).collect();
        // Stable sort keeps registration order within a priority band.
        matching.sort_by(|a, b| b.priority().cmp(&a.priority()));

        for converter in matching {
            converter.convert(builder, ctx, obj)?;
            if converter.should_stop_processing(obj) {
                break;
            }
        }
        Ok(())
    }

    /// Converts a whole scene into one buffer set.
    ///
    /// Object conversions run in parallel against a shared builder; the pass
    /// checks for cancellation between objects. On error (including
    /// cancellation) the partially filled builder is discarded.
    pub fn convert_scene(
        &self,
        scene: &Scene,
        ctx: &ConvertContext,
        cancel: &CancellationToken,
    ) -> Result<BufferBuilder, ConvertError> {
        let builder = Mutex::new(BufferBuilder::new());

        scene.objects().par_iter().try_for_each(|obj| {
            if cancel.is_cancelled() {
                return Err(ConvertError::Cancelled);
            }
            self.convert_object(&builder, ctx, obj)
        })?;

        let built = builder.into_inner().map_err(|_| ConvertError::Poisoned)?;
        log::debug!(
            "converted {} objects: {} vertices, {} indices, {} groups",
            scene.len(),
            built.vertices().len(),
            built.indices().len(),
            built.groups().len()
        );
        Ok(built)
    }
}
