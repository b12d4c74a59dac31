//! Dispatch, priority/stop semantics and buffer integrity for whole-scene
//! conversion passes.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use glam::{Vec2, Vec3};
use mallet::convert::v;
use mallet::resources::{NullResolver, TableResolver};
use mallet::scene::EntityClass;
use mallet::{
    BufferBuilder, CancellationToken, ConvertContext, ConvertError, ConverterPriority,
    ConverterRegistry, Face, FaceTexture, Scene, SceneConverter, SceneObject,
};
use rayon::prelude::*;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn null_ctx() -> ConvertContext {
    ConvertContext::new(Arc::new(NullResolver))
}

/// Converter that records its invocations instead of emitting geometry.
struct RecordingConverter {
    name: &'static str,
    priority: ConverterPriority,
    stop: bool,
    invocations: Arc<Mutex<Vec<&'static str>>>,
}

impl SceneConverter for RecordingConverter {
    fn priority(&self) -> ConverterPriority {
        self.priority
    }

    fn supports(&self, _obj: &SceneObject) -> bool {
        true
    }

    fn should_stop_processing(&self, _obj: &SceneObject) -> bool {
        self.stop
    }

    fn convert(
        &self,
        _builder: &Mutex<BufferBuilder>,
        _ctx: &ConvertContext,
        _obj: &SceneObject,
    ) -> Result<(), ConvertError> {
        self.invocations.lock().unwrap().push(self.name);
        Ok(())
    }
}

fn recording_registry(
    specs: &[(&'static str, ConverterPriority, bool)],
) -> (ConverterRegistry, Arc<Mutex<Vec<&'static str>>>) {
    let invocations = Arc::new(Mutex::new(Vec::new()));
    let mut registry = ConverterRegistry::new();
    for &(name, priority, stop) in specs {
        registry.register(Arc::new(RecordingConverter {
            name,
            priority,
            stop,
            invocations: Arc::clone(&invocations),
        }));
    }
    (registry, invocations)
}

fn quad_face(texture: &str) -> Face {
    Face::new(
        vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(32.0, 0.0, 0.0),
            Vec3::new(32.0, 32.0, 0.0),
            Vec3::new(0.0, 32.0, 0.0),
        ],
        FaceTexture::new(texture, Vec3::X, Vec3::Y),
    )
}

#[test]
fn stop_predicate_suppresses_lower_priority_converters() {
    init_logging();
    let (registry, invocations) = recording_registry(&[
        ("low", ConverterPriority::DefaultLowest, false),
        ("high_stop", ConverterPriority::DefaultHigh, true),
    ]);

    let mut scene = Scene::new();
    scene.spawn();
    let built = registry
        .convert_scene(&scene, &null_ctx(), &CancellationToken::new())
        .unwrap();

    assert!(built.is_empty());
    assert_eq!(*invocations.lock().unwrap(), vec!["high_stop"]);
}

#[test]
fn without_stop_all_matching_converters_run_in_priority_order() {
    let (registry, invocations) = recording_registry(&[
        ("low", ConverterPriority::DefaultLowest, false),
        ("high", ConverterPriority::DefaultHigh, false),
        ("medium", ConverterPriority::DefaultMedium, false),
    ]);

    let mut scene = Scene::new();
    scene.spawn();
    registry
        .convert_scene(&scene, &null_ctx(), &CancellationToken::new())
        .unwrap();

    assert_eq!(*invocations.lock().unwrap(), vec!["high", "medium", "low"]);
}

#[test]
fn equal_priorities_keep_registration_order() {
    let (registry, invocations) = recording_registry(&[
        ("first", ConverterPriority::DefaultMedium, false),
        ("second", ConverterPriority::DefaultMedium, false),
    ]);

    let mut scene = Scene::new();
    scene.spawn();
    registry
        .convert_scene(&scene, &null_ctx(), &CancellationToken::new())
        .unwrap();

    assert_eq!(*invocations.lock().unwrap(), vec!["first", "second"]);
}

#[test]
fn unmatched_objects_contribute_no_geometry() {
    let registry = ConverterRegistry::with_default_converters();
    let mut scene = Scene::new();
    // No components at all: nothing supports it, which is not an error.
    scene.spawn();

    let built = registry
        .convert_scene(&scene, &null_ctx(), &CancellationToken::new())
        .unwrap();
    assert!(built.is_empty());
}

#[test]
fn decal_objects_are_exclusive_to_the_decal_converter() {
    init_logging();
    let registry = ConverterRegistry::with_default_converters();
    let mut scene = Scene::new();
    scene
        .build_object()
        .with_class(EntityClass::new("infodecal"))
        .with_decal(vec![quad_face("graffiti")])
        .with_origin(Vec3::new(16.0, 16.0, 0.0))
        .insert();

    let built = registry
        .convert_scene(&scene, &null_ctx(), &CancellationToken::new())
        .unwrap();

    // Decal face group + one marker box. If the generic point-entity
    // converter had also run, there would be a third group.
    assert_eq!(built.groups().len(), 2);
    assert_eq!(built.vertices().len(), 4 + 24);
}

#[test]
fn point_entities_get_a_single_marker_box() {
    let registry = ConverterRegistry::with_default_converters();
    let mut scene = Scene::new();
    scene
        .build_object()
        .with_class(EntityClass::with_color("light", [255, 255, 0, 255]))
        .with_origin(Vec3::new(0.0, 0.0, 64.0))
        .insert();

    let built = registry
        .convert_scene(&scene, &null_ctx(), &CancellationToken::new())
        .unwrap();
    assert_eq!(built.groups().len(), 1);
    assert_eq!(built.vertices().len(), 24);
    assert_eq!(built.indices().len(), 36);
}

#[test]
fn solids_emit_one_group_per_face() {
    let mut resolver = TableResolver::new();
    resolver.insert("brick", 128, 128);
    let ctx = ConvertContext::new(Arc::new(resolver));

    let registry = ConverterRegistry::with_default_converters();
    let mut scene = Scene::new();
    scene
        .build_object()
        .with_solid(vec![quad_face("brick"), quad_face("missing_texture")])
        .insert();

    let built = registry
        .convert_scene(&scene, &ctx, &CancellationToken::new())
        .unwrap();
    // The missing texture degrades to a placeholder, it does not vanish.
    assert_eq!(built.groups().len(), 2);
    assert_eq!(built.vertices().len(), 8);
}

#[test]
fn cancelled_pass_returns_cancelled_and_no_buffers() {
    let registry = ConverterRegistry::with_default_converters();
    let mut scene = Scene::new();
    for _ in 0..128 {
        scene
            .build_object()
            .with_class(EntityClass::new("light"))
            .with_origin(Vec3::ZERO)
            .insert();
    }

    let cancel = CancellationToken::new();
    cancel.cancel();
    let result = registry.convert_scene(&scene, &null_ctx(), &cancel);
    assert!(matches!(result, Err(ConvertError::Cancelled)));
}

#[test]
fn concurrent_appends_get_disjoint_monotonic_ranges() {
    let builder = Mutex::new(BufferBuilder::new());
    let ranges = Mutex::new(Vec::new());

    (0..64u32).into_par_iter().for_each(|i| {
        let count = (i % 7 + 1) as usize;
        let batch: Vec<_> = (0..count)
            .map(|j| v(Vec3::splat(j as f32), Vec3::Z, Vec2::ZERO, [255; 4]))
            .collect();

        let mut guard = builder.lock().unwrap();
        let base = guard.append_vertices(&batch);
        guard.append_indices(&[0], base);
        drop(guard);

        ranges.lock().unwrap().push((base, count as u32));
    });

    let mut ranges = ranges.into_inner().unwrap();
    ranges.sort_by_key(|&(base, _)| base);

    let mut expected_base = 0;
    for &(base, count) in &ranges {
        assert_eq!(base, expected_base, "ranges must be disjoint and packed");
        expected_base = base + count;
    }

    let built = builder.into_inner().unwrap();
    assert_eq!(built.vertices().len() as u32, expected_base);
}
