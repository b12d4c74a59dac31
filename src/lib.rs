//! Scene-conversion pipeline for a brush-based level editor.
//!
//! The crate turns abstract scene objects (brush solids, point entities,
//! decals) into GPU-ready vertex/index buffers:
//!
//! - [`camera`] maps between world space and screen pixels for the three
//!   orthographic view planes and a perspective camera.
//! - [`scene`] holds objects and their attached data components.
//! - [`convert`] dispatches objects to registered converters by capability
//!   and priority, accumulating geometry into one shared [`convert::BufferBuilder`].
//! - [`resources`] and [`io`] provide the texture-resolver seam and the
//!   byte-range stream views it reads from.
//!
//! Rendering itself (draw submission, shader binding) is out of scope; the
//! buffer builder's output and the published vertex layout are the boundary.

pub mod camera;
pub mod convert;
pub mod io;
pub mod resources;
pub mod scene;

pub use camera::{Camera, OrthographicCamera, PerspectiveCamera, ViewType};
pub use convert::{
    BufferBuilder, CancellationToken, ConvertContext, ConvertError, ConverterPriority,
    ConverterRegistry, SceneConverter, Vertex,
};
pub use scene::{Aabb, Face, FaceTexture, ObjectData, ObjectId, Scene, SceneObject};
