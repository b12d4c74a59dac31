//! World/screen coordinate mapping for the editor viewports.
//!
//! Conventions used in this codebase:
//! - World space is Z-up.
//! - Screen origin is top-left (y grows downward); world "up" maps to
//!   increasing y in view space, so both cameras flip the vertical axis.
//! - Orthographic cameras are planar: the view matrix collapses Z to zero
//!   and depth never clips (near/far at ±1,000,000).

mod orthographic;
mod perspective;

pub use orthographic::{OrthographicCamera, ViewType};
pub use perspective::PerspectiveCamera;

use glam::{Mat4, Vec3};

/// Common contract between the orthographic viewports and the 3D camera.
pub trait Camera: Send + Sync {
    /// View matrix for the renderer.
    fn view(&self) -> Mat4;
    /// Projection matrix for a viewport of the given pixel size.
    fn projection(&self, width: u32, height: u32) -> Mat4;
    /// Maps a world-space point to screen pixels (origin top-left).
    fn world_to_screen(&self, world: Vec3, width: u32, height: u32) -> Vec3;
    /// Inverse of [`Camera::world_to_screen`] for points the camera can see.
    fn screen_to_world(&self, screen: Vec3, width: u32, height: u32) -> Vec3;
    /// Position of the eye in world space.
    fn eye_location(&self) -> Vec3;
    /// Compact text form persisted with the document's view state.
    fn serialize(&self) -> String;
}

/// Restores a camera from its persisted text form.
///
/// The first token selects the camera kind; `Top`, `Front` and `Side` map to
/// an orthographic viewport, `Perspective` to the 3D camera. Parsing is
/// defensive throughout: unknown or malformed tokens leave the corresponding
/// fields at their defaults, so a bare `"Top"` is a valid input.
pub fn deserialize(serialized: &str) -> Box<dyn Camera> {
    let kind = serialized.split(['/', ',']).next().unwrap_or("");
    if kind.eq_ignore_ascii_case("perspective") {
        Box::new(PerspectiveCamera::deserialize(serialized))
    } else {
        Box::new(OrthographicCamera::deserialize(serialized))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_dispatches_on_first_token() {
        let ortho = deserialize("Side/1,2,3/2");
        assert_eq!(ortho.serialize(), "Side/1,2,3/2");

        let persp = deserialize("perspective/0,0,64/60");
        assert!(persp.serialize().starts_with("Perspective/"));
    }

    #[test]
    fn deserialize_garbage_falls_back_to_defaults() {
        let cam = deserialize("???");
        assert_eq!(cam.serialize(), "Top/0,0,0/1");
    }
}
