use std::fmt;
use std::str::FromStr;

use glam::{Mat4, Vec3};

use super::Camera;

/// Which of the three orthogonal projection planes a viewport looks along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewType {
    #[default]
    Top,
    Front,
    Side,
}

impl fmt::Display for ViewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ViewType::Top => "Top",
            ViewType::Front => "Front",
            ViewType::Side => "Side",
        };
        f.write_str(name)
    }
}

impl FromStr for ViewType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("top") {
            Ok(ViewType::Top)
        } else if s.eq_ignore_ascii_case("front") {
            Ok(ViewType::Front)
        } else if s.eq_ignore_ascii_case("side") {
            Ok(ViewType::Side)
        } else {
            Err(())
        }
    }
}

const POSITION_BOUND: f32 = 131072.0;
const MIN_ZOOM: f32 = 0.001;
const MAX_ZOOM: f32 = 256.0;

// Basis change from world axes into each view plane. These are the
// column-vector equivalents of the editor's classic top/front/side matrices.
const TOP_MATRIX: Mat4 = Mat4::IDENTITY;
const FRONT_MATRIX: Mat4 = Mat4::from_cols_array(&[
    0.0, 0.0, 1.0, 0.0, //
    1.0, 0.0, 0.0, 0.0, //
    0.0, 1.0, 0.0, 0.0, //
    0.0, 0.0, 0.0, 1.0,
]);
const SIDE_MATRIX: Mat4 = Mat4::from_cols_array(&[
    1.0, 0.0, 0.0, 0.0, //
    0.0, 0.0, 1.0, 0.0, //
    0.0, 1.0, 0.0, 0.0, //
    0.0, 0.0, 0.0, 1.0,
]);

/// A 2D viewport camera looking along one of the world axes.
///
/// Position and zoom are clamped on every write, so the invariants
/// `zoom ∈ [0.001, 256]` and `|position axis| <= 131072` hold at all
/// observation points, not just after construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrthographicCamera {
    pub view_type: ViewType,
    pub width: u32,
    pub height: u32,
    position: Vec3,
    zoom: f32,
}

impl OrthographicCamera {
    pub fn new(view_type: ViewType) -> Self {
        Self {
            view_type,
            width: 0,
            height: 0,
            position: Vec3::ZERO,
            zoom: 1.0,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position.clamp(Vec3::splat(-POSITION_BOUND), Vec3::splat(POSITION_BOUND));
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Basis matrix rotating world geometry into this viewport's plane.
    pub fn model(&self) -> Mat4 {
        match self.view_type {
            ViewType::Top => TOP_MATRIX,
            ViewType::Front => FRONT_MATRIX,
            ViewType::Side => SIDE_MATRIX,
        }
    }

    /// Projects a world point onto this viewport's 2D plane.
    ///
    /// Only the subspace the view type treats as meaningful survives; callers
    /// must not assume a full 3D round trip through [`Self::expand`].
    pub fn flatten(&self, world: Vec3) -> Vec3 {
        match self.view_type {
            ViewType::Top => Vec3::new(world.x, world.y, 0.0),
            ViewType::Front => Vec3::new(world.y, world.z, 0.0),
            ViewType::Side => Vec3::new(world.x, world.z, 0.0),
        }
    }

    /// Injects a flattened point back into 3D, zeroing the discarded axis.
    pub fn expand(&self, flat: Vec3) -> Vec3 {
        match self.view_type {
            ViewType::Top => Vec3::new(flat.x, flat.y, 0.0),
            ViewType::Front => Vec3::new(0.0, flat.x, flat.y),
            ViewType::Side => Vec3::new(flat.x, 0.0, flat.y),
        }
    }

    pub fn units_to_pixels(&self, units: f32) -> f32 {
        units * self.zoom
    }

    pub fn pixels_to_units(&self, pixels: f32) -> f32 {
        pixels / self.zoom
    }

    /// Restores a camera from `"{ViewType}/{X},{Y},{Z}/{Zoom}"`.
    ///
    /// Each token is parsed independently; anything malformed or missing
    /// leaves the corresponding field at its default. This keeps old and
    /// partial view-state strings loadable.
    pub fn deserialize(serialized: &str) -> Self {
        let mut cam = Self::new(ViewType::Top);
        let tags: Vec<&str> = serialized.split(['/', ',']).collect();

        if let Some(t) = tags.first().and_then(|t| t.parse::<ViewType>().ok()) {
            cam.view_type = t;
        }

        if tags.len() < 4 {
            return cam;
        }
        let axis = |i: usize| tags[i].trim().parse::<f32>().unwrap_or(0.0);
        cam.set_position(Vec3::new(axis(1), axis(2), axis(3)));

        if tags.len() < 5 {
            return cam;
        }
        if let Ok(z) = tags[4].trim().parse::<f32>() {
            cam.set_zoom(z);
        }
        cam
    }
}

impl Camera for OrthographicCamera {
    fn view(&self) -> Mat4 {
        // Planar view: translate by -position, scale by zoom, collapse Z.
        let translate = Mat4::from_translation(Vec3::new(-self.position.x, -self.position.y, 0.0));
        let scale = Mat4::from_scale(Vec3::new(self.zoom, self.zoom, 0.0));
        scale * translate
    }

    fn projection(&self, width: u32, height: u32) -> Mat4 {
        // Depth never clips viewport geometry.
        const NEAR: f32 = -1_000_000.0;
        const FAR: f32 = 1_000_000.0;
        let (w, h) = (width as f32, height as f32);
        Mat4::orthographic_rh(-w / 2.0, w / 2.0, -h / 2.0, h / 2.0, NEAR, FAR)
    }

    fn world_to_screen(&self, world: Vec3, width: u32, height: u32) -> Vec3 {
        let flat = self.flatten(world);
        let center = Vec3::new(width as f32 / 2.0, height as f32 / 2.0, 0.0);
        let screen = center + (flat - self.position) * self.zoom;
        Vec3::new(screen.x, height as f32 - screen.y, screen.z)
    }

    fn screen_to_world(&self, screen: Vec3, width: u32, height: u32) -> Vec3 {
        let screen = Vec3::new(screen.x, height as f32 - screen.y, screen.z);
        let center = Vec3::new(width as f32 / 2.0, height as f32 / 2.0, 0.0);
        let flat = self.position + (screen - center) / self.zoom;
        self.expand(flat)
    }

    fn eye_location(&self) -> Vec3 {
        Vec3::Z * f32::MAX + self.position
    }

    fn serialize(&self) -> String {
        format!(
            "{}/{},{},{}/{}",
            self.view_type, self.position.x, self.position.y, self.position.z, self.zoom
        )
    }
}
