use glam::{Mat4, Vec3};

use super::Camera;

const POSITION_BOUND: f32 = 131072.0;
const MIN_FOV: f32 = 10.0;
const MAX_FOV: f32 = 150.0;

/// The free-look 3D viewport camera (Z-up, right-handed).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveCamera {
    pub width: u32,
    pub height: u32,
    position: Vec3,
    direction: Vec3,
    fov: f32,
}

impl PerspectiveCamera {
    pub fn new() -> Self {
        Self {
            width: 0,
            height: 0,
            position: Vec3::ZERO,
            direction: Vec3::X,
            fov: 60.0,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position.clamp(Vec3::splat(-POSITION_BOUND), Vec3::splat(POSITION_BOUND));
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Zero-length directions are ignored rather than propagated into the
    /// view matrix.
    pub fn set_direction(&mut self, direction: Vec3) {
        let dir = direction.normalize_or_zero();
        if dir != Vec3::ZERO {
            self.direction = dir;
        }
    }

    /// Vertical field of view in degrees.
    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn set_fov(&mut self, fov: f32) {
        self.fov = fov.clamp(MIN_FOV, MAX_FOV);
    }

    pub fn look_at(&mut self, target: Vec3) {
        self.set_direction(target - self.position);
    }

    fn view_projection(&self, width: u32, height: u32) -> Mat4 {
        self.projection(width, height) * self.view()
    }

    /// Restores a camera from `"Perspective/{X},{Y},{Z}/{FOV}"`, token by
    /// token, defaulting anything malformed.
    pub fn deserialize(serialized: &str) -> Self {
        let mut cam = Self::new();
        let tags: Vec<&str> = serialized.split(['/', ',']).collect();

        if tags.len() < 4 {
            return cam;
        }
        let axis = |i: usize| tags[i].trim().parse::<f32>().unwrap_or(0.0);
        cam.set_position(Vec3::new(axis(1), axis(2), axis(3)));

        if tags.len() < 5 {
            return cam;
        }
        if let Ok(f) = tags[4].trim().parse::<f32>() {
            cam.set_fov(f);
        }
        cam
    }
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl Camera for PerspectiveCamera {
    fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.direction, Vec3::Z)
    }

    fn projection(&self, width: u32, height: u32) -> Mat4 {
        let aspect = width as f32 / height.max(1) as f32;
        Mat4::perspective_rh(self.fov.to_radians(), aspect, 1.0, 10_000.0)
    }

    fn world_to_screen(&self, world: Vec3, width: u32, height: u32) -> Vec3 {
        let ndc = self.view_projection(width, height).project_point3(world);
        Vec3::new(
            (ndc.x * 0.5 + 0.5) * width as f32,
            (0.5 - ndc.y * 0.5) * height as f32,
            ndc.z,
        )
    }

    fn screen_to_world(&self, screen: Vec3, width: u32, height: u32) -> Vec3 {
        let ndc = Vec3::new(
            screen.x / width as f32 * 2.0 - 1.0,
            1.0 - screen.y / height as f32 * 2.0,
            screen.z,
        );
        self.view_projection(width, height)
            .inverse()
            .project_point3(ndc)
    }

    fn eye_location(&self) -> Vec3 {
        self.position
    }

    fn serialize(&self) -> String {
        format!(
            "Perspective/{},{},{}/{}",
            self.position.x, self.position.y, self.position.z, self.fov
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_round_trip_for_visible_points() {
        let mut cam = PerspectiveCamera::new();
        cam.set_position(Vec3::new(-64.0, 0.0, 32.0));
        cam.look_at(Vec3::ZERO);

        let world = Vec3::new(10.0, 5.0, -3.0);
        let screen = cam.world_to_screen(world, 1280, 720);
        let back = cam.screen_to_world(screen, 1280, 720);
        assert!(back.abs_diff_eq(world, 1e-2), "{world} -> {screen} -> {back}");
    }

    #[test]
    fn fov_clamps() {
        let mut cam = PerspectiveCamera::new();
        cam.set_fov(500.0);
        assert_eq!(cam.fov(), 150.0);
        cam.set_fov(0.0);
        assert_eq!(cam.fov(), 10.0);
    }

    #[test]
    fn deserialize_round_trip() {
        let mut cam = PerspectiveCamera::new();
        cam.set_position(Vec3::new(1.0, -2.5, 300.0));
        cam.set_fov(75.0);
        let restored = PerspectiveCamera::deserialize(&cam.serialize());
        assert_eq!(restored.position(), cam.position());
        assert_eq!(restored.fov(), cam.fov());
    }
}
