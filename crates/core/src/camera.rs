//! Free-look camera driven by left-button mouse drags.

use crate::{Mat4, vec3};

/// Degrees of view rotation per pixel of cursor travel.
pub const DRAG_SENSITIVITY: f32 = 0.5;
/// View pitch is clamped to +/- this many degrees.
pub const MAX_PITCH: f32 = 89.0;
/// Fixed camera pull-back along Z before the view rotations apply.
pub const CAMERA_DISTANCE: f32 = 5.0;

/// View angles plus mouse-drag tracking. Mutated only by input handlers.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CameraState {
    /// View pitch, degrees.
    pub rotation_x: f32,
    /// View yaw, degrees.
    pub rotation_y: f32,
    pub dragging: bool,
    pub last_cursor: (f64, f64),
}

impl CameraState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a drag at the given cursor position.
    pub fn begin_drag(&mut self, x: f64, y: f64) {
        self.dragging = true;
        self.last_cursor = (x, y);
    }

    pub fn end_drag(&mut self) {
        self.dragging = false;
    }

    /// Feed a cursor move; rotates the view while a drag is active.
    pub fn cursor_moved(&mut self, x: f64, y: f64) {
        if self.dragging {
            let dx = (x - self.last_cursor.0) as f32;
            let dy = (y - self.last_cursor.1) as f32;
            self.rotation_y += dx * DRAG_SENSITIVITY;
            self.rotation_x += dy * DRAG_SENSITIVITY;
            self.rotation_x = self.rotation_x.clamp(-MAX_PITCH, MAX_PITCH);
        }
        self.last_cursor = (x, y);
    }

    /// View matrix: pull back along Z, then rotate X, then rotate Y.
    pub fn view(&self) -> Mat4 {
        Mat4::from_translation(vec3(0.0, 0.0, -CAMERA_DISTANCE))
            * Mat4::from_rotation_x(self.rotation_x.to_radians())
            * Mat4::from_rotation_y(self.rotation_y.to_radians())
    }

    /// Orthographic projection matching the scene's side-2 scale.
    pub fn projection() -> Mat4 {
        Mat4::orthographic_rh(-2.0, 2.0, -2.0, 2.0, 0.1, 100.0)
    }

    /// Zero the view angles; drag tracking is left alone.
    pub fn reset(&mut self) {
        self.rotation_x = 0.0;
        self.rotation_y = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_rotates_view() {
        let mut cam = CameraState::new();
        cam.begin_drag(100.0, 100.0);
        cam.cursor_moved(110.0, 104.0);
        assert!((cam.rotation_y - 10.0 * DRAG_SENSITIVITY).abs() < 1e-5);
        assert!((cam.rotation_x - 4.0 * DRAG_SENSITIVITY).abs() < 1e-5);
    }

    #[test]
    fn cursor_moves_without_drag_are_ignored() {
        let mut cam = CameraState::new();
        cam.cursor_moved(300.0, 300.0);
        assert_eq!(cam.rotation_x, 0.0);
        assert_eq!(cam.rotation_y, 0.0);
        // Position is still tracked so the next drag has no jump.
        assert_eq!(cam.last_cursor, (300.0, 300.0));
    }

    #[test]
    fn pitch_never_leaves_clamp_range() {
        let mut cam = CameraState::new();
        cam.begin_drag(0.0, 0.0);
        for i in 1..2_000 {
            cam.cursor_moved(0.0, (i * 10) as f64);
            assert!(cam.rotation_x <= MAX_PITCH);
        }
        assert!((cam.rotation_x - MAX_PITCH).abs() < 1e-5);
        for i in 1..4_000 {
            cam.cursor_moved(0.0, -((i * 10) as f64));
            assert!(cam.rotation_x >= -MAX_PITCH);
        }
    }

    #[test]
    fn view_matrix_is_finite() {
        let mut cam = CameraState::new();
        cam.begin_drag(0.0, 0.0);
        cam.cursor_moved(57.0, -31.0);
        let m = (CameraState::projection() * cam.view()).to_cols_array();
        assert!(m.iter().all(|f| f.is_finite()));
    }

    #[test]
    fn reset_zeroes_angles_only() {
        let mut cam = CameraState::new();
        cam.begin_drag(0.0, 0.0);
        cam.cursor_moved(40.0, 40.0);
        cam.reset();
        assert_eq!(cam.rotation_x, 0.0);
        assert_eq!(cam.rotation_y, 0.0);
        assert!(cam.dragging);
    }
}
