//! Per-frame scene assembly.
//!
//! Immediate-mode style: every frame the whole scene (model, cubes,
//! ground grid) is flattened on the CPU into plain vertex lists and
//! re-uploaded. Nothing here touches the GPU.

use asset::model::Model;
use corelib::flight::FlightState;
use corelib::scenery::DecorationCube;
use corelib::{Mat4, Vec3, vec3};

use crate::Vertex;

/// Fixed tilt applied to the model before its flight rotations, about
/// the (1, 0, 1) axis. Compensates for the asset's authoring pose.
pub const PLANE_TILT_DEG: f32 = -85.0;

const PLANE_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
const GRID_COLOR: [f32; 3] = [0.3, 0.3, 0.35];

/// Ground-grid extent/step configuration.
#[derive(Clone, Copy, Debug)]
pub struct GridConfig {
    /// Grid covers [-extent, extent] along X and Z.
    pub extent: f32,
    pub step: f32,
    /// Y of the grid plane.
    pub height: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            extent: 20.0,
            step: 1.0,
            height: -2.0,
        }
    }
}

/// CPU-built geometry for one frame: a triangle list and a line list.
#[derive(Clone, Debug, Default)]
pub struct FrameScene {
    pub triangles: Vec<Vertex>,
    pub lines: Vec<Vertex>,
}

impl FrameScene {
    /// Assemble the full scene for the current flight state: ground
    /// grid, reference cubes in the plane-relative frame, then the
    /// model under its orientation.
    pub fn build(
        model: &Model,
        cubes: &[DecorationCube],
        flight: &FlightState,
        grid: &GridConfig,
    ) -> Self {
        let mut scene = Self::default();
        scene.push_grid(grid);
        for cube in cubes {
            scene.push_cube(cube, flight.position);
        }
        scene.push_model(model, plane_matrix(flight));
        scene
    }

    /// One line pair per grid cell boundary on the ground plane.
    pub fn push_grid(&mut self, grid: &GridConfig) {
        let mut line = |a: Vec3, b: Vec3| {
            self.lines.push(Vertex::new(a, GRID_COLOR));
            self.lines.push(Vertex::new(b, GRID_COLOR));
        };
        let n = (2.0 * grid.extent / grid.step).round() as i32;
        for i in 0..=n {
            let t = -grid.extent + i as f32 * grid.step;
            line(
                vec3(t, grid.height, -grid.extent),
                vec3(t, grid.height, grid.extent),
            );
            line(
                vec3(-grid.extent, grid.height, t),
                vec3(grid.extent, grid.height, t),
            );
        }
    }

    /// Six quads (twelve triangles) per cube, offset into the
    /// plane-relative frame.
    pub fn push_cube(&mut self, cube: &DecorationCube, flight_position: Vec3) {
        let c = cube.position - flight_position;
        let s = cube.half_size;
        let corners = [
            c + vec3(-s, -s, -s),
            c + vec3(s, -s, -s),
            c + vec3(s, s, -s),
            c + vec3(-s, s, -s),
            c + vec3(-s, -s, s),
            c + vec3(s, -s, s),
            c + vec3(s, s, s),
            c + vec3(-s, s, s),
        ];
        const FACES: [[usize; 4]; 6] = [
            [4, 5, 6, 7], // front (+Z)
            [1, 0, 3, 2], // back (-Z)
            [3, 7, 6, 2], // top (+Y)
            [0, 1, 5, 4], // bottom (-Y)
            [0, 4, 7, 3], // left (-X)
            [5, 1, 2, 6], // right (+X)
        ];
        for [a, b, c2, d] in FACES {
            self.push_quad(
                corners[a],
                corners[b],
                corners[c2],
                corners[d],
                cube.color,
            );
        }
    }

    /// One triangle (three vertices) per model triangle, transformed by
    /// the plane's orientation.
    pub fn push_model(&mut self, model: &Model, transform: Mat4) {
        for tri in &model.triangles {
            for idx in tri.indices() {
                let p = model.points[idx as usize];
                let pos = transform.transform_point3(vec3(p.x, p.y, p.z));
                self.triangles.push(Vertex::new(pos, PLANE_COLOR));
            }
        }
    }

    fn push_quad(&mut self, a: Vec3, b: Vec3, c: Vec3, d: Vec3, color: [f32; 3]) {
        for p in [a, b, c, a, c, d] {
            self.triangles.push(Vertex::new(p, color));
        }
    }
}

/// Model matrix for the plane: flight rotations (X, Y, Z order as the
/// original applied them) followed by the fixed authoring tilt.
pub fn plane_matrix(flight: &FlightState) -> Mat4 {
    Mat4::from_rotation_x(flight.rot_x.to_radians())
        * Mat4::from_rotation_y(flight.rot_y.to_radians())
        * Mat4::from_rotation_z(flight.rot_z.to_radians())
        * Mat4::from_axis_angle(vec3(1.0, 0.0, 1.0).normalize(), PLANE_TILT_DEG.to_radians())
}
