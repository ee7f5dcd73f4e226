//! CPU-side triangle mesh with bounding-box normalization.

/// One vertex position in object space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Zero-based indices into the point list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Triangle {
    pub a: u32,
    pub b: u32,
    pub c: u32,
}

impl Triangle {
    pub fn new(a: u32, b: u32, c: u32) -> Self {
        Self { a, b, c }
    }

    pub fn indices(&self) -> [u32; 3] {
        [self.a, self.b, self.c]
    }
}

/// Triangle mesh produced by the loader; read-only for the rest of the
/// program. An empty point list signals a failed or contentless load,
/// so callers must check [`Model::is_empty`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Model {
    pub points: Vec<Point>,
    pub triangles: Vec<Triangle>,
}

impl Model {
    pub fn new(points: Vec<Point>, triangles: Vec<Triangle>) -> Self {
        Self { points, triangles }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Axis-aligned bounding box, or `None` for an empty model.
    pub fn bounds(&self) -> Option<(Point, Point)> {
        let first = *self.points.first()?;
        let mut min = first;
        let mut max = first;
        for p in &self.points {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            min.z = min.z.min(p.z);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
            max.z = max.z.max(p.z);
        }
        Some((min, max))
    }

    /// Recenter on the origin and uniformly rescale so the bounding box
    /// fits a cube of side 2. Returns the applied scale factor.
    ///
    /// Empty models are left untouched; a degenerate (single-point)
    /// model is recentered without scaling.
    pub fn normalize(&mut self) -> f32 {
        let Some((min, max)) = self.bounds() else {
            return 1.0;
        };
        let center = Point::new(
            (min.x + max.x) * 0.5,
            (min.y + max.y) * 0.5,
            (min.z + max.z) * 0.5,
        );
        let extent = (max.x - min.x)
            .max(max.y - min.y)
            .max(max.z - min.z);
        let scale = if extent > 0.0 { 2.0 / extent } else { 1.0 };

        for p in &mut self.points {
            p.x = (p.x - center.x) * scale;
            p.y = (p.y - center.y) * scale;
            p.z = (p.z - center.z) * scale;
        }
        scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn bbox_size_and_center(model: &Model) -> ([f32; 3], [f32; 3]) {
        let (min, max) = model.bounds().expect("non-empty model");
        (
            [max.x - min.x, max.y - min.y, max.z - min.z],
            [
                (min.x + max.x) * 0.5,
                (min.y + max.y) * 0.5,
                (min.z + max.z) * 0.5,
            ],
        )
    }

    #[test]
    fn normalize_centers_and_scales_to_side_two() {
        let mut model = Model::new(
            vec![
                Point::new(1.0, 1.0, 1.0),
                Point::new(5.0, 3.0, 2.0),
                Point::new(3.0, 2.0, 1.5),
            ],
            vec![Triangle::new(0, 1, 2)],
        );
        model.normalize();
        let (size, center) = bbox_size_and_center(&model);
        // Largest extent was X (4.0), so X spans exactly 2 afterwards.
        assert!((size[0] - 2.0).abs() < EPS);
        assert!(size[1] <= 2.0 + EPS && size[2] <= 2.0 + EPS);
        for c in center {
            assert!(c.abs() < EPS);
        }
    }

    #[test]
    fn normalize_is_idempotent() {
        let mut model = Model::new(
            vec![
                Point::new(-3.0, 7.0, 0.0),
                Point::new(4.0, -1.0, 2.0),
                Point::new(0.5, 0.5, -6.0),
            ],
            vec![Triangle::new(0, 1, 2)],
        );
        model.normalize();
        let once = model.clone();
        model.normalize();
        for (p, q) in model.points.iter().zip(&once.points) {
            assert!((p.x - q.x).abs() < EPS);
            assert!((p.y - q.y).abs() < EPS);
            assert!((p.z - q.z).abs() < EPS);
        }
    }

    #[test]
    fn normalize_skips_empty_model() {
        let mut model = Model::default();
        let scale = model.normalize();
        assert_eq!(scale, 1.0);
        assert!(model.is_empty());
    }

    #[test]
    fn normalize_recenters_degenerate_model_without_scaling() {
        let mut model = Model::new(vec![Point::new(3.0, 4.0, 5.0)], vec![]);
        let scale = model.normalize();
        assert_eq!(scale, 1.0);
        assert_eq!(model.points[0], Point::new(0.0, 0.0, 0.0));
    }
}
