//! Permissive OBJ parser for the `v`/`f` subset.
//!
//! Anything that is not a well-formed vertex or triangle line is skipped
//! without error; only failing to open the file at all is reported. The
//! returned model is already normalized (see [`Model::normalize`]).

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use anyhow::{Context, Result};

use crate::model::{Model, Point, Triangle};

/// Load an OBJ mesh from a file path.
pub fn load_obj_from_path(path: impl AsRef<Path>) -> Result<Model> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open OBJ file: {}", path.as_ref().display()))?;
    load_obj_from_reader(BufReader::new(file))
}

/// Load an OBJ mesh from a [`BufRead`] implementation.
pub fn load_obj_from_reader<R: BufRead>(reader: R) -> Result<Model> {
    let mut model = parse_obj(reader)?;
    log::info!(
        "Loaded OBJ: {} points, {} triangles",
        model.points.len(),
        model.triangles.len()
    );
    let scale = model.normalize();
    if !model.is_empty() {
        log::info!("Normalized model, scale factor {scale:.4}");
    }
    Ok(model)
}

/// Convenience helper to parse an OBJ string literal.
pub fn load_obj_from_str(contents: &str) -> Result<Model> {
    load_obj_from_reader(io::Cursor::new(contents))
}

fn parse_obj<R: BufRead>(reader: R) -> Result<Model> {
    let mut points: Vec<Point> = Vec::new();
    let mut triangles: Vec<Triangle> = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read line {}", line_no + 1))?;
        let mut parts = line.split_whitespace();
        match parts.next() {
            Some("v") => {
                if let Some(p) = parse_point(&mut parts) {
                    points.push(p);
                } else {
                    log::debug!("Skipping malformed vertex line {}", line_no + 1);
                }
            }
            Some("f") => {
                // Only the first three face tokens are read; a quad's
                // fourth token is silently ignored.
                if let Some(t) = parse_triangle(&mut parts) {
                    triangles.push(t);
                } else {
                    log::debug!("Skipping malformed face line {}", line_no + 1);
                }
            }
            // Comments, extended directives (vn/vt/o/g/usemtl/...) and
            // blank lines are all accepted and ignored.
            _ => {}
        }
    }

    // Faces may reference vertices the file never declared; drop them so
    // every surviving triangle indexes within the point list.
    let point_count = points.len() as u32;
    let before = triangles.len();
    triangles.retain(|t| t.indices().iter().all(|&i| i < point_count));
    if triangles.len() != before {
        log::warn!(
            "Dropped {} face(s) with out-of-range indices",
            before - triangles.len()
        );
    }

    Ok(Model::new(points, triangles))
}

fn parse_point(parts: &mut std::str::SplitWhitespace<'_>) -> Option<Point> {
    let x = parts.next()?.parse::<f32>().ok()?;
    let y = parts.next()?.parse::<f32>().ok()?;
    let z = parts.next()?.parse::<f32>().ok()?;
    Some(Point::new(x, y, z))
}

fn parse_triangle(parts: &mut std::str::SplitWhitespace<'_>) -> Option<Triangle> {
    let a = parse_face_index(parts.next()?)?;
    let b = parse_face_index(parts.next()?)?;
    let c = parse_face_index(parts.next()?)?;
    Some(Triangle::new(a, b, c))
}

/// Parse one `v`, `v/vt` or `v/vt/vn` face token into a zero-based
/// vertex index. Texture/normal sub-indices are ignored.
fn parse_face_index(token: &str) -> Option<u32> {
    let vertex = token.split('/').next()?;
    let idx = vertex.parse::<u32>().ok()?;
    // OBJ indices are 1-based.
    idx.checked_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn parse_spec_example() {
        let src = "v 0 0 0\nv 2 0 0\nv 0 2 0\nf 1 2 3\n";
        let model = load_obj_from_str(src).expect("parse");
        assert_eq!(model.points.len(), 3);
        assert_eq!(model.triangles, vec![Triangle::new(0, 1, 2)]);

        // Normalized: bounding box side 2 along both non-degenerate
        // axes, centered at the origin.
        let (min, max) = model.bounds().expect("bounds");
        assert!((max.x - min.x - 2.0).abs() < EPS);
        assert!((max.y - min.y - 2.0).abs() < EPS);
        assert!((min.x + max.x).abs() < EPS);
        assert!((min.y + max.y).abs() < EPS);
        assert!((min.z + max.z).abs() < EPS);
    }

    #[test]
    fn indices_are_zero_based_and_in_range() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 1 1 0\nf 1 2 3\nf 2 4 3\n";
        let model = load_obj_from_str(src).expect("parse");
        for tri in &model.triangles {
            for i in tri.indices() {
                assert!((i as usize) < model.points.len());
            }
        }
    }

    #[test]
    fn face_sub_indices_are_ignored() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1/4/7 2/5/8 3/6/9\n";
        let model = load_obj_from_str(src).expect("parse");
        assert_eq!(model.triangles, vec![Triangle::new(0, 1, 2)]);
    }

    #[test]
    fn quad_face_reads_only_three_tokens() {
        let src = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n";
        let model = load_obj_from_str(src).expect("parse");
        assert_eq!(model.triangles, vec![Triangle::new(0, 1, 2)]);
    }

    #[test]
    fn unknown_and_malformed_lines_are_skipped() {
        let src = "# comment\no plane\nvn 0 0 1\nv 0 0 0\nv nope 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\nf 1 2\nusemtl body\n";
        let model = load_obj_from_str(src).expect("parse");
        assert_eq!(model.points.len(), 3);
        assert_eq!(model.triangles.len(), 1);
    }

    #[test]
    fn out_of_range_faces_are_dropped() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\nf 1 2 9\n";
        let model = load_obj_from_str(src).expect("parse");
        assert_eq!(model.triangles.len(), 1);
    }

    #[test]
    fn empty_input_yields_empty_model_not_error() {
        let model = load_obj_from_str("").expect("parse");
        assert!(model.is_empty());
        assert!(model.triangles.is_empty());
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_obj_from_path("/nonexistent/plane.obj").is_err());
    }
}
