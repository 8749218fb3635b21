//! Reader for MOVIE.BYU geometry files.
//!
//! The format is whitespace-separated ASCII: a four-integer header
//! (`parts points polys edges`), one polygon range per part, packed point
//! coordinates, then polygon connectivity lists whose final vertex index is
//! negated. Indices are 1-based. Polygons with more than three vertices are
//! fan-triangulated on load.

use std::fs;
use std::path::Path;

use glam::DVec3;

use crate::core::TriangleMesh;
use crate::error::{SceneError, SceneResult};

pub fn read_byu_geometry(path: impl AsRef<Path>) -> SceneResult<TriangleMesh> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| SceneError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_byu_geometry(&raw).map_err(|(line, message)| SceneError::MeshFormat {
        path: path.to_path_buf(),
        line,
        message,
    })
}

/// Parses BYU text. Errors carry the 1-based line of the offending token.
pub fn parse_byu_geometry(raw: &str) -> Result<TriangleMesh, (usize, String)> {
    let mut cursor = TokenCursor::new(raw);

    let part_count = cursor.next_usize("part count")?;
    let point_count = cursor.next_usize("point count")?;
    let poly_count = cursor.next_usize("polygon count")?;
    let _edge_count = cursor.next_usize("edge count")?;

    if point_count == 0 {
        return Err((cursor.line, "geometry declares zero points".to_owned()));
    }

    // Per-part polygon ranges are read for well-formedness only; parts are
    // merged into a single mesh.
    for part in 0..part_count {
        let first = cursor.next_i64(&format!("part {part} first polygon"))?;
        let last = cursor.next_i64(&format!("part {part} last polygon"))?;
        if first < 1 || last < first || last as usize > poly_count {
            return Err((
                cursor.line,
                format!("part {part} has invalid polygon range {first}..{last}"),
            ));
        }
    }

    let mut points = Vec::with_capacity(point_count);
    for index in 0..point_count {
        let x = cursor.next_f64(&format!("point {index} x"))?;
        let y = cursor.next_f64(&format!("point {index} y"))?;
        let z = cursor.next_f64(&format!("point {index} z"))?;
        points.push(DVec3::new(x, y, z));
    }

    let mut triangles = Vec::with_capacity(poly_count);
    for polygon in 0..poly_count {
        let mut vertices: Vec<u32> = Vec::with_capacity(4);
        loop {
            let value = cursor.next_i64(&format!("polygon {polygon} connectivity"))?;
            let terminal = value < 0;
            let index = value.unsigned_abs();
            if index == 0 || index as usize > point_count {
                return Err((
                    cursor.line,
                    format!("polygon {polygon} references point {index} of {point_count}"),
                ));
            }
            vertices.push((index - 1) as u32);
            if terminal {
                break;
            }
        }

        if vertices.len() < 3 {
            return Err((
                cursor.line,
                format!(
                    "polygon {polygon} has {} vertices, need at least 3",
                    vertices.len()
                ),
            ));
        }

        for i in 1..vertices.len() - 1 {
            triangles.push([vertices[0], vertices[i], vertices[i + 1]]);
        }
    }

    TriangleMesh::new(points, triangles).map_err(|err| (cursor.line, err.to_string()))
}

struct TokenCursor<'a> {
    tokens: TokenIter<'a>,
    line: usize,
}

struct TokenIter<'a> {
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
    current: Option<(usize, std::str::SplitWhitespace<'a>)>,
}

impl<'a> Iterator for TokenIter<'a> {
    type Item = (usize, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((line, tokens)) = &mut self.current {
                if let Some(token) = tokens.next() {
                    return Some((*line + 1, token));
                }
            }
            let (line, text) = self.lines.next()?;
            self.current = Some((line, text.split_whitespace()));
        }
    }
}

impl<'a> TokenCursor<'a> {
    fn new(raw: &'a str) -> Self {
        Self {
            tokens: TokenIter {
                lines: raw.lines().enumerate(),
                current: None,
            },
            line: 1,
        }
    }

    fn next_token(&mut self, what: &str) -> Result<&'a str, (usize, String)> {
        match self.tokens.next() {
            Some((line, token)) => {
                self.line = line;
                Ok(token)
            }
            None => Err((self.line, format!("unexpected end of file reading {what}"))),
        }
    }

    fn next_usize(&mut self, what: &str) -> Result<usize, (usize, String)> {
        let token = self.next_token(what)?;
        token
            .parse()
            .map_err(|_| (self.line, format!("expected non-negative integer for {what}, got `{token}`")))
    }

    fn next_i64(&mut self, what: &str) -> Result<i64, (usize, String)> {
        let token = self.next_token(what)?;
        token
            .parse()
            .map_err(|_| (self.line, format!("expected integer for {what}, got `{token}`")))
    }

    fn next_f64(&mut self, what: &str) -> Result<f64, (usize, String)> {
        let token = self.next_token(what)?;
        token
            .parse()
            .map_err(|_| (self.line, format!("expected number for {what}, got `{token}`")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNIT_QUAD: &str = "\
1 4 1 4
1 1
0.0 0.0 0.0
1.0 0.0 0.0
1.0 1.0 0.0
0.0 1.0 0.0
1 2 3 -4
";

    #[test]
    fn quad_is_fan_triangulated() {
        let mesh = parse_byu_geometry(UNIT_QUAD).expect("valid geometry");
        assert_eq!(mesh.point_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.triangles[0], [0, 1, 2]);
        assert_eq!(mesh.triangles[1], [0, 2, 3]);
    }

    #[test]
    fn two_triangles_two_parts() {
        let raw = "\
2 4 2 6
1 1
2 2
0 0 0
1 0 0
0 1 0
0 0 1
1 2 -3
1 2 -4
";
        let mesh = parse_byu_geometry(raw).expect("valid geometry");
        assert_eq!(mesh.triangle_count(), 2);
    }

    #[test]
    fn empty_input_reports_header() {
        let err = parse_byu_geometry("").expect_err("must fail");
        assert!(err.1.contains("part count"), "{}", err.1);
    }

    #[test]
    fn truncated_coordinates_report_line() {
        let raw = "1 2 1 3\n1 1\n0 0 0\n1 0";
        let (line, message) = parse_byu_geometry(raw).expect_err("must fail");
        assert_eq!(line, 4);
        assert!(message.contains("point 1"), "{message}");
    }

    #[test]
    fn out_of_range_connectivity_is_rejected() {
        let raw = "1 3 1 3\n1 1\n0 0 0\n1 0 0\n0 1 0\n1 2 -9\n";
        let (_, message) = parse_byu_geometry(raw).expect_err("must fail");
        assert!(message.contains("references point 9"), "{message}");
    }

    #[test]
    fn degenerate_polygon_is_rejected() {
        let raw = "1 3 1 2\n1 1\n0 0 0\n1 0 0\n0 1 0\n1 -2\n";
        let (_, message) = parse_byu_geometry(raw).expect_err("must fail");
        assert!(message.contains("at least 3"), "{message}");
    }

    #[test]
    fn non_numeric_token_is_rejected() {
        let raw = "1 1 0 0\n1 1\nfoo 0 0\n";
        let (line, message) = parse_byu_geometry(raw).expect_err("must fail");
        assert_eq!(line, 3);
        assert!(message.contains("`foo`"), "{message}");
    }
}
