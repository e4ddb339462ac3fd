//! Grid coordinates embedded in instance names.
//!
//! Interconnect instances are named after the grid nodes they touch, e.g.
//! `tsv.n5_5_2` for one node or `edge.n0_0_1_n1_0_1` for two. A single `n`
//! may also introduce both nodes as one run of six integers
//! (`via.n3_4_0_3_4_1`).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Integer grid position; `z` is a layer index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

impl Coordinate {
    pub fn new(x: i64, y: i64, z: i64) -> Self {
        Self { x, y, z }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Position after layer normalization; synthetic endpoints sit between layers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    pub x: i64,
    pub y: i64,
    pub z: f64,
}

impl Point3 {
    pub fn new(x: i64, y: i64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl fmt::Display for Point3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Read an underscore-joined run of integers starting at `start`.
///
/// Returns the integers and the byte offset just past the last digit.
fn integer_run(bytes: &[u8], start: usize) -> (Vec<i64>, usize) {
    let mut values = Vec::new();
    let mut pos = start;
    let mut end = start;

    loop {
        let digits_end = bytes[pos..]
            .iter()
            .position(|b| !b.is_ascii_digit())
            .map_or(bytes.len(), |n| pos + n);
        if digits_end == pos {
            break;
        }
        // All ASCII digits, so the slice is valid UTF-8
        let Some(value) = std::str::from_utf8(&bytes[pos..digits_end])
            .ok()
            .and_then(|s| s.parse().ok())
        else {
            break;
        };
        values.push(value);
        end = digits_end;

        if bytes.get(digits_end) == Some(&b'_') {
            pos = digits_end + 1;
        } else {
            break;
        }
    }

    (values, end)
}

/// Decode every `n<x>_<y>_<z>` coordinate embedded in `name`, in order.
pub fn decode_coordinates(name: &str) -> Vec<Coordinate> {
    let bytes = name.as_bytes();
    let mut coords = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'n' {
            let (values, end) = integer_run(bytes, i + 1);
            if values.len() >= 3 {
                coords.extend(
                    values
                        .chunks_exact(3)
                        .map(|c| Coordinate::new(c[0], c[1], c[2])),
                );
                i = end;
                continue;
            }
        }
        i += 1;
    }

    coords
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_coordinate() {
        assert_eq!(decode_coordinates("tsv.n5_5_2"), vec![Coordinate::new(5, 5, 2)]);
        assert_eq!(
            decode_coordinates("n12_340_7_suffix"),
            vec![Coordinate::new(12, 340, 7)]
        );
    }

    #[test]
    fn test_two_prefixed_coordinates() {
        assert_eq!(
            decode_coordinates("edge.n0_0_1_n1_0_1"),
            vec![Coordinate::new(0, 0, 1), Coordinate::new(1, 0, 1)]
        );
    }

    #[test]
    fn test_six_integer_run() {
        assert_eq!(
            decode_coordinates("via.n3_4_0_3_4_1"),
            vec![Coordinate::new(3, 4, 0), Coordinate::new(3, 4, 1)]
        );
    }

    #[test]
    fn test_partial_runs() {
        // Leftover integers that don't fill a triple are ignored
        assert_eq!(
            decode_coordinates("n1_2_3_4"),
            vec![Coordinate::new(1, 2, 3)]
        );
        assert_eq!(decode_coordinates("n1_2_3_"), vec![Coordinate::new(1, 2, 3)]);
        assert!(decode_coordinates("n1_2").is_empty());
    }

    #[test]
    fn test_no_coordinates() {
        assert!(decode_coordinates("").is_empty());
        assert!(decode_coordinates("tsv_center").is_empty());
        assert!(decode_coordinates("n_1_2_3").is_empty());
        assert!(decode_coordinates("nn").is_empty());
    }

    #[test]
    fn test_display() {
        assert_eq!(Coordinate::new(1, 2, 3).to_string(), "(1, 2, 3)");
        assert_eq!(Point3::new(1, 2, -0.4).to_string(), "(1, 2, -0.4)");
    }
}
