//! Point cloud decoding from ASCII xyz and PLY files
//!
//! The viewport only needs a point set; an optional per-point scalar named
//! "intensity" is kept for color-mapping and has no other role.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use glam::{DVec3, Vec3};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CloudError {
    #[error("could not open {path}: {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("binary PLY is not supported; export as ASCII")]
    BinaryUnsupported,
    #[error("PLY header is missing {0}")]
    MissingProperty(&'static str),
    #[error("file contains no points")]
    Empty,
}

/// An immutable point set with an optional intensity scalar
#[derive(Debug, Clone)]
pub struct PointCloud {
    positions: Vec<DVec3>,
    intensity: Option<Vec<f32>>,
    min: Vec3,
    max: Vec3,
    intensity_range: (f32, f32),
}

impl PointCloud {
    /// Load a cloud, choosing the parser by file extension
    /// (`.ply` is PLY, everything else is whitespace xyz)
    pub fn load(path: &Path) -> Result<Self, CloudError> {
        let reader = open(path)?;
        let is_ply = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("ply"))
            .unwrap_or(false);
        let (positions, intensity) = if is_ply {
            parse_ply(reader)?
        } else {
            parse_xyz(reader)?
        };
        Self::build(positions, intensity)
    }

    fn build(positions: Vec<DVec3>, intensity: Option<Vec<f32>>) -> Result<Self, CloudError> {
        if positions.is_empty() {
            return Err(CloudError::Empty);
        }
        let mut min = Vec3::MAX;
        let mut max = Vec3::MIN;
        for p in &positions {
            min = min.min(p.as_vec3());
            max = max.max(p.as_vec3());
        }
        let intensity_range = intensity
            .as_deref()
            .map(|values| {
                values.iter().fold((f32::MAX, f32::MIN), |(lo, hi), v| {
                    (lo.min(*v), hi.max(*v))
                })
            })
            .unwrap_or((0.0, 0.0));
        Ok(Self {
            positions,
            intensity,
            min,
            max,
            intensity_range,
        })
    }

    pub fn positions(&self) -> &[DVec3] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Axis-aligned bounding box
    pub fn bounds(&self) -> (Vec3, Vec3) {
        (self.min, self.max)
    }

    pub fn has_intensity(&self) -> bool {
        self.intensity.is_some()
    }

    /// Intensity of point `index` normalized into `[0, 1]`, when present
    pub fn intensity_t(&self, index: usize) -> Option<f32> {
        let values = self.intensity.as_deref()?;
        let (lo, hi) = self.intensity_range;
        let span = hi - lo;
        if span <= f32::EPSILON {
            return Some(0.5);
        }
        Some((values[index] - lo) / span)
    }
}

fn open(path: &Path) -> Result<BufReader<File>, CloudError> {
    let file = File::open(path).map_err(|source| CloudError::Open {
        path: path.display().to_string(),
        source,
    })?;
    Ok(BufReader::new(file))
}

/// Parse `x y z [intensity]` lines; `#` lines are comments
fn parse_xyz<R: BufRead>(reader: R) -> Result<(Vec<DVec3>, Option<Vec<f32>>), CloudError> {
    let mut positions = Vec::new();
    let mut intensity = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let number = index + 1;
        let line = line.map_err(|e| CloudError::Parse {
            line: number,
            message: e.to_string(),
        })?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let mut tokens = trimmed.split_whitespace();
        let mut coord = [0.0f64; 3];
        for value in &mut coord {
            let token = tokens.next().ok_or(CloudError::Parse {
                line: number,
                message: "expected x y z".into(),
            })?;
            *value = parse_number(token, number)?;
        }
        positions.push(DVec3::from_array(coord));
        if let Some(token) = tokens.next() {
            intensity.push(parse_number(token, number)? as f32);
        }
    }
    // Intensity only counts when every point carries it
    let intensity = (intensity.len() == positions.len() && !intensity.is_empty())
        .then_some(intensity);
    Ok((positions, intensity))
}

/// Property layout of the PLY vertex element
struct VertexLayout {
    count: usize,
    x: usize,
    y: usize,
    z: usize,
    intensity: Option<usize>,
    width: usize,
}

fn parse_ply<R: BufRead>(mut reader: R) -> Result<(Vec<DVec3>, Option<Vec<f32>>), CloudError> {
    let layout = parse_ply_header(&mut reader)?;

    let mut positions = Vec::with_capacity(layout.count);
    let mut intensity = layout.intensity.map(|_| Vec::with_capacity(layout.count));
    let mut line = String::new();
    let mut number = 0usize;
    while positions.len() < layout.count {
        line.clear();
        number += 1;
        let read = reader.read_line(&mut line).map_err(|e| CloudError::Parse {
            line: number,
            message: e.to_string(),
        })?;
        if read == 0 {
            return Err(CloudError::Parse {
                line: number,
                message: format!(
                    "vertex data ended after {} of {} points",
                    positions.len(),
                    layout.count
                ),
            });
        }
        if line.trim().is_empty() {
            continue;
        }
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < layout.width {
            return Err(CloudError::Parse {
                line: number,
                message: format!(
                    "expected {} vertex properties, found {}",
                    layout.width,
                    tokens.len()
                ),
            });
        }
        positions.push(DVec3::new(
            parse_number(tokens[layout.x], number)?,
            parse_number(tokens[layout.y], number)?,
            parse_number(tokens[layout.z], number)?,
        ));
        if let (Some(values), Some(index)) = (intensity.as_mut(), layout.intensity) {
            values.push(parse_number(tokens[index], number)? as f32);
        }
    }
    Ok((positions, intensity))
}

fn parse_ply_header<R: BufRead>(reader: &mut R) -> Result<VertexLayout, CloudError> {
    let mut line = String::new();
    let mut number = 0usize;
    let mut count = None;
    let mut properties: Vec<String> = Vec::new();
    let mut in_vertex_element = false;
    loop {
        line.clear();
        number += 1;
        let read = reader.read_line(&mut line).map_err(|e| CloudError::Parse {
            line: number,
            message: e.to_string(),
        })?;
        if read == 0 {
            return Err(CloudError::Parse {
                line: number,
                message: "unexpected end of PLY header".into(),
            });
        }
        if number == 1 {
            if line.trim() != "ply" {
                return Err(CloudError::Parse {
                    line: 1,
                    message: "not a PLY file".into(),
                });
            }
            continue;
        }
        let tokens: Vec<&str> = line.split_whitespace().collect();
        match tokens.as_slice() {
            ["format", "ascii", ..] => {}
            ["format", ..] => return Err(CloudError::BinaryUnsupported),
            ["comment", ..] | ["obj_info", ..] | [] => {}
            ["element", "vertex", n] => {
                in_vertex_element = true;
                count = Some(n.parse().map_err(|_| CloudError::Parse {
                    line: number,
                    message: format!("bad vertex count '{n}'"),
                })?);
            }
            ["element", ..] => in_vertex_element = false,
            ["property", "list", ..] => {}
            ["property", _ty, name] if in_vertex_element => {
                properties.push((*name).to_owned());
            }
            ["property", ..] => {}
            ["end_header"] => break,
            _ => {
                return Err(CloudError::Parse {
                    line: number,
                    message: format!("unrecognized header line '{}'", line.trim()),
                });
            }
        }
    }

    let count = count.ok_or(CloudError::MissingProperty("an element vertex declaration"))?;
    let find = |name: &str| properties.iter().position(|p| p.eq_ignore_ascii_case(name));
    Ok(VertexLayout {
        count,
        x: find("x").ok_or(CloudError::MissingProperty("property x"))?,
        y: find("y").ok_or(CloudError::MissingProperty("property y"))?,
        z: find("z").ok_or(CloudError::MissingProperty("property z"))?,
        intensity: find("intensity"),
        width: properties.len(),
    })
}

fn parse_number(token: &str, line: usize) -> Result<f64, CloudError> {
    token.parse().map_err(|_| CloudError::Parse {
        line,
        message: format!("'{token}' is not a number"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn cloud_from_xyz(text: &str) -> Result<PointCloud, CloudError> {
        let (positions, intensity) = parse_xyz(Cursor::new(text))?;
        PointCloud::build(positions, intensity)
    }

    fn cloud_from_ply(text: &str) -> Result<PointCloud, CloudError> {
        let (positions, intensity) = parse_ply(Cursor::new(text))?;
        PointCloud::build(positions, intensity)
    }

    #[test]
    fn xyz_parses_points_and_bounds() {
        let cloud = cloud_from_xyz("# comment\n0 0 0\n1 2 3\n\n-1 -2 -3\n").unwrap();
        assert_eq!(cloud.len(), 3);
        assert_eq!(cloud.positions()[1], DVec3::new(1.0, 2.0, 3.0));
        assert_eq!(cloud.bounds(), (Vec3::new(-1.0, -2.0, -3.0), Vec3::new(1.0, 2.0, 3.0)));
        assert!(!cloud.has_intensity());
    }

    #[test]
    fn xyz_reads_a_fourth_column_as_intensity() {
        let cloud = cloud_from_xyz("0 0 0 10\n1 1 1 20\n2 2 2 30\n").unwrap();
        assert!(cloud.has_intensity());
        assert_eq!(cloud.intensity_t(0), Some(0.0));
        assert_eq!(cloud.intensity_t(1), Some(0.5));
        assert_eq!(cloud.intensity_t(2), Some(1.0));
    }

    #[test]
    fn xyz_rejects_bad_tokens() {
        let err = cloud_from_xyz("0 0 zero\n").unwrap_err();
        assert!(matches!(err, CloudError::Parse { line: 1, .. }), "{err:?}");
    }

    #[test]
    fn empty_input_is_an_error() {
        assert!(matches!(cloud_from_xyz(""), Err(CloudError::Empty)));
    }

    #[test]
    fn ascii_ply_with_intensity() {
        let text = "ply\n\
                    format ascii 1.0\n\
                    comment made by hand\n\
                    element vertex 2\n\
                    property float x\n\
                    property float y\n\
                    property float z\n\
                    property float intensity\n\
                    end_header\n\
                    0 1 2 5\n\
                    3 4 5 9\n";
        let cloud = cloud_from_ply(text).unwrap();
        assert_eq!(cloud.len(), 2);
        assert_eq!(cloud.positions()[0], DVec3::new(0.0, 1.0, 2.0));
        assert!(cloud.has_intensity());
        assert_eq!(cloud.intensity_t(1), Some(1.0));
    }

    #[test]
    fn ply_property_order_is_respected() {
        let text = "ply\n\
                    format ascii 1.0\n\
                    element vertex 1\n\
                    property float z\n\
                    property float x\n\
                    property float y\n\
                    end_header\n\
                    3 1 2\n";
        let cloud = cloud_from_ply(text).unwrap();
        assert_eq!(cloud.positions()[0], DVec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn binary_ply_is_rejected() {
        let text = "ply\nformat binary_little_endian 1.0\nelement vertex 1\nend_header\n";
        assert!(matches!(
            cloud_from_ply(text),
            Err(CloudError::BinaryUnsupported)
        ));
    }

    #[test]
    fn truncated_ply_vertex_data_is_an_error() {
        let text = "ply\n\
                    format ascii 1.0\n\
                    element vertex 3\n\
                    property float x\n\
                    property float y\n\
                    property float z\n\
                    end_header\n\
                    0 0 0\n";
        let err = cloud_from_ply(text).unwrap_err();
        assert!(matches!(err, CloudError::Parse { .. }), "{err:?}");
    }

    #[test]
    fn constant_intensity_maps_to_midpoint() {
        let cloud = cloud_from_xyz("0 0 0 7\n1 1 1 7\n").unwrap();
        assert_eq!(cloud.intensity_t(0), Some(0.5));
    }
}
