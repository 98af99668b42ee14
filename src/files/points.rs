//! Keypoint text files: one point per line, whitespace-separated fields
//!
//! Image keypoints are stored as `x y`, cloud keypoints as `x y z`. Reads are
//! strict: any malformed line fails the whole load so a bad file never leaves
//! a half-replaced list. Blank lines are skipped and extra trailing tokens
//! are ignored, matching the files other tools in the pipeline produce.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use glam::DVec3;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PointsError {
    #[error("could not open {path}: {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
    #[error("line {line}: expected {expected} coordinates, found {found}")]
    TooFewValues {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("line {line}: '{token}' is not a number")]
    BadNumber { line: usize, token: String },
}

/// Read `x y` pairs; each becomes a coordinate with z = 0
pub fn read_image_points(path: &Path) -> Result<Vec<DVec3>, PointsError> {
    read_points(path, 2)
}

/// Read `x y z` triples
pub fn read_cloud_points(path: &Path) -> Result<Vec<DVec3>, PointsError> {
    read_points(path, 3)
}

/// Write one `x y` line per coordinate, in iteration order
pub fn write_image_points<I>(path: &Path, points: I) -> Result<(), PointsError>
where
    I: IntoIterator<Item = DVec3>,
{
    write_lines(path, points.into_iter().map(|p| format!("{} {}", p.x, p.y)))
}

/// Write one `x y z` line per coordinate, in iteration order
pub fn write_cloud_points<I>(path: &Path, points: I) -> Result<(), PointsError>
where
    I: IntoIterator<Item = DVec3>,
{
    write_lines(
        path,
        points
            .into_iter()
            .map(|p| format!("{} {} {}", p.x, p.y, p.z)),
    )
}

fn read_points(path: &Path, expected: usize) -> Result<Vec<DVec3>, PointsError> {
    let file = File::open(path).map_err(|source| PointsError::Open {
        path: path.display().to_string(),
        source,
    })?;
    let reader = BufReader::new(file);

    let mut points = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| PointsError::Open {
            path: path.display().to_string(),
            source,
        })?;
        let number = index + 1;
        if line.trim().is_empty() {
            continue;
        }
        let values = parse_line(&line, number, expected)?;
        points.push(DVec3::new(
            values[0],
            values[1],
            if expected == 3 { values[2] } else { 0.0 },
        ));
    }
    Ok(points)
}

fn parse_line(line: &str, number: usize, expected: usize) -> Result<[f64; 3], PointsError> {
    let mut values = [0.0; 3];
    let mut found = 0;
    for token in line.split_whitespace().take(expected) {
        values[found] = token.parse().map_err(|_| PointsError::BadNumber {
            line: number,
            token: token.to_owned(),
        })?;
        found += 1;
    }
    if found < expected {
        return Err(PointsError::TooFewValues {
            line: number,
            expected,
            found,
        });
    }
    Ok(values)
}

fn write_lines<I>(path: &Path, lines: I) -> Result<(), PointsError>
where
    I: Iterator<Item = String>,
{
    let as_write_err = |source| PointsError::Write {
        path: path.display().to_string(),
        source,
    };
    let file = File::create(path).map_err(as_write_err)?;
    let mut writer = BufWriter::new(file);
    for line in lines {
        writeln!(writer, "{line}").map_err(as_write_err)?;
    }
    writer.flush().map_err(as_write_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn temp_path(dir: &tempfile::TempDir, name: &str) -> std::path::PathBuf {
        dir.path().join(name)
    }

    #[test]
    fn image_points_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_path(&dir, "fixed.txt");
        let points = vec![
            DVec3::new(1.0, 2.0, 0.0),
            DVec3::new(3.4, 5.6, 0.0),
            DVec3::new(-0.25, 1024.125, 0.0),
        ];
        write_image_points(&path, points.iter().copied()).unwrap();
        assert_eq!(read_image_points(&path).unwrap(), points);
    }

    #[test]
    fn cloud_points_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_path(&dir, "moving.txt");
        let points = vec![DVec3::new(1.0, 2.0, 3.0), DVec3::new(4.0, 5.0, 6.0)];
        write_cloud_points(&path, points.iter().copied()).unwrap();
        assert_eq!(read_cloud_points(&path).unwrap(), points);
    }

    #[test]
    fn written_lines_use_plain_decimal_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_path(&dir, "fixed.txt");
        write_image_points(
            &path,
            vec![DVec3::new(1.0, 2.0, 0.0), DVec3::new(3.4, 5.6, 0.0)],
        )
        .unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "1 2\n3.4 5.6\n");
    }

    #[test]
    fn empty_list_writes_an_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_path(&dir, "empty.txt");
        write_cloud_points(&path, std::iter::empty()).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
        assert!(read_cloud_points(&path).unwrap().is_empty());
    }

    #[test]
    fn blank_lines_are_skipped_and_extra_tokens_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_path(&dir, "fixed.txt");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "1 2 trailing garbage").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "  3 4  ").unwrap();
        drop(file);
        let points = read_image_points(&path).unwrap();
        assert_eq!(
            points,
            vec![DVec3::new(1.0, 2.0, 0.0), DVec3::new(3.0, 4.0, 0.0)]
        );
    }

    #[test]
    fn non_numeric_token_fails_the_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_path(&dir, "bad.txt");
        std::fs::write(&path, "1 2 3\n4 five 6\n").unwrap();
        let err = read_cloud_points(&path).unwrap_err();
        assert!(
            matches!(err, PointsError::BadNumber { line: 2, ref token } if token == "five"),
            "{err:?}"
        );
    }

    #[test]
    fn short_line_fails_the_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_path(&dir, "short.txt");
        std::fs::write(&path, "1 2 3\n4 5\n").unwrap();
        let err = read_cloud_points(&path).unwrap_err();
        assert!(
            matches!(
                err,
                PointsError::TooFewValues {
                    line: 2,
                    expected: 3,
                    found: 2
                }
            ),
            "{err:?}"
        );
    }

    #[test]
    fn missing_file_reports_the_path() {
        let err = read_image_points(Path::new("/nonexistent/points.txt")).unwrap_err();
        assert!(matches!(err, PointsError::Open { .. }));
    }
}
