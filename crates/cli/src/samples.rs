//! Walk files.
//!
//! CSV (`lat, lon, t, accuracy`; `t` in Unix seconds) goes through polars;
//! JSON is a plain array of serialized `PathSample`s.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use polars::prelude::*;
use territory::api::{GeoPoint, PathSample};

use crate::provenance::ensure_parent;

const COLUMNS: [&str; 4] = ["lat", "lon", "t", "accuracy"];

pub fn read_samples(path: &Path) -> Result<Vec<PathSample>> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("csv") => read_csv(path),
        Some("json") => {
            let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))
        }
        _ => bail!(
            "unsupported walk file {} (expected .csv or .json)",
            path.display()
        ),
    }
}

fn read_csv(path: &Path) -> Result<Vec<PathSample>> {
    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(100))
        .finish()?
        .select(COLUMNS.map(|c| col(c).cast(DataType::Float64)))
        .collect()
        .with_context(|| format!("reading {}", path.display()))?;
    tracing::info!(rows = df.height(), cols = df.width(), "walk_csv_loaded");

    let lat = df.column("lat")?.f64()?;
    let lon = df.column("lon")?.f64()?;
    let t = df.column("t")?.f64()?;
    let accuracy = df.column("accuracy")?.f64()?;

    let mut out = Vec::with_capacity(df.height());
    let rows = lat.into_iter().zip(lon).zip(t).zip(accuracy);
    for (row, (((lat, lon), t), accuracy)) in rows.enumerate() {
        let (Some(lat), Some(lon), Some(t), Some(accuracy)) = (lat, lon, t, accuracy) else {
            bail!("{}: row {row} has an empty field", path.display());
        };
        out.push(PathSample::new(
            GeoPoint::new(lat, lon),
            unix_seconds(t)?,
            accuracy,
        ));
    }
    Ok(out)
}

fn unix_seconds(t: f64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis((t * 1000.0).round() as i64)
        .with_context(|| format!("timestamp {t} out of range"))
}

pub fn write_csv(path: &Path, samples: &[PathSample]) -> Result<()> {
    let mut df = df!(
        "lat" => samples.iter().map(|s| s.point.lat).collect::<Vec<_>>(),
        "lon" => samples.iter().map(|s| s.point.lon).collect::<Vec<_>>(),
        "t" => samples
            .iter()
            .map(|s| s.timestamp.timestamp_millis() as f64 / 1000.0)
            .collect::<Vec<_>>(),
        "accuracy" => samples.iter().map(|s| s.accuracy_m).collect::<Vec<_>>()
    )?;
    ensure_parent(path)?;
    let mut file =
        fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    CsvWriter::new(&mut file).finish(&mut df)?;
    tracing::info!(path = %path.display(), rows = df.height(), "walk_csv_written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use territory::api::{distance, draw_walk, WalkCfg, WalkReplay};

    fn walk() -> Vec<PathSample> {
        let start = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let cfg = WalkCfg {
            jitter_m: 0.5,
            ..WalkCfg::default()
        };
        draw_walk(cfg, GeoPoint::new(47.3769, 8.5417), start, WalkReplay { seed: 1, index: 0 })
    }

    #[test]
    fn csv_written_by_simulate_reads_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("walks").join("square.csv");
        let original = walk();
        write_csv(&path, &original).unwrap();
        let back = read_samples(&path).unwrap();
        assert_eq!(back.len(), original.len());
        for (a, b) in back.iter().zip(&original) {
            assert!(distance(a.point, b.point) < 0.01);
            assert_eq!(a.timestamp, b.timestamp);
            assert_eq!(a.accuracy_m, b.accuracy_m);
        }
    }

    #[test]
    fn csv_with_integer_columns_is_accepted() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("walk.csv");
        fs::write(&path, "lat,lon,t,accuracy\n47.5,8.25,1700000000,5\n47.6,8.25,1700000003,7\n")
            .unwrap();
        let samples = read_samples(&path).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[1].accuracy_m, 7.0);
        assert_eq!(samples[1].seconds_since(&samples[0]), 3.0);
    }

    #[test]
    fn json_walks_read_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("walk.json");
        let original = walk();
        fs::write(&path, serde_json::to_vec(&original).unwrap()).unwrap();
        let back = read_samples(&path).unwrap();
        assert_eq!(back.len(), original.len());
        assert_eq!(back[3].timestamp, original[3].timestamp);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = read_samples(Path::new("walk.gpx")).unwrap_err();
        assert!(err.to_string().contains("unsupported walk file"));
    }
}
