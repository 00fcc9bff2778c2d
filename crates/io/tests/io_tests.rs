//! File-level tests for seamline-io.

use std::fs;

use seamline_core::{Error, Footprint, MaskReader, SegmentedFootprint, VectorWriter};
use seamline_io::{FootprintCollection, GeoJsonWriter, IoError, JsonMaskReader};
use tempfile::tempdir;

#[test]
fn test_read_mask_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tile_01.json");
    fs::write(
        &path,
        r#"{"width": 2, "height": 2, "nodata": 0, "crs": "EPSG:2154",
            "transform": [10.0, 1.0, 0.0, 20.0, 0.0, -1.0],
            "data": [1, 1, 0, 1]}"#,
    )
    .unwrap();

    let mask = JsonMaskReader::new().read_mask(&path).unwrap();
    assert_eq!(mask.inside_count(), 3);
    assert_eq!(mask.crs(), Some("EPSG:2154"));
}

#[test]
fn test_missing_mask_is_io_error() {
    let dir = tempdir().unwrap();
    let result = JsonMaskReader::new().read_mask(&dir.path().join("absent.json"));
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_garbage_mask_is_format_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(&path, "[1, 2, 3]").unwrap();
    let result = JsonMaskReader::new().read_mask(&path);
    assert!(matches!(result, Err(Error::Format(_))));
}

#[test]
fn test_footprint_collection_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("footprints.json");
    let footprints = vec![
        Footprint::rectangle("a", 0.0, 0.0, 1.0, 1.0),
        Footprint::rectangle("b", 0.5, 0.0, 1.5, 1.0),
    ];

    FootprintCollection::new(Some("EPSG:3857".into()), &footprints)
        .save_json(&path)
        .unwrap();
    let loaded = FootprintCollection::from_json_file(&path).unwrap();

    assert_eq!(loaded.crs.as_deref(), Some("EPSG:3857"));
    assert_eq!(loaded.to_footprints(), footprints);
}

#[test]
fn test_degenerate_footprint_record_is_format_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("footprints.json");
    fs::write(
        &path,
        r#"{"footprints": [{"image": "sliver", "polygon": [[0, 0], [1, 0]]}]}"#,
    )
    .unwrap();

    let err = FootprintCollection::from_json_file(&path).unwrap_err();
    assert!(matches!(err, IoError::Invalid(_)));
    assert!(matches!(Error::from(err), Error::Format(_)));
}

#[test]
fn test_write_geojson_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("seamlines.geojson");
    let segmented = vec![SegmentedFootprint {
        label: "tile_01".into(),
        polygon: Footprint::rectangle("tile_01", 0.0, 0.0, 2.0, 2.0).polygon,
        cuts_applied: 1,
    }];

    GeoJsonWriter::new()
        .with_layer_name("mosaic")
        .write(&path, Some("EPSG:32633"), &segmented)
        .unwrap();

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["name"], "mosaic");
    assert_eq!(value["features"].as_array().unwrap().len(), 1);
    assert_eq!(value["features"][0]["properties"]["image"], "tile_01");
    assert_eq!(value["features"][0]["geometry"]["coordinates"][0][2][0], 2.0);
}
