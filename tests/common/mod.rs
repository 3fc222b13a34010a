#![allow(dead_code)]
//! Shared helpers for the root integration tests.

use std::path::PathBuf;
use tempfile::TempDir;

pub const CLOCK_TYPE: &str = "0x2::clock::Clock";
pub const SUI_COIN_TYPE: &str = "0x2::coin::Coin<0x2::sui::SUI>";

/// Write an object fixture (`{ id: type }`) into `dir` and return its path.
pub fn write_objects(dir: &TempDir, objects: &[(&str, &str)]) -> PathBuf {
    let map: serde_json::Map<String, serde_json::Value> = objects
        .iter()
        .map(|(id, ty)| (id.to_string(), serde_json::Value::from(*ty)))
        .collect();
    let path = dir.path().join("objects.json");
    std::fs::write(&path, serde_json::to_string_pretty(&map).unwrap()).expect("write objects");
    path
}
