#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::{TempDir, tempdir};

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    /// Creates a fresh scratch directory for the current test case.
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    /// Returns the root path for all files owned by this workspace.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let mut file = File::create(&path).expect("create temp file");
        file.write_all(contents.as_bytes())
            .expect("write temp file contents");
        path
    }
}

/// A small well-formed catalog with the canonical header, rendered with the
/// given delimiter. Powers span 18..400 and lumens 1350..42000.
pub fn sample_catalog(delimiter: char) -> String {
    let rows: [[&str; 8]; 5] = [
        [
            "Product Name",
            "Space Type",
            "Lighting Type",
            "ATEX Certified",
            "Power (W)",
            "Lumen Output",
            "Image URL",
            "Product Link",
        ],
        [
            "Aurora Highbay",
            "Warehouse",
            "LED",
            "Yes",
            "200",
            "26000",
            "https://img.example/aurora.png",
            "https://shop.example/aurora",
        ],
        [
            "Beam Office Panel",
            "Office",
            "LED",
            "No",
            "40",
            "3600",
            "https://img.example/beam.png",
            "https://shop.example/beam",
        ],
        [
            "Corona Floodlight",
            "Outdoor",
            "HID",
            "Yes",
            "400",
            "42000",
            "https://img.example/corona.png",
            "https://shop.example/corona",
        ],
        [
            "Dura Tube",
            "Office",
            "Fluorescent",
            "No",
            "18",
            "1350",
            "https://img.example/dura.png",
            "https://shop.example/dura",
        ],
    ];
    let mut text = String::new();
    for row in rows {
        text.push_str(&row.join(&delimiter.to_string()));
        text.push('\n');
    }
    text
}
