//! Test helpers for writing route options and recorded responses to disk.

use camino::{Utf8Path, Utf8PathBuf};
use geo::Coord;
use tempfile::TempDir;
use waypath_core::{
    Attribute, AttributeOptions, ProfileIdentifier, RouteOptions, RouteShapeResolution,
    ShapeFormat,
};

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    waypath_fs::write_utf8_file(path, contents).expect("write test file");
}

/// Temporary directory holding the files one test works with.
#[derive(Debug)]
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }
}

/// Options matching the recorded annotation fixture.
pub(super) fn annotation_options() -> RouteOptions {
    RouteOptions::new(
        vec![
            Coord {
                x: -122.431373,
                y: 37.780602,
            },
            Coord {
                x: -122.404058,
                y: 37.758859,
            },
        ],
        ProfileIdentifier::AutomobileAvoidingTraffic,
    )
    .with_shape_format(ShapeFormat::Polyline)
    .with_shape_resolution(RouteShapeResolution::Full)
    .with_attributes(AttributeOptions::from_iter([
        Attribute::OpenStreetMapNodeIdentifier,
        Attribute::Distance,
        Attribute::ExpectedTravelTime,
        Attribute::Speed,
        Attribute::CongestionLevel,
    ]))
}

pub(super) fn write_options(path: &Utf8Path, options: &RouteOptions) {
    let payload = serde_json::to_string_pretty(options).expect("serialise options");
    write_utf8(path, payload.as_bytes());
}
