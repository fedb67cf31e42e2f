use base64::Engine as _;
use cgmath::{Deg, InnerSpace, Point3, Rad, Vector3};
use region_viewer::{
    animation::RegionState,
    config::{DEFAULT_REGIONS, Palette},
    data_structures::bounds::Aabb,
    registry::RegionRegistry,
    state::ViewerState,
};

pub const EPSILON: f32 = 1e-4;

pub fn fovy() -> Rad<f32> {
    Deg(75.0).into()
}

pub fn registry() -> RegionRegistry {
    RegionRegistry::new(DEFAULT_REGIONS)
}

/// A flat 2x2 region centred on `(x, 0, z)`, as framed after the lift shift.
pub fn square_bounds(x: f32, z: f32) -> Aabb {
    Aabb::new(Point3::new(x - 1.0, 0.25, z - 1.0), Point3::new(x + 1.0, 0.35, z + 1.0))
}

pub fn region(x: f32, z: f32) -> RegionState {
    RegionState::new(square_bounds(x, z), Palette::default().rest)
}

/// A viewer over the default regions where every region in `loaded` is
/// ready and every region in `failed` could not be loaded.
pub fn viewer(loaded: &[usize], failed: &[usize]) -> ViewerState {
    let mut state = ViewerState::new(registry(), Palette::default());
    for &i in loaded {
        assert!(state.region_loaded(i, square_bounds(i as f32 * 3.0, 0.0)));
    }
    for &i in failed {
        assert!(state.region_failed(i));
    }
    state
}

pub fn run_frames(state: &mut ViewerState, frames: usize) {
    for _ in 0..frames {
        state.update(fovy());
    }
}

pub fn offset(state: &ViewerState, index: usize) -> f32 {
    state.regions.get(index).map(|r| r.anim.offset).unwrap_or(0.0)
}

pub fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < EPSILON,
        "expected {} to be close to {}",
        actual,
        expected
    );
}

pub fn assert_vec_close(actual: Vector3<f32>, expected: Vector3<f32>) {
    assert!(
        (actual - expected).magnitude() < EPSILON,
        "expected {:?} to be close to {:?}",
        actual,
        expected
    );
}

fn floats_to_bytes(values: &[[f32; 3]]) -> Vec<u8> {
    values
        .iter()
        .flat_map(|v| v.iter().flat_map(|f| f.to_le_bytes()))
        .collect()
}

fn bounds_json(values: &[[f32; 3]]) -> (String, String) {
    let mut min = [f32::MAX; 3];
    let mut max = [f32::MIN; 3];
    for v in values {
        for axis in 0..3 {
            min[axis] = min[axis].min(v[axis]);
            max[axis] = max[axis].max(v[axis]);
        }
    }
    let fmt = |v: [f32; 3]| format!("[{:?},{:?},{:?}]", v[0], v[1], v[2]);
    (fmt(min), fmt(max))
}

/// A minimal glTF file holding one primitive on one node.
///
/// `node_transform` is spliced into the node object, e.g.
/// `"translation":[2,0,0]`. The buffer is embedded as a data URI unless
/// `buffer_uri` names a sibling file; the raw buffer bytes are returned too.
pub fn gltf_document(
    positions: &[[f32; 3]],
    normals: Option<&[[f32; 3]]>,
    node_transform: &str,
    mode: u32,
    buffer_uri: Option<&str>,
) -> (String, Vec<u8>) {
    let mut bytes = floats_to_bytes(positions);
    let position_len = bytes.len();
    if let Some(normals) = normals {
        bytes.extend(floats_to_bytes(normals));
    }
    let uri = match buffer_uri {
        Some(uri) => uri.to_string(),
        None => format!(
            "data:application/octet-stream;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(&bytes)
        ),
    };

    let (min, max) = bounds_json(positions);
    let mut accessors = vec![format!(
        r#"{{"bufferView":0,"componentType":5126,"count":{},"type":"VEC3","min":{},"max":{}}}"#,
        positions.len(),
        min,
        max
    )];
    let mut views = vec![format!(
        r#"{{"buffer":0,"byteOffset":0,"byteLength":{}}}"#,
        position_len
    )];
    let mut attributes = r#""POSITION":0"#.to_string();
    if let Some(normals) = normals {
        accessors.push(format!(
            r#"{{"bufferView":1,"componentType":5126,"count":{},"type":"VEC3"}}"#,
            normals.len()
        ));
        views.push(format!(
            r#"{{"buffer":0,"byteOffset":{},"byteLength":{}}}"#,
            position_len,
            bytes.len() - position_len
        ));
        attributes.push_str(r#","NORMAL":1"#);
    }

    let node = if node_transform.is_empty() {
        r#"{"mesh":0}"#.to_string()
    } else {
        format!(r#"{{"mesh":0,{}}}"#, node_transform)
    };

    let json = format!(
        r#"{{
  "asset": {{"version": "2.0"}},
  "scene": 0,
  "scenes": [{{"nodes": [0]}}],
  "nodes": [{}],
  "meshes": [{{"primitives": [{{"attributes": {{{}}}, "mode": {}}}]}}],
  "buffers": [{{"uri": "{}", "byteLength": {}}}],
  "bufferViews": [{}],
  "accessors": [{}]
}}"#,
        node,
        attributes,
        mode,
        uri,
        bytes.len(),
        views.join(","),
        accessors.join(",")
    );
    (json, bytes)
}

/// The right-angled triangle `(0,0,0) (1,0,0) (0,0,1)` in the XZ plane.
pub fn triangle() -> [[f32; 3]; 3] {
    [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]]
}
