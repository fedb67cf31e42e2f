use cgmath::{InnerSpace, Point3, Vector3};
use futures::executor::block_on;
use region_viewer::resources::{
    LoadProgress, decode_data_uri, load_region, load_region_from_bytes, mesh::compute_normals,
    resolve_uri,
};

mod common;

use crate::common::test_utils::{assert_vec_close, gltf_document, triangle};

const TRIANGLES: u32 = 4;
const POINTS: u32 = 0;

#[test]
fn should_bake_node_translation_and_compute_normals() {
    let (json, _) = gltf_document(&triangle(), None, r#""translation":[2,0,0]"#, TRIANGLES, None);
    let geometry = block_on(load_region_from_bytes(json.as_bytes(), "models/Test.gltf", "Test"))
        .expect("valid model");

    let positions: Vec<[f32; 3]> = geometry.vertices.iter().map(|v| v.position).collect();
    assert_eq!(positions, vec![[2.0, 0.0, 0.0], [3.0, 0.0, 0.0], [2.0, 0.0, 1.0]]);
    assert_eq!(geometry.indices, vec![0, 1, 2]);
    for vertex in &geometry.vertices {
        assert_vec_close(vertex.normal.into(), Vector3::new(0.0, -1.0, 0.0));
    }

    assert_eq!(geometry.bounds.min, Point3::new(2.0, 0.0, 0.0));
    assert_eq!(geometry.bounds.max, Point3::new(3.0, 0.0, 1.0));
    let framing = geometry.framing_bounds();
    assert_eq!(framing.min, Point3::new(2.0, 0.25, 0.0));
    assert_eq!(framing.max, Point3::new(3.0, 0.25, 1.0));
}

#[test]
fn should_keep_winding_under_mirroring() {
    let (json, _) = gltf_document(&triangle(), None, r#""scale":[-1,1,1]"#, TRIANGLES, None);
    let geometry = block_on(load_region_from_bytes(json.as_bytes(), "Test.gltf", "Test"))
        .expect("valid model");

    assert_eq!(geometry.vertices[1].position, [-1.0, 0.0, 0.0]);
    assert_eq!(geometry.indices, vec![0, 2, 1]);
    for vertex in &geometry.vertices {
        assert_vec_close(vertex.normal.into(), Vector3::new(0.0, -1.0, 0.0));
    }
}

#[test]
fn should_renormalize_supplied_normals() {
    let up = [[0.0, 1.0, 0.0]; 3];
    let (json, _) = gltf_document(&triangle(), Some(&up), r#""scale":[3,0.5,3]"#, TRIANGLES, None);
    let geometry = block_on(load_region_from_bytes(json.as_bytes(), "Test.gltf", "Test"))
        .expect("valid model");

    assert_eq!(geometry.bounds.max, Point3::new(3.0, 0.0, 3.0));
    for vertex in &geometry.vertices {
        let normal = Vector3::from(vertex.normal);
        assert!((normal.magnitude() - 1.0).abs() < 1e-5);
        assert_vec_close(normal, Vector3::unit_y());
    }
}

#[test]
fn should_reject_models_without_triangles() {
    let (json, _) = gltf_document(&triangle(), None, "", POINTS, None);
    let result = block_on(load_region_from_bytes(json.as_bytes(), "Test.gltf", "Test"));
    assert!(result.is_err());
}

#[test]
fn should_reject_garbage() {
    let result = block_on(load_region_from_bytes(b"not a model", "Test.gltf", "Test"));
    assert!(result.is_err());
}

#[tokio::test]
async fn should_load_sibling_buffers_from_disk() {
    let dir = std::env::temp_dir().join(format!("region-viewer-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("temp dir");
    let (json, bytes) = gltf_document(&triangle(), None, "", TRIANGLES, Some("Test.bin"));
    std::fs::write(dir.join("Test.gltf"), json).expect("write model");
    std::fs::write(dir.join("Test.bin"), bytes).expect("write buffer");

    let path = format!("{}/Test.gltf", dir.display());
    let geometry = load_region(&path, "Test").await.expect("valid model");
    assert_eq!(geometry.vertices.len(), 3);
    assert_eq!(geometry.bounds.max, Point3::new(1.0, 0.0, 1.0));

    let missing = load_region(&format!("{}/Missing.gltf", dir.display()), "Missing").await;
    assert!(missing.is_err());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn should_resolve_relative_uris() {
    let resolve = |model: &str, uri: &str| resolve_uri(model, uri).expect("valid uri");
    assert_eq!(resolve("models/Nadia.gltf", "Nadia.bin"), "models/Nadia.bin");
    assert_eq!(resolve("Nadia.gltf", "Nadia.bin"), "Nadia.bin");
    assert_eq!(resolve("/srv/a/b.gltf", "buffers/b.bin"), "/srv/a/buffers/b.bin");
}

#[test]
fn should_percent_decode_buffer_uris() {
    assert_eq!(
        resolve_uri("models/Dakshin Dinajpur.gltf", "Dakshin%20Dinajpur.bin").expect("valid uri"),
        "models/Dakshin Dinajpur.bin"
    );
    assert_eq!(
        resolve_uri("Paschim Medinipur.gltf", "Paschim%20Medinipur.bin").expect("valid uri"),
        "Paschim Medinipur.bin"
    );
    assert!(resolve_uri("a.gltf", "%FF.bin").is_err());
}

#[tokio::test]
async fn should_load_encoded_sibling_buffers_from_disk() {
    let dir = std::env::temp_dir().join(format!("region-viewer-encoded-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("temp dir");
    let (json, bytes) =
        gltf_document(&triangle(), None, "", TRIANGLES, Some("Dakshin%20Dinajpur.bin"));
    std::fs::write(dir.join("Dakshin Dinajpur.gltf"), json).expect("write model");
    std::fs::write(dir.join("Dakshin Dinajpur.bin"), bytes).expect("write buffer");

    let path = format!("{}/Dakshin Dinajpur.gltf", dir.display());
    let geometry = load_region(&path, "Dakshin Dinajpur")
        .await
        .expect("buffer found under its decoded name");
    assert_eq!(geometry.vertices.len(), 3);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn should_decode_base64_data_uris_only() {
    let decoded = decode_data_uri("data:application/octet-stream;base64,AAEC").expect("data uri");
    assert_eq!(decoded.expect("valid base64"), vec![0u8, 1, 2]);

    assert!(decode_data_uri("Nadia.bin").is_none());
    assert!(decode_data_uri("data:text/plain,hello").expect("data uri").is_err());
    assert!(decode_data_uri("data:;base64,@@@").expect("data uri").is_err());
}

#[test]
fn should_report_each_percent_once() {
    let mut progress = LoadProgress::new("Nadia", Some(200));
    assert_eq!(progress.advance(1), Some(0));
    assert_eq!(progress.advance(1), Some(1));
    assert_eq!(progress.advance(0), None);
    assert_eq!(progress.advance(98), Some(50));
    assert_eq!(progress.advance(100), Some(100));
    assert_eq!(progress.loaded(), 200);

    let mut unknown = LoadProgress::new("Nadia", None);
    assert_eq!(unknown.advance(4096), None);
}

#[test]
fn should_report_progress_per_streamed_chunk() {
    // a 1000 byte body arriving in uneven network chunks
    let chunks = [100u64, 150, 5, 245, 500];
    let mut progress = LoadProgress::new("Nadia", Some(1000));
    let reported: Vec<u32> = chunks
        .iter()
        .filter_map(|&len| progress.advance(len))
        .collect();
    assert_eq!(reported, vec![10, 25, 50, 100]);
    assert_eq!(progress.loaded(), 1000);
}

#[test]
fn computed_normals_average_adjacent_faces() {
    // two triangles folded along the x axis
    let positions = [
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(0.0, 1.0, -1.0),
        Point3::new(0.0, 1.0, 1.0),
    ];
    let normals = compute_normals(&positions, &[0, 1, 2, 0, 3, 1]);
    assert_vec_close(normals[0], Vector3::new(0.0, 1.0, 0.0));
    assert_vec_close(normals[1], Vector3::new(0.0, 1.0, 0.0));
    assert_vec_close(normals[2], Vector3::new(0.0, 1.0, 1.0).normalize());
    assert_vec_close(normals[3], Vector3::new(0.0, 1.0, -1.0).normalize());
}
