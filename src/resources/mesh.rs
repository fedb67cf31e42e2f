use anyhow::Context as _;
use cgmath::{
    InnerSpace, Matrix, Matrix3, Matrix4, Point3, SquareMatrix, Transform, Vector3, Zero,
};

use crate::data_structures::model::{RegionGeometry, RegionVertex};

/// Triangles of one primitive after its node transform was applied.
struct BakedPrimitive {
    positions: Vec<Point3<f32>>,
    normals: Option<Vec<Vector3<f32>>>,
    indices: Vec<u32>,
}

/**
 * Flattens the default scene (or the first one) into a single world-space
 * triangle list.
 *
 * Node transforms are baked into positions and normals. Non-triangle
 * primitives are skipped; primitives without normals get smooth normals
 * averaged from the adjacent faces.
 */
pub fn extract_geometry(
    document: &gltf::Document,
    buffers: &[Vec<u8>],
) -> anyhow::Result<RegionGeometry> {
    let scene = document
        .default_scene()
        .or_else(|| document.scenes().next())
        .context("file has no scene")?;

    let mut baked = Vec::new();
    for node in scene.nodes() {
        visit(&node, Matrix4::identity(), buffers, &mut baked)?;
    }

    let mut vertices = Vec::new();
    let mut indices = Vec::new();
    for primitive in baked {
        let base = vertices.len() as u32;
        let normals = match primitive.normals {
            Some(normals) => normals,
            None => compute_normals(&primitive.positions, &primitive.indices),
        };
        vertices.extend(
            primitive
                .positions
                .iter()
                .zip(normals)
                .map(|(p, n)| RegionVertex {
                    position: [p.x, p.y, p.z],
                    normal: n.into(),
                }),
        );
        indices.extend(primitive.indices.iter().map(|i| base + i));
    }

    RegionGeometry::new(vertices, indices).context("scene holds no triangles")
}

fn visit(
    node: &gltf::Node,
    parent: Matrix4<f32>,
    buffers: &[Vec<u8>],
    out: &mut Vec<BakedPrimitive>,
) -> anyhow::Result<()> {
    let world = parent * Matrix4::from(node.transform().matrix());

    if let Some(mesh) = node.mesh() {
        for primitive in mesh.primitives() {
            if primitive.mode() != gltf::mesh::Mode::Triangles {
                log::warn!(
                    "skipping {:?} primitive of mesh {}",
                    primitive.mode(),
                    mesh.index()
                );
                continue;
            }
            if let Some(baked) = bake_primitive(&primitive, world, buffers)? {
                out.push(baked);
            }
        }
    }

    for child in node.children() {
        visit(&child, world, buffers, out)?;
    }
    Ok(())
}

fn bake_primitive(
    primitive: &gltf::Primitive,
    world: Matrix4<f32>,
    buffers: &[Vec<u8>],
) -> anyhow::Result<Option<BakedPrimitive>> {
    let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(Vec::as_slice));

    let positions: Vec<Point3<f32>> = match reader.read_positions() {
        Some(positions) => positions
            .map(|p| world.transform_point(Point3::from(p)))
            .collect(),
        None => return Ok(None),
    };

    let mut indices: Vec<u32> = match reader.read_indices() {
        Some(indices) => indices.into_u32().collect(),
        None => (0..positions.len() as u32).collect(),
    };
    indices.truncate(indices.len() - indices.len() % 3);
    if let Some(bad) = indices.iter().find(|i| **i as usize >= positions.len()) {
        anyhow::bail!(
            "index {} out of range for {} vertices",
            bad,
            positions.len()
        );
    }

    let linear = linear_part(&world);
    // A mirroring transform flips the winding; restore counter-clockwise.
    if linear.determinant() < 0.0 {
        for triangle in indices.chunks_exact_mut(3) {
            triangle.swap(1, 2);
        }
    }

    let normals = reader.read_normals().map(|normals| {
        let normal_matrix = linear
            .invert()
            .map(|inverse| inverse.transpose())
            .unwrap_or(linear);
        normals
            .map(|n| safe_normalize(normal_matrix * Vector3::from(n)))
            .collect()
    });

    Ok(Some(BakedPrimitive {
        positions,
        normals,
        indices,
    }))
}

fn linear_part(m: &Matrix4<f32>) -> Matrix3<f32> {
    Matrix3::from_cols(m.x.truncate(), m.y.truncate(), m.z.truncate())
}

fn safe_normalize(v: Vector3<f32>) -> Vector3<f32> {
    if v.magnitude2() <= f32::EPSILON {
        Vector3::unit_y()
    } else {
        v.normalize()
    }
}

/// Smooth per-vertex normals: the normalized sum of the adjacent face normals.
pub fn compute_normals(positions: &[Point3<f32>], indices: &[u32]) -> Vec<Vector3<f32>> {
    let mut normals = vec![Vector3::zero(); positions.len()];
    for triangle in indices.chunks_exact(3) {
        let [a, b, c] = [triangle[0], triangle[1], triangle[2]].map(|i| i as usize);
        let face = (positions[b] - positions[a]).cross(positions[c] - positions[a]);
        normals[a] += face;
        normals[b] += face;
        normals[c] += face;
    }
    normals.into_iter().map(safe_normalize).collect()
}
