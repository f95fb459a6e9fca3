//! glTF model import.
//!
//! The scene needs exactly one thing from the model file: positions,
//! normals, and indices merged into a single mesh it can place and bound.
//! Materials, skins, and animations in the source are ignored. Primitives
//! are flattened by appending vertices and rebasing indices; indices are
//! converted to `u16` and loading fails with a clear error if the merged
//! mesh exceeds that (the decorative models this scene targets are small).

use anyhow::{Context, Result, anyhow, bail};
use gltf::mesh::util::ReadIndices;
use std::path::Path;

use crate::gfx::Vertex;

/// CPU-side mesh ready to be uploaded to GPU buffers.
pub struct CpuMesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
}

/// Load a `.gltf`/`.glb` file from disk and merge all primitives into a
/// single mesh.
pub fn load_gltf_mesh(path: &Path) -> Result<CpuMesh> {
    let (doc, buffers, _images) = gltf::import(path)
        .with_context(|| format!("import glTF: {}", path.display()))?;

    let mut vertices: Vec<Vertex> = Vec::new();
    let mut indices: Vec<u16> = Vec::new();

    for mesh in doc.meshes() {
        for prim in mesh.primitives() {
            let reader = prim.reader(|b| buffers.get(b.index()).map(|bb| bb.0.as_slice()));

            // Positions are mandatory for placement; skip primitives without them.
            let pos: Vec<[f32; 3]> = match reader.read_positions() {
                Some(it) => it.collect(),
                None => continue,
            };
            // Normals may be absent; fall back to straight up so the model
            // still lights without artifacts.
            let nrm: Vec<[f32; 3]> = match reader.read_normals() {
                Some(it) => it.collect(),
                None => vec![[0.0, 1.0, 0.0]; pos.len()],
            };

            let base = vertices.len() as u32;
            for i in 0..pos.len() {
                vertices.push(Vertex {
                    pos: pos[i],
                    nrm: *nrm.get(i).unwrap_or(&[0.0, 1.0, 0.0]),
                });
            }

            // Indices are optional in glTF; a primitive without them is an
            // implicit triangle list over its own vertices.
            let read: Vec<u32> = match reader.read_indices() {
                Some(ReadIndices::U8(it)) => it.map(u32::from).collect(),
                Some(ReadIndices::U16(it)) => it.map(u32::from).collect(),
                Some(ReadIndices::U32(it)) => it.collect(),
                None => (0..pos.len() as u32).collect(),
            };
            for v in read {
                let rebased = base + v;
                indices.push(
                    u16::try_from(rebased)
                        .map_err(|_| anyhow!("rebased index {rebased} exceeds u16"))?,
                );
            }
        }
    }

    if vertices.is_empty() || indices.is_empty() {
        bail!("no geometry found in {}", path.display());
    }
    Ok(CpuMesh { vertices, indices })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    // Minimal single-triangle glTF with an embedded data: URI buffer;
    // enough to exercise merge + rebase without shipping a binary asset.
    const TRIANGLE_GLTF: &str = r#"{
  "asset": { "version": "2.0" },
  "scenes": [ { "nodes": [0] } ],
  "nodes": [ { "mesh": 0 } ],
  "meshes": [ { "primitives": [ {
      "attributes": { "POSITION": 0 },
      "indices": 1
  } ] } ],
  "accessors": [
    { "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
      "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0] },
    { "bufferView": 1, "componentType": 5123, "count": 3, "type": "SCALAR" }
  ],
  "bufferViews": [
    { "buffer": 0, "byteOffset": 0, "byteLength": 36 },
    { "buffer": 0, "byteOffset": 36, "byteLength": 6 }
  ],
  "buffers": [ { "byteLength": 42,
    "uri": "data:application/octet-stream;base64,AAAAAAAAAAAAAAAAAACAPwAAAAAAAAAAAAAAAAAAgD8AAAAAAAABAAIA" } ]
}"#;

    #[test]
    fn load_triangle_merges_and_rebases() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("triangle.gltf");
        let mut f = std::fs::File::create(&path).expect("create");
        f.write_all(TRIANGLE_GLTF.as_bytes()).expect("write");
        drop(f);

        let mesh = load_gltf_mesh(&path).expect("load triangle.gltf");
        assert_eq!(mesh.vertices.len(), 3);
        assert_eq!(mesh.indices, vec![0, 1, 2]);
        // Missing normals fall back to +Y.
        assert_eq!(mesh.vertices[0].nrm, [0.0, 1.0, 0.0]);
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_gltf_mesh(Path::new("does/not/exist.gltf"));
        assert!(err.is_err());
    }
}
