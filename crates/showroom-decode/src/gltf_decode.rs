use std::collections::BTreeMap;

use glam::{EulerRot, Quat};
use tracing::debug;

use crate::error::DecodeError;
use crate::record::{AttributeRecord, GeometryRecord, IndexRecord, MaterialRecord, MeshRecord};

/// Parse a glTF 2.0 buffer (.glb or .gltf) and flatten its default scene
/// into mesh records.
///
/// The scene graph is walked depth-first; every renderable primitive becomes
/// one record, in traversal order, carrying its node's local transform.
/// Either the whole scene decodes or the first failure aborts the run —
/// there is no partial result.
pub fn decode_scene(bytes: &[u8]) -> Result<Vec<MeshRecord>, DecodeError> {
    let (document, buffers, _images) = gltf::import_slice(bytes)?;

    let mut records = Vec::new();
    let scene = document.default_scene().or_else(|| document.scenes().next());
    if let Some(scene) = scene {
        // Explicit work-stack, children pushed in reverse, so traversal stays
        // depth-first in document order without recursing on deep node chains.
        let mut pending: Vec<gltf::Node> = scene.nodes().collect();
        pending.reverse();
        while let Some(node) = pending.pop() {
            if let Some(mesh) = node.mesh() {
                flatten_mesh(&node, &mesh, &buffers, &mut records);
            }
            let children: Vec<gltf::Node> = node.children().collect();
            for child in children.into_iter().rev() {
                pending.push(child);
            }
        }
    }

    debug!("Flattened scene into {} mesh records", records.len());
    Ok(records)
}

fn flatten_mesh(
    node: &gltf::Node,
    mesh: &gltf::Mesh,
    buffers: &[gltf::buffer::Data],
    out: &mut Vec<MeshRecord>,
) {
    let name = node
        .name()
        .or_else(|| mesh.name())
        .unwrap_or("unnamed")
        .to_string();

    let (translation, quaternion, scaling) = node.transform().decomposed();
    let (rx, ry, rz) = Quat::from_array(quaternion).to_euler(EulerRot::XYZ);
    let position = widen(translation);
    let rotation = [f64::from(rx), f64::from(ry), f64::from(rz)];
    let scale = widen(scaling);

    for primitive in mesh.primitives() {
        let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

        let positions: Vec<[f32; 3]> = reader
            .read_positions()
            .map(|iter| iter.collect())
            .unwrap_or_default();

        // Nothing renderable without vertex positions.
        if positions.is_empty() {
            continue;
        }

        let mut attributes = BTreeMap::new();
        attributes.insert("position".to_string(), expand(positions));

        if let Some(normals) = reader.read_normals() {
            attributes.insert("normal".to_string(), expand(normals.collect()));
        }

        if let Some(tex_coords) = reader.read_tex_coords(0) {
            attributes.insert("uv".to_string(), expand(tex_coords.into_f32().collect()));
        }

        let index = reader.read_indices().map(|indices| IndexRecord {
            array: indices.into_u32().collect(),
        });

        out.push(MeshRecord {
            name: name.clone(),
            position,
            rotation,
            scale,
            geometry: Some(GeometryRecord { attributes, index }),
            material: Some(material_record(&primitive.material())),
        });
    }
}

/// Expand a packed per-vertex buffer into a plain numeric sequence.
fn expand<const N: usize>(values: Vec<[f32; N]>) -> AttributeRecord {
    AttributeRecord {
        item_size: N,
        array: values.into_iter().flatten().map(f64::from).collect(),
    }
}

fn widen(value: [f32; 3]) -> [f64; 3] {
    [
        f64::from(value[0]),
        f64::from(value[1]),
        f64::from(value[2]),
    ]
}

/// Extract the surface scalars from a primitive's material. A primitive with
/// no material of its own gets the white/rough/non-metallic defaults.
fn material_record(material: &gltf::Material) -> MaterialRecord {
    if material.index().is_none() {
        return MaterialRecord::default();
    }

    let pbr = material.pbr_metallic_roughness();
    let [r, g, b, _] = pbr.base_color_factor();
    MaterialRecord {
        color: [f64::from(r), f64::from(g), f64::from(b)],
        roughness: f64::from(pbr.roughness_factor()),
        metalness: f64::from(pbr.metallic_factor()),
    }
}
