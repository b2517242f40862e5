use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One renderable mesh, flattened out of the scene graph. The transform is
/// the owning node's local transform; rotation is intrinsic XYZ Euler angles
/// in radians.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshRecord {
    pub name: String,
    pub position: [f64; 3],
    pub rotation: [f64; 3],
    pub scale: [f64; 3],
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub geometry: Option<GeometryRecord>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub material: Option<MaterialRecord>,
}

/// Vertex data for one mesh: named attribute buffers plus an optional index
/// buffer for indexed draws. Attribute names are `position`, `normal`, `uv`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeometryRecord {
    #[serde(flatten)]
    pub attributes: BTreeMap<String, AttributeRecord>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub index: Option<IndexRecord>,
}

/// A single per-vertex attribute buffer, expanded to plain numbers for
/// transport. Invariant: `array.len()` is a multiple of `item_size`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeRecord {
    #[serde(rename = "itemSize")]
    pub item_size: usize,
    pub array: Vec<f64>,
}

impl AttributeRecord {
    /// Number of vertices this buffer covers.
    pub fn vertex_count(&self) -> usize {
        self.array.len() / self.item_size
    }
}

/// Index buffer for indexed draw calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexRecord {
    pub array: Vec<u32>,
}

/// Surface appearance scalars extracted from the source material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialRecord {
    pub color: [f64; 3],
    pub roughness: f64,
    pub metalness: f64,
}

impl Default for MaterialRecord {
    /// White, fully rough, non-metallic. Used when a primitive carries no
    /// material of its own.
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0],
            roughness: 1.0,
            metalness: 0.0,
        }
    }
}
