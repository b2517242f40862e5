//! Showroom Decode - glTF scene flattening
//!
//! Parses a glTF 2.0 byte buffer and flattens the scene graph into plain,
//! transport-safe mesh records. CPU-bound and free of I/O; callers decide
//! where the bytes come from and on which thread parsing runs.

mod error;
mod gltf_decode;
mod record;

pub use error::DecodeError;
pub use gltf_decode::decode_scene;
pub use record::{AttributeRecord, GeometryRecord, IndexRecord, MaterialRecord, MeshRecord};
