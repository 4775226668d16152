//! Asset loading/parsers.
//! OBJ loader producing flat, render-ready position+normal vertex buffers.

pub mod mesh;
pub mod obj;

pub use corelib::{ObjError, ObjResult};
pub use mesh::{MeshVertex, VertexBuffer};
pub use obj::{load_obj_from_path, load_obj_from_reader, load_obj_from_str};
