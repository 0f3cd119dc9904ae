pub mod error;

pub use error::{MeshError, ShaderError};
