pub mod mesh;
pub mod shaders;
pub mod source;

pub use mesh::Mesh;
pub use shaders::ShaderProgram;
pub use source::{parse_shader, ShaderKind, ShaderSources};
