pub mod app;
pub mod config;
pub mod render;
pub mod utils;

// Re-export commonly used types
pub use app::App;
pub use config::core::AppConfig;
pub use render::mesh::Mesh;
pub use render::shaders::ShaderProgram;
pub use render::source::{parse_shader, ShaderKind, ShaderSources};
pub use utils::error::{MeshError, ShaderError};
