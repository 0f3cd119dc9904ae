use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Combined vertex/fragment shader file
    pub shader_path: PathBuf,
    pub clear_color: [f32; 4],
    /// Requested OpenGL (major, minor) core profile version
    pub gl_version: (u8, u8),
    pub vsync: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            shader_path: PathBuf::from("resources/shaders/Basic.shader"),
            clear_color: [0.0, 0.0, 0.0, 1.0],
            gl_version: (3, 3),
            vsync: true,
        }
    }
}
