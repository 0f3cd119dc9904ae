use crate::render::source::ShaderKind;
use std::ffi::NulError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("Shader file not found: {path}")]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Null byte error: {0}")]
    Nul(#[from] NulError),

    #[error("{kind} shader compilation failed: {log}")]
    Compilation { kind: ShaderKind, log: String },

    #[error("Program linking failed: {0}")]
    Linking(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MeshError {
    #[error("Mesh has no vertices")]
    Empty,

    #[error("{len} floats do not divide into {components}-component vertices")]
    InvalidLayout { len: usize, components: usize },
}
