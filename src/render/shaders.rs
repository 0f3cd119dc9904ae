// shaders.rs - Shader compilation and program linking

use crate::render::source::{ShaderKind, ShaderSources};
use crate::utils::error::ShaderError;
use gl::types::*;
use std::ffi::CString;
use std::path::Path;
use std::ptr;

impl ShaderKind {
    pub fn gl_type(self) -> GLenum {
        match self {
            ShaderKind::Vertex => gl::VERTEX_SHADER,
            ShaderKind::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

/// A single compiled shader stage, deleted when dropped
pub struct Shader {
    id: GLuint,
    kind: ShaderKind,
}

impl Shader {
    pub fn compile(source: &str, kind: ShaderKind) -> Result<Self, ShaderError> {
        let source = CString::new(source.as_bytes())?;
        let shader = Shader {
            id: unsafe { gl::CreateShader(kind.gl_type()) },
            kind,
        };

        unsafe {
            gl::ShaderSource(shader.id, 1, &source.as_ptr(), ptr::null());
            gl::CompileShader(shader.id);
        }

        let mut success = 1;
        unsafe {
            gl::GetShaderiv(shader.id, gl::COMPILE_STATUS, &mut success);
        }

        if success == 0 {
            return Err(ShaderError::Compilation {
                kind,
                log: shader_info_log(shader.id),
            });
        }

        log::debug!("Compiled {} shader {}", shader.kind, shader.id);
        Ok(shader)
    }

    pub fn id(&self) -> GLuint {
        self.id
    }

    pub fn kind(&self) -> ShaderKind {
        self.kind
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        unsafe { gl::DeleteShader(self.id) };
    }
}

/// Linked vertex + fragment program
pub struct ShaderProgram {
    id: GLuint,
}

impl ShaderProgram {
    /// Splits a combined shader file and builds a program from its sections.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ShaderError> {
        let sources = ShaderSources::from_file(path)?;
        Self::from_sources(&sources)
    }

    pub fn from_sources(sources: &ShaderSources) -> Result<Self, ShaderError> {
        Self::new_from_source(&sources.vertex, &sources.fragment)
    }

    pub fn new_from_source(vertex_source: &str, fragment_source: &str) -> Result<Self, ShaderError> {
        let vertex_shader = Shader::compile(vertex_source, ShaderKind::Vertex)?;
        let fragment_shader = Shader::compile(fragment_source, ShaderKind::Fragment)?;

        let program = ShaderProgram {
            id: unsafe { gl::CreateProgram() },
        };
        unsafe {
            gl::AttachShader(program.id, vertex_shader.id());
            gl::AttachShader(program.id, fragment_shader.id());
            gl::LinkProgram(program.id);
        }

        program.check_link_status()?;
        program.validate();

        log::info!("Linked shader program {}", program.id);
        Ok(program)
    }

    fn check_link_status(&self) -> Result<(), ShaderError> {
        let mut success = 1;
        unsafe {
            gl::GetProgramiv(self.id, gl::LINK_STATUS, &mut success);
        }

        if success == 0 {
            return Err(ShaderError::Linking(program_info_log(self.id)));
        }
        Ok(())
    }

    // Result depends on current GL state; a failure is only logged
    fn validate(&self) {
        let mut status = 1;
        unsafe {
            gl::ValidateProgram(self.id);
            gl::GetProgramiv(self.id, gl::VALIDATE_STATUS, &mut status);
        }

        if status == 0 {
            log::warn!(
                "Shader program {} failed validation: {}",
                self.id,
                program_info_log(self.id)
            );
        }
    }

    pub fn id(&self) -> GLuint {
        self.id
    }

    pub fn set_used(&self) {
        unsafe {
            gl::UseProgram(self.id);
        }
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        unsafe { gl::DeleteProgram(self.id) };
    }
}

fn shader_info_log(shader: GLuint) -> String {
    let mut len = 0;
    unsafe {
        gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len);
    }
    read_info_log(len, |capacity, written, buffer| unsafe {
        gl::GetShaderInfoLog(shader, capacity, written, buffer);
    })
}

fn program_info_log(program: GLuint) -> String {
    let mut len = 0;
    unsafe {
        gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len);
    }
    read_info_log(len, |capacity, written, buffer| unsafe {
        gl::GetProgramInfoLog(program, capacity, written, buffer);
    })
}

fn read_info_log(len: GLint, fill: impl FnOnce(GLsizei, *mut GLsizei, *mut GLchar)) -> String {
    let mut buffer = vec![0u8; len.max(1) as usize];
    let mut written: GLsizei = 0;
    fill(
        buffer.len() as GLsizei,
        &mut written as *mut GLsizei,
        buffer.as_mut_ptr() as *mut GLchar,
    );

    buffer.truncate(written.clamp(0, len.max(0)) as usize);
    String::from_utf8_lossy(&buffer).trim_end().to_string()
}
