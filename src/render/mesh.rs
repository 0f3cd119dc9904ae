use crate::utils::error::MeshError;
use gl::types::*;
use std::mem;
use std::ptr;

/// Floats per vertex position
pub const POSITION_COMPONENTS: usize = 3;

/// Front face of the cube: two triangles spanning (0, 0) to (0.1, 0.1)
#[rustfmt::skip]
pub const QUAD_POSITIONS: [f32; 18] = [
    0.0, 0.0, 0.0,
    0.1, 0.0, 0.0,
    0.1, 0.1, 0.0,
    0.1, 0.1, 0.0,
    0.0, 0.1, 0.0,
    0.0, 0.0, 0.0,
];

/// Number of vertices in a tightly packed position array.
pub fn vertex_count(len: usize, components: usize) -> Result<usize, MeshError> {
    if len == 0 || components == 0 {
        return Err(MeshError::Empty);
    }
    if len % components != 0 {
        return Err(MeshError::InvalidLayout { len, components });
    }
    Ok(len / components)
}

/// Vertex array + position buffer pair. Both handles are released on drop.
pub struct Mesh {
    vao: GLuint,
    vbo: GLuint,
    vertex_count: GLsizei,
}

impl Mesh {
    pub fn quad() -> Result<Self, MeshError> {
        Self::from_positions(&QUAD_POSITIONS)
    }

    pub fn from_positions(positions: &[f32]) -> Result<Self, MeshError> {
        let count = vertex_count(positions.len(), POSITION_COMPONENTS)?;

        let mut mesh = Mesh {
            vao: 0,
            vbo: 0,
            vertex_count: count as GLsizei,
        };

        unsafe {
            gl::GenVertexArrays(1, &mut mesh.vao);
            gl::GenBuffers(1, &mut mesh.vbo);

            gl::BindVertexArray(mesh.vao);
            gl::BindBuffer(gl::ARRAY_BUFFER, mesh.vbo);
            gl::BufferData(
                gl::ARRAY_BUFFER,
                mem::size_of_val(positions) as GLsizeiptr,
                positions.as_ptr() as *const _,
                gl::STATIC_DRAW,
            );

            // Position attribute
            gl::EnableVertexAttribArray(0);
            gl::VertexAttribPointer(
                0,
                POSITION_COMPONENTS as GLint,
                gl::FLOAT,
                gl::FALSE,
                (POSITION_COMPONENTS * mem::size_of::<f32>()) as GLsizei,
                ptr::null(),
            );

            gl::BindVertexArray(0);
        }

        log::debug!("Uploaded mesh with {} vertices (vao {}, vbo {})", count, mesh.vao, mesh.vbo);
        Ok(mesh)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count as usize
    }

    pub fn draw(&self) {
        unsafe {
            gl::BindVertexArray(self.vao);
            gl::DrawArrays(gl::TRIANGLES, 0, self.vertex_count);
        }
    }
}

impl Drop for Mesh {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteBuffers(1, &self.vbo);
            gl::DeleteVertexArrays(1, &self.vao);
        }
    }
}
