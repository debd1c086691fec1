//! A minimal streaming renderer over the built-in shader program.
//!
//! Owns one VAO/VBO pair and draws colored triangles and textured quads in
//! pixel coordinates, with the projection reset to an orthographic 2D
//! mapping of the viewport on every resize.

use gl;
use gl::types::*;
use std::mem::{MaybeUninit, size_of};
use std::os::raw::c_void;
use std::ptr;

use cgmath::{Matrix4, Ortho, SquareMatrix, Vector2, Vector3};

use crate::color::Color;
use crate::error::GlintError;
use crate::gl_utils::check_gl_errors;
use crate::shader::{BaseShader, Uniform};
use crate::texture::Texture2D;

static FRAGMENT_SHADER_SOURCE: &'static str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/shaders/basic_fs.glsl"));
static VERTEX_SHADER_SOURCE: &'static str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/shaders/basic_vs.glsl"));

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum BasicUniform {
    Projection,
    Model,
    UseTexture,
}

impl Uniform for BasicUniform {
    fn name(&self) -> &str {
        match self {
            BasicUniform::Projection => "projection",
            BasicUniform::Model => "model",
            BasicUniform::UseTexture => "use_texture",
        }
    }

    fn for_each<F: FnMut(Self)>(mut f: F) {
        f(BasicUniform::Projection);
        f(BasicUniform::Model);
        f(BasicUniform::UseTexture);
    }
}

/// One vertex of the streaming vertex buffer.
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub position: Vector2<f32>,
    pub uv: Vector2<f32>,
    pub color: Color<f32>,
}

impl Vertex {
    pub fn colored(position: Vector2<f32>, color: Color<f32>) -> Vertex {
        Vertex {
            position,
            uv: Vector2::new(0.0, 0.0),
            color,
        }
    }

    pub fn textured(position: Vector2<f32>, uv: Vector2<f32>) -> Vertex {
        Vertex {
            position,
            uv,
            color: Color::white(),
        }
    }
}

const FLOATS_PER_VERTEX: usize = 8;

fn push_vertex(buf: &mut Vec<f32>, vertex: &Vertex) {
    buf.push(vertex.position.x);
    buf.push(vertex.position.y);
    buf.push(vertex.uv.x);
    buf.push(vertex.uv.y);
    buf.push(vertex.color.r);
    buf.push(vertex.color.g);
    buf.push(vertex.color.b);
    buf.push(vertex.color.a);
}

pub struct Renderer {
    shader: BaseShader<BasicUniform>,
    vao: GLuint,
    vbo: GLuint,
    viewport: (u32, u32),
    vertex_buf: Vec<f32>,
}

impl Renderer {
    /// Builds the shader program and the streaming buffers on the current
    /// context, and drains the driver error queue once setup is done.
    ///
    /// # Failures
    ///
    /// Fails if the built-in shader does not build on this driver, or if
    /// setup left errors in the driver queue.
    pub fn new(viewport: (u32, u32)) -> Result<Renderer, GlintError> {
        let shader = BaseShader::new(FRAGMENT_SHADER_SOURCE, VERTEX_SHADER_SOURCE, &["tex"])?;

        let mut vao: MaybeUninit<GLuint> = MaybeUninit::uninit();
        let mut vbo: MaybeUninit<GLuint> = MaybeUninit::uninit();
        let (vao, vbo) = unsafe {
            gl::GenVertexArrays(1, vao.as_mut_ptr());
            gl::GenBuffers(1, vbo.as_mut_ptr());
            (vao.assume_init(), vbo.assume_init())
        };

        let stride = (FLOATS_PER_VERTEX * size_of::<GLfloat>()) as GLint;
        unsafe {
            gl::BindVertexArray(vao);
            gl::BindBuffer(gl::ARRAY_BUFFER, vbo);

            // vec2 position
            gl::EnableVertexAttribArray(0);
            gl::VertexAttribPointer(0, 2, gl::FLOAT, gl::FALSE, stride, ptr::null::<c_void>());
            // vec2 uv
            gl::EnableVertexAttribArray(1);
            gl::VertexAttribPointer(1, 2, gl::FLOAT, gl::FALSE, stride, ptr::null::<c_void>().offset(2 * size_of::<GLfloat>() as isize));
            // vec4 color
            gl::EnableVertexAttribArray(2);
            gl::VertexAttribPointer(2, 4, gl::FLOAT, gl::FALSE, stride, ptr::null::<c_void>().offset(4 * size_of::<GLfloat>() as isize));

            gl::BindBuffer(gl::ARRAY_BUFFER, 0);
            gl::BindVertexArray(0);

            gl::Enable(gl::BLEND);
            gl::BlendFunc(gl::SRC_ALPHA, gl::ONE_MINUS_SRC_ALPHA);
        }

        let mut renderer = Renderer {
            shader,
            vao,
            vbo,
            viewport,
            vertex_buf: Vec::with_capacity(6 * FLOATS_PER_VERTEX),
        };
        renderer.set_viewport(viewport.0, viewport.1);
        check_gl_errors("renderer initialization")?;
        Ok(renderer)
    }

    /// Resets the projection to an orthographic 2D mapping of the new pixel
    /// dimensions. Call this whenever the canvas resizes.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
        unsafe {
            gl::Viewport(0, 0, width as i32, height as i32);
        }
        let projection = Matrix4::<f32>::from(Ortho {
            left: 0.0,
            right: width as f32,
            bottom: height as f32,
            top: 0.0,
            near: -1.0,
            far: 1.0
        });
        self.shader.use_program();
        self.shader.set_matrix4(BasicUniform::Projection, &projection);
    }

    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    /// Clear the screen with a solid color.
    ///
    /// Default clear color is black, just like your soul.
    pub fn clear(&mut self, clear_color: Option<Color<u8>>) {
        let clear_color: Color<f32> = clear_color.unwrap_or_else(|| Color::<u8>::black()).to_color_f32();
        unsafe {
            gl::ClearColor(clear_color.r, clear_color.g, clear_color.b, 1.0f32);
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }
    }

    /// Draws one triangle with per-vertex colors, in pixel coordinates.
    pub fn draw_triangle(&mut self, vertices: &[Vertex; 3]) {
        self.draw_vertices(&vertices[..], &Matrix4::identity(), false);
    }

    /// Draws `texture` as a quad with its top-left corner at `position`,
    /// scaled uniformly by `scale`.
    pub fn draw_texture(&mut self, texture: &Texture2D, position: Vector2<f32>, scale: f32) {
        let (width, height) = texture.size();
        let model = Matrix4::from_translation(Vector3::new(position.x, position.y, 0.0))
            * Matrix4::from_nonuniform_scale(width as f32 * scale, height as f32 * scale, 1.0);
        texture.bind(0);

        let quad: [Vertex; 6] = [
            Vertex::textured(Vector2::new(0.0, 1.0), Vector2::new(0.0, 1.0)),
            Vertex::textured(Vector2::new(1.0, 0.0), Vector2::new(1.0, 0.0)),
            Vertex::textured(Vector2::new(0.0, 0.0), Vector2::new(0.0, 0.0)),
            Vertex::textured(Vector2::new(0.0, 1.0), Vector2::new(0.0, 1.0)),
            Vertex::textured(Vector2::new(1.0, 1.0), Vector2::new(1.0, 1.0)),
            Vertex::textured(Vector2::new(1.0, 0.0), Vector2::new(1.0, 0.0)),
        ];
        self.draw_vertices(&quad[..], &model, true);
    }

    fn draw_vertices(&mut self, vertices: &[Vertex], model: &Matrix4<f32>, textured: bool) {
        self.shader.use_program();
        self.shader.set_matrix4(BasicUniform::Model, model);
        self.shader.set_int(BasicUniform::UseTexture, textured as GLint);

        self.vertex_buf.clear();
        for vertex in vertices {
            push_vertex(&mut self.vertex_buf, vertex);
        }
        unsafe {
            gl::BindBuffer(gl::ARRAY_BUFFER, self.vbo);
            gl::BufferData(
                gl::ARRAY_BUFFER,
                (self.vertex_buf.len() * size_of::<GLfloat>()) as isize,
                self.vertex_buf.as_ptr() as *const c_void,
                gl::STREAM_DRAW,
            );
            gl::BindBuffer(gl::ARRAY_BUFFER, 0);

            gl::BindVertexArray(self.vao);
            gl::DrawArrays(gl::TRIANGLES, 0, vertices.len() as GLint);
            gl::BindVertexArray(0);
        }
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteVertexArrays(1, &self.vao);
            gl::DeleteBuffers(1, &self.vbo);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_flattens_position_uv_color() {
        let vertex = Vertex {
            position: Vector2::new(10.0, 20.0),
            uv: Vector2::new(0.5, 1.0),
            color: Color::from_rgba(1.0, 0.0, 0.5, 1.0),
        };
        let mut buf = vec!();
        push_vertex(&mut buf, &vertex);
        assert_eq!(buf, vec![10.0, 20.0, 0.5, 1.0, 1.0, 0.0, 0.5, 1.0]);
        assert_eq!(buf.len(), FLOATS_PER_VERTEX);
    }

    #[test]
    fn colored_vertices_default_to_a_zero_uv() {
        let vertex = Vertex::colored(Vector2::new(1.0, 2.0), Color::white());
        assert_eq!(vertex.uv, Vector2::new(0.0, 0.0));
    }

    #[test]
    fn uniform_enum_covers_every_shader_uniform() {
        let mut names = vec!();
        BasicUniform::for_each(|u| names.push(u.name().to_owned()));
        assert_eq!(names, vec!["projection", "model", "use_texture"]);
    }
}
