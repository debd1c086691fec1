//! Shader building blocks: per-stage compilation, program link validation,
//! and a generic program wrapper with a uniform-location cache.

use gl;
use gl::types::*;
use hashbrown::HashMap;

use cgmath::Matrix4;

use std::ffi::CString;
use std::ptr;

/// A programmable pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub fn to_gl(self) -> GLenum {
        match self {
            ShaderStage::Vertex => gl::VERTEX_SHADER,
            ShaderStage::Fragment => gl::FRAGMENT_SHADER,
        }
    }

    fn as_err_step(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "COMPILE_VERTEX",
            ShaderStage::Fragment => "COMPILE_FRAGMENT",
        }
    }
}

/// A failed build step, carrying the driver's diagnostic log verbatim.
#[derive(Debug)]
pub struct ShaderBuildError {
    step: &'static str,
    log: String,
}

impl ShaderBuildError {
    fn new(step: &'static str, log: String) -> ShaderBuildError {
        ShaderBuildError {
            step,
            log,
        }
    }

    /// The driver-reported diagnostic text.
    pub fn log(&self) -> &str {
        &self.log
    }
}

impl std::fmt::Display for ShaderBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "error during step {} while building shader: {}", self.step, self.log)
    }
}

impl std::error::Error for ShaderBuildError {}

unsafe fn shader_info_log(shader_id: GLuint) -> String {
    let mut log_len: GLint = 0;
    gl::GetShaderiv(shader_id, gl::INFO_LOG_LENGTH, &mut log_len);
    let mut log: Vec<u8> = vec![0; log_len.max(1) as usize];
    let mut written: GLsizei = 0;
    gl::GetShaderInfoLog(shader_id, log.len() as GLsizei, &mut written, log.as_mut_ptr() as *mut GLchar);
    log.truncate(written.max(0) as usize);
    String::from_utf8_lossy(&log).into_owned()
}

unsafe fn program_info_log(program_id: GLuint) -> String {
    let mut log_len: GLint = 0;
    gl::GetProgramiv(program_id, gl::INFO_LOG_LENGTH, &mut log_len);
    let mut log: Vec<u8> = vec![0; log_len.max(1) as usize];
    let mut written: GLsizei = 0;
    gl::GetProgramInfoLog(program_id, log.len() as GLsizei, &mut written, log.as_mut_ptr() as *mut GLchar);
    log.truncate(written.max(0) as usize);
    String::from_utf8_lossy(&log).into_owned()
}

/// Compiles a single shader stage on the current context.
///
/// Returns the non-zero shader object handle on success. On any failure the
/// shader object (if one was handed back at all) is deleted before the error
/// is returned, so the caller never holds a half-built stage.
///
/// Single attempt; the driver either accepts the source or the build fails
/// with its diagnostic log.
pub fn compile_shader(stage: ShaderStage, source: &str) -> Result<GLuint, ShaderBuildError> {
    let shader_id = unsafe { gl::CreateShader(stage.to_gl()) };
    if shader_id == 0 {
        return Err(ShaderBuildError::new(
            stage.as_err_step(),
            format!("the driver did not hand back a shader object for stage {:?}", stage),
        ));
    }
    let c_source = match CString::new(source) {
        Ok(c_source) => c_source,
        Err(_) => {
            unsafe { gl::DeleteShader(shader_id); }
            return Err(ShaderBuildError::new(stage.as_err_step(), "shader source contains a NUL byte".to_owned()));
        }
    };
    unsafe {
        gl::ShaderSource(shader_id, 1, &c_source.as_c_str().as_ptr(), ptr::null());
        gl::CompileShader(shader_id);

        let mut compile_status: GLint = gl::FALSE as GLint;
        gl::GetShaderiv(shader_id, gl::COMPILE_STATUS, &mut compile_status);
        if compile_status != GLint::from(gl::TRUE) {
            let log = shader_info_log(shader_id);
            gl::DeleteShader(shader_id);
            return Err(ShaderBuildError::new(stage.as_err_step(), log));
        }
    }
    log::debug!("compiled {:?} shader as object {}", stage, shader_id);
    Ok(shader_id)
}

/// Checks that `program_id` linked successfully.
///
/// On success this is a pure query with no side effect. On a failed link the
/// program object is deleted before the error is returned: the handle must
/// not be used afterwards.
pub fn validate_program_linkage(program_id: GLuint) -> Result<(), ShaderBuildError> {
    unsafe {
        let mut link_status: GLint = gl::FALSE as GLint;
        gl::GetProgramiv(program_id, gl::LINK_STATUS, &mut link_status);
        if link_status == GLint::from(gl::TRUE) {
            return Ok(());
        }
        let log = program_info_log(program_id);
        gl::DeleteProgram(program_id);
        Err(ShaderBuildError::new("LINK_PROGRAM", log))
    }
}

/// Names every uniform your shader program uses.
///
/// Typically implemented on a small fieldless enum; `for_each` must visit
/// every variant so locations can be cached up front.
pub trait Uniform: ::std::fmt::Debug + Clone + Copy + ::std::hash::Hash + PartialEq + Eq {
    fn name(&self) -> &str;

    fn for_each<F: FnMut(Self)>(f: F);
}

/// A linked shader program with a uniform-location cache.
pub struct BaseShader<U: Uniform> {
    id: GLuint,
    uniforms: HashMap<U, GLint>,
}

impl<U: Uniform> BaseShader<U> {
    /// Compiles both stages, links them and validates the linkage.
    ///
    /// Stage objects are detached and deleted once the program is linked,
    /// whatever the validation outcome. `samplers` maps sampler uniform
    /// names to texture units in order: the first name is bound to unit 0,
    /// the second to unit 1, and so on.
    pub fn new(fragment_source: &str, vertex_source: &str, samplers: &[&str]) -> Result<BaseShader<U>, ShaderBuildError> {
        let vertex_shader_id = compile_shader(ShaderStage::Vertex, vertex_source)?;
        let fragment_shader_id = match compile_shader(ShaderStage::Fragment, fragment_source) {
            Ok(id) => id,
            Err(err) => {
                unsafe { gl::DeleteShader(vertex_shader_id); }
                return Err(err);
            }
        };

        let program_id = unsafe {
            let program_id = gl::CreateProgram();
            gl::AttachShader(program_id, vertex_shader_id);
            gl::AttachShader(program_id, fragment_shader_id);
            gl::LinkProgram(program_id);

            gl::DetachShader(program_id, vertex_shader_id);
            gl::DetachShader(program_id, fragment_shader_id);
            gl::DeleteShader(vertex_shader_id);
            gl::DeleteShader(fragment_shader_id);
            program_id
        };
        validate_program_linkage(program_id)?;

        let mut shader = BaseShader {
            id: program_id,
            uniforms: HashMap::default(),
        };
        shader.use_program();
        U::for_each(|uniform| shader.init_uniform_location(uniform));
        shader.bind_samplers(samplers);
        Ok(shader)
    }

    fn init_uniform_location(&mut self, uniform: U) {
        let name = CString::new(uniform.name()).unwrap();
        let uniform_location = unsafe { gl::GetUniformLocation(self.id, name.as_ptr()) };
        if uniform_location < 0 {
            panic!("invalid location for uniform {:?}: gl returned {}", uniform, uniform_location);
        };
        self.uniforms.insert(uniform, uniform_location);
    }

    fn bind_samplers(&mut self, samplers: &[&str]) {
        for (unit, sampler) in samplers.iter().enumerate() {
            let name = CString::new(*sampler).unwrap();
            let location = unsafe { gl::GetUniformLocation(self.id, name.as_ptr()) };
            if location < 0 {
                panic!("invalid location for sampler {:?}: gl returned {}", sampler, location);
            }
            unsafe {
                gl::Uniform1i(location, unit as GLint);
            }
        }
    }

    pub fn set_int(&mut self, name: U, value: GLint) {
        unsafe {
            gl::Uniform1i(self.uniforms.get(&name).cloned().expect("uniform location was not initialized"), value);
        }
    }

    pub fn set_matrix4(&mut self, name: U, mat: &Matrix4<f32>) {
        unsafe {
            gl::UniformMatrix4fv(self.uniforms.get(&name).cloned().expect("uniform location was not initialized"), 1, gl::FALSE, mat as *const _ as *const GLfloat)
        }
    }

    pub fn use_program(&mut self) {
        unsafe { gl::UseProgram(self.id); }
    }
}

impl<U: Uniform> Drop for BaseShader<U> {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteProgram(self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_maps_to_gl_enums() {
        assert_eq!(ShaderStage::Vertex.to_gl(), gl::VERTEX_SHADER);
        assert_eq!(ShaderStage::Fragment.to_gl(), gl::FRAGMENT_SHADER);
    }

    #[test]
    fn build_error_carries_the_driver_log_verbatim() {
        let log = "0:12(3): error: syntax error, unexpected ';'";
        let err = ShaderBuildError::new("COMPILE_FRAGMENT", log.to_owned());
        assert_eq!(err.log(), log);
        let message = err.to_string();
        assert!(message.contains(log));
        assert!(message.contains("COMPILE_FRAGMENT"));
    }
}
