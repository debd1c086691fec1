//! Small OpenGL helper library: shader building with driver-log capture,
//! program link validation with cleanup on failure, bundled-resource texture
//! loading, and error-queue draining, plus a minimal 2D streaming renderer
//! and a monotonic frame pacer for render loops.
//!
//! Everything that touches the driver assumes the GL context is current on
//! the calling thread; see the sdl2-triangle demo for a full setup.

pub use cgmath;

pub mod gl_utils;

mod color;
mod error;
mod pacing;
mod renderer;
mod resource;
mod shader;
mod texture;

pub use self::color::*;
pub use self::error::*;
pub use self::pacing::*;
pub use self::renderer::*;
pub use self::resource::*;
pub use self::shader::*;
pub use self::texture::*;
