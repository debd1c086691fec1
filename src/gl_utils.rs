//! A small list of helper functions related to OpenGL.
//!
//! Those functions are mostly used internally, but are still publicly available for convenience.

use gl::types::{GLenum, GLint};
use std::{
    ffi::CStr,
    mem::MaybeUninit,
};

use crate::error::GlintError;

pub fn gl_get_int(name: GLenum) -> GLint {
    let mut result = MaybeUninit::<GLint>::uninit();
    unsafe {
        gl::GetIntegerv(name, result.as_mut_ptr());
        result.assume_init()
    }
}

pub fn gl_get_string(name: GLenum) -> &'static CStr {
    unsafe {
        CStr::from_ptr(gl::GetString(name) as *const _)
    }
}

/// Returns the next pending error code of the driver queue, or `None` if the
/// queue is empty.
pub fn gl_get_error() -> Option<GLenum> {
    let r = unsafe { gl::GetError() };
    if r == gl::NO_ERROR {
        None
    } else {
        Some(r)
    }
}

/// Returns the symbolic name of a GL error code, if it is one of the
/// errors OpenGL defines.
pub fn gl_error_name(code: GLenum) -> Option<&'static str> {
    match code {
        gl::INVALID_ENUM => Some("GL_INVALID_ENUM"),
        gl::INVALID_VALUE => Some("GL_INVALID_VALUE"),
        gl::INVALID_OPERATION => Some("GL_INVALID_OPERATION"),
        gl::STACK_OVERFLOW => Some("GL_STACK_OVERFLOW"),
        gl::STACK_UNDERFLOW => Some("GL_STACK_UNDERFLOW"),
        gl::OUT_OF_MEMORY => Some("GL_OUT_OF_MEMORY"),
        gl::INVALID_FRAMEBUFFER_OPERATION => Some("GL_INVALID_FRAMEBUFFER_OPERATION"),
        gl::CONTEXT_LOST => Some("GL_CONTEXT_LOST"),
        _ => None,
    }
}

/// Drains the driver's pending error queue and fails if it was not empty.
///
/// `description` should name the batch of GL calls made before the check
/// (e.g. `"glUseProgram, glUniforms, glDrawArrays"`); it is included in the
/// report. Any pending error is a programming defect, so the returned
/// `GlintError::Driver` is not recoverable.
pub fn check_gl_errors(description: &str) -> Result<(), GlintError> {
    let codes = drain(gl_get_error);
    if codes.is_empty() {
        Ok(())
    } else {
        log::error!("{} pending GL error(s) after {}", codes.len(), description);
        Err(GlintError::Driver {
            description: description.to_owned(),
            codes,
        })
    }
}

/// Polls `poll` until the queue reports empty, and returns the collected
/// codes oldest-first (the driver hands them back most-recent-first).
fn drain<F: FnMut() -> Option<GLenum>>(mut poll: F) -> Vec<GLenum> {
    let mut codes = vec!();
    while let Some(code) = poll() {
        codes.push(code);
    }
    codes.reverse();
    codes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fake_queue(codes: Vec<GLenum>) -> impl FnMut() -> Option<GLenum> {
        let mut pending = codes.into_iter();
        move || pending.next()
    }

    #[test]
    fn drain_reverses_driver_order() {
        // most-recent-first from the driver...
        let drained = drain(fake_queue(vec![gl::OUT_OF_MEMORY, gl::INVALID_VALUE, gl::INVALID_ENUM]));
        // ...reads oldest-first in the report
        assert_eq!(drained, vec![gl::INVALID_ENUM, gl::INVALID_VALUE, gl::OUT_OF_MEMORY]);
    }

    #[test]
    fn drain_empty_queue_is_empty() {
        assert!(drain(fake_queue(vec![])).is_empty());
    }

    #[test]
    fn drain_stops_at_the_sentinel() {
        let mut polled = 0;
        let codes = vec![gl::INVALID_ENUM];
        let mut pending = codes.into_iter();
        let drained = drain(|| {
            polled += 1;
            pending.next()
        });
        assert_eq!(drained.len(), 1);
        // one error plus the sentinel read
        assert_eq!(polled, 2);
    }

    #[test]
    fn known_codes_have_names() {
        assert_eq!(gl_error_name(gl::INVALID_OPERATION), Some("GL_INVALID_OPERATION"));
        assert_eq!(gl_error_name(0xBEEF), None);
    }
}
