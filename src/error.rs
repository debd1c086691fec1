use std::io;
use std::path::PathBuf;

use gl::types::GLenum;

use crate::gl_utils::gl_error_name;
use crate::shader::ShaderBuildError;

/// Describes every error this crate may surface.
///
/// Resource errors (not found, unreadable, undecodable) are recoverable: the
/// caller may retry with another path. Shader build failures and pending
/// driver errors are programming defects and should abort whatever setup was
/// in progress.
#[derive(Debug)]
pub enum GlintError {
    /// The resource path did not resolve to an existing file. Carries the
    /// path exactly as the caller supplied it.
    ResourceNotFound(PathBuf),
    ResourceIo(PathBuf, io::Error),
    ImageDecode(PathBuf, image::ImageError),
    ShaderBuild(ShaderBuildError),
    /// Error codes drained from the driver queue, oldest first.
    Driver {
        description: String,
        codes: Vec<GLenum>,
    },
}

impl GlintError {
    pub fn is_recoverable(&self) -> bool {
        match self {
            GlintError::ResourceNotFound(_) |
            GlintError::ResourceIo(_, _) |
            GlintError::ImageDecode(_, _) => true,
            GlintError::ShaderBuild(_) |
            GlintError::Driver { .. } => false,
        }
    }
}

impl std::fmt::Display for GlintError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            GlintError::ResourceNotFound(path) =>
                write!(f, "resource {} was not found", path.display()),
            GlintError::ResourceIo(path, err) =>
                write!(f, "could not read resource {}: {}", path.display(), err),
            GlintError::ImageDecode(path, err) =>
                write!(f, "could not decode image {}: {}", path.display(), err),
            GlintError::ShaderBuild(err) =>
                write!(f, "{}", err),
            GlintError::Driver { description, codes } => {
                write!(f, "the GL error check for {} pulled errors from the driver queue", description)?;
                for code in codes {
                    match gl_error_name(*code) {
                        Some(name) => write!(f, "\nglError: {} ({})", code, name)?,
                        None => write!(f, "\nglError: {}", code)?,
                    }
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for GlintError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GlintError::ResourceIo(_, err) => Some(err),
            GlintError::ImageDecode(_, err) => Some(err),
            GlintError::ShaderBuild(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ShaderBuildError> for GlintError {
    fn from(err: ShaderBuildError) -> GlintError {
        GlintError::ShaderBuild(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn not_found_names_the_exact_path() {
        let err = GlintError::ResourceNotFound(Path::new("rsc/earth_night.png").to_path_buf());
        assert!(err.to_string().contains("rsc/earth_night.png"));
    }

    #[test]
    fn driver_report_has_one_line_per_code() {
        let err = GlintError::Driver {
            description: "glDrawArrays".into(),
            codes: vec![gl::INVALID_ENUM, gl::INVALID_OPERATION],
        };
        let report = err.to_string();
        assert!(report.contains("glDrawArrays"));
        assert!(report.contains(&format!("glError: {}", gl::INVALID_ENUM)));
        assert!(report.contains(&format!("glError: {}", gl::INVALID_OPERATION)));
        assert_eq!(report.lines().count(), 3);
    }

    #[test]
    fn recoverable_taxonomy() {
        let not_found = GlintError::ResourceNotFound(Path::new("a.png").to_path_buf());
        assert!(not_found.is_recoverable());
        let driver = GlintError::Driver { description: "init".into(), codes: vec![gl::INVALID_VALUE] };
        assert!(!driver.is_recoverable());
    }
}
