//! Resource resolution and image loading.
//!
//! A [`ResourceBundle`] stands in for whatever mechanism the host uses to
//! locate bundled assets: it resolves relative resource paths against a root
//! directory and decodes image files into RGBA buffers ready for upload.

use std::fs;
use std::path::{Path, PathBuf};

use image::GenericImageView;

use crate::error::GlintError;
use crate::texture::Texture2D;

/// A decoded RGBA image, not yet uploaded to the driver.
#[derive(Debug)]
pub struct RawImage {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Resolves resource paths against a root directory.
#[derive(Debug, Clone)]
pub struct ResourceBundle {
    root: PathBuf,
}

impl ResourceBundle {
    pub fn new<P: Into<PathBuf>>(root: P) -> ResourceBundle {
        ResourceBundle {
            root: root.into(),
        }
    }

    /// Resolves `path` to an existing file under the bundle root.
    ///
    /// Fails with `ResourceNotFound` carrying `path` exactly as supplied if
    /// no such file exists.
    pub fn resolve<P: AsRef<Path>>(&self, path: P) -> Result<PathBuf, GlintError> {
        let full_path = self.root.join(path.as_ref());
        if fs::metadata(&full_path).is_ok() {
            Ok(full_path)
        } else {
            Err(GlintError::ResourceNotFound(path.as_ref().to_path_buf()))
        }
    }

    /// Resolves `path` and decodes the image file into an RGBA buffer.
    ///
    /// Images without an alpha layer are expanded to RGBA during decoding.
    pub fn load_image<P: AsRef<Path>>(&self, path: P) -> Result<RawImage, GlintError> {
        let full_path = self.resolve(path.as_ref())?;
        log::debug!("decoding image resource {}", full_path.display());
        let opened_image = image::open(&full_path).map_err(|err| {
            let path = path.as_ref().to_path_buf();
            match err {
                image::ImageError::IoError(io_err) => GlintError::ResourceIo(path, io_err),
                other => GlintError::ImageDecode(path, other),
            }
        })?;
        let (width, height) = opened_image.dimensions();
        Ok(RawImage {
            bytes: opened_image.to_rgba().into_raw(),
            width,
            height,
        })
    }

    /// Loads `path` and uploads it as a texture on the current context.
    pub fn load_texture<P: AsRef<Path>>(&self, path: P) -> Result<Texture2D, GlintError> {
        let image = self.load_image(path)?;
        Ok(Texture2D::from_bytes(&image.bytes, (image.width, image.height)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_resource_names_the_exact_path() {
        let bundle = ResourceBundle::new(std::env::temp_dir());
        let err = bundle.resolve("rsc/does_not_exist.png").unwrap_err();
        assert!(err.is_recoverable());
        assert!(err.to_string().contains("rsc/does_not_exist.png"));
    }

    #[test]
    fn existing_resource_resolves_under_the_root() {
        let root = std::env::temp_dir();
        let file_path = root.join("glint-resolve-test.bmp");
        fs::File::create(&file_path).unwrap();

        let bundle = ResourceBundle::new(&root);
        let resolved = bundle.resolve("glint-resolve-test.bmp").unwrap();
        assert_eq!(resolved, file_path);

        fs::remove_file(&file_path).unwrap();
    }

    #[test]
    fn garbage_bytes_fail_as_a_decode_error() {
        let root = std::env::temp_dir();
        let file_path = root.join("glint-garbage-test.png");
        let mut file = fs::File::create(&file_path).unwrap();
        file.write_all(b"this is not a png").unwrap();
        drop(file);

        let bundle = ResourceBundle::new(&root);
        let err = bundle.load_image("glint-garbage-test.png").unwrap_err();
        assert!(err.is_recoverable());
        assert!(err.to_string().contains("glint-garbage-test.png"));
        match err {
            GlintError::ImageDecode(path, _) => assert_eq!(path, Path::new("glint-garbage-test.png")),
            other => panic!("expected a decode error, got {:?}", other),
        }

        fs::remove_file(&file_path).unwrap();
    }
}
