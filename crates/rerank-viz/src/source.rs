//! Base-image lookup keyed by file name.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use image::{ImageReader, RgbImage};
use log::debug;

#[derive(thiserror::Error, Debug)]
pub enum LookupError {
    #[error("image `{0}` not found")]
    NotFound(String),
    #[error("failed to decode `{name}`: {source}")]
    Decode {
        name: String,
        #[source]
        source: image::ImageError,
    },
}

/// Supplies the base image a record refers to.
pub trait ImageSource {
    /// Resolve `filename` (a bare name or a path whose basename is used).
    fn lookup(&self, filename: &str) -> Result<RgbImage, LookupError>;
}

fn basename(filename: &str) -> &str {
    Path::new(filename)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(filename)
}

/// Images stored flat in one directory.
#[derive(Clone, Debug)]
pub struct DirImageSource {
    root: PathBuf,
}

impl DirImageSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ImageSource for DirImageSource {
    fn lookup(&self, filename: &str) -> Result<RgbImage, LookupError> {
        let name = basename(filename);
        let path = self.root.join(name);
        if !path.is_file() {
            return Err(LookupError::NotFound(name.to_string()));
        }
        debug!("loading {}", path.display());
        let reader = ImageReader::open(&path).map_err(|_| LookupError::NotFound(name.to_string()))?;
        let decoded = reader.decode().map_err(|source| LookupError::Decode {
            name: name.to_string(),
            source,
        })?;
        Ok(decoded.to_rgb8())
    }
}

/// In-memory images, keyed by basename.
#[derive(Clone, Debug, Default)]
pub struct MemoryImageSource {
    images: HashMap<String, RgbImage>,
}

impl MemoryImageSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, filename: &str, image: RgbImage) {
        self.images.insert(basename(filename).to_string(), image);
    }
}

impl ImageSource for MemoryImageSource {
    fn lookup(&self, filename: &str) -> Result<RgbImage, LookupError> {
        let name = basename(filename);
        self.images
            .get(name)
            .cloned()
            .ok_or_else(|| LookupError::NotFound(name.to_string()))
    }
}
