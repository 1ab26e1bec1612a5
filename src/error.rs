//! Error types for the renderer.

use std::io;

use thiserror::Error;

/// Errors that may occur while building a camera, loading scene input or
/// presenting a frame.
#[derive(Debug, Error)]
pub enum Error {
    /// The up vector is parallel to the view direction, or eye and target
    /// coincide, so no orthonormal camera basis exists.
    #[error("degenerate camera basis: eye equals target or up is parallel to the view direction")]
    DegenerateBasis,

    /// The camera-to-world matrix could not be inverted.
    #[error("camera-to-world transform is not invertible")]
    SingularTransform,

    /// Field of view, clip distances or image size are out of range.
    #[error("invalid projection: {0}")]
    InvalidProjection(String),

    /// Texture dimensions do not match its pixel data.
    #[error("invalid texture: {0}")]
    InvalidTexture(String),

    /// An I/O error occurred while reading scene input.
    #[error("{0}")]
    Io(#[from] io::Error),

    /// An OBJ file could not be parsed.
    #[error("failed to load OBJ: {0}")]
    Obj(#[from] tobj::LoadError),

    /// A texture image could not be decoded or a frame could not be encoded.
    #[error("{0}")]
    Image(#[from] image::ImageError),

    /// The scene configuration file is malformed.
    #[error("invalid scene configuration: {0}")]
    Config(#[from] ron::error::SpannedError),

    /// The display surface reported a failure.
    #[error("display error: {0}")]
    Display(String),
}

pub type Result<T> = std::result::Result<T, Error>;
