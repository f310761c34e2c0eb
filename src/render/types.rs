//! Rendering core types

use std::path::PathBuf;
use thiserror::Error;

// ============================================================
// Error Types
// ============================================================

/// Rendering error types
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("rasterizer '{0}' not found on PATH")]
    RasterizerNotFound(String),

    #[error("page {page} rasterization failed with exit status {status}: {stderr}")]
    PageRenderFailed {
        page: u32,
        status: i32,
        stderr: String,
    },

    #[error("page {page} rasterization exceeded {seconds}s bounded wait")]
    RenderTimedOut { page: u32, seconds: u64 },

    #[error("rasterizer produced no image at {0}")]
    MissingPageImage(PathBuf),

    #[error("image error: {0}")]
    ImageError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RenderError>;
