//! Scanline Software Rasterizer in Rust
//!
//! ### Features:
//!
//! * Triangles in homogeneous clip space are clipped against the canonical view volume
//! and scan-converted one horizontal span at a time.
//! * Per-vertex attributes (up to four vectors of up to four components) are linearly
//! interpolated across every span and handed to a user-defined pixel shader.
//! * Optional color and depth buffers, with depth testing and user-defined blending.
//! * Indexed models with materials and textures, plus a compact binary model format.
//! * Built-in compatibility with the `image` crate, using the `image_compat` cargo feature.
//!
//! ### Known Limitations:
//!
//! * Attributes are interpolated in screen space, so textures are affine mapped.
//! * By default, triangles with no vertex inside the view volume are culled even if
//! their interior crosses it. See `VisibilityTest::Clip`.
//!
//! The library emits `tracing` events but never installs a subscriber.

pub mod error;
pub mod interpolate;
pub mod geometry;
pub mod color;
pub mod pixels;
pub mod texture;
pub mod pipeline;
pub mod model;
pub mod window;

#[cfg(feature = "image_compat")]
pub mod image_compat;

pub use crate::error::{RenderError, RenderResult, DecodeError, DecodeResult};
pub use crate::interpolate::Interpolate;
pub use crate::geometry::{Attribute, Vertex, Dimensions, HasDimensions, Coordinate};
pub use crate::color::{ColorRgba, Blend, DefaultBlend, AlphaBlend};
pub use crate::pixels::{PixelBuffer, ColorBuffer, DepthBuffer, FAR_DEPTH};
pub use crate::texture::Image;
pub use crate::pipeline::{render_triangle, RenderTriangleParams, RenderTargets, Fragment, PixelShader, VisibilityTest};
pub use crate::model::{Model, Mesh, Face, Material, render_model, RenderModelParams, decode_model, load_model};
pub use crate::window::{Window, HeadlessWindow};
