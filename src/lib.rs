//! Emberfield: a decorative night scene, a glTF model under an HDR
//! panorama wrapped in a flickering ember particle field.
//!
//! The crate splits into a pure core (`field`) and glue over the rendering
//! stack (`gfx`, `platform_winit`), with asset decoding (`assets`) running
//! behind a channel (`loader`).

pub mod assets;
pub mod config;
pub mod field;
pub mod gfx;
pub mod loader;
pub mod platform_winit;
pub mod xr;
