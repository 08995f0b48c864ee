#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot renderer
//!
//! Computes the Mandelbrot set over a configurable rectangle of the
//! complex plane and rasterizes it into a grayscale RGBA buffer,
//! ready for PNG encoding.  Each pixel is mapped onto the viewport,
//! iterated until its orbit escapes or the iteration budget runs out,
//! and shaded by how long the escape took; points that never escape
//! are marked with a transparent-black sentinel.
//!
//! The canvas is split into contiguous column bands, one worker
//! thread per band.  Every pixel is a pure function of its coordinate
//! and the configuration, so the bands share nothing and need no
//! locks; the renderer joins all bands and returns the assembled
//! buffer.

pub mod config;
pub mod mapping;
pub mod render;

pub use crate::config::{parse_configuration, Configuration, InvalidConfiguration};
pub use crate::render::render;
