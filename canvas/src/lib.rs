//! Interactive diagramming canvas.
//!
//! A [`engine::Canvas`] owns a diagram of shapes: nodes (rectangles,
//! circles, ellipses, polygons) and edges (lines, polylines, bezier curves)
//! joined through ports. Pointer input drives a gesture state machine that
//! draws a provisional shape while the user sizes or places it, then asks
//! the host for a name before committing. Everything draws through the
//! [`surface::Surface`] trait, so the same engine runs headless against
//! [`surface::SvgSurface`] and in the browser against [`dom::DomSurface`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | The canvas, its operations, and the returned [`engine::Action`]s |
//! | [`shape`] | Shape types, per-kind geometry, and rendering |
//! | [`port`] | Port layout, connection state, and rendering |
//! | [`input`] | Tools, pointer events, and the gesture state machine |
//! | [`palette`] | Tool palette icons |
//! | [`geometry`] | Points and dimension records |
//! | [`curve`] | B-spline path data for bezier curves |
//! | [`surface`] | The drawing-surface seam and the in-memory SVG surface |
//! | [`dom`] | Browser document surface |
//! | [`config`] | Canvas and drag settings |
//! | [`error`] | Error types |
//! | [`consts`] | Shared sizes, styles, and ids |

pub mod config;
pub mod consts;
pub mod curve;
pub mod dom;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod input;
pub mod palette;
pub mod port;
pub mod shape;
pub mod surface;
