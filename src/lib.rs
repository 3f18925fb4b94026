//! Transform mask geometry: aspect-preserving fit and parameter inversion.
//!
//! Pure geometry — no document access, no allocations in the core, `no_std`
//! compatible.
//!
//! # Modules
//!
//! - [`geometry`] — Center-based rectangles and point-to-pixel conversion
//! - [`params`] — Transform parameter record and the 3×3 perspective matrix
//! - [`fit`] — Uniform scale-and-recenter of a source box into a reference rectangle
//! - [`invert`] — Inverse of a transform parameter record
//! - [`record`] — Flat `key=value` text form of a parameter record (`alloc`)
//! - [`tree`] / [`batch`] — Host-agnostic layer tree search and batch planning (`batch`)
//!
//! # Example
//!
//! ```
//! use maskfit::{Rect, TransformParameters, fit};
//!
//! let source = Rect::new(0.0, 0.0, 100.0, 50.0);
//! let target = Rect::new(10.0, 20.0, 200.0, 200.0);
//!
//! let placed = fit(source, target).unwrap().apply(&TransformParameters::IDENTITY);
//! assert_eq!(placed.scale_x, 2.0);
//! assert_eq!((placed.center_x, placed.center_y), (10.0, 20.0));
//!
//! let undo = placed.inverse();
//! assert_eq!(undo.scale_x, 0.5);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod fit;
pub mod geometry;
pub mod invert;
pub mod params;

#[cfg(feature = "alloc")]
pub mod record;

#[cfg(feature = "batch")]
pub mod batch;
#[cfg(feature = "batch")]
pub mod tree;

pub use fit::{Axis, Fit, InvalidGeometry, fit};
pub use geometry::{POINTS_PER_INCH, Rect};
pub use invert::{SINGULAR_EPSILON, invert};
pub use params::{Perspective, TransformParameters};
