//! Batch planning over a layer tree.
//!
//! Each planner resolves masks by name, computes the new parameters for every
//! mask it can, and records a warning for every mask it has to skip. A skipped
//! mask never aborts the rest of the batch. The result is a sequential list of
//! [`Step`]s for the host driver to write back one at a time.
//!
//! # Example
//!
//! ```
//! use maskfit::batch;
//! use maskfit::tree::{self, Layer, Shape};
//! use maskfit::{Rect, TransformParameters};
//!
//! let doc = Layer::group("root")
//!     .with_child(Layer::vector(
//!         "guides",
//!         vec![Shape::new("card", Rect::new(72.0, 72.0, 144.0, 144.0))],
//!     ))
//!     .with_child(Layer::mask(
//!         "card",
//!         Rect::new(0.0, 0.0, 100.0, 50.0),
//!         TransformParameters::IDENTITY,
//!     ));
//!
//! let refs = tree::collect_references(&doc, 72.0);
//! let plan = batch::plan_fits(&doc, &refs);
//!
//! assert!(plan.warnings.is_empty());
//! assert_eq!(plan.steps[0].params.scale_x, 1.44);
//! ```

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::fit::{InvalidGeometry, fit};
use crate::geometry::Rect;
use crate::params::TransformParameters;
use crate::tree::{self, Node, NodeKind};

/// What a step does to its mask.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    /// Move the transform center to an absolute position.
    MoveTo { x: f64, y: f64 },
    /// Fit the mask content into a reference rectangle.
    FitTo(Rect),
    /// Replace the mask's transform with its inverse.
    Invert,
}

/// One mask's new parameters, ready to be written back.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step {
    pub mask: String,
    pub action: Action,
    pub params: TransformParameters,
}

/// Why a mask was skipped.
#[derive(Clone, Debug, PartialEq)]
pub enum BatchWarning {
    /// No node with this name under the root.
    MaskNotFound { mask: String },
    /// The named node is not a transform mask.
    NotATransformMask { mask: String, kind: NodeKind },
    /// No reference rectangle shares the mask's name.
    NoReference { mask: String },
    /// The host exposed no parameters for the mask.
    NoTransform { mask: String },
    /// The mask or its reference has no usable extent.
    InvalidGeometry { mask: String, error: InvalidGeometry },
}

impl BatchWarning {
    /// Name of the skipped mask.
    pub fn mask(&self) -> &str {
        match self {
            Self::MaskNotFound { mask }
            | Self::NotATransformMask { mask, .. }
            | Self::NoReference { mask }
            | Self::NoTransform { mask }
            | Self::InvalidGeometry { mask, .. } => mask,
        }
    }
}

impl fmt::Display for BatchWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MaskNotFound { mask } => write!(f, "{mask}: not found"),
            Self::NotATransformMask { mask, kind } => {
                write!(f, "{mask}: is a {kind}, not a transform mask")
            }
            Self::NoReference { mask } => write!(f, "{mask}: no matching reference rectangle"),
            Self::NoTransform { mask } => write!(f, "{mask}: no active transform"),
            Self::InvalidGeometry { mask, error } => write!(f, "{mask}: {error}"),
        }
    }
}

/// Steps to write back plus the masks that were skipped.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BatchPlan {
    pub steps: Vec<Step>,
    pub warnings: Vec<BatchWarning>,
}

impl BatchPlan {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Units of work for a progress display: one per step.
    pub fn progress_total(&self) -> usize {
        self.steps.len()
    }

    fn push(&mut self, step: Step) {
        log::debug!("{}: {:?}", step.mask, step.action);
        self.steps.push(step);
    }

    fn skip(&mut self, warning: BatchWarning) {
        log::warn!("skipping {warning}");
        self.warnings.push(warning);
    }

    /// Find `name` under `root` and check it is a transform mask with parameters.
    fn resolve<N: Node>(&mut self, root: &N, name: &str) -> Option<TransformParameters> {
        let Some(node) = tree::find_by_name(root, name) else {
            self.skip(BatchWarning::MaskNotFound { mask: name.into() });
            return None;
        };
        self.check_mask(node)
    }

    fn check_mask<N: Node>(&mut self, node: &N) -> Option<TransformParameters> {
        let kind = node.kind();
        if kind != NodeKind::TransformMask {
            self.skip(BatchWarning::NotATransformMask {
                mask: node.name().into(),
                kind,
            });
            return None;
        }
        let Some(params) = node.transform() else {
            self.skip(BatchWarning::NoTransform {
                mask: node.name().into(),
            });
            return None;
        };
        Some(params)
    }
}

/// Move each named mask's center to the paired position.
pub fn plan_positions<N: Node>(root: &N, positions: &[(&str, (f64, f64))]) -> BatchPlan {
    let mut plan = BatchPlan::default();
    for &(name, (x, y)) in positions {
        let Some(params) = plan.resolve(root, name) else {
            continue;
        };
        plan.push(Step {
            mask: name.into(),
            action: Action::MoveTo { x, y },
            params: params.with_center(x, y),
        });
    }
    plan
}

/// Fit every transform mask under `root` into the reference of the same name.
///
/// Masks are visited in walk order. A mask without a reference is skipped
/// with [`BatchWarning::NoReference`].
pub fn plan_fits<N: Node>(root: &N, references: &BTreeMap<String, Rect>) -> BatchPlan {
    let mut plan = BatchPlan::default();
    for node in tree::walk(root).filter(|n| n.kind() == NodeKind::TransformMask) {
        let name = node.name();
        let Some(&target) = references.get(name) else {
            plan.skip(BatchWarning::NoReference { mask: name.into() });
            continue;
        };
        let Some(params) = plan.check_mask(node) else {
            continue;
        };
        let source = node.bounds().unwrap_or_default();
        match fit(source, target) {
            Ok(f) => plan.push(Step {
                mask: name.into(),
                action: Action::FitTo(target),
                params: f.apply(&params),
            }),
            Err(error) => plan.skip(BatchWarning::InvalidGeometry {
                mask: name.into(),
                error,
            }),
        }
    }
    plan
}

/// Invert the transform of each named mask.
pub fn plan_inversions<N: Node>(root: &N, names: &[&str]) -> BatchPlan {
    let mut plan = BatchPlan::default();
    for &name in names {
        let Some(params) = plan.resolve(root, name) else {
            continue;
        };
        plan.push(Step {
            mask: name.into(),
            action: Action::Invert,
            params: params.inverse(),
        });
    }
    plan
}
