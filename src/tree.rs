//! Host-agnostic layer tree search.
//!
//! The host document is reached only through the [`Node`] trait. [`Layer`] is
//! an owned implementation, for hosts that snapshot their tree once per batch
//! and for tests.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::slice;

use crate::geometry::Rect;
use crate::params::TransformParameters;

/// What a node in the layer tree is.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeKind {
    GroupLayer,
    PaintLayer,
    /// Carries named vector shapes whose bounds serve as reference rectangles.
    VectorLayer,
    TransformMask,
    Other,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::GroupLayer => "group layer",
            Self::PaintLayer => "paint layer",
            Self::VectorLayer => "vector layer",
            Self::TransformMask => "transform mask",
            Self::Other => "other node",
        })
    }
}

/// A named vector shape, with bounds in points.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shape {
    pub name: String,
    pub bounds_pt: Rect,
}

impl Shape {
    pub fn new(name: impl Into<String>, bounds_pt: Rect) -> Self {
        Self {
            name: name.into(),
            bounds_pt,
        }
    }
}

/// Read-only view of one node of the host's layer tree.
pub trait Node: Sized {
    fn name(&self) -> &str;

    fn kind(&self) -> NodeKind;

    fn children(&self) -> &[Self];

    /// Vector shapes on this node. Empty for everything but vector layers.
    fn shapes(&self) -> &[Shape] {
        &[]
    }

    /// Design-space extent of the node's content, in device pixels.
    fn bounds(&self) -> Option<Rect> {
        None
    }

    /// Current parameters, for transform masks.
    fn transform(&self) -> Option<TransformParameters> {
        None
    }
}

/// Pre-order, depth-first iterator over the descendants of a node.
///
/// The starting node itself is not yielded.
pub struct Walk<'a, N> {
    stack: Vec<slice::Iter<'a, N>>,
}

impl<'a, N: Node> Iterator for Walk<'a, N> {
    type Item = &'a N;

    fn next(&mut self) -> Option<&'a N> {
        loop {
            let top = self.stack.last_mut()?;
            match top.next() {
                Some(node) => {
                    self.stack.push(node.children().iter());
                    return Some(node);
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

/// Walk every descendant of `root`, parents before children.
pub fn walk<N: Node>(root: &N) -> Walk<'_, N> {
    let mut stack = Vec::new();
    stack.push(root.children().iter());
    Walk { stack }
}

/// First descendant of `root` named `name`, depth-first.
pub fn find_by_name<'a, N: Node>(root: &'a N, name: &str) -> Option<&'a N> {
    walk(root).find(|n| n.name() == name)
}

/// Number of direct children of `root` of the given kind.
pub fn count_kind<N: Node>(root: &N, kind: NodeKind) -> usize {
    root.children().iter().filter(|n| n.kind() == kind).count()
}

/// Every named shape on every vector layer under `root`, converted to pixels.
///
/// When two shapes share a name, the first one in walk order wins.
pub fn collect_references<N: Node>(root: &N, dpi: f64) -> BTreeMap<String, Rect> {
    let mut refs = BTreeMap::new();
    for layer in walk(root).filter(|n| n.kind() == NodeKind::VectorLayer) {
        for shape in layer.shapes() {
            refs.entry(shape.name.clone())
                .or_insert_with(|| Rect::from_points(shape.bounds_pt, dpi));
        }
    }
    refs
}

/// Owned layer tree node.
///
/// # Example
///
/// ```
/// use maskfit::tree::{self, Layer, NodeKind};
///
/// let doc = Layer::group("root")
///     .with_child(Layer::group("cards").with_child(Layer::new("card-1", NodeKind::TransformMask)));
///
/// assert!(tree::find_by_name(&doc, "card-1").is_some());
/// assert_eq!(tree::count_kind(&doc, NodeKind::GroupLayer), 1);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Layer {
    pub name: String,
    pub kind: NodeKind,
    pub children: Vec<Layer>,
    pub shapes: Vec<Shape>,
    pub bounds: Option<Rect>,
    pub transform: Option<TransformParameters>,
}

impl Layer {
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            children: Vec::new(),
            shapes: Vec::new(),
            bounds: None,
            transform: None,
        }
    }

    pub fn group(name: impl Into<String>) -> Self {
        Self::new(name, NodeKind::GroupLayer)
    }

    /// A transform mask with content bounds and current parameters.
    pub fn mask(name: impl Into<String>, bounds: Rect, transform: TransformParameters) -> Self {
        Self::new(name, NodeKind::TransformMask)
            .with_bounds(bounds)
            .with_transform(transform)
    }

    /// A vector layer holding the given shapes.
    pub fn vector(name: impl Into<String>, shapes: Vec<Shape>) -> Self {
        let mut layer = Self::new(name, NodeKind::VectorLayer);
        layer.shapes = shapes;
        layer
    }

    pub fn with_child(mut self, child: Layer) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn with_transform(mut self, transform: TransformParameters) -> Self {
        self.transform = Some(transform);
        self
    }
}

impl Node for Layer {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> NodeKind {
        self.kind
    }

    fn children(&self) -> &[Self] {
        &self.children
    }

    fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    fn transform(&self) -> Option<TransformParameters> {
        self.transform
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> Layer {
        Layer::group("root")
            .with_child(
                Layer::group("a")
                    .with_child(Layer::new("a1", NodeKind::PaintLayer))
                    .with_child(Layer::group("a2").with_child(Layer::new("dup", NodeKind::Other))),
            )
            .with_child(Layer::new("dup", NodeKind::TransformMask))
            .with_child(Layer::group("b"))
    }

    // ── walk ────────────────────────────────────────────────────────────

    #[test]
    fn walk_is_pre_order() {
        let d = doc();
        let names: Vec<&str> = walk(&d).map(|n| n.name()).collect();
        assert_eq!(names, ["a", "a1", "a2", "dup", "dup", "b"]);
    }

    #[test]
    fn walk_empty() {
        assert_eq!(walk(&Layer::group("lonely")).count(), 0);
    }

    // ── find_by_name ────────────────────────────────────────────────────

    #[test]
    fn find_goes_deep_before_wide() {
        let d = doc();
        // The nested "dup" under a/a2 comes before the top-level one.
        assert_eq!(find_by_name(&d, "dup").map(|n| n.kind), Some(NodeKind::Other));
    }

    #[test]
    fn find_skips_root() {
        let d = doc();
        assert!(find_by_name(&d, "root").is_none());
        assert!(find_by_name(&d, "missing").is_none());
    }

    // ── count_kind ──────────────────────────────────────────────────────

    #[test]
    fn count_only_direct_children() {
        assert_eq!(count_kind(&doc(), NodeKind::GroupLayer), 2);
        assert_eq!(count_kind(&doc(), NodeKind::PaintLayer), 0);
    }

    // ── collect_references ──────────────────────────────────────────────

    #[test]
    fn references_converted_and_first_wins() {
        let d = Layer::group("root")
            .with_child(Layer::vector(
                "guides",
                alloc::vec![
                    Shape::new("card-1", Rect::new(72.0, 72.0, 144.0, 72.0)),
                    Shape::new("card-2", Rect::new(36.0, 36.0, 72.0, 72.0)),
                ],
            ))
            .with_child(Layer::vector(
                "more",
                alloc::vec![Shape::new("card-1", Rect::new(0.0, 0.0, 1.0, 1.0))],
            ))
            .with_child(Layer::new("paint", NodeKind::PaintLayer));
        let refs = collect_references(&d, 144.0);
        assert_eq!(refs.len(), 2);
        assert_eq!(refs["card-1"], Rect::new(144.0, 144.0, 288.0, 144.0));
        assert_eq!(refs["card-2"], Rect::new(72.0, 72.0, 144.0, 144.0));
    }

    #[test]
    fn shapes_on_non_vector_layers_ignored() {
        let mut paint = Layer::new("paint", NodeKind::PaintLayer);
        paint.shapes.push(Shape::new("x", Rect::new(0.0, 0.0, 1.0, 1.0)));
        let d = Layer::group("root").with_child(paint);
        assert!(collect_references(&d, 72.0).is_empty());
    }
}
