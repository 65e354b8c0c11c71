mod kind;
mod node;

pub use kind::ShapeKind;
pub use node::{NodeData, NodeId};

use slotmap::SlotMap;

use crate::error::{DocumentError, NestError, Result};
use crate::math::path_2d::{control_points, parse_path, parse_points, polygon_from_commands};
use crate::math::{Point2, Rect};
use crate::surface::ShapeSurface;

/// In-memory drawing tree implementing [`ShapeSurface`].
///
/// Nodes live in an arena and reference each other through generational
/// [`NodeId`]s, so re-parenting is a pointer update and retagged shapes
/// leave behind handles that fail loudly instead of aliasing.
///
/// Mutations are not transactional. A failed run leaves every node valid
/// but the tree only partly rewritten.
#[derive(Debug)]
pub struct Document {
    nodes: SlotMap<NodeId, NodeData>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Creates a document holding only a generic root node.
    #[must_use]
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(NodeData::new(ShapeKind::Node));
        Self { nodes, root }
    }

    /// The root node.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of live nodes, including the root.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether only the root exists.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Whether the handle still resolves.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Returns the node data, or an error if the handle is stale.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::StaleHandle` if the node is not in the arena.
    pub fn node(&self, id: NodeId) -> Result<&NodeData> {
        self.nodes
            .get(id)
            .ok_or_else(|| DocumentError::StaleHandle.into())
    }

    /// Returns mutable node data, or an error if the handle is stale.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::StaleHandle` if the node is not in the arena.
    pub fn node_mut(&mut self, id: NodeId) -> Result<&mut NodeData> {
        self.nodes
            .get_mut(id)
            .ok_or_else(|| DocumentError::StaleHandle.into())
    }

    /// Inserts `data` as the last child of `parent`.
    ///
    /// Any parent/children links already present in `data` are discarded.
    ///
    /// # Errors
    ///
    /// Returns an error if `parent` is stale.
    pub fn append(&mut self, parent: NodeId, mut data: NodeData) -> Result<NodeId> {
        self.node(parent)?;
        data.parent = Some(parent);
        data.children.clear();
        let id = self.nodes.insert(data);
        self.node_mut(parent)?.children.push(id);
        Ok(id)
    }

    /// Pre-order traversal of `from` and everything beneath it.
    ///
    /// # Errors
    ///
    /// Returns an error if `from` is stale.
    pub fn descendants(&self, from: NodeId) -> Result<Vec<NodeId>> {
        let mut out = Vec::new();
        let mut stack = vec![from];
        while let Some(id) = stack.pop() {
            let node = self.node(id)?;
            out.push(id);
            stack.extend(node.children.iter().rev().copied());
        }
        Ok(out)
    }

    /// Whether `ancestor` is `node` or lies on its parent chain.
    ///
    /// # Errors
    ///
    /// Returns an error if `node` or any node on its chain is stale.
    pub fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> Result<bool> {
        let mut cur = Some(node);
        while let Some(id) = cur {
            if id == ancestor {
                return Ok(true);
            }
            cur = self.node(id)?.parent;
        }
        Ok(false)
    }

    /// Finds the live node whose `id` attribute equals `id`.
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<NodeId> {
        let wanted = id.trim();
        self.nodes
            .iter()
            .find(|(_, n)| n.attributes.get("id").is_some_and(|v| v == wanted))
            .map(|(k, _)| k)
    }

    fn computed_bbox(&self, id: NodeId) -> Result<Rect> {
        let node = self.node(id)?;
        if let Some(bbox) = node.bbox {
            return Ok(bbox);
        }
        match node.kind {
            ShapeKind::Rect => Ok(Rect::new(
                self.number_attribute_or(id, "x", 0.0)?,
                self.number_attribute_or(id, "y", 0.0)?,
                self.number_attribute(id, "width")?,
                self.number_attribute(id, "height")?,
            )),
            ShapeKind::Circle => {
                let cx = self.number_attribute(id, "cx")?;
                let cy = self.number_attribute(id, "cy")?;
                let r = self.number_attribute(id, "r")?;
                Ok(Rect::new(cx - r, cy - r, 2.0 * r, 2.0 * r))
            }
            ShapeKind::Polygon | ShapeKind::Polyline => {
                let raw = self
                    .attribute(id, "points")?
                    .ok_or_else(|| DocumentError::MissingAttribute("points".to_owned()))?;
                Ok(hull(&parse_points(&raw)?).ok_or(DocumentError::NoGeometry(node.kind.tag()))?)
            }
            ShapeKind::Path => {
                // Curves are bounded by their control points, which
                // over-approximates.
                let cmds = parse_path(&self.path_data(id)?)?;
                let pts: Vec<Point2> = if cmds.iter().any(|c| c.opcode.is_curve()) {
                    control_points(&cmds)
                } else {
                    polygon_from_commands(&cmds)?
                };
                Ok(hull(&pts).ok_or(DocumentError::NoGeometry("path"))?)
            }
            ShapeKind::Node | ShapeKind::Group | ShapeKind::Text => {
                let mut acc: Option<Rect> = None;
                for &child in &node.children {
                    let b = match self.computed_bbox(child) {
                        Ok(b) => b,
                        Err(NestError::Document(DocumentError::NoGeometry(_))) => continue,
                        Err(err) => return Err(err),
                    };
                    acc = Some(match acc {
                        Some(a) => union(&a, &b),
                        None => b,
                    });
                }
                Ok(acc.ok_or(DocumentError::NoGeometry(node.kind.tag()))?)
            }
        }
    }
}

fn hull(points: &[Point2]) -> Option<Rect> {
    let first = points.first()?;
    let (mut l, mut t, mut r, mut b) = (first.x, first.y, first.x, first.y);
    for p in &points[1..] {
        l = l.min(p.x);
        t = t.min(p.y);
        r = r.max(p.x);
        b = b.max(p.y);
    }
    Some(Rect::new(l, t, r - l, b - t))
}

fn union(a: &Rect, b: &Rect) -> Rect {
    let l = a.x.min(b.x);
    let t = a.y.min(b.y);
    Rect::new(l, t, a.right().max(b.right()) - l, a.bottom().max(b.bottom()) - t)
}

impl ShapeSurface for Document {
    fn kind_of(&self, shape: NodeId) -> Result<ShapeKind> {
        Ok(self.node(shape)?.kind)
    }

    fn attribute(&self, shape: NodeId, name: &str) -> Result<Option<String>> {
        Ok(self.node(shape)?.attributes.get(name).cloned())
    }

    fn set_attribute(&mut self, shape: NodeId, name: &str, value: &str) -> Result<()> {
        self.node_mut(shape)?
            .attributes
            .insert(name.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_attribute(&mut self, shape: NodeId, name: &str) -> Result<()> {
        self.node_mut(shape)?.attributes.remove(name);
        Ok(())
    }

    fn bounding_box(&self, shape: NodeId) -> Result<Rect> {
        self.computed_bbox(shape)
    }

    fn path_data(&self, shape: NodeId) -> Result<String> {
        let node = self.node(shape)?;
        if node.kind != ShapeKind::Path {
            return Err(DocumentError::NotAPath(node.kind.tag()).into());
        }
        Ok(node.attributes.get("d").cloned().unwrap_or_default())
    }

    fn retag(&mut self, shape: NodeId, kind: ShapeKind) -> Result<NodeId> {
        let mut data = self
            .nodes
            .remove(shape)
            .ok_or(DocumentError::StaleHandle)?;
        data.kind = kind;
        let parent = data.parent;
        let children = data.children.clone();
        let new_id = self.nodes.insert(data);
        for child in children {
            self.node_mut(child)?.parent = Some(new_id);
        }
        if let Some(p) = parent {
            for slot in &mut self.node_mut(p)?.children {
                if *slot == shape {
                    *slot = new_id;
                }
            }
        }
        if self.root == shape {
            self.root = new_id;
        }
        Ok(new_id)
    }

    fn parent_of(&self, shape: NodeId) -> Result<Option<NodeId>> {
        Ok(self.node(shape)?.parent)
    }

    fn reparent(&mut self, child: NodeId, new_parent: NodeId) -> Result<()> {
        self.node(child)?;
        if self.is_ancestor_or_self(child, new_parent)? {
            return Err(DocumentError::WouldCreateCycle.into());
        }
        if let Some(old) = self.node(child)?.parent {
            self.node_mut(old)?.children.retain(|&c| c != child);
        }
        self.node_mut(new_parent)?.children.push(child);
        self.node_mut(child)?.parent = Some(new_parent);
        Ok(())
    }

    fn children_of(&self, shape: NodeId) -> Result<Vec<NodeId>> {
        Ok(self.node(shape)?.children.clone())
    }

    fn text_content(&self, shape: NodeId) -> Result<String> {
        let mut out = String::new();
        for id in self.descendants(shape)? {
            out.push_str(&self.node(id)?.text);
        }
        Ok(out)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn rect(x: f64, y: f64, w: f64, h: f64) -> NodeData {
        NodeData::new(ShapeKind::Rect)
            .with_attr("x", x.to_string())
            .with_attr("y", y.to_string())
            .with_attr("width", w.to_string())
            .with_attr("height", h.to_string())
    }

    #[test]
    fn append_links_parent_and_child() {
        let mut doc = Document::new();
        let g = doc.append(doc.root(), NodeData::new(ShapeKind::Group)).unwrap();
        let r = doc.append(g, rect(0.0, 0.0, 1.0, 1.0)).unwrap();
        assert_eq!(doc.parent_of(r).unwrap(), Some(g));
        assert_eq!(doc.children_of(g).unwrap(), vec![r]);
        assert_eq!(doc.len(), 3);
    }

    #[test]
    fn retag_invalidates_old_handle() {
        let mut doc = Document::new();
        let g = doc.append(doc.root(), NodeData::new(ShapeKind::Group)).unwrap();
        let p = doc
            .append(g, NodeData::new(ShapeKind::Path).with_attr("d", "M0,0 L1,0"))
            .unwrap();
        let child = doc.append(p, NodeData::new(ShapeKind::Text)).unwrap();

        let q = doc.retag(p, ShapeKind::Polyline).unwrap();
        assert_ne!(p, q);
        assert!(!doc.contains(p));
        assert!(matches!(
            doc.kind_of(p).unwrap_err(),
            crate::NestError::Document(DocumentError::StaleHandle)
        ));
        assert_eq!(doc.kind_of(q).unwrap(), ShapeKind::Polyline);
        assert_eq!(doc.attribute(q, "d").unwrap().as_deref(), Some("M0,0 L1,0"));
        assert_eq!(doc.children_of(g).unwrap(), vec![q]);
        assert_eq!(doc.parent_of(child).unwrap(), Some(q));
    }

    #[test]
    fn reparent_moves_to_end() {
        let mut doc = Document::new();
        let root = doc.root();
        let a = doc.append(root, rect(0.0, 0.0, 10.0, 10.0)).unwrap();
        let b = doc.append(root, rect(1.0, 1.0, 1.0, 1.0)).unwrap();
        doc.reparent(b, a).unwrap();
        assert_eq!(doc.children_of(root).unwrap(), vec![a]);
        assert_eq!(doc.children_of(a).unwrap(), vec![b]);
        assert!(doc.is_ancestor_or_self(root, b).unwrap());
    }

    #[test]
    fn reparent_rejects_cycles() {
        let mut doc = Document::new();
        let a = doc.append(doc.root(), NodeData::new(ShapeKind::Group)).unwrap();
        let b = doc.append(a, NodeData::new(ShapeKind::Group)).unwrap();
        assert!(doc.reparent(a, b).is_err());
        assert!(doc.reparent(a, a).is_err());
        assert_eq!(doc.parent_of(b).unwrap(), Some(a));
    }

    #[test]
    fn bounding_boxes_by_kind() {
        let mut doc = Document::new();
        let root = doc.root();
        let r = doc.append(root, rect(1.0, 2.0, 3.0, 4.0)).unwrap();
        assert_eq!(doc.bounding_box(r).unwrap(), Rect::new(1.0, 2.0, 3.0, 4.0));

        let c = doc
            .append(
                root,
                NodeData::new(ShapeKind::Circle)
                    .with_attr("cx", "5")
                    .with_attr("cy", "5")
                    .with_attr("r", "2"),
            )
            .unwrap();
        assert_eq!(doc.bounding_box(c).unwrap(), Rect::new(3.0, 3.0, 4.0, 4.0));

        let p = doc
            .append(
                root,
                NodeData::new(ShapeKind::Path).with_attr("d", "M0,0 L4,0 L4,2 Z"),
            )
            .unwrap();
        assert_eq!(doc.bounding_box(p).unwrap(), Rect::new(0.0, 0.0, 4.0, 2.0));

        let g = doc.append(root, NodeData::new(ShapeKind::Group)).unwrap();
        assert!(doc.bounding_box(g).is_err());
        doc.reparent(r, g).unwrap();
        doc.reparent(c, g).unwrap();
        assert_eq!(doc.bounding_box(g).unwrap(), Rect::new(1.0, 2.0, 6.0, 5.0));
    }

    #[test]
    fn rect_position_defaults_only_when_absent() {
        let mut doc = Document::new();
        let root = doc.root();
        let bare = doc
            .append(
                root,
                NodeData::new(ShapeKind::Rect)
                    .with_attr("width", "3")
                    .with_attr("height", "2"),
            )
            .unwrap();
        assert_eq!(doc.bounding_box(bare).unwrap(), Rect::new(0.0, 0.0, 3.0, 2.0));

        let junk = doc
            .append(
                root,
                NodeData::new(ShapeKind::Rect)
                    .with_attr("x", "left")
                    .with_attr("width", "3")
                    .with_attr("height", "2"),
            )
            .unwrap();
        assert!(matches!(
            doc.bounding_box(junk).unwrap_err(),
            NestError::Document(DocumentError::InvalidAttribute { .. })
        ));
    }

    #[test]
    fn group_union_skips_only_empty_children() {
        let mut doc = Document::new();
        let g = doc.append(doc.root(), NodeData::new(ShapeKind::Group)).unwrap();
        doc.append(g, NodeData::new(ShapeKind::Group)).unwrap();
        doc.append(g, rect(2.0, 2.0, 1.0, 1.0)).unwrap();
        assert_eq!(doc.bounding_box(g).unwrap(), Rect::new(2.0, 2.0, 1.0, 1.0));

        doc.append(g, NodeData::new(ShapeKind::Path).with_attr("d", "M0,0 L1,zz"))
            .unwrap();
        assert!(matches!(
            doc.bounding_box(g).unwrap_err(),
            NestError::Geometry(_)
        ));
    }

    #[test]
    fn relative_curve_bounds_follow_the_pen() {
        let mut doc = Document::new();
        let p = doc
            .append(
                doc.root(),
                NodeData::new(ShapeKind::Path).with_attr("d", "M10,10 q5,-4 10,0"),
            )
            .unwrap();
        assert_eq!(doc.bounding_box(p).unwrap(), Rect::new(10.0, 6.0, 10.0, 4.0));
    }

    #[test]
    fn explicit_bbox_wins() {
        let mut doc = Document::new();
        let t = doc
            .append(
                doc.root(),
                NodeData::new(ShapeKind::Text)
                    .with_text("hi")
                    .with_bbox(Rect::new(1.0, 1.0, 8.0, 3.0)),
            )
            .unwrap();
        assert_eq!(doc.bounding_box(t).unwrap(), Rect::new(1.0, 1.0, 8.0, 3.0));
    }

    #[test]
    fn path_data_only_for_paths() {
        let mut doc = Document::new();
        let r = doc.append(doc.root(), rect(0.0, 0.0, 1.0, 1.0)).unwrap();
        assert!(doc.path_data(r).is_err());
    }

    #[test]
    fn text_content_concatenates_descendants() {
        let mut doc = Document::new();
        let g = doc.append(doc.root(), NodeData::new(ShapeKind::Group)).unwrap();
        doc.append(g, NodeData::new(ShapeKind::Text).with_text("ab")).unwrap();
        doc.append(g, NodeData::new(ShapeKind::Text).with_text("cd")).unwrap();
        assert_eq!(doc.text_content(g).unwrap(), "abcd");
    }

    #[test]
    fn classes_and_lookup() {
        let mut doc = Document::new();
        let p = doc
            .append(doc.root(), NodeData::new(ShapeKind::Path).with_attr("class", "real"))
            .unwrap();
        assert!(doc.has_class(p, "real").unwrap());
        doc.add_class(p, "connection").unwrap();
        doc.add_class(p, "real").unwrap();
        assert_eq!(doc.attribute(p, "class").unwrap().as_deref(), Some("real connection"));

        doc.set_attribute(p, "id", "e7").unwrap();
        assert_eq!(doc.find_by_id("e7"), Some(p));
        assert_eq!(doc.find_by_id("nope"), None);
    }

    #[test]
    fn number_attribute_errors() {
        let mut doc = Document::new();
        let r = doc
            .append(doc.root(), NodeData::new(ShapeKind::Rect).with_attr("x", "abc"))
            .unwrap();
        assert!(matches!(
            doc.number_attribute(r, "x").unwrap_err(),
            crate::NestError::Document(DocumentError::InvalidAttribute { .. })
        ));
        assert!(matches!(
            doc.number_attribute(r, "y").unwrap_err(),
            crate::NestError::Document(DocumentError::MissingAttribute(_))
        ));
    }
}
