use tracing::debug;

use crate::dispatch::{Message, MethodTable, Selector, Session, TableId, Value};
use crate::document::{NodeId, ShapeKind};
use crate::error::Result;
use crate::surface::ShapeSurface;

const PARAGRAPH_CLASS: &str = "is-paragraph";
const MULTILINE_CLASS: &str = "is-multiline";

pub(super) fn table() -> MethodTable {
    MethodTable::inheriting(TableId::Node)
        .with(Selector::ParseAsParagraph, parse_as_paragraph)
        .with(Selector::String, string)
        .with(Selector::IdPrefix, id_prefix)
}

/// Collects the lines of a paragraph group, each line a list of run texts.
///
/// A paragraph is a group of line groups, each holding run groups whose
/// first child is a text element.
fn paragraph_lines(surface: &dyn ShapeSurface, me: NodeId) -> Result<Option<Vec<Vec<String>>>> {
    let lines = surface.children_of(me)?;
    if lines.is_empty() {
        return Ok(None);
    }
    let mut out = Vec::with_capacity(lines.len());
    for line in lines {
        if surface.kind_of(line)? != ShapeKind::Group {
            return Ok(None);
        }
        let mut runs = Vec::new();
        for run in surface.children_of(line)? {
            if surface.kind_of(run)? != ShapeKind::Group {
                return Ok(None);
            }
            let Some(&first) = surface.children_of(run)?.first() else {
                return Ok(None);
            };
            if surface.kind_of(first)? != ShapeKind::Text {
                return Ok(None);
            }
            runs.push(surface.text_content(first)?);
        }
        out.push(runs);
    }
    Ok(Some(out))
}

/// Recognises a paragraph, storing its string in `data-string` and tagging
/// the group with `is-paragraph` (and `is-multiline` for several lines).
fn parse_as_paragraph(s: &mut Session<'_>, me: NodeId, _: &Message) -> Result<Value> {
    let Some(lines) = paragraph_lines(s.surface(), me)? else {
        return Ok(Value::Bool(false));
    };
    let text = lines
        .iter()
        .map(|runs| runs.join(" "))
        .collect::<Vec<_>>()
        .join("\n");
    let surface = s.surface_mut();
    surface.set_attribute(me, "data-string", &text)?;
    if lines.len() > 1 {
        surface.add_class(me, MULTILINE_CLASS)?;
    }
    surface.add_class(me, PARAGRAPH_CLASS)?;
    debug!(?me, lines = lines.len(), "parsed paragraph");
    Ok(Value::Bool(true))
}

fn string(s: &mut Session<'_>, me: NodeId, _: &Message) -> Result<Value> {
    if let Some(text) = s.surface().attribute(me, "data-string")? {
        return Ok(Value::Str(text));
    }
    if s.send_unary(me, Selector::ParseAsParagraph)?
        .into_bool(Selector::ParseAsParagraph)?
    {
        let text = s.surface().attribute(me, "data-string")?.unwrap_or_default();
        return Ok(Value::Str(text));
    }
    Ok(Value::Str(s.surface().text_content(me)?))
}

fn id_prefix(s: &mut Session<'_>, me: NodeId, _: &Message) -> Result<Value> {
    let prefix = if s.surface().has_class(me, PARAGRAPH_CLASS)? {
        "par"
    } else {
        "g"
    };
    Ok(Value::Str(prefix.to_owned()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::dispatch::{Selector, Session};
    use crate::document::{Document, NodeData, NodeId, ShapeKind};
    use crate::params::NestParams;
    use crate::protocol::standard_registry;
    use crate::surface::ShapeSurface;

    /// Builds `paragraph > line* > run* > text` from `lines`.
    fn paragraph(doc: &mut Document, lines: &[&[&str]]) -> NodeId {
        let para = doc
            .append(doc.root(), NodeData::new(ShapeKind::Group))
            .unwrap();
        for runs in lines {
            let line = doc.append(para, NodeData::new(ShapeKind::Group)).unwrap();
            for run in *runs {
                let g = doc.append(line, NodeData::new(ShapeKind::Group)).unwrap();
                doc.append(g, NodeData::new(ShapeKind::Text).with_text(*run))
                    .unwrap();
            }
        }
        para
    }

    #[test]
    fn single_line_paragraph() {
        let mut doc = Document::new();
        let p = paragraph(&mut doc, &[&["Hello", "world"]]);
        let reg = standard_registry().unwrap();
        let mut s = Session::new(&mut doc, &reg, NestParams::default());

        let ok = s.send_unary(p, Selector::ParseAsParagraph).unwrap();
        assert!(ok.into_bool(Selector::ParseAsParagraph).unwrap());
        assert!(s.surface().has_class(p, "is-paragraph").unwrap());
        assert!(!s.surface().has_class(p, "is-multiline").unwrap());
        let text = s.send_unary(p, Selector::String).unwrap();
        assert_eq!(text.into_string(Selector::String).unwrap(), "Hello world");
        assert_eq!(s.id(p).unwrap(), "par1");
    }

    #[test]
    fn multiline_paragraph() {
        let mut doc = Document::new();
        let p = paragraph(&mut doc, &[&["a", "b"], &["c"]]);
        let reg = standard_registry().unwrap();
        let mut s = Session::new(&mut doc, &reg, NestParams::default());

        let text = s.send_unary(p, Selector::String).unwrap();
        assert_eq!(text.into_string(Selector::String).unwrap(), "a b\nc");
        assert!(s.surface().has_class(p, "is-multiline").unwrap());
        assert_eq!(
            s.surface().attribute(p, "class").unwrap().as_deref(),
            Some("is-multiline is-paragraph")
        );
    }

    #[test]
    fn non_paragraph_groups() {
        let mut doc = Document::new();
        let root = doc.root();
        let empty = doc.append(root, NodeData::new(ShapeKind::Group)).unwrap();
        let mixed = doc.append(root, NodeData::new(ShapeKind::Group)).unwrap();
        doc.append(mixed, NodeData::new(ShapeKind::Rect)).unwrap();
        let shallow = doc.append(root, NodeData::new(ShapeKind::Group)).unwrap();
        let line = doc.append(shallow, NodeData::new(ShapeKind::Group)).unwrap();
        doc.append(line, NodeData::new(ShapeKind::Text).with_text("x"))
            .unwrap();

        let reg = standard_registry().unwrap();
        let mut s = Session::new(&mut doc, &reg, NestParams::default());
        for g in [empty, mixed, shallow] {
            let ok = s.send_unary(g, Selector::ParseAsParagraph).unwrap();
            assert!(!ok.into_bool(Selector::ParseAsParagraph).unwrap());
            assert!(!s.surface().has_class(g, "is-paragraph").unwrap());
        }
        assert_eq!(s.id(empty).unwrap(), "g1");
    }

    #[test]
    fn text_string_is_content() {
        let mut doc = Document::new();
        let t = doc
            .append(doc.root(), NodeData::new(ShapeKind::Text).with_text("label"))
            .unwrap();
        let reg = standard_registry().unwrap();
        let mut s = Session::new(&mut doc, &reg, NestParams::default());
        let text = s.send_unary(t, Selector::String).unwrap();
        assert_eq!(text.into_string(Selector::String).unwrap(), "label");
        assert_eq!(s.id(t).unwrap(), "t1");
    }
}
