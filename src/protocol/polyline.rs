use crate::dispatch::{Message, MethodTable, Selector, Session, TableId, Value};
use crate::document::NodeId;
use crate::error::{DocumentError, Result};
use crate::math::path_2d::{parse_points, Opcode, PathCommand};

use super::node::no_specialization;

pub(super) fn table() -> MethodTable {
    MethodTable::inheriting(TableId::Path)
        .with(Selector::Vertices, vertices)
        .with(Selector::IsClosed, never)
        .with(Selector::IsCurved, never)
        .with(Selector::Commands, commands)
        .with(Selector::Encloses, never)
        .with(Selector::Specialize, no_specialization)
}

fn vertices(s: &mut Session<'_>, me: NodeId, _: &Message) -> Result<Value> {
    let raw = s
        .surface()
        .attribute(me, "points")?
        .ok_or_else(|| DocumentError::MissingAttribute("points".to_owned()))?;
    Ok(Value::Points(parse_points(&raw)?))
}

fn never(_: &mut Session<'_>, _: NodeId, _: &Message) -> Result<Value> {
    Ok(Value::Bool(false))
}

fn commands(s: &mut Session<'_>, me: NodeId, _: &Message) -> Result<Value> {
    let cmds = s
        .vertices(me)?
        .into_iter()
        .enumerate()
        .map(|(i, v)| {
            let op = if i == 0 { Opcode::MoveTo } else { Opcode::LineTo };
            PathCommand::new(op, false, vec![v.x, v.y])
        })
        .collect();
    Ok(Value::Commands(cmds))
}
