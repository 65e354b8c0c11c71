use crate::dispatch::{Message, MethodTable, Selector, Session, TableId, Value};
use crate::document::NodeId;
use crate::error::Result;

pub(super) fn table() -> MethodTable {
    MethodTable::inheriting(TableId::Node).with(Selector::String, string)
}

fn string(s: &mut Session<'_>, me: NodeId, _: &Message) -> Result<Value> {
    Ok(Value::Str(s.surface().text_content(me)?))
}
