//! Serialisation of merged documents back to indented XML.

use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, Event};

use std::path::Path;

use crate::error::{StencilError, StencilResult};

use super::node::DocumentNode;

/// Render a node tree as an indented XML document.
///
/// This is the persistable form of a merged document: attributes appear in
/// author order and children in their final (sorted) order.
///
/// # Errors
///
/// Returns [`StencilError::Parse`] if an event cannot be serialised; this
/// does not happen for trees produced by the parser or merge passes.
pub fn write_document(node: &DocumentNode) -> StencilResult<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    write_node(&mut writer, node)?;
    String::from_utf8(writer.into_inner())
        .map_err(|e| StencilError::parse(Path::new("<writer>"), e.to_string()))
}

fn write_node(writer: &mut Writer<Vec<u8>>, node: &DocumentNode) -> StencilResult<()> {
    let mut start = BytesStart::new(node.tag());
    for (key, value) in node.attributes() {
        start.push_attribute((key, value));
    }

    if node.children().is_empty() {
        writer
            .write_event(Event::Empty(start))
            .map_err(|e| StencilError::parse(Path::new("<writer>"), e.to_string()))?;
        return Ok(());
    }

    writer
        .write_event(Event::Start(start))
        .map_err(|e| StencilError::parse(Path::new("<writer>"), e.to_string()))?;
    for child in node.children() {
        write_node(writer, child)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(node.tag())))
        .map_err(|e| StencilError::parse(Path::new("<writer>"), e.to_string()))
}
