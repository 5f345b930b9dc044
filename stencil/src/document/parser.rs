//! XML parsing into [`DocumentNode`] trees using quick-xml streaming events.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use std::path::Path;

use crate::error::{StencilError, StencilResult};

use super::node::DocumentNode;

/// Origin marker used for parse errors on in-memory documents.
const INLINE_ORIGIN: &str = "<string>";

/// Parse a document file into a node tree.
///
/// # Errors
///
/// Returns [`StencilError::Io`] if the file cannot be read and
/// [`StencilError::Parse`] if its contents are not a well-formed document.
pub fn parse_document(path: &Path) -> StencilResult<DocumentNode> {
    let text = std::fs::read_to_string(path).map_err(|e| StencilError::io(path, e))?;
    parse_with_origin(&text, path)
}

/// Parse an in-memory document into a node tree.
///
/// # Examples
///
/// ```
/// use stencil::parse_str;
///
/// let root = parse_str(r#"<Widget Id="menu"><Part Name="core"/></Widget>"#)?;
/// assert_eq!(root.tag(), "Widget");
/// assert_eq!(root.children().len(), 1);
/// # Ok::<(), stencil::StencilError>(())
/// ```
///
/// # Errors
///
/// Returns [`StencilError::Parse`] if the text is not a well-formed document.
pub fn parse_str(text: &str) -> StencilResult<DocumentNode> {
    parse_with_origin(text, Path::new(INLINE_ORIGIN))
}

fn parse_with_origin(text: &str, origin: &Path) -> StencilResult<DocumentNode> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<DocumentNode> = Vec::new();
    let mut root: Option<DocumentNode> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => stack.push(node_from_start(&start, origin)?),
            Ok(Event::Empty(start)) => {
                let node = node_from_start(&start, origin)?;
                attach(node, &mut stack, &mut root, origin)?;
            }
            Ok(Event::End(_)) => {
                let node = stack.pop().ok_or_else(|| {
                    StencilError::parse(origin, "closing tag without matching opening tag")
                })?;
                attach(node, &mut stack, &mut root, origin)?;
            }
            Ok(Event::Text(text)) => {
                // Asset documents carry data in attributes only.
                let content = text
                    .unescape()
                    .map_err(|e| StencilError::parse(origin, e.to_string()))?;
                if !content.trim().is_empty() {
                    return Err(StencilError::parse(
                        origin,
                        format!("unexpected text content '{}'", content.trim()),
                    ));
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {} // declarations, comments, processing instructions
            Err(e) => return Err(StencilError::parse(origin, e.to_string())),
        }
    }

    if !stack.is_empty() {
        return Err(StencilError::parse(origin, "unclosed element at end of document"));
    }
    root.ok_or_else(|| StencilError::parse(origin, "document has no root element"))
}

fn node_from_start(start: &BytesStart<'_>, origin: &Path) -> StencilResult<DocumentNode> {
    let tag = std::str::from_utf8(start.name().as_ref())
        .map_err(|e| StencilError::parse(origin, e.to_string()))?
        .to_owned();
    let mut node = DocumentNode::new(tag);

    // Disable quick-xml's own duplicate check so the duplicate branch below
    // reports the error; the library's check would otherwise fire first.
    let mut attributes = start.attributes();
    attributes.with_checks(false);
    for attribute in attributes {
        let attribute = attribute.map_err(|e| StencilError::parse(origin, e.to_string()))?;
        let key = std::str::from_utf8(attribute.key.as_ref())
            .map_err(|e| StencilError::parse(origin, e.to_string()))?
            .to_owned();
        let value = attribute
            .unescape_value()
            .map_err(|e| StencilError::parse(origin, e.to_string()))?
            .into_owned();
        if node.attribute(&key).is_some() {
            return Err(StencilError::parse(
                origin,
                format!("duplicate attribute '{key}' on element '{}'", node.tag()),
            ));
        }
        node.set_attribute(key, value);
    }
    Ok(node)
}

fn attach(
    node: DocumentNode,
    stack: &mut Vec<DocumentNode>,
    root: &mut Option<DocumentNode>,
    origin: &Path,
) -> StencilResult<()> {
    if let Some(parent) = stack.last_mut() {
        parent.push_child(node);
        return Ok(());
    }
    if root.is_some() {
        return Err(StencilError::parse(origin, "document has more than one root element"));
    }
    *root = Some(node);
    Ok(())
}
