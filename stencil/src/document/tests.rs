//! Unit tests for document parsing, node access, and serialisation.

use anyhow::{Result, ensure};
use rstest::rstest;

use super::{DocumentNode, parse_str, write_document};
use crate::StencilError;

#[test]
fn parses_nested_elements_with_attributes() -> Result<()> {
    let root = parse_str(
        r#"<Widget Type="ui.Widget" Color="red">
             <Part Name="core"/>
             <Part Name="shell"/>
           </Widget>"#,
    )?;
    ensure!(root.tag() == "Widget");
    ensure!(root.attribute("Type") == Some("ui.Widget"));
    ensure!(root.attribute("Color") == Some("red"));
    ensure!(root.children().len() == 2);
    ensure!(root.children_tagged("Part").len() == 2);
    ensure!(root.child("Part").and_then(|p| p.attribute("Name")) == Some("core"));
    Ok(())
}

#[test]
fn attribute_order_is_preserved() -> Result<()> {
    let root = parse_str(r#"<Widget Zeta="1" Alpha="2" Mid="3"/>"#)?;
    let keys: Vec<&str> = root.attributes().map(|(k, _)| k).collect();
    ensure!(keys == ["Zeta", "Alpha", "Mid"]);
    Ok(())
}

#[rstest]
#[case("<Widget>", "")]
#[case("<Widget/><Other/>", "more than one root")]
#[case("</Widget>", "")]
#[case("", "no root element")]
#[case(r#"<Widget A="1" A="2"/>"#, "duplicate attribute")]
#[case("<Widget>stray text</Widget>", "unexpected text content")]
fn rejects_malformed_documents(#[case] input: &str, #[case] fragment: &str) -> Result<()> {
    let Err(err) = parse_str(input) else {
        anyhow::bail!("expected parse of {input:?} to fail");
    };
    ensure!(
        matches!(err, StencilError::Parse { .. }),
        "unexpected error kind: {err}"
    );
    ensure!(
        err.to_string().contains(fragment),
        "error '{err}' does not mention '{fragment}'"
    );
    Ok(())
}

#[test]
fn round_trips_through_the_writer() -> Result<()> {
    let root = parse_str(
        r#"<Widget Type="ui.Widget"><Part Name="core"><Bolt Size="3"/></Part></Widget>"#,
    )?;
    let rendered = write_document(&root)?;
    let reparsed = parse_str(&rendered)?;
    ensure!(reparsed.tag() == "Widget");
    ensure!(reparsed.child("Part").and_then(|p| p.child("Bolt")).is_some());
    ensure!(rendered.contains("Size=\"3\""));
    Ok(())
}

#[test]
fn deep_import_assigns_fresh_identities() {
    let original = DocumentNode::new("Part")
        .with_attribute("Name", "core")
        .with_child(DocumentNode::new("Bolt"));
    let copy = original.deep_import();
    assert_ne!(original.id(), copy.id());
    assert_ne!(original.children()[0].id(), copy.children()[0].id());
    assert_eq!(copy.attribute("Name"), Some("core"));
}

#[test]
fn comments_and_declarations_are_skipped() -> Result<()> {
    let root = parse_str("<?xml version=\"1.0\"?><!-- menu --><Widget/>")?;
    ensure!(root.tag() == "Widget");
    Ok(())
}
