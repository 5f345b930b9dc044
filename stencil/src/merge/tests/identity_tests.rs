//! Tests for dotted identifier composition.

use anyhow::{Result, ensure};

use crate::document::parse_str;
use crate::merge::{propagate_identifiers, propagate_identifiers_with};

#[test]
fn identifiers_compose_from_root_to_leaf() -> Result<()> {
    let mut root = parse_str(
        r#"<Widget Id="A"><Part Id="B"><Bolt Id="C"/></Part></Widget>"#,
    )?;
    propagate_identifiers(&mut root);

    ensure!(root.attribute("Id") == Some("A"));
    let part = &root.children()[0];
    ensure!(part.attribute("Id") == Some("A.B"));
    let bolt = &part.children()[0];
    ensure!(bolt.attribute("Id") == Some("A.B.C"));
    Ok(())
}

#[test]
fn ancestors_without_the_attribute_are_skipped() -> Result<()> {
    let mut root = parse_str(r#"<Widget Id="A"><Part><Bolt Id="C"/></Part></Widget>"#)?;
    propagate_identifiers(&mut root);

    let part = &root.children()[0];
    ensure!(part.attribute("Id").is_none());
    ensure!(part.children()[0].attribute("Id") == Some("A.C"));
    Ok(())
}

#[test]
fn siblings_compose_independently() -> Result<()> {
    let mut root = parse_str(
        r#"<Widget Id="A"><Part Id="B"/><Part Id="C"/></Widget>"#,
    )?;
    propagate_identifiers(&mut root);

    ensure!(root.children()[0].attribute("Id") == Some("A.B"));
    ensure!(root.children()[1].attribute("Id") == Some("A.C"));
    Ok(())
}

#[test]
fn custom_attribute_and_separator() -> Result<()> {
    let mut root = parse_str(r#"<Widget Key="top"><Part Key="leaf"/></Widget>"#)?;
    propagate_identifiers_with(&mut root, "Key", "/");
    ensure!(root.children()[0].attribute("Key") == Some("top/leaf"));
    Ok(())
}
