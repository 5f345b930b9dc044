//! Unit tests for scoped type resolution and cached member lookup.

use anyhow::{Result, ensure};
use rstest::rstest;

use super::{Member, MemberKind, SchemaRegistry, TypeSchema};
use crate::StencilError;

fn ui_registry() -> SchemaRegistry {
    let mut registry = SchemaRegistry::new();
    registry.register(
        TypeSchema::new("ui", "Component")
            .with_member(Member::scalar("Identifier").with_alias("Id"))
            .with_member(Member::scalar("Enabled")),
    );
    registry.register(
        TypeSchema::new("ui", "Widget")
            .with_parent("ui.Component")
            .with_member(Member::scalar("Color"))
            .with_member(
                Member::list("Parts", "ui.Part")
                    .with_item_alias("Part")
                    .with_order(1),
            )
            .with_member(Member::function("Refresh")),
    );
    registry.register(TypeSchema::new("ui", "Part").with_member(Member::scalar("Name")));
    registry.register(TypeSchema::new("hud", "Widget"));
    registry
}

#[test]
fn qualified_names_resolve_directly() -> Result<()> {
    let registry = ui_registry();
    let schema = registry.resolve_type("ui.Widget", &[])?;
    ensure!(schema.qualified_name() == "ui.Widget");
    Ok(())
}

#[test]
fn unqualified_names_resolve_within_scope() -> Result<()> {
    let registry = ui_registry();
    let scopes = vec![String::from("ui")];
    let schema = registry.resolve_type("Widget", &scopes)?;
    ensure!(schema.module() == "ui");
    Ok(())
}

#[rstest]
#[case("Widget", &[], "ambiguous")]
#[case("Widget", &["ui", "hud"], "ambiguous")]
#[case("Missing", &[], "unknown")]
#[case("Widget", &["audio"], "unknown")]
#[case("audio.Widget", &[], "unknown")]
fn type_resolution_failures(
    #[case] name: &str,
    #[case] scopes: &[&str],
    #[case] expected: &str,
) -> Result<()> {
    let registry = ui_registry();
    let scopes: Vec<String> = scopes.iter().map(|s| (*s).to_owned()).collect();
    let Err(err) = registry.resolve_type(name, &scopes) else {
        anyhow::bail!("expected resolution of '{name}' to fail");
    };
    match expected {
        "ambiguous" => ensure!(matches!(err, StencilError::AmbiguousType { .. }), "{err}"),
        _ => ensure!(matches!(err, StencilError::UnknownType { .. }), "{err}"),
    }
    Ok(())
}

#[test]
fn alias_match_wins_over_identifier_match() -> Result<()> {
    let mut registry = ui_registry();
    // "Label" is another member's alias and also a plain identifier.
    registry.register(
        TypeSchema::new("ui", "Button")
            .with_member(Member::scalar("Caption").with_alias("Label"))
            .with_member(Member::scalar("Label")),
    );
    let resolved = registry.resolve_member("ui.Button", "Label")?;
    ensure!(resolved.member().name() == "Caption");
    Ok(())
}

#[test]
fn collection_item_alias_resolves_to_the_list_member() -> Result<()> {
    let registry = ui_registry();
    let resolved = registry.resolve_member("ui.Widget", "Part")?;
    ensure!(resolved.member().name() == "Parts");
    ensure!(resolved.member().is_list());
    ensure!(resolved.member().kind() == &MemberKind::List(String::from("ui.Part")));
    Ok(())
}

#[test]
fn inherited_members_resolve_with_their_declaring_depth() -> Result<()> {
    let registry = ui_registry();
    let inherited = registry.resolve_member("ui.Widget", "Id")?;
    ensure!(inherited.member().name() == "Identifier");
    ensure!(inherited.declaring_type() == "ui.Component");
    ensure!(inherited.declaring_depth() == 1);

    let own = registry.resolve_member("ui.Widget", "Color")?;
    ensure!(own.declaring_depth() == 0);
    Ok(())
}

#[test]
fn derived_override_shadows_base_declaration() -> Result<()> {
    let mut registry = ui_registry();
    registry.register(
        TypeSchema::new("ui", "FancyWidget")
            .with_parent("ui.Widget")
            .with_member(Member::scalar("Color").with_order(7)),
    );
    let resolved = registry.resolve_member("ui.FancyWidget", "Color")?;
    ensure!(resolved.declaring_type() == "ui.FancyWidget");
    ensure!(resolved.member().order() == Some(7));
    Ok(())
}

#[test]
fn misses_are_cached_and_still_fail() -> Result<()> {
    let registry = ui_registry();
    for _ in 0..2 {
        let Err(err) = registry.resolve_member("ui.Widget", "Nope") else {
            anyhow::bail!("expected lookup to fail");
        };
        ensure!(matches!(err, StencilError::UnresolvedMember { .. }), "{err}");
    }
    Ok(())
}

#[test]
fn members_of_walks_the_chain_without_duplicates() -> Result<()> {
    let registry = ui_registry();
    let names: Vec<String> = registry
        .members_of("ui.Widget")?
        .iter()
        .map(|m| m.member().name().to_owned())
        .collect();
    ensure!(names == ["Color", "Parts", "Refresh", "Identifier", "Enabled"]);
    Ok(())
}
