//! Unit tests for the merge, sort, and identifier passes.

mod identity_tests;

use crate::schema::{Member, SchemaRegistry, TypeSchema};

/// Registry shared by the merge and sort tests: a two-level widget hierarchy
/// with aliased, ordered, and collection members.
pub(super) fn fixture_registry() -> SchemaRegistry {
    let mut registry = SchemaRegistry::new();
    registry.register(
        TypeSchema::new("ui", "Component")
            .with_member(Member::scalar("Id"))
            .with_member(Member::object("Margin", "ui.Spacing").with_order(1)),
    );
    registry.register(
        TypeSchema::new("ui", "Widget")
            .with_parent("ui.Component")
            .with_member(Member::scalar("Color"))
            .with_member(Member::scalar("Size"))
            .with_member(
                Member::list("Parts", "ui.Part")
                    .with_item_alias("Part")
                    .with_order(2),
            )
            .with_member(Member::object("Anchor", "ui.Spacing").with_order(1))
            .with_member(Member::object("Badge", "ui.Spacing"))
            .with_member(Member::function("Refresh")),
    );
    registry.register(
        TypeSchema::new("ui", "Part")
            .with_member(Member::scalar("Id"))
            .with_member(Member::scalar("Name")),
    );
    registry.register(TypeSchema::new("ui", "Spacing").with_member(Member::scalar("Width")));
    registry
}
