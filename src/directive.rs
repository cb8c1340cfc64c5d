use crate::classify::EntityRecord;

/// Manifest header name carrying the directive.
pub const HEADER_NAME: &str = "Hibernate-Contribution";

/// Joins the accumulated entity names into the directive value
/// `default; classes="a,b,c"`. Zero entities still produce a well-formed
/// directive with an empty quoted string.
///
/// No escaping is performed; Java qualified type names cannot contain commas,
/// quotes or newlines.
pub fn build_directive(entities: &[EntityRecord]) -> String {
    let mut value = String::from("default; classes=\"");
    for (i, entity) in entities.iter().enumerate() {
        debug_assert!(
            !entity.qualified_name.is_empty()
                && !entity.qualified_name.contains(['\n', '\r', '"'])
        );
        if i > 0 {
            value.push(',');
        }
        value.push_str(&entity.qualified_name);
    }
    value.push('"');
    value
}
