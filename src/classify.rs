use crate::extract::ParsedUnit;

/// Literal marker name that makes a file an entity file. Matching is exact
/// and lexical: a qualified `@javax.persistence.Entity` does not match.
pub const ENTITY_ANNOTATION: &str = "Entity";

/// Fully qualified name of one discovered entity class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityRecord {
    pub qualified_name: String,
}

/// Decides whether a parsed file declares a persistence entity.
///
/// The decision is file-granular: the file counts when `Entity` appears among
/// the annotations of any declared type, and the reported name is always
/// built from the file's base name (one-public-type-per-file convention).
/// A file whose only `@Entity` sits on a nested class is therefore reported
/// under the outer type's qualified name; known limitation, kept as is.
pub fn classify(unit: &ParsedUnit, base_name: &str) -> Option<EntityRecord> {
    let is_entity = unit
        .types
        .iter()
        .any(|t| t.annotations.iter().any(|a| a == ENTITY_ANNOTATION));
    if !is_entity {
        return None;
    }

    Some(EntityRecord {
        qualified_name: match unit.package.as_deref() {
            Some(pkg) => format!("{pkg}.{base_name}"),
            None => base_name.to_string(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::TypeDecl;

    fn unit(package: Option<&str>, types: &[(&str, &[&str])]) -> ParsedUnit {
        ParsedUnit {
            package: package.map(str::to_string),
            types: types
                .iter()
                .map(|(name, annotations)| TypeDecl {
                    name: name.to_string(),
                    annotations: annotations.iter().map(|a| a.to_string()).collect(),
                })
                .collect(),
        }
    }

    #[test]
    fn annotated_class_is_an_entity() {
        let record = classify(&unit(Some("com.foo"), &[("Bar", &["Entity"])]), "Bar").unwrap();
        assert_eq!(record.qualified_name, "com.foo.Bar");
    }

    #[test]
    fn unannotated_class_is_not_an_entity() {
        assert!(classify(&unit(Some("com.foo"), &[("Util", &[])]), "Util").is_none());
    }

    #[test]
    fn default_package_uses_the_bare_base_name() {
        let record = classify(&unit(None, &[("Bar", &["Entity"])]), "Bar").unwrap();
        assert_eq!(record.qualified_name, "Bar");
    }

    #[test]
    fn nested_annotation_rolls_up_to_the_file_name() {
        // File-level granularity: the @Entity on the nested type marks the
        // whole file, reported under the outer type's name.
        let parsed = unit(Some("com.foo"), &[("Outer", &[]), ("Inner", &["Entity"])]);
        let record = classify(&parsed, "Outer").unwrap();
        assert_eq!(record.qualified_name, "com.foo.Outer");
    }

    #[test]
    fn matching_is_exact_not_substring() {
        assert!(classify(&unit(Some("com.foo"), &[("Bar", &["EntityListener"])]), "Bar").is_none());
        assert!(
            classify(
                &unit(Some("com.foo"), &[("Bar", &["javax.persistence.Entity"])]),
                "Bar"
            )
            .is_none()
        );
    }
}
