//! Template fragments of the JavaScript generators.

use metamodel_codegen::Template;

/// The `Metadata` class of a version.
pub const METADATA: Template = Template::new("metadata", include_str!("templates/metadata.tera"));

/// Constants object of an enumerated type.
pub const ENUM: Template = Template::new("enum", include_str!("templates/enum.tera"))
    .with_helpers(&["enum_name", "line_comment", "value_name", "value_tag"]);

/// Class of a struct or class type, followed by its list class.
pub const STRUCT: Template = Template::new("struct", include_str!("templates/struct.tera"))
    .with_helpers(&[
        "object_name",
        "list_name",
        "line_comment",
        "field_name",
        "field_type",
        "getter_name",
        "getter_type",
    ]);

/// Client class of a resource.
pub const RESOURCE: Template = Template::new("resource", include_str!("templates/resource.tera"))
    .with_helpers(&[
        "resource_name",
        "line_comment",
        "method_name",
        "parameter_name",
        "parameter_type",
        "locator_name",
        "target_name",
    ]);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::NAMES;

    #[test]
    fn test_every_helper_is_declared_by_a_template() {
        let declared: Vec<&str> = [METADATA, ENUM, STRUCT, RESOURCE]
            .iter()
            .flat_map(|template| template.helpers().iter().copied())
            .collect();

        for name in NAMES {
            assert!(declared.contains(name), "no template declares '{}'", name);
        }
    }
}
