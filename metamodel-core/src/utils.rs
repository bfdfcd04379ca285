//! Shared word-case helpers for rendering names.

use serde::Deserialize;

use crate::Name;

/// How each word of a name is cased when joined into an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordCase {
    /// Every word lower case (`node`, `pool`).
    Lower,
    /// Every word upper case (`NODE`, `POOL`).
    Upper,
    /// Every word capitalized (`Node`, `Pool`).
    Pascal,
    /// First word lower case, the rest capitalized (`node`, `Pool`).
    Camel,
}

impl WordCase {
    /// Join the words of `name` with `separator`, casing each one.
    pub fn join(self, name: &Name, separator: &str) -> String {
        name.words()
            .iter()
            .enumerate()
            .map(|(i, word)| match self {
                WordCase::Lower => word.to_lowercase(),
                WordCase::Upper => word.to_uppercase(),
                WordCase::Pascal => capitalize(word),
                WordCase::Camel if i == 0 => word.to_lowercase(),
                WordCase::Camel => capitalize(word),
            })
            .collect::<Vec<_>>()
            .join(separator)
    }
}

/// Capitalize a word (e.g., "cluster" -> "Cluster").
///
/// Words written entirely in upper case are treated as acronyms and kept
/// as they are, so `ID` stays `ID` instead of becoming `Id`.
pub fn capitalize(word: &str) -> String {
    if word.len() > 1 && !word.chars().any(char::is_lowercase) {
        return word.to_string();
    }
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
    }
}

/// Render a name in PascalCase (e.g., "node_pool" -> "NodePool")
///
/// Acronyms keep their spelling, so the result depends on how the name was
/// written and not only on the words [`Name`] equality compares.
pub fn to_pascal_case(name: &Name) -> String {
    WordCase::Pascal.join(name, "")
}

/// Render a name in camelCase (e.g., "node_pool" -> "nodePool")
pub fn to_camel_case(name: &Name) -> String {
    WordCase::Camel.join(name, "")
}

/// Render a name in snake_case (e.g., "NodePool" -> "node_pool")
pub fn to_snake_case(name: &Name) -> String {
    WordCase::Lower.join(name, "_")
}

/// Render a name in kebab-case (e.g., "NodePool" -> "node-pool")
pub fn to_kebab_case(name: &Name) -> String {
    WordCase::Lower.join(name, "-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("cluster"), "Cluster");
        assert_eq!(capitalize("cLUSTER"), "Cluster");
        assert_eq!(capitalize("ID"), "ID");
        assert_eq!(capitalize("a"), "A");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_to_pascal_case() {
        assert_eq!(to_pascal_case(&Name::parse("node_pool")), "NodePool");
        assert_eq!(to_pascal_case(&Name::parse("cluster_id")), "ClusterId");
        assert_eq!(to_pascal_case(&Name::parse("ClusterID")), "ClusterID");
        assert_eq!(to_pascal_case(&Name::default()), "");
    }

    #[test]
    fn test_equal_names_keep_their_acronyms() {
        let lower = Name::parse("cluster_id");
        let upper = Name::parse("ClusterID");

        assert_eq!(lower, upper);
        assert_eq!(to_pascal_case(&lower), "ClusterId");
        assert_eq!(to_pascal_case(&upper), "ClusterID");
        assert_eq!(to_snake_case(&lower), to_snake_case(&upper));
    }

    #[test]
    fn test_to_camel_case() {
        assert_eq!(to_camel_case(&Name::parse("node_pool")), "nodePool");
        assert_eq!(to_camel_case(&Name::parse("Name")), "name");
        assert_eq!(to_camel_case(&Name::parse("HTTPServer")), "httpServer");
    }

    #[test]
    fn test_to_snake_and_kebab_case() {
        assert_eq!(to_snake_case(&Name::parse("NodePool")), "node_pool");
        assert_eq!(to_kebab_case(&Name::parse("NodePool")), "node-pool");
    }

    #[test]
    fn test_upper_join() {
        assert_eq!(WordCase::Upper.join(&Name::parse("node_pool"), "_"), "NODE_POOL");
    }
}
