//! Words shared by every backend when deriving names of generated items.
//!
//! File and identifier names are built by concatenating entity names with
//! these words, e.g. `Name::cat([cluster, &TYPE])` for the file holding the
//! `Cluster` type.

use std::sync::LazyLock;

use metamodel_core::Name;

macro_rules! words {
    ($($(#[$meta:meta])* $ident:ident = $word:literal;)*) => {
        $(
            $(#[$meta])*
            pub static $ident: LazyLock<Name> = LazyLock::new(|| Name::new([$word]));
        )*
    };
}

words! {
    TYPE = "Type";
    RESOURCE = "Resource";
    /// Used for the per-version metadata unit.
    METADATA = "Metadata";
    LIST = "List";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_compose() {
        let name = Name::cat([&*METADATA, &*TYPE]);
        assert_eq!(name.to_string(), "metadata_type");
        assert_eq!(name.words(), ["Metadata", "Type"]);
    }
}
