//! The word-segmented identifier primitive.

use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
};

use serde::{Serialize, Serializer};

/// An identifier made of an ordered sequence of words.
///
/// Names are separator and case agnostic: `clusters_mgmt`, `ClustersMgmt`
/// and `clusters-mgmt` all parse to the words `clusters` and `mgmt`. The
/// original spelling of each word is kept (so acronyms like `ID` survive),
/// but equality, hashing and ordering compare the words case-insensitively,
/// one segment at a time.
///
/// Because the spelling is kept, equal names may still render differently:
/// `cluster_id` becomes `ClusterId` and `ClusterID` stays `ClusterID` in
/// Pascal case. Entities are found by name, so a model should spell each
/// acronym one way throughout.
#[derive(Debug, Clone, Default)]
pub struct Name {
    words: Vec<String>,
}

impl Name {
    /// Create a name from already separated words. Empty words are dropped.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words
                .into_iter()
                .map(Into::into)
                .filter(|word| !word.is_empty())
                .collect(),
        }
    }

    /// Parse a name from text, splitting on any non alphanumeric character
    /// and on camel case boundaries (`ClusterID` -> `Cluster`, `ID`).
    pub fn parse(text: &str) -> Self {
        let mut words = Vec::new();
        for chunk in text.split(|c: char| !c.is_alphanumeric()) {
            split_camel(chunk, &mut words);
        }
        Self { words }
    }

    /// Concatenate names, preserving the word boundaries of each part.
    pub fn cat<'a>(names: impl IntoIterator<Item = &'a Name>) -> Self {
        Self {
            words: names
                .into_iter()
                .flat_map(|name| name.words.iter().cloned())
                .collect(),
        }
    }

    /// Return a new name with the words of `other` appended.
    pub fn append(&self, other: &Name) -> Self {
        Self::cat([self, other])
    }

    /// Return the plural form, obtained by pluralizing the last word.
    pub fn plural(&self) -> Self {
        let mut words = self.words.clone();
        if let Some(last) = words.last_mut() {
            *last = pluralize(last);
        }
        Self { words }
    }

    /// The words of the name, in order and with their original spelling.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Compare with another name for equality.
    pub fn equals(&self, other: &Name) -> bool {
        self == other
    }

    fn lowered(&self) -> impl Iterator<Item = String> + '_ {
        self.words.iter().map(|word| word.to_lowercase())
    }
}

fn split_camel(chunk: &str, words: &mut Vec<String>) {
    let chars: Vec<char> = chunk.chars().collect();
    let mut start = 0;
    for i in 1..chars.len() {
        let prev = chars[i - 1];
        let current = chars[i];
        let next_is_lower = chars.get(i + 1).is_some_and(|c| c.is_lowercase());
        let boundary = current.is_uppercase()
            && (prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower));
        if boundary {
            words.push(chars[start..i].iter().collect());
            start = i;
        }
    }
    if start < chars.len() {
        words.push(chars[start..].iter().collect());
    }
}

fn pluralize(word: &str) -> String {
    let lower = word.to_lowercase();
    let acronym = word.len() > 1 && !word.chars().any(char::is_lowercase);
    if acronym {
        return format!("{}s", word);
    }
    if ["s", "x", "z", "ch", "sh"]
        .iter()
        .any(|suffix| lower.ends_with(suffix))
    {
        return format!("{}es", word);
    }
    let mut chars = lower.chars().rev();
    if let (Some('y'), Some(before)) = (chars.next(), chars.next()) {
        if !"aeiou".contains(before) {
            return format!("{}ies", &word[..word.len() - 1]);
        }
    }
    format!("{}s", word)
}

impl PartialEq for Name {
    fn eq(&self, other: &Self) -> bool {
        self.words.len() == other.words.len()
            && self
                .words
                .iter()
                .zip(&other.words)
                .all(|(a, b)| a.to_lowercase() == b.to_lowercase())
    }
}

impl Eq for Name {}

impl Hash for Name {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.words.len().hash(state);
        for word in self.lowered() {
            word.hash(state);
        }
    }
}

impl Ord for Name {
    fn cmp(&self, other: &Self) -> Ordering {
        self.lowered().cmp(other.lowered())
    }
}

impl PartialOrd for Name {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The canonical form: lower case words joined with underscores.
impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, word) in self.lowered().enumerate() {
            if i > 0 {
                f.write_str("_")?;
            }
            f.write_str(&word)?;
        }
        Ok(())
    }
}

impl From<&str> for Name {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

impl Serialize for Name {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}
