//! Template fragments.

/// A template fragment together with the helpers it calls.
///
/// Declaring the helpers lets the buffer reject a fragment whose helpers
/// are not registered before anything is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    name: &'static str,
    source: &'static str,
    helpers: &'static [&'static str],
}

impl Template {
    pub const fn new(name: &'static str, source: &'static str) -> Self {
        Self {
            name,
            source,
            helpers: &[],
        }
    }

    pub const fn with_helpers(self, helpers: &'static [&'static str]) -> Self {
        Self { helpers, ..self }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn source(&self) -> &'static str {
        self.source
    }

    /// Names of the helpers the fragment calls.
    pub fn helpers(&self) -> &'static [&'static str] {
        self.helpers
    }
}
