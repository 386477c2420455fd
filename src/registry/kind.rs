//! Resource kinds.
//!
//! A [`Kind`] names a category of resources a loader can provide. The six
//! built-in kinds are associated constants; further kinds are registered on a
//! [`Registry`](crate::registry::Registry) at runtime.

use regex::Regex;
use std::borrow::Cow;
use std::fmt;
use std::sync::LazyLock;

static KIND_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_]*$").expect("kind name pattern is valid"));

/// A category of resources, e.g. `Template` or `Validator`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Kind(Cow<'static, str>);

impl Kind {
    pub const TEMPLATE: Kind = Kind(Cow::Borrowed("Template"));
    pub const TYPE: Kind = Kind(Cow::Borrowed("Type"));
    pub const SCHEMA: Kind = Kind(Cow::Borrowed("Schema"));
    pub const VALIDATOR: Kind = Kind(Cow::Borrowed("Validator"));
    pub const PROCESSOR: Kind = Kind(Cow::Borrowed("Processor"));
    pub const OPERATOR: Kind = Kind(Cow::Borrowed("Operator"));

    /// The kinds every registry knows from construction, in declaration order.
    pub const BUILTIN: [Kind; 6] = [
        Kind::TEMPLATE,
        Kind::TYPE,
        Kind::SCHEMA,
        Kind::VALIDATOR,
        Kind::PROCESSOR,
        Kind::OPERATOR,
    ];

    /// Create a kind from any name. Use [`Kind::is_well_formed`] to check it.
    pub fn new(name: impl Into<String>) -> Self {
        Kind(Cow::Owned(name.into()))
    }

    /// The kind name as written, e.g. `Template`.
    pub fn name(&self) -> &str {
        &self.0
    }

    /// Lowercased name used as the resource field of listing entries.
    pub fn field(&self) -> String {
        self.0.to_lowercase()
    }

    /// Whether this is one of the six built-in kinds.
    pub fn is_builtin(&self) -> bool {
        Self::BUILTIN.contains(self)
    }

    /// Kind names are identifiers: a letter followed by letters, digits or `_`.
    pub fn is_well_formed(&self) -> bool {
        KIND_NAME.is_match(&self.0)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Kind {
    fn from(name: &str) -> Self {
        Kind::new(name)
    }
}

impl From<String> for Kind {
    fn from(name: String) -> Self {
        Kind::new(name)
    }
}
