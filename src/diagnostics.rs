//! Developer-facing diagnostics.
//!
//! Diagnostics report conditions a developer should know about (a validator
//! name that resolved to nothing, a loader capability the registry could not
//! install) without ever failing the operation that noticed them.
//!
//! Whether anything is emitted is decided when the [`Diagnostics`] value is
//! built. The default follows the build profile: enabled in debug builds,
//! inert in release builds.
//!
//! # Example
//!
//! ```
//! use schema_loader::Diagnostics;
//!
//! let diagnostics = Diagnostics::capturing();
//! diagnostics
//!     .warn(false, "Validator was not found for \"%s\"", &[&"zip"])
//!     .unwrap();
//! assert_eq!(
//!     diagnostics.messages(),
//!     vec!["Loader warning: Validator was not found for \"zip\"".to_string()]
//! );
//! ```

use crate::error::{RegistryError, Result};
use std::fmt::{self, Display};
use std::sync::{Arc, Mutex};

/// Prefix prepended to every emitted message.
pub const MESSAGE_PREFIX: &str = "Loader warning: ";

/// Emits developer diagnostics through `tracing`, optionally keeping a copy.
#[derive(Clone)]
pub struct Diagnostics {
    enabled: bool,
    captured: Option<Arc<Mutex<Vec<String>>>>,
}

impl Diagnostics {
    /// Create diagnostics that emit when `enabled` is true.
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            captured: None,
        }
    }

    /// Inert diagnostics; every report is a no-op.
    pub fn disabled() -> Self {
        Self::new(false)
    }

    /// Enabled diagnostics that also record each message in memory.
    pub fn capturing() -> Self {
        Self {
            enabled: true,
            captured: Some(Arc::new(Mutex::new(Vec::new()))),
        }
    }

    /// Whether reports are emitted.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Messages recorded so far (always empty unless built with [`Diagnostics::capturing`]).
    pub fn messages(&self) -> Vec<String> {
        match &self.captured {
            Some(captured) => captured
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .clone(),
            None => Vec::new(),
        }
    }

    /// Report `format` when `condition` is false.
    ///
    /// `%s` placeholders in `format` are replaced by `args` in order. An
    /// empty `format` is a misuse of the API and fails even when diagnostics
    /// are disabled; the reported condition itself never fails.
    pub fn warn(&self, condition: bool, format: &str, args: &[&dyn Display]) -> Result<()> {
        if format.is_empty() {
            return Err(RegistryError::MissingWarningMessage);
        }
        self.report(condition, format, args);
        Ok(())
    }

    /// Infallible form of [`Diagnostics::warn`] used by the crate through the
    /// `warning!` macro, which guarantees a template at compile time.
    #[doc(hidden)]
    pub fn report(&self, condition: bool, format: &str, args: &[&dyn Display]) {
        if condition || !self.enabled {
            return;
        }

        let message = format!("{}{}", MESSAGE_PREFIX, format_message(format, args));
        tracing::warn!(target: "schema_loader::diagnostics", "{}", message);

        if let Some(captured) = &self.captured {
            captured
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .push(message);
        }
    }
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new(cfg!(debug_assertions))
    }
}

impl fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagnostics")
            .field("enabled", &self.enabled)
            .field("capturing", &self.captured.is_some())
            .finish()
    }
}

/// Substitute `%s` placeholders with `args` in order.
///
/// Placeholders beyond the last argument are kept verbatim.
pub fn format_message(format: &str, args: &[&dyn Display]) -> String {
    let mut out = String::with_capacity(format.len());
    let mut args = args.iter();
    let mut rest = format;

    while let Some(idx) = rest.find("%s") {
        out.push_str(&rest[..idx]);
        match args.next() {
            Some(arg) => out.push_str(&arg.to_string()),
            None => out.push_str("%s"),
        }
        rest = &rest[idx + 2..];
    }
    out.push_str(rest);
    out
}

/// Report a diagnostic through a [`Diagnostics`] value.
///
/// `warning!(diagnostics, condition, "template %s", arg)`. Omitting the
/// template is rejected at compile time.
macro_rules! warning {
    ($diagnostics:expr, $condition:expr $(,)?) => {
        compile_error!("warning!(diagnostics, condition, format, ...args) requires a warning message argument")
    };
    ($diagnostics:expr, $condition:expr, $format:literal $(, $arg:expr)* $(,)?) => {
        $diagnostics.report(
            $condition,
            $format,
            &[$(&$arg as &dyn ::std::fmt::Display),*],
        )
    };
}

pub(crate) use warning;
