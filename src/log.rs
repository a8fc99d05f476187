//! Walker diagnostics.
//!
//! With the `tracing` feature the walker reports dialect selection, group
//! cursors and every recorded [`ParseWarning`] under the `icon_ir` target.
//! Without it `debug!` expands to nothing and its arguments are not evaluated.

use crate::errors::ParseWarning;

#[cfg(feature = "tracing")]
macro_rules! debug {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "icon_ir", $($arg)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! debug {
    ($($arg:tt)*) => {};
}

pub(crate) use debug;

/// Report a default substituted for invalid markup, tagged with its
/// diagnostic code.
pub(crate) fn recovered(warning: &ParseWarning) {
    #[cfg(feature = "tracing")]
    {
        let code = miette::Diagnostic::code(warning).map(|code| code.to_string());
        tracing::warn!(
            target: "icon_ir",
            code = code.as_deref().unwrap_or_default(),
            %warning,
            "recovered from invalid markup"
        );
    }
    #[cfg(not(feature = "tracing"))]
    let _ = warning;
}
