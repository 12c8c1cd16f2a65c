//! Shared helpers for command handlers.

use campfire_core::{Collection, Controller, ResourceState};
use tracing::debug;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

/// Refresh one collection unless `--offline` was passed.
///
/// A failed fetch is recorded in the collection's slice, so the error is
/// not returned here; [`usable`] decides what to show.
pub async fn fetch<T: Collection>(controller: &Controller, global: &GlobalOpts) {
    if global.offline {
        return;
    }
    if let Err(e) = controller.refresh::<T>().await {
        debug!(resource = %T::RESOURCE, error = %e, "refresh failed");
    }
}

/// Check that a slice has something to render.
///
/// A failed slice that still holds saved items is shown with a notice;
/// a failed slice with nothing saved becomes an error.
pub fn usable<T: Collection>(slice: &ResourceState<T>, global: &GlobalOpts) -> Result<(), CliError> {
    let Some(message) = slice.error.as_deref().filter(|_| slice.is_failed()) else {
        return Ok(());
    };
    if slice.is_empty() {
        return Err(CliError::FetchFailed {
            resource: T::RESOURCE.to_string(),
            message: message.into(),
        });
    }
    output::notice(
        &format!("Showing saved {} ({message})", T::RESOURCE),
        global.quiet,
    );
    Ok(())
}

/// Truncate `text` to at most `max` characters, adding an ellipsis.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_owned();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate("lake", 10), "lake");
    }

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("Nestled in the foothills", 8), "Nestled…");
    }
}
