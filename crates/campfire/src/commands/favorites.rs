//! Favorite toggling.

use serde::Serialize;

use campfire_core::{Controller, EntityId, selectors};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Serialize)]
struct Toggled<'a> {
    id: EntityId,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    favorite: bool,
}

/// Toggle `id` in the favorites set. Unknown ids are accepted, matching
/// the store's behavior.
pub fn toggle(controller: &Controller, id: EntityId, global: &GlobalOpts) -> Result<(), CliError> {
    let favorite = controller.toggle_favorite(id);
    let state = controller.snapshot();
    let name = selectors::location_by_id(state.campsites.items(), id).map(|l| l.name.as_str());

    let result = Toggled { id, name, favorite };
    let out = output::render_single(
        global.output,
        &result,
        |t| {
            let label = t.name.map_or_else(|| format!("Campsite {}", t.id), str::to_owned);
            if t.favorite {
                format!("{label} added to favorites")
            } else {
                format!("{label} removed from favorites")
            }
        },
        |t| format!("{}\t{}", t.id, t.favorite),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
