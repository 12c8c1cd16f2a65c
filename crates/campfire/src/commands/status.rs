//! Fetch lifecycle overview.

use serde::Serialize;
use tabled::Tabled;

use campfire_core::{Controller, RehydrateOutcome, Resource, ResourceState};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

#[derive(Clone, Serialize, Tabled)]
struct SliceRow {
    #[tabled(rename = "Collection")]
    collection: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Items")]
    items: usize,
    #[tabled(rename = "Error")]
    error: String,
}

impl SliceRow {
    fn new<T>(resource: Resource, slice: &ResourceState<T>, color: bool) -> Self {
        Self {
            collection: resource.to_string(),
            status: output::status_label(slice.status, color),
            items: slice.len(),
            error: slice.error.clone().unwrap_or_default(),
        }
    }
}

/// Show the persisted lifecycle of each collection without fetching.
pub fn handle(controller: &Controller, global: &GlobalOpts) -> Result<(), CliError> {
    let state = controller.snapshot();
    let color = global.output == OutputFormat::Table && output::should_color(global.color);
    let rows = [
        SliceRow::new(Resource::Campsites, &state.campsites, color),
        SliceRow::new(Resource::Comments, &state.comments, color),
        SliceRow::new(Resource::Partners, &state.partners, color),
        SliceRow::new(Resource::Promotions, &state.promotions, color),
    ];

    let out = output::render_list(
        global.output,
        &rows,
        SliceRow::clone,
        |r| format!("{}\t{}\t{}", r.collection, r.status, r.items),
    )?;
    output::print_output(&out, global.quiet);

    if global.output == OutputFormat::Table {
        let saved = match controller.rehydrated() {
            RehydrateOutcome::Restored => "restored",
            RehydrateOutcome::Empty => "none",
            RehydrateOutcome::Discarded => "discarded (unreadable snapshot)",
            RehydrateOutcome::Unavailable => "unavailable (storage error)",
        };
        output::notice(
            &format!("Favorites: {}  Saved state: {saved}", state.favorites.len()),
            global.quiet,
        );
    }
    Ok(())
}
