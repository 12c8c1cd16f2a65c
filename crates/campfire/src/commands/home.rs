//! Home screen: the featured campsite, promotion and partner.

use serde::Serialize;
use tabled::Tabled;

use campfire_core::selectors::{self, Highlight};
use campfire_core::{Controller, FetchStatus};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

// ── View model ──────────────────────────────────────────────────────

/// One home card: the featured item or why there is none.
#[derive(Serialize)]
struct Card<'a> {
    kind: &'static str,
    status: FetchStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
}

impl<'a> Card<'a> {
    fn new<T>(
        kind: &'static str,
        highlight: &Highlight<'a, T>,
        fields: impl Fn(&'a T) -> (&'a str, &'a str),
    ) -> Self {
        let (name, description) = highlight.item.map(fields).unzip();
        Self {
            kind,
            status: highlight.status,
            error: highlight.error,
            name,
            description,
        }
    }

    /// What to show in place of the item when there is none.
    fn placeholder(&self) -> String {
        match (self.status, self.error) {
            (FetchStatus::Loading, _) => "Loading…".into(),
            (FetchStatus::Failed, Some(error)) => error.into(),
            _ => "Nothing featured".into(),
        }
    }
}

#[derive(Tabled)]
struct CardRow {
    #[tabled(rename = "")]
    kind: String,
    #[tabled(rename = "Featured")]
    name: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&Card<'_>> for CardRow {
    fn from(card: &Card<'_>) -> Self {
        match card.name {
            Some(name) => Self {
                kind: card.kind.into(),
                name: name.into(),
                description: super::util::truncate(card.description.unwrap_or_default(), 60),
            },
            None => Self {
                kind: card.kind.into(),
                name: card.placeholder(),
                description: String::new(),
            },
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(controller: &Controller, global: &GlobalOpts) -> Result<(), CliError> {
    if !global.offline {
        let report = controller.refresh_all().await;
        tracing::debug!(ok = report.all_ok(), "home refresh complete");
    }

    let state = controller.snapshot();
    let highlights = selectors::home_highlights(&state);
    let cards = [
        Card::new("Campsite", &highlights.campsite, |l| (l.name.as_str(), l.description.as_str())),
        Card::new("Promotion", &highlights.promotion, |p| (p.name.as_str(), p.description.as_str())),
        Card::new("Partner", &highlights.partner, |p| (p.name.as_str(), p.description.as_str())),
    ];

    let out = output::render_list(global.output, &cards, CardRow::from, |c| {
        format!("{}\t{}", c.kind, c.name.map_or_else(|| c.placeholder(), str::to_owned))
    })?;
    output::print_output(&out, global.quiet);
    Ok(())
}
