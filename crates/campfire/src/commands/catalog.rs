//! Collection listing and campsite detail handlers.

use std::fmt::Write as _;

use serde::Serialize;
use tabled::Tabled;

use campfire_core::{
    Comment, Controller, CoreError, EntityId, Location, Partner, Promotion, selectors,
};

use crate::cli::{CampsitesArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct CampsiteRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Elevation")]
    elevation: String,
    #[tabled(rename = "Featured")]
    featured: String,
    #[tabled(rename = "Favorite")]
    favorite: String,
}

#[derive(Tabled)]
struct PartnerRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Featured")]
    featured: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&Partner> for PartnerRow {
    fn from(p: &Partner) -> Self {
        Self {
            id: p.id.to_string(),
            name: p.name.clone(),
            featured: flag(p.featured),
            description: util::truncate(&p.description, 60),
        }
    }
}

#[derive(Tabled)]
struct PromotionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Cost")]
    cost: String,
    #[tabled(rename = "Featured")]
    featured: String,
}

impl From<&Promotion> for PromotionRow {
    fn from(p: &Promotion) -> Self {
        Self {
            id: p.id.to_string(),
            name: p.name.clone(),
            cost: p.cost.map(|c| format!("${c:.2}")).unwrap_or_default(),
            featured: flag(p.featured),
        }
    }
}

#[derive(Tabled)]
struct CommentRow {
    #[tabled(rename = "Rating")]
    rating: String,
    #[tabled(rename = "Author")]
    author: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Comment")]
    text: String,
}

impl From<&&Comment> for CommentRow {
    fn from(c: &&Comment) -> Self {
        Self {
            rating: output::stars(c.rating),
            author: c.author.clone(),
            date: c.date.clone(),
            text: util::truncate(&c.text, 60),
        }
    }
}

fn flag(on: bool) -> String {
    if on { "yes".into() } else { String::new() }
}

fn comment_line(c: &&Comment) -> String {
    format!("{}\t{}\t{}\t{}", c.rating, c.author, c.date, c.text)
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn campsites(
    controller: &Controller,
    args: &CampsitesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    util::fetch::<Location>(controller, global).await;
    let state = controller.snapshot();
    util::usable(&state.campsites, global)?;

    let sites: Vec<&Location> = if args.favorites {
        selectors::favorite_locations(state.campsites.items(), &state.favorites)
    } else {
        state.campsites.items().iter().collect()
    };

    let out = output::render_list(
        global.output,
        &sites,
        |l| CampsiteRow {
            id: l.id.to_string(),
            name: l.name.clone(),
            elevation: l.elevation.map(|e| format!("{e} ft")).unwrap_or_default(),
            featured: flag(l.featured),
            favorite: if selectors::is_favorite(&state.favorites, l.id) {
                "★".into()
            } else {
                String::new()
            },
        },
        |l| format!("{}\t{}", l.id, l.name),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

/// A campsite with its comments, as rendered by `campsite <id>`.
#[derive(Serialize)]
struct CampsiteDetail<'a> {
    #[serde(flatten)]
    campsite: &'a Location,
    favorite: bool,
    comments: Vec<&'a Comment>,
}

pub async fn campsite(
    controller: &Controller,
    id: EntityId,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    tokio::join!(
        util::fetch::<Location>(controller, global),
        util::fetch::<Comment>(controller, global),
    );
    let state = controller.snapshot();
    util::usable(&state.campsites, global)?;

    let campsite = selectors::location_by_id(state.campsites.items(), id).ok_or_else(|| {
        CoreError::NotFound {
            entity_type: "campsite".into(),
            identifier: id.to_string(),
        }
    })?;
    if let Some(error) = state.comments.error.as_deref().filter(|_| state.comments.is_failed()) {
        output::notice(&format!("Comments unavailable: {error}"), global.quiet);
    }

    let detail = CampsiteDetail {
        campsite,
        favorite: selectors::is_favorite(&state.favorites, id),
        comments: selectors::comments_for(state.comments.items(), id),
    };

    let out = output::render_single(
        global.output,
        &detail,
        render_detail,
        |d| format!("{}\t{}", d.campsite.id, d.campsite.name),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

fn render_detail(detail: &CampsiteDetail<'_>) -> String {
    let site = detail.campsite;
    let mut out = String::new();
    let _ = writeln!(out, "{}{}", site.name, if detail.favorite { " ★" } else { "" });
    if let Some(elevation) = site.elevation {
        let _ = writeln!(out, "Elevation: {elevation} ft");
    }
    if !site.description.is_empty() {
        let _ = writeln!(out, "\n{}", site.description);
    }

    if detail.comments.is_empty() {
        out.push_str("\nNo comments yet.");
    } else {
        let rows: Vec<CommentRow> = detail.comments.iter().map(CommentRow::from).collect();
        let _ = write!(
            out,
            "\n{}",
            tabled::Table::new(rows).with(tabled::settings::Style::rounded())
        );
    }
    out
}

pub async fn comments(
    controller: &Controller,
    campsite_id: EntityId,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    util::fetch::<Comment>(controller, global).await;
    let state = controller.snapshot();
    util::usable(&state.comments, global)?;

    let comments = selectors::comments_for(state.comments.items(), campsite_id);
    let out = output::render_list(global.output, &comments, CommentRow::from, comment_line)?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn partners(controller: &Controller, global: &GlobalOpts) -> Result<(), CliError> {
    util::fetch::<Partner>(controller, global).await;
    let state = controller.snapshot();
    util::usable(&state.partners, global)?;

    let out = output::render_list(
        global.output,
        state.partners.items(),
        PartnerRow::from,
        |p| format!("{}\t{}", p.id, p.name),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn promotions(controller: &Controller, global: &GlobalOpts) -> Result<(), CliError> {
    util::fetch::<Promotion>(controller, global).await;
    let state = controller.snapshot();
    util::usable(&state.promotions, global)?;

    let out = output::render_list(
        global.output,
        state.promotions.items(),
        PromotionRow::from,
        |p| format!("{}\t{}", p.id, p.name),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
