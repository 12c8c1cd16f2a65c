//! Comment submission.

use campfire_core::{Comment, Controller, NewComment};

use crate::cli::{CommentArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

pub async fn handle(
    controller: &Controller,
    args: CommentArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let CommentArgs {
        campsite_id,
        author,
        rating,
        text,
    } = args;
    let created = controller
        .submit_comment(NewComment::new(campsite_id, author, rating, text))
        .await?;

    let out = output::render_single(
        global.output,
        &created,
        |c: &Comment| {
            format!(
                "Comment {} posted on campsite {}\n{} {}: {}",
                c.id,
                c.campsite_id,
                output::stars(c.rating),
                c.author,
                c.text
            )
        },
        |c| c.id.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
