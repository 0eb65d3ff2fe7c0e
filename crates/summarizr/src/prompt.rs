//! Prompt assembly for the model fallback path.
//!
//! Pure text formatting: an issue and its thread become a single completion
//! prompt. Nothing is truncated or filtered; the whole thread goes to the
//! model.

use crate::{Issue, IssueComment};

/// Separator line between conversation participants.
const TURN_SEPARATOR: &str = "###";

/// Preamble for the conversation-shaped prompt.
const CONVERSATION_PREAMBLE: &str = "Summarize the problem and solution from the following \
conversation in the provided format. Interaction with conversation participants will be \
separated by '###'.\n\nConversation may have a title or a link to a reproduction attempt \
that can be used to understand the context of the conversation.";

/// Preamble for the body-shaped prompt.
const BODY_PREAMBLE: &str = "Summarize the following article. The article may have a title \
or a link to a reproduction attempt that can be used to understand the context. Emphasize \
the problems that can be found in the article.";

/// Builds the conversation prompt: preamble, title, every comment rendered as
/// `@login: body` between separator lines, and the answer scaffold the model
/// is asked to fill in.
pub fn conversation_prompt(issue: &Issue, comments: &[IssueComment]) -> String {
    let turns = comments
        .iter()
        .map(|comment| format!("@{}: {}", comment.author, comment.text()))
        .collect::<Vec<_>>()
        .join(&format!("\n{TURN_SEPARATOR}\n"));

    format!(
        "{CONVERSATION_PREAMBLE}\n\n\
         Title: {title}\n\n\
         {TURN_SEPARATOR}\n{turns}\n{TURN_SEPARATOR}\n\n\
         Problem:\nSolution:",
        title = issue.title,
    )
}

/// Builds the body prompt: preamble, title, and the issue body alone.
pub fn body_prompt(issue: &Issue) -> String {
    format!(
        "{BODY_PREAMBLE}\n\n\
         Title: {title}\n\
         Content: {body}",
        title = issue.title,
        body = issue.body.as_deref().unwrap_or_default(),
    )
}
