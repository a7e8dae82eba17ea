//! Chat assistant panel (HTMX fragments).
//!
//! Every handler returns the whole panel. Sending a message stores it and
//! sets the typing flag; the rendered panel then polls `/chat/reply` once,
//! which asks the catalog API's assistant, appends its answer and clears the
//! flag. When the API can't answer, a canned reply stands in.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, extract::State};
use livestock_core::stores::{ChatAction, ChatRole, ChatStore};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use super::views::MessageView;
use crate::middleware::{dispatch, load_store, save_store};
use crate::state::AppState;

/// Longest accepted visitor message.
const MAX_MESSAGE_CHARS: usize = 500;

/// Chat panel fragment.
#[derive(Template, WebTemplate)]
#[template(path = "partials/chat_panel.html")]
pub struct ChatPanelTemplate {
    pub is_open: bool,
    pub is_expanded: bool,
    pub is_typing: bool,
    pub messages: Vec<MessageView>,
}

impl From<&ChatStore> for ChatPanelTemplate {
    fn from(chat: &ChatStore) -> Self {
        Self {
            is_open: chat.is_open(),
            is_expanded: chat.is_expanded(),
            is_typing: chat.is_typing(),
            messages: chat.messages().iter().map(MessageView::from).collect(),
        }
    }
}

/// Message form data.
#[derive(Debug, Deserialize)]
pub struct MessageForm {
    #[serde(default)]
    pub message: String,
}

/// Current panel.
#[instrument(skip(session))]
pub async fn panel(session: Session) -> ChatPanelTemplate {
    let chat: ChatStore = load_store(&session).await;
    ChatPanelTemplate::from(&chat)
}

#[instrument(skip(session))]
pub async fn open(session: Session) -> ChatPanelTemplate {
    render(&session, ChatAction::OpenChat).await
}

#[instrument(skip(session))]
pub async fn close(session: Session) -> ChatPanelTemplate {
    render(&session, ChatAction::CloseChat).await
}

#[instrument(skip(session))]
pub async fn toggle(session: Session) -> ChatPanelTemplate {
    render(&session, ChatAction::ToggleChat).await
}

#[instrument(skip(session))]
pub async fn expand(session: Session) -> ChatPanelTemplate {
    render(&session, ChatAction::ToggleExpanded).await
}

/// Reset the transcript to the welcome message.
#[instrument(skip(session))]
pub async fn clear(session: Session) -> ChatPanelTemplate {
    render(&session, ChatAction::ClearMessages).await
}

/// Append a visitor message and start "typing".
///
/// Blank messages leave the transcript untouched.
#[instrument(skip(session, form))]
pub async fn send_message(session: Session, Form(form): Form<MessageForm>) -> ChatPanelTemplate {
    let mut chat: ChatStore = load_store(&session).await;

    let content: String = form.message.trim().chars().take(MAX_MESSAGE_CHARS).collect();
    if content.is_empty() {
        return ChatPanelTemplate::from(&chat);
    }

    chat.open_chat();
    chat.add_message(ChatRole::User, content);
    chat.set_typing(true);
    save_store(&session, &chat).await;

    ChatPanelTemplate::from(&chat)
}

/// Answer the latest visitor message, if one is pending.
#[instrument(skip(state, session))]
pub async fn reply(State(state): State<AppState>, session: Session) -> ChatPanelTemplate {
    let mut chat: ChatStore = load_store(&session).await;

    if chat.is_typing() {
        let question = chat.last_user_message().map(|message| message.content.clone());
        if let Some(question) = question {
            let answer = match state.catalog().send_chat(&question).await {
                Ok(reply) if !reply.response.trim().is_empty() => reply.response,
                Ok(_) => state.assistant().reply(&question).to_owned(),
                Err(e) => {
                    tracing::warn!(error = %e, "Assistant unavailable, using canned reply");
                    state.assistant().reply(&question).to_owned()
                }
            };
            chat.add_message(ChatRole::Assistant, answer);
        }
        chat.set_typing(false);
        save_store(&session, &chat).await;
    }

    ChatPanelTemplate::from(&chat)
}

async fn render(session: &Session, action: ChatAction) -> ChatPanelTemplate {
    let chat = dispatch::<ChatStore>(session, action).await;
    ChatPanelTemplate::from(&chat)
}
