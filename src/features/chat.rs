use super::{Assistant, Feature, FeatureError, settle};
use crate::ai::{Content, conversation_contents};
use crate::markdown::markdown_to_html;
use crate::prompts::{CHAT_ACKNOWLEDGEMENT, chat_system_prompt};
use crate::session::Session;
use crate::types::ChatMessage;

/// Shown in place of a reply when the request fails. Never added to history.
pub const CHAT_ERROR_REPLY: &str = "I encountered an error. Please try again.";

/// A user turn that has been recorded and is waiting for a reply.
#[derive(Clone, Debug)]
pub struct ChatTurn {
    contents: Vec<Content>,
}

impl ChatTurn {
    /// Records the user's message and snapshots the conversation to send.
    /// Blank messages are ignored and leave the session untouched.
    pub fn begin(session: &mut Session, message: &str) -> Option<Self> {
        let message = message.trim();
        if message.is_empty() {
            return None;
        }
        session.chat_history.push(ChatMessage::user(message));

        let system_prompt = chat_system_prompt(&session.document_context);
        Some(Self {
            contents: conversation_contents(
                &system_prompt,
                CHAT_ACKNOWLEDGEMENT,
                &session.chat_history,
            ),
        })
    }

    pub fn contents(&self) -> &[Content] {
        &self.contents
    }

    pub async fn execute(self, assistant: &Assistant) -> Result<ChatReply, FeatureError> {
        let text = assistant
            .gateway
            .chat(self.contents, assistant.chat)
            .await
            .map_err(FeatureError::gateway(Feature::Chat))?;
        Ok(ChatReply { text })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChatReply {
    pub text: String,
}

impl ChatReply {
    pub fn apply(&self, session: &mut Session) {
        session
            .chat_history
            .push(ChatMessage::assistant(self.text.clone()));
    }

    pub fn html(&self) -> String {
        markdown_to_html(&self.text)
    }
}

/// Sends one chat message. `Ok(None)` means the message was blank.
pub async fn run_chat(
    session: &mut Session,
    assistant: &Assistant,
    message: &str,
) -> Result<Option<ChatReply>, FeatureError> {
    let Some(turn) = ChatTurn::begin(session, message) else {
        return Ok(None);
    };
    session.begin(Feature::Chat);
    let result = turn.execute(assistant).await;
    if let Ok(reply) = &result {
        reply.apply(session);
    }
    settle(session, Feature::Chat, result).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;

    #[test]
    fn blank_messages_are_ignored() {
        let mut session = Session::new();
        assert!(ChatTurn::begin(&mut session, "  \n ").is_none());
        assert!(session.chat_history.is_empty());
    }

    #[test]
    fn replays_full_history_behind_the_priming_turns() {
        let mut session = Session::new();
        session.document_context = "Revenue up 12%".to_string();
        session.chat_history.push(ChatMessage::user("first"));
        session.chat_history.push(ChatMessage::assistant("answer"));

        let turn = ChatTurn::begin(&mut session, " second ").unwrap();
        let contents = turn.contents();
        assert_eq!(contents.len(), 5);
        assert!(contents[0].parts[0].as_text().unwrap().contains("Revenue up 12%"));
        assert_eq!(contents[1].parts[0].as_text(), Some(CHAT_ACKNOWLEDGEMENT));
        assert_eq!(contents[4].parts[0].as_text(), Some("second"));
        assert_eq!(session.chat_history.last().map(|m| m.role), Some(Role::User));
    }

    #[test]
    fn reply_is_appended_as_assistant_turn() {
        let mut session = Session::new();
        ChatReply {
            text: "**Done**".to_string(),
        }
        .apply(&mut session);
        assert_eq!(session.chat_history, [ChatMessage::assistant("**Done**")]);
    }
}
