//! The end-to-end handler for one chat turn.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, info};

use chat_history::{Role, Turn};

use crate::api_types::{ChatReply, ChatTurnRequest};
use crate::error::ChatEngineError;
use crate::ports::{ChatModel, ContextRetriever, TurnStore};
use crate::prompt::{build_prompt, format_history};
use crate::session::{composite_key, resolve_session_id};

/// Object-safe front for the engine, so the HTTP layer can hold a
/// `dyn ChatBackend` and tests can swap in a stub.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn answer(&self, request: ChatTurnRequest) -> Result<ChatReply, ChatEngineError>;
}

/// Services one chat turn end-to-end: resolve session, read history,
/// retrieve context, build the prompt, call the model, persist both turns.
///
/// Holds immutable handles only; no per-request state survives a call, and
/// no per-session lock is taken, so concurrent turns for one session may
/// interleave their reads and writes.
pub struct ChatEngine<R, S, M> {
    retriever: Arc<R>,
    store: Arc<S>,
    model: Arc<M>,
}

impl<R, S, M> ChatEngine<R, S, M>
where
    R: ContextRetriever,
    S: TurnStore,
    M: ChatModel,
{
    pub fn new(retriever: Arc<R>, store: Arc<S>, model: Arc<M>) -> Self {
        Self {
            retriever,
            store,
            model,
        }
    }
}

#[async_trait]
impl<R, S, M> ChatBackend for ChatEngine<R, S, M>
where
    R: ContextRetriever,
    S: TurnStore,
    M: ChatModel,
{
    async fn answer(&self, request: ChatTurnRequest) -> Result<ChatReply, ChatEngineError> {
        let session_id = resolve_session_id(request.session_id.as_deref());
        let session_key = composite_key(&request.user_id, &session_id);

        let prior = self.store.list(&session_key).await?;
        let history = format_history(&prior, &request.message);

        let chunks = self.retriever.retrieve(&request.message).await?;
        debug!(
            target: "chat_engine::engine",
            session_key = %session_key,
            prior_turns = prior.len(),
            context_chunks = chunks.len(),
            "chat turn assembled"
        );

        let prompt = build_prompt(&chunks, &history);
        let response = self.model.generate(&prompt).await?;

        // Write-after-generate is not transactional: once the model has
        // answered, a failed append is logged and the reply still goes out.
        let user_turn = Turn::now(Role::User, request.message.clone());
        let assistant_turn = Turn::now(Role::Assistant, response.clone());
        for turn in [&user_turn, &assistant_turn] {
            if let Err(e) = self.store.append(&session_key, turn).await {
                error!(
                    target: "chat_engine::engine",
                    session_key = %session_key,
                    role = ?turn.role,
                    error = %e,
                    "failed to persist turn after successful completion"
                );
            }
        }

        info!(
            target: "chat_engine::engine",
            session_key = %session_key,
            reply_len = response.len(),
            "chat turn completed"
        );

        Ok(ChatReply {
            response,
            session_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use uuid::Uuid;

    /// Retriever returning a fixed chunk list.
    struct StaticRetriever(Vec<String>);

    #[async_trait]
    impl ContextRetriever for StaticRetriever {
        async fn retrieve(&self, _query: &str) -> Result<Vec<String>, ChatEngineError> {
            Ok(self.0.clone())
        }
    }

    /// In-memory store recording appends; optionally preloaded, optionally
    /// failing every write.
    struct MemoryStore {
        preloaded: Vec<Turn>,
        appended: Mutex<Vec<(String, Turn)>>,
        fail_appends: bool,
    }

    impl MemoryStore {
        fn new(preloaded: Vec<Turn>) -> Self {
            Self {
                preloaded,
                appended: Mutex::new(Vec::new()),
                fail_appends: false,
            }
        }

        fn failing() -> Self {
            Self {
                preloaded: Vec::new(),
                appended: Mutex::new(Vec::new()),
                fail_appends: true,
            }
        }
    }

    #[async_trait]
    impl TurnStore for MemoryStore {
        async fn append(&self, session_key: &str, turn: &Turn) -> Result<(), ChatEngineError> {
            if self.fail_appends {
                return Err(ChatEngineError::History(
                    chat_history::errors::HistoryError::Ping("write refused".into()),
                ));
            }
            self.appended
                .lock()
                .unwrap()
                .push((session_key.to_string(), turn.clone()));
            Ok(())
        }

        async fn list(&self, _session_key: &str) -> Result<Vec<Turn>, ChatEngineError> {
            Ok(self.preloaded.clone())
        }
    }

    /// Model capturing the prompt it was given and returning a canned reply.
    struct CapturingModel {
        seen: Mutex<Vec<String>>,
        reply: String,
    }

    impl CapturingModel {
        fn new(reply: &str) -> Self {
            Self {
                seen: Mutex::new(Vec::new()),
                reply: reply.to_string(),
            }
        }

        fn last_prompt(&self) -> String {
            self.seen.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl ChatModel for CapturingModel {
        async fn generate(&self, prompt: &str) -> Result<String, ChatEngineError> {
            self.seen.lock().unwrap().push(prompt.to_string());
            Ok(self.reply.clone())
        }
    }

    fn engine(
        chunks: Vec<String>,
        store: MemoryStore,
        model: CapturingModel,
    ) -> (
        ChatEngine<StaticRetriever, MemoryStore, CapturingModel>,
        Arc<MemoryStore>,
        Arc<CapturingModel>,
    ) {
        let store = Arc::new(store);
        let model = Arc::new(model);
        let eng = ChatEngine::new(
            Arc::new(StaticRetriever(chunks)),
            Arc::clone(&store),
            Arc::clone(&model),
        );
        (eng, store, model)
    }

    fn request(user: &str, session: Option<&str>, message: &str) -> ChatTurnRequest {
        ChatTurnRequest {
            user_id: user.to_string(),
            session_id: session.map(str::to_string),
            message: message.to_string(),
        }
    }

    #[tokio::test]
    async fn fresh_session_ids_are_distinct_uuids() {
        let (eng, _, _) = engine(vec![], MemoryStore::new(vec![]), CapturingModel::new("ok"));
        let a = eng.answer(request("u1", None, "hi")).await.unwrap();
        let b = eng.answer(request("u1", None, "hi")).await.unwrap();
        assert!(Uuid::parse_str(&a.session_id).is_ok());
        assert_ne!(a.session_id, b.session_id);
    }

    #[tokio::test]
    async fn supplied_session_id_is_echoed_verbatim() {
        let (eng, _, _) = engine(vec![], MemoryStore::new(vec![]), CapturingModel::new("ok"));
        let reply = eng
            .answer(request("u1", Some("sess-42"), "hi"))
            .await
            .unwrap();
        assert_eq!(reply.session_id, "sess-42");
    }

    #[tokio::test]
    async fn turns_are_persisted_user_first_under_composite_key() {
        let (eng, store, _) = engine(
            vec![],
            MemoryStore::new(vec![]),
            CapturingModel::new("rooftop bar"),
        );
        eng.answer(request("u1", Some("s1"), "good view?"))
            .await
            .unwrap();

        let appended = store.appended.lock().unwrap();
        assert_eq!(appended.len(), 2);
        assert_eq!(appended[0].0, "u1_s1");
        assert_eq!(appended[0].1.role, Role::User);
        assert_eq!(appended[0].1.text, "good view?");
        assert_eq!(appended[1].1.role, Role::Assistant);
        assert_eq!(appended[1].1.text, "rooftop bar");
    }

    #[tokio::test]
    async fn prior_turns_appear_in_prompt_in_original_order() {
        let prior = vec![
            Turn::now(Role::User, "Where can I find a good view?"),
            Turn::now(Role::Assistant, "Try the rooftop bar."),
        ];
        let (eng, _, model) = engine(vec![], MemoryStore::new(prior), CapturingModel::new("ok"));
        eng.answer(request("u1", Some("s1"), "And food nearby?"))
            .await
            .unwrap();

        let prompt = model.last_prompt();
        let view = prompt.find("User: Where can I find a good view?").unwrap();
        let bar = prompt.find("AI: Try the rooftop bar.").unwrap();
        let food = prompt.find("User: And food nearby?").unwrap();
        assert!(view < bar && bar < food);
    }

    #[tokio::test]
    async fn retrieved_chunks_select_the_context_template() {
        let chunks = vec!["pool opens 7am".to_string(), "spa opens 9am".to_string()];
        let (eng, _, model) = engine(chunks, MemoryStore::new(vec![]), CapturingModel::new("ok"));
        eng.answer(request("u1", Some("s1"), "pool hours?"))
            .await
            .unwrap();

        let prompt = model.last_prompt();
        assert!(prompt.contains("Context: pool opens 7am spa opens 9am"));
    }

    #[tokio::test]
    async fn zero_chunks_select_the_history_only_template() {
        let (eng, _, model) = engine(vec![], MemoryStore::new(vec![]), CapturingModel::new("ok"));
        eng.answer(request("u1", Some("s1"), "hello"))
            .await
            .unwrap();

        let prompt = model.last_prompt();
        assert!(!prompt.contains("Context:"));
        assert!(prompt.starts_with("Based on the following chat history"));
    }

    #[tokio::test]
    async fn failed_persistence_still_returns_the_reply() {
        let (eng, _, _) = engine(
            vec![],
            MemoryStore::failing(),
            CapturingModel::new("still here"),
        );
        let reply = eng.answer(request("u1", Some("s1"), "hi")).await.unwrap();
        assert_eq!(reply.response, "still here");
        assert_eq!(reply.session_id, "s1");
    }
}
