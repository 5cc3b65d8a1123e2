#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use talentbridge_api::{ApiError, ApiResult, ChatApi};
use talentbridge_chat::{AutoConfirm, ChatRuntime, Confirm};
use talentbridge_core::auth::{User, CHAT_PERMISSION};
use talentbridge_core::chat::{ChatMessage, ChatSession, MessageId};
use talentbridge_core::locale::Locale;
use talentbridge_core::notify::MemorySink;
use tokio::time::{sleep, Duration};

/// In-memory backend with scriptable failures and delays
#[derive(Default)]
pub struct MockChatApi {
    sessions: Mutex<Vec<ChatSession>>,
    histories: Mutex<HashMap<String, Vec<ChatMessage>>>,
    calls: Mutex<Vec<String>>,
    failing_clears: Mutex<HashSet<String>>,
    history_delays: Mutex<HashMap<String, Duration>>,
    list_failures: AtomicUsize,
    send_failures: AtomicUsize,
    create_failures: AtomicUsize,
    next_session: AtomicUsize,
    next_message: AtomicUsize,
}

impl MockChatApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a session whose history is the given USER/ASSISTANT exchange
    pub fn with_session(self, session_id: &str, first_message: Option<&str>) -> Self {
        self.sessions.lock().push(ChatSession::new(
            session_id,
            first_message.map(ToString::to_string),
        ));
        let mut history = Vec::new();
        if let Some(text) = first_message {
            history.push(ChatMessage::user(self.remote_id(), text));
            history.push(ChatMessage::assistant(self.remote_id(), format!("Answer to {}", text)));
        }
        self.histories.lock().insert(session_id.to_string(), history);
        self
    }

    pub fn fail_next_lists(&self, n: usize) {
        self.list_failures.store(n, Ordering::SeqCst);
    }

    pub fn fail_next_sends(&self, n: usize) {
        self.send_failures.store(n, Ordering::SeqCst);
    }

    pub fn fail_next_creates(&self, n: usize) {
        self.create_failures.store(n, Ordering::SeqCst);
    }

    pub fn fail_clear(&self, session_id: &str) {
        self.failing_clears.lock().insert(session_id.to_string());
    }

    pub fn delay_history(&self, session_id: &str, delay: Duration) {
        self.history_delays
            .lock()
            .insert(session_id.to_string(), delay);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub fn count_calls(&self, prefix: &str) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    pub fn session_ids(&self) -> Vec<String> {
        self.sessions
            .lock()
            .iter()
            .map(|s| s.session_id.clone())
            .collect()
    }

    fn record(&self, call: String) {
        self.calls.lock().push(call);
    }

    fn remote_id(&self) -> MessageId {
        MessageId::Remote(self.next_message.fetch_add(1, Ordering::SeqCst) as i64 + 1)
    }

    fn take_failure(counter: &AtomicUsize) -> bool {
        counter
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

#[async_trait]
impl ChatApi for MockChatApi {
    async fn list_sessions(&self) -> ApiResult<Vec<ChatSession>> {
        self.record("list".to_string());
        if Self::take_failure(&self.list_failures) {
            return Err(ApiError::api(503, None));
        }
        Ok(self.sessions.lock().clone())
    }

    async fn create_session(&self) -> ApiResult<String> {
        self.record("create".to_string());
        if Self::take_failure(&self.create_failures) {
            return Err(ApiError::api(500, Some("Quota exceeded".to_string())));
        }
        let n = self.next_session.fetch_add(1, Ordering::SeqCst) + 1;
        let session_id = format!("new-{}", n);
        // Newest sessions are listed first.
        self.sessions
            .lock()
            .insert(0, ChatSession::new(session_id.clone(), None));
        self.histories.lock().insert(session_id.clone(), Vec::new());
        Ok(session_id)
    }

    async fn get_history(&self, session_id: &str) -> ApiResult<Vec<ChatMessage>> {
        self.record(format!("history:{}", session_id));
        let delay = self.history_delays.lock().get(session_id).copied();
        if let Some(delay) = delay {
            sleep(delay).await;
        }
        self.histories
            .lock()
            .get(session_id)
            .cloned()
            .ok_or_else(|| ApiError::api(404, Some("Session not found".to_string())))
    }

    async fn send_message(&self, session_id: &str, question: &str) -> ApiResult<String> {
        self.record(format!("send:{}", session_id));
        if Self::take_failure(&self.send_failures) {
            return Err(ApiError::api(503, None));
        }
        let reply = format!("Reply to: {}", question);
        {
            let mut histories = self.histories.lock();
            let history = histories.entry(session_id.to_string()).or_default();
            history.push(ChatMessage::user(self.remote_id(), question));
            history.push(ChatMessage::assistant(self.remote_id(), reply.clone()));
        }
        for session in self.sessions.lock().iter_mut() {
            if session.session_id == session_id && session.first_message.is_none() {
                session.first_message = Some(question.to_string());
            }
        }
        Ok(reply)
    }

    async fn clear_session(&self, session_id: &str) -> ApiResult<()> {
        self.record(format!("clear:{}", session_id));
        if self.failing_clears.lock().contains(session_id) {
            return Err(ApiError::api(500, None));
        }
        self.sessions.lock().retain(|s| s.session_id != session_id);
        self.histories.lock().remove(session_id);
        Ok(())
    }
}

pub fn recruiter() -> User {
    User::new("hr@talentbridge.vn", vec![CHAT_PERMISSION.to_string()])
}

pub struct Harness {
    pub api: Arc<MockChatApi>,
    pub sink: Arc<MemorySink>,
    pub runtime: ChatRuntime<MockChatApi>,
}

pub fn harness(api: MockChatApi) -> Harness {
    harness_with_confirm(api, Arc::new(AutoConfirm))
}

pub fn harness_with_confirm(api: MockChatApi, confirm: Arc<dyn Confirm>) -> Harness {
    let api = Arc::new(api);
    let sink = Arc::new(MemorySink::new());
    let runtime = ChatRuntime::new(Arc::clone(&api), Locale::En, sink.clone(), confirm);
    Harness { api, sink, runtime }
}
