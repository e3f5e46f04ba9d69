use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tokio::time::{timeout, Duration};
use tracing::{debug, error, info, instrument};

use crate::actors::messages::{AgentMessage, AgentReply, ChatRequest};
use crate::actors::session::ChatSession;
use crate::actors::traits::ChatBackend;
use crate::brain::analysis::{ClassificationInput, Turn};
use crate::brain::analyzer::MessageAnalyzer;
use crate::config::AgentConfig;
use crate::error::AppError;
use crate::mode::{next_transition, Mode};

/// Extra time granted to the actor on top of the backend timeout, so the
/// backend's own timeout error is the one that reaches the caller.
const REPLY_MARGIN: Duration = Duration::from_secs(5);
const CONTROL_TIMEOUT: Duration = Duration::from_secs(5);

/// A handle to the agent actor.
///
/// This is the entry point for chat traffic. The actor owns every session's
/// mode and history and processes messages one at a time, in arrival order.
#[derive(Clone)]
pub struct AgentHandle {
    sender: mpsc::Sender<AgentMessage>,
    reply_timeout: Duration,
}

impl AgentHandle {
    /// Spawns the agent actor on the current tokio runtime and returns a handle.
    ///
    /// # Arguments
    ///
    /// * `backend` - The generation backend used for messages that are not
    ///   swallowed by a mode switch.
    /// * `config` - Agent configuration (history limit, timeouts, user name).
    pub fn new<B: ChatBackend>(backend: Arc<B>, config: AgentConfig) -> Self {
        let (sender, receiver) = mpsc::channel(32);
        let reply_timeout = config.request_timeout() + REPLY_MARGIN;
        let actor = AgentRunner::new(receiver, backend, config);
        tokio::spawn(async move { actor.run().await });
        Self {
            sender,
            reply_timeout,
        }
    }

    /// Processes a user message from a specific session.
    ///
    /// 1. Analyzes the message (intent + visual request).
    /// 2. Runs the mode table against the session's current mode.
    /// 3. Stores the new mode and the user turn.
    /// 4. If the table says to continue, forwards the message to the backend
    ///    in the new mode and stores the reply.
    ///
    /// # Returns
    ///
    /// The transition taken and, unless the agent is waiting for the next
    /// message, the backend's reply.
    #[instrument(skip(self, content))]
    pub async fn process_message(
        &self,
        session_id: String,
        content: String,
    ) -> Result<AgentReply, AppError> {
        let (send, recv) = oneshot::channel();
        let msg = AgentMessage::ProcessUserMessage {
            session_id,
            content,
            responder: send,
        };
        self.sender
            .send(msg)
            .await
            .map_err(|e| AppError::Actor(e.to_string()))?;
        timeout(self.reply_timeout, recv)
            .await?
            .map_err(|e| AppError::Actor(e.to_string()))?
    }

    /// Forces a session into `mode`, as the UI mode selector does.
    #[instrument(skip(self))]
    pub async fn set_mode(&self, session_id: String, mode: Mode) -> Result<Mode, AppError> {
        let (send, recv) = oneshot::channel();
        self.send_control(AgentMessage::SetMode {
            session_id,
            mode,
            responder: send,
        })
        .await?;
        Self::await_control(recv).await
    }

    /// Enables or disables history persistence across mode changes.
    #[instrument(skip(self))]
    pub async fn set_persistent_context(
        &self,
        session_id: String,
        enabled: bool,
    ) -> Result<(), AppError> {
        let (send, recv) = oneshot::channel();
        self.send_control(AgentMessage::SetPersistentContext {
            session_id,
            enabled,
            responder: send,
        })
        .await?;
        Self::await_control(recv).await
    }

    /// Current mode of a session; unknown sessions are in normal mode.
    pub async fn current_mode(&self, session_id: String) -> Result<Mode, AppError> {
        let (send, recv) = oneshot::channel();
        self.send_control(AgentMessage::CurrentMode {
            session_id,
            responder: send,
        })
        .await?;
        Self::await_control(recv).await
    }

    /// Drops the stored history of a session. Its mode is kept.
    #[instrument(skip(self))]
    pub async fn clear_history(&self, session_id: String) -> Result<(), AppError> {
        let (send, recv) = oneshot::channel();
        self.send_control(AgentMessage::ClearHistory {
            session_id,
            responder: send,
        })
        .await?;
        Self::await_control(recv).await
    }

    /// Stops the actor. Later calls on any handle fail with `AppError::Actor`.
    pub async fn shutdown(&self) -> Result<(), AppError> {
        self.send_control(AgentMessage::Shutdown).await
    }

    async fn send_control(&self, msg: AgentMessage) -> Result<(), AppError> {
        self.sender
            .send(msg)
            .await
            .map_err(|e| AppError::Actor(e.to_string()))
    }

    async fn await_control<T>(recv: oneshot::Receiver<T>) -> Result<T, AppError> {
        timeout(CONTROL_TIMEOUT, recv)
            .await?
            .map_err(|e| AppError::Actor(e.to_string()))
    }
}

// --- Actor Runner ---
struct AgentRunner<B>
where
    B: ChatBackend,
{
    receiver: mpsc::Receiver<AgentMessage>,
    backend: Arc<B>,
    analyzer: MessageAnalyzer,
    sessions: HashMap<String, ChatSession>,
    config: AgentConfig,
}

impl<B> AgentRunner<B>
where
    B: ChatBackend,
{
    fn new(receiver: mpsc::Receiver<AgentMessage>, backend: Arc<B>, config: AgentConfig) -> Self {
        Self {
            receiver,
            backend,
            analyzer: MessageAnalyzer::new(),
            sessions: HashMap::new(),
            config,
        }
    }

    async fn run(mut self) {
        info!("Agent started");
        while let Some(msg) = self.receiver.recv().await {
            if matches!(msg, AgentMessage::Shutdown) {
                break;
            }
            self.handle_message(msg).await;
        }
        info!("Agent stopped");
    }

    fn session(&mut self, session_id: &str) -> &mut ChatSession {
        let limit = self.config.history_limit;
        self.sessions
            .entry(session_id.to_string())
            .or_insert_with(|| ChatSession::new(limit))
    }

    async fn handle_message(&mut self, msg: AgentMessage) {
        match msg {
            AgentMessage::ProcessUserMessage {
                session_id,
                content,
                responder,
            } => {
                let result = self.handle_user_message(session_id, content).await;
                if let Err(e) = &result {
                    error!("Error processing user message: {}", e);
                }
                let _ = responder.send(result);
            }
            AgentMessage::SetMode {
                session_id,
                mode,
                responder,
            } => {
                let session = self.session(&session_id);
                session.set_mode(mode);
                info!(session_id = %session_id, mode = %mode, "Mode set manually");
                let _ = responder.send(session.mode());
            }
            AgentMessage::SetPersistentContext {
                session_id,
                enabled,
                responder,
            } => {
                self.session(&session_id).set_persistent_context(enabled);
                let _ = responder.send(());
            }
            AgentMessage::CurrentMode {
                session_id,
                responder,
            } => {
                let mode = self
                    .sessions
                    .get(&session_id)
                    .map(ChatSession::mode)
                    .unwrap_or_default();
                let _ = responder.send(mode);
            }
            AgentMessage::ClearHistory {
                session_id,
                responder,
            } => {
                if let Some(session) = self.sessions.get_mut(&session_id) {
                    session.clear_history();
                }
                let _ = responder.send(());
            }
            AgentMessage::Shutdown => {}
        }
    }

    #[instrument(skip(self, content))]
    async fn handle_user_message(
        &mut self,
        session_id: String,
        content: String,
    ) -> Result<AgentReply, AppError> {
        let content = content.trim().to_string();
        if content.is_empty() {
            return Err(AppError::Validation("Message is empty".to_string()));
        }

        let analyzer = self.analyzer;
        let user_name = self.config.user_name.clone();
        let backend = Arc::clone(&self.backend);
        let session = self.session(&session_id);

        let input = ClassificationInput::new(content.clone(), session.mode())
            .with_history(session.history());
        let analysis = analyzer.analyze(&input);
        let transition = next_transition(session.mode(), &analysis);

        session.apply(&transition);
        let conversation_history = session.history_entries();
        session.push(Turn::user(content.clone()));

        if !transition.continue_processing {
            debug!(mode = %session.mode(), "Waiting for the next message");
            return Ok(AgentReply {
                session_id,
                mode: session.mode(),
                transition,
                response: None,
            });
        }

        let request = ChatRequest {
            message: content,
            mode: session.mode(),
            persistent_context: session.persistent_context(),
            conversation_history,
            user_name,
        };
        let response = backend.generate(request).await?;

        let session = self.session(&session_id);
        session.push(Turn::assistant(response.clone()));

        Ok(AgentReply {
            session_id,
            mode: session.mode(),
            transition,
            response: Some(response),
        })
    }
}
