use crate::error::{Result, TimeError};
use crate::mcp::dto::McpResponse;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::mpsc::{self, error::TrySendError};
use uuid::Uuid;

/// One open SSE connection: its id and the channel feeding its stream.
#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    outbound: mpsc::Sender<McpResponse>,
}

impl Session {
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Queues a message for the stream without waiting. A full buffer means
    /// the client stopped reading; the caller decides what to tell the poster.
    pub fn send(&self, message: McpResponse) -> Result<()> {
        self.outbound.try_send(message).map_err(|e| match e {
            TrySendError::Full(_) => TimeError::SessionBacklogged(self.id.to_string()),
            TrySendError::Closed(_) => TimeError::SessionClosed(self.id.to_string()),
        })
    }
}

#[derive(Debug)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<Uuid, Session>>,
    buffer: usize,
}

impl SessionRegistry {
    pub fn new(buffer: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            buffer: buffer.max(1),
        }
    }

    /// Registers a new session and hands back the receiving end of its
    /// outbound channel.
    pub fn open(&self) -> (Session, mpsc::Receiver<McpResponse>) {
        let (outbound, inbox) = mpsc::channel(self.buffer);
        let session = Session {
            id: Uuid::new_v4(),
            outbound,
        };
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(session.id, session.clone());
        (session, inbox)
    }

    pub fn get(&self, id: &Uuid) -> Option<Session> {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    pub fn close(&self, id: &Uuid) -> bool {
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id)
            .is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new(32)
    }
}

/// Removes its session from the registry when dropped, i.e. when the SSE
/// stream owning it goes away.
pub struct SessionGuard {
    registry: Arc<SessionRegistry>,
    id: Uuid,
}

impl SessionGuard {
    pub fn new(registry: Arc<SessionRegistry>, id: Uuid) -> Self {
        Self { registry, id }
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        if self.registry.close(&self.id) {
            tracing::info!("SSE session {} closed", self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn messages_reach_their_own_session() {
        let registry = SessionRegistry::new(4);
        let (first, mut first_inbox) = registry.open();
        let (second, mut second_inbox) = registry.open();
        assert_ne!(first.id(), second.id());
        assert_eq!(registry.len(), 2);

        let session = registry.get(&second.id()).unwrap();
        session
            .send(McpResponse::success(Some(json!(7)), json!({})))
            .unwrap();

        let delivered = second_inbox.recv().await.unwrap();
        assert_eq!(delivered.id, Some(json!(7)));
        assert!(first_inbox.try_recv().is_err());
    }

    #[test]
    fn guard_closes_session_on_drop() {
        let registry = Arc::new(SessionRegistry::default());
        let (session, _inbox) = registry.open();
        let guard = SessionGuard::new(Arc::clone(&registry), session.id());
        assert!(registry.get(&session.id()).is_some());
        drop(guard);
        assert!(registry.get(&session.id()).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn send_fails_once_stream_is_gone() {
        let registry = SessionRegistry::default();
        let (session, inbox) = registry.open();
        drop(inbox);
        assert!(matches!(
            session.send(McpResponse::success(Some(json!(1)), json!({}))),
            Err(TimeError::SessionClosed(_))
        ));
    }

    #[test]
    fn send_does_not_wait_on_a_stalled_stream() {
        let registry = SessionRegistry::new(1);
        let (session, mut inbox) = registry.open();
        session
            .send(McpResponse::success(Some(json!(1)), json!({})))
            .unwrap();
        assert!(matches!(
            session.send(McpResponse::success(Some(json!(2)), json!({}))),
            Err(TimeError::SessionBacklogged(_))
        ));

        // Draining frees the slot again.
        assert_eq!(inbox.try_recv().unwrap().id, Some(json!(1)));
        assert!(session
            .send(McpResponse::success(Some(json!(3)), json!({})))
            .is_ok());
    }
}
