//! Async room client over an abstract relay transport.

use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use derive_more::{Display, Error};
use tokio::sync::mpsc;
use tracing::{info, instrument, warn};

use super::mirror::{SessionError, SessionMirror};
use super::protocol::{Ack, ClientRequest, ReconnectReply, ServerEvent, StateSnapshot};
use super::room::RoomCode;

/// Failure at the network boundary.
#[derive(Debug, Clone, Display, Error)]
#[display("Transport error: {message}")]
pub struct TransportError {
    message: String,
}

impl TransportError {
    /// Creates a new transport error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<TransportError> for SessionError {
    fn from(e: TransportError) -> Self {
        SessionError::Transport(e.message)
    }
}

/// The network boundary to the relay server.
///
/// Request/response pairs correlate per call; unsolicited broadcasts are
/// delivered separately through the event channel handed to
/// [`RoomClient`]. The relay itself is out of scope; tests drive the
/// client with an in-memory implementation.
#[async_trait]
pub trait RelayTransport: Send + Sync {
    /// Requests creation of a room under the given code.
    async fn create_room(&self, room_code: &RoomCode, name: &str) -> Result<Ack, TransportError>;

    /// Requests joining a waiting room.
    async fn join_room(&self, room_code: &RoomCode, name: &str) -> Result<Ack, TransportError>;

    /// Fetches a full state snapshot, `None` when the room is unknown.
    async fn game_state(&self, room_code: &RoomCode)
        -> Result<Option<StateSnapshot>, TransportError>;

    /// Re-enters a room after a connection loss.
    async fn reconnect_to_room(
        &self,
        room_code: &RoomCode,
    ) -> Result<ReconnectReply, TransportError>;

    /// Fire-and-forget delivery of a request with no ack.
    async fn send(&self, request: ClientRequest) -> Result<(), TransportError>;
}

/// Client for one multiplayer room.
///
/// Owns the session mirror and the broadcast subscription. Dropping the
/// client drops the subscription, so no stale broadcast can race a later
/// session; the transport itself is shared and may be kept alive for
/// reuse.
pub struct RoomClient<T: RelayTransport> {
    transport: Arc<T>,
    mirror: SessionMirror,
    events: mpsc::UnboundedReceiver<ServerEvent>,
}

impl<T: RelayTransport> RoomClient<T> {
    /// Creates a room under a freshly generated code.
    ///
    /// On success the caller holds X and the session waits for an
    /// opponent.
    ///
    /// # Errors
    ///
    /// Surfaces transport failures and relay refusals as
    /// [`SessionError::Transport`].
    #[instrument(skip(transport, events, name))]
    pub async fn create_room(
        transport: Arc<T>,
        events: mpsc::UnboundedReceiver<ServerEvent>,
        name: impl Into<String>,
    ) -> Result<Self, SessionError> {
        let name = name.into();
        let room_code = RoomCode::generate();
        let ack = transport.create_room(&room_code, &name).await?;
        if let Some(error) = ack.error {
            warn!(%room_code, error = %error, "Room creation refused");
            return Err(SessionError::Transport(error));
        }
        info!(%room_code, "Room created; waiting for opponent");
        Ok(Self {
            transport,
            mirror: SessionMirror::for_created_room(room_code, name),
            events,
        })
    }

    /// Joins an existing room under an entered code.
    ///
    /// The code is canonicalized to uppercase, so entry is
    /// case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidRoom`] when the code does not
    /// resolve to a waiting room; no retry is attempted.
    #[instrument(skip(transport, events, code, name))]
    pub async fn join_room(
        transport: Arc<T>,
        events: mpsc::UnboundedReceiver<ServerEvent>,
        code: impl AsRef<str>,
        name: impl Into<String>,
    ) -> Result<Self, SessionError> {
        let name = name.into();
        let room_code = RoomCode::new(code);
        let ack = transport.join_room(&room_code, &name).await?;
        if let Some(error) = ack.error {
            warn!(%room_code, error = %error, "Join refused");
            return Err(SessionError::InvalidRoom);
        }
        info!(%room_code, "Joined room");
        Ok(Self {
            transport,
            mirror: SessionMirror::new(room_code, name),
            events,
        })
    }

    /// Fetches the current snapshot and seeds the mirror from it.
    ///
    /// Called on entering the multiplayer view; a missing room is left
    /// for the `invalidRoom` broadcast to surface.
    #[instrument(skip(self))]
    pub async fn sync_state(&mut self) -> Result<(), SessionError> {
        let room_code = self.mirror.room_code().clone();
        if let Some(snapshot) = self.transport.game_state(&room_code).await? {
            self.mirror.resync(&snapshot);
        }
        Ok(())
    }

    /// Submits a move: optimistic local apply, then notification of the
    /// authority. The authoritative broadcast remains the source of
    /// truth and overwrites the mirror if it disagrees.
    ///
    /// # Errors
    ///
    /// Propagates mirror gate failures; a transport failure disables
    /// input and reports [`SessionError::ConnectionLost`].
    #[instrument(skip(self))]
    pub async fn submit_move(&mut self, cell_index: usize) -> Result<(), SessionError> {
        let requests = self.mirror.submit_move(cell_index)?;
        self.send_all(requests).await
    }

    /// Asks the authority for a fresh board. The mirror only changes
    /// when the `gameReset` broadcast arrives.
    #[instrument(skip(self))]
    pub async fn reset_match(&mut self) -> Result<(), SessionError> {
        let request = ClientRequest::ResetGame {
            room_code: self.mirror.room_code().clone(),
        };
        self.send_all(vec![request]).await
    }

    /// Applies one broadcast to the mirror and sends any reactions
    /// (heartbeat echo, advisory game-over notice).
    #[instrument(skip(self, event))]
    pub async fn handle_event(&mut self, event: ServerEvent) -> Result<(), SessionError> {
        let reactions = self.mirror.apply_event(event);
        self.send_all(reactions).await
    }

    /// Waits for the next broadcast, applies it, and returns it.
    ///
    /// Returns `None` when the subscription has ended; the mirror then
    /// records the link as lost.
    pub async fn process_next(&mut self) -> Result<Option<ServerEvent>, SessionError> {
        let Some(event) = self.events.recv().await else {
            self.mirror.connection_lost();
            return Ok(None);
        };
        self.handle_event(event.clone()).await?;
        Ok(Some(event))
    }

    /// Drives the broadcast loop until the subscription ends, handing
    /// each applied event and the refreshed mirror to the callback.
    pub async fn run<F>(&mut self, mut on_event: F) -> anyhow::Result<()>
    where
        F: FnMut(&ServerEvent, &SessionMirror),
    {
        while let Some(event) = self
            .process_next()
            .await
            .context("processing relay broadcast")?
        {
            on_event(&event, &self.mirror);
        }
        Ok(())
    }

    /// Records a lost link; room code and symbol are retained for the
    /// later reconnect.
    pub fn connection_lost(&mut self) {
        self.mirror.connection_lost();
    }

    /// Re-enters the room after a connection loss and resynchronizes the
    /// mirror from the authoritative snapshot. No local history is
    /// replayed.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::ConnectionLost`] when the transport still
    /// fails, or [`SessionError::InvalidRoom`] when the room is gone.
    #[instrument(skip(self))]
    pub async fn reconnect(&mut self) -> Result<(), SessionError> {
        self.mirror.reconnecting();
        let room_code = self.mirror.room_code().clone();
        let reply = match self.transport.reconnect_to_room(&room_code).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, %room_code, "Reconnect attempt failed");
                self.mirror.connection_lost();
                return Err(SessionError::ConnectionLost);
            }
        };
        match reply.room_state {
            Some(ref snapshot) if reply.success => {
                self.mirror.resync(snapshot);
                info!(%room_code, "Reconnected and resynchronized");
                Ok(())
            }
            _ => {
                warn!(%room_code, "Room no longer available");
                self.mirror.connection_lost();
                Err(SessionError::InvalidRoom)
            }
        }
    }

    /// Read access to the mirror.
    pub fn mirror(&self) -> &SessionMirror {
        &self.mirror
    }

    /// The room this client is attached to.
    pub fn room_code(&self) -> &RoomCode {
        self.mirror.room_code()
    }

    async fn send_all(&mut self, requests: Vec<ClientRequest>) -> Result<(), SessionError> {
        for request in requests {
            if let Err(e) = self.transport.send(request).await {
                warn!(error = %e, "Relay send failed; input disabled until reconnect");
                self.mirror.connection_lost();
                return Err(SessionError::ConnectionLost);
            }
        }
        Ok(())
    }
}
