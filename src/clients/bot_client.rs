use tokio::sync::{mpsc, watch};
use tracing::{debug, instrument};
use crate::actors::BotSnapshot;
use crate::domain::ChatTurn;
use crate::error::BotError;
use crate::messages::BotRequest;

/// Client for a running bot preview.
#[derive(Clone)]
pub struct BotClient {
    sender: mpsc::Sender<BotRequest>,
    updates: watch::Receiver<BotSnapshot>,
}

impl BotClient {
    pub fn new(sender: mpsc::Sender<BotRequest>, updates: watch::Receiver<BotSnapshot>) -> Self {
        Self { sender, updates }
    }

    /// A receiver that sees every published transcript change.
    pub fn subscribe(&self) -> watch::Receiver<BotSnapshot> {
        self.updates.clone()
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), BotError> {
        debug!("Sending shutdown request");
        self.sender
            .send(BotRequest::Shutdown)
            .await
            .map_err(|e| BotError::ActorCommunicationError(e.to_string()))
    }
}

client_method!(BotClient => fn press(label: String) -> () as BotRequest::Press, Error = BotError);
client_method!(BotClient => fn transcript() -> Vec<ChatTurn> as BotRequest::GetTranscript, Error = BotError);
