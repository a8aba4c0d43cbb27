use std::collections::VecDeque;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info, instrument, warn};
use crate::bot_preview::{canned_reply, Transcript};
use crate::clients::BotClient;
use crate::domain::{clock_now, ChatTurn};
use crate::error::BotError;
use crate::messages::{BotRequest, ServiceResponse};

/// What subscribers see after every transcript change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BotSnapshot {
    pub turns: Vec<ChatTurn>,
    /// Script exhausted and no canned reply pending.
    pub idle: bool,
}

// =============================================================================
// BOT PREVIEW SERVICE
// =============================================================================

/// Replays the fixed script on a timer and answers button presses with a
/// delayed canned reply. All timers live in one `select!` loop, so nothing
/// survives the actor.
pub struct BotPreviewService {
    receiver: mpsc::Receiver<BotRequest>,
    transcript: Transcript,
    step_delay: Duration,
    reply_delay: Duration,
    next_step_at: Option<Instant>,
    pending_replies: VecDeque<(Instant, String)>,
    publisher: watch::Sender<BotSnapshot>,
}

impl BotPreviewService {
    pub fn new(
        buffer_size: usize,
        script: Vec<ChatTurn>,
        step_delay: Duration,
        reply_delay: Duration,
    ) -> (Self, BotClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let transcript = Transcript::new(script);
        let next_step_at = (!transcript.script_exhausted()).then(|| Instant::now() + step_delay);
        let (publisher, updates) = watch::channel(BotSnapshot::default());

        let service = Self {
            receiver,
            transcript,
            step_delay,
            reply_delay,
            next_step_at,
            pending_replies: VecDeque::new(),
            publisher,
        };
        service.publish();
        let client = BotClient::new(sender, updates);
        (service, client)
    }

    #[instrument(name = "bot_preview", skip(self))]
    pub async fn run(mut self) {
        info!("BotPreviewService starting");
        loop {
            let deadline = self.next_deadline();
            let timer = async move {
                match deadline {
                    Some(at) => sleep_until(at).await,
                    None => std::future::pending().await,
                }
            };

            tokio::select! {
                msg = self.receiver.recv() => match msg {
                    Some(BotRequest::Press { label, respond_to }) => {
                        self.handle_press(label, respond_to);
                    }
                    Some(BotRequest::GetTranscript { respond_to }) => {
                        let _ = respond_to.send(Ok(self.transcript.turns().to_vec()));
                    }
                    Some(BotRequest::Shutdown) | None => {
                        info!("BotPreviewService shutting down");
                        break;
                    }
                },
                _ = timer => self.fire_due(Instant::now()),
            }
        }
        info!(turns = self.transcript.turns().len(), "BotPreviewService stopped");
    }

    fn next_deadline(&self) -> Option<Instant> {
        let reply = self.pending_replies.front().map(|(at, _)| *at);
        match (self.next_step_at, reply) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    fn fire_due(&mut self, now: Instant) {
        let mut changed = false;

        if let Some(at) = self.next_step_at.filter(|at| *at <= now) {
            changed |= self.transcript.advance_script();
            self.next_step_at = (!self.transcript.script_exhausted()).then(|| at + self.step_delay);
            debug!(turns = self.transcript.turns().len(), "Script advanced");
        }

        while let Some((at, _)) = self.pending_replies.front() {
            if *at > now {
                break;
            }
            if let Some((_, label)) = self.pending_replies.pop_front() {
                self.transcript.push_bot(canned_reply(&label, clock_now()));
                debug!(%label, "Canned reply delivered");
                changed = true;
            }
        }

        if changed {
            self.publish();
        }
    }

    #[instrument(skip(self, respond_to))]
    fn handle_press(&mut self, label: String, respond_to: ServiceResponse<(), BotError>) {
        match self.transcript.press(&label, clock_now()) {
            Ok(()) => {
                info!("Button pressed");
                self.pending_replies
                    .push_back((Instant::now() + self.reply_delay, label));
                self.publish();
                let _ = respond_to.send(Ok(()));
            }
            Err(e) => {
                warn!(error = %e, "Button press rejected");
                let _ = respond_to.send(Err(e));
            }
        }
    }

    fn publish(&self) {
        let snapshot = BotSnapshot {
            turns: self.transcript.turns().to_vec(),
            idle: self.transcript.script_exhausted() && self.pending_replies.is_empty(),
        };
        self.publisher.send_replace(snapshot);
    }
}
