//! Seat controllers: who answers a decision request for a seat.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, oneshot};
use uuid::Uuid;

use crate::ai::{AiPlayer, PlayDecision};
use crate::domain::{Card, Command, Phase, Seat, SeatView};
use crate::errors::domain::{DomainError, InfraErrorKind, ValidationKind};
use crate::rating::PlayerIdentity;

/// A seat's answer to a `DecisionRequest`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum Decision {
    Bid { accept: bool },
    Double { accept: bool },
    Play { cards: Vec<Card> },
    Pass,
}

impl Decision {
    pub fn into_command(self, seat: Seat) -> Command {
        match self {
            Decision::Bid { accept } => Command::Bid { seat, accept },
            Decision::Double { accept } => Command::Double { seat, accept },
            Decision::Play { cards } => Command::Play { seat, cards },
            Decision::Pass => Command::Pass { seat },
        }
    }
}

impl From<PlayDecision> for Decision {
    fn from(d: PlayDecision) -> Self {
        match d {
            PlayDecision::Play(cards) => Decision::Play { cards },
            PlayDecision::Pass => Decision::Pass,
        }
    }
}

/// Everything a controller needs to answer for one seat.
#[derive(Debug, Clone, Serialize)]
pub struct DecisionRequest {
    pub match_id: Uuid,
    pub view: SeatView,
    /// Zero on the first ask; increments after each rejection.
    pub attempt: u32,
    /// Why the previous submission was rejected.
    pub last_rejection: Option<String>,
}

#[async_trait]
pub trait SeatController: Send + Sync {
    fn identity(&self) -> &PlayerIdentity;

    async fn decide(&self, request: DecisionRequest) -> Result<Decision, DomainError>;
}

/// Seat driven by an in-process `AiPlayer`.
pub struct AiSeat {
    identity: PlayerIdentity,
    player: Box<dyn AiPlayer>,
}

impl AiSeat {
    pub fn new(identity: PlayerIdentity, player: Box<dyn AiPlayer>) -> Self {
        Self { identity, player }
    }
}

#[async_trait]
impl SeatController for AiSeat {
    fn identity(&self) -> &PlayerIdentity {
        &self.identity
    }

    async fn decide(&self, request: DecisionRequest) -> Result<Decision, DomainError> {
        let view = &request.view;
        let decision = match view.phase {
            Phase::Bidding => Decision::Bid {
                accept: self.player.choose_bid(view)?,
            },
            Phase::Doubling => Decision::Double {
                accept: self.player.choose_double(view)?,
            },
            Phase::Playing => self.player.choose_play(view)?.into(),
            Phase::Dealing | Phase::Settled => {
                return Err(DomainError::validation(
                    ValidationKind::PhaseMismatch,
                    format!("No decision in {:?}", view.phase),
                ))
            }
        };
        Ok(decision)
    }
}

/// A pending request plus the channel to answer it on.
#[derive(Debug)]
pub struct SeatPrompt {
    pub request: DecisionRequest,
    pub reply: oneshot::Sender<Decision>,
}

/// Seat answered by an external collaborator (a human UI, a remote agent)
/// that reads prompts from a channel and replies on the enclosed oneshot.
/// The runner's timeout bounds how long it waits.
pub struct ChannelSeat {
    identity: PlayerIdentity,
    prompts: mpsc::Sender<SeatPrompt>,
}

impl ChannelSeat {
    /// Seat plus the receiving end the collaborator consumes.
    pub fn new(identity: PlayerIdentity, capacity: usize) -> (Self, mpsc::Receiver<SeatPrompt>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (
            Self {
                identity,
                prompts: tx,
            },
            rx,
        )
    }
}

fn channel_closed(what: &str) -> DomainError {
    DomainError::infra(
        InfraErrorKind::Other("seat_channel".into()),
        format!("Seat {what} channel closed"),
    )
}

#[async_trait]
impl SeatController for ChannelSeat {
    fn identity(&self) -> &PlayerIdentity {
        &self.identity
    }

    async fn decide(&self, request: DecisionRequest) -> Result<Decision, DomainError> {
        let (reply, answer) = oneshot::channel();
        self.prompts
            .send(SeatPrompt { request, reply })
            .await
            .map_err(|_| channel_closed("prompt"))?;
        answer.await.map_err(|_| channel_closed("reply"))
    }
}
