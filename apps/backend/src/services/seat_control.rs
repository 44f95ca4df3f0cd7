//! Who drives a seat: a human over the transport or a bot policy.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::ai::{BotAction, BotError, BotPolicy};
use crate::domain::player_view::SeatView;
use crate::services::scheduler::ScheduledTask;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Presence {
    /// Human in control.
    Connected,
    /// Transport lost mid-match; the grace timer is running.
    GracePeriod,
    /// Grace expired; a bot plays until the human returns.
    Substituted,
    /// The human left mid-match; a bot plays the seat out.
    Departed,
}

#[derive(Clone)]
pub enum Controller {
    Human { connection: Option<Uuid> },
    Bot { policy: Arc<dyn BotPolicy> },
}

impl fmt::Debug for Controller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Controller::Human { connection } => f.debug_struct("Human").field("connection", connection).finish(),
            Controller::Bot { policy } => f.debug_struct("Bot").field("policy", &policy.name()).finish(),
        }
    }
}

/// What the table should wait for on this seat's turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveRequest {
    AwaitHuman,
    Decided(BotAction),
}

/// Seat capability the table flow relies on; it never branches on occupant kind.
pub trait SeatController {
    fn is_automated(&self) -> bool;

    fn request_move(&self, view: &SeatView) -> Result<MoveRequest, BotError>;
}

impl SeatController for Controller {
    fn is_automated(&self) -> bool {
        matches!(self, Controller::Bot { .. })
    }

    fn request_move(&self, view: &SeatView) -> Result<MoveRequest, BotError> {
        match self {
            Controller::Human { .. } => Ok(MoveRequest::AwaitHuman),
            Controller::Bot { policy } => policy.choose_action(view).map(MoveRequest::Decided),
        }
    }
}

#[derive(Debug)]
pub struct SeatOccupant {
    pub user_id: i64,
    pub display_name: String,
    pub is_ready: bool,
    /// Transport attached right now.
    pub connected: bool,
    pub presence: Presence,
    pub controller: Controller,
    pub grace_timer: Option<ScheduledTask>,
}

impl SeatOccupant {
    pub fn human(user_id: i64, display_name: impl Into<String>) -> Self {
        Self {
            user_id,
            display_name: display_name.into(),
            is_ready: false,
            connected: true,
            presence: Presence::Connected,
            controller: Controller::Human { connection: None },
            grace_timer: None,
        }
    }

    pub fn is_automated(&self) -> bool {
        self.controller.is_automated()
    }

    /// Still belongs to a human, even if a bot is covering for them.
    pub fn is_human_member(&self) -> bool {
        self.presence != Presence::Departed
    }

    pub fn shown_name(&self) -> String {
        if self.is_automated() {
            format!("{} (Bot)", self.display_name)
        } else {
            self.display_name.clone()
        }
    }

    pub fn hand_to_bot(&mut self, policy: Arc<dyn BotPolicy>, presence: Presence) {
        self.controller = Controller::Bot { policy };
        self.presence = presence;
        self.grace_timer = None;
    }

    pub fn restore_human(&mut self, connection: Option<Uuid>) {
        self.controller = Controller::Human { connection };
        self.presence = Presence::Connected;
        self.connected = true;
        self.grace_timer = None;
    }
}
