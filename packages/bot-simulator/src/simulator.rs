//! In-memory match simulator for comparing bot policies.
//!
//! Matches run straight against the domain functions with no table service,
//! no timers and no event hub, so thousands of rounds finish in seconds.

use okey_backend::ai::{create_bot, fallback_bot, BotAction, BotPolicy};
use okey_backend::domain::claims::{claim_pair_win, claim_win};
use okey_backend::domain::round::{start_match, start_next_round};
use okey_backend::domain::turns::{discard, draw_from_deck, draw_from_discard, DeckDraw};
use okey_backend::domain::{
    derive_bot_seed, derive_dealing_seed, GameState, Phase, RoundOutcome, SearchBudget, Seat,
    SeatView, WinKind,
};
use okey_backend::errors::domain::DomainError;
use serde::Serialize;
use tracing::{debug, warn};

const PLAYERS: usize = 4;

/// Turns after which a round is treated as stuck. A real round cannot get
/// near this: every deck draw shrinks the deck.
const MAX_TURNS_PER_ROUND: u32 = 2_000;

/// How one round ended.
#[derive(Debug, Clone, Serialize)]
pub struct RoundRecord {
    pub round_no: u32,
    pub winner: Option<Seat>,
    pub kind: Option<WinKind>,
    /// Completed discards before the round ended.
    pub turns: u32,
    pub scores: [i16; PLAYERS],
}

/// Result of simulating one match.
#[derive(Debug, Clone, Serialize)]
pub struct MatchResult {
    pub match_no: u32,
    pub match_seed: u64,
    pub policies: [String; PLAYERS],
    pub final_scores: [i16; PLAYERS],
    /// First seat to run out of points; `None` when the round cap stopped the match.
    pub loser: Option<Seat>,
    pub rounds: Vec<RoundRecord>,
    /// Times a seat fell back to the default policy after an error or a rejected move.
    pub fallbacks: u32,
}

/// Drives one match at a time.
pub struct Simulator {
    state: GameState,
    match_seed: u64,
    budget: SearchBudget,
    fallback: Box<dyn BotPolicy>,
    fallbacks: u32,
}

impl Simulator {
    pub fn new(match_seed: u64, starting_points: i16) -> Self {
        let mut state = GameState::new(starting_points);
        state.phase = Phase::Ready;
        Self {
            state,
            match_seed,
            budget: SearchBudget::default(),
            fallback: fallback_bot(),
            fallbacks: 0,
        }
    }

    /// Build one policy per seat, each seeded from the match seed.
    pub fn seat_policies(
        &self,
        names: &[String; PLAYERS],
    ) -> Result<[Box<dyn BotPolicy>; PLAYERS], SimulatorError> {
        let make = |seat: usize| {
            create_bot(&names[seat], Some(derive_bot_seed(self.match_seed, seat as u8)))
                .map_err(|e| SimulatorError::UnknownPolicy(format!("{}: {e}", names[seat])))
        };
        Ok([make(0)?, make(1)?, make(2)?, make(3)?])
    }

    /// Play rounds until a seat runs out of points or `max_rounds` have been dealt.
    pub fn simulate_match(
        mut self,
        match_no: u32,
        policies: &[Box<dyn BotPolicy>; PLAYERS],
        max_rounds: u32,
    ) -> Result<MatchResult, SimulatorError> {
        let starting_points = self.state.starting_points;
        start_match(
            &mut self.state,
            starting_points,
            derive_dealing_seed(self.match_seed, 1),
        )?;

        let mut rounds = Vec::new();
        loop {
            rounds.push(self.play_round(policies)?);
            if self.state.phase == Phase::MatchOver || self.state.round_no >= max_rounds {
                break;
            }
            let next = self.state.round_no + 1;
            start_next_round(&mut self.state, derive_dealing_seed(self.match_seed, next))?;
        }

        let loser = match &self.state.last_outcome {
            Some(RoundOutcome::Won(win)) => win.loser,
            _ => None,
        };
        Ok(MatchResult {
            match_no,
            match_seed: self.match_seed,
            policies: std::array::from_fn(|i| policies[i].name().to_string()),
            final_scores: self.state.scores,
            loser,
            rounds,
            fallbacks: self.fallbacks,
        })
    }

    fn play_round(
        &mut self,
        policies: &[Box<dyn BotPolicy>; PLAYERS],
    ) -> Result<RoundRecord, SimulatorError> {
        while self.state.phase == Phase::Dealt {
            if self.state.turns_taken >= MAX_TURNS_PER_ROUND {
                return Err(SimulatorError::Stalled(self.state.round_no));
            }
            let seat = self
                .state
                .turn
                .ok_or_else(|| SimulatorError::InvalidState("no seat to act in a dealt round".into()))?;
            self.play_step(seat, policies[seat as usize].as_ref())?;
        }

        let (winner, kind) = match &self.state.last_outcome {
            Some(RoundOutcome::Won(win)) => (Some(win.winner), Some(win.kind)),
            Some(RoundOutcome::Exhausted { .. }) => (None, None),
            None => {
                return Err(SimulatorError::InvalidState(
                    "round ended without an outcome".into(),
                ))
            }
        };
        Ok(RoundRecord {
            round_no: self.state.round_no,
            winner,
            kind,
            turns: self.state.turns_taken,
            scores: self.state.scores,
        })
    }

    /// One action for `seat`. A failing policy or a rejected move hands the
    /// step to the fallback policy, the same way a live table does.
    fn play_step(&mut self, seat: Seat, policy: &dyn BotPolicy) -> Result<(), SimulatorError> {
        let view = SeatView::for_turn(&self.state, seat, self.budget)?;
        let chosen = match policy.choose_action(&view) {
            Ok(action) => self.apply(seat, action).map_err(|e| (policy.name(), e.to_string())),
            Err(e) => Err((policy.name(), e.to_string())),
        };
        let Err((name, reason)) = chosen else {
            return Ok(());
        };

        self.fallbacks += 1;
        warn!(seat, policy = name, %reason, "policy move failed, using fallback");
        let action = self
            .fallback
            .choose_action(&view)
            .map_err(|e| SimulatorError::Policy(seat, e.to_string()))?;
        self.apply(seat, action)?;
        Ok(())
    }

    fn apply(&mut self, seat: Seat, action: BotAction) -> Result<(), DomainError> {
        debug!(seat, ?action, "applying");
        match action {
            BotAction::DrawFromDeck => {
                if draw_from_deck(&mut self.state, seat)? == DeckDraw::Exhausted {
                    debug!(round_no = self.state.round_no, "deck exhausted");
                }
            }
            BotAction::DrawFromDiscard => {
                draw_from_discard(&mut self.state, seat)?;
            }
            BotAction::Discard(tile) => {
                discard(&mut self.state, seat, tile)?;
            }
            BotAction::ClaimWin => {
                claim_win(&mut self.state, seat, self.budget)?;
            }
            BotAction::ClaimPairWin => {
                claim_pair_win(&mut self.state, seat)?;
            }
        }
        Ok(())
    }
}

#[derive(Debug)]
pub enum SimulatorError {
    /// A policy name the registry does not know.
    UnknownPolicy(String),
    /// Even the fallback policy could not move.
    Policy(Seat, String),
    /// Domain logic error
    Domain(DomainError),
    /// A round ran past the turn cap.
    Stalled(u32),
    InvalidState(String),
}

impl std::fmt::Display for SimulatorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimulatorError::UnknownPolicy(msg) => write!(f, "Unknown policy: {msg}"),
            SimulatorError::Policy(seat, msg) => write!(f, "Policy error (seat {seat}): {msg}"),
            SimulatorError::Domain(err) => write!(f, "Domain error: {err}"),
            SimulatorError::Stalled(round) => write!(f, "Round {round} exceeded the turn cap"),
            SimulatorError::InvalidState(msg) => write!(f, "Invalid state: {msg}"),
        }
    }
}

impl std::error::Error for SimulatorError {}

impl From<DomainError> for SimulatorError {
    fn from(err: DomainError) -> Self {
        SimulatorError::Domain(err)
    }
}
