use tracing::{debug, info};

use super::TableFlowService;
use crate::ai::BotAction;
use crate::domain::claims::{claim_pair_win, claim_win};
use crate::domain::hand_analysis::SearchBudget;
use crate::domain::scoring::RoundWin;
use crate::domain::state::{hand, Seat};
use crate::domain::tiles_logic::hand_summary;
use crate::domain::tiles_types::Tile;
use crate::domain::turns::{discard, draw_from_deck, draw_from_discard, DeckDraw, DiscardResult};
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};
use crate::services::tables::Table;

/// What a seat action changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum ActionResult {
    Drew(DeckDraw),
    TookDiscard(Tile),
    Discarded(DiscardResult),
    Won(Box<RoundWin>),
}

/// Apply one turn step for `seat`, whoever controls it.
pub(super) fn apply_seat_action(
    table: &mut Table,
    seat: Seat,
    action: BotAction,
    budget: SearchBudget,
) -> Result<ActionResult, DomainError> {
    let game = &mut table.game;
    let result = match action {
        BotAction::DrawFromDeck => draw_from_deck(game, seat).map(ActionResult::Drew),
        BotAction::DrawFromDiscard => draw_from_discard(game, seat).map(ActionResult::TookDiscard),
        BotAction::Discard(tile) => discard(game, seat, tile).map(ActionResult::Discarded),
        BotAction::ClaimWin => claim_win(game, seat, budget).map(|w| ActionResult::Won(Box::new(w))),
        BotAction::ClaimPairWin => claim_pair_win(game, seat).map(|w| ActionResult::Won(Box::new(w))),
    }?;

    if let ActionResult::Won(win) = &result {
        info!(
            table_id = table.id,
            round_no = win.round_no,
            winner = win.winner,
            kind = ?win.kind,
            penalty = win.penalty,
            match_over = win.match_over,
            "round won"
        );
    } else if let ActionResult::Drew(DeckDraw::Exhausted) = result {
        info!(table_id = table.id, round_no = table.game.round_no, "deck exhausted, round drawn");
    }
    Ok(result)
}

/// Seat of a human acting for themselves.
fn acting_seat(table: &Table, user_id: i64) -> Result<Seat, DomainError> {
    let seat = table.require_seat(user_id)?;
    if table.occupant(seat).is_some_and(|o| o.is_automated()) {
        return Err(DomainError::conflict(
            ConflictKind::Other("SEAT_AUTOMATED".into()),
            format!("seat {seat} is under bot control; reconnect to resume"),
        ));
    }
    Ok(seat)
}

fn unexpected(result: ActionResult) -> AppError {
    AppError::internal(format!("unexpected action result {result:?}"))
}

impl TableFlowService {
    async fn run_player_action(
        &self,
        table_id: i64,
        user_id: i64,
        action: BotAction,
    ) -> Result<ActionResult, AppError> {
        let budget = self.config.search_budget;
        self.run_mutation(table_id, |table| {
            let seat = acting_seat(table, user_id)?;
            debug!(table_id, user_id, seat, ?action, "player action");
            let result = apply_seat_action(table, seat, action, budget)?;
            if let Ok(tiles) = hand(&table.game, seat) {
                debug!(table_id, seat, summary = ?hand_summary(tiles, table.game.wildcard), "hand after action");
            }
            Ok(result)
        })
        .await
    }

    /// Draw the top deck tile.
    ///
    /// An empty deck ends the round with no winner; that change is published
    /// and the caller still receives a `DECK_EMPTY` rejection.
    pub async fn draw_from_deck(&self, table_id: i64, user_id: i64) -> Result<Tile, AppError> {
        match self.run_player_action(table_id, user_id, BotAction::DrawFromDeck).await? {
            ActionResult::Drew(DeckDraw::Drew(tile)) => Ok(tile),
            ActionResult::Drew(DeckDraw::Exhausted) => Err(DomainError::validation(
                ValidationKind::DeckEmpty,
                "the deck is empty; the round ended without a winner",
            )
            .into()),
            other => Err(unexpected(other)),
        }
    }

    pub async fn draw_from_discard(&self, table_id: i64, user_id: i64) -> Result<Tile, AppError> {
        match self.run_player_action(table_id, user_id, BotAction::DrawFromDiscard).await? {
            ActionResult::TookDiscard(tile) => Ok(tile),
            other => Err(unexpected(other)),
        }
    }

    pub async fn discard(&self, table_id: i64, user_id: i64, tile: Tile) -> Result<DiscardResult, AppError> {
        match self.run_player_action(table_id, user_id, BotAction::Discard(tile)).await? {
            ActionResult::Discarded(result) => Ok(result),
            other => Err(unexpected(other)),
        }
    }

    pub async fn claim_win(&self, table_id: i64, user_id: i64) -> Result<RoundWin, AppError> {
        match self.run_player_action(table_id, user_id, BotAction::ClaimWin).await? {
            ActionResult::Won(win) => Ok(*win),
            other => Err(unexpected(other)),
        }
    }

    pub async fn claim_pair_win(&self, table_id: i64, user_id: i64) -> Result<RoundWin, AppError> {
        match self.run_player_action(table_id, user_id, BotAction::ClaimPairWin).await? {
            ActionResult::Won(win) => Ok(*win),
            other => Err(unexpected(other)),
        }
    }
}
