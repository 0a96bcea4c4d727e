use crate::config::GameConfig;
use crate::core::board::{Board, Space};
use crate::core::cards::{ActionCardDeck, CardEffect};
use crate::core::dice::RandomDice;
use crate::core::property::{Property, PropertyGroup, PropertyKind, MAX_HOUSES};
use crate::core::standard::{standard_board, standard_decks};
use crate::domain::model::{
    Choice, DeckId, DiceRoll, GameEvent, JailExit, Player, PlayerId, PropertyId, Query, SavedCard,
};
use crate::domain::ports::{Decider, Dice, EventSink};
use crate::utils::error::{MonopolyError, Result};
use crate::utils::validation::{validate_range, Validate};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Where a turn stands. A turn is resolved once the player has no roll
/// left to make.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    AwaitingRoll,
    Resolved,
}

/// Who a payment goes to.
#[derive(Debug, Clone, Copy)]
enum Creditor {
    Bank,
    Player(PlayerId),
}

/// The state of one game: board, decks, players, whose turn it is, and
/// the ports that connect it to the outside.
pub struct Game<D: Dice, C: Decider, E: EventSink> {
    board: Board,
    decks: Vec<ActionCardDeck>,
    players: Vec<Player>,
    config: GameConfig,
    current: usize,
    phase: TurnPhase,
    doubles_count: u8,
    winner: Option<PlayerId>,
    dice: D,
    decider: C,
    sink: E,
    rng: StdRng,
}

/// A serializable picture of a game between turns. Dice and shuffle
/// state are not captured; a restored game reseeds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub saved_at: DateTime<Utc>,
    pub config: GameConfig,
    pub board: Board,
    pub decks: Vec<ActionCardDeck>,
    pub players: Vec<Player>,
    pub current: usize,
    pub phase: TurnPhase,
    pub doubles_count: u8,
    pub winner: Option<PlayerId>,
}

impl<C: Decider, E: EventSink> Game<RandomDice, C, E> {
    /// A game on the classic board. `seed` fixes both the dice and the
    /// deck shuffles, making the whole game reproducible.
    pub fn standard(
        names: &[String],
        config: GameConfig,
        seed: Option<u64>,
        decider: C,
        sink: E,
    ) -> Result<Self> {
        let dice = match seed {
            Some(seed) => RandomDice::seeded(seed),
            None => RandomDice::new(),
        };
        let board = standard_board(&config);
        let decks = standard_decks();
        Game::new(board, decks, names, config, dice, decider, sink, seed)
    }
}

impl<D: Dice, C: Decider, E: EventSink> Game<D, C, E> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        board: Board,
        mut decks: Vec<ActionCardDeck>,
        names: &[String],
        config: GameConfig,
        dice: D,
        decider: C,
        sink: E,
        shuffle_seed: Option<u64>,
    ) -> Result<Self> {
        config.validate()?;
        board.validate(decks.len())?;
        validate_range("players", names.len(), 2, 8)?;

        let mut rng = match shuffle_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        for deck in &mut decks {
            deck.shuffle(&mut rng);
        }

        let players = names
            .iter()
            .map(|name| Player::new(name.clone(), config.starting_money))
            .collect();

        Ok(Self {
            board,
            decks,
            players,
            config,
            current: 0,
            phase: TurnPhase::AwaitingRoll,
            doubles_count: 0,
            winner: None,
            dice,
            decider,
            sink,
            rng,
        })
    }

    /// Rebuild a game from a snapshot, wiring in fresh ports.
    pub fn restore(snapshot: GameSnapshot, dice: D, decider: C, sink: E) -> Result<Self> {
        snapshot.config.validate()?;
        snapshot.board.validate(snapshot.decks.len())?;
        if snapshot.current >= snapshot.players.len() {
            return Err(MonopolyError::UnknownPlayer(snapshot.current));
        }
        Ok(Self {
            board: snapshot.board,
            decks: snapshot.decks,
            players: snapshot.players,
            config: snapshot.config,
            current: snapshot.current,
            phase: snapshot.phase,
            doubles_count: snapshot.doubles_count,
            winner: snapshot.winner,
            dice,
            decider,
            sink,
            rng: StdRng::from_entropy(),
        })
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            saved_at: Utc::now(),
            config: self.config.clone(),
            board: self.board.clone(),
            decks: self.decks.clone(),
            players: self.players.clone(),
            current: self.current,
            phase: self.phase,
            doubles_count: self.doubles_count,
            winner: self.winner,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Result<&Player> {
        self.players.get(id.0).ok_or(MonopolyError::UnknownPlayer(id.0))
    }

    pub fn current_player(&self) -> PlayerId {
        PlayerId(self.current)
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    pub fn sink(&self) -> &E {
        &self.sink
    }

    pub fn player_worth(&self, id: PlayerId) -> Result<i64> {
        Ok(self.board.player_worth(self.player(id)?))
    }

    pub fn max_possible_expense(&self, id: PlayerId) -> Result<i64> {
        Ok(self.board.max_possible_expense(self.player(id)?))
    }

    /// Play the current player's whole turn: jail handling, rolls
    /// (with extra rolls on doubles), landing resolution, and the
    /// hand-off to the next player.
    pub async fn take_turn(&mut self) -> Result<()> {
        if self.winner.is_some() {
            return Err(MonopolyError::GameOver);
        }
        loop {
            self.roll_and_move().await?;
            if self.phase == TurnPhase::Resolved {
                break;
            }
        }
        if self.winner.is_none() {
            self.end_turn()?;
        }
        Ok(())
    }

    /// One roll of the current player's turn. Doubles leave the turn
    /// unresolved so the player rolls again; the configured run of
    /// consecutive doubles goes to jail instead.
    pub async fn roll_and_move(&mut self) -> Result<()> {
        if self.winner.is_some() {
            return Err(MonopolyError::GameOver);
        }
        if self.phase != TurnPhase::AwaitingRoll {
            return Err(MonopolyError::TurnComplete);
        }
        let id = self.current_player();
        if self.players[id.0].bankrupt {
            return Err(MonopolyError::PlayerBankrupt(id));
        }

        if self.players[id.0].in_jail {
            self.jail_turn(id).await?;
            self.phase = TurnPhase::Resolved;
            return Ok(());
        }

        let roll = self.dice.roll();
        tracing::debug!(
            "{} rolled {} + {}",
            self.players[id.0].name,
            roll.first,
            roll.second
        );

        if roll.is_doubles() {
            self.doubles_count += 1;
            if self.doubles_count >= self.config.doubles_limit {
                tracing::debug!("{} rolled too many doubles", self.players[id.0].name);
                self.send_to_jail(id)?;
                self.phase = TurnPhase::Resolved;
                return Ok(());
            }
        }

        self.move_by_roll(id, roll).await?;

        let player = &self.players[id.0];
        if roll.is_doubles() && !player.in_jail && !player.bankrupt && self.winner.is_none() {
            self.phase = TurnPhase::AwaitingRoll;
        } else {
            self.phase = TurnPhase::Resolved;
        }
        Ok(())
    }

    /// Hand the turn to the next solvent player. Erroring before the
    /// turn is resolved keeps partial turns from being skipped.
    pub fn end_turn(&mut self) -> Result<PlayerId> {
        if self.winner.is_some() {
            return Err(MonopolyError::GameOver);
        }
        if self.phase != TurnPhase::Resolved {
            return Err(MonopolyError::TurnIncomplete);
        }
        self.phase = TurnPhase::AwaitingRoll;
        self.doubles_count = 0;

        let count = self.players.len();
        for step in 1..=count {
            let index = (self.current + step) % count;
            if !self.players[index].bankrupt {
                self.current = index;
                return Ok(PlayerId(index));
            }
        }
        Err(MonopolyError::GameOver)
    }

    // ---- player-initiated estate management ----

    /// Mortgage a deed for its mortgage value. The color group must be
    /// clear of houses first.
    pub fn mortgage(&mut self, id: PlayerId, property: PropertyId) -> Result<i64> {
        self.ensure_active(id)?;
        let owned = self.owned_property(id, property)?;
        if owned.mortgaged {
            return Err(MonopolyError::Mortgaged);
        }
        if self.board.group_has_houses(owned.group) {
            return Err(MonopolyError::HousesInGroup);
        }
        let proceeds = owned.mortgage_value;
        self.board.property_mut(property)?.mortgaged = true;
        self.credit(id, proceeds);
        self.emit(GameEvent::Mortgaged {
            player: id,
            property,
            proceeds,
        });
        Ok(proceeds)
    }

    /// Lift a mortgage for its value plus interest, rounded up.
    pub fn unmortgage(&mut self, id: PlayerId, property: PropertyId) -> Result<i64> {
        self.ensure_active(id)?;
        let owned = self.owned_property(id, property)?;
        if !owned.mortgaged {
            return Err(MonopolyError::NotMortgaged);
        }
        let value = owned.mortgage_value;
        let interest = (value * self.config.unmortgage_interest_percent as i64 + 99) / 100;
        let cost = value + interest;
        let money = self.players[id.0].money;
        if money < cost {
            return Err(MonopolyError::InsufficientFunds {
                needed: cost,
                available: money,
            });
        }
        self.board.property_mut(property)?.mortgaged = false;
        self.set_money(id, money - cost);
        self.emit(GameEvent::Unmortgaged {
            player: id,
            property,
            cost,
        });
        Ok(cost)
    }

    /// Build one house (the fifth is the hotel). Requires the whole
    /// color group owned, unmortgaged, and evenly built.
    pub fn build_house(&mut self, id: PlayerId, property: PropertyId) -> Result<u8> {
        self.ensure_active(id)?;
        let owned = self.owned_property(id, property)?;
        let (house_price, houses) = match owned.kind {
            PropertyKind::Color {
                house_price,
                houses,
                ..
            } => (house_price, houses),
            _ => return Err(MonopolyError::NotBuildable),
        };
        let group = owned.group;
        if !self.board.group_complete(group, id) || self.board.group_has_mortgages(group) {
            return Err(MonopolyError::GroupIncomplete);
        }
        if houses >= MAX_HOUSES {
            return Err(MonopolyError::HouseLimit);
        }
        if houses > self.group_house_extreme(group, true) {
            return Err(MonopolyError::UnevenBuild);
        }
        let money = self.players[id.0].money;
        if money < house_price {
            return Err(MonopolyError::InsufficientFunds {
                needed: house_price,
                available: money,
            });
        }
        self.set_money(id, money - house_price);
        let new_count = houses + 1;
        self.set_houses(property, new_count)?;
        self.emit(GameEvent::HouseBuilt {
            player: id,
            property,
            houses: new_count,
        });
        Ok(new_count)
    }

    /// Sell one house back to the bank at half price, evenly.
    pub fn sell_house(&mut self, id: PlayerId, property: PropertyId) -> Result<u8> {
        self.ensure_active(id)?;
        let owned = self.owned_property(id, property)?;
        let (house_price, houses) = match owned.kind {
            PropertyKind::Color {
                house_price,
                houses,
                ..
            } => (house_price, houses),
            _ => return Err(MonopolyError::NotBuildable),
        };
        if houses == 0 {
            return Err(MonopolyError::NoHouses);
        }
        if houses < self.group_house_extreme(owned.group, false) {
            return Err(MonopolyError::UnevenBuild);
        }
        let new_count = houses - 1;
        self.set_houses(property, new_count)?;
        self.credit(id, house_price / 2);
        self.emit(GameEvent::HouseSold {
            player: id,
            property,
            houses: new_count,
        });
        Ok(new_count)
    }

    // ---- internals ----

    fn ensure_active(&self, id: PlayerId) -> Result<()> {
        let player = self.player(id)?;
        if player.bankrupt {
            return Err(MonopolyError::PlayerBankrupt(id));
        }
        Ok(())
    }

    fn owned_property(&self, id: PlayerId, property: PropertyId) -> Result<&Property> {
        let owned = self.board.property(property)?;
        if owned.owner != Some(id) {
            return Err(MonopolyError::NotOwner {
                player: id,
                property,
            });
        }
        Ok(owned)
    }

    /// Lowest (`min = true`) or highest house count across a group.
    fn group_house_extreme(&self, group: PropertyGroup, min: bool) -> u8 {
        let counts = self
            .board
            .group_members(group)
            .into_iter()
            .filter_map(|id| self.board.property(id).ok().map(|p| p.houses()));
        if min {
            counts.min().unwrap_or(0)
        } else {
            counts.max().unwrap_or(0)
        }
    }

    fn set_houses(&mut self, property: PropertyId, count: u8) -> Result<()> {
        if let PropertyKind::Color { ref mut houses, .. } = self.board.property_mut(property)?.kind
        {
            *houses = count;
        }
        Ok(())
    }

    fn emit(&mut self, event: GameEvent) {
        self.sink.emit(&event);
    }

    fn set_money(&mut self, id: PlayerId, new: i64) {
        let old = self.players[id.0].money;
        if old == new {
            return;
        }
        self.players[id.0].money = new;
        self.emit(GameEvent::MoneyChanged {
            player: id,
            old,
            new,
        });
    }

    fn credit(&mut self, id: PlayerId, amount: i64) {
        let money = self.players[id.0].money;
        self.set_money(id, money + amount);
    }

    async fn query(&mut self, id: PlayerId, query: Query, options: &[Choice]) -> Result<usize> {
        let pick = self.decider.choose(id, &query, options).await?;
        if pick >= options.len() {
            return Err(MonopolyError::InvalidChoice {
                index: pick,
                count: options.len(),
            });
        }
        Ok(pick)
    }

    fn pay_salary(&mut self, id: PlayerId) {
        let salary = self.board.go_salary();
        if salary > 0 {
            self.credit(id, salary);
            self.emit(GameEvent::PassedGo { player: id, salary });
        }
    }

    async fn move_by_roll(&mut self, id: PlayerId, roll: DiceRoll) -> Result<()> {
        let from = self.players[id.0].position;
        let (to, passed_go) = self.board.advance(from, roll.total());
        self.players[id.0].position = to;
        self.emit(GameEvent::Moved {
            player: id,
            from,
            to,
            roll: Some(roll),
        });
        if passed_go {
            self.pay_salary(id);
        }
        self.resolve_landing(id, roll).await
    }

    /// Resolve whatever the player is standing on. Card effects that
    /// move the player feed back into the loop until the move settles.
    async fn resolve_landing(&mut self, id: PlayerId, roll: DiceRoll) -> Result<()> {
        loop {
            let position = self.players[id.0].position;
            let space = self.board.space(position).clone();
            let moved_again = match space {
                Space::Go { .. } | Space::FreeParking | Space::Jail { .. } => false,
                Space::GoToJail => {
                    self.send_to_jail(id)?;
                    false
                }
                Space::IncomeTax { flat, rate_percent } => {
                    self.income_tax(id, flat, rate_percent).await?;
                    false
                }
                Space::LuxuryTax { amount } => {
                    let paid = self.charge(id, amount, Creditor::Bank).await?;
                    if paid {
                        self.emit(GameEvent::TaxPaid { player: id, amount });
                    }
                    false
                }
                Space::Property(property) => {
                    self.land_on_property(id, property, roll).await?;
                    false
                }
                Space::ActionCard(deck) => self.draw_card(id, deck).await?,
            };
            if !moved_again || self.players[id.0].bankrupt {
                return Ok(());
            }
        }
    }

    /// The tax choice is made before the worth is computed.
    async fn income_tax(&mut self, id: PlayerId, flat: i64, rate_percent: u32) -> Result<()> {
        let options = [
            Choice::PayFlat { amount: flat },
            Choice::PayPercent {
                percent: rate_percent,
            },
        ];
        let pick = self.query(id, Query::IncomeTax, &options).await?;
        let amount = if pick == 0 {
            flat
        } else {
            self.board.player_worth(&self.players[id.0]) * rate_percent as i64 / 100
        };
        let paid = self.charge(id, amount, Creditor::Bank).await?;
        if paid {
            self.emit(GameEvent::TaxPaid { player: id, amount });
        }
        Ok(())
    }

    async fn land_on_property(
        &mut self,
        id: PlayerId,
        property: PropertyId,
        roll: DiceRoll,
    ) -> Result<()> {
        let owner = self.board.property(property)?.owner;
        match owner {
            None => self.offer_purchase(id, property).await,
            Some(owner) if owner == id => Ok(()),
            Some(owner) => {
                let rent = {
                    let deed = self.board.property(property)?;
                    let owned = self.board.owned_in_group(deed.group, owner);
                    let complete = self.board.group_complete(deed.group, owner);
                    deed.rent(owned, complete, roll.total())
                };
                if rent == 0 {
                    return Ok(());
                }
                let paid = self.charge(id, rent, Creditor::Player(owner)).await?;
                if paid {
                    self.emit(GameEvent::RentPaid {
                        player: id,
                        owner,
                        property,
                        amount: rent,
                    });
                }
                Ok(())
            }
        }
    }

    /// Landing on an unowned deed: buy or decline. The buy option is
    /// only on the table when cash covers the price.
    async fn offer_purchase(&mut self, id: PlayerId, property: PropertyId) -> Result<()> {
        let price = self.board.property(property)?.buy_price;
        let money = self.players[id.0].money;
        if money < price {
            tracing::debug!(
                "{} cannot afford {}",
                self.players[id.0].name,
                self.board.property(property)?.name
            );
            self.emit(GameEvent::PurchaseDeclined {
                player: id,
                property,
            });
            return Ok(());
        }
        let options = [Choice::Buy { property, price }, Choice::Decline];
        let pick = self
            .query(id, Query::BuyProperty { property }, &options)
            .await?;
        if pick == 0 {
            self.set_money(id, money - price);
            self.board.property_mut(property)?.owner = Some(id);
            self.players[id.0].properties.push(property);
            self.emit(GameEvent::PropertyPurchased {
                player: id,
                property,
                price,
            });
        } else {
            self.emit(GameEvent::PurchaseDeclined {
                player: id,
                property,
            });
        }
        Ok(())
    }

    /// Draw and apply a card. Returns whether the effect moved the
    /// player, in which case the new space still needs resolving.
    async fn draw_card(&mut self, id: PlayerId, deck_id: DeckId) -> Result<bool> {
        let Some(card_id) = self.decks[deck_id.0].draw(&mut self.rng) else {
            // Every card in this deck is currently held by players.
            return Ok(false);
        };
        let card = self.decks[deck_id.0].card(card_id).clone();
        self.emit(GameEvent::CardDrawn {
            player: id,
            deck: deck_id,
            text: card.text.clone(),
        });

        match card.effect {
            CardEffect::GetOutOfJailFree => {
                self.players[id.0].jail_cards.push(SavedCard {
                    deck: deck_id,
                    card: card_id,
                });
                self.emit(GameEvent::CardKept {
                    player: id,
                    deck: deck_id,
                });
                Ok(false)
            }
            CardEffect::CollectFromBank { amount } => {
                self.credit(id, amount);
                self.decks[deck_id.0].discard(card_id);
                Ok(false)
            }
            CardEffect::PayBank { amount } => {
                self.charge(id, amount, Creditor::Bank).await?;
                self.decks[deck_id.0].discard(card_id);
                Ok(false)
            }
            CardEffect::CollectFromEachPlayer { amount } => {
                let others: Vec<PlayerId> = self.active_players_except(id);
                for other in others {
                    self.charge(other, amount, Creditor::Player(id)).await?;
                }
                self.decks[deck_id.0].discard(card_id);
                Ok(false)
            }
            CardEffect::PayEachPlayer { amount } => {
                let others: Vec<PlayerId> = self.active_players_except(id);
                for other in others {
                    if self.players[id.0].bankrupt {
                        break;
                    }
                    self.charge(id, amount, Creditor::Player(other)).await?;
                }
                self.decks[deck_id.0].discard(card_id);
                Ok(false)
            }
            CardEffect::AdvanceTo { space } => {
                self.decks[deck_id.0].discard(card_id);
                let from = self.players[id.0].position;
                let (to, passed_go) = self.board.advance_to(from, space);
                self.players[id.0].position = to;
                self.emit(GameEvent::Moved {
                    player: id,
                    from,
                    to,
                    roll: None,
                });
                if passed_go {
                    self.pay_salary(id);
                }
                Ok(true)
            }
            CardEffect::MoveBack { steps } => {
                self.decks[deck_id.0].discard(card_id);
                let from = self.players[id.0].position;
                let to = self.board.move_back(from, steps);
                self.players[id.0].position = to;
                self.emit(GameEvent::Moved {
                    player: id,
                    from,
                    to,
                    roll: None,
                });
                Ok(true)
            }
            CardEffect::GoToJail => {
                self.decks[deck_id.0].discard(card_id);
                self.send_to_jail(id)?;
                Ok(false)
            }
        }
    }

    fn active_players_except(&self, id: PlayerId) -> Vec<PlayerId> {
        self.players
            .iter()
            .enumerate()
            .filter(|(index, player)| !player.bankrupt && *index != id.0)
            .map(|(index, _)| PlayerId(index))
            .collect()
    }

    fn send_to_jail(&mut self, id: PlayerId) -> Result<()> {
        let jail = self.board.jail_index().ok_or(MonopolyError::ConfigError {
            message: "Board has no jail".to_string(),
        })?;
        let player = &mut self.players[id.0];
        player.position = jail;
        player.in_jail = true;
        player.jail_attempts = 0;
        self.emit(GameEvent::WentToJail { player: id });
        Ok(())
    }

    fn leave_jail(&mut self, id: PlayerId, exit: JailExit) {
        let player = &mut self.players[id.0];
        player.in_jail = false;
        player.jail_attempts = 0;
        self.emit(GameEvent::LeftJail { player: id, exit });
    }

    /// A jailed player's turn: pay bail, play a held card, or roll for
    /// doubles. After the configured number of failed attempts the
    /// bail becomes compulsory and the player moves by the last roll.
    async fn jail_turn(&mut self, id: PlayerId) -> Result<()> {
        let bail = self.board.bail().unwrap_or(0);

        let mut options = vec![Choice::PayBail { amount: bail }];
        if !self.players[id.0].jail_cards.is_empty() {
            options.push(Choice::UseJailCard);
        }
        options.push(Choice::RollForDoubles);

        let pick = self.query(id, Query::JailOptions, &options).await?;
        match options[pick] {
            Choice::PayBail { .. } => {
                let paid = self.charge(id, bail, Creditor::Bank).await?;
                if paid {
                    self.leave_jail(id, JailExit::PaidBail);
                    let roll = self.dice.roll();
                    self.move_by_roll(id, roll).await?;
                }
                Ok(())
            }
            Choice::UseJailCard => {
                let saved = match self.players[id.0].jail_cards.pop() {
                    Some(saved) => saved,
                    // Option was only offered because a card is held.
                    None => {
                        return Err(MonopolyError::InvalidChoice {
                            index: pick,
                            count: options.len(),
                        })
                    }
                };
                self.decks[saved.deck.0].discard(saved.card);
                self.emit(GameEvent::CardUsed {
                    player: id,
                    deck: saved.deck,
                });
                self.leave_jail(id, JailExit::UsedCard);
                let roll = self.dice.roll();
                self.move_by_roll(id, roll).await
            }
            Choice::RollForDoubles => {
                let roll = self.dice.roll();
                tracing::debug!(
                    "{} rolls for doubles: {} + {}",
                    self.players[id.0].name,
                    roll.first,
                    roll.second
                );
                if roll.is_doubles() {
                    self.leave_jail(id, JailExit::RolledDoubles);
                    return self.move_by_roll(id, roll).await;
                }
                self.players[id.0].jail_attempts += 1;
                if self.players[id.0].jail_attempts >= self.config.jail_attempt_limit {
                    let paid = self.charge(id, bail, Creditor::Bank).await?;
                    if paid {
                        self.leave_jail(id, JailExit::PaidBail);
                        self.move_by_roll(id, roll).await?;
                    }
                }
                Ok(())
            }
            _ => Err(MonopolyError::InvalidChoice {
                index: pick,
                count: options.len(),
            }),
        }
    }

    /// Move money out of a player, liquidating assets through player
    /// choices when cash runs short. Returns false when the debt could
    /// not be met and the player went bankrupt instead.
    async fn charge(&mut self, debtor: PlayerId, amount: i64, creditor: Creditor) -> Result<bool> {
        if amount <= 0 {
            return Ok(true);
        }
        while self.players[debtor.0].money < amount {
            if self.board.max_possible_expense(&self.players[debtor.0]) < amount {
                self.bankrupt(debtor, creditor);
                return Ok(false);
            }
            let options = self.liquidation_options(debtor);
            let pick = self
                .query(debtor, Query::RaiseFunds { amount_owed: amount }, &options)
                .await?;
            match options[pick] {
                Choice::Mortgage { property, .. } => {
                    self.mortgage(debtor, property)?;
                }
                Choice::SellHouse { property, .. } => {
                    self.sell_house(debtor, property)?;
                }
                _ => {
                    return Err(MonopolyError::InvalidChoice {
                        index: pick,
                        count: options.len(),
                    })
                }
            }
        }
        let money = self.players[debtor.0].money;
        self.set_money(debtor, money - amount);
        if let Creditor::Player(creditor) = creditor {
            self.credit(creditor, amount);
        }
        Ok(true)
    }

    /// Every liquidation move currently open to the player.
    fn liquidation_options(&self, id: PlayerId) -> Vec<Choice> {
        let mut options = Vec::new();
        for &property in &self.players[id.0].properties {
            let Ok(deed) = self.board.property(property) else {
                continue;
            };
            if !deed.mortgaged && !self.board.group_has_houses(deed.group) {
                options.push(Choice::Mortgage {
                    property,
                    proceeds: deed.mortgage_value,
                });
            }
            if let PropertyKind::Color {
                house_price,
                houses,
                ..
            } = deed.kind
            {
                if houses > 0 && houses >= self.group_house_extreme(deed.group, false) {
                    options.push(Choice::SellHouse {
                        property,
                        proceeds: house_price / 2,
                    });
                }
            }
        }
        options
    }

    /// Remove a player from the game, passing whatever they have to
    /// the creditor. Houses are liquidated into the transfer; deeds
    /// surrendered to the bank are cleared for resale.
    fn bankrupt(&mut self, debtor: PlayerId, creditor: Creditor) {
        tracing::info!("{} is bankrupt", self.players[debtor.0].name);

        let mut raised = 0;
        let properties = std::mem::take(&mut self.players[debtor.0].properties);
        for &property in &properties {
            if let Ok(deed) = self.board.property_mut(property) {
                if let PropertyKind::Color {
                    house_price,
                    ref mut houses,
                    ..
                } = deed.kind
                {
                    raised += (house_price / 2) * *houses as i64;
                    *houses = 0;
                }
            }
        }

        let cash = self.players[debtor.0].money + raised;
        self.set_money(debtor, 0);
        let jail_cards = std::mem::take(&mut self.players[debtor.0].jail_cards);

        match creditor {
            Creditor::Player(creditor_id) => {
                self.credit(creditor_id, cash);
                for &property in &properties {
                    if let Ok(deed) = self.board.property_mut(property) {
                        deed.owner = Some(creditor_id);
                    }
                    self.players[creditor_id.0].properties.push(property);
                }
                self.players[creditor_id.0].jail_cards.extend(jail_cards);
                self.players[debtor.0].bankrupt = true;
                self.emit(GameEvent::Bankrupt {
                    player: debtor,
                    creditor: Some(creditor_id),
                });
            }
            Creditor::Bank => {
                for &property in &properties {
                    if let Ok(deed) = self.board.property_mut(property) {
                        deed.owner = None;
                        deed.mortgaged = false;
                    }
                }
                for saved in jail_cards {
                    self.decks[saved.deck.0].discard(saved.card);
                }
                self.players[debtor.0].bankrupt = true;
                self.emit(GameEvent::Bankrupt {
                    player: debtor,
                    creditor: None,
                });
            }
        }

        let active: Vec<PlayerId> = self
            .players
            .iter()
            .enumerate()
            .filter(|(_, player)| !player.bankrupt)
            .map(|(index, _)| PlayerId(index))
            .collect();
        if active.len() == 1 {
            let winner = active[0];
            self.winner = Some(winner);
            self.emit(GameEvent::GameOver { winner });
            tracing::info!("{} wins", self.players[winner.0].name);
        }
    }
}
