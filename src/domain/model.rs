use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a player in the game's seating order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub usize);

/// Index of a property in the board's deed table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PropertyId(pub usize);

/// Index of an action-card deck (Chance, Community Chest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeckId(pub usize);

/// Index of a card within its deck's card pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(pub usize);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A throw of the two dice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRoll {
    pub first: u8,
    pub second: u8,
}

impl DiceRoll {
    pub fn new(first: u8, second: u8) -> Self {
        Self { first, second }
    }

    pub fn total(&self) -> u8 {
        self.first + self.second
    }

    pub fn is_doubles(&self) -> bool {
        self.first == self.second
    }
}

/// A get-out-of-jail-free card held by a player. Remembers the deck it
/// came from so it can be returned there once used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedCard {
    pub deck: DeckId,
    pub card: CardId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub money: i64,
    pub position: usize,
    pub in_jail: bool,
    pub jail_attempts: u8,
    pub properties: Vec<PropertyId>,
    pub jail_cards: Vec<SavedCard>,
    pub bankrupt: bool,
}

impl Player {
    pub fn new(name: impl Into<String>, starting_money: i64) -> Self {
        Self {
            name: name.into(),
            money: starting_money,
            position: 0,
            in_jail: false,
            jail_attempts: 0,
            properties: Vec::new(),
            jail_cards: Vec::new(),
            bankrupt: false,
        }
    }

    pub fn is_active(&self) -> bool {
        !self.bankrupt
    }
}

/// How a player got out of jail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JailExit {
    PaidBail,
    UsedCard,
    RolledDoubles,
}

/// Everything observable that happens in a game. Sinks receive every
/// event in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    MoneyChanged {
        player: PlayerId,
        old: i64,
        new: i64,
    },
    Moved {
        player: PlayerId,
        from: usize,
        to: usize,
        roll: Option<DiceRoll>,
    },
    PassedGo {
        player: PlayerId,
        salary: i64,
    },
    PropertyPurchased {
        player: PlayerId,
        property: PropertyId,
        price: i64,
    },
    PurchaseDeclined {
        player: PlayerId,
        property: PropertyId,
    },
    RentPaid {
        player: PlayerId,
        owner: PlayerId,
        property: PropertyId,
        amount: i64,
    },
    TaxPaid {
        player: PlayerId,
        amount: i64,
    },
    CardDrawn {
        player: PlayerId,
        deck: DeckId,
        text: String,
    },
    CardKept {
        player: PlayerId,
        deck: DeckId,
    },
    CardUsed {
        player: PlayerId,
        deck: DeckId,
    },
    WentToJail {
        player: PlayerId,
    },
    LeftJail {
        player: PlayerId,
        exit: JailExit,
    },
    Mortgaged {
        player: PlayerId,
        property: PropertyId,
        proceeds: i64,
    },
    Unmortgaged {
        player: PlayerId,
        property: PropertyId,
        cost: i64,
    },
    HouseBuilt {
        player: PlayerId,
        property: PropertyId,
        houses: u8,
    },
    HouseSold {
        player: PlayerId,
        property: PropertyId,
        houses: u8,
    },
    Bankrupt {
        player: PlayerId,
        creditor: Option<PlayerId>,
    },
    GameOver {
        winner: PlayerId,
    },
}

/// A question put to a player. Carries a stable identity so deciders
/// can branch on what is being asked rather than on display text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Query {
    BuyProperty { property: PropertyId },
    IncomeTax,
    JailOptions,
    RaiseFunds { amount_owed: i64 },
}

/// One selectable answer to a [`Query`]. The decider returns the index
/// of the option it picks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Choice {
    Buy { property: PropertyId, price: i64 },
    Decline,
    PayFlat { amount: i64 },
    PayPercent { percent: u32 },
    PayBail { amount: i64 },
    UseJailCard,
    RollForDoubles,
    Mortgage { property: PropertyId, proceeds: i64 },
    SellHouse { property: PropertyId, proceeds: i64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dice_roll_total_and_doubles() {
        let roll = DiceRoll::new(3, 4);
        assert_eq!(roll.total(), 7);
        assert!(!roll.is_doubles());

        let doubles = DiceRoll::new(5, 5);
        assert_eq!(doubles.total(), 10);
        assert!(doubles.is_doubles());
    }

    #[test]
    fn test_new_player_starts_clean() {
        let player = Player::new("Ada", 1500);
        assert_eq!(player.money, 1500);
        assert_eq!(player.position, 0);
        assert!(player.is_active());
        assert!(player.properties.is_empty());
        assert!(player.jail_cards.is_empty());
    }
}
