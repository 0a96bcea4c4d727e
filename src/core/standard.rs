//! The classic 40-space board and its two card decks.

use crate::config::GameConfig;
use crate::core::board::{Board, Space};
use crate::core::cards::{ActionCard, ActionCardDeck, CardEffect};
use crate::core::property::{Property, PropertyGroup};
use crate::domain::model::{DeckId, PropertyId};

pub const CHANCE: DeckId = DeckId(0);
pub const COMMUNITY_CHEST: DeckId = DeckId(1);

pub fn standard_board(config: &GameConfig) -> Board {
    use PropertyGroup::*;

    let properties = vec![
        Property::color("Mediterranean Avenue", Brown, 60, 30, 50, [2, 10, 30, 90, 160, 250]),
        Property::color("Baltic Avenue", Brown, 60, 30, 50, [4, 20, 60, 180, 320, 450]),
        Property::railroad("Reading Railroad", 200, 100),
        Property::color("Oriental Avenue", LightBlue, 100, 50, 50, [6, 30, 90, 270, 400, 550]),
        Property::color("Vermont Avenue", LightBlue, 100, 50, 50, [6, 30, 90, 270, 400, 550]),
        Property::color("Connecticut Avenue", LightBlue, 120, 60, 50, [8, 40, 100, 300, 450, 600]),
        Property::color("St. Charles Place", Pink, 140, 70, 100, [10, 50, 150, 450, 625, 750]),
        Property::utility("Electric Company", 150, 75),
        Property::color("States Avenue", Pink, 140, 70, 100, [10, 50, 150, 450, 625, 750]),
        Property::color("Virginia Avenue", Pink, 160, 80, 100, [12, 60, 180, 500, 700, 900]),
        Property::railroad("Pennsylvania Railroad", 200, 100),
        Property::color("St. James Place", Orange, 180, 90, 100, [14, 70, 200, 550, 750, 950]),
        Property::color("Tennessee Avenue", Orange, 180, 90, 100, [14, 70, 200, 550, 750, 950]),
        Property::color("New York Avenue", Orange, 200, 100, 100, [16, 80, 220, 600, 800, 1000]),
        Property::color("Kentucky Avenue", Red, 220, 110, 150, [18, 90, 250, 700, 875, 1050]),
        Property::color("Indiana Avenue", Red, 220, 110, 150, [18, 90, 250, 700, 875, 1050]),
        Property::color("Illinois Avenue", Red, 240, 120, 150, [20, 100, 300, 750, 925, 1100]),
        Property::railroad("B. & O. Railroad", 200, 100),
        Property::color("Atlantic Avenue", Yellow, 260, 130, 150, [22, 110, 330, 800, 975, 1150]),
        Property::color("Ventnor Avenue", Yellow, 260, 130, 150, [22, 110, 330, 800, 975, 1150]),
        Property::utility("Water Works", 150, 75),
        Property::color("Marvin Gardens", Yellow, 280, 140, 150, [24, 120, 360, 850, 1025, 1200]),
        Property::color("Pacific Avenue", Green, 300, 150, 200, [26, 130, 390, 900, 1100, 1275]),
        Property::color("North Carolina Avenue", Green, 300, 150, 200, [26, 130, 390, 900, 1100, 1275]),
        Property::color("Pennsylvania Avenue", Green, 320, 160, 200, [28, 150, 450, 1000, 1200, 1400]),
        Property::railroad("Short Line", 200, 100),
        Property::color("Park Place", DarkBlue, 350, 175, 200, [35, 175, 500, 1100, 1300, 1500]),
        Property::color("Boardwalk", DarkBlue, 400, 200, 200, [50, 200, 600, 1400, 1700, 2000]),
    ];

    let p = PropertyId;
    let spaces = vec![
        Space::Go {
            salary: config.go_salary,
        },
        Space::Property(p(0)),
        Space::ActionCard(COMMUNITY_CHEST),
        Space::Property(p(1)),
        Space::IncomeTax {
            flat: config.income_tax_flat,
            rate_percent: config.income_tax_rate_percent,
        },
        Space::Property(p(2)),
        Space::Property(p(3)),
        Space::ActionCard(CHANCE),
        Space::Property(p(4)),
        Space::Property(p(5)),
        Space::Jail { bail: config.bail },
        Space::Property(p(6)),
        Space::Property(p(7)),
        Space::Property(p(8)),
        Space::Property(p(9)),
        Space::Property(p(10)),
        Space::Property(p(11)),
        Space::ActionCard(COMMUNITY_CHEST),
        Space::Property(p(12)),
        Space::Property(p(13)),
        Space::FreeParking,
        Space::Property(p(14)),
        Space::ActionCard(CHANCE),
        Space::Property(p(15)),
        Space::Property(p(16)),
        Space::Property(p(17)),
        Space::Property(p(18)),
        Space::Property(p(19)),
        Space::Property(p(20)),
        Space::Property(p(21)),
        Space::GoToJail,
        Space::Property(p(22)),
        Space::Property(p(23)),
        Space::ActionCard(COMMUNITY_CHEST),
        Space::Property(p(24)),
        Space::Property(p(25)),
        Space::ActionCard(CHANCE),
        Space::Property(p(26)),
        Space::Property(p(27)),
        Space::LuxuryTax {
            amount: config.luxury_tax,
        },
    ];

    Board::new(spaces, properties)
}

pub fn standard_decks() -> Vec<ActionCardDeck> {
    let chance = ActionCardDeck::new(
        "Chance",
        vec![
            ActionCard::new("Advance to Go", CardEffect::AdvanceTo { space: 0 }),
            ActionCard::new(
                "Advance to Illinois Avenue",
                CardEffect::AdvanceTo { space: 24 },
            ),
            ActionCard::new(
                "Advance to St. Charles Place",
                CardEffect::AdvanceTo { space: 11 },
            ),
            ActionCard::new(
                "Take a trip to Reading Railroad",
                CardEffect::AdvanceTo { space: 5 },
            ),
            ActionCard::new("Advance to Boardwalk", CardEffect::AdvanceTo { space: 38 }),
            ActionCard::new(
                "Go directly to Jail. Do not pass Go. Do not collect salary",
                CardEffect::GoToJail,
            ),
            ActionCard::new("Get Out of Jail Free", CardEffect::GetOutOfJailFree),
            ActionCard::new("Go back 3 spaces", CardEffect::MoveBack { steps: 3 }),
            ActionCard::new(
                "Bank pays you dividend of $50",
                CardEffect::CollectFromBank { amount: 50 },
            ),
            ActionCard::new("Pay poor tax of $15", CardEffect::PayBank { amount: 15 }),
            ActionCard::new(
                "You have been elected Chairman of the Board. Pay each player $50",
                CardEffect::PayEachPlayer { amount: 50 },
            ),
            ActionCard::new(
                "Your building loan matures. Collect $150",
                CardEffect::CollectFromBank { amount: 150 },
            ),
        ],
    );

    let community_chest = ActionCardDeck::new(
        "Community Chest",
        vec![
            ActionCard::new("Advance to Go", CardEffect::AdvanceTo { space: 0 }),
            ActionCard::new(
                "Bank error in your favor. Collect $200",
                CardEffect::CollectFromBank { amount: 200 },
            ),
            ActionCard::new("Doctor's fees. Pay $50", CardEffect::PayBank { amount: 50 }),
            ActionCard::new("Get Out of Jail Free", CardEffect::GetOutOfJailFree),
            ActionCard::new(
                "Go directly to Jail. Do not pass Go. Do not collect salary",
                CardEffect::GoToJail,
            ),
            ActionCard::new(
                "Holiday fund matures. Collect $100",
                CardEffect::CollectFromBank { amount: 100 },
            ),
            ActionCard::new(
                "Income tax refund. Collect $20",
                CardEffect::CollectFromBank { amount: 20 },
            ),
            ActionCard::new(
                "It is your birthday. Collect $10 from every player",
                CardEffect::CollectFromEachPlayer { amount: 10 },
            ),
            ActionCard::new(
                "Life insurance matures. Collect $100",
                CardEffect::CollectFromBank { amount: 100 },
            ),
            ActionCard::new(
                "Pay hospital fees of $100",
                CardEffect::PayBank { amount: 100 },
            ),
            ActionCard::new("Pay school fees of $50", CardEffect::PayBank { amount: 50 }),
            ActionCard::new("You inherit $100", CardEffect::CollectFromBank { amount: 100 }),
        ],
    );

    vec![chance, community_chest]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_board_shape() {
        let board = standard_board(&GameConfig::default());
        assert_eq!(board.len(), 40);
        assert_eq!(board.properties.len(), 28);
        assert_eq!(board.jail_index(), Some(10));
        assert_eq!(board.go_salary(), 200);
        assert_eq!(board.bail(), Some(50));
        assert!(board.validate(2).is_ok());
    }

    #[test]
    fn test_standard_group_sizes() {
        let board = standard_board(&GameConfig::default());
        assert_eq!(board.group_members(PropertyGroup::Brown).len(), 2);
        assert_eq!(board.group_members(PropertyGroup::Railroad).len(), 4);
        assert_eq!(board.group_members(PropertyGroup::Utility).len(), 2);
        assert_eq!(board.group_members(PropertyGroup::Orange).len(), 3);
    }

    #[test]
    fn test_standard_decks_carry_one_jail_card_each() {
        for deck in standard_decks() {
            let savable = (0..deck.pool_size())
                .filter(|&i| deck.card(crate::domain::model::CardId(i)).is_savable())
                .count();
            assert_eq!(savable, 1, "{} should have one savable card", deck.name);
        }
    }
}
