use crate::core::property::{Property, PropertyGroup, PropertyKind};
use crate::domain::model::{DeckId, Player, PlayerId, PropertyId};
use crate::utils::error::{MonopolyError, Result};
use serde::{Deserialize, Serialize};

/// A space on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Space {
    /// Collect `salary` for passing (or landing on) this space.
    Go { salary: i64 },
    Property(PropertyId),
    ActionCard(DeckId),
    /// Just visiting, unless the engine says otherwise.
    Jail { bail: i64 },
    GoToJail,
    FreeParking,
    /// Flat amount or a percentage of worth, chosen before the worth
    /// is computed.
    IncomeTax { flat: i64, rate_percent: u32 },
    LuxuryTax { amount: i64 },
}

/// The board: an ordered ring of spaces plus the deed table they
/// reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    pub spaces: Vec<Space>,
    pub properties: Vec<Property>,
}

impl Board {
    pub fn new(spaces: Vec<Space>, properties: Vec<Property>) -> Self {
        Self { spaces, properties }
    }

    pub fn len(&self) -> usize {
        self.spaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spaces.is_empty()
    }

    pub fn space(&self, index: usize) -> &Space {
        &self.spaces[index % self.spaces.len()]
    }

    pub fn property(&self, id: PropertyId) -> Result<&Property> {
        self.properties
            .get(id.0)
            .ok_or(MonopolyError::UnknownProperty(id.0))
    }

    pub fn property_mut(&mut self, id: PropertyId) -> Result<&mut Property> {
        self.properties
            .get_mut(id.0)
            .ok_or(MonopolyError::UnknownProperty(id.0))
    }

    /// Move forward by a throw. Returns the landing index and whether
    /// the move wrapped past Go.
    pub fn advance(&self, from: usize, steps: u8) -> (usize, bool) {
        let len = self.spaces.len();
        let raw = from + steps as usize;
        (raw % len, raw >= len)
    }

    /// Move forward to a fixed target. Returns the target and whether
    /// the move wrapped past Go.
    pub fn advance_to(&self, from: usize, target: usize) -> (usize, bool) {
        let len = self.spaces.len();
        let steps = (target + len - from) % len;
        (target % len, from + steps >= len)
    }

    /// Move backward. Going backward never collects the Go salary.
    pub fn move_back(&self, from: usize, steps: u8) -> usize {
        let len = self.spaces.len();
        (from + len - (steps as usize % len)) % len
    }

    pub fn jail_index(&self) -> Option<usize> {
        self.spaces
            .iter()
            .position(|space| matches!(space, Space::Jail { .. }))
    }

    pub fn bail(&self) -> Option<i64> {
        self.spaces.iter().find_map(|space| match space {
            Space::Jail { bail } => Some(*bail),
            _ => None,
        })
    }

    pub fn go_salary(&self) -> i64 {
        self.spaces
            .iter()
            .find_map(|space| match space {
                Space::Go { salary } => Some(*salary),
                _ => None,
            })
            .unwrap_or(0)
    }

    pub fn group_members(&self, group: PropertyGroup) -> Vec<PropertyId> {
        self.properties
            .iter()
            .enumerate()
            .filter(|(_, property)| property.group == group)
            .map(|(index, _)| PropertyId(index))
            .collect()
    }

    /// How many deeds of `group` the player holds.
    pub fn owned_in_group(&self, group: PropertyGroup, owner: PlayerId) -> usize {
        self.properties
            .iter()
            .filter(|property| property.group == group && property.owner == Some(owner))
            .count()
    }

    /// Whether the player holds every deed of `group`.
    pub fn group_complete(&self, group: PropertyGroup, owner: PlayerId) -> bool {
        self.properties
            .iter()
            .filter(|property| property.group == group)
            .all(|property| property.owner == Some(owner))
    }

    /// Whether any deed of `group` carries houses.
    pub fn group_has_houses(&self, group: PropertyGroup) -> bool {
        self.properties
            .iter()
            .any(|property| property.group == group && property.houses() > 0)
    }

    /// Whether any deed of `group` is mortgaged.
    pub fn group_has_mortgages(&self, group: PropertyGroup) -> bool {
        self.properties
            .iter()
            .any(|property| property.group == group && property.mortgaged)
    }

    /// Cash plus deed and building value.
    pub fn player_worth(&self, player: &Player) -> i64 {
        let mut worth = player.money;
        for id in &player.properties {
            if let Some(property) = self.properties.get(id.0) {
                worth += property.worth();
            }
        }
        worth
    }

    /// The most this player could pay without going bankrupt, by
    /// mortgaging everything and selling every house. Trade deals with
    /// other players are not considered.
    pub fn max_possible_expense(&self, player: &Player) -> i64 {
        let mut value = player.money;
        for id in &player.properties {
            if let Some(property) = self.properties.get(id.0) {
                value += property.max_expense_value();
            }
        }
        value
    }

    /// Structural checks, run once when a game is built. `deck_count`
    /// is how many card decks the game carries.
    pub fn validate(&self, deck_count: usize) -> Result<()> {
        if self.spaces.is_empty() {
            return Err(MonopolyError::ConfigError {
                message: "Board has no spaces".to_string(),
            });
        }
        if !matches!(self.spaces[0], Space::Go { .. }) {
            return Err(MonopolyError::ConfigError {
                message: "Board must start at Go".to_string(),
            });
        }
        let has_go_to_jail = self.spaces.iter().any(|s| matches!(s, Space::GoToJail));
        if has_go_to_jail && self.jail_index().is_none() {
            return Err(MonopolyError::ConfigError {
                message: "Board has a Go To Jail space but no jail".to_string(),
            });
        }
        for space in &self.spaces {
            match space {
                Space::Property(id) => {
                    if id.0 >= self.properties.len() {
                        return Err(MonopolyError::UnknownProperty(id.0));
                    }
                }
                Space::ActionCard(deck) => {
                    if deck.0 >= deck_count {
                        return Err(MonopolyError::ConfigError {
                            message: format!("Board references unknown deck {}", deck.0),
                        });
                    }
                }
                _ => {}
            }
        }
        for property in &self.properties {
            if property.buy_price <= 0 {
                return Err(MonopolyError::ConfigError {
                    message: format!("Property {} has no purchase price", property.name),
                });
            }
            if let PropertyKind::Color { house_price, .. } = property.kind {
                if house_price <= 0 {
                    return Err(MonopolyError::ConfigError {
                        message: format!("Property {} has no house price", property.name),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::standard::standard_board;
    use crate::config::GameConfig;

    fn board() -> Board {
        standard_board(&GameConfig::default())
    }

    #[test]
    fn test_advance_wraps_and_detects_go() {
        let board = board();
        assert_eq!(board.advance(0, 7), (7, false));
        assert_eq!(board.advance(38, 4), (2, true));
        assert_eq!(board.advance(34, 6), (0, true));
    }

    #[test]
    fn test_advance_to_detects_go() {
        let board = board();
        assert_eq!(board.advance_to(36, 24), (24, true));
        assert_eq!(board.advance_to(7, 24), (24, false));
        assert_eq!(board.advance_to(36, 0), (0, true));
    }

    #[test]
    fn test_move_back_never_wraps_through_go_forward() {
        let board = board();
        assert_eq!(board.move_back(36, 3), 33);
        assert_eq!(board.move_back(1, 3), 38);
    }

    #[test]
    fn test_standard_board_validates() {
        assert!(board().validate(2).is_ok());
    }

    #[test]
    fn test_board_without_go_is_rejected() {
        let mut board = board();
        board.spaces[0] = Space::FreeParking;
        assert!(board.validate(2).is_err());
    }

    #[test]
    fn test_group_queries() {
        let mut board = board();
        let dark_blue = board.group_members(PropertyGroup::DarkBlue);
        assert_eq!(dark_blue.len(), 2);

        let owner = PlayerId(0);
        board.property_mut(dark_blue[0]).unwrap().owner = Some(owner);
        assert_eq!(board.owned_in_group(PropertyGroup::DarkBlue, owner), 1);
        assert!(!board.group_complete(PropertyGroup::DarkBlue, owner));

        board.property_mut(dark_blue[1]).unwrap().owner = Some(owner);
        assert!(board.group_complete(PropertyGroup::DarkBlue, owner));
    }
}
