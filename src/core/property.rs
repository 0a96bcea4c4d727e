use crate::domain::model::PlayerId;
use serde::{Deserialize, Serialize};

/// Fifth house on a lot is the hotel.
pub const MAX_HOUSES: u8 = 5;

/// The group a deed belongs to. Color groups gate building; the
/// Railroad and Utility groups gate their rent tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyGroup {
    Brown,
    LightBlue,
    Pink,
    Orange,
    Red,
    Yellow,
    Green,
    DarkBlue,
    Railroad,
    Utility,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyKind {
    /// A buildable lot. `rent[n]` is the rent with `n` houses; the
    /// unimproved rent doubles once the owner holds the whole group.
    Color {
        house_price: i64,
        houses: u8,
        rent: [i64; 6],
    },
    /// Rent scales with how many railroads the owner holds.
    Railroad { rent: [i64; 4] },
    /// Rent is the landing throw times a multiplier that depends on
    /// how many utilities the owner holds.
    Utility { multiplier: [i64; 2] },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    pub group: PropertyGroup,
    pub buy_price: i64,
    pub mortgage_value: i64,
    pub mortgaged: bool,
    pub owner: Option<PlayerId>,
    pub kind: PropertyKind,
}

impl Property {
    pub fn color(
        name: impl Into<String>,
        group: PropertyGroup,
        buy_price: i64,
        mortgage_value: i64,
        house_price: i64,
        rent: [i64; 6],
    ) -> Self {
        Self {
            name: name.into(),
            group,
            buy_price,
            mortgage_value,
            mortgaged: false,
            owner: None,
            kind: PropertyKind::Color {
                house_price,
                houses: 0,
                rent,
            },
        }
    }

    pub fn railroad(name: impl Into<String>, buy_price: i64, mortgage_value: i64) -> Self {
        Self {
            name: name.into(),
            group: PropertyGroup::Railroad,
            buy_price,
            mortgage_value,
            mortgaged: false,
            owner: None,
            kind: PropertyKind::Railroad {
                rent: [25, 50, 100, 200],
            },
        }
    }

    pub fn utility(name: impl Into<String>, buy_price: i64, mortgage_value: i64) -> Self {
        Self {
            name: name.into(),
            group: PropertyGroup::Utility,
            buy_price,
            mortgage_value,
            mortgaged: false,
            owner: None,
            kind: PropertyKind::Utility {
                multiplier: [4, 10],
            },
        }
    }

    pub fn houses(&self) -> u8 {
        match self.kind {
            PropertyKind::Color { houses, .. } => houses,
            _ => 0,
        }
    }

    pub fn house_price(&self) -> Option<i64> {
        match self.kind {
            PropertyKind::Color { house_price, .. } => Some(house_price),
            _ => None,
        }
    }

    /// The deed's contribution to its owner's net worth: purchase price
    /// (less the outstanding mortgage) plus house investment.
    pub fn worth(&self) -> i64 {
        let deed = if self.mortgaged {
            self.buy_price - self.mortgage_value
        } else {
            self.buy_price
        };
        match self.kind {
            PropertyKind::Color {
                house_price,
                houses,
                ..
            } => deed + house_price * houses as i64,
            _ => deed,
        }
    }

    /// The most cash liquidating this deed can raise: the mortgage
    /// value if not already mortgaged, plus half price back per house.
    pub fn max_expense_value(&self) -> i64 {
        let mortgage = if self.mortgaged {
            0
        } else {
            self.mortgage_value
        };
        match self.kind {
            PropertyKind::Color {
                house_price,
                houses,
                ..
            } => mortgage + (house_price / 2) * houses as i64,
            _ => mortgage,
        }
    }

    /// Rent owed by a player landing here. `owned_in_group` counts the
    /// owner's deeds in this group (including this one);
    /// `group_complete` says the owner holds the whole color group;
    /// `dice_total` is the throw that landed the player.
    pub fn rent(&self, owned_in_group: usize, group_complete: bool, dice_total: u8) -> i64 {
        if self.mortgaged {
            return 0;
        }
        match &self.kind {
            PropertyKind::Color { houses, rent, .. } => {
                if *houses == 0 && group_complete {
                    rent[0] * 2
                } else {
                    rent[*houses as usize]
                }
            }
            PropertyKind::Railroad { rent } => {
                let owned = owned_in_group.clamp(1, rent.len());
                rent[owned - 1]
            }
            PropertyKind::Utility { multiplier } => {
                let owned = owned_in_group.clamp(1, multiplier.len());
                multiplier[owned - 1] * dice_total as i64
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lot() -> Property {
        Property::color(
            "Boardwalk",
            PropertyGroup::DarkBlue,
            400,
            200,
            200,
            [50, 200, 600, 1400, 1700, 2000],
        )
    }

    #[test]
    fn test_color_rent_doubles_on_complete_unimproved_group() {
        let property = lot();
        assert_eq!(property.rent(1, false, 7), 50);
        assert_eq!(property.rent(2, true, 7), 100);
    }

    #[test]
    fn test_color_rent_follows_house_table() {
        let mut property = lot();
        if let PropertyKind::Color { ref mut houses, .. } = property.kind {
            *houses = 3;
        }
        assert_eq!(property.rent(2, true, 7), 1400);
    }

    #[test]
    fn test_railroad_rent_scales_with_count() {
        let railroad = Property::railroad("Reading Railroad", 200, 100);
        assert_eq!(railroad.rent(1, false, 7), 25);
        assert_eq!(railroad.rent(2, false, 7), 50);
        assert_eq!(railroad.rent(3, false, 7), 100);
        assert_eq!(railroad.rent(4, false, 7), 200);
    }

    #[test]
    fn test_utility_rent_multiplies_the_throw() {
        let utility = Property::utility("Water Works", 150, 75);
        assert_eq!(utility.rent(1, false, 7), 28);
        assert_eq!(utility.rent(2, false, 7), 70);
    }

    #[test]
    fn test_mortgaged_property_charges_nothing() {
        let mut property = lot();
        property.mortgaged = true;
        assert_eq!(property.rent(2, true, 7), 0);
    }

    #[test]
    fn test_worth_counts_houses_and_mortgage_debt() {
        let mut property = lot();
        assert_eq!(property.worth(), 400);
        if let PropertyKind::Color { ref mut houses, .. } = property.kind {
            *houses = 2;
        }
        assert_eq!(property.worth(), 800);
        property.mortgaged = true;
        assert_eq!(property.worth(), 600);
    }

    #[test]
    fn test_max_expense_value_counts_half_price_houses() {
        let mut property = lot();
        assert_eq!(property.max_expense_value(), 200);
        if let PropertyKind::Color { ref mut houses, .. } = property.kind {
            *houses = 4;
        }
        assert_eq!(property.max_expense_value(), 200 + 4 * 100);
        property.mortgaged = true;
        assert_eq!(property.max_expense_value(), 4 * 100);
    }
}
