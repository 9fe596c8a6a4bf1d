//! Default rules engine: a fixed tile loop with purchasable streets.
//!
//! Deliberately small. Streets can be bought and built up, tax tiles charge
//! the roller, bonus tiles pay out, everything else is a no-op. Rooms that
//! need richer rules plug their own [`GameEngine`] implementation into the
//! registry instead.

use rand::{Rng, SeedableRng, rngs::StdRng};

use super::{EngineError, GameEngine, Money, MoveOutcome, OutcomeKind, TileId, Username};

const BOARD_TILES: usize = 24;
const TAX_AMOUNT: Money = 150;
const BONUS_AMOUNT: Money = 200;

#[derive(Clone, Debug, PartialEq)]
enum Tile {
    Street {
        price: Money,
        owner: Option<usize>,
        level: u8,
    },
    Tax(Money),
    Bonus(Money),
    Free,
}

#[derive(Clone, Debug)]
struct Seat {
    name: Username,
    cash: Money,
    position: usize,
}

/// In-memory board engine for one room.
pub struct BoardEngine {
    seats: Vec<Seat>,
    tiles: Vec<Tile>,
    current: usize,
    rng: StdRng,
}

impl BoardEngine {
    /// Create an engine with OS-seeded dice.
    pub fn new(players: Vec<Username>, starting_cash: Money) -> Self {
        Self::with_rng(players, starting_cash, StdRng::from_os_rng())
    }

    /// Create an engine with deterministic dice.
    pub fn with_seed(players: Vec<Username>, starting_cash: Money, seed: u64) -> Self {
        Self::with_rng(players, starting_cash, StdRng::seed_from_u64(seed))
    }

    fn with_rng(players: Vec<Username>, starting_cash: Money, rng: StdRng) -> Self {
        let seats = players
            .into_iter()
            .map(|name| Seat {
                name,
                cash: starting_cash,
                position: 0,
            })
            .collect();
        Self {
            seats,
            tiles: default_tiles(),
            current: 0,
            rng,
        }
    }

    fn seat_index(&self, player: &str) -> Result<usize, EngineError> {
        self.seats
            .iter()
            .position(|seat| seat.name == player)
            .ok_or(EngineError::UnknownPlayer)
    }

    fn street_price(&self, tile: TileId) -> Result<Money, EngineError> {
        match self.tiles.get(tile as usize) {
            Some(Tile::Street { price, .. }) => Ok(*price),
            _ => Err(EngineError::InvalidTile(tile)),
        }
    }

    fn advance_turn(&mut self) {
        self.current = (self.current + 1) % self.seats.len();
    }

    fn classify(&self, roller: usize) -> OutcomeKind {
        let seat = &self.seats[roller];
        let tile = seat.position as TileId;
        match &self.tiles[seat.position] {
            Tile::Street {
                owner: None, price, ..
            } => {
                if seat.cash >= *price {
                    OutcomeKind::BuyLandOption { tile }
                } else {
                    OutcomeKind::Nothing
                }
            }
            Tile::Street {
                owner: Some(owner),
                price,
                ..
            } if *owner == roller => {
                if seat.cash >= construction_cost(*price) {
                    OutcomeKind::ConstructionOption { tile }
                } else {
                    OutcomeKind::Nothing
                }
            }
            Tile::Street { .. } => OutcomeKind::Payment,
            Tile::Tax(_) => OutcomeKind::Payment,
            Tile::Bonus(_) => OutcomeKind::Reward,
            Tile::Free => OutcomeKind::Nothing,
        }
    }

    fn describe(&self, roller: usize, kind: &OutcomeKind) -> String {
        let seat = &self.seats[roller];
        match (kind, &self.tiles[seat.position]) {
            (OutcomeKind::BuyLandOption { tile }, Tile::Street { price, .. }) => {
                format!("{} may buy tile {} for ${}", seat.name, tile, price)
            }
            (OutcomeKind::ConstructionOption { tile }, Tile::Street { price, level, .. }) => {
                format!(
                    "{} may build level {} on tile {} for ${}",
                    seat.name,
                    level + 1,
                    tile,
                    construction_cost(*price)
                )
            }
            (
                OutcomeKind::Payment,
                Tile::Street {
                    price,
                    level,
                    owner,
                },
            ) => {
                let landlord = owner
                    .map(|index| self.seats[index].name.as_str())
                    .unwrap_or("the bank");
                format!(
                    "{} pays ${} rent to {}",
                    seat.name,
                    rent(*price, *level),
                    landlord
                )
            }
            (OutcomeKind::Payment, Tile::Tax(amount)) => {
                format!("{} pays ${} tax", seat.name, amount)
            }
            (OutcomeKind::Reward, Tile::Bonus(amount)) => {
                format!("{} collects a ${} bonus", seat.name, amount)
            }
            _ => format!("{} rests on tile {}", seat.name, seat.position),
        }
    }
}

impl GameEngine for BoardEngine {
    fn roll(&mut self) -> MoveOutcome {
        let steps = self.rng.random_range(1..=6) + self.rng.random_range(1..=6);
        let roller = self.current;
        self.seats[roller].position =
            (self.seats[roller].position + steps as usize) % self.tiles.len();
        let kind = self.classify(roller);
        let description = self.describe(roller, &kind);
        MoveOutcome {
            steps,
            description,
            kind,
        }
    }

    fn apply(&mut self, outcome: &MoveOutcome) -> Result<(), EngineError> {
        let roller = self.current;
        match &outcome.kind {
            OutcomeKind::BuyLandOption { tile } => {
                let price = self.street_price(*tile)?;
                if self.seats[roller].cash < price {
                    return Err(EngineError::InsufficientFunds);
                }
                if let Some(Tile::Street { owner, .. }) = self.tiles.get_mut(*tile as usize) {
                    *owner = Some(roller);
                }
                self.seats[roller].cash -= price;
            }
            OutcomeKind::ConstructionOption { tile } => {
                let cost = construction_cost(self.street_price(*tile)?);
                if self.seats[roller].cash < cost {
                    return Err(EngineError::InsufficientFunds);
                }
                if let Some(Tile::Street { level, .. }) = self.tiles.get_mut(*tile as usize) {
                    *level += 1;
                }
                self.seats[roller].cash -= cost;
            }
            OutcomeKind::Payment => match &self.tiles[self.seats[roller].position] {
                Tile::Street {
                    price,
                    level,
                    owner,
                } => {
                    let due = rent(*price, *level);
                    let landlord = *owner;
                    self.seats[roller].cash -= due;
                    if let Some(landlord) = landlord {
                        self.seats[landlord].cash += due;
                    }
                }
                Tile::Tax(amount) => {
                    let amount = *amount;
                    self.seats[roller].cash -= amount;
                }
                _ => {}
            },
            OutcomeKind::Reward => {
                if let Tile::Bonus(amount) = &self.tiles[self.seats[roller].position] {
                    let amount = *amount;
                    self.seats[roller].cash += amount;
                }
            }
            OutcomeKind::Nothing | OutcomeKind::Other => {}
        }
        self.advance_turn();
        Ok(())
    }

    fn current_player(&self) -> Username {
        self.seats[self.current].name.clone()
    }

    fn players(&self) -> Vec<Username> {
        self.seats.iter().map(|seat| seat.name.clone()).collect()
    }

    fn cash_sheet(&self) -> Vec<Money> {
        self.seats.iter().map(|seat| seat.cash).collect()
    }

    fn cash(&self, player: &str) -> Result<Money, EngineError> {
        Ok(self.seats[self.seat_index(player)?].cash)
    }

    fn position(&self, player: &str) -> Result<TileId, EngineError> {
        Ok(self.seats[self.seat_index(player)?].position as TileId)
    }

    fn build_level(&self, tile: TileId) -> Result<u8, EngineError> {
        match self.tiles.get(tile as usize) {
            Some(Tile::Street { level, .. }) => Ok(*level),
            _ => Err(EngineError::InvalidTile(tile)),
        }
    }
}

fn construction_cost(price: Money) -> Money {
    price / 2
}

fn rent(price: Money, level: u8) -> Money {
    price / 5 * (Money::from(level) + 1)
}

fn default_tiles() -> Vec<Tile> {
    (0..BOARD_TILES)
        .map(|index| match index {
            0 | 12 => Tile::Free,
            6 => Tile::Bonus(BONUS_AMOUNT),
            18 => Tile::Tax(TAX_AMOUNT),
            _ => Tile::Street {
                price: 100 + 20 * (index as Money % 10),
                owner: None,
                level: 0,
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_player_engine() -> BoardEngine {
        BoardEngine::with_seed(vec!["alice".to_string(), "bob".to_string()], 1_500, 7)
    }

    #[test]
    fn test_seeded_dice_are_deterministic() {
        let mut first = two_player_engine();
        let mut second = two_player_engine();
        assert_eq!(first.roll(), second.roll());
    }

    #[test]
    fn test_roll_moves_only_the_current_player() {
        let mut engine = two_player_engine();
        let outcome = engine.roll();
        assert_eq!(engine.position("alice").unwrap(), outcome.steps);
        assert_eq!(engine.position("bob").unwrap(), 0);
        assert_eq!(engine.current_player(), "alice");
    }

    #[test]
    fn test_buy_deducts_price_from_buyer_only() {
        let mut engine = two_player_engine();
        engine.seats[0].position = 3;
        let outcome = MoveOutcome {
            steps: 3,
            description: String::new(),
            kind: OutcomeKind::BuyLandOption { tile: 3 },
        };
        engine.apply(&outcome).unwrap();
        assert_eq!(engine.cash("alice").unwrap(), 1_500 - 160);
        assert_eq!(engine.cash("bob").unwrap(), 1_500);
        assert_eq!(engine.current_player(), "bob");
    }

    #[test]
    fn test_rent_transfers_to_the_owner() {
        let mut engine = two_player_engine();
        engine.tiles[3] = Tile::Street {
            price: 160,
            owner: Some(1),
            level: 0,
        };
        engine.seats[0].position = 3;
        let outcome = MoveOutcome {
            steps: 3,
            description: String::new(),
            kind: OutcomeKind::Payment,
        };
        engine.apply(&outcome).unwrap();
        assert_eq!(engine.cash("alice").unwrap(), 1_500 - 32);
        assert_eq!(engine.cash("bob").unwrap(), 1_500 + 32);
    }

    #[test]
    fn test_construction_raises_build_level() {
        let mut engine = two_player_engine();
        engine.tiles[3] = Tile::Street {
            price: 160,
            owner: Some(0),
            level: 0,
        };
        engine.seats[0].position = 3;
        let outcome = MoveOutcome {
            steps: 3,
            description: String::new(),
            kind: OutcomeKind::ConstructionOption { tile: 3 },
        };
        engine.apply(&outcome).unwrap();
        assert_eq!(engine.build_level(3).unwrap(), 1);
        assert_eq!(engine.cash("alice").unwrap(), 1_500 - 80);
    }

    #[test]
    fn test_nothing_only_advances_the_turn() {
        let mut engine = two_player_engine();
        let outcome = MoveOutcome {
            steps: 2,
            description: String::new(),
            kind: OutcomeKind::Nothing,
        };
        engine.apply(&outcome).unwrap();
        assert_eq!(engine.cash_sheet(), vec![1_500, 1_500]);
        assert_eq!(engine.current_player(), "bob");
    }

    #[test]
    fn test_unknown_player_is_an_error() {
        let engine = two_player_engine();
        assert_eq!(engine.cash("mallory"), Err(EngineError::UnknownPlayer));
    }

    #[test]
    fn test_build_level_on_non_street_is_an_error() {
        let engine = two_player_engine();
        assert_eq!(engine.build_level(0), Err(EngineError::InvalidTile(0)));
    }
}
