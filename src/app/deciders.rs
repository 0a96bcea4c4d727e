use crate::domain::model::{Choice, PlayerId, Query};
use crate::domain::ports::Decider;
use crate::utils::error::{MonopolyError, Result};
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// Always takes the first offered option.
#[derive(Debug, Default, Clone)]
pub struct FirstChoiceDecider;

#[async_trait]
impl Decider for FirstChoiceDecider {
    async fn choose(
        &mut self,
        _player: PlayerId,
        _query: &Query,
        _options: &[Choice],
    ) -> Result<usize> {
        Ok(0)
    }
}

/// Picks uniformly at random among the offered options.
#[derive(Debug)]
pub struct RandomDecider {
    rng: StdRng,
}

impl RandomDecider {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomDecider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Decider for RandomDecider {
    async fn choose(
        &mut self,
        _player: PlayerId,
        _query: &Query,
        options: &[Choice],
    ) -> Result<usize> {
        if options.is_empty() {
            return Err(MonopolyError::InvalidChoice { index: 0, count: 0 });
        }
        Ok(self.rng.gen_range(0..options.len()))
    }
}

/// Plays back a fixed list of picks, in order. Used to drive exact
/// scenarios in tests and replays; an exhausted script is an error.
#[derive(Debug, Default, Clone)]
pub struct ScriptedDecider {
    picks: VecDeque<usize>,
}

impl ScriptedDecider {
    pub fn new(picks: impl IntoIterator<Item = usize>) -> Self {
        Self {
            picks: picks.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.picks.len()
    }
}

#[async_trait]
impl Decider for ScriptedDecider {
    async fn choose(
        &mut self,
        player: PlayerId,
        query: &Query,
        options: &[Choice],
    ) -> Result<usize> {
        match self.picks.pop_front() {
            Some(pick) => Ok(pick),
            None => {
                tracing::warn!("scripted decider exhausted on {:?} for {}", query, player);
                Err(MonopolyError::InvalidChoice {
                    index: usize::MAX,
                    count: options.len(),
                })
            }
        }
    }
}

/// Fails every query. A game wired with this decider behaves like the
/// engine with nobody listening: the first query is an error.
#[derive(Debug, Default, Clone)]
pub struct NullDecider;

#[async_trait]
impl Decider for NullDecider {
    async fn choose(
        &mut self,
        _player: PlayerId,
        _query: &Query,
        _options: &[Choice],
    ) -> Result<usize> {
        Err(MonopolyError::NoDecider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::PropertyId;

    fn options() -> Vec<Choice> {
        vec![
            Choice::Buy {
                property: PropertyId(0),
                price: 60,
            },
            Choice::Decline,
        ]
    }

    #[tokio::test]
    async fn test_first_choice_always_picks_zero() {
        let mut decider = FirstChoiceDecider;
        let query = Query::BuyProperty {
            property: PropertyId(0),
        };
        for _ in 0..5 {
            assert_eq!(
                decider.choose(PlayerId(0), &query, &options()).await.unwrap(),
                0
            );
        }
    }

    #[tokio::test]
    async fn test_random_decider_stays_in_range() {
        let mut decider = RandomDecider::seeded(11);
        let query = Query::IncomeTax;
        for _ in 0..50 {
            let pick = decider.choose(PlayerId(0), &query, &options()).await.unwrap();
            assert!(pick < 2);
        }
    }

    #[tokio::test]
    async fn test_scripted_decider_replays_then_errors() {
        let mut decider = ScriptedDecider::new([1, 0]);
        let query = Query::IncomeTax;
        assert_eq!(
            decider.choose(PlayerId(0), &query, &options()).await.unwrap(),
            1
        );
        assert_eq!(
            decider.choose(PlayerId(0), &query, &options()).await.unwrap(),
            0
        );
        assert!(decider.choose(PlayerId(0), &query, &options()).await.is_err());
    }

    #[tokio::test]
    async fn test_null_decider_reports_no_decider() {
        let mut decider = NullDecider;
        let result = decider
            .choose(PlayerId(0), &Query::IncomeTax, &options())
            .await;
        assert!(matches!(result, Err(MonopolyError::NoDecider)));
    }
}
