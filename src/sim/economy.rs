use crate::sim::catalog::{HOT_GENRE_BOOST, PRICE_CEILING, Size};
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DemandInputs {
    pub size: Size,
    pub price: i64,
    pub fan_factor: f64,
    pub genre_boost: f64,
}

impl DemandInputs {
    pub fn new(size: Size, price: i64, fan_factor: f64, genre: &str, hot_genre: &str) -> Self {
        Self {
            size,
            price,
            fan_factor,
            genre_boost: genre_boost(genre, hot_genre),
        }
    }
}

pub fn price_factor(size: Size, price: i64) -> f64 {
    let (min, max) = size.price_range();
    let position = (price - min) as f64 / (max - min) as f64;
    (1.5 - position).max(0.1)
}

pub fn player_fan_factor(fans: u64) -> f64 {
    1.0 + fans as f64 / 200.0
}

pub fn genre_boost(genre: &str, hot_genre: &str) -> f64 {
    if genre == hot_genre { HOT_GENRE_BOOST } else { 1.0 }
}

pub fn buyer_increase(inputs: &DemandInputs, rng: &mut impl Rng) -> i64 {
    if inputs.price > PRICE_CEILING {
        return 0;
    }
    let roll = rng.gen_range(1..=inputs.size.base_rate());
    let scaled = roll as f64
        * price_factor(inputs.size, inputs.price)
        * inputs.fan_factor
        * inputs.genre_boost;
    scaled.floor() as i64
}

/// Rescales the most recent tick's delta by `multiplier`, truncating the
/// adjustment toward zero. Histories shorter than two samples have no delta
/// and are left alone.
pub fn apply_event_multiplier(history: &mut [i64], multiplier: f64) -> bool {
    let [.., previous, last] = history else {
        return false;
    };
    let delta = *last - *previous;
    *last += (delta as f64 * (multiplier - 1.0)) as i64;
    true
}

pub fn apply_fan_delta(fans: u64, delta: i64) -> u64 {
    if delta >= 0 {
        fans.saturating_add(delta as u64)
    } else {
        fans.saturating_sub(delta.unsigned_abs())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FanChange {
    Gained(u64),
    Lost(u64),
}

pub fn settle_fans(total_buyers: i64, fans: u64, rng: &mut impl Rng) -> (u64, FanChange) {
    if total_buyers > 0 {
        let total = total_buyers as u64;
        let rolled = rng.gen_range(5..=20u64) + total / 50;
        let gained = rolled.min(total / 2);
        (fans + gained, FanChange::Gained(gained))
    } else {
        let lost = rng.gen_range(0..=5u64);
        (fans.saturating_sub(lost), FanChange::Lost(lost))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn bottom_of_range_gives_full_price_factor() {
        for size in Size::ALL {
            let (min, _) = size.price_range();
            assert_eq!(price_factor(size, min), 1.5);
        }
    }

    #[test]
    fn top_of_range_gives_half_price_factor() {
        assert!((price_factor(Size::Small, 50) - 0.5).abs() < 1e-9);
        assert!((price_factor(Size::Big, 200) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn overpriced_games_sell_nothing() {
        let mut rng = StdRng::seed_from_u64(7);
        let inputs = DemandInputs {
            size: Size::Big,
            price: 200,
            fan_factor: 3.0,
            genre_boost: HOT_GENRE_BOOST,
        };
        for _ in 0..100 {
            assert_eq!(buyer_increase(&inputs, &mut rng), 0);
        }
    }

    #[test]
    fn hot_genre_is_boosted() {
        assert_eq!(genre_boost("RPG", "RPG"), 1.5);
        assert_eq!(genre_boost("RPG", "Horror"), 1.0);
    }

    #[test]
    fn event_multiplier_scales_last_delta() {
        let mut history = vec![-100, -80, -40];
        assert!(apply_event_multiplier(&mut history, 1.5));
        assert_eq!(history, vec![-100, -80, -20]);

        let mut history = vec![-100, -90];
        apply_event_multiplier(&mut history, 0.7);
        assert_eq!(history, vec![-100, -93]);
    }

    #[test]
    fn event_multiplier_needs_two_samples() {
        let mut history = vec![-100];
        assert!(!apply_event_multiplier(&mut history, 1.5));
        assert_eq!(history, vec![-100]);
    }

    #[test]
    fn fan_delta_is_floored_at_zero() {
        assert_eq!(apply_fan_delta(3, -5), 0);
        assert_eq!(apply_fan_delta(3, 10), 13);
    }

    #[test]
    fn unsold_games_lose_fans() {
        let mut rng = StdRng::seed_from_u64(1);
        let (fans, change) = settle_fans(0, 2, &mut rng);
        let FanChange::Lost(lost) = change else {
            panic!("expected a loss, got {change:?}");
        };
        assert!(lost <= 5);
        assert_eq!(fans, 2u64.saturating_sub(lost));
    }

    proptest! {
        #[test]
        fn increase_is_bounded(seed in any::<u64>(), price in 5i64..=150, fans in 0u64..1_000) {
            let mut rng = StdRng::seed_from_u64(seed);
            let size = Size::Small;
            let inputs = DemandInputs {
                size,
                price,
                fan_factor: player_fan_factor(fans),
                genre_boost: HOT_GENRE_BOOST,
            };
            let increase = buyer_increase(&inputs, &mut rng);
            let cap = size.base_rate() as f64
                * price_factor(size, price)
                * player_fan_factor(fans)
                * HOT_GENRE_BOOST;
            prop_assert!(increase >= 0);
            prop_assert!(increase as f64 <= cap);
        }

        #[test]
        fn price_factor_stays_in_bounds(price in -500i64..500) {
            for size in Size::ALL {
                let factor = price_factor(size, price);
                prop_assert!(factor >= 0.1);
                if price >= size.price_range().0 {
                    prop_assert!(factor <= 1.5);
                }
            }
        }

        #[test]
        fn fan_gain_is_capped_by_half_the_buyers(seed in any::<u64>(), buyers in 1i64..100_000, fans in 0u64..10_000) {
            let mut rng = StdRng::seed_from_u64(seed);
            let (after, change) = settle_fans(buyers, fans, &mut rng);
            let FanChange::Gained(gained) = change else {
                return Err(TestCaseError::fail("positive sales must gain fans"));
            };
            prop_assert!(gained <= buyers as u64 / 2);
            prop_assert_eq!(after, fans + gained);
        }

        #[test]
        fn fan_loss_never_goes_negative(seed in any::<u64>(), buyers in -5_000i64..=0, fans in 0u64..10) {
            let mut rng = StdRng::seed_from_u64(seed);
            let (after, _) = settle_fans(buyers, fans, &mut rng);
            prop_assert!(after <= fans);
        }
    }
}
