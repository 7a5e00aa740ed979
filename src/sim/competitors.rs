use crate::sim::catalog::{GENRES, NPC_GAME_NAMES, NPC_STUDIOS, Size};
use crate::sim::economy::{self, DemandInputs};
use rand::Rng;
use rand::seq::SliceRandom;

pub const MIN_COMPETITORS: usize = 4;
pub const MAX_COMPETITORS: usize = 6;

#[derive(Debug, Clone, PartialEq)]
pub struct CompetitorResult {
    pub studio: &'static str,
    pub game: &'static str,
    pub genre: &'static str,
    pub size: Size,
    pub price: i64,
    pub buyers: i64,
    pub profit: i64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompetitorRelease {
    pub studio: &'static str,
    pub game: &'static str,
    pub genre: &'static str,
    pub size: Size,
    pub price: i64,
}

fn pick(pool: &[&'static str], rng: &mut impl Rng) -> &'static str {
    pool.choose(rng).copied().unwrap_or_default()
}

pub fn random_competitor(rng: &mut impl Rng) -> CompetitorRelease {
    let studio = pick(&NPC_STUDIOS, rng);
    let game = pick(&NPC_GAME_NAMES, rng);
    let genre = pick(&GENRES, rng);
    let size = Size::ALL[rng.gen_range(0..Size::ALL.len())];
    let (min, max) = size.price_range();
    let price = rng.gen_range(min..=max);
    CompetitorRelease {
        studio,
        game,
        genre,
        size,
        price,
    }
}

/// Sums `ticks` simulated sales ticks for a rival. The fan factor is rolled
/// once per release rather than tracked.
pub fn simulate_competitor(
    release: CompetitorRelease,
    hot_genre: &str,
    ticks: u64,
    rng: &mut impl Rng,
) -> CompetitorResult {
    let fan_factor = 1.0 + rng.gen_range(0..=100) as f64 / 200.0;
    let inputs = DemandInputs::new(
        release.size,
        release.price,
        fan_factor,
        release.genre,
        hot_genre,
    );
    let buyers: i64 = (0..ticks)
        .map(|_| economy::buyer_increase(&inputs, rng))
        .sum();
    CompetitorResult {
        studio: release.studio,
        game: release.game,
        genre: release.genre,
        size: release.size,
        price: release.price,
        buyers,
        profit: buyers * release.price,
    }
}

pub fn roll_competitors(hot_genre: &str, ticks: u64, rng: &mut impl Rng) -> Vec<CompetitorResult> {
    let count = rng.gen_range(MIN_COMPETITORS..=MAX_COMPETITORS);
    (0..count)
        .map(|_| {
            let release = random_competitor(rng);
            simulate_competitor(release, hot_genre, ticks, rng)
        })
        .collect()
}
