use std::fmt;
use std::str::FromStr;

pub const STARTING_MONEY: i64 = 1_000;
pub const GENRE_PAGE_SIZE: usize = 5;
pub const TICK_INTERVAL_SECS: u64 = 10;
pub const EVENT_INTERVAL_SECS: u64 = 10;
pub const EVENT_DISPLAY_MS: u64 = 4_000;
pub const EVENT_CHANCE: f64 = 0.5;
pub const HOT_GENRE_BOOST: f64 = 1.5;
// anything priced above this sells nothing, whatever the size
pub const PRICE_CEILING: i64 = 150;

pub const GENRES: [&str; 19] = [
    "Action",
    "Adventure",
    "RPG",
    "Puzzle",
    "Simulation",
    "Strategy",
    "Horror",
    "Sports",
    "Platformers",
    "FPS",
    "Fighting",
    "RTS",
    "Racing",
    "Casual",
    "MMORPGs",
    "Stealth",
    "Party",
    "Survival",
    "Battle Royale",
];

pub const NPC_STUDIOS: [&str; 21] = [
    "BitForge",
    "PixelPunk",
    "Dreambyte",
    "CodeCrafters",
    "NeonArcade",
    "IndieNova",
    "Quantum Games",
    "RetroSoft",
    "ActiveVision Blizzard",
    "Error Arts",
    "UbiHard",
    "Paperstar Games",
    "Nintendon't",
    "GameStation",
    "SoftBox Studios",
    "Bethesda Hardworks",
    "Exhaust Valve",
    "Crapcom",
    "DarkSoulsWare",
    "Triangle Enix",
    "WdR Studios",
];

pub const NPC_GAME_NAMES: [&str; 28] = [
    "Skybound",
    "Dungeon Dash",
    "Mecha Wars",
    "Puzzle Planet",
    "Frostbyte",
    "Cyber Run",
    "Dragon's Quest",
    "Shadow City",
    "Pixel Rally",
    "Star Arena",
    "Ghost Shift",
    "Battle Grid",
    "Mystic Valley",
    "Hero's Path",
    "Astro Jump",
    "Rogue Signal",
    "Call of Booty",
    "Small Heist Sedan",
    "Brown Dead Savings",
    "The Younger Scrolls",
    "Middle-Aged Fantasy",
    "Couchfield",
    "The Chores",
    "Barbarization",
    "Mycraft",
    "Plumber Dude Adventures",
    "Within Them",
    "Weaknight",
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarketEvent {
    pub message: &'static str,
    pub sales_multiplier: f64,
    pub fan_delta: i64,
}

pub const MARKET_EVENTS: [MarketEvent; 5] = [
    MarketEvent {
        message: "Your game was featured on a popular website! Sales spike!",
        sales_multiplier: 1.5,
        fan_delta: 0,
    },
    MarketEvent {
        message: "A famous streamer played your game! Fans surge!",
        sales_multiplier: 1.3,
        fan_delta: 10,
    },
    MarketEvent {
        message: "A bug was discovered in your game. Sales slow down.",
        sales_multiplier: 0.7,
        fan_delta: -5,
    },
    MarketEvent {
        message: "A competitor released a similar game. Sales dip.",
        sales_multiplier: 0.8,
        fan_delta: -2,
    },
    MarketEvent {
        message: "Your game received great reviews! Sales increase.",
        sales_multiplier: 1.2,
        fan_delta: 5,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Size {
    Small,
    Medium,
    Big,
}

impl Size {
    pub const ALL: [Size; 3] = [Size::Small, Size::Medium, Size::Big];

    pub fn name(self) -> &'static str {
        match self {
            Size::Small => "small",
            Size::Medium => "medium",
            Size::Big => "big",
        }
    }

    pub fn cost(self) -> i64 {
        match self {
            Size::Small => 100,
            Size::Medium => 500,
            Size::Big => 1_000,
        }
    }

    pub fn duration_secs(self) -> u64 {
        match self {
            Size::Small => 30,
            Size::Medium => 60,
            Size::Big => 120,
        }
    }

    pub fn days(self) -> u64 {
        match self {
            Size::Small => 7,
            Size::Medium => 21,
            Size::Big => 60,
        }
    }

    pub fn price_range(self) -> (i64, i64) {
        match self {
            Size::Small => (5, 50),
            Size::Medium => (10, 100),
            Size::Big => (20, 200),
        }
    }

    pub fn base_rate(self) -> i64 {
        match self {
            Size::Small => 20,
            Size::Medium => 50,
            Size::Big => 100,
        }
    }

    pub fn sales_duration_secs(self) -> u64 {
        match self {
            Size::Small => 60,
            Size::Medium => 120,
            Size::Big => 180,
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownSize;

impl FromStr for Size {
    type Err = UnknownSize;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Size::ALL
            .into_iter()
            .find(|size| size.name().eq_ignore_ascii_case(s))
            .ok_or(UnknownSize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_parse_case_insensitively() {
        assert_eq!("SMALL".parse(), Ok(Size::Small));
        assert_eq!(" Medium ".parse(), Ok(Size::Medium));
        assert_eq!("big".parse(), Ok(Size::Big));
        assert_eq!("huge".parse::<Size>(), Err(UnknownSize));
    }

    #[test]
    fn small_project_tables() {
        assert_eq!(Size::Small.cost(), 100);
        assert_eq!(Size::Small.duration_secs(), 30);
        assert_eq!(Size::Small.days(), 7);
        assert_eq!(Size::Small.price_range(), (5, 50));
        assert_eq!(Size::Small.sales_duration_secs(), 60);
        assert_eq!(Size::Small.sales_duration_secs() / TICK_INTERVAL_SECS, 6);
    }

    #[test]
    fn every_size_has_a_usable_price_range() {
        for size in Size::ALL {
            let (min, max) = size.price_range();
            assert!(min < max, "{size} has an empty price range");
            assert!(size.base_rate() >= 1);
            assert_eq!(size.sales_duration_secs() % TICK_INTERVAL_SECS, 0);
        }
    }

    #[test]
    fn genre_pages_cover_the_catalog() {
        assert!(GENRES.len() >= GENRE_PAGE_SIZE);
        assert_eq!(GENRES.len(), 19);
    }
}
