use super::catalog::{
    EVENT_CHANCE, EVENT_DISPLAY_MS, EVENT_INTERVAL_SECS, GENRE_PAGE_SIZE, GENRES, MARKET_EVENTS,
    STARTING_MONEY, Size, TICK_INTERVAL_SECS,
};
use super::command::{Command, CommandError, HELP_TEXT};
use super::competitors::{self, CompetitorResult};
use super::economy::{self, DemandInputs, FanChange};
use super::snapshot::{
    DevelopmentView, GenreOption, MESSAGE_WRAP_COLUMN, RenderSnapshot, SalesGraph, StudioStats,
    wrap_message,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::mem;
use std::num::{IntErrorKind, ParseIntError};
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, info};

const WELCOME: &str = "Welcome to Game Dev Simulation!";
const NAME_PROMPT: &str = "What do you want to name your game?";
const GENRE_PROMPT: &str = "Choose a genre (1-5, '<' or '>'):";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudioState {
    pub money: i64,
    pub days: u64,
    pub fans: u64,
    pub hot_genre: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Idle,
    AwaitingName,
    AwaitingGenre,
    AwaitingPrice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingProject {
    pub size: Size,
    pub name: String,
    pub genre: &'static str,
    pub price: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveDevelopment {
    pub project: PendingProject,
    pub end_ms: u64,
    history: Vec<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveEvent {
    pub message: &'static str,
    pub expires_ms: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SalesSession {
    pub project: PendingProject,
    pub history: Vec<i64>,
    pub buyers_max: i64,
    pub total_duration_secs: u64,
    pub started_ms: u64,
    pub last_tick_ms: u64,
    pub last_event_check_ms: u64,
    pub competitors: Vec<CompetitorResult>,
    pub event: Option<ActiveEvent>,
}

impl SalesSession {
    fn time_left_secs(&self, now_ms: u64) -> u64 {
        let elapsed = now_ms.saturating_sub(self.started_ms) / 1_000;
        self.total_duration_secs.saturating_sub(elapsed)
    }

    fn is_complete(&self) -> bool {
        self.history.len() as u64 > self.total_duration_secs / TICK_INTERVAL_SECS + 1
    }

    fn last_total(&self) -> i64 {
        self.history.last().copied().unwrap_or_default()
    }
}

/// The single linear pipeline. Each stage carries exactly the data gathered
/// so far, so no two stages can be live at once.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Idle,
    AwaitingName {
        size: Size,
    },
    AwaitingGenre {
        size: Size,
        name: String,
    },
    AwaitingPrice {
        size: Size,
        name: String,
        genre: &'static str,
    },
    Developing(ActiveDevelopment),
    Selling(SalesSession),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenreChoiceError {
    #[error("Invalid choice. Enter 1-5, '<', or '>'.")]
    Invalid,
    #[error("Invalid genre choice.")]
    OutOfList,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceError {
    #[error("Please enter a valid number for the price.")]
    NotANumber,
    #[error("Price must be between ${min} and ${max}.")]
    OutOfRange { min: i64, max: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GenreChoice {
    Previous,
    Next,
    Pick(usize),
}

impl FromStr for GenreChoice {
    type Err = GenreChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "<" => Ok(GenreChoice::Previous),
            ">" => Ok(GenreChoice::Next),
            digits if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) => {
                match digits.parse::<usize>() {
                    Ok(n) if (1..=GENRE_PAGE_SIZE).contains(&n) => Ok(GenreChoice::Pick(n)),
                    _ => Err(GenreChoiceError::Invalid),
                }
            }
            _ => Err(GenreChoiceError::Invalid),
        }
    }
}

fn parse_price(text: &str, size: Size) -> Result<i64, PriceError> {
    let (min, max) = size.price_range();
    let price: i64 = text.trim().parse().map_err(|err: ParseIntError| match err.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
            PriceError::OutOfRange { min, max }
        }
        _ => PriceError::NotANumber,
    })?;
    if !(min..=max).contains(&price) {
        return Err(PriceError::OutOfRange { min, max });
    }
    Ok(price)
}

fn secs_to_ms(secs: u64) -> u64 {
    secs * 1_000
}

pub struct Game {
    pub state: StudioState,
    phase: Phase,
    genre_offset: usize,
    input: String,
    message: String,
    rng: StdRng,
}

impl Game {
    pub fn new(mut rng: StdRng) -> Self {
        let hot_genre = random_genre(&mut rng);
        Self {
            state: StudioState {
                money: STARTING_MONEY,
                days: 0,
                fans: 0,
                hot_genre,
            },
            phase: Phase::Idle,
            genre_offset: 0,
            input: String::new(),
            message: WELCOME.to_string(),
            rng,
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    pub fn input_mode(&self) -> InputMode {
        match self.phase {
            Phase::AwaitingName { .. } => InputMode::AwaitingName,
            Phase::AwaitingGenre { .. } => InputMode::AwaitingGenre,
            Phase::AwaitingPrice { .. } => InputMode::AwaitingPrice,
            Phase::Idle | Phase::Developing(_) | Phase::Selling(_) => InputMode::Idle,
        }
    }

    pub fn is_tracking_sales(&self) -> bool {
        matches!(self.phase, Phase::Selling(_))
    }

    pub fn append_char(&mut self, ch: char) {
        if !ch.is_control() {
            self.input.push(ch);
        }
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    pub fn submit(&mut self, now_ms: u64) -> Flow {
        let line = mem::take(&mut self.input);
        self.submit_line(&line, now_ms)
    }

    pub fn submit_line(&mut self, line: &str, now_ms: u64) -> Flow {
        match self.input_mode() {
            InputMode::Idle => return self.interpret(line),
            InputMode::AwaitingName => self.submit_name(line),
            InputMode::AwaitingGenre => self.submit_genre(line),
            InputMode::AwaitingPrice => self.submit_price(line, now_ms),
        }
        Flow::Continue
    }

    pub fn interpret(&mut self, line: &str) -> Flow {
        if self.phase != Phase::Idle {
            debug!(line, "command rejected while busy");
            self.set_message(CommandError::Busy.to_string());
            return Flow::Continue;
        }
        match line.parse::<Command>() {
            Ok(Command::Develop(size)) => match self.begin_project(size) {
                Ok(()) => self.set_message(NAME_PROMPT),
                Err(err) => self.set_message(err.to_string()),
            },
            Ok(Command::Status) => self.set_message(self.status_line()),
            Ok(Command::Help) => self.set_message(HELP_TEXT),
            Ok(Command::Quit) => {
                info!("quit requested");
                return Flow::Quit;
            }
            Err(err) => {
                debug!(line, %err, "command not understood");
                self.set_message(err.to_string());
            }
        }
        Flow::Continue
    }

    pub fn status_line(&self) -> String {
        format!(
            "Money: {} | Days: {} | Fans: {} | Hot Genre: {}",
            self.state.money, self.state.days, self.state.fans, self.state.hot_genre
        )
    }

    fn begin_project(&mut self, size: Size) -> Result<(), CommandError> {
        let cost = size.cost();
        if self.state.money < cost {
            return Err(CommandError::InsufficientFunds {
                size,
                cost,
                money: self.state.money,
            });
        }
        self.phase = Phase::AwaitingName { size };
        Ok(())
    }

    fn submit_name(&mut self, line: &str) {
        let Phase::AwaitingName { size } = self.phase else {
            return;
        };
        let name = line.trim();
        if name.is_empty() {
            self.set_message(NAME_PROMPT);
            return;
        }
        self.phase = Phase::AwaitingGenre {
            size,
            name: name.to_string(),
        };
        self.set_message(GENRE_PROMPT);
    }

    fn submit_genre(&mut self, line: &str) {
        let choice = match line.parse::<GenreChoice>() {
            Ok(choice) => choice,
            Err(err) => {
                self.set_message(err.to_string());
                return;
            }
        };
        match choice {
            GenreChoice::Previous => {
                self.genre_offset = self.genre_offset.saturating_sub(GENRE_PAGE_SIZE);
                self.set_message(GENRE_PROMPT);
            }
            GenreChoice::Next => {
                let last_page = GENRES.len() - GENRE_PAGE_SIZE;
                self.genre_offset = (self.genre_offset + GENRE_PAGE_SIZE).min(last_page);
                self.set_message(GENRE_PROMPT);
            }
            GenreChoice::Pick(number) => {
                let Some(&genre) = GENRES.get(self.genre_offset + number - 1) else {
                    self.set_message(GenreChoiceError::OutOfList.to_string());
                    return;
                };
                let Phase::AwaitingGenre { size, name } = mem::replace(&mut self.phase, Phase::Idle)
                else {
                    return;
                };
                let (min, max) = size.price_range();
                self.set_message(format!(
                    "Set a price for '{name}' (suggested range: ${min}-${max}):"
                ));
                self.phase = Phase::AwaitingPrice { size, name, genre };
            }
        }
    }

    fn submit_price(&mut self, line: &str, now_ms: u64) {
        let Phase::AwaitingPrice { size, .. } = self.phase else {
            return;
        };
        let price = match parse_price(line, size) {
            Ok(price) => price,
            Err(err) => {
                self.set_message(err.to_string());
                return;
            }
        };
        let Phase::AwaitingPrice { size, name, genre } = mem::replace(&mut self.phase, Phase::Idle)
        else {
            return;
        };
        self.start_development(
            PendingProject {
                size,
                name,
                genre,
                price,
            },
            now_ms,
        );
    }

    /// Pays for `project` and starts its development timer. Callers are
    /// expected to have checked funds already.
    pub fn start_development(&mut self, project: PendingProject, now_ms: u64) {
        let cost = project.size.cost();
        let duration = project.size.duration_secs();
        self.state.money -= cost;
        info!(
            name = %project.name,
            size = %project.size,
            genre = project.genre,
            price = project.price,
            money = self.state.money,
            "development started"
        );
        self.set_message(format!(
            "Started developing '{}' ({}, {}) at ${}! It will take {} seconds.",
            project.name, project.genre, project.size, project.price, duration
        ));
        self.phase = Phase::Developing(ActiveDevelopment {
            project,
            end_ms: now_ms + secs_to_ms(duration),
            history: vec![-cost],
        });
    }

    /// Closes development and opens the sales session. Does nothing unless a
    /// project is in development.
    pub fn finish_development(&mut self, now_ms: u64) {
        let Phase::Developing(dev) = mem::replace(&mut self.phase, Phase::Idle) else {
            return;
        };
        let project = dev.project;
        self.state.days += project.size.days();
        let total_duration_secs = project.size.sales_duration_secs();
        let competitors = competitors::roll_competitors(
            self.state.hot_genre,
            total_duration_secs / TICK_INTERVAL_SECS,
            &mut self.rng,
        );
        info!(
            name = %project.name,
            days = self.state.days,
            rivals = competitors.len(),
            "development finished"
        );
        self.set_message(format!(
            "Development finished for '{}'! Now tracking sales...",
            project.name
        ));
        self.phase = Phase::Selling(SalesSession {
            project,
            history: dev.history,
            buyers_max: 0,
            total_duration_secs,
            started_ms: now_ms,
            last_tick_ms: now_ms,
            last_event_check_ms: now_ms,
            competitors,
            event: None,
        });
    }

    pub fn tick(&mut self, now_ms: u64) -> RenderSnapshot {
        let deadline_passed =
            matches!(&self.phase, Phase::Developing(dev) if now_ms >= dev.end_ms);
        if deadline_passed {
            self.finish_development(now_ms);
        }
        if self.is_tracking_sales() {
            self.roll_market_event(now_ms);
            self.advance_sales(now_ms);
        }
        self.snapshot(now_ms)
    }

    fn roll_market_event(&mut self, now_ms: u64) {
        let Phase::Selling(session) = &mut self.phase else {
            return;
        };
        let since_check = now_ms.saturating_sub(session.last_event_check_ms);
        if since_check <= secs_to_ms(EVENT_INTERVAL_SECS) || session.time_left_secs(now_ms) == 0 {
            return;
        }
        session.last_event_check_ms = now_ms;
        if !self.rng.gen_bool(EVENT_CHANCE) {
            return;
        }
        let Some(event) = MARKET_EVENTS.choose(&mut self.rng).copied() else {
            return;
        };
        session.event = Some(ActiveEvent {
            message: event.message,
            expires_ms: now_ms + EVENT_DISPLAY_MS,
        });
        self.message = format!("{} | {}", self.message, event.message);
        if economy::apply_event_multiplier(&mut session.history, event.sales_multiplier) {
            self.state.fans = economy::apply_fan_delta(self.state.fans, event.fan_delta);
        }
        info!(
            event = event.message,
            buyers = session.last_total(),
            fans = self.state.fans,
            "market event"
        );
    }

    fn advance_sales(&mut self, now_ms: u64) {
        let Phase::Selling(session) = &mut self.phase else {
            return;
        };
        if now_ms.saturating_sub(session.last_tick_ms) < secs_to_ms(TICK_INTERVAL_SECS) {
            return;
        }
        let project = &session.project;
        let inputs = DemandInputs::new(
            project.size,
            project.price,
            economy::player_fan_factor(self.state.fans),
            project.genre,
            self.state.hot_genre,
        );
        let increase = economy::buyer_increase(&inputs, &mut self.rng);
        let buyers = session.last_total() + increase;
        session.history.push(buyers);
        session.buyers_max = session.buyers_max.max(buyers);
        session.last_tick_ms = now_ms;
        debug!(buyers, increase, "sales tick");
        if session.is_complete() {
            self.settle_sales();
        }
    }

    fn settle_sales(&mut self) {
        let Phase::Selling(session) = mem::replace(&mut self.phase, Phase::Idle) else {
            return;
        };
        let project = session.project;
        let total_buyers = session.history.last().copied().unwrap_or_default().max(0);
        let profit = total_buyers * project.price;
        self.state.money += profit;
        let mut message = format!(
            "Sales finished for '{}'. Buyers: {}. Profit: ${}",
            project.name, total_buyers, profit
        );
        let (fans, change) = economy::settle_fans(total_buyers, self.state.fans, &mut self.rng);
        self.state.fans = fans;
        match change {
            FanChange::Gained(gained) => message.push_str(&format!(" | Gained {gained} fans!")),
            FanChange::Lost(0) => {}
            FanChange::Lost(lost) => message.push_str(&format!(" | Lost {lost} fans!")),
        }
        self.set_message(message);
        self.state.hot_genre = random_genre(&mut self.rng);
        info!(
            name = %project.name,
            buyers = total_buyers,
            profit,
            money = self.state.money,
            fans = self.state.fans,
            hot_genre = self.state.hot_genre,
            "sales settled"
        );
    }

    pub fn snapshot(&self, now_ms: u64) -> RenderSnapshot {
        let development = match &self.phase {
            Phase::Developing(dev) => Some(DevelopmentView {
                name: dev.project.name.clone(),
                genre: dev.project.genre,
                size: dev.project.size,
                seconds_left: dev.end_ms.saturating_sub(now_ms).div_ceil(1_000),
            }),
            _ => None,
        };
        let (sales, competitors) = match &self.phase {
            Phase::Selling(session) => (
                Some(self.sales_graph(session, now_ms)),
                session.competitors.clone(),
            ),
            _ => (None, Vec::new()),
        };
        RenderSnapshot {
            message_lines: wrap_message(&self.message, MESSAGE_WRAP_COLUMN),
            prompt: self.prompt(),
            input: self.input.clone(),
            genre_options: self.genre_options(),
            development,
            sales,
            competitors,
            stats: StudioStats {
                money: self.state.money,
                days: self.state.days,
                fans: self.state.fans,
                hot_genre: self.state.hot_genre,
            },
        }
    }

    fn sales_graph(&self, session: &SalesSession, now_ms: u64) -> SalesGraph {
        let min = session.history.iter().copied().min().unwrap_or_default();
        let max = session.history.iter().copied().max().unwrap_or_default();
        SalesGraph {
            name: session.project.name.clone(),
            genre: session.project.genre,
            price: session.project.price,
            history: session.history.clone(),
            min,
            max,
            peak: session.buyers_max,
            time_left_secs: session.time_left_secs(now_ms),
            event: session
                .event
                .filter(|event| event.expires_ms > now_ms)
                .map(|event| event.message),
        }
    }

    fn prompt(&self) -> String {
        match &self.phase {
            Phase::AwaitingName { .. } => "Game Name: ".to_string(),
            Phase::AwaitingGenre { .. } => {
                format!("Choose a genre (1-{GENRE_PAGE_SIZE}, '<' or '>'): ")
            }
            Phase::AwaitingPrice { size, name, .. } => {
                let (min, max) = size.price_range();
                format!("Set price for '{name}' (${min}-{max}): ")
            }
            _ => "Command: ".to_string(),
        }
    }

    fn genre_options(&self) -> Vec<GenreOption> {
        if self.input_mode() != InputMode::AwaitingGenre {
            return Vec::new();
        }
        GENRES
            .iter()
            .skip(self.genre_offset)
            .take(GENRE_PAGE_SIZE)
            .enumerate()
            .map(|(i, &genre)| GenreOption {
                number: i + 1,
                genre,
            })
            .collect()
    }

    fn set_message<S: Into<String>>(&mut self, message: S) {
        self.message = message.into();
    }
}

fn random_genre(rng: &mut impl Rng) -> &'static str {
    GENRES.choose(rng).copied().unwrap_or(GENRES[0])
}
