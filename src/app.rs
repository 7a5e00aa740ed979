use crate::sim::clock::{Clock, SystemClock};
use crate::sim::game::{Flow, Game};
use crate::sim::snapshot::RenderSnapshot;

#[derive(Debug)]
pub struct App<C: Clock = SystemClock> {
    clock: C,
    snapshot: RenderSnapshot,
    should_quit: bool,
}

impl<C: Clock> App<C> {
    pub fn new(clock: C, game: &mut Game) -> Self {
        let snapshot = game.tick(clock.now_ms());
        Self {
            clock,
            snapshot,
            should_quit: false,
        }
    }

    pub fn snapshot(&self) -> &RenderSnapshot {
        &self.snapshot
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    pub fn refresh(&mut self, game: &mut Game) {
        self.snapshot = game.tick(self.clock.now_ms());
    }

    pub fn submit(&mut self, game: &mut Game) {
        if game.submit(self.clock.now_ms()) == Flow::Quit {
            self.should_quit = true;
        }
        self.refresh(game);
    }

    pub fn type_char(&mut self, game: &mut Game, ch: char) {
        game.append_char(ch);
        self.refresh(game);
    }

    pub fn backspace(&mut self, game: &mut Game) {
        game.backspace();
        self.refresh(game);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct FakeClock(Cell<u64>);

    impl Clock for &FakeClock {
        fn now_ms(&self) -> u64 {
            self.0.get()
        }
    }

    fn type_line(app: &mut App<&FakeClock>, game: &mut Game, line: &str) {
        for ch in line.chars() {
            app.type_char(game, ch);
        }
        app.submit(game);
    }

    #[test]
    fn typed_input_is_echoed_in_the_snapshot() {
        let clock = FakeClock(Cell::new(0));
        let mut game = Game::with_seed(1);
        let mut app = App::new(&clock, &mut game);
        app.type_char(&mut game, 'h');
        app.type_char(&mut game, 'x');
        app.backspace(&mut game);
        assert_eq!(app.snapshot().input, "h");
        assert_eq!(app.snapshot().prompt, "Command: ");
    }

    #[test]
    fn quit_command_stops_the_host() {
        let clock = FakeClock(Cell::new(0));
        let mut game = Game::with_seed(2);
        let mut app = App::new(&clock, &mut game);
        type_line(&mut app, &mut game, "quit");
        assert!(app.should_quit());
    }

    #[test]
    fn development_countdown_follows_the_clock() {
        let clock = FakeClock(Cell::new(0));
        let mut game = Game::with_seed(3);
        let mut app = App::new(&clock, &mut game);
        for line in ["develop small", "Pong", "4", "10"] {
            type_line(&mut app, &mut game, line);
        }
        let dev = app.snapshot().development.clone().expect("developing");
        assert_eq!(dev.seconds_left, 30);
        assert_eq!(dev.summary(), "Developing 'Pong' (Puzzle, small): 30 seconds left");

        clock.0.set(30_000);
        app.refresh(&mut game);
        assert!(app.snapshot().development.is_none());
        assert!(app.snapshot().sales.is_some());
        assert_eq!(app.snapshot().stats.days, 7);
        assert_eq!(app.snapshot().stats.money, 900);
    }
}
