pub mod catalog;
pub mod clock;
pub mod command;
pub mod competitors;
pub mod economy;
pub mod game;
pub mod snapshot;
