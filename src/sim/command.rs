use crate::sim::catalog::Size;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Develop(Size),
    Status,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Usage: develop small | medium | big")]
    DevelopUsage,
    #[error("Unknown command. Type 'help' for options.")]
    Unknown,
    #[error("Not enough money for a {size} game! Need {cost}, have {money}.")]
    InsufficientFunds { size: Size, cost: i64, money: i64 },
    #[error("Wait until the current process is finished.")]
    Busy,
}

pub const HELP_TEXT: &str = "Commands: develop [small|medium|big], status, help, quit";

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim().to_lowercase();
        if line.starts_with("develop") {
            let parts: Vec<&str> = line.split_whitespace().collect();
            return match parts.as_slice() {
                ["develop", size] => size
                    .parse()
                    .map(Command::Develop)
                    .map_err(|_| CommandError::DevelopUsage),
                _ => Err(CommandError::DevelopUsage),
            };
        }
        match line.as_str() {
            "status" => Ok(Command::Status),
            "help" => Ok(Command::Help),
            "quit" => Ok(Command::Quit),
            _ => Err(CommandError::Unknown),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_develop_sizes() {
        assert_eq!("develop small".parse(), Ok(Command::Develop(Size::Small)));
        assert_eq!("  DEVELOP   Big ".parse(), Ok(Command::Develop(Size::Big)));
        assert_eq!("Develop medium".parse(), Ok(Command::Develop(Size::Medium)));
    }

    #[test]
    fn develop_without_valid_size_is_a_usage_error() {
        assert_eq!("develop".parse::<Command>(), Err(CommandError::DevelopUsage));
        assert_eq!("develop huge".parse::<Command>(), Err(CommandError::DevelopUsage));
        assert_eq!(
            "develop small now".parse::<Command>(),
            Err(CommandError::DevelopUsage)
        );
        assert_eq!("developer".parse::<Command>(), Err(CommandError::DevelopUsage));
    }

    #[test]
    fn parses_simple_commands() {
        assert_eq!(" Status ".parse(), Ok(Command::Status));
        assert_eq!("HELP".parse(), Ok(Command::Help));
        assert_eq!("quit".parse(), Ok(Command::Quit));
    }

    #[test]
    fn unknown_commands_point_at_help() {
        let err = "dance".parse::<Command>().unwrap_err();
        assert_eq!(err, CommandError::Unknown);
        assert!(err.to_string().contains("help"));
        assert_eq!("".parse::<Command>(), Err(CommandError::Unknown));
    }
}
