use clap::{Parser, Subcommand};

/// Job board service
#[derive(Parser, Debug)]
#[command(name = "job-board", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Apply migrations and start the HTTP server (default)
    Serve,
    /// Apply pending migrations and exit
    Migrate,
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command.unwrap_or(Command::Serve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_the_default() {
        let cli = Cli::try_parse_from(["job-board"]).unwrap();
        assert_eq!(cli.command(), Command::Serve);
    }

    #[test]
    fn migrate_subcommand() {
        let cli = Cli::try_parse_from(["job-board", "migrate"]).unwrap();
        assert_eq!(cli.command(), Command::Migrate);
    }

    #[test]
    fn unknown_subcommand_is_rejected() {
        assert!(Cli::try_parse_from(["job-board", "explode"]).is_err());
    }
}
