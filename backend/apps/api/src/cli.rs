//! Command Line Interface

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "noah", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    #[command(about = "Run the web server (default)")]
    Serve {
        #[arg(
            long,
            help = "Keep users in process memory instead of PostgreSQL"
        )]
        in_memory: bool,
        #[arg(
            long = "user",
            value_name = "USERNAME:PASSWORD",
            requires = "in_memory",
            help = "Account to create at startup; repeatable, requires --in-memory"
        )]
        users: Vec<String>,
    },
    #[command(about = "Register a user account in the database")]
    AddUser {
        #[arg(required = true)]
        username: String,
        #[arg(required = true)]
        password: String,
    },
    #[command(about = "Print a fresh base64 SECRET_KEY")]
    GenerateSecret,
}

impl Default for Command {
    fn default() -> Self {
        Command::Serve {
            in_memory: false,
            users: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["noah"]).unwrap();
        assert!(cli.command.is_none());
        assert!(matches!(
            Command::default(),
            Command::Serve { in_memory: false, .. }
        ));
    }

    #[test]
    fn test_add_user_arguments() {
        let cli = Cli::try_parse_from(["noah", "add-user", "alice", "s3cret"]).unwrap();
        match cli.command {
            Some(Command::AddUser { username, password }) => {
                assert_eq!(username, "alice");
                assert_eq!(password, "s3cret");
            }
            _ => panic!("expected add-user"),
        }
    }

    #[test]
    fn test_add_user_requires_both_arguments() {
        assert!(Cli::try_parse_from(["noah", "add-user", "alice"]).is_err());
    }

    #[test]
    fn test_seed_users_require_in_memory() {
        assert!(Cli::try_parse_from(["noah", "serve", "--user", "a:b"]).is_err());

        let cli =
            Cli::try_parse_from(["noah", "serve", "--in-memory", "--user", "alice:s3cret"])
                .unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Serve { in_memory: true, ref users }) if users.len() == 1
        ));
    }
}
