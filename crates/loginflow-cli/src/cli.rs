//! Command line definitions.

use clap::{Parser, Subcommand, ValueEnum};
use loginflow_core::StoreKind;

#[derive(Parser, Debug)]
#[command(name = "loginflow")]
#[command(author, version, about = "Sign in to the authentication service and manage the stored session")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Submit a username and password and store the session token
    Login {
        /// Username (defaults to LOGINFLOW_USERNAME, then the last used name)
        #[arg(short, long)]
        username: Option<String>,

        /// Where to keep the session token
        #[arg(long, value_enum)]
        store: Option<StoreArg>,
    },

    /// Show whether a session is active
    Status {
        #[arg(long, value_enum)]
        store: Option<StoreArg>,
    },

    /// Drop the stored session
    Logout {
        #[arg(long, value_enum)]
        store: Option<StoreArg>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum StoreArg {
    Memory,
    File,
    Keyring,
}

impl From<StoreArg> for StoreKind {
    fn from(arg: StoreArg) -> Self {
        match arg {
            StoreArg::Memory => StoreKind::Memory,
            StoreArg::File => StoreKind::File,
            StoreArg::Keyring => StoreKind::Keyring,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_login_with_username() {
        let cli = Cli::parse_from(["loginflow", "login", "--username", "alice", "--store", "keyring"]);
        match cli.command {
            Command::Login { username, store } => {
                assert_eq!(username.as_deref(), Some("alice"));
                assert_eq!(store.map(StoreKind::from), Some(StoreKind::Keyring));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_status_defaults() {
        let cli = Cli::parse_from(["loginflow", "status"]);
        assert!(matches!(cli.command, Command::Status { store: None }));
    }

    #[test]
    fn test_rejects_unknown_store() {
        assert!(Cli::try_parse_from(["loginflow", "logout", "--store", "redis"]).is_err());
    }
}
