//! CLI argument definitions using clap
//!
//! Commands:
//! - cinedb describe --entity <name>
//! - cinedb load --data <dir> --entity <name> --file <path>
//! - cinedb browse --data <dir> --entity <name> [--page N]
//! - cinedb movie --data <dir> --mid <id>

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::access::{Role, RoleSet};

/// cinedb - a strict movie-catalog database with validated bulk ingestion
#[derive(Parser, Debug)]
#[command(name = "cinedb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print one table's schema
    Describe {
        /// Entity name (user, password, admin, director, actor, movie,
        /// review, acted_in, poster)
        #[arg(long)]
        entity: String,
    },

    /// Bulk-load a tab-separated file into one table
    Load {
        /// Data directory
        #[arg(long, default_value = "./data")]
        data: PathBuf,

        /// Target entity name
        #[arg(long)]
        entity: String,

        /// Tab-separated input file, header line first
        #[arg(long)]
        file: PathBuf,

        /// Role to run as
        #[arg(long, value_enum, default_value_t = RoleArg::Admin)]
        role: RoleArg,
    },

    /// Page through all rows of one table
    Browse {
        /// Data directory
        #[arg(long, default_value = "./data")]
        data: PathBuf,

        /// Entity name
        #[arg(long)]
        entity: String,

        /// 1-based page number
        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Role to run as
        #[arg(long, value_enum, default_value_t = RoleArg::Admin)]
        role: RoleArg,
    },

    /// Show one movie's joined detail view
    Movie {
        /// Data directory
        #[arg(long, default_value = "./data")]
        data: PathBuf,

        /// Movie id
        #[arg(long)]
        mid: i64,

        /// Role to run as
        #[arg(long, value_enum, default_value_t = RoleArg::Admin)]
        role: RoleArg,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

/// Role the CLI acts as; higher roles include the lower ones
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RoleArg {
    Public,
    User,
    Moderator,
    Admin,
}

impl std::fmt::Display for RoleArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RoleArg::Public => "public",
            RoleArg::User => "user",
            RoleArg::Moderator => "moderator",
            RoleArg::Admin => "admin",
        };
        write!(f, "{}", name)
    }
}

impl RoleArg {
    pub fn role_set(self) -> RoleSet {
        match self {
            RoleArg::Public => RoleSet::public(),
            RoleArg::User => RoleSet::of(&[Role::User]),
            RoleArg::Moderator => RoleSet::of(&[Role::User, Role::Moderator]),
            RoleArg::Admin => RoleSet::of(&[Role::User, Role::Moderator, Role::Admin]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_sets_are_cumulative() {
        assert!(!RoleArg::Public.role_set().contains(Role::User));
        assert!(RoleArg::Moderator.role_set().contains(Role::User));
        assert!(!RoleArg::Moderator.role_set().contains(Role::Admin));
        assert!(RoleArg::Admin.role_set().contains(Role::Moderator));
    }
}
