use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use courseware_core::types::DbId;

#[derive(Parser)]
#[command(name = "courseware-worker")]
#[command(about = "Course maintenance jobs: object duplication and course settings")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Duplicate selected objects from one course into another
    Duplicate(DuplicateArgs),
    /// Show or change a course's leaderboard settings
    Leaderboard(LeaderboardArgs),
}

#[derive(Args)]
pub struct DuplicateArgs {
    /// JSON request file with source/target course IDs and the selection
    #[arg(short, long)]
    pub request: PathBuf,
}

#[derive(Args)]
pub struct LeaderboardArgs {
    /// Course whose settings are read or written
    #[arg(long)]
    pub course_id: DbId,
    /// Leaderboard title (blank clears it)
    #[arg(long)]
    pub title: Option<String>,
    /// Number of users shown on the leaderboard
    #[arg(long, allow_negative_numbers = true)]
    pub display_user_count: Option<i64>,
    /// Enable the group leaderboard ("1", "0", "true", "off", ...)
    #[arg(long)]
    pub group_enabled: Option<String>,
    /// Group leaderboard title (blank clears it)
    #[arg(long)]
    pub group_title: Option<String>,
}

impl LeaderboardArgs {
    pub fn has_changes(&self) -> bool {
        self.title.is_some()
            || self.display_user_count.is_some()
            || self.group_enabled.is_some()
            || self.group_title.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_duplicate() {
        let cli = Cli::try_parse_from(["courseware-worker", "duplicate", "--request", "req.json"])
            .unwrap();
        match cli.command {
            Commands::Duplicate(args) => assert_eq!(args.request, PathBuf::from("req.json")),
            Commands::Leaderboard(_) => panic!("expected duplicate"),
        }
    }

    #[test]
    fn parses_leaderboard_setters() {
        let cli = Cli::try_parse_from([
            "courseware-worker",
            "leaderboard",
            "--course-id",
            "4",
            "--display-user-count",
            "-1",
            "--group-enabled",
            "0",
        ])
        .unwrap();
        let Commands::Leaderboard(args) = cli.command else {
            panic!("expected leaderboard");
        };
        assert_eq!(args.course_id, 4);
        assert_eq!(args.display_user_count, Some(-1));
        assert_eq!(args.group_enabled.as_deref(), Some("0"));
        assert!(args.has_changes());
    }

    #[test]
    fn leaderboard_without_setters_only_reads() {
        let cli = Cli::try_parse_from(["courseware-worker", "leaderboard", "--course-id", "4"])
            .unwrap();
        let Commands::Leaderboard(args) = cli.command else {
            panic!("expected leaderboard");
        };
        assert!(!args.has_changes());
    }
}
