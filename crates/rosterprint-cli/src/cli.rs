use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use rosterprint_core::config::ConfigKey;
use rosterprint_core::layout::LayoutMode;
use rosterprint_core::models::Level;
use rosterprint_core::registration::BulkEntry;
use rosterprint_core::roster::SortColumn;

#[derive(Parser, Debug)]
#[command(
    name = "rosterprint",
    version,
    about = "Athlete registration and A4 photo boards for school sports events",
    long_about = "rosterprint keeps the athlete roster in a spreadsheet-backed store and prints sign-off sheets grouped by sport, age bracket and gender.\n\nExamples:\n  rosterprint list --sport ตะกร้อ\n  rosterprint print --mode photo --out boards.html\n  rosterprint register --level primary --sport ตะกร้อ --age 12 --gender ชาย --entry \"สมชาย ใจดี;2014-02-01;photos/somchai.jpg\"\n\nThe store URL comes from --script-url, ROSTERPRINT_SCRIPT_URL or the config file."
)]
pub struct Cli {
    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        global = true,
        help = "Increase log verbosity (-v, -vv). RUST_LOG takes precedence."
    )]
    pub verbose: u8,

    #[arg(
        long = "script-url",
        value_name = "URL",
        global = true,
        help = "Store web app URL (overrides config and environment)."
    )]
    pub script_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show registered athletes
    List(ListArgs),
    /// Show print groups and how many athletes each holds
    Categories,
    /// Render print sheets as HTML
    Print(PrintArgs),
    /// Register several athletes in one sport bracket
    Register(RegisterArgs),
    /// Edit one athlete
    Update(UpdateArgs),
    /// Remove one athlete from the store
    Delete {
        /// Athlete id
        id: String,
        /// Skip the confirmation prompt
        #[arg(short = 'y', long = "yes")]
        yes: bool,
    },
    /// List sports offered per level
    Sports {
        #[arg(long, value_name = "LEVEL")]
        level: Option<Level>,
    },
    /// Show or change the saved configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective settings (the default)
    Show,
    /// Print the config file location
    Path,
    /// Change one setting and save it
    Set {
        /// script_url, school_name, event_name, director_name, logo_url or show_signature
        key: ConfigKey,
        /// New value; empty clears script_url and logo_url
        value: String,
    },
}

#[derive(Args, Debug, Default)]
pub struct SelectionArgs {
    #[arg(long, value_name = "SPORT", help = "Only this sport.")]
    pub sport: Option<String>,

    #[arg(long, value_name = "AGE", help = "Only this age bracket.")]
    pub age: Option<String>,

    #[arg(long, value_name = "GENDER", help = "Only this gender category.")]
    pub gender: Option<String>,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    #[arg(short = 's', long, value_name = "TEXT", help = "Search name or school.")]
    pub search: Option<String>,

    #[arg(long, value_name = "LEVEL", help = "Only this level.")]
    pub level: Option<Level>,

    #[command(flatten)]
    pub selection: SelectionArgs,

    #[arg(long, value_name = "COLUMN", help = "Sort by name, sport or school.")]
    pub sort: Option<SortColumn>,

    #[arg(long, requires = "sort", help = "Sort descending.")]
    pub desc: bool,

    #[arg(long, help = "Print JSON instead of a table.")]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct PrintArgs {
    #[arg(
        short = 'm',
        long,
        value_name = "MODE",
        default_value = "photo",
        help = "photo (15 per sheet) or list (25 per sheet)."
    )]
    pub mode: LayoutMode,

    #[command(flatten)]
    pub selection: SelectionArgs,

    #[arg(long = "no-signature", help = "Leave out the director's signature block.")]
    pub no_signature: bool,

    #[arg(short = 'o', long, value_name = "FILE", help = "Write HTML here instead of stdout.")]
    pub out: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct RegisterArgs {
    #[arg(long, value_name = "LEVEL")]
    pub level: Level,

    #[arg(long, value_name = "SPORT")]
    pub sport: String,

    #[arg(long, value_name = "AGE")]
    pub age: String,

    #[arg(long, value_name = "GENDER")]
    pub gender: String,

    #[arg(long, value_name = "NAME", default_value = "")]
    pub coach: String,

    #[arg(
        short = 'e',
        long = "entry",
        value_name = "NAME;BIRTHDATE;PHOTO",
        action = ArgAction::Append,
        required = true,
        help = "One athlete (repeatable). Entries without a name or photo are skipped."
    )]
    pub entries: Vec<BulkEntry>,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Athlete id
    pub id: String,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub level: Option<Level>,

    #[arg(long)]
    pub sport: Option<String>,

    #[arg(long)]
    pub age: Option<String>,

    #[arg(long)]
    pub gender: Option<String>,

    #[arg(long = "birth-date", value_name = "DATE")]
    pub birth_date: Option<String>,

    #[arg(long)]
    pub coach: Option<String>,

    #[arg(long)]
    pub note: Option<String>,

    #[arg(long, value_name = "PATH", help = "Replace the photo.")]
    pub photo: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_print_defaults() {
        let cli = Cli::try_parse_from(["rosterprint", "print"]).unwrap();
        match cli.command {
            Command::Print(args) => {
                assert_eq!(args.mode, LayoutMode::PhotoGrid);
                assert!(!args.no_signature);
                assert!(args.out.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_register_entries() {
        let cli = Cli::try_parse_from([
            "rosterprint",
            "register",
            "--level",
            "primary",
            "--sport",
            "ตะกร้อ",
            "--age",
            "12",
            "--gender",
            "ชาย",
            "-e",
            "สมชาย ใจดี;2014-02-01;a.jpg",
            "-e",
            "สมหญิง ใจดี;;b.jpg",
        ])
        .unwrap();
        match cli.command {
            Command::Register(args) => {
                assert_eq!(args.level, Level::Primary);
                assert_eq!(args.entries.len(), 2);
                assert_eq!(args.entries[1].birth_date, "");
                assert_eq!(args.coach, "");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_register_requires_entry() {
        let result = Cli::try_parse_from([
            "rosterprint", "register", "--level", "early", "--sport", "โยนบอล", "--age", "6",
            "--gender", "ชาย",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "rosterprint",
            "list",
            "--sort",
            "school",
            "--desc",
            "-vv",
            "--script-url",
            "https://script.example/exec",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.script_url.as_deref(), Some("https://script.example/exec"));
        match cli.command {
            Command::List(args) => {
                assert_eq!(args.sort, Some(SortColumn::School));
                assert!(args.desc);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_desc_requires_sort() {
        assert!(Cli::try_parse_from(["rosterprint", "list", "--desc"]).is_err());
    }

    #[test]
    fn test_parse_config_set() {
        let cli = Cli::try_parse_from(["rosterprint", "config", "set", "script-url", "https://script.example/exec"])
            .unwrap();
        match cli.command {
            Command::Config {
                action: Some(ConfigAction::Set { key, value }),
            } => {
                assert_eq!(key, ConfigKey::ScriptUrl);
                assert_eq!(value, "https://script.example/exec");
            }
            other => panic!("unexpected command: {:?}", other),
        }

        let cli = Cli::try_parse_from(["rosterprint", "config"]).unwrap();
        assert!(matches!(cli.command, Command::Config { action: None }));
        assert!(Cli::try_parse_from(["rosterprint", "config", "set", "colour", "red"]).is_err());
    }

    #[test]
    fn test_bad_mode_rejected() {
        assert!(Cli::try_parse_from(["rosterprint", "print", "--mode", "poster"]).is_err());
    }
}
