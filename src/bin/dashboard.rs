use std::env;
use std::error::Error;
use std::path::PathBuf;

use anyhow::{anyhow, bail};
use clap::{Parser, Subcommand};
use serde::Serialize;
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use tracing::{debug, info};

use pitchzones::compare::{overview, side_by_side, zone_comparison, Selection};
use pitchzones::coord::Coordinate;
use pitchzones::dataset::{Category, Config, DirectoryRepository, Kind, Repository, TeamSelection, DEFAULT_TEAMS};
use pitchzones::display::DisplayList;
use pitchzones::distribution::aggregate;
use pitchzones::extract::Source;
use pitchzones::print;
use pitchzones::zone::{classify, Zone};

const PREVIEW_LIMIT: usize = 10;

#[derive(Debug, clap::Parser, Clone)]
#[command(about = "Zone analysis of goal and assist coordinates")]
struct Args {
    /// directory holding one folder per team
    #[clap(short = 'd', long, global = true, default_value = ".")]
    dir: PathBuf,

    /// comma-separated team folders to load, in display order
    #[clap(short = 't', long, global = true, value_delimiter = ',')]
    teams: Vec<String>,

    /// emit JSON instead of tables
    #[clap(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}
impl Args {
    fn validate(&self) -> anyhow::Result<()> {
        if self.command.uses_repository() {
            self.config().validate()?;
        }
        if let Command::Distribution { file: Some(_), team: Some(_), .. } = &self.command {
            bail!("either a file or a team may be specified, not both");
        }
        Ok(())
    }

    fn config(&self) -> Config {
        let teams = if self.teams.is_empty() {
            DEFAULT_TEAMS.iter().map(ToString::to_string).collect()
        } else {
            self.teams.clone()
        };
        Config {
            base_dir: self.dir.clone(),
            teams,
        }
    }
}

#[derive(Debug, Subcommand, Clone)]
enum Command {
    /// classify coordinates, given as x,y
    Classify {
        #[clap(required = true, allow_hyphen_values = true)]
        coordinates: Vec<Coordinate>,
    },

    /// show the lists and annotation extracted from a source file
    Extract { file: PathBuf },

    /// zone distribution of a source file or a team
    Distribution {
        /// source file to read instead of the team folders
        #[clap(short = 'f', long)]
        file: Option<PathBuf>,

        /// team name, or 'all'
        #[clap(long)]
        team: Option<TeamSelection>,

        #[clap(short = 'c', long, default_value = "own")]
        category: Category,

        #[clap(short = 'k', long, default_value = "goal")]
        kind: Kind,
    },

    /// side-by-side comparison of two selections
    Compare {
        /// team name, or 'all'
        team: TeamSelection,

        #[clap(short = 'c', long, default_value = "own")]
        category: Category,

        /// second team; defaults to the first
        #[clap(long)]
        vs: Option<TeamSelection>,

        /// second category; defaults to the opposite of the first
        #[clap(long)]
        vs_category: Option<Category>,
    },

    /// per-team share of events in a single zone
    Zone {
        zone: Zone,

        #[clap(short = 'c', long, default_value = "own")]
        category: Category,

        #[clap(short = 'k', long, default_value = "goal")]
        kind: Kind,
    },

    /// per-team distribution over every zone
    Overview {
        #[clap(short = 'c', long, default_value = "own")]
        category: Category,

        #[clap(short = 'k', long, default_value = "goal")]
        kind: Kind,
    },
}
impl Command {
    fn uses_repository(&self) -> bool {
        match self {
            Command::Classify { .. } | Command::Extract { .. } => false,
            Command::Distribution { file, .. } => file.is_none(),
            Command::Compare { .. } | Command::Zone { .. } | Command::Overview { .. } => true,
        }
    }
}

#[derive(Debug, Serialize)]
struct Classified {
    coordinate: Coordinate,
    zone: Zone,
}

fn main() -> Result<(), Box<dyn Error>> {
    if env::var("RUST_BACKTRACE").is_err() {
        env::set_var("RUST_BACKTRACE", "full")
    }
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info")
    }
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    args.validate()?;
    debug!("args: {args:?}");

    match &args.command {
        Command::Classify { coordinates } => {
            let classified = coordinates
                .iter()
                .map(|&coordinate| Classified {
                    coordinate,
                    zone: classify(&coordinate),
                })
                .collect::<Vec<_>>();
            if args.json {
                println!("{}", serde_json::to_string_pretty(&classified)?);
            } else {
                for Classified { coordinate, zone } in classified {
                    println!("{coordinate}: {zone}");
                }
            }
        }
        Command::Extract { file } => {
            let source = Source::read(file).map_err(|err| anyhow!("could not read {}: {err}", file.display()))?;
            if args.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({
                        "goals": source.extraction.goals,
                        "assists": source.extraction.assists,
                        "annotation": source.annotation,
                    }))?
                );
            } else {
                let extraction = &source.extraction;
                println!(
                    "goals ({}): {}",
                    extraction.goals.len(),
                    DisplayList::limited(&extraction.goals, PREVIEW_LIMIT)
                );
                println!(
                    "assists ({}): {}",
                    extraction.assists.len(),
                    DisplayList::limited(&extraction.assists, PREVIEW_LIMIT)
                );
                if !source.annotation.is_empty() {
                    println!("annotation: {}", source.annotation);
                }
            }
        }
        Command::Distribution {
            file,
            team,
            category,
            kind,
        } => {
            let (title, distribution) = match file {
                Some(file) => {
                    let source =
                        Source::read(file).map_err(|err| anyhow!("could not read {}: {err}", file.display()))?;
                    (
                        format!("{} ({kind}s)", file.display()),
                        aggregate(source.extraction.of(*kind)),
                    )
                }
                None => {
                    let repository = load(&args)?;
                    let team = team.clone().unwrap_or(TeamSelection::All);
                    let events = repository.events(&team, *category)?;
                    let selection = Selection::new(team, *category);
                    (format!("{selection} ({kind}s)"), aggregate(events.of(*kind)))
                }
            };
            if args.json {
                println!("{}", serde_json::to_string_pretty(&distribution)?);
            } else {
                println!("{title}:\n{}", Console::default().render(&print::tabulate_distribution(&distribution)));
            }
        }
        Command::Compare {
            team,
            category,
            vs,
            vs_category,
        } => {
            let repository = load(&args)?;
            let first = Selection::new(team.clone(), *category);
            let second = match (vs, vs_category) {
                (None, None) => None,
                (vs, vs_category) => Some(Selection::new(
                    vs.clone().unwrap_or_else(|| team.clone()),
                    vs_category.unwrap_or_else(|| category.opposite()),
                )),
            };
            let report = side_by_side(&repository, first, second)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                for line in print::summarise(&report.first)
                    .into_iter()
                    .chain(print::summarise(&report.second))
                {
                    println!("{line}");
                }
                println!("{}", Console::default().render(&print::tabulate_side_by_side(&report)));
            }
        }
        Command::Zone { zone, category, kind } => {
            let repository = load(&args)?;
            let shares = zone_comparison(&repository, *zone, *category, *kind);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&shares)?);
            } else {
                println!(
                    "{zone} - {} ({kind}s):\n{}",
                    category.label(),
                    Console::default().render(&print::tabulate_zone_comparison(&shares))
                );
            }
        }
        Command::Overview { category, kind } => {
            let repository = load(&args)?;
            let overview = overview(&repository, *category, *kind);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&overview)?);
            } else {
                println!(
                    "all zones - {} ({kind}s):\n{}",
                    category.label(),
                    Console::default().render(&print::tabulate_overview(&overview))
                );
            }
        }
    }
    Ok(())
}

fn load(args: &Args) -> anyhow::Result<DirectoryRepository> {
    let repository = DirectoryRepository::try_from(args.config())?;
    if repository.is_empty() {
        bail!("no team folders found under {}", args.dir.display());
    }
    info!(
        "teams: {} ({} warnings)",
        repository.teams().join(", "),
        repository.warnings().len()
    );
    Ok(repository)
}
