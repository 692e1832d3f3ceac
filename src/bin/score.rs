use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand, ValueEnum};
use time::OffsetDateTime;
use tracing::{info, warn};

use baloot::{
    ConfigFlags, GameType, JsonLinesStore, LogAnnouncer, Match, MatchStore, MeldCap, MeldKind,
    MeldSet, Multiplier, RoundInput, RoundingMode, Settings, Team, announce_round,
    compute_round_result, render_scoreboard,
};

#[derive(Parser, Debug)]
#[command(name = "score", about = "Score Baloot rounds and matches.")]
struct Cli {
    /// Settings file (JSON, any supported version)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score a single round and print the awards
    Round(RoundArgs),
    /// Replay a JSON list of rounds into a match and print the scoreboard
    Play(PlayArgs),
    /// List recently finished matches from a store
    History(HistoryArgs),
}

#[derive(Args, Debug)]
struct RuleArgs {
    /// Match target; overrides the settings file
    #[arg(long)]
    target: Option<u32>,

    /// Meld cap under x3/x4 in Hokm; overrides the settings file
    #[arg(long, value_enum)]
    meld_cap: Option<CapArg>,

    /// Whether trick inputs are raw points or score units; overrides the settings file
    #[arg(long, value_enum)]
    rounding: Option<RoundingArg>,
}

#[derive(Args, Debug)]
struct RoundArgs {
    #[arg(long, value_enum)]
    game: GameArg,

    /// Buying team (1 or 2)
    #[arg(long, value_parser = parse_team)]
    buyer: Team,

    /// Trick points taken by team 1
    #[arg(long, default_value_t = 0)]
    team1: u32,

    /// Trick points taken by team 2
    #[arg(long, default_value_t = 0)]
    team2: u32,

    #[arg(long, value_enum, default_value = "normal")]
    multiplier: MultiplierArg,

    /// Team that took every trick (1 or 2)
    #[arg(long, value_parser = parse_team)]
    sweep: Option<Team>,

    /// Team 1 melds, e.g. sira=2,hundred=1
    #[arg(long, default_value = "")]
    melds1: String,

    /// Team 2 melds, e.g. fifty=1,baloot=1
    #[arg(long, default_value = "")]
    melds2: String,

    #[command(flatten)]
    rules: RuleArgs,
}

#[derive(Args, Debug)]
struct PlayArgs {
    /// JSON file holding an array of round inputs
    rounds: PathBuf,

    #[arg(long, default_value = "Team 1")]
    team1_name: String,

    #[arg(long, default_value = "Team 2")]
    team2_name: String,

    /// Append the match to this JSON-lines store once it is finished
    #[arg(long)]
    store: Option<PathBuf>,

    /// Log an announcement after every round
    #[arg(long)]
    announce: bool,

    #[command(flatten)]
    rules: RuleArgs,
}

#[derive(Args, Debug)]
struct HistoryArgs {
    #[arg(long)]
    store: PathBuf,

    #[arg(short = 'n', long, default_value_t = 10)]
    limit: usize,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum GameArg {
    Sun,
    Hokm,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum MultiplierArg {
    Normal,
    Double,
    Triple,
    Quadruple,
    Forfeit,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CapArg {
    Uncapped,
    DoubleOnly,
    Full,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum RoundingArg {
    Raw,
    NoRawRequired,
}

impl From<GameArg> for GameType {
    fn from(arg: GameArg) -> Self {
        match arg {
            GameArg::Sun => GameType::Sun,
            GameArg::Hokm => GameType::Hokm,
        }
    }
}

impl From<MultiplierArg> for Multiplier {
    fn from(arg: MultiplierArg) -> Self {
        match arg {
            MultiplierArg::Normal => Multiplier::Normal,
            MultiplierArg::Double => Multiplier::Double,
            MultiplierArg::Triple => Multiplier::Triple,
            MultiplierArg::Quadruple => Multiplier::Quadruple,
            MultiplierArg::Forfeit => Multiplier::Forfeit,
        }
    }
}

impl From<CapArg> for MeldCap {
    fn from(arg: CapArg) -> Self {
        match arg {
            CapArg::Uncapped => MeldCap::Uncapped,
            CapArg::DoubleOnly => MeldCap::HundredOnly,
            CapArg::Full => MeldCap::AllMelds,
        }
    }
}

impl From<RoundingArg> for RoundingMode {
    fn from(arg: RoundingArg) -> Self {
        match arg {
            RoundingArg::Raw => RoundingMode::Raw,
            RoundingArg::NoRawRequired => RoundingMode::ScoreUnits,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();

    if let Err(err) = run(cli) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let settings = match &cli.settings {
        Some(path) => Settings::from_json(&fs::read_to_string(path)?)?,
        None => Settings::default(),
    };
    match cli.command {
        Command::Round(args) => run_round(args, &settings),
        Command::Play(args) => run_play(args, &settings),
        Command::History(args) => run_history(args),
    }
}

fn run_round(args: RoundArgs, settings: &Settings) -> Result<(), Box<dyn Error>> {
    let game = GameType::from(args.game);
    let flags = resolve_flags(&args.rules, settings)?;
    let mut input = RoundInput::new(game, args.buyer)
        .with_raw(args.team1, args.team2)
        .with_multiplier(args.multiplier.into())
        .with_melds(Team::One, parse_melds(&args.melds1, game)?)
        .with_melds(Team::Two, parse_melds(&args.melds2, game)?);
    if let Some(team) = args.sweep {
        input = input.with_sweep(team);
    }
    if flags.rounding == RoundingMode::Raw && input.sweep.is_none() {
        let total = u64::from(args.team1) + u64::from(args.team2);
        if total != u64::from(game.raw_total()) {
            warn!(total, expected = game.raw_total(), "trick points do not add up to the table total");
        }
    }

    let result = compute_round_result(&input, &flags);
    println!("Winner: {}", result.winning_team);
    println!("Team 1: {}", result.points.team1);
    println!("Team 2: {}", result.points.team2);
    Ok(())
}

fn run_play(args: PlayArgs, settings: &Settings) -> Result<(), Box<dyn Error>> {
    let flags = resolve_flags(&args.rules, settings)?;
    let inputs: Vec<RoundInput> = serde_json::from_str(&fs::read_to_string(&args.rounds)?)?;
    let mut game = Match::new(args.team1_name, args.team2_name, flags)?;
    let mut announcer = LogAnnouncer;

    for input in inputs {
        let round = game.apply_round(input);
        if args.announce {
            announce_round(&mut announcer, &game, &round);
        }
    }
    println!("{}", render_scoreboard(&game));

    match (&args.store, game.is_finished()) {
        (Some(path), true) => {
            let mut store = JsonLinesStore::new(path);
            store.append(&game.to_record(OffsetDateTime::now_utc()))?;
            info!(path = %path.display(), "saved finished match");
        }
        (Some(_), false) => warn!("match is not finished; nothing saved"),
        (None, _) => {}
    }
    Ok(())
}

fn run_history(args: HistoryArgs) -> Result<(), Box<dyn Error>> {
    let store = JsonLinesStore::new(args.store);
    let records = store.recent(args.limit)?;
    if records.is_empty() {
        println!("No finished matches.");
        return Ok(());
    }
    for record in records {
        let winner = match record.winner {
            Some(Team::One) => record.team1_name.as_str(),
            Some(Team::Two) => record.team2_name.as_str(),
            None => "-",
        };
        println!(
            "{}  {} {} - {} {}  (winner: {winner}, {} entries)",
            record.finished_at.date(),
            record.team1_name,
            record.team1_score,
            record.team2_score,
            record.team2_name,
            record.history.len()
        );
    }
    Ok(())
}

fn resolve_flags(rules: &RuleArgs, settings: &Settings) -> Result<ConfigFlags, Box<dyn Error>> {
    let mut flags = settings.flags();
    if let Some(target) = rules.target {
        if target == 0 {
            return Err("target must be positive".into());
        }
        flags.target_score = target;
    }
    if let Some(cap) = rules.meld_cap {
        flags.meld_cap = cap.into();
    }
    if let Some(rounding) = rules.rounding {
        flags.rounding = rounding.into();
    }
    Ok(flags)
}

fn parse_team(value: &str) -> Result<Team, String> {
    let number = value
        .parse::<u8>()
        .map_err(|_| format!("invalid team: {value}"))?;
    Team::try_from(number)
}

fn parse_melds(spec: &str, game: GameType) -> Result<MeldSet, Box<dyn Error>> {
    let mut melds = MeldSet::new();
    for part in spec.split(',').map(str::trim).filter(|part| !part.is_empty()) {
        let (name, count) = part.split_once('=').unwrap_or((part, "1"));
        let kind = match name.trim().to_ascii_lowercase().as_str() {
            "sira" => MeldKind::Sira,
            "fifty" | "50" => MeldKind::Fifty,
            "hundred" | "100" => MeldKind::Hundred,
            "four_hundred" | "400" => MeldKind::FourHundred,
            "baloot" => MeldKind::Baloot,
            other => return Err(format!("unknown meld: {other}").into()),
        };
        let count = count
            .trim()
            .parse::<u8>()
            .map_err(|_| format!("invalid meld count: {count}"))?;
        melds = melds.try_with(kind, count, game)?;
    }
    Ok(melds)
}
