use clap::Parser;
use itertools::Itertools;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use sweeper::{
    BoardConfig, ConfigError, Event, Frame, Game, GameError, LeaderboardStore, Outcome, Phase,
    PlayerName, Position, Session, SessionOptions, SystemClock, Tile,
};
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "sweeper", about = "Minesweeper with a top-5 leaderboard", version)]
struct Args {
    /// Board config file holding `columns rows mines`
    #[arg(long, default_value = "files/config.cfg")]
    config: PathBuf,
    /// Leaderboard file
    #[arg(long, default_value = "files/leaderboard.txt")]
    leaderboard: PathBuf,
    /// Columns, used when the config file cannot be read
    #[arg(long, default_value_t = 25)]
    cols: usize,
    /// Rows including the two control rows, used when the config file cannot be read
    #[arg(long, default_value_t = 16)]
    rows: usize,
    /// Mines, used when the config file cannot be read
    #[arg(long, default_value_t = 50)]
    mines: usize,
    /// Seed for mine placement
    #[arg(long)]
    seed: Option<u64>,
    /// Restart the timer when starting a new game
    #[arg(long)]
    reset_timer: bool,
    /// Player name; prompted for if absent
    #[arg(long)]
    name: Option<String>,
}

fn main() {
    init_logging();

    match run(Args::parse()) {
        Ok(_) => println!("Thanks for playing!"),
        Err(e) => eprintln!("Game error: {}", e),
    }
}

/// Log records go to stderr so they never land on the board or the prompt.
/// Only warnings and errors are shown.
fn init_logging() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(LevelFilter::WARN)
        .init();
}

fn run(args: Args) -> Result<(), GameError> {
    let config = load_config(&args)?;
    let options = SessionOptions {
        reset_timer_on_new_game: args.reset_timer,
        seed: args.seed,
    };
    let Some(player) = args
        .name
        .as_deref()
        .and_then(PlayerName::parse)
        .or_else(prompt_name)
    else {
        return Ok(());
    };

    let game = Game::new(config, options)?;
    let store = LeaderboardStore::load(&args.leaderboard);
    let mut session = Session::new(game, store, player);

    print_help();
    let stdin = io::stdin();
    loop {
        print_frame(&session.game().frame());
        print!("> ");
        io::stdout().flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).unwrap_or(0) == 0 {
            break;
        }
        let Some(command) = parse_command(&line) else {
            println!("Unknown command. Type 'h' for help.");
            continue;
        };

        match command {
            Command::Quit => break,
            Command::Help => print_help(),
            Command::Leaderboard => show_leaderboard(&mut session),
            Command::Play(event) => match session.handle(event) {
                Outcome::Won => {
                    println!("You win, {}!", session.player());
                    if let Some(rank) = session.last_rank() {
                        println!("New leaderboard entry at #{}", rank);
                    }
                }
                Outcome::Lost => println!("Boom! Press 'n' for a new game."),
                Outcome::Changed | Outcome::NoChange => {}
            },
        }
    }

    Ok(())
}

fn load_config(args: &Args) -> Result<BoardConfig, ConfigError> {
    match BoardConfig::load(&args.config) {
        Err(ConfigError::Io { path, source }) => {
            log::warn!(
                "Unable to open {}: {}, using command-line dimensions",
                path.display(),
                source
            );
            BoardConfig::new(args.cols, args.rows, args.mines)
        }
        result => result,
    }
}

fn prompt_name() -> Option<PlayerName> {
    let stdin = io::stdin();
    loop {
        print!("Please enter your name: ");
        io::stdout().flush().ok()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line).ok()? == 0 {
            return None;
        }
        if let Some(name) = PlayerName::parse(&line) {
            return Some(name);
        }
        println!("Names use letters only.");
    }
}

enum Command {
    Play(Event),
    Leaderboard,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Option<Command> {
    let mut parts = line.split_whitespace();
    let command = match parts.next()? {
        "r" | "reveal" => Command::Play(Event::Reveal(parse_position(&mut parts)?)),
        "f" | "flag" => Command::Play(Event::ToggleFlag(parse_position(&mut parts)?)),
        "d" | "debug" => Command::Play(Event::ToggleDebug),
        "p" | "pause" => Command::Play(Event::TogglePause),
        "n" | "new" => Command::Play(Event::Reset),
        "l" | "leaderboard" => Command::Leaderboard,
        "h" | "help" => Command::Help,
        "q" | "quit" => Command::Quit,
        _ => return None,
    };
    Some(command)
}

fn parse_position<'a>(parts: &mut impl Iterator<Item = &'a str>) -> Option<Position> {
    let row = parts.next()?.parse().ok()?;
    let col = parts.next()?.parse().ok()?;
    Some(Position::new(row, col))
}

fn print_help() {
    println!("Commands:");
    println!("  r row col  - reveal a tile");
    println!("  f row col  - toggle a flag");
    println!("  d          - toggle debug (show mines)");
    println!("  p          - pause / resume");
    println!("  n          - new game");
    println!("  l          - leaderboard");
    println!("  q          - quit");
}

fn show_leaderboard(session: &mut Session<SystemClock>) {
    println!("LEADERBOARD");
    if session.open_leaderboard().is_empty() {
        println!("  (no entries yet)");
    } else {
        println!("{}", session.store().leaderboard().render());
    }
    print!("Press enter to return to the game");
    io::stdout().flush().ok();
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line).ok();
    session.close_leaderboard();
}

fn print_frame(frame: &Frame) {
    let cols = frame.tiles.ncols();
    println!("   {}", (0..cols).map(|c| format!("{:>2}", c)).join(""));
    for (row, tiles) in frame.tiles.rows().into_iter().enumerate() {
        let cells = tiles.iter().map(|tile| match tile {
            Tile::Hidden => " □",
            Tile::Revealed(0) => "  ",
            Tile::Revealed(n) => DIGITS[*n as usize],
            Tile::RevealedMine => " *",
            Tile::Flagged => " ⚑",
        });
        println!("{:>2} {}", row, cells.collect::<String>());
    }

    let status = match frame.phase {
        Phase::Won => " :D",
        Phase::Lost => " X(",
        Phase::Playing if frame.paused => " ||",
        Phase::Playing => " :)",
    };
    println!(
        "Flags {:>4}   {}   {}{}",
        frame.flags_remaining,
        frame.clock,
        status,
        if frame.debug { "  [debug]" } else { "" }
    );
}

const DIGITS: [&str; 9] = [" 0", " 1", " 2", " 3", " 4", " 5", " 6", " 7", " 8"];
