use std::{
    fmt,
    io::{self, BufRead, Write},
};

use clap::{App, Arg, ArgMatches};
use log::info;
use once_cell::sync::Lazy;
use rand::{rngs::StdRng, SeedableRng};
use regex::Regex;

use seabattle::{
    battlefield::Battlefield,
    errors::ValidationError,
    game::{AttackOutcome, Game},
    ship::Ship,
};

/// Default battlefield dimensions.
const DEFAULT_ROWS: usize = 10;
const DEFAULT_COLS: usize = 10;

/// The row axis is addressed by letter, so the board is capped at one row
/// per letter of the alphabet.
const MAX_ROWS: usize = 26;

/// Outcome messages shown to the player.
const MISS_MESSAGE: &str = "You missed. Try again!";
const HIT_MESSAGE: &str = "A ship was hit!";
const SUNK_MESSAGE: &str = "You sank the";

/// The default fleet: one battleship and two destroyers.
fn default_fleet() -> Vec<Ship> {
    vec![
        Ship::battleship("Yram"),
        Ship::destroyer("Htebazile"),
        Ship::destroyer("Nyelob Enna"),
    ]
}

fn main() -> io::Result<()> {
    env_logger::init();
    let matches = App::new("Battleship")
        .version("1.0")
        .author("Zachary Stewart <zachary@zstewart.com>")
        .about("Single player command line battleship game.")
        .arg(
            Arg::with_name("rows")
                .short("r")
                .long("rows")
                .value_name("ROWS")
                .help("number of battlefield rows, 1 to 26")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("cols")
                .short("c")
                .long("cols")
                .value_name("COLS")
                .help("number of battlefield cols")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("seed")
                .short("s")
                .long("seed")
                .value_name("SEED")
                .help("seed for reproducible ship placement")
                .takes_value(true),
        )
        .get_matches();

    let rows = dimension_arg(&matches, "rows", DEFAULT_ROWS, MAX_ROWS);
    let cols = dimension_arg(&matches, "cols", DEFAULT_COLS, usize::max_value());

    let battlefield = match build_battlefield(&matches, rows, cols) {
        Ok(battlefield) => battlefield,
        Err(err) => {
            eprintln!("Could not set up the battlefield: {}", err);
            std::process::exit(1);
        }
    };
    info!(
        "battlefield ready: {}x{} with {} ships",
        rows,
        cols,
        battlefield.ships_count()
    );

    let stdin = io::stdin();
    let mut input = InputReader::new(stdin.lock());
    let mut game = Game::new(battlefield);
    let mut tracking = TrackingBoard::new(rows, cols);
    let mut reveal = false;

    println!("Attack coordinates are a row letter and a column number, like a5.");
    println!("Type help or ? for the other commands.");

    loop {
        println!();
        println!("Your shots so far:");
        show_board(cols, tracking.iter_rows().map(|row| row.iter()));
        if reveal {
            println!();
            println!("The battlefield, revealed:");
            show_revealed_board(game.battlefield());
        }
        println!();

        let cmd = input.read_input_lower("> ", |input| match input {
            "?" | "help" | "h" => Some(Command::Help),
            "show" => Some(Command::Show),
            "hide" => Some(Command::Hide),
            "quit" | "exit" | "q" => Some(Command::Quit),
            other => match parse_coordinates(other, rows, cols) {
                Ok((row, col)) => Some(Command::Attack(row, col)),
                Err(err) => {
                    println!("{}", err);
                    None
                }
            },
        })?;

        match cmd {
            Command::Attack(row, col) => match game.attack(row, col) {
                Ok(AttackOutcome::Miss) => {
                    tracking.mark(row, col, Marker::Miss);
                    println!("{}", MISS_MESSAGE);
                }
                Ok(AttackOutcome::Hit) => {
                    tracking.mark(row, col, Marker::Hit);
                    println!("{}", HIT_MESSAGE);
                }
                Ok(AttackOutcome::Sunk(name)) => {
                    tracking.mark(row, col, Marker::Hit);
                    println!("{} {}!", SUNK_MESSAGE, name);
                }
                Ok(AttackOutcome::Victory(name)) => {
                    tracking.mark(row, col, Marker::Hit);
                    println!("{} {}!", SUNK_MESSAGE, name);
                    println!();
                    println!(
                        "You won! The whole fleet is destroyed after {} shots.",
                        game.shots()
                    );
                    break;
                }
                Err(err) => {
                    println!("{}", err);
                    break;
                }
            },
            Command::Show => reveal = true,
            Command::Hide => reveal = false,
            Command::Quit => {
                println!("You gave up after {} shots.", game.shots());
                break;
            }
            Command::Help => {
                println!(
                    "Available commands:
    <row><col>   attack the cell at the given coordinates, e.g. a5 or c10.
    show         also print the battlefield with the ships revealed.
    hide         stop printing the revealed battlefield.
    quit         leave the game.
    help         show this message."
                );
            }
        }
    }
    info!("game ended after {} shots", game.shots());
    Ok(())
}

/// A single line of player input.
enum Command {
    Attack(usize, usize),
    Show,
    Hide,
    Help,
    Quit,
}

/// Read a dimension argument, exiting with a usage message when it does not
/// parse or is out of range.
fn dimension_arg(matches: &ArgMatches, name: &str, default: usize, max: usize) -> usize {
    match matches.value_of(name) {
        None => default,
        Some(raw) => match raw.parse() {
            Ok(value) if value >= 1 && value <= max => value,
            _ => {
                eprintln!("{} must be a number between 1 and {}", name, max);
                std::process::exit(2);
            }
        },
    }
}

/// Build the battlefield, seeding placement when the player asked for a
/// reproducible layout.
fn build_battlefield(
    matches: &ArgMatches,
    rows: usize,
    cols: usize,
) -> Result<Battlefield, ValidationError> {
    let fleet = default_fleet();
    match matches.value_of("seed") {
        Some(raw) => match raw.parse() {
            Ok(seed) => {
                Battlefield::with_source(rows, cols, fleet, &mut StdRng::seed_from_u64(seed))
            }
            Err(_) => {
                eprintln!("seed must be a number");
                std::process::exit(2);
            }
        },
        None => Battlefield::new(rows, cols, fleet),
    }
}

/// Per-cell marker on the tracking board.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Marker {
    Unknown,
    Miss,
    Hit,
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Marker::Unknown => f.pad("~"),
            Marker::Miss => f.pad("o"),
            Marker::Hit => f.pad("x"),
        }
    }
}

/// The player's view of the battlefield: one marker per cell, persisted
/// across redraws. A revealed cell is never redrawn as unknown.
struct TrackingBoard {
    cols: usize,
    markers: Vec<Marker>,
}

impl TrackingBoard {
    fn new(rows: usize, cols: usize) -> Self {
        Self {
            cols,
            markers: vec![Marker::Unknown; rows * cols],
        }
    }

    /// Record an attack result. Cells that are already revealed keep their
    /// marker.
    fn mark(&mut self, row: usize, col: usize, marker: Marker) {
        let cell = &mut self.markers[row * self.cols + col];
        if *cell == Marker::Unknown {
            *cell = marker;
        }
    }

    fn iter_rows(&self) -> impl Iterator<Item = &[Marker]> {
        self.markers.chunks(self.cols)
    }
}

/// Print out the battlefield with every ship visible, cells showing the
/// 1-based index of the ship that occupies them.
fn show_revealed_board(battlefield: &Battlefield) {
    enum RevealedCell {
        Empty,
        Ship(usize),
    }
    impl fmt::Display for RevealedCell {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            match self {
                RevealedCell::Empty => f.pad("~"),
                RevealedCell::Ship(marker) => f.pad(&marker.to_string()),
            }
        }
    }
    show_board(
        battlefield.cols(),
        battlefield.grid().iter_rows().map(|row| {
            row.iter().map(|&cell| {
                if cell == 0 {
                    RevealedCell::Empty
                } else {
                    RevealedCell::Ship(cell)
                }
            })
        }),
    );
}

/// Show a board by printing the grid. Column numbers run along the top, row
/// letters down the left side.
fn show_board(cols: usize, rows: impl Iterator<Item = impl Iterator<Item = impl fmt::Display>>) {
    print!("   ");
    for col in 1..=cols {
        print!("{:^4}", col);
    }
    println!();
    for (idx, row) in rows.enumerate() {
        print!("{:>2} ", row_letter(idx));
        for cell in row {
            print!("{:^4}", cell);
        }
        println!();
    }
}

/// Get the letter labelling a zero-based row index.
fn row_letter(row: usize) -> char {
    (b'A' + row as u8) as char
}

/// Error from parsing attack coordinates. Each axis reports its own message
/// so the player knows which part to fix.
#[derive(Debug, Eq, PartialEq)]
enum CoordinateError {
    /// The row letter is missing or maps outside the battlefield.
    InvalidRow,
    /// The column number is missing or maps outside the battlefield.
    InvalidCol,
}

impl fmt::Display for CoordinateError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CoordinateError::InvalidRow => f.pad("Invalid row selected for attack"),
            CoordinateError::InvalidCol => f.pad("Invalid column selected for attack"),
        }
    }
}

/// Matcher for attack coordinates: a row letter followed by the column part.
static ATTACK: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?P<row>[a-z])(?P<col>.*)$").unwrap());

/// Convert an attack coordinate string (already lowercased) into zero-based
/// `(row, col)`. A pure function of the battlefield dimensions; it knows
/// nothing about ship placement.
fn parse_coordinates(
    input: &str,
    rows: usize,
    cols: usize,
) -> Result<(usize, usize), CoordinateError> {
    let captures = ATTACK.captures(input).ok_or(CoordinateError::InvalidRow)?;
    let row = (captures["row"].as_bytes()[0] - b'a') as usize;
    if row >= rows {
        return Err(CoordinateError::InvalidRow);
    }
    match captures["col"].trim().parse::<usize>() {
        Ok(number) if number >= 1 && number <= cols => Ok((row, number - 1)),
        _ => Err(CoordinateError::InvalidCol),
    }
}

/// Helper to read input from the player.
struct InputReader<B> {
    read: B,
    buf: String,
}

impl<B> InputReader<B> {
    fn new(read: B) -> Self {
        Self {
            read,
            buf: String::new(),
        }
    }
}

impl<B: BufRead> InputReader<B> {
    /// Repeatedly tries to read input until the input checker returns
    /// `Some`. Converts to ascii lower before running the checker.
    fn read_input_lower<F, T>(&mut self, prompt: &str, mut checker: F) -> io::Result<T>
    where
        F: FnMut(&str) -> Option<T>,
    {
        loop {
            self.read_input_inner(prompt)?;
            self.buf.make_ascii_lowercase();
            if let Some(val) = checker(self.buf.trim()) {
                return Ok(val);
            }
        }
    }

    /// Helper to print the prompt, clear the string buffer and read a line.
    fn read_input_inner(&mut self, prompt: &str) -> io::Result<()> {
        print!("{} ", prompt);
        io::stdout().flush()?;
        self.buf.clear();
        if self.read.read_line(&mut self.buf)? == 0 {
            println!();
            std::process::exit(0);
        }
        Ok(())
    }
}
