mod cli;

use std::io::BufRead;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};

use clap::Parser;
use flash_tracker::clock::TickClock;
use flash_tracker::command::{self, Input};
use flash_tracker::display::{self, Palette};
use flash_tracker::time::Monotonic;
use flash_tracker::{Config, ConfigError, FlashTracker};
use log::{error, info};

/// Forward stdin lines to the main loop.
///
/// The reader runs on its own thread so the main loop can wait for input and
/// ticks at the same time. Tracker state is only touched on the main thread.
fn spawn_input() -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

/// Handle one line of input. Returns true when the user asked to quit.
fn respond(line: &str, tracker: &mut FlashTracker<Monotonic>, palette: Option<&Palette>) -> bool {
    let line = line.trim();
    if line.is_empty() {
        return false;
    }

    match command::parse_line(line) {
        Ok(Input::Action(action)) => {
            if let Err(err) = tracker.apply(&action) {
                println!("{err}");
            }
        }
        Ok(Input::Status) => print!("{}", display::render(&tracker.frame(), palette)),
        Ok(Input::Quit) => return true,
        Err(err) => println!("{err}"),
    }
    false
}

fn run(args: cli::Args) -> Result<(), ConfigError> {
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    if args.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    let palette = config.colors.palette()?;
    let palette = (!args.no_color).then_some(palette);
    let mut tracker = FlashTracker::new(&config, Monotonic)?;

    info!("Refreshing at {}Hz", args.hz);
    println!("Commands: use|reset|boots|trinket <role>, start, stop, toggle, set MM:SS, status, quit");

    let input = spawn_input();
    let mut clock = TickClock::new(args.hz);
    let mut last_drawn = String::new();

    loop {
        match input.recv_timeout(clock.until_next()) {
            Ok(line) => {
                if respond(&line, &mut tracker, palette.as_ref()) {
                    break;
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }

        // Redraw only when something visible changed
        clock.tick(|| {
            let text = display::render(&tracker.frame(), palette.as_ref());
            if text != last_drawn {
                print!("{text}");
                last_drawn = text;
            }
        });
    }

    Ok(())
}

fn main() {
    // Start logger
    env_logger::init();

    // Read command line arguments
    let args = cli::Args::parse();

    if let Err(err) = run(args) {
        error!("{err}");
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
