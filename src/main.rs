//! Reflexbot CLI
//!
//! Usage:
//!   reflexbot                                # Count reps, one angle per line on stdin
//!   reflexbot --profile situp-strict --target 3
//!   reflexbot --text "maju"                  # Route a single command
//!   reflexbot --commands                     # Route commands, one per line
//!   reflexbot --track                        # Servo tracking, one frame per line
//!   reflexbot --bridge                       # Translate bridge messages to URLs
//!   reflexbot --config reflexbot.toml --json

use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::time::Instant;

use clap::{Parser, ValueEnum};
use colored::Colorize;
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::Level;

use reflexbot::core::{
    AngleHysteresisCounter, AppConfig, BridgeTranslator, CommandDispatcher, CommandRouter,
    CounterConfig, LogAck, LogActuator, ServoTracker,
};
use reflexbot::types::{ActuatorCommand, Detection, RouteOutcome};
use reflexbot::VERSION;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Profile {
    /// 102° / 117°
    Situp,
    /// 89° / 136°
    SitupStrict,
}

#[derive(Parser, Debug)]
#[command(
    name = "reflexbot",
    version = VERSION,
    about = "Reflexbot - count reps from joint angles and route robot commands",
    long_about = "Reflexbot turns raw signals into discrete robot events.\n\n\
                  Modes (stdin, one item per line):\n  \
                  (default)   Rep counter: one angle in degrees per line\n  \
                  --commands  Command router: voice text or F/B/S/R/T codes\n  \
                  --track     Servo tracker: 'class x1 y1 x2 y2 conf' per frame,\n              \
                  several separated by ';', '-' for an empty frame\n  \
                  --bridge    Bridge: 'B90,' servo moves or plain actions\n\n\
                  Postures:\n  \
                  EXTENDED - lying back, ready for the next rep\n  \
                  FLEXED   - crunched up, rep counted"
)]
struct Args {
    /// Route a single command and exit
    #[arg(short, long)]
    text: Option<String>,

    /// Route commands read from stdin
    #[arg(short, long)]
    commands: bool,

    /// Run the servo tracker on detections read from stdin
    #[arg(long)]
    track: bool,

    /// Translate bridge messages read from stdin
    #[arg(short, long)]
    bridge: bool,

    /// TOML configuration file
    #[arg(long)]
    config: Option<String>,

    /// Counter threshold preset (overrides the config file)
    #[arg(short, long, value_enum)]
    profile: Option<Profile>,

    /// Stop after this many reps
    #[arg(long)]
    target: Option<u64>,

    /// Camera frame width for --track
    #[arg(long, default_value_t = 640)]
    frame_width: u32,

    /// Camera frame height for --track
    #[arg(long, default_value_t = 480)]
    frame_height: u32,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    if args.no_color {
        colored::control::set_override(false);
    }

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(1);
        }
    };

    if let Some(ref text) = args.text {
        run_single(text, &config, &args);
    } else if args.commands {
        run_commands(&config, &args).await;
    } else if args.track {
        run_track(&config, &args);
    } else if args.bridge {
        run_bridge(&config, &args);
    } else {
        run_counter(&config, &args);
    }
}

/// File first, then CLI overrides, then validation
fn load_config(args: &Args) -> Result<AppConfig, reflexbot::error::ConfigError> {
    let mut config = match args.config {
        Some(ref path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    if let Some(profile) = args.profile {
        let preset = match profile {
            Profile::Situp => CounterConfig::situp(),
            Profile::SitupStrict => CounterConfig::situp_strict(),
        };
        config.counter.enter_flexed_max = preset.enter_flexed_max;
        config.counter.enter_extended_min = preset.enter_extended_min;
    }
    if args.target.is_some() {
        config.counter.target_reps = args.target;
    }

    config.validate()?;
    Ok(config)
}

/// Route one command; no sinks involved
fn run_single(text: &str, config: &AppConfig, args: &Args) {
    let router = CommandRouter::with_config(&config.router);
    match router.route_detailed(text) {
        Some(outcome) => print_outcome(&outcome, args),
        None => println!("(empty command)"),
    }
}

/// Rep counter loop
fn run_counter(config: &AppConfig, args: &Args) {
    let mut counter = match AngleHysteresisCounter::new(config.counter.clone()) {
        Ok(counter) => counter,
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(1);
        }
    };

    print_header("Rep Counter", args);
    println!(
        "Band: flexed ≤ {:.1}°, extended ≥ {:.1}°. Type 'quit' to exit.",
        config.counter.enter_flexed_max, config.counter.enter_extended_min
    );
    if let Some(target) = config.counter.target_reps {
        println!("Goal: {} reps", target);
    }
    println!();

    for line in stdin_lines() {
        let Ok(angle) = line.parse::<f64>() else {
            eprintln!("Not an angle: '{}'", line);
            continue;
        };

        let output = counter.observe(angle);
        if args.json {
            print_json(&output);
        } else if args.no_color {
            println!("{}", output.to_parseable_string());
        } else {
            println!("{}", output.to_terminal_string());
        }

        if output.target_reached {
            println!("{}", "Target reached - set complete".green().bold());
            break;
        }
    }

    println!("\nSession ended. Reps: {} | Samples: {}", counter.count(), counter.update_count());
}

/// Command loop with log-backed sinks
async fn run_commands(config: &AppConfig, args: &Args) {
    let router = CommandRouter::with_config(&config.router);
    let mut dispatcher = CommandDispatcher::new(router, Arc::new(LogActuator), Arc::new(LogAck));

    print_header("Command Router", args);
    println!("Voice commands: maju, mundur, berputar, berhenti, cari sampah");
    println!("Manual codes:   F, B, S, R, T");
    println!("Type 'quit' to exit.");
    println!();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                eprintln!("stdin error: {}", e);
                break;
            }
        };
        let line = line.trim();
        if is_quit(line) {
            break;
        }

        if let Some(outcome) = dispatcher.router().route_detailed(line) {
            print_outcome(&outcome, args);
            dispatcher.dispatch(outcome.directive).await;
        }
    }

    dispatcher.shutdown().await;
    println!("\nSession ended.");
}

/// Servo tracker loop
fn run_track(config: &AppConfig, args: &Args) {
    let mut tracker = match ServoTracker::new(config.tracker.clone()) {
        Ok(tracker) => tracker,
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(1);
        }
    };

    print_header("Servo Tracker", args);
    println!(
        "Frame {}x{}, acting on every {} frame(s). Type 'quit' to exit.",
        args.frame_width, args.frame_height, config.tracker.skip_frames
    );
    println!();

    for line in stdin_lines() {
        let detections: Vec<Detection> = if line == "-" {
            Vec::new()
        } else {
            line.split(';').filter_map(Detection::parse_line).collect()
        };

        let Some(frame) = tracker.process_frame(
            &detections,
            args.frame_width,
            args.frame_height,
            false,
            Instant::now(),
        ) else {
            continue;
        };
        if args.json {
            print_json(&frame);
        } else {
            print!("{}", ActuatorCommand::Track(frame).to_wire());
        }
    }
}

/// Bridge translation loop
fn run_bridge(config: &AppConfig, args: &Args) {
    let translator = match BridgeTranslator::new(config.bridge.clone()) {
        Ok(translator) => translator,
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(1);
        }
    };

    print_header("Bridge", args);
    println!("Forwarding to {}. Type 'quit' to exit.", config.bridge.base_url);
    println!();

    for line in stdin_lines() {
        let Some(request) = translator.parse(&line) else {
            continue;
        };
        if args.json {
            #[derive(Serialize)]
            struct BridgeOutput<'a> {
                request: &'a reflexbot::types::BridgeRequest,
                url: String,
            }
            print_json(&BridgeOutput {
                url: translator.url(&request).to_string(),
                request: &request,
            });
        } else {
            println!("GET {}", translator.url(&request));
        }
    }
}

/// Trimmed non-empty stdin lines until EOF or quit
fn stdin_lines() -> impl Iterator<Item = String> {
    io::stdin()
        .lock()
        .lines()
        .map_while(Result::ok)
        .map(|line| line.trim().to_string())
        .take_while(|line| !is_quit(line))
        .filter(|line| !line.is_empty())
}

fn is_quit(line: &str) -> bool {
    line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit")
}

fn print_outcome(outcome: &RouteOutcome, args: &Args) {
    if args.json {
        print_json(outcome);
        return;
    }
    let directive = outcome.directive;
    let mut line = format!("directive={} | rule={}", directive.kind, outcome.rule.code());
    if directive.is_timed() {
        line.push_str(&format!(" | auto-stop={:.1}s", directive.duration_secs));
    }
    if directive.is_actuated() {
        println!("{}", line.green());
    } else {
        println!("{}", line.yellow());
    }
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("JSON error: {}", e),
    }
}

fn print_header(mode: &str, args: &Args) {
    if args.json {
        return;
    }
    println!("{}", "========================================".bold());
    println!("{}", format!("  Reflexbot v{} - {}", VERSION, mode).bold());
    println!("{}", "========================================".bold());
    println!();
    let _ = io::stdout().flush();
}
