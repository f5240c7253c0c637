//! Swipedeck CLI
//!
//! Usage:
//!   swipedeck                               # Interactive swipe loop over the sample deck
//!   swipedeck --deck profiles.json          # Interactive over a deck file
//!   swipedeck --tier plus --run "r,c,u,l"   # Scripted commands, one output line each
//!   swipedeck --serve                       # HTTP API server
//!   swipedeck --json                        # JSON output

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use swipedeck::config::Config;
use swipedeck::core::{load_deck, run_server, sample_deck, Command, Discovery, Entitlements, TracingSink, HELP};
use swipedeck::types::{Candidate, ReasonCode, SessionOutput, SubscriptionTier};
use swipedeck::VERSION;

#[derive(Parser, Debug)]
#[command(
    name = "swipedeck",
    version = VERSION,
    about = "Swipedeck - discovery feed swipe session",
    long_about = "Swipedeck drives a discovery feed: swipe through candidate profiles,\n\
                  rewind recent swipes, and send tier-gated crushes.\n\n\
                  Modes:\n  \
                  (default)      Interactive swipe loop\n  \
                  --run          Run a comma-separated command script\n  \
                  --serve        HTTP API server mode\n\n\
                  Tiers:\n  \
                  FREE      - swipes and rewind only\n  \
                  PLUS      - crushes, boost\n  \
                  SAPPHIRE  - crushes, boost, see who likes you"
)]
struct Args {
    /// JSON deck of candidates (defaults to a built-in sample)
    #[arg(short, long)]
    deck: Option<PathBuf>,

    /// Subscription tier: free, plus, sapphire (overrides config; default free)
    #[arg(short, long)]
    tier: Option<SubscriptionTier>,

    /// Comma-separated commands to run non-interactively
    #[arg(short, long)]
    run: Option<String>,

    /// Run as HTTP API server
    #[arg(short, long)]
    serve: bool,

    /// Server address (overrides config)
    #[arg(long)]
    addr: Option<String>,

    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::load_or_default(args.config.as_deref())?.with_overrides(
        args.tier,
        args.deck.clone(),
        args.addr.clone(),
    );
    init_tracing(&config.log_level);

    if args.no_color {
        colored::control::set_override(false);
    }

    let entitlements = Entitlements::new(config.budgets);

    if args.serve {
        return run_server(&config.server.addr, entitlements)
            .await
            .map_err(|e| anyhow::anyhow!("server error: {}", e));
    }

    let deck = load_candidates(config.deck.as_ref())?;
    let mut discovery = Discovery::new(deck, config.tier, entitlements);
    discovery.add_sink(Box::new(TracingSink));

    match &args.run {
        Some(script) => run_script(&mut discovery, script, &args),
        None => run_interactive(&mut discovery, &args),
    }
}

/// RUST_LOG wins; otherwise the config's level
fn init_tracing(fallback: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn load_candidates(path: Option<&PathBuf>) -> Result<Vec<Candidate>> {
    match path {
        Some(p) => load_deck(p).with_context(|| format!("loading deck {}", p.display())),
        None => Ok(sample_deck()),
    }
}

/// Outcome of one command in the loop
enum Step {
    Continue,
    Quit,
}

/// Apply one command and print its result
fn execute(discovery: &mut Discovery, command: Command, args: &Args) -> Step {
    let reason = match command {
        Command::Swipe(direction) => {
            let before = discovery.matches().len();
            let reason = discovery.swipe(direction).reason();
            if discovery.matches().len() > before {
                ReasonCode::D005_MATCHED
            } else {
                reason
            }
        }
        Command::Rewind => discovery.rewind().reason(),
        Command::Crush => discovery.crush().reason(),
        Command::Boost => discovery.boost().reason(),
        Command::Tier(tier) => {
            discovery.change_tier(tier);
            ReasonCode::D004_TIER_CHANGED
        }
        Command::Status => ReasonCode::D004_STATUS,
        Command::Matches => {
            print_matches(discovery);
            return Step::Continue;
        }
        Command::Help => {
            println!("{}", HELP);
            return Step::Continue;
        }
        Command::Quit => return Step::Quit,
        Command::Unknown(raw) => {
            println!("Unknown command {:?}. Type 'help'.", raw);
            return Step::Continue;
        }
    };

    print_output(&discovery.output(reason), args);
    Step::Continue
}

/// Run a comma-separated command script
fn run_script(discovery: &mut Discovery, script: &str, args: &Args) -> Result<()> {
    for raw in script.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if let Step::Quit = execute(discovery, Command::parse(raw), args) {
            break;
        }
    }
    Ok(())
}

/// Run the interactive swipe loop
fn run_interactive(discovery: &mut Discovery, args: &Args) -> Result<()> {
    print_header(discovery.tier());
    println!("{}", HELP);
    println!();
    print_output(&discovery.output(ReasonCode::D004_SESSION_STARTED), args);

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{} > ", format_prompt(discovery));
        stdout.flush().context("flushing prompt")?;

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => return Err(e).context("reading stdin"),
        }
        if line.trim().is_empty() {
            continue;
        }

        if let Step::Quit = execute(discovery, Command::parse(&line), args) {
            break;
        }
    }

    println!(
        "\nSession ended. Swiped through {} profiles, {} match(es).",
        discovery.session().cursor(),
        discovery.matches().len()
    );
    Ok(())
}

fn print_header(tier: SubscriptionTier) {
    println!("========================================");
    println!("  Swipedeck v{} - {}", VERSION, tier.plan_name());
    println!("========================================");
    println!();
}

fn format_prompt(discovery: &Discovery) -> String {
    let session = discovery.session();
    match session.current() {
        Some(c) => format!("[{} | {} left | {}]", c.name, session.remaining(), discovery.tier()),
        None => format!("[no more profiles | {}]", discovery.tier()),
    }
}

fn print_output(output: &SessionOutput, args: &Args) {
    if args.json {
        match serde_json::to_string(output) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("failed to encode output: {}", e),
        }
    } else if args.no_color {
        println!("{}", output.to_parseable_string());
    } else {
        println!("{}", output.to_terminal_string());
        print_reason_message(output);
    }
}

/// Extra line for outcomes the user has to act on
fn print_reason_message(output: &SessionOutput) {
    match output.reason {
        ReasonCode::D003_NOT_ENTITLED => println!("  → Upgrade with 'tier plus' to unlock crushes and boosts"),
        ReasonCode::D003_BUDGET_EXHAUSTED => {
            println!("  → You've used all your crushes for today. Come back tomorrow for more!")
        }
        ReasonCode::D001_EXHAUSTED => println!("  → No more profiles to show. Check back later for new matches"),
        ReasonCode::D005_MATCHED => println!("  ♥ It's a match!"),
        _ => {}
    }
}

fn print_matches(discovery: &Discovery) {
    let matches = discovery.matches();
    if matches.is_empty() {
        println!("No matches yet.");
        return;
    }
    for m in matches {
        let via = if m.via_crush { " (crush)" } else { "" };
        println!("  ♥ {} [{}]{} at {}", m.name, m.candidate_id, via, m.at.format("%H:%M:%S"));
    }
}
