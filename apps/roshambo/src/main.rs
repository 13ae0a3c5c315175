use clap::Parser;
use roshambo::ai::create_ai;
use roshambo::config::db::DbKind;
use roshambo::config::game::GameConfig;
use roshambo::console::{render_turns, StdinInput};
use roshambo::services::game_flow::{GameFlowService, SessionOutcome};
use roshambo::telemetry::init_tracing;
use roshambo::{build_state, AppError};

#[derive(Parser, Debug)]
#[command(name = "roshambo")]
#[command(about = "Rock, scissors, paper against the computer")]
struct Args {
    /// Storage backend
    #[arg(long, value_enum, env = "ROSHAMBO_DB", default_value = "memory")]
    db: DbKind,

    /// Turn count for a new game (asked interactively when omitted)
    #[arg(long)]
    turns: Option<u32>,

    /// Wipe stored games, turns and users first
    #[arg(long)]
    fresh: bool,

    /// Seed for the AI player
    #[arg(long)]
    seed: Option<u64>,

    /// How many recent turns to show at the end
    #[arg(long)]
    last_turns: Option<u64>,
}

#[tokio::main]
async fn main() {
    init_tracing();
    let args = Args::parse();

    if let Err(e) = run(args).await {
        tracing::error!(code = e.code(), error = %e, "session failed");
        eprintln!("{e}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), AppError> {
    let mut config = GameConfig::from_env()?;
    if let Some(seed) = args.seed {
        config.ai_seed = Some(seed);
    }
    if let Some(last_turns) = args.last_turns {
        config.last_turns = last_turns;
    }

    let state = build_state()
        .with_db(args.db)
        .fresh(args.fresh)
        .build()
        .await?;
    let ai = create_ai("random", config.ai_seed)
        .ok_or_else(|| AppError::config("unknown AI type".to_string()))?;
    let mut input = StdinInput::stdio();
    let flow = GameFlowService::new();

    let session = flow
        .open_session(&state, &config, &mut input, args.turns)
        .await?;
    let report = flow
        .run(&state, &config, &session, &mut input, ai.as_ref())
        .await?;

    match report.outcome {
        SessionOutcome::Finished => println!("Game is finished"),
        SessionOutcome::Canceled => println!("Game was canceled"),
        SessionOutcome::Withdrawn => println!("Game paused; run again to continue"),
    }
    println!("Info about last {} turns:\n", config.last_turns);
    println!("{}", render_turns(&report.last_turns, &report.names));
    Ok(())
}
