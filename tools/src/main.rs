//! ladder-runner: headless reward-ladder runner for Tienda Lucete.
//!
//! Usage:
//!   ladder-runner --db lucete.db --user demo --grant 150 --unlock 1
//!   ladder-runner --db lucete.db --user demo --claim 1 --levels
//!   ladder-runner --ipc-mode

use anyhow::Result;
use lucete_core::{
    classify::{classify, LadderSummary, LevelState},
    config::LadderConfig,
    session::LadderSession,
    store::{ProfileStore, SqliteProfileStore},
    table::{PrimaryReward, RewardKind, SecondaryReward},
    types::Level,
    wallet::UserWallet,
};
use std::env;
use std::io::{self, BufRead, Write};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetLevels,
    GetState,
    Unlock { level: Level },
    Claim { level: Level },
    Grant { amount: u64 },
    Quit,
}

#[derive(serde::Serialize)]
struct LevelRow {
    level:       Level,
    unlock_cost: u64,
    primary:     PrimaryReward,
    secondary:   SecondaryReward,
    state:       LevelState,
}

#[derive(serde::Serialize)]
struct UiState {
    user:     String,
    gold:     u64,
    diamonds: u64,
    summary:  LadderSummary,
    levels:   Vec<LevelRow>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let show_levels = args.iter().any(|a| a == "--levels");
    let db = args
        .windows(2)
        .find(|w| w[0] == "--db")
        .map(|w| w[1].as_str())
        .unwrap_or("lucete.db");
    let user = args
        .windows(2)
        .find(|w| w[0] == "--user")
        .map(|w| w[1].as_str())
        .unwrap_or("demo");
    let config_path = args
        .windows(2)
        .find(|w| w[0] == "--config")
        .map(|w| w[1].as_str());
    let grant: Option<u64> = parse_opt(&args, "--grant");
    let unlock: Option<Level> = parse_opt(&args, "--unlock");
    let claim: Option<Level> = parse_opt(&args, "--claim");

    let config = match config_path {
        Some(path) => LadderConfig::load(path)?,
        None => LadderConfig::default(),
    };

    if !ipc_mode {
        println!("Tienda Lucete ladder-runner");
        println!("  db:     {db}");
        println!("  user:   {user}");
        println!("  config: {}", config_path.unwrap_or("(builtin)"));
        println!("  levels: {}", config.level_count);
        println!();
    }

    let store = SqliteProfileStore::open(db)?;
    store.migrate()?;
    if store.fetch_wallet(user)?.is_none() {
        store.insert_wallet(user, &UserWallet::new())?;
        log::info!("runner: provisioned empty wallet for user={user}");
    }
    let mut session = LadderSession::open(&config, store, user)?;

    if ipc_mode {
        return run_ipc_loop(&mut session);
    }

    if let Some(amount) = grant {
        session.credit_diamonds(amount)?;
        println!("Credited {amount} diamonds");
    }
    if let Some(level) = unlock {
        match session.unlock(level) {
            Ok(wallet) => {
                println!("Unlocked level {level} ({} diamonds left)", wallet.diamonds)
            }
            Err(e) if e.is_benign_noop() => println!("No change: {e}"),
            Err(e) => return Err(e.into()),
        }
    }
    if let Some(level) = claim {
        match session.claim(level) {
            Ok(wallet) => println!(
                "Claimed level {level} (gold={} diamonds={})",
                wallet.gold, wallet.diamonds
            ),
            Err(e) if e.is_benign_noop() => println!("No change: {e}"),
            Err(e) => return Err(e.into()),
        }
    }

    if show_levels {
        print_levels(&session);
    }
    print_status(&session);

    Ok(())
}

fn run_ipc_loop<S: ProfileStore>(session: &mut LadderSession<S>) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                let err_json = serde_json::json!({ "error": e.to_string(), "benign": false });
                writeln!(stdout, "{}", err_json)?;
                stdout.flush()?;
                continue;
            }
        };

        // Action failures (not affordable, already claimed, write-back
        // refused) are reported to the UI as error objects; the loop only
        // ends on quit or EOF.
        let response = match cmd {
            IpcCommand::Quit => break,
            IpcCommand::GetLevels => serde_json::json!({ "levels": session.levels() }),
            IpcCommand::GetState => serde_json::to_value(build_ui_state(session))?,
            IpcCommand::Unlock { level } => match session.unlock(level).map(|_| ()) {
                Ok(()) => serde_json::to_value(build_ui_state(session))?,
                Err(e) => error_json(&e),
            },
            IpcCommand::Claim { level } => match session.claim(level).map(|_| ()) {
                Ok(()) => serde_json::to_value(build_ui_state(session))?,
                Err(e) => error_json(&e),
            },
            IpcCommand::Grant { amount } => match session.credit_diamonds(amount).map(|_| ()) {
                Ok(()) => serde_json::to_value(build_ui_state(session))?,
                Err(e) => error_json(&e),
            },
        };
        writeln!(stdout, "{}", response)?;
        stdout.flush()?;
    }
    Ok(())
}

fn error_json(e: &lucete_core::error::LadderError) -> serde_json::Value {
    serde_json::json!({ "error": e.to_string(), "benign": e.is_benign_noop() })
}

fn build_ui_state<S: ProfileStore>(session: &LadderSession<S>) -> UiState {
    let wallet = session.wallet();
    let levels = session
        .levels()
        .iter()
        .map(|entry| LevelRow {
            level:       entry.level,
            unlock_cost: entry.unlock_cost,
            primary:     entry.primary,
            secondary:   entry.secondary,
            state:       classify(entry, wallet),
        })
        .collect();
    UiState {
        user: session.user_id().to_string(),
        gold: wallet.gold,
        diamonds: wallet.diamonds,
        summary: session.summary(),
        levels,
    }
}

fn print_levels<S: ProfileStore>(session: &LadderSession<S>) {
    println!("=== REWARD LADDER ===");
    println!("  lvl    cost  primary          secondary       state");
    for entry in session.levels() {
        let state = classify(entry, session.wallet());
        let primary = match entry.primary.kind {
            RewardKind::Gold => format!("{} gold", entry.primary.amount),
            RewardKind::Diamond => format!("{} diamonds", entry.primary.amount),
        };
        println!(
            "  {:>3}  {:>6}  {:<15}  {:>5}g {:>3}gem  {}",
            entry.level,
            entry.unlock_cost,
            primary,
            entry.secondary.gold_amount,
            entry.secondary.gem_amount,
            state
        );
    }
    println!();
}

fn print_status<S: ProfileStore>(session: &LadderSession<S>) {
    let wallet = session.wallet();
    let summary = session.summary();
    println!("=== LADDER STATUS ===");
    println!("  user:           {}", session.user_id());
    println!("  gold:           {}", wallet.gold);
    println!("  diamonds:       {}", wallet.diamonds);
    println!("  unlocked:       {}/{}", summary.unlocked, summary.level_count);
    println!("  claimed:        {}", summary.claimed);
    println!("  diamonds spent: {}", summary.diamonds_spent);
    match summary.next_affordable {
        Some(level) => println!("  next unlock:    level {level}"),
        None => println!("  next unlock:    (none affordable)"),
    }
    if summary.claimable.is_empty() {
        println!("  claimable:      (none)");
    } else {
        let levels: Vec<String> = summary.claimable.iter().map(|l| l.to_string()).collect();
        println!("  claimable:      {}", levels.join(", "));
    }
}

fn parse_opt<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
}
