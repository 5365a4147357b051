use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

use matchflow::{
    config, create_search_span, generate_correlation_id, init_config, init_telemetry, CallPhase,
    ControllerConfig, MatchController, Matchable, MockCarrierSource, MockLoadSource, Notifier,
    ResultSource, SearchCriteria, SearchDriver, SessionHooks,
};

#[derive(Parser)]
#[command(name = "matchflow")]
#[command(about = "TMS carrier/load smart-matching session engine")]
#[command(long_about = "Matchflow simulates the smart-matching screens of a transportation \
                       management system: submit a lane search, watch the progress timeline, \
                       browse scored matches, and run the call workflow against a match. \
                       Get started with 'matchflow search'.")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Role {
    /// Broker searching for carriers
    Carrier,
    /// Carrier searching for loads
    Load,
}

impl Role {
    fn label(self) -> &'static str {
        match self {
            Role::Carrier => "carrier",
            Role::Load => "load",
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulated match search end to end, streaming progress
    Search {
        /// Which side of the match to search for
        #[arg(long, value_enum, default_value = "carrier")]
        role: Role,
        #[arg(long, help = "Origin city, e.g. 'Chicago, IL'")]
        origin: String,
        #[arg(long, help = "Destination city, e.g. 'New York, NY'")]
        destination: String,
        #[arg(long, help = "Equipment type, e.g. 'Dry Van'")]
        equipment: String,
        #[arg(long, help = "Minimum lane rate in whole dollars")]
        min_rate: Option<u32>,
        #[arg(long, help = "Pickup date, YYYY-MM-DD")]
        pickup_date: Option<String>,
        #[arg(long, help = "Load weight in pounds")]
        weight: Option<u32>,
        #[arg(long)]
        commodity: Option<String>,
        /// Print results as JSON instead of a table
        #[arg(long)]
        json: bool,
        /// Collapse the simulated delays (for scripting)
        #[arg(long)]
        fast: bool,
    },
    /// Demo the call workflow against the top match for a lane
    Call {
        #[arg(long, value_enum, default_value = "carrier")]
        role: Role,
        #[arg(long)]
        origin: String,
        #[arg(long)]
        destination: String,
        #[arg(long)]
        equipment: String,
        /// How many connected seconds to simulate
        #[arg(long, default_value = "5")]
        seconds: u64,
        /// Call notes to flush on close
        #[arg(long)]
        notes: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_config()?;
    let observability = &config()?.observability;
    init_telemetry(&observability.log_level, observability.json_logs)?;

    match cli.command {
        None => {
            show_usage();
            Ok(())
        }
        Some(Commands::Search {
            role,
            origin,
            destination,
            equipment,
            min_rate,
            pickup_date,
            weight,
            commodity,
            json,
            fast,
        }) => {
            let criteria = build_criteria(
                &origin,
                &destination,
                &equipment,
                min_rate,
                pickup_date.as_deref(),
                weight,
                commodity,
            )?;
            tokio::runtime::Runtime::new()?
                .block_on(async { search_command(role, criteria, json, fast).await })
        }
        Some(Commands::Call {
            role,
            origin,
            destination,
            equipment,
            seconds,
            notes,
        }) => {
            let criteria = build_criteria(&origin, &destination, &equipment, None, None, None, None)?;
            tokio::runtime::Runtime::new()?
                .block_on(async { call_command(role, criteria, seconds, notes).await })
        }
    }
}

fn show_usage() {
    println!("matchflow - TMS smart-matching session engine");
    println!();
    println!("Try a search:");
    println!("  matchflow search --origin 'Chicago, IL' --destination 'New York, NY' --equipment 'Dry Van'");
    println!();
    println!("Or demo the call workflow:");
    println!("  matchflow call --origin 'Chicago, IL' --destination 'New York, NY' --equipment 'Dry Van' --notes 'rate confirmed'");
}

fn build_criteria(
    origin: &str,
    destination: &str,
    equipment: &str,
    min_rate: Option<u32>,
    pickup_date: Option<&str>,
    weight: Option<u32>,
    commodity: Option<String>,
) -> Result<SearchCriteria> {
    let mut criteria = SearchCriteria::new(origin, destination, equipment);
    criteria.min_rate = min_rate;
    criteria.pickup_date = pickup_date
        .map(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d"))
        .transpose()?;
    criteria.weight_lbs = weight;
    criteria.commodity = commodity;
    Ok(criteria)
}

/// Toasts printed the way the host page would surface them.
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str) {
        println!("🔔 {message}");
    }
}

/// Host callbacks printed to the console.
struct ConsoleHooks;

impl<E: Matchable> SessionHooks<E> for ConsoleHooks {
    fn on_save_call(&self, entity_id: &str, notes: &str, duration_seconds: u64) {
        if notes.is_empty() {
            println!("💾 Call with {entity_id} logged ({duration_seconds}s)");
        } else {
            println!("💾 Call with {entity_id} logged ({duration_seconds}s): {notes}");
        }
    }

    fn on_contacted_changed(&self, entity_id: &str) {
        println!("📇 Marked {entity_id} as contacted");
    }
}

fn controller_config(role: Role, fast: bool) -> Result<(ControllerConfig, Duration)> {
    let settings = config()?;
    let mut cfg = match role {
        Role::Carrier => ControllerConfig::carrier(),
        Role::Load => ControllerConfig::load(),
    }
    .with_settings(settings);
    let mut tick = Duration::from_millis(settings.search.tick_interval_ms);

    if fast {
        cfg.search_duration = Duration::from_millis(500);
        cfg.settle_delay = Duration::ZERO;
        tick = Duration::from_millis(50);
    }
    Ok((cfg, tick))
}

async fn search_command(role: Role, criteria: SearchCriteria, json: bool, fast: bool) -> Result<()> {
    let (cfg, tick) = controller_config(role, fast)?;
    match role {
        Role::Carrier => {
            run_search(MatchController::new(MockCarrierSource, cfg), role, criteria, tick, json)
                .await
        }
        Role::Load => {
            run_search(MatchController::new(MockLoadSource, cfg), role, criteria, tick, json).await
        }
    }
}

async fn run_search<S>(
    controller: MatchController<S>,
    role: Role,
    criteria: SearchCriteria,
    tick: Duration,
    json: bool,
) -> Result<()>
where
    S: ResultSource,
    S::Entity: Serialize,
{
    let correlation_id = generate_correlation_id();
    let span = create_search_span(role.label(), &criteria.lane(), &correlation_id);
    let _enter = span.enter();

    let mut controller = controller
        .with_notifier(Arc::new(ConsoleNotifier))
        .with_hooks(Arc::new(ConsoleHooks));

    println!("🔍 Searching {} ({})...", criteria.lane(), criteria.equipment_type);
    controller.submit_search(criteria)?;

    let count = SearchDriver::new(tick)
        .drive(&mut controller, |percent, message| {
            println!("[{percent:>3}%] {message}");
        })
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(controller.results())?);
    } else {
        println!();
        for entity in controller.results() {
            println!("  {}", entity.summary());
        }
        println!();
        println!("{count} match(es)");
    }
    Ok(())
}

async fn call_command(
    role: Role,
    criteria: SearchCriteria,
    seconds: u64,
    notes: Option<String>,
) -> Result<()> {
    let (mut cfg, _) = controller_config(role, true)?;
    cfg.settle_delay = Duration::ZERO;
    match role {
        Role::Carrier => {
            run_call(MatchController::new(MockCarrierSource, cfg), criteria, seconds, notes).await
        }
        Role::Load => {
            run_call(MatchController::new(MockLoadSource, cfg), criteria, seconds, notes).await
        }
    }
}

async fn run_call<S>(
    controller: MatchController<S>,
    criteria: SearchCriteria,
    seconds: u64,
    notes: Option<String>,
) -> Result<()>
where
    S: ResultSource,
{
    let mut controller = controller.with_hooks(Arc::new(ConsoleHooks));
    controller.submit_search(criteria)?;
    SearchDriver::new(Duration::from_millis(50))
        .drive(&mut controller, |_, _| {})
        .await?;

    let Some(top) = controller.results().first() else {
        println!("No matches to call.");
        return Ok(());
    };
    let entity_id = top.id().to_string();
    println!("📞 Dialing: {}", top.summary());
    controller.open_call(&entity_id)?;

    let tick = Duration::from_millis(250);
    let mut interval = tokio::time::interval(tick);
    interval.tick().await;
    let mut announced = false;
    loop {
        interval.tick().await;
        controller.tick(tick);
        let Some(call) = controller.active_call() else {
            break;
        };
        if !announced && call.phase() == CallPhase::Connected {
            println!("✅ Connected");
            announced = true;
        }
        if call.elapsed_seconds() >= seconds {
            break;
        }
    }

    if let Some(text) = notes {
        controller.append_note(&text)?;
    }
    controller.close_call(false)?;
    Ok(())
}
