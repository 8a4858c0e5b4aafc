use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use willmeter_core::{Task, TaskStore, WillMeter};
use willmeter_store::{CatalogTranslator, JsonFileKv, JsonTaskStore, KvWillPowerStore};

mod config;
mod meter_cmd;
mod state;
mod task_cmd;

use task_cmd::TaskCommand;

type Meter = WillMeter<KvWillPowerStore<JsonFileKv>, CatalogTranslator>;

#[derive(Parser, Debug)]
#[command(name = "willmeter", version, about = "Track willpower and spend it on tasks")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show current willpower, status, and a recommendation
    Status,

    /// Spend willpower
    Consume {
        #[arg(allow_negative_numbers = true)]
        amount: i32,
    },

    /// Recover willpower (capped at max)
    Restore {
        #[arg(allow_negative_numbers = true)]
        amount: i32,
    },

    /// Refill willpower to max
    Reset,

    /// Open tasks you can afford now, best first
    Suggest {
        /// Limit number of tasks printed (default: 10)
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },

    /// Pay a task's cost and mark it completed
    Perform { id: String },

    /// Task management
    Task {
        #[command(subcommand)]
        command: TaskCommand,
    },

    /// Configuration file helpers
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default ~/.willmeter/config.toml if none exists
    Init,
}

fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
        },

        Command::Task { command } => {
            let cfg = config::load_config()?;
            let translator = config::build_translator(&cfg)?;
            let tasks = JsonTaskStore::new(state::tasks_path()?);
            task_cmd::run(command, &tasks, &translator).await?;
        }

        Command::Status => {
            let meter = open_meter().await?;
            print_status(&meter);
        }

        Command::Consume { amount } => {
            let mut meter = open_meter().await?;
            meter_cmd::consume(&mut meter, amount).await?;
            print_status(&meter);
        }

        Command::Restore { amount } => {
            let mut meter = open_meter().await?;
            meter_cmd::restore(&mut meter, amount).await?;
            print_status(&meter);
        }

        Command::Reset => {
            let mut meter = open_meter().await?;
            meter_cmd::reset(&mut meter).await?;
            print_status(&meter);
        }

        Command::Suggest { limit } => {
            let meter = open_meter().await?;
            let tasks = JsonTaskStore::new(state::tasks_path()?);
            let all = tasks.all().await.context("loading tasks")?;
            let open: Vec<&Task> = all
                .iter()
                .filter(|t| task_cmd::is_open(t))
                .collect();

            let suggested = meter.suggested_tasks(open);
            println!(
                "Willpower: {} ({})\n",
                meter.display_text(),
                meter.status_text()
            );
            if suggested.is_empty() {
                println!(
                    "Nothing affordable right now. {}",
                    meter.recommended_action()
                );
            }
            for t in suggested.into_iter().take(limit) {
                println!("{}", task_cmd::format_task(t, meter.translator()));
            }
        }

        Command::Perform { id } => {
            let mut meter = open_meter().await?;
            let tasks = JsonTaskStore::new(state::tasks_path()?);
            let task = task_cmd::perform(&mut meter, &tasks, &id).await?;
            println!("Done: {} (-{})", task.title, task.will_power_cost());
            print_status(&meter);
        }
    }

    Ok(())
}

async fn open_meter() -> Result<Meter> {
    let cfg = config::load_config()?;
    let translator = config::build_translator(&cfg)?;
    let store = KvWillPowerStore::new(JsonFileKv::new(state::store_path()?));
    WillMeter::load(store, translator)
        .await
        .context("loading willpower")
}

fn print_status(meter: &Meter) {
    println!("Willpower: {}", meter.display_text());
    println!("Status:    {}", meter.status_text());
    println!("Next:      {}", meter.recommended_action());
    if meter.is_critical() {
        println!("\n(critical: consider restoring before taking on tasks)");
    }
}
