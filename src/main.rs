mod cli;
mod cmd;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands, ConfigAction};
use nutritrack::error::AppError;
use nutritrack::models::config::Config;
use nutritrack::output;
use std::process;

fn init_tracing() {
    let filter = std::env::var("NUTRITRACK_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .ok()
        .or_else(|| Config::load().ok().and_then(|c| c.log_level))
        .unwrap_or_else(|| "warn".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_new(&filter)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(env_filter)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let command = cli.command.name();
    let user = cli.user.as_deref();
    let date = cli.date;
    let human = cli.human;

    let result = match cli.command {
        Commands::Init { name } => cmd::init::run(name.as_deref(), human),
        Commands::User { action } => cmd::user::run(action, user, human),
        Commands::Meal { meal_type, items } => {
            cmd::log::run_meal(&meal_type, &items, user, date, human)
        }
        Commands::Water { amount } => cmd::log::run_water(amount, user, date, human),
        Commands::Exercise { kcal } => cmd::log::run_exercise(kcal, user, date, human),
        Commands::Trend { action } => cmd::trend::run(action, user, date, human),
        Commands::Trends { period } => cmd::trend::run_query(&period, user, date, human),
        Commands::Streak { action } => cmd::streak::run(action, user, date, human),
        Commands::Challenge { action } => cmd::challenge::run(action, user, date, human),
        Commands::Status => cmd::status::run(user, date, human),
        Commands::Config { action } => match action {
            ConfigAction::Show => cmd::config::run_show(human),
            ConfigAction::Set { key, value } => cmd::config::run_set(&key, &value),
        },
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "nutritrack", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        tracing::debug!(command, error = %e, "command failed");
        let err = match e.downcast_ref::<AppError>() {
            Some(app) => output::app_error(command, app),
            None => output::error(command, "general_error", &e.to_string()),
        };
        eprintln!("{}", err);
        process::exit(1);
    }
}
