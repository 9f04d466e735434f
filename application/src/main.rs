use std::{io, process::ExitCode, sync::OnceLock};

use application::{run, Args, Config, Service};
use service::infra::Memory;
use tracing as log;
use tracing_subscriber::{
    filter::filter_fn,
    layer::{Layer as _, SubscriberExt as _},
    util::SubscriberInitExt as _,
};

static LOG_LEVEL: OnceLock<log::Level> = OnceLock::new();

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_thread_names(true)
                .with_writer(io::stderr)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || LOG_LEVEL
                            .get()
                            .copied()
                            .unwrap_or(log::Level::INFO)
                            >= *meta.level()
                })),
        )
        .init();

    match start().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(()) => ExitCode::FAILURE,
    }
}

async fn start() -> Result<(), ()> {
    let Args { config, command } = Args::parse().unwrap_or_else(|e| e.exit());

    let Config {
        store,
        service,
        log,
    } = Config::new(config).map_err(|e| {
        log::error!("failed to load `Config`: {e}");
    })?;

    LOG_LEVEL
        .set(log.level.into())
        .unwrap_or_else(|_| unreachable!("first initialization"));

    let memory = Memory::open(&store.path).await.map_err(|e| {
        log::error!(
            "failed to open ledger at `{}`: {e}",
            store.path.display(),
        );
    })?;
    let service = Service::new(service.into(), memory);

    let is_mutation = command.is_mutation();
    let response = run(&service, command).await.map_err(|e| {
        log::error!("command failed: {e}");
        print_json(&serde_json::json!({ "error": e }));
    })?;

    if is_mutation {
        service
            .database()
            .persist(&store.path)
            .await
            .map_err(|e| {
                log::error!(
                    "failed to persist ledger at `{}`: {e}",
                    store.path.display(),
                );
            })?;
        log::debug!("persisted ledger at `{}`", store.path.display());
    }

    print_json(&response);
    Ok(())
}

/// Prints the provided `value` to stdout as pretty JSON.
fn print_json(value: &impl serde::Serialize) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("failed to serialize response: {e}"),
    }
}
