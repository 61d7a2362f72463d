use std::io::IsTerminal;

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use lifeprogress::{
    cli::output::Painter,
    progress::entities::ProgressStyle,
    storage::profile_store::ProfileStore,
    utils::{
        clock::DefaultClock,
        dir::{logs_dir, resolve_application_path},
        logging::{enable_logging, WIDGET_PREFIX},
        runtime::single_thread_runtime,
        shutdown::detect_shutdown,
    },
    widget::{args::WidgetArgs, render::render, run_widget},
};
use tokio_util::sync::CancellationToken;
use tracing::error;

fn main() -> Result<()> {
    run(WidgetArgs::parse()).inspect_err(|e| error!("Widget failed {e:?}"))
}

fn run(args: WidgetArgs) -> Result<()> {
    let app_dir = resolve_application_path(args.dir)?;
    enable_logging(WIDGET_PREFIX, &logs_dir(&app_dir), args.log, args.log_console)?;

    let store = ProfileStore::open(&app_dir);
    let colored = !args.plain && std::io::stdout().is_terminal();
    let family = args.family;
    let json = args.json;
    let watch = args.watch;

    single_thread_runtime()?.block_on(async move {
        let shutdown = CancellationToken::new();
        tokio::spawn(detect_shutdown(shutdown.clone()));

        run_widget(
            &store,
            &DefaultClock,
            &Local,
            watch,
            shutdown,
            |timeline| {
                if json {
                    println!("{}", serde_json::to_string_pretty(&timeline.entry.data)?);
                } else {
                    let painter =
                        Painter::new(timeline.entry.data.theme, ProgressStyle::default(), colored);
                    print!("{}", render(family, &timeline.entry, &painter));
                }
                Ok(())
            },
        )
        .await
    })
}
