// SPDX-License-Identifier: MPL-2.0
use mokhtabary_toasts::config;
use mokhtabary_toasts::diagnostics::DiagnosticsCollector;
use mokhtabary_toasts::toast::{
    Kind, Position, Presenter, Store, ToastDuration, ToastQueue, ToastRequest,
};
use std::path::PathBuf;
use std::process::ExitCode;

const HELP: &str = "\
Raise dashboard toasts and follow them until they expire.

USAGE:
  mokhtabary-toasts [OPTIONS] MESSAGE...

OPTIONS:
  --config-dir DIR     Read settings.toml from DIR
  --kind KIND          primary, success, warning or error [default: primary]
  --position POS       top or bottom [default: from settings]
  --duration MS        Lifetime of each toast in milliseconds
  --report FILE        Write a JSON diagnostics report to FILE on exit
  -h, --help           Print this help
";

struct Flags {
    config_dir: Option<PathBuf>,
    kind: Kind,
    position: Option<Position>,
    duration_ms: Option<u64>,
    report: Option<PathBuf>,
    messages: Vec<String>,
}

fn parse_flags() -> Result<Option<Flags>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    Ok(Some(Flags {
        config_dir: args.opt_value_from_str("--config-dir")?,
        kind: args.opt_value_from_str("--kind")?.unwrap_or_default(),
        position: args.opt_value_from_str("--position")?,
        duration_ms: args.opt_value_from_str("--duration")?,
        report: args.opt_value_from_str("--report")?,
        messages: args
            .finish()
            .into_iter()
            .filter_map(|s| s.into_string().ok())
            .collect(),
    }))
}

fn build_request(flags: &Flags, message: &str) -> ToastRequest {
    let mut request = ToastRequest::new(message).kind(flags.kind);
    if let Some(position) = flags.position {
        request = request.position(position);
    }
    if let Some(ms) = flags.duration_ms {
        request = request.duration(ToastDuration::from_millis(ms));
    }
    let label = message.to_string();
    request.on_close(move || println!("closed: {label}"))
}

fn print_queue(presenter: &Presenter) {
    let position = presenter.queue().current_position();
    let toasts = presenter.view();
    println!("-- {} toast(s), stacked at {position}", toasts.len());
    for toast in toasts {
        println!(
            "   [{:<7}] {}: {} ({}%)",
            toast.record.kind(),
            toast.record.title(),
            toast.record.message(),
            toast.progress
        );
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let flags = match parse_flags() {
        Ok(Some(flags)) => flags,
        Ok(None) => {
            print!("{HELP}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("error: {err}");
            eprint!("{HELP}");
            return ExitCode::from(2);
        }
    };

    let (config, warning) = config::load_with_override(flags.config_dir.clone());
    if let Some(warning) = warning {
        eprintln!("warning: {warning}, using default settings");
    }

    let mut collector = DiagnosticsCollector::new(config.diagnostics.capacity());
    let mut store = Store::with_defaults(config.toasts.position(), config.toasts.duration());
    store.set_diagnostics(collector.handle());

    let queue = ToastQueue::new(store);
    let mut changes = queue.subscribe();
    let mut presenter = Presenter::new(queue.clone());
    presenter.set_diagnostics(collector.handle());

    for message in &flags.messages {
        presenter.show(build_request(&flags, message));
    }
    print_queue(&presenter);

    while !queue.is_empty() {
        if changes.changed().await.is_err() {
            break;
        }
        presenter.sync();
        collector.process_pending();
        print_queue(&presenter);
    }

    if let Some(path) = &flags.report {
        if let Err(err) = collector.export_to_file(path) {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
