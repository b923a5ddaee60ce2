use metagc_graph::GcError;
use tracing_subscriber::EnvFilter;

/// Install the stderr subscriber. Stdout carries only the report.
pub fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|e| {
        eprintln!("error: invalid log filter `{filter}`: {e}");
        std::process::exit(2);
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

pub fn exit_with_gc_error(err: &GcError) -> ! {
    eprintln!("error: {}: {err}", err.class());
    std::process::exit(1);
}
