use crate::support::exit_with_gc_error;
use metagc_graph::collect_garbage;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

pub fn run(store_root: PathBuf, json_output: bool) {
    let report = collect_garbage(&store_root).unwrap_or_else(|err| exit_with_gc_error(&err));
    info!(
        store = %store_root.display(),
        garbage = report.summary.garbage_count,
        operations = report.summary.operation_count,
        "collection finished"
    );

    // Render fully before writing so a failure never leaves a partial list.
    let rendered = if json_output {
        let mut rendered = report.render_json().unwrap_or_else(|e| {
            eprintln!("error: failed to render garbage report: {e}");
            std::process::exit(2);
        });
        rendered.push('\n');
        rendered
    } else {
        report.render_lines()
    };

    let mut stdout = std::io::stdout().lock();
    if let Err(e) = stdout
        .write_all(rendered.as_bytes())
        .and_then(|()| stdout.flush())
    {
        eprintln!("error: failed to write garbage report: {e}");
        std::process::exit(2);
    }
}
