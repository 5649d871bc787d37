use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use timetable_dump::script::SessionScript;
use timetable_dump::session::ParserConfig;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("Usage: timetable-dump <script.json>");
        return ExitCode::FAILURE;
    };

    let config = match ParserConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let dump = match SessionScript::load(&path).and_then(|script| script.replay(config)) {
        Ok(dump) => dump,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match serde_json::to_string_pretty(&dump) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: failed to serialize schedule: {e}");
            ExitCode::FAILURE
        }
    }
}
