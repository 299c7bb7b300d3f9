use std::{
    env, fs,
    io::{self, BufRead as _, Write as _},
    process::ExitCode,
};

use holyz::{Interp, ReplSession, StdPrint};

fn main() -> ExitCode {
    init_logging();
    let args: Vec<String> = env::args().collect();
    match args.get(1) {
        Some(path) => run_file(path),
        None => run_repl(),
    }
}

/// Warnings and interpreter trace go to stderr; `RUST_LOG` overrides the
/// default level.
fn init_logging() {
    use tracing_subscriber::EnvFilter;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("holyz=warn".parse().unwrap()))
        .with_writer(io::stderr)
        .init();
}

fn run_file(path: &str) -> ExitCode {
    let source = match read_file(path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };
    let mut interp = Interp::new();
    match interp.run_script(&source, &mut StdPrint) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            wait_for_enter();
            ExitCode::FAILURE
        }
    }
}

fn read_file(path: &str) -> Result<String, String> {
    match fs::metadata(path) {
        Ok(metadata) => {
            if !metadata.is_file() {
                return Err(format!("{path} is not a file"));
            }
        }
        Err(err) => {
            return Err(format!("cannot read {path}: {err}"));
        }
    }
    fs::read_to_string(path).map_err(|err| format!("cannot read {path}: {err}"))
}

fn wait_for_enter() {
    eprintln!("press Enter to exit");
    let mut line = String::new();
    let _ = io::stdin().read_line(&mut line);
}

fn run_repl() -> ExitCode {
    println!("Holy Z Interactive Shell (Holy C Enhanced)");
    println!("Type 'exit' to quit, '#holyc on' to enable Holy C mode");
    let mut session = ReplSession::new();
    prompt();
    for line in io::stdin().lock().lines() {
        let Ok(line) = line else { break };
        let trimmed = line.trim();
        if trimmed == "exit" || trimmed == "quit" {
            break;
        }
        match session.eval_line(&line, &mut StdPrint) {
            Ok(Some(rendered)) => println!("{rendered}"),
            Ok(None) => {}
            Err(err) => eprintln!("error: {err}"),
        }
        prompt();
    }
    ExitCode::SUCCESS
}

fn prompt() {
    print!(">>> ");
    let _ = io::stdout().flush();
}
