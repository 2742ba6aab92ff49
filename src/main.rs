use clap::Parser;
use minipy::cli::{generate_completions, Args, Commands};
use minipy::config::AppConfig;
use minipy::diagnostic::render_diagnostics;
use minipy::interpreter::{parse_program, Interpreter};
use minipy::{repl, tree};
use owo_colors::OwoColorize;
use std::path::Path;

fn main() {
    let args = Args::parse();

    if let Some(Commands::Complete { shell }) = args.command {
        generate_completions(shell);
        return;
    }

    let config = AppConfig::from_args(&args);

    match &args.file {
        None => repl::run(&config),
        Some(path) => run_file(path, &config),
    }
}

fn run_file(path: &Path, config: &AppConfig) {
    verbose_log(config, &format!("Reading program from {}", path.display()));

    let source = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            error_message(config, &format!("Failed to read {}: {}", path.display(), e));
            std::process::exit(1);
        }
    };

    let file_name = path.display().to_string();

    let stmts = match parse_program(&source) {
        Ok(stmts) => {
            verbose_log(config, &format!("Parsed {} statement(s)", stmts.len()));
            stmts
        }
        Err(e) => {
            eprint!(
                "{}",
                render_diagnostics(&source, &file_name, &[e.to_diagnostic()], config.color_enabled)
            );
            std::process::exit(1);
        }
    };

    if config.show_tree {
        print!("{}", tree::render_program(&stmts));
    }

    let mut interpreter = Interpreter::new();
    if let Err(e) = interpreter.run(&stmts) {
        eprint!(
            "{}",
            render_diagnostics(&source, &file_name, &[e.to_diagnostic()], config.color_enabled)
        );
        std::process::exit(1);
    }

    verbose_log(config, "Execution finished");
}

fn verbose_log(config: &AppConfig, message: &str) {
    if config.verbose {
        eprintln!("[minipy:debug] {}", message);
    }
}

fn error_message(config: &AppConfig, message: &str) {
    if config.color_enabled {
        eprintln!("{}", message.red().bold());
    } else {
        eprintln!("{}", message);
    }
}
