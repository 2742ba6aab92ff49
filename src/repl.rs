//! Interactive interpreter loop. Meta-commands are handled here; any other
//! line is submitted to the pipeline as one program against a persistent
//! environment, so errors leave previous bindings intact.

use std::io::{self, BufRead, Write};

use crate::config::AppConfig;
use crate::diagnostic::render_diagnostics;
use crate::interpreter::{parse_program, Interpreter};
use crate::tree;
use crate::value::value_to_display;

pub fn run(config: &AppConfig) {
    println!("MiniPyLang interactive interpreter");
    println!("Type statements, or 'help' for commands. Exit with 'quit' or Ctrl+D.");
    println!();

    let mut show_tree = config.show_tree;
    let mut interpreter = Interpreter::new();
    let stdin = io::stdin();

    loop {
        print!(">>> ");
        io::stdout().flush().ok();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => {
                println!();
                break;
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error reading input: {}", e);
                break;
            }
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match input.to_lowercase().as_str() {
            "quit" | "exit" => break,
            "tree on" => {
                show_tree = true;
                println!("Parse tree display enabled");
                continue;
            }
            "tree off" => {
                show_tree = false;
                println!("Parse tree display disabled");
                continue;
            }
            "vars" => {
                let bindings = interpreter.bindings();
                if bindings.is_empty() {
                    println!("No variables defined");
                } else {
                    println!("Current variables:");
                    for (name, value) in bindings {
                        println!("  {} = {}", name, value_to_display(&value));
                    }
                }
                continue;
            }
            "clear" => {
                interpreter.reset();
                println!("All variables cleared");
                continue;
            }
            "help" => {
                print_help();
                continue;
            }
            _ => {}
        }

        match parse_program(input) {
            Ok(stmts) => {
                if show_tree {
                    print!("{}", tree::render_program(&stmts));
                }
                if let Err(e) = interpreter.run(&stmts) {
                    eprint!(
                        "{}",
                        render_diagnostics(
                            input,
                            "repl",
                            &[e.to_diagnostic()],
                            config.color_enabled
                        )
                    );
                }
            }
            Err(e) => {
                eprint!(
                    "{}",
                    render_diagnostics(input, "repl", &[e.to_diagnostic()], config.color_enabled)
                );
            }
        }
    }
}

fn print_help() {
    println!("Commands:");
    println!("  tree on | tree off   toggle parse tree display");
    println!("  vars                 show current variables");
    println!("  clear                clear all variables");
    println!("  quit | exit          leave the interpreter");
    println!("  help                 show this message");
    println!();
    println!("Anything else runs as a program, for example:");
    println!("  x = 5");
    println!("  if (x > 0) {{ print \"positive\" }}");
    println!("  while (x > 0) {{ print x; x = x - 1 }}");
    println!("  name = input(\"Enter your name: \")");
}
