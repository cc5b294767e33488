use clap::{Parser, Subcommand};
use plan_canvas::prelude::*;
use serde::Serialize;
use std::fs;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Compile workflow plans into canvas graphs and apply patches to them
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Pretty-print JSON output
    #[arg(short, long, global = true)]
    pretty: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a plan and print it with defaults applied
    Validate {
        /// Path to the workflow plan JSON file
        plan_path: String,
    },
    /// Compile a plan into canvas nodes, edges and variables
    Compile {
        /// Path to the workflow plan JSON file
        plan_path: String,
        /// Path to a JSON array of available toolsets
        #[arg(short, long)]
        toolsets: Option<String>,
        /// Number ids sequentially instead of using random UUIDs
        #[arg(long)]
        sequential_ids: bool,
        /// Request auto layout (stacks vertically when no layout is available)
        #[arg(long)]
        auto_layout: bool,
    },
    /// Apply a list of patch operations to a plan and print the result
    Patch {
        /// Path to the workflow plan JSON file
        plan_path: String,
        /// Path to the patch operations JSON file
        operations_path: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let start = Instant::now();

    match cli.command {
        Command::Validate { plan_path } => {
            let plan = load_plan(&plan_path);
            print_json(&plan, cli.pretty);
        }
        Command::Compile {
            plan_path,
            toolsets,
            sequential_ids,
            auto_layout,
        } => {
            let plan = load_plan(&plan_path);
            let toolsets: Vec<GenericToolset> = match toolsets {
                Some(path) => serde_json::from_str(&read_file(&path)).unwrap_or_else(|e| {
                    exit_with_error(&format!("Failed to parse toolsets JSON: {}", e))
                }),
                None => Vec::new(),
            };

            let mut builder = WorkflowCompiler::builder();
            if sequential_ids {
                builder = builder.with_id_generator(Box::new(SequentialIdGenerator::new()));
            }
            let options = CompileOptions {
                auto_layout,
                ..Default::default()
            };
            let canvas = builder.build().compile(&plan, &toolsets, &options);
            print_json(&canvas, cli.pretty);
        }
        Command::Patch {
            plan_path,
            operations_path,
        } => {
            let plan = load_plan(&plan_path);
            let raw: serde_json::Value = serde_json::from_str(&read_file(&operations_path))
                .unwrap_or_else(|e| {
                    exit_with_error(&format!("Failed to parse operations JSON: {}", e))
                });
            let operations = parse_patch_operations(&raw)
                .unwrap_or_else(|e| exit_with_error(&e.to_string()));
            let patched = apply_patch(&plan, &operations)
                .unwrap_or_else(|e| exit_with_error(&e.to_string()));
            print_json(&patched, cli.pretty);
        }
    }

    info!(elapsed = ?start.elapsed(), "done");
}

fn read_file(path: &str) -> String {
    fs::read_to_string(path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to read file '{}': {}", path, e)))
}

fn load_plan(path: &str) -> WorkflowPlan {
    read_file(path)
        .as_str()
        .into_plan()
        .unwrap_or_else(|e| exit_with_error(&format!("Invalid plan '{}': {}", path, e)))
}

fn print_json<T: Serialize>(value: &T, pretty: bool) {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    match rendered {
        Ok(text) => println!("{}", text),
        Err(e) => exit_with_error(&format!("Failed to serialize output: {}", e)),
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
