// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::env;
use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

use bubblegraph::backends::local::local_library;
use bubblegraph::config::{load_and_validate_config, RuntimeBuilder};
use bubblegraph::traits::DataObjectRef;

/// Rows printed per sink before the output is cut short.
const MAX_PRINTED_ROWS: usize = 20;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let plan_only = args.iter().any(|arg| arg == "--plan");
    let config_files: Vec<&String> = args[1..].iter().filter(|arg| *arg != "--plan").collect();

    if config_files.is_empty() {
        eprintln!("Usage: {} [--plan] <pipeline.yaml> [pipeline.yaml ...]", args[0]);
        eprintln!("Example: {} configs/distinct-fanout.yaml", args[0]);
        eprintln!("Example: {} --plan configs/master-detail.yaml", args[0]);
        std::process::exit(1);
    }

    let mut failed = false;
    for (i, config_file) in config_files.iter().enumerate() {
        if i > 0 {
            println!("\n{}", "─".repeat(80));
        }

        if let Err(e) = run_single_config(config_file, plan_only) {
            eprintln!("❌ Failed to execute {}: {:#}", config_file, e);
            failed = true;
        }
    }

    if failed {
        std::process::exit(1);
    }
}

fn run_single_config(config_file: &str, plan_only: bool) -> Result<()> {
    let config = load_and_validate_config(config_file)
        .map_err(|e| anyhow!("{}", e))
        .with_context(|| format!("loading {}", config_file))?;

    let (graph, engine) = RuntimeBuilder::from_config(&config, local_library()?)?;
    let plan = engine.plan(&graph)?;

    println!("📋 Configuration: {}", config_file);
    println!("🔢 Nodes: {}  Connections: {}", graph.len(), graph.connections().len());
    println!("\n🗺️  Plan:");
    for line in plan.to_string().lines() {
        println!("   {}", line);
    }

    if plan_only {
        return Ok(());
    }

    let start = Instant::now();
    let results = engine.execute(&graph, &plan)?;
    let execution_time = start.elapsed();

    println!("\n📊 Execution Results:");
    println!("⏱️  Execution Time: {:?}", execution_time);
    println!("🔢 Steps Evaluated: {}", results.len());

    for (node, result) in results.iter() {
        if !graph.targets(node)?.is_empty() {
            continue;
        }
        let name = graph.node_name(node).unwrap_or("?");
        print_sink(name, result)?;
    }

    Ok(())
}

/// Prints the rows of a node nothing else reads.
fn print_sink(name: &str, result: &DataObjectRef) -> Result<()> {
    println!("\n🎯 {} {}", name, result.fields());

    let mut printed = 0;
    let mut total = 0;
    for row in result.rows()? {
        total += 1;
        if printed < MAX_PRINTED_ROWS {
            let values: Vec<String> = row.iter().map(|value| value.to_string()).collect();
            println!("   {}", values.join(" | "));
            printed += 1;
        }
    }

    if total > printed {
        println!("   ... and {} more", total - printed);
    }
    println!("   ({} rows)", total);
    Ok(())
}
