use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use landis::{AvlTree, Branch, Key, Step};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "landis", about = "Explainable AVL tree engine")]
struct Cli {
    /// Lower the log filter to debug (RUST_LOG overrides either way).
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Interactive session: each line toggles a key (insert if absent,
    /// delete if present). `clear` resets, `quit` or a non-positive
    /// integer ends the session.
    Session {
        /// Suppress the per-operation step trace.
        #[arg(long)]
        quiet: bool,
    },
    /// Toggle each key in order, then print the final tree.
    Apply {
        /// Positive integer keys, applied left to right.
        #[arg(required = true)]
        keys: Vec<Key>,
        /// Print every operation's step trace.
        #[arg(long)]
        trace: bool,
        /// Also print the level-order view.
        #[arg(long)]
        by_level: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Session { quiet } => run_session(quiet)?,
        Commands::Apply {
            keys,
            trace,
            by_level,
        } => run_apply(keys, trace, by_level)?,
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "landis=debug" } else { "landis=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run_session(quiet: bool) -> Result<()> {
    let mut tree = AvlTree::new();
    println!("Enter a positive integer to insert or delete it.");
    println!("`clear` empties the tree, `quit` or a non-positive integer exits.");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush().context("failed to flush prompt")?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("failed to read from stdin")?;
        let input = line.trim();

        match input {
            "" => continue,
            "quit" | "exit" => break,
            "clear" => {
                tree.clear();
                println!("Tree cleared");
                print_structure(&tree);
                print_stats(&tree);
            }
            _ => {
                let key: Key = match input.parse() {
                    Ok(key) => key,
                    Err(_) => {
                        println!("'{input}' is not a valid integer");
                        continue;
                    }
                };
                // The exit sentinel never reaches the engine.
                if key <= 0 {
                    break;
                }

                let action = toggle(&mut tree, key);
                println!("{action} {key}");
                if !quiet {
                    print_steps(&tree.drain_steps());
                }
                print_structure(&tree);
                print_stats(&tree);
            }
        }
    }

    Ok(())
}

fn run_apply(keys: Vec<Key>, trace: bool, by_level: bool) -> Result<()> {
    if let Some(key) = keys.iter().find(|&&key| key <= 0) {
        bail!("keys must be positive integers (got {key})");
    }

    let mut tree = AvlTree::new();
    for key in keys {
        let action = toggle(&mut tree, key);
        println!("{action} {key}");
        if trace {
            print_steps(&tree.drain_steps());
        }
    }

    print_structure(&tree);
    print_stats(&tree);
    if by_level {
        print_levels(&tree);
    }

    Ok(())
}

/// Toggle policy: a present key is deleted, an absent one inserted. Caller
/// policy only; the engine treats insert and delete as independent
/// operations.
fn toggle(tree: &mut AvlTree, key: Key) -> &'static str {
    if tree.contains(key) {
        tree.delete(key);
        "deleted"
    } else {
        tree.insert(key);
        "inserted"
    }
}

fn print_steps(steps: &[Step]) {
    for (number, step) in steps.iter().enumerate() {
        println!("  {:>2}. [{}] {}", number + 1, step.phase, step.description);
    }
}

/// Indented structure dump in the original visualizer's console format:
/// `R----` marks the root and right children, `L----` left children, with
/// `|` continuation bars under left branches.
fn print_structure(tree: &AvlTree) {
    if tree.is_empty() {
        println!("Tree is empty");
        return;
    }

    println!("AVL Tree Structure:");
    let mut segments: Vec<&str> = Vec::new();
    for entry in tree.structure() {
        segments.truncate(entry.depth);
        let marker = match entry.branch {
            Branch::Left => "L----",
            Branch::Root | Branch::Right => "R----",
        };
        println!("{}{marker}{}", segments.concat(), entry.snapshot.key);
        segments.push(match entry.branch {
            Branch::Left => "|    ",
            Branch::Root | Branch::Right => "     ",
        });
    }
}

fn print_stats(tree: &AvlTree) {
    println!(
        "{} nodes, height {}, AVL bound {}",
        tree.len(),
        tree.height(),
        tree.height_bound()
    );
}

fn print_levels(tree: &AvlTree) {
    for (depth, level) in tree.levels().iter().enumerate() {
        let keys: Vec<String> = level.iter().map(|snap| snap.key.to_string()).collect();
        println!("level {depth}: {}", keys.join(" "));
    }
}
