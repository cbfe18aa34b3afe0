use clap::{Parser, ValueEnum};
use classic_ds::{List, Tree};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::process::ExitCode;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Structure {
    Tree,
    List,
}

#[derive(Parser)]
#[command(name = "exercise")]
#[command(about = "Drives a data structure with random operations and prints its state")]
struct Args {
    /// Number of iterations, each possibly adding and then deleting a value
    iterations: usize,

    #[arg(long, value_enum, default_value = "tree")]
    structure: Structure,

    /// Largest value drawn, values come from 0..=max-value
    #[arg(long, default_value = "100")]
    max_value: u32,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    match args.structure {
        Structure::List => {
            exercise_list(&args, &mut rng);
            ExitCode::SUCCESS
        }
        Structure::Tree => exercise_tree(&args, &mut rng),
    }
}

fn exercise_list(args: &Args, rng: &mut StdRng) {
    let mut list = List::new();

    for _ in 0..args.iterations {
        if rng.random_bool(0.5) {
            let value = rng.random_range(0..=args.max_value);
            if rng.random_bool(0.5) {
                print!("add_head({value:3}): ");
                list.add_head(value);
            } else {
                print!("add_tail({value:3}): ");
                list.add_tail(value);
            }
            print_list(&list);
        }

        if rng.random_bool(0.5) {
            if rng.random_bool(0.5) {
                print!("delete_head(): ");
                list.delete_head();
            } else {
                print!("delete_tail(): ");
                list.delete_tail();
            }
            print_list(&list);
        }
    }
}

/// Inserted values are mirrored into a sorted list, which the tree's in-order
/// walk must match after every mutation.
fn exercise_tree(args: &Args, rng: &mut StdRng) -> ExitCode {
    let mut tree = Tree::new();
    let mut ledger = List::new();

    for _ in 0..args.iterations {
        if rng.random_bool(0.5) {
            let value = rng.random_range(0..=args.max_value);
            println!("insert({value:3}):");
            tree.insert(value);
            ledger.insert_sorted(value);
            if !check_tree(&tree, &ledger) {
                return ExitCode::FAILURE;
            }
        }

        if rng.random_bool(0.5) && !ledger.is_empty() {
            let index = rng.random_range(0..ledger.len());
            let Some(&value) = ledger.iter().nth(index) else {
                continue;
            };
            println!("remove({value:3}):");
            ledger.remove(&value);
            if !tree.remove(&value) {
                eprintln!("!!! error: {value} was inserted but could not be removed");
                return ExitCode::FAILURE;
            }
            if !check_tree(&tree, &ledger) {
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}

fn check_tree(tree: &Tree<u32>, ledger: &List<u32>) -> bool {
    print_tree(tree);

    if !tree.verify() {
        eprintln!("!!! error: tree is out of order");
        return false;
    }
    if !tree.iter().eq(ledger.iter()) {
        eprintln!(
            "!!! error: tree holds {:?}, expected {:?}",
            tree.iter().collect::<Vec<_>>(),
            ledger
        );
        return false;
    }
    true
}

fn print_list(list: &List<u32>) {
    for value in list {
        print!("{value:4} -> ");
    }
    println!("NULL");
}

fn print_tree(tree: &Tree<u32>) {
    let mut current = None;
    for (level, value) in tree.breadth_first() {
        if current != Some(level) {
            if current.is_some() {
                println!();
            }
            print!("  {level:3}:");
            current = Some(level);
        }
        print!(" {value:4}");
    }
    if current.is_none() {
        print!("  (empty)");
    }
    println!();
    println!("  len = {}, depth = {}", tree.len(), tree.depth());
}
