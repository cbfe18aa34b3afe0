use clap::{Parser, ValueEnum};
use classic_ds::{List, Ops, Tree};
use rand::SeedableRng;
use rand::seq::SliceRandom;
use std::time::Instant;

/// Above this size the list's quadratic contains/remove phases take minutes.
const LIST_SIZE_WARNING: usize = 10_000;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Structure {
    Tree,
    List,
}

#[derive(Parser)]
#[command(name = "structure-benchmark")]
#[command(about = "A data structure performance testing tool")]
struct Args {
    #[arg(long, default_value = "100000")]
    size: usize,

    #[arg(long, value_enum, default_value = "tree")]
    structure: Structure,

    /// Seed for shuffling the inserted values
    #[arg(long, default_value = "42")]
    seed: u64,
}

fn main() {
    let args = Args::parse();

    println!(
        "Running with {:?} structure and {} node count",
        args.structure, args.size
    );

    if let Some(warning) = size_warning(args.structure, args.size) {
        eprintln!("{warning}");
    }

    // shuffled so the unbalanced tree stays shallow
    let mut values: Vec<usize> = (0..args.size).collect();
    values.shuffle(&mut rand::rngs::StdRng::seed_from_u64(args.seed));

    match args.structure {
        Structure::Tree => run(Tree::new(), &values),
        Structure::List => run(List::new(), &values),
    }
}

fn size_warning(structure: Structure, size: usize) -> Option<String> {
    match structure {
        Structure::List if size > LIST_SIZE_WARNING => Some(format!(
            "warning: list lookups are linear, {} values means roughly {} node visits",
            size,
            size.saturating_mul(size)
        )),
        _ => None,
    }
}

fn run<S: Ops<usize>>(mut structure: S, values: &[usize]) {
    let start = Instant::now();
    for (i, &value) in values.iter().enumerate() {
        assert_eq!(structure.len(), i);
        structure.insert(value);
    }
    let inserted = Instant::now();
    for value in values {
        assert!(structure.contains(value));
    }
    let checked_contains = Instant::now();
    for value in values {
        assert!(structure.remove(value));
    }
    let end = Instant::now();
    assert!(structure.is_empty());

    println!(
        "Inserts took {} seconds",
        inserted.saturating_duration_since(start).as_secs_f32()
    );
    println!(
        "Checking contains took {} seconds",
        checked_contains
            .saturating_duration_since(inserted)
            .as_secs_f32()
    );
    println!(
        "Removals took {} seconds",
        end.saturating_duration_since(checked_contains)
            .as_secs_f32()
    );
    println!(
        "Total {} seconds",
        end.saturating_duration_since(start).as_secs_f32()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warns_only_for_large_lists() {
        assert!(size_warning(Structure::List, 100_000).is_some());
        assert!(size_warning(Structure::List, LIST_SIZE_WARNING).is_none());
        assert!(size_warning(Structure::Tree, 100_000).is_none());
    }

    #[test]
    fn small_runs_complete() {
        let values: Vec<usize> = (0..100).rev().collect();
        run(Tree::new(), &values);
        run(List::new(), &values);
    }
}
