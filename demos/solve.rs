//! Scramble a board, solve it, and report search progress.
//!
//! Run: cargo run --bin solve [steps]

use std::time::Instant;

use fifteen_solver::solve_with_progress;

/// Walk length that keeps the no-argument demo responsive.
const DEFAULT_WALK: u32 = 40;

fn main() {
    let steps = match std::env::args().nth(1) {
        Some(arg) => match arg.parse::<u32>() {
            Ok(n) => n,
            Err(_) => {
                eprintln!("usage: solve [steps]");
                std::process::exit(2);
            }
        },
        None => DEFAULT_WALK,
    };

    let mut rng = rand::rng();
    let start = fifteen_scramble::scramble(&mut rng, steps);
    println!("scrambled with a {steps}-step walk:\n{start}\n");

    let clock = Instant::now();
    let Some(solution) = solve_with_progress(&start, |p| {
        println!(
            "h {:>2} at depth {:>2} | iteration {:>7} | frontier {:>7} | closed {:>7}",
            p.h, p.g, p.iterations, p.frontier_len, p.closed_len
        );
    }) else {
        eprintln!("no solution found");
        std::process::exit(1);
    };
    let elapsed = clock.elapsed();

    println!();
    for (index, mv) in solution.moves().enumerate() {
        println!("{:>3}. {mv}", index + 1);
    }
    println!("\nsolved in {} moves ({elapsed:.2?})", solution.move_count());
}
