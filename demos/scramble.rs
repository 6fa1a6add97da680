//! Scramble a board and print it, including the column:row exchange form.
//!
//! Run: cargo run --bin scramble [steps]

fn main() {
    let steps = match std::env::args().nth(1) {
        Some(arg) => match arg.parse::<u32>() {
            Ok(n) => n,
            Err(_) => {
                eprintln!("usage: scramble [steps]");
                std::process::exit(2);
            }
        },
        None => fifteen_scramble::DEFAULT_STEPS,
    };

    let mut rng = rand::rng();
    let board = fifteen_scramble::scramble(&mut rng, steps);

    println!("{board}\n");
    println!(
        "misplaced {} | distance {} | heuristic {}",
        board.misplaced_pieces(),
        board.total_distance(),
        fifteen_solver::heuristic(&board)
    );

    match serde_json::to_string_pretty(&board) {
        Ok(json) => println!("\n{json}"),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
