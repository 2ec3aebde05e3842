use std::io::Write;
use std::process::{Command, Stdio};

fn solve_json(board: &str) -> serde_json::Value {
    let mut child = Command::new("cargo")
        .args([
            "run", "--quiet", "--bin", "battleship-solver", "--", "solve", "--cycles", "0",
            "--json", "--seed", "1",
        ])
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("failed to run solver binary");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(board.as_bytes())
        .expect("write board");
    let output = child.wait_with_output().expect("solver did not finish");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("non utf8 output");
    serde_json::from_str(stdout.trim()).expect("invalid json")
}

#[test]
fn zero_grid_strike_skips_shot_cells() {
    let mut board = String::from("O X . . . . . . . .\n");
    for _ in 0..9 {
        board.push_str(". . . . . . . . . .\n");
    }
    let v = solve_json(&board);
    assert_eq!(v["valid_samples"], 0);
    assert_eq!(v["target"]["row"], 0);
    assert_eq!(v["target"]["col"], 2);
}

#[test]
fn fully_shot_board_has_no_strike() {
    // hits never block placements, so the solve succeeds with nothing left to fire at
    let v = solve_json(&"X X X X X X X X X X\n".repeat(10));
    assert!(v["target"].is_null());
}
