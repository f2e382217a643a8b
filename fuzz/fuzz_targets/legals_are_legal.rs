#![no_main]

use arbitrary::Arbitrary;
use chessmatch::{Match, Move};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Data {
    choices: Vec<u16>,
    candidate: Move,
}

fuzz_target!(|data: Data| {
    let mut game = Match::new();

    for choice in data.choices {
        let legals = game.legal_moves();
        if legals.is_empty() {
            break;
        }
        let m = legals[usize::from(choice) % legals.len()];
        game.play(&m).expect("legal move");
    }

    let legals = game.legal_moves();
    assert!(legals.iter().all(|m| game.is_legal(m)));
    if legals.contains(&data.candidate) {
        assert!(game.is_legal(&data.candidate));
    }

    let before = game.pieces();
    let mut probe = game.clone();
    if probe.play(&data.candidate).is_err() {
        assert_eq!(probe.pieces(), before);
        assert_eq!(probe.turn(), game.turn());
    }
});
