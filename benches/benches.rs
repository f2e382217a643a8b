use chessmatch::{perft, Color, Coordinate, Match, Position, Role, Setup};
use iai::black_box;

fn kiwipete() -> Match {
    const BOARD: [&str; 8] = [
        "r...k..r", "p.ppqpb.", "bn..pnp.", "...PN...", ".p..P...", "..N..Q.p", "PPPBBPPP",
        "R...K..R",
    ];
    let mut setup = Setup::empty();
    for (row, line) in (0..).zip(BOARD) {
        for (column, ch) in (0..).zip(line.chars()) {
            let Some(role) = Role::from_char(ch) else {
                continue;
            };
            let color = Color::from_white(ch.is_ascii_uppercase());
            let moved = role == Role::Pawn && row != color.fold(6, 1);
            setup.put_position(Position::new(row, column), color, role, u32::from(moved));
        }
    }
    Match::from_setup(&setup).expect("legal setup")
}

fn bench_shallow_perft() {
    let game = Match::new();
    assert_eq!(black_box(perft(black_box(&game), 3)), 8_902);
}

fn bench_kiwipete() {
    let game = kiwipete();
    assert_eq!(perft(black_box(&game), 2), 2_039);
}

fn bench_legal_moves() {
    let game = kiwipete();
    assert_eq!(black_box(&game).legal_moves().len(), 48);
}

fn bench_perform_moves() -> Match {
    let moves = [
        ("E2", "E4"),
        ("E7", "E5"),
        ("G1", "F3"),
        ("B8", "C6"),
        ("F1", "C4"),
        ("G8", "F6"),
        ("E1", "G1"),
        ("F8", "C5"),
        ("D2", "D3"),
        ("D7", "D6"),
    ];

    let mut game = black_box(Match::new());
    for (from, to) in black_box(moves) {
        let from: Coordinate = from.parse().expect("valid coordinate");
        let to: Coordinate = to.parse().expect("valid coordinate");
        game.perform_move(from, to).expect("legal move");
    }
    game
}

fn bench_checkmate() -> Match {
    let mut game = black_box(Match::new());
    for (from, to) in [("F2", "F3"), ("E7", "E5"), ("G2", "G4"), ("D8", "H4")] {
        let from: Coordinate = from.parse().expect("valid coordinate");
        let to: Coordinate = to.parse().expect("valid coordinate");
        game.perform_move(from, to).expect("legal move");
    }
    assert!(game.checkmate());
    game
}

iai::main!(
    bench_shallow_perft,
    bench_kiwipete,
    bench_legal_moves,
    bench_perform_moves,
    bench_checkmate,
);
