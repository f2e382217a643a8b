use chessmatch::{Color, Coordinate, Match, MoveError, Role};
use serde::Deserialize;

#[derive(Deserialize)]
struct Record {
    name: String,
    moves: String,
    result: String,
    turn: u32,
    player: String,
    check: bool,
    checkmate: bool,
}

fn parse_move(uci: &str) -> (Coordinate, Coordinate, Option<Role>) {
    let from = uci[0..2].parse().expect("valid source");
    let to = uci[2..4].parse().expect("valid target");
    let promotion = uci[4..]
        .chars()
        .next()
        .map(|ch| Role::from_char(ch).expect("valid promotion"));
    (from, to, promotion)
}

fn error_name(err: &MoveError) -> &'static str {
    match err {
        MoveError::MatchOver => "MatchOver",
        MoveError::NoPieceAtSource => "NoPieceAtSource",
        MoveError::WrongOwner => "WrongOwner",
        MoveError::NoLegalMoves => "NoLegalMoves",
        MoveError::IllegalTarget => "IllegalTarget",
        MoveError::SelfCheck => "SelfCheck",
        MoveError::InvalidPromotion { .. } => "InvalidPromotion",
        MoveError::Board(_) => "Board",
        MoveError::MissingKing { .. } => "MissingKing",
    }
}

#[test]
fn test_scenarios() {
    let mut reader = csv::Reader::from_path("tests/scenarios.csv").expect("reader");

    for record in reader.deserialize() {
        let record: Record = record.expect("record");
        let mut game = Match::new();

        let moves: Vec<_> = record.moves.split_whitespace().collect();
        let (last, init) = moves.split_last().expect("at least one move");

        for uci in init {
            let (from, to, promotion) = parse_move(uci);
            let result = match promotion {
                Some(role) => game.perform_move_with_promotion(from, to, role),
                None => game.perform_move(from, to),
            };
            result.unwrap_or_else(|err| panic!("{}: {uci} failed: {err}", record.name));
        }

        let before = game.pieces();
        let (from, to, promotion) = parse_move(last);
        let result = match promotion {
            Some(role) => game.perform_move_with_promotion(from, to, role),
            None => game.perform_move(from, to),
        };
        match result {
            Ok(_) => assert_eq!(record.result, "ok", "{}", record.name),
            Err(err) => {
                assert_eq!(error_name(&err), record.result, "{}", record.name);
                assert_eq!(game.pieces(), before, "{}: board changed", record.name);
            }
        }

        let player: Color = record.player.parse().expect("color");
        assert_eq!(game.turn(), record.turn, "{}", record.name);
        assert_eq!(game.current_player(), player, "{}", record.name);
        assert_eq!(game.check(), record.check, "{}", record.name);
        assert_eq!(game.checkmate(), record.checkmate, "{}", record.name);
    }
}
