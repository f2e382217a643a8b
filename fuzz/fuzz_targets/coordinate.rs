#![no_main]

use chessmatch::Coordinate;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    if let Ok(coordinate) = data.parse::<Coordinate>() {
        let roundtripped: Coordinate = coordinate.to_string().parse().expect("roundtrip");
        assert_eq!(coordinate, roundtripped);
        assert_eq!(Coordinate::from_position(coordinate.to_position()), Ok(coordinate));
    }
});
