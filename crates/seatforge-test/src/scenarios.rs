//! Ready-made problems.

use seatforge_core::SeatingProblem;

use crate::ProblemBuilder;

/// Three single guests, one table of three. Exactly one feasible seating.
pub fn single_table_trio() -> SeatingProblem {
    ProblemBuilder::new()
        .guests(&["a", "b", "c"])
        .table("t1", 3)
        .build()
}

/// Two guests who cannot sit together, two single-seat tables.
pub fn feuding_pair() -> SeatingProblem {
    ProblemBuilder::new()
        .guests(&["a", "b"])
        .tables(2, 1)
        .cannot("a", "b")
        .build()
}

/// A wedding-sized problem: 24 parties (32 seats) over five tables of
/// eight, with couples, an adjacency chain, feuds and a restricted head
/// table.
pub fn wedding() -> SeatingProblem {
    let mut builder = ProblemBuilder::new()
        .guest("bride", 1)
        .guest("groom", 1)
        .guest("best_man", 1)
        .guest("maid_of_honor", 1)
        .guest("bride_parents", 2)
        .guest("groom_parents", 2);
    for i in 1..=18 {
        let count = if i % 3 == 0 { 2 } else { 1 };
        builder = builder.guest(&format!("g{i}"), count);
    }
    builder
        .tables(5, 8)
        .must("bride", "groom")
        .adjacent("best_man", "groom")
        .adjacent("bride", "maid_of_honor")
        .restrict("bride", &["t1"])
        .restrict("groom", &["t1"])
        .must("g1", "g2")
        .must("g4", "g5")
        .adjacent("g7", "g8")
        .adjacent("g8", "g9")
        .cannot("bride_parents", "groom_parents")
        .cannot("g1", "g4")
        .cannot("g10", "g11")
        .cannot("g12", "g13")
        .build()
}
