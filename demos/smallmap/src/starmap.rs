//! Synthetic six-system map for the demo.
//!
//! Layout (x in light-years, security):
//!
//! ```text
//! Aulbres(0, 0.2) — Brelin(2, 0.8) — Covryn(4, 0.8) — Defori(5, 0.1)
//!                                                        |
//! Ennar(9, 0.0) — Ferrat(9.5, 0.3)                     (gate)
//! ```
//!
//! Aulbres and Defori are jump-capable and 5 ly apart; Ennar/Ferrat sit off
//! the gate network entirely and are reachable only by jump or wormhole.

use hl_core::{METRES_PER_LY, Position};
use hl_map::{Starmap, StarmapBuilder};

fn at_ly(x: f64) -> Position {
    Position::new(x * METRES_PER_LY, 0.0, 0.0)
}

pub fn build_starmap() -> Starmap {
    let mut b = StarmapBuilder::new();
    let aulbres = b.add_system("Aulbres", at_ly(0.0), 0.2, 1);
    let brelin = b.add_system("Brelin", at_ly(2.0), 0.8, 1);
    let covryn = b.add_system("Covryn", at_ly(4.0), 0.8, 1);
    let defori = b.add_system("Defori", at_ly(5.0), 0.1, 2);
    let ennar = b.add_system("Ennar", at_ly(9.0), 0.0, 3);
    let ferrat = b.add_system("Ferrat", at_ly(9.5), 0.3, 3);

    b.add_gate(aulbres, brelin);
    b.add_gate(brelin, covryn);
    b.add_gate(covryn, defori);
    b.add_gate(ennar, ferrat);

    b.build()
}
