// The match engine: loadout rule checks and seeded duel resolution.
//
// This is the in-process counterpart of the remote match service. Both sides
// implement the same semantics, so a loadout or duel gives the same verdict
// whichever backend mode the console runs in.

pub mod duel;
pub mod rng;
pub mod rules;

pub use duel::{resolve_duel, DuelError, MatchEngine};
pub use rng::DuelRng;
pub use rules::{validate_loadout, RuleViolation};
