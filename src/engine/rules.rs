// Loadout validation rules.
//
// Checks run in a fixed order: per-piece checks (king attributes, negative
// attributes) during a single scan, then the team-level checks (king count
// before budget). The first violation wins, so error reporting is stable
// for a given loadout.

use thiserror::Error;

use crate::model::Loadout;

/// A loadout rule violation. The display strings double as the
/// user-facing validation messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleViolation {
    #[error("king `{piece_id}` must have 0 points in every attribute")]
    KingWithAttributes { piece_id: String },

    #[error("piece `{piece_id}` has a negative attribute")]
    NegativeAttribute { piece_id: String },

    #[error("the team must have exactly 1 king, found {count}")]
    KingCount { count: usize },

    #[error("points pool exceeded ({spent} > {pool})")]
    OverBudget { spent: i64, pool: i64 },
}

/// Validate a loadout against the team-building rules.
pub fn validate_loadout(loadout: &Loadout) -> Result<(), RuleViolation> {
    let mut spent: i64 = 0;
    let mut king_count = 0;

    for piece in &loadout.pieces {
        if piece.is_king() {
            king_count += 1;
            if piece.atk != 0 || piece.defn != 0 || piece.spd != 0 {
                return Err(RuleViolation::KingWithAttributes {
                    piece_id: piece.id.clone(),
                });
            }
        }
        if piece.atk < 0 || piece.defn < 0 || piece.spd < 0 {
            return Err(RuleViolation::NegativeAttribute {
                piece_id: piece.id.clone(),
            });
        }
        spent += piece.points_spent();
    }

    if king_count != 1 {
        return Err(RuleViolation::KingCount { count: king_count });
    }
    if spent > loadout.points_pool {
        return Err(RuleViolation::OverBudget {
            spent,
            pool: loadout.points_pool,
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Piece, PieceKind};

    fn piece(id: &str, kind: PieceKind, atk: i32, defn: i32, spd: i32) -> Piece {
        Piece {
            id: id.to_string(),
            kind,
            hp: 100,
            atk,
            defn,
            spd,
        }
    }

    fn king() -> Piece {
        piece("K", PieceKind::King, 0, 0, 0)
    }

    fn sample_loadout() -> Loadout {
        Loadout {
            points_pool: 30,
            pieces: vec![
                king(),
                piece("N1", PieceKind::Knight, 6, 5, 4),
                piece("B1", PieceKind::Bishop, 4, 4, 6),
            ],
            rng_seed: None,
        }
    }

    #[test]
    fn valid_loadout_passes() {
        assert_eq!(validate_loadout(&sample_loadout()), Ok(()));
    }

    #[test]
    fn budget_exactly_equal_to_pool_is_valid() {
        let mut loadout = sample_loadout();
        loadout.points_pool = loadout.points_spent();
        assert_eq!(validate_loadout(&loadout), Ok(()));
    }

    #[test]
    fn over_budget_is_rejected_with_amounts() {
        let mut loadout = sample_loadout();
        loadout.points_pool = 28;
        assert_eq!(
            validate_loadout(&loadout),
            Err(RuleViolation::OverBudget {
                spent: 29,
                pool: 28
            })
        );
    }

    #[test]
    fn king_with_attribute_points_is_rejected() {
        let mut loadout = sample_loadout();
        loadout.pieces[0].spd = 1;
        assert_eq!(
            validate_loadout(&loadout),
            Err(RuleViolation::KingWithAttributes {
                piece_id: "K".to_string()
            })
        );
    }

    #[test]
    fn missing_king_is_rejected() {
        let mut loadout = sample_loadout();
        loadout.pieces.remove(0);
        assert_eq!(
            validate_loadout(&loadout),
            Err(RuleViolation::KingCount { count: 0 })
        );
    }

    #[test]
    fn two_kings_are_rejected() {
        let mut loadout = sample_loadout();
        let mut second = king();
        second.id = "K2".to_string();
        loadout.pieces.push(second);
        assert_eq!(
            validate_loadout(&loadout),
            Err(RuleViolation::KingCount { count: 2 })
        );
    }

    #[test]
    fn negative_attribute_is_rejected() {
        let mut loadout = sample_loadout();
        loadout.pieces[1].defn = -1;
        assert_eq!(
            validate_loadout(&loadout),
            Err(RuleViolation::NegativeAttribute {
                piece_id: "N1".to_string()
            })
        );
    }

    #[test]
    fn king_attribute_check_fires_before_king_count() {
        // Two kings, the first of which carries points: the per-piece check
        // during the scan wins over the team-level count check.
        let mut bad_king = king();
        bad_king.atk = 3;
        let loadout = Loadout {
            points_pool: 30,
            pieces: vec![bad_king, king()],
            rng_seed: None,
        };
        assert_eq!(
            validate_loadout(&loadout),
            Err(RuleViolation::KingWithAttributes {
                piece_id: "K".to_string()
            })
        );
    }

    #[test]
    fn king_count_fires_before_budget() {
        let loadout = Loadout {
            points_pool: 0,
            pieces: vec![piece("N1", PieceKind::Knight, 6, 5, 4)],
            rng_seed: None,
        };
        assert_eq!(
            validate_loadout(&loadout),
            Err(RuleViolation::KingCount { count: 0 })
        );
    }

    #[test]
    fn violation_messages_read_well() {
        let violation = RuleViolation::OverBudget { spent: 45, pool: 30 };
        assert_eq!(violation.to_string(), "points pool exceeded (45 > 30)");

        let violation = RuleViolation::KingCount { count: 2 };
        assert_eq!(
            violation.to_string(),
            "the team must have exactly 1 king, found 2"
        );
    }
}
