// Match data model: pieces, loadouts, and the request/response shapes the
// match service speaks.
//
// These are transient, request-scoped values. The wire format is JSON with
// lowercase piece-type tags and a `type` field on pieces; serde attributes
// below pin that shape.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// PieceKind
// ---------------------------------------------------------------------------

/// The six piece types of the prototype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PieceKind::King => "king",
            PieceKind::Queen => "queen",
            PieceKind::Rook => "rook",
            PieceKind::Bishop => "bishop",
            PieceKind::Knight => "knight",
            PieceKind::Pawn => "pawn",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Piece
// ---------------------------------------------------------------------------

/// A single piece: identity plus a stat tuple.
///
/// Stats default on the wire: `hp` to 100, the three attributes to 0. The
/// schema bounds (hp 1..=500, attributes 0..=200) are enforced at config
/// load; the match rules themselves are the backend's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: PieceKind,
    #[serde(default = "default_hp")]
    pub hp: i32,
    #[serde(default)]
    pub atk: i32,
    #[serde(default)]
    pub defn: i32,
    #[serde(default)]
    pub spd: i32,
}

fn default_hp() -> i32 {
    100
}

impl Piece {
    pub fn is_king(&self) -> bool {
        self.kind == PieceKind::King
    }

    /// Points this piece spends from the loadout pool.
    pub fn points_spent(&self) -> i64 {
        self.atk as i64 + self.defn as i64 + self.spd as i64
    }
}

// ---------------------------------------------------------------------------
// Loadout
// ---------------------------------------------------------------------------

/// A team loadout: a points budget and an ordered list of pieces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loadout {
    pub points_pool: i64,
    pub pieces: Vec<Piece>,
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

impl Loadout {
    /// Total points spent across all pieces.
    pub fn points_spent(&self) -> i64 {
        self.pieces.iter().map(Piece::points_spent).sum()
    }
}

// ---------------------------------------------------------------------------
// Service request/response shapes
// ---------------------------------------------------------------------------

/// Response of `POST /match/validate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub ok: bool,
    #[serde(default)]
    pub message: String,
}

/// Body of `POST /match/duel`: two pieces plus a shared seed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuelRequest {
    pub a: Piece,
    pub b: Piece,
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

/// Response of `POST /match/duel`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuelResult {
    pub winner_id: String,
    pub details: String,
}

/// Response of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub env: String,
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
