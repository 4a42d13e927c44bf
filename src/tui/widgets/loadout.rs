// Loadout widget: the configured pieces as a stats table.
//
// The duel pairing rows are highlighted so it is obvious which pieces 'd'
// will send into combat.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Row, Table};
use ratatui::Frame;

use crate::model::Piece;
use crate::tui::ViewState;

/// Render the loadout table into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let header = Row::new(["ID", "TYPE", "HP", "ATK", "DEF", "SPD", "PTS"])
        .style(Style::default().add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = state
        .loadout
        .pieces
        .iter()
        .map(|piece| {
            let style = if piece.id == state.duel_a || piece.id == state.duel_b {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default()
            };
            Row::new(piece_cells(piece)).style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(5),
        Constraint::Length(7),
        Constraint::Length(5),
        Constraint::Length(5),
        Constraint::Length(5),
        Constraint::Length(5),
        Constraint::Length(5),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title(state)),
    );
    frame.render_widget(table, area);
}

/// Table cells for one piece.
pub fn piece_cells(piece: &Piece) -> Vec<String> {
    vec![
        piece.id.clone(),
        piece.kind.to_string(),
        piece.hp.to_string(),
        piece.atk.to_string(),
        piece.defn.to_string(),
        piece.spd.to_string(),
        piece.points_spent().to_string(),
    ]
}

/// Panel title: spent points against the pool, plus the seed when set.
pub fn title(state: &ViewState) -> String {
    let spent = state.loadout.points_spent();
    match state.loadout.rng_seed {
        Some(seed) => format!(
            "Loadout ({spent}/{} pts, seed {seed})",
            state.loadout.points_pool
        ),
        None => format!("Loadout ({spent}/{} pts)", state.loadout.points_pool),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Loadout, PieceKind};

    fn knight() -> Piece {
        Piece {
            id: "N1".to_string(),
            kind: PieceKind::Knight,
            hp: 90,
            atk: 6,
            defn: 5,
            spd: 4,
        }
    }

    #[test]
    fn piece_cells_cover_all_columns() {
        let cells = piece_cells(&knight());
        assert_eq!(cells, vec!["N1", "knight", "90", "6", "5", "4", "15"]);
    }

    #[test]
    fn title_shows_spent_pool_and_seed() {
        let mut state = ViewState::default();
        state.loadout = Loadout {
            points_pool: 30,
            pieces: vec![knight()],
            rng_seed: Some(123),
        };
        assert_eq!(title(&state), "Loadout (15/30 pts, seed 123)");

        state.loadout.rng_seed = None;
        assert_eq!(title(&state), "Loadout (15/30 pts)");
    }

    #[test]
    fn render_does_not_panic_empty() {
        let backend = ratatui::backend::TestBackend::new(80, 20);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let state = ViewState::default();
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
    }

    #[test]
    fn render_does_not_panic_with_pieces() {
        let backend = ratatui::backend::TestBackend::new(80, 20);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut state = ViewState::default();
        state.loadout = Loadout {
            points_pool: 30,
            pieces: vec![knight()],
            rng_seed: Some(123),
        };
        state.duel_a = "N1".to_string();
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
    }
}
