// TUI widget modules for each console panel.

pub mod duel_log;
pub mod duel_panel;
pub mod loadout;
pub mod status_bar;
