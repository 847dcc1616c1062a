//! Top-level rendering entry point.

use crate::app::AppState;
use crate::ui::components;

/// Renders the whole plugin pane to stdout.
///
/// Computes the view model from `state` and prints every component with
/// absolute cursor positioning; Zellij clears the pane before each render.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);
    components::render_layout(&viewmodel, &state.theme, cols, rows);
}
