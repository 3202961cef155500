use crate::data_model::{BOARD_SIZE, Board, tile_value};

const CELL_WIDTH: usize = 5;

pub fn render_board(board: &Board) -> String {
    let mut output = String::new();
    let border = "─".repeat(CELL_WIDTH);
    let edge = |left: &str, middle: &str, right: &str| {
        let inner = vec![border.as_str(); BOARD_SIZE].join(middle);
        format!("{left}{inner}{right}")
    };
    output.push_str(&edge("┌", "┬", "┐"));
    for row in 0..BOARD_SIZE {
        output.push('\n');
        if row > 0 {
            output.push_str(&edge("├", "┼", "┤"));
            output.push('\n');
        }
        output.push('│');
        for col in 0..BOARD_SIZE {
            let text = match board.rank(row, col) {
                0 => String::new(),
                rank => tile_value(rank).to_string(),
            };
            output.push_str(format!("{text:>width$}│", width = CELL_WIDTH).as_str());
        }
    }
    output.push('\n');
    output.push_str(&edge("└", "┴", "┘"));
    output.push('\n');
    output.push_str(
        format!(
            "hint: {}  bag: {}/{}/{}",
            tile_value(board.hint()),
            board.bag(1),
            board.bag(2),
            board.bag(3)
        )
        .as_str(),
    );
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_tile_values_not_ranks() {
        let mut board = Board::from_grid([[1, 2, 3, 4], [0; 4], [0; 4], [0, 0, 0, 8]]);
        board.hint = 2;
        let rendered = render_board(&board);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 2 * BOARD_SIZE + 2);
        assert_eq!(lines[1], "│    1│    2│    3│    6│");
        assert_eq!(lines[7], "│     │     │     │   96│");
        assert_eq!(lines[9], "hint: 2  bag: 1/1/1");
    }
}
