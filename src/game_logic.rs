use crate::data_model::{
    Action, BAG_REFILL, BOARD_SIZE, Board, CELL_COUNT, Direction, Rank, Reward,
};

/// Applies an action, returning its reward or `None` when the board rejects it.
pub fn execute_action(board: &mut Board, action: &Action) -> Option<Reward> {
    match *action {
        Action::Slide(direction) => slide(board, direction),
        Action::Place {
            position,
            tile,
            hint,
        } => place(board, position, tile, hint),
    }
}

pub fn can_merge(a: Rank, b: Rank) -> bool {
    (a == 1 && b == 2) || (a == 2 && b == 1) || (a >= 3 && a == b)
}

fn merged(a: Rank, b: Rank) -> Rank {
    if a >= 3 { a + 1 } else { a + b }
}

/// Cells of one line, ordered from the edge the tiles slide toward.
fn line_positions(direction: Direction, line: usize) -> [(usize, usize); BOARD_SIZE] {
    let last = BOARD_SIZE - 1;
    std::array::from_fn(|i| match direction {
        Direction::Up => (i, line),
        Direction::Down => (last - i, line),
        Direction::Left => (line, i),
        Direction::Right => (line, last - i),
    })
}

/// Shifts a single line by at most one cell. Returns whether anything moved.
fn slide_line(cells: &mut [Rank; BOARD_SIZE]) -> bool {
    for i in 0..BOARD_SIZE - 1 {
        let (head, next) = (cells[i], cells[i + 1]);
        if next == 0 {
            continue;
        }
        if head == 0 || can_merge(head, next) {
            cells[i] = if head == 0 { next } else { merged(head, next) };
            cells.copy_within(i + 2.., i + 1);
            cells[BOARD_SIZE - 1] = 0;
            return true;
        }
    }
    false
}

pub fn slide(board: &mut Board, direction: Direction) -> Option<Reward> {
    let score_before = board.score();
    let mut moved = false;
    for line in 0..BOARD_SIZE {
        let positions = line_positions(direction, line);
        let mut cells = positions.map(|(row, col)| board.grid[row][col]);
        if slide_line(&mut cells) {
            moved = true;
            for ((row, col), rank) in positions.into_iter().zip(cells) {
                board.grid[row][col] = rank;
            }
        }
    }
    if !moved {
        return None;
    }
    board.last_slide = Some(direction);
    Some(board.score() - score_before)
}

pub fn is_slide_legal(board: &Board, direction: Direction) -> bool {
    slide(&mut board.clone(), direction).is_some()
}

pub fn has_legal_slide(board: &Board) -> bool {
    Direction::iter().any(|direction| is_slide_legal(board, direction))
}

fn is_basic_tile(tile: Rank) -> bool {
    (1..=3).contains(&tile)
}

fn draw_from_bag(board: &mut Board, tile: Rank) {
    board.bag[tile as usize - 1] -= 1;
    if board.bag.iter().all(|&count| count == 0) {
        board.bag = [BAG_REFILL; 3];
    }
}

pub fn is_place_legal(board: &Board, position: usize, tile: Rank, hint: Rank) -> bool {
    if position >= CELL_COUNT || board.cell(position) != 0 {
        return false;
    }
    if !is_basic_tile(tile) || !is_basic_tile(hint) {
        return false;
    }
    let tile_available = if board.hint != 0 {
        tile == board.hint
    } else {
        board.bag(tile) > 0
    };
    let hint_available = if board.hint == 0 && tile == hint {
        board.bag(hint) > 1
    } else {
        board.bag(hint) > 0
    };
    tile_available && hint_available
}

/// Drops `tile` on an empty cell and announces `hint` as the next tile.
pub fn place(board: &mut Board, position: usize, tile: Rank, hint: Rank) -> Option<Reward> {
    if !is_place_legal(board, position, tile, hint) {
        return None;
    }
    if board.hint == 0 {
        draw_from_bag(board, tile);
    }
    board.grid[position / BOARD_SIZE][position % BOARD_SIZE] = tile;
    draw_from_bag(board, hint);
    board.hint = hint;
    Some(0)
}
