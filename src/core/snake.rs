//! The rules of Snake.
//!
//! The snake moves one cell every [STEP_RATE] and wraps around the edges of the board.
//! Every body cell remembers the direction the snake left it in, which is how the tail knows
//! where to go next.
use std::{fmt::Display, time::Duration};

use log::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::core::{DrawCommand, Rect, Rgb};

/// Width of the board, in cells.
pub const GAME_WIDTH: usize = 24;
/// Height of the board, in cells.
pub const GAME_HEIGHT: usize = 18;
/// Size of a cell on screen, in pixels.
pub const BLOCK_SIZE: usize = 24;
/// Width of the window the game is drawn in.
pub const WINDOW_WIDTH: u32 = (GAME_WIDTH * BLOCK_SIZE) as u32;
/// Height of the window the game is drawn in.
pub const WINDOW_HEIGHT: u32 = (GAME_HEIGHT * BLOCK_SIZE) as u32;
/// Time between two steps of the game.
pub const STEP_RATE: Duration = Duration::from_millis(125);
/// Length the snake grows to when the game starts.
pub const INITIAL_LENGTH: usize = 4;
/// Number of food items on the board.
pub const FOOD_COUNT: usize = 4;

const BACKGROUND_COLOUR: Rgb = [0, 0, 0];
const FOOD_COLOUR: Rgb = [80, 80, 255];
const BODY_COLOUR: Rgb = [0, 128, 0];
const HEAD_COLOUR: Rgb = [255, 255, 0];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Right,
    Up,
    Left,
    Down,
}
impl Direction {
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Left => Direction::Right,
            Direction::Down => Direction::Up,
        }
    }
    // Move a position by a single cell, wrapping around the edges of the board
    fn advance(&self, (x, y): (usize, usize)) -> (usize, usize) {
        match self {
            Direction::Right => ((x + 1) % GAME_WIDTH, y),
            Direction::Left => ((x + GAME_WIDTH - 1) % GAME_WIDTH, y),
            Direction::Down => (x, (y + 1) % GAME_HEIGHT),
            Direction::Up => (x, (y + GAME_HEIGHT - 1) % GAME_HEIGHT),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Food,
    /// Part of the snake, moving in the given direction
    Body(Direction),
}

/// A game of Snake.
pub struct Snake {
    cells: [[Cell; GAME_WIDTH]; GAME_HEIGHT],
    head: (usize, usize),
    tail: (usize, usize),
    next_dir: Direction,
    // Steps left until the tail starts following the head again
    inhibit_tail_step: usize,
    // Cells of the snake once it has finished growing, plus the food on the board
    occupied_cells: usize,
    rng: StdRng,
}

impl Default for Snake {
    fn default() -> Self {
        Snake::new()
    }
}

impl Snake {
    /// Start a new game, placing food randomly.
    pub fn new() -> Snake {
        Snake::with_rng(StdRng::from_entropy())
    }
    /// Start a new game, placing food with a given random number generator.
    pub fn with_seed(seed: u64) -> Snake {
        Snake::with_rng(StdRng::seed_from_u64(seed))
    }
    fn with_rng(rng: StdRng) -> Snake {
        let mut snake = Snake {
            cells: [[Cell::Empty; GAME_WIDTH]; GAME_HEIGHT],
            head: (0, 0),
            tail: (0, 0),
            next_dir: Direction::Right,
            inhibit_tail_step: 0,
            occupied_cells: 0,
            rng,
        };
        snake.restart();
        snake
    }
    /// Clear the board and put a new snake in the middle of it.
    pub fn restart(&mut self) {
        self.cells = [[Cell::Empty; GAME_WIDTH]; GAME_HEIGHT];
        self.head = (GAME_WIDTH / 2, GAME_HEIGHT / 2);
        self.tail = self.head;
        self.next_dir = Direction::Right;
        self.inhibit_tail_step = INITIAL_LENGTH;
        self.occupied_cells = INITIAL_LENGTH - 1;
        self.set_cell(self.tail, Cell::Body(Direction::Right));
        (0..FOOD_COUNT).for_each(|_| {
            self.place_food();
            self.occupied_cells += 1;
        });
        debug!("Started a new game");
    }
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        self.cells[y][x]
    }
    fn set_cell(&mut self, (x, y): (usize, usize), cell: Cell) {
        self.cells[y][x] = cell;
    }
    pub fn head(&self) -> (usize, usize) {
        self.head
    }
    pub fn tail(&self) -> (usize, usize) {
        self.tail
    }
    /// The number of cells the snake is currently made of.
    pub fn length(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|c| matches!(c, Cell::Body(_)))
            .count()
    }
    fn is_full(&self) -> bool {
        self.occupied_cells >= GAME_WIDTH * GAME_HEIGHT
    }
    // Put food on a random empty cell, if there is one
    fn place_food(&mut self) {
        let empty: Vec<(usize, usize)> = (0..GAME_HEIGHT)
            .flat_map(|y| (0..GAME_WIDTH).map(move |x| (x, y)))
            .filter(|(x, y)| self.cells[*y][*x] == Cell::Empty)
            .collect();
        if empty.is_empty() {
            return;
        }
        let pos = empty[self.rng.gen_range(0..empty.len())];
        self.set_cell(pos, Cell::Food);
    }
    /// Change the direction the snake will move in on the next step.
    ///
    /// Ignored if it would turn the head back into the body.
    pub fn redirect(&mut self, dir: Direction) {
        if self.cell(self.head.0, self.head.1) != Cell::Body(dir.opposite()) {
            self.next_dir = dir;
        }
    }
    /// Advance the game by a single step.
    pub fn step(&mut self) {
        // Move the tail, unless the snake is growing
        self.inhibit_tail_step -= 1;
        if self.inhibit_tail_step == 0 {
            self.inhibit_tail_step += 1;
            if let Cell::Body(dir) = self.cell(self.tail.0, self.tail.1) {
                self.set_cell(self.tail, Cell::Empty);
                self.tail = dir.advance(self.tail);
            }
        }
        // Move the head
        let previous = self.head;
        self.head = self.next_dir.advance(self.head);
        let target = self.cell(self.head.0, self.head.1);
        if let Cell::Body(_) = target {
            info!("Snake ran into itself, restarting");
            self.restart();
            return;
        }
        self.set_cell(previous, Cell::Body(self.next_dir));
        self.set_cell(self.head, Cell::Body(self.next_dir));
        if target == Cell::Food {
            if self.is_full() {
                info!("Board is full, restarting");
                self.restart();
                return;
            }
            self.place_food();
            self.inhibit_tail_step += 1;
            self.occupied_cells += 1;
        }
    }
    /// Draw the board, each cell being a [BLOCK_SIZE] square.
    pub fn draw_commands(&self) -> Vec<DrawCommand> {
        let rect = |(x, y): (usize, usize)| {
            Rect::new(
                (x * BLOCK_SIZE) as f32,
                (y * BLOCK_SIZE) as f32,
                BLOCK_SIZE as f32,
                BLOCK_SIZE as f32,
            )
        };
        let cells_of = |wanted: fn(&Cell) -> bool| -> Vec<Rect> {
            (0..GAME_HEIGHT)
                .flat_map(|y| (0..GAME_WIDTH).map(move |x| (x, y)))
                .filter(|(x, y)| wanted(&self.cells[*y][*x]) && (*x, *y) != self.head)
                .map(rect)
                .collect()
        };
        vec![
            DrawCommand::Clear(BACKGROUND_COLOUR),
            DrawCommand::FillRects(FOOD_COLOUR, cells_of(|c| *c == Cell::Food)),
            DrawCommand::FillRects(BODY_COLOUR, cells_of(|c| matches!(c, Cell::Body(_)))),
            DrawCommand::FillRects(HEAD_COLOUR, vec![rect(self.head)]),
        ]
    }
}

impl Display for Snake {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.cells.iter() {
            let line: String = row
                .iter()
                .map(|c| match c {
                    Cell::Empty => '.',
                    Cell::Food => '*',
                    Cell::Body(Direction::Right) => '>',
                    Cell::Body(Direction::Left) => '<',
                    Cell::Body(Direction::Up) => '^',
                    Cell::Body(Direction::Down) => 'v',
                })
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Cell, Direction, Snake, FOOD_COUNT, GAME_HEIGHT, GAME_WIDTH};
    use crate::core::DrawCommand;

    // Remove every piece of food from the board
    fn clear_food(snake: &mut Snake) {
        snake
            .cells
            .iter_mut()
            .flatten()
            .filter(|c| **c == Cell::Food)
            .for_each(|c| *c = Cell::Empty);
    }
    fn food_count(snake: &Snake) -> usize {
        snake.cells.iter().flatten().filter(|c| **c == Cell::Food).count()
    }

    #[test]
    fn test_start() {
        let snake = Snake::with_seed(1);
        assert_eq!(snake.head(), (12, 9));
        assert_eq!(snake.tail(), (12, 9));
        assert_eq!(snake.length(), 1);
        assert_eq!(food_count(&snake), FOOD_COUNT);
        assert_eq!(snake.cell(12, 9), Cell::Body(Direction::Right));
    }
    #[test]
    fn test_grows_to_initial_length() {
        let mut snake = Snake::with_seed(1);
        clear_food(&mut snake);
        (0..3).for_each(|_| snake.step());
        assert_eq!(snake.head(), (15, 9));
        assert_eq!(snake.tail(), (12, 9));
        assert_eq!(snake.length(), 4);
        // From here on the tail follows the head
        snake.step();
        assert_eq!(snake.head(), (16, 9));
        assert_eq!(snake.tail(), (13, 9));
        assert_eq!(snake.length(), 4);
    }
    #[test]
    fn test_turns() {
        let mut snake = Snake::with_seed(1);
        clear_food(&mut snake);
        (0..4).for_each(|_| snake.step());
        snake.redirect(Direction::Down);
        snake.step();
        assert_eq!(snake.head(), (16, 10));
        assert_eq!(snake.cell(16, 9), Cell::Body(Direction::Down));
        // The tail follows the corner
        (0..2).for_each(|_| snake.step());
        assert_eq!(snake.tail(), (16, 9));
        snake.step();
        assert_eq!(snake.tail(), (16, 10));
    }
    #[test]
    fn test_no_reversing() {
        let mut snake = Snake::with_seed(1);
        clear_food(&mut snake);
        snake.step();
        snake.redirect(Direction::Left);
        snake.step();
        assert_eq!(snake.head(), (14, 9));
    }
    #[test]
    fn test_wraps_around() {
        let mut snake = Snake::with_seed(1);
        clear_food(&mut snake);
        (0..(GAME_WIDTH - 12)).for_each(|_| snake.step());
        assert_eq!(snake.head(), (0, 9));
        snake.redirect(Direction::Up);
        (0..10).for_each(|_| snake.step());
        assert_eq!(snake.head(), (0, GAME_HEIGHT - 1));
    }
    #[test]
    fn test_eats_food() {
        let mut snake = Snake::with_seed(1);
        clear_food(&mut snake);
        (0..4).for_each(|_| snake.step());
        snake.cells[9][17] = Cell::Food;
        snake.step();
        // New food was placed
        assert_eq!(food_count(&snake), 1);
        assert_eq!(snake.length(), 4);
        // The tail stays put for one step
        let tail = snake.tail();
        snake.step();
        assert_eq!(snake.tail(), tail);
        assert_eq!(snake.length(), 5);
    }
    #[test]
    fn test_collision_restarts() {
        let mut snake = Snake::with_seed(1);
        clear_food(&mut snake);
        (0..4).for_each(|_| snake.step());
        snake.cells[9][17] = Cell::Body(Direction::Up);
        snake.step();
        assert_eq!(snake.head(), (12, 9));
        assert_eq!(snake.length(), 1);
        assert_eq!(food_count(&snake), FOOD_COUNT);
    }
    #[test]
    fn test_full_board_restarts() {
        let mut snake = Snake::with_seed(1);
        snake
            .cells
            .iter_mut()
            .flatten()
            .for_each(|c| *c = Cell::Body(Direction::Right));
        snake.cells[9][13] = Cell::Food;
        snake.occupied_cells = GAME_WIDTH * GAME_HEIGHT;
        snake.step();
        assert_eq!(snake.head(), (12, 9));
        assert_eq!(snake.length(), 1);
        assert_eq!(food_count(&snake), FOOD_COUNT);
    }
    #[test]
    fn test_draw_commands() {
        let snake = Snake::with_seed(3);
        let commands = snake.draw_commands();
        assert_eq!(commands.len(), 4);
        assert_eq!(commands[0], DrawCommand::Clear([0, 0, 0]));
        match &commands[1] {
            DrawCommand::FillRects(_, food) => assert_eq!(food.len(), FOOD_COUNT),
            c => panic!("Expected food rectangles, got {:?}", c),
        }
        match &commands[2] {
            // The only body cell is the head, which is drawn separately
            DrawCommand::FillRects(_, body) => assert!(body.is_empty()),
            c => panic!("Expected body rectangles, got {:?}", c),
        }
        match &commands[3] {
            DrawCommand::FillRects(colour, head) => {
                assert_eq!(*colour, [255, 255, 0]);
                assert_eq!(head[0].x, 12.0 * 24.0);
                assert_eq!(head[0].y, 9.0 * 24.0);
            }
            c => panic!("Expected head rectangle, got {:?}", c),
        }
    }
    #[test]
    fn test_display() {
        let mut snake = Snake::with_seed(1);
        clear_food(&mut snake);
        (0..3).for_each(|_| snake.step());
        let board = snake.to_string();
        let row = board.lines().nth(9).unwrap();
        assert_eq!(&row[12..16], ">>>>");
    }
}
