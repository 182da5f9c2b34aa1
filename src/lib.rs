use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use colored::Colorize;
use itertools::Itertools;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Vertical,
    Horizontal,
    NorthEastBend,
    NorthWestBend,
    SouthWestBend,
    SouthEastBend,
    Ground,
    Start,
}

impl From<char> for Shape {
    fn from(c: char) -> Self {
        match c {
            '|' => Shape::Vertical,
            '-' => Shape::Horizontal,
            'L' => Shape::NorthEastBend,
            'J' => Shape::NorthWestBend,
            '7' => Shape::SouthWestBend,
            'F' => Shape::SouthEastBend,
            'S' => Shape::Start,
            _ => Shape::Ground,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let glyph = match self {
            Shape::Vertical => '┃',
            Shape::Horizontal => '━',
            Shape::NorthEastBend => '┗',
            Shape::NorthWestBend => '┛',
            Shape::SouthWestBend => '┓',
            Shape::SouthEastBend => '┏',
            Shape::Ground => '░',
            Shape::Start => '╳',
        };

        write!(f, "{glyph}")
    }
}

impl Shape {
    /// The two neighbour offsets a pipe connects to, as (dx, dy) with y
    /// growing downwards. Ground and an unresolved start connect to nothing.
    pub fn connections(&self) -> Option<[(i32, i32); 2]> {
        match self {
            Shape::Vertical => Some([(0, -1), (0, 1)]),
            Shape::Horizontal => Some([(-1, 0), (1, 0)]),
            Shape::NorthEastBend => Some([(0, -1), (1, 0)]),
            Shape::NorthWestBend => Some([(0, -1), (-1, 0)]),
            Shape::SouthWestBend => Some([(0, 1), (-1, 0)]),
            Shape::SouthEastBend => Some([(0, 1), (1, 0)]),
            Shape::Ground | Shape::Start => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Tile {
    shape: Shape,
    pos: (i32, i32),
    is_start: bool,
    on_loop: bool,
}

impl Tile {
    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn pos(&self) -> (i32, i32) {
        self.pos
    }

    pub fn is_start(&self) -> bool {
        self.is_start
    }

    pub fn on_loop(&self) -> bool {
        self.on_loop
    }
}

#[derive(Debug, Clone)]
pub struct Grid {
    rows: Vec<Vec<Tile>>,
}

impl FromStr for Grid {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s
            .lines()
            .enumerate()
            .map(|(y, l)| {
                l.chars()
                    .enumerate()
                    .map(|(x, c)| {
                        let shape = Shape::from(c);
                        Tile {
                            shape,
                            pos: (x as i32, y as i32),
                            is_start: shape == Shape::Start,
                            on_loop: shape == Shape::Start,
                        }
                    })
                    .collect()
            })
            .collect();

        Ok(Self { rows })
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows.iter() {
            for tile in row.iter() {
                write!(f, "{}", tile.shape)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl Grid {
    pub fn get(&self, (x, y): (i32, i32)) -> Option<&Tile> {
        self.rows
            .get(usize::try_from(y).ok()?)?
            .get(usize::try_from(x).ok()?)
    }

    fn get_mut(&mut self, (x, y): (i32, i32)) -> Option<&mut Tile> {
        self.rows
            .get_mut(usize::try_from(y).ok()?)?
            .get_mut(usize::try_from(x).ok()?)
    }

    fn shape_at(&self, pos: (i32, i32)) -> Option<Shape> {
        self.get(pos).map(|tile| tile.shape)
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.rows.iter().flatten()
    }

    /// Grid glyphs with the discovered loop highlighted, ready to print.
    pub fn render(&self) -> String {
        self.rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|tile| {
                        let glyph = tile.shape.to_string();
                        let glyph = if tile.on_loop {
                            glyph.yellow()
                        } else {
                            glyph.blue()
                        };
                        let glyph = if tile.is_start {
                            glyph.on_red()
                        } else {
                            glyph
                        };

                        glyph.to_string()
                    })
                    .collect::<String>()
            })
            .join("\n")
    }
}

#[derive(Error, Debug)]
#[error("No start tile in the grid")]
pub struct StartNotFound;

/// Locates the start tile and replaces its marker with the pipe shape
/// implied by its connecting neighbours. When several tiles carry the
/// marker, the last one in row-major order wins. Anything but exactly two
/// connecting neighbours leaves the marker in place.
pub fn resolve_start(grid: &mut Grid) -> Result<(i32, i32), StartNotFound> {
    let pos = grid
        .tiles()
        .filter(|tile| tile.is_start)
        .last()
        .map(|tile| tile.pos)
        .ok_or(StartNotFound)?;

    if grid.shape_at(pos) != Some(Shape::Start) {
        return Ok(pos);
    }

    let (x, y) = pos;
    let connects = |pos: (i32, i32), shapes: [Shape; 3]| {
        grid.shape_at(pos)
            .map(|shape| shapes.contains(&shape))
            .unwrap_or(false)
    };

    let north = connects(
        (x, y - 1),
        [Shape::Vertical, Shape::SouthWestBend, Shape::SouthEastBend],
    );
    let south = connects(
        (x, y + 1),
        [Shape::Vertical, Shape::NorthWestBend, Shape::NorthEastBend],
    );
    let east = connects(
        (x + 1, y),
        [Shape::Horizontal, Shape::SouthWestBend, Shape::NorthWestBend],
    );
    let west = connects(
        (x - 1, y),
        [Shape::Horizontal, Shape::SouthEastBend, Shape::NorthEastBend],
    );

    let resolved = match (north, south, east, west) {
        (true, true, false, false) => Some(Shape::Vertical),
        (false, false, true, true) => Some(Shape::Horizontal),
        (true, false, true, false) => Some(Shape::NorthEastBend),
        (true, false, false, true) => Some(Shape::NorthWestBend),
        (false, true, true, false) => Some(Shape::SouthEastBend),
        (false, true, false, true) => Some(Shape::SouthWestBend),
        _ => None,
    };

    if let Some(shape) = resolved {
        if let Some(tile) = grid.get_mut(pos) {
            tile.shape = shape;
        }
    }

    Ok(pos)
}

/// Walks the loop from the resolved start tile back to itself, marking every
/// visited tile, and returns the distance to the tile farthest from the
/// start along the loop.
pub fn traverse(grid: &mut Grid, start: (i32, i32)) -> usize {
    let step = |(x, y): (i32, i32), (dx, dy): (i32, i32)| (x + dx, y + dy);

    let [first, _] = grid
        .shape_at(start)
        .and_then(|shape| shape.connections())
        .expect("start tile does not connect to any pipe");

    let mut prev = start;
    let mut current = step(start, first);
    let mut steps = 0;

    while current != start {
        let tile = grid.get_mut(current).expect("loop left the grid");
        tile.on_loop = true;

        let [a, b] = tile
            .shape
            .connections()
            .expect("loop ran onto a tile with no pipe");
        let (pos_a, pos_b) = (step(current, a), step(current, b));
        let next = if pos_a == prev { pos_b } else { pos_a };

        prev = current;
        current = next;
        steps += 1;
    }

    // steps counts moves starting one tile past the start, so the cycle
    // length is steps + 1 and the farthest tile sits half way round.
    (steps + 1) / 2
}
