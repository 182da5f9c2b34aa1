use day10::{resolve_start, traverse, Grid};

use std::fs;

use anyhow::{Context, Result};

fn main() -> Result<()> {
    let input = fs::read_to_string("data/input").context("Unable to read data/input")?;

    let mut grid: Grid = input.parse()?;
    let start = resolve_start(&mut grid)?;
    let res = traverse(&mut grid, start);

    println!("{}", grid.render());
    println!("Part 1 result: {res}");

    Ok(())
}
