use std::{
    fs::OpenOptions,
    io::{self, Write},
    path::Path,
};

use gmaze::{CellType, Grid};
use serde::{Deserialize, Serialize};

/// Character used for every kind of cell.
///
/// With the defaults, start, end and never visited cells all print as a space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolTable {
    pub wall: char,
    pub start: char,
    pub end: char,
    pub path: char,
    pub empty: char,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self {
            wall: '#',
            start: ' ',
            end: ' ',
            path: '.',
            empty: ' ',
        }
    }
}

impl SymbolTable {
    pub fn symbol(&self, cell: CellType) -> char {
        match cell {
            CellType::Wall => self.wall,
            CellType::Start => self.start,
            CellType::End => self.end,
            CellType::Path => self.path,
            CellType::Empty => self.empty,
        }
    }
}

pub fn render_lines(grid: &Grid, symbols: &SymbolTable) -> Vec<String> {
    grid.rows()
        .map(|row| row.iter().map(|&cell| symbols.symbol(cell)).collect())
        .collect()
}

pub fn write_grid(out: &mut impl Write, grid: &Grid, symbols: &SymbolTable) -> io::Result<()> {
    for line in render_lines(grid, symbols) {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

/// Writes the grid to `path`, or to stdout without one.
pub fn save(grid: &Grid, symbols: &SymbolTable, path: Option<&Path>, append: bool) -> io::Result<()> {
    match path {
        Some(path) => {
            let mut file = OpenOptions::new()
                .create(true)
                .write(true)
                .append(append)
                .truncate(!append)
                .open(path)?;
            write_grid(&mut file, grid, symbols)?;
            log::info!("maze written to {:?}", path);
            Ok(())
        }
        None => write_grid(&mut io::stdout().lock(), grid, symbols),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use gmaze::{generate_binary_tree_maze, Dims};

    use super::*;

    #[test]
    fn default_symbols() {
        let symbols = SymbolTable::default();
        assert_eq!(symbols.symbol(CellType::Wall), '#');
        assert_eq!(symbols.symbol(CellType::Path), '.');
        assert_eq!(symbols.symbol(CellType::Start), ' ');
        assert_eq!(symbols.symbol(CellType::End), ' ');
        assert_eq!(symbols.symbol(CellType::Empty), ' ');
    }

    #[test]
    fn lines_match_grid() {
        let grid = generate_binary_tree_maze(Dims(17, 13), Some(4)).unwrap();
        let lines = render_lines(&grid, &SymbolTable::default());

        assert_eq!(lines.len(), 13);
        assert!(lines.iter().all(|line| line.chars().count() == 17));
        assert_eq!(lines[0].matches(' ').count(), 1);
        assert_eq!(lines[12].matches(' ').count(), 1);
        assert!(lines[6].starts_with('#') && lines[6].ends_with('#'));
    }

    #[test]
    fn custom_symbols() {
        let symbols = SymbolTable {
            start: 'S',
            end: 'E',
            ..Default::default()
        };
        let grid = generate_binary_tree_maze(Dims(5, 5), Some(0)).unwrap();
        let lines = render_lines(&grid, &symbols);

        assert_eq!(lines[0].matches('S').count(), 1);
        assert_eq!(lines[4].matches('E').count(), 1);
    }

    #[test]
    fn save_appends() {
        let path = std::env::temp_dir().join(format!("growmaze-render-{}.txt", std::process::id()));
        let grid = generate_binary_tree_maze(Dims(5, 5), Some(0)).unwrap();
        let symbols = SymbolTable::default();

        save(&grid, &symbols, Some(&path), false).unwrap();
        save(&grid, &symbols, Some(&path), true).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 10);

        save(&grid, &symbols, Some(&path), false).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 5);

        fs::remove_file(&path).unwrap();
    }
}
