use super::Initial;

/// A named arrangement of live cells, stored as `(row, col)` offsets.
#[derive(Clone, Debug)]
pub struct Pattern {
    pub name: &'static str,
    pub description: &'static str,
    pub height: u32,
    pub width: u32,
    pub cells: Vec<(i64, i64)>,
}

impl Pattern {
    /// Build from row strings where `#` marks a live cell.
    pub fn from_rows(name: &'static str, description: &'static str, rows: &[&str]) -> Self {
        let cells: Vec<(i64, i64)> = rows
            .iter()
            .enumerate()
            .flat_map(|(row, line)| {
                line.chars()
                    .enumerate()
                    .filter(|&(_, ch)| ch == '#')
                    .map(move |(col, _)| (row as i64, col as i64))
            })
            .collect();
        let width = rows.iter().map(|line| line.chars().count()).max().unwrap_or(0) as u32;
        Self {
            name,
            description,
            height: rows.len() as u32,
            width,
            cells,
        }
    }

    /// Offsets shifted so the pattern's top-left corner sits at `(row, col)`.
    pub fn cells_at(&self, row: i64, col: i64) -> Vec<(i64, i64)> {
        self.cells.iter().map(|&(r, c)| (r + row, c + col)).collect()
    }

    /// Starting state with this pattern centred on a `width` x `height` grid.
    pub fn centred(&self, width: u32, height: u32) -> Initial {
        let row = (height as i64 - self.height as i64) / 2;
        let col = (width as i64 - self.width as i64) / 2;
        Initial::Pattern(self.cells_at(row, col))
    }
}

/// Classic Life patterns.
pub mod presets {
    use super::Pattern;

    /// Moves one cell diagonally every 4 generations.
    pub fn glider() -> Pattern {
        Pattern::from_rows("Glider", "Spaceship (period 4)", &[
            ".#.",
            "..#",
            "###",
        ])
    }

    pub fn blinker() -> Pattern {
        Pattern::from_rows("Blinker", "Oscillator (period 2)", &["###"])
    }

    pub fn toad() -> Pattern {
        Pattern::from_rows("Toad", "Oscillator (period 2)", &[
            ".###",
            "###.",
        ])
    }

    pub fn beacon() -> Pattern {
        Pattern::from_rows("Beacon", "Oscillator (period 2)", &[
            "##..",
            "#...",
            "...#",
            "..##",
        ])
    }

    pub fn block() -> Pattern {
        Pattern::from_rows("Block", "Still life", &[
            "##",
            "##",
        ])
    }

    pub fn pulsar() -> Pattern {
        Pattern::from_rows("Pulsar", "Oscillator (period 3)", &[
            "..###...###..",
            ".............",
            "#....#.#....#",
            "#....#.#....#",
            "#....#.#....#",
            "..###...###..",
            ".............",
            "..###...###..",
            "#....#.#....#",
            "#....#.#....#",
            "#....#.#....#",
            ".............",
            "..###...###..",
        ])
    }

    /// Lightweight spaceship.
    pub fn lwss() -> Pattern {
        Pattern::from_rows("LWSS", "Spaceship (period 4)", &[
            ".#..#",
            "#....",
            "#...#",
            "####.",
        ])
    }

    pub fn all_patterns() -> Vec<Pattern> {
        vec![glider(), blinker(), toad(), beacon(), block(), pulsar(), lwss()]
    }
}
