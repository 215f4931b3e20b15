use anyhow::{bail, Result};

pub type Digit = u8; // 0 = empty; 1..=9 digits

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pos { pub r: usize, pub c: usize }

impl Pos {
    pub fn idx(self) -> usize { self.r * 9 + self.c }
    pub fn from_idx(i: usize) -> Self { Self { r: i / 9, c: i % 9 } }
    /// Index 0..=8 of the 3x3 box containing this position.
    pub fn box_idx(self) -> usize { (self.r / 3) * 3 + self.c / 3 }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    #[cfg_attr(feature = "serde", serde(with = "serde_cells"))]
    pub(crate) cells: [Digit; 81],
}

impl Grid {
    pub fn empty() -> Self { Self { cells: [0; 81] } }

    pub fn from_rows(rows: [[u8; 9]; 9]) -> Result<Self> {
        let mut g = Grid::empty();
        for r in 0..9 { for c in 0..9 { g.set(Pos { r, c }, rows[r][c])?; }}
        Ok(g)
    }

    pub fn from_compact(s: &str) -> Result<Self> {
        if s.len() != 81 { bail!("compact string must be 81 chars") }
        let mut g = Grid::empty();
        for (i, ch) in s.chars().enumerate() {
            let v = match ch { '.'|'0' => 0, '1'..='9' => ch as u8 - b'0', _ => bail!("invalid char {ch}") };
            g.cells[i] = v;
        }
        Ok(g)
    }

    pub fn to_compact(&self) -> String {
        self.cells.iter().map(|&d| if d==0 {'.'} else {(b'0'+d) as char}).collect()
    }

    pub fn to_pretty_string(&self) -> String {
        let mut s = String::new();
        for r in 0..9 {
            if r%3==0 { s.push_str("+-------+-------+-------+\n"); }
            for c in 0..9 {
                if c%3==0 { s.push('|'); s.push(' ');}
                let d = self.get(Pos{r,c});
                s.push(if d==0 {'·'} else {(b'0'+d) as char});
                s.push(' ');
            }
            s.push('|'); s.push('\n');
        }
        s.push_str("+-------+-------+-------+\n");
        s
    }

    pub fn get(&self, p: Pos) -> Digit { self.cells[p.idx()] }

    /// Manual edit boundary: 0 clears the cell, 1..=9 fill it, anything else
    /// is rejected and the grid is left unchanged.
    pub fn set(&mut self, p: Pos, d: Digit) -> Result<()> {
        if d > 9 { bail!("digit out of range: {d}") }
        self.cells[p.idx()] = d;
        Ok(())
    }

    pub fn is_filled(&self) -> bool { self.cells.iter().all(|&d| d != 0) }

    /// Positions holding a given, i.e. non-empty in this grid. The solver
    /// never writes to these.
    pub fn given_mask(&self) -> [bool; 81] {
        let mut m = [false; 81];
        for i in 0..81 { m[i] = self.cells[i] != 0; }
        m
    }

    pub fn row_values(&self, r: usize) -> [Digit; 9] {
        let mut a = [0; 9];
        for c in 0..9 { a[c] = self.cells[r*9 + c]; }
        a
    }

    pub fn col_values(&self, c: usize) -> [Digit; 9] {
        let mut a = [0; 9];
        for r in 0..9 { a[r] = self.cells[r*9 + c]; }
        a
    }

    /// Values of box `b` in 0..=8, boxes numbered row-major.
    pub fn box_values(&self, b: usize) -> [Digit; 9] {
        let br = (b / 3) * 3;
        let bc = (b % 3) * 3;
        let mut a = [0; 9];
        let mut i = 0;
        for r in br..br+3 { for c in bc..bc+3 { a[i] = self.cells[r*9 + c]; i += 1; }}
        a
    }

    pub fn iterate_cells() -> impl Iterator<Item=Pos> { (0..81).map(Pos::from_idx) }
}

#[cfg(feature = "serde")]
mod serde_cells {
    use super::Digit;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(cells: &[Digit; 81], ser: S) -> Result<S::Ok, S::Error> {
        ser.collect_seq(cells.iter())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<[Digit; 81], D::Error> {
        let v: Vec<Digit> = Vec::deserialize(de)?;
        v.try_into().map_err(|v: Vec<Digit>| serde::de::Error::invalid_length(v.len(), &"81 cells"))
    }
}
