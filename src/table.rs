use crate::data::Data;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 2x2 concordance table crossing the tested method outcome (rows) with the
/// reference method outcome (columns). Cell `nXY` counts the subjects with
/// test outcome X and reference outcome Y, 1 denoting positive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConcordanceTable {
    pub n11: usize,
    pub n10: usize,
    pub n01: usize,
    pub n00: usize,
}

impl ConcordanceTable {
    /// Create an empty `ConcordanceTable`
    pub fn new() -> ConcordanceTable {
        ConcordanceTable {
            n11: 0,
            n10: 0,
            n01: 0,
            n00: 0,
        }
    }

    pub fn from_counts(n11: usize, n10: usize, n01: usize, n00: usize) -> ConcordanceTable {
        ConcordanceTable { n11, n10, n01, n00 }
    }

    /// Cross-tabulate the paired outcomes of `data`. Both outcome levels are
    /// always part of the table: a level absent from the data yields a zero
    /// row/column, never a collapsed table. Pairs with a value outside {0,1}
    /// are ignored.
    pub fn from_data(data: &Data) -> ConcordanceTable {
        let mut table = ConcordanceTable::new();
        for (test, reference) in data.test.iter().zip(data.reference.iter()) {
            match (*test, *reference) {
                (1, 1) => table.n11 += 1,
                (1, 0) => table.n10 += 1,
                (0, 1) => table.n01 += 1,
                (0, 0) => table.n00 += 1,
                _ => {}
            }
        }
        table
    }

    /// Number of reference-positive subjects (first column sum)
    pub fn reference_positive(&self) -> usize {
        self.n11 + self.n01
    }

    /// Number of reference-negative subjects (second column sum)
    pub fn reference_negative(&self) -> usize {
        self.n10 + self.n00
    }

    pub fn total(&self) -> usize {
        self.n11 + self.n10 + self.n01 + self.n00
    }
}

impl fmt::Display for ConcordanceTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:>8} {:>6} {:>6}", "", "ref+", "ref-")?;
        writeln!(f, "{:>8} {:>6} {:>6}", "test+", self.n11, self.n10)?;
        write!(f, "{:>8} {:>6} {:>6}", "test-", self.n01, self.n00)
    }
}
