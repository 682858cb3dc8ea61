use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};

/// Paired binary outcomes of the tested method and the reference method,
/// one row per subject.
#[derive(Clone, Serialize, Deserialize)]
pub struct Data {
    pub test: Vec<u8>,
    pub reference: Vec<u8>,
    pub samples: Vec<String>,
    pub sample_len: usize,
    pub classes: Vec<String>,
}

impl Data {
    /// Create a new `Data` instance with default values
    pub fn new() -> Data {
        Data {
            test: Vec::new(),
            reference: Vec::new(),
            samples: Vec::new(),
            sample_len: 0,
            classes: Vec::new(),
        }
    }

    /// Load paired outcomes from a TSV file with a header line and three
    /// columns: sample name, test outcome, reference outcome.
    pub fn load_data(&mut self, path: &str) -> Result<(), Box<dyn Error>> {
        info!("Loading file {}...", path);
        let file = File::open(path)?;
        self.read_tsv(BufReader::new(file))
    }

    fn read_tsv<R: BufRead>(&mut self, reader: R) -> Result<(), Box<dyn Error>> {
        for line in reader.lines().skip(1) {
            let line = line?;
            let trimmed_line = line.strip_suffix('\r').unwrap_or(&line);
            if trimmed_line.is_empty() {
                continue;
            }

            let mut fields = trimmed_line.split('\t');
            if let (Some(sample), Some(test), Some(reference)) =
                (fields.next(), fields.next(), fields.next())
            {
                let test: u8 = test.parse()?;
                let reference: u8 = reference.parse()?;
                if test > 1 || reference > 1 {
                    warn!(
                        "Sample {} has an outcome outside {{0,1}}; it will be ignored in tabulations",
                        sample
                    );
                }
                self.samples.push(sample.to_string());
                self.test.push(test);
                self.reference.push(reference);
            } else {
                warn!("Malformed line skipped: {}", trimmed_line);
            }
        }

        self.sample_len = self.samples.len();
        Ok(())
    }

    /// Bundled example dataset: 86 paired PCR (test) and culture (reference)
    /// outcomes from a pertussis diagnostic study.
    pub fn pertussis() -> Data {
        let mut data = Data::new();
        data.read_tsv(include_str!("../samples/pertussis.tsv").as_bytes())
            .expect("bundled pertussis dataset is well-formed");
        data.classes = vec!["negative".to_string(), "positive".to_string()];
        data
    }

    pub fn set_classes(&mut self, classes: Vec<String>) {
        self.classes = classes;
    }

    /// Swap the 0/1 coding of both outcome columns (and the class names with
    /// them), for files where 1 denotes the negative outcome.
    pub fn inverse_classes(&mut self) {
        for value in self.test.iter_mut() {
            if *value <= 1 {
                *value = 1 - *value;
            }
        }
        for value in self.reference.iter_mut() {
            if *value <= 1 {
                *value = 1 - *value;
            }
        }
        self.classes.reverse();
    }

    /// Build a new `Data` from the rows at the given positions; an index may
    /// appear several times, in which case the row is repeated.
    pub fn subset(&self, samples: Vec<usize>) -> Data {
        Data {
            test: samples.iter().map(|i| self.test[*i]).collect(),
            reference: samples.iter().map(|i| self.reference[*i]).collect(),
            samples: samples.iter().map(|i| self.samples[*i].clone()).collect(),
            sample_len: samples.len(),
            classes: self.classes.clone(),
        }
    }
}

impl fmt::Display for Data {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Samples: {}", self.sample_len)?;
        if self.classes.len() == 2 {
            writeln!(f, "Classes: 0={} 1={}", self.classes[0], self.classes[1])?;
        }
        writeln!(f, "{:<10} {:>5} {:>10}", "sample", "test", "reference")?;
        // Limit to the first 20 rows
        for i in (0..self.sample_len).take(20) {
            writeln!(
                f,
                "{:<10} {:>5} {:>10}",
                self.samples[i], self.test[i], self.reference[i]
            )?;
        }
        if self.sample_len > 20 {
            writeln!(f, "... ({} more rows)", self.sample_len - 20)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Data {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Reuse the Display formatter
        write!(f, "{}", self)
    }
}
