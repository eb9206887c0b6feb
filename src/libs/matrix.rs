use super::cluster::Cluster;
use super::error::{BgcError, Result};
use super::identity::OccurrenceDistances;
use super::score::{score_pair, ScoreOptions};
use indexmap::IndexMap;
use itertools::Itertools;
use std::io::{BufRead, Write};

/// Distances between clusters, stored as the strict lower triangle.
///
/// Cell `(i, j)` with `j < i` holds the distance of the `i`-th and `j`-th
/// clusters, `None` when that pair failed to score. The diagonal is zero and
/// the upper triangle is never stored; this is the shape the UPGMA builder
/// and the CSV file share.
#[derive(Debug, Clone, Default)]
pub struct DistanceMatrix {
    names: Vec<String>,
    lower: Vec<Vec<Option<f64>>>,
}

impl DistanceMatrix {
    pub fn new(names: Vec<String>) -> Self {
        let lower = (0..names.len()).map(|i| vec![None; i]).collect();
        Self { names, lower }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn size(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Store a distance; `(i, j)` and `(j, i)` address the same cell.
    pub fn set(&mut self, i: usize, j: usize, distance: f64) {
        if i != j {
            self.lower[i.max(j)][i.min(j)] = Some(distance);
        }
    }

    /// Distance between the `i`-th and `j`-th clusters, in either order.
    ///
    /// ```
    /// use bgcdist::libs::matrix::DistanceMatrix;
    /// let mut mat = DistanceMatrix::new(vec!["A".to_string(), "B".to_string()]);
    /// assert_eq!(mat.get(1, 0), None);
    /// mat.set(1, 0, 0.25);
    /// assert_eq!(mat.get(0, 1), Some(0.25));
    /// assert_eq!(mat.get(1, 1), Some(0.0));
    /// ```
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if i == j {
            Some(0.0)
        } else {
            self.lower[i.max(j)][i.min(j)]
        }
    }

    /// Row `i` holds `i + 1` values, the diagonal included. Every cell must
    /// be present.
    pub fn lower_triangle(&self) -> Result<Vec<Vec<f64>>> {
        let mut rows = Vec::with_capacity(self.size());
        for (i, cells) in self.lower.iter().enumerate() {
            let mut row = Vec::with_capacity(i + 1);
            for (j, cell) in cells.iter().enumerate() {
                let d = cell.ok_or_else(|| BgcError::IncompleteMatrix {
                    row: self.names[i].clone(),
                    col: self.names[j].clone(),
                })?;
                row.push(d);
            }
            row.push(0.0);
            rows.push(row);
        }
        Ok(rows)
    }

    /// Comma separated, one row per cluster. Only the lower triangle and the
    /// zero diagonal are filled; failed cells are written as `NA`.
    ///
    /// Cluster ids containing a comma cannot be written unquoted and are
    /// rejected with [`std::io::ErrorKind::InvalidInput`].
    pub fn write_csv<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        if let Some(name) = self.names.iter().find(|n| n.contains(',')) {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("cluster id {:?} contains a comma", name),
            ));
        }
        writeln!(writer, ",{}", self.names.join(","))?;
        for (i, name) in self.names.iter().enumerate() {
            let mut fields = Vec::with_capacity(self.size() + 1);
            fields.push(name.clone());
            for cell in &self.lower[i] {
                fields.push(match cell {
                    Some(d) => format!("{:.6}", d),
                    None => "NA".to_string(),
                });
            }
            fields.push("0".to_string());
            fields.extend(std::iter::repeat(String::new()).take(self.size() - i - 1));
            writeln!(writer, "{}", fields.join(","))?;
        }
        Ok(())
    }

    /// Read a table written by [`DistanceMatrix::write_csv`]. Cells right of
    /// the diagonal are ignored.
    pub fn from_csv<R: BufRead>(reader: R) -> Result<Self> {
        let mut lines = reader
            .lines()
            .enumerate()
            .filter(|(_, l)| l.as_ref().map_or(true, |l| !l.trim().is_empty()));

        let Some((_, header)) = lines.next() else {
            return Ok(Self::default());
        };
        let names: Vec<String> = header?
            .trim_end_matches('\r')
            .split(',')
            .skip(1)
            .map(|s| s.to_string())
            .collect();
        let mut mat = Self::new(names);

        let mut i = 0;
        for (n, line) in lines {
            let line = line?;
            let fields: Vec<&str> = line.trim_end_matches('\r').split(',').collect();
            if i >= mat.size() {
                return Err(BgcError::parse(n + 1, "more rows than header names"));
            }
            if fields[0] != mat.names[i] {
                return Err(BgcError::parse(
                    n + 1,
                    format!("row {:?} where {:?} was expected", fields[0], mat.names[i]),
                ));
            }
            if fields.len() < i + 2 {
                return Err(BgcError::parse(n + 1, "row is shorter than its lower triangle"));
            }

            for j in 0..i {
                let cell = fields[j + 1].trim();
                if cell == "NA" {
                    continue;
                }
                let d = cell
                    .parse::<f64>()
                    .map_err(|e| BgcError::parse(n + 1, format!("{:?}: {}", cell, e)))?;
                mat.set(i, j, d);
            }
            i += 1;
        }

        if i != mat.size() {
            return Err(BgcError::parse(
                0,
                format!("{} rows for {} names", i, mat.size()),
            ));
        }
        Ok(mat)
    }
}

/// A cluster pair left out of the matrix.
#[derive(Debug)]
pub struct PairFailure {
    pub row: String,
    pub col: String,
    pub error: BgcError,
}

/// Scores every unordered cluster pair into a [`DistanceMatrix`].
pub struct MatrixBuilder<'a> {
    clusters: &'a IndexMap<String, Cluster>,
    dist: &'a OccurrenceDistances,
    opt: &'a ScoreOptions,
}

impl<'a> MatrixBuilder<'a> {
    pub fn new(
        clusters: &'a IndexMap<String, Cluster>,
        dist: &'a OccurrenceDistances,
        opt: &'a ScoreOptions,
    ) -> Self {
        Self {
            clusters,
            dist,
            opt,
        }
    }

    /// Cluster `j` is scored against each earlier cluster `i` and lands in
    /// row `j`, column `i`. A pair that fails to score is logged, left empty
    /// and reported; the rest of the matrix is still built.
    pub fn build(&self) -> (DistanceMatrix, Vec<PairFailure>) {
        let names: Vec<String> = self.clusters.keys().cloned().collect();
        let mut mat = DistanceMatrix::new(names);
        let mut failures = vec![];

        for ((i, a), (j, b)) in self.clusters.values().enumerate().tuple_combinations() {
            match score_pair(b, a, self.dist, self.opt) {
                Ok(score) => mat.set(j, i, score.distance),
                Err(error) => {
                    tracing::warn!(row = b.id(), col = a.id(), %error, "pair not scored");
                    failures.push(PairFailure {
                        row: b.id().to_string(),
                        col: a.id().to_string(),
                        error,
                    });
                }
            }
        }

        tracing::info!(
            clusters = mat.size(),
            failed = failures.len(),
            "distance matrix built"
        );
        (mat, failures)
    }
}
