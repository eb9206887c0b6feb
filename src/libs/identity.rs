use super::error::{BgcError, Result};
use std::collections::HashMap;
use std::io::BufRead;

/// Distances between domain occurrences, keyed by the sorted id pair so a
/// lookup does not depend on which side the aligner reported as query.
#[derive(Debug, Clone, Default)]
pub struct OccurrenceDistances {
    map: HashMap<String, HashMap<String, f64>>,
    len: usize,
}

impl OccurrenceDistances {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `distance` for the unordered pair `{a, b}`. When the pair is
    /// already known, the smaller distance wins.
    ///
    /// ```
    /// use bgcdist::libs::identity::OccurrenceDistances;
    /// let mut dist = OccurrenceDistances::new();
    /// dist.insert("P1|KS", "P2|KS", 0.3);
    /// dist.insert("P2|KS", "P1|KS", 0.2);
    /// assert_eq!(dist.get("P1|KS", "P2|KS"), Some(0.2));
    /// assert_eq!(dist.get("P2|KS", "P1|KS"), Some(0.2));
    /// assert_eq!(dist.len(), 1);
    /// ```
    pub fn insert(&mut self, a: &str, b: &str, distance: f64) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let inner = self.map.entry(lo.to_string()).or_default();
        match inner.get_mut(hi) {
            Some(old) => {
                if distance < *old {
                    *old = distance;
                }
            }
            None => {
                inner.insert(hi.to_string(), distance);
                self.len += 1;
            }
        }
    }

    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        self.map.get(lo).and_then(|inner| inner.get(hi)).copied()
    }

    /// Like [`OccurrenceDistances::get`], but a missing pair is an error.
    pub fn require(&self, a: &str, b: &str) -> Result<f64> {
        self.get(a, b)
            .ok_or_else(|| BgcError::missing_distance(a, b))
    }

    /// Number of distinct unordered pairs.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Read a pairwise identity table, `stdin` allowed.
pub fn read_identity(infile: &str, percent: bool) -> Result<OccurrenceDistances> {
    parse_identity(intspan::reader(infile), percent)
}

/// Parse `occurrence1 \t occurrence2 \t identity [\t ...]` rows into
/// distances `1 - identity`.
///
/// With `percent`, identities are on a 0-100 scale. Columns past the third
/// are ignored, so BLAST/DIAMOND tabular output can be fed directly.
pub fn parse_identity<R: BufRead>(reader: R, percent: bool) -> Result<OccurrenceDistances> {
    let mut dist = OccurrenceDistances::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 3 {
            return Err(BgcError::parse(
                i + 1,
                format!("expected 3 columns, found {}", fields.len()),
            ));
        }

        let identity = fields[2]
            .trim()
            .parse::<f64>()
            .map_err(|e| BgcError::parse(i + 1, format!("identity {:?}: {}", fields[2], e)))?;
        let identity = if percent { identity / 100.0 } else { identity };
        let distance = 1.0 - identity;
        if !(0.0..=1.0).contains(&distance) {
            return Err(BgcError::parse(
                i + 1,
                format!("identity {} is outside [0, 1]", identity),
            ));
        }

        dist.insert(fields[0].trim(), fields[1].trim(), distance);
    }

    tracing::info!(pairs = dist.len(), "pairwise identities parsed");
    Ok(dist)
}
