use super::error::{BgcError, Result};
use indexmap::IndexMap;
use std::io::BufRead;

/// One detected domain instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainOccurrence {
    /// Owning cluster id
    pub cluster: String,
    /// Domain type, e.g. "KS" or "AT_mal"
    pub domain: String,
    /// Key into the pairwise distance table, `cluster|column`
    pub id: String,
}

/// A gene cluster (pathway): its domain multiset and the pseudo-sequence of
/// domain types in genomic order.
#[derive(Debug, Clone, Default)]
pub struct Cluster {
    id: String,
    domains: IndexMap<String, Vec<DomainOccurrence>>,
    pseudo_seq: Vec<String>,
}

impl Cluster {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Append an occurrence of `domain` at the next genomic position.
    ///
    /// ```
    /// use bgcdist::libs::cluster::Cluster;
    /// let mut cluster = Cluster::new("P1");
    /// cluster.push("KS", "P1|m1_KS");
    /// cluster.push("AT", "P1|m1_AT");
    /// cluster.push("KS", "P1|m2_KS");
    /// assert_eq!(cluster.occurrences("KS").len(), 2);
    /// assert_eq!(cluster.pseudo_seq(), &["KS", "AT", "KS"]);
    /// ```
    pub fn push(&mut self, domain: &str, occurrence_id: &str) {
        let occurrence = DomainOccurrence {
            cluster: self.id.clone(),
            domain: domain.to_string(),
            id: occurrence_id.to_string(),
        };
        self.domains
            .entry(domain.to_string())
            .or_default()
            .push(occurrence);
        self.pseudo_seq.push(domain.to_string());
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Domain types in first-seen order.
    pub fn domain_types(&self) -> impl Iterator<Item = &str> {
        self.domains.keys().map(|s| s.as_str())
    }

    pub fn has_domain(&self, domain: &str) -> bool {
        self.domains.contains_key(domain)
    }

    /// Occurrences of one domain type; empty when the type is absent.
    pub fn occurrences(&self, domain: &str) -> &[DomainOccurrence] {
        self.domains
            .get(domain)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn pseudo_seq(&self) -> &[String] {
        &self.pseudo_seq
    }

    /// Number of distinct domain types.
    pub fn n_types(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

/// Read an annotation table, `stdin` allowed.
pub fn read_annotation(infile: &str) -> Result<IndexMap<String, Cluster>> {
    parse_annotation(intspan::reader(infile))
}

/// Parse an annotation table.
///
/// The header names the domain columns from the third column on. Each row is
/// `cluster_id`, `domain_count`, then one cell per column holding a domain type
/// or `NA`. A typed cell yields the occurrence `cluster_id|column_name`.
/// Rows sharing a cluster id are merged; clusters keep file order.
pub fn parse_annotation<R: BufRead>(reader: R) -> Result<IndexMap<String, Cluster>> {
    let mut clusters: IndexMap<String, Cluster> = IndexMap::new();
    let mut columns: Option<Vec<String>> = None;

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();

        let Some(names) = columns.as_ref() else {
            if fields.len() < 2 {
                return Err(BgcError::parse(i + 1, "header needs at least two columns"));
            }
            columns = Some(fields[2..].iter().map(|s| s.to_string()).collect());
            continue;
        };

        if fields.len() < 2 {
            return Err(BgcError::parse(i + 1, "row needs a cluster id and a domain count"));
        }
        let cluster_id = fields[0].trim();
        if cluster_id.is_empty() {
            return Err(BgcError::parse(i + 1, "empty cluster id"));
        }
        let cells = &fields[2..];
        if cells.len() > names.len() {
            return Err(BgcError::parse(
                i + 1,
                format!(
                    "{} domain cells but the header names {} columns",
                    cells.len(),
                    names.len()
                ),
            ));
        }

        let cluster = clusters
            .entry(cluster_id.to_string())
            .or_insert_with(|| Cluster::new(cluster_id));
        for (name, cell) in names.iter().zip(cells) {
            let domain = cell.trim();
            if domain.is_empty() || domain == "NA" {
                continue;
            }
            cluster.push(domain, &format!("{}|{}", cluster_id, name));
        }
    }

    tracing::info!(clusters = clusters.len(), "annotation parsed");
    Ok(clusters)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANNOTATION: &str = "\
pathway\tcount\tm1_KS\tm1_AT\tm2_KS
P1\t2\tKS\tAT\tNA
P2\t3\tKS\tAT_mal\tKS
P3\t0\tNA\tNA\tNA
";

    #[test]
    fn test_parse_annotation() {
        let clusters = parse_annotation(ANNOTATION.as_bytes()).unwrap();
        assert_eq!(
            clusters.keys().collect::<Vec<_>>(),
            vec!["P1", "P2", "P3"]
        );

        let p2 = &clusters["P2"];
        assert_eq!(p2.n_types(), 2);
        assert_eq!(p2.pseudo_seq(), &["KS", "AT_mal", "KS"]);
        let ks: Vec<_> = p2.occurrences("KS").iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ks, vec!["P2|m1_KS", "P2|m2_KS"]);
        assert_eq!(p2.occurrences("KS")[0].cluster, "P2");

        assert!(clusters["P1"].has_domain("AT"));
        assert!(clusters["P1"].occurrences("AT_mal").is_empty());
        assert!(clusters["P3"].is_empty());
    }

    #[test]
    fn test_merge_rows() {
        let input = "id\tn\tc1\tc2\nP1\t1\tKS\nP1\t1\tNA\tDH\n";
        let clusters = parse_annotation(input.as_bytes()).unwrap();
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters["P1"].pseudo_seq(), &["KS", "DH"]);
    }

    #[test]
    fn test_too_many_cells() {
        let input = "id\tn\tc1\nP1\t2\tKS\tAT\n";
        match parse_annotation(input.as_bytes()) {
            Err(BgcError::Parse { line, .. }) => assert_eq!(line, 2),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_too_few_columns() {
        let input = "id\tn\tc1\nP1\t1\tKS\nP2\n";
        match parse_annotation(input.as_bytes()) {
            Err(BgcError::Parse { line, .. }) => assert_eq!(line, 3),
            other => panic!("unexpected {:?}", other),
        }
    }
}
