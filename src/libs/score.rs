//! Pairwise cluster similarity: Jaccard on domain types, Domain Distance Score
//! (DDS) on domain multisets and sequence divergence, and Goodman-Kruskal
//! gamma on domain order.

use super::assign::Munkres;
use super::cluster::{Cluster, DomainOccurrence};
use super::error::{BgcError, Result};
use super::gamma::order_conservation;
use super::identity::OccurrenceDistances;
use std::str::FromStr;

/// Cost given to a cost-matrix cell whose pair distance was skipped.
pub const SKIPPED_CELL_COST: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    pub jaccard: f64,
    pub dds: f64,
    pub gk: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            jaccard: 0.5,
            dds: 0.25,
            gk: 0.25,
        }
    }
}

/// What to do when two occurrences of a shared domain have no distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingPolicy {
    /// Fail the cluster pair
    #[default]
    Error,
    /// Log and leave the pair out: a lone pair adds nothing to DDS, a
    /// cost-matrix cell costs [`SKIPPED_CELL_COST`]
    Skip,
}

impl FromStr for MissingPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "error" => Ok(MissingPolicy::Error),
            "skip" => Ok(MissingPolicy::Skip),
            _ => Err(format!("unknown missing-distance policy: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreOptions {
    pub weights: Weights,
    /// Similarities are divided by this before `1 - s`
    pub scale: f64,
    /// Neighborhood size of the gamma index
    pub nbhood: usize,
    pub missing: MissingPolicy,
    /// Divide DDS by its normalizing mass twice, as the reference pipeline does
    pub double_norm: bool,
}

impl Default for ScoreOptions {
    fn default() -> Self {
        Self {
            weights: Weights::default(),
            scale: 1.0,
            nbhood: 3,
            missing: MissingPolicy::Error,
            double_norm: true,
        }
    }
}

/// Component scores of one cluster pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairScore {
    pub jaccard: f64,
    /// `exp(-DDS)`
    pub dds: f64,
    pub gk: f64,
    pub similarity: f64,
    pub distance: f64,
}

/// Shared domain types over all domain types.
///
/// ```
/// use bgcdist::libs::cluster::Cluster;
/// use bgcdist::libs::score::jaccard;
/// let mut a = Cluster::new("A");
/// a.push("KS", "A|1");
/// let mut b = Cluster::new("B");
/// b.push("KS", "B|1");
/// b.push("AT", "B|2");
/// assert_eq!(jaccard(&a, &b).unwrap(), 0.5);
/// ```
pub fn jaccard(a: &Cluster, b: &Cluster) -> Result<f64> {
    let shared = a.domain_types().filter(|d| b.has_domain(d)).count();
    let union = a.n_types() + b.n_types() - shared;
    if union == 0 {
        return Err(BgcError::EmptyClusters {
            a: a.id().to_string(),
            b: b.id().to_string(),
        });
    }

    Ok(shared as f64 / union as f64)
}

/// Normalized Domain Distance Score, before the `exp(-x)` transform.
///
/// Unshared domain types cost one per occurrence. A shared type seen once on
/// each side costs the pair distance. Otherwise occurrences are matched by a
/// minimum-cost assignment, and the count difference is added as an abundance
/// penalty. The total is divided by the normalizing mass `S` (twice with
/// `double_norm`).
pub fn domain_distance(
    a: &Cluster,
    b: &Cluster,
    dist: &OccurrenceDistances,
    opt: &ScoreOptions,
) -> Result<f64> {
    let mut dds = 0.0;
    let mut mass = 0.0;

    let union = a
        .domain_types()
        .chain(b.domain_types().filter(|d| !a.has_domain(d)));
    for domain in union {
        let set_a = a.occurrences(domain);
        let set_b = b.occurrences(domain);

        if set_a.is_empty() || set_b.is_empty() {
            let n = (set_a.len() + set_b.len()) as f64;
            dds += n;
            mass += n;
        } else if set_a.len() + set_b.len() == 2 {
            mass += 1.0;
            if let Some(d) = lookup(dist, &set_a[0], &set_b[0], opt.missing)? {
                dds += d;
            }
        } else {
            let mut cost = vec![vec![SKIPPED_CELL_COST; set_b.len()]; set_a.len()];
            for (i, oa) in set_a.iter().enumerate() {
                for (j, ob) in set_b.iter().enumerate() {
                    if let Some(d) = lookup(dist, oa, ob, opt.missing)? {
                        cost[i][j] = d;
                    }
                }
            }

            let assignment = Munkres::solve(&cost)?;
            let accumulated = assignment.total(&cost);
            dds += set_a.len().abs_diff(set_b.len()) as f64 + accumulated;
            mass += set_a.len().max(set_b.len()) as f64;
        }
    }

    if mass == 0.0 {
        return Err(BgcError::EmptyClusters {
            a: a.id().to_string(),
            b: b.id().to_string(),
        });
    }

    dds /= mass;
    if opt.double_norm {
        dds /= mass;
    }
    Ok(dds)
}

fn lookup(
    dist: &OccurrenceDistances,
    a: &DomainOccurrence,
    b: &DomainOccurrence,
    policy: MissingPolicy,
) -> Result<Option<f64>> {
    match policy {
        MissingPolicy::Error => dist.require(&a.id, &b.id).map(Some),
        MissingPolicy::Skip => {
            let d = dist.get(&a.id, &b.id);
            if d.is_none() {
                tracing::warn!(a = %a.id, b = %b.id, "no pairwise distance, skipped");
            }
            Ok(d)
        }
    }
}

/// Score one cluster pair.
///
/// `similarity = wJ * Jaccard + wD * exp(-DDS) + wG * GK` and
/// `distance = 1 - similarity / scale`, clamped at zero.
pub fn score_pair(
    a: &Cluster,
    b: &Cluster,
    dist: &OccurrenceDistances,
    opt: &ScoreOptions,
) -> Result<PairScore> {
    let jaccard = jaccard(a, b)?;
    let dds = (-domain_distance(a, b, dist, opt)?).exp();
    let gk = order_conservation(a.pseudo_seq(), b.pseudo_seq(), opt.nbhood);

    let w = &opt.weights;
    let similarity = w.jaccard * jaccard + w.dds * dds + w.gk * gk;
    let mut distance = 1.0 - similarity / opt.scale;
    if distance < 0.0 {
        tracing::warn!(
            a = a.id(),
            b = b.id(),
            distance,
            dds,
            "negative distance, probably rounding; set to 0"
        );
        distance = 0.0;
    }

    tracing::debug!(a = a.id(), b = b.id(), jaccard, dds, gk, distance);
    Ok(PairScore {
        jaccard,
        dds,
        gk,
        similarity,
        distance,
    })
}
