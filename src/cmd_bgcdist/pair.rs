use super::utils;
use bgcdist::libs::cluster::read_annotation;
use bgcdist::libs::error::BgcError;
use bgcdist::libs::identity::read_identity;
use bgcdist::libs::score::score_pair;
use clap::*;
use std::io::Write;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    let cmd = Command::new("pair")
        .about("Component scores of two clusters")
        .after_help(
            r###"
Prints the score components of one cluster pair.

Output columns:
    A  B  Jaccard  DDS  GK  Similarity  Distance

* DDS is reported as the similarity exp(-DDS).
* GK is the better of A as read and A reversed.

Examples:
1. Score two clusters:
   bgcdist pair annotation.tsv identity.tsv BGC0000001 BGC0000002

"###,
        )
        .arg(
            Arg::new("annotation")
                .required(true)
                .num_args(1)
                .index(1)
                .help("Domain annotation table"),
        )
        .arg(
            Arg::new("identity")
                .required(true)
                .num_args(1)
                .index(2)
                .help("Pairwise identities of domain occurrences"),
        )
        .arg(
            Arg::new("a")
                .required(true)
                .num_args(1)
                .index(3)
                .help("First cluster id"),
        )
        .arg(
            Arg::new("b")
                .required(true)
                .num_args(1)
                .index(4)
                .help("Second cluster id"),
        )
        .arg(
            Arg::new("outfile")
                .short('o')
                .long("outfile")
                .num_args(1)
                .default_value("stdout")
                .help("Output filename. [stdout] for screen"),
        );

    utils::score_args(cmd)
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let opt = utils::score_options(args)?;
    let clusters = read_annotation(args.get_one::<String>("annotation").unwrap())?;
    let dist = read_identity(
        args.get_one::<String>("identity").unwrap(),
        args.get_flag("pct"),
    )?;

    let id_a = args.get_one::<String>("a").unwrap();
    let id_b = args.get_one::<String>("b").unwrap();
    let a = clusters
        .get(id_a)
        .ok_or_else(|| BgcError::UnknownCluster(id_a.clone()))?;
    let b = clusters
        .get(id_b)
        .ok_or_else(|| BgcError::UnknownCluster(id_b.clone()))?;

    let score = score_pair(a, b, &dist, &opt)?;

    let mut writer = intspan::writer(args.get_one::<String>("outfile").unwrap());
    writer.write_fmt(format_args!(
        "{}\t{}\t{:.6}\t{:.6}\t{:.6}\t{:.6}\t{:.6}\n",
        id_a, id_b, score.jaccard, score.dds, score.gk, score.similarity, score.distance
    ))?;

    Ok(())
}
