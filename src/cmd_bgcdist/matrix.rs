use super::utils;
use bgcdist::libs::cluster::read_annotation;
use bgcdist::libs::identity::read_identity;
use bgcdist::libs::matrix::MatrixBuilder;
use bgcdist::libs::phylo::build;
use clap::*;
use std::io::Write;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    let cmd = Command::new("matrix")
        .about("Pairwise distances of all clusters")
        .after_help(
            r###"
Scores every pair of clusters and writes the lower-triangular distance matrix.

Notes:
* <annotation> is tab separated:
    * header: id, count, then one name per domain column
    * rows: cluster id, domain count, then a domain type or NA per column
    * the occurrence in column `c` of cluster `P` is named `P|c`
* <identity> is tab separated: occurrence1, occurrence2, identity
    * distance = 1 - identity; use --pct for 0-100 identities
* similarity = jaccard * J + dds * exp(-DDS) + gk * GK
* distance = 1 - similarity / scale
* Output is comma separated; only the lower triangle is filled.
* Pairs that cannot be scored are reported and written as NA.

Examples:
1. Distance matrix:
   bgcdist matrix annotation.tsv identity.tsv -o distance.csv

2. Matrix and UPGMA tree:
   bgcdist matrix annotation.tsv identity.tsv -o distance.csv --tree upgma.nwk

"###,
        )
        .arg(
            Arg::new("annotation")
                .required(true)
                .num_args(1)
                .index(1)
                .help("Domain annotation table. [stdin] for standard input"),
        )
        .arg(
            Arg::new("identity")
                .required(true)
                .num_args(1)
                .index(2)
                .help("Pairwise identities of domain occurrences"),
        )
        .arg(
            Arg::new("outfile")
                .short('o')
                .long("outfile")
                .num_args(1)
                .default_value("stdout")
                .help("Output filename. [stdout] for screen"),
        )
        .arg(
            Arg::new("tree")
                .long("tree")
                .num_args(1)
                .help("Also write the UPGMA tree in Newick format to this file"),
        );

    utils::score_args(cmd)
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    //----------------------------
    // Args
    //----------------------------
    let opt = utils::score_options(args)?;
    let annotation = args.get_one::<String>("annotation").unwrap();
    let identity = args.get_one::<String>("identity").unwrap();
    let outfile = args.get_one::<String>("outfile").unwrap();

    //----------------------------
    // Load
    //----------------------------
    let clusters = read_annotation(annotation)?;
    let dist = read_identity(identity, args.get_flag("pct"))?;

    //----------------------------
    // Ops
    //----------------------------
    // failed pairs are logged by the builder
    let (mat, failures) = MatrixBuilder::new(&clusters, &dist, &opt).build();

    //----------------------------
    // Output
    //----------------------------
    let mut writer = intspan::writer(outfile);
    mat.write_csv(&mut writer)?;
    writer.flush()?;

    if let Some(tree_file) = args.get_one::<String>("tree") {
        if !failures.is_empty() {
            anyhow::bail!(
                "{} cluster pairs have no distance, cannot build the tree",
                failures.len()
            );
        }
        let tree = build::upgma(&mat)?;
        let mut writer = intspan::writer(tree_file);
        writer.write_all((tree.to_newick() + "\n").as_ref())?;
    }

    Ok(())
}
