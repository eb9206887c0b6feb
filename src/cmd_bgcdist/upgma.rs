use bgcdist::libs::matrix::DistanceMatrix;
use bgcdist::libs::phylo::build;
use clap::*;
use std::io::Write;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("upgma")
        .about("Construct a tree from a distance matrix using UPGMA")
        .after_help(
            r###"
Constructs a tree from the lower-triangular matrix written by `bgcdist matrix`.

Notes:
* Input: comma separated matrix, cells right of the diagonal are ignored.
* Every lower-triangle cell must hold a number (no NA).
* Output: Newick tree.

Examples:
1. Build tree from matrix:
   bgcdist upgma distance.csv -o upgma.nwk

2. Pipe matrix to tree:
   bgcdist matrix annotation.tsv identity.tsv | bgcdist upgma stdin

"###,
        )
        .arg(
            Arg::new("infile")
                .required(true)
                .index(1)
                .help("Input matrix file. [stdin] for standard input"),
        )
        .arg(
            Arg::new("outfile")
                .short('o')
                .long("outfile")
                .num_args(1)
                .default_value("stdout")
                .help("Output filename. [stdout] for screen"),
        )
}

pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let infile = args.get_one::<String>("infile").unwrap();
    let outfile = args.get_one::<String>("outfile").unwrap();

    // Load matrix
    let matrix = DistanceMatrix::from_csv(intspan::reader(infile))?;

    // Build tree
    let tree = build::upgma(&matrix)?;

    // Output tree
    let mut writer = intspan::writer(outfile);
    writer.write_all((tree.to_newick() + "\n").as_ref())?;

    Ok(())
}
