use bgcdist::libs::assign::Munkres;
use clap::*;
use std::io::{BufRead, Write};

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("assign")
        .about("Minimum-cost assignment of a cost matrix")
        .after_help(
            r###"
Solves the assignment problem with the Kuhn-Munkres (Hungarian) algorithm.

Notes:
* Input: one matrix row per line, whitespace separated, non-negative costs.
* Rectangular matrices are allowed; min(rows, cols) pairs are reported.
* Lines starting with # are ignored.
* Output: row, column and cost of each pair (0-based), then the total.

Examples:
1. Solve a matrix:
   bgcdist assign cost.tsv

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
    let reader = intspan::reader(args.get_one::<String>("infile").unwrap());
    let mut writer = intspan::writer(args.get_one::<String>("outfile").unwrap());

    let mut cost: Vec<Vec<f64>> = vec![];
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let row = line
            .split_whitespace()
            .map(|s| s.parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| anyhow::anyhow!("line {}: {}", i + 1, e))?;
        cost.push(row);
    }

    let assignment = Munkres::solve(&cost)?;
    for &(r, c) in assignment.iter() {
        writer.write_fmt(format_args!("{}\t{}\t{}\n", r, c, cost[r][c]))?;
    }
    writer.write_fmt(format_args!("#total\t{}\n", assignment.total(&cost)))?;

    Ok(())
}
