extern crate clap;
use clap::*;

mod cmd_bgcdist;

fn main() -> anyhow::Result<()> {
    let app = Command::new("bgcdist")
        .version(crate_version!())
        .author(crate_authors!())
        .about("`bgcdist` - Biosynthetic Gene Cluster distances")
        .propagate_version(true)
        .arg_required_else_help(true)
        .color(ColorChoice::Auto)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("More log output on stderr (-v info, -vv debug)"),
        )
        .subcommand(cmd_bgcdist::matrix::make_subcommand())
        .subcommand(cmd_bgcdist::pair::make_subcommand())
        .subcommand(cmd_bgcdist::upgma::make_subcommand())
        .subcommand(cmd_bgcdist::assign::make_subcommand())
        .after_help(
            r###"Subcommand groups:

* Scoring:
    * matrix - Distance matrix of all cluster pairs
    * pair   - Component scores of two clusters

* Trees:
    * upgma  - UPGMA tree from a distance matrix

* Utilities:
    * assign - Minimum-cost assignment (Hungarian algorithm)

"###,
        );

    let matches = app.get_matches();

    let level = match matches.get_count("verbose") {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();

    // Check which subcommand the user ran...
    match matches.subcommand() {
        Some(("matrix", sub_matches)) => cmd_bgcdist::matrix::execute(sub_matches),
        Some(("pair", sub_matches)) => cmd_bgcdist::pair::execute(sub_matches),
        Some(("upgma", sub_matches)) => cmd_bgcdist::upgma::execute(sub_matches),
        Some(("assign", sub_matches)) => cmd_bgcdist::assign::execute(sub_matches),
        _ => unreachable!(),
    }?;

    Ok(())
}
