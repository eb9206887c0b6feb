use bgcdist::libs::score::{MissingPolicy, ScoreOptions, Weights};
use clap::*;

/// Options shared by every subcommand that scores cluster pairs.
pub fn score_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("jaccard")
            .long("jaccard")
            .num_args(1)
            .default_value("0.5")
            .value_parser(value_parser!(f64))
            .help("Weight of the Jaccard index"),
    )
    .arg(
        Arg::new("dds")
            .long("dds")
            .num_args(1)
            .default_value("0.25")
            .value_parser(value_parser!(f64))
            .help("Weight of the Domain Distance Score"),
    )
    .arg(
        Arg::new("gk")
            .long("gk")
            .num_args(1)
            .default_value("0.25")
            .value_parser(value_parser!(f64))
            .help("Weight of the Goodman-Kruskal gamma index"),
    )
    .arg(
        Arg::new("scale")
            .long("scale")
            .num_args(1)
            .default_value("1")
            .value_parser(value_parser!(f64))
            .help("distance = 1 - similarity / scale"),
    )
    .arg(
        Arg::new("nbhood")
            .long("nbhood")
            .num_args(1)
            .default_value("3")
            .value_parser(value_parser!(u64).range(2..))
            .help("Neighborhood size for domain order pairs"),
    )
    .arg(
        Arg::new("missing")
            .long("missing")
            .num_args(1)
            .default_value("error")
            .value_parser(["error", "skip"])
            .help("Shared domains without a pairwise identity: fail the pair or skip it"),
    )
    .arg(
        Arg::new("single_norm")
            .long("single-norm")
            .action(ArgAction::SetTrue)
            .help("Divide DDS by its normalizing mass once instead of twice"),
    )
    .arg(
        Arg::new("pct")
            .long("pct")
            .action(ArgAction::SetTrue)
            .help("Identities are percentages (0-100)"),
    )
}

pub fn score_options(args: &ArgMatches) -> anyhow::Result<ScoreOptions> {
    let weights = Weights {
        jaccard: *args.get_one::<f64>("jaccard").unwrap(),
        dds: *args.get_one::<f64>("dds").unwrap(),
        gk: *args.get_one::<f64>("gk").unwrap(),
    };

    for (flag, w) in [
        ("--jaccard", weights.jaccard),
        ("--dds", weights.dds),
        ("--gk", weights.gk),
    ] {
        if !w.is_finite() || w < 0.0 {
            anyhow::bail!("{} must be a non-negative number, got {}", flag, w);
        }
    }

    let scale = *args.get_one::<f64>("scale").unwrap();
    if !scale.is_finite() || scale <= 0.0 {
        anyhow::bail!("--scale must be positive, got {}", scale);
    }

    let missing: MissingPolicy = args
        .get_one::<String>("missing")
        .unwrap()
        .parse()
        .map_err(anyhow::Error::msg)?;

    Ok(ScoreOptions {
        weights,
        scale,
        nbhood: *args.get_one::<u64>("nbhood").unwrap() as usize,
        missing,
        double_norm: !args.get_flag("single_norm"),
    })
}
