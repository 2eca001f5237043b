//! Runs an operation script against one range-sum backend.
//!
//! `range-index --values 1,2,3,4,5 sum:0:4 add:1:3:1 sum:0:4`

use anyhow::{bail, Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use rand::prelude::*;

use range_index::script::{Backend, BackendKind, Op};

fn make_options_parser() -> Command {
    Command::new("range-index")
        .version("v0.1.0")
        .about("Range sums with point or range updates")
        .arg(
            Arg::new("backend")
                .short('b')
                .long("backend")
                .help("Index backend, only `segment` supports range adds")
                .default_value("segment")
                .value_parser(["segment", "fenwick"]),
        )
        .arg(
            Arg::new("values")
                .short('v')
                .long("values")
                .value_name("LIST")
                .help("Comma separated initial values")
                .allow_hyphen_values(true)
                .conflicts_with("random"),
        )
        .arg(
            Arg::new("random")
                .short('r')
                .long("random")
                .value_name("N")
                .help("Start from N random values in [-100, 100]")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .help("Seed for --random")
                .value_parser(clap::value_parser!(u64))
                .requires("random"),
        )
        .arg(
            Arg::new("ops")
                .value_name("OP")
                .help("sum:L:R | add:I:D | add:L:R:D | get:I | total")
                .num_args(1..)
                .action(ArgAction::Append),
        )
}

fn initial_values(matches: &ArgMatches) -> Result<Vec<i64>> {
    if let Some(&n) = matches.get_one::<usize>("random") {
        let mut rng = match matches.get_one::<u64>("seed") {
            Some(&seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        return Ok((0..n).map(|_| rng.gen_range(-100..=100)).collect());
    }

    match matches.get_one::<String>("values") {
        Some(list) if !list.trim().is_empty() => list
            .split(',')
            .map(|x| {
                x.trim()
                    .parse::<i64>()
                    .with_context(|| format!("invalid value `{}`", x))
            })
            .collect(),
        _ => Ok(Vec::new()),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let matches = make_options_parser().get_matches();
    let kind: BackendKind = matches
        .get_one::<String>("backend")
        .map(String::as_str)
        .unwrap_or("segment")
        .parse()?;
    let values = initial_values(&matches)?;
    log::info!("{} backend over {} values", kind, values.len());

    let ops = matches
        .get_many::<String>("ops")
        .into_iter()
        .flatten()
        .map(|s| s.parse::<Op>())
        .collect::<Result<Vec<_>, _>>()?;
    if ops.is_empty() {
        bail!("no operations given");
    }

    let mut backend = Backend::new(kind, values);
    for op in ops {
        match backend.apply(op).with_context(|| format!("`{}` failed", op))? {
            Some(value) => println!("{} = {}", op, value),
            None => println!("{}", op),
        }
    }
    Ok(())
}
