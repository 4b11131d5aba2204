use clap::Parser;
use std::error::Error;
use std::path::PathBuf;
use subnet_algebra::logging;
use subnet_algebra::output::{print_json, print_summary};
use subnet_algebra::processing::summarize_all;

/// Summarize IPv4/IPv6 addresses, CIDR networks and IPv4 globs.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Addresses, networks (`10.0.0.0/8`, `2001:db8::/32`) or globs (`10.1.*`, `1.2.3.4-10`)
    #[arg(required = true)]
    inputs: Vec<String>,

    /// List the subnets this many bits longer than each network
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..=128))]
    subnet: Option<u8>,

    /// Print a JSON array instead of CSV
    #[arg(long)]
    json: bool,

    /// log4rs configuration file
    #[arg(long, default_value = "log4rs.yml")]
    log_config: PathBuf,
}

fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    let args = Args::parse();
    logging::init(&args.log_config)?;
    log::info!("#Start main() inputs = {}", args.inputs.len());

    let (rows, errors) = summarize_all(&args.inputs, args.subnet);
    if args.json {
        print_json(&rows)?;
    } else {
        print_summary(&rows, errors.len());
    }

    for err in &errors {
        log::error!("{err}");
        eprintln!("netcalc: {err}");
    }
    if !errors.is_empty() {
        std::process::exit(1);
    }
    Ok(())
}
