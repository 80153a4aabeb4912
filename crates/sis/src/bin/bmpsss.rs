// Command-line front end: distribute a secret bitmap into stego shadows, or
// recover it from k of them.

use clap::{ArgAction, ArgGroup, Parser};
use console::style;
use env_logger::Env;
use sis::pipeline::{distribute, recover};
use sis::scan::count_files;
use sis::sharing::{SharingParametersBuilder, DEFAULT_SEED};
use sis::{Error, Result};
use std::path::PathBuf;
use std::process::exit;

/// (k, n) threshold secret image sharing with LSB steganography.
#[derive(Parser, Debug)]
#[command(name = "bmpsss", version, long_about = None, disable_help_flag = true)]
#[command(group(ArgGroup::new("mode").required(true).args(["distribute", "recover"])))]
struct Args {
    /// Distribute the secret into shadows hidden in the covers of --dir
    #[arg(short = 'd')]
    distribute: bool,

    /// Recover the secret from the shadows in --dir
    #[arg(short = 'r', requires = "width", requires = "height")]
    recover: bool,

    /// Secret bitmap to distribute, or where to write the recovered one
    #[arg(long)]
    secret: PathBuf,

    /// Number of shadows needed to recover the secret
    #[arg(short = 'k')]
    k: usize,

    /// Number of shadows to distribute [default: number of files in --dir]
    #[arg(short = 'n')]
    n: Option<usize>,

    /// Width of the secret to recover
    #[arg(short = 'w')]
    width: Option<u32>,

    /// Height of the secret to recover
    #[arg(short = 'h')]
    height: Option<u32>,

    /// Seed stored in the shadows and used by --permute
    #[arg(short = 's', default_value_t = DEFAULT_SEED)]
    seed: u16,

    /// Directory holding the covers (-d) or the shadows (-r)
    #[arg(long, default_value = ".")]
    dir: PathBuf,

    /// Directory the shadows are written to
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Permute the secret pixels with the seed before sharing
    #[arg(long)]
    permute: bool,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    help: Option<bool>,
}

fn run(args: &Args) -> Result<()> {
    let n = match (args.recover, args.n) {
        (true, _) => args.k,
        (false, Some(n)) => n,
        (false, None) => count_files(&args.dir)?,
    };
    let params = SharingParametersBuilder::new()
        .set_threshold(args.k)
        .set_shadow_count(n)
        .set_seed(args.seed)
        .set_permutation(args.permute)
        .build_arc()?;

    if args.distribute {
        let written = distribute(&args.secret, params, &args.dir, &args.output_dir)?;
        println!(
            "{} {} shadows written to {}",
            style("distributed:").green().bold(),
            written.len(),
            args.output_dir.display()
        );
    } else {
        let (Some(width), Some(height)) = (args.width, args.height) else {
            return Err(Error::invalid_parameters("-w and -h are required with -r"));
        };
        recover(&args.secret, width, height, params, &args.dir)?;
        println!(
            "{} secret written to {}",
            style("recovered:").green().bold(),
            args.secret.display()
        );
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("{} {e}", style("error:").red().bold());
        exit(1);
    }
}
