use clap::Parser;
use gamma_taylor::tracing::{start_stderr_tracing_subscriber, start_tracing_subscriber};
use gamma_taylor::{Fixed, GammaTaylorCache, MpfrConstants, Result, TaylorConfig};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::exit;
use std::sync::Arc;
use tracing::{error, info};

/// Computes the Taylor coefficients of 1/gamma(x) at the given binary precision
/// and writes them as a table: the precision on the first line, then one
/// hexadecimal fixed-point coefficient of 1/gamma(1+t) per line, constant term
/// first.
#[derive(Parser)]
#[clap(version, about)]
struct Args {
    #[arg(short, long)]
    /// File to write the table to (stdout when omitted)
    output: Option<PathBuf>,

    #[arg(short, long, default_value_t = false)]
    /// Write the zeta array used by the recurrence instead of the coefficients
    zeta: bool,

    #[arg(short, long, default_value_t = false)]
    /// Write the coefficient table in bincode instead of text
    binary: bool,

    #[arg(long)]
    /// Override the number of guard bits carried through the recurrence
    guard_bits: Option<u32>,

    #[arg()]
    /// Precision of the coefficients in bits
    prec: u32,
}

fn write_zeta(zeta: &[Fixed], wp: u32, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "{}", wp)?;
    for z in zeta {
        writeln!(writer, "{:x}", z)?;
    }
    Ok(())
}

/// Computes what `args` asks for and writes it to `writer`. The outer error is
/// a failed computation, the inner one a failed write.
fn run(args: &Args, cache: &GammaTaylorCache, writer: impl Write) -> Result<io::Result<()>> {
    let mut writer = BufWriter::new(writer);
    if args.zeta {
        let n = cache.config().truncation_length(args.prec);
        let wp = cache.config().working_precision(args.prec);
        info!("computing {} zeta values at {} bits", n + 2, wp);
        cache
            .zeta_array(n, wp)
            .map(|zeta| write_zeta(&zeta, wp, &mut writer).and_then(|_| writer.flush()))
    } else {
        info!("computing gamma Taylor coefficients at {} bits", args.prec);
        let table = cache.coefficients(args.prec)?;
        info!("writing {} coefficients", table.len());
        let written = if args.binary {
            writer.write_all(&table.to_bytes()?)
        } else {
            table.write_table(&mut writer)
        };
        Ok(written.and_then(|_| writer.flush()))
    }
}

fn main() {
    let args = Args::parse();

    // Log to stderr when the table goes to stdout
    if args.output.is_some() {
        start_tracing_subscriber();
    } else {
        start_stderr_tracing_subscriber();
    }

    let mut config = TaylorConfig::default();
    if let Some(guard_bits) = args.guard_bits {
        config.output_guard_bits = guard_bits;
    }
    let cache = GammaTaylorCache::with_config(config, Arc::new(MpfrConstants::new()));

    let writer: Box<dyn Write> = match &args.output {
        Some(path) => match File::create(path) {
            Ok(file) => Box::new(file),
            Err(e) => {
                error!("could not create {:?}: {}", path, e);
                exit(1);
            }
        },
        None => Box::new(io::stdout()),
    };

    match run(&args, &cache, writer) {
        Ok(Ok(())) => info!("done"),
        Ok(Err(e)) => {
            error!("failed to write output: {}", e);
            exit(1);
        }
        Err(e) => {
            error!("{}", e);
            exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gamma_taylor::{tracing::stderr_subscriber, TaylorCoefficients};

    fn run_to_vec(argv: &[&str]) -> Vec<u8> {
        let args = Args::parse_from(argv.iter().copied());
        let cache = GammaTaylorCache::new();
        let mut out = Vec::new();
        tracing::subscriber::with_default(stderr_subscriber(), || {
            run(&args, &cache, &mut out).unwrap().unwrap();
        });
        out
    }

    #[test]
    fn text_output_is_only_the_table() {
        let out = String::from_utf8(run_to_vec(&["gamma-coefficients", "32"])).unwrap();
        let mut lines = out.lines();
        assert_eq!(lines.next(), Some("32"));
        assert_eq!(lines.next(), Some("100000000"));
        assert!(lines.all(|line| line
            .trim_start_matches('-')
            .chars()
            .all(|c| c.is_ascii_hexdigit())));
    }

    #[test]
    fn binary_output_decodes() {
        let out = run_to_vec(&["gamma-coefficients", "--binary", "48"]);
        let table = TaylorCoefficients::from_bytes(&out).unwrap();
        assert_eq!(table.prec(), 48);
    }

    #[test]
    fn zeta_output_starts_with_working_precision() {
        let out = String::from_utf8(run_to_vec(&["gamma-coefficients", "--zeta", "32"])).unwrap();
        assert_eq!(out.lines().next(), Some("52"));
        assert_eq!(out.lines().count(), TaylorConfig::default().truncation_length(32) + 3);
    }
}
