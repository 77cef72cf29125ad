use std::ffi::OsString;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::{ensure, Result, WrapErr};
use console::style;
use ruhuff::FrequencyFile;
use tracing::level_filters::LevelFilter;
use tracing::{debug, info};
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

mod progress;
use progress::ProgressMonitor;

#[derive(Parser)]
#[command(version, about = "Static Huffman compression with a separate frequency file")]
struct Cli {
    /// Print more diagnostics, repeat for even more
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    /// Only print errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress INPUT into OUTPUT and write the frequency file needed to undo it
    Compress {
        input: PathBuf,
        output: PathBuf,
        /// Where to write the frequency file, defaults to OUTPUT.freq
        #[arg(short, long)]
        freq: Option<PathBuf>,
    },
    /// Restore the original bytes of INPUT into OUTPUT
    Decompress {
        input: PathBuf,
        output: PathBuf,
        /// The frequency file written during compression, defaults to INPUT.freq
        #[arg(short, long)]
        freq: Option<PathBuf>,
    },
    /// Print the symbol count and code table of a frequency file
    Inspect { freq: PathBuf },
    /// Compress INPUT to INPUT.enc, decompress that to INPUT.dec and check both match
    Roundtrip {
        input: PathBuf,
        /// Where to write the frequency file, defaults to INPUT.freq
        #[arg(short, long)]
        freq: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_logging(&cli);

    match cli.command {
        Commands::Compress {
            input,
            output,
            freq,
        } => {
            let freq = freq.unwrap_or_else(|| with_suffix(&output, "freq"));
            compress(&input, &output, &freq, cli.quiet)
        }
        Commands::Decompress {
            input,
            output,
            freq,
        } => {
            let freq = freq.unwrap_or_else(|| with_suffix(&input, "freq"));
            decompress(&input, &output, &freq, cli.quiet)
        }
        Commands::Inspect { freq } => inspect(&freq),
        Commands::Roundtrip { input, freq } => {
            let freq = freq.unwrap_or_else(|| with_suffix(&input, "freq"));
            roundtrip(&input, &freq)
        }
    }
}

fn init_logging(cli: &Cli) {
    let level = match (cli.quiet, cli.verbose) {
        (true, _) => LevelFilter::ERROR,
        (false, 0) => LevelFilter::INFO,
        (false, 1) => LevelFilter::DEBUG,
        (false, _) => LevelFilter::TRACE,
    };
    // log lines go through the indicatif writer so they don't tear the progress bar
    let indicatif_layer = IndicatifLayer::new();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(indicatif_layer.get_stderr_writer())
                .with_filter(level),
        )
        .with(indicatif_layer)
        .init();
}

/// `path` with `.suffix` appended to the full file name.
fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(suffix);
    PathBuf::from(name)
}

fn open_with_progress(path: &Path, quiet: bool) -> Result<ProgressMonitor<File>> {
    let file = File::open(path).wrap_err_with(|| format!("failed to open {}", path.display()))?;
    let size = file
        .metadata()
        .wrap_err_with(|| format!("failed to read the size of {}", path.display()))?
        .len();
    Ok(ProgressMonitor::new(file, size, quiet))
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    let file =
        File::create(path).wrap_err_with(|| format!("failed to create {}", path.display()))?;
    Ok(BufWriter::new(file))
}

fn compress(input: &Path, output: &Path, freq: &Path, quiet: bool) -> Result<()> {
    info!("compressing {} into {}", input.display(), output.display());
    let source = open_with_progress(input, quiet)?;
    let summary = ruhuff::encode_stream(source, create(output)?, create(freq)?)
        .wrap_err_with(|| format!("failed to compress {}", input.display()))?;
    debug!(
        "{} distinct symbols, {} code bits, frequency file is {} bytes",
        summary.distinct_symbols, summary.packed_bits, summary.frequency_file_len
    );

    if !quiet {
        println!(
            "{} {} -> {} ({}, frequency file {})",
            style("compressed").green().bold(),
            summary.input_len,
            summary.packed_len,
            ratio(summary.packed_len, summary.input_len),
            freq.display()
        );
    }
    Ok(())
}

fn decompress(input: &Path, output: &Path, freq: &Path, quiet: bool) -> Result<()> {
    info!("decompressing {} into {}", input.display(), output.display());
    let source = open_with_progress(input, quiet)?;
    let freq_file =
        File::open(freq).wrap_err_with(|| format!("failed to open {}", freq.display()))?;
    let summary = ruhuff::decode_stream(source, freq_file, create(output)?)
        .wrap_err_with(|| format!("failed to decompress {}", input.display()))?;

    if !quiet {
        println!(
            "{} {} -> {}",
            style("decompressed").green().bold(),
            summary.packed_len,
            summary.output_len
        );
    }
    Ok(())
}

fn inspect(freq: &Path) -> Result<()> {
    let raw = std::fs::read(freq).wrap_err_with(|| format!("failed to read {}", freq.display()))?;
    let file = FrequencyFile::parse_bytes(&raw)
        .wrap_err_with(|| format!("{} is not a valid frequency file", freq.display()))?;

    match write_table(&file, &mut io::stdout().lock()) {
        // the reader went away, e.g. piped into `head`
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        result => result.wrap_err("failed to write to stdout"),
    }
}

fn write_table(file: &FrequencyFile, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{} {}", style("symbols encoded:").bold(), file.total)?;
    writeln!(out, "{} {}", style("distinct symbols:").bold(), file.table.len())?;
    writeln!(out, "{} {}", style("longest code:").bold(), file.table.max_code_len())?;
    for (symbol, code) in file.table.iter() {
        let shown = if symbol.is_ascii_graphic() {
            format!("{:?}", symbol as char)
        } else {
            String::new()
        };
        writeln!(out, "{:>3} {:>5} {:>3} {}", symbol, shown, code.len(), code)?;
    }
    out.flush()
}

/// Compress and decompress `input` next to itself and compare the result,
/// leaving all artifacts behind for inspection.
fn roundtrip(input: &Path, freq: &Path) -> Result<()> {
    let packed = with_suffix(input, "enc");
    let restored = with_suffix(input, "dec");

    let encoded = ruhuff::encode(input, &packed, freq)
        .wrap_err_with(|| format!("failed to compress {}", input.display()))?;
    let decoded = ruhuff::decode(&packed, &restored, freq)
        .wrap_err_with(|| format!("failed to decompress {}", packed.display()))?;

    let original = std::fs::read(input)?;
    let copy = std::fs::read(&restored)?;
    ensure!(
        original == copy,
        "{} does not match {} after a round trip",
        restored.display(),
        input.display()
    );

    println!(
        "{} {} -> {} -> {} ({})",
        style("ok").green().bold(),
        encoded.input_len,
        encoded.packed_len,
        decoded.output_len,
        ratio(encoded.packed_len, encoded.input_len)
    );
    Ok(())
}

fn ratio(packed: u64, original: u64) -> String {
    if original == 0 {
        return "empty input".to_owned();
    }
    format!("{:.2}%", packed as f64 / original as f64 * 100.0)
}
