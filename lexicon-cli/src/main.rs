use anyhow::{bail, Context};
use lexicon::{load_wordlist, save_csv, Lexicon, Loader, Query};
use std::path::PathBuf;
use structopt::StructOpt;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Debug, StructOpt)]
#[structopt(name = "lexicon")]
struct Opt {
    /// Primary (CSW) wordlist file
    #[structopt(long, parse(from_os_str))]
    csw: Option<PathBuf>,

    /// Secondary (NWL) wordlist file
    #[structopt(long, parse(from_os_str))]
    nwl: Option<PathBuf>,

    /// Previously merged lexicon, as CSV
    #[structopt(long, parse(from_os_str), conflicts_with_all = &["csw", "nwl"])]
    csv: Option<PathBuf>,

    /// Save the loaded lexicon (before matching) as CSV
    #[structopt(long, parse(from_os_str))]
    save: Option<PathBuf>,

    /// Compute point values
    #[structopt(short, long)]
    points: bool,

    /// Match the pattern as a regular expression
    #[structopt(short, long)]
    regex: bool,

    /// Columns to display, comma separated
    #[structopt(short, long, use_delimiter = true, number_of_values = 1)]
    columns: Vec<String>,

    /// Number of results to show
    #[structopt(short = "n", long)]
    count: Option<usize>,

    /// `_` marks a fixed-position pattern, anything else is a rack with `?` for blanks
    #[structopt(name = "pattern")]
    pattern: String,
}

fn load(opt: &Opt) -> anyhow::Result<Lexicon> {
    let mut loader = Loader::new();
    if let Some(path) = &opt.csv {
        loader.load_csv(path);
    } else {
        match (&opt.csw, &opt.nwl) {
            (Some(csw), Some(nwl)) => {
                loader
                    .load_merged(csw, nwl)
                    .context("failed to merge lexicons")?;
            }
            (Some(path), None) | (None, Some(path)) => {
                return load_wordlist(path)
                    .with_context(|| format!("failed to load wordlist {}", path.display()));
            }
            (None, None) => bail!("no lexicon given: use --csv, or --csw and/or --nwl"),
        }
    }
    loader.data.take().context("failed to load lexicon")
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lexicon=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let opt = Opt::from_args();

    let mut lexicon = load(&opt)?;
    if opt.points {
        lexicon.compute_points();
    }
    if let Some(path) = &opt.save {
        save_csv(&lexicon, path).with_context(|| format!("failed to save {}", path.display()))?;
    }

    let mut results = if opt.regex {
        lexicon.filter_query(&Query::regex(&opt.pattern)?)
    } else {
        let (results, diagnostics) = lexicon.search_with_diagnostics(&opt.pattern);
        for diagnostic in diagnostics {
            warn!("{}", diagnostic);
        }
        results
    };
    if !opt.columns.is_empty() {
        results.set_display_projection(opt.columns.iter().cloned());
    }

    let rendered = results.render()?;
    if !results.is_empty() {
        let rows = opt.count.map(|n| n + 1).unwrap_or(usize::MAX);
        for line in rendered.lines().take(rows) {
            println!("{}", line);
        }
    }
    println!("# matches: {}", results.len());
    Ok(())
}
