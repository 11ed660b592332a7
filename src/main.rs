use std::str::FromStr;

use anyhow::{bail, Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use memgraph::Address;

/// Output format selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Ansi,
    Plain,
    Html,
}

/// Parsed command-line arguments.
///
/// With no positional address the binary scans a built-in sample
/// structure; with one it scans that address in the current process.
#[derive(Debug)]
struct Args {
    format: OutputFormat,
    root: Option<Address>,
    budget: Option<usize>,
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Args> {
    let mut parsed = Args {
        format: OutputFormat::Ansi,
        root: None,
        budget: None,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--ansi" => parsed.format = OutputFormat::Ansi,
            "--plain" => parsed.format = OutputFormat::Plain,
            "--html" => parsed.format = OutputFormat::Html,
            "--budget" => {
                let value = iter.next().context("--budget requires a value")?;
                parsed.budget = Some(
                    value
                        .parse()
                        .with_context(|| format!("invalid node budget: {value}"))?,
                );
            }
            other if other.starts_with('-') => bail!("unknown option: {other}"),
            other => {
                let root = Address::from_str(other)
                    .with_context(|| format!("invalid root address: {other}"))?;
                parsed.root = Some(root);
            }
        }
    }

    Ok(parsed)
}

/// Sample heap structure for the demo scan: a couple of chained
/// allocations with embedded text, so the output shows pointer chasing,
/// provenance tags, and string extraction. Fields are only ever read
/// through the scanner.
#[cfg(target_os = "linux")]
#[allow(dead_code)]
struct Inner {
    label: [u8; 16],
    value: u64,
}

#[cfg(target_os = "linux")]
#[allow(dead_code)]
struct Outer {
    first: Box<Inner>,
    second: Box<Inner>,
    tag: u64,
}

#[cfg(target_os = "linux")]
fn sample() -> Box<Outer> {
    let mut label_a = [0u8; 16];
    label_a[..11].copy_from_slice(b"hello there");
    let mut label_b = [0u8; 16];
    label_b[..9].copy_from_slice(b"memgraph!");

    Box::new(Outer {
        first: Box::new(Inner {
            label: label_a,
            value: 0x1111,
        }),
        second: Box::new(Inner {
            label: label_b,
            value: 0x2222,
        }),
        tag: 0xFEEDFACE,
    })
}

#[cfg(target_os = "linux")]
fn run(args: Args) -> Result<()> {
    use memgraph::config::load_config;
    use memgraph::memory::ProcessMemory;
    use memgraph::render::{AnsiSink, HtmlSink, PlainSink};
    use memgraph::symbols::DlSymbolResolver;
    use memgraph::{Renderer, Traversal};

    let mut config = load_config()?;
    if let Some(budget) = args.budget {
        config = config.with_node_budget(budget);
    }

    let memory = ProcessMemory::current();
    let symbols = DlSymbolResolver;

    // An argv-supplied root is scanned with an unknown extent (probed);
    // the built-in sample's extent is known from its type. The sample box
    // must outlive the scan either way.
    let sample_box;
    let (root, root_size) = match args.root {
        Some(root) => (root, None),
        None => {
            sample_box = sample();
            let root = Address::new(Box::as_ref(&sample_box) as *const Outer as usize);
            (root, Some(std::mem::size_of::<Outer>()))
        }
    };

    info!(%root, ?root_size, "scanning");
    let tree = Traversal::new(&memory, &symbols, config.clone()).run(root, root_size)?;
    info!(nodes = tree.len(), "scan finished");

    let renderer = Renderer::new(&config);
    let stdout = std::io::stdout().lock();
    match args.format {
        OutputFormat::Plain => renderer.render(&tree, &mut PlainSink::new(stdout))?,
        OutputFormat::Html => renderer.render(&tree, &mut HtmlSink::new(stdout))?,
        OutputFormat::Ansi => renderer.render(&tree, &mut AnsiSink::new(stdout))?,
    }

    Ok(())
}

#[cfg(not(target_os = "linux"))]
fn run(_args: Args) -> Result<()> {
    bail!("the memgraph demo binary requires Linux (process_vm_readv)");
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    info!("memgraph v{}", env!("CARGO_PKG_VERSION"));
    run(parse_args(std::env::args().skip(1))?)
}
