use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufReader, BufWriter, Write as _},
    path::{Path, PathBuf},
    process::ExitCode,
    time::Duration,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "scrollphase", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sweep a page config through a scroll range and print presentation snapshots as JSON lines.
    Simulate(SimulateArgs),
    /// Validate and submit a contact message, printing the response JSON.
    Contact(ContactArgs),
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Page config JSON.
    #[arg(long)]
    config: PathBuf,

    /// Layout JSON mapping element ids to document rects.
    #[arg(long)]
    layout: PathBuf,

    /// Override the config's viewport height.
    #[arg(long)]
    viewport_height: Option<f64>,

    /// First scroll offset.
    #[arg(long, default_value_t = 0.0)]
    from: f64,

    /// Last scroll offset (inclusive).
    #[arg(long)]
    to: f64,

    /// Scroll distance between snapshots.
    #[arg(long, default_value_t = 100.0)]
    step: f64,

    /// Simulated time between snapshots.
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,
}

#[derive(Parser, Debug)]
struct ContactArgs {
    /// Sender name.
    #[arg(long)]
    name: String,

    /// Reply address.
    #[arg(long)]
    email: String,

    /// Message body.
    #[arg(long)]
    message: String,

    /// Simulated delivery latency.
    #[arg(long, default_value_t = 1000)]
    latency_ms: u64,
}

#[derive(serde::Serialize)]
struct Snapshot<'a> {
    scroll: f64,
    time_ms: u64,
    presentation: &'a scrollphase::Presentation,
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Simulate(args) => cmd_simulate(args),
        Command::Contact(args) => cmd_contact(args),
    }
}

fn read_layout(path: &Path) -> anyhow::Result<BTreeMap<scrollphase::ElementId, scrollphase::Rect>> {
    let f = File::open(path).with_context(|| format!("open layout '{}'", path.display()))?;
    let layout = serde_json::from_reader(BufReader::new(f)).with_context(|| "parse layout JSON")?;
    Ok(layout)
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<ExitCode> {
    if !(args.step.is_finite() && args.step > 0.0) {
        anyhow::bail!("--step must be a positive number, got {}", args.step);
    }
    if !(args.from.is_finite() && args.to.is_finite()) {
        anyhow::bail!("--from and --to must be finite");
    }

    let mut page = scrollphase::PageConfig::from_path(&args.config)
        .with_context(|| format!("load page config '{}'", args.config.display()))?;
    if let Some(h) = args.viewport_height {
        page.viewport = scrollphase::Viewport::new(page.viewport.width, h)?;
    }
    let layout = read_layout(&args.layout)?;

    let mut engine = page.engine();
    let scope = page.mount(&mut engine, &layout)?;

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let forward = args.to >= args.from;
    let mut scroll = args.from;
    let mut now_ms = 0;
    loop {
        engine.on_scroll(scroll, now_ms);
        engine.on_frame(now_ms, &layout);
        let snap = Snapshot {
            scroll,
            time_ms: now_ms,
            presentation: engine.presentation(),
        };
        serde_json::to_writer(&mut out, &snap).with_context(|| "write snapshot")?;
        writeln!(out)?;

        if scroll == args.to {
            break;
        }
        scroll = if forward {
            (scroll + args.step).min(args.to)
        } else {
            (scroll - args.step).max(args.to)
        };
        now_ms += args.frame_ms;
    }
    out.flush()?;

    tracing::debug!(bindings = engine.binding_count(), "simulation finished");
    engine.revert(scope);
    Ok(ExitCode::SUCCESS)
}

fn cmd_contact(args: ContactArgs) -> anyhow::Result<ExitCode> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .with_context(|| "start tokio runtime")?;

    let delivery = scrollphase::SimulatedDelivery::new(Duration::from_millis(args.latency_ms));
    let submission = scrollphase::ContactSubmission::new(args.name, args.email, args.message);
    let res = rt.block_on(scrollphase::submit_contact(&delivery, submission));

    println!("{}", serde_json::to_string(&res)?);
    Ok(if res.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
