use std::io::BufRead as _;
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Instant;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;

use legibility::{
    BUILTIN_CORPUS, Command, CpuRendererOpts, CpuTextRenderer, EngineConfig, EvalSession,
    FontValidator, Frame, LineId, LineView, PngPresenter, Presenter, Raster, RenderSource,
    SourcePool, TextRenderer, Validity, blur, export_lines, list_candidate_sources, load_corpus,
    units_from_text,
};

#[derive(Parser, Debug)]
#[command(name = "legibility", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Discover fonts and print each validation verdict.
    Validate(ValidateArgs),
    /// Render one blurred sample to a PNG.
    Preview(PreviewArgs),
    /// Run a headless evaluation session driven by stdin commands.
    Run(RunArgs),
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Font directory to scan (repeatable). Defaults to the system font folders.
    #[arg(long = "font-dir")]
    font_dirs: Vec<PathBuf>,
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    /// Font file.
    #[arg(long)]
    font: PathBuf,

    /// Sample text.
    #[arg(long)]
    text: String,

    /// Blur amount; 0 is sharp.
    #[arg(long, default_value_t = 0.0)]
    clarity: f64,

    /// Font size in pixels.
    #[arg(long, default_value_t = 40)]
    size: u32,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Engine config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Font directory to scan (repeatable); replaces the configured list.
    #[arg(long = "font-dir")]
    font_dirs: Vec<PathBuf>,

    /// Plain-text corpus file.
    #[arg(long)]
    corpus: Option<PathBuf>,

    /// Number of lines shown at once.
    #[arg(long)]
    lines: Option<usize>,

    /// PNG rewritten with every rendered frame.
    #[arg(long)]
    frame: Option<PathBuf>,

    /// Write the session record as JSON on exit.
    #[arg(long)]
    report: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Validate(args) => cmd_validate(args),
        Cmd::Preview(args) => cmd_preview(args),
        Cmd::Run(args) => cmd_run(args),
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "legibility=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn renderer_for(cfg: &EngineConfig) -> CpuTextRenderer {
    CpuTextRenderer::new(CpuRendererOpts {
        background_rgba: cfg.validator.background_rgba,
        ..CpuRendererOpts::default()
    })
}

fn build_pool(cfg: &EngineConfig) -> anyhow::Result<SourcePool> {
    let candidates = list_candidate_sources(&cfg.font_dirs);
    let validator = FontValidator::new(cfg.validator.clone())?;
    let pool = SourcePool::build(candidates, &validator, || renderer_for(cfg))?;
    Ok(pool)
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let mut cfg = EngineConfig::default();
    if !args.font_dirs.is_empty() {
        cfg.font_dirs = args.font_dirs;
    }
    cfg.validate()?;

    let pool = build_pool(&cfg)?;
    for source in pool.sources() {
        println!("ok       {}  {}", source.name(), source.path().display());
    }
    for source in pool.rejected() {
        if let Validity::Invalid(reason) = source.validity() {
            println!("rejected {}  {}: {reason}", source.name(), source.path().display());
        }
    }
    println!(
        "{} working, {} rejected",
        pool.len(),
        pool.rejected().len()
    );
    Ok(())
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    let source = RenderSource::new(&args.font);
    let mut renderer = CpuTextRenderer::default();
    let glyphs = renderer.render(&args.text, &source, args.size)?;

    let pad = args.size;
    let mut canvas = Raster::filled(
        glyphs.width() + 2 * pad,
        glyphs.height() + 2 * pad,
        legibility::WHITE,
    );
    canvas.blit_centered(&glyphs);
    let frame = Frame {
        raster: blur(&canvas, args.clarity)?,
        lines: vec![LineView {
            id: LineId(0),
            source: source.name().to_string(),
            clarity: args.clarity,
            frozen: false,
            content: args.text,
        }],
    };
    PngPresenter::new(&args.out).present(&frame)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let mut cfg = match &args.config {
        Some(path) => EngineConfig::from_path(path)?,
        None => EngineConfig::default(),
    };
    if !args.font_dirs.is_empty() {
        cfg.font_dirs = args.font_dirs;
    }
    if args.corpus.is_some() {
        cfg.corpus_path = args.corpus;
    }
    if let Some(lines) = args.lines {
        cfg.session.lines = lines;
    }
    cfg.validate()?;

    let pool = build_pool(&cfg)?;
    let raw = match &cfg.corpus_path {
        Some(path) => load_corpus(path)?,
        None => BUILTIN_CORPUS.to_string(),
    };
    let units = units_from_text(&raw, cfg.session.min_unit_tokens)?;
    let renderer = renderer_for(&cfg);
    let mut session = EvalSession::new(cfg.session.clone(), pool, units, renderer, Instant::now())?;

    let mut presenter = args.frame.map(PngPresenter::new);
    show(&mut presenter, &session.render_frame());

    let commands = spawn_stdin_reader();
    loop {
        let wait = session.time_until_tick(Instant::now());
        match commands.recv_timeout(wait) {
            Ok(Command::Quit) | Err(mpsc::RecvTimeoutError::Disconnected) => break,
            Ok(Command::Reset) => {
                session.reset(Instant::now())?;
                show(&mut presenter, &session.render_frame());
            }
            Ok(Command::Input(event)) => {
                if !session.apply(event, Instant::now()).is_empty() {
                    show(&mut presenter, &session.render_frame());
                }
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {}
        }
        if let Some(frame) = session.poll(Instant::now()) {
            show(&mut presenter, &frame);
        }
    }

    for line in export_lines(session.recorder().ranked_view()) {
        println!("{line}");
    }
    if let Some(path) = &args.report {
        let json = session.recorder().to_json()?;
        std::fs::write(path, json)
            .with_context(|| format!("write report '{}'", path.display()))?;
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}

fn show(presenter: &mut Option<PngPresenter>, frame: &Frame) {
    if let Some(p) = presenter
        && let Err(e) = p.present(frame)
    {
        tracing::warn!(error = %e, "could not present frame");
    }
}

/// Parse stdin lines on a helper thread; the session itself never leaves the main thread.
fn spawn_stdin_reader() -> mpsc::Receiver<Command> {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if line.trim().is_empty() {
                continue;
            }
            match line.parse::<Command>() {
                Ok(cmd) => {
                    if tx.send(cmd).is_err() {
                        break;
                    }
                }
                Err(e) => tracing::warn!(input = %line.trim(), error = %e, "ignored input"),
            }
        }
    });
    rx
}
