//! Twinfit CLI
//!
//! Usage:
//!   twinfit --shape pear --outfit salwar-kameez        # Terminal summary
//!   twinfit --ratios 0.40,0.30,0.46,0.50 --json         # Render as JSON
//!   twinfit --shape apple --adjust-waist -5             # Slider deltas
//!   twinfit --serve --config twinfit.toml               # HTTP API server

use std::path::PathBuf;
use std::process;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use twinfit::core::{run_server, StylingSession, TwinConfig, TwinGeometry, TwinRender};
use twinfit::types::{
    Adjustments, BodyRatios, BodyShape, LayerKind, NecklineType, OutfitDesign, OutfitType,
    SleeveLength, TopLength,
};
use twinfit::VERSION;

#[derive(Parser, Debug)]
#[command(
    name = "twinfit",
    version = VERSION,
    about = "Twinfit - parametric digital twin for outfit previews",
    long_about = "Twinfit derives a 2D body silhouette from shoulder/waist/hip ratios\n\
                  and overlays garment construction paths for the chosen outfit.\n\n\
                  Modes:\n  \
                  (default)  Print a render summary\n  \
                  --json     Print the full render as JSON\n  \
                  --serve    HTTP API server mode"
)]
struct Args {
    /// Body-shape archetype supplying default ratios
    #[arg(long, value_enum, default_value = "hourglass")]
    shape: BodyShape,

    /// Explicit ratios "shoulder,waist,hip,vertical" (overrides --shape)
    #[arg(long, value_parser = parse_ratios)]
    ratios: Option<BodyRatios>,

    /// Outfit category
    #[arg(long, value_enum, default_value = "saree-blouse")]
    outfit: OutfitType,

    /// Neckline of the top
    #[arg(long, value_enum)]
    neckline: Option<NecklineType>,

    /// Sleeve length of the top
    #[arg(long, value_enum)]
    sleeve: Option<SleeveLength>,

    /// Length of the top
    #[arg(long, value_enum)]
    length: Option<TopLength>,

    /// Shoulder slider, percent
    #[arg(long, allow_hyphen_values = true)]
    adjust_shoulder: Option<f64>,

    /// Waist slider, percent
    #[arg(long, allow_hyphen_values = true)]
    adjust_waist: Option<f64>,

    /// Hip slider, percent
    #[arg(long, allow_hyphen_values = true)]
    adjust_hip: Option<f64>,

    /// Height slider, percent
    #[arg(long, allow_hyphen_values = true)]
    adjust_height: Option<f64>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Run as HTTP API server
    #[arg(short, long)]
    serve: bool,

    /// Server address (overrides config)
    #[arg(long)]
    addr: Option<String>,

    /// TOML config file
    #[arg(long, default_value = "twinfit.toml")]
    config: PathBuf,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,
}

fn parse_ratios(s: &str) -> Result<BodyRatios, String> {
    let values = s
        .split(',')
        .map(|v| v.trim().parse::<f64>().map_err(|e| format!("invalid ratio {:?}: {}", v, e)))
        .collect::<Result<Vec<_>, _>>()?;

    match values.as_slice() {
        [shoulder, waist, hip, vertical] => Ok(BodyRatios::new(*shoulder, *waist, *hip, *vertical)),
        _ => Err(format!("expected 4 comma-separated ratios, got {}", values.len())),
    }
}

fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let config = match TwinConfig::load(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Config error: {}", e);
            process::exit(2);
        }
    };
    init_tracing(&config.log.filter);

    if args.no_color {
        colored::control::set_override(false);
    }

    if args.serve {
        let addr = args.addr.clone().unwrap_or_else(|| config.server.addr.clone());
        run_serve(&addr, &config).await;
    } else {
        run_render(&args, &config);
    }
}

/// Build the session from flags and print one render
fn run_render(args: &Args, config: &TwinConfig) {
    let ratios = args.ratios.unwrap_or_else(|| args.shape.default_ratios());

    let mut outfit = OutfitDesign::new(args.outfit);
    if let Some(neckline) = args.neckline {
        outfit.top_design.neckline = neckline;
    }
    if let Some(sleeve) = args.sleeve {
        outfit.top_design.sleeve_length = sleeve;
    }
    if let Some(length) = args.length {
        outfit.top_design.length = length;
    }

    let mut session = StylingSession::new(TwinGeometry::with_canvas(config.canvas), ratios, outfit);
    let render = session.set_adjustments(Adjustments {
        shoulder: args.adjust_shoulder,
        waist: args.adjust_waist,
        hip: args.adjust_hip,
        height: args.adjust_height,
    });

    if args.json {
        match serde_json::to_string_pretty(&render) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Encode error: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    print_header();
    if args.ratios.is_some() {
        println!("{} {}", "Classified shape:".bold(), session.shape().to_string().cyan());
    } else {
        println!("{} {}", "Shape:".bold(), session.shape().to_string().cyan());
    }
    print_render(&session, &render);
}

fn print_header() {
    println!("{}", format!("Twinfit v{}", VERSION).bold());
    println!("{}", "=".repeat(40).dimmed());
}

fn print_render(session: &StylingSession, render: &TwinRender) {
    let r = session.ratios();
    println!(
        "Ratios: shoulder={:.3} waist={:.3} hip={:.3} vertical={:.3}",
        r.shoulder_ratio, r.waist_ratio, r.hip_ratio, r.vertical_balance
    );
    println!("Outfit: {:?}", session.outfit().outfit_type);
    println!();

    let c = &render.coords;
    println!("{}", "Anchors (unit space)".bold());
    for (name, anchor) in [
        ("shoulders", c.shoulders),
        ("bust", c.bust),
        ("waist", c.waist),
        ("hips", c.hips),
    ] {
        println!("  {:<10} y={:.2} width={:.4}", name, anchor.y, anchor.width);
    }
    println!("  {:<10} {:.3}", "height", c.height);
    println!();

    println!("{}", "Silhouette".bold());
    println!("  {}", render.silhouette.to_string().green());
    println!();

    println!("{}", "Overlay".bold());
    println!(
        "  {} segments, {} sub-paths",
        render.overlay.len(),
        render.overlay.subpath_count()
    );
    println!();

    println!("{}", "Construction layers".bold());
    for kind in LayerKind::ORDER {
        let segments = render.layers.get(kind).map(|l| l.path.len()).unwrap_or(0);
        println!("  {:<16} {} segments", format!("{:?}", kind), segments.to_string().yellow());
    }
}

/// Routes printed by `--serve`
const ROUTES: &[(&str, &str, &str)] = &[
    ("GET", "/health", "Health check"),
    ("POST", "/session/new", "Create session"),
    ("GET", "/session/:id", "Session status"),
    ("GET", "/session/:id/render", "Current render"),
    ("POST", "/session/:id/parameter", "Isolated update"),
    ("POST", "/session/:id/adjustments", "Slider deltas"),
    ("POST", "/session/:id/body", "Initialize body"),
    ("POST", "/session/:id/body/regenerate", "Always forbidden"),
    ("GET", "/session/:id/history", "Change history"),
    ("WS", "/ws/:id", "Live renders"),
];

/// Run HTTP API server
async fn run_serve(addr: &str, config: &TwinConfig) {
    println!("{}", format!("Twinfit API Server v{}", VERSION).bold());
    for (method, path, summary) in ROUTES {
        println!("  {:<4} {:<32} - {}", method, path, summary);
    }
    println!();

    if let Err(e) = run_server(addr, config.canvas).await {
        eprintln!("{} {}", "Server error:".red(), e);
        process::exit(1);
    }
}
