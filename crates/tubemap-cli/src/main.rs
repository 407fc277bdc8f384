use serde::Serialize;
use std::io::Read;
use tubemap::render::{LayoutOptions, SvgRenderOptions, layout_map, render_svg, sanitize_svg_id};

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Resolve(tubemap::Error),
    Layout(tubemap_render::Error),
    Json(serde_json::Error),
    Config(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Resolve(err) => write!(f, "{err}"),
            CliError::Layout(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::Config(msg) => write!(f, "invalid --config: {msg}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<tubemap::Error> for CliError {
    fn from(value: tubemap::Error) -> Self {
        Self::Resolve(value)
    }
}

impl From<tubemap_render::Error> for CliError {
    fn from(value: tubemap_render::Error) -> Self {
        Self::Layout(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Render,
    Resolve,
    Layout,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    verbose: bool,
    width: Option<f64>,
    height: Option<f64>,
    config: Option<String>,
    diagram_id: Option<String>,
    out: Option<String>,
}

fn usage() -> &'static str {
    "tubemap-cli\n\
\n\
USAGE:\n\
  tubemap-cli [render] [--width <w>] [--height <h>] [--config <path>] [--id <svg-id>] [--out <path>] [--verbose] [<path>|-]\n\
  tubemap-cli resolve [--pretty] [--verbose] [<path>|-]\n\
  tubemap-cli layout [--pretty] [--width <w>] [--height <h>] [--config <path>] [--verbose] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', the JSON map description is read from stdin.\n\
  - resolve prints the bearing-resolved lines and extracted stations as JSON.\n\
  - layout prints display geometry (paths, interchanges, ticks, labels) as JSON.\n\
  - render prints SVG to stdout by default; use --out to write a file.\n\
  - --config reads layout options JSON (width, height, margin, lineWidthMultiplier,\n\
    lineWidthTickRatio); --width/--height override it.\n\
"
}

fn parse_number(raw: Option<&String>) -> Result<f64, CliError> {
    let Some(raw) = raw else {
        return Err(CliError::Usage(usage()));
    };
    let v = raw.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
    if !(v.is_finite() && v > 0.0) {
        return Err(CliError::Usage(usage()));
    }
    Ok(v)
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1).peekable();
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "render" => args.command = Command::Render,
            "resolve" => args.command = Command::Resolve,
            "layout" => args.command = Command::Layout,
            "--pretty" => args.pretty = true,
            "--verbose" | "-v" => args.verbose = true,
            "--width" => args.width = Some(parse_number(it.next())?),
            "--height" => args.height = Some(parse_number(it.next())?),
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(path.clone());
            }
            "--id" => {
                let Some(id) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.diagram_id = Some(id.clone());
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            "-" => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some("-".to_string());
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    Ok(())
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None | Some("-") => {
            print!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn layout_options(args: &Args) -> Result<LayoutOptions, CliError> {
    let mut opts = match args.config.as_deref() {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            LayoutOptions::from_json_str(&text).map_err(|e| CliError::Config(e.to_string()))?
        }
        None => LayoutOptions::default(),
    };
    if let Some(w) = args.width {
        opts.width = w;
    }
    if let Some(h) = args.height {
        opts.height = h;
    }
    Ok(opts)
}

fn run(args: Args) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;
    let map = tubemap::resolve_json(&text)?;

    match args.command {
        Command::Resolve => {
            write_json(&map, args.pretty)?;
            Ok(())
        }
        Command::Layout => {
            let opts = layout_options(&args)?;
            let layout = layout_map(&map, &opts)?;
            write_json(&layout, args.pretty)?;
            Ok(())
        }
        Command::Render => {
            let opts = layout_options(&args)?;
            let layout = layout_map(&map, &opts)?;
            let svg_options = SvgRenderOptions {
                diagram_id: args.diagram_id.as_deref().map(sanitize_svg_id),
                ..Default::default()
            };
            let svg = render_svg(&layout, &svg_options);
            write_text(&svg, args.out.as_deref())?;
            Ok(())
        }
    }
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    init_tracing(args.verbose);

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
