use clap::{ArgAction, Parser};
use log::LevelFilter;
use std::fs;
use std::path::PathBuf;
use std::process;
use tabsynth::{OutputFormat, StringPitch, TablatureRequest, TuningOverride};

#[derive(Parser, Debug)]
#[command(name = "tabsynth", version, about = "Convert pitch events to guitar tablature")]
struct Args {
    /// Request document (.json, or .yaml/.yml)
    request: PathBuf,

    /// Write the tablature here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format: ascii, json or compact (overrides the request)
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Capo position (overrides the request)
    #[arg(long)]
    capo: Option<u8>,

    /// Highest usable fret (overrides the request)
    #[arg(long)]
    max_fret: Option<u8>,

    /// Pitch-matching tolerance in cents (overrides the request)
    #[arg(long)]
    tolerance: Option<f64>,

    /// Tuning preset name, or six comma-separated note names (overrides the request)
    #[arg(long)]
    tuning: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .parse_default_env()
        .init();
}

fn parse_tuning_arg(value: &str) -> TuningOverride {
    if value.contains(',') {
        TuningOverride::Strings(
            value
                .split(',')
                .map(|name| StringPitch::Name(name.trim().to_string()))
                .collect(),
        )
    } else {
        TuningOverride::Preset(value.to_string())
    }
}

fn load_request(args: &Args) -> Result<TablatureRequest, String> {
    let source = fs::read_to_string(&args.request)
        .map_err(|e| format!("Error reading file '{}': {}", args.request.display(), e))?;

    let is_yaml = matches!(
        args.request.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    );
    let mut request = if is_yaml {
        TablatureRequest::from_yaml_str(&source)
    } else {
        TablatureRequest::from_json_str(&source)
    }
    .map_err(|e| format!("error[{}]: {}", e.code(), e))?;

    if let Some(format) = args.format {
        request.output_format = format;
    }
    if let Some(capo) = args.capo {
        request.capo = capo;
    }
    if let Some(max_fret) = args.max_fret {
        request.max_fret = max_fret;
    }
    if let Some(tolerance) = args.tolerance {
        request.tolerance_cents = tolerance;
    }
    if let Some(tuning) = &args.tuning {
        request.tuning = Some(parse_tuning_arg(tuning));
    }
    Ok(request)
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let request = match load_request(&args) {
        Ok(request) => request,
        Err(message) => {
            eprintln!("{}", message);
            process::exit(1);
        }
    };
    log::debug!(
        "loaded {} events from {}",
        request.events.len(),
        args.request.display()
    );

    let response = match request.run() {
        Ok(response) => response,
        Err(e) => {
            if !e.is_caller_error() {
                log::error!("{:?}", e);
            }
            eprintln!("error[{}]: {}", e.code(), e);
            process::exit(1);
        }
    };

    match &args.output {
        Some(path) => {
            if let Err(e) = fs::write(path, &response.tablature) {
                eprintln!("Error writing to '{}': {}", path.display(), e);
                process::exit(1);
            }
            eprintln!("Wrote {} tablature to {}", response.format, path.display());
        }
        None => {
            println!("{}", response.tablature);
        }
    }
}
