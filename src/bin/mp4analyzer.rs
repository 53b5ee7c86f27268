use anyhow::Context;
use clap::{ArgAction, Parser, ValueEnum};
use mp4analyzer::{
    BoxRef, analyze_file,
    render::{Level, RenderOptions, render_tree},
    select::select,
};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about = "MP4/ISOBMFF box structure analyzer")]
struct Args {
    /// MP4/ISOBMFF file path
    #[arg(short, long)]
    path: PathBuf,

    /// Only print boxes matching a 4CC (e.g. trun) or a dotted path (e.g. moof.traf[0].tfhd)
    #[arg(short, long)]
    find: Option<String>,

    /// Level of detail
    #[arg(short, long, value_enum, default_value_t = LevelArg::Middle)]
    level: LevelArg,

    /// Diagnostic value, echoed to the debug log (decimal, 0x hex or 0-prefixed octal)
    #[arg(short, long, default_value = "0", value_parser = parse_long, allow_negative_numbers = true)]
    temp: i64,

    /// Limit nesting depth of the text tree
    #[arg(long, default_value_t = 64)]
    max_depth: usize,

    /// Emit JSON instead of a human-readable tree
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,

    /// Log parsing progress (RUST_LOG overrides)
    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LevelArg {
    Low,
    Middle,
    High,
}

impl From<LevelArg> for Level {
    fn from(l: LevelArg) -> Self {
        match l {
            LevelArg::Low => Level::Low,
            LevelArg::Middle => Level::Middle,
            LevelArg::High => Level::High,
        }
    }
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        // --help / --version
        Err(e) if !e.use_stderr() => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(1);
        }
    };

    init_logging(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "mp4analyzer=debug" } else { "mp4analyzer=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(args: &Args) -> anyhow::Result<()> {
    debug!(
        path = %args.path.display(),
        find = ?args.find,
        level = ?args.level,
        temp = args.temp,
        "settings"
    );

    let tree = analyze_file(&args.path)
        .with_context(|| format!("analyzing {}", args.path.display()))?;
    if tree.truncated {
        warn!("file ends inside a declared box range; the tree stops there");
    }

    let targets: Vec<&BoxRef> = match &args.find {
        Some(sel) => select(&tree.boxes, sel),
        None => tree.boxes.iter().collect(),
    };
    if let Some(sel) = &args.find {
        if targets.is_empty() {
            warn!(selector = %sel, "no box matches");
        }
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();

    // JSON mode: the whole tree, or just the selected subtrees
    if args.json {
        if args.find.is_some() {
            serde_json::to_writer_pretty(&mut out, &targets)?;
        } else {
            serde_json::to_writer_pretty(&mut out, &tree)?;
        }
        writeln!(out)?;
        return Ok(());
    }

    let opts = RenderOptions { level: args.level.into(), max_depth: args.max_depth };
    render_tree(&mut out, targets, &opts)?;
    Ok(())
}

/// Parse an integer the way C's `strtol` does with base 0.
///
/// Leading whitespace, one optional sign, then `0x` hex, `0` octal or
/// decimal digits. Nothing may follow the digits. Out-of-range values are
/// rejected rather than clamped.
fn parse_long(s: &str) -> Result<i64, String> {
    let bad = || format!("'{s}' is not an integer");

    let t = s.trim_start_matches(|c: char| c.is_ascii_whitespace());
    let (neg, digits) = match t.as_bytes().first() {
        Some(b'-') => (true, &t[1..]),
        Some(b'+') => (false, &t[1..]),
        _ => (false, t),
    };
    let (radix, body) = if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        (16, hex)
    } else if digits.len() > 1 && digits.starts_with('0') {
        (8, &digits[1..])
    } else {
        (10, digits)
    };

    // from_str_radix would take a second sign here
    if body.is_empty() || !body.chars().all(|c| c.is_digit(radix)) {
        return Err(bad());
    }

    let magnitude = u64::from_str_radix(body, radix).map_err(|_| bad())?;
    if neg {
        0i64.checked_sub_unsigned(magnitude).ok_or_else(bad)
    } else {
        i64::try_from(magnitude).map_err(|_| bad())
    }
}
