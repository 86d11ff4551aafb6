//! procmetrics - one-shot dump of host metrics read from /proc.

use std::path::PathBuf;

use clap::Parser;
use tracing::{Level, debug, error};
use tracing_subscriber::EnvFilter;

use procmetrics_core::reader::{MetricsReader, PasswdUsers, ProcPaths, RealFs, TickRate};
use procmetrics_core::snapshot::HostSnapshot;

/// Prints host metrics read from the proc filesystem.
#[derive(Parser, Debug)]
#[command(name = "procmetrics", about = "Point-in-time host metrics from /proc", version)]
struct Args {
    /// Rebase /proc and /etc under this directory (fixtures, containers).
    #[arg(long, value_name = "DIR")]
    root: Option<PathBuf>,

    /// Path to /proc filesystem.
    #[arg(long, value_name = "PATH")]
    proc_path: Option<PathBuf>,

    /// Path to the os-release file.
    #[arg(long, value_name = "PATH")]
    os_release: Option<PathBuf>,

    /// Path to the passwd file used for user names.
    #[arg(long, value_name = "PATH")]
    passwd: Option<PathBuf>,

    /// Include per-process details for this pid (repeatable).
    #[arg(short, long = "pid", value_name = "PID")]
    pids: Vec<u32>,

    /// Include per-process details for every pid.
    #[arg(long, conflicts_with = "pids")]
    all_pids: bool,

    /// Fixed clock ticks per second instead of asking the host.
    #[arg(long, value_name = "HZ", value_parser = clap::value_parser!(u64).range(1..))]
    clock_ticks: Option<u64>,

    /// Output as JSON.
    #[arg(long)]
    json: bool,

    /// Increase logging verbosity (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only show errors.
    #[arg(short, long)]
    quiet: bool,
}

impl Args {
    /// Resolves the path flags: `--root` first, then individual overrides.
    fn paths(&self) -> ProcPaths {
        let mut paths = match &self.root {
            Some(root) => ProcPaths::under(root),
            None => ProcPaths::default(),
        };
        if let Some(proc_path) = &self.proc_path {
            paths.proc_root = proc_path.clone();
        }
        if let Some(os_release) = &self.os_release {
            paths.os_release = os_release.clone();
        }
        if let Some(passwd) = &self.passwd {
            paths.passwd = passwd.clone();
        }
        paths
    }

    fn tick_rate(&self) -> TickRate {
        self.clock_ticks.map(TickRate::Fixed).unwrap_or_default()
    }
}

/// Initializes the tracing subscriber. Default level is INFO; -q shows errors only.
fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let mut filter = EnvFilter::from_default_env();
    for target in ["procmetrics", "procmetrics_core"] {
        if let Ok(directive) = format!("{}={}", target, level).parse() {
            filter = filter.add_directive(directive);
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn print_text(snapshot: &HostSnapshot) {
    println!("OS:               {}", snapshot.os_name);
    println!("Kernel:           {}", snapshot.kernel_version);
    println!("Memory used:      {} kB", snapshot.memory_used_kb);
    println!("Uptime:           {} s", snapshot.uptime_seconds);
    println!("Clock ticks:      {} Hz", snapshot.ticks_per_second);
    println!(
        "CPU jiffies:      active {} / idle {} / total {}",
        snapshot.active_jiffies, snapshot.idle_jiffies, snapshot.total_jiffies
    );
    println!(
        "Processes:        {} forked, {} running, {} present",
        snapshot.total_processes,
        snapshot.running_processes,
        snapshot.pids.len()
    );

    if snapshot.processes.is_empty() {
        return;
    }

    println!();
    println!(
        "{:>7} {:<12} {:>10} {:>10} {:>10}  COMMAND",
        "PID", "USER", "RAM(kB)", "CPU(s)", "UP(s)"
    );
    for p in &snapshot.processes {
        let user = p
            .user
            .clone()
            .or_else(|| p.uid.map(|uid| uid.to_string()))
            .unwrap_or_default();
        println!(
            "{:>7} {:<12} {:>10} {:>10} {:>10}  {}",
            p.pid, user, p.ram_kb, p.active_seconds, p.uptime_seconds, p.command
        );
    }
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose, args.quiet);

    let paths = args.paths();
    debug!(
        "Config: proc={}, os_release={}, passwd={}",
        paths.proc_root.display(),
        paths.os_release.display(),
        paths.passwd.display()
    );

    let reader = MetricsReader::new(RealFs::new(), paths).with_tick_rate(args.tick_rate());
    let users = PasswdUsers::load(reader.fs(), &reader.paths().passwd);

    let detail_pids = if args.all_pids {
        reader.pids()
    } else {
        args.pids.clone()
    };
    let snapshot = HostSnapshot::collect(&reader, &users, &detail_pids);

    if args.json {
        match serde_json::to_string_pretty(&snapshot) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                error!("Failed to serialize snapshot: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        print_text(&snapshot);
    }
}
