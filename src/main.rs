//! CLI entry point. Argument parsing is hand-rolled over
//! `std::env::args()`, matching the `nvmctl` binary
//! (`src/bin/nvmctl.rs`) rather than pulling in a parsing crate that
//! binary doesn't itself use.

use std::path::PathBuf;
use std::process::ExitCode;

use cpu_sched_sim::clock::DefaultBurstModel;
use cpu_sched_sim::config::{self, Overrides};
use cpu_sched_sim::dispatcher::Dispatcher;
use cpu_sched_sim::gantt::{render_gantt, ProcessOccupancy};
use cpu_sched_sim::loader;
use cpu_sched_sim::reporter::Summary;
use cpu_sched_sim::scheduler::Scheduler;

struct Args {
    programs: Vec<String>,
    priorities: Vec<Option<u32>>,
    scheduler: Option<String>,
    quantum: Option<i64>,
    time_slice: Option<i64>,
    visualize: bool,
    config_path: Option<PathBuf>,
    seed: Option<u64>,
    help: bool,
}

fn parse_args(argv: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut argv = argv.peekable();
    let mut args = Args {
        programs: Vec::new(),
        priorities: Vec::new(),
        scheduler: None,
        quantum: None,
        time_slice: None,
        visualize: false,
        config_path: None,
        seed: None,
        help: false,
    };

    while let Some(arg) = argv.next() {
        match arg.as_str() {
            "-h" | "--help" => args.help = true,
            "-v" | "--visualize" => args.visualize = true,
            "-s" | "--scheduler" => {
                args.scheduler = Some(argv.next().ok_or("--scheduler requires a value")?);
            }
            "-q" | "--quantum" => {
                let v = argv.next().ok_or("--quantum requires a value")?;
                args.quantum = Some(v.parse().map_err(|_| format!("invalid --quantum value `{v}`"))?);
            }
            "-t" | "--time-slice" => {
                let v = argv.next().ok_or("--time-slice requires a value")?;
                args.time_slice = Some(v.parse().map_err(|_| format!("invalid --time-slice value `{v}`"))?);
            }
            "-p" | "--priorities" => {
                if argv.peek().map(|v| v.parse::<u32>().is_err()).unwrap_or(true) {
                    return Err("--priorities requires at least one value".to_string());
                }
                while let Some(v) = argv.peek() {
                    match v.parse::<u32>() {
                        Ok(n) => {
                            args.priorities.push(Some(n));
                            argv.next();
                        }
                        Err(_) => break,
                    }
                }
            }
            "--config" => {
                let v = argv.next().ok_or("--config requires a value")?;
                args.config_path = Some(PathBuf::from(v));
            }
            "--seed" => {
                let v = argv.next().ok_or("--seed requires a value")?;
                args.seed = Some(v.parse().map_err(|_| format!("invalid --seed value `{v}`"))?);
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(format!("unrecognized flag `{other}`"));
            }
            positional => args.programs.push(positional.to_string()),
        }
    }

    Ok(args)
}

fn print_usage() {
    println!(
        "usage: cpu-sched-sim [OPTIONS] PROGRAM [PROGRAM...]\n\n\
         Options:\n\
         \x20\x20-s, --scheduler <NAME>    fcfs|sjf|priority|round_robin|srtf|mlfq|edf|fair (default fcfs)\n\
         \x20\x20-q, --quantum <N>         Round-Robin quantum, >=1 (default 5)\n\
         \x20\x20-t, --time-slice <N>      clock granularity, >=1 (default 1)\n\
         \x20\x20-v, --visualize           render a Gantt chart if any process terminated\n\
         \x20\x20-p, --priorities <N...>   space-separated priorities, one per positional program\n\
         \x20\x20    --config <FILE>       load defaults from a TOML file\n\
         \x20\x20    --seed <N>            RNG seed (default 0)\n\
         \x20\x20-h, --help                show this message"
    );
}

fn run() -> Result<(), String> {
    env_logger::init();

    let args = parse_args(std::env::args().skip(1))?;
    if args.help {
        print_usage();
        return Ok(());
    }

    let priorities = {
        let mut p = args.priorities.clone();
        p.resize(args.programs.len(), None);
        p
    };

    let cfg = config::assemble(Overrides {
        scheduler: args.scheduler,
        quantum: args.quantum,
        time_slice: args.time_slice,
        visualize: args.visualize,
        config_path: args.config_path,
        programs: args.programs,
        priorities,
        seed: args.seed.unwrap_or(0),
    })
    .map_err(|e| e.to_string())?;

    let scheduler = Scheduler::new(cfg.scheduler, cfg.quantum);
    let mut dispatcher = Dispatcher::new(scheduler, cfg.time_slice, cfg.seed, Box::new(DefaultBurstModel));

    for (identifier, priority) in cfg.programs.iter().zip(cfg.priorities.iter()) {
        match loader::load(identifier) {
            Ok((name, task)) => {
                dispatcher.register(name, task, *priority);
            }
            Err(e) => {
                log::warn!("skipping `{identifier}`: {e}");
            }
        }
    }

    dispatcher.run();

    let summary = Summary::build(
        dispatcher.scheduler_name(),
        dispatcher.clock(),
        dispatcher.context_switches(),
        dispatcher.terminated_order(),
        dispatcher.terminated(),
    );
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    let _ = summary.print_table(&mut handle);

    if cfg.visualize && !dispatcher.terminated_order().is_empty() {
        let processes: Vec<ProcessOccupancy> = dispatcher
            .terminated_order()
            .iter()
            .enumerate()
            .filter_map(|(idx, pid)| {
                dispatcher.terminated().get(pid).map(|r| ProcessOccupancy {
                    pid: pid.0,
                    name: r.name.clone(),
                    priority: r.priority,
                    color_index: idx,
                    intervals: r.run_history.clone(),
                })
            })
            .collect();
        match render_gantt(dispatcher.scheduler_name(), dispatcher.clock(), &processes) {
            Ok(path) => log::info!("wrote {}", path.display()),
            Err(e) => log::warn!("gantt render failed: {e}"),
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags_and_positionals() {
        let argv = vec![
            "hello_world",
            "-s",
            "round_robin",
            "-q",
            "3",
            "short_task",
            "-v",
            "-p",
            "1",
            "2",
        ]
        .into_iter()
        .map(String::from);
        let args = parse_args(argv).unwrap();
        assert_eq!(args.programs, vec!["hello_world", "short_task"]);
        assert_eq!(args.scheduler, Some("round_robin".to_string()));
        assert_eq!(args.quantum, Some(3));
        assert!(args.visualize);
        assert_eq!(args.priorities, vec![Some(1), Some(2)]);
    }

    #[test]
    fn priorities_stop_at_the_next_non_numeric_token() {
        let argv = vec!["-p", "1", "2", "3", "hello_world", "short_task"]
            .into_iter()
            .map(String::from);
        let args = parse_args(argv).unwrap();
        assert_eq!(args.priorities, vec![Some(1), Some(2), Some(3)]);
        assert_eq!(args.programs, vec!["hello_world", "short_task"]);
    }

    #[test]
    fn priorities_requires_at_least_one_value() {
        let argv = vec!["-p".to_string(), "hello_world".to_string()].into_iter();
        assert!(parse_args(argv).is_err());
    }

    #[test]
    fn rejects_unknown_flag() {
        let argv = vec!["--bogus".to_string()].into_iter();
        assert!(parse_args(argv).is_err());
    }

    #[test]
    fn missing_flag_value_is_an_error() {
        let argv = vec!["-s".to_string()].into_iter();
        assert!(parse_args(argv).is_err());
    }
}
