use std::env;
use std::io::{self, Read};
use std::path::Path;

use ingest::{TelemetryStats, parse_telemetry, read_telemetry};

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("usage: telemetry_stats <path|->");
        std::process::exit(2);
    }

    let path = &args[1];
    let data = if path == "-" {
        let mut data = String::new();
        io::stdin().read_to_string(&mut data).unwrap_or_else(|err| {
            eprintln!("failed to read stdin: {}", err);
            std::process::exit(1);
        });
        data
    } else {
        read_telemetry(Path::new(path)).unwrap_or_else(|err| {
            eprintln!("failed to read {}: {}", path, err);
            std::process::exit(1);
        })
    };

    let record = parse_telemetry(&data).unwrap_or_else(|err| {
        eprintln!("{}", err);
        std::process::exit(3);
    });
    let stats = TelemetryStats::from_record(&record);

    println!("events {}", stats.events);
    println!("keystrokes {}", stats.keystrokes);
    println!("distinct_apps {}", stats.distinct_apps);
    println!("flow_score_estimate {:.1}", stats.flow_score_estimate);
    if !stats.top_window.is_empty() {
        println!("top_window {}", stats.top_window);
    }
}
