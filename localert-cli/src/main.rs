//! Localert CLI - Command-line interface
//!
//! This binary provides a command-line interface to the Localert library.

use std::process;
use std::time::Duration;

use clap::{Parser, Subcommand};
use serde::Deserialize;

use localert::commute::{AlertDistance, CommuteTracker, Destination, LoggingAlarmSink, Stage};
use localert::coord::{great_circle_km, Coordinates};
use localert::logging::{default_log_dir, default_log_file, init_logging};
use localert::position::{PositionError, ScriptedEvent, ScriptedLocationSource};
use localert::resolver::{DestinationResolver, GeminiClient};

#[derive(Parser)]
#[command(name = "localert")]
#[command(version = localert::VERSION)]
#[command(about = "Commute alert engine: distance, destination resolution, and simulation", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Great-circle distance between two points, in kilometers
    Distance {
        #[arg(long)]
        from_lat: f64,
        #[arg(long)]
        from_lon: f64,
        #[arg(long)]
        to_lat: f64,
        #[arg(long)]
        to_lon: f64,
    },
    /// Resolve a place name or address to coordinates (requires GEMINI_API_KEY)
    Resolve {
        /// Place name or address
        text: String,
        /// Latitude of the user's current location, for context
        #[arg(long, requires = "lon")]
        lat: Option<f64>,
        /// Longitude of the user's current location, for context
        #[arg(long, requires = "lat")]
        lon: Option<f64>,
    },
    /// Resolve a natural-language description to a named place (requires GEMINI_API_KEY)
    Describe {
        /// Description like "the big park next to the metro"
        text: String,
        #[arg(long, requires = "lon")]
        lat: Option<f64>,
        #[arg(long, requires = "lat")]
        lon: Option<f64>,
    },
    /// Suggest destinations for a partial query (requires GEMINI_API_KEY)
    Suggest {
        /// Partial search text (under 3 characters returns nothing)
        text: String,
        #[arg(long, requires = "lon")]
        lat: Option<f64>,
        #[arg(long, requires = "lat")]
        lon: Option<f64>,
    },
    /// Replay a scripted sample file through the tracker and print stage transitions
    Simulate {
        /// Destination latitude
        #[arg(long)]
        dest_lat: f64,
        /// Destination longitude
        #[arg(long)]
        dest_lon: f64,
        /// Alert radius in kilometers (0.1 to 3.0)
        #[arg(long, default_value = "0.5")]
        alert_km: f64,
        /// Delay between samples in milliseconds
        #[arg(long, default_value = "250")]
        interval_ms: u64,
        /// JSON file with an array of samples
        samples: String,
    },
}

/// One line of a simulation script.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SampleSpec {
    Fix {
        latitude: f64,
        longitude: f64,
        #[serde(default = "default_accuracy")]
        accuracy_m: f64,
    },
    Failure {
        error: String,
    },
}

fn default_accuracy() -> f64 {
    10.0
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let _guard = match init_logging(default_log_dir(), default_log_file()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error initializing logging: {}", e);
            process::exit(1);
        }
    };

    match args.command {
        Command::Distance {
            from_lat,
            from_lon,
            to_lat,
            to_lon,
        } => {
            let from = parse_coords(from_lat, from_lon);
            let to = parse_coords(to_lat, to_lon);
            println!("{:.3} km", great_circle_km(from, to));
        }
        Command::Resolve { text, lat, lon } => {
            let resolver = make_resolver();
            let context = optional_coords(lat, lon);
            match resolver.resolve_by_name(&text, context).await {
                Ok(Some(coords)) => {
                    println!("{}", text);
                    println!("  Latitude:  {}", coords.latitude);
                    println!("  Longitude: {}", coords.longitude);
                }
                Ok(None) => {
                    println!("No location found for \"{}\"", text);
                }
                Err(e) => {
                    eprintln!("Error resolving destination: {}", e);
                    process::exit(1);
                }
            }
        }
        Command::Describe { text, lat, lon } => {
            let resolver = make_resolver();
            let context = optional_coords(lat, lon);
            match resolver.resolve_by_description(&text, context).await {
                Ok(Some(dest)) => {
                    println!("{}", dest.name);
                    println!("  Latitude:  {}", dest.coords.latitude);
                    println!("  Longitude: {}", dest.coords.longitude);
                }
                Ok(None) => {
                    println!("Could not identify a specific place from that description");
                }
                Err(e) => {
                    eprintln!("Error resolving description: {}", e);
                    process::exit(1);
                }
            }
        }
        Command::Suggest { text, lat, lon } => {
            let resolver = make_resolver();
            let context = optional_coords(lat, lon);
            match resolver.suggest(&text, context).await {
                Ok(suggestions) if suggestions.is_empty() => {
                    println!("No suggestions");
                }
                Ok(suggestions) => {
                    for suggestion in suggestions {
                        println!("{}", suggestion);
                    }
                }
                Err(e) => {
                    eprintln!("Error fetching suggestions: {}", e);
                    process::exit(1);
                }
            }
        }
        Command::Simulate {
            dest_lat,
            dest_lon,
            alert_km,
            interval_ms,
            samples,
        } => {
            simulate(dest_lat, dest_lon, alert_km, interval_ms, &samples).await;
        }
    }
}

fn parse_coords(lat: f64, lon: f64) -> Coordinates {
    match Coordinates::new(lat, lon) {
        Ok(coords) => coords,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn optional_coords(lat: Option<f64>, lon: Option<f64>) -> Option<Coordinates> {
    match (lat, lon) {
        (Some(lat), Some(lon)) => Some(parse_coords(lat, lon)),
        _ => None,
    }
}

fn make_resolver() -> DestinationResolver<GeminiClient> {
    match GeminiClient::from_env() {
        Ok(client) => DestinationResolver::new(client),
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Set the GEMINI_API_KEY environment variable to use this command");
            process::exit(1);
        }
    }
}

async fn simulate(dest_lat: f64, dest_lon: f64, alert_km: f64, interval_ms: u64, samples: &str) {
    let destination = Destination::new("simulated destination", parse_coords(dest_lat, dest_lon));

    let alert_distance = match AlertDistance::new(alert_km) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let contents = match std::fs::read_to_string(samples) {
        Ok(contents) => contents,
        Err(e) => {
            eprintln!("Error reading {}: {}", samples, e);
            process::exit(1);
        }
    };
    let specs: Vec<SampleSpec> = match serde_json::from_str(&contents) {
        Ok(specs) => specs,
        Err(e) => {
            eprintln!("Error parsing {}: {}", samples, e);
            process::exit(1);
        }
    };

    let events: Vec<ScriptedEvent> = specs
        .into_iter()
        .map(|spec| match spec {
            SampleSpec::Fix {
                latitude,
                longitude,
                accuracy_m,
            } => ScriptedEvent::Fix {
                coords: parse_coords(latitude, longitude),
                accuracy_m,
            },
            SampleSpec::Failure { error } => ScriptedEvent::Failure(match error.as_str() {
                "permission_denied" => PositionError::PermissionDenied,
                "unavailable" => PositionError::PositionUnavailable,
                "timeout" => PositionError::Timeout,
                other => PositionError::Unknown(other.to_string()),
            }),
        })
        .collect();
    let total = events.len();

    println!("Simulating {} samples toward {}, {}", total, dest_lat, dest_lon);
    println!("Alert radius: {} km (pre-alert at {} km)", alert_distance.km(), alert_distance.pre_alert_km());
    println!();

    let source = ScriptedLocationSource::new(events)
        .with_interval(Duration::from_millis(interval_ms));
    let tracker = CommuteTracker::new(source, LoggingAlarmSink);

    if let Err(e) = tracker.start(Some(destination), alert_distance) {
        eprintln!("Error starting commute: {}", e);
        process::exit(1);
    }

    // Poll until the script runs out, printing each stage transition.
    let mut last_stage = Stage::Idle;
    let mut ticks_without_change = 0usize;
    let idle_budget = total + 20;
    loop {
        tokio::time::sleep(Duration::from_millis(interval_ms.max(50))).await;
        let snapshot = tracker.snapshot();
        if snapshot.stage != last_stage {
            match snapshot.distance_km {
                Some(d) => println!("{} ({:.3} km away)", snapshot.stage, d),
                None => println!("{}", snapshot.stage),
            }
            last_stage = snapshot.stage;
            ticks_without_change = 0;
        } else {
            ticks_without_change += 1;
        }
        if let Some(err) = &snapshot.last_error {
            println!("Position stream failed: {}", err);
            break;
        }
        if ticks_without_change > idle_budget {
            break;
        }
    }

    tracker.stop();
    let snapshot = tracker.snapshot();
    println!();
    println!("Final stage: {}", snapshot.stage);
}
