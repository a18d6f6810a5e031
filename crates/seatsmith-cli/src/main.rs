//! seatsmith - CLI for venue seat-manifest generation
//!
//! Usage:
//!   seatsmith generate <venue.{json,yaml,svg}> [options]
//!   seatsmith diff <old.json> <new.json> [--json]
//!   seatsmith inspect <manifest.json>
//!   seatsmith layouts
//!   seatsmith harness [venue]

use std::fs;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use seatsmith::{
    compare_manifests, extract_sections_from_svg, generate, group_places_by_section,
    normalize_manifest_data, AdmissionLayout, GenerationRequest, GridLayout, IdentifierConfig,
    IdentifierSource, LayoutStrategy, Manifest, ManualLayout, Place, Point, Polygon,
    PresentationStyle, RadialLayout, Rect, RowSpec, Section, SectionNaming, ZoneSpec,
};

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage(&args[0]);
        std::process::exit(1);
    }

    match args[1].as_str() {
        "generate" => cmd_generate(&args[2..]),
        "diff" => cmd_diff(&args[2..]),
        "inspect" => cmd_inspect(&args[2..]),
        "layouts" => cmd_layouts(),
        "harness" => cmd_harness(&args[2..]),
        "help" | "--help" | "-h" => print_usage(&args[0]),
        other => {
            eprintln!("Unknown command: {other}");
            print_usage(&args[0]);
            std::process::exit(1);
        }
    }
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn print_usage(prog: &str) {
    eprintln!("seatsmith - deterministic venue seat-manifest generation");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  {prog} generate <venue.{{json,yaml,svg}}> [options]");
    eprintln!("  {prog} diff <old.json> <new.json> [--json]");
    eprintln!("  {prog} inspect <manifest.json>");
    eprintln!("  {prog} layouts");
    eprintln!("  {prog} harness [venue]");
    eprintln!();
    eprintln!("Generate options:");
    eprintln!("  -o, --output <file>       Output file (- for stdout, default: stdout)");
    eprintln!("  --capacity <n>            Override the requested capacity");
    eprintln!("  --event-id <id>           Event id for the manifest");
    eprintln!("  --prefix <str>            Identifier prefix (generated ids only)");
    eprintln!("  --update-time <rfc3339>   Fixed timestamp for reproducible output");
    eprintln!();
    eprintln!("Venue files:");
    eprintln!("  .json/.yaml: a generation request (strategy + parameters)");
    eprintln!("  .svg:        a floor plan; shapes with data-* attributes become");
    eprintln!("               manual sections, data-obstruction shapes become");
    eprintln!("               obstructions of the section containing them");
}

// ============ generate ============

fn cmd_generate(args: &[String]) {
    let mut venue_path: Option<&str> = None;
    let mut output_path: Option<&str> = None;
    let mut capacity: Option<u32> = None;
    let mut event_id: Option<String> = None;
    let mut prefix: Option<String> = None;
    let mut update_time: Option<DateTime<Utc>> = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-o" | "--output" => {
                i += 1;
                if i < args.len() {
                    output_path = Some(&args[i]);
                }
            }
            "--capacity" => {
                i += 1;
                if i < args.len() {
                    capacity = args[i].parse().ok();
                    if capacity.is_none() {
                        eprintln!("Invalid capacity: {}", args[i]);
                        std::process::exit(1);
                    }
                }
            }
            "--event-id" => {
                i += 1;
                if i < args.len() {
                    event_id = Some(args[i].clone());
                }
            }
            "--prefix" => {
                i += 1;
                if i < args.len() {
                    prefix = Some(args[i].clone());
                }
            }
            "--update-time" => {
                i += 1;
                if i < args.len() {
                    match args[i].parse() {
                        Ok(ts) => update_time = Some(ts),
                        Err(e) => {
                            eprintln!("Invalid --update-time {}: {}", args[i], e);
                            std::process::exit(1);
                        }
                    }
                }
            }
            path => {
                if venue_path.is_none() {
                    venue_path = Some(path);
                }
            }
        }
        i += 1;
    }

    let venue_path = venue_path.unwrap_or_else(|| {
        eprintln!("Error: venue file required");
        std::process::exit(1);
    });

    eprintln!("Loading: {venue_path}");
    let mut request = load_request(venue_path);

    if let Some(capacity) = capacity {
        request.capacity = Some(capacity);
    }
    if let Some(event_id) = event_id {
        request.event_id = Some(event_id);
    }
    if let Some(prefix) = prefix {
        request.identifiers = IdentifierSource::Generate(IdentifierConfig {
            prefix,
            ..IdentifierConfig::default()
        });
    }
    if update_time.is_some() {
        request.update_time = update_time;
    }

    let start = Instant::now();
    let outcome = match generate(&request) {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("Generation failed: {e}");
            std::process::exit(1);
        }
    };
    let elapsed = start.elapsed();

    eprintln!(
        "Generated {} places, {} zones in {:?}",
        outcome.places.len(),
        outcome.zones.len(),
        elapsed
    );
    for warning in outcome.warning_messages() {
        eprintln!("  warning: {warning}");
    }
    if let Some(manifest) = &outcome.manifest {
        eprintln!("Manifest hash: {}", manifest.update_hash);
    }

    let json = match serde_json::to_string_pretty(&outcome) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("Failed to serialize outcome: {e}");
            std::process::exit(1);
        }
    };

    match output_path {
        Some("-") | None => println!("{json}"),
        Some(path) => {
            if let Err(e) = fs::write(path, &json) {
                eprintln!("Failed to write {path}: {e}");
                std::process::exit(1);
            }
            eprintln!("Wrote: {path}");
        }
    }
}

/// Load a generation request from a venue file, by extension.
fn load_request(path: &str) -> GenerationRequest {
    if path.ends_with(".svg") {
        let svg = read_file(path);
        let sections = match extract_sections_from_svg(&svg) {
            Ok(sections) => sections,
            Err(e) => {
                eprintln!("Failed to import floor plan: {e}");
                std::process::exit(1);
            }
        };
        eprintln!("Imported {} sections from floor plan", sections.len());
        return GenerationRequest::new(LayoutStrategy::Manual(ManualLayout { sections }));
    }

    let text = read_file(path);
    let parsed = if path.ends_with(".yaml") || path.ends_with(".yml") {
        serde_yaml::from_str(&text).map_err(|e| e.to_string())
    } else {
        serde_json::from_str(&text).map_err(|e| e.to_string())
    };
    match parsed {
        Ok(request) => request,
        Err(e) => {
            eprintln!("Failed to parse {path}: {e}");
            std::process::exit(1);
        }
    }
}

fn read_file(path: &str) -> String {
    match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Failed to read {path}: {e}");
            std::process::exit(1);
        }
    }
}

// ============ diff ============

/// Manifests come either bare or wrapped in a generation outcome document.
#[derive(Deserialize)]
struct OutcomeDocument {
    manifest: Manifest,
}

fn load_manifest(path: &str) -> Manifest {
    let text = read_file(path);
    match serde_json::from_str::<Manifest>(&text) {
        Ok(manifest) => manifest,
        Err(direct_err) => match serde_json::from_str::<OutcomeDocument>(&text) {
            Ok(document) => document.manifest,
            Err(_) => {
                eprintln!("{path} is not a manifest: {direct_err}");
                std::process::exit(1);
            }
        },
    }
}

fn cmd_diff(args: &[String]) {
    let mut paths: Vec<&str> = Vec::new();
    let mut json_output = false;
    for arg in args {
        match arg.as_str() {
            "--json" => json_output = true,
            path => paths.push(path),
        }
    }
    if paths.len() != 2 {
        eprintln!("Usage: seatsmith diff <old.json> <new.json> [--json]");
        std::process::exit(1);
    }

    let old = load_manifest(paths[0]);
    let new = load_manifest(paths[1]);
    let diff = compare_manifests(&old, &new);

    if json_output {
        match serde_json::to_string_pretty(&diff) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Failed to serialize diff: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    if !diff.changed {
        println!("unchanged ({} places)", old.place_ids.len());
        return;
    }
    println!("changed: +{} -{}", diff.added.len(), diff.removed.len());
    for id in &diff.added {
        println!("  + {id}");
    }
    for id in &diff.removed {
        println!("  - {id}");
    }
}

// ============ inspect ============

fn cmd_inspect(args: &[String]) {
    let Some(path) = args.first() else {
        eprintln!("Usage: seatsmith inspect <manifest.json>");
        std::process::exit(1);
    };

    let manifest = load_manifest(path);
    println!("event:  {}", manifest.event_id);
    println!("hash:   {}", manifest.update_hash);
    println!("time:   {}", manifest.update_time.to_rfc3339());
    println!("places: {}", manifest.place_ids.len());
    println!();

    // With no coordinates the section column is a heuristic guess from
    // the identifier itself.
    let places: Vec<Place> = match &manifest.places {
        Some(places) => places.clone(),
        None => {
            eprintln!("(no coordinates; sections guessed from identifiers)");
            normalize_manifest_data(&manifest)
                .into_iter()
                .map(|normalized| Place {
                    place_id: normalized.place_id,
                    x: normalized.x.unwrap_or(0.0),
                    y: normalized.y.unwrap_or(0.0),
                    row: String::new(),
                    seat: normalized.seat,
                    section: normalized.section,
                    zone: normalized.price_tier,
                    in_bounds: true,
                })
                .collect()
        }
    };

    println!("  {:20}  {:>6}  {:>10}  {}", "Section", "Seats", "OutOfBnds", "Tiers");
    println!("  {:20}  {:>6}  {:>10}  {}", "-------", "-----", "---------", "-----");
    for bucket in group_places_by_section(&places) {
        let out_of_bounds = bucket.places.iter().filter(|p| !p.in_bounds).count();
        println!(
            "  {:20}  {:>6}  {:>10}  {}",
            bucket.section,
            bucket.count,
            out_of_bounds,
            bucket.price_tiers.join(",")
        );
    }
}

// ============ layouts ============

fn cmd_layouts() {
    println!("Available layout strategies:");
    println!("  grid              uniform arena sections (positional, no geometry checks)");
    println!("  radial            theater rows on growing arcs around a center");
    println!("  generalAdmission  capacity zones without individual seats");
    println!("  manual            configured sections: rectangles/polygons, rowConfig,");
    println!("                    aisles, obstructions, curves");
}

// ============ harness ============

/// Result from running a single strategy in the harness.
struct HarnessResult {
    strategy: &'static str,
    places: usize,
    zones: usize,
    warnings: usize,
    time_ms: f64,
    ok: bool,
}

fn cmd_harness(args: &[String]) {
    let manual = match args.first() {
        Some(path) => {
            eprintln!("Loading venue: {path}");
            match load_request(path).layout {
                LayoutStrategy::Manual(manual) => manual,
                other => {
                    eprintln!(
                        "harness venue must be a manual layout, got {}",
                        other.name()
                    );
                    std::process::exit(1);
                }
            }
        }
        None => synthetic_venue(),
    };

    let requests: Vec<GenerationRequest> = vec![
        GenerationRequest {
            capacity: Some(480),
            ..GenerationRequest::new(LayoutStrategy::Grid(GridLayout {
                sections: 4,
                seats_per_row: 12,
                naming: SectionNaming::Alphabetic,
                ..GridLayout::default()
            }))
        },
        GenerationRequest {
            capacity: Some(200),
            ..GenerationRequest::new(LayoutStrategy::Radial(RadialLayout::default()))
        },
        GenerationRequest {
            capacity: Some(1500),
            ..GenerationRequest::new(LayoutStrategy::GeneralAdmission(AdmissionLayout {
                zones: vec![
                    ZoneSpec {
                        zone_id: None,
                        name: "Floor".into(),
                        bounds: Rect::new(Point::new(0.0, 0.0), Point::new(300.0, 150.0)),
                        capacity: None,
                        share: Some(0.7),
                    },
                    ZoneSpec {
                        zone_id: None,
                        name: "Terrace".into(),
                        bounds: Rect::new(Point::new(0.0, 150.0), Point::new(300.0, 220.0)),
                        capacity: Some(400),
                        share: None,
                    },
                ],
            }))
        },
        GenerationRequest::new(LayoutStrategy::Manual(manual)),
    ];

    eprintln!("seatsmith harness");
    eprintln!("=================");

    let mut results = Vec::new();
    let mut failed = 0usize;

    for request in &requests {
        let name = request.layout.name();
        eprint!("  {name:18} ... ");
        let start = Instant::now();
        let result = generate(request);
        let time_ms = start.elapsed().as_secs_f64() * 1000.0;

        match result {
            Ok(outcome) => {
                eprintln!(
                    "{:>6} places {:>3} zones in {:>8.2}ms",
                    outcome.places.len(),
                    outcome.zones.len(),
                    time_ms
                );
                results.push(HarnessResult {
                    strategy: name,
                    places: outcome.places.len(),
                    zones: outcome.zones.len(),
                    warnings: outcome.warnings.len(),
                    time_ms,
                    ok: true,
                });
            }
            Err(e) => {
                eprintln!("FAILED: {e}");
                failed += 1;
                results.push(HarnessResult {
                    strategy: name,
                    places: 0,
                    zones: 0,
                    warnings: 0,
                    time_ms,
                    ok: false,
                });
            }
        }
    }

    eprintln!();
    eprintln!("  {:18}  {:>7}  {:>6}  {:>9}  {:>9}  {:>6}", "Strategy", "Places", "Zones", "Warnings", "Time(ms)", "Status");
    eprintln!("  {:18}  {:>7}  {:>6}  {:>9}  {:>9}  {:>6}", "--------", "------", "-----", "--------", "--------", "------");
    for r in &results {
        eprintln!(
            "  {:18}  {:>7}  {:>6}  {:>9}  {:>9.2}  {:>6}",
            r.strategy,
            r.places,
            r.zones,
            r.warnings,
            r.time_ms,
            if r.ok { "ok" } else { "FAIL" }
        );
    }
    eprintln!();
    eprintln!("  Passed: {}  Failed: {}", results.len() - failed, failed);

    if failed > 0 {
        std::process::exit(1);
    }
}

/// Built-in venue exercising the manual layout's corners: a rectangle with
/// row configuration and an obstruction, plus a polygon fan.
fn synthetic_venue() -> ManualLayout {
    let mut orchestra = Section::rect(
        "Orchestra",
        Rect::new(Point::new(0.0, 0.0), Point::new(300.0, 160.0)),
    );
    orchestra.row_config = (1..=6)
        .map(|row| {
            let mut spec = RowSpec::new(row, 20 - row.min(3) * 2);
            spec.aisle_left = 1;
            spec.aisle_right = 1;
            spec
        })
        .collect();
    orchestra.price_tier = Some("orchestra".into());
    orchestra.obstructions.push(seatsmith::Obstruction {
        name: Some("mixing-desk".into()),
        shape: seatsmith::SectionShape::Rect(Rect::new(
            Point::new(130.0, 60.0),
            Point::new(170.0, 100.0),
        )),
    });

    let mut balcony = Section::polygon(
        "Balcony",
        Polygon::new(vec![
            Point::new(150.0, 200.0),
            Point::new(300.0, 330.0),
            Point::new(0.0, 330.0),
        ]),
    );
    balcony.style = PresentationStyle::Cone;
    balcony.row_config = vec![RowSpec::new(1, 14), RowSpec::new(2, 10), RowSpec::new(3, 8)];
    balcony.price_tier = Some("balcony".into());

    ManualLayout {
        sections: vec![orchestra, balcony],
    }
}
