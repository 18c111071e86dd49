#![allow(clippy::uninlined_format_args)]
//! Example: summarize a saved queue snapshot
//!
//! Reads a JSON array of request records and prints every retained
//! category with one line per request.
//!
//! ## Running
//!
//! ```bash
//! cargo run --package queueview-core --example queue_summary -- snapshot.json
//! cargo run --package queueview-core --example queue_summary -- snapshot.json completedDownloadToDisk failedUpload
//! ```
//!
//! Set `RUST_LOG=queueview_core=trace` to see classification decisions.

use queueview_core::time::SystemClock;
use queueview_core::{Category, Record, RequestQueue, StaticSource, inspect};
use std::env;

fn print_record(record: &Record, clock: &SystemClock) {
    let size = inspect::size(record).map_or_else(|| "?".to_string(), |bytes| bytes.to_string());
    println!(
        "    {:<16} prio={} size={:<8} mime={:<24} progress={:>3}% last={} file={} key={}",
        record.identifier(),
        inspect::priority(record),
        size,
        inspect::mime(record),
        inspect::progress(record).percent(),
        inspect::last_activity(record, clock),
        inspect::file_name(record),
        inspect::key_link(record).text,
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args = env::args().skip(1);
    let Some(path) = args.next() else {
        eprintln!("usage: queue_summary <snapshot.json> [category label...]");
        std::process::exit(2);
    };

    let mut mask = Category::NONE;
    for label in args {
        let Some(category) = Category::from_label(&label) else {
            eprintln!("unknown category label: {}", label);
            std::process::exit(2);
        };
        mask |= category;
    }
    if mask.is_empty() {
        mask = Category::ALL;
    }

    let source = StaticSource::from_json(&std::fs::read_to_string(&path)?)?;
    let queue = RequestQueue::new(mask, &source)?;
    let clock = SystemClock;

    println!("{} requests in view", queue.queue_size());
    println!("lowest queued priority: {}", queue.lowest_queued_priority());
    println!(
        "queued bytes: {} down, {} up",
        queue.total_download_bytes(),
        queue.total_upload_bytes()
    );

    for (category, records) in queue.categories() {
        println!("{}:", category);
        for record in records {
            print_record(record, &clock);
        }
    }
    for category in [Category::DL_F_U_MIME, Category::DL_F_B_MIME] {
        for (mime, records) in queue.get_map(category)? {
            println!("{} [{}]:", category, mime);
            for record in records {
                print_record(record, &clock);
            }
        }
    }

    Ok(())
}
