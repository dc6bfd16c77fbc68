//! Stream a small OSM document to stdout.
//!
//! Run with: RUST_LOG=tagspool_core=trace cargo run --example osm_stream
//! Pass `--indent` to turn off flow layout for `<osm>`.

use std::io::{self, BufWriter};

use tagspool_core::{Event, MarkupWriter, Tag, WriterConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const NODES: [(u64, f64, f64); 3] = [
    (1, 51.5074, -0.1278),
    (2, 51.5080, -0.1281),
    (3, 51.5090, -0.1290),
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = if std::env::args().any(|arg| arg == "--indent") {
        WriterConfig::default().no_flow_elements()
    } else {
        WriterConfig::default()
    };

    let stdout = io::stdout();
    let mut writer = MarkupWriter::with_config(BufWriter::new(stdout.lock()), config);

    writer.write_event(&Event::start(
        Tag::new("osm")
            .with_attribute("version", "0.6")
            .with_attribute("generator", "tagspool"),
    ))?;

    for (id, lat, lon) in NODES {
        writer.write_event(&Event::complete(
            Tag::new("node")
                .with_attribute("id", id.to_string())
                .with_attribute("lat", lat.to_string())
                .with_attribute("lon", lon.to_string()),
        ))?;
    }

    writer.write_event(&Event::start(Tag::new("way").with_attribute("id", "10")))?;
    for (id, _, _) in NODES {
        writer.write_event(&Event::complete(
            Tag::new("nd").with_attribute("ref", id.to_string()),
        ))?;
    }
    writer.write_event(&Event::complete(
        Tag::new("tag")
            .with_attribute("k", "name")
            .with_attribute("v", "Strand & Co's <lane>"),
    ))?;

    // The way and osm elements are closed by flush.
    writer.flush()?;
    drop(writer);
    println!();
    Ok(())
}
