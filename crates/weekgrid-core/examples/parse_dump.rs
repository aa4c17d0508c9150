use std::path::PathBuf;
use weekgrid_core::{parser, RenderOptions};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let mut p = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
            p.push("tests");
            p.push("data");
            p.push("example-week.txt");
            p
        });
    println!("Loading {:?}", path);

    let opts = RenderOptions::default();
    let schedule = parser::load_schedule(&path, &opts.days)?;
    println!("Loaded schedule successfully.");
    println!("Categories: {}", schedule.categories.len());
    println!(
        "Time window: {} - {} ({} min)",
        schedule.window.earliest,
        schedule.window.latest,
        schedule.window.span_minutes()
    );

    for event in &schedule.events {
        println!("  Event: {:?}", event.name);
        for occ in &event.occurrences {
            println!(
                "    {} {}",
                opts.days[occ.day],
                occ.time_range_string()
            );
        }
    }

    Ok(())
}
