use crate::output::read_layout;
use crate::utils::config::{ROOT_DISPLAY_PATH, SCHEMA_VERSION};
use anyhow::Result;
use std::collections::HashSet;
use std::path::PathBuf;

/// Validate a layout JSON file
pub fn validate_layout_file(file_path: PathBuf) -> Result<()> {
    println!("Validating layout: {}", file_path.display());

    let document = read_layout(&file_path)?;

    if document.version != SCHEMA_VERSION {
        anyhow::bail!(
            "Unsupported schema version {} (expected {})",
            document.version,
            SCHEMA_VERSION
        );
    }

    match document.records.first() {
        Some(root) if root.path == ROOT_DISPLAY_PATH => {}
        _ => anyhow::bail!("First record must be the root ('{}')", ROOT_DISPLAY_PATH),
    }

    let mut seen = HashSet::new();
    for record in &document.records {
        if !seen.insert(record.path.as_str()) {
            anyhow::bail!("Duplicate path in layout: {}", record.path);
        }
        if !(record.root_w > 0.0 && record.root_d > 0.0) {
            anyhow::bail!("Non-positive footprint for {}", record.path);
        }
    }

    println!("Valid layout JSON");
    println!("  Version: {}", document.version);
    println!("  Project: {}", document.project);
    if let Some(id) = &document.snapshot_id {
        println!("  Snapshot: {}", id);
    }
    println!("  Records: {}", document.records.len());
    println!(
        "  City Size: {:.2} x {:.2}",
        document.records[0].root_w, document.records[0].root_d
    );

    Ok(())
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("Code City Layout Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Input (one record per entity):");
        println!("  relativePath: string - '/'-separated path; classes use 'file.(Class)'");
        println!("  kind: string         - PACKAGE | FILE | STRUCT");
        println!("  loc: number          - Lines of code");
        println!("  methods: number      - Method count");
        println!("  attributes: number   - Attribute count");
        println!();
        println!("Output document:");
        println!("  version: string      - Schema version (e.g., '1.0.0')");
        println!("  project: string      - Project (root) name");
        println!("  snapshot_id: string? - Snapshot the layout belongs to");
        println!("  generated_at: string - ISO 8601 timestamp");
        println!("  records: array       - One per node, root ('/') first");
        println!("    path: string       - Root-relative display path");
        println!("    type: string       - PACKAGE | FILE | STRUCT");
        println!("    root_w/root_d      - Node's own footprint");
        println!("    child_w/child_d    - Footprint reserved by the parent");
        println!("    child_x/child_y    - Center relative to the parent's center");
        println!("    lines/methods/attributes - Accumulated metrics");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("Code City Layout v{}", env!("CARGO_PKG_VERSION"));
    println!("Layout Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Hierarchical footprint layout for 3D code cities.");
}
