//! Layout command implementation.
//!
//! The layout command:
//! 1. Reads entity records
//! 2. Applies exclusions
//! 3. Builds the city tree
//! 4. Accumulates metrics and packs footprints
//! 5. Flattens (optionally focused on one node)
//! 6. Writes the output

use super::models::{LayoutArgs, OutputFormat};
use crate::aggregator::BuildOptions;
use crate::layout::CityLayout;
use crate::output::{layout_to_string, render_table, to_document, write_layout, write_table};
use crate::parser::{parse_entities, EntityInput, ExclusionSet};
use crate::utils::config::DEFAULT_PROJECT_NAME;
use anyhow::{Context, Result};
use log::{debug, info};
use std::io::Read;
use std::path::Path;
use std::time::Instant;

/// Execute the layout command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Unreadable or malformed input
/// * Invalid exclusion patterns
/// * Layout failures (naming the offending path)
/// * File write errors
pub fn execute_layout(args: LayoutArgs) -> Result<()> {
    let start_time = Instant::now();

    // Step 1: Read entities
    info!("Step 1/6: Reading entities from {}...", describe_input(&args.input));
    let input = read_entities(&args.input).context("Failed to read entity input")?;

    // Step 2: Exclusions
    info!("Step 2/6: Applying exclusions...");
    let exclusions = if args.default_excludes {
        ExclusionSet::new(args.exclude.as_slice())
    } else {
        ExclusionSet::without_defaults(args.exclude.as_slice())
    }
    .context("Invalid exclusion pattern")?;
    debug!("Exclusions: {:?}", exclusions.patterns());
    let entities = exclusions.filter(input.entities);

    // Steps 3-4: Build, accumulate, pack
    let project = resolve_project_name(&args, input.project.as_deref());
    let snapshot_id = args.snapshot_id.clone().or(input.snapshot_id);
    info!("Step 3/6: Building city '{}' from {} entities...", project, entities.len());
    info!("Step 4/6: Packing footprints...");
    let options = BuildOptions::new(project).with_strict(args.strict);
    let layout = CityLayout::compute(&entities, &options, &args.layout_config)
        .context("Failed to compute layout")?;

    let summary = layout.summary();
    info!("City: {}", summary.summary());

    // Step 5: Flatten
    info!("Step 5/6: Flattening layout...");
    let mut document = to_document(&layout, snapshot_id.as_deref());
    if let Some(focus) = &args.focus {
        let ancestors = layout
            .ancestors(focus)
            .with_context(|| format!("No node at path '{}'", focus))?;
        debug!(
            "Focus chain: {}",
            ancestors
                .iter()
                .map(|node| node.name.as_str())
                .collect::<Vec<_>>()
                .join(" > ")
        );
        document.records = layout
            .isolate(focus)
            .with_context(|| format!("No node at path '{}'", focus))?;
    }

    // Step 6: Write
    info!("Step 6/6: Writing {} records...", document.records.len());
    match (&args.output, args.format) {
        (Some(path), OutputFormat::Json) => {
            write_layout(&document, path).context("Failed to write layout JSON")?;
        }
        (Some(path), OutputFormat::Table) => {
            write_table(&render_table(&document.records), path)
                .context("Failed to write layout table")?;
        }
        (None, OutputFormat::Json) => {
            println!("{}", layout_to_string(&document).context("Failed to serialize layout")?);
        }
        (None, OutputFormat::Table) => {
            print!("{}", render_table(&document.records));
        }
    }

    if args.print_summary {
        let report = layout.report();
        eprintln!("\n{}", "=".repeat(80));
        eprintln!("LAYOUT SUMMARY");
        eprintln!("{}", "=".repeat(80));
        eprintln!("Project:      {}", layout.project());
        if let Some(id) = &document.snapshot_id {
            eprintln!("Snapshot:     {}", id);
        }
        eprintln!("Nodes:        {}", summary.total_nodes());
        eprintln!("  Directories {}", summary.directories);
        eprintln!("  Files       {}", summary.files);
        eprintln!("  Classes     {}", summary.classes);
        eprintln!("Max depth:    {}", summary.max_depth);
        eprintln!("Lines:        {}", summary.totals.lines);
        eprintln!("City size:    {:.2} x {:.2}", layout.root().footprint.width, layout.root().footprint.depth);
        eprintln!(
            "Records:      {} inserted, {} merged, {} skipped, {} kind conflicts",
            report.inserted, report.merged, report.skipped, report.kind_conflicts
        );
        eprintln!("{}", "=".repeat(80));
    }

    let elapsed = start_time.elapsed();
    info!("Layout completed in {:.2}s", elapsed.as_secs_f64());

    Ok(())
}

/// Read and parse entity records from a file or stdin
///
/// **Public** - reusable by other front ends
pub fn read_entities(input: &Path) -> Result<EntityInput> {
    let raw = if is_stdin(input) {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read stdin")?;
        buffer
    } else {
        std::fs::read_to_string(input)
            .with_context(|| format!("Failed to read {}", input.display()))?
    };

    let entities = parse_entities(&raw).context("Failed to parse entity records")?;
    debug!("Read {} entities", entities.entities.len());
    Ok(entities)
}

/// Validate layout arguments
///
/// **Public** - can be called before execute_layout for early validation
pub fn validate_args(args: &LayoutArgs) -> Result<()> {
    if args.input.as_os_str().is_empty() {
        anyhow::bail!("Input path cannot be empty");
    }

    if !is_stdin(&args.input) && !args.input.is_file() {
        anyhow::bail!("Input file does not exist: {}", args.input.display());
    }

    if let Some(project) = &args.project {
        if project.trim().is_empty() {
            anyhow::bail!("Project name cannot be empty");
        }
        if project.contains(['/', '\\']) {
            anyhow::bail!("Project name cannot contain path separators");
        }
    }

    if let Some(focus) = &args.focus {
        if focus.trim().is_empty() {
            anyhow::bail!("Focus path cannot be empty");
        }
    }

    args.layout_config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid layout configuration: {}", e))?;

    Ok(())
}

/// Project name: CLI flag, then input document, then input file stem
fn resolve_project_name(args: &LayoutArgs, from_input: Option<&str>) -> String {
    args.project
        .as_deref()
        .or(from_input)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .or_else(|| {
            (!is_stdin(&args.input))
                .then(|| args.input.file_stem())
                .flatten()
                .map(|stem| stem.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| DEFAULT_PROJECT_NAME.to_string())
}

fn is_stdin(input: &Path) -> bool {
    input.as_os_str() == "-"
}

fn describe_input(input: &Path) -> String {
    if is_stdin(input) {
        "stdin".to_string()
    } else {
        input.display().to_string()
    }
}
