use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::{json, Value};
use slant::prelude::*;
use std::path::Path;
use tracing_subscriber::fmt::SubscriberBuilder;

mod template_file;

#[derive(Parser)]
#[command(name = "slant")]
#[command(about = "Build slant collage layouts, simulate drags, print frames as JSON")]
struct Cmd {
    /// Outer boundary width
    #[arg(long, default_value_t = 1080.0, global = true)]
    width: f64,
    /// Outer boundary height
    #[arg(long, default_value_t = 1080.0, global = true)]
    height: f64,
    /// Minimum cell edge kept while dragging
    #[arg(long, default_value_t = slant::geom2::DEFAULT_MIN_CELL_EXTENT, global = true)]
    min_cell: f64,

    #[command(subcommand)]
    action: Action,
}

/// Where the layout template comes from. Defaults to a 2×2 grid.
#[derive(Args, Default)]
struct TemplateArgs {
    /// Crossing grid, e.g. `3x2`
    #[arg(long)]
    grid: Option<String>,
    /// Full-width bands with cells per band, e.g. `2,3,1`
    #[arg(long)]
    rows: Option<String>,
    /// Full-height bands with cells per band, e.g. `1,2`
    #[arg(long)]
    columns: Option<String>,
    /// Tilt fraction for --rows/--columns
    #[arg(long, default_value_t = 0.0)]
    slant: f64,
    /// Random band template from a seed
    #[arg(long)]
    random: Option<u64>,
    /// JSON template file
    #[arg(long)]
    template: Option<String>,
}

#[derive(Subcommand)]
enum Action {
    /// Print the frame (lines + areas) of a template
    Layout {
        #[command(flatten)]
        src: TemplateArgs,
        #[arg(long)]
        out: Option<String>,
    },
    /// Drag one interior line by an offset and print the result
    Drag {
        #[command(flatten)]
        src: TemplateArgs,
        /// Interior line index (template order)
        #[arg(long)]
        line: usize,
        #[arg(long, allow_hyphen_values = true)]
        offset: f64,
        #[arg(long)]
        out: Option<String>,
    },
    /// Print the template itself as JSON (input format of --template)
    Template {
        #[command(flatten)]
        src: TemplateArgs,
    },
    /// Print version information
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    let outer = Rect::from_size(cmd.width, cmd.height);
    let cfg = SlantCfg {
        min_cell_extent: cmd.min_cell,
        ..SlantCfg::default()
    };
    match cmd.action {
        Action::Layout { src, out } => layout(&src, outer, cfg, out),
        Action::Drag {
            src,
            line,
            offset,
            out,
        } => drag(&src, outer, cfg, line, offset, out),
        Action::Template { src } => {
            let t = resolve_template(&src)?;
            println!(
                "{}",
                serde_json::to_string_pretty(&template_file::TemplateFile::from(&t))?
            );
            Ok(())
        }
        Action::Report => report(),
    }
}

fn layout(src: &TemplateArgs, outer: Rect, cfg: SlantCfg, out: Option<String>) -> Result<()> {
    let template = resolve_template(src)?;
    let mesh = Mesh::build(&template, outer, cfg).context("building mesh")?;
    tracing::info!(
        lines = mesh.lines().len(),
        areas = mesh.area_count(),
        "layout"
    );
    emit(out.as_deref(), &mesh_json(&mesh))
}

fn drag(
    src: &TemplateArgs,
    outer: Rect,
    cfg: SlantCfg,
    line: usize,
    offset: f64,
    out: Option<String>,
) -> Result<()> {
    let template = resolve_template(src)?;
    let mut mesh = Mesh::build(&template, outer, cfg).context("building mesh")?;
    if line >= mesh.lines().len() {
        bail!(
            "line {line} out of range; template has {} interior lines",
            mesh.lines().len()
        );
    }
    let id = LineId::interior(line);
    let before = mesh_json(&mesh);
    mesh.prepare_move(id);
    let applied = mesh.move_line(id, offset);
    mesh.finish_move();
    tracing::info!(line, requested = offset, applied, "drag");
    let doc = json!({
        "line": line,
        "requested": offset,
        "applied": applied,
        "before": before,
        "after": mesh_json(&mesh),
    });
    emit(out.as_deref(), &doc)
}

fn report() -> Result<()> {
    let obj = json!({
        "name": "slant",
        "version": slant::VERSION,
        "defaults": {
            "line_hit_tolerance": slant::geom2::DEFAULT_LINE_HIT_TOLERANCE,
            "min_cell_extent": slant::geom2::DEFAULT_MIN_CELL_EXTENT,
        }
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

fn resolve_template(src: &TemplateArgs) -> Result<LayoutTemplate> {
    let given = [
        src.grid.is_some(),
        src.rows.is_some(),
        src.columns.is_some(),
        src.random.is_some(),
        src.template.is_some(),
    ]
    .iter()
    .filter(|&&b| b)
    .count();
    if given > 1 {
        bail!("pick one of --grid, --rows, --columns, --random, --template");
    }
    if let Some(grid) = &src.grid {
        let (r, c) = grid
            .split_once(['x', 'X'])
            .with_context(|| format!("--grid expects RxC, got {grid}"))?;
        let rows = r.trim().parse().context("--grid rows")?;
        let cols = c.trim().parse().context("--grid cols")?;
        return Ok(LayoutTemplate::grid(rows, cols));
    }
    if let Some(rows) = &src.rows {
        return Ok(LayoutTemplate::slant_rows(&parse_counts(rows)?, src.slant));
    }
    if let Some(columns) = &src.columns {
        return Ok(LayoutTemplate::slant_columns(
            &parse_counts(columns)?,
            src.slant,
        ));
    }
    if let Some(seed) = src.random {
        return Ok(draw_template(
            RandomCfg::default(),
            ReplayToken { seed, index: 0 },
        ));
    }
    if let Some(path) = &src.template {
        return template_file::load_template(path);
    }
    Ok(LayoutTemplate::grid(2, 2))
}

fn parse_counts(s: &str) -> Result<Vec<usize>> {
    s.split(',')
        .map(|part| {
            part.trim()
                .parse::<usize>()
                .with_context(|| format!("bad cell count {part:?} in {s:?}"))
        })
        .collect()
}

fn point_json(p: Point) -> Value {
    json!([p.x, p.y])
}

fn segment_json(s: Segment) -> Value {
    json!({ "start": point_json(s.start), "end": point_json(s.end) })
}

fn mesh_json(mesh: &Mesh) -> Value {
    json!({
        "outer": mesh.outer_lines().iter().map(|l| segment_json(l.segment())).collect::<Vec<_>>(),
        "lines": mesh
            .lines()
            .iter()
            .map(|l| json!({
                "direction": format!("{:?}", l.direction).to_lowercase(),
                "segment": segment_json(l.segment()),
            }))
            .collect::<Vec<_>>(),
        "areas": mesh
            .areas()
            .iter()
            .map(|a| json!({
                "index": a.index,
                "points": a.points.iter().map(|&p| point_json(p)).collect::<Vec<_>>(),
                "area": a.signed_area(),
            }))
            .collect::<Vec<_>>(),
    })
}

/// Write pretty JSON to `out` (creating parent dirs) or stdout.
fn emit(out: Option<&str>, doc: &Value) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(doc)?;
    let Some(out) = out else {
        println!("{}", String::from_utf8_lossy(&bytes));
        return Ok(());
    };
    let out_path = Path::new(out);
    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    std::fs::write(out_path, bytes).with_context(|| format!("writing {}", out_path.display()))?;
    Ok(())
}
