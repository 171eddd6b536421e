use std::collections::BTreeSet;

use datatest_stable::Utf8Path;
use pmlayout::extent::extent;
use pmlayout::layout::wbs::layout_wbs;
use pmlayout::{ElementKey, Forest, LayoutResult, ProportionalMetrics, Px, WbsConfig, WbsRecord};
use regex_lite::Regex;

/// A parsed `.wbs` fixture: `id,title` rows plus `# key: value` directives
struct Fixture {
    title: String,
    expected_warnings: Option<usize>,
    records: Vec<WbsRecord>,
}

fn parse_fixture(source: &str) -> Result<Fixture, String> {
    let directive = Regex::new(r"^#\s*([a-z-]+)\s*:\s*(.*?)\s*$").unwrap();
    let row = Regex::new(r"^\s*([^,]+?)\s*,\s*(.+?)\s*$").unwrap();

    let mut fixture = Fixture { title: String::new(), expected_warnings: None, records: Vec::new() };
    for (n, line) in source.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        if let Some(caps) = directive.captures(line) {
            match &caps[1] {
                "title" => fixture.title = caps[2].to_string(),
                "warnings" => {
                    let count = caps[2].parse().map_err(|e| format!("line {}: {e}", n + 1))?;
                    fixture.expected_warnings = Some(count);
                }
                other => return Err(format!("line {}: unknown directive `{other}`", n + 1)),
            }
            continue;
        }
        if line.starts_with('#') {
            continue;
        }
        let caps = row.captures(line).ok_or_else(|| format!("line {}: expected `id,title`", n + 1))?;
        fixture.records.push(WbsRecord::new(&caps[1], &caps[2]));
    }
    Ok(fixture)
}

fn init_tracing() {
    if std::env::var_os("RUST_LOG").is_some() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }
}

/// Ids of every node below `id`, `id` included
fn subtree<'a>(forest: &'a Forest, id: &'a str, out: &mut Vec<&'a str>) {
    out.push(id);
    for child in forest.children(id) {
        subtree(forest, child, out);
    }
}

fn check_layout(forest: &Forest, result: &LayoutResult, config: &WbsConfig) -> Result<(), String> {
    // one element per node plus the title
    let placed: BTreeSet<&str> = result
        .elements
        .iter()
        .filter_map(|e| match &e.key {
            ElementKey::Node(id) => Some(id.as_str()),
            _ => None,
        })
        .collect();
    let expected: BTreeSet<&str> = forest.depth_first().map(|n| n.id.as_str()).collect();
    if placed != expected || result.elements.len() != forest.len() + 1 {
        return Err(format!("placed {placed:?}, expected {expected:?}"));
    }

    if let Some(path) = result.connectors().find(|p| !p.is_orthogonal()) {
        return Err(format!("diagonal connector {:?}", path.points));
    }

    // every non-root node is reached by exactly one connector from its parent
    for node in forest.depth_first() {
        let element = result.node(&node.id).ok_or_else(|| format!("{} not placed", node.id))?;
        if element.connectors.len() != node.children.len() {
            return Err(format!(
                "{} owns {} connectors for {} children",
                node.id,
                element.connectors.len(),
                node.children.len()
            ));
        }
        for line in &element.text.lines {
            let width = pmlayout::GlyphMetrics::width(&ProportionalMetrics, line, &config.font);
            if width > config.text_area(config.box_size).w {
                return Err(format!("{}: line {line:?} is {width}", node.id));
            }
        }
    }

    if !result.canvas_box().contains(&result.bounds()) {
        return Err(format!("bounds {:?} exceed canvas {:?}", result.bounds(), result.canvas));
    }

    let dims = config.extent_dims();
    for root in forest.roots() {
        let mut ids = Vec::new();
        subtree(forest, root, &mut ids);
        let top = result.node(root).map(|e| e.rect.top_y).unwrap_or_default();
        let bottom = ids
            .iter()
            .filter_map(|id| result.node(id))
            .map(|e| e.rect.bottom())
            .fold(Px::ZERO, Px::max);
        let used = bottom + config.level_gap - top;
        let estimate = extent(forest, root, &dims);
        if used > estimate {
            return Err(format!("column {root} uses {used}, estimated {estimate}"));
        }
    }
    Ok(())
}

fn test_wbs_fixture(path: &Utf8Path) -> datatest_stable::Result<()> {
    init_tracing();
    let source = std::fs::read_to_string(path)?;
    let fixture = parse_fixture(&source)?;

    let config = WbsConfig::default();
    let forest = Forest::build(&fixture.records)?;
    let result = layout_wbs(&forest, &fixture.title, &ProportionalMetrics, &config)?;
    tracing::debug!(
        fixture = %path,
        nodes = forest.len(),
        width = result.canvas.w.raw(),
        height = result.canvas.h.raw(),
        warnings = result.warnings.len(),
        "fixture laid out"
    );

    check_layout(&forest, &result, &config).map_err(|e| format!("{path}: {e}"))?;

    if let Some(expected) = fixture.expected_warnings {
        if result.warnings.len() != expected {
            return Err(format!(
                "{path}: expected {expected} warnings, got {:?}",
                result.warnings
            )
            .into());
        }
    }
    Ok(())
}

datatest_stable::harness! {
    { test = test_wbs_fixture, root = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures"), pattern = r"\.wbs$" },
}
