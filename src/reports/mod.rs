use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use skinstric::category::Category;
use skinstric::format::{display_percent, format_percent, normalize_score_to_percent};
use skinstric::locate::Container;
use skinstric::payload::{CategoryTrace, ParsedDemographics};
use skinstric::ranked::NodeShape;
use skinstric::session::{LoadOutcome, ReviewView};

pub fn print_review(view: &ReviewView) {
    println!("\nA.I ANALYSIS :: DEMOGRAPHICS ({})", describe_outcome(&view.outcome));

    let mut tiles = Table::new();
    tiles
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    tiles.set_header(vec![
        Cell::new("Category").add_attribute(Attribute::Bold),
        Cell::new("Confirmed"),
        Cell::new("Original"),
    ]);
    for tile in &view.tiles {
        let original = view.original_values[tile.category].clone();
        let mut name = Cell::new(&tile.label);
        if tile.active {
            name = name.fg(Color::Cyan).add_attribute(Attribute::Bold);
        }
        let confirmed = if original == tile.value {
            Cell::new(tile.value.to_uppercase())
        } else {
            Cell::new(tile.value.to_uppercase()).fg(Color::Yellow)
        };
        tiles.add_row(vec![name, confirmed, Cell::new(original.to_uppercase())]);
    }
    println!("{}", tiles);

    println!(
        "\n{}  {}   [{}% A.I CONFIDENCE]",
        view.panel_label, view.dominant_display, view.active_percent
    );
    println!(
        "Ring: offset {:.2} of {:.2}",
        view.ring_offset, view.ring_circumference
    );

    let mut rows = Table::new();
    rows.load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    rows.set_header(vec![
        Cell::new(" "),
        Cell::new(view.panel_label.as_str()).add_attribute(Attribute::Bold),
        Cell::new("A.I. Confidence"),
    ]);
    if let Some(col) = rows.column_mut(2) {
        col.set_cell_alignment(CellAlignment::Right);
    }
    for row in &view.rows {
        let marker = if row.selected { "◆" } else { "◇" };
        let mut label = Cell::new(&row.display_label);
        if row.selected {
            label = label.add_attribute(Attribute::Bold).fg(Color::Cyan);
        }
        rows.add_row(vec![Cell::new(marker), label, Cell::new(&row.percent)]);
    }
    println!("{}", rows);

    let reset = if view.pending_reset { "RESET*" } else { "RESET" };
    let confirm = if view.pending_confirm { "CONFIRM*" } else { "CONFIRM" };
    println!("[{}]  [{}]", reset, confirm);
}

pub fn print_extraction(parsed: &ParsedDemographics) {
    let mut summary = Table::new();
    summary
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    summary.set_header(vec![
        Cell::new("Category").add_attribute(Attribute::Bold),
        Cell::new("Found At"),
        Cell::new("Shape"),
        Cell::new("Extracted"),
        Cell::new("Dominant"),
        Cell::new("Fallback"),
    ]);

    for category in Category::all() {
        let trace = &parsed.trace[category];
        summary.add_row(vec![
            Cell::new(category.panel_label()).add_attribute(Attribute::Bold),
            Cell::new(describe_origin(trace)),
            Cell::new(describe_shape(&trace.shape)),
            Cell::new(trace.extracted).set_alignment(CellAlignment::Right),
            Cell::new(&parsed.original[category]),
            fallback_cell(trace),
        ]);
    }
    println!("\n{}", summary);

    for category in Category::all() {
        let mut table = Table::new();
        table.load_preset(ASCII_FULL);
        table.set_header(vec![
            Cell::new(category.panel_label()).add_attribute(Attribute::Bold),
            Cell::new("Raw"),
            Cell::new("Percent"),
            Cell::new("Shown"),
        ]);
        for i in 1..=3 {
            if let Some(col) = table.column_mut(i) {
                col.set_cell_alignment(CellAlignment::Right);
            }
        }
        for item in &parsed.ranked[category] {
            table.add_row(vec![
                Cell::new(&item.label),
                Cell::new(format!("{}", item.score)),
                Cell::new(format!("{:.3}", normalize_score_to_percent(item.score))),
                Cell::new(format_percent(item.score)).fg(shown_color(item.score)),
            ]);
        }
        println!("{}", table);
    }
}

fn describe_outcome(outcome: &LoadOutcome) -> String {
    match outcome {
        LoadOutcome::Parsed { fallback } if fallback.is_empty() => "from payload".to_string(),
        LoadOutcome::Parsed { fallback } => {
            let names: Vec<String> = fallback.iter().map(|c| c.to_string()).collect();
            format!("from payload, defaults for {}", names.join(", "))
        }
        LoadOutcome::CacheMiss => "no cached payload, defaults".to_string(),
        LoadOutcome::Malformed { .. } => "unreadable payload, defaults".to_string(),
    }
}

fn describe_origin(trace: &CategoryTrace) -> String {
    match trace.origin {
        None => "-".to_string(),
        Some((Container::Root, key)) => key.to_string(),
        Some((container, key)) => {
            let scope = match container {
                Container::Demographics => "demographics",
                Container::Predictions => "predictions",
                Container::Result => "result",
                Container::Data => "data",
                Container::Root => "",
            };
            format!("{}.{}", scope, key)
        }
    }
}

fn describe_shape(shape: &NodeShape) -> String {
    match shape {
        NodeShape::ArrayOfRecords => "records".to_string(),
        NodeShape::NestedArray(key) => format!("nested '{}'", key),
        NodeShape::KeyedScores => "keyed".to_string(),
        NodeShape::Empty => "-".to_string(),
    }
}

fn fallback_cell(trace: &CategoryTrace) -> Cell {
    match (trace.used_fallback_value, trace.used_fallback_ranked) {
        (false, false) => Cell::new("no").fg(Color::Green),
        (true, true) => Cell::new("value+list").fg(Color::Red),
        (true, false) => Cell::new("value").fg(Color::Yellow),
        (false, true) => Cell::new("list").fg(Color::Yellow),
    }
}

fn shown_color(score: f64) -> Color {
    match display_percent(score) {
        p if p >= 50 => Color::Green,
        0 => Color::DarkGrey,
        _ => Color::Reset,
    }
}
