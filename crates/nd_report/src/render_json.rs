//! Chart.js configuration renderer.
//!
//! Emits `{ type, data: { labels, datasets: [..] }, options }` for one
//! `ChartDataset`. Key order is fixed: the workspace enables serde_json's
//! `preserve_order`, and this renderer relies on the insertion order of
//! `serde_json::Map<String, Value>`.

use nd_core::ChartKind;
use serde_json::{Map as JsonMap, Value};

use crate::structure::ChartDataset;

/// Build the Chart.js config object in fixed order: type → data → options.
pub fn render_chart_json(ds: &ChartDataset) -> Value {
    let mut root = obj();
    root.insert("type".into(), Value::String(ds.kind.as_str().into()));
    root.insert("data".into(), data_json(ds));
    root.insert("options".into(), options_json(ds));
    Value::Object(root)
}

/* ----------------------- sections ----------------------- */

fn data_json(ds: &ChartDataset) -> Value {
    let mut o = obj();
    o.insert("labels".into(), strings(&ds.labels));

    // An empty-state chart has no series at all.
    let datasets = if ds.is_empty() { Vec::new() } else { vec![series_json(ds)] };
    o.insert("datasets".into(), Value::Array(datasets));
    Value::Object(o)
}

fn series_json(ds: &ChartDataset) -> Value {
    // label → data → backgroundColor → borderColor → borderWidth → (line: fill, tension)
    let mut s = obj();
    s.insert("label".into(), Value::String(ds.series_label.clone()));
    s.insert("data".into(), Value::Array(ds.values.iter().map(|&v| Value::from(v)).collect()));
    s.insert("backgroundColor".into(), strings(&ds.fill_colors));
    s.insert("borderColor".into(), strings(&ds.stroke_colors));
    s.insert("borderWidth".into(), Value::from(1u8));

    if ds.kind == ChartKind::Line {
        s.insert("fill".into(), Value::Bool(true));
        s.insert("tension".into(), Value::from(0.4_f64));
    }
    Value::Object(s)
}

fn options_json(ds: &ChartDataset) -> Value {
    let mut o = obj();
    o.insert("responsive".into(), Value::Bool(true));

    let mut plugins = obj();
    let title_text = ds.empty_message.as_deref().unwrap_or(&ds.series_label);
    let mut title = obj();
    title.insert("display".into(), Value::Bool(!title_text.is_empty()));
    title.insert("text".into(), Value::String(title_text.to_string()));
    plugins.insert("title".into(), Value::Object(title));

    let mut tooltip = obj();
    tooltip.insert("mode".into(), "index".into());
    tooltip.insert("intersect".into(), Value::Bool(false));
    plugins.insert("tooltip".into(), Value::Object(tooltip));
    o.insert("plugins".into(), Value::Object(plugins));

    // Cartesian axes only exist for line and bar.
    if matches!(ds.kind, ChartKind::Line | ChartKind::Bar) {
        let mut scales = obj();
        for axis in ["x", "y"] {
            let mut a = obj();
            a.insert("beginAtZero".into(), Value::Bool(true));
            scales.insert(axis.into(), Value::Object(a));
        }
        o.insert("scales".into(), Value::Object(scales));
    }
    Value::Object(o)
}

/* ----------------------- helpers ----------------------- */

#[inline]
fn obj() -> JsonMap<String, Value> {
    JsonMap::new()
}

fn strings(xs: &[String]) -> Value {
    Value::Array(xs.iter().cloned().map(Value::String).collect())
}
