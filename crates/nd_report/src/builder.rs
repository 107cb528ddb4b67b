//! Chart dataset builder: aggregated groups → labels, values and colors.
//!
//! Labels: area verbatim, month through the fixed month table, year in
//! decimal, composite keys joined with " / ", the empty key as "Total".
//! Colors: `Bar` and `Pie` take one palette pair per position; `Line` and
//! `Radar` repeat the fixed series color once per point.

use nd_algo::AggregatedGroup;
use nd_core::palette::DEFAULT_SERIES_COLOR;
use nd_core::{ChartKind, ColorPair, MonthTable, Palette, Rgb};

use crate::{structure::ChartDataset, ReportError};

/// Presentation knobs for one build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    pub month_table: MonthTable,
    pub palette: Palette,
    pub series_color: Rgb,
    pub series_label: String,
    /// When set, empty input yields an empty dataset carrying this text
    /// instead of `ReportError::EmptyResult`.
    pub empty_message: Option<String>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            month_table: MonthTable::default(),
            palette: Palette::default(),
            series_color: DEFAULT_SERIES_COLOR,
            series_label: String::new(),
            empty_message: None,
        }
    }
}

impl BuildOptions {
    pub fn with_series_label(mut self, label: impl Into<String>) -> Self {
        self.series_label = label.into();
        self
    }

    pub fn with_empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = Some(message.into());
        self
    }
}

/// Build the render-ready dataset. The input order is kept as-is.
pub fn build_chart_dataset(
    groups: &[AggregatedGroup],
    kind: ChartKind,
    opts: &BuildOptions,
) -> Result<ChartDataset, ReportError> {
    if groups.is_empty() {
        return match &opts.empty_message {
            Some(msg) => Ok(ChartDataset::empty(kind, opts.series_label.clone(), msg.clone())),
            None => Err(ReportError::EmptyResult),
        };
    }

    let n = groups.len();
    let mut labels = Vec::with_capacity(n);
    let mut values = Vec::with_capacity(n);
    let mut fill_colors = Vec::with_capacity(n);
    let mut stroke_colors = Vec::with_capacity(n);

    let series = opts.palette.pair_for(opts.series_color);
    for (i, g) in groups.iter().enumerate() {
        let ColorPair { fill, stroke } = if kind.uses_palette() {
            opts.palette.assign(i)
        } else {
            series.clone()
        };
        labels.push(g.key.label(opts.month_table));
        values.push(g.total);
        fill_colors.push(fill);
        stroke_colors.push(stroke);
    }

    Ok(ChartDataset {
        kind,
        series_label: opts.series_label.clone(),
        labels,
        values,
        fill_colors,
        stroke_colors,
        empty_message: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use nd_core::{GroupKey, Month};
    use proptest::prelude::*;

    fn area(a: &str, t: u64) -> AggregatedGroup {
        AggregatedGroup::new(GroupKey::area(a), t)
    }

    #[test]
    fn bar_uses_palette_by_position() {
        let opts = BuildOptions::default();
        let ds = build_chart_dataset(&[area("A", 8), area("B", 2)], ChartKind::Bar, &opts).unwrap();
        assert_eq!(ds.labels, vec!["A", "B"]);
        assert_eq!(ds.values, vec![8, 2]);
        assert_eq!(ds.fill_colors[0], "rgba(255, 99, 132, 0.2)");
        assert_eq!(ds.stroke_colors[1], "rgb(54, 162, 235)");
        assert!(ds.is_aligned());
    }

    #[test]
    fn line_repeats_series_color() {
        let groups = [
            AggregatedGroup::new(GroupKey::month(Month::JANUARY), 5),
            AggregatedGroup::new(GroupKey::month(Month::DECEMBER), 3),
        ];
        let ds = build_chart_dataset(&groups, ChartKind::Line, &BuildOptions::default()).unwrap();
        assert_eq!(ds.labels, vec!["Janeiro", "Dezembro"]);
        assert_eq!(ds.fill_colors, vec!["rgba(75, 192, 192, 0.2)"; 2]);
        assert_eq!(ds.stroke_colors, vec!["rgb(75, 192, 192)"; 2]);
    }

    #[test]
    fn month_table_is_configurable() {
        let opts = BuildOptions { month_table: MonthTable::En, ..BuildOptions::default() };
        let groups = [AggregatedGroup::new(GroupKey::month(Month::JANUARY), 1)];
        let ds = build_chart_dataset(&groups, ChartKind::Radar, &opts).unwrap();
        assert_eq!(ds.labels, vec!["January"]);
    }

    #[test]
    fn empty_groups() {
        assert_eq!(
            build_chart_dataset(&[], ChartKind::Pie, &BuildOptions::default()),
            Err(ReportError::EmptyResult)
        );
        let opts = BuildOptions::default().with_empty_message("Sem dados");
        let ds = build_chart_dataset(&[], ChartKind::Pie, &opts).unwrap();
        assert!(ds.is_empty());
        assert!(ds.is_aligned());
        assert_eq!(ds.empty_message.as_deref(), Some("Sem dados"));
    }

    #[test]
    fn composite_and_total_labels() {
        let groups = [
            AggregatedGroup::new(GroupKey::default(), 10),
            AggregatedGroup::new(
                GroupKey::new(vec![
                    nd_core::DimValue::Year(2020),
                    nd_core::DimValue::Month(Month::JANUARY),
                ]),
                5,
            ),
        ];
        let ds = build_chart_dataset(&groups, ChartKind::Bar, &BuildOptions::default()).unwrap();
        assert_eq!(ds.labels, vec!["Total", "2020 / Janeiro"]);
    }

    proptest! {
        #[test]
        fn sequences_stay_aligned(totals in prop::collection::vec(0u64..1000, 1..60), k in 0usize..4) {
            let kind = [ChartKind::Line, ChartKind::Bar, ChartKind::Pie, ChartKind::Radar][k];
            let groups: Vec<_> = totals.iter().enumerate()
                .map(|(i, &t)| area(&format!("a{i}"), t))
                .collect();
            let ds = build_chart_dataset(&groups, kind, &BuildOptions::default()).unwrap();
            prop_assert!(ds.is_aligned());
            prop_assert_eq!(ds.len(), groups.len());
            prop_assert_eq!(ds.total(), totals.iter().map(|&t| u128::from(t)).sum::<u128>());
        }
    }
}
