//! The four dashboard views, each a pure query over the resident dataset.
//!
//! | View               | Needs       | Filter          | Grouped by | Order                       |
//! |--------------------|-------------|-----------------|------------|-----------------------------|
//! | `MonthlyBreakdown` | area + year | area and year   | month      | January → December          |
//! | `YearlyTotals`     | nothing     | none            | year       | ascending                   |
//! | `TopAreas`         | nothing     | year, if chosen | area       | top `top_n` by total        |
//! | `AreaYears`        | area        | area            | year       | dataset years, zero-filled  |

use nd_algo::{aggregate, fill_missing, rank_top, sort_by_key};
use nd_core::{Dataset, Dimension, FilterSelection, GroupKey, Predicate};
use nd_io::config::Params;
use nd_report::{build_chart_dataset, BuildOptions, ChartDataset};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{list_years, PipelineError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    MonthlyBreakdown,
    YearlyTotals,
    TopAreas,
    AreaYears,
}

impl View {
    pub const ALL: [View; 4] =
        [View::MonthlyBreakdown, View::YearlyTotals, View::TopAreas, View::AreaYears];

    /// Chart heading shown above the view.
    pub fn title(self) -> &'static str {
        match self {
            View::MonthlyBreakdown => "Gráfico de Notificações de Malária",
            View::YearlyTotals => "Gráfico de Casos Registrados ao Longo dos Anos",
            View::TopAreas => "Gráfico de Notificações de Malária por Município",
            View::AreaYears => "Gráfico de Casos Registrados ao Longo dos Anos Por Municipio",
        }
    }

    /// Prompt shown while the selection the view needs is missing.
    pub fn prompt(self) -> Option<&'static str> {
        match self {
            View::MonthlyBreakdown => Some("Selecione um Município e um Ano para exibir o gráfico."),
            View::AreaYears => Some("Por favor, selecione uma cidade para visualizar o gráfico."),
            View::YearlyTotals | View::TopAreas => None,
        }
    }

    pub fn dimension(self) -> Dimension {
        match self {
            View::MonthlyBreakdown => Dimension::Month,
            View::YearlyTotals | View::AreaYears => Dimension::Year,
            View::TopAreas => Dimension::Area,
        }
    }
}

/// Recompute one view from scratch for the given selection.
pub fn query_view(
    dataset: &Dataset,
    view: View,
    selection: &FilterSelection,
    params: &Params,
) -> Result<ChartDataset, PipelineError> {
    let incomplete = || PipelineError::SelectionIncomplete(view.prompt().unwrap_or_default());

    let (pred, series_label) = match view {
        View::MonthlyBreakdown => {
            let (Some(area), Some(year)) = (selection.area.as_deref(), selection.year) else {
                return Err(incomplete());
            };
            (
                Predicate::area_year(area, year),
                format!("Notificações de Malária em {area} ({year})"),
            )
        }
        View::YearlyTotals => (Predicate::none(), "Notificações de Malária por Ano".to_string()),
        View::TopAreas => (
            Predicate { area: None, year: selection.year },
            "Notificações por Município".to_string(),
        ),
        View::AreaYears => {
            let Some(area) = selection.area.as_deref() else {
                return Err(incomplete());
            };
            (Predicate::area(area), area.to_string())
        }
    };

    let mut groups = aggregate(dataset, &pred, view.dimension())?;
    if groups.is_empty() {
        // Without a message the builder reports EmptyResult.
        debug!(?view, area = ?pred.area, year = ?pred.year, "no records match selection");
    } else {
        match view {
            View::MonthlyBreakdown | View::YearlyTotals => sort_by_key(&mut groups),
            View::TopAreas => groups = rank_top(&groups, params.top_n),
            View::AreaYears => {
                // A year with no records for this area is a real zero.
                let keys: Vec<GroupKey> =
                    list_years(dataset).into_iter().map(GroupKey::year).collect();
                groups = fill_missing(&groups, &keys);
            }
        }
    }

    let opts = BuildOptions {
        month_table: params.month_names,
        palette: params.palette()?,
        series_color: params.series_color,
        series_label,
        empty_message: params.empty_message.clone(),
    };
    let chart = build_chart_dataset(&groups, selection.chart_kind, &opts)?;
    debug!(?view, kind = %selection.chart_kind, points = chart.len(), "view computed");
    Ok(chart)
}
