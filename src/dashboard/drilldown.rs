//! Country drill-down
//!
//! Idle → Loading → Idle. A selection that arrives while loading is dropped.

use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::loading::{end_loading_animation, start_loading_animation, LoadingGate};
use super::{DashboardElements, DashboardError, DashboardSettings, View, CHART_CANVAS_ID};
use crate::chart::{ChartRenderer, LineChart};
use crate::covid::{CountryDailyRecord, CovidApi, CovidStatus};
use crate::dom::{Dom, NodeId};
use crate::format::{format_count, Locale};

/// Shown in place of a total the last drill-down could not load
const UNKNOWN_TOTAL: &str = "-";

/// Result of a selection
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DrillDownOutcome {
    /// All three series arrived and were rendered
    Rendered(CountryDetail),
    /// Another drill-down was in flight
    Ignored,
}

/// What a completed drill-down put on the page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryDetail {
    pub country: String,
    pub deaths_total: u64,
    pub recovered_total: u64,
    pub deaths_rows: usize,
    pub recovered_rows: usize,
    pub chart_points: usize,
}

/// Records ordered newest first (stable for equal dates)
pub fn sort_by_date_desc(mut records: Vec<CountryDailyRecord>) -> Vec<CountryDailyRecord> {
    records.sort_by(|a, b| b.date.cmp(&a.date));
    records
}

/// Value of the most recent record of a newest-first series, 0 if empty
///
/// Counts in the live series are cumulative, so this is the current total.
pub fn current_total(sorted: &[CountryDailyRecord], field: fn(&CountryDailyRecord) -> u64) -> u64 {
    sorted.first().map(field).unwrap_or(0)
}

/// Active counts of the trailing `window` records, in the order received
pub fn chart_series(
    records: &[CountryDailyRecord],
    window: usize,
    locale: Locale,
    title: &str,
) -> LineChart {
    let recent = &records[records.len().saturating_sub(window)..];
    LineChart {
        title: title.to_string(),
        labels: recent.iter().map(|r| locale.chart_label(&r.date)).collect(),
        values: recent.iter().map(|r| r.active).collect(),
    }
}

/// Slug of the ranking item containing `target`
///
/// Walks up from the clicked element to the nearest `li` and reads its id.
/// Returns `None` when the click did not land inside an item of `rank_list`.
pub fn resolve_selection<D: Dom + ?Sized>(
    dom: &D,
    rank_list: NodeId,
    target: NodeId,
) -> Option<String> {
    let mut current = Some(target);
    while let Some(node) = current {
        if node == rank_list {
            return None;
        }
        if dom.tag_name(node) == Some("li") {
            if dom.parent(node) != Some(rank_list) {
                return None;
            }
            return dom
                .attribute(node, "id")
                .filter(|id| !id.is_empty())
                .map(str::to_string);
        }
        current = dom.parent(node);
    }
    None
}

/// Handles ranking selections
pub struct CountryDrillDownController<D, C> {
    api: Arc<dyn CovidApi>,
    view: Arc<Mutex<View<D, C>>>,
    elements: DashboardElements,
    settings: DashboardSettings,
    loading: LoadingGate,
}

impl<D: Dom, C: ChartRenderer> CountryDrillDownController<D, C> {
    pub fn new(
        api: Arc<dyn CovidApi>,
        view: Arc<Mutex<View<D, C>>>,
        elements: DashboardElements,
        settings: DashboardSettings,
    ) -> Self {
        Self {
            api,
            view,
            elements,
            settings,
            loading: LoadingGate::new(),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_loading()
    }

    /// Handle a click on any element inside the ranking list
    pub async fn on_click(&self, target: NodeId) -> Result<DrillDownOutcome, DashboardError> {
        let slug = {
            let view = self.view.lock().await;
            resolve_selection(&view.dom, self.elements.rank_list, target)
        };

        match slug {
            Some(slug) => self.on_country_selected(&slug).await,
            None => Err(DashboardError::NotSelectable(target)),
        }
    }

    /// Fetch and render the deaths, recovered and confirmed series of a country
    pub async fn on_country_selected(&self, slug: &str) -> Result<DrillDownOutcome, DashboardError> {
        let Some(_guard) = self.loading.try_acquire() else {
            tracing::warn!(country = %slug, "Drill-down in progress, ignoring selection");
            return Ok(DrillDownOutcome::Ignored);
        };

        {
            let mut view = self.view.lock().await;
            // Spinners are reused, so they must be out of the lists first
            end_loading_animation(&mut view.dom, &self.elements);
            view.dom.remove_children(self.elements.deaths_list);
            view.dom.remove_children(self.elements.recovered_list);
            start_loading_animation(&mut view.dom, &self.elements);
        }

        tracing::info!(country = %slug, "Loading country detail");

        let fetched = tokio::try_join!(
            self.api.fetch_country_status(slug, CovidStatus::Deaths),
            self.api.fetch_country_status(slug, CovidStatus::Recovered),
            self.api.fetch_country_status(slug, CovidStatus::Confirmed),
        );

        let mut view = self.view.lock().await;
        end_loading_animation(&mut view.dom, &self.elements);

        let (deaths, recovered, confirmed) = match fetched {
            Ok(series) => series,
            Err(e) => {
                tracing::error!(country = %slug, error = %e, "Failed to load country detail");
                let el = &self.elements;
                render_error_row(&mut view.dom, el.deaths_list);
                render_error_row(&mut view.dom, el.recovered_list);
                view.dom.set_text(el.deaths_total, UNKNOWN_TOTAL);
                view.dom.set_text(el.recovered_total, UNKNOWN_TOTAL);
                view.chart.clear(CHART_CANVAS_ID);
                return Err(e.into());
            }
        };

        let locale = self.settings.locale;
        let el = &self.elements;

        let deaths = sort_by_date_desc(deaths);
        render_series(&mut view.dom, el.deaths_list, &deaths, "deaths", |r| r.deaths, locale);
        let deaths_total = current_total(&deaths, |r| r.deaths);
        view.dom.set_text(el.deaths_total, &format_count(deaths_total));

        let recovered = sort_by_date_desc(recovered);
        render_series(
            &mut view.dom,
            el.recovered_list,
            &recovered,
            "recovered",
            |r| r.recovered,
            locale,
        );
        let recovered_total = current_total(&recovered, |r| r.recovered);
        view.dom.set_text(el.recovered_total, &format_count(recovered_total));

        let chart = chart_series(
            &confirmed,
            self.settings.chart_window,
            locale,
            &self.settings.chart_title,
        );
        let chart_points = chart.values.len();
        view.chart.render_line_chart(CHART_CANVAS_ID, chart);

        let detail = CountryDetail {
            country: slug.to_string(),
            deaths_total,
            recovered_total,
            deaths_rows: deaths.len(),
            recovered_rows: recovered.len(),
            chart_points,
        };
        tracing::info!(
            country = %slug,
            deaths = deaths_total,
            recovered = recovered_total,
            "Country detail rendered"
        );

        Ok(DrillDownOutcome::Rendered(detail))
    }
}

fn render_series<D: Dom + ?Sized>(
    dom: &mut D,
    list: NodeId,
    records: &[CountryDailyRecord],
    class: &str,
    field: fn(&CountryDailyRecord) -> u64,
    locale: Locale,
) {
    for record in records {
        let li = dom.create_element("li");
        dom.set_attribute(li, "class", "list-item-b flex align-center");

        let span = dom.create_element("span");
        dom.set_text(span, &format_count(field(record)));
        dom.set_attribute(span, "class", class);

        let p = dom.create_element("p");
        dom.set_text(p, &locale.list_date(&record.date));

        dom.append_child(li, span);
        dom.append_child(li, p);
        dom.append_child(list, li);
    }
}

fn render_error_row<D: Dom + ?Sized>(dom: &mut D, list: NodeId) {
    let li = dom.create_element("li");
    dom.set_attribute(li, "class", "list-item-b flex align-center error");
    let p = dom.create_element("p");
    dom.set_text(p, "Failed to load data");
    dom.append_child(li, p);
    dom.append_child(list, li);
}
