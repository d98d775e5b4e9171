//! Dashboard
//!
//! The data-refresh and rendering pipeline.
//!
//! ## Components
//!
//! - **SummaryLoader**: fetches the global summary, renders world totals, the
//!   "last updated" label and the country ranking
//! - **CountryDrillDownController**: on selection of a ranking item, fetches
//!   the deaths/recovered/confirmed series for that country and renders two
//!   lists, their totals and a two-week chart
//!
//! Both components share one [`View`] (element tree plus chart renderer)
//! behind an async mutex. The lock is only held for synchronous DOM work,
//! never across a fetch.

mod drilldown;
mod layout;
mod loading;
mod summary;

pub use drilldown::{
    chart_series, current_total, resolve_selection, sort_by_date_desc, CountryDetail,
    CountryDrillDownController, DrillDownOutcome,
};
pub use layout::{build_layout, CHART_CANVAS_ID};
pub use loading::{
    create_spinner_element, end_loading_animation, start_loading_animation, LoadingGate,
    LoadingGuard, DEATHS_SPINNER_ID, RECOVERED_SPINNER_ID,
};
pub use summary::{rank_by_confirmed, world_totals, SummaryLoader, SummaryOutcome, WorldTotals};

use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::chart::ChartRenderer;
use crate::covid::{CovidApi, FetchError};
use crate::dom::{Dom, NodeId};
use crate::format::Locale;

/// Errors surfaced by the dashboard components
#[derive(Error, Debug)]
pub enum DashboardError {
    /// A fixed element the dashboard renders into is absent
    #[error("Missing element: {0}")]
    MissingElement(String),

    /// The statistics API failed
    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// A click landed outside any ranking item
    #[error("Node {0} is not inside a ranking item")]
    NotSelectable(NodeId),
}

/// Element tree and chart renderer, mutated together
pub struct View<D, C> {
    pub dom: D,
    pub chart: C,
}

/// Display settings for the dashboard
#[derive(Debug, Clone)]
pub struct DashboardSettings {
    pub locale: Locale,
    /// Number of trailing confirmed records shown in the chart
    pub chart_window: usize,
    pub chart_title: String,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            locale: Locale::EnUs,
            chart_window: 14,
            chart_title: "Confirmed for the last two weeks".to_string(),
        }
    }
}

/// Handles to the fixed elements, resolved once
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardElements {
    pub confirmed_total: NodeId,
    pub deaths_total: NodeId,
    pub recovered_total: NodeId,
    pub last_updated: NodeId,
    pub rank_list: NodeId,
    pub deaths_list: NodeId,
    pub recovered_list: NodeId,
    pub line_chart: NodeId,
    pub deaths_spinner: NodeId,
    pub recovered_spinner: NodeId,
}

impl DashboardElements {
    /// Query the fixed elements and create the two spinners
    pub fn resolve<D: Dom + ?Sized>(dom: &mut D) -> Result<Self, DashboardError> {
        fn find<D: Dom + ?Sized>(dom: &D, selector: &str) -> Result<NodeId, DashboardError> {
            dom.query(selector)
                .ok_or_else(|| DashboardError::MissingElement(selector.to_string()))
        }

        let confirmed_total = find(dom, ".confirmed-total")?;
        let deaths_total = find(dom, ".deaths")?;
        let recovered_total = find(dom, ".recovered")?;
        let last_updated = find(dom, ".last-updated-time")?;
        let rank_list = find(dom, ".rank-list")?;
        let deaths_list = find(dom, ".deaths-list")?;
        let recovered_list = find(dom, ".recovered-list")?;
        let line_chart = find(dom, &format!("#{}", CHART_CANVAS_ID))?;

        Ok(Self {
            confirmed_total,
            deaths_total,
            recovered_total,
            last_updated,
            rank_list,
            deaths_list,
            recovered_list,
            line_chart,
            deaths_spinner: create_spinner_element(dom, DEATHS_SPINNER_ID),
            recovered_spinner: create_spinner_element(dom, RECOVERED_SPINNER_ID),
        })
    }
}

/// The assembled dashboard: one view, one summary loader, one drill-down
/// controller
pub struct Dashboard<D, C> {
    view: Arc<Mutex<View<D, C>>>,
    elements: DashboardElements,
    summary: SummaryLoader<D, C>,
    drilldown: CountryDrillDownController<D, C>,
}

impl<D: Dom, C: ChartRenderer> Dashboard<D, C> {
    /// Wire the components to an element tree that already holds the layout
    pub fn new(
        api: Arc<dyn CovidApi>,
        mut dom: D,
        chart: C,
        settings: DashboardSettings,
    ) -> Result<Self, DashboardError> {
        let elements = DashboardElements::resolve(&mut dom)?;
        let view = Arc::new(Mutex::new(View { dom, chart }));

        let summary = SummaryLoader::new(
            Arc::clone(&api),
            Arc::clone(&view),
            elements,
            settings.locale,
        );
        let drilldown = CountryDrillDownController::new(api, Arc::clone(&view), elements, settings);

        Ok(Self {
            view,
            elements,
            summary,
            drilldown,
        })
    }

    pub fn view(&self) -> &Arc<Mutex<View<D, C>>> {
        &self.view
    }

    pub fn elements(&self) -> &DashboardElements {
        &self.elements
    }

    pub fn summary(&self) -> &SummaryLoader<D, C> {
        &self.summary
    }

    pub fn drilldown(&self) -> &CountryDrillDownController<D, C> {
        &self.drilldown
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::SvgChartRenderer;
    use crate::dom::Document;

    #[test]
    fn test_resolve_elements_from_layout() {
        let mut doc = testing::page();
        let elements = DashboardElements::resolve(&mut doc).unwrap();

        assert_eq!(doc.tag_name(elements.rank_list), Some("ol"));
        assert_eq!(doc.tag_name(elements.deaths_total), Some("p"));
        assert_eq!(doc.attribute(elements.line_chart, "id"), Some("lineChart"));
        assert!(!doc.is_attached(elements.deaths_spinner));
        assert_ne!(elements.deaths_spinner, elements.recovered_spinner);
    }

    #[test]
    fn test_resolve_reports_missing_element() {
        let mut doc = Document::new();
        let err = DashboardElements::resolve(&mut doc).unwrap_err();
        assert!(matches!(err, DashboardError::MissingElement(s) if s == ".confirmed-total"));
    }

    #[test]
    fn test_dashboard_requires_layout() {
        let api: Arc<dyn CovidApi> = Arc::new(testing::MockApi::default());
        let result = Dashboard::new(
            api,
            Document::new(),
            SvgChartRenderer::default(),
            DashboardSettings::default(),
        );
        assert!(result.is_err());
    }
}
