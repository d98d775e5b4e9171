//! Summary loading
//!
//! World totals, the "last updated" label and the country ranking.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use super::{DashboardElements, DashboardError, View};
use crate::chart::ChartRenderer;
use crate::covid::{CountryTotals, CovidApi};
use crate::dom::Dom;
use crate::format::{format_count, Locale};

/// Sums of the per-country totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WorldTotals {
    pub confirmed: u64,
    pub deaths: u64,
    pub recovered: u64,
}

/// What the last successful load rendered
#[derive(Debug, Clone, Serialize)]
pub struct SummaryOutcome {
    pub world: WorldTotals,
    pub countries: usize,
    pub as_of: DateTime<Utc>,
}

/// Exact integer sums of confirmed, deaths and recovered over all countries
///
/// Sums saturate at `u64::MAX` instead of overflowing.
pub fn world_totals(countries: &[CountryTotals]) -> WorldTotals {
    countries.iter().fold(WorldTotals::default(), |acc, c| WorldTotals {
        confirmed: acc.confirmed.saturating_add(c.total_confirmed),
        deaths: acc.deaths.saturating_add(c.total_deaths),
        recovered: acc.recovered.saturating_add(c.total_recovered),
    })
}

/// Order countries by confirmed cases, highest first
///
/// The sort is stable: countries with equal totals keep their input order.
pub fn rank_by_confirmed(mut countries: Vec<CountryTotals>) -> Vec<CountryTotals> {
    countries.sort_by(|a, b| b.total_confirmed.cmp(&a.total_confirmed));
    countries
}

/// Fetches the global summary and renders it
pub struct SummaryLoader<D, C> {
    api: Arc<dyn CovidApi>,
    view: Arc<Mutex<View<D, C>>>,
    elements: DashboardElements,
    locale: Locale,
    last: RwLock<Option<SummaryOutcome>>,
}

impl<D: Dom, C: ChartRenderer> SummaryLoader<D, C> {
    pub fn new(
        api: Arc<dyn CovidApi>,
        view: Arc<Mutex<View<D, C>>>,
        elements: DashboardElements,
        locale: Locale,
    ) -> Self {
        Self {
            api,
            view,
            elements,
            locale,
            last: RwLock::new(None),
        }
    }

    /// Outcome of the most recent successful load
    pub async fn last_outcome(&self) -> Option<SummaryOutcome> {
        self.last.read().await.clone()
    }

    /// Fetch the summary and render totals, timestamp and ranking
    ///
    /// On failure the page is left as it was and the error is returned.
    pub async fn load_summary(&self) -> Result<SummaryOutcome, DashboardError> {
        let summary = match self.api.fetch_summary().await {
            Ok(summary) => summary,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load summary");
                return Err(e.into());
            }
        };

        let world = world_totals(&summary.countries);
        if let Some(global) = &summary.global {
            if global.total_confirmed != world.confirmed {
                tracing::debug!(
                    reported = global.total_confirmed,
                    summed = world.confirmed,
                    "Reported global total differs from per-country sum"
                );
            }
        }

        let ranked = rank_by_confirmed(summary.countries);
        let outcome = SummaryOutcome {
            world,
            countries: ranked.len(),
            as_of: summary.date,
        };

        {
            let mut view = self.view.lock().await;
            let dom = &mut view.dom;
            let el = &self.elements;

            dom.set_text(el.confirmed_total, &format_count(world.confirmed));
            dom.set_text(el.deaths_total, &format_count(world.deaths));
            dom.set_text(el.recovered_total, &format_count(world.recovered));
            render_ranking(dom, el, &ranked);
            dom.set_text(el.last_updated, &self.locale.timestamp(&summary.date));
        }

        tracing::info!(
            countries = outcome.countries,
            confirmed = world.confirmed,
            as_of = %outcome.as_of,
            "Summary loaded"
        );

        *self.last.write().await = Some(outcome.clone());
        Ok(outcome)
    }
}

fn render_ranking<D: Dom + ?Sized>(dom: &mut D, el: &DashboardElements, ranked: &[CountryTotals]) {
    dom.remove_children(el.rank_list);

    for country in ranked {
        let li = dom.create_element("li");
        dom.set_attribute(li, "class", "list-item flex align-center");
        dom.set_attribute(li, "id", &country.slug);

        let span = dom.create_element("span");
        dom.set_text(span, &format_count(country.total_confirmed));
        dom.set_attribute(span, "class", "cases");

        let p = dom.create_element("p");
        dom.set_attribute(p, "class", "country");
        dom.set_text(p, &country.country);

        dom.append_child(li, span);
        dom.append_child(li, p);
        dom.append_child(el.rank_list, li);
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{page, MockApi};
    use super::super::{Dashboard, DashboardSettings};
    use super::*;
    use crate::chart::SvgChartRenderer;
    use crate::covid::GlobalSummary;
    use crate::dom::Document;
    use chrono::TimeZone;
    use std::sync::atomic::Ordering;

    fn summary(countries: Vec<CountryTotals>) -> GlobalSummary {
        GlobalSummary {
            countries,
            date: Utc.with_ymd_and_hms(2021, 1, 3, 15, 4, 5).unwrap(),
            global: None,
            message: String::new(),
        }
    }

    fn dashboard(api: MockApi) -> (Arc<MockApi>, Dashboard<Document, SvgChartRenderer>) {
        let api = Arc::new(api);
        let dash = Dashboard::new(
            api.clone(),
            page(),
            SvgChartRenderer::default(),
            DashboardSettings::default(),
        )
        .unwrap();
        (api, dash)
    }

    fn ranking_ids(doc: &Document, list: crate::dom::NodeId) -> Vec<String> {
        doc.children(list)
            .iter()
            .filter_map(|li| doc.attribute(*li, "id").map(str::to_string))
            .collect()
    }

    #[test]
    fn test_rank_is_stable_descending() {
        let countries = vec![
            CountryTotals::new("A", "a").confirmed(10),
            CountryTotals::new("B", "b").confirmed(30),
            CountryTotals::new("C", "c").confirmed(10),
            CountryTotals::new("D", "d").confirmed(30),
            CountryTotals::new("E", "e").confirmed(20),
        ];

        let ranked: Vec<_> = rank_by_confirmed(countries)
            .into_iter()
            .map(|c| c.slug)
            .collect();
        assert_eq!(ranked, vec!["b", "d", "e", "a", "c"]);
    }

    #[test]
    fn test_world_totals_order_independent() {
        let countries = vec![
            CountryTotals::new("A", "a").confirmed(100).deaths(3).recovered(50),
            CountryTotals::new("B", "b").confirmed(500).deaths(7).recovered(20),
            CountryTotals::new("C", "c").confirmed(1).deaths(0).recovered(1),
        ];
        let expected = WorldTotals {
            confirmed: 601,
            deaths: 10,
            recovered: 71,
        };

        assert_eq!(world_totals(&countries), expected);

        let mut reversed = countries.clone();
        reversed.reverse();
        assert_eq!(world_totals(&reversed), expected);

        let mut rotated = countries;
        rotated.rotate_left(1);
        assert_eq!(world_totals(&rotated), expected);
    }

    #[test]
    fn test_world_totals_empty() {
        assert_eq!(world_totals(&[]), WorldTotals::default());
    }

    #[test]
    fn test_world_totals_saturate() {
        let countries = vec![
            CountryTotals::new("A", "a").confirmed(u64::MAX - 1).deaths(1),
            CountryTotals::new("B", "b").confirmed(5).deaths(2),
        ];
        let totals = world_totals(&countries);
        assert_eq!(totals.confirmed, u64::MAX);
        assert_eq!(totals.deaths, 3);
    }

    #[tokio::test]
    async fn test_load_summary_renders_ranking_and_totals() {
        let (_api, dash) = dashboard(MockApi {
            summary: Some(summary(vec![
                CountryTotals::new("A", "a").confirmed(100),
                CountryTotals::new("B", "b").confirmed(500),
            ])),
            ..Default::default()
        });

        let outcome = dash.summary().load_summary().await.unwrap();
        assert_eq!(outcome.world.confirmed, 600);
        assert_eq!(outcome.countries, 2);

        let view = dash.view().lock().await;
        let el = dash.elements();
        assert_eq!(ranking_ids(&view.dom, el.rank_list), vec!["b", "a"]);
        assert_eq!(view.dom.text(el.confirmed_total), Some("600"));
        assert_eq!(view.dom.text(el.last_updated), Some("1/3/2021, 3:04:05 PM"));

        let first = view.dom.children(el.rank_list)[0];
        assert_eq!(view.dom.text_content(first), "500B");
        assert_eq!(view.dom.attribute(first, "class"), Some("list-item flex align-center"));
    }

    #[tokio::test]
    async fn test_load_summary_formats_large_totals() {
        let (_api, dash) = dashboard(MockApi {
            summary: Some(summary(vec![
                CountryTotals::new("US", "united-states")
                    .confirmed(20_000_000)
                    .deaths(350_000)
                    .recovered(0),
                CountryTotals::new("India", "india")
                    .confirmed(10_300_000)
                    .deaths(149_000)
                    .recovered(9_900_000),
            ])),
            ..Default::default()
        });

        dash.summary().load_summary().await.unwrap();

        let view = dash.view().lock().await;
        let el = dash.elements();
        assert_eq!(view.dom.text(el.confirmed_total), Some("30,300,000"));
        assert_eq!(view.dom.text(el.deaths_total), Some("499,000"));
        assert_eq!(view.dom.text(el.recovered_total), Some("9,900,000"));
    }

    #[tokio::test]
    async fn test_reload_replaces_ranking() {
        let (_api, dash) = dashboard(MockApi {
            summary: Some(summary(vec![
                CountryTotals::new("A", "a").confirmed(1),
                CountryTotals::new("B", "b").confirmed(2),
            ])),
            ..Default::default()
        });

        dash.summary().load_summary().await.unwrap();
        dash.summary().load_summary().await.unwrap();

        let view = dash.view().lock().await;
        assert_eq!(view.dom.children(dash.elements().rank_list).len(), 2);
    }

    #[tokio::test]
    async fn test_repeated_reloads_reuse_nodes() {
        let countries = (0..200)
            .map(|i| CountryTotals::new(&format!("C{}", i), &format!("c{}", i)).confirmed(i))
            .collect();
        let (_api, dash) = dashboard(MockApi {
            summary: Some(summary(countries)),
            ..Default::default()
        });

        dash.summary().load_summary().await.unwrap();
        let capacity = dash.view().lock().await.dom.capacity();

        for _ in 0..50 {
            dash.summary().load_summary().await.unwrap();
        }

        let view = dash.view().lock().await;
        assert_eq!(view.dom.capacity(), capacity);
        assert_eq!(view.dom.children(dash.elements().rank_list).len(), 200);
    }

    #[tokio::test]
    async fn test_failed_load_keeps_page() {
        let (api, dash) = dashboard(MockApi::default());

        let err = dash.summary().load_summary().await.unwrap_err();
        assert!(matches!(err, DashboardError::Fetch(_)));
        assert_eq!(api.summary_calls.load(Ordering::SeqCst), 1);
        assert!(dash.summary().last_outcome().await.is_none());

        let view = dash.view().lock().await;
        let el = dash.elements();
        assert_eq!(view.dom.text(el.confirmed_total), Some("0"));
        assert_eq!(view.dom.text(el.last_updated), Some("-"));
        assert!(view.dom.children(el.rank_list).is_empty());
    }
}
