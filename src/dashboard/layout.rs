//! Page skeleton
//!
//! The fixed elements the dashboard components look up at construction.

use crate::dom::{Dom, NodeId};

pub const CHART_CANVAS_ID: &str = "lineChart";

/// Append the dashboard skeleton under `root`
pub fn build_layout<D: Dom + ?Sized>(dom: &mut D, root: NodeId) {
    let header = element(dom, root, "header", Some("header flex justify-center"), None);
    element(dom, header, "h1", Some("title"), Some("COVID-19 Dashboard"));

    let main = element(dom, root, "main", Some("main flex"), None);

    let left = element(dom, main, "section", Some("left-panel flex column"), None);
    let board = element(dom, left, "div", Some("total-board"), None);
    element(dom, board, "p", Some("board-title"), Some("Total Confirmed"));
    element(dom, board, "span", Some("confirmed-total"), Some("0"));
    let updated = element(dom, left, "div", Some("last-updated"), None);
    element(dom, updated, "p", Some("board-title"), Some("Last Updated"));
    element(dom, updated, "p", Some("last-updated-time"), Some("-"));
    element(dom, left, "ol", Some("rank-list"), None);

    let right = element(dom, main, "section", Some("right-panel flex column"), None);
    let summary = element(dom, right, "div", Some("summary flex"), None);

    let deaths = element(dom, summary, "div", Some("summary-deaths"), None);
    element(dom, deaths, "h3", Some("summary-title"), Some("Total Deaths"));
    element(dom, deaths, "p", Some("deaths"), Some("0"));
    element(dom, deaths, "ol", Some("deaths-list"), None);

    let recovered = element(dom, summary, "div", Some("summary-recovered"), None);
    element(dom, recovered, "h3", Some("summary-title"), Some("Total Recovered"));
    element(dom, recovered, "p", Some("recovered"), Some("0"));
    element(dom, recovered, "ol", Some("recovered-list"), None);

    let chart = element(dom, right, "div", Some("chart-container"), None);
    let figure = dom.create_element("figure");
    dom.set_attribute(figure, "id", CHART_CANVAS_ID);
    dom.append_child(chart, figure);
}

fn element<D: Dom + ?Sized>(
    dom: &mut D,
    parent: NodeId,
    tag: &str,
    class: Option<&str>,
    text: Option<&str>,
) -> NodeId {
    let node = dom.create_element(tag);
    if let Some(class) = class {
        dom.set_attribute(node, "class", class);
    }
    if let Some(text) = text {
        dom.set_text(node, text);
    }
    dom.append_child(parent, node);
    node
}
