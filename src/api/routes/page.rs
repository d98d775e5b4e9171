//! Page Route
//!
//! - GET / - The dashboard, rendered from the current element tree

use axum::{extract::State, response::Html};
use std::collections::HashMap;
use std::sync::Arc;

use crate::api::state::AppState;
use crate::dashboard::CHART_CANVAS_ID;

const STYLE: &str = r#"
*{box-sizing:border-box;margin:0;padding:0}
body{background:#1a1a2e;color:#f5eaea;font-family:'Exo 2',sans-serif}
.flex{display:flex}.column{flex-direction:column}
.justify-center{justify-content:center}.align-center{align-items:center}
.header{padding:1rem;background:#16213e}
.main{gap:1rem;padding:1rem}
.left-panel{width:30%;gap:1rem}.right-panel{flex:1;gap:1rem}
.confirmed-total{font-size:2rem;color:#feb72b}
.rank-list,.deaths-list,.recovered-list{list-style:none;max-height:24rem;overflow-y:auto}
.list-item{gap:.5rem;padding:.5rem;cursor:pointer;border-bottom:1px solid #374151}
.list-item:hover{background:#16213e}
.list-item-b{gap:.5rem;padding:.25rem .5rem}
.cases{color:#feb72b}.deaths{color:#e84545}.recovered{color:#6ab04c}
.error{color:#e84545}
.summary{gap:1rem}.summary>div{flex:1}
.ripple-spinner{position:relative;width:40px;height:40px}
.ripple-spinner div{position:absolute;border:3px solid #feb72b;border-radius:50%;animation:ripple 1s infinite}
.ripple-spinner div:nth-child(2){animation-delay:-.5s}
@keyframes ripple{0%{width:0;height:0;opacity:1}100%{width:40px;height:40px;opacity:0}}
"#;

const SCRIPT: &str = r#"
document.querySelector('.rank-list').addEventListener('click', function (event) {
  var node = event.target.closest('[data-node]');
  if (!node) { return; }
  fetch('/api/v1/click/' + node.dataset.node, { method: 'POST' })
    .then(function (res) { return res.json(); })
    .then(function (body) { if (body.outcome !== 'ignored') { location.reload(); } });
});
"#;

/// GET /
pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    let chart_node = state.dashboard.elements().line_chart;

    let body = {
        let view = state.dashboard.view().lock().await;
        let mut raw = HashMap::new();
        if let Some(svg) = view.chart.svg(CHART_CANVAS_ID) {
            raw.insert(chart_node, svg.to_string());
        }
        view.dom.to_html(&raw)
    };

    Html(format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width,initial-scale=1\">\n\
         <title>COVID-19 Dashboard</title>\n<style>{}</style>\n</head>\n{}\n<script>{}</script>\n</html>\n",
        STYLE, body, SCRIPT
    ))
}
