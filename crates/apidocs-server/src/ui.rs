use minijinja::{Environment, context};
use serde::Serialize;

use apidocs_core::EndpointTable;

use crate::error::ServerError;

const INDEX_TEMPLATE: &str = include_str!("../templates/index.html.j2");

/// Entry of the UI's version selector.
#[derive(Debug, Serialize)]
struct UiUrl<'a> {
    url: &'a str,
    name: &'a str,
}

/// Render the browsing UI listing every endpoint of the table.
pub fn render_index(table: &EndpointTable, title: &str) -> Result<String, ServerError> {
    let mut env = Environment::new();
    env.add_template("index.html.j2", INDEX_TEMPLATE)?;
    let tmpl = env.get_template("index.html.j2")?;

    let urls: Vec<UiUrl<'_>> = table
        .entries
        .iter()
        .map(|e| UiUrl {
            url: &e.url,
            name: &e.display_label,
        })
        .collect();
    // Embedded in a <script> block, so a closing tag must not appear verbatim.
    let urls_json = serde_json::to_string(&urls)?.replace("</", "<\\/");

    let html = tmpl.render(context! {
        title => title,
        entries => &table.entries,
        urls_json => urls_json,
    })?;
    Ok(html)
}
