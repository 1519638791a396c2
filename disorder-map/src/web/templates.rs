//! Askama templates for the web frontend.

use askama::Template;
use serde::Serialize;

use crate::presentation::{IconSet, MapView};

/// Map page. The view and icon settings are embedded as JSON for the
/// page script.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub title: String,
    pub config_json: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PageConfig<'a> {
    view: &'a MapView,
    icons: &'a IconSet,
}

impl IndexTemplate {
    pub fn new(view: &MapView, icons: &IconSet) -> Result<Self, serde_json::Error> {
        let json = serde_json::to_string(&PageConfig { view, icons })?;
        Ok(Self {
            title: "KVB Störungskarte".to_string(),
            // keep the payload from closing the surrounding script element
            config_json: json.replace("</", "<\\/"),
        })
    }
}
