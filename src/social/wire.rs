use serde::Deserialize;

#[derive(Deserialize)]
pub(crate) struct RecentSearchEnvelope {
    pub(crate) data: Option<Vec<PostNode>>,
    pub(crate) errors: Option<Vec<ErrorNode>>,
}

#[derive(Deserialize)]
pub(crate) struct PostNode {
    pub(crate) text: Option<String>,
}

#[derive(Deserialize)]
pub(crate) struct ErrorNode {
    pub(crate) title: Option<String>,
    pub(crate) detail: Option<String>,
}
