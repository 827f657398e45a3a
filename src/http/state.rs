use crate::analysis::AnalysisOptions;
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct HttpServerState {
    pub name: Arc<String>,
    pub options: Arc<AnalysisOptions>,
    /// Parser used when a request names none
    pub default_input_format: Arc<String>,
}
