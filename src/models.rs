use super::{pdf::PdfConverter, prop_val::db_ops::PropertyStore};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PropertyStore>,
    pub pdf: Arc<dyn PdfConverter>,
}
