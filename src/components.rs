use super::prop_val::{components::PropertyForm, models::PropertySheet};
use ammonia::clean;
use thiserror::Error;

pub trait Component {
    /// Render the component to a HTML string. By convention, the
    /// implementation should sanitize all string properties at render-time
    fn render(&self) -> String;
}

/// The same markup is shown in the browser and handed to the PDF converter,
/// so the page carries its own styles and pulls in nothing external.
const STYLES: &str = r#"
    body { font-family: sans-serif; margin: 2rem; }
    h1 { font-size: 1.5rem; margin-bottom: 1rem; }
    .field { display: flex; gap: 1rem; align-items: center; margin: 0.5rem 0; }
    .field label { width: 10rem; font-weight: bold; }
    .field .name { width: 10rem; color: #555; }
    .field input { width: 8rem; }
"#;

pub struct Page<'a> {
    pub title: &'a str,
    pub children: Box<dyn Component + 'a>,
}

impl Component for Page<'_> {
    fn render(&self) -> String {
        format!(
            r#"<!DOCTYPE html>
            <html>
                <head>
                    <meta charset="utf-8" />
                    <meta name="viewport" content="width=device-width, initial-scale=1.0" />
                    <title>{title}</title>
                    <style>{STYLES}</style>
                </head>
                <body>
                    {body_html}
                </body>
            </html>
            "#,
            title = clean(self.title),
            body_html = self.children.render()
        )
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ViewError {
    #[error("view '{0}' not found")]
    NotFound(String),
}

/// Name of the view listing every property. Both the browser page and the
/// exported PDF are rendered from it.
pub const INDEX_VIEW: &str = "Index";

/// Render the named view over `sheet` into a complete HTML document.
pub fn render_view(name: &str, sheet: &PropertySheet) -> Result<String, ViewError> {
    match name {
        INDEX_VIEW => Ok(Page {
            title: "Properties",
            children: Box::new(PropertyForm { sheet }),
        }
        .render()),
        _ => Err(ViewError::NotFound(name.to_string())),
    }
}
