use super::models::{PropertyRow, PropertySheet};
use crate::components::Component;
use ammonia::clean_text;
use std::fmt::Write;

/// Form field name for the anti-forgery token. Submissions may carry it, but
/// it is never a property.
pub const REQUEST_TOKEN_FIELD: &str = "__RequestVerificationToken";

pub struct PropertyField<'a> {
    pub row: &'a PropertyRow,
}
impl Component for PropertyField<'_> {
    fn render(&self) -> String {
        // Rows created from a form submission have no label type yet
        let label = if self.row.label_type.is_empty() {
            &self.row.name
        } else {
            &self.row.label_type
        };
        format!(
            r#"
            <div class="field">
                <label for="{name}">{label}</label>
                <span class="name">{name}</span>
                <input
                    id="{name}"
                    name="{name}"
                    type="number"
                    step="1"
                    value="{value}"
                />
            </div>
            "#,
            name = clean_text(&self.row.name),
            label = clean_text(label),
            value = self.row.value
        )
    }
}

pub struct PropertyForm<'a> {
    pub sheet: &'a PropertySheet,
}
impl Component for PropertyForm<'_> {
    fn render(&self) -> String {
        let fields = self.sheet.rows().fold(String::new(), |mut str, row| {
            let _ = write!(str, "{}", PropertyField { row }.render());
            str
        });
        let fields = if self.sheet.is_empty() {
            r#"<p class="empty">No properties saved yet</p>"#.to_string()
        } else {
            fields
        };
        format!(
            r#"
            <main>
                <h1>Properties</h1>
                <form method="post" action="/save">
                    {fields}
                    <button type="submit">Save as PDF</button>
                </form>
            </main>
            "#
        )
    }
}
