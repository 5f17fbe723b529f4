use super::{
    components::{render_view, INDEX_VIEW},
    errors::ServerError,
    models::AppState,
    prop_val::{
        components::REQUEST_TOKEN_FIELD,
        db_ops::PropertyStore,
        models::{parse_value, Changeset, PropertySheet, SubmitError},
    },
};
use anyhow::Result;
use std::collections::BTreeMap;
use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue},
    response::IntoResponse,
    Form,
};

/// Suggested filename for the exported document.
const EXPORT_FILENAME: &str = "UpdatedData.pdf";

async fn load_sheet(store: &dyn PropertyStore) -> Result<PropertySheet> {
    Ok(store.list_all().await?.into_iter().collect())
}

/// Turn the posted form into staged upserts. Every field is parsed before
/// anything is looked up or written, so one bad value rejects the whole
/// submission. A name posted twice keeps its last value.
async fn stage_submission(
    store: &dyn PropertyStore,
    fields: &[(String, String)],
) -> Result<Changeset> {
    let mut submitted: BTreeMap<&str, i32> = BTreeMap::new();
    for (name, raw) in fields {
        if name == REQUEST_TOKEN_FIELD {
            continue;
        }
        if name.trim().is_empty() {
            return Err(SubmitError::BlankName.into());
        }
        submitted.insert(name.as_str(), parse_value(name, raw)?);
    }

    let mut changes = Changeset::new();
    for (name, value) in submitted {
        match store.find_by_name(name).await? {
            // Unchanged rows are left out of the write entirely
            Some(existing) if existing.value == value => {}
            Some(existing) => changes.upsert(name, &existing.label_type, value),
            None => changes.upsert(name, "", value),
        }
    }

    Ok(changes)
}

pub async fn root(
    State(AppState { store, .. }): State<AppState>,
) -> Result<impl IntoResponse, ServerError> {
    let sheet = load_sheet(store.as_ref()).await?;
    Ok(render_view(INDEX_VIEW, &sheet)?)
}

pub async fn pong() -> impl IntoResponse {
    "pong"
}

pub async fn save_pdf(
    State(AppState { store, pdf }): State<AppState>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Result<impl IntoResponse, ServerError> {
    let changes = stage_submission(store.as_ref(), &fields).await?;
    if changes.is_empty() {
        tracing::debug!("submission changed no properties");
    } else {
        store.save_all(&changes).await?;
        tracing::info!(properties = changes.len(), "saved submission");
    }

    let sheet = load_sheet(store.as_ref()).await?;
    let html = render_view(INDEX_VIEW, &sheet)?;
    let document = pdf.convert(&html).await?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/pdf"),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&format!(
            r#"attachment; filename="{EXPORT_FILENAME}""#
        ))?,
    );
    Ok((headers, document))
}
