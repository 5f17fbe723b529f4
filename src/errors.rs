use super::prop_val::models::SubmitError;
use anyhow::Error;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

#[derive(Debug)]
pub struct ServerError(Error);

impl ServerError {
    /// Bad submissions are the client's fault; everything else (missing
    /// view, converter failure, database trouble) is ours.
    fn status(&self) -> StatusCode {
        if self.0.downcast_ref::<SubmitError>().is_some() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_client_error() {
            tracing::warn!(error = %self.0, "rejected submission");
            (status, self.0.to_string()).into_response()
        } else {
            tracing::error!(error = ?self.0, "request failed");
            (status, "Something went wrong").into_response()
        }
    }
}

// Anything anyhow can hold converts with `?`, so handlers never map errors
// by hand; `status` sorts them out when the response is built.
impl<E> From<E> for ServerError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{components::ViewError, pdf::ConvertError};

    #[test]
    fn test_submit_error_is_bad_request() {
        let err = ServerError::from(SubmitError::NotAnInteger {
            name: "Width".to_string(),
            raw: "wide".to_string(),
        });
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_other_errors_are_server_errors() {
        let view = ServerError::from(ViewError::NotFound("Index".to_string()));
        assert_eq!(
            view.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        let convert = ServerError::from(ConvertError::Empty);
        assert_eq!(
            convert.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
