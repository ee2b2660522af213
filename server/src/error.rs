use rocket::{
    http::Status,
    response::{self, Responder},
    serde::json::Json,
    Request,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::github::GithubError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Unauthorized")]
    MissingCredential,
    #[error("{0}")]
    InvalidRequest(String),
    #[error(transparent)]
    Github(#[from] GithubError),
    #[error("GitHub did not answer within {0} seconds")]
    Timeout(u64),
}

impl ApiError {
    pub fn status(&self) -> Status {
        match self {
            ApiError::MissingCredential => Status::Unauthorized,
            ApiError::InvalidRequest(_) => Status::BadRequest,
            ApiError::Github(GithubError::Remote { status, .. }) if (400..600).contains(status) => {
                Status::new(*status)
            }
            ApiError::Github(GithubError::Remote { .. }) => Status::BadGateway,
            ApiError::Github(_) => Status::InternalServerError,
            ApiError::Timeout(_) => Status::GatewayTimeout,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'static> {
        let status = self.status();
        if status.code >= 500 {
            tracing::error!("{} {} failed: {self}", req.method(), req.uri());
        } else {
            tracing::debug!("{} {} rejected: {self}", req.method(), req.uri());
        }

        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .respond_to(req)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses() {
        assert_eq!(ApiError::MissingCredential.status(), Status::Unauthorized);
        assert_eq!(
            ApiError::InvalidRequest("Missing owner or repo parameters".to_string()).status(),
            Status::BadRequest
        );
        assert_eq!(ApiError::Timeout(10).status(), Status::GatewayTimeout);

        let remote = |status| {
            ApiError::from(GithubError::Remote {
                status,
                message: "Not Found".to_string(),
            })
        };
        assert_eq!(remote(404).status(), Status::NotFound);
        assert_eq!(remote(403).status(), Status::Forbidden);
        assert_eq!(remote(503).status(), Status::ServiceUnavailable);
        assert_eq!(remote(304).status(), Status::BadGateway);

        let payload = GithubError::Payload("missing field `number`".to_string());
        assert_eq!(ApiError::from(payload).status(), Status::InternalServerError);
    }

    #[test]
    fn messages() {
        assert_eq!(ApiError::MissingCredential.to_string(), "Unauthorized");
        assert_eq!(
            ApiError::from(GithubError::Remote {
                status: 404,
                message: "Not Found".to_string(),
            })
            .to_string(),
            "GitHub API error: Not Found"
        );
    }
}
