use rocket::{
    http::Status,
    request::{FromRequest, Outcome},
    Request,
};

use crate::{config::Env, error::ApiError};

/// Set by the session issuer in front of this service.
pub const LOGIN_HEADER: &str = "X-Github-Login";

/// Credential of the caller, forwarded to GitHub as is.
#[derive(Clone)]
pub struct Session {
    access_token: String,
    username: Option<String>,
}

impl Session {
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Session {
    type Error = ApiError;

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let token = req
            .headers()
            .get_one("Authorization")
            .and_then(bearer_token)
            .or_else(|| req.rocket().state::<Env>().and_then(Env::fallback_token));

        match token {
            Some(token) => Outcome::Success(Session {
                access_token: token.to_string(),
                username: req
                    .headers()
                    .get_one(LOGIN_HEADER)
                    .map(ToString::to_string),
            }),
            None => Outcome::Error((Status::Unauthorized, ApiError::MissingCredential)),
        }
    }
}
