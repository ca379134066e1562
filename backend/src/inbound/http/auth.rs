//! Bearer-credential extraction and authorization helpers.
//!
//! [`AuthContext`] proves identity only. Roles are re-read from the
//! directory on every authorization check, so a credential issued before a
//! promotion or demotion never grants stale access.

use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::{Ready, ready};

use crate::auth::CredentialIssuer;
use crate::domain::ports::Directory;
use crate::domain::{DisplayName, EmailAddress, Error, Role};

/// Authenticated identity extracted from the `Authorization` header.
#[derive(Debug, Clone)]
pub struct AuthContext {
    email: EmailAddress,
    name: DisplayName,
}

impl AuthContext {
    /// Authenticated email address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Display name recorded at credential issuance.
    pub fn display_name(&self) -> &DisplayName {
        &self.name
    }

    /// Require that the credential belongs to `email`.
    pub fn require_match(&self, email: &EmailAddress) -> Result<(), Error> {
        if &self.email == email {
            Ok(())
        } else {
            Err(Error::forbidden("credential does not match the requested identity"))
        }
    }

    /// Require that the directory currently records `role` for this identity.
    pub async fn require_role(&self, directory: &dyn Directory, role: Role) -> Result<(), Error> {
        let current = directory.role_of(&self.email).await?;
        if current == Some(role) {
            Ok(())
        } else {
            Err(Error::forbidden(format!("{role} role required")))
        }
    }
}

fn extract(req: &HttpRequest) -> Result<AuthContext, Error> {
    let issuer = req
        .app_data::<web::Data<CredentialIssuer>>()
        .ok_or_else(|| Error::internal("credential issuer is not configured"))?;
    let header = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized("credential required"))?
        .to_str()
        .map_err(|_| Error::unauthorized("authorization header is not valid text"))?;
    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| Error::unauthorized("a bearer credential is required"))?;
    let claims = issuer.verify(token)?;
    let email = EmailAddress::new(&claims.sub)
        .map_err(|_| Error::invalid_credential("credential subject is not a valid email"))?;
    let name = DisplayName::new(&claims.name)
        .map_err(|_| Error::invalid_credential("credential name is not a valid display name"))?;
    Ok(AuthContext { email, name })
}

impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract(req))
    }
}
