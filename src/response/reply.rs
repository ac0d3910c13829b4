use serde::Serialize;

/// The envelope handed to the transport layer.
///
/// Success variants carry the representation; failure variants carry a message
/// for the client. [`Reply::status`] gives the HTTP-style status code the
/// transport should answer with.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply<T> {
    Ok(T),
    Created(T),
    NotFound { message: String },
    Rejected { message: String },
    Unavailable { message: String },
}

/// Body sent for failure replies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody<'a> {
    pub status: u16,
    pub error: &'a str,
}

impl<T> Reply<T> {
    pub fn status(&self) -> u16 {
        match self {
            Reply::Ok(_) => 200,
            Reply::Created(_) => 201,
            Reply::NotFound { .. } => 404,
            Reply::Rejected { .. } => 400,
            Reply::Unavailable { .. } => 503,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Reply::Ok(_) | Reply::Created(_))
    }

    /// The representation, if this is a success reply.
    pub fn body(&self) -> Option<&T> {
        match self {
            Reply::Ok(body) | Reply::Created(body) => Some(body),
            _ => None,
        }
    }

    pub fn into_body(self) -> Option<T> {
        match self {
            Reply::Ok(body) | Reply::Created(body) => Some(body),
            _ => None,
        }
    }

    /// The failure message, if this is a failure reply.
    pub fn message(&self) -> Option<&str> {
        match self {
            Reply::NotFound { message }
            | Reply::Rejected { message }
            | Reply::Unavailable { message } => Some(message),
            Reply::Ok(_) | Reply::Created(_) => None,
        }
    }
}

impl<T: Serialize> Reply<T> {
    /// Renders the reply body as JSON.
    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        match (self.body(), self.message()) {
            (Some(body), _) => serde_json::to_value(body),
            (None, message) => serde_json::to_value(ErrorBody {
                status: self.status(),
                error: message.unwrap_or_default(),
            }),
        }
    }
}
