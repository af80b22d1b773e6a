use reqwest::StatusCode;

/// Any error that can occur when making requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Request error: {}", .0)]
    Reqwest(#[from] reqwest::Error),
    #[error("Request middleware error: {}", .0)]
    ReqwestMiddleware(anyhow::Error),
    #[error("Error {}", .0)]
    Http(StatusCode),
    #[error("Blank response")]
    BlankResponse,
    #[error("No session")]
    NoSession,
    #[error("Inventory not found")]
    InventoryNotFound,
    #[error("Inventory is private")]
    PrivateInventory,
    #[error("Not logged in")]
    NotLoggedIn,
    #[error("No API key")]
    MissingApiKey,
    #[error("Access Denied")]
    AccessDenied,
    #[error("Error parsing response: {}", .0)]
    Parse(#[from] serde_json::Error),
    #[error("Error parsing HTML document: {}", .0)]
    Html(#[from] ParseHtmlError),
    #[error("Error parsing URL: {}", .0)]
    UrlParse(#[from] url::ParseError),
    #[error("Trade error: {}", .0)]
    Trade(String),
    #[error("Malformed response")]
    MalformedResponse,
}

impl Error {
    /// Whether this error came from the transport layer rather than the content of a response.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Reqwest(_) |
            Self::ReqwestMiddleware(_) |
            Self::Http(_) |
            Self::BlankResponse
        )
    }
}

impl From<reqwest_middleware::Error> for Error {
    fn from(error: reqwest_middleware::Error) -> Error {
        match error {
            reqwest_middleware::Error::Reqwest(e) => Error::Reqwest(e),
            reqwest_middleware::Error::Middleware(e) => Error::ReqwestMiddleware(e),
        }
    }
}

/// An error occurred when parsing an HTML document.
#[derive(thiserror::Error, Debug)]
pub enum ParseHtmlError {
    #[error("{}", .0)]
    Malformed(&'static str),
    #[error("Invalid selector")]
    ParseSelector,
}
