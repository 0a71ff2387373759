use thiserror::Error;

/// Public application error type for the HTTP layer.
///
/// Request-level problems are answered inline by the routes (the chat route
/// owns its exact validation body); this type covers the server lifecycle.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),
}
