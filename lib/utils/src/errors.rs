use std::fmt;
use std::fmt::Display;
use std::str::FromStr;

use http::status::StatusCode;
use leptos::prelude::*;
use leptos::{component, view, IntoView};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::icons::{AuthErrorIcon, InternalErrorIcon, InvalidRequestIcon, NetworkErrorIcon, NotFoundIcon};

const NOT_AUTHENTICATED_MESSAGE: &str = "Please authenticate yourself.";
const AUTH_FAILED_MESSAGE: &str = "Sorry, we had some trouble authenticating you.";
const INTERNAL_ERROR_MESSAGE: &str = "Something went wrong.";
const BAD_REQUEST_MESSAGE: &str = "Sorry, we didn't understand your request.";
const UNAVAILABLE_MESSAGE: &str = "Sorry, we've got noise on the line.";
const NOT_FOUND_MESSAGE: &str = "There's nothing here";
const BAD_DATA_MESSAGE: &str = "Sorry, we received data we could not read.";

#[derive(Clone, Debug, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppError {
    AuthenticationError(String),
    NotAuthenticated,
    CommunicationError(String),
    DataServiceError {
        status: u16,
        message: String,
    },
    DeserializationError(String),
    MissingConfiguration(String),
    InvalidInput(String),
    NotFound,
    InternalError(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::AuthenticationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotAuthenticated => StatusCode::UNAUTHORIZED,
            AppError::CommunicationError(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::DataServiceError { status, .. } => StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
            AppError::DeserializationError(_) => StatusCode::BAD_GATEWAY,
            AppError::MissingConfiguration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            AppError::AuthenticationError(_) => String::from(AUTH_FAILED_MESSAGE),
            AppError::NotAuthenticated => String::from(NOT_AUTHENTICATED_MESSAGE),
            AppError::CommunicationError(_) => String::from(UNAVAILABLE_MESSAGE),
            AppError::DataServiceError { status, .. } => match StatusCode::from_u16(*status) {
                Ok(status) if status == StatusCode::NOT_FOUND => String::from(NOT_FOUND_MESSAGE),
                Ok(status) if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN => String::from(NOT_AUTHENTICATED_MESSAGE),
                Ok(status) if status.is_client_error() => String::from(BAD_REQUEST_MESSAGE),
                _ => String::from(UNAVAILABLE_MESSAGE),
            },
            AppError::DeserializationError(_) => String::from(BAD_DATA_MESSAGE),
            AppError::MissingConfiguration(_) => String::from(INTERNAL_ERROR_MESSAGE),
            AppError::InvalidInput(_) => String::from(BAD_REQUEST_MESSAGE),
            AppError::NotFound => String::from(NOT_FOUND_MESSAGE),
            AppError::InternalError(_) => String::from(INTERNAL_ERROR_MESSAGE),
        }
    }

    pub fn error_detail(&self) -> String {
        match self {
            AppError::AuthenticationError(e) => e.clone(),
            AppError::NotAuthenticated => String::from(NOT_AUTHENTICATED_MESSAGE),
            AppError::CommunicationError(e) => e.clone(),
            AppError::DataServiceError { status, message } => format!("Data service responded with {status}: {message}"),
            AppError::DeserializationError(e) => e.clone(),
            AppError::MissingConfiguration(variable) => format!("Missing configuration value {variable}"),
            AppError::InvalidInput(e) => e.clone(),
            AppError::NotFound => String::from(NOT_FOUND_MESSAGE),
            AppError::InternalError(e) => e.clone(),
        }
    }

    /// Constructs a new [`AppError::InternalError`] from some other type.
    pub fn new(msg: impl ToString) -> Self {
        Self::InternalError(msg.to_string())
    }
}

impl Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", serde_json::to_string(self).unwrap_or_default())
    }
}

impl FromStr for AppError {
    type Err = serde_json::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(s)
    }
}

impl From<reqwest::Error> for AppError {
    fn from(error: reqwest::Error) -> Self {
        match error.status() {
            Some(status) => AppError::DataServiceError {
                status: status.as_u16(),
                message: error.to_string(),
            },
            None if error.is_decode() => AppError::DeserializationError(error.to_string()),
            None => AppError::CommunicationError(error.to_string()),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        AppError::DeserializationError(error.to_string())
    }
}

impl From<url::ParseError> for AppError {
    fn from(error: url::ParseError) -> Self {
        AppError::InvalidInput(error.to_string())
    }
}

#[component]
pub fn AppErrorIcon(
    app_error: AppError,
) -> impl IntoView {
    match app_error {
        AppError::AuthenticationError(_) | AppError::NotAuthenticated => view! { <AuthErrorIcon/> }.into_any(),
        AppError::CommunicationError(_) => view! { <NetworkErrorIcon/> }.into_any(),
        AppError::DataServiceError { status, .. } if status == StatusCode::NOT_FOUND.as_u16() => view! { <NotFoundIcon/> }.into_any(),
        AppError::DataServiceError { .. } => view! { <NetworkErrorIcon/> }.into_any(),
        AppError::InvalidInput(_) => view! { <InvalidRequestIcon/> }.into_any(),
        AppError::NotFound => view! { <NotFoundIcon/> }.into_any(),
        AppError::DeserializationError(_) | AppError::MissingConfiguration(_) | AppError::InternalError(_) => view! { <InternalErrorIcon/> }.into_any(),
    }
}

/// Displays an error
#[component]
pub fn ErrorDisplay(
    error: AppError
) -> impl IntoView {
    let error_string = error.to_string();
    let status_code =  error.status_code().as_u16();
    let user_message = error.user_message();

    log::error!("Caught error, status_code: {status_code}, error message: {error_string}");
    view! {
        <div class="w-full flex items-center gap-2 justify-center">
            <AppErrorIcon app_error=error/>
            <div class="flex flex-col">
                <h2 class="text-2xl">{status_code}</h2>
                <h3 class="text-xl">{user_message}</h3>
            </div>
        </div>
    }.into_any()
}

/// Displays an error in a single line, next to the control that caused it
#[component]
pub fn InlineErrorDisplay(
    #[prop(into)]
    message: Signal<String>,
) -> impl IntoView {
    view! {
        <p class="text-error text-sm mt-2">{message}</p>
    }
}
