//! View state shared by every page.
//!
//! A page's data is always in exactly one of three states: still loading,
//! failed with a static user-facing message, or ready. [`load`] settles a read
//! request into one of these, and [`ViewState::presentation`] picks the single
//! presentation a template renders.

use std::fmt;
use std::future::Future;

use crate::api::ApiError;
use crate::models::idea::{Idea, IdeaDraft};

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Loading,
    Error(String),
    Ready(T),
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        ViewState::Loading
    }
}

impl<T> ViewState<T> {
    /// Settle a finished read. Failures keep only `failure_message`; the
    /// underlying error goes to the log.
    pub fn settle<E: fmt::Display>(result: Result<T, E>, failure_message: &str) -> Self {
        match result {
            Ok(data) => ViewState::Ready(data),
            Err(e) => {
                log::warn!("{failure_message} ({e})");
                ViewState::Error(failure_message.to_string())
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ViewState::Ready(_))
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            ViewState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn ready_mut(&mut self) -> Option<&mut T> {
        match self {
            ViewState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ViewState::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ViewState<U> {
        match self {
            ViewState::Loading => ViewState::Loading,
            ViewState::Error(message) => ViewState::Error(message),
            ViewState::Ready(data) => ViewState::Ready(f(data)),
        }
    }
}

impl<T: Emptiness> ViewState<T> {
    pub fn presentation(&self) -> Presentation<'_, T> {
        match self {
            ViewState::Loading => Presentation::Loading,
            ViewState::Error(message) => Presentation::Error(message),
            ViewState::Ready(data) if data.is_empty_view() => Presentation::Empty,
            ViewState::Ready(data) => Presentation::Populated(data),
        }
    }
}

/// Exactly one of these renders for a given view state.
#[derive(Debug, PartialEq)]
pub enum Presentation<'a, T> {
    Loading,
    Error(&'a str),
    Empty,
    Populated(&'a T),
}

/// Whether ready data should render the empty-state message.
pub trait Emptiness {
    fn is_empty_view(&self) -> bool;
}

impl<T> Emptiness for Vec<T> {
    fn is_empty_view(&self) -> bool {
        self.is_empty()
    }
}

impl Emptiness for Idea {
    fn is_empty_view(&self) -> bool {
        false
    }
}

impl Emptiness for IdeaDraft {
    fn is_empty_view(&self) -> bool {
        false
    }
}

/// Await one read request and settle its view state. No retry.
pub async fn load<T, F>(request: F, failure_message: &str) -> ViewState<T>
where
    F: Future<Output = Result<T, ApiError>>,
{
    ViewState::settle(request.await, failure_message)
}
