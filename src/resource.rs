use crate::error::ApiError;

/// The fetch lifecycle of a piece of view state.
///
/// A screen is in exactly one of these at a time, so "loading" and "error"
/// can never be shown together.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ResourceState<T, E = String> {
    #[default]
    Idle,
    Loading,
    Ready(T),
    Failed(E),
}

impl<T, E> ResourceState<T, E> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            ResourceState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn ready_mut(&mut self) -> Option<&mut T> {
        match self {
            ResourceState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&E> {
        match self {
            ResourceState::Failed(e) => Some(e),
            _ => None,
        }
    }
}

impl<T> ResourceState<Vec<T>> {
    /// Loaded, but nothing to show: the screen renders its empty message.
    pub fn is_empty(&self) -> bool {
        matches!(self, ResourceState::Ready(items) if items.is_empty())
    }

    pub fn items(&self) -> &[T] {
        self.ready().map(Vec::as_slice).unwrap_or(&[])
    }
}

impl<T> ResourceState<T> {
    /// Settles a finished fetch into `Ready` or `Failed`.
    ///
    /// A result from a session that changed mid-flight is not shown at all:
    /// the screen goes back to `Idle`.
    pub fn settle(result: crate::error::Result<T>) -> Self {
        match result {
            Ok(value) => ResourceState::Ready(value),
            Err(ApiError::SessionChanged) => ResourceState::Idle,
            Err(e) => ResourceState::Failed(e.user_message()),
        }
    }
}
