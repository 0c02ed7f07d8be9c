//! Routes between views and the navigator capability views use to move between them.

/// A top-level view of the ward UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Home,
    Report,
    Discharge,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Report => "/report",
            Route::Discharge => "/discharge",
        }
    }
}

/// Performs a navigation on behalf of a view.
///
/// The web front-end turns it into a redirect, the terminal front-end into a message.
pub trait Navigator {
    fn navigate(&mut self, route: Route);
}

/// Remembers every navigation request in order.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visited: Vec<Route>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visited(&self) -> &[Route] {
        &self.visited
    }

    /// The most recent navigation, if any.
    pub fn last(&self) -> Option<Route> {
        self.visited.last().copied()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&mut self, route: Route) {
        tracing::debug!(path = route.path(), "navigate");
        self.visited.push(route);
    }
}
