//! Path Router
//!
//! Maps the current history path to a registered view and renders it into
//! a [`Surface`].
//!
//! ## Routes
//!
//! - `/dashboard` - account overview, refreshes on mount (default)
//! - `/login` - login and registration forms
//!
//! Any other path redirects to the default route.

mod history;
mod routes;

pub use history::{History, MemoryHistory};
pub use routes::{lookup, MountHook, RouteDescriptor, DEFAULT_ROUTE, LOGIN_ROUTE, ROUTES};

use crate::view::{Surface, View};

/// Result of rendering the current path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The route's view is mounted and titled; the caller runs its hook
    Mounted(&'static RouteDescriptor),
    /// Path is not registered; navigate to the given route instead
    Redirect(&'static str),
}

/// Direction of an external history move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopDirection {
    Back,
    Forward,
}

pub struct Router<H: History = MemoryHistory> {
    history: H,
}

impl<H: History> Router<H> {
    pub fn new(history: H) -> Self {
        Self { history }
    }

    pub fn current_path(&self) -> &str {
        self.history.current()
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    /// Record a navigation; rendering is the caller's next step
    pub fn push(&mut self, path: &str) {
        tracing::debug!(path, "Navigate");
        self.history.push(path);
    }

    /// Move within history without pushing. Returns whether the path changed.
    pub fn pop(&mut self, direction: PopDirection) -> bool {
        match direction {
            PopDirection::Back => self.history.back(),
            PopDirection::Forward => self.history.forward(),
        }
    }

    /// Render the current path: instantiate the route's view, clear the mount
    /// point, attach the view and set the title.
    pub fn render(&self, surface: &mut Surface) -> RenderOutcome {
        let path = self.history.current();
        let Some(route) = lookup(path) else {
            tracing::debug!(path, fallback = DEFAULT_ROUTE, "Unregistered path");
            return RenderOutcome::Redirect(DEFAULT_ROUTE);
        };

        surface.mount(View::instantiate(route.view));
        surface.set_title(route.title);
        tracing::trace!(path, view = route.view.as_str(), "View mounted");

        RenderOutcome::Mounted(route)
    }
}

impl Default for Router<MemoryHistory> {
    fn default() -> Self {
        Self::new(MemoryHistory::default())
    }
}
