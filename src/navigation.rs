use std::time::Duration;

use tokio::sync::mpsc;

/// Screens the portal can send the visitor to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Register,
    UserDashboard,
    AdminDashboard,
    MyTheories,
    AdminUsers,
    AdminTheories,
    TheoryDetail(i64),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::UserDashboard => "/user-dashboard".to_string(),
            Route::AdminDashboard => "/admin-dashboard".to_string(),
            Route::MyTheories => "/user/my-theories".to_string(),
            Route::AdminUsers => "/admin/users".to_string(),
            Route::AdminTheories => "/admin/theories".to_string(),
            Route::TheoryDetail(id) => format!("/theories/{}", id),
        }
    }
}

/// Something the front end has to react to outside the normal return value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    /// Navigate to `to`, optionally after a delay.
    Redirect { to: Route, after: Option<Duration> },
    /// A protected action was attempted without a token.
    MustLogIn,
    /// The backend rejected the token; the session is gone.
    SessionExpired,
}

/// The receiving end the front end drains.
pub type Signals = mpsc::UnboundedReceiver<Signal>;

/// Emits navigation signals. Cheap to clone; every component shares one.
#[derive(Clone, Debug)]
pub struct Navigator {
    tx: mpsc::UnboundedSender<Signal>,
}

impl Navigator {
    pub fn channel() -> (Self, Signals) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn emit(&self, signal: Signal) {
        tracing::debug!("🧭 Signal: {:?}", signal);
        if self.tx.send(signal).is_err() {
            tracing::debug!("Signal dropped, no front end attached");
        }
    }

    pub fn redirect(&self, to: Route) {
        self.emit(Signal::Redirect { to, after: None });
    }

    pub fn redirect_after(&self, to: Route, after: Duration) {
        self.emit(Signal::Redirect { to, after: Some(after) });
    }
}
