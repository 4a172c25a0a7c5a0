//! Terminal rendering of the authenticated view and failure notices.

use loginflow_core::{AuthError, Navigator, SessionStore};

/// Path of the account registration page, shown as a hint after a failure
const REGISTRATION_PATH: &str = "registration";

/// The authenticated view. Entered once the session token is stored.
#[derive(Debug, Default)]
pub struct Dashboard {
    entered: bool,
}

impl Dashboard {
    pub fn entered(&self) -> bool {
        self.entered
    }
}

impl Navigator for Dashboard {
    fn on_authenticated(&mut self) {
        self.entered = true;
        println!("Login successful!");
    }
}

/// One-line summary of the session held by a store
pub fn session_summary(store: &dyn SessionStore) -> String {
    let Some(data) = store.data() else {
        return "Not signed in".to_string();
    };
    let who = match data.username {
        Some(ref name) => format!("Signed in as {}", name),
        None => "Signed in".to_string(),
    };
    match data.age_minutes() {
        0 => format!("{} (session started just now)", who),
        1 => format!("{} (session started 1 minute ago)", who),
        n => format!("{} (session started {} minutes ago)", who, n),
    }
}

pub fn failure_notice(error: &AuthError) -> String {
    format!("Login failed: {}", error.user_message())
}

pub fn registration_hint(base_url: &str) -> String {
    format!(
        "No account yet? Sign up at {}/{}",
        base_url.trim_end_matches('/'),
        REGISTRATION_PATH
    )
}
