use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoginMethod {
    Email { email: String },
    Google { email: String },
    Phone { number: String },
}

impl LoginMethod {
    pub fn kind(&self) -> &'static str {
        match self {
            LoginMethod::Email { .. } => "email",
            LoginMethod::Google { .. } => "google",
            LoginMethod::Phone { .. } => "phone",
        }
    }

    /// Email address or phone number the user signed in with.
    pub fn identifier(&self) -> &str {
        match self {
            LoginMethod::Email { email } | LoginMethod::Google { email } => email,
            LoginMethod::Phone { number } => number,
        }
    }

    pub fn from_parts(kind: &str, identifier: &str) -> Option<Self> {
        let identifier = identifier.to_string();
        match kind {
            "email" => Some(LoginMethod::Email { email: identifier }),
            "google" => Some(LoginMethod::Google { email: identifier }),
            "phone" => Some(LoginMethod::Phone { number: identifier }),
            _ => None,
        }
    }
}

/// The signed-in user. Owned by the caller and handed to whatever needs to
/// know who is logged in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub method: LoginMethod,
    pub display_name: String,
    pub login_time: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
}

impl Session {
    pub fn new(method: LoginMethod, display_name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            method,
            display_name: display_name.into(),
            login_time: now,
            last_active: now,
        }
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_active = now;
    }

    /// Label shown in the header: email, then phone, then a generic name.
    pub fn user_label(&self) -> &str {
        let id = self.method.identifier();
        if id.is_empty() {
            "User"
        } else {
            id
        }
    }
}
