//! Team roster types.

use serde::{Deserialize, Serialize};

/// A team member and the logins they go by in external systems.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Name as reported by the on-call provider
    pub name: String,
    /// Login on the chat platform
    pub chat_login: String,
    /// Login in the issue tracker, empty when the member has none
    #[serde(default)]
    pub tracker_login: String,
}

/// The team roster, used to translate provider names into platform logins.
///
/// # Examples
///
/// ```
/// use bugle_core::{Team, User};
///
/// let team = Team::new(vec![User {
///     name: "Alice Cooper".to_string(),
///     chat_login: "alice".to_string(),
///     tracker_login: "acooper".to_string(),
/// }]);
///
/// assert_eq!(team.chat_login("Alice Cooper"), Some("alice"));
/// assert_eq!(team.chat_login("Bob"), None);
/// assert_eq!(team.tracker_logins(), vec!["acooper"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Team {
    members: Vec<User>,
}

impl Team {
    /// Create a roster from a list of members.
    pub fn new(members: Vec<User>) -> Self {
        Self { members }
    }

    /// All members of the roster.
    pub fn members(&self) -> &[User] {
        &self.members
    }

    /// Find a member by provider name.
    pub fn by_name(&self, name: &str) -> Option<&User> {
        self.members.iter().find(|user| user.name == name)
    }

    /// The chat login for a provider name, when the member is on the roster.
    pub fn chat_login(&self, name: &str) -> Option<&str> {
        self.by_name(name).map(|user| user.chat_login.as_str())
    }

    /// Tracker logins for every member that has one.
    pub fn tracker_logins(&self) -> Vec<&str> {
        self.members
            .iter()
            .filter(|user| !user.tracker_login.is_empty())
            .map(|user| user.tracker_login.as_str())
            .collect()
    }
}
