use crate::domain::MembershipRecord;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessLevel {
    /// Owner or moderator of the company.
    Admin,
    /// Holds an active membership.
    Customer,
    NoAccess,
}

impl AccessLevel {
    pub fn has_access(&self) -> bool {
        !matches!(self, AccessLevel::NoAccess)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AccessLevel::Admin => "admin",
            AccessLevel::Customer => "customer",
            AccessLevel::NoAccess => "no_access",
        }
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity forwarded by the platform for the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewer {
    pub user_id: String,
    pub name: Option<String>,
    pub username: Option<String>,
}

impl Viewer {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            name: None,
            username: None,
        }
    }

    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.username.as_deref())
            .unwrap_or(&self.user_id)
    }
}

/// Decides what a viewer may see on the company and experience pages.
#[derive(Debug, Clone, Default)]
pub struct AccessPolicy {
    admin_user_ids: HashSet<String>,
}

impl AccessPolicy {
    pub fn new<I, S>(admin_user_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            admin_user_ids: admin_user_ids.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_admin(&self, viewer: &Viewer) -> bool {
        self.admin_user_ids.contains(&viewer.user_id)
    }

    pub fn company_access(&self, viewer: &Viewer) -> AccessLevel {
        if self.is_admin(viewer) {
            AccessLevel::Admin
        } else {
            AccessLevel::NoAccess
        }
    }

    pub fn experience_access(
        &self,
        viewer: &Viewer,
        memberships: &[MembershipRecord],
    ) -> AccessLevel {
        if self.is_admin(viewer) {
            return AccessLevel::Admin;
        }

        let is_member = memberships
            .iter()
            .any(|m| m.customer.id.as_deref() == Some(viewer.user_id.as_str()));
        if is_member {
            AccessLevel::Customer
        } else {
            AccessLevel::NoAccess
        }
    }
}
