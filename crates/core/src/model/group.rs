use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::ids::{GroupId, UserId};

/// Membership rank of the current user in a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GroupRank {
    Admin,
    Member,
    /// Superusers see every group, whether or not they are members.
    Superuser,
}

impl GroupRank {
    /// Admins and superusers can open the quiz admin page.
    #[must_use]
    pub fn can_manage(self) -> bool {
        matches!(self, Self::Admin | Self::Superuser)
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Member => "Member",
            Self::Superuser => "Superuser",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    pub date_created: DateTime<Utc>,
    pub invite_code: String,
    pub rank: GroupRank,
    #[serde(default)]
    pub anticheat: bool,
    #[serde(default)]
    pub kiosk: bool,
}

/// Body of `POST /api/groups/join`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JoinGroup {
    pub invite_code: String,
}

/// The user part of a membership row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberUser {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub pfp_url: String,
}

/// One active member, as listed by `GET /api/groups/{id}/members`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupMember {
    pub user: MemberUser,
    pub rank: GroupRank,
    #[serde(default)]
    pub group_id: Option<GroupId>,
    #[serde(default)]
    pub date_joined: Option<DateTime<Utc>>,
}

impl GroupMember {
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.user
            .nickname
            .as_deref()
            .filter(|nick| !nick.trim().is_empty())
            .unwrap_or(&self.user.username)
    }
}
