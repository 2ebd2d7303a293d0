use cquizy_core::model::{
    Group, GroupId, GroupMember, GroupRank, QuizAvailability, QuizId, UserId,
};
use services::ScheduledQuiz;

use super::time_fmt::format_datetime;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupCardVm {
    pub id: GroupId,
    pub name: String,
    pub rank_label: &'static str,
    pub invite_code: Option<String>,
    pub badges: Vec<&'static str>,
}

#[must_use]
pub fn map_group_cards(groups: &[Group]) -> Vec<GroupCardVm> {
    groups
        .iter()
        .map(|group| {
            let mut badges = Vec::new();
            if group.anticheat {
                badges.push("Anti-Cheat");
            }
            if group.kiosk {
                badges.push("Kiosk");
            }
            GroupCardVm {
                id: group.id,
                name: group.name.clone(),
                rank_label: group.rank.label(),
                // Only managers share the invite code.
                invite_code: group
                    .rank
                    .can_manage()
                    .then(|| group.invite_code.clone()),
                badges,
            }
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizRowVm {
    pub id: QuizId,
    pub name: String,
    pub window: String,
    pub status_label: &'static str,
    pub can_start: bool,
    pub can_manage: bool,
}

#[must_use]
pub fn map_quiz_rows(quizzes: &[ScheduledQuiz], rank: Option<GroupRank>) -> Vec<QuizRowVm> {
    let can_manage = rank.is_some_and(GroupRank::can_manage);
    quizzes
        .iter()
        .map(|quiz| QuizRowVm {
            id: quiz.summary.id,
            name: quiz.summary.project_name.clone(),
            window: format!(
                "{} - {}",
                format_datetime(quiz.summary.date_start),
                format_datetime(quiz.summary.date_end)
            ),
            status_label: match quiz.availability {
                QuizAvailability::Upcoming => "Upcoming",
                QuizAvailability::Open => "Open",
                QuizAvailability::Closed => "Closed",
            },
            can_start: quiz.is_open(),
            can_manage,
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemberRowVm {
    pub id: UserId,
    pub name: String,
    pub rank_label: &'static str,
}

#[must_use]
pub fn map_member_rows(members: &[GroupMember]) -> Vec<MemberRowVm> {
    members
        .iter()
        .map(|member| MemberRowVm {
            id: member.user.id,
            name: member.display_name().to_string(),
            rank_label: member.rank.label(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cquizy_core::model::QuizSummary;
    use cquizy_core::time::fixed_now;

    #[test]
    fn members_see_no_invite_code_or_admin_link() {
        let group = Group {
            id: GroupId::new(1),
            name: "9.B".into(),
            date_created: fixed_now(),
            invite_code: "SECRET".into(),
            rank: GroupRank::Member,
            anticheat: true,
            kiosk: false,
        };
        let cards = map_group_cards(std::slice::from_ref(&group));
        assert_eq!(cards[0].invite_code, None);
        assert_eq!(cards[0].badges, ["Anti-Cheat"]);

        let quiz = ScheduledQuiz {
            summary: QuizSummary {
                id: QuizId::new(3),
                project_name: "Algebra".into(),
                group_name: "9.B".into(),
                date_start: fixed_now(),
                date_end: fixed_now(),
            },
            availability: QuizAvailability::Open,
        };
        let rows = map_quiz_rows(&[quiz.clone()], Some(GroupRank::Member));
        assert!(rows[0].can_start);
        assert!(!rows[0].can_manage);
        assert!(map_quiz_rows(&[quiz], Some(GroupRank::Admin))[0].can_manage);
    }

    #[test]
    fn member_rows_prefer_nicknames() {
        let members = [GroupMember {
            user: cquizy_core::model::MemberUser {
                id: UserId::new(8),
                username: "dora".into(),
                nickname: Some("Dori".into()),
                pfp_url: String::new(),
            },
            rank: GroupRank::Admin,
            group_id: None,
            date_joined: None,
        }];
        let rows = map_member_rows(&members);
        assert_eq!(rows[0].name, "Dori");
        assert_eq!(rows[0].rank_label, "Admin");
    }
}
