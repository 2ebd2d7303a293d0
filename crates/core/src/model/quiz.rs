use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::ids::{BlockId, QuizId};

pub const ANTICHEAT_BADGE: &str = "🔒 Anti-Cheat Active";
pub const KIOSK_BADGE: &str = "📱 Kiosk Mode";

/// How a question block is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockKind {
    /// Exactly one option may be selected.
    #[serde(rename = "SINGLE")]
    SingleChoice,
    /// Any subset of options may be selected.
    #[serde(rename = "MULTIPLE")]
    MultipleChoice,
    /// Free text answer.
    #[serde(rename = "TEXT")]
    Text,
}

impl BlockKind {
    #[must_use]
    pub fn is_choice(self) -> bool {
        !matches!(self, Self::Text)
    }
}

/// A selectable option of a choice block. Correctness is never sent to students.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockOption {
    pub id: u64,
    pub text: String,
}

/// A single question of a quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    pub order: i64,
    #[serde(rename = "type")]
    pub kind: BlockKind,
    pub question: String,
    #[serde(default)]
    pub subtext: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub link_url: Option<String>,
    #[serde(default)]
    pub answers: Vec<BlockOption>,
}

impl Block {
    #[must_use]
    pub fn has_option(&self, value: &str) -> bool {
        self.answers.iter().any(|option| option.text == value)
    }

    /// Position of the option with the given text, used to keep selections in display order.
    #[must_use]
    pub fn option_position(&self, value: &str) -> Option<usize> {
        self.answers.iter().position(|option| option.text == value)
    }
}

/// Quiz payload returned when a student starts a quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizContent {
    pub id: QuizId,
    pub title: String,
    #[serde(default)]
    pub desc: Option<String>,
    pub anticheat_enabled: bool,
    pub kiosk_enabled: bool,
    pub date_end: DateTime<Utc>,
    pub blocks: Vec<Block>,
}

impl QuizContent {
    /// Blocks sorted by their `order` field; ties keep server order.
    #[must_use]
    pub fn ordered_blocks(&self) -> Vec<&Block> {
        let mut blocks: Vec<&Block> = self.blocks.iter().collect();
        blocks.sort_by_key(|block| block.order);
        blocks
    }

    #[must_use]
    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.blocks.iter().find(|block| block.id == id)
    }

    #[must_use]
    pub fn mode_badges(&self) -> Vec<&'static str> {
        let mut badges = Vec::new();
        if self.anticheat_enabled {
            badges.push(ANTICHEAT_BADGE);
        }
        if self.kiosk_enabled {
            badges.push(KIOSK_BADGE);
        }
        badges
    }
}

/// Whether a scheduled quiz can currently be taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizAvailability {
    Upcoming,
    Open,
    Closed,
}

/// A quiz as listed on a group page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSummary {
    pub id: QuizId,
    pub project_name: String,
    pub group_name: String,
    pub date_start: DateTime<Utc>,
    pub date_end: DateTime<Utc>,
}

impl QuizSummary {
    #[must_use]
    pub fn availability(&self, now: DateTime<Utc>) -> QuizAvailability {
        if now < self.date_start {
            QuizAvailability::Upcoming
        } else if now > self.date_end {
            QuizAvailability::Closed
        } else {
            QuizAvailability::Open
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;
    use chrono::Duration;

    const START_PAYLOAD: &str = r#"{
        "id": 3,
        "title": "Chemistry",
        "desc": null,
        "anticheat_enabled": true,
        "kiosk_enabled": false,
        "date_end": "2023-11-14T23:00:00Z",
        "blocks": [
            {"id": 11, "order": 2, "type": "TEXT", "question": "Explain", "answers": []},
            {"id": 10, "order": 1, "type": "SINGLE", "question": "Pick",
             "subtext": "one only", "image_url": null, "link_url": null,
             "answers": [{"id": 1, "text": "H2O"}, {"id": 2, "text": "CO2"}]}
        ]
    }"#;

    #[test]
    fn parses_start_payload_and_orders_blocks() {
        let quiz: QuizContent = serde_json::from_str(START_PAYLOAD).unwrap();
        assert_eq!(quiz.id, QuizId::new(3));
        let ordered: Vec<BlockId> = quiz.ordered_blocks().iter().map(|b| b.id).collect();
        assert_eq!(ordered, vec![BlockId::new(10), BlockId::new(11)]);
        assert_eq!(quiz.block(BlockId::new(10)).unwrap().kind, BlockKind::SingleChoice);
        assert_eq!(quiz.mode_badges(), vec![ANTICHEAT_BADGE]);
    }

    #[test]
    fn option_position_follows_server_order() {
        let quiz: QuizContent = serde_json::from_str(START_PAYLOAD).unwrap();
        let block = quiz.block(BlockId::new(10)).unwrap();
        assert_eq!(block.option_position("CO2"), Some(1));
        assert!(!block.has_option("NaCl"));
    }

    #[test]
    fn availability_tracks_window() {
        let now = fixed_now();
        let summary = QuizSummary {
            id: QuizId::new(1),
            project_name: "P".into(),
            group_name: "G".into(),
            date_start: now - Duration::hours(1),
            date_end: now + Duration::hours(1),
        };
        assert_eq!(summary.availability(now), QuizAvailability::Open);
        assert_eq!(
            summary.availability(now - Duration::hours(2)),
            QuizAvailability::Upcoming
        );
        assert_eq!(
            summary.availability(now + Duration::hours(2)),
            QuizAvailability::Closed
        );
    }
}
