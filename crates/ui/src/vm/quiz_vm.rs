use cquizy_core::model::{AnswerSheet, BlockId, BlockInput, BlockKind, QuizContent};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub value: String,
    pub selected: bool,
}

/// One rendered question, numbered in display order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockVm {
    pub id: BlockId,
    pub number: usize,
    pub kind: BlockKind,
    pub question: String,
    pub subtext: Option<String>,
    pub image_url: Option<String>,
    pub link_url: Option<String>,
    pub options: Vec<OptionVm>,
    pub text: String,
}

impl BlockVm {
    /// Shared `name` of the radio/checkbox group.
    #[must_use]
    pub fn input_name(&self) -> String {
        format!("block_{}", self.id)
    }
}

/// An edit the student made to one block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnswerChange {
    Select(String),
    Toggle { value: String, checked: bool },
    Text(String),
}

#[must_use]
pub fn map_blocks(quiz: &QuizContent, sheet: &AnswerSheet) -> Vec<BlockVm> {
    quiz.ordered_blocks()
        .into_iter()
        .enumerate()
        .map(|(idx, block)| {
            let text = match sheet.input(block.id) {
                Some(BlockInput::Text(text)) => text.clone(),
                _ => String::new(),
            };
            BlockVm {
                id: block.id,
                number: idx + 1,
                kind: block.kind,
                question: block.question.clone(),
                subtext: non_blank(block.subtext.as_deref()),
                image_url: non_blank(block.image_url.as_deref()),
                link_url: non_blank(block.link_url.as_deref()),
                options: block
                    .answers
                    .iter()
                    .map(|option| OptionVm {
                        selected: sheet.is_selected(block.id, &option.text),
                        value: option.text.clone(),
                    })
                    .collect(),
                text,
            }
        })
        .collect()
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
