//! Static question data and startup validation.
//!
//! The quiz always runs the same ten questions in the same order. Question data is
//! checked once when the bank is built so the session state machine can rely on
//! every question having exactly one in-range correct choice.

use crate::error::{QuizError, Result};

/// Every question offers exactly this many choices.
pub const CHOICE_COUNT: usize = 3;

/// Immutable multiple-choice question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizQuestion {
    pub prompt: &'static str,
    pub choices: [&'static str; CHOICE_COUNT],
    pub answer: usize,
}

impl QuizQuestion {
    pub const fn new(
        prompt: &'static str,
        choices: [&'static str; CHOICE_COUNT],
        answer: usize,
    ) -> Self {
        Self {
            prompt,
            choices,
            answer,
        }
    }

    pub fn is_correct(&self, choice: usize) -> bool {
        choice == self.answer
    }

    fn validate(&self, index: usize) -> Result<()> {
        if self.prompt.trim().is_empty() {
            return Err(QuizError::invalid_question(index, "prompt is empty"));
        }
        if let Some(pos) = self.choices.iter().position(|c| c.trim().is_empty()) {
            return Err(QuizError::invalid_question(
                index,
                format!("choice {} is empty", pos + 1),
            ));
        }
        if self.answer >= CHOICE_COUNT {
            return Err(QuizError::invalid_question(
                index,
                format!("answer index {} out of range", self.answer),
            ));
        }
        Ok(())
    }
}

const STANDARD_QUESTIONS: [QuizQuestion; 10] = [
    QuizQuestion::new(
        "にほんのしょうひぜいはなんパーセント？",
        ["３パーセント", "５パーセント", "８パーセント"],
        0,
    ),
    QuizQuestion::new(
        "けいたいでんわのばんごうのさいしょの３ケタは？",
        ["０３０", "０８０", "０９０"],
        0,
    ),
    QuizQuestion::new(
        "さいたまけんのけんちょうしょざいちは？",
        ["さいたまし", "うらわし", "おおみやし"],
        1,
    ),
    QuizQuestion::new(
        "せかいでいちばんじんこうがおおいくには？",
        ["ソれん", "インド", "ちゅうごく"],
        2,
    ),
    QuizQuestion::new(
        "アイドルＳＭＡＰはなんにんぐみ？",
        ["５にん", "６にん", "７にん"],
        1,
    ),
    QuizQuestion::new(
        "プロやきゅうでオリックスのきゅうだんめいは？",
        ["オリオンズ", "バファローズ", "ブレーブス"],
        2,
    ),
    QuizQuestion::new(
        "にほんにとどうふけんはいくつある？",
        ["４５", "４６", "４７"],
        2,
    ),
    QuizQuestion::new(
        "にほんいちたかいビルはどこのとどうふけんにある？",
        ["とうきょう", "かながわ", "おおさか"],
        0,
    ),
    QuizQuestion::new(
        "アニメ「ちびまるこちゃん」の\nオープニングテーマは？",
        ["おどるポンポコリン", "ゆめいっぱい", "ねらいうち"],
        1,
    ),
    QuizQuestion::new(
        "１９７９ねんまで たいようけいで\nいちばんそとがわをまわるわくせいは？",
        ["てんのうせい", "かいおうせい", "めいおうせい"],
        2,
    ),
];

/// Validated, ordered list of questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Vec<QuizQuestion>,
}

impl QuestionBank {
    /// Build a bank, rejecting malformed questions.
    pub fn new(questions: Vec<QuizQuestion>) -> Result<Self> {
        if questions.is_empty() {
            return Err(QuizError::config("question bank is empty"));
        }
        for (index, question) in questions.iter().enumerate() {
            question.validate(index + 1)?;
        }
        Ok(Self { questions })
    }

    /// The fixed ten-question set shipped with the game.
    pub fn standard() -> Result<Self> {
        Self::new(STANDARD_QUESTIONS.to_vec())
    }

    pub fn get(&self, index: usize) -> Option<&QuizQuestion> {
        self.questions.get(index)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Index of the final question; answering it correctly clears the game.
    pub fn last_index(&self) -> usize {
        self.questions.len() - 1
    }

    pub fn iter(&self) -> impl Iterator<Item = &QuizQuestion> {
        self.questions.iter()
    }
}
