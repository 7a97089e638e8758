use crate::model::{Difficulty, NewQuestion, Question, QuestionRef, Sheet, SubTopic, Topic};

/// Builder for small sheets. Positions passed to the `with_*` methods are
/// 0-based and refer to entities added earlier.
#[derive(Default)]
pub struct SheetFixture {
    sheet: Sheet,
    next_question: usize,
}

impl SheetFixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_topic(mut self, title: &str) -> Self {
        self.sheet.topics.push(Topic::new(title));
        self
    }

    pub fn with_sub_topic(mut self, topic: usize, title: &str) -> Self {
        self.sheet.topics[topic]
            .sub_topics
            .push(SubTopic::new(title));
        self
    }

    pub fn with_question(
        mut self,
        topic: usize,
        sub_topic: usize,
        title: &str,
        difficulty: Difficulty,
    ) -> Self {
        self.next_question += 1;
        let id = format!("q{}", self.next_question);
        let question = Question::from_new(id, NewQuestion::new(title, difficulty));
        self.sheet.topics[topic].sub_topics[sub_topic]
            .questions
            .push(question);
        self
    }

    pub fn build(self) -> Sheet {
        self.sheet
    }
}

/// Address of the question at the given 0-based positions.
pub fn qref(sheet: &Sheet, topic: usize, sub_topic: usize, question: usize) -> QuestionRef {
    let t = &sheet.topics[topic];
    let st = &t.sub_topics[sub_topic];
    QuestionRef::new(
        t.id.clone(),
        st.id.clone(),
        st.questions[question].id.clone(),
    )
}

/// "Arrays" → "Basics" → an unsolved Easy question and a solved Hard one
/// with 125 seconds on the clock. Returns the sheet and the refs of both.
pub fn arrays_sheet() -> (Sheet, [QuestionRef; 2]) {
    let mut sheet = SheetFixture::new()
        .with_topic("Arrays")
        .with_sub_topic(0, "Basics")
        .with_question(0, 0, "Two Sum", Difficulty::Easy)
        .with_question(0, 0, "Trapping Rain Water", Difficulty::Hard)
        .build();
    {
        let hard = &mut sheet.topics[0].sub_topics[0].questions[1];
        hard.is_completed = true;
        hard.time_spent = 125;
    }
    let refs = [qref(&sheet, 0, 0, 0), qref(&sheet, 0, 0, 1)];
    (sheet, refs)
}
