//! Word groups for the one-time bulk topic reclassification.
//!
//! Each group pairs a topic label with the words that belong to it. The
//! reclassification updates any vocabulary row whose `word` appears in a
//! group; words outside every group keep whatever topic they had.

/// A topic label and the words classified under it.
#[derive(Debug, Clone)]
pub struct TopicGroup {
    pub label: &'static str,
    pub words: &'static [&'static str],
}

/// The fixed group list, applied in order.
pub fn reclassification_groups() -> &'static [TopicGroup] {
    &[
        TopicGroup {
            label: "Gia đình",
            words: &[
                "mother",
                "father",
                "brother",
                "sister",
                "grandmother",
                "grandfather",
                "aunt",
                "uncle",
                "cousin",
            ],
        },
        TopicGroup {
            label: "Động vật",
            words: &[
                "cat", "dog", "bird", "fish", "horse", "elephant", "tiger", "monkey", "rabbit",
            ],
        },
        TopicGroup {
            label: "Ẩm thực",
            words: &[
                "rice", "bread", "noodle", "chicken", "beef", "vegetable", "fruit", "soup",
            ],
        },
        TopicGroup {
            label: "Du lịch",
            words: &[
                "airport", "hotel", "passport", "ticket", "luggage", "beach", "mountain",
            ],
        },
        TopicGroup {
            label: "Công nghệ",
            words: &[
                "computer", "internet", "software", "keyboard", "website", "network",
            ],
        },
        TopicGroup {
            label: "Giáo dục",
            words: &[
                "school", "teacher", "student", "lesson", "homework", "exam", "library",
            ],
        },
    ]
}

/// Topic label for a word, if the word appears in any group.
pub fn classify(word: &str) -> Option<&'static str> {
    reclassification_groups()
        .iter()
        .find(|g| g.words.contains(&word))
        .map(|g| g.label)
}
