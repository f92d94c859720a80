//! Seed vocabulary inserted by the bulk reclassification.
//!
//! Inserts skip any word that already exists; an existing row is never
//! overwritten.

/// One seed record: `{word, meaning, topic, level}`.
#[derive(Debug, Clone)]
pub struct SeedWord {
    pub word: &'static str,
    pub meaning: &'static str,
    pub topic: &'static str,
    pub level: &'static str,
}

/// The fixed seed list.
pub fn seed_vocabulary() -> &'static [SeedWord] {
    &[
        SeedWord {
            word: "business",
            meaning: "kinh doanh",
            topic: "Kinh doanh",
            level: "intermediate",
        },
        SeedWord {
            word: "meeting",
            meaning: "cuộc họp",
            topic: "Kinh doanh",
            level: "intermediate",
        },
        SeedWord {
            word: "contract",
            meaning: "hợp đồng",
            topic: "Kinh doanh",
            level: "advanced",
        },
        SeedWord {
            word: "hospital",
            meaning: "bệnh viện",
            topic: "Sức khỏe",
            level: "beginner",
        },
        SeedWord {
            word: "medicine",
            meaning: "thuốc",
            topic: "Sức khỏe",
            level: "beginner",
        },
        SeedWord {
            word: "exercise",
            meaning: "tập thể dục",
            topic: "Sức khỏe",
            level: "beginner",
        },
        SeedWord {
            word: "football",
            meaning: "bóng đá",
            topic: "Thể thao",
            level: "beginner",
        },
        SeedWord {
            word: "swimming",
            meaning: "bơi lội",
            topic: "Thể thao",
            level: "beginner",
        },
        SeedWord {
            word: "guitar",
            meaning: "đàn ghi-ta",
            topic: "Âm nhạc",
            level: "beginner",
        },
        SeedWord {
            word: "concert",
            meaning: "buổi hòa nhạc",
            topic: "Âm nhạc",
            level: "intermediate",
        },
        SeedWord {
            word: "forest",
            meaning: "rừng",
            topic: "Thiên nhiên",
            level: "beginner",
        },
        SeedWord {
            word: "river",
            meaning: "dòng sông",
            topic: "Thiên nhiên",
            level: "beginner",
        },
    ]
}
