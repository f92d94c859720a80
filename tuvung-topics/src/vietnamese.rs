//! Fixed English-topic → Vietnamese-label mapping.
//!
//! Used by the backfill that populated `topicVi` from the free-text
//! `topic` column. Matching is exact equality; topics outside this table
//! stay unlabeled.

/// The 15 recognized topics and their Vietnamese labels.
pub fn topic_vietnamese() -> &'static [(&'static str, &'static str)] {
    &[
        ("animals", "Động vật"),
        ("food", "Ẩm thực"),
        ("family", "Gia đình"),
        ("travel", "Du lịch"),
        ("business", "Kinh doanh"),
        ("technology", "Công nghệ"),
        ("education", "Giáo dục"),
        ("health", "Sức khỏe"),
        ("sports", "Thể thao"),
        ("music", "Âm nhạc"),
        ("nature", "Thiên nhiên"),
        ("clothing", "Trang phục"),
        ("weather", "Thời tiết"),
        ("emotions", "Cảm xúc"),
        ("colors", "Màu sắc"),
    ]
}

/// Vietnamese label for an English topic, if the topic is recognized.
pub fn vietnamese_label(topic: &str) -> Option<&'static str> {
    topic_vietnamese()
        .iter()
        .find(|(en, _)| *en == topic)
        .map(|(_, vi)| *vi)
}
