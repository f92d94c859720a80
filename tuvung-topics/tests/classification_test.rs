use std::collections::HashSet;

use tuvung_topics::{
    classify, reclassification_groups, seed_vocabulary, topic_vietnamese, vietnamese_label,
};

// ── Vietnamese label mapping ──────────────────────────────────────────────

#[test]
fn mapping_has_exactly_fifteen_topics() {
    assert_eq!(topic_vietnamese().len(), 15);
}

#[test]
fn food_maps_to_am_thuc() {
    assert_eq!(vietnamese_label("food"), Some("Ẩm thực"));
}

#[test]
fn unmapped_topic_has_no_label() {
    assert_eq!(vietnamese_label("astronomy"), None);
    assert_eq!(vietnamese_label(""), None);
}

#[test]
fn mapping_is_exact_equality_not_case_folded() {
    assert_eq!(vietnamese_label("Food"), None);
    assert_eq!(vietnamese_label("FOOD"), None);
}

#[test]
fn mapping_keys_are_unique() {
    let keys: HashSet<_> = topic_vietnamese().iter().map(|(en, _)| *en).collect();
    assert_eq!(keys.len(), topic_vietnamese().len());
}

// ── Reclassification groups ───────────────────────────────────────────────

#[test]
fn mother_classifies_as_gia_dinh() {
    assert_eq!(classify("mother"), Some("Gia đình"));
}

#[test]
fn word_outside_every_group_is_unclassified() {
    assert_eq!(classify("xylophone"), None);
}

#[test]
fn no_word_appears_in_two_groups() {
    let mut seen = HashSet::new();
    for group in reclassification_groups() {
        for word in group.words {
            assert!(seen.insert(*word), "word {word} appears in two groups");
        }
    }
}

#[test]
fn group_labels_are_known_vietnamese_labels() {
    let labels: HashSet<_> = topic_vietnamese().iter().map(|(_, vi)| *vi).collect();
    for group in reclassification_groups() {
        assert!(
            labels.contains(group.label),
            "group label {} is not a mapped Vietnamese label",
            group.label
        );
    }
}

// ── Seed vocabulary ───────────────────────────────────────────────────────

#[test]
fn seeds_include_business() {
    let seed = seed_vocabulary()
        .iter()
        .find(|s| s.word == "business")
        .unwrap();
    assert_eq!(seed.topic, "Kinh doanh");
    assert!(!seed.meaning.is_empty());
}

#[test]
fn seed_words_are_unique() {
    let words: HashSet<_> = seed_vocabulary().iter().map(|s| s.word).collect();
    assert_eq!(words.len(), seed_vocabulary().len());
}

#[test]
fn seed_topics_are_known_vietnamese_labels() {
    let labels: HashSet<_> = topic_vietnamese().iter().map(|(_, vi)| *vi).collect();
    for seed in seed_vocabulary() {
        assert!(
            labels.contains(seed.topic),
            "seed topic {} is not a mapped Vietnamese label",
            seed.topic
        );
    }
}
