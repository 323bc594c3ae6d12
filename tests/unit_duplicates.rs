// Unit tests for intra-lesson and cross-lesson duplicate detection.

use skillaudit::catalogue::{Catalogue, Institution, Lesson};
use skillaudit::duplicates::{find_intra_lesson, SkillOccurrenceIndex};

fn institution(name: &str, lessons: Vec<Lesson>) -> Institution {
    Institution {
        name: Some(name.to_string()),
        country: None,
        lessons,
    }
}

// ============================================================
// Intra-lesson
// ============================================================

#[test]
fn algebra_scenario() {
    let findings = find_intra_lesson(&[Lesson::new("Algebra", &["sets", "sets", "functions"])]);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].lesson, "Algebra");
    assert_eq!(findings[0].duplicates.len(), 1);
    assert_eq!(findings[0].count_for("sets"), Some(1));
}

#[test]
fn duplicate_count_is_occurrences_minus_one() {
    let skills = ["a", "b", "a", "c", "a", "b"];
    let findings = find_intra_lesson(&[Lesson::new("L", &skills)]);
    for dup in &findings[0].duplicates {
        let occurrences = skills.iter().filter(|s| **s == dup.skill).count();
        assert_eq!(dup.occurrences, occurrences);
        assert_eq!(dup.duplicate_count, occurrences - 1);
    }
    assert_eq!(findings[0].count_for("c"), None);
}

#[test]
fn appending_first_skill_always_creates_duplicate() {
    let lessons = vec![
        Lesson::new("Physics 101", &["calculus", "mechanics"]),
        Lesson::new("History 101", &["rhetoric", "archives"]),
    ];
    let doubled: Vec<Lesson> = lessons
        .iter()
        .map(|l| {
            let mut l = l.clone();
            l.skills.push(l.skills[0].clone());
            l
        })
        .collect();

    assert!(find_intra_lesson(&lessons).iter().all(|f| f.is_clean()));
    for finding in find_intra_lesson(&doubled) {
        assert_eq!(finding.duplicates.len(), 1, "{}", finding.lesson);
    }
}

// ============================================================
// Cross-lesson
// ============================================================

#[test]
fn repeats_in_one_lesson_count_as_one_lesson() {
    let inst = institution(
        "Cambridge",
        vec![
            Lesson::new("A", &["sets", "sets"]),
            Lesson::new("B", &["sets"]),
        ],
    );

    let cross = SkillOccurrenceIndex::from_institution(&inst).duplicated();
    assert_eq!(cross.len(), 1);
    assert_eq!(cross[0].skill, "sets");
    assert_eq!(cross[0].lesson_count(), 2);

    let intra = find_intra_lesson(&inst.lessons);
    assert_eq!(intra[0].count_for("sets"), Some(1));
    assert!(intra[1].is_clean());
}

#[test]
fn distinct_lesson_counts_match_catalogue() {
    let inst = institution(
        "Cambridge",
        vec![
            Lesson::new("Physics 101", &["calculus", "mechanics"]),
            Lesson::new("Physics 201", &["calculus", "thermodynamics"]),
            Lesson::new("Maths 101", &["calculus", "proof"]),
            Lesson::new("History 101", &["rhetoric"]),
        ],
    );
    let index = SkillOccurrenceIndex::from_institution(&inst);

    for entry in index.occurrences() {
        let expected = inst
            .lessons
            .iter()
            .filter(|l| l.skills.contains(&entry.skill))
            .count();
        assert_eq!(entry.lessons.len(), expected, "skill {}", entry.skill);
    }

    let cross = index.duplicated();
    assert_eq!(cross.len(), 1);
    assert_eq!(cross[0].lessons, vec!["Physics 101", "Physics 201", "Maths 101"]);
}

#[test]
fn no_shared_skills_means_no_findings() {
    let inst = institution(
        "Cambridge",
        vec![Lesson::new("A", &["x"]), Lesson::new("B", &["y"])],
    );
    assert!(SkillOccurrenceIndex::from_institution(&inst).duplicated().is_empty());
}

#[test]
fn cross_institution_scope() {
    let catalogue = Catalogue {
        institutions: vec![
            institution(
                "Cambridge",
                vec![
                    Lesson::new("Physics 101", &["calculus"]),
                    Lesson::new("Maths 101", &["calculus"]),
                ],
            ),
            institution("ETH", vec![Lesson::new("Analysis", &["calculus"])]),
        ],
    };

    let all = SkillOccurrenceIndex::from_catalogue(&catalogue, None).duplicated();
    assert_eq!(all[0].lesson_count(), 3);
    assert!(all[0].lessons.contains(&"ETH / Analysis".to_string()));

    let cambridge = SkillOccurrenceIndex::from_catalogue(&catalogue, Some("Cambridge")).duplicated();
    assert_eq!(cambridge[0].lessons, vec!["Physics 101", "Maths 101"]);

    let eth = SkillOccurrenceIndex::from_catalogue(&catalogue, Some("ETH")).duplicated();
    assert!(eth.is_empty());
}
