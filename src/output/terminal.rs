// Colored terminal output for analysis reports.
//
// main.rs delegates all report display here.

use colored::Colorize;

use crate::duplicates::{CrossLessonDuplicate, LessonDuplicates};
use crate::grouping::Group;
use crate::report::{AnalysisReport, GroupStatus};

/// How many cross-lesson duplicates to list before summarizing.
const TOP_CROSS_LESSON: usize = 5;

/// Display a full analysis report. Scores below `anomaly_threshold` print red.
pub fn display_report(report: &AnalysisReport, anomaly_threshold: f64) {
    println!(
        "\n{}",
        format!("=== Skill Coherence: {} ===", report.institution_label()).bold()
    );
    println!(
        "  Grouping: {}  |  Groups: {}  |  Analyzed: {}  |  Lessons: {}",
        report.grouping,
        report.groups.len(),
        report.analyzed_group_count(),
        report.lesson_count
    );

    display_groups_detail(report, anomaly_threshold);
    display_anomalies(report);
    display_intra_lesson(&report.intra_lesson);
    display_cross_lesson(&report.cross_lesson);

    if !report.notes.is_empty() {
        println!("\n{}", "Notes:".dimmed());
        for note in &report.notes {
            println!("  {} {}", "-".dimmed(), note.dimmed());
        }
    }
}

fn display_groups_detail(report: &AnalysisReport, anomaly_threshold: f64) {
    println!("\n{}", "Group coherence scores:".bold());

    for group in &report.groups {
        match &group.status {
            GroupStatus::Analyzed(coherence) => {
                println!(
                    "  - {:<30} {}  ({} lessons)",
                    group.key,
                    colorize_score(coherence.group_score, anomaly_threshold),
                    group.members.len()
                );
                if !group.keywords.is_empty() {
                    let words: Vec<&str> = group.keywords.iter().map(|k| k.word.as_str()).collect();
                    println!("      Keywords: {}", words.join(", ").dimmed());
                }
                if let Some(diag) = &coherence.diagnostics {
                    println!("      Most cohesive:");
                    for s in &diag.most_cohesive {
                        println!("        • {}: {:.2}", s.lesson, s.score);
                    }
                    println!("      Least cohesive:");
                    for s in &diag.least_cohesive {
                        println!("        • {}: {:.2}", s.lesson, s.score);
                    }
                }
            }
            GroupStatus::NoVocabulary => {
                println!(
                    "  - {:<30} {}",
                    group.key,
                    "not analyzed (no usable vocabulary)".yellow()
                );
            }
            GroupStatus::TooSmall => {
                println!(
                    "  - {:<30} {}",
                    group.key,
                    "single lesson, not compared".dimmed()
                );
            }
        }
    }
}

fn display_anomalies(report: &AnalysisReport) {
    if report.anomalies.is_empty() {
        println!(
            "\n{}",
            "No anomalies detected. All compared lessons fit their groups.".green()
        );
        return;
    }

    println!(
        "\n{}",
        format!("Found {} potential anomalies:", report.anomalies.len())
            .yellow()
            .bold()
    );
    for (i, anomaly) in report.anomalies.iter().enumerate() {
        println!(
            "  {}. '{}' in '{}'",
            i + 1,
            anomaly.lesson_name,
            anomaly.group_key
        );
        println!("     Similarity score: {:.4}", anomaly.score);
        println!(
            "     Skills: {}",
            super::preview_skills(&anomaly.skills, 5).dimmed()
        );
    }
}

/// Display intra-lesson duplicates (clean lessons are counted, not listed).
pub fn display_intra_lesson(findings: &[LessonDuplicates]) {
    let dirty: Vec<&LessonDuplicates> = findings.iter().filter(|f| !f.is_clean()).collect();

    println!("\n{}", "Duplicate skills within lessons:".bold());
    println!("  Lessons checked: {}", findings.len());

    if dirty.is_empty() {
        println!("  {}", "All lessons have unique skills.".green());
        return;
    }

    for finding in dirty {
        let detail: Vec<String> = finding
            .duplicates
            .iter()
            .map(|d| format!("'{}' x{}", d.skill, d.occurrences))
            .collect();
        println!(
            "  {} {}: {}",
            "!".bright_red(),
            finding.lesson,
            detail.join(", ")
        );
    }
}

/// Display skills shared across lessons, most widespread first.
pub fn display_cross_lesson(findings: &[CrossLessonDuplicate]) {
    println!("\n{}", "Skills shared across lessons:".bold());

    if findings.is_empty() {
        println!("  {}", "No skill appears in more than one lesson.".dimmed());
        return;
    }

    println!("  Skills in multiple lessons: {}", findings.len());
    for dup in findings.iter().take(TOP_CROSS_LESSON) {
        let shown: Vec<&str> = dup.lessons.iter().take(3).map(String::as_str).collect();
        let more = dup.lesson_count().saturating_sub(shown.len());
        println!(
            "  - '{}' appears in {} lessons: {}{}",
            dup.skill,
            dup.lesson_count(),
            shown.join(", "),
            if more > 0 {
                format!(" (+{more} more)")
            } else {
                String::new()
            }
        );
    }

    if let Some(top) = findings.first() {
        println!(
            "\n  Most duplicated skill: '{}' appears in {} lessons",
            top.skill.bold(),
            top.lesson_count()
        );
    }
}

/// Display peer groups without scoring them.
pub fn display_groups(strategy: &str, groups: &[Group]) {
    println!(
        "\n{}",
        format!("=== Peer Groups ({strategy}, {} groups) ===", groups.len()).bold()
    );
    for group in groups {
        let marker = if group.is_comparable() {
            "".normal()
        } else {
            " (single lesson)".dimmed()
        };
        println!("  {} [{}]{}", group.key.bold(), group.members.len(), marker);
        for member in &group.members {
            println!("      {member}");
        }
    }
}

/// Where a score sits relative to the anomaly threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScoreBand {
    Low,
    Middling,
    High,
}

/// Low below the threshold, high from 0.5 or the threshold upward.
fn score_band(score: f64, anomaly_threshold: f64) -> ScoreBand {
    if score < anomaly_threshold {
        ScoreBand::Low
    } else if score < anomaly_threshold.max(0.5) {
        ScoreBand::Middling
    } else {
        ScoreBand::High
    }
}

fn colorize_score(score: f64, anomaly_threshold: f64) -> colored::ColoredString {
    let text = format!("{score:.4}");
    match score_band(score, anomaly_threshold) {
        ScoreBand::Low => text.red(),
        ScoreBand::Middling => text.yellow(),
        ScoreBand::High => text.green(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_band_follows_threshold() {
        assert_eq!(score_band(0.25, 0.2), ScoreBand::Middling);
        assert_eq!(score_band(0.25, 0.3), ScoreBand::Low);
        assert_eq!(score_band(0.6, 0.3), ScoreBand::High);
        assert_eq!(score_band(0.6, 0.7), ScoreBand::Low);
        assert_eq!(score_band(0.75, 0.7), ScoreBand::High);
    }
}
