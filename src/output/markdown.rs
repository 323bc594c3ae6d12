// Markdown report generation.
//
// Writes the same content as the terminal report to a file that can be
// attached to a curriculum review. Returns the path written.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;

use crate::report::{AnalysisReport, GroupStatus};

/// Render a report as markdown.
pub fn render_report(report: &AnalysisReport) -> String {
    let mut md = String::new();

    let _ = writeln!(md, "# Skill Audit: {}\n", report.institution_label());
    let _ = writeln!(
        md,
        "Generated {} · grouping: {} · {} lessons in {} groups ({} analyzed)\n",
        Utc::now().format("%Y-%m-%d %H:%M UTC"),
        report.grouping,
        report.lesson_count,
        report.groups.len(),
        report.analyzed_group_count()
    );

    md.push_str("## Group coherence\n\n");
    md.push_str("| Group | Lessons | Coherence | Keywords |\n");
    md.push_str("|---|---:|---:|---|\n");
    for group in &report.groups {
        let score = match &group.status {
            GroupStatus::Analyzed(c) => format!("{:.4}", c.group_score),
            GroupStatus::NoVocabulary => "no vocabulary".to_string(),
            GroupStatus::TooSmall => "not compared".to_string(),
        };
        let keywords: Vec<&str> = group.keywords.iter().map(|k| k.word.as_str()).collect();
        let _ = writeln!(
            md,
            "| {} | {} | {} | {} |",
            escape(&group.key),
            group.members.len(),
            score,
            escape(&keywords.join(", "))
        );
    }

    md.push_str("\n## Anomalies\n\n");
    if report.anomalies.is_empty() {
        md.push_str("None detected.\n");
    } else {
        for anomaly in &report.anomalies {
            let _ = writeln!(
                md,
                "- **{}** in *{}*: {:.4} ({})",
                escape(&anomaly.lesson_name),
                escape(&anomaly.group_key),
                anomaly.score,
                escape(&super::preview_skills(&anomaly.skills, 5))
            );
        }
    }

    md.push_str("\n## Duplicate skills within lessons\n\n");
    let mut any = false;
    for finding in report.lessons_with_duplicates() {
        any = true;
        let detail: Vec<String> = finding
            .duplicates
            .iter()
            .map(|d| format!("`{}` ×{}", d.skill, d.occurrences))
            .collect();
        let _ = writeln!(md, "- **{}**: {}", escape(&finding.lesson), detail.join(", "));
    }
    if !any {
        md.push_str("None.\n");
    }

    md.push_str("\n## Skills shared across lessons\n\n");
    if report.cross_lesson.is_empty() {
        md.push_str("None.\n");
    } else {
        md.push_str("| Skill | Lessons | Occurrences | Where |\n");
        md.push_str("|---|---:|---:|---|\n");
        for dup in &report.cross_lesson {
            let _ = writeln!(
                md,
                "| {} | {} | {} | {} |",
                escape(&dup.skill),
                dup.lesson_count(),
                dup.occurrences,
                escape(&dup.lessons.join(", "))
            );
        }
    }

    if !report.notes.is_empty() {
        md.push_str("\n## Notes\n\n");
        for note in &report.notes {
            let _ = writeln!(md, "- {}", escape(note));
        }
    }

    md
}

/// Write the markdown report, creating parent directories as needed.
pub fn generate_report(report: &AnalysisReport, path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create report directory {}", parent.display()))?;
        }
    }

    std::fs::write(path, render_report(report))
        .with_context(|| format!("Failed to write report to {}", path.display()))?;

    Ok(path.display().to_string())
}

/// Keep table cells intact when names contain pipes.
fn escape(text: &str) -> String {
    text.replace('|', "\\|")
}
