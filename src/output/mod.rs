// Output formatting: terminal display and report generation.

pub mod markdown;
pub mod terminal;

/// Join the first `limit` skills, noting how many more were left out.
pub fn preview_skills(skills: &[String], limit: usize) -> String {
    let shown = skills
        .iter()
        .take(limit)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    if skills.len() > limit {
        format!("{shown}... (+{} more)", skills.len() - limit)
    } else {
        shown
    }
}
