// Full analysis run: fetch -> group -> vectorize -> similarity -> coherence,
// with duplicate detection running alongside over the ungrouped lessons.
//
// Per-group failures (no vocabulary, too few members) are recovered here
// and become group statuses in the report. Only a failed fetch or a
// malformed contract aborts the run.

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::catalogue::{Institution, Lesson};
use crate::duplicates::{find_intra_lesson, SkillOccurrenceIndex};
use crate::error::AnalysisError;
use crate::grouping::{Group, GroupingStrategy};
use crate::report::{self, AnalysisReport, GroupOutcome};
use crate::scoring::coherence::{self, CoherenceSettings};
use crate::similarity::keywords::KeywordProfiler;
use crate::similarity::{SimilarityMatrix, SkillVectorizer, TfIdfVectorizer};
use crate::source::SkillSource;

/// Settings for one analysis run.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSettings {
    pub coherence: CoherenceSettings,
    /// Keywords kept per analyzed group (0 disables keyword profiles)
    pub keyword_count: usize,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            coherence: CoherenceSettings::default(),
            keyword_count: 5,
        }
    }
}

/// Fetch a catalogue snapshot and analyze one institution from it.
///
/// `institution` selects by name; None takes the first institution.
pub async fn run(
    source: &dyn SkillSource,
    strategy: &dyn GroupingStrategy,
    settings: &AnalysisSettings,
    institution: Option<&str>,
) -> Result<AnalysisReport> {
    info!(source = %source.describe(), "Fetching skill catalogue");
    let catalogue = source.fetch().await?;
    let selected = catalogue.institution(institution)?;

    info!(
        institution = %selected.label(),
        lessons = selected.lessons.len(),
        grouping = strategy.name(),
        "Analyzing skill catalogue"
    );

    Ok(analyze_lessons(selected, strategy, settings))
}

/// Synchronous core of a run over one institution's lessons.
pub fn analyze_lessons(
    institution: &Institution,
    strategy: &dyn GroupingStrategy,
    settings: &AnalysisSettings,
) -> AnalysisReport {
    let groups = strategy.group(&institution.lessons);
    debug!(groups = groups.len(), "Grouped lessons");

    let vectorizer = TfIdfVectorizer::default();
    let profiler = KeywordProfiler {
        top_n: settings.keyword_count,
    };

    let outcomes: Vec<GroupOutcome> = groups
        .into_iter()
        .map(|group| analyze_group(group, institution, &vectorizer, &profiler, settings))
        .collect();

    let intra = find_intra_lesson(&institution.lessons);
    let cross = SkillOccurrenceIndex::from_institution(institution).duplicated();

    let report = report::aggregate(institution, strategy.name(), outcomes, intra, cross);

    info!(
        groups = report.groups.len(),
        analyzed = report.analyzed_group_count(),
        anomalies = report.anomalies.len(),
        cross_lesson = report.cross_lesson.len(),
        "Analysis complete"
    );

    report
}

fn analyze_group(
    group: Group,
    institution: &Institution,
    vectorizer: &dyn SkillVectorizer,
    profiler: &KeywordProfiler,
    settings: &AnalysisSettings,
) -> GroupOutcome {
    if !group.is_comparable() {
        debug!(group = %group.key, "Skipping single-member group");
        let reason = AnalysisError::InsufficientGroupSize {
            group: group.key.clone(),
            members: group.members.len(),
        };
        return GroupOutcome::Skipped { group, reason };
    }

    let members: Vec<&Lesson> = group
        .members
        .iter()
        .filter_map(|name| institution.lesson(name))
        .collect();

    let scored = vectorizer
        .vectorize(&group.key, &members)
        .and_then(|vectors| SimilarityMatrix::compute(&group.key, &vectors));

    let matrix = match scored {
        Ok(matrix) => matrix,
        Err(reason) => {
            warn!(group = %group.key, error = %reason, "Group not analyzed");
            return GroupOutcome::Skipped { group, reason };
        }
    };

    let coherence = coherence::score_group(&group.key, &members, &matrix, &settings.coherence);

    let keywords = if settings.keyword_count == 0 {
        Vec::new()
    } else {
        let documents: Vec<String> = members.iter().map(|l| l.skill_document()).collect();
        match profiler.profile(&documents) {
            Ok(keywords) => keywords,
            Err(e) => {
                debug!(group = %group.key, error = %e, "No keyword profile");
                Vec::new()
            }
        }
    };

    debug!(
        group = %group.key,
        members = members.len(),
        score = coherence.group_score,
        anomalies = coherence.anomalies.len(),
        "Scored group"
    );

    GroupOutcome::Analyzed {
        group,
        coherence,
        keywords,
    }
}
