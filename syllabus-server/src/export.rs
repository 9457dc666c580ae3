//! Plain-text syllabus report
//!
//! Used by `POST /api/report` and the batch tool's `course_{n}_report.txt`.

use std::fmt::Write;

use crate::models::SyllabusResult;

const RULE_WIDTH: usize = 80;

/// Render a pipeline result as a human-readable report
pub fn text_report(result: &SyllabusResult) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = write_report(&mut out, result);
    out
}

fn write_report(out: &mut String, result: &SyllabusResult) -> std::fmt::Result {
    let rule = "=".repeat(RULE_WIDTH);
    let thin = "-".repeat(RULE_WIDTH);
    let meta = &result.metadata;
    let structure = &result.module_structure;
    let analysis = &result.assessments.analysis;

    writeln!(out, "{}", rule)?;
    writeln!(out, "SYLLABUS: {}", meta.course_title)?;
    writeln!(out, "{}", rule)?;
    writeln!(out, "Duration: {}", meta.duration)?;
    writeln!(out, "Course type: {}", structure.course_type)?;
    writeln!(out, "Generated: {} (run {}, seed {})", meta.generated_date, meta.run_id, meta.seed)?;
    writeln!(out)?;
    writeln!(out, "Modules: {}", structure.total_modules)?;
    writeln!(out, "Total hours: {}", structure.total_hours)?;
    writeln!(out, "Course LOs: {}", result.outcomes.course_learning_outcomes.len())?;
    writeln!(out, "Questions: {}", result.questions.len())?;
    writeln!(
        out,
        "Quality Score: {:.1}/100 ({})",
        analysis.quality_score, analysis.overall_grade
    )?;

    writeln!(out)?;
    writeln!(out, "COURSE LEARNING OUTCOMES")?;
    writeln!(out, "{}", thin)?;
    for clo in &result.outcomes.course_learning_outcomes {
        let mapped: Vec<String> = clo.mapped_modules.iter().map(|id| format!("M{}", id)).collect();
        writeln!(
            out,
            "{} [{}] {} (modules: {})",
            clo.id,
            clo.bloom_level,
            clo.outcome,
            mapped.join(", ")
        )?;
    }

    writeln!(out)?;
    writeln!(out, "MODULES")?;
    writeln!(out, "{}", thin)?;
    for module in &structure.modules {
        writeln!(out, "Module {}: {} ({} hours)", module.id, module.title, module.hours)?;
        if !module.subtopics.is_empty() {
            writeln!(out, "  Subtopics: {}", module.subtopics.join(", "))?;
        }
        for (key, outcome) in module.keyed_outcomes() {
            writeln!(out, "  {} [{}] {}", key, outcome.bloom_level, outcome.outcome)?;
        }
    }

    writeln!(out)?;
    writeln!(out, "ASSESSMENT BLUEPRINT")?;
    writeln!(out, "{}", thin)?;
    for component in result.assessments.blueprint.components() {
        writeln!(
            out,
            "{:<20} {:>3}%  {}",
            component.kind.name(),
            component.weight,
            component.timing
        )?;
    }
    writeln!(out, "Total: {}%", result.assessments.blueprint.total_weight())?;
    for recommendation in result.assessments.blueprint.recommendations() {
        writeln!(out, "  * {}", recommendation)?;
    }

    let summary = &result.validation.summary;
    writeln!(out)?;
    writeln!(out, "VALIDATION")?;
    writeln!(out, "{}", thin)?;
    writeln!(
        out,
        "{}/{} outcomes valid, {} with warnings",
        summary.valid_outcomes, summary.total_outcomes, summary.outcomes_with_warnings
    )?;
    for recommendation in &result.validation.bloom_balance.recommendations {
        writeln!(out, "  * {}", recommendation)?;
    }

    writeln!(out)?;
    writeln!(out, "ALIGNMENT")?;
    writeln!(out, "{}", thin)?;
    writeln!(
        out,
        "{} outcome rows, {} without questions",
        result.alignment.matrix.len(),
        result.alignment.gaps.len()
    )?;
    for gap in &result.alignment.gaps {
        writeln!(out, "  {} ({}): {}", gap.learning_outcome_id, gap.module, gap.issue)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CourseSpec;
    use crate::services::SyllabusPipeline;
    use syllabus_common::config::PipelineConfig;

    #[test]
    fn test_report_sections() {
        let spec = CourseSpec {
            title: "Computer Networks".to_string(),
            description: "Network protocols, routing algorithms and socket programming.".to_string(),
            scope: "TCP/IP stack, network security and software defined networking.".to_string(),
            duration: "10 weeks".to_string(),
            num_modules: Some(4),
            outcomes_per_topic: Some(2),
            seed: None,
        };
        let result = SyllabusPipeline::new(&PipelineConfig::default())
            .run(&spec, 5)
            .unwrap();
        let report = text_report(&result);

        assert!(report.starts_with(&"=".repeat(RULE_WIDTH)));
        assert!(report.contains("SYLLABUS: Computer Networks"));
        assert!(report.contains("Modules: 4"));
        assert!(report.contains("Questions: 20"));
        assert!(report.contains("Total: 100%"));
        assert!(report.contains("M1-LO1"));
        assert!(report.contains("Quality Score: "));
    }
}
