//! Step completion, accessibility, and progress derivation.
//!
//! Everything here is a pure function of `(current_step, draft)`. Gating
//! rule: a step can be entered if it is at or before the current step, or if
//! it is already complete — jumping back is always allowed, jumping ahead
//! past an incomplete gate is not.

use crate::types::draft::STEP_COUNT;
use crate::types::Draft;

/// Static description of one wizard step, shown in the sidebar.
#[derive(Debug, Clone, Copy)]
pub struct StepInfo {
    pub id: u8,
    pub title: &'static str,
    pub description: &'static str,
}

/// The eight wizard steps in order.
pub const STEPS: [StepInfo; STEP_COUNT as usize] = [
    StepInfo {
        id: 1,
        title: "Initial Questions",
        description: "Basic invention details",
    },
    StepInfo {
        id: 2,
        title: "Background",
        description: "Prior art and context",
    },
    StepInfo {
        id: 3,
        title: "Summary",
        description: "Brief overview",
    },
    StepInfo {
        id: 4,
        title: "Detailed Description",
        description: "Technical specifications",
    },
    StepInfo {
        id: 5,
        title: "Claims",
        description: "Legal protection scope",
    },
    StepInfo {
        id: 6,
        title: "Drawings",
        description: "Visual representations",
    },
    StepInfo {
        id: 7,
        title: "Abstract",
        description: "Executive summary",
    },
    StepInfo {
        id: 8,
        title: "Preview & Download",
        description: "Final review",
    },
];

/// Derived display state for one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepStatus {
    pub completed: bool,
    pub accessible: bool,
}

/// Whether a step's required fields are populated.
///
/// Step 1 needs title, field of invention, and brief summary; steps 2-5 and
/// 7 need their single section; drawings (6) and preview (8) have no
/// required fields and always count as complete.
pub fn is_completed(step: u8, draft: &Draft) -> bool {
    let filled = |s: &str| !s.trim().is_empty();
    match step {
        1 => {
            filled(&draft.title)
                && filled(&draft.field_of_invention)
                && filled(&draft.brief_summary)
        }
        2 => filled(&draft.background),
        3 => filled(&draft.summary),
        4 => filled(&draft.detailed_description),
        5 => filled(&draft.claims),
        6 => true,
        7 => filled(&draft.abstract_text),
        8 => true,
        _ => false,
    }
}

/// Whether the user may jump to `step` from `current_step`.
pub fn is_accessible(step: u8, current_step: u8, draft: &Draft) -> bool {
    step >= 1 && step <= STEP_COUNT && (step <= current_step || is_completed(step, draft))
}

/// Status for one step.
pub fn step_status(step: u8, current_step: u8, draft: &Draft) -> StepStatus {
    StepStatus {
        completed: is_completed(step, draft),
        accessible: is_accessible(step, current_step, draft),
    }
}

/// Completion fraction for the progress gauge. Cosmetic only; never used for
/// gating.
pub fn progress_fraction(current_step: u8) -> f64 {
    f64::from(current_step.min(STEP_COUNT)) / f64::from(STEP_COUNT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft_with(f: impl FnOnce(&mut Draft)) -> Draft {
        let mut draft = Draft {
            id: "d1".to_string(),
            project_id: "p1".to_string(),
            ..Draft::default()
        };
        f(&mut draft);
        draft
    }

    #[test]
    fn step1_requires_all_three_fields() {
        let complete = draft_with(|d| {
            d.title = "X".to_string();
            d.field_of_invention = "Y".to_string();
            d.brief_summary = "Z".to_string();
        });
        assert!(is_completed(1, &complete));

        for blank in ["title", "field", "summary"] {
            let draft = draft_with(|d| {
                d.title = if blank == "title" { String::new() } else { "X".into() };
                d.field_of_invention =
                    if blank == "field" { String::new() } else { "Y".into() };
                d.brief_summary =
                    if blank == "summary" { String::new() } else { "Z".into() };
            });
            assert!(!is_completed(1, &draft), "blank {blank} should fail");
        }
    }

    #[test]
    fn whitespace_only_counts_as_blank() {
        let draft = draft_with(|d| {
            d.title = "  ".to_string();
            d.field_of_invention = "Y".to_string();
            d.brief_summary = "Z".to_string();
        });
        assert!(!is_completed(1, &draft));
    }

    #[test]
    fn section_steps_complete_when_filled() {
        let draft = draft_with(|d| d.claims = "1. A device...".to_string());
        assert!(!is_completed(2, &draft));
        assert!(is_completed(5, &draft));
    }

    #[test]
    fn drawings_and_preview_always_complete() {
        let draft = draft_with(|_| {});
        assert!(is_completed(6, &draft));
        assert!(is_completed(8, &draft));
    }

    #[test]
    fn accessibility_matches_definition() {
        let draft = draft_with(|d| d.summary = "overview".to_string());
        let current = 2;
        for step in 1..=STEP_COUNT {
            let expected = step <= current || is_completed(step, &draft);
            assert_eq!(
                is_accessible(step, current, &draft),
                expected,
                "step {step}"
            );
        }
        // Step 3 is complete, so it is reachable ahead of the gate; step 4
        // is not.
        assert!(is_accessible(3, current, &draft));
        assert!(!is_accessible(4, current, &draft));
        // Steps 6 and 8 are always accessible.
        assert!(is_accessible(6, current, &draft));
        assert!(is_accessible(8, current, &draft));
    }

    #[test]
    fn out_of_range_steps_never_accessible() {
        let draft = draft_with(|_| {});
        assert!(!is_accessible(0, 4, &draft));
        assert!(!is_accessible(9, 4, &draft));
    }

    #[test]
    fn progress_is_step_over_eight() {
        assert!((progress_fraction(1) - 0.125).abs() < f64::EPSILON);
        assert!((progress_fraction(8) - 1.0).abs() < f64::EPSILON);
    }
}
