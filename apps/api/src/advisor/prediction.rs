#![allow(dead_code)]

//! Grade-prediction and difficulty-scoring heuristics.
//!
//! Not invoked by the conversational pipeline yet; retained for a future
//! per-student recommendation surface that would need GPA-aware ranking.

/// A student's academic record, as a future recommendation feature would
/// supply it. Distinct from `SearchProfile`, which carries only search
/// intent, not grades.
#[derive(Debug, Clone)]
pub struct StudentRecord {
    pub current_gpa: f64,
    /// Canonical subject codes the student is strong in, e.g. "COMP".
    pub strong_subjects: Vec<String>,
}

/// Predicts a student's likely grade in a course, with a confidence scalar.
///
/// Linear blend: the class average pulled halfway toward the student's GPA,
/// plus a flat bonus when the course subject is one of their strengths.
/// Returns (0.0, 0.0) when the course carries no usable average.
pub fn predict_grade(
    course_code: &str,
    class_average: Option<f64>,
    student: Option<&StudentRecord>,
) -> (f64, f64) {
    let base = match class_average {
        Some(avg) if avg != 0.0 && !avg.is_nan() => avg,
        _ => return (0.0, 0.0),
    };

    let mut predicted = base;
    let mut confidence = 0.3;

    if let Some(student) = student {
        predicted = (base + student.current_gpa) / 2.0;
        confidence += 0.2;

        let subject = if course_code.len() >= 4 {
            &course_code[..4]
        } else {
            ""
        };
        if student.strong_subjects.iter().any(|s| s == subject) {
            predicted += 0.2;
            confidence += 0.1;
        }
    }

    (predicted.clamp(0.0, 4.0), confidence)
}

/// Maps a class average to a discrete difficulty score: the lower the
/// average, the harder the course. Missing average lands in the middle.
pub fn difficulty_score(class_average: Option<f64>) -> f64 {
    let Some(avg) = class_average.filter(|a| *a != 0.0) else {
        return 2.5;
    };
    if avg >= 3.7 {
        1.5
    } else if avg >= 3.3 {
        2.0
    } else if avg >= 3.0 {
        2.5
    } else if avg >= 2.7 {
        3.0
    } else {
        3.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(gpa: f64, strong: &[&str]) -> StudentRecord {
        StudentRecord {
            current_gpa: gpa,
            strong_subjects: strong.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_no_average_means_no_prediction() {
        assert_eq!(predict_grade("COMP202", None, None), (0.0, 0.0));
        assert_eq!(predict_grade("COMP202", Some(0.0), None), (0.0, 0.0));
    }

    #[test]
    fn test_without_student_prediction_is_class_average() {
        let (grade, confidence) = predict_grade("COMP202", Some(3.2), None);
        assert_eq!(grade, 3.2);
        assert_eq!(confidence, 0.3);
    }

    #[test]
    fn test_prediction_blends_toward_student_gpa() {
        let (grade, confidence) = predict_grade("MATH240", Some(3.0), Some(&student(3.8, &[])));
        assert!((grade - 3.4).abs() < f64::EPSILON);
        assert!((confidence - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_strong_subject_bonus() {
        let s = student(3.0, &["COMP"]);
        let (with_bonus, confidence) = predict_grade("COMP202", Some(3.0), Some(&s));
        assert!((with_bonus - 3.2).abs() < f64::EPSILON);
        assert!((confidence - 0.6).abs() < f64::EPSILON);

        let (without, _) = predict_grade("MATH240", Some(3.0), Some(&s));
        assert!((without - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_prediction_is_clamped_to_grade_scale() {
        let (grade, _) = predict_grade("COMP202", Some(4.0), Some(&student(4.0, &["COMP"])));
        assert_eq!(grade, 4.0);
    }

    #[test]
    fn test_difficulty_buckets() {
        assert_eq!(difficulty_score(Some(3.9)), 1.5);
        assert_eq!(difficulty_score(Some(3.5)), 2.0);
        assert_eq!(difficulty_score(Some(3.1)), 2.5);
        assert_eq!(difficulty_score(Some(2.8)), 3.0);
        assert_eq!(difficulty_score(Some(2.2)), 3.5);
    }

    #[test]
    fn test_difficulty_threshold_boundaries_are_inclusive() {
        assert_eq!(difficulty_score(Some(3.7)), 1.5);
        assert_eq!(difficulty_score(Some(3.3)), 2.0);
        assert_eq!(difficulty_score(Some(3.0)), 2.5);
        assert_eq!(difficulty_score(Some(2.7)), 3.0);
    }

    #[test]
    fn test_missing_average_is_middle_difficulty() {
        assert_eq!(difficulty_score(None), 2.5);
        assert_eq!(difficulty_score(Some(0.0)), 2.5);
    }
}
