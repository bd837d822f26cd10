/// Reviewer-facing importance scale: not important, somewhat important, important, very important.
pub const SCORES: [i32; 4] = [1, 2, 3, 4];

/// Maps a derived importance in `[0, 1]` onto the reviewer scale.
pub fn to_score(importance: f64) -> i32 {
	if !importance.is_finite() {
		return SCORES[0];
	}

	((importance * 4.0).round() as i32).clamp(SCORES[0], SCORES[SCORES.len() - 1])
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn derived_importance_rounds_onto_scale() {
		assert_eq!(to_score(0.0), 1);
		assert_eq!(to_score(0.3), 1);
		assert_eq!(to_score(0.4), 2);
		assert_eq!(to_score(0.62), 2);
		assert_eq!(to_score(0.7), 3);
		assert_eq!(to_score(1.0), 4);
		assert_eq!(to_score(f64::NAN), 1);
	}
}
