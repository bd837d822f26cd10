use review_domain::{
	role,
	session::ReviewSession,
	tags::{self, AnnotationTag},
};

#[test]
fn session_counts_are_independent() {
	let mut first = ReviewSession::new();
	let mut second = ReviewSession::new();

	first.record_submissions(1);
	first.record_submissions(1);
	second.record_submissions(1);

	assert_eq!(first.submitted(), 2);
	assert_eq!(second.submitted(), 1);
}

#[test]
fn session_milestone_every_tenth_submission() {
	let mut session = ReviewSession::new();

	assert!(!session.milestone_reached());
	assert_eq!(session.progress_message(), "Number of feedbacks submitted: 0");

	for _ in 0..9 {
		session.record_submissions(1);
	}

	assert!(!session.milestone_reached());
	assert_eq!(session.record_submissions(1), 10);
	assert!(session.milestone_reached());
	assert_eq!(
		session.progress_message(),
		"You have submitted 10 feedbacks! Thank you very much! Let's keep going!"
	);

	session.record_submissions(1);

	assert_eq!(session.progress_message(), "Number of feedbacks submitted: 11");
}

#[test]
fn session_counts_stored_rows_not_calls() {
	let mut session = ReviewSession::new();

	assert_eq!(session.record_submissions(3), 3);
	assert_eq!(session.record_submissions(0), 3);
	assert!(!session.milestone_reached());
	assert_eq!(session.record_submissions(8), 11);
	assert!(session.milestone_reached(), "A batch crossing ten must report the milestone.");
	assert_eq!(session.record_submissions(0), 11);
	assert!(!session.milestone_reached());
}

#[test]
fn generated_skill_is_not_displayable() {
	let hidden = ["generated_industry", "generated_skill"];
	let raw = vec![
		AnnotationTag { tag_type: "generated_skill".to_string(), keyword: "python".to_string() },
		AnnotationTag { tag_type: "skill".to_string(), keyword: "python".to_string() },
	];
	let groups = tags::group_by_type(&raw, &hidden);

	assert_eq!(raw.len(), 2);
	assert_eq!(groups.len(), 1);
	assert_eq!(groups[0].tag_type, "skill");
}

#[test]
fn tag_serializes_type_field() {
	let tag = AnnotationTag { tag_type: "skill".to_string(), keyword: "sql".to_string() };
	let value = serde_json::to_value(&tag).expect("Failed to serialize tag.");

	assert_eq!(value, serde_json::json!({ "type": "skill", "keyword": "sql" }));
}

#[test]
fn role_vocabulary() {
	assert!(role::is_known("cxo"));
	assert!(!role::is_known("ceo"));
}
