pub fn render_schema() -> String {
	expand_includes(include_str!("../../../sql/init.sql"))
}

fn expand_includes(sql: &str) -> String {
	let mut out = String::new();

	for line in sql.lines() {
		let trimmed = line.trim();

		if trimmed.starts_with("--") {
			continue;
		}

		if let Some(path) = trimmed.strip_prefix("\\ir ") {
			match path.trim() {
				"tables/001_people.sql" =>
					out.push_str(include_str!("../../../sql/tables/001_people.sql")),
				"tables/002_linkedin_people_experience.sql" => out
					.push_str(include_str!("../../../sql/tables/002_linkedin_people_experience.sql")),
				"tables/003_linkedin_people_experience_keywords.sql" => out.push_str(include_str!(
					"../../../sql/tables/003_linkedin_people_experience_keywords.sql"
				)),
				"tables/004_linkedin_people_experience_feedback.sql" => out.push_str(include_str!(
					"../../../sql/tables/004_linkedin_people_experience_feedback.sql"
				)),
				_ => out.push_str(line),
			}
		} else {
			out.push_str(line);
		}

		out.push('\n');
	}

	out
}
